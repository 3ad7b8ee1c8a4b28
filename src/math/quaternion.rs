//! Rotation quaternions, used for interpolating between orientations.

use bytemuck::{Pod, Zeroable};

use super::vector::Vector3;
use super::EPSILON;

/// A rotation represented as a (x, y, z, w) quaternion.
///
/// Unit length is assumed but not enforced on construction; operations that
/// require it ([`Quaternion::slerp`]) normalize their inputs first.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Quaternion {
    /// X (i) component.
    pub x: f32,
    /// Y (j) component.
    pub y: f32,
    /// Z (k) component.
    pub z: f32,
    /// W (real) component.
    pub w: f32,
}

impl Default for Quaternion {
    /// The identity rotation.
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl Quaternion {
    /// Creates a quaternion from components.
    #[inline]
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// The rotation of `radians` about `axis` (assumed unit length).
    #[must_use]
    pub fn from_axis_angle(axis: Vector3, radians: f32) -> Self {
        let (sin_h, cos_h) = (radians / 2.0).sin_cos();
        Self::new(sin_h * axis.x, sin_h * axis.y, sin_h * axis.z, cos_h)
    }

    /// Builds a rotation from Euler angles applied in Z, then Y, then X
    /// order (angles given as x, y, z components in radians).
    #[must_use]
    pub fn from_euler_angles_zyx(angles: Vector3) -> Self {
        let rot_x = Self::from_axis_angle(Vector3::unit_x(), angles.x);
        let rot_y = Self::from_axis_angle(Vector3::unit_y(), angles.y);
        let rot_z = Self::from_axis_angle(Vector3::unit_z(), angles.z);
        rot_z * rot_y * rot_x
    }

    /// Recovers the ZYX Euler angles for this rotation.
    #[must_use]
    pub fn to_euler_angles_zyx(self) -> Vector3 {
        // roll (x-axis rotation)
        let sinr = 2.0 * (self.w * self.x + self.y * self.z);
        let cosr = 1.0 - 2.0 * (self.x * self.x + self.y * self.y);
        let roll = sinr.atan2(cosr);

        // pitch (y-axis rotation); 90 degrees if out of asin's domain
        let sinp = 2.0 * (self.w * self.y - self.z * self.x);
        let pitch = if sinp.abs() >= 1.0 {
            (std::f32::consts::PI / 2.0).copysign(sinp)
        } else {
            sinp.asin()
        };

        // yaw (z-axis rotation)
        let siny = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        let yaw = siny.atan2(cosy);

        Vector3::new(roll, pitch, yaw)
    }

    /// Four-component dot product.
    #[inline]
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Quaternion magnitude.
    #[inline]
    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Returns a unit-length copy. The zero quaternion is returned unchanged
    /// rather than producing NaNs.
    #[must_use]
    pub fn to_unit(self) -> Self {
        let len_sq = self.dot(self);
        if len_sq < EPSILON {
            return self;
        }
        let s = 1.0 / len_sq.sqrt();
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }

    /// The conjugate (inverse rotation for a unit quaternion).
    #[inline]
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Spherical linear interpolation from `self` (alpha = 0) to `other`
    /// (alpha = 1).
    ///
    /// Takes the shortest path by flipping the sign of `other` when the dot
    /// product is negative, and falls back to normalized linear
    /// interpolation when the inputs are nearly parallel (dot > 0.9995) to
    /// avoid dividing by a near-zero sine.
    #[must_use]
    pub fn slerp(self, other: Self, alpha: f32) -> Self {
        // only unit quaternions are valid rotations
        let v0 = self.to_unit();
        let mut v1 = other.to_unit();

        let mut dot = v0.dot(v1);

        // opposite-handed inputs would interpolate the long way around
        if dot < 0.0 {
            v1 = -v1;
            dot = -dot;
        }

        const DOT_THRESHOLD: f32 = 0.9995;
        if dot > DOT_THRESHOLD {
            return (v0 + alpha * (v1 - v0)).to_unit();
        }

        // stay within acos's domain
        let dot = dot.clamp(-1.0, 1.0);
        let theta_0 = dot.acos();
        let theta = theta_0 * alpha;

        let s0 = theta.cos() - dot * theta.sin() / theta_0.sin();
        let s1 = theta.sin() / theta_0.sin();

        s0 * v0 + s1 * v1
    }
}

impl PartialEq for Quaternion {
    /// Tolerance-based comparison, not bitwise.
    fn eq(&self, other: &Self) -> bool {
        (other.x - self.x).abs() < EPSILON
            && (other.y - self.y).abs() < EPSILON
            && (other.z - self.z).abs() < EPSILON
            && (other.w - self.w).abs() < EPSILON
    }
}

impl std::ops::Mul for Quaternion {
    type Output = Self;

    /// Hamilton product; composes rotations (rhs applied first).
    fn mul(self, rhs: Self) -> Self {
        let imag1 = Vector3::new(self.x, self.y, self.z);
        let imag2 = Vector3::new(rhs.x, rhs.y, rhs.z);

        let real = self.w * rhs.w - imag1.dot(imag2);
        let imag = self.w * imag2 + rhs.w * imag1 + imag1.cross(imag2);

        Self::new(imag.x, imag.y, imag.z, real)
    }
}

impl std::ops::Mul<f32> for Quaternion {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl std::ops::Mul<Quaternion> for f32 {
    type Output = Quaternion;
    fn mul(self, q: Quaternion) -> Quaternion {
        q * self
    }
}

impl std::ops::Add for Quaternion {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl std::ops::Sub for Quaternion {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}

impl std::ops::Neg for Quaternion {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}
