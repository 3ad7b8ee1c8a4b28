//! 4x4 transformation matrix.

use bytemuck::{Pod, Zeroable};

use super::point::Point3;
use super::vector::Vector3;
use super::EPSILON;

/// A 4x4 matrix of f32 stored column-major, representing an affine or
/// projective transform.
///
/// The storage order matches what graphics APIs expect for uniform upload, so
/// a `Matrix4` can be passed to [`bytemuck::cast_slice`] directly.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Matrix4 {
    m: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4 {
    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_row_major([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Builds a matrix from 16 elements listed row by row (the order a
    /// matrix is written on paper).
    #[must_use]
    pub fn from_row_major(e: [f32; 16]) -> Self {
        let mut m = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                m[c * 4 + r] = e[r * 4 + c];
            }
        }
        Self { m }
    }

    /// Builds a matrix from 16 elements in column-major storage order.
    #[must_use]
    pub fn from_col_major(m: [f32; 16]) -> Self {
        Self { m }
    }

    /// The element at (row, col).
    #[inline]
    #[must_use]
    pub fn element(&self, row: usize, col: usize) -> f32 {
        self.m[col * 4 + row]
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, value: f32) {
        self.m[col * 4 + row] = value;
    }

    /// The raw column-major element array.
    #[inline]
    #[must_use]
    pub fn as_col_major(&self) -> &[f32; 16] {
        &self.m
    }

    /// A non-uniform scale transform.
    #[must_use]
    pub fn scale(v: Vector3) -> Self {
        Self::from_row_major([
            v.x, 0.0, 0.0, 0.0, //
            0.0, v.y, 0.0, 0.0, //
            0.0, 0.0, v.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// A translation transform.
    #[must_use]
    pub fn translation(v: Vector3) -> Self {
        Self::from_row_major([
            1.0, 0.0, 0.0, v.x, //
            0.0, 1.0, 0.0, v.y, //
            0.0, 0.0, 1.0, v.z, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation about the X axis by `radians`.
    #[must_use]
    pub fn rotation_x(radians: f32) -> Self {
        let (sin_t, cos_t) = radians.sin_cos();
        Self::from_row_major([
            1.0, 0.0, 0.0, 0.0, //
            0.0, cos_t, -sin_t, 0.0, //
            0.0, sin_t, cos_t, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation about the Y axis by `radians`.
    #[must_use]
    pub fn rotation_y(radians: f32) -> Self {
        let (sin_t, cos_t) = radians.sin_cos();
        Self::from_row_major([
            cos_t, 0.0, sin_t, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -sin_t, 0.0, cos_t, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation about the Z axis by `radians`.
    #[must_use]
    pub fn rotation_z(radians: f32) -> Self {
        let (sin_t, cos_t) = radians.sin_cos();
        Self::from_row_major([
            cos_t, -sin_t, 0.0, 0.0, //
            sin_t, cos_t, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation by `radians` about an arbitrary `axis` passing through
    /// `point`.
    ///
    /// Composed as: translate `point` to the origin, align `axis` with the X
    /// axis via a Y rotation then a Z rotation, rotate about X, then undo the
    /// alignment and translation.
    #[must_use]
    pub fn rotation(point: Point3, axis: Vector3, radians: f32) -> Self {
        let theta = axis.z.atan2(axis.x);
        let phi = -axis.y.atan2((axis.x * axis.x + axis.z * axis.z).sqrt());

        let to_origin = Self::translation(-point.to_vector());
        let a = Self::rotation_y(theta);
        let b = Self::rotation_z(phi);
        let c = Self::rotation_x(radians);
        let inv_a = Self::rotation_y(-theta);
        let inv_b = Self::rotation_z(-phi);
        let back = Self::translation(point.to_vector());

        back * inv_a * inv_b * c * b * a * to_origin
    }

    /// A view matrix looking from `eye` toward `target` with the given
    /// approximate `up` direction.
    #[must_use]
    pub fn look_at(eye: Point3, target: Point3, up: Vector3) -> Self {
        let look = (target - eye).to_unit();

        // camera-space basis
        let z = -look;
        let x = up.cross(z).to_unit();
        let y = z.cross(x);

        // the view rotation is the inverse of the camera's rotation, and the
        // inverse of a rotation matrix is its transpose, so the basis columns
        // become rows
        let r = Self::from_row_major([
            x.x, x.y, x.z, 0.0, //
            y.x, y.y, y.z, 0.0, //
            z.x, z.y, z.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        let t = Self::translation(Point3::origin() - eye);

        r * t
    }

    /// A perspective projection with a vertical field of view in degrees.
    #[must_use]
    pub fn perspective(fovy_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let ymax = near * (fovy_degrees * std::f32::consts::PI / 360.0).tan();
        let xmax = ymax * aspect;
        Self::frustum(-xmax, xmax, -ymax, ymax, near, far)
    }

    /// An off-axis perspective frustum projection.
    #[must_use]
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self::from_row_major([
            2.0 * near / (right - left),
            0.0,
            (right + left) / (right - left),
            0.0,
            0.0,
            2.0 * near / (top - bottom),
            (top + bottom) / (top - bottom),
            0.0,
            0.0,
            0.0,
            -(far + near) / (far - near),
            -2.0 * far * near / (far - near),
            0.0,
            0.0,
            -1.0,
            0.0,
        ])
    }

    /// The transpose of this matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = Self::identity();
        for r in 0..4 {
            for c in 0..4 {
                out.set(r, c, self.element(c, r));
            }
        }
        out
    }

    /// Re-orthogonalizes the rotation submatrix via Gram-Schmidt: the X axis
    /// is kept (normalized), the Y axis is projected off X and normalized,
    /// and Z is recomputed as X cross Y. The translation column and bottom
    /// row are preserved.
    ///
    /// Calling this repeatedly is a fixed point: `m.orthonormal()` equals
    /// `m.orthonormal().orthonormal()`.
    #[must_use]
    pub fn orthonormal(&self) -> Self {
        let x = self.column_vector3(0).to_unit();
        let y0 = self.column_vector3(1);
        let y = (y0 - y0.dot(x) * x).to_unit();
        let z = x.cross(y).to_unit();
        Self::from_row_major([
            x.x,
            y.x,
            z.x,
            self.element(0, 3),
            x.y,
            y.y,
            z.y,
            self.element(1, 3),
            x.z,
            y.z,
            z.z,
            self.element(2, 3),
            self.element(3, 0),
            self.element(3, 1),
            self.element(3, 2),
            self.element(3, 3),
        ])
    }

    // Determinant of the 3x3 submatrix formed by excluding one row and one
    // column, expanded along its first row.
    fn sub_determinant(&self, exclude_row: usize, exclude_col: usize) -> f32 {
        let mut rows = [0_usize; 3];
        let mut cols = [0_usize; 3];
        let mut r = 0;
        let mut c = 0;
        for i in 0..4 {
            if i != exclude_row {
                rows[r] = i;
                r += 1;
            }
            if i != exclude_col {
                cols[c] = i;
                c += 1;
            }
        }

        let at = |r: usize, c: usize| self.element(rows[r], cols[c]);

        let cofactor00 = at(1, 1) * at(2, 2) - at(1, 2) * at(2, 1);
        let cofactor01 = -(at(1, 0) * at(2, 2) - at(1, 2) * at(2, 0));
        let cofactor02 = at(1, 0) * at(2, 1) - at(1, 1) * at(2, 0);

        at(0, 0) * cofactor00 + at(0, 1) * cofactor01 + at(0, 2) * cofactor02
    }

    /// The cofactor matrix: each element (r, c) is (-1)^(r+c) times the
    /// determinant of the 3x3 submatrix formed by deleting row r and
    /// column c.
    #[must_use]
    pub fn cofactor(&self) -> Self {
        let mut out = Self::identity();
        let mut sign = 1.0;
        for r in 0..4 {
            for c in 0..4 {
                out.set(r, c, sign * self.sub_determinant(r, c));
                sign = -sign;
            }
            sign = -sign;
        }
        out
    }

    /// The determinant, computed as the dot product of the first row with
    /// the first row of the cofactor matrix.
    #[must_use]
    pub fn determinant(&self) -> f32 {
        let c = self.cofactor();
        c.element(0, 0) * self.element(0, 0)
            + c.element(0, 1) * self.element(0, 1)
            + c.element(0, 2) * self.element(0, 2)
            + c.element(0, 3) * self.element(0, 3)
    }

    /// The inverse of this matrix, computed via the cofactor expansion.
    ///
    /// A singular matrix (determinant magnitude below 1e-8) returns the
    /// identity rather than failing; callers relying on inversion of a
    /// degenerate transform silently get a no-op.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        if det.abs() < EPSILON {
            return Self::identity();
        }
        self.cofactor().transpose() * (1.0 / det)
    }

    /// Column `c` of the matrix interpreted as a direction (w = 0).
    #[must_use]
    pub fn column_vector3(&self, c: usize) -> Vector3 {
        Vector3::new(self.m[c * 4], self.m[c * 4 + 1], self.m[c * 4 + 2])
    }

    /// Column `c` of the matrix interpreted as a position (w = 1).
    #[must_use]
    pub fn column_point3(&self, c: usize) -> Point3 {
        Point3::new(self.m[c * 4], self.m[c * 4 + 1], self.m[c * 4 + 2])
    }
}

impl PartialEq for Matrix4 {
    /// Tolerance-based comparison, not bitwise.
    fn eq(&self, other: &Self) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (b - a).abs() < EPSILON)
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut out = Self { m: [0.0; 16] };
        for r in 0..4 {
            for c in 0..4 {
                let mut sum = 0.0;
                for i in 0..4 {
                    sum += self.element(r, i) * rhs.element(i, c);
                }
                out.set(r, c, sum);
            }
        }
        out
    }
}

impl std::ops::Mul<f32> for Matrix4 {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        let mut m = self.m;
        for e in &mut m {
            *e *= s;
        }
        Self { m }
    }
}

impl std::ops::Mul<Matrix4> for f32 {
    type Output = Matrix4;
    fn mul(self, m: Matrix4) -> Matrix4 {
        m * self
    }
}

impl std::ops::Mul<Point3> for Matrix4 {
    type Output = Point3;

    /// Transforms a point (w = 1), homogenizing the result by 1/w so
    /// projective transforms produce the expected screen-space position.
    fn mul(self, p: Point3) -> Point3 {
        let at = |r: usize, c: usize| self.element(r, c);
        let w = p.x * at(3, 0) + p.y * at(3, 1) + p.z * at(3, 2) + at(3, 3);
        let winv = 1.0 / w;
        Point3::new(
            winv * (p.x * at(0, 0) + p.y * at(0, 1) + p.z * at(0, 2) + at(0, 3)),
            winv * (p.x * at(1, 0) + p.y * at(1, 1) + p.z * at(1, 2) + at(1, 3)),
            winv * (p.x * at(2, 0) + p.y * at(2, 1) + p.z * at(2, 2) + at(2, 3)),
        )
    }
}

impl std::ops::Mul<Vector3> for Matrix4 {
    type Output = Vector3;

    /// Transforms a direction (w = 0); translation does not apply.
    fn mul(self, v: Vector3) -> Vector3 {
        let at = |r: usize, c: usize| self.element(r, c);
        Vector3::new(
            v.x * at(0, 0) + v.y * at(0, 1) + v.z * at(0, 2),
            v.x * at(1, 0) + v.y * at(1, 1) + v.z * at(1, 2),
            v.x * at(2, 0) + v.y * at(2, 1) + v.z * at(2, 2),
        )
    }
}
