//! The UniCam multi-phase camera gesture state machine.

use std::collections::VecDeque;

use log::{debug, warn};

use crate::camera::project;
use crate::camera::PivotMarker;
use crate::geometry::Ray;
use crate::input::PointerEvent;
use crate::math::{Matrix4, Point2, Point3, Vector3};
use crate::options::CameraOptions;

/// Interaction phase of a [`UniCam`] controller.
///
/// ```text
/// Start -> PanDollyRotDecision -> { PanDollyDecision -> { Pan, Dolly } }
///                               | { RotWaitForSecondClick -> Rot }
///       -> { Start | Spinning } -> Start
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    /// Waiting for a button press.
    Start,
    /// Button is down; pan, dolly, and rotation are all still possible.
    PanDollyRotDecision,
    /// The press outlasted the quick-click window; only pan or dolly now.
    PanDollyDecision,
    /// A quick click picked a rotation pivot; waiting for the second press.
    RotWaitForSecondClick,
    /// Horizontal drag: the clicked point stays glued to the cursor.
    Pan,
    /// Vertical drag: translate along the camera's local Z axis.
    Dolly,
    /// Trackball rotation about the picked pivot.
    Rot,
    /// Momentum rotation continuing after release, until caught.
    Spinning,
}

/// Trackball-style camera controller driven by pointer events.
///
/// Feed it button-down/drag/up events in normalized device coordinates, a
/// per-frame [`UniCam::advance_animation`] tick, and the projection matrix
/// via [`UniCam::draw`]; read back the view matrix each frame. One instance
/// per application camera; event delivery must be serialized (single
/// UI/render loop), as there is no internal locking.
#[derive(Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct UniCam {
    state: GestureState,
    options: CameraOptions,

    mouse_last: Point2,
    elapsed: f64,

    initial_click: Point2,
    hit_geometry: bool,
    hit_point: Point3,

    rot_initialized: bool,
    sphere_center: Point3,
    sphere_radius: f32,
    rot_last_time: f64,
    // timestamped angular-velocity samples over the last velocity_window
    // seconds; smooths out single-frame jitter
    vel_samples: VecDeque<(f64, f32)>,
    angular_vel: f32,
    rot_axis: Vector3,

    dolly_initialized: bool,
    dolly_factor: f32,

    show_marker: bool,

    view: Matrix4,
    // saved from the last draw call in order to unproject mouse positions
    projection: Matrix4,
}

impl Default for UniCam {
    fn default() -> Self {
        Self::new()
    }
}

impl UniCam {
    /// Creates a controller with an identity view matrix and default
    /// options.
    #[must_use]
    pub fn new() -> Self {
        Self::from_options(CameraOptions::default())
    }

    /// Creates a controller with an initial view matrix.
    #[must_use]
    pub fn from_view(view: Matrix4) -> Self {
        let mut cam = Self::new();
        cam.view = view;
        cam
    }

    /// Creates a controller with the given gesture options.
    #[must_use]
    pub fn from_options(options: CameraOptions) -> Self {
        Self {
            state: GestureState::Start,
            options,
            mouse_last: Point2::origin(),
            elapsed: 0.0,
            initial_click: Point2::origin(),
            hit_geometry: false,
            hit_point: Point3::origin(),
            rot_initialized: false,
            sphere_center: Point3::origin(),
            sphere_radius: 0.0,
            rot_last_time: 0.0,
            vel_samples: VecDeque::new(),
            angular_vel: 0.0,
            rot_axis: Vector3::unit_y(),
            dolly_initialized: false,
            dolly_factor: 0.0,
            show_marker: false,
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
        }
    }

    /// The current interaction phase.
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// The view matrix produced by the interaction.
    #[must_use]
    pub fn view_matrix(&self) -> Matrix4 {
        self.view
    }

    /// Sets or resets the view matrix.
    pub fn set_view_matrix(&mut self, view: Matrix4) {
        self.view = view;
    }

    /// The camera position (from the inverse view matrix).
    #[must_use]
    pub fn eye(&self) -> Point3 {
        project::eye_point(&self.view)
    }

    /// The camera look direction (from the inverse view matrix).
    #[must_use]
    pub fn look(&self) -> Vector3 {
        project::look_vector(&self.view)
    }

    /// Sets the pivot depth used when a click does not hit geometry.
    pub fn set_default_depth(&mut self, d: f32) {
        self.options.default_depth = d;
    }

    /// The gesture options in effect.
    #[must_use]
    pub fn options(&self) -> &CameraOptions {
        &self.options
    }

    /// Handles a button press at `pos` (normalized device coordinates).
    ///
    /// `depth` is the depth-buffer sample under the cursor, where 1.0 is
    /// the no-geometry sentinel; anything below it pins the rotation pivot
    /// to the clicked surface point.
    pub fn on_button_down(&mut self, pos: Point2, depth: f32) {
        match self.state {
            GestureState::Start => {
                self.initial_click = pos;
                self.mouse_last = pos;
                self.elapsed = 0.0;
                self.rot_initialized = false;
                self.dolly_initialized = false;

                self.hit_geometry = depth < 1.0;
                self.hit_point = if self.hit_geometry {
                    project::screen_to_world(&self.view, &self.projection, pos, depth)
                } else {
                    project::screen_to_depth_plane(
                        &self.view,
                        &self.projection,
                        Point2::origin(),
                        self.options.default_depth,
                    )
                };
                self.show_marker = true;
                self.transition(GestureState::PanDollyRotDecision);
            }
            GestureState::RotWaitForSecondClick => {
                // the second click starts the trackball interaction
                self.transition(GestureState::Rot);
            }
            GestureState::Spinning => {
                // this click "catches" the model, stopping the spin
                self.transition(GestureState::Start);
            }
            _ => warn!("button down in unexpected state {:?}", self.state),
        }
    }

    /// Handles a drag to `pos` (normalized device coordinates) while the
    /// button is held.
    pub fn on_drag(&mut self, pos: Point2) {
        match self.state {
            GestureState::PanDollyRotDecision => {
                if (pos.x - self.initial_click.x).abs() > self.options.drag_threshold {
                    // lots of horizontal movement already, go right to pan
                    self.show_marker = false;
                    self.transition(GestureState::Pan);
                } else if (pos.y - self.initial_click.y).abs() > self.options.drag_threshold {
                    self.show_marker = false;
                    self.transition(GestureState::Dolly);
                } else if self.elapsed > self.options.decision_timeout {
                    // not a quick click to pick a rotation pivot, so there
                    // is no intent to rotate; pan or dolly only from here
                    self.show_marker = false;
                    self.transition(GestureState::PanDollyDecision);
                }
            }
            GestureState::PanDollyDecision => {
                if (pos.x - self.initial_click.x).abs() > self.options.drag_threshold {
                    self.transition(GestureState::Pan);
                } else if (pos.y - self.initial_click.y).abs() > self.options.drag_threshold {
                    self.transition(GestureState::Dolly);
                }
            }
            GestureState::Pan => self.drag_pan(pos),
            GestureState::Dolly => self.drag_dolly(pos),
            GestureState::Rot => self.drag_rot(pos),
            GestureState::Start => {
                // residual movement after catching a spin; wait for the up
            }
            _ => warn!("drag in unexpected state {:?}", self.state),
        }
        self.mouse_last = pos;
    }

    /// Handles the button release at `pos` (normalized device coordinates).
    pub fn on_button_up(&mut self, pos: Point2) {
        match self.state {
            GestureState::PanDollyRotDecision => {
                // a quick click picked the center of rotation; wait for a
                // second press to start rotating around it
                self.transition(GestureState::RotWaitForSecondClick);
            }
            GestureState::Rot => {
                self.show_marker = false;
                self.recalc_angular_vel();
                if self.angular_vel.abs() > self.options.spin_threshold {
                    // the model was "thrown": keep rotating the same way
                    self.transition(GestureState::Spinning);
                } else {
                    self.transition(GestureState::Start);
                }
            }
            _ => {
                self.show_marker = false;
                self.transition(GestureState::Start);
            }
        }
        self.mouse_last = pos;
    }

    /// Advances the interaction clock by `dt` seconds; while spinning, also
    /// applies the momentum rotation for this frame.
    pub fn advance_animation(&mut self, dt: f64) {
        self.elapsed += dt;

        if self.state == GestureState::Spinning {
            let delta = self.elapsed - self.rot_last_time;
            self.rot_last_time = self.elapsed;
            let angle = (f64::from(self.angular_vel) * delta) as f32;
            let r = Matrix4::rotation(self.sphere_center, self.rot_axis, angle);
            self.view = self.view * r;
        }
    }

    /// Records the projection matrix used to unproject subsequent mouse
    /// events and, while a pivot is active, draws the center-of-rotation
    /// marker through `marker`.
    pub fn draw(&mut self, projection: Matrix4, marker: &mut dyn PivotMarker) {
        self.projection = projection;

        if self.show_marker {
            let depth = self.hit_point_depth();
            let p1 = project::screen_to_depth_plane(
                &self.view,
                &self.projection,
                Point2::origin(),
                depth,
            );
            let p2 = project::screen_to_depth_plane(
                &self.view,
                &self.projection,
                Point2::new(self.options.marker_scale, 0.0),
                depth,
            );
            let rad = (p2 - p1).length();
            let model = Matrix4::translation(self.hit_point - Point3::origin())
                * Matrix4::scale(Vector3::new(rad, rad, rad));
            marker.draw_sphere(model, self.view, self.projection, [0.0, 0.0, 0.0]);
        }
    }

    /// Dispatches a [`PointerEvent`] to the matching handler.
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::ButtonDown { pos, depth } => self.on_button_down(pos, depth),
            PointerEvent::Drag { pos } => self.on_drag(pos),
            PointerEvent::ButtonUp { pos } => self.on_button_up(pos),
            PointerEvent::Tick { dt } => self.advance_animation(dt),
        }
    }

    fn transition(&mut self, next: GestureState) {
        debug!("unicam {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    // The world-space depth of the original hit point relative to the
    // current eye position and look direction.
    fn hit_point_depth(&self) -> f32 {
        (self.hit_point - self.eye()).dot(self.look())
    }

    fn drag_pan(&mut self, pos: Point2) {
        // unproject the previous and current mouse position onto the plane
        // of the grabbed point; the delta keeps that point under the cursor
        let depth = self.hit_point_depth();
        let p_world1 =
            project::screen_to_depth_plane(&self.view, &self.projection, self.mouse_last, depth);
        let p_world2 = project::screen_to_depth_plane(&self.view, &self.projection, pos, depth);
        self.view = self.view * Matrix4::translation(p_world2 - p_world1);
    }

    fn drag_dolly(&mut self, pos: Point2) {
        if !self.dolly_initialized {
            // scale so that dragging to the bottom of the screen brings the
            // clicked point right up to the camera
            let depth = self.hit_point_depth();
            let delta_to_bottom = (self.initial_click.y + 1.0).max(f32::EPSILON);
            self.dolly_factor = depth / delta_to_bottom;
            self.dolly_initialized = true;
        }
        let d = Vector3::new(0.0, 0.0, -self.dolly_factor * (pos.y - self.mouse_last.y));
        self.view = Matrix4::translation(d) * self.view;
    }

    fn drag_rot(&mut self, pos: Point2) {
        if self.rot_initialized {
            self.trackball_rotate(pos);
            self.recalc_angular_vel();
        } else {
            self.init_rot();
        }
    }

    // First drag sample of a rotation: establish the trackball bounding
    // sphere around the pivot and reset the velocity samples.
    fn init_rot(&mut self) {
        let depth = if self.hit_geometry {
            self.sphere_center = self.hit_point;
            self.hit_point_depth()
        } else {
            // no geometry under the click: center the sphere in front of
            // the camera at the configured default depth
            self.sphere_center = project::screen_to_depth_plane(
                &self.view,
                &self.projection,
                Point2::origin(),
                self.options.default_depth,
            );
            self.options.default_depth
        };

        // size the sphere by projecting a fixed screen-space distance out
        // to the depth of the center, tying grip strength to how far the
        // pivot is from the camera
        let p_world1 =
            project::screen_to_depth_plane(&self.view, &self.projection, Point2::origin(), depth);
        let p_world2 = project::screen_to_depth_plane(
            &self.view,
            &self.projection,
            Point2::new(self.options.trackball_size, 0.0),
            depth,
        );
        self.sphere_radius = (p_world2 - p_world1).length();

        self.rot_last_time = self.elapsed;
        self.vel_samples.clear();
        self.rot_initialized = true;
    }

    fn trackball_rotate(&mut self, pos: Point2) {
        let eye = self.eye();

        let mouse3d_1 =
            project::screen_to_near_plane(&self.view, &self.projection, self.mouse_last);
        let hit1 = Ray::new(eye, mouse3d_1 - eye)
            .intersect_sphere(self.sphere_center, self.sphere_radius);

        let mouse3d_2 = project::screen_to_near_plane(&self.view, &self.projection, pos);
        let hit2 =
            Ray::new(eye, mouse3d_2 - eye).intersect_sphere(self.sphere_center, self.sphere_radius);

        // a ray that misses the sphere contributes no rotation this frame;
        // the previous-mouse reference still advances in on_drag
        let (Some((_, i_point1)), Some((_, i_point2))) = (hit1, hit2) else {
            return;
        };

        let v1 = (i_point1 - self.sphere_center).to_unit();
        let v2 = (i_point2 - self.sphere_center).to_unit();

        self.rot_axis = v1.cross(v2).to_unit();
        // clamp: near-identical intersection points can push the dot
        // product marginally outside acos's domain
        let angle = v1.dot(v2).clamp(-1.0, 1.0).acos();

        let r = Matrix4::rotation(self.sphere_center, self.rot_axis, angle).orthonormal();
        self.view = self.view * r;

        // record a timestamped angular-velocity sample; a near-zero dt
        // would poison the whole buffer with an infinite sample
        let dt = self.elapsed - self.rot_last_time;
        if dt > f64::EPSILON {
            let avel = f64::from(angle) / dt;
            if avel.is_finite() {
                self.vel_samples.push_back((self.elapsed, avel as f32));
            }
        }
        self.rot_last_time = self.elapsed;
    }

    // Evict samples older than the smoothing window, then average the rest.
    // The window is a low-pass filter against single-frame jitter.
    fn recalc_angular_vel(&mut self) {
        let cutoff = self.elapsed - self.options.velocity_window;
        while self
            .vel_samples
            .front()
            .is_some_and(|&(stamp, _)| stamp < cutoff)
        {
            let _ = self.vel_samples.pop_front();
        }

        self.angular_vel = 0.0;
        if !self.vel_samples.is_empty() {
            let sum: f32 = self.vel_samples.iter().map(|&(_, v)| v).sum();
            self.angular_vel = sum / self.vel_samples.len() as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cam() -> UniCam {
        let view = Matrix4::look_at(
            Point3::new(0.0, 0.0, 5.0),
            Point3::origin(),
            Vector3::unit_y(),
        );
        let proj = Matrix4::perspective(60.0, 1.0, 0.1, 100.0);
        let mut cam = UniCam::from_view(view);
        cam.draw(proj, &mut ());
        cam
    }

    // step the clock the way a render loop would between events
    fn tick(cam: &mut UniCam, dt: f64) {
        cam.advance_animation(dt);
    }

    #[test]
    fn starts_idle() {
        let cam = test_cam();
        assert_eq!(cam.state(), GestureState::Start);
        assert!((cam.eye() - Point3::new(0.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn horizontal_drag_routes_to_pan() {
        let mut cam = test_cam();
        cam.on_button_down(Point2::origin(), 1.0);
        assert_eq!(cam.state(), GestureState::PanDollyRotDecision);

        cam.on_drag(Point2::new(0.05, 0.0));
        assert_eq!(cam.state(), GestureState::Pan);

        let eye_before = cam.eye();
        cam.on_drag(Point2::new(0.10, 0.0));
        let eye_after = cam.eye();

        // the camera slides horizontally relative to its own frame
        assert!((eye_after.x - eye_before.x).abs() > 1e-4);
        assert!((eye_after.y - eye_before.y).abs() < 1e-4);
        assert!((eye_after.z - eye_before.z).abs() < 1e-4);

        cam.on_button_up(Point2::new(0.10, 0.0));
        assert_eq!(cam.state(), GestureState::Start);
    }

    #[test]
    fn vertical_drag_routes_to_dolly() {
        let mut cam = test_cam();
        cam.on_button_down(Point2::origin(), 1.0);
        cam.on_drag(Point2::new(0.0, 0.05));
        assert_eq!(cam.state(), GestureState::Dolly);

        let eye_before = cam.eye();
        cam.on_drag(Point2::new(0.0, 0.10));
        let eye_after = cam.eye();

        // dolly moves along the look axis only
        assert!((eye_after.z - eye_before.z).abs() > 1e-4);
        assert!((eye_after.x - eye_before.x).abs() < 1e-4);
        assert!((eye_after.y - eye_before.y).abs() < 1e-4);
    }

    #[test]
    fn timeout_rules_out_rotation() {
        let mut cam = test_cam();
        cam.on_button_down(Point2::origin(), 1.0);
        tick(&mut cam, 1.5);
        cam.on_drag(Point2::new(0.001, 0.0));
        assert_eq!(cam.state(), GestureState::PanDollyDecision);

        // thresholds still route to pan from here
        cam.on_drag(Point2::new(0.05, 0.0));
        assert_eq!(cam.state(), GestureState::Pan);
    }

    #[test]
    fn quick_click_then_drag_rotates_about_pivot() {
        let mut cam = test_cam();

        // quick click: pick the center of rotation
        cam.on_button_down(Point2::origin(), 1.0);
        cam.on_button_up(Point2::origin());
        assert_eq!(cam.state(), GestureState::RotWaitForSecondClick);

        // pivot fell back to the default depth (4) in front of the eye (5)
        let pivot = Point3::new(0.0, 0.0, 1.0);

        cam.on_button_down(Point2::origin(), 1.0);
        assert_eq!(cam.state(), GestureState::Rot);

        tick(&mut cam, 0.02);
        cam.on_drag(Point2::origin()); // first sample initializes the sphere
        tick(&mut cam, 0.02);

        let dist_before = (cam.eye() - pivot).length();
        let view_before = cam.view_matrix();
        cam.on_drag(Point2::new(0.1, 0.0));
        let dist_after = (cam.eye() - pivot).length();

        assert!(cam.view_matrix() != view_before, "drag must rotate the view");
        // rotating about the pivot preserves the eye's distance to it
        assert!((dist_after - dist_before).abs() < 1e-3);
    }

    #[test]
    fn stationary_rotation_drag_keeps_view_finite() {
        // identical trackball samples give collinear sphere intersection
        // points, so the dot product lands exactly on acos's domain edge
        let mut cam = test_cam();

        cam.on_button_down(Point2::origin(), 1.0);
        cam.on_button_up(Point2::origin());
        cam.on_button_down(Point2::origin(), 1.0);
        assert_eq!(cam.state(), GestureState::Rot);

        tick(&mut cam, 0.02);
        cam.on_drag(Point2::new(0.1, 0.0));
        let view_before = cam.view_matrix();
        for _ in 0..3 {
            tick(&mut cam, 0.02);
            cam.on_drag(Point2::new(0.1, 0.0));
        }

        let view = cam.view_matrix();
        assert!(view.as_col_major().iter().all(|e| e.is_finite()));
        // a zero-angle rotation must leave the view where it was
        assert!(view == view_before);
    }

    #[test]
    fn fast_release_spins_and_click_catches() {
        let mut cam = test_cam();

        cam.on_button_down(Point2::origin(), 1.0);
        cam.on_button_up(Point2::origin());
        cam.on_button_down(Point2::origin(), 1.0);

        tick(&mut cam, 0.02);
        cam.on_drag(Point2::origin());
        // fast trackball drags: large angle per small dt
        let mut x = 0.0;
        for _ in 0..5 {
            tick(&mut cam, 0.02);
            x += 0.08;
            cam.on_drag(Point2::new(x, 0.0));
        }

        cam.on_button_up(Point2::new(x, 0.0));
        assert_eq!(cam.state(), GestureState::Spinning);

        // momentum: the view keeps rotating without input
        let view_before = cam.view_matrix();
        tick(&mut cam, 0.1);
        assert!(cam.view_matrix() != view_before);

        // catching the spin stops it
        cam.on_button_down(Point2::new(0.0, 0.0), 1.0);
        assert_eq!(cam.state(), GestureState::Start);
        let caught = cam.view_matrix();
        tick(&mut cam, 0.1);
        assert!(cam.view_matrix() == caught);
    }

    #[test]
    fn slow_release_does_not_spin() {
        let mut cam = test_cam();

        cam.on_button_down(Point2::origin(), 1.0);
        cam.on_button_up(Point2::origin());
        cam.on_button_down(Point2::origin(), 1.0);

        tick(&mut cam, 0.02);
        cam.on_drag(Point2::origin());
        // slow drags: tiny angle over long dt, well under the threshold
        let mut x = 0.0;
        for _ in 0..3 {
            tick(&mut cam, 0.5);
            x += 0.002;
            cam.on_drag(Point2::new(x, 0.0));
        }

        cam.on_button_up(Point2::new(x, 0.0));
        assert_eq!(cam.state(), GestureState::Start);
    }

    #[test]
    fn geometry_click_pins_pivot_to_surface() {
        let mut cam = test_cam();
        // depth-buffer sample for a surface at world z = 1 seen from z = 5:
        // compute it by projecting the point forward
        let proj = Matrix4::perspective(60.0, 1.0, 0.1, 100.0);
        let clip = proj * cam.view_matrix() * Point3::new(0.0, 0.0, 1.0);
        let depth = (clip.z + 1.0) / 2.0;
        assert!(depth < 1.0);

        cam.on_button_down(Point2::origin(), depth);
        cam.on_button_up(Point2::origin());
        cam.on_button_down(Point2::origin(), depth);
        tick(&mut cam, 0.02);
        cam.on_drag(Point2::origin());
        tick(&mut cam, 0.02);

        let pivot = Point3::new(0.0, 0.0, 1.0);
        let dist_before = (cam.eye() - pivot).length();
        cam.on_drag(Point2::new(0.08, 0.04));
        let dist_after = (cam.eye() - pivot).length();
        assert!((dist_after - dist_before).abs() < 1e-3);
    }

    #[test]
    fn handle_event_dispatches() {
        let mut cam = test_cam();
        cam.handle_event(PointerEvent::ButtonDown {
            pos: Point2::origin(),
            depth: 1.0,
        });
        assert_eq!(cam.state(), GestureState::PanDollyRotDecision);
        cam.handle_event(PointerEvent::Tick { dt: 0.1 });
        cam.handle_event(PointerEvent::Drag {
            pos: Point2::new(0.05, 0.0),
        });
        assert_eq!(cam.state(), GestureState::Pan);
        cam.handle_event(PointerEvent::ButtonUp {
            pos: Point2::new(0.05, 0.0),
        });
        assert_eq!(cam.state(), GestureState::Start);
    }

    #[test]
    fn set_default_depth_moves_fallback_pivot() {
        let mut cam = test_cam();
        cam.set_default_depth(2.0);
        cam.on_button_down(Point2::origin(), 1.0);
        cam.on_button_up(Point2::origin());
        cam.on_button_down(Point2::origin(), 1.0);
        tick(&mut cam, 0.02);
        cam.on_drag(Point2::origin());
        tick(&mut cam, 0.02);

        // pivot now 2 units in front of the eye, at world z = 3
        let pivot = Point3::new(0.0, 0.0, 3.0);
        let dist_before = (cam.eye() - pivot).length();
        cam.on_drag(Point2::new(0.1, 0.0));
        let dist_after = (cam.eye() - pivot).length();
        assert!((dist_after - dist_before).abs() < 1e-3);
    }
}
