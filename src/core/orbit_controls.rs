use std::f32::consts::TAU;

use glam::{Quat, Vec3};

use super::controller::ControlGesture;
use crate::camera::PerspectiveCamera;
use crate::traits::CameraControls;

/// Positions closer than this to their goal snap onto it
const SETTLE_EPSILON: f32 = 1e-5;
/// Keeps the polar angle away from the poles
const POLAR_EPSILON: f32 = 1e-4;
/// Dolly scale per wheel line
const DOLLY_STEP: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Easing time constant for animated moves, in seconds
    pub smooth_time: f32,
    /// Easing time constant while the user drags; zero applies gestures immediately
    pub dragging_smooth_time: f32,
    pub azimuth_rotate_speed: f32,
    pub polar_rotate_speed: f32,
    pub dolly_speed: f32,
    pub truck_speed: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            min_distance: 0.1,
            max_distance: 200.0,
            smooth_time: 0.05,
            dragging_smooth_time: 0.0,
            azimuth_rotate_speed: 1.0,
            polar_rotate_speed: 1.0,
            dolly_speed: 1.0,
            truck_speed: 1.0,
        }
    }
}

/// Orbit camera controls: rotate around, dolly toward, and truck a target.
///
/// Keeps a goal position/target that the camera eases toward in `update`.
/// Orbit angles are measured in an up-aligned space captured from `camera.up`
/// at construction and on `update_camera_up`.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    camera: PerspectiveCamera,
    settings: OrbitSettings,
    target: Vec3,
    goal_position: Vec3,
    goal_target: Vec3,
    y_up_space: Quat,
    changed: bool,
}

impl OrbitControls {
    pub fn new(camera: PerspectiveCamera, target: Vec3, settings: OrbitSettings) -> Self {
        let mut controls = Self {
            camera,
            settings,
            target,
            goal_position: camera.position,
            goal_target: target,
            y_up_space: y_up_space(camera.up),
            changed: true,
        };
        controls.camera.look_at(target);
        controls
    }

    pub fn settings(&self) -> &OrbitSettings {
        &self.settings
    }

    /// Position the camera is easing toward
    pub fn goal_position(&self) -> Vec3 {
        self.goal_position
    }

    pub fn is_animating(&self) -> bool {
        self.camera.position != self.goal_position || self.target != self.goal_target
    }

    pub fn distance(&self) -> f32 {
        self.goal_position.distance(self.goal_target)
    }

    /// Apply a pointer gesture; `viewport_height` is in the same pixels as the gesture
    pub fn apply_gesture(&mut self, gesture: ControlGesture, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        match gesture {
            ControlGesture::Orbit { dx, dy } => self.rotate(
                TAU * dx / height * self.settings.azimuth_rotate_speed,
                TAU * dy / height * self.settings.polar_rotate_speed,
            ),
            ControlGesture::Truck { dx, dy } => {
                // World units covered by one pixel at the target distance
                let scale = 2.0 * self.distance() * (self.camera.fov_radians() * 0.5).tan() / height;
                self.truck(
                    -dx * scale * self.settings.truck_speed,
                    dy * scale * self.settings.truck_speed,
                );
            }
            ControlGesture::Dolly { delta } => {
                self.dolly(DOLLY_STEP.powf(delta * self.settings.dolly_speed))
            }
        }
    }

    /// Rotate the goal position around the goal target by azimuth/polar radians
    pub fn rotate(&mut self, azimuth: f32, polar: f32) {
        let offset = self.y_up_space * (self.goal_position - self.goal_target);
        let radius = offset.length();
        if radius < SETTLE_EPSILON {
            return;
        }

        let theta = offset.x.atan2(offset.z) - azimuth;
        let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() - polar)
            .clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);

        let rotated = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        self.goal_position = self.goal_target + self.y_up_space.inverse() * rotated;
        self.after_gesture();
    }

    /// Scale the target distance, clamped to the configured range
    pub fn dolly(&mut self, scale: f32) {
        let offset = self.goal_position - self.goal_target;
        let Some(direction) = offset.try_normalize() else {
            return;
        };
        let radius = (offset.length() * scale)
            .clamp(self.settings.min_distance, self.settings.max_distance);
        self.goal_position = self.goal_target + direction * radius;
        self.after_gesture();
    }

    /// Move position and target along the camera's right/up axes
    pub fn truck(&mut self, right: f32, up: f32) {
        let offset = self.camera.right() * right + self.camera.local_up() * up;
        self.goal_position += offset;
        self.goal_target += offset;
        self.after_gesture();
    }

    fn after_gesture(&mut self) {
        if self.settings.dragging_smooth_time <= 0.0 {
            self.camera.position = self.goal_position;
            self.target = self.goal_target;
            self.camera.look_at(self.target);
        }
        self.changed = true;
    }

    fn ease(&mut self, delta: f32) {
        let smooth_time = self.settings.smooth_time;
        let t = if smooth_time <= 0.0 {
            1.0
        } else {
            1.0 - (-delta / smooth_time).exp()
        };

        self.camera.position = self.camera.position.lerp(self.goal_position, t);
        self.target = self.target.lerp(self.goal_target, t);

        if self.camera.position.distance(self.goal_position) < SETTLE_EPSILON {
            self.camera.position = self.goal_position;
        }
        if self.target.distance(self.goal_target) < SETTLE_EPSILON {
            self.target = self.goal_target;
        }
        self.camera.look_at(self.target);
    }
}

impl CameraControls for OrbitControls {
    fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    fn target(&self) -> Vec3 {
        self.goal_target
    }

    fn set_look_at(&mut self, position: Vec3, target: Vec3, animate: bool) {
        self.goal_position = position;
        self.goal_target = target;
        if !animate {
            self.camera.position = position;
            self.target = target;
            self.camera.look_at(target);
        }
        self.changed = true;
    }

    fn update_camera_up(&mut self) {
        self.y_up_space = y_up_space(self.camera.up);
        self.camera.look_at(self.target);
        self.changed = true;
    }

    fn update(&mut self, delta: f32) -> bool {
        if self.is_animating() {
            self.ease(delta);
            self.changed = true;
        }
        std::mem::take(&mut self.changed)
    }
}

/// Rotation taking `up` onto +Y
fn y_up_space(up: Vec3) -> Quat {
    Quat::from_rotation_arc(up.try_normalize().unwrap_or(Vec3::Y), Vec3::Y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls_at(position: Vec3) -> OrbitControls {
        let mut camera = PerspectiveCamera::default();
        camera.position = position;
        OrbitControls::new(camera, Vec3::ZERO, OrbitSettings::default())
    }

    fn settle(controls: &mut OrbitControls) {
        for _ in 0..10 {
            controls.update(1.0);
        }
    }

    #[test]
    fn test_new_faces_target_and_reports_change() {
        let mut controls = controls_at(Vec3::new(0.0, 0.0, 5.0));
        assert!((controls.camera().forward() - Vec3::NEG_Z).length() < 1e-5);
        assert!(controls.update(0.016));
        assert!(!controls.update(0.016));
    }

    #[test]
    fn test_instant_set_look_at() {
        let mut controls = controls_at(Vec3::new(0.0, 0.0, 5.0));
        controls.update(0.0);

        controls.set_look_at(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), false);
        assert_eq!(controls.camera().position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(controls.target(), Vec3::new(0.0, 0.0, 1.0));
        assert!(!controls.is_animating());
        assert!(controls.update(0.016));
    }

    #[test]
    fn test_animated_set_look_at_converges() {
        let mut controls = controls_at(Vec3::new(0.0, 0.0, 5.0));
        let goal = Vec3::new(5.0, 1.0, 0.0);
        controls.set_look_at(goal, Vec3::ZERO, true);

        assert_eq!(controls.camera().position, Vec3::new(0.0, 0.0, 5.0));
        assert!(controls.update(0.01));
        assert!(controls.is_animating());

        settle(&mut controls);
        assert_eq!(controls.camera().position, goal);
        assert!(!controls.is_animating());
        assert!(!controls.update(0.01));
    }

    #[test]
    fn test_rotate_keeps_distance() {
        let mut controls = controls_at(Vec3::new(0.0, 0.0, 5.0));
        controls.rotate(std::f32::consts::FRAC_PI_2, 0.0);

        let position = controls.camera().position;
        assert!((position.length() - 5.0).abs() < 1e-4);
        assert!((position - Vec3::new(-5.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_polar_rotation_is_clamped() {
        let mut controls = controls_at(Vec3::new(0.0, 0.0, 5.0));
        controls.rotate(0.0, 10.0);
        let position = controls.camera().position;
        assert!(position.y > 4.99);
        assert!(controls.camera().forward().is_finite());
    }

    #[test]
    fn test_dolly_is_clamped() {
        let mut controls = controls_at(Vec3::new(0.0, 0.0, 5.0));
        controls.dolly(0.0001);
        assert!((controls.distance() - 0.1).abs() < 1e-5);
        controls.dolly(1.0e6);
        assert!((controls.distance() - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_truck_moves_target_with_camera() {
        let mut controls = controls_at(Vec3::new(0.0, 0.0, 5.0));
        controls.truck(1.0, 0.0);
        assert!((controls.target() - Vec3::X).length() < 1e-5);
        assert!((controls.camera().position - Vec3::new(1.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_dolly_gesture_zooms_in() {
        let mut controls = controls_at(Vec3::new(0.0, 0.0, 5.0));
        controls.apply_gesture(ControlGesture::Dolly { delta: 1.0 }, 600.0);
        assert!((controls.distance() - 4.75).abs() < 1e-4);
    }

    #[test]
    fn test_update_camera_up_changes_orbit_axis() {
        let mut controls = controls_at(Vec3::new(5.0, 0.0, 0.0));
        controls.camera_mut().up = Vec3::Z;
        controls.update_camera_up();

        // Azimuth now spins around +Z, so height along Z is preserved
        controls.rotate(1.0, 0.0);
        assert!(controls.camera().position.z.abs() < 1e-4);
        assert!((controls.camera().position.length() - 5.0).abs() < 1e-4);
    }
}
