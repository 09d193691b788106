use glam::Vec3;

use crate::camera::PerspectiveCamera;

/// Camera controls owning the renderer-local camera
pub trait CameraControls {
    /// Get the controlled camera
    fn camera(&self) -> &PerspectiveCamera;

    /// Get the controlled camera for direct edits (e.g. `up`, aspect)
    fn camera_mut(&mut self) -> &mut PerspectiveCamera;

    /// Point the controls orbit around, in renderer-local coordinates
    fn target(&self) -> Vec3;

    /// Move camera and target, optionally easing toward them over time
    fn set_look_at(&mut self, position: Vec3, target: Vec3, animate: bool);

    /// Re-derive internal orbit state after `camera.up` changed externally
    fn update_camera_up(&mut self);

    /// Advance animation by `delta` seconds.
    /// Returns true when the camera changed since the last update.
    fn update(&mut self, delta: f32) -> bool;
}
