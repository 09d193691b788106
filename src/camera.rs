use glam::{Mat3, Mat4, Quat, Vec3};

pub const DEFAULT_FOV_DEGREES: f32 = 75.0;
pub const DEFAULT_NEAR: f32 = 0.05;
pub const DEFAULT_FAR: f32 = 1000.0;

/// Perspective camera in renderer-local coordinates.
///
/// Follows the renderer convention: the camera looks down its local -Z axis
/// with +Y up. `fov` is the vertical field of view in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub orientation: Quat,
    pub up: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            up: Vec3::Y,
            fov,
            aspect,
            near,
            far,
        }
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov.to_radians()
    }

    /// Update aspect ratio from a viewport size, ignoring degenerate sizes
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    /// Local up axis of the camera body (not the reference `up` vector)
    pub fn local_up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Renderer-world-from-camera transform
    pub fn local_transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// Rotate to face `target` using the reference `up` vector.
    /// Returns false and keeps the orientation when `target` is the camera position.
    pub fn look_at(&mut self, target: Vec3) -> bool {
        match look_rotation(self.position, target, self.up) {
            Some(orientation) => {
                self.orientation = orientation;
                true
            }
            None => false,
        }
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(DEFAULT_FOV_DEGREES, 1.0, DEFAULT_NEAR, DEFAULT_FAR)
    }
}

/// Orientation of an object at `eye` whose -Z axis points at `target`.
/// When the view direction is parallel to `up`, an arbitrary perpendicular
/// axis is used for the roll.
pub fn look_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Option<Quat> {
    let z = (eye - target).try_normalize()?;
    let x = up
        .cross(z)
        .try_normalize()
        .unwrap_or_else(|| z.any_orthonormal_vector());
    let y = z.cross(x);
    Some(Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize())
}
