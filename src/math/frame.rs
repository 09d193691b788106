use glam::{Mat4, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

/// Rotation taking the OpenCV-style camera axes (looking down +Z) to the
/// renderer camera axes (looking down -Z, Y up): 180 degrees about local X.
pub fn camera_convention_fix() -> Quat {
    Quat::from_rotation_x(PI)
}

/// Relationship between the canonical world frame (Z up) and the renderer's
/// internal world frame (Y up).
///
/// Stores the forward transform `T_threeworld_world`; the world-from-render
/// direction is derived by inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldFrame {
    render_from_world: Mat4,
}

impl WorldFrame {
    /// Rigid transform from a world-to-render rotation and translation
    pub fn new(rotation: Quat, translation: Vec3) -> Self {
        Self {
            render_from_world: Mat4::from_rotation_translation(rotation.normalize(), translation),
        }
    }

    /// Scene-tree convention: world +Z maps to renderer +Y
    pub fn z_up() -> Self {
        Self::new(Quat::from_rotation_x(-FRAC_PI_2), Vec3::ZERO)
    }

    /// World and renderer frames coincide
    pub fn identity() -> Self {
        Self::new(Quat::IDENTITY, Vec3::ZERO)
    }

    pub fn render_from_world(&self) -> Mat4 {
        self.render_from_world
    }

    pub fn world_from_render(&self) -> Mat4 {
        self.render_from_world.inverse()
    }

    /// Rotation component of `world_from_render`
    pub fn world_rotation(&self) -> Quat {
        let (_, rotation, _) = self.world_from_render().to_scale_rotation_translation();
        rotation
    }

    /// Map a world-frame point into renderer-local coordinates
    pub fn world_point_to_render(&self, point: Vec3) -> Vec3 {
        self.render_from_world.transform_point3(point)
    }

    /// Map a renderer-local point into the world frame
    pub fn render_point_to_world(&self, point: Vec3) -> Vec3 {
        self.world_from_render().transform_point3(point)
    }
}

impl Default for WorldFrame {
    fn default() -> Self {
        Self::z_up()
    }
}
