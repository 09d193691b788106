use glam::{Mat4, Quat, Vec3};

use super::frame::{camera_convention_fix, WorldFrame};
use crate::camera::PerspectiveCamera;

/// Camera pose expressed in the canonical world frame.
///
/// Built fresh on every synchronization and discarded once serialized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// World-from-camera rotation, camera looking down +Z
    pub orientation: Quat,
    pub position: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub look_at: Vec3,
    pub up_direction: Vec3,
}

impl CameraPose {
    /// Convert a renderer-local camera and controls target into the world frame
    pub fn from_render(camera: &PerspectiveCamera, target: Vec3, frame: &WorldFrame) -> Self {
        let t_world_render = frame.world_from_render();
        let t_render_camera = camera.local_transform();
        let t_world_camera =
            t_world_render * t_render_camera * Mat4::from_quat(camera_convention_fix());

        // Scale is identity for rigid frames; drop it.
        let (_, orientation, position) = t_world_camera.to_scale_rotation_translation();

        let r_world_render = frame.world_rotation();

        Self {
            orientation: orientation.normalize(),
            position,
            fov: camera.fov_radians(),
            aspect: camera.aspect,
            look_at: r_world_render * target,
            up_direction: r_world_render * camera.up,
        }
    }

    /// Renderer-local camera position and orientation for this pose
    pub fn render_transform(&self, frame: &WorldFrame) -> (Vec3, Quat) {
        let t_world_camera = Mat4::from_rotation_translation(self.orientation, self.position);
        let t_render_camera = frame.render_from_world()
            * t_world_camera
            * Mat4::from_quat(camera_convention_fix().inverse());
        let (_, orientation, position) = t_render_camera.to_scale_rotation_translation();
        (position, orientation.normalize())
    }

    /// Controls target in renderer-local coordinates
    pub fn render_look_at(&self, frame: &WorldFrame) -> Vec3 {
        frame.world_rotation().inverse() * self.look_at
    }

    /// Viewing direction (camera +Z) in the world frame
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }
}
