use glam::{Quat, Vec3};
use proptest::prelude::*;
use viewer_camera_sync::camera::PerspectiveCamera;
use viewer_camera_sync::math::camera_convention_fix;
use viewer_camera_sync::{CameraPose, WorldFrame};

fn vec3_strategy(range: f32) -> impl Strategy<Value = Vec3> {
    (-range..range, -range..range, -range..range).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn rotation_strategy() -> impl Strategy<Value = Quat> {
    (vec3_strategy(1.0), -std::f32::consts::PI..std::f32::consts::PI).prop_map(|(axis, angle)| {
        match axis.try_normalize() {
            Some(axis) => Quat::from_axis_angle(axis, angle),
            None => Quat::IDENTITY,
        }
    })
}

fn frame_strategy() -> impl Strategy<Value = WorldFrame> {
    prop_oneof![
        Just(WorldFrame::z_up()),
        Just(WorldFrame::identity()),
        (rotation_strategy(), vec3_strategy(10.0))
            .prop_map(|(rotation, translation)| WorldFrame::new(rotation, translation)),
    ]
}

fn same_rotation(a: Quat, b: Quat) -> bool {
    // q and -q describe the same rotation
    a.dot(b).abs() > 1.0 - 1e-4
}

proptest! {
    #[test]
    fn render_world_render_round_trip(
        position in vec3_strategy(50.0),
        orientation in rotation_strategy(),
        target in vec3_strategy(50.0),
        frame in frame_strategy(),
    ) {
        let mut camera = PerspectiveCamera::default();
        camera.position = position;
        camera.orientation = orientation;

        let pose = CameraPose::from_render(&camera, target, &frame);
        let (render_position, render_orientation) = pose.render_transform(&frame);

        prop_assert!((render_position - position).length() < 1e-3 * (1.0 + position.length()));
        prop_assert!(same_rotation(render_orientation, orientation));
        prop_assert!((pose.render_look_at(&frame) - target).length() < 1e-3 * (1.0 + target.length()));
    }

    #[test]
    fn world_orientation_is_unit(
        orientation in rotation_strategy(),
        frame in frame_strategy(),
    ) {
        let mut camera = PerspectiveCamera::default();
        camera.orientation = orientation;
        let pose = CameraPose::from_render(&camera, Vec3::ZERO, &frame);
        prop_assert!((pose.orientation.length() - 1.0).abs() < 1e-4);
        prop_assert!((pose.up_direction.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn convention_fix_is_involution(v in vec3_strategy(100.0)) {
        let fix = camera_convention_fix();
        prop_assert!((fix * (fix * v) - v).length() < 1e-3 * (1.0 + v.length()));
    }

    #[test]
    fn world_forward_points_at_look_at(
        eye in vec3_strategy(20.0),
        frame in frame_strategy(),
    ) {
        prop_assume!(eye.length() > 0.5);
        // Stay away from looking straight along the up axis
        prop_assume!(eye.normalize().dot(Vec3::Y).abs() < 0.99);

        let mut camera = PerspectiveCamera::default();
        camera.position = eye;
        prop_assume!(camera.look_at(Vec3::ZERO));

        let pose = CameraPose::from_render(&camera, Vec3::ZERO, &frame);
        let world_eye = frame.render_point_to_world(eye);
        let world_target = frame.render_point_to_world(Vec3::ZERO);
        let expected = (world_target - world_eye).normalize();
        prop_assert!((pose.forward() - expected).length() < 1e-3);
        prop_assert!((pose.position - world_eye).length() < 1e-3 * (1.0 + world_eye.length()));
    }
}
