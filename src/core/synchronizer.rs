use glam::Vec3;
use log::{debug, info, warn};
use thiserror::Error;

use super::input_adapter::ViewportEvent;
use super::orbit_controls::OrbitControls;
use super::timer::{BoundedRetry, Countdown, TrailingThrottle};
use crate::camera::PerspectiveCamera;
use crate::math::{CameraPose, WorldFrame};
use crate::message::{ClientMessage, ViewerCameraMessage};
use crate::query::ViewerQuery;
use crate::traits::{CameraControls, MessageSink};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("no initial camera snapshot has been taken yet")]
    NoSnapshot,
    #[error("camera controls are not attached")]
    ControlsDetached,
}

/// Timing knobs for the synchronizer, all in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncSettings {
    /// Minimum spacing between outbound camera messages
    pub throttle_interval: f32,
    /// Delay before retrying while controls are not attached
    pub retry_delay: f32,
    pub max_retries: u32,
    /// Delay after connecting, so the peer can register its handlers
    pub connect_delay: f32,
    pub log_camera: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            throttle_interval: 0.02,
            retry_delay: 0.01,
            max_retries: 500,
            connect_delay: 0.05,
            log_camera: false,
        }
    }
}

/// Renderer-frame camera captured on the first synchronization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialCameraState {
    pub camera: PerspectiveCamera,
    pub look_at: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

/// Tracks the canvas size and reports changes while attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ViewportObserver {
    size: (u32, u32),
}

impl ViewportObserver {
    fn observe(&mut self, width: u32, height: u32) -> bool {
        let changed = self.size != (width, height);
        self.size = (width, height);
        changed
    }
}

/// Keeps a remote peer informed of the viewer camera.
///
/// Every deferred action (retry, post-connect send, throttled flush) is driven
/// by [`CameraSynchronizer::tick`], so nothing here blocks the caller.
pub struct CameraSynchronizer<C: CameraControls, S: MessageSink> {
    frame: WorldFrame,
    settings: SyncSettings,
    controls: Option<C>,
    sink: S,
    throttle: TrailingThrottle<ViewerCameraMessage>,
    retry: BoundedRetry,
    connect_delay: Countdown,
    connected: bool,
    initial: Option<InitialCameraState>,
    seed: Option<ViewerQuery>,
    seed_applied: bool,
    viewport: Option<ViewportObserver>,
    lifecycle: Lifecycle,
}

impl<C: CameraControls, S: MessageSink> CameraSynchronizer<C, S> {
    pub fn new(frame: WorldFrame, sink: S, settings: SyncSettings) -> Self {
        Self {
            frame,
            settings,
            controls: None,
            sink,
            throttle: TrailingThrottle::new(settings.throttle_interval),
            retry: BoundedRetry::new(settings.retry_delay, settings.max_retries),
            connect_delay: Countdown::new(settings.connect_delay),
            connected: false,
            initial: None,
            seed: None,
            seed_applied: false,
            viewport: None,
            lifecycle: Lifecycle::Created,
        }
    }

    /// Hand over the camera controls. Applies the pending initial pose, if any.
    pub fn attach_controls(&mut self, mut controls: C) {
        if let Some(viewport) = self.viewport {
            controls.camera_mut().set_viewport(viewport.size.0, viewport.size.1);
        }
        self.controls = Some(controls);
        let retry_pending = self.retry.is_scheduled();
        self.retry.reset();
        self.apply_initial_pose();
        if retry_pending {
            self.synchronize();
        }
    }

    pub fn detach_controls(&mut self) -> Option<C> {
        self.controls.take()
    }

    pub fn controls(&self) -> Option<&C> {
        self.controls.as_ref()
    }

    pub fn controls_mut(&mut self) -> Option<&mut C> {
        self.controls.as_mut()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn frame(&self) -> &WorldFrame {
        &self.frame
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    pub fn initial_state(&self) -> Option<&InitialCameraState> {
        self.initial.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Number of retries spent waiting for controls since the last attach
    pub fn retry_attempts(&self) -> u32 {
        self.retry.attempts()
    }

    /// Seed the camera from the query string and start observing the viewport.
    /// The seed is applied once per lifetime; later mounts keep the camera.
    pub fn mount(&mut self, query: ViewerQuery, viewport: (u32, u32)) {
        if self.lifecycle == Lifecycle::Unmounted {
            warn!("Ignoring mount of an unmounted camera synchronizer");
            return;
        }

        self.settings.log_camera |= query.log_camera;
        if !self.seed_applied {
            self.seed = Some(query);
        }
        self.apply_initial_pose();

        self.viewport = Some(ViewportObserver { size: viewport });
        if let Some(controls) = self.controls.as_mut() {
            controls.camera_mut().set_viewport(viewport.0, viewport.1);
        }
        self.lifecycle = Lifecycle::Mounted;
        debug!("Camera synchronizer mounted with viewport {:?}", viewport);
    }

    /// Stop observing and cancel every deferred action
    pub fn unmount(&mut self) {
        self.viewport = None;
        self.retry.cancel();
        self.connect_delay.cancel();
        self.throttle.cancel();
        self.lifecycle = Lifecycle::Unmounted;
        debug!("Camera synchronizer unmounted");
    }

    fn apply_initial_pose(&mut self) {
        if self.seed_applied {
            return;
        }
        let Some(controls) = self.controls.as_mut() else {
            return;
        };
        let Some(query) = self.seed.take() else {
            return;
        };

        let position = self.frame.world_point_to_render(query.initial_camera_position);
        let look_at = self.frame.world_point_to_render(query.initial_camera_look_at);
        controls.set_look_at(position, look_at, false);
        self.seed_applied = true;
        debug!(
            "Initial camera set to {:?} looking at {:?}",
            query.initial_camera_position, query.initial_camera_look_at
        );
    }

    /// Report connection status. Each transition to connected schedules a send.
    pub fn set_connected(&mut self, connected: bool) {
        if connected && !self.connected && self.lifecycle != Lifecycle::Unmounted {
            self.connect_delay.start();
        }
        if !connected {
            self.connect_delay.cancel();
        }
        self.connected = connected;
    }

    /// Canvas size observation; any change re-sends the camera
    pub fn on_resize(&mut self, width: u32, height: u32) {
        let Some(viewport) = self.viewport.as_mut() else {
            return;
        };
        if !viewport.observe(width, height) {
            return;
        }
        if let Some(controls) = self.controls.as_mut() {
            controls.camera_mut().set_viewport(width, height);
        }
        self.synchronize();
    }

    /// Change callback for user-driven camera moves
    pub fn on_controls_changed(&mut self) {
        self.synchronize();
    }

    /// Compute the current world-frame pose and queue it for sending.
    /// Retries shortly if the controls are not attached yet.
    pub fn synchronize(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }

        let Some(controls) = self.controls.as_ref() else {
            if !self.retry.schedule() {
                warn!(
                    "Camera controls still missing after {} retries, dropping camera update",
                    self.retry.attempts()
                );
            }
            return;
        };

        let camera = controls.camera();
        let target = controls.target();

        if self.initial.is_none() {
            self.initial = Some(InitialCameraState {
                camera: *camera,
                look_at: target,
            });
        }

        let pose = CameraPose::from_render(camera, target, &self.frame);
        self.throttle.submit(ViewerCameraMessage::from(&pose));

        if self.settings.log_camera {
            info!("Sending camera {:?} {:?}", pose.position.to_array(), pose.look_at.to_array());
        }
    }

    /// Ease the controls back to the pose captured on the first synchronization
    pub fn reset_to_initial(&mut self) -> Result<(), SyncError> {
        let initial = self.initial.ok_or(SyncError::NoSnapshot)?;
        let controls = self.controls.as_mut().ok_or(SyncError::ControlsDetached)?;

        controls.set_look_at(initial.camera.position, initial.look_at, true);
        controls.camera_mut().up = initial.camera.up;
        controls.update_camera_up();
        Ok(())
    }

    /// Advance deferred work by `delta` seconds
    pub fn tick(&mut self, delta: f32) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }

        // Flush before queueing, so a pose submitted this tick waits a full window
        if let Some(message) = self.throttle.tick(delta) {
            self.emit(message);
        }

        if self.retry.tick(delta) {
            self.synchronize();
        }
        if self.connect_delay.tick(delta) {
            self.synchronize();
        }

        let changed = self
            .controls
            .as_mut()
            .is_some_and(|controls| controls.update(delta));
        if changed {
            self.on_controls_changed();
        }
    }

    fn emit(&mut self, message: ViewerCameraMessage) {
        if !self.connected {
            debug!("Not connected, dropping camera message");
            return;
        }
        if let Err(err) = self.sink.send(&ClientMessage::ViewerCameraMessage(message)) {
            warn!("Failed to send camera message: {err}");
        }
    }
}

impl<S: MessageSink> CameraSynchronizer<OrbitControls, S> {
    /// Route a decoded window event: resizes to the viewport observer,
    /// pointer gestures to the orbit controls.
    pub fn handle_viewport_event(&mut self, event: ViewportEvent) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        match event {
            ViewportEvent::Resized { width, height } => self.on_resize(width, height),
            ViewportEvent::Gesture(gesture) => {
                let viewport_height = self.viewport.map_or(1.0, |viewport| viewport.size.1 as f32);
                let Some(controls) = self.controls.as_mut() else {
                    return;
                };
                controls.apply_gesture(gesture, viewport_height);
                self.on_controls_changed();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockControls {
        camera: PerspectiveCamera,
        target: Vec3,
        up_updates: u32,
    }

    impl CameraControls for MockControls {
        fn camera(&self) -> &PerspectiveCamera {
            &self.camera
        }

        fn camera_mut(&mut self) -> &mut PerspectiveCamera {
            &mut self.camera
        }

        fn target(&self) -> Vec3 {
            self.target
        }

        fn set_look_at(&mut self, position: Vec3, target: Vec3, _animate: bool) {
            self.camera.position = position;
            self.target = target;
        }

        fn update_camera_up(&mut self) {
            self.up_updates += 1;
        }

        fn update(&mut self, _delta: f32) -> bool {
            false
        }
    }

    type TestSync = CameraSynchronizer<MockControls, Vec<ClientMessage>>;

    fn new_sync() -> TestSync {
        CameraSynchronizer::new(WorldFrame::z_up(), Vec::new(), SyncSettings::default())
    }

    #[test]
    fn test_viewport_observer_reports_changes_only() {
        let mut observer = ViewportObserver { size: (800, 600) };
        assert!(!observer.observe(800, 600));
        assert!(observer.observe(1024, 600));
        assert!(!observer.observe(1024, 600));
    }

    #[test]
    fn test_snapshot_is_taken_once() {
        let mut sync = new_sync();
        sync.attach_controls(MockControls::default());
        sync.synchronize();
        let first = *sync.initial_state().unwrap();

        sync.controls_mut().unwrap().camera.position = Vec3::new(9.0, 9.0, 9.0);
        sync.synchronize();
        assert_eq!(*sync.initial_state().unwrap(), first);
    }

    #[test]
    fn test_reset_restores_up_and_recomputes() {
        let mut sync = new_sync();
        sync.attach_controls(MockControls::default());
        sync.synchronize();

        let controls = sync.controls_mut().unwrap();
        controls.camera.up = Vec3::X;
        controls.camera.position = Vec3::ONE;

        sync.reset_to_initial().unwrap();
        let controls = sync.controls().unwrap();
        assert_eq!(controls.camera.up, Vec3::Y);
        assert_eq!(controls.camera.position, Vec3::ZERO);
        assert_eq!(controls.up_updates, 1);
    }

    #[test]
    fn test_reset_errors() {
        let mut sync = new_sync();
        sync.attach_controls(MockControls::default());
        assert_eq!(sync.reset_to_initial(), Err(SyncError::NoSnapshot));

        sync.synchronize();
        sync.detach_controls();
        assert_eq!(sync.reset_to_initial(), Err(SyncError::ControlsDetached));
    }

    #[test]
    fn test_messages_dropped_while_disconnected() {
        let mut sync = new_sync();
        sync.attach_controls(MockControls::default());
        sync.synchronize();
        sync.tick(0.03);
        assert!(sync.sink().is_empty());
    }

    #[test]
    fn test_log_camera_enabled_from_query() {
        let mut sync = new_sync();
        assert!(!sync.settings().log_camera);

        sync.mount(ViewerQuery::parse("logCamera"), (800, 600));
        assert!(sync.settings().log_camera);
    }

    #[test]
    fn test_log_camera_setting_survives_query_without_flag() {
        let settings = SyncSettings {
            log_camera: true,
            ..SyncSettings::default()
        };
        let mut sync: TestSync = CameraSynchronizer::new(WorldFrame::z_up(), Vec::new(), settings);
        sync.mount(ViewerQuery::parse(""), (800, 600));
        assert!(sync.settings().log_camera);
    }

    #[test]
    fn test_attach_after_mount_uses_viewport_aspect() {
        let mut sync = new_sync();
        sync.mount(ViewerQuery::default(), (1600, 800));
        sync.attach_controls(MockControls::default());
        assert_eq!(sync.controls().unwrap().camera.aspect, 2.0);
    }

    #[test]
    fn test_unmount_ignores_later_calls() {
        let mut sync = new_sync();
        sync.mount(ViewerQuery::default(), (800, 600));
        sync.unmount();

        sync.attach_controls(MockControls::default());
        sync.set_connected(true);
        sync.synchronize();
        sync.on_resize(100, 100);
        sync.tick(1.0);

        assert!(sync.initial_state().is_none());
        assert!(sync.sink().is_empty());
    }
}
