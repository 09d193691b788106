use std::io;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use glam::Vec3;
use log::info;

use viewer_camera_sync::cli::Cli;
use viewer_camera_sync::core::{
    Button, CameraSynchronizer, OrbitControls, OrbitSettings, SyncSettings, WinitViewportInput,
};
use viewer_camera_sync::transport::JsonLinesSink;
use viewer_camera_sync::{PerspectiveCamera, ViewerQuery, WorldFrame};

/// Frames allowed for the reset animation to settle
const RESET_FRAMES: u32 = 60;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    ensure!(cli.width > 0 && cli.height > 0, "viewport must not be empty");
    ensure!(cli.step_ms > 0.0, "frame step must be positive");
    ensure!(cli.frames > 0, "at least one frame is needed to capture the initial pose");

    let frame = if cli.y_up {
        WorldFrame::identity()
    } else {
        WorldFrame::z_up()
    };
    let settings = SyncSettings {
        log_camera: cli.log_camera,
        ..SyncSettings::default()
    };
    let query = ViewerQuery::parse(&cli.query);

    let sink = JsonLinesSink::new(io::stdout().lock());
    let mut sync = CameraSynchronizer::new(frame, sink, settings);

    sync.mount(query, (cli.width, cli.height));
    sync.attach_controls(OrbitControls::new(
        PerspectiveCamera::default(),
        Vec3::ZERO,
        OrbitSettings::default(),
    ));
    sync.set_connected(true);

    // Capture the seeded pose before any scripted input moves the camera
    sync.tick(0.0);

    // Scripted horizontal drag across the middle of the viewport
    let mut input = WinitViewportInput::new();
    let (mut x, y) = (cli.width as f32 * 0.5, cli.height as f32 * 0.5);
    input.cursor_moved(x, y);
    input.button_changed(Button::Primary, true);

    let delta = cli.step_ms / 1000.0;
    for _ in 0..cli.frames {
        x += cli.orbit_speed;
        if let Some(event) = input.cursor_moved(x, y) {
            sync.handle_viewport_event(event);
        }
        sync.tick(delta);
    }
    input.button_changed(Button::Primary, false);

    sync.reset_to_initial()
        .context("failed to reset camera to its initial pose")?;
    for _ in 0..RESET_FRAMES {
        sync.tick(delta);
    }
    sync.tick(settings.throttle_interval);

    info!("Sent {} camera messages", sync.sink().sent());
    Ok(())
}
