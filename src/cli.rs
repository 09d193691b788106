// cli.rs - Command-line interface configuration
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "viewer-camera-sync")]
#[command(about = "Headless viewer camera synchronization session", long_about = None)]
pub struct Cli {
    /// Page query string, e.g. "?initialCameraPosition=1,2,3&initialCameraLookAt=0,0,0"
    #[arg(long, default_value = "")]
    pub query: String,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 120)]
    pub frames: u32,

    /// Frame step in milliseconds
    #[arg(long, default_value_t = 16.0)]
    pub step_ms: f32,

    /// Horizontal drag per frame in pixels
    #[arg(long, default_value_t = 4.0)]
    pub orbit_speed: f32,

    /// Keep the renderer frame as the world frame instead of Z-up
    #[arg(long = "y-up", default_value = "false")]
    pub y_up: bool,

    /// Log every camera pose that is sent
    #[arg(long = "log-camera", default_value = "false")]
    pub log_camera: bool,
}
