pub mod camera;
pub mod cli;
pub mod core;
pub mod gui;
pub mod math;
pub mod message;
pub mod query;
pub mod traits;
pub mod transport;

pub use crate::core::{CameraSynchronizer, OrbitControls, OrbitSettings, SyncError, SyncSettings};
pub use camera::PerspectiveCamera;
pub use math::{CameraPose, WorldFrame};
pub use message::{ClientMessage, ViewerCameraMessage};
pub use query::ViewerQuery;
