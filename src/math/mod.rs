mod frame;
mod pose;

pub use frame::{camera_convention_fix, WorldFrame};
pub use pose::CameraPose;
