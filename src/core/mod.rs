pub mod controller;
pub mod input_adapter;
pub mod orbit_controls;
pub mod synchronizer;
pub mod timer;

pub use controller::*;
pub use input_adapter::*;
pub use orbit_controls::*;
pub use synchronizer::*;
pub use timer::*;
