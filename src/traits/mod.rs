pub mod camera;
pub mod transport;

pub use camera::*;
pub use transport::*;
