pub mod device;
pub mod line;

pub use device::Device;
pub use line::{SignalLine, Wire, MARK, SPACE};
