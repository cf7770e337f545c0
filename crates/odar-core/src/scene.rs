mod device;
mod graph;
mod material;

pub use device::*;
pub use graph::*;
pub use material::*;
