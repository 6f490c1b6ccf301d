pub mod collector;
pub mod gpu;
pub mod process;
pub mod sampler;
pub mod snapshot;
