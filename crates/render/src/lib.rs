pub mod raster;
pub mod sampler;

pub use raster::*;
pub use sampler::*;
