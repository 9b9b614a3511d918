pub mod color;
pub mod degree;
pub mod preset;
pub mod sight;

pub use color::*;
pub use degree::*;
pub use preset::*;
pub use sight::*;
