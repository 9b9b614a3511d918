pub mod angle;
pub mod mat;
pub mod projection;
pub mod sphere;
pub mod vec;

pub use angle::*;
pub use mat::*;
pub use projection::*;
pub use sphere::*;
pub use vec::*;
