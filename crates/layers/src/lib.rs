pub mod lop;
pub mod symbology;

pub use lop::*;
pub use symbology::*;
