pub mod manifest;
pub mod segment;

pub use manifest::*;
pub use segment::*;
