pub mod corpus;
pub mod input;
pub mod manifest;
pub mod pairs;

pub use corpus::*;
pub use input::*;
pub use manifest::*;
pub use pairs::*;
