pub mod line;
pub mod transcript;

pub use line::*;
pub use transcript::*;
