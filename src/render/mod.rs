pub mod rttm;

pub use rttm::*;
