//! Spring physics and the fixed-step clock that drives it.

mod clock;
mod spring;

pub use clock::LogicalClock;
pub use spring::{SpringConfig, SpringState, Tolerance};
