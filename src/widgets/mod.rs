mod color;
mod config;
pub mod digit;
mod spring_number;

pub use color::Color;
pub use config::SpringNumberConfig;
pub use digit::DigitSlot;
pub use spring_number::SpringNumber;
