//! Output peripherals of the generator.

pub mod display;
pub mod pulse;

pub use display::{Display, Pins as DisplayPins};
pub use pulse::PulseOutput;
