//! Input peripherals of the generator.
//!
//! The only input is the 4x4 matrix keypad. Scanning is polled from a
//! fast software task; debouncing happens here so the control crate only
//! ever sees clean key events.

mod debounced;
pub mod keypad;

pub use keypad::{Keypad, Pins as KeypadPins};
