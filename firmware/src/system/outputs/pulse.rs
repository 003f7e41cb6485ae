//! The pulse output pin.

use crate::system::hal::gpio::{ErasedPin, Output};
use crate::system::CORE_CLOCK_HZ;

const CYCLES_PER_US: u32 = CORE_CLOCK_HZ / 1_000_000;

/// Driver of the single digital output the generator exists for.
///
/// The pin idles low. `emit` holds it high with a cycle counted busy
/// wait; at a 100 ms tick and a 100 us maximum width the hold takes up
/// at most a thousandth of the tick interval.
pub struct PulseOutput {
    pin: ErasedPin<Output>,
}

impl PulseOutput {
    #[must_use]
    pub fn new(mut pin: ErasedPin<Output>) -> Self {
        pin.set_low();
        Self { pin }
    }

    /// Assert the pin high for `width_us` and release it.
    pub fn emit(&mut self, width_us: u32) {
        self.pin.set_high();
        cortex_m::asm::delay(width_us * CYCLES_PER_US);
        self.pin.set_low();
    }

    pub fn force_low(&mut self) {
        self.pin.set_low();
    }
}
