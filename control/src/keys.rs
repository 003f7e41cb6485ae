//! Key events produced by the keypad collaborator.

/// A single key event from the 4x4 keypad.
///
/// This is the full input alphabet of the menu state machine. The physical
/// assignment of keys to matrix positions is up to the hardware binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// One of the digits 0 to 9.
    Digit(u8),
    /// Toggles generation between running and idle.
    StartStop,
    /// Enters the main menu, accepted only while the generator is idle.
    EnterMenu,
    /// Leaves the current screen, committing a pending edit.
    Return,
    /// Zeroes the pulses-emitted-in-burst counter.
    ResetBurst,
    /// Zeroes the lifetime pulse counter.
    ResetTotal,
}
