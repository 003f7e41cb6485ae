//! 4x4 matrix keypad scanner.

use tren_control::Key;

use super::debounced::Debounced;
use crate::system::hal::gpio::{ErasedPin, Input, Output};

const ROWS: usize = 4;
const COLUMNS: usize = 4;

/// Cycles to let the matrix lines settle after selecting a column.
const SETTLE_CYCLES: u32 = 100;

/// Key assignment of the physical matrix, row-major.
///
/// Matches the legend printed on the keypad: `A` starts and stops the
/// generator, `B` enters the menu, `C` returns, `E` resets the burst
/// counter, `F` resets the accumulated counter, `D` has no function.
const KEYMAP: [[Option<Key>; COLUMNS]; ROWS] = [
    [
        Some(Key::Digit(1)),
        Some(Key::Digit(2)),
        Some(Key::Digit(3)),
        Some(Key::StartStop),
    ],
    [
        Some(Key::Digit(4)),
        Some(Key::Digit(5)),
        Some(Key::Digit(6)),
        Some(Key::EnterMenu),
    ],
    [
        Some(Key::Digit(7)),
        Some(Key::Digit(8)),
        Some(Key::Digit(9)),
        Some(Key::Return),
    ],
    [
        Some(Key::Digit(0)),
        Some(Key::ResetTotal),
        Some(Key::ResetBurst),
        None,
    ],
];

/// Scanner of the keypad matrix.
///
/// Columns are driven low one at a time while rows are read with pull
/// ups; a low row means the key at that crossing is down. Every crossing
/// is debounced separately and only the press edge is reported.
pub struct Keypad {
    rows: [ErasedPin<Input>; ROWS],
    columns: [ErasedPin<Output>; COLUMNS],
    debounced: [[Debounced<4>; COLUMNS]; ROWS],
    active: [[bool; COLUMNS]; ROWS],
}

pub struct Pins {
    pub rows: [ErasedPin<Input>; ROWS],
    pub columns: [ErasedPin<Output>; COLUMNS],
}

impl Keypad {
    #[must_use]
    pub fn new(mut pins: Pins) -> Self {
        for column in &mut pins.columns {
            column.set_high();
        }
        Self {
            rows: pins.rows,
            columns: pins.columns,
            debounced: core::array::from_fn(|_| core::array::from_fn(|_| Debounced::new())),
            active: [[false; COLUMNS]; ROWS],
        }
    }

    /// Walk the matrix once, reporting at most one newly pressed key.
    ///
    /// When several keys pass their debounce threshold within the same
    /// scan, the first one in row-major order wins and the others are
    /// dropped. Chords have no meaning on this keypad.
    pub fn scan(&mut self) -> Option<Key> {
        let mut event = None;
        for (c, column) in self.columns.iter_mut().enumerate() {
            column.set_low();
            cortex_m::asm::delay(SETTLE_CYCLES);
            for (r, row) in self.rows.iter().enumerate() {
                let was_active = self.active[r][c];
                let active = self.debounced[r][c].update(row.is_low());
                self.active[r][c] = active;
                if active && !was_active && event.is_none() {
                    event = KEYMAP[r][c];
                }
            }
            column.set_high();
        }
        event
    }

    /// Whether any key is currently held down, without debouncing.
    #[must_use]
    pub fn any_key_down(&mut self) -> bool {
        let mut down = false;
        for column in &mut self.columns {
            column.set_low();
        }
        cortex_m::asm::delay(SETTLE_CYCLES);
        for row in &self.rows {
            down |= row.is_low();
        }
        for column in &mut self.columns {
            column.set_high();
        }
        down
    }
}
