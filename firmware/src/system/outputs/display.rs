//! Driver of the 20x4 character display, an HD44780 wired in 4-bit mode.

use cortex_m::asm;

use tren_control::display::{Frame, COLUMNS};

use crate::system::hal::gpio::{ErasedPin, Output};
use crate::system::CORE_CLOCK_HZ;

const CYCLES_PER_US: u32 = CORE_CLOCK_HZ / 1_000_000;

// DDRAM start addresses of the four physical rows.
const ROW_ADDRESSES: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

pub struct Display {
    rs: ErasedPin<Output>,
    en: ErasedPin<Output>,
    data: [ErasedPin<Output>; 4],
}

pub struct Pins {
    pub rs: ErasedPin<Output>,
    pub en: ErasedPin<Output>,
    pub data: [ErasedPin<Output>; 4],
}

impl Display {
    /// Take the pins and run the HD44780 4-bit initialization sequence.
    #[must_use]
    pub fn new(pins: Pins) -> Self {
        let mut display = Self {
            rs: pins.rs,
            en: pins.en,
            data: pins.data,
        };

        // Power-on reset into 4-bit mode, per the datasheet figure 24.
        delay_us(50_000);
        display.rs.set_low();
        display.write_nibble(0x3);
        delay_us(4500);
        display.write_nibble(0x3);
        delay_us(150);
        display.write_nibble(0x3);
        delay_us(150);
        display.write_nibble(0x2);
        delay_us(150);

        display.command(0x28); // two lines, 5x8 font
        display.command(0x08); // display off
        display.clear();
        display.command(0x06); // cursor moves right, no shift
        display.command(0x0C); // display on, no cursor

        display
    }

    pub fn clear(&mut self) {
        self.command(0x01);
        delay_us(2000);
    }

    /// Redraw all four rows, padding short ones with spaces.
    pub fn draw(&mut self, frame: &Frame) {
        for (i, row) in frame.rows.iter().enumerate() {
            self.set_cursor(i, 0);
            for byte in row.as_bytes() {
                self.write_data(*byte);
            }
            for _ in row.len()..COLUMNS {
                self.write_data(b' ');
            }
        }
    }

    fn set_cursor(&mut self, row: usize, column: usize) {
        self.command(0x80 | (ROW_ADDRESSES[row] + column as u8));
    }

    fn command(&mut self, byte: u8) {
        self.rs.set_low();
        self.write_byte(byte);
    }

    fn write_data(&mut self, byte: u8) {
        self.rs.set_high();
        self.write_byte(byte);
    }

    fn write_byte(&mut self, byte: u8) {
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
    }

    fn write_nibble(&mut self, nibble: u8) {
        for (i, pin) in self.data.iter_mut().enumerate() {
            pin.set_state((nibble >> i & 1 == 1).into());
        }
        self.en.set_high();
        delay_us(1);
        self.en.set_low();
        // Longest the controller is busy for a plain command or write.
        delay_us(50);
    }
}

fn delay_us(us: u32) {
    asm::delay(us * CYCLES_PER_US);
}
