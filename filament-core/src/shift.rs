//! Bit-banged shift register transfers
//!
//! Software SPI for the 74HC595 crowd: one byte per call, clocked on any
//! two GPIO pins through the ordinary pin operations. Because these go
//! through [`Wiring::digital_write`] and [`Wiring::digital_read`], the
//! pins must already be configured (data out + clock out for
//! [`Wiring::shift_out`], data in + clock out for [`Wiring::shift_in`])
//! and the usual bus arbitration applies.

use filament_hal::{Hal, Level, NetworkService};

use crate::Wiring;

/// Which end of the byte goes on the wire first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Bit 0 first.
    LsbFirst,
    /// Bit 7 first.
    MsbFirst,
}

impl<H: Hal, N: NetworkService> Wiring<H, N> {
    /// Clock one byte in from `data_pin`, pulsing `clock_pin` per bit.
    ///
    /// The device is expected to present the next bit on the rising
    /// edge: the clock goes high, the data line is sampled, the clock
    /// goes low again, eight times over.
    pub fn shift_in(&mut self, data_pin: u8, clock_pin: u8, order: BitOrder) -> u8 {
        let mut value = 0;

        for i in 0..8 {
            self.digital_write(clock_pin, Level::High);
            let bit = u8::from(self.digital_read(data_pin).is_high());
            value |= match order {
                BitOrder::LsbFirst => bit << i,
                BitOrder::MsbFirst => bit << (7 - i),
            };
            self.digital_write(clock_pin, Level::Low);
        }

        value
    }

    /// Clock one byte out on `data_pin`, pulsing `clock_pin` per bit.
    ///
    /// The data line settles before the clock rises, so devices latching
    /// on either edge see a stable bit.
    pub fn shift_out(&mut self, data_pin: u8, clock_pin: u8, order: BitOrder, value: u8) {
        for i in 0..8 {
            let bit = value
                & match order {
                    BitOrder::LsbFirst => 1 << i,
                    BitOrder::MsbFirst => 1 << (7 - i),
                };
            self.digital_write(data_pin, Level::from(bit));
            self.digital_write(clock_pin, Level::High);
            self.digital_write(clock_pin, Level::Low);
        }
    }
}
