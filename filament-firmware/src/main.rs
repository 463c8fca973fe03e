//! Filament demo sketch for the Ember board
//!
//! The classic storefront loop: blink the user LED at a rate set by the
//! light sensor on A0, breathe an external LED on D0 through PWM, and
//! report button presses. All the timing goes through `delay()`, which
//! keeps the watchdog fed exactly as a Wiring sketch expects.

#![no_std]
#![no_main]

use defmt::*;
use filament_core::{map, Wiring, HIGH, INPUT_PULLUP, LOW, OUTPUT};
use filament_hal_stm32f1::{board, EmberHal};
use {defmt_rtt as _, panic_probe as _};

#[cortex_m_rt::entry]
fn main() -> ! {
    info!("Filament demo starting...");

    let p = embassy_stm32::init(Default::default());
    let mut wiring = Wiring::offline(EmberHal::new(p));
    info!("Ember board up");

    wiring.pin_mode(board::LED, OUTPUT);
    wiring.pin_mode(board::D0, OUTPUT);
    wiring.pin_mode(board::BTN, INPUT_PULLUP);

    loop {
        let light = wiring.analog_read(board::A0);

        // brighter room, faster blink: 50..=1000 ms per phase
        let phase_ms = map(light as i32, 0, 4095, 1000, 50) as u32;
        wiring.analog_write(board::D0, map(light as i32, 0, 4095, 0, 255) as u8);

        wiring.digital_write(board::LED, HIGH);
        wiring.delay(phase_ms);
        wiring.digital_write(board::LED, LOW);
        wiring.delay(phase_ms);

        if wiring.digital_read(board::BTN) == LOW {
            info!("button pressed, light = {}", light);
        }
    }
}
