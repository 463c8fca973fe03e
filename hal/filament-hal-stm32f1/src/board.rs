//! Ember board geometry
//!
//! The Ember dev board routes an STM32F103Cx like this:
//!
//! ```text
//! index  name  port   extras
//! -----  ----  -----  ------------------------------------
//!   0    D0    PB7    I2C1 SDA, TIM4_CH2 (PWM slot 0)
//!   1    D1    PB6    I2C1 SCL, TIM4_CH1 (PWM slot 1)
//!   2    D2    PB8    TIM4_CH3 (PWM slot 2)
//!   3    D3    PB9    TIM4_CH4 (PWM slot 3)
//!   4    D4    PB5
//!   5    D5    PB12
//!   6    D6    PB13
//!   7    D7    PC13   user LED
//!   8,9  -     -      not bonded out
//!  10    A0    PA0    ADC ch 0
//!  11    A1    PA1    ADC ch 1
//!  12    A2    PA4    ADC ch 4
//!  13    A3    PA5    ADC ch 5, SPI1 SCK
//!  14    A4    PA6    ADC ch 6, SPI1 MISO, TIM3_CH1 (PWM slot 4)
//!  15    A5    PA7    ADC ch 7, SPI1 MOSI, TIM3_CH2 (PWM slot 5)
//!  16    A6    PB0    ADC ch 8, TIM3_CH3 (PWM slot 6)
//!  17    A7    PB1    ADC ch 9, TIM3_CH4 (PWM slot 7)
//!  18    RX    PA3    USART2 RX
//!  19    TX    PA2    USART2 TX
//!  20    BTN   PB10   user button
//! ```
//!
//! All alternate functions are the chip's no-remap defaults, so the board
//! needs no AFIO juggling and the debug pins stay untouched.

use filament_hal::BusPinout;

/// Pins in the map, including the two unbonded gaps.
pub const PIN_COUNT: u8 = 21;

/// First analog index; `A0` lives here.
pub const FIRST_ANALOG: u8 = 10;

pub const D0: u8 = 0;
pub const D1: u8 = 1;
pub const D2: u8 = 2;
pub const D3: u8 = 3;
pub const D4: u8 = 4;
pub const D5: u8 = 5;
pub const D6: u8 = 6;
pub const D7: u8 = 7;
pub const A0: u8 = 10;
pub const A1: u8 = 11;
pub const A2: u8 = 12;
pub const A3: u8 = 13;
pub const A4: u8 = 14;
pub const A5: u8 = 15;
pub const A6: u8 = 16;
pub const A7: u8 = 17;
pub const RX: u8 = 18;
pub const TX: u8 = 19;
pub const BTN: u8 = 20;

/// The on-board LED shares `D7`.
pub const LED: u8 = D7;

pub const SCK: u8 = A3;
pub const MISO: u8 = A4;
pub const MOSI: u8 = A5;
pub const SDA: u8 = D0;
pub const SCL: u8 = D1;

/// Bus roles consulted by pin arbitration.
pub const PINOUT: BusPinout = BusPinout {
    spi_sck: A3,
    spi_mosi: A5,
    spi_miso: A4,
    i2c_scl: D1,
    i2c_sda: D0,
    serial1_rx: RX,
    serial1_tx: TX,
};

/// ADC channel behind each pin index, if any.
pub const ADC_CHANNELS: [Option<u8>; PIN_COUNT as usize] = [
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    Some(0),
    Some(1),
    Some(4),
    Some(5),
    Some(6),
    Some(7),
    Some(8),
    Some(9),
    None,
    None,
    None,
];

/// PWM slot behind each pin index, if any.
///
/// Slots 0-3 sit on TIM4, slots 4-7 on TIM3. TIM2 is off limits, it runs
/// the system tick.
pub const PWM_SLOTS: [Option<u8>; PIN_COUNT as usize] = [
    Some(0),
    Some(1),
    Some(2),
    Some(3),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    Some(4),
    Some(5),
    Some(6),
    Some(7),
    None,
    None,
    None,
];

/// Timer slots available for PWM.
pub const PWM_SLOT_COUNT: u8 = 8;

/// Fixed PWM carrier. The user API exposes duty only.
pub const PWM_CARRIER_HZ: u32 = 500;

/// Independent watchdog window. Close to the hardware maximum, the delay
/// loop kicks far more often than this.
pub const WATCHDOG_TIMEOUT_US: u32 = 26_000_000;
