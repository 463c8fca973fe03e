//! STM32F1 backend for the Filament wiring layer
//!
//! Implements the `filament-hal` traits on top of embassy-stm32 for the
//! Ember dev board (STM32F103CB, or the C8 with less flash). The pin
//! geometry lives in [`board`]; [`EmberHal`] wires the GPIO bank, ADC1,
//! the TIM3/TIM4 PWM slots, the independent watchdog and the embassy
//! tick into one value the portability layer can own.
//!
//! # Features
//!
//! - `stm32f103cb` / `stm32f103c8` - chip selection, pick one in the
//!   final firmware
//! - `defmt` - enable debug formatting support
//!
//! # Peripheral budget
//!
//! TIM2 drives the embassy time base and is never handed to sketches;
//! PWM lives on TIM3 and TIM4. ADC1 serves all ten analog channels.
//! Everything else in the chip stays free for bus drivers built directly
//! on embassy-stm32.

#![no_std]

pub mod board;

mod adc;
mod pins;
mod pwm;

use embassy_stm32::gpio::Flex;
use embassy_stm32::wdg::IndependentWatchdog;
use embassy_stm32::{peripherals, Peripherals};
use embassy_time::{block_for, Duration, Instant};
use filament_hal::{AdcSampleTime, BusPinout, Level, PinInfo, PinMode};

use crate::adc::AdcUnit;
use crate::pins::{PinBank, PinSlot};
use crate::pwm::PwmBank;

/// The Ember board as one [`filament_hal::Hal`] value.
///
/// Construction arms the independent watchdog; from then on something
/// must call [`filament_hal::Watchdog::feed`] inside every 26 second
/// window, which the layer's `delay` does on every lap.
pub struct EmberHal {
    pins: PinBank,
    adc: AdcUnit,
    pwm: PwmBank,
    watchdog: IndependentWatchdog<'static, peripherals::IWDG>,
    spi_enabled: bool,
    i2c_enabled: bool,
    serial1_enabled: bool,
}

impl EmberHal {
    /// Claim the board's peripherals and arm the watchdog.
    ///
    /// Call once, right after `embassy_stm32::init`. Peripherals outside
    /// the [pin map](board) are left in `p` for the caller.
    pub fn new(p: Peripherals) -> Self {
        let mut watchdog = IndependentWatchdog::new(p.IWDG, board::WATCHDOG_TIMEOUT_US);
        watchdog.unleash();

        let pins = PinBank::new([
            PinSlot::Io(Flex::new(p.PB7)),  // D0
            PinSlot::Io(Flex::new(p.PB6)),  // D1
            PinSlot::Io(Flex::new(p.PB8)),  // D2
            PinSlot::Io(Flex::new(p.PB9)),  // D3
            PinSlot::Io(Flex::new(p.PB5)),  // D4
            PinSlot::Io(Flex::new(p.PB12)), // D5
            PinSlot::Io(Flex::new(p.PB13)), // D6
            PinSlot::Io(Flex::new(p.PC13)), // D7, user LED
            PinSlot::Missing,
            PinSlot::Missing,
            PinSlot::Io(Flex::new(p.PA0)),  // A0
            PinSlot::Io(Flex::new(p.PA1)),  // A1
            PinSlot::Io(Flex::new(p.PA4)),  // A2
            PinSlot::Io(Flex::new(p.PA5)),  // A3
            PinSlot::Io(Flex::new(p.PA6)),  // A4
            PinSlot::Io(Flex::new(p.PA7)),  // A5
            PinSlot::Io(Flex::new(p.PB0)),  // A6
            PinSlot::Io(Flex::new(p.PB1)),  // A7
            PinSlot::Io(Flex::new(p.PA3)),  // RX
            PinSlot::Io(Flex::new(p.PA2)),  // TX
            PinSlot::Io(Flex::new(p.PB10)), // BTN
        ]);

        Self {
            pins,
            adc: AdcUnit::new(p.ADC1),
            pwm: PwmBank::new(),
            watchdog,
            spi_enabled: false,
            i2c_enabled: false,
            serial1_enabled: false,
        }
    }

    /// Mark the SPI1 pins as claimed or released.
    ///
    /// Bus drivers sit outside this crate; whoever brings SPI up flips
    /// this so the layer's arbitration starts protecting SCK/MOSI/MISO.
    pub fn set_spi_enabled(&mut self, enabled: bool) {
        self.spi_enabled = enabled;
    }

    /// Mark the I2C1 pins as claimed or released.
    pub fn set_i2c_enabled(&mut self, enabled: bool) {
        self.i2c_enabled = enabled;
    }

    /// Mark the USART2 pins as claimed or released.
    pub fn set_serial1_enabled(&mut self, enabled: bool) {
        self.serial1_enabled = enabled;
    }
}

impl filament_hal::PinBank for EmberHal {
    const PIN_COUNT: u8 = board::PIN_COUNT;
    const FIRST_ANALOG: u8 = board::FIRST_ANALOG;
    const PINOUT: BusPinout = board::PINOUT;

    fn pin_info(&self, pin: u8) -> PinInfo {
        let idx = pin as usize;
        if idx >= board::PIN_COUNT as usize {
            return PinInfo::gpio();
        }
        PinInfo {
            mode: self.pins.mode(pin),
            adc_channel: board::ADC_CHANNELS[idx],
            pwm_slot: board::PWM_SLOTS[idx],
        }
    }

    fn set_mode(&mut self, pin: u8, mode: PinMode) {
        self.pins.set_mode(pin, mode);
    }

    fn write(&mut self, pin: u8, level: Level) {
        match self.pins.slot_mut(pin) {
            Some(PinSlot::Io(flex)) => flex.set_level(level.is_high().into()),
            Some(PinSlot::Pwm(slot)) => {
                // timer-owned pin: ride the duty rails
                let slot = *slot;
                let rail = if level.is_high() { 255 } else { 0 };
                self.pwm.set_duty(slot, rail);
            }
            _ => {}
        }
    }

    fn read(&mut self, pin: u8) -> Level {
        match self.pins.slot_mut(pin) {
            Some(PinSlot::Io(flex)) => Level::from(flex.is_high()),
            Some(PinSlot::Pwm(slot)) => {
                // no input path once the timer owns the pin; report the
                // dominant rail of the last commanded duty
                let slot = *slot;
                Level::from(self.pwm.duty(slot) >= 128)
            }
            _ => Level::Low,
        }
    }
}

impl filament_hal::AdcReader for EmberHal {
    fn sample(&mut self, channel: u8) -> u16 {
        self.adc.sample(channel)
    }

    fn set_sample_time(&mut self, time: AdcSampleTime) {
        self.adc.set_window(time);
    }
}

impl filament_hal::PwmOut for EmberHal {
    fn set_duty(&mut self, slot: u8, duty: u8) {
        if slot >= board::PWM_SLOT_COUNT {
            return;
        }
        self.pins.surrender_pwm_group(slot);
        self.pwm.set_duty(slot, duty);
    }
}

impl filament_hal::Clock for EmberHal {
    fn millis(&mut self) -> u32 {
        Instant::now().as_millis() as u32
    }

    fn micros(&mut self) -> u32 {
        Instant::now().as_micros() as u32
    }

    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(us as u64));
    }
}

impl filament_hal::Watchdog for EmberHal {
    fn feed(&mut self) {
        self.watchdog.pet();
    }
}

impl filament_hal::BusStatus for EmberHal {
    fn spi_enabled(&self) -> bool {
        self.spi_enabled
    }

    fn i2c_enabled(&self) -> bool {
        self.i2c_enabled
    }

    fn serial1_enabled(&self) -> bool {
        self.serial1_enabled
    }
}
