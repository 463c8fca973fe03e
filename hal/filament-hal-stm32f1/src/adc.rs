//! ADC1 access for the analog pins
//!
//! The converter is shared by ten channels but the GPIO singletons for
//! those pins live inside the pin bank, so each conversion briefly steals
//! a second handle to the one channel it needs. The embassy driver puts
//! the pin into analog mode for the conversion; switching the pin back to
//! digital duty afterwards is an explicit `pin_mode` away, same as on the
//! original hardware.

use embassy_stm32::adc::{Adc, SampleTime};
use embassy_stm32::{peripherals, Peripherals};
use filament_hal::AdcSampleTime;

pub(crate) struct AdcUnit {
    adc: Adc<'static, peripherals::ADC1>,
}

impl AdcUnit {
    pub(crate) fn new(adc1: peripherals::ADC1) -> Self {
        let mut adc = Adc::new(adc1);
        adc.set_sample_time(sample_time(AdcSampleTime::Cycles7_5));
        Self { adc }
    }

    pub(crate) fn set_window(&mut self, time: AdcSampleTime) {
        self.adc.set_sample_time(sample_time(time));
    }

    /// One blocking conversion on `channel`. Unmapped channels read 0.
    pub(crate) fn sample(&mut self, channel: u8) -> u16 {
        // Safety: the stolen handles alias pins owned by the pin bank.
        // Only the one channel pin is touched, the borrow ends with the
        // conversion, and nothing here runs from interrupt context.
        let mut p = unsafe { Peripherals::steal() };

        match channel {
            0 => self.adc.blocking_read(&mut p.PA0),
            1 => self.adc.blocking_read(&mut p.PA1),
            4 => self.adc.blocking_read(&mut p.PA4),
            5 => self.adc.blocking_read(&mut p.PA5),
            6 => self.adc.blocking_read(&mut p.PA6),
            7 => self.adc.blocking_read(&mut p.PA7),
            8 => self.adc.blocking_read(&mut p.PB0),
            9 => self.adc.blocking_read(&mut p.PB1),
            _ => 0,
        }
    }
}

fn sample_time(time: AdcSampleTime) -> SampleTime {
    match time {
        AdcSampleTime::Cycles1_5 => SampleTime::CYCLES1_5,
        AdcSampleTime::Cycles7_5 => SampleTime::CYCLES7_5,
        AdcSampleTime::Cycles13_5 => SampleTime::CYCLES13_5,
        AdcSampleTime::Cycles28_5 => SampleTime::CYCLES28_5,
        AdcSampleTime::Cycles41_5 => SampleTime::CYCLES41_5,
        AdcSampleTime::Cycles55_5 => SampleTime::CYCLES55_5,
        AdcSampleTime::Cycles71_5 => SampleTime::CYCLES71_5,
        AdcSampleTime::Cycles239_5 => SampleTime::CYCLES239_5,
    }
}
