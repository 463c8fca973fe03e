//! PWM on TIM3 and TIM4
//!
//! Ember fixes the carrier at 500 Hz and exposes eight slots, four per
//! timer. A timer is left alone until the first write to one of its
//! slots: at that point the pin bank surrenders the group's pins and the
//! embassy driver takes the timer over, claiming all four channel pins
//! at once. From then on those pins answer digital writes through the
//! duty rails (0 or 255) instead of the GPIO registers.

use embassy_stm32::gpio::OutputType;
use embassy_stm32::time::hz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::Channel;
use embassy_stm32::{peripherals, Peripherals};

use crate::board;

/// Timer channel carrying each slot.
const CHANNELS: [Channel; board::PWM_SLOT_COUNT as usize] = [
    Channel::Ch2, // slot 0, D0 = PB7
    Channel::Ch1, // slot 1, D1 = PB6
    Channel::Ch3, // slot 2, D2 = PB8
    Channel::Ch4, // slot 3, D3 = PB9
    Channel::Ch1, // slot 4, A4 = PA6
    Channel::Ch2, // slot 5, A5 = PA7
    Channel::Ch3, // slot 6, A6 = PB0
    Channel::Ch4, // slot 7, A7 = PB1
];

pub(crate) struct PwmBank {
    tim3: Option<SimplePwm<'static, peripherals::TIM3>>,
    tim4: Option<SimplePwm<'static, peripherals::TIM4>>,
    duty: [u8; board::PWM_SLOT_COUNT as usize],
}

impl PwmBank {
    pub(crate) fn new() -> Self {
        Self {
            tim3: None,
            tim4: None,
            duty: [0; board::PWM_SLOT_COUNT as usize],
        }
    }

    /// Drive `slot` at `duty / 255`, claiming its timer on first use.
    ///
    /// The caller must surrender the group's pins from the bank first.
    pub(crate) fn set_duty(&mut self, slot: u8, duty: u8) {
        if slot >= board::PWM_SLOT_COUNT {
            return;
        }

        let channel = CHANNELS[slot as usize];
        if slot < 4 {
            let mut ch = self.tim4().channel(channel);
            ch.set_duty_cycle_fraction(duty as u16, 255);
            ch.enable();
        } else {
            let mut ch = self.tim3().channel(channel);
            ch.set_duty_cycle_fraction(duty as u16, 255);
            ch.enable();
        }
        self.duty[slot as usize] = duty;
    }

    /// Last duty commanded on `slot`.
    pub(crate) fn duty(&self, slot: u8) -> u8 {
        self.duty.get(slot as usize).copied().unwrap_or(0)
    }

    fn tim4(&mut self) -> &mut SimplePwm<'static, peripherals::TIM4> {
        self.tim4.get_or_insert_with(|| {
            // Safety: the pin bank dropped its PB6-PB9 handles before
            // this runs, so the stolen singletons have no other user.
            let p = unsafe { Peripherals::steal() };
            SimplePwm::new(
                p.TIM4,
                Some(PwmPin::new_ch1(p.PB6, OutputType::PushPull)),
                Some(PwmPin::new_ch2(p.PB7, OutputType::PushPull)),
                Some(PwmPin::new_ch3(p.PB8, OutputType::PushPull)),
                Some(PwmPin::new_ch4(p.PB9, OutputType::PushPull)),
                hz(board::PWM_CARRIER_HZ),
                Default::default(),
            )
        })
    }

    fn tim3(&mut self) -> &mut SimplePwm<'static, peripherals::TIM3> {
        self.tim3.get_or_insert_with(|| {
            // Safety: as for TIM4, the bank surrendered PA6/PA7/PB0/PB1.
            let p = unsafe { Peripherals::steal() };
            SimplePwm::new(
                p.TIM3,
                Some(PwmPin::new_ch1(p.PA6, OutputType::PushPull)),
                Some(PwmPin::new_ch2(p.PA7, OutputType::PushPull)),
                Some(PwmPin::new_ch3(p.PB0, OutputType::PushPull)),
                Some(PwmPin::new_ch4(p.PB1, OutputType::PushPull)),
                hz(board::PWM_CARRIER_HZ),
                Default::default(),
            )
        })
    }
}
