//! GPIO bank for the Ember pin map
//!
//! Every bonded-out pin starts life as an [`embassy_stm32::gpio::Flex`]
//! so the full mode palette is available at runtime. When a sketch first
//! drives PWM, the affected timer's pins are surrendered to the timer
//! peripheral and the bank keeps only a slot marker for them (see
//! [`crate::pwm`]). The bank also records the last mode applied per pin;
//! that table is what the portability layer's mode gating reads back.

use embassy_stm32::gpio::{Flex, Pull, Speed};
use filament_hal::PinMode;

use crate::board;

/// What the bank holds for one pin index.
pub(crate) enum PinSlot {
    /// Pin under direct GPIO control.
    Io(Flex<'static>),
    /// Pin surrendered to a PWM timer; the payload is its slot number.
    Pwm(u8),
    /// Index not bonded out on Ember.
    Missing,
}

pub(crate) struct PinBank {
    slots: [PinSlot; board::PIN_COUNT as usize],
    modes: [PinMode; board::PIN_COUNT as usize],
}

impl PinBank {
    /// Bank over an explicit slot table, all modes unset.
    pub(crate) fn new(slots: [PinSlot; board::PIN_COUNT as usize]) -> Self {
        Self {
            slots,
            modes: [PinMode::None; board::PIN_COUNT as usize],
        }
    }

    /// Last mode applied through [`PinBank::set_mode`].
    pub(crate) fn mode(&self, pin: u8) -> PinMode {
        self.modes
            .get(pin as usize)
            .copied()
            .unwrap_or(PinMode::None)
    }

    pub(crate) fn slot_mut(&mut self, pin: u8) -> Option<&mut PinSlot> {
        self.slots.get_mut(pin as usize)
    }

    /// Apply `mode` to `pin` and record it.
    ///
    /// Pins surrendered to a timer only get the bookkeeping half: the
    /// recorded mode changes so the layer's gating follows, but the
    /// electrical configuration stays with the timer. Unbonded indexes
    /// are ignored outright and keep reporting [`PinMode::None`].
    pub(crate) fn set_mode(&mut self, pin: u8, mode: PinMode) {
        let idx = pin as usize;
        if idx >= self.slots.len() {
            return;
        }

        match &mut self.slots[idx] {
            PinSlot::Io(flex) => {
                apply_mode(flex, mode);
                self.modes[idx] = mode;
            }
            PinSlot::Pwm(_) => {
                self.modes[idx] = mode;
            }
            PinSlot::Missing => {}
        }
    }

    /// Turn the four pins of `slot`'s timer group into slot markers.
    ///
    /// Dropping the `Flex` handles releases the pins so the timer can
    /// take them over; the caller builds the PWM driver right after.
    /// Already-surrendered groups are left alone.
    pub(crate) fn surrender_pwm_group(&mut self, slot: u8) {
        let pins = if slot < 4 { 0..=3u8 } else { 14..=17 };
        for pin in pins {
            let idx = pin as usize;
            if let Some(pwm_slot) = board::PWM_SLOTS[idx] {
                if matches!(self.slots[idx], PinSlot::Io(_)) {
                    self.slots[idx] = PinSlot::Pwm(pwm_slot);
                }
            }
        }
    }
}

fn apply_mode(flex: &mut Flex<'static>, mode: PinMode) {
    match mode {
        PinMode::None => flex.set_as_analog(),
        PinMode::Input => flex.set_as_input(Pull::None),
        PinMode::InputPullUp => flex.set_as_input(Pull::Up),
        PinMode::InputPullDown => flex.set_as_input(Pull::Down),
        PinMode::AnalogInput => flex.set_as_analog(),
        PinMode::Output => flex.set_as_output(Speed::High),
        // GPIO stands in for the real alternate function; the bus
        // drivers claim their pins through embassy directly
        PinMode::AlternatePushPull => flex.set_as_output(Speed::High),
        PinMode::AlternateOpenDrain => flex.set_as_input_output(Speed::High),
    }
}
