//! Pin operations and bus arbitration
//!
//! [`Wiring`] owns the board HAL and the network link capability and fronts
//! them with the classic pin API. Every operation validates its arguments
//! against the board capability table and the enabled bus peripherals
//! before the HAL sees anything; a call that fails validation is silently
//! dropped (writes) or answers logical low (reads). The sketch-facing API
//! deliberately has no error channel.

use filament_hal::{AdcSampleTime, Hal, Level, NetworkService, Offline, PinMode};

/// The wiring layer.
///
/// `H` is the board (any [`filament_hal::Hal`]); `N` is the network link
/// serviced from inside [`Wiring::delay`]. Boards without a link plug in
/// [`Offline`] via [`Wiring::offline`].
///
/// The layer holds no pin state of its own: the capability table lives in
/// the bank, and [`Wiring::pin_mode`] is the only path that mutates it.
/// The one scalar it does carry is the delay loop's service backlog.
pub struct Wiring<H, N> {
    pub(crate) hal: H,
    pub(crate) link: N,
    pub(crate) backlog_ms: u32,
}

impl<H: Hal> Wiring<H, Offline> {
    /// Layer without a network link.
    ///
    /// [`Wiring::delay`] degrades to a plain watchdog-kicking busy-wait.
    pub fn offline(hal: H) -> Self {
        Self::new(hal, Offline)
    }
}

impl<H: Hal, N: NetworkService> Wiring<H, N> {
    /// Layer over `hal`, yielding to `link` from inside blocking delays.
    pub fn new(hal: H, link: N) -> Self {
        Self {
            hal,
            link,
            backlog_ms: 0,
        }
    }

    /// Borrow the board HAL.
    pub fn hal(&self) -> &H {
        &self.hal
    }

    /// Mutably borrow the board HAL (bus bring-up, board-specific pokes).
    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    /// Borrow the network link.
    pub fn link(&self) -> &N {
        &self.link
    }

    /// Mutably borrow the network link.
    pub fn link_mut(&mut self) -> &mut N {
        &mut self.link
    }

    /// Tear the layer down into its parts.
    pub fn release(self) -> (H, N) {
        (self.hal, self.link)
    }

    /// True unless an enabled bus peripheral owns `pin`.
    ///
    /// SPI owns SCK/MOSI/MISO, I²C owns SCL/SDA, UART1 owns RX/TX, each
    /// only while enabled. Ownership is total - there is no read-only
    /// carve-out - and every pin operation consults this predicate before
    /// touching the HAL. Pins outside the bank match no role and count as
    /// available; the individual operations range-check separately.
    pub fn pin_available(&self, pin: u8) -> bool {
        let pinout = H::PINOUT;

        if self.hal.spi_enabled()
            && (pin == pinout.spi_sck || pin == pinout.spi_mosi || pin == pinout.spi_miso)
        {
            return false;
        }

        if self.hal.i2c_enabled() && (pin == pinout.i2c_scl || pin == pinout.i2c_sda) {
            return false;
        }

        if self.hal.serial1_enabled()
            && (pin == pinout.serial1_rx || pin == pinout.serial1_tx)
        {
            return false;
        }

        true
    }

    /// Configure `pin` as `mode`.
    ///
    /// Ignored if the pin is out of range, `mode` is [`PinMode::None`], or
    /// a bus owns the pin. Otherwise the bank applies the electrical
    /// configuration and records the new mode in the capability table -
    /// this is the sole mode mutator in the system.
    pub fn pin_mode(&mut self, pin: u8, mode: PinMode) {
        if pin >= H::PIN_COUNT || mode == PinMode::None {
            return;
        }

        if !self.pin_available(pin) {
            return;
        }

        self.hal.set_mode(pin, mode);
    }

    /// Drive `pin` to `level`.
    ///
    /// Only pins currently in an output mode (plain or alternate) are
    /// driven; writes to input, analog, or unconfigured pins are no-ops,
    /// as are writes to out-of-range or bus-owned pins.
    pub fn digital_write(&mut self, pin: u8, level: Level) {
        if pin >= H::PIN_COUNT {
            return;
        }

        if !matches!(
            self.hal.pin_info(pin).mode,
            PinMode::Output | PinMode::AlternatePushPull | PinMode::AlternateOpenDrain
        ) {
            return;
        }

        if !self.pin_available(pin) {
            return;
        }

        self.hal.write(pin, level);
    }

    /// Sample `pin`.
    ///
    /// Answers [`Level::Low`] for out-of-range, unconfigured,
    /// alternate-output, or bus-owned pins. Any input mode is readable, and
    /// so is a plain push-pull output (the read reflects its driven state).
    pub fn digital_read(&mut self, pin: u8) -> Level {
        if pin >= H::PIN_COUNT {
            return Level::Low;
        }

        if matches!(
            self.hal.pin_info(pin).mode,
            PinMode::None | PinMode::AlternatePushPull | PinMode::AlternateOpenDrain
        ) {
            return Level::Low;
        }

        if !self.pin_available(pin) {
            return Level::Low;
        }

        self.hal.read(pin)
    }

    /// Sample the ADC channel behind `pin`.
    ///
    /// Accepts the short analog alias too: a pin below the first analog
    /// index is remapped by adding it, so `analog_read(3)` and
    /// `analog_read(A3)` are the same call. Answers 0 if the (remapped)
    /// pin is bus-owned, out of range, or has no ADC channel.
    ///
    /// The converter is 12-bit, so results sit in `0..=4095` despite the
    /// u16 return.
    pub fn analog_read(&mut self, pin: u8) -> u16 {
        let pin = if pin < H::FIRST_ANALOG {
            pin + H::FIRST_ANALOG
        } else {
            pin
        };

        if !self.pin_available(pin) {
            return 0;
        }

        if pin >= H::PIN_COUNT {
            return 0;
        }

        match self.hal.pin_info(pin).adc_channel {
            Some(channel) => self.hal.sample(channel),
            None => 0,
        }
    }

    /// Select the ADC sampling window for subsequent conversions.
    ///
    /// Forwards unconditionally; the enum already limits values to the
    /// windows the hardware supports.
    pub fn set_adc_sample_time(&mut self, time: AdcSampleTime) {
        self.hal.set_sample_time(time);
    }

    /// Emit PWM on `pin` with a duty cycle of `duty / 255`.
    ///
    /// The board's carrier frequency is fixed (500 Hz on Ember). Ignored
    /// if the pin is out of range, has no PWM slot, is bus-owned, or is
    /// not configured as `Output` or `AlternatePushPull`.
    pub fn analog_write(&mut self, pin: u8, duty: u8) {
        if pin >= H::PIN_COUNT {
            return;
        }

        let info = self.hal.pin_info(pin);
        let slot = match info.pwm_slot {
            Some(slot) => slot,
            None => return,
        };

        if !self.pin_available(pin) {
            return;
        }

        if !matches!(info.mode, PinMode::Output | PinMode::AlternatePushPull) {
            return;
        }

        self.hal.set_duty(slot, duty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filament_hal::mock::{HalCall, MockHal, MockLink, MOCK_PINOUT, MOCK_PIN_COUNT};
    use filament_hal::PinBank;

    fn wiring() -> Wiring<MockHal, Offline> {
        Wiring::offline(MockHal::new())
    }

    #[test]
    fn test_pin_mode_reaches_hal_and_table() {
        let mut w = wiring();
        w.pin_mode(5, PinMode::Output);

        assert_eq!(w.hal().calls(), &[HalCall::SetMode(5, PinMode::Output)]);
        assert_eq!(w.hal().pin_info(5).mode, PinMode::Output);
    }

    #[test]
    fn test_pin_mode_rejects_out_of_range() {
        let mut w = wiring();
        w.pin_mode(MOCK_PIN_COUNT, PinMode::Output);
        w.pin_mode(255, PinMode::Input);

        assert!(w.hal().calls().is_empty());
    }

    #[test]
    fn test_pin_mode_rejects_none() {
        let mut w = wiring();
        w.pin_mode(5, PinMode::None);

        assert!(w.hal().calls().is_empty());
        assert_eq!(w.hal().pin_info(5).mode, PinMode::None);
    }

    #[test]
    fn test_pin_mode_rejects_bus_owned_pin() {
        let mut w = wiring();
        w.hal_mut().set_spi_enabled(true);
        w.pin_mode(MOCK_PINOUT.spi_sck, PinMode::Output);

        assert!(w.hal().calls().is_empty());
    }

    #[test]
    fn test_pin_available_tracks_bus_state() {
        let mut w = wiring();
        assert!(w.pin_available(MOCK_PINOUT.spi_sck));
        assert!(w.pin_available(MOCK_PINOUT.i2c_sda));
        assert!(w.pin_available(MOCK_PINOUT.serial1_tx));

        w.hal_mut().set_spi_enabled(true);
        assert!(!w.pin_available(MOCK_PINOUT.spi_sck));
        assert!(!w.pin_available(MOCK_PINOUT.spi_mosi));
        assert!(!w.pin_available(MOCK_PINOUT.spi_miso));
        assert!(w.pin_available(2)); // unrelated pin stays free

        w.hal_mut().set_i2c_enabled(true);
        assert!(!w.pin_available(MOCK_PINOUT.i2c_scl));
        assert!(!w.pin_available(MOCK_PINOUT.i2c_sda));

        w.hal_mut().set_serial1_enabled(true);
        assert!(!w.pin_available(MOCK_PINOUT.serial1_rx));
        assert!(!w.pin_available(MOCK_PINOUT.serial1_tx));

        w.hal_mut().set_spi_enabled(false);
        assert!(w.pin_available(MOCK_PINOUT.spi_sck));
    }

    #[test]
    fn test_pin_available_ignores_out_of_range_pins() {
        // no role matches, so the predicate says free; the operations'
        // own range guards handle these indices
        let mut w = wiring();
        w.hal_mut().set_spi_enabled(true);
        w.hal_mut().set_i2c_enabled(true);
        w.hal_mut().set_serial1_enabled(true);
        assert!(w.pin_available(MOCK_PIN_COUNT));
        assert!(w.pin_available(255));
    }

    #[test]
    fn test_digital_write_requires_an_output_mode() {
        let input_modes = [
            PinMode::Input,
            PinMode::InputPullUp,
            PinMode::InputPullDown,
            PinMode::AnalogInput,
        ];
        for mode in input_modes {
            let mut w = wiring();
            w.pin_mode(5, mode);
            w.hal_mut().clear_calls();

            w.digital_write(5, Level::High);
            assert!(w.hal().calls().is_empty(), "wrote in {mode:?}");
        }

        let output_modes = [
            PinMode::Output,
            PinMode::AlternatePushPull,
            PinMode::AlternateOpenDrain,
        ];
        for mode in output_modes {
            let mut w = wiring();
            w.pin_mode(5, mode);
            w.hal_mut().clear_calls();

            w.digital_write(5, Level::High);
            assert_eq!(w.hal().calls(), &[HalCall::Write(5, Level::High)]);
        }
    }

    #[test]
    fn test_digital_write_ignores_unconfigured_pin() {
        let mut w = wiring();
        w.digital_write(5, Level::High);

        assert!(w.hal().calls().is_empty());
        assert_eq!(w.hal().line(5), Level::Low);
    }

    #[test]
    fn test_digital_write_rejects_out_of_range() {
        let mut w = wiring();
        w.digital_write(MOCK_PIN_COUNT, Level::High);
        w.digital_write(255, Level::High);

        assert!(w.hal().calls().is_empty());
    }

    #[test]
    fn test_digital_write_rejects_bus_owned_pin() {
        let mut w = wiring();
        w.pin_mode(MOCK_PINOUT.spi_sck, PinMode::Output);
        w.hal_mut().set_spi_enabled(true);
        w.hal_mut().clear_calls();

        w.digital_write(MOCK_PINOUT.spi_sck, Level::High);

        assert!(w.hal().calls().is_empty());
        assert_eq!(w.hal().line(MOCK_PINOUT.spi_sck), Level::Low);
    }

    #[test]
    fn test_digital_read_input_modes_and_output() {
        let mut w = wiring();
        w.pin_mode(4, PinMode::Input);
        w.hal_mut().queue_read(4, Level::High);
        assert_eq!(w.digital_read(4), Level::High);

        // reading back a driven push-pull output is allowed
        w.pin_mode(5, PinMode::Output);
        w.digital_write(5, Level::High);
        assert_eq!(w.digital_read(5), Level::High);

        w.pin_mode(6, PinMode::AnalogInput);
        w.hal_mut().queue_read(6, Level::High);
        assert_eq!(w.digital_read(6), Level::High);
    }

    #[test]
    fn test_digital_read_rejects_alternate_and_unconfigured() {
        let mut w = wiring();
        w.pin_mode(5, PinMode::AlternatePushPull);
        w.pin_mode(6, PinMode::AlternateOpenDrain);
        w.hal_mut().queue_read(5, Level::High);
        w.hal_mut().queue_read(6, Level::High);
        w.hal_mut().queue_read(7, Level::High);
        w.hal_mut().clear_calls();

        assert_eq!(w.digital_read(5), Level::Low);
        assert_eq!(w.digital_read(6), Level::Low);
        assert_eq!(w.digital_read(7), Level::Low); // never configured

        assert!(w.hal().calls().is_empty());
    }

    #[test]
    fn test_digital_read_rejects_out_of_range() {
        let mut w = wiring();
        assert_eq!(w.digital_read(MOCK_PIN_COUNT), Level::Low);
        assert_eq!(w.digital_read(255), Level::Low);
        assert!(w.hal().calls().is_empty());
    }

    #[test]
    fn test_digital_read_bus_owned_pin_reads_low() {
        let mut w = wiring();
        w.pin_mode(MOCK_PINOUT.serial1_rx, PinMode::Input);
        w.hal_mut().queue_read(MOCK_PINOUT.serial1_rx, Level::High);
        w.hal_mut().set_serial1_enabled(true);
        w.hal_mut().clear_calls();

        assert_eq!(w.digital_read(MOCK_PINOUT.serial1_rx), Level::Low);
        assert!(w.hal().calls().is_empty());
    }

    #[test]
    fn test_analog_read_short_alias_matches_full_index() {
        let mut w = wiring();
        // pin 13 = A3, ADC channel 5
        w.hal_mut().set_adc_value(5, 777);

        assert_eq!(w.analog_read(3), 777);
        assert_eq!(w.analog_read(13), 777);
        assert_eq!(
            w.hal().calls(),
            &[HalCall::Sample(5), HalCall::Sample(5)]
        );
    }

    #[test]
    fn test_analog_read_full_scale_is_twelve_bit() {
        let mut w = wiring();
        w.hal_mut().set_adc_value(0, 4095);
        assert_eq!(w.analog_read(10), 4095);
    }

    #[test]
    fn test_analog_read_without_channel_returns_zero() {
        let mut w = wiring();
        w.hal_mut().set_adc_value(0, 999);

        // RX (18) and BTN (20) carry no ADC channel
        assert_eq!(w.analog_read(18), 0);
        assert_eq!(w.analog_read(20), 0);
        assert!(w.hal().calls().is_empty());
    }

    #[test]
    fn test_analog_read_rejects_out_of_range() {
        let mut w = wiring();
        assert_eq!(w.analog_read(MOCK_PIN_COUNT), 0);
        assert_eq!(w.analog_read(255), 0);
        assert!(w.hal().calls().is_empty());
    }

    #[test]
    fn test_analog_read_arbitrates_after_remapping() {
        let mut w = wiring();
        w.hal_mut().set_adc_value(5, 1234);
        w.hal_mut().set_spi_enabled(true);

        // both spellings resolve to SCK and get rejected
        assert_eq!(w.analog_read(13), 0);
        assert_eq!(w.analog_read(3), 0);
        assert!(w.hal().calls().is_empty());
    }

    #[test]
    fn test_set_adc_sample_time_forwards_unconditionally() {
        let mut w = wiring();
        w.set_adc_sample_time(AdcSampleTime::Cycles239_5);

        assert_eq!(
            w.hal().calls(),
            &[HalCall::SetSampleTime(AdcSampleTime::Cycles239_5)]
        );
        assert_eq!(w.hal().sample_time(), Some(AdcSampleTime::Cycles239_5));
    }

    #[test]
    fn test_analog_write_drives_slot() {
        let mut w = wiring();
        w.pin_mode(0, PinMode::Output);
        w.hal_mut().clear_calls();

        w.analog_write(0, 128);

        assert_eq!(w.hal().calls(), &[HalCall::SetDuty(0, 128)]);
        assert_eq!(w.hal().duty(0), Some(128));
    }

    #[test]
    fn test_analog_write_accepts_alternate_push_pull() {
        let mut w = wiring();
        w.pin_mode(14, PinMode::AlternatePushPull);
        w.hal_mut().clear_calls();

        w.analog_write(14, 200);

        assert_eq!(w.hal().calls(), &[HalCall::SetDuty(4, 200)]);
    }

    #[test]
    fn test_analog_write_requires_pwm_slot() {
        let mut w = wiring();
        w.pin_mode(5, PinMode::Output); // D5 has no timer slot
        w.hal_mut().clear_calls();

        w.analog_write(5, 128);

        assert!(w.hal().calls().is_empty());
    }

    #[test]
    fn test_analog_write_rejects_wrong_modes() {
        for mode in [
            PinMode::Input,
            PinMode::InputPullUp,
            PinMode::InputPullDown,
            PinMode::AnalogInput,
            PinMode::AlternateOpenDrain,
        ] {
            let mut w = wiring();
            w.pin_mode(0, mode);
            w.hal_mut().clear_calls();

            w.analog_write(0, 77);
            assert!(w.hal().calls().is_empty(), "PWM ran in {mode:?}");
        }
    }

    #[test]
    fn test_analog_write_rejects_unconfigured_pin() {
        let mut w = wiring();
        w.analog_write(0, 30);
        assert!(w.hal().calls().is_empty());
    }

    #[test]
    fn test_analog_write_rejects_bus_owned_pin() {
        let mut w = wiring();
        // D1 doubles as SCL and carries PWM slot 1
        w.pin_mode(1, PinMode::Output);
        w.hal_mut().set_i2c_enabled(true);
        w.hal_mut().clear_calls();

        w.analog_write(1, 99);

        assert!(w.hal().calls().is_empty());
    }

    #[test]
    fn test_analog_write_rejects_out_of_range() {
        let mut w = wiring();
        w.analog_write(MOCK_PIN_COUNT, 50);
        w.analog_write(255, 50);
        assert!(w.hal().calls().is_empty());
    }

    #[test]
    fn test_scenario_configure_drive_read_back() {
        let mut w = wiring();
        w.pin_mode(13, PinMode::Output);
        w.digital_write(13, Level::High);

        assert_eq!(w.digital_read(13), Level::High);
        assert_eq!(
            w.hal().calls(),
            &[
                HalCall::SetMode(13, PinMode::Output),
                HalCall::Write(13, Level::High),
                HalCall::Read(13),
            ]
        );
    }

    #[test]
    fn test_release_returns_parts() {
        let mut w = Wiring::new(MockHal::new(), MockLink::new(true));
        w.pin_mode(2, PinMode::Output);
        let (hal, link) = w.release();

        assert_eq!(hal.pin_info(2).mode, PinMode::Output);
        assert!(link.is_active());
    }
}
