//! Scripted HAL doubles for host-side tests
//!
//! [`MockHal`] implements every board trait over plain state: a capability
//! table with the Ember geometry, per-pin read scripts, a self-advancing
//! millisecond tick, and a log of every effective hardware call so tests
//! can assert both what happened and what deliberately did not.
//!
//! Enabled via the `mock` cargo feature; consumers pull it in as a
//! dev-dependency (`features = ["mock"]`).

use heapless::{Deque, Vec};

use crate::adc::{AdcReader, AdcSampleTime};
use crate::bus::BusStatus;
use crate::net::NetworkService;
use crate::pin::{BusPinout, Level, PinBank, PinInfo, PinMode};
use crate::pwm::PwmOut;
use crate::time::Clock;
use crate::watchdog::Watchdog;

/// Pin count of the mocked board (Ember geometry).
pub const MOCK_PIN_COUNT: u8 = 21;
/// First analog pin of the mocked board.
pub const MOCK_FIRST_ANALOG: u8 = 10;
/// Bus roles of the mocked board: SPI on A3-A5, I²C on D0/D1, UART1 on 18/19.
pub const MOCK_PINOUT: BusPinout = BusPinout {
    spi_sck: 13,
    spi_mosi: 15,
    spi_miso: 14,
    i2c_scl: 1,
    i2c_sda: 0,
    serial1_rx: 18,
    serial1_tx: 19,
};

const PINS: usize = MOCK_PIN_COUNT as usize;
const ADC_CHANNELS: usize = 18;
const PWM_SLOTS: usize = 8;
const READ_SCRIPT_CAP: usize = 16;
const CALL_LOG_CAP: usize = 128;

/// One effective hardware call recorded by [`MockHal`].
///
/// Rejected operations never reach the HAL, so their absence from the log
/// is the assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalCall {
    /// `PinBank::set_mode(pin, mode)`
    SetMode(u8, PinMode),
    /// `PinBank::write(pin, level)`
    Write(u8, Level),
    /// `PinBank::read(pin)`
    Read(u8),
    /// `AdcReader::sample(channel)`
    Sample(u8),
    /// `AdcReader::set_sample_time(time)`
    SetSampleTime(AdcSampleTime),
    /// `PwmOut::set_duty(slot, duty)`
    SetDuty(u8, u8),
}

/// Scripted implementation of the full board HAL.
///
/// Digital reads pop a per-pin script first and fall back to the pin's last
/// driven level, so a loopback is just "write, then read". The millisecond
/// tick advances by `tick_step_ms` on every read, which lets delay tests
/// count polls instead of wall time (same idea as pico-style mock timers).
#[derive(Debug)]
pub struct MockHal {
    table: [PinInfo; PINS],
    lines: [Level; PINS],
    reads: [Deque<Level, READ_SCRIPT_CAP>; PINS],
    adc: [u16; ADC_CHANNELS],
    sample_time: Option<AdcSampleTime>,
    duty: [Option<u8>; PWM_SLOTS],
    now_ms: u32,
    tick_step_ms: u32,
    now_us: u32,
    feeds: u32,
    spi_on: bool,
    i2c_on: bool,
    serial1_on: bool,
    calls: Vec<HalCall, CALL_LOG_CAP>,
}

impl MockHal {
    /// Fresh mock with the Ember capability table, all pins unconfigured,
    /// all buses disabled, tick at zero advancing 1 ms per poll.
    pub fn new() -> Self {
        let mut table = [PinInfo::gpio(); PINS];
        // D0-D3: PWM slots 0-3 (I²C doubles on D0/D1)
        table[0] = PinInfo::with_pwm(0);
        table[1] = PinInfo::with_pwm(1);
        table[2] = PinInfo::with_pwm(2);
        table[3] = PinInfo::with_pwm(3);
        // A0-A7 on pins 10-17, ADC channels 0,1,4..9; A4-A7 add PWM slots 4-7
        table[10] = PinInfo::with_adc(0);
        table[11] = PinInfo::with_adc(1);
        table[12] = PinInfo::with_adc(4);
        table[13] = PinInfo::with_adc(5);
        table[14] = PinInfo::with_adc_pwm(6, 4);
        table[15] = PinInfo::with_adc_pwm(7, 5);
        table[16] = PinInfo::with_adc_pwm(8, 6);
        table[17] = PinInfo::with_adc_pwm(9, 7);

        Self {
            table,
            lines: [Level::Low; PINS],
            reads: core::array::from_fn(|_| Deque::new()),
            adc: [0; ADC_CHANNELS],
            sample_time: None,
            duty: [None; PWM_SLOTS],
            now_ms: 0,
            tick_step_ms: 1,
            now_us: 0,
            feeds: 0,
            spi_on: false,
            i2c_on: false,
            serial1_on: false,
            calls: Vec::new(),
        }
    }

    /// Enable or disable the mocked SPI peripheral.
    pub fn set_spi_enabled(&mut self, on: bool) {
        self.spi_on = on;
    }

    /// Enable or disable the mocked I²C peripheral.
    pub fn set_i2c_enabled(&mut self, on: bool) {
        self.i2c_on = on;
    }

    /// Enable or disable the mocked UART1 peripheral.
    pub fn set_serial1_enabled(&mut self, on: bool) {
        self.serial1_on = on;
    }

    /// Script the next level `read(pin)` returns (FIFO per pin).
    pub fn queue_read(&mut self, pin: u8, level: Level) {
        let _ = self.reads[pin as usize].push_back(level);
    }

    /// Set the sample every conversion on `channel` returns.
    pub fn set_adc_value(&mut self, channel: u8, sample: u16) {
        self.adc[channel as usize] = sample;
    }

    /// Jump the millisecond counter to `ms`.
    pub fn set_millis(&mut self, ms: u32) {
        self.now_ms = ms;
    }

    /// Advance the millisecond counter by `step` on every poll.
    pub fn set_tick_step(&mut self, step: u32) {
        self.tick_step_ms = step;
    }

    /// Jump the microsecond counter to `us`.
    pub fn set_micros(&mut self, us: u32) {
        self.now_us = us;
    }

    /// Last driven level of `pin`.
    pub fn line(&self, pin: u8) -> Level {
        self.lines[pin as usize]
    }

    /// Last duty programmed on `slot`, if any.
    pub fn duty(&self, slot: u8) -> Option<u8> {
        self.duty[slot as usize]
    }

    /// Last sample time selected, if any.
    pub fn sample_time(&self) -> Option<AdcSampleTime> {
        self.sample_time
    }

    /// Number of watchdog feeds so far.
    pub fn feed_count(&self) -> u32 {
        self.feeds
    }

    /// Every effective hardware call, in order.
    pub fn calls(&self) -> &[HalCall] {
        &self.calls
    }

    /// Forget recorded calls (feeds and pin state stay).
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn record(&mut self, call: HalCall) {
        let _ = self.calls.push(call);
    }
}

impl Default for MockHal {
    fn default() -> Self {
        Self::new()
    }
}

impl PinBank for MockHal {
    const PIN_COUNT: u8 = MOCK_PIN_COUNT;
    const FIRST_ANALOG: u8 = MOCK_FIRST_ANALOG;
    const PINOUT: BusPinout = MOCK_PINOUT;

    fn pin_info(&self, pin: u8) -> PinInfo {
        self.table[pin as usize]
    }

    fn set_mode(&mut self, pin: u8, mode: PinMode) {
        self.table[pin as usize].mode = mode;
        self.record(HalCall::SetMode(pin, mode));
    }

    fn write(&mut self, pin: u8, level: Level) {
        self.lines[pin as usize] = level;
        self.record(HalCall::Write(pin, level));
    }

    fn read(&mut self, pin: u8) -> Level {
        self.record(HalCall::Read(pin));
        match self.reads[pin as usize].pop_front() {
            Some(level) => level,
            None => self.lines[pin as usize],
        }
    }
}

impl AdcReader for MockHal {
    fn sample(&mut self, channel: u8) -> u16 {
        self.record(HalCall::Sample(channel));
        self.adc[channel as usize]
    }

    fn set_sample_time(&mut self, time: AdcSampleTime) {
        self.sample_time = Some(time);
        self.record(HalCall::SetSampleTime(time));
    }
}

impl PwmOut for MockHal {
    fn set_duty(&mut self, slot: u8, duty: u8) {
        self.duty[slot as usize] = Some(duty);
        self.record(HalCall::SetDuty(slot, duty));
    }
}

impl Clock for MockHal {
    fn millis(&mut self) -> u32 {
        let now = self.now_ms;
        self.now_ms = now.wrapping_add(self.tick_step_ms);
        now
    }

    fn micros(&mut self) -> u32 {
        self.now_us
    }

    fn delay_us(&mut self, us: u32) {
        self.now_us = self.now_us.wrapping_add(us);
    }
}

impl Watchdog for MockHal {
    fn feed(&mut self) {
        self.feeds = self.feeds.wrapping_add(1);
    }
}

impl BusStatus for MockHal {
    fn spi_enabled(&self) -> bool {
        self.spi_on
    }

    fn i2c_enabled(&self) -> bool {
        self.i2c_on
    }

    fn serial1_enabled(&self) -> bool {
        self.serial1_on
    }
}

/// Scripted network link.
///
/// Counts service passes; `begin_update(n)` raises the update flag for the
/// next `n` passes so tests can watch the delay loop drain it.
#[derive(Debug, Default)]
pub struct MockLink {
    active: bool,
    update_passes: u8,
    services: u32,
}

impl MockLink {
    /// Link in the given activity state, no update pending.
    pub fn new(active: bool) -> Self {
        Self {
            active,
            update_passes: 0,
            services: 0,
        }
    }

    /// Change the activity state.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Raise the update flag; each service pass consumes one count.
    pub fn begin_update(&mut self, passes: u8) {
        self.update_passes = passes;
    }

    /// Number of service passes run so far.
    pub fn service_count(&self) -> u32 {
        self.services
    }
}

impl NetworkService for MockLink {
    fn is_active(&self) -> bool {
        self.active
    }

    fn update_in_progress(&self) -> bool {
        self.update_passes > 0
    }

    fn service(&mut self) {
        self.services = self.services.wrapping_add(1);
        if self.update_passes > 0 {
            self.update_passes -= 1;
        }
    }
}
