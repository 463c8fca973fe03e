//! Pin types and the pin bank trait
//!
//! The board owns a fixed capability table with one entry per pin; the
//! wiring layer validates user calls against it and asks the bank to apply
//! the result. Only [`PinBank::set_mode`] ever changes a pin's mode.

/// Logic level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// True for [`Level::High`].
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

impl From<u8> for Level {
    /// Wiring tradition: any non-zero value drives the pin high.
    fn from(value: u8) -> Self {
        Level::from(value != 0)
    }
}

/// Electrical configuration of a pin.
///
/// `None` doubles as "never configured" and "not broken out on this board";
/// the wiring layer refuses to configure a pin *to* `None` and refuses
/// digital I/O on a pin still *in* `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Not configured / unavailable
    None,
    /// Floating input
    Input,
    /// Input with pull-up
    InputPullUp,
    /// Input with pull-down
    InputPullDown,
    /// High-impedance analog input (ADC)
    AnalogInput,
    /// Push-pull output
    Output,
    /// Alternate function, push-pull (timer/bus driven)
    AlternatePushPull,
    /// Alternate function, open drain
    AlternateOpenDrain,
}

/// One row of the board capability table.
///
/// `mode` is the only mutable field; the capability options are fixed board
/// data. Channel and slot values index the board's ADC and PWM tables and
/// mean nothing across boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinInfo {
    /// Current configured mode
    pub mode: PinMode,
    /// ADC channel, if the pin can be sampled
    pub adc_channel: Option<u8>,
    /// PWM timer slot, if the pin can generate PWM
    pub pwm_slot: Option<u8>,
}

impl PinInfo {
    /// Entry for a plain GPIO pin without ADC or PWM capability.
    pub const fn gpio() -> Self {
        Self {
            mode: PinMode::None,
            adc_channel: None,
            pwm_slot: None,
        }
    }

    /// Entry for an ADC-capable pin.
    pub const fn with_adc(channel: u8) -> Self {
        Self {
            mode: PinMode::None,
            adc_channel: Some(channel),
            pwm_slot: None,
        }
    }

    /// Entry for a PWM-capable pin.
    pub const fn with_pwm(slot: u8) -> Self {
        Self {
            mode: PinMode::None,
            adc_channel: None,
            pwm_slot: Some(slot),
        }
    }

    /// Entry for a pin that can both sample and generate PWM.
    pub const fn with_adc_pwm(channel: u8, slot: u8) -> Self {
        Self {
            mode: PinMode::None,
            adc_channel: Some(channel),
            pwm_slot: Some(slot),
        }
    }
}

/// Fixed pin assignments of the bus peripherals that share board pins.
///
/// The wiring layer arbitrates GPIO access against these roles whenever the
/// owning bus is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusPinout {
    /// SPI clock
    pub spi_sck: u8,
    /// SPI master-out
    pub spi_mosi: u8,
    /// SPI master-in
    pub spi_miso: u8,
    /// I²C clock
    pub i2c_scl: u8,
    /// I²C data
    pub i2c_sda: u8,
    /// UART1 receive
    pub serial1_rx: u8,
    /// UART1 transmit
    pub serial1_tx: u8,
}

/// Bank of board pins addressed by index.
///
/// Implementations own the capability table and the underlying hardware.
/// The wiring layer range-checks every index before calling in, so `pin`
/// is always below [`PinBank::PIN_COUNT`] here.
pub trait PinBank {
    /// Number of pins in the bank; valid indices are `0..PIN_COUNT`.
    const PIN_COUNT: u8;
    /// First pin carrying a short-form analog alias (`A0` = `FIRST_ANALOG`).
    const FIRST_ANALOG: u8;
    /// Bus-role pin assignments used for arbitration.
    const PINOUT: BusPinout;

    /// Capability table entry for `pin`.
    fn pin_info(&self, pin: u8) -> PinInfo;

    /// Apply `mode` to `pin` electrically and record it in the table.
    fn set_mode(&mut self, pin: u8, mode: PinMode);

    /// Drive `pin` to `level`.
    fn write(&mut self, pin: u8, level: Level);

    /// Sample the current level of `pin`.
    fn read(&mut self, pin: u8) -> Level;
}
