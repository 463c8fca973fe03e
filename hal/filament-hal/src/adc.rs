//! ADC abstractions
//!
//! Conversions address board ADC channels, not pin numbers: the wiring
//! layer resolves a pin to its channel through the capability table before
//! calling in.

/// ADC sampling window, in ADC clock cycles.
///
/// The value set matches the STM32F1 converter the original board family
/// shipped with. Longer windows trade conversion rate for accuracy on
/// high-impedance sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcSampleTime {
    /// 1.5 cycles
    Cycles1_5,
    /// 7.5 cycles
    Cycles7_5,
    /// 13.5 cycles
    Cycles13_5,
    /// 28.5 cycles
    Cycles28_5,
    /// 41.5 cycles
    Cycles41_5,
    /// 55.5 cycles
    Cycles55_5,
    /// 71.5 cycles
    Cycles71_5,
    /// 239.5 cycles
    Cycles239_5,
}

/// ADC front-end of the board.
pub trait AdcReader {
    /// Run one conversion on `channel` and return the sample.
    ///
    /// The converter is 12-bit: results occupy `0..=4095`. The API is
    /// documented as 16-bit-capable, so callers must not assume full-scale
    /// 65535 either.
    fn sample(&mut self, channel: u8) -> u16;

    /// Select the sampling window used by subsequent conversions.
    fn set_sample_time(&mut self, time: AdcSampleTime);
}
