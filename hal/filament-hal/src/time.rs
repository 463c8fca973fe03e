//! Time base abstractions

/// Free-running time base of the board.
///
/// Both counters are 32-bit and wrap: roughly every 49 days for the
/// millisecond counter and every 71 minutes for the microsecond one.
/// Callers must treat differences between readings as meaningful, never
/// absolute values.
pub trait Clock {
    /// Milliseconds since power-up, wrapping.
    fn millis(&mut self) -> u32;

    /// Microseconds since power-up, wrapping.
    fn micros(&mut self) -> u32;

    /// Busy-wait for `us` microseconds.
    fn delay_us(&mut self, us: u32);
}
