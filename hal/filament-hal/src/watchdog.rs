//! Watchdog abstractions

/// Hardware watchdog acknowledgement.
///
/// The wiring layer's blocking delay feeds the watchdog on every loop
/// iteration so long waits in user sketches cannot reset the board.
pub trait Watchdog {
    /// Reset the watchdog countdown.
    fn feed(&mut self);
}
