//! PWM abstractions

/// PWM generator outputs of the board.
///
/// Slots index the board's timer-channel table; which pins map to which
/// slot is fixed board data carried in the capability table. The carrier
/// frequency is board-fixed (500 Hz on Ember), only the duty moves.
pub trait PwmOut {
    /// Program `slot` with a duty cycle of `duty / 255`.
    ///
    /// 0 is constant low, 255 constant high.
    fn set_duty(&mut self, slot: u8, duty: u8);
}
