//! Integer range scaling

/// Scale `value` from one integer range onto another.
///
/// Pure integer arithmetic: the result truncates toward zero and is NOT
/// clamped, so a `value` outside the source range lands proportionally
/// outside the target range. Either range may run downhill. A degenerate
/// source range (`from_end == from_start`) divides by zero.
///
/// The classic use is squeezing the 12-bit ADC onto an 8-bit duty cycle:
/// `map(reading, 0, 4095, 0, 255)`.
pub fn map(value: i32, from_start: i32, from_end: i32, to_start: i32, to_end: i32) -> i32 {
    (value - from_start) * (to_end - to_start) / (from_end - from_start) + to_start
}
