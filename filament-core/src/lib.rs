//! Board-agnostic wiring layer for the Ember dev board family
//!
//! The classic Wiring/Arduino pin and timing API, written against the
//! `filament-hal` traits so the same sketch logic runs on any board crate
//! (or on the mock, for host tests):
//!
//! - Pin primitives with capability validation and bus arbitration
//! - Millisecond/microsecond time base
//! - Blocking delay that feeds the watchdog and services the network link
//! - Bit-banged shift in/out and integer range mapping
//!
//! Every entry point keeps the layer's silent-reject contract: invalid or
//! conflicting calls do nothing (writes) or return logical low (reads).
//! Nothing here returns an error and nothing panics.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod delay;
pub mod map;
pub mod shift;
pub mod wiring;

pub use delay::SERVICE_INTERVAL_MS;
pub use map::map;
pub use shift::BitOrder;
pub use wiring::Wiring;

// Re-export the HAL types sketches actually name
pub use filament_hal::{AdcSampleTime, Level, NetworkService, Offline, PinMode};

/// Drive level alias in the familiar casing.
pub const HIGH: Level = Level::High;
/// Drive level alias in the familiar casing.
pub const LOW: Level = Level::Low;
/// Pin mode alias in the familiar casing.
pub const INPUT: PinMode = PinMode::Input;
/// Pin mode alias in the familiar casing.
pub const OUTPUT: PinMode = PinMode::Output;
/// Pin mode alias in the familiar casing.
pub const INPUT_PULLUP: PinMode = PinMode::InputPullUp;
/// Pin mode alias in the familiar casing.
pub const INPUT_PULLDOWN: PinMode = PinMode::InputPullDown;
/// Bit order alias in the familiar casing.
pub const LSBFIRST: BitOrder = BitOrder::LsbFirst;
/// Bit order alias in the familiar casing.
pub const MSBFIRST: BitOrder = BitOrder::MsbFirst;
