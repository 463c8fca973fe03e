//! Filament Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the Filament wiring layer is
//! written against. Board crates (STM32F1 today, others later) implement
//! them; the layer itself never touches a register.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Sketch / firmware (filament-firmware)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  filament-core (Wiring<H, N>)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  filament-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ filament-hal- │       │   MockHal     │
//! │   stm32f1     │       │ (host tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`pin::PinBank`] - pin capability table, mode control, digital I/O
//! - [`adc::AdcReader`] - ADC conversions and sample-time selection
//! - [`pwm::PwmOut`] - PWM duty output on board timer slots
//! - [`time::Clock`] - millisecond/microsecond tick counters and busy-wait
//! - [`watchdog::Watchdog`] - hardware watchdog acknowledgement
//! - [`bus::BusStatus`] - enable state of the SPI/I²C/UART1 peripherals
//! - [`net::NetworkService`] - background link serviced from blocking delays
//!
//! Every method is infallible: validation happens above this seam (the
//! wiring layer silently rejects bad arguments) and hardware faults below
//! it are the board crate's own concern.

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod bus;
pub mod net;
pub mod pin;
pub mod pwm;
pub mod time;
pub mod watchdog;

#[cfg(feature = "mock")]
pub mod mock;

// Re-export key types at crate root for convenience
pub use adc::{AdcReader, AdcSampleTime};
pub use bus::BusStatus;
pub use net::{NetworkService, Offline};
pub use pin::{BusPinout, Level, PinBank, PinInfo, PinMode};
pub use pwm::PwmOut;
pub use time::Clock;
pub use watchdog::Watchdog;

/// Everything a board must provide for the wiring layer to run on it.
///
/// Blanket-implemented for any type covering the individual concerns, so
/// board crates implement the small traits and get this one for free.
pub trait Hal: PinBank + AdcReader + PwmOut + Clock + Watchdog + BusStatus {}

impl<T: PinBank + AdcReader + PwmOut + Clock + Watchdog + BusStatus> Hal for T {}
