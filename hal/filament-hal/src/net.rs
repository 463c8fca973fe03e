//! Network link capability
//!
//! The wiring layer's blocking delay is the only place background
//! connectivity work gets CPU time, so the link is injected into the layer
//! as a capability at construction rather than wired in as a compile-time
//! flag. [`Offline`] is the default wiring for boards (or builds) without
//! a link.

/// Background network link serviced from inside blocking delays.
pub trait NetworkService {
    /// Link is initialized and not sleeping, i.e. wants periodic service.
    fn is_active(&self) -> bool;

    /// A firmware update is being streamed.
    ///
    /// While this holds, the delay loop runs [`NetworkService::service`]
    /// back-to-back without re-entering its timing check.
    fn update_in_progress(&self) -> bool;

    /// Run one pass of the link's housekeeping.
    fn service(&mut self);
}

/// No-link wiring: never active, service is a no-op.
///
/// With this type plugged in, the delay loop folds down to a plain
/// watchdog-kicking busy-wait.
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Offline;

impl NetworkService for Offline {
    fn is_active(&self) -> bool {
        false
    }

    fn update_in_progress(&self) -> bool {
        false
    }

    fn service(&mut self) {}
}
