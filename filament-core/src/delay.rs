//! Blocking delays that keep the system alive
//!
//! A sketch spends most of its life inside `delay()`, so the delay loop
//! doubles as the idle servicing point: every lap kicks the watchdog, and
//! once per service interval it hands the CPU to the network link. Short
//! delays that individually never reach the interval accumulate in a
//! backlog counter so a sketch built from many 1 ms sleeps still services
//! the link at the same cadence as one long sleep.

use filament_hal::{Hal, NetworkService};

use crate::Wiring;

/// Minimum spacing between network link service calls from inside
/// [`Wiring::delay`], in milliseconds.
pub const SERVICE_INTERVAL_MS: u32 = 5;

impl<H: Hal, N: NetworkService> Wiring<H, N> {
    /// Milliseconds since boot. Wraps after about 49 days.
    pub fn millis(&mut self) -> u32 {
        self.hal.millis()
    }

    /// Microseconds since boot. Wraps after about 71 minutes.
    pub fn micros(&mut self) -> u32 {
        self.hal.micros()
    }

    /// Busy-wait for `us` microseconds.
    ///
    /// A raw spin with no watchdog or network servicing; keep it short.
    pub fn delay_microseconds(&mut self, us: u32) {
        self.hal.delay_us(us);
    }

    /// Block for `ms` milliseconds, servicing the system while waiting.
    ///
    /// Each lap of the wait loop kicks the watchdog, and while the link is
    /// active it is serviced once per [`SERVICE_INTERVAL_MS`]. Requested
    /// durations too short to hit the interval are credited to a backlog
    /// that carries across calls, so a burst of short delays services the
    /// link as often as one long delay. While the link reports a firmware
    /// update in flight, servicing repeats back to back until the flag
    /// clears, extending the delay rather than starving the transfer.
    ///
    /// `delay(0)` still kicks the watchdog once and runs one service pass
    /// if enough backlog has built up.
    pub fn delay(&mut self, ms: u32) {
        self.backlog_ms = self.backlog_ms.wrapping_add(ms);
        let start = self.hal.millis();
        let mut next_service_at = SERVICE_INTERVAL_MS;

        loop {
            self.hal.feed();

            let now = self.hal.millis();
            let elapsed = elapsed_ticks(start, now);

            if self.link.is_active()
                && (elapsed >= next_service_at || self.backlog_ms >= SERVICE_INTERVAL_MS)
            {
                next_service_at = elapsed.wrapping_add(SERVICE_INTERVAL_MS);
                self.backlog_ms = 0;
                loop {
                    self.link.service();
                    if !self.link.update_in_progress() {
                        break;
                    }
                }
            }

            if elapsed >= ms {
                return;
            }
        }
    }
}

/// Milliseconds elapsed from `start` to `now` on a wrapping tick counter.
///
/// Inherited quirk, kept deliberately: when `now - start` goes negative as
/// an i32 the recovery is `start + now`, not the modular distance. The
/// result undershoots, so a delay spanning the 49-day rollover waits
/// longer than asked rather than returning early. Sketches in the field
/// time against this; do not "fix" it to `wrapping_sub` alone.
fn elapsed_ticks(start: u32, now: u32) -> u32 {
    let naive = now.wrapping_sub(start);
    if (naive as i32) < 0 {
        start.wrapping_add(now)
    } else {
        naive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filament_hal::mock::{MockHal, MockLink};
    use filament_hal::Offline;

    fn offline() -> Wiring<MockHal, Offline> {
        Wiring::offline(MockHal::new())
    }

    fn linked(active: bool) -> Wiring<MockHal, MockLink> {
        Wiring::new(MockHal::new(), MockLink::new(active))
    }

    #[test]
    fn test_delay_kicks_watchdog_every_lap() {
        let mut w = offline();
        w.delay(100);

        // tick step 1: one feed per elapsed millisecond; the lap that
        // observes elapsed == 100 is the hundredth
        assert_eq!(w.hal().feed_count(), 100);
    }

    #[test]
    fn test_delay_zero_kicks_once() {
        let mut w = offline();
        w.delay(0);

        assert_eq!(w.hal().feed_count(), 1);
    }

    #[test]
    fn test_delay_services_at_interval_cadence() {
        let mut w = linked(true);
        w.delay(25);

        // one service per interval across the 25 ms window
        assert_eq!(w.link().service_count(), 25 / SERVICE_INTERVAL_MS);
    }

    #[test]
    fn test_delay_inactive_link_never_serviced() {
        let mut w = linked(false);
        w.delay(50);

        assert_eq!(w.link().service_count(), 0);
        assert_eq!(w.hal().feed_count(), 50);
    }

    #[test]
    fn test_short_delays_accumulate_backlog() {
        let mut w = linked(true);
        w.delay(2);
        assert_eq!(w.link().service_count(), 0);
        w.delay(2);
        assert_eq!(w.link().service_count(), 0);

        // third call pushes the backlog past the interval
        w.delay(2);
        assert_eq!(w.link().service_count(), 1);
    }

    #[test]
    fn test_backlog_resets_after_service() {
        let mut w = linked(true);
        w.delay(2);
        w.delay(2);
        w.delay(2);
        assert_eq!(w.link().service_count(), 1);

        // counting starts over; two more short calls stay below it
        w.delay(2);
        w.delay(2);
        assert_eq!(w.link().service_count(), 1);
        w.delay(2);
        assert_eq!(w.link().service_count(), 2);
    }

    #[test]
    fn test_delay_zero_flushes_pending_backlog() {
        let mut w = linked(false);
        w.delay(8);
        assert_eq!(w.link().service_count(), 0);

        // link comes up with backlog already past the interval
        w.link_mut().set_active(true);
        w.delay(0);
        assert_eq!(w.link().service_count(), 1);
    }

    #[test]
    fn test_update_in_progress_extends_servicing() {
        let mut w = linked(true);
        w.link_mut().begin_update(3);
        w.delay(10);

        // three back-to-back passes while the flag holds, then the
        // ordinary cadence picks up again
        assert_eq!(w.link().service_count(), 4);
    }

    #[test]
    fn test_delay_survives_tick_rollover() {
        let mut w = offline();
        w.hal_mut().set_millis(0x9000_0000);
        w.hal_mut().set_tick_step(0xE000_0000);
        w.delay(1000);

        // first lap lands past the rollover: the recovery arithmetic
        // yields 0 elapsed, so the loop goes around once more
        assert_eq!(w.hal().feed_count(), 2);
    }

    #[test]
    fn test_elapsed_ticks_monotonic_case() {
        assert_eq!(elapsed_ticks(100, 100), 0);
        assert_eq!(elapsed_ticks(100, 1_100), 1_000);
    }

    #[test]
    fn test_elapsed_ticks_rollover_undershoots() {
        // small crossings stay on the subtraction path and measure true
        assert_eq!(elapsed_ticks(0xFFFF_FFF0, 0x0000_0010), 0x20);
        // wide ones trip the sign check and recover as start + now,
        // not the modular distance (which here would be 0xE000_0000)
        assert_eq!(elapsed_ticks(0x9000_0000, 0x7000_0000), 0);
    }

    #[test]
    fn test_millis_micros_passthrough() {
        let mut w = offline();
        w.hal_mut().set_millis(1234);
        assert_eq!(w.millis(), 1234);

        w.hal_mut().set_micros(567_890);
        assert_eq!(w.micros(), 567_890);
    }

    #[test]
    fn test_delay_microseconds_advances_clock() {
        let mut w = offline();
        w.hal_mut().set_micros(1_000);
        w.delay_microseconds(250);
        assert_eq!(w.micros(), 1_250);
    }
}
