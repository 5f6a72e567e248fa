//! # Tick gate
//!
//! The executable cycles at a fixed rate, but trajectory control may be configured to advance
//! less often than that, for example only once every 150 ms of wall time. The [`TickGate`]
//! decides on each cycle whether a controller tick is due.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Limits how often the controller is ticked.
#[derive(Debug, Clone, Default)]
pub struct TickGate {
    /// Minimum wall time between ticks, or `None` to tick on every cycle.
    min_period: Option<Duration>,

    /// When the last tick was let through
    last_tick: Option<Instant>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TickGate {
    pub fn new(min_period: Option<Duration>) -> Self {
        Self {
            min_period,
            last_tick: None
        }
    }

    /// Returns true if a tick is due at `now`, in which case `now` is recorded as the last tick.
    ///
    /// The first call is always due.
    pub fn is_due(&mut self, now: Instant) -> bool {
        let due = match (self.min_period, self.last_tick) {
            (None, _) | (_, None) => true,
            (Some(period), Some(last)) => now.saturating_duration_since(last) >= period
        };

        if due {
            self.last_tick = Some(now);
        }

        due
    }
}
