//! Dampening bounds for the difficulty averaging window.
//!
//! A retargeter measures how long the last `averaging_window` blocks
//! actually took and clamps that measurement into
//! `[min_actual_timespan, max_actual_timespan]` before computing the next
//! target. The bounds are computed in whole seconds, multiplying before
//! dividing by 100, so truncation matches reference difficulty outputs.

use std::time::Duration;

/// Bounds are whole seconds. A `target_block_time` with a fractional
/// second is truncated by `max_actual_timespan` and `min_actual_timespan`
/// but not by `averaging_window_timespan`;
/// `NetworkParameters::validate` rejects such block times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DampeningWindow {
    /// Blocks in the window
    pub averaging_window: u32,
    pub target_block_time: Duration,
    /// Maximum downward difficulty adjustment, as a percentage
    pub max_adjust_down_pct: u32,
    /// Maximum upward difficulty adjustment, as a percentage
    pub max_adjust_up_pct: u32,
}

impl DampeningWindow {
    /// Expected duration of the window if every block arrived on time.
    pub fn averaging_window_timespan(&self) -> Duration {
        self.target_block_time
            .saturating_mul(self.averaging_window)
    }

    /// Upper bound on the measured timespan, with the down-dampening
    /// factor applied.
    pub fn max_actual_timespan(&self) -> Duration {
        self.scaled(100 + u64::from(self.max_adjust_down_pct))
    }

    /// Lower bound on the measured timespan, with the up-dampening factor
    /// applied. An upward percentage above 100 bottoms out at zero.
    pub fn min_actual_timespan(&self) -> Duration {
        self.scaled(100u64.saturating_sub(u64::from(
            self.max_adjust_up_pct,
        )))
    }

    pub fn clamp_actual_timespan(&self, actual: Duration) -> Duration {
        let min = self.min_actual_timespan();
        let max = self.max_actual_timespan();

        // min > max only with a down percentage below -100, which u32
        // cannot express
        actual.max(min).min(max)
    }

    fn scaled(&self, percent: u64) -> Duration {
        let secs = self.averaging_window_timespan().as_secs();
        Duration::from_secs(secs.saturating_mul(percent) / 100)
    }
}
