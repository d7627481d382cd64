//! Fixed-rate sample scheduling against a monotonic millisecond clock.
//!
//! Cooperative: the main loop asks [`SampleScheduler::due`] once per
//! iteration. When a tick fires the reference moves to *now*, not to the
//! ideal deadline, so loop jitter accumulates as drift and a late
//! iteration never produces catch-up ticks.

pub struct SampleScheduler {
    period_ms: u32,
    last_tick_ms: u32,
}

impl SampleScheduler {
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_tick_ms: 0,
        }
    }

    /// Restart the period from `now_ms` (capture start).
    pub fn reset(&mut self, now_ms: u32) {
        self.last_tick_ms = now_ms;
    }

    /// `true` at most once per call when a full period has elapsed.
    pub fn due(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_tick_ms) < self.period_ms {
            return false;
        }
        self.last_tick_ms = now_ms;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SAMPLE_PERIOD_MS;

    #[test]
    fn fires_once_per_period() {
        let mut s = SampleScheduler::new(SAMPLE_PERIOD_MS);
        s.reset(1_000);
        assert!(!s.due(1_010));
        assert!(!s.due(1_049));
        assert!(s.due(1_050));
        assert!(!s.due(1_050));
        assert!(s.due(1_100));
    }

    #[test]
    fn late_iteration_drifts_instead_of_catching_up() {
        let mut s = SampleScheduler::new(SAMPLE_PERIOD_MS);
        s.reset(0);
        // 180 ms late: one tick, no burst for the three missed periods.
        assert!(s.due(180));
        assert!(!s.due(200));
        assert!(!s.due(229));
        assert!(s.due(230));
    }

    #[test]
    fn jitter_accumulates() {
        let mut s = SampleScheduler::new(SAMPLE_PERIOD_MS);
        s.reset(0);
        // Loop runs every 12 ms: ticks land at 60, 120, 180 (not 50, 100, 150).
        let ticks: Vec<u32> = (1..=16).map(|i| i * 12).filter(|&t| s.due(t)).collect();
        assert_eq!(ticks, vec![60, 120, 180]);
    }

    #[test]
    fn survives_clock_wrap() {
        let mut s = SampleScheduler::new(SAMPLE_PERIOD_MS);
        s.reset(u32::MAX - 20);
        assert!(!s.due(10));
        assert!(s.due(29));
    }
}
