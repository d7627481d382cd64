//! Debounced button input shared between the edge interrupt and the main loop.
//!
//! The interrupt side calls [`DebouncedInput::on_raw_edge`]; it only
//! touches atomics and never blocks. The main loop drains one sticky
//! flag per source with [`DebouncedInput::take`]. Presses inside the
//! debounce window are dropped, not queued.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::{ButtonEvent, ButtonSource};

pub struct DebouncedInput {
    window_ms: u32,
    /// Time of the last accepted edge on either source.
    last_accepted_ms: AtomicU32,
    pending: [AtomicBool; 2],
    accepted_at: [AtomicU32; 2],
}

impl DebouncedInput {
    /// The clock starts at zero, so edges in the first `window_ms` after
    /// boot are rejected.
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_accepted_ms: AtomicU32::new(0),
            pending: [AtomicBool::new(false), AtomicBool::new(false)],
            accepted_at: [AtomicU32::new(0), AtomicU32::new(0)],
        }
    }

    /// Register a raw falling edge. Interrupt-safe.
    ///
    /// Returns the event if the edge was accepted. An accepted edge sets the
    /// source's pending flag; a flag that is already set stays set.
    pub fn on_raw_edge(&self, source: ButtonSource, now_ms: u32) -> Option<ButtonEvent> {
        let last = self.last_accepted_ms.load(Ordering::Acquire);
        if now_ms.wrapping_sub(last) < self.window_ms {
            return None;
        }
        self.last_accepted_ms.store(now_ms, Ordering::Release);

        let i = source.index();
        self.accepted_at[i].store(now_ms, Ordering::Relaxed);
        self.pending[i].store(true, Ordering::Release);

        Some(ButtonEvent {
            source,
            at_ms: now_ms,
        })
    }

    /// Clear and return the pending flag of `source`.
    pub fn take_pending(&self, source: ButtonSource) -> bool {
        self.pending[source.index()].swap(false, Ordering::AcqRel)
    }

    /// Consume the pending event of `source`, if any.
    pub fn take(&self, source: ButtonSource) -> Option<ButtonEvent> {
        if !self.take_pending(source) {
            return None;
        }
        let at_ms = self.accepted_at[source.index()].load(Ordering::Relaxed);
        Some(ButtonEvent { source, at_ms })
    }

    /// Peek without consuming.
    pub fn is_pending(&self, source: ButtonSource) -> bool {
        self.pending[source.index()].load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BUTTON_DEBOUNCE_MS;

    const A: ButtonSource = ButtonSource::StartStop;
    const B: ButtonSource = ButtonSource::StorageToggle;

    fn input() -> DebouncedInput {
        DebouncedInput::new(BUTTON_DEBOUNCE_MS)
    }

    #[test]
    fn presses_150ms_apart_collapse_to_one() {
        let input = input();
        assert!(input.on_raw_edge(A, 1_000).is_some());
        assert!(input.on_raw_edge(A, 1_150).is_none());
        assert_eq!(input.take(A), Some(ButtonEvent { source: A, at_ms: 1_000 }));
        assert_eq!(input.take(A), None);
    }

    #[test]
    fn presses_250ms_apart_are_distinct() {
        let input = input();
        assert!(input.on_raw_edge(A, 1_000).is_some());
        assert!(input.take_pending(A));
        assert!(input.on_raw_edge(A, 1_250).is_some());
        assert_eq!(input.take(A).map(|e| e.at_ms), Some(1_250));
    }

    #[test]
    fn presses_100ms_apart_yield_one_event() {
        let input = input();
        input.on_raw_edge(A, 5_000);
        input.on_raw_edge(A, 5_100);
        assert!(input.take_pending(A));
        assert!(!input.take_pending(A));
    }

    #[test]
    fn window_is_shared_across_sources() {
        let input = input();
        assert!(input.on_raw_edge(A, 1_000).is_some());
        // B inside A's window is dropped.
        assert!(input.on_raw_edge(B, 1_100).is_none());
        assert!(!input.is_pending(B));
        // Exactly one window later is accepted.
        assert!(input.on_raw_edge(B, 1_200).is_some());
        assert!(input.take_pending(A));
        assert!(input.take_pending(B));
    }

    #[test]
    fn rejected_edges_do_not_extend_the_window() {
        let input = input();
        input.on_raw_edge(A, 1_000);
        input.on_raw_edge(A, 1_150);
        // Measured from the accepted edge at 1000, not the dropped one at 1150.
        assert!(input.on_raw_edge(A, 1_200).is_some());
    }

    #[test]
    fn flags_are_sticky_until_taken() {
        let input = input();
        input.on_raw_edge(A, 1_000);
        input.on_raw_edge(A, 1_300);
        // Two accepted presses before the loop ran still leave one flag.
        assert!(input.take_pending(A));
        assert!(!input.take_pending(A));
    }

    #[test]
    fn edges_right_after_boot_are_rejected() {
        let input = input();
        assert!(input.on_raw_edge(A, 50).is_none());
        assert!(input.on_raw_edge(A, 200).is_some());
    }

    #[test]
    fn window_survives_clock_wrap() {
        let input = input();
        assert!(input.on_raw_edge(A, u32::MAX - 50).is_some());
        assert!(input.on_raw_edge(B, 100).is_none());
        assert!(input.on_raw_edge(B, 150).is_some());
    }

    #[test]
    fn accepted_edges_count_matches_spacing_rule() {
        let input = input();
        let edges = [1_000, 1_050, 1_199, 1_200, 1_390, 1_400, 1_401, 1_650];
        let accepted = edges
            .iter()
            .filter(|&&t| input.on_raw_edge(A, t).is_some())
            .count();
        // 1000, 1200, 1400, 1650
        assert_eq!(accepted, 4);
    }
}
