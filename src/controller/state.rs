//! System state and timed screens.

/// Top-level system state. Owned and mutated only by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemState {
    Initializing,
    Ready,
    Capturing,
    /// Only observable while a synchronous mount/unmount is running.
    StorageBusy,
    /// Transient: always followed by Ready once the fault screen expires.
    Faulted,
}

impl SystemState {
    /// States in which button presses are consumed. In every other state
    /// presses stay pending and are handled after the state clears.
    pub fn accepts_input(self) -> bool {
        matches!(self, SystemState::Ready | SystemState::Capturing)
    }
}

/// What happens when a timed screen expires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum Resume {
    /// Enter Ready and show the idle screen.
    Ready,
    /// Redraw the recording screen (capture keeps running meanwhile).
    Recording,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Hold {
    pub until_ms: u32,
    pub then: Resume,
}

/// `true` once `now_ms` is at or past `deadline_ms`, across clock wrap.
pub(crate) fn reached(now_ms: u32, deadline_ms: u32) -> bool {
    (now_ms.wrapping_sub(deadline_ms) as i32) >= 0
}
