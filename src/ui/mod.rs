//! Operator interface - two buttons in, OLED + RGB LED + buzzer out.
//!
//! ## Components
//!
//! - **Input**: two active-low tactile switches, debounced with one shared
//!   200 ms window (A: start/stop capture, B: mount/unmount SD)
//! - **Display**: SSD1306 128×64 OLED via I²C
//! - **Indicator**: common-cathode RGB LED on three GPIOs
//! - **Buzzer**: passive piezo on a PWM channel
//!
//! The pure pieces (`input_logic`, `feedback`) build on the host; the
//! hardware adapters need the `embedded` feature.

pub mod feedback;
pub mod input_logic;

#[cfg(feature = "embedded")]
pub mod buttons;
#[cfg(feature = "embedded")]
pub mod buzzer;
#[cfg(feature = "embedded")]
pub mod display;
#[cfg(feature = "embedded")]
pub mod led;

/// Physical inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonSource {
    /// Button A: start or stop a capture session.
    StartStop,
    /// Button B: mount or unmount the storage medium.
    StorageToggle,
}

impl ButtonSource {
    pub(crate) const fn index(self) -> usize {
        match self {
            ButtonSource::StartStop => 0,
            ButtonSource::StorageToggle => 1,
        }
    }
}

/// A debounced press, stamped with the time it was accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub source: ButtonSource,
    pub at_ms: u32,
}
