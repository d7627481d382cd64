//! Motion-sensor data logger for nRF52840.
//!
//! The acquisition logic (state machine, debouncing, sample scheduling,
//! session files, record format) is hardware independent and tested on
//! the host:
//!
//! Usage: `cargo test --lib` / `cargo test`
//!
//! Hardware adapters (OLED, RGB LED, buzzer, SD card, button interrupts)
//! and the firmware entry point in main.rs are built with
//! `--features embedded`.

#![cfg_attr(not(test), no_std)]

// Must come first: logging macros used by every module below.
#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod error;
pub mod sampler;
pub mod sensor;
pub mod storage;
pub mod ui;

pub use controller::{Controller, SystemState};
pub use error::Error;
pub use sampler::SampleScheduler;
pub use sensor::{MotionSensor, RawSample};
pub use storage::session::{CaptureSession, SessionManager};
pub use storage::{MediumStatus, StorageDriver, StorageGateway};
pub use ui::feedback::{Cue, FeedbackSink, LedColor, StatusScreen};
pub use ui::input_logic::DebouncedInput;
pub use ui::{ButtonEvent, ButtonSource};
