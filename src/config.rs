//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and record format
//! constants live here so they can be tuned in one place.

// Input

/// Minimum spacing between two accepted button edges (ms).
///
/// The window is shared by both buttons: an edge on either input restarts it.
pub const BUTTON_DEBOUNCE_MS: u32 = 200;

// Sampling

/// Sample period (ms). 50 ms = 20 Hz.
pub const SAMPLE_PERIOD_MS: u32 = 50;

/// Pause at the end of every main-loop iteration (ms).
pub const LOOP_IDLE_MS: u64 = 10;

/// Re-render the recording screen every N accepted samples.
pub const PROGRESS_RENDER_EVERY: u32 = 10;

/// Flash the busy color every N accepted samples.
pub const ACTIVITY_PULSE_EVERY: u32 = 50;

/// How long the activity flash stays on (ms).
pub const ACTIVITY_PULSE_MS: u32 = 10;

// Feedback timing

/// How long a fault stays on screen before returning to Ready (ms).
pub const FAULT_DISPLAY_MS: u32 = 2000;

/// How long a mount/unmount confirmation or a refusal notice stays up (ms).
pub const NOTICE_DISPLAY_MS: u32 = 2000;

/// How long the end-of-capture summary stays up (ms).
pub const SUMMARY_DISPLAY_MS: u32 = 3000;

/// How long the "starting" screen stays up before the recording screen (ms).
pub const START_NOTICE_MS: u32 = 500;

/// Pause after sensor bring-up before entering Ready (ms).
pub const INIT_SETTLE_MS: u32 = 1000;

// Sensor (MPU-6050, default full-scale ranges)

/// 7-bit I²C address of the MPU-6050 (AD0 low).
pub const MPU6050_ADDR: u8 = 0x68;

/// Accelerometer sensitivity at ±2 g.
pub const ACCEL_LSB_PER_G: f32 = 16384.0;

/// Gyroscope sensitivity at ±250 °/s.
pub const GYRO_LSB_PER_DPS: f32 = 131.0;

// Record files
//
// Names must stay within FAT 8.3: `REC001.CSV` and `M_REC001.CSV`.

/// Prefix of the per-session CSV file.
pub const RECORD_FILE_PREFIX: &str = "REC";

/// Extension of the per-session CSV file.
pub const RECORD_FILE_SUFFIX: &str = ".CSV";

/// Prefix prepended to the record file name to form the metadata file name.
pub const METADATA_FILE_PREFIX: &str = "M_";

/// Index of the first record file after power-up.
pub const FIRST_FILE_INDEX: u32 = 1;

/// Highest index that still fits `M_REC###.CSV` in 8 characters.
/// Further captures are refused until power-cycle.
pub const LAST_FILE_INDEX: u32 = 999;

// Buzzer

/// Tone used for success and completion cues (Hz).
pub const BUZZER_OK_HZ: u32 = 1000;

/// Tone used for error cues (Hz).
pub const BUZZER_ERROR_HZ: u32 = 500;

/// Single-pulse cue length (ms).
pub const BUZZER_SINGLE_MS: u32 = 300;

/// Length of each pulse of the double cue (ms).
pub const BUZZER_DOUBLE_MS: u32 = 200;

/// Gap between the two pulses of the double cue (ms).
pub const BUZZER_DOUBLE_GAP_MS: u32 = 100;

/// Error cue length (ms).
pub const BUZZER_ERROR_MS: u32 = 500;

/// Maximum number of cues queued for the buzzer task.
pub const BUZZER_QUEUE_DEPTH: usize = 4;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button A (start/stop)    → P0.11
//   Button B (SD toggle)     → P0.12
//   MPU-6050 SDA / SCL       → P0.26 / P0.27   (TWIM0, 400 kHz)
//   SSD1306  SDA / SCL       → P0.30 / P0.31   (TWIM1, 400 kHz)
//   SD card SCK/MOSI/MISO/CS → P1.15 / P1.13 / P1.14 / P1.12   (SPIM3)
//   RGB LED red/green/blue   → P0.13 / P0.14 / P0.15
//   Buzzer                   → P0.16   (PWM0)

/// SSD1306 I²C address.
pub const DISPLAY_ADDR: u8 = 0x3C;
