//! Unified error type for imu-logger.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Collaborator errors are folded into these variants at the storage and
//! session layers; only the controller decides what an error means for
//! the system state.

/// Top-level error type used across the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Storage medium
    /// A capture was requested while the medium is not mounted.
    StorageNotReady,

    /// The storage driver failed to bind the medium.
    Mount,

    /// The storage driver failed to release the medium.
    Unmount,

    // Capture session
    /// The record file could not be created or its header written.
    CreateRecordFile,

    /// The companion metadata file could not be created.
    CreateMetadataFile,

    /// Appending a record row failed.
    WriteRecord,

    /// A sample was recorded with no session open.
    NoActiveSession,

    /// Every record file index of this run is used.
    FileIndexExhausted,

    // Sensor
    /// The motion sensor did not answer.
    Sensor,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::BufferOverflow
    }
}
