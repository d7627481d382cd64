//! Capture session lifecycle: file naming, header/metadata creation and
//! per-sample append.
//!
//! File identities come from an in-memory counter that starts at
//! [`FIRST_FILE_INDEX`] on every power-up, so names are unique within one
//! run only. Files from a previous run with the same name are overwritten.
//! Once [`LAST_FILE_INDEX`] is used, further sessions are refused.

use core::fmt::Write;

use heapless::String;

use super::record::{Record, CSV_HEADER, METADATA_TEXT};
use super::{StorageDriver, StorageGateway};
use crate::config::{
    FIRST_FILE_INDEX, LAST_FILE_INDEX, METADATA_FILE_PREFIX, RECORD_FILE_PREFIX,
    RECORD_FILE_SUFFIX,
};
use crate::error::Error;
use crate::sensor::RawSample;

/// `M_REC999.CSV` plus slack.
pub const MAX_FILE_NAME: usize = 16;

pub type FileName = String<MAX_FILE_NAME>;

/// `REC001.CSV` … `REC999.CSV`.
pub fn record_file_name(index: u32) -> Result<FileName, Error> {
    if index > LAST_FILE_INDEX {
        return Err(Error::FileIndexExhausted);
    }
    let mut name = FileName::new();
    write!(name, "{}{:03}{}", RECORD_FILE_PREFIX, index, RECORD_FILE_SUFFIX)?;
    Ok(name)
}

/// `M_` + record file name.
pub fn metadata_file_name(record: &str) -> Result<FileName, Error> {
    let mut name = FileName::new();
    name.push_str(METADATA_FILE_PREFIX)
        .map_err(|_| Error::BufferOverflow)?;
    name.push_str(record).map_err(|_| Error::BufferOverflow)?;
    Ok(name)
}

/// The open capture. Its file identity never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureSession {
    file: FileName,
    metadata: FileName,
    samples: u32,
    started_ms: u32,
}

impl CaptureSession {
    pub fn file_name(&self) -> &str {
        &self.file
    }

    pub fn metadata_name(&self) -> &str {
        &self.metadata
    }

    /// Records successfully written so far.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn started_ms(&self) -> u32 {
        self.started_ms
    }
}

pub struct SessionManager {
    next_index: u32,
    active: Option<CaptureSession>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub const fn new() -> Self {
        Self {
            next_index: FIRST_FILE_INDEX,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&CaptureSession> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Index the next `begin_session` will use.
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    fn allocate_name(&mut self) -> Result<FileName, Error> {
        let name = record_file_name(self.next_index)?;
        self.next_index += 1;
        Ok(name)
    }

    /// Open a new session: allocate the next file identity, create the
    /// record file with its header row, then the metadata file.
    ///
    /// The identity is consumed even if creation fails. A metadata failure
    /// leaves the already-written record file in place. With every index
    /// used, nothing is created and `FileIndexExhausted` is returned.
    pub fn begin_session<D: StorageDriver>(
        &mut self,
        storage: &mut StorageGateway<D>,
        now_ms: u32,
    ) -> Result<&CaptureSession, Error> {
        if !storage.is_ready() {
            return Err(Error::StorageNotReady);
        }
        // A stale session would otherwise keep its counter.
        self.active = None;

        let file = self.allocate_name().inspect_err(|_| {
            warn!("session: no record file index left");
        })?;
        let metadata = metadata_file_name(&file)?;

        if storage.create_file(&file, CSV_HEADER.as_bytes()).is_err() {
            warn!("session: cannot create {}", file.as_str());
            return Err(Error::CreateRecordFile);
        }
        if storage
            .create_file(&metadata, METADATA_TEXT.as_bytes())
            .is_err()
        {
            warn!("session: cannot create {}", metadata.as_str());
            return Err(Error::CreateMetadataFile);
        }

        info!("session: started {}", file.as_str());
        Ok(self.active.insert(CaptureSession {
            file,
            metadata,
            samples: 0,
            started_ms: now_ms,
        }))
    }

    /// Append one record with index `samples + 1`.
    ///
    /// Returns the new sample count. The counter only moves on success;
    /// the session stays open either way and the caller decides whether to
    /// end it.
    pub fn record_sample<D: StorageDriver>(
        &mut self,
        storage: &mut StorageGateway<D>,
        raw: &RawSample,
        now_ms: u32,
    ) -> Result<u32, Error> {
        let session = self.active.as_mut().ok_or(Error::NoActiveSession)?;

        let record = Record::new(session.samples + 1, *raw, now_ms);
        let row = record.to_csv()?;
        if storage.append(&session.file, row.as_bytes()).is_err() {
            warn!(
                "session: write failed at sample {}",
                record.index
            );
            return Err(Error::WriteRecord);
        }

        session.samples += 1;
        Ok(session.samples)
    }

    /// Forget the active session. Nothing is written to the medium.
    pub fn end_session(&mut self) -> Option<CaptureSession> {
        let session = self.active.take();
        if let Some(s) = &session {
            info!(
                "session: closed {} after {} samples",
                s.file.as_str(),
                s.samples
            );
        }
        session
    }
}
