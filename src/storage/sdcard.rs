//! SD card over SPI with a FAT filesystem (embedded-sdmmc).
//!
//! Files are opened, written and closed on every call, so a card pulled
//! right after unmount has no open file handles.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;
use embedded_sdmmc::{
    Mode, RawDirectory, RawVolume, SdCard, SdCardError, TimeSource, Timestamp, VolumeIdx,
    VolumeManager,
};

use super::fat::{FatStorage, FatVolumes};

pub type SdError = embedded_sdmmc::Error<SdCardError>;

pub type SdVolumes<SPI, DELAY> = VolumeManager<SdCard<SPI, DELAY>, FixedClock>;

/// SD card storage driver.
pub type SdCardStorage<SPI, DELAY> = FatStorage<SdVolumes<SPI, DELAY>>;

/// The logger has no RTC: every file gets the same timestamp.
#[derive(Clone, Copy, Default)]
pub struct FixedClock;

impl TimeSource for FixedClock {
    fn get_timestamp(&self) -> Timestamp {
        Timestamp {
            year_since_1970: 56, // 2026-01-01
            zero_indexed_month: 0,
            zero_indexed_day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

/// No bus traffic until the first `mount`.
pub fn sd_card_storage<SPI, DELAY>(spi: SPI, delay: DELAY) -> SdCardStorage<SPI, DELAY>
where
    SPI: SpiDevice<u8>,
    DELAY: DelayNs,
{
    FatStorage::from_volumes(VolumeManager::new(SdCard::new(spi, delay), FixedClock))
}

impl<SPI, DELAY> FatVolumes for SdVolumes<SPI, DELAY>
where
    SPI: SpiDevice<u8>,
    DELAY: DelayNs,
{
    type Error = SdError;
    type Volume = RawVolume;
    type Dir = RawDirectory;

    fn open_volume(&mut self) -> Result<RawVolume, SdError> {
        self.open_raw_volume(VolumeIdx(0))
    }

    fn open_root(&mut self, volume: RawVolume) -> Result<RawDirectory, SdError> {
        self.open_root_dir(volume)
    }

    fn close_dir(&mut self, dir: RawDirectory) -> Result<(), SdError> {
        VolumeManager::close_dir(self, dir)
    }

    fn close_volume(&mut self, volume: RawVolume) -> Result<(), SdError> {
        VolumeManager::close_volume(self, volume)
    }

    fn write_file(
        &mut self,
        dir: RawDirectory,
        name: &str,
        bytes: &[u8],
        append: bool,
    ) -> Result<(), SdError> {
        let mode = if append {
            Mode::ReadWriteCreateOrAppend
        } else {
            Mode::ReadWriteCreateOrTruncate
        };
        let file = self.open_file_in_dir(dir, name, mode)?;
        let written = self.write(file, bytes);
        // Close even after a failed write so the handle is not leaked.
        let closed = self.close_file(file);
        written.and(closed)
    }

    fn reset_card(&mut self) {
        self.device().mark_card_uninit();
    }
}
