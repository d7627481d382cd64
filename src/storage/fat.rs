//! Handle bookkeeping for a FAT volume behind a [`StorageDriver`].
//!
//! `mount` opens volume 0 and its root directory and keeps both handles;
//! `unmount` closes them. A handle is only forgotten once its close call
//! succeeded, so a failed unmount can be retried. The card is marked for
//! re-initialization after every unmount and every failed mount, so the
//! next mount talks to whatever card is in the slot by then.
//!
//! The filesystem calls live behind [`FatVolumes`]; the SD card backend is
//! in `sdcard.rs`.

use super::StorageDriver;

/// Raw-handle filesystem operations used by [`FatStorage`].
pub trait FatVolumes {
    type Error;
    type Volume: Copy;
    type Dir: Copy;

    fn open_volume(&mut self) -> Result<Self::Volume, Self::Error>;

    fn open_root(&mut self, volume: Self::Volume) -> Result<Self::Dir, Self::Error>;

    fn close_dir(&mut self, dir: Self::Dir) -> Result<(), Self::Error>;

    fn close_volume(&mut self, volume: Self::Volume) -> Result<(), Self::Error>;

    /// Open `name` in `dir`, write `bytes`, close. `append` selects
    /// create-or-append over create-or-truncate.
    fn write_file(
        &mut self,
        dir: Self::Dir,
        name: &str,
        bytes: &[u8],
        append: bool,
    ) -> Result<(), Self::Error>;

    /// Forget the card's init state; the next open re-runs card init.
    fn reset_card(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FatError<E> {
    /// No root directory handle is held.
    NotMounted,
    Device(E),
}

impl<E> From<E> for FatError<E> {
    fn from(e: E) -> Self {
        FatError::Device(e)
    }
}

pub struct FatStorage<V: FatVolumes> {
    volumes: V,
    volume: Option<V::Volume>,
    root: Option<V::Dir>,
}

impl<V: FatVolumes> FatStorage<V> {
    pub fn from_volumes(volumes: V) -> Self {
        Self {
            volumes,
            volume: None,
            root: None,
        }
    }

    pub fn volumes(&self) -> &V {
        &self.volumes
    }

    pub fn volumes_mut(&mut self) -> &mut V {
        &mut self.volumes
    }

    pub fn is_mounted(&self) -> bool {
        self.root.is_some()
    }

    fn write(
        &mut self,
        name: &str,
        bytes: &[u8],
        append: bool,
    ) -> Result<(), FatError<V::Error>> {
        let root = self.root.ok_or(FatError::NotMounted)?;
        Ok(self.volumes.write_file(root, name, bytes, append)?)
    }

    fn try_mount(&mut self) -> Result<(), V::Error> {
        let volume = self.volumes.open_volume()?;
        match self.volumes.open_root(volume) {
            Ok(root) => {
                self.volume = Some(volume);
                self.root = Some(root);
                Ok(())
            }
            Err(e) => {
                if self.volumes.close_volume(volume).is_err() {
                    warn!("fat: volume close after failed mount also failed");
                }
                Err(e)
            }
        }
    }
}

impl<V: FatVolumes> StorageDriver for FatStorage<V> {
    type Error = FatError<V::Error>;

    fn mount(&mut self) -> Result<(), Self::Error> {
        let result = self.try_mount();
        if result.is_err() {
            self.volumes.reset_card();
        }
        Ok(result?)
    }

    fn unmount(&mut self) -> Result<(), Self::Error> {
        if self.root.is_none() && self.volume.is_none() {
            return Err(FatError::NotMounted);
        }
        if let Some(root) = self.root {
            self.volumes.close_dir(root)?;
            self.root = None;
        }
        if let Some(volume) = self.volume {
            self.volumes.close_volume(volume)?;
            self.volume = None;
        }
        self.volumes.reset_card();
        Ok(())
    }

    fn create_truncate_write(&mut self, name: &str, bytes: &[u8]) -> Result<(), Self::Error> {
        self.write(name, bytes, false)
    }

    fn open_append_write(&mut self, name: &str, bytes: &[u8]) -> Result<(), Self::Error> {
        self.write(name, bytes, true)
    }
}
