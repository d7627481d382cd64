//! Removable storage medium and capture-session files.
//!
//! [`StorageGateway`] wraps the block-level driver behind a single
//! "is the medium ready" status. [`session::SessionManager`] owns the
//! record file of the active capture and writes through the gateway.
//!
//! Neither layer changes system state or emits feedback: failures come
//! back as [`Error`] and the controller decides what they mean.

pub mod fat;
pub mod record;
pub mod session;

#[cfg(feature = "embedded")]
pub mod sdcard;

use crate::error::Error;

/// Storage collaborator contract.
///
/// Every write call is a full open-write-close cycle; no handle is held
/// between calls.
pub trait StorageDriver {
    type Error;

    fn mount(&mut self) -> Result<(), Self::Error>;

    fn unmount(&mut self) -> Result<(), Self::Error>;

    /// Create `name` (truncating an existing file) and write `bytes`.
    fn create_truncate_write(&mut self, name: &str, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Open `name` for append (creating it if missing) and write `bytes`.
    fn open_append_write(&mut self, name: &str, bytes: &[u8]) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MediumStatus {
    Unready,
    Ready,
}

pub struct StorageGateway<D> {
    driver: D,
    status: MediumStatus,
}

impl<D: StorageDriver> StorageGateway<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            status: MediumStatus::Unready,
        }
    }

    pub fn status(&self) -> MediumStatus {
        self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == MediumStatus::Ready
    }

    /// Bind the medium.
    ///
    /// Preconditions (checked by the caller, not here): the medium is
    /// `Unready` and no capture session is open. Mounting twice is not
    /// defined at this layer.
    pub fn mount(&mut self) -> Result<(), Error> {
        match self.driver.mount() {
            Ok(()) => {
                self.status = MediumStatus::Ready;
                info!("storage: mounted");
                Ok(())
            }
            Err(_) => {
                warn!("storage: mount failed");
                Err(Error::Mount)
            }
        }
    }

    /// Release the medium.
    ///
    /// Preconditions (checked by the caller, not here): the medium is
    /// `Ready` and no capture session is open. On failure the status stays
    /// `Ready`.
    pub fn unmount(&mut self) -> Result<(), Error> {
        match self.driver.unmount() {
            Ok(()) => {
                self.status = MediumStatus::Unready;
                info!("storage: unmounted");
                Ok(())
            }
            Err(_) => {
                warn!("storage: unmount failed");
                Err(Error::Unmount)
            }
        }
    }

    pub(crate) fn create_file(&mut self, name: &str, bytes: &[u8]) -> Result<(), D::Error> {
        self.driver.create_truncate_write(name, bytes)
    }

    pub(crate) fn append(&mut self, name: &str, bytes: &[u8]) -> Result<(), D::Error> {
        self.driver.open_append_write(name, bytes)
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Flaky {
        fail_mount: bool,
        fail_unmount: bool,
        calls: u32,
    }

    impl StorageDriver for Flaky {
        type Error = ();

        fn mount(&mut self) -> Result<(), ()> {
            self.calls += 1;
            if self.fail_mount {
                Err(())
            } else {
                Ok(())
            }
        }

        fn unmount(&mut self) -> Result<(), ()> {
            self.calls += 1;
            if self.fail_unmount {
                Err(())
            } else {
                Ok(())
            }
        }

        fn create_truncate_write(&mut self, _: &str, _: &[u8]) -> Result<(), ()> {
            Ok(())
        }

        fn open_append_write(&mut self, _: &str, _: &[u8]) -> Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn starts_unready() {
        let gw = StorageGateway::new(Flaky::default());
        assert_eq!(gw.status(), MediumStatus::Unready);
        assert!(!gw.is_ready());
    }

    #[test]
    fn mount_then_unmount() {
        let mut gw = StorageGateway::new(Flaky::default());
        gw.mount().unwrap();
        assert!(gw.is_ready());
        gw.unmount().unwrap();
        assert!(!gw.is_ready());
        assert_eq!(gw.driver().calls, 2);
    }

    #[test]
    fn failed_mount_stays_unready() {
        let mut gw = StorageGateway::new(Flaky {
            fail_mount: true,
            ..Default::default()
        });
        assert_eq!(gw.mount(), Err(Error::Mount));
        assert_eq!(gw.status(), MediumStatus::Unready);
    }

    #[test]
    fn failed_unmount_stays_ready() {
        let mut gw = StorageGateway::new(Flaky::default());
        gw.mount().unwrap();
        gw.driver_mut().fail_unmount = true;
        assert_eq!(gw.unmount(), Err(Error::Unmount));
        assert_eq!(gw.status(), MediumStatus::Ready);
    }

    #[test]
    fn no_retry_on_failure() {
        let mut gw = StorageGateway::new(Flaky {
            fail_mount: true,
            ..Default::default()
        });
        let _ = gw.mount();
        assert_eq!(gw.driver().calls, 1);
    }
}
