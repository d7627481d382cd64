//! Motion sensor collaborator.
//!
//! The controller only needs "read one full accel + gyro sample". The
//! MPU-6050 driver is the one implementation shipped with the firmware.

pub mod mpu6050;

/// One raw reading, in sensor LSBs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub accel: [i16; 3],
    pub gyro: [i16; 3],
}

pub trait MotionSensor {
    type Error;

    /// Bring the device out of reset. Called once at boot.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Synchronous read of all six axes; no internal retry.
    fn read_raw(&mut self) -> Result<RawSample, Self::Error>;
}
