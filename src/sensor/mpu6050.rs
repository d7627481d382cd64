//! MPU-6050 over I²C, default full-scale ranges (±2 g, ±250 °/s).

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::{MotionSensor, RawSample};

const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_ACCEL_XOUT_H: u8 = 0x3B;
const REG_GYRO_XOUT_H: u8 = 0x43;

const PWR_DEVICE_RESET: u8 = 0x80;
const PWR_WAKE: u8 = 0x00;

const RESET_SETTLE_MS: u32 = 100;
const WAKE_SETTLE_MS: u32 = 10;

pub struct Mpu6050<I2C, D> {
    i2c: I2C,
    delay: D,
    addr: u8,
}

impl<I2C, D> Mpu6050<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D, addr: u8) -> Self {
        Self { i2c, delay, addr }
    }

    /// Give the bus back.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Read three consecutive big-endian axis registers.
    fn read_axes(&mut self, first_reg: u8) -> Result<[i16; 3], I2C::Error> {
        let mut buf = [0u8; 6];
        self.i2c.write_read(self.addr, &[first_reg], &mut buf)?;
        Ok([
            i16::from_be_bytes([buf[0], buf[1]]),
            i16::from_be_bytes([buf[2], buf[3]]),
            i16::from_be_bytes([buf[4], buf[5]]),
        ])
    }
}

impl<I2C, D> MotionSensor for Mpu6050<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.i2c
            .write(self.addr, &[REG_PWR_MGMT_1, PWR_DEVICE_RESET])?;
        self.delay.delay_ms(RESET_SETTLE_MS);
        self.i2c.write(self.addr, &[REG_PWR_MGMT_1, PWR_WAKE])?;
        self.delay.delay_ms(WAKE_SETTLE_MS);
        Ok(())
    }

    fn read_raw(&mut self) -> Result<RawSample, Self::Error> {
        let accel = self.read_axes(REG_ACCEL_XOUT_H)?;
        let gyro = self.read_axes(REG_GYRO_XOUT_H)?;
        Ok(RawSample { accel, gyro })
    }
}
