//! CSV record format and the companion metadata text.
//!
//! One row per sample, CRLF line endings:
//!
//! ```text
//! Sample,Accel_X_LSB,Accel_Y_LSB,Accel_Z_LSB,Gyro_X_LSB,Gyro_Y_LSB,Gyro_Z_LSB,Accel_X_g,Accel_Y_g,Accel_Z_g,Gyro_X_dps,Gyro_Y_dps,Gyro_Z_dps,Timestamp_ms
//! 1,16384,0,-16384,131,0,-131,1.0000,0.0000,-1.0000,1.0000,0.0000,-1.0000,1250
//! ```

use core::fmt::Write;

use heapless::String;

use crate::config::{ACCEL_LSB_PER_G, GYRO_LSB_PER_DPS};
use crate::error::Error;
use crate::sensor::RawSample;

/// Header row written once when the record file is created.
pub const CSV_HEADER: &str = "Sample,Accel_X_LSB,Accel_Y_LSB,Accel_Z_LSB,\
Gyro_X_LSB,Gyro_Y_LSB,Gyro_Z_LSB,\
Accel_X_g,Accel_Y_g,Accel_Z_g,\
Gyro_X_dps,Gyro_Y_dps,Gyro_Z_dps,Timestamp_ms\r\n";

/// Written once per session next to the record file.
pub const METADATA_TEXT: &str = "# MPU-6050 dataset metadata\r\n\
# ===============================\r\n\
Sensor: MPU6050\r\n\
Sample_Rate: 20Hz (50ms)\r\n\
Accelerometer_Range: +/-2g\r\n\
Accelerometer_Sensitivity: 16384 LSB/g\r\n\
Gyroscope_Range: +/-250 deg/s\r\n\
Gyroscope_Sensitivity: 131 LSB/(deg/s)\r\n\
# ===============================\r\n\
# CSV columns:\r\n\
# Sample: 1-based sample index within the session\r\n\
# Accel_X/Y/Z_LSB: raw accelerometer values\r\n\
# Gyro_X/Y/Z_LSB: raw gyroscope values\r\n\
# Accel_X/Y/Z_g: acceleration in g\r\n\
# Gyro_X/Y/Z_dps: angular rate in degrees/second\r\n\
# Timestamp_ms: milliseconds since power-up\r\n\
# ===============================\r\n\
\r\n";

/// Worst case is about 140 bytes (all fields at their widest).
pub const MAX_ROW_LEN: usize = 192;

pub type RowBuf = String<MAX_ROW_LEN>;

/// Raw accelerometer LSBs to g.
pub fn accel_to_g(raw: i16) -> f32 {
    raw as f32 / ACCEL_LSB_PER_G
}

/// Raw gyroscope LSBs to degrees per second.
pub fn gyro_to_dps(raw: i16) -> f32 {
    raw as f32 / GYRO_LSB_PER_DPS
}

/// One sampled reading, as written to the record file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record {
    /// 1-based, session-scoped.
    pub index: u32,
    pub raw: RawSample,
    /// Milliseconds since power-up.
    pub timestamp_ms: u32,
}

impl Record {
    pub fn new(index: u32, raw: RawSample, timestamp_ms: u32) -> Self {
        Self {
            index,
            raw,
            timestamp_ms,
        }
    }

    pub fn accel_g(&self) -> [f32; 3] {
        self.raw.accel.map(accel_to_g)
    }

    pub fn gyro_dps(&self) -> [f32; 3] {
        self.raw.gyro.map(gyro_to_dps)
    }

    /// Append one CSV row (with CRLF) to `out`.
    pub fn write_csv<const N: usize>(&self, out: &mut String<N>) -> Result<(), Error> {
        let [ax, ay, az] = self.raw.accel;
        let [gx, gy, gz] = self.raw.gyro;
        let [axg, ayg, azg] = self.accel_g();
        let [gxd, gyd, gzd] = self.gyro_dps();
        write!(
            out,
            "{},{},{},{},{},{},{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{}\r\n",
            self.index, ax, ay, az, gx, gy, gz, axg, ayg, azg, gxd, gyd, gzd, self.timestamp_ms,
        )?;
        Ok(())
    }

    pub fn to_csv(&self) -> Result<RowBuf, Error> {
        let mut row = RowBuf::new();
        self.write_csv(&mut row)?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(accel: [i16; 3], gyro: [i16; 3]) -> RawSample {
        RawSample { accel, gyro }
    }

    #[test]
    fn one_g_and_one_dps() {
        assert!((accel_to_g(16384) - 1.0).abs() < 1e-4);
        assert!((gyro_to_dps(131) - 1.0).abs() < 1e-4);
        assert!((accel_to_g(-16384) + 1.0).abs() < 1e-4);
    }

    #[test]
    fn row_has_fourteen_fields_and_crlf() {
        let rec = Record::new(1, sample([16384, 0, -16384], [131, 0, -131]), 1250);
        let row = rec.to_csv().unwrap();
        assert_eq!(
            row.as_str(),
            "1,16384,0,-16384,131,0,-131,1.0000,0.0000,-1.0000,1.0000,0.0000,-1.0000,1250\r\n"
        );
        assert_eq!(row.trim_end().split(',').count(), 14);
    }

    #[test]
    fn derived_fields_use_four_decimals() {
        let rec = Record::new(7, sample([8192, 1, 0], [262, 65, 0]), 0);
        let row = rec.to_csv().unwrap();
        let fields: Vec<&str> = row.trim_end().split(',').collect();
        assert_eq!(fields[7], "0.5000");
        assert_eq!(fields[8], "0.0001");
        assert_eq!(fields[10], "2.0000");
        assert_eq!(fields[11], "0.4962");
    }

    #[test]
    fn widest_row_fits() {
        let rec = Record::new(
            u32::MAX,
            sample([i16::MIN; 3], [i16::MIN; 3]),
            u32::MAX,
        );
        let row = rec.to_csv().unwrap();
        assert!(row.len() < MAX_ROW_LEN);
        assert!(row.contains("-250.1374"));
    }

    #[test]
    fn small_buffer_reports_overflow() {
        let rec = Record::new(1, RawSample::default(), 0);
        let mut tiny: String<8> = String::new();
        assert_eq!(rec.write_csv(&mut tiny), Err(Error::BufferOverflow));
    }

    #[test]
    fn header_matches_row_shape() {
        assert!(CSV_HEADER.ends_with("\r\n"));
        assert_eq!(CSV_HEADER.trim_end().split(',').count(), 14);
        assert!(CSV_HEADER.starts_with("Sample,"));
    }

    #[test]
    fn metadata_describes_configuration() {
        assert!(METADATA_TEXT.contains("16384 LSB/g"));
        assert!(METADATA_TEXT.contains("131 LSB/(deg/s)"));
        assert!(METADATA_TEXT.contains("20Hz"));
        assert!(METADATA_TEXT.ends_with("\r\n"));
        assert!(!METADATA_TEXT.replace("\r\n", "").contains('\n'));
    }
}
