//! CSV output format for captured sample windows
//!
//! One line per fused sample, six comma-separated fields with three
//! fractional digits, plus a blank line after each completed window so the
//! downstream classifier can split the stream into gestures.

use crate::error::Result;
use crate::sampler::FusedSample;
use std::io::Write;

/// Streaming CSV formatter over any byte sink
///
/// The emitter is stateless with respect to windows: the caller decides when
/// a window ends and calls [`CsvEmitter::end_window`].
pub struct CsvEmitter<W: Write> {
    out: W,
}

impl<W: Write> CsvEmitter<W> {
    /// Wrap a sink
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write the column header line, once at startup
    pub fn write_header(&mut self) -> Result<()> {
        writeln!(self.out, "aX,aY,aZ,gX,gY,gZ")?;
        Ok(())
    }

    /// Write one sample as a CSV row
    pub fn write_sample(&mut self, sample: &FusedSample) -> Result<()> {
        writeln!(
            self.out,
            "{:.3},{:.3},{:.3},{:.3},{:.3},{:.3}",
            sample.accel_x,
            sample.accel_y,
            sample.accel_z,
            sample.gyro_x,
            sample.gyro_y,
            sample.gyro_z,
        )?;
        Ok(())
    }

    /// Write the blank line that terminates a completed window
    pub fn end_window(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Unwrap the emitter, returning the sink
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(accel_x: f32) -> FusedSample {
        FusedSample {
            accel_x,
            accel_y: 0.25,
            accel_z: -1.0,
            gyro_x: 12.5,
            gyro_y: -0.125,
            gyro_z: 2000.0,
        }
    }

    fn emit_to_string<F>(f: F) -> String
    where
        F: FnOnce(&mut CsvEmitter<Vec<u8>>),
    {
        let mut emitter = CsvEmitter::new(Vec::new());
        f(&mut emitter);
        String::from_utf8(emitter.into_inner()).unwrap()
    }

    #[test]
    fn test_header_line() {
        let out = emit_to_string(|e| e.write_header().unwrap());
        assert_eq!(out, "aX,aY,aZ,gX,gY,gZ\n");
    }

    #[test]
    fn test_sample_has_three_fractional_digits() {
        let out = emit_to_string(|e| e.write_sample(&sample(1.0)).unwrap());
        assert_eq!(out, "1.000,0.250,-1.000,12.500,-0.125,2000.000\n");
    }

    #[test]
    fn test_sample_rounds_to_three_digits() {
        let s = FusedSample {
            accel_x: 0.12345,
            accel_y: -0.9996,
            accel_z: 0.0,
            gyro_x: 0.0,
            gyro_y: 0.0,
            gyro_z: 0.0,
        };
        let out = emit_to_string(|e| e.write_sample(&s).unwrap());
        assert_eq!(out, "0.123,-1.000,0.000,0.000,0.000,0.000\n");
    }

    #[test]
    fn test_window_is_delimited_by_blank_line() {
        let out = emit_to_string(|e| {
            e.write_header().unwrap();
            e.write_sample(&sample(1.0)).unwrap();
            e.write_sample(&sample(2.0)).unwrap();
            e.end_window().unwrap();
        });

        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines[0], "aX,aY,aZ,gX,gY,gZ");
        assert!(lines[1].starts_with("1.000,"));
        assert!(lines[2].starts_with("2.000,"));
        assert_eq!(lines[3], ""); // window delimiter
        assert_eq!(lines[4], ""); // trailing newline from split
    }

    #[test]
    fn test_consecutive_windows_stay_separated() {
        let out = emit_to_string(|e| {
            e.write_sample(&sample(1.0)).unwrap();
            e.end_window().unwrap();
            e.write_sample(&sample(2.0)).unwrap();
            e.end_window().unwrap();
        });

        assert_eq!(out.matches("\n\n").count(), 2);
    }
}
