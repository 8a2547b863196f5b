//! LSM6DS3TR-C sensor driver using FTDI MPSSE I2C interface
//!
//! Configures the sensor for motion capture (accelerometer ±8g, gyroscope
//! ±2000°/s, both at 1.66kHz) and exposes data-ready polling plus scaled
//! reads in physical units.

use crate::error::{Lsm6dsError, Result};
use crate::ffi::*;
use std::ptr;

// LSM6DS3TR-C I2C address (SDO/SA0 low)
const LSM6DS_ADDRESS: u8 = 0x6A;

// LSM6DS3TR-C register addresses
const REG_WHO_AM_I: u8 = 0x0F;
const REG_CTRL1_XL: u8 = 0x10;    // Accelerometer control
const REG_CTRL2_G: u8 = 0x11;     // Gyroscope control
const REG_CTRL3_C: u8 = 0x12;     // Common control
const REG_STATUS: u8 = 0x1E;      // Data-ready flags
const REG_OUTX_L_G: u8 = 0x22;    // Gyroscope output, X low byte first
const REG_OUTX_L_XL: u8 = 0x28;   // Accelerometer output, X low byte first

// CTRL1_XL: ODR 1.66kHz (0b1000 << 4), full scale ±8g (0b11 << 2)
const CTRL1_XL_ODR_1_66KHZ: u8 = 0x80;
const CTRL1_XL_FS_8G: u8 = 0x0C;

// CTRL2_G: ODR 1.66kHz (0b1000 << 4), full scale ±2000°/s (0b11 << 2)
const CTRL2_G_ODR_1_66KHZ: u8 = 0x80;
const CTRL2_G_FS_2000DPS: u8 = 0x0C;

// CTRL3_C bits
const CTRL3_C_BDU: u8 = 0x40;      // Block data update
const CTRL3_C_IF_INC: u8 = 0x04;   // Auto-increment register address
const CTRL3_C_SW_RESET: u8 = 0x01;

// STATUS_REG bits
const STATUS_XLDA: u8 = 0x01;      // New accelerometer data
const STATUS_GDA: u8 = 0x02;       // New gyroscope data

// Expected WHO_AM_I value for the LSM6DS3TR-C
const WHO_AM_I_VALUE: u8 = 0x6A;

// Output sensitivity at the configured full-scale ranges
const ACCEL_SENSITIVITY_G: f32 = 0.000244;  // g/LSB at ±8g
const GYRO_SENSITIVITY_DPS: f32 = 0.070;    // °/s per LSB at ±2000°/s

// Indicator LED on FT232H ACBUS pin 0, driven through FT_WriteGPIO
const INDICATOR_PIN_MASK: u8 = 0x01;

/// Data-ready flags read from STATUS_REG in a single transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataReady {
    /// New accelerometer data since the last read
    pub accel: bool,
    /// New gyroscope data since the last read
    pub gyro: bool,
}

/// LSM6DS3TR-C sensor interface
pub struct Lsm6ds {
    handle: FT_HANDLE,
    address: u8,
}

/// Parse a 6-byte little-endian output frame into (x, y, z) raw counts
fn parse_axes(frame: &[u8]) -> (i16, i16, i16) {
    let x = i16::from_le_bytes([frame[0], frame[1]]);
    let y = i16::from_le_bytes([frame[2], frame[3]]);
    let z = i16::from_le_bytes([frame[4], frame[5]]);
    (x, y, z)
}

/// Convert a raw accelerometer count to g at the ±8g range
fn accel_raw_to_g(raw: i16) -> f32 {
    raw as f32 * ACCEL_SENSITIVITY_G
}

/// Convert a raw gyroscope count to °/s at the ±2000°/s range
fn gyro_raw_to_dps(raw: i16) -> f32 {
    raw as f32 * GYRO_SENSITIVITY_DPS
}

impl Lsm6ds {
    /// Create a new LSM6DS3TR-C instance and initialize the sensor
    ///
    /// # Arguments
    /// * `channel_index` - Index of the I2C channel to use (usually 0)
    ///
    /// # Returns
    /// * `Ok(Lsm6ds)` - Initialized sensor
    /// * `Err(Lsm6dsError)` - If initialization fails
    pub fn new(channel_index: u32) -> Result<Self> {
        // Check number of available channels
        let mut num_channels: DWORD = 0;
        let status = unsafe { I2C_GetNumChannels(&mut num_channels) };
        if status != FT_OK {
            return Err(status.into());
        }

        if num_channels == 0 {
            return Err(Lsm6dsError::NoChannelsFound);
        }

        if channel_index >= num_channels {
            return Err(Lsm6dsError::InvalidChannel(channel_index));
        }

        // Open the channel
        let mut handle: FT_HANDLE = ptr::null_mut();
        let status = unsafe { I2C_OpenChannel(channel_index, &mut handle) };
        if status != FT_OK {
            return Err(status.into());
        }

        // Configure the channel
        let mut config = ChannelConfig {
            ClockRate: I2C_CLOCK_FAST_MODE_PLUS, // 1 MHz
            LatencyTimer: 1,                      // 1ms latency (minimum stable value)
            Options: 0,
            Pin: 0,
            currentPinState: 0,
        };

        let status = unsafe { I2C_InitChannel(handle, &mut config) };
        if status != FT_OK {
            unsafe { I2C_CloseChannel(handle) };
            return Err(status.into());
        }

        let mut sensor = Lsm6ds {
            handle,
            address: LSM6DS_ADDRESS,
        };

        // Initialize the sensor
        sensor.init()?;

        Ok(sensor)
    }

    /// Initialize the LSM6DS3TR-C for motion capture
    fn init(&mut self) -> Result<()> {
        // Verify device ID before touching configuration
        let who_am_i = self.read_register(REG_WHO_AM_I)?;
        if who_am_i != WHO_AM_I_VALUE {
            return Err(Lsm6dsError::InvalidDeviceId(who_am_i));
        }

        // Software reset, then wait for the reboot to finish
        self.write_register(REG_CTRL3_C, CTRL3_C_SW_RESET)?;
        std::thread::sleep(std::time::Duration::from_millis(50));

        // Block data update + register auto-increment for multi-byte reads
        self.write_register(REG_CTRL3_C, CTRL3_C_BDU | CTRL3_C_IF_INC)?;

        // Accelerometer: ±8g at 1.66kHz
        self.write_register(REG_CTRL1_XL, CTRL1_XL_ODR_1_66KHZ | CTRL1_XL_FS_8G)?;

        // Gyroscope: ±2000°/s at 1.66kHz
        self.write_register(REG_CTRL2_G, CTRL2_G_ODR_1_66KHZ | CTRL2_G_FS_2000DPS)?;

        Ok(())
    }

    /// Write a single byte to a register
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        let buffer = [reg, value];
        let mut transferred: DWORD = 0;

        let options = I2C_TRANSFER_OPTIONS_START_BIT
            | I2C_TRANSFER_OPTIONS_STOP_BIT
            | I2C_TRANSFER_OPTIONS_FAST_TRANSFER_BYTES;

        let status = unsafe {
            I2C_DeviceWrite(
                self.handle,
                self.address,
                2,
                buffer.as_ptr(),
                &mut transferred,
                options,
            )
        };

        if status != FT_OK {
            return Err(status.into());
        }

        // Note: With FAST_TRANSFER_BYTES, transferred count is in bits, not bytes
        // Only check status per FTDI sample code pattern

        Ok(())
    }

    /// Read a single byte from a register
    fn read_register(&mut self, reg: u8) -> Result<u8> {
        let reg_buf = [reg];
        let mut transferred: DWORD = 0;

        // Write register address
        let options = I2C_TRANSFER_OPTIONS_START_BIT | I2C_TRANSFER_OPTIONS_BREAK_ON_NACK;

        let status = unsafe {
            I2C_DeviceWrite(
                self.handle,
                self.address,
                1,
                reg_buf.as_ptr(),
                &mut transferred,
                options,
            )
        };

        if status != FT_OK {
            return Err(status.into());
        }

        // Read the data
        let mut data = [0u8];
        transferred = 0;

        let options = I2C_TRANSFER_OPTIONS_START_BIT
            | I2C_TRANSFER_OPTIONS_STOP_BIT
            | I2C_TRANSFER_OPTIONS_NACK_LAST_BYTE;

        let status = unsafe {
            I2C_DeviceRead(
                self.handle,
                self.address,
                1,
                data.as_mut_ptr(),
                &mut transferred,
                options,
            )
        };

        if status != FT_OK {
            return Err(status.into());
        }

        if transferred != 1 {
            return Err(Lsm6dsError::TransferError {
                expected: 1,
                actual: transferred,
            });
        }

        Ok(data[0])
    }

    /// Read multiple bytes from consecutive registers
    ///
    /// Relies on IF_INC (set during init) for register address auto-increment.
    fn read_registers(&mut self, reg: u8, count: usize) -> Result<Vec<u8>> {
        let reg_buf = [reg];
        let mut transferred: DWORD = 0;

        // Write register address (without STOP - keep bus for read)
        let options = I2C_TRANSFER_OPTIONS_START_BIT
            | I2C_TRANSFER_OPTIONS_BREAK_ON_NACK
            | I2C_TRANSFER_OPTIONS_FAST_TRANSFER_BYTES;

        let status = unsafe {
            I2C_DeviceWrite(
                self.handle,
                self.address,
                1,
                reg_buf.as_ptr(),
                &mut transferred,
                options,
            )
        };

        if status != FT_OK {
            return Err(status.into());
        }

        // Read the data immediately (repeated START)
        let mut data = vec![0u8; count];
        transferred = 0;

        let options = I2C_TRANSFER_OPTIONS_START_BIT
            | I2C_TRANSFER_OPTIONS_STOP_BIT
            | I2C_TRANSFER_OPTIONS_NACK_LAST_BYTE
            | I2C_TRANSFER_OPTIONS_FAST_TRANSFER_BYTES;

        let status = unsafe {
            I2C_DeviceRead(
                self.handle,
                self.address,
                count as DWORD,
                data.as_mut_ptr(),
                &mut transferred,
                options,
            )
        };

        if status != FT_OK {
            return Err(status.into());
        }

        // Note: When using FAST_TRANSFER_BYTES, the transferred count is in bits, not bytes
        // (e.g., 6 bytes = 48 bits). Based on FTDI sample code, we should only check status.
        // If status is FT_OK, the data is valid regardless of the transferred count.

        Ok(data)
    }

    /// Read both data-ready flags in a single STATUS_REG transaction
    ///
    /// The flags are new-data indicators: each is set when the sensor has
    /// produced a reading that has not yet been read out, and cleared by
    /// reading the corresponding output registers.
    pub fn data_ready(&mut self) -> Result<DataReady> {
        let status = self.read_register(REG_STATUS)?;
        Ok(DataReady {
            accel: status & STATUS_XLDA != 0,
            gyro: status & STATUS_GDA != 0,
        })
    }

    /// Check whether a new accelerometer reading is available
    pub fn acceleration_available(&mut self) -> Result<bool> {
        Ok(self.data_ready()?.accel)
    }

    /// Check whether a new gyroscope reading is available
    pub fn gyroscope_available(&mut self) -> Result<bool> {
        Ok(self.data_ready()?.gyro)
    }

    /// Read the accelerometer
    ///
    /// # Returns
    /// * `Ok((x, y, z))` - Acceleration in g at the ±8g range
    pub fn read_acceleration(&mut self) -> Result<(f32, f32, f32)> {
        let data = self.read_registers(REG_OUTX_L_XL, 6)?;
        let (x, y, z) = parse_axes(&data);
        Ok((accel_raw_to_g(x), accel_raw_to_g(y), accel_raw_to_g(z)))
    }

    /// Read the gyroscope
    ///
    /// # Returns
    /// * `Ok((x, y, z))` - Angular rate in °/s at the ±2000°/s range
    pub fn read_gyroscope(&mut self) -> Result<(f32, f32, f32)> {
        let data = self.read_registers(REG_OUTX_L_G, 6)?;
        let (x, y, z) = parse_axes(&data);
        Ok((gyro_raw_to_dps(x), gyro_raw_to_dps(y), gyro_raw_to_dps(z)))
    }

    /// Switch the capture indicator LED on or off
    ///
    /// The LED sits on the FT232H auxiliary GPIO (ACBUS pin 0) and is driven
    /// through the same channel handle as the I2C bus.
    pub fn set_indicator(&mut self, on: bool) -> Result<()> {
        let value = if on { INDICATOR_PIN_MASK } else { 0 };
        let status = unsafe { FT_WriteGPIO(self.handle, INDICATOR_PIN_MASK, value) };
        if status != FT_OK {
            return Err(status.into());
        }
        Ok(())
    }
}

impl Drop for Lsm6ds {
    fn drop(&mut self) {
        // Leave the indicator dark
        let _ = self.set_indicator(false);

        unsafe {
            I2C_CloseChannel(self.handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_axes_little_endian() {
        // 0x0100 = 256, 0xFFFF = -1, 0x7FFF = i16::MAX
        let frame = [0x00, 0x01, 0xFF, 0xFF, 0xFF, 0x7F];
        assert_eq!(parse_axes(&frame), (256, -1, i16::MAX));
    }

    #[test]
    fn test_accel_scale_8g() {
        // 4096 LSB * 0.244 mg/LSB ≈ 1g
        let g = accel_raw_to_g(4096);
        assert!((g - 1.0).abs() < 0.01);

        // Full scale reaches ±8g
        let max = accel_raw_to_g(i16::MAX);
        assert!((max - 8.0).abs() < 0.01);

        assert_eq!(accel_raw_to_g(0), 0.0);
    }

    #[test]
    fn test_gyro_scale_2000dps() {
        // 14286 LSB * 70 mdps/LSB ≈ 1000°/s
        let dps = gyro_raw_to_dps(14286);
        assert!((dps - 1000.0).abs() < 0.5);

        // Sign is preserved
        assert!(gyro_raw_to_dps(-14286) < 0.0);
    }
}
