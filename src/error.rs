//! Error types for the LSM6DS motion logger

use thiserror::Error;

use crate::ffi::{status_to_string, FT_STATUS, FT_OK};

/// Error type for sensor and capture operations
#[derive(Error, Debug)]
pub enum Lsm6dsError {
    /// FTDI driver error
    #[error("FTDI error: {status} ({description})")]
    FtdiError {
        status: FT_STATUS,
        description: String,
    },

    /// No I2C channels found
    #[error("No I2C channels found")]
    NoChannelsFound,

    /// Invalid channel index
    #[error("Invalid channel index: {0}")]
    InvalidChannel(u32),

    /// Invalid WHO_AM_I response
    #[error("Invalid WHO_AM_I response: expected 0x6A, got 0x{0:02X}")]
    InvalidDeviceId(u8),

    /// Data transfer error
    #[error("Data transfer error: expected {expected} bytes, transferred {actual}")]
    TransferError { expected: u32, actual: u32 },

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Output sink error
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<FT_STATUS> for Lsm6dsError {
    fn from(status: FT_STATUS) -> Self {
        if status == FT_OK {
            panic!("Cannot convert FT_OK to error");
        }
        Lsm6dsError::FtdiError {
            status,
            description: status_to_string(status).to_string(),
        }
    }
}

/// Result type for sensor and capture operations
pub type Result<T> = std::result::Result<T, Lsm6dsError>;
