//! Motion-triggered data logger for the LSM6DS3TR-C 6-axis IMU
//!
//! This library drives an LSM6DS3TR-C accelerometer/gyroscope through the
//! FTDI FT232H USB-to-I2C bridge (via the libMPSSE library) and captures
//! fixed-length windows of motion data for offline gesture classification.
//! A window begins when the summed absolute acceleration meets a threshold
//! and ends after exactly the configured number of fused samples; windows
//! stream out as CSV while an indicator LED marks the active capture.
//!
//! # Quick Start
//!
//! ## Motion-Triggered Capture
//! ```no_run
//! use ft232_lsm6ds_logger::{
//!     CsvEmitter, Lsm6ds, MotionSampler, PollInput, SamplerConfig,
//! };
//!
//! let mut sensor = Lsm6ds::new(0)?;
//! let mut sampler = MotionSampler::new(SamplerConfig::default())?;
//! let mut emitter = CsvEmitter::new(std::io::stdout());
//!
//! emitter.write_header()?;
//!
//! loop {
//!     let ready = sensor.data_ready()?;
//!     let input = PollInput {
//!         accel: if ready.accel { Some(sensor.read_acceleration()?) } else { None },
//!         gyro: if ready.gyro { Some(sensor.read_gyroscope()?) } else { None },
//!     };
//!
//!     let outcome = sampler.poll(input);
//!     if outcome.capture_started {
//!         sensor.set_indicator(true)?;
//!     }
//!     if let Some(sample) = outcome.sample {
//!         emitter.write_sample(&sample)?;
//!     }
//!     if outcome.capture_ended {
//!         emitter.end_window()?;
//!         sensor.set_indicator(false)?;
//!     }
//! }
//! # Ok::<(), ft232_lsm6ds_logger::Lsm6dsError>(())
//! ```
//!
//! ## Testing Capture Logic Without Hardware
//! ```
//! use ft232_lsm6ds_logger::{MotionSampler, PollInput, SamplerConfig};
//!
//! let mut sampler = MotionSampler::new(SamplerConfig {
//!     acceleration_threshold: 2.5,
//!     num_samples: 3,
//! })?;
//!
//! let shake = PollInput {
//!     accel: Some((2.0, 1.0, 0.5)),
//!     gyro: Some((250.0, 0.0, 0.0)),
//! };
//!
//! assert!(sampler.poll(shake).capture_started);
//! # Ok::<(), ft232_lsm6ds_logger::Lsm6dsError>(())
//! ```

pub mod common;
pub mod csv;
pub mod error;
mod ffi;
pub mod lsm6ds;
pub mod sampler;

// Re-export public API
pub use common::{create_bar, create_level_bar, TimeKeeper};
pub use csv::CsvEmitter;
pub use error::{Lsm6dsError, Result};
pub use lsm6ds::{DataReady, Lsm6ds};
pub use sampler::{
    FusedSample, MotionSampler, PollInput, PollOutcome, SamplerConfig, SamplerState,
    DEFAULT_ACCELERATION_THRESHOLD, DEFAULT_NUM_SAMPLES,
};
