//! Motion-triggered capture tool
//!
//! Polls the LSM6DS3TR-C and streams one fixed-length CSV window of fused
//! accelerometer/gyroscope samples per detected motion event. CSV goes to
//! stdout; diagnostics and the session summary go to stderr.
//!
//! Usage:
//!   motion-capture --threshold 2.5 --samples 300 > gestures.csv

use clap::Parser;
use ft232_lsm6ds_logger::{
    CsvEmitter, Lsm6ds, Lsm6dsError, MotionSampler, PollInput, SamplerConfig, TimeKeeper,
    DEFAULT_ACCELERATION_THRESHOLD, DEFAULT_NUM_SAMPLES,
};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "motion-capture")]
#[command(about = "Capture motion-triggered LSM6DS3TR-C sample windows as CSV", long_about = None)]
struct Args {
    /// Trigger threshold on summed absolute acceleration, in g
    #[arg(short, long, default_value_t = DEFAULT_ACCELERATION_THRESHOLD)]
    threshold: f32,

    /// Samples per capture window
    #[arg(short, long, default_value_t = DEFAULT_NUM_SAMPLES)]
    samples: u32,

    /// I2C channel index of the FT232H bridge
    #[arg(short, long, default_value = "0")]
    channel: u32,

    /// Stop after this many complete windows (runs until Ctrl+C if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    windows: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("LSM6DS3TR-C Motion Capture");
    eprintln!("==========================");
    eprintln!("Started: {}", chrono::Local::now().to_rfc3339());
    eprintln!("Trigger threshold: {} g (summed absolute)", args.threshold);
    eprintln!("Window length: {} samples", args.samples);
    if let Some(windows) = args.windows {
        eprintln!("Stopping after: {} windows", windows);
    } else {
        eprintln!("Stopping: on Ctrl+C");
    }
    eprintln!();

    // Initialize the sensor; without it the tool has no purpose, so any
    // failure here is fatal
    eprintln!("Initializing FT232H I2C interface...");
    let mut sensor = match Lsm6ds::new(args.channel) {
        Ok(s) => {
            eprintln!("Sensor initialized successfully!\n");
            s
        }
        Err(Lsm6dsError::NoChannelsFound) => {
            eprintln!("Error: No FT232H devices found.");
            eprintln!("Please check:");
            eprintln!("  1. FT232H is connected via USB");
            eprintln!("  2. FTDI drivers are installed");
            eprintln!("  3. No other application is using the device");
            return Err(Box::new(Lsm6dsError::NoChannelsFound));
        }
        Err(Lsm6dsError::InvalidDeviceId(id)) => {
            eprintln!("Error: Invalid LSM6DS3TR-C device ID: 0x{:02X}", id);
            eprintln!("Please check:");
            eprintln!("  1. LSM6DS3TR-C is properly connected to FT232H I2C pins");
            eprintln!("  2. Power supply to the sensor is correct (3.3V)");
            eprintln!("  3. Pull-up resistors are present on SDA/SCL lines");
            return Err(Box::new(Lsm6dsError::InvalidDeviceId(id)));
        }
        Err(e) => {
            eprintln!("Error initializing sensor: {}", e);
            return Err(Box::new(e));
        }
    };

    let mut sampler = MotionSampler::new(SamplerConfig {
        acceleration_threshold: args.threshold,
        num_samples: args.samples,
    })?;

    // Setup Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nReceived Ctrl+C, stopping capture...");
        r.store(false, Ordering::SeqCst);
    })?;

    let stdout = io::stdout();
    let mut emitter = CsvEmitter::new(stdout.lock());
    emitter.write_header()?;
    emitter.flush()?;

    let timer = TimeKeeper::new();
    let mut samples_emitted = 0u64;

    eprintln!("Waiting for motion (LED lights during capture)...\n");

    // Tight synchronous poll loop: no sleeps, the sensor's data-ready flags
    // pace the capture
    while running.load(Ordering::SeqCst) {
        let ready = sensor.data_ready()?;
        let input = PollInput {
            accel: if ready.accel {
                Some(sensor.read_acceleration()?)
            } else {
                None
            },
            gyro: if ready.gyro {
                Some(sensor.read_gyroscope()?)
            } else {
                None
            },
        };

        let outcome = sampler.poll(input);

        if outcome.capture_started {
            sensor.set_indicator(true)?;
        }

        if let Some(sample) = outcome.sample {
            emitter.write_sample(&sample)?;
            samples_emitted += 1;
        }

        if outcome.capture_ended {
            emitter.end_window()?;
            emitter.flush()?;
            sensor.set_indicator(false)?;

            if let Some(limit) = args.windows {
                if sampler.windows_completed() >= limit {
                    break;
                }
            }
        }
    }

    emitter.flush()?;

    // Session summary
    let elapsed = timer.elapsed_secs();
    eprintln!("\nCapture session complete");
    eprintln!("Elapsed time: {:.2} seconds", elapsed);
    eprintln!("Windows captured: {}", sampler.windows_completed());
    eprintln!("Samples emitted: {}", samples_emitted);
    eprintln!("Discarded mismatched readings: {}", sampler.discarded_readings());
    io::stderr().flush()?;

    Ok(())
}
