//! Live sensor monitor - continuous display of axes and trigger level
//!
//! Shows accelerometer and gyroscope readings as bar graphs together with
//! the summed absolute acceleration measured against the capture threshold.
//! Useful on the bench for picking a threshold before recording gestures.

use clap::Parser;
use ft232_lsm6ds_logger::{
    create_bar, create_level_bar, Lsm6ds, Lsm6dsError, TimeKeeper,
    DEFAULT_ACCELERATION_THRESHOLD,
};
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "monitor")]
#[command(about = "Live LSM6DS3TR-C display with trigger level", long_about = None)]
struct Args {
    /// Trigger threshold to display, in g
    #[arg(short, long, default_value_t = DEFAULT_ACCELERATION_THRESHOLD)]
    threshold: f32,

    /// I2C channel index of the FT232H bridge
    #[arg(short, long, default_value = "0")]
    channel: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("LSM6DS3TR-C Live Monitor");
    println!("========================");
    println!("Initializing FT232H I2C interface...");

    let mut sensor = match Lsm6ds::new(args.channel) {
        Ok(s) => {
            println!("Sensor initialized successfully!");
            println!("Press Ctrl+C to exit\n");
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
        Err(e) => {
            eprintln!("Error initializing sensor: {}", e);
            return Err(Box::new(e));
        }
    };

    let timer = TimeKeeper::new();
    let mut sample_count = 0u64;

    // Last seen values; the two streams update independently
    let (mut ax, mut ay, mut az) = (0.0f32, 0.0f32, 0.0f32);
    let (mut gx, mut gy, mut gz) = (0.0f32, 0.0f32, 0.0f32);

    // Clear screen once at start
    print!("\x1B[2J\x1B[H");
    io::stdout().flush()?;

    loop {
        let ready = sensor.data_ready()?;

        if ready.accel {
            (ax, ay, az) = sensor.read_acceleration()?;
            sample_count += 1;
        }
        if ready.gyro {
            (gx, gy, gz) = sensor.read_gyroscope()?;
        }

        if !ready.accel && !ready.gyro {
            continue;
        }

        let a_sum = ax.abs() + ay.abs() + az.abs();
        let elapsed = timer.elapsed_secs();
        let sample_rate = if elapsed > 0.0 {
            sample_count as f64 / elapsed
        } else {
            0.0
        };

        // Move cursor to top without clearing (reduces flicker)
        print!("\x1B[H");

        println!("LSM6DS3TR-C Live Monitor                                        ");
        println!("========================                                        ");
        println!("Time: {:.2}s | Samples: {} | Rate: {:.1} Hz                    ",
            elapsed, sample_count, sample_rate);
        println!();

        println!("ACCELEROMETER (g)                    -8g ◄─────────┼─────────► +8g");
        println!("  X: {:7.3}g  [{}]", ax, create_bar(ax, 8.0, 40));
        println!("  Y: {:7.3}g  [{}]", ay, create_bar(ay, 8.0, 40));
        println!("  Z: {:7.3}g  [{}]", az, create_bar(az, 8.0, 40));

        println!();

        println!("GYROSCOPE (°/s)                  -2000°/s ◄───────┼───────► +2000°/s");
        println!("  X: {:7.1}°/s [{}]", gx, create_bar(gx, 2000.0, 40));
        println!("  Y: {:7.1}°/s [{}]", gy, create_bar(gy, 2000.0, 40));
        println!("  Z: {:7.1}°/s [{}]", gz, create_bar(gz, 2000.0, 40));

        println!();

        let trigger = if a_sum >= args.threshold { "TRIGGER" } else { "       " };
        println!("TRIGGER LEVEL |aX|+|aY|+|aZ|  (▌ = threshold {:.2}g)", args.threshold);
        println!("  {:6.3}g [{}] {}", a_sum, create_level_bar(a_sum, args.threshold, 10.0, 40), trigger);

        println!();
        println!("Press Ctrl+C to exit                                           ");

        // Flush to ensure immediate display
        io::stdout().flush()?;
    }
}
