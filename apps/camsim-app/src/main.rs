//! camsim command-line driver.
//!
//! Provides two modes of operation:
//! - `run`: Build the sensors of a TOML suite, push synthetic frames through
//!   their noise models and print per-sensor statistics
//! - `models`: List registered noise models and the sensor types they accept

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ndarray::ArrayD;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use camsim_core::prelude::*;
use camsim_noise::prelude::*;
use camsim_render::prelude::*;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Per-sensor noise injection for simulated cameras.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply each sensor's noise model to synthetic frames and print statistics.
    Run {
        /// Sensor suite TOML file. Defaults to one color sensor per built-in model.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the suite's random seed.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of frames per sensor.
        #[arg(short = 'n', long, default_value_t = 1)]
        frames: u32,
    },

    /// List registered noise models.
    Models,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Accumulated clean-vs-noisy differences for one sensor.
#[derive(Debug, Default)]
struct NoiseStats {
    samples: u64,
    changed: u64,
    saturated: u64,
    zeroed: u64,
    abs_error: u64,
}

impl NoiseStats {
    fn record(&mut self, clean: &ArrayD<u8>, noisy: &ArrayD<u8>) {
        for (&c, &n) in clean.iter().zip(noisy.iter()) {
            self.samples += 1;
            if c != n {
                self.changed += 1;
                if n == u8::MAX {
                    self.saturated += 1;
                } else if n == u8::MIN {
                    self.zeroed += 1;
                }
            }
            self.abs_error += u64::from(c.abs_diff(n));
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn ratio(part: u64, whole: u64) -> f64 {
        if whole == 0 {
            0.0
        } else {
            part as f64 / whole as f64
        }
    }

    fn print(&self, uuid: &str, model: &str) {
        println!(
            "{uuid:<16} {model:<24} changed={:.4} salt={:.4} pepper={:.4} mae={:.3}",
            Self::ratio(self.changed, self.samples),
            Self::ratio(self.saturated, self.samples),
            Self::ratio(self.zeroed, self.samples),
            Self::ratio(self.abs_error, self.samples),
        );
    }
}

// ---------------------------------------------------------------------------
// Synthetic frames
// ---------------------------------------------------------------------------

/// Diagonal gradient frame, shifted by one level per frame.
#[allow(clippy::cast_possible_truncation)]
fn synthetic_frame(spec: &SensorSpec, frame_index: u32) -> ArrayD<u8> {
    let height = spec.height() as usize;
    let width = spec.width() as usize;
    let offset = frame_index as usize;
    let span = (width + height).max(1);
    let value = move |y: usize, x: usize| (((x + y) * 255 / span + offset) % 256) as u8;

    if spec.sensor_type == SensorType::Color {
        let config = RenderConfig::from_spec(spec);
        let channels = config.format.channels();
        ArrayD::from_shape_fn(vec![height, width, channels], |idx| value(idx[0], idx[1]))
    } else {
        ArrayD::from_shape_fn(vec![height, width], |idx| value(idx[0], idx[1]))
    }
}

fn default_suite() -> SensorSuiteConfig {
    let sensors = [
        NoSensorNoiseModel::NAME,
        SaltAndPepperNoiseModel::NAME,
        SpeckleNoiseModel::NAME,
    ]
    .into_iter()
    .map(|name| {
        SensorSpec::new(format!("rgb_{}", name.to_lowercase()), SensorType::Color)
            .with_resolution(64, 64)
            .with_noise_model(name, toml::Table::new())
    })
    .collect();
    SensorSuiteConfig { seed: 0, sensors }
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn run_suite(
    config: Option<PathBuf>,
    seed: Option<u64>,
    frames: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut suite_config = match config {
        Some(path) => {
            info!(path = %path.display(), "loading sensor suite");
            SensorSuiteConfig::from_file(path)?
        }
        None => default_suite(),
    };
    if let Some(seed) = seed {
        suite_config.seed = seed;
    }

    let mut suite = SensorSuite::from_config(&suite_config, global_registry())?;
    info!(
        sensors = suite.len(),
        seed = suite_config.seed,
        frames,
        "running sensor suite"
    );

    for spec in &suite_config.sensors {
        if !spec.sensor_type.is_visual() {
            info!(sensor = %spec.uuid, sensor_type = %spec.sensor_type, "skipping non-image sensor");
            continue;
        }
        let Some(sensor) = suite.get_mut(&spec.uuid) else {
            continue;
        };
        let mut stats = NoiseStats::default();
        for frame_index in 0..frames {
            let clean = synthetic_frame(spec, frame_index);
            let noisy = if spec.sensor_type == SensorType::Color {
                let mut frame = FrameBuffer::from_config(&RenderConfig::from_spec(spec));
                frame.write_frame(clean.iter().copied().collect());
                sensor.observe(&frame)?
            } else {
                sensor.observe_image(clean.view())?
            };
            stats.record(&clean, &noisy);
        }
        debug!(sensor = %spec.uuid, ?stats, "sensor done");
        let model = sensor.noise_model().map_or("-", |m| m.name());
        stats.print(&spec.uuid, model);
    }
    Ok(())
}

fn run_models() {
    let registry = global_registry();
    for name in registry.names() {
        let accepted: Vec<&str> = SensorType::ALL
            .into_iter()
            .filter(|&t| registry.is_valid_sensor_type(name, t).unwrap_or(false))
            .map(SensorType::as_str)
            .collect();
        println!("{name:<24} {}", accepted.join(", "));
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run {
            config,
            seed,
            frames,
        }) => run_suite(config, seed, frames),
        Some(Commands::Models) => {
            run_models();
            Ok(())
        }
        None => run_suite(None, None, 1),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("camsim: {e}");
            ExitCode::FAILURE
        }
    }
}
