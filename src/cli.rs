use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use pathtracer::render::{image_height_for, RenderSettings};
use pathtracer::Result;

/// `--log-level` values.
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum SceneChoice {
    /// Hundreds of random spheres around three big ones
    Final,
    /// Just the ground
    Ground,
}

#[derive(Parser, Debug)]
#[command(name = "pathtracer")]
#[command(about = "Renders a sphere scene with a Monte Carlo path tracer and writes a PPM image")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: usize,

    /// Width over height; fixes the image height
    #[arg(long, default_value_t = 1.5)]
    pub aspect: f64,

    /// Paths traced per pixel
    #[arg(short, long, default_value_t = 50)]
    pub samples: usize,

    /// Longest path, in bounces
    #[arg(long, default_value_t = 50)]
    pub depth: usize,

    /// Worker threads
    #[arg(short = 'j', long, default_value_t = 16)]
    pub threads: usize,

    /// Seed for the scene and the render workers
    #[arg(long, default_value_t = 0xDEADBEEF)]
    pub seed: u64,

    #[arg(long, value_enum, default_value_t = SceneChoice::Final)]
    pub scene: SceneChoice,

    /// Where to write the PPM; standard output if omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Don't draw per-thread progress bars on standard error
    #[arg(long)]
    pub no_progress: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    /// The render settings asked for, checked for sanity.
    pub fn settings(&self) -> Result<RenderSettings> {
        let settings = RenderSettings {
            width: self.width,
            height: image_height_for(self.width, self.aspect)?,
            samples_per_pixel: self.samples,
            max_depth: self.depth,
            threads: self.threads,
            seed: self.seed,
        };
        settings.validate()?;
        Ok(settings)
    }
}
