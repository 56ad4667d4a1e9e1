use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
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

#[derive(Debug, Parser)]
#[command(name = "gen_rand_setup")]
#[command(about = "Generate a random optical bench and save it as JSON")]
pub struct Args {
    /// Where to write the generated setup
    pub path: PathBuf,

    /// Number of lasers on the bench
    #[arg(short, long, default_value_t = 2)]
    pub emitters: usize,

    /// Number of other components (mirrors, lenses, splitters, detectors)
    #[arg(short, long, default_value_t = 12)]
    pub components: usize,

    /// Seed for reproducible benches, random if absent
    #[arg(short, long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}
