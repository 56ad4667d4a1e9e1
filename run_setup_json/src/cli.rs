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
#[command(name = "run_setup_json")]
#[command(about = "Trace the beams of an optical bench saved as JSON")]
pub struct Args {
    /// Setup file, as exported by the editor
    pub file: PathBuf,

    /// TOML file with tracer settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the bounce ceiling of the config
    #[arg(short, long)]
    pub max_bounces: Option<usize>,

    /// Where to write the trace report, stdout if absent
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}
