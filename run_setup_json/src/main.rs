mod cli;
mod config;
mod logger;

use std::{error::Error, fs::File, io};

use clap::Parser;
use optrace::{detectors_hit, TraceConfig};
use optrace_json::{serde_json, serialize_trace, setup_from_reader};

use config::Config;

fn trace_config(args: &cli::Args) -> Result<TraceConfig, Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut config = TraceConfig::from(config);
    if let Some(max_bounces) = args.max_bounces {
        config.max_bounces = max_bounces;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = cli::Args::parse();
    logger::init_logger(args.log_level.into());

    let config = trace_config(&args)?;
    let setup = setup_from_reader(io::BufReader::new(File::open(&args.file)?))?;

    log::info!(
        "loaded {} components ({} emitters) from {}",
        setup.components.len(),
        setup.emitters().count(),
        args.file.display(),
    );
    log::debug!("{config:?}");

    let segments = setup.trace_with(&config);

    log::info!(
        "traced {} segments, {} detectors lit",
        segments.len(),
        detectors_hit(&setup.components, &segments).len(),
    );

    let report = serialize_trace(&setup, &segments);

    match &args.output {
        Some(path) => {
            serde_json::to_writer_pretty(io::BufWriter::new(File::create(path)?), &report)?
        }
        None => serde_json::to_writer_pretty(io::stdout().lock(), &report)?,
    }

    Ok(())
}
