mod cli;
mod logger;

use std::{error::Error, fs::File, io::BufWriter};

use clap::Parser;
use optrace_json::{serde_json, JsonSer};
use optrace_random::{
    rand::{rngs::StdRng, SeedableRng},
    random_setup,
};

fn main() -> Result<(), Box<dyn Error>> {
    let args = cli::Args::parse();
    logger::init_logger(args.log_level.into());

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let setup = random_setup(&mut rng, args.emitters, args.components);

    log::info!(
        "generated {} components ({} emitters), writing to {}",
        setup.components.len(),
        args.emitters,
        args.path.display(),
    );

    serde_json::to_writer_pretty(BufWriter::new(File::create(&args.path)?), &setup.to_json())?;

    Ok(())
}
