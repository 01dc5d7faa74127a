//! Planting control binary, the HTTP surface the HMI polls.
use anyhow::{Context, Result};
use clap::Parser;
use planter::components::prelude::*;
use planter::logging;

/// Arguments required for starting the program from the command line.
#[derive(Parser, Debug)]
struct Args {
    /// Path to the config file for the Planting Control Component. The
    /// defaults (0.0.0.0:5000) are used when omitted.
    #[arg(short, long)]
    filepath: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let component = match args.filepath {
        Some(filepath) => PlantingControl::from_config_file(&filepath)
            .with_context(|| format!("Failed to load config {filepath}"))?,
        None => PlantingControl::new(PlantingControlConfig::default()),
    };

    logging::init(component.config().log_filter());

    PlantingControlController::start(component)
        .await
        .context("Planting control stopped with an error")
}
