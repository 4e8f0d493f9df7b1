//! `price-estimator` binary: train, predict, evaluate and plot.

use anyhow::Result;
use clap::Parser;
use log::debug;

use price_estimator::cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    debug!("{:?}", cli);

    cli.command.run()
}
