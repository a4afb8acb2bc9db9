use clap::Parser;
use noaa_hourly_processor::cli::{run, Cli};
use noaa_hourly_processor::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
