use crate::utils::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_DB_FILE, DEFAULT_INPUT_FILE, DEFAULT_REPORT_FILE,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "noaa-hourly-processor")]
#[command(about = "NOAA hourly weather data pipeline")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: extract, transform, load, report
    Run {
        #[arg(short, long, default_value = DEFAULT_INPUT_FILE, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long, default_value = DEFAULT_DB_FILE, help = "SQLite store location")]
        database: PathBuf,

        #[arg(short, long, default_value = DEFAULT_REPORT_FILE, help = "Report output path")]
        report: PathBuf,

        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, help = "Rows per batch")]
        batch_size: usize,
    },

    /// Regenerate the summary report from an existing store
    Report {
        #[arg(short, long, default_value = DEFAULT_DB_FILE, help = "SQLite store location")]
        database: PathBuf,

        #[arg(short, long, default_value = DEFAULT_REPORT_FILE, help = "Report output path")]
        report: PathBuf,
    },
}
