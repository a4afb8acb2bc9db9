use crate::analyzers::SummaryAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::error::{PipelineError, Result};
use crate::pipeline::{self, PipelineConfig};
use crate::utils::progress::ProgressReporter;
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            input,
            database,
            report,
            batch_size,
        } => {
            let config = PipelineConfig {
                input_path: input,
                db_path: database,
                report_path: report,
                batch_size,
            };

            println!("Processing {}...", config.input_path.display());

            let progress = ProgressReporter::new_spinner("Running pipeline...", false);
            let summary = pipeline::run(&config, Some(&progress))?;
            progress.finish_with_message(&format!("Processed {} records", summary.total_records));

            println!("\n{}", summary.render());
            println!("Report written to {}", config.report_path.display());
        }

        Commands::Report { database, report } => {
            if !database.exists() {
                return Err(PipelineError::Config(format!(
                    "store not found: {}",
                    database.display()
                )));
            }

            let summary = SummaryAnalyzer::new().report_from_store(&database, &report)?;
            println!("{}", summary.render());
            println!("Report written to {}", report.display());
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "noaa_hourly_processor=debug"
    } else {
        "noaa_hourly_processor=info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
