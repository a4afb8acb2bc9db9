use crate::analyzers::{PipelineSummary, SummaryAnalyzer};
use crate::error::Result;
use crate::processors::Transformer;
use crate::readers::BatchReader;
use crate::utils::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_DB_FILE, DEFAULT_INPUT_FILE, DEFAULT_REPORT_FILE,
};
use crate::utils::progress::ProgressReporter;
use crate::writers::SqliteLoader;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Where the pipeline reads from and writes to.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub db_path: PathBuf,
    pub report_path: PathBuf,
    pub batch_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            report_path: PathBuf::from(DEFAULT_REPORT_FILE),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Run the full pipeline: extract, transform, and load batch by batch, then
/// generate the summary report.
///
/// Strictly sequential, one batch in flight at a time. Every loaded batch
/// commits independently, so a fatal error mid-run aborts the rest but
/// leaves earlier batches in the store; upsert idempotence makes a restart
/// from the first batch safe.
pub fn run(config: &PipelineConfig, progress: Option<&ProgressReporter>) -> Result<PipelineSummary> {
    info!(input = %config.input_path.display(), "starting pipeline run");

    let reader = BatchReader::with_batch_size(config.batch_size);
    let transformer = Transformer::new();
    let mut loader = SqliteLoader::open(&config.db_path)?;

    let mut batches = 0u64;
    let mut rows_read = 0u64;
    let mut rows_loaded = 0u64;

    for batch in reader.batches(&config.input_path)? {
        let batch = batch?;
        let records = transformer.transform(&batch);

        let dropped = batch.len() - records.len();
        if dropped > 0 {
            debug!(batch = batches, dropped, "rows dropped by key validation");
        }

        loader.load_batch(&records)?;

        batches += 1;
        rows_read += batch.len() as u64;
        rows_loaded += records.len() as u64;

        if let Some(progress) = progress {
            progress.set_message(&format!(
                "Loaded {} rows in {} batches",
                rows_loaded, batches
            ));
        }
    }

    info!(batches, rows_read, rows_loaded, "load complete");

    let summary = SummaryAnalyzer::new().analyze(loader.connection())?;
    fs::write(&config.report_path, summary.render())?;

    info!(report = %config.report_path.display(), "report written");

    Ok(summary)
}
