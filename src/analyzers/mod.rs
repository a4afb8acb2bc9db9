pub mod summary;

pub use summary::{PipelineSummary, SummaryAnalyzer};
