pub mod constants;
pub mod progress;

pub use progress::ProgressReporter;
