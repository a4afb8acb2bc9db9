pub mod record;

pub use record::{CleanRecord, RawBatch};
