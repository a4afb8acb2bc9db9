pub mod batch_reader;

pub use batch_reader::{BatchIterator, BatchReader};
