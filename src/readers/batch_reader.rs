use crate::error::Result;
use crate::models::RawBatch;
use crate::utils::constants::DEFAULT_BATCH_SIZE;
use csv::{Reader, ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;

/// Reads a delimited source file as a lazy sequence of fixed-size batches.
///
/// The sequence is finite and not restartable mid-stream; calling `batches`
/// again reopens the file from the beginning. Rows the parser cannot
/// tokenize surface as a fatal error for that batch. Fields stay untyped
/// text here, the transformer re-validates everything it uses.
pub struct BatchReader {
    batch_size: usize,
}

impl BatchReader {
    pub fn new() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    pub fn batches(&self, path: &Path) -> Result<BatchIterator> {
        BatchIterator::new(path, self.batch_size)
    }
}

impl Default for BatchReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over raw batches of a single source file.
pub struct BatchIterator {
    reader: Reader<File>,
    headers: StringRecord,
    batch_size: usize,
    done: bool,
}

impl BatchIterator {
    fn new(path: &Path, batch_size: usize) -> Result<Self> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            batch_size,
            done: false,
        })
    }
}

impl Iterator for BatchIterator {
    type Item = Result<RawBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut batch = RawBatch::new(self.headers.clone());
        let mut record = StringRecord::new();

        while batch.len() < self.batch_size {
            match self.reader.read_record(&mut record) {
                Ok(true) => batch.rows.push(record.clone()),
                Ok(false) => {
                    self.done = true;
                    break;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }

        if batch.is_empty() {
            None
        } else {
            Some(Ok(batch))
        }
    }
}
