use chrono::NaiveDateTime;
use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::utils::constants::STORE_DATE_FORMAT;

/// One extractor batch: untyped source rows plus the header row they were
/// read under. Column names and order are preserved from the file.
#[derive(Debug, Clone)]
pub struct RawBatch {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl RawBatch {
    pub fn new(headers: StringRecord) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Position of a named column, if the source file has it.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A cleaned row ready for the store, keyed by (station, date).
///
/// `temp_f` is derived from `temp_c` and is absent whenever `temp_c` is;
/// absent readings are valid data, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    pub station: String,
    pub date: NaiveDateTime,
    pub name: Option<String>,
    pub temp_c: Option<f64>,
    pub dew_point_c: Option<f64>,
    pub temp_f: Option<f64>,
}

impl CleanRecord {
    /// Timestamp in the canonical store format.
    pub fn store_date(&self) -> String {
        self.date.format(STORE_DATE_FORMAT).to_string()
    }
}
