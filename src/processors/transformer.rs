use crate::models::{CleanRecord, RawBatch};
use crate::utils::constants::{
    DATE_COLUMN, DATE_FORMATS, DATE_ONLY_FORMAT, DEW_COLUMN, MISSING_SENTINEL, NAME_COLUMN,
    STATION_COLUMN, TENTHS_SCALE, TMP_COLUMN,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Cleans one raw batch into store-ready records.
///
/// Pure over the batch, no I/O. Two failure modes with different fates:
/// a row missing its (STATION, DATE) key or carrying an unparsable date is
/// dropped outright, while a malformed TMP/DEW reading only nulls that
/// field. Absence of a reading is valid domain data, never an error.
pub struct Transformer;

impl Transformer {
    pub fn new() -> Self {
        Self
    }

    pub fn transform(&self, batch: &RawBatch) -> Vec<CleanRecord> {
        // Columns absent from the source are simply omitted downstream.
        let station_idx = batch.column_index(STATION_COLUMN);
        let date_idx = batch.column_index(DATE_COLUMN);
        let name_idx = batch.column_index(NAME_COLUMN);
        let tmp_idx = batch.column_index(TMP_COLUMN);
        let dew_idx = batch.column_index(DEW_COLUMN);

        let mut records = Vec::with_capacity(batch.len());

        for row in &batch.rows {
            let field = |idx: Option<usize>| {
                idx.and_then(|i| row.get(i))
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
            };

            // Hard filter: rows without a usable key never reach the store.
            let Some(station) = field(station_idx) else {
                continue;
            };
            let Some(date_raw) = field(date_idx) else {
                continue;
            };
            let Some(date) = parse_date(date_raw) else {
                continue;
            };

            let temp_c = parse_noaa_value(field(tmp_idx));
            let dew_point_c = parse_noaa_value(field(dew_idx));
            let temp_f = temp_c.map(|c| c * 9.0 / 5.0 + 32.0);

            records.push(CleanRecord {
                station: station.to_string(),
                date,
                name: field(name_idx).map(str::to_string),
                temp_c,
                dew_point_c,
                temp_f,
            });
        }

        records
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a NOAA encoded reading of the form `"<signed tenths>,<quality>"`.
///
/// The quality code is discarded. Returns `None` for the 9999 sentinel
/// (checked before division) and for anything that does not split on a
/// comma or parse as a number.
pub fn parse_noaa_value(raw: Option<&str>) -> Option<f64> {
    let (numeric, _quality) = raw?.split_once(',')?;
    let tenths: f64 = numeric.trim().parse().ok()?;

    if tenths == MISSING_SENTINEL {
        return None;
    }

    Some(tenths / TENTHS_SCALE)
}

/// Normalize a source date string into a timestamp. Bare dates resolve to
/// midnight; anything unrecognized is `None` and drops the row upstream.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    for format in DATE_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(timestamp);
        }
    }

    NaiveDate::parse_from_str(raw, DATE_ONLY_FORMAT)
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}
