/// Default file locations
pub const DEFAULT_INPUT_FILE: &str = "global hourly data.csv";
pub const DEFAULT_DB_FILE: &str = "weather_data.db";
pub const DEFAULT_REPORT_FILE: &str = "pipeline_report.md";

/// Processing defaults
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// NOAA missing-value sentinel, checked before scaling to degrees
pub const MISSING_SENTINEL: f64 = 9999.0;

/// Encoded readings are tenths of a degree Celsius
pub const TENTHS_SCALE: f64 = 10.0;

/// Source timestamp formats, tried in order
pub const DATE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Bare-date fallback, resolved to midnight
pub const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

/// Canonical timestamp format used in the store
pub const STORE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source column names consumed by the transformer
pub const STATION_COLUMN: &str = "STATION";
pub const DATE_COLUMN: &str = "DATE";
pub const NAME_COLUMN: &str = "NAME";
pub const TMP_COLUMN: &str = "TMP";
pub const DEW_COLUMN: &str = "DEW";
