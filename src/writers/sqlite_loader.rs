use crate::error::Result;
use crate::models::CleanRecord;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::debug;

/// Persists cleaned batches into the `hourly_weather` table, keyed on
/// `(STATION, DATE)` with insert-or-replace semantics.
///
/// Each `load_batch` call is one transaction: the batch commits whole or
/// not at all, and repeated loads of the same rows leave the store
/// unchanged. Later loads of an existing key replace the stored row.
pub struct SqliteLoader {
    conn: Connection,
}

impl SqliteLoader {
    /// Open (or create) the store and ensure the schema exists.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS hourly_weather (
                STATION      TEXT,
                DATE         TEXT,
                NAME         TEXT,
                temp_c       REAL,
                dew_point_c  REAL,
                temp_f       REAL,
                PRIMARY KEY (STATION, DATE)
            );
            "#,
        )?;

        Ok(Self { conn })
    }

    /// Upsert one batch inside a single transaction.
    pub fn load_batch(&mut self, records: &[CleanRecord]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO hourly_weather
                 (STATION, DATE, NAME, temp_c, dew_point_c, temp_f)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;

            for record in records {
                stmt.execute(params![
                    record.station,
                    record.store_date(),
                    record.name,
                    record.temp_c,
                    record.dew_point_c,
                    record.temp_f,
                ])?;
            }
        }
        tx.commit()?;

        debug!(rows = records.len(), "batch committed");

        Ok(())
    }

    /// Handle for read-only queries against the populated store.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(station: &str, temp_c: Option<f64>) -> CleanRecord {
        CleanRecord {
            station: station.to_string(),
            date: NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            name: Some("A".to_string()),
            temp_c,
            dew_point_c: Some(5.0),
            temp_f: temp_c.map(|c| c * 9.0 / 5.0 + 32.0),
        }
    }

    fn row_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM hourly_weather", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_load_batch_stores_rows() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let mut loader = SqliteLoader::open(dir.path().join("weather.db"))?;

        loader.load_batch(&[record("001", Some(15.0)), record("002", None)])?;

        assert_eq!(row_count(loader.connection()), 2);

        let (date, temp_f): (String, Option<f64>) = loader.connection().query_row(
            "SELECT DATE, temp_f FROM hourly_weather WHERE STATION = '001'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        assert_eq!(date, "2023-01-01 00:00:00");
        assert_eq!(temp_f, Some(59.0));

        // Absent readings persist as NULL, the row itself is kept.
        let temp_c: Option<f64> = loader.connection().query_row(
            "SELECT temp_c FROM hourly_weather WHERE STATION = '002'",
            [],
            |row| row.get(0),
        )?;
        assert_eq!(temp_c, None);

        Ok(())
    }

    #[test]
    fn test_loading_twice_is_idempotent() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let mut loader = SqliteLoader::open(dir.path().join("weather.db"))?;

        let batch = vec![record("001", Some(15.0))];
        loader.load_batch(&batch)?;
        loader.load_batch(&batch)?;

        assert_eq!(row_count(loader.connection()), 1);

        let temp_c: f64 = loader.connection().query_row(
            "SELECT temp_c FROM hourly_weather WHERE STATION = '001'",
            [],
            |row| row.get(0),
        )?;
        assert_eq!(temp_c, 15.0);

        Ok(())
    }

    #[test]
    fn test_upsert_replaces_existing_key() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let mut loader = SqliteLoader::open(dir.path().join("weather.db"))?;

        loader.load_batch(&[record("001", Some(15.0))])?;
        loader.load_batch(&[record("001", Some(25.0))])?;

        assert_eq!(row_count(loader.connection()), 1);

        let (temp_c, temp_f): (f64, f64) = loader.connection().query_row(
            "SELECT temp_c, temp_f FROM hourly_weather WHERE STATION = '001'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        assert_eq!(temp_c, 25.0);
        assert_eq!(temp_f, 77.0);

        Ok(())
    }

    #[test]
    fn test_reopening_keeps_existing_rows() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("weather.db");

        {
            let mut loader = SqliteLoader::open(&db_path)?;
            loader.load_batch(&[record("001", Some(15.0))])?;
        }

        let loader = SqliteLoader::open(&db_path)?;
        assert_eq!(row_count(loader.connection()), 1);

        Ok(())
    }
}
