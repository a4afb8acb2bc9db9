use crate::error::Result;
use rusqlite::Connection;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Aggregate view of the populated store.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub total_records: u64,
    /// Mean over rows with a reading; `None` when no row has one.
    pub avg_temp_c: Option<f64>,
    pub station_counts: Vec<(Option<String>, u64)>,
}

impl PipelineSummary {
    /// Render the Markdown report.
    pub fn render(&self) -> String {
        let avg = match self.avg_temp_c {
            Some(avg) => format!("{:.2}", avg),
            None => "N/A".to_string(),
        };

        let mut report = String::new();
        report.push_str("# Data Pipeline Report\n");
        report.push_str(&format!(
            "Processed {} records. Average Temp: {}°C\n\n",
            self.total_records, avg
        ));
        report.push_str("## Station Summary\n");
        report.push_str("| NAME | count |\n");
        report.push_str("|------|-------|\n");
        for (name, count) in &self.station_counts {
            report.push_str(&format!(
                "| {} | {} |\n",
                name.as_deref().unwrap_or(""),
                count
            ));
        }

        report
    }
}

/// Read-only summary pass over the store, run once after loading finishes.
pub struct SummaryAnalyzer;

impl SummaryAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Compute the summary from an open store connection.
    pub fn analyze(&self, conn: &Connection) -> Result<PipelineSummary> {
        // SQL AVG skips NULLs, which is exactly the absent-reading contract.
        let (total_records, avg_temp_c) = conn.query_row(
            "SELECT COUNT(*), AVG(temp_c) FROM hourly_weather",
            [],
            |row| {
                Ok((
                    row.get::<_, i64>(0)? as u64,
                    row.get::<_, Option<f64>>(1)?,
                ))
            },
        )?;

        let mut stmt =
            conn.prepare("SELECT NAME, COUNT(*) FROM hourly_weather GROUP BY NAME ORDER BY NAME")?;
        let station_counts = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, i64>(1)? as u64,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(PipelineSummary {
            total_records,
            avg_temp_c,
            station_counts,
        })
    }

    /// Open an existing store, compute the summary, and write the report.
    pub fn report_from_store(&self, db_path: &Path, report_path: &Path) -> Result<PipelineSummary> {
        let conn = Connection::open(db_path)?;
        let summary = self.analyze(&conn)?;
        fs::write(report_path, summary.render())?;

        Ok(summary)
    }
}

impl Default for SummaryAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CleanRecord;
    use crate::writers::SqliteLoader;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn record(station: &str, name: Option<&str>, temp_c: Option<f64>) -> CleanRecord {
        CleanRecord {
            station: station.to_string(),
            date: NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            name: name.map(str::to_string),
            temp_c,
            dew_point_c: None,
            temp_f: temp_c.map(|c| c * 9.0 / 5.0 + 32.0),
        }
    }

    #[test]
    fn test_summary_aggregates() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let mut loader = SqliteLoader::open(dir.path().join("weather.db"))?;
        loader.load_batch(&[
            record("001", Some("A"), Some(15.0)),
            record("002", Some("A"), Some(25.0)),
            record("003", Some("B"), None),
        ])?;

        let summary = SummaryAnalyzer::new().analyze(loader.connection())?;

        assert_eq!(summary.total_records, 3);
        // NULL readings are ignored by the mean: (15 + 25) / 2.
        assert_eq!(summary.avg_temp_c, Some(20.0));
        assert_eq!(
            summary.station_counts,
            vec![
                (Some("A".to_string()), 2),
                (Some("B".to_string()), 1),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_report_rendering() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let mut loader = SqliteLoader::open(dir.path().join("weather.db"))?;
        loader.load_batch(&[
            record("001", Some("A"), Some(15.0)),
            record("002", Some("A"), Some(25.0)),
        ])?;

        let summary = SummaryAnalyzer::new().analyze(loader.connection())?;
        let report = summary.render();

        assert!(report.starts_with("# Data Pipeline Report\n"));
        assert!(report.contains("Processed 2 records. Average Temp: 20.00°C"));
        assert!(report.contains("## Station Summary"));
        assert!(report.contains("| A | 2 |"));

        Ok(())
    }

    #[test]
    fn test_empty_store_renders_na_average() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let loader = SqliteLoader::open(dir.path().join("weather.db"))?;

        let summary = SummaryAnalyzer::new().analyze(loader.connection())?;

        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.avg_temp_c, None);
        assert!(summary.render().contains("Average Temp: N/A°C"));

        Ok(())
    }

    #[test]
    fn test_report_from_store_writes_file() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("weather.db");
        let report_path = dir.path().join("report.md");

        {
            let mut loader = SqliteLoader::open(&db_path)?;
            loader.load_batch(&[record("001", Some("A"), Some(10.0))])?;
        }

        let summary = SummaryAnalyzer::new().report_from_store(&db_path, &report_path)?;

        assert_eq!(summary.total_records, 1);
        let written = std::fs::read_to_string(&report_path)?;
        assert!(written.contains("Processed 1 records. Average Temp: 10.00°C"));

        Ok(())
    }
}
