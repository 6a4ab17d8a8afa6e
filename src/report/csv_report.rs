use crate::config::ReportConfig;
use crate::error::{ApiAuditError, Result};
use crate::extractor::ExtractionRecord;
use chrono::{DateTime, Local};
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

pub const REPORT_COLUMNS: [&str; 4] = ["File Path", "API URL", "Request Headers", "Request Body"];

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes extraction records as CSV, either to an explicit path or to a
/// timestamped file inside the reports directory.
pub struct ReportWriter {
    reports_dir: PathBuf,
    filename_prefix: String,
}

impl ReportWriter {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            reports_dir: config.directory.clone(),
            filename_prefix: config.filename_prefix.clone(),
        }
    }

    /// `<prefix>_<YYYYMMDD_HHMMSS>.csv`, with `_<n>` before the extension for
    /// the n-th collision inside the same second.
    pub fn timestamped_name(&self, at: DateTime<Local>, attempt: usize) -> String {
        let stamp = at.format(TIMESTAMP_FORMAT);
        if attempt == 0 {
            format!("{}_{}.csv", self.filename_prefix, stamp)
        } else {
            format!("{}_{}_{}.csv", self.filename_prefix, stamp, attempt)
        }
    }

    /// Writes `records` and returns where they went. With no destination the
    /// file is created next to earlier reports without ever replacing one;
    /// an explicit destination is overwritten.
    pub fn write(&self, records: &[&ExtractionRecord], destination: Option<&Path>) -> Result<PathBuf> {
        let (path, file) = match destination {
            Some(path) => (path.to_path_buf(), self.create_explicit(path)?),
            None => self.create_timestamped(Local::now())?,
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        let report_error = |source: csv::Error| ApiAuditError::ReportWrite {
            path: path.display().to_string(),
            source,
        };

        writer.write_record(REPORT_COLUMNS).map_err(report_error)?;
        for record in records {
            writer.serialize(record).map_err(report_error)?;
        }
        writer
            .flush()
            .map_err(|e| report_error(csv::Error::from(e)))?;

        info!("Wrote {} row(s) to {}", records.len(), path.display());
        Ok(path)
    }

    fn create_explicit(&self, path: &Path) -> Result<File> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_report_error(parent, e))?;
        }

        File::create(path).map_err(|e| io_report_error(path, e))
    }

    fn create_timestamped(&self, at: DateTime<Local>) -> Result<(PathBuf, File)> {
        fs::create_dir_all(&self.reports_dir).map_err(|e| io_report_error(&self.reports_dir, e))?;

        let mut attempt = 0;
        loop {
            let candidate = self.reports_dir.join(self.timestamped_name(at, attempt));
            match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                Ok(file) => return Ok((candidate, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!("{} exists, trying next name", candidate.display());
                    attempt += 1;
                }
                Err(e) => return Err(io_report_error(&candidate, e)),
            }
        }
    }
}

/// Reads a report written by [`ReportWriter::write`] back into records.
pub fn read_report<P: AsRef<Path>>(path: P) -> Result<Vec<ExtractionRecord>> {
    let path = path.as_ref();
    let to_error = |source: csv::Error| ApiAuditError::ReportWrite {
        path: path.display().to_string(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(to_error)?;
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<ExtractionRecord>, csv::Error>>()
        .map_err(to_error)
}

fn io_report_error(path: &Path, error: io::Error) -> ApiAuditError {
    ApiAuditError::ReportWrite {
        path: path.display().to_string(),
        source: csv::Error::from(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{NO_BODY_FOUND, NO_HEADERS_FOUND};
    use chrono::TimeZone;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn writer_in(dir: &Path) -> ReportWriter {
        ReportWriter::new(&ReportConfig {
            directory: dir.join("reports"),
            filename_prefix: "api_urls_with_headers_and_body".to_string(),
        })
    }

    fn sample_records() -> Vec<ExtractionRecord> {
        vec![
            ExtractionRecord::new(
                "./a.php",
                "https://api.example.com/v1/users",
                NO_HEADERS_FOUND,
                NO_BODY_FOUND,
            ),
            ExtractionRecord::new(
                "./b.php",
                "https://api.example.com/v1/items",
                "'Authorization' => 'Bearer xyz'; 'User-Agent' => \"x, y\"",
                "'{\"a\":1}'",
            ),
            ExtractionRecord::new(
                "./c.php",
                "https://api.other.io",
                "wp_remote_post($u, [\n 'headers' => ['A' => 'b']",
                "[\n 1,\n 2\n]",
            ),
        ]
    }

    #[test]
    fn test_timestamped_name_format() {
        let writer = ReportWriter::new(&ReportConfig::default());
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();

        assert_eq!(
            writer.timestamped_name(at, 0),
            "api_urls_with_headers_and_body_20240309_070501.csv"
        );
        assert_eq!(
            writer.timestamped_name(at, 2),
            "api_urls_with_headers_and_body_20240309_070501_2.csv"
        );
    }

    #[test]
    fn test_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let writer = writer_in(temp_dir.path());
        let records = sample_records();
        let refs: Vec<&ExtractionRecord> = records.iter().collect();

        let path = writer.write(&refs, None).unwrap();
        assert!(path.starts_with(temp_dir.path().join("reports")));

        let read_back = read_report(&path).unwrap();
        assert_eq!(read_back.len(), records.len());

        let written: HashSet<_> = records.into_iter().collect();
        let read: HashSet<_> = read_back.into_iter().collect();
        assert_eq!(written, read);
    }

    #[test]
    fn test_header_row() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("out.csv");

        writer_in(temp_dir.path()).write(&[], Some(&destination)).unwrap();

        let content = fs::read_to_string(&destination).unwrap();
        assert_eq!(content.trim_end(), "File Path,API URL,Request Headers,Request Body");
    }

    #[test]
    fn test_default_names_never_collide() {
        let temp_dir = TempDir::new().unwrap();
        let writer = writer_in(temp_dir.path());
        let records = sample_records();
        let refs: Vec<&ExtractionRecord> = records.iter().collect();

        let first = writer.write(&refs, None).unwrap();
        let second = writer.write(&refs, None).unwrap();
        let third = writer.write(&refs, None).unwrap();

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_ne!(first, third);
        assert!(first.exists() && second.exists() && third.exists());
    }

    #[test]
    fn test_collision_suffix_when_name_taken() {
        let temp_dir = TempDir::new().unwrap();
        let writer = writer_in(temp_dir.path());
        let at = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        fs::create_dir_all(&writer.reports_dir).unwrap();
        fs::write(writer.reports_dir.join(writer.timestamped_name(at, 0)), "taken").unwrap();

        let (path, _file) = writer.create_timestamped(at).unwrap();
        assert_eq!(path, writer.reports_dir.join(writer.timestamped_name(at, 1)));
    }

    #[test]
    fn test_explicit_destination_creates_parents_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("deep").join("dir").join("r.csv");
        fs::create_dir_all(destination.parent().unwrap()).unwrap();
        fs::write(&destination, "stale").unwrap();

        let records = sample_records();
        let refs: Vec<&ExtractionRecord> = records.iter().take(1).collect();
        let path = writer_in(temp_dir.path()).write(&refs, Some(&destination)).unwrap();

        assert_eq!(path, destination);
        assert_eq!(read_report(&destination).unwrap().len(), 1);
    }

    #[test]
    fn test_unwritable_destination_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").unwrap();

        let result = writer_in(temp_dir.path()).write(&[], Some(&blocker.join("r.csv")));
        assert!(matches!(result, Err(ApiAuditError::ReportWrite { .. })));
    }
}
