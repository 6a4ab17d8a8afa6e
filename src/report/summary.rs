use crate::extractor::ScanOutcome;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Totals printed at the end of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub records_found: usize,
    pub unique_urls: usize,
    pub undecodable_files: usize,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    pub report_path: Option<PathBuf>,
}

impl RunSummary {
    pub fn new(outcome: &ScanOutcome, elapsed: Duration, report_path: Option<PathBuf>) -> Self {
        Self {
            files_scanned: outcome.files_scanned,
            records_found: outcome.records.len(),
            unique_urls: outcome.unique_urls(),
            undecodable_files: outcome.undecodable_files,
            elapsed,
            report_path,
        }
    }

    pub fn lines(&self) -> [String; 4] {
        [
            format!("Total files scanned: {}", self.files_scanned),
            format!("Total records found: {}", self.records_found),
            format!("Total unique API URLs identified: {}", self.unique_urls),
            format!("Time taken: {:.2} seconds", self.elapsed.as_secs_f64()),
        ]
    }
}

fn serialize_secs<S: serde::Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}
