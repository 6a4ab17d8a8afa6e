use crate::config::ScanConfig;
use crate::error::{ApiAuditError, Result};
use crate::extractor::endpoint_extractor;
use crate::extractor::record::ExtractionRecord;
use crate::scanner::{SourceFile, SourceScanner};
use log::debug;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// Called once per source file after it has been scanned.
pub type FileObserver<'a> = &'a (dyn Fn(&SourceFile) + Sync);

/// Everything a run produced: the deduplicated records and how many files
/// were looked at.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub records: HashSet<ExtractionRecord>,
    pub files_scanned: usize,
    pub undecodable_files: usize,
    pub elapsed: Duration,
}

impl ScanOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn unique_urls(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.url.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Records in a stable order, for writing and display.
    pub fn sorted_records(&self) -> Vec<&ExtractionRecord> {
        self.records.iter().collect::<BTreeSet<_>>().into_iter().collect()
    }
}

enum FileScan {
    Records(HashSet<ExtractionRecord>),
    Undecodable,
}

/// Enumerates the qualifying files under `root` and scans every one of them.
pub fn run<P: AsRef<Path>>(root: P, config: &ScanConfig) -> Result<ScanOutcome> {
    let sources = SourceScanner::new(config).scan_directory(root)?;
    scan_sources(&sources, None)
}

/// Scans an already enumerated file list and merges the per-file record
/// sets. Only decode failures are absorbed; any other read error ends the
/// run.
pub fn scan_sources(sources: &[SourceFile], observer: Option<FileObserver<'_>>) -> Result<ScanOutcome> {
    let start = Instant::now();
    let mut outcome = ScanOutcome::default();

    for scan in scan_each(sources, observer)? {
        outcome.files_scanned += 1;
        match scan {
            FileScan::Records(records) => outcome.records.extend(records),
            FileScan::Undecodable => outcome.undecodable_files += 1,
        }
    }

    outcome.elapsed = start.elapsed();
    Ok(outcome)
}

#[cfg(not(feature = "parallel"))]
fn scan_each(sources: &[SourceFile], observer: Option<FileObserver<'_>>) -> Result<Vec<FileScan>> {
    let mut scans = Vec::with_capacity(sources.len());

    for source in sources {
        scans.push(scan_file(source)?);
        if let Some(observer) = observer {
            observer(source);
        }
    }

    Ok(scans)
}

#[cfg(feature = "parallel")]
fn scan_each(sources: &[SourceFile], observer: Option<FileObserver<'_>>) -> Result<Vec<FileScan>> {
    use rayon::prelude::*;

    sources
        .par_iter()
        .map(|source| {
            let scan = scan_file(source);
            if let Some(observer) = observer {
                observer(source);
            }
            scan
        })
        .collect()
}

fn scan_file(source: &SourceFile) -> Result<FileScan> {
    let bytes = fs::read(&source.source_path).map_err(|e| ApiAuditError::ReadFailed {
        path: source.display_path(),
        source: e,
    })?;

    let content = match String::from_utf8(bytes) {
        Ok(content) => normalize_newlines(content),
        Err(_) => {
            debug!("Skipping {}: not valid UTF-8", source.display_path());
            return Ok(FileScan::Undecodable);
        }
    };

    let records = endpoint_extractor::extract(&content, &source.display_path());
    if !records.is_empty() {
        debug!("{}: {} record(s)", source.display_path(), records.len());
    }

    Ok(FileScan::Records(records))
}

/// Folds `\r\n` and lone `\r` into `\n`, so multi-line captures read the
/// same whatever line endings the file was saved with.
fn normalize_newlines(content: String) -> String {
    if !content.contains('\r') {
        return content;
    }

    content.replace("\r\n", "\n").replace('\r', "\n")
}
