use crate::config::ScanConfig;
use crate::error::{ApiAuditError, Result};
use crate::scanner::file_filter::FileFilter;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as reached from the scan root, e.g. `./lib/client.php`.
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
    pub size: u64,
}

impl SourceFile {
    pub fn new(source_path: PathBuf, relative_path: PathBuf, size: u64) -> Self {
        Self {
            source_path,
            relative_path,
            size,
        }
    }

    pub fn display_path(&self) -> String {
        self.source_path.display().to_string()
    }
}

pub struct SourceScanner {
    filter: FileFilter,
    max_depth: Option<usize>,
    follow_links: bool,
}

impl SourceScanner {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
            max_depth: config.max_depth,
            follow_links: config.follow_links,
        }
    }

    /// Enumerates every qualifying source file below `root`. An empty result
    /// is not an error; a missing root is.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<SourceFile>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(ApiAuditError::InvalidPath {
                path: format!("{} does not exist", root_path.display()),
            });
        }

        if !root_path.is_dir() {
            return Err(ApiAuditError::InvalidPath {
                path: format!("{} is not a directory", root_path.display()),
            });
        }

        let mut sources = Vec::new();
        let mut scan_errors = Vec::new();

        let mut walker = WalkDir::new(root_path).follow_links(self.follow_links);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let entries = walker
            .into_iter()
            .filter_entry(|e| self.should_traverse(e));

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    if err
                        .io_error()
                        .is_some_and(|e| e.kind() == std::io::ErrorKind::PermissionDenied)
                    {
                        warn!("Permission denied while walking: {}", err);
                        scan_errors.push(format!("Permission denied: {}", err));
                    } else {
                        warn!("Walk error: {}", err);
                        scan_errors.push(format!("Scan error: {}", err));
                    }
                    continue;
                }
            };

            if is_file_entry(&entry) {
                match self.process_file(&entry, root_path) {
                    Ok(Some(source)) => sources.push(source),
                    Ok(None) => {}
                    Err(err) => {
                        warn!("Skipping {}: {}", entry.path().display(), err);
                        scan_errors.push(format!(
                            "Error processing {}: {}",
                            entry.path().display(),
                            err
                        ));
                    }
                }
            }
        }

        if !scan_errors.is_empty() && sources.is_empty() {
            return Err(ApiAuditError::Permission {
                path: format!("Multiple scan errors: {}", scan_errors.join(", ")),
            });
        }

        // Stable order keeps progress output and logs reproducible
        sources.sort_by(|a, b| a.source_path.cmp(&b.source_path));

        debug!(
            "Enumerated {} source file(s) under {}",
            sources.len(),
            root_path.display()
        );

        Ok(sources)
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }

        self.filter.should_traverse_directory(entry.path())
    }

    fn process_file(&self, entry: &DirEntry, root_path: &Path) -> Result<Option<SourceFile>> {
        let path = entry.path();

        if !self.filter.is_source_file(path) {
            return Ok(None);
        }

        // Symlinks are sized by their target, which is what gets read.
        let metadata = if entry.path_is_symlink() {
            fs::metadata(path)?
        } else {
            entry.metadata().map_err(|e| ApiAuditError::Io(e.into()))?
        };

        if !self.filter.is_size_allowed(metadata.len()) {
            debug!(
                "Skipping {} ({} exceeds size limit)",
                path.display(),
                format_bytes(metadata.len())
            );
            return Ok(None);
        }

        let relative_path = path
            .strip_prefix(root_path)
            .map(Path::to_path_buf)
            .map_err(|_| ApiAuditError::InvalidPath {
                path: format!(
                    "Cannot calculate relative path for {} from root {}",
                    path.display(),
                    root_path.display()
                ),
            })?;

        Ok(Some(SourceFile::new(
            path.to_path_buf(),
            relative_path,
            metadata.len(),
        )))
    }

    pub fn get_statistics(&self, sources: &[SourceFile]) -> ScanStatistics {
        let total_size = sources.iter().map(|s| s.size).sum();

        let (largest_file_size, largest_file_path) = sources
            .iter()
            .max_by_key(|s| s.size)
            .map(|s| (s.size, s.relative_path.clone()))
            .unwrap_or((0, PathBuf::new()));

        ScanStatistics {
            total_files: sources.len(),
            total_size,
            largest_file_size,
            largest_file_path,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub total_size: u64,
    pub largest_file_size: u64,
    pub largest_file_path: PathBuf,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Source files: {} ({})",
            self.total_files,
            format_bytes(self.total_size)
        );

        if self.largest_file_size > 0 {
            summary.push_str(&format!(
                ", largest {} ({})",
                self.largest_file_path.display(),
                format_bytes(self.largest_file_size)
            ));
        }

        summary
    }
}

/// Regular files, plus symlinks that resolve to one. Dangling links and
/// links to directories are left out.
fn is_file_entry(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }

    file_type.is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_file())
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
