use crate::config::ScanConfig;
use std::path::Path;

/// Decides which directories the walk enters and which files count as
/// scannable sources.
pub struct FileFilter {
    suffixes: Vec<String>,
    max_file_size: Option<u64>,
    exclude_dirs: Vec<String>,
}

impl FileFilter {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            suffixes: config
                .extensions
                .iter()
                .map(|ext| format!(".{}", ext))
                .collect(),
            max_file_size: config.max_file_size,
            exclude_dirs: config.exclude_dirs.clone(),
        }
    }

    /// Suffix match on the file name, case-sensitive, so `index.php` qualifies
    /// and `INDEX.PHP` does not.
    pub fn is_source_file(&self, path: &Path) -> bool {
        match path.file_name().and_then(|s| s.to_str()) {
            Some(filename) => self
                .suffixes
                .iter()
                .any(|suffix| filename.ends_with(suffix.as_str())),
            None => false,
        }
    }

    pub fn should_traverse_directory(&self, path: &Path) -> bool {
        if let Some(dir_name) = path.file_name().and_then(|s| s.to_str()) {
            if self.exclude_dirs.iter().any(|exclude| exclude == dir_name) {
                return false;
            }
        }

        true
    }

    pub fn is_size_allowed(&self, size: u64) -> bool {
        self.max_file_size.map_or(true, |max| size <= max)
    }
}
