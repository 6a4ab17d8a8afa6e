pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod report;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ReportConfig, ScanConfig};
pub use error::{ApiAuditError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{extract, run, scan_sources, ExtractionRecord, ScanOutcome};
pub use report::{read_report, ReportWriter, RunSummary};
pub use scanner::{FileFilter, SourceFile, SourceScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Main library interface: scan a tree, write the report, summarize.
pub struct ApiAudit {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

/// Result of a complete audit. A failed report write is kept here rather
/// than returned as an error, since the scan itself succeeded.
#[derive(Debug)]
pub struct AuditReport {
    pub outcome: ScanOutcome,
    pub summary: RunSummary,
    pub report_path: Option<PathBuf>,
    pub write_error: Option<ApiAuditError>,
}

impl ApiAudit {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create an ApiAudit instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbose, cli_args.quiet))
    }

    /// Scan `root`, write the report when anything was found, and print the
    /// run summary.
    pub fn audit(&self, root: &Path, destination: Option<&Path>) -> Result<AuditReport> {
        let start_time = Instant::now();

        self.output_formatter.start_operation("Starting scan...");
        logging::log_config_info(&self.config);

        let outcome = self.scan(root)?;

        let mut report_path = None;
        let mut write_error = None;

        if outcome.is_empty() {
            self.output_formatter
                .notice("No API URLs, headers, or body data found.");
        } else {
            match self.write_report(&outcome, destination) {
                Ok(path) => {
                    self.output_formatter
                        .success(&format!("Data successfully saved to {}", path.display()));
                    report_path = Some(path);
                }
                Err(e) => {
                    log::error!("Report write failed: {}", e);
                    self.handle_error(&e);
                    write_error = Some(e);
                }
            }
        }

        let summary = RunSummary::new(&outcome, start_time.elapsed(), report_path.clone());
        self.output_formatter.print_run_summary(&summary);

        Ok(AuditReport {
            outcome,
            summary,
            report_path,
            write_error,
        })
    }

    /// Enumerate and scan every qualifying file with a progress bar.
    pub fn scan(&self, root: &Path) -> Result<ScanOutcome> {
        let sources = self.enumerate(root)?;

        self.output_formatter
            .info(&format!("Found {} source files", sources.len()));

        let file_progress = self.progress_manager.create_file_progress(sources.len() as u64);
        let observer = |source: &SourceFile| ui::progress::record_file_scanned(&file_progress, source);

        let outcome = match scan_sources(&sources, Some(&observer)) {
            Ok(outcome) => outcome,
            Err(e) => {
                file_progress.abandon();
                return Err(e);
            }
        };

        ui::progress::finish_progress_with_summary(
            &file_progress,
            &format!("Scanned {} files", outcome.files_scanned),
            outcome.elapsed,
        );

        Ok(outcome)
    }

    /// The qualifying files under `root`, without reading them.
    pub fn enumerate(&self, root: &Path) -> Result<Vec<SourceFile>> {
        let scanner = SourceScanner::new(&self.config.scan);
        let sources = scanner.scan_directory(root)?;

        let stats = scanner.get_statistics(&sources);
        self.output_formatter.debug(&stats.display_summary());

        Ok(sources)
    }

    pub fn write_report(&self, outcome: &ScanOutcome, destination: Option<&Path>) -> Result<PathBuf> {
        let writer = ReportWriter::new(&self.config.report);
        writer.write(&outcome.sorted_records(), destination)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &ApiAuditError) {
        self.progress_manager
            .suspend(|| self.output_formatter.print_user_friendly_error(error));
    }
}
