use crate::error::{ApiAuditError, UserFriendlyError};
use crate::report::RunSummary;
use console::{style, Emoji, StyledObject, Term};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

/// Kinds of console line. Each one knows its verbosity gate and stream.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Level {
    Start,
    Success,
    Notice,
    Warning,
    Error,
    Suggestion,
    Info,
    Debug,
}

impl Level {
    fn min_verbosity(self) -> Option<u8> {
        match self {
            // Errors and their suggestions are shown even in quiet mode.
            Level::Error | Level::Suggestion => None,
            Level::Start | Level::Success | Level::Notice | Level::Warning => Some(0),
            Level::Info => Some(1),
            Level::Debug => Some(2),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Level::Error | Level::Suggestion)
    }

    fn tag(self) -> &'static str {
        match self {
            Level::Start => "operation_start",
            Level::Success => "success",
            Level::Notice | Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Suggestion => "suggestion",
            Level::Debug => "debug",
        }
    }

    fn plain_prefix(self) -> &'static str {
        match self {
            Level::Start => "STARTING",
            Level::Success => "SUCCESS",
            Level::Notice | Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Suggestion => "SUGGESTION",
            Level::Debug => "DEBUG",
        }
    }

    fn emoji(self) -> Emoji<'static, 'static> {
        match self {
            Level::Start => Emoji("🔍 ", "> "),
            Level::Success => Emoji("✅ ", "+ "),
            Level::Notice | Level::Info | Level::Suggestion => Emoji("ℹ️  ", "i "),
            Level::Warning => Emoji("⚠️  ", "! "),
            Level::Error => Emoji("❌ ", "x "),
            Level::Debug => Emoji("  ", "  "),
        }
    }

    fn paint(self, message: &str) -> StyledObject<&str> {
        let styled = style(message);
        match self {
            Level::Start => styled.bold(),
            Level::Success => styled.green().bold(),
            Level::Notice | Level::Info | Level::Suggestion => styled.cyan(),
            Level::Warning => styled.yellow().bold(),
            Level::Error => styled.red().bold(),
            Level::Debug => styled.dim(),
        }
    }
}

/// Console writer for run progress, results and errors in human, JSON or
/// plain form.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = mode == OutputMode::Human
            && !quiet
            && Term::stdout().features().colors_supported();

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn start_operation(&self, operation: &str) {
        self.emit(Level::Start, operation);
    }

    pub fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }

    /// Informational lines that belong to the normal run output.
    pub fn notice(&self, message: &str) {
        self.emit(Level::Notice, message);
    }

    pub fn warning(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    pub fn print_user_friendly_error(&self, error: &ApiAuditError) {
        self.error(&error.user_message());
        if let Some(suggestion) = error.suggestion() {
            self.emit(Level::Suggestion, &format!("Suggestion: {}", suggestion));
        }
    }

    /// The end-of-run block: a heading and the four totals, or one JSON
    /// object carrying the same numbers.
    pub fn print_run_summary(&self, summary: &RunSummary) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Json => {
                let mut value = serde_json::to_value(summary).unwrap_or_default();
                if let Some(object) = value.as_object_mut() {
                    object.insert("type".to_string(), serde_json::json!("summary"));
                    object.insert(
                        "timestamp".to_string(),
                        serde_json::json!(chrono::Utc::now().to_rfc3339()),
                    );
                }
                println!(
                    "{}",
                    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
                );
            }
            OutputMode::Human | OutputMode::Plain => {
                println!();
                if self.use_colors {
                    println!("{}", style("--- Scan Summary ---").bold().cyan());
                } else {
                    println!("--- Scan Summary ---");
                }
                for line in summary.lines() {
                    println!("{}", line);
                }
                if summary.undecodable_files > 0 {
                    self.debug(&format!(
                        "{} file(s) skipped as undecodable",
                        summary.undecodable_files
                    ));
                }
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet || self.mode == OutputMode::Json {
            return;
        }

        if self.use_colors {
            println!("{}", style("─".repeat(60)).dim());
        } else {
            println!("{}", "-".repeat(60));
        }
    }

    fn should_show(&self, level: Level) -> bool {
        match level.min_verbosity() {
            None => true,
            Some(min) => !self.quiet && self.verbose_level >= min,
        }
    }

    fn emit(&self, level: Level, message: &str) {
        if !self.should_show(level) {
            return;
        }

        let line = match self.mode {
            OutputMode::Human if self.use_colors => {
                format!("{}{}", level.emoji(), level.paint(message))
            }
            OutputMode::Human => format!("{}{}", level.emoji(), message),
            OutputMode::Plain => format!("{}: {}", level.plain_prefix(), message),
            OutputMode::Json => serde_json::json!({
                "type": "message",
                "level": level.tag(),
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })
            .to_string(),
        };

        if level.to_stderr() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}
