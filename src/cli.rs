use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "apiaudit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find API endpoint URLs with their request headers and bodies in source trees")]
#[command(
    long_about = "ApiAudit walks a directory tree, matches URLs whose host starts with `api.` \
                  in every source file, and records the request headers and bodies found in \
                  the same file into a CSV report."
)]
#[command(after_help = "EXAMPLES:\n  \
    apiaudit\n  \
    apiaudit ./wp-content/plugins --exclude vendor,node_modules\n  \
    apiaudit src --output audit.csv --extensions php,inc\n  \
    apiaudit . --output-format json --quiet")]
pub struct Cli {
    /// Directory to scan
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Report file path (defaults to a timestamped file in the reports directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for timestamped reports
    #[arg(short, long)]
    pub reports_dir: Option<PathBuf>,

    /// File extensions to scan (comma-separated)
    #[arg(short, long, help = "File extensions to scan (e.g., php,inc)")]
    pub extensions: Option<String>,

    /// Directory names to skip while walking
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Maximum file size in MB
    #[arg(long, help = "Skip files larger than this (in MB)")]
    pub max_size: Option<u64>,

    /// Maximum directory depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Follow symbolic links while walking
    #[arg(long)]
    pub follow_links: bool,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for console messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show what would be scanned without writing a report
    #[arg(long)]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let max_file_size = self.max_size.map(|size| size * 1024 * 1024);

        CliOverrides::new()
            .with_extensions(self.extensions.clone())
            .with_exclude(self.exclude.clone())
            .with_max_file_size(max_file_size)
            .with_max_depth(self.max_depth)
            .with_follow_links(self.follow_links)
            .with_reports_dir(self.reports_dir.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["apiaudit"]).unwrap();
        assert_eq!(cli.directory, PathBuf::from("."));
        assert!(cli.output.is_none());
        assert!(!cli.dry_run);
        assert!(matches!(cli.output_format, OutputFormat::Human));
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from([
            "apiaudit",
            "src",
            "-o",
            "out.csv",
            "-x",
            "vendor,node_modules",
            "--extensions",
            "php,inc",
            "--max-size",
            "2",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.directory, PathBuf::from("src"));
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
        assert_eq!(
            cli.exclude,
            Some(vec!["vendor".to_string(), "node_modules".to_string()])
        );
        assert_eq!(cli.verbosity_level(), 2);

        let overrides = cli.create_cli_overrides();
        assert_eq!(overrides.max_file_size, Some(2 * 1024 * 1024));
        assert_eq!(overrides.extensions.as_deref(), Some("php,inc"));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["apiaudit", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let cli = Cli::try_parse_from(["apiaudit", "--extensions", "inc", "--max-depth", "3"]).unwrap();
        let config = cli.load_config().unwrap();

        assert_eq!(config.scan.extensions, vec!["inc"]);
        assert_eq!(config.scan.max_depth, Some(3));
    }
}
