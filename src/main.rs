use apiaudit::{logging, ApiAudit, ApiAuditError, Cli, OutputFormatter, OutputMode, UserFriendlyError};
use clap::Parser;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    logging::init_logger(cli.verbosity_level(), cli.quiet);

    let apiaudit = match ApiAudit::from_cli(&cli) {
        Ok(apiaudit) => apiaudit,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        return handle_dry_run(&cli, &apiaudit);
    }

    match apiaudit.audit(&cli.directory, cli.output.as_deref()) {
        Ok(report) => match report.write_error {
            Some(ref e) => exit_code_for(e),
            None => 0,
        },
        Err(e) => {
            apiaudit.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &ApiAuditError) -> i32 {
    match error {
        ApiAuditError::InvalidPath { .. } => 2,
        ApiAuditError::Config { .. } => 3,
        ApiAuditError::ReportWrite { .. } => 4,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "apiaudit.toml".to_string());

    match ApiAudit::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  apiaudit <directory> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(cli: &Cli, apiaudit: &ApiAudit) -> i32 {
    let formatter = apiaudit.output_formatter();

    formatter.notice("DRY RUN MODE - No report will be written");
    formatter.print_separator();

    let config = apiaudit.config();
    formatter.notice("Configuration that would be used:");
    println!("  Directory: {}", cli.directory.display());
    println!("  Extensions: {}", config.scan.extensions.join(", "));
    println!("  Exclude directories: {}", config.scan.exclude_dirs.join(", "));
    if let Some(max_size) = config.scan.max_file_size {
        println!("  Max file size: {} bytes", max_size);
    }
    if let Some(max_depth) = config.scan.max_depth {
        println!("  Max depth: {}", max_depth);
    }
    match cli.output {
        Some(ref output) => println!("  Report: {}", output.display()),
        None => println!(
            "  Report: {}/{}_<timestamp>.csv",
            config.report.directory.display(),
            config.report.filename_prefix
        ),
    }

    formatter.print_separator();

    match apiaudit.enumerate(&cli.directory) {
        Ok(sources) if sources.is_empty() => {
            formatter.warning(&format!(
                "No files with extension(s) {} under {}",
                config.scan.extensions.join(", "),
                cli.directory.display()
            ));
            0
        }
        Ok(sources) => {
            formatter.success(&format!("{} files would be scanned", sources.len()));
            0
        }
        Err(e) => {
            apiaudit.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn print_startup_error(error: &ApiAuditError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
