use crate::config::Config;
use log::{debug, info, LevelFilter};

/// Level for a given `-v` count; `RUST_LOG` still wins when set.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Off
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

pub fn init_logger(verbose: u8, quiet: bool) {
    let level = level_for(verbose, quiet);

    // try_init: a second call (tests, embedding) keeps the first logger
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

pub fn log_config_info(config: &Config) {
    info!(
        "Scan: extensions={}, exclude_dirs=[{}], max_depth={:?}, max_file_size={:?}, follow_links={}",
        config.scan.extensions.join(","),
        config.scan.exclude_dirs.join(","),
        config.scan.max_depth,
        config.scan.max_file_size,
        config.scan.follow_links
    );
    info!(
        "Report: directory={}, prefix={}",
        config.report.directory.display(),
        config.report.filename_prefix
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0, false), LevelFilter::Warn);
        assert_eq!(level_for(1, false), LevelFilter::Info);
        assert_eq!(level_for(3, false), LevelFilter::Debug);
        assert_eq!(level_for(2, true), LevelFilter::Off);
    }

    #[test]
    fn test_init_logger_twice_is_harmless() {
        init_logger(0, true);
        init_logger(2, false);
    }
}
