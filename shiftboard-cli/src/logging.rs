//! Logger setup

use std::fs;
use std::fs::File;

use simplelog::ColorChoice;
use simplelog::CombinedLogger;
use simplelog::Config;
use simplelog::ConfigBuilder;
use simplelog::LevelFilter;
use simplelog::SharedLogger;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::WriteLogger;

use crate::paths;

/// Starts logging to stderr and to `latest.log` in the cache directory.
///
/// Stderr only shows warnings unless `verbose` is set; the file always gets
/// debug output from this project's crates.
pub fn init(verbose: bool) {
    paths::rotate_logs();

    let term_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = paths::log_file() {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match File::create(&path) {
            Ok(file) => {
                let config = ConfigBuilder::new()
                    .add_filter_allow_str("shiftboard")
                    .build();
                loggers.push(WriteLogger::new(LevelFilter::Debug, config, file));
            }
            Err(e) => eprintln!("Warning: cannot write log file {}: {}", path.display(), e),
        }
    }

    let _ = CombinedLogger::init(loggers);
}
