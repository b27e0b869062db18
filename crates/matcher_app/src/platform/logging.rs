//! Logger setup for the headless driver.
//!
//! Terminal output is reserved for the page itself, so logs go to a file
//! unless `verbose` asks for them on the terminal too.

use std::path::PathBuf;

use log::LevelFilter;
use matcher_logging::LogDestination;

pub const DEFAULT_LOG_FILE: &str = "./matcher.log";

pub fn initialize(verbose: bool, log_file: Option<PathBuf>) {
    let path = log_file.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let (destination, level) = if verbose {
        (LogDestination::Both(path), LevelFilter::Debug)
    } else {
        (LogDestination::File(path), LevelFilter::Info)
    };
    matcher_logging::initialize(destination, level);
}
