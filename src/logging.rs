use colored::Colorize;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;

/// A logger that writes diagnostics to stderr, tagged with a coloured level
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> Self {
        StderrLogger { level }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("{} {}", level_tag(record.level()), record.args());
    }

    fn flush(&self) {
        std::io::stderr().flush().ok();
    }
}

fn level_tag(level: Level) -> String {
    match level {
        Level::Error => "error:".red().bold().to_string(),
        Level::Warn => "warning:".yellow().bold().to_string(),
        Level::Info => "info:".green().to_string(),
        Level::Debug | Level::Trace => "debug:".dimmed().to_string(),
    }
}

/// Level filter for the command line's verbosity
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the stderr logger. A logger that is already installed is kept.
pub fn init(verbose: bool) {
    let level = level_for(verbose);
    if log::set_logger(Box::leak(Box::new(StderrLogger::new(level)))).is_ok() {
        log::set_max_level(level);
    }
}
