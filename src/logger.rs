//! Human-readable diagnostics for the compressor.
//!
//! A [`Logger`] is an explicit handle that callers pass down to the code that
//! needs to report progress. Output goes to stderr in the binary; tests build
//! a capturing logger and inspect the recorded lines afterwards.

use crate::constants::{ERROR_PREFIX, VERBOSE_PREFIX, WARNING_PREFIX};
use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Verbose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug)]
enum Sink {
    Stderr,
    Capture(RefCell<Vec<LogRecord>>),
}

#[derive(Debug)]
pub struct Logger {
    threshold: LogLevel,
    sink: Sink,
}

impl Logger {
    pub fn stderr(threshold: LogLevel) -> Self {
        Self {
            threshold,
            sink: Sink::Stderr,
        }
    }

    /// Logger that keeps every record at or below `threshold` in memory.
    pub fn capture(threshold: LogLevel) -> Self {
        Self {
            threshold,
            sink: Sink::Capture(RefCell::new(Vec::new())),
        }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.threshold
    }

    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }

        match &self.sink {
            Sink::Stderr => match level {
                LogLevel::Error => eprintln!("{} {}", ERROR_PREFIX, args),
                LogLevel::Warn => eprintln!("{} {}", WARNING_PREFIX, args),
                LogLevel::Info => eprintln!("{}", args),
                LogLevel::Verbose => eprintln!("{} {}", VERBOSE_PREFIX, args),
            },
            Sink::Capture(records) => records.borrow_mut().push(LogRecord {
                level,
                message: args.to_string(),
            }),
        }
    }

    /// Records collected so far. Always empty for the stderr sink.
    pub fn records(&self) -> Vec<LogRecord> {
        match &self.sink {
            Sink::Stderr => Vec::new(),
            Sink::Capture(records) => records.borrow().clone(),
        }
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.records().iter().filter(|r| r.level == level).count()
    }
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogLevel::Info, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogLevel::Verbose, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogLevel::Warn, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogLevel::Error, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_respects_threshold() {
        let logger = Logger::capture(LogLevel::Warn);
        crate::info!(logger, "hidden {}", 1);
        crate::warn!(logger, "shown {}", 2);
        crate::error!(logger, "also shown");

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "shown 2");
        assert_eq!(logger.count(LogLevel::Warn), 1);
        assert_eq!(logger.count(LogLevel::Error), 1);
    }

    #[test]
    fn test_verbose_threshold_enables_everything() {
        let logger = Logger::capture(LogLevel::Verbose);
        assert!(logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Verbose));
        crate::verbose!(logger, "debug line");
        assert_eq!(logger.count(LogLevel::Verbose), 1);
    }

    #[test]
    fn test_stderr_sink_has_no_records() {
        let logger = Logger::stderr(LogLevel::Error);
        crate::error!(logger, "printed, not kept");
        assert!(logger.records().is_empty());
    }
}
