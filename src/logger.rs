//! Custom logging module.
//!
//! This module provides a custom logger implementation that captures log entries
//! and forwards them to the application state for display in the UI.

use crate::error::{AppError, AppResult};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {:<5} {}", timestamp, level_str, record.args())
}

type LogCallback = Box<dyn Fn(String) + Send + Sync>;

/// Custom logger that captures logs to state
///
pub struct CustomLogger {
    level: LevelFilter,
    log_callback: Mutex<Option<LogCallback>>,
}

impl CustomLogger {
    pub fn new(level: LevelFilter) -> Self {
        CustomLogger {
            level,
            log_callback: Mutex::new(None),
        }
    }

    pub fn set_log_callback(&self, callback: LogCallback) {
        if let Ok(mut guard) = self.log_callback.lock() {
            *guard = Some(callback);
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Dependencies only get through at info and above.
        metadata.level() <= self.level
            && (metadata.level() <= Level::Info || metadata.target().starts_with(env!("CARGO_CRATE_NAME")))
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(callback) = self.log_callback.lock() {
                if let Some(ref cb) = *callback {
                    cb(format_log(record));
                }
            }
        }
    }

    fn flush(&self) {}
}

/// Install the logger globally at the given level.
///
pub fn init(level: LevelFilter) -> AppResult<&'static CustomLogger> {
    let logger: &'static CustomLogger = Box::leak(Box::new(CustomLogger::new(level)));
    log::set_logger(logger).map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{mpsc, Arc};

    fn record<'a>(level: Level, target: &'a str, args: std::fmt::Arguments<'a>) -> Record<'a> {
        Record::builder().level(level).target(target).args(args).build()
    }

    #[test]
    fn test_format_log_contains_level_and_message() {
        let line = format_log(&record(Level::Warn, "schemes_tui", format_args!("Discarding entry")));
        assert!(line.contains("WARN"));
        assert!(line.ends_with("Discarding entry"));
    }

    #[test]
    fn test_level_filter() {
        let logger = CustomLogger::new(LevelFilter::Info);
        let info = Metadata::builder().level(Level::Info).target("schemes_tui").build();
        let debug = Metadata::builder().level(Level::Debug).target("schemes_tui").build();
        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }

    #[test]
    fn test_dependency_debug_is_filtered() {
        let logger = CustomLogger::new(LevelFilter::Trace);
        let ours = Metadata::builder().level(Level::Debug).target("schemes_tui::api").build();
        let theirs = Metadata::builder().level(Level::Debug).target("hyper::proto").build();
        assert!(logger.enabled(&ours));
        assert!(!logger.enabled(&theirs));
    }

    #[test]
    fn test_callback_receives_lines() {
        let logger = CustomLogger::new(LevelFilter::Debug);
        let (tx, rx) = mpsc::channel::<String>();
        let tx = Arc::new(Mutex::new(tx));
        logger.set_log_callback(Box::new(move |line| {
            if let Ok(tx) = tx.lock() {
                let _ = tx.send(line);
            }
        }));
        logger.log(&record(Level::Error, "schemes_tui", format_args!("Fetching schemes failed")));
        let line = rx.try_recv().unwrap();
        assert!(line.contains("ERROR"));
        assert!(line.contains("Fetching schemes failed"));
    }
}
