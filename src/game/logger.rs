//! Scoreboard event logger
//!
//! Every engine transition is reported here at a verbosity level. Output
//! goes to stdout, or to an in-memory buffer that tests inspect.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// How much the scoreboard reports
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VerbosityLevel {
    /// Silent - no output
    Silent = 0,
    /// Minimal - round changes and the winner
    Minimal = 1,
    /// Normal - every award and timer event (default)
    #[default]
    Normal = 2,
    /// Verbose - selections, theme changes and rejected operations
    Verbose = 3,
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
}

/// A captured log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Verbosity level of this log entry
    pub level: VerbosityLevel,
    /// Log message
    pub message: String,
    /// Optional category (e.g., "award", "round", "timer")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Guard type that provides read-only access to log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Centralized logger for scoreboard events
///
/// Logging methods take `&self` so read-only code paths can report too;
/// the capture buffer uses interior mutability.
pub struct ScoreLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,

    /// Captured log entries
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl ScoreLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    /// Create a logger with specified verbosity
    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        ScoreLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Capture to the in-memory buffer only
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        self.output_mode == OutputMode::Memory
    }

    /// Set output format (Text or JSON)
    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Get access to captured log entries
    ///
    /// Returns a guard that derefs to `[LogEntry]`.
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    /// Captured entries of one category
    pub fn logs_in(&self, category: &str) -> Vec<LogEntry> {
        self.log_buffer
            .borrow()
            .iter()
            .filter(|e| e.category.as_deref() == Some(category))
            .cloned()
            .collect()
    }

    fn log_to_stdout(&self, entry: &LogEntry) {
        match self.output_format {
            OutputFormat::Text => {
                if entry.level == VerbosityLevel::Minimal {
                    println!("{}", entry.message);
                } else {
                    println!("  {}", entry.message);
                }
            }
            OutputFormat::Json => match serde_json::to_string(entry) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("failed to encode log entry: {e}"),
            },
        }
    }

    fn log(&self, level: VerbosityLevel, category: Option<&str>, message: &str) {
        let should_capture = self.is_capturing();
        let should_output = self.output_mode == OutputMode::Stdout && level <= self.verbosity;

        // Early exit if message won't be used
        if level == VerbosityLevel::Silent || (!should_capture && !should_output) {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            category: category.map(str::to_string),
        };

        if should_output {
            self.log_to_stdout(&entry);
        }
        if should_capture {
            self.log_buffer.borrow_mut().push(entry);
        }
    }

    /// Log at Verbose level
    #[inline]
    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, None, message);
    }

    /// Log a categorized scoreboard event
    #[inline]
    pub fn event(&self, level: VerbosityLevel, category: &str, message: &str) {
        self.log(level, Some(category), message);
    }
}

impl Default for ScoreLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScoreLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

/// Clones settings only; the capture buffer starts empty
impl Clone for ScoreLogger {
    fn clone(&self) -> Self {
        ScoreLogger {
            verbosity: self.verbosity,
            output_format: self.output_format,
            output_mode: self.output_mode,
            log_buffer: RefCell::new(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = ScoreLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_log_capture() {
        let mut logger = ScoreLogger::new();
        logger.enable_capture();

        logger.verbose("test message");
        logger.event(VerbosityLevel::Minimal, "round", "minimal message");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "test message");
        assert_eq!(logs[0].category, None);
        assert_eq!(logs[1].level, VerbosityLevel::Minimal);
    }

    #[test]
    fn test_capture_ignores_verbosity() {
        let mut logger = ScoreLogger::with_verbosity(VerbosityLevel::Minimal);
        logger.enable_capture();

        logger.verbose("detail");
        assert_eq!(logger.logs().len(), 1);
        assert_eq!(logger.logs()[0].level, VerbosityLevel::Verbose);
    }

    #[test]
    fn test_categories() {
        let mut logger = ScoreLogger::new();
        logger.enable_capture();

        logger.event(VerbosityLevel::Normal, "award", "Quiz Masters +100");
        logger.event(VerbosityLevel::Minimal, "round", "Finals!");
        logger.event(VerbosityLevel::Normal, "award", "Brain Busters +50");

        let awards = logger.logs_in("award");
        assert_eq!(awards.len(), 2);
        assert_eq!(awards[1].message, "Brain Busters +50");
        assert_eq!(logger.logs_in("timer").len(), 0);
    }

    #[test]
    fn test_stdout_mode_does_not_capture() {
        let logger = ScoreLogger::with_verbosity(VerbosityLevel::Silent);
        logger.verbose("dropped");
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = LogEntry {
            level: VerbosityLevel::Normal,
            message: "hello".to_string(),
            category: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"level":"normal","message":"hello"}"#);
    }

    #[test]
    fn test_clone_keeps_settings_only() {
        let mut logger = ScoreLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();
        logger.verbose("one");

        let cloned = logger.clone();
        assert_eq!(cloned.verbosity(), VerbosityLevel::Verbose);
        assert!(cloned.is_capturing());
        assert!(cloned.logs().is_empty());
    }
}
