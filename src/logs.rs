//! Leveled pipeline logging.
//!
//! This module provides a global sink for pipeline progress messages.
//! Entries always print to stdout; callers (tests, embedders) can enable
//! capture to inspect what a pipeline run reported.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Log level for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Optional indentation level (for nested logs)
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }
}

/// Global log sink
pub static LOG_SINK: Lazy<LogSink> = Lazy::new(LogSink::new);

/// Collects log entries and mirrors them to stdout.
pub struct LogSink {
    captured: Mutex<Option<Vec<LogEntry>>>,
}

impl LogSink {
    pub fn new() -> Self {
        Self { captured: Mutex::new(None) }
    }

    /// Record a log entry
    pub fn log(&self, entry: LogEntry) {
        let prefix = match entry.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        let indent = "   ".repeat(entry.indent as usize);
        println!("{}{} {}", indent, prefix, entry.message);

        if let Ok(mut captured) = self.captured.lock() {
            if let Some(entries) = captured.as_mut() {
                entries.push(entry);
            }
        }
    }

    /// Enable or disable capture. Enabling clears previously captured entries.
    pub fn set_capture(&self, enabled: bool) {
        if let Ok(mut captured) = self.captured.lock() {
            *captured = if enabled { Some(Vec::new()) } else { None };
        }
    }

    /// Take all captured entries, leaving capture enabled.
    pub fn drain(&self) -> Vec<LogEntry> {
        match self.captured.lock() {
            Ok(mut captured) => match captured.as_mut() {
                Some(entries) => std::mem::take(entries),
                None => Vec::new(),
            },
            Err(_) => Vec::new(),
        }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LOG_SINK.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOG_SINK.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOG_SINK.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOG_SINK.log(LogEntry::error(msg));
}
