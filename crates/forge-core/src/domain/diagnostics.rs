//! Ordered, leveled diagnostics collected across one build.
//!
//! The orchestrator owns a [`BuildLog`] and appends to it as stages run; the
//! caller inspects it afterwards. Every entry is mirrored to `tracing` so the
//! same messages reach whatever subscriber the binary installed.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => f.write_str("INFO"),
            LogLevel::Warn => f.write_str("WARN"),
            LogLevel::Error => f.write_str("ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub stage: Option<Stage>,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            Some(stage) => write!(f, "[{}] [{}] {}", self.level, stage, self.message),
            None => write!(f, "[{}] {}", self.level, self.message),
        }
    }
}

/// Append-only diagnostic log.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildLog {
    entries: Vec<LogEntry>,
}

impl BuildLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, stage: Option<Stage>, message: impl Into<String>) {
        self.push(LogLevel::Info, stage, message.into());
    }

    pub fn warn(&mut self, stage: Option<Stage>, message: impl Into<String>) {
        self.push(LogLevel::Warn, stage, message.into());
    }

    pub fn error(&mut self, stage: Option<Stage>, message: impl Into<String>) {
        self.push(LogLevel::Error, stage, message.into());
    }

    fn push(&mut self, level: LogLevel, stage: Option<Stage>, message: String) {
        let stage_name = stage.map_or("-", Stage::as_str);
        match level {
            LogLevel::Info => tracing::info!(stage = stage_name, "{message}"),
            LogLevel::Warn => tracing::warn!(stage = stage_name, "{message}"),
            LogLevel::Error => tracing::error!(stage = stage_name, "{message}"),
        }

        self.entries.push(LogEntry {
            timestamp: Utc::now(),
            level,
            stage,
            message,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn errors(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(|e| e.level == LogLevel::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Stage of the first error entry, if the error was stage-specific.
    pub fn failed_stage(&self) -> Option<Stage> {
        self.errors().next().and_then(|e| e.stage)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_insertion_order() {
        let mut log = BuildLog::new();
        log.info(None, "Build called.");
        log.warn(Some(Stage::Parse), "no include");
        log.error(Some(Stage::Configure), "CMake configuration failed.");

        let messages: Vec<&str> = log.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Build called.", "no include", "CMake configuration failed."]
        );
    }

    #[test]
    fn failed_stage_is_first_error() {
        let mut log = BuildLog::new();
        assert_eq!(log.failed_stage(), None);
        assert!(!log.has_errors());

        log.info(Some(Stage::Locate), "ok");
        log.error(Some(Stage::Compile), "Build failed.");
        log.error(Some(Stage::Collect), "later");

        assert!(log.has_errors());
        assert_eq!(log.failed_stage(), Some(Stage::Compile));
        assert_eq!(log.errors().count(), 2);
    }

    #[test]
    fn display_names_level_and_stage() {
        let mut log = BuildLog::new();
        log.error(Some(Stage::Reflect), "TungstenReflect failed.");
        log.info(None, "done");

        assert_eq!(
            log.entries()[0].to_string(),
            "[ERROR] [reflect] TungstenReflect failed."
        );
        assert_eq!(log.entries()[1].to_string(), "[INFO] done");
    }

    #[test]
    fn serializes_as_json() {
        let mut log = BuildLog::new();
        log.warn(Some(Stage::PrepareWorkspace), "overwrote skeleton");
        let json = serde_json::to_value(&log).unwrap();

        assert_eq!(json["entries"][0]["level"], "warn");
        assert_eq!(json["entries"][0]["stage"], "prepare_workspace");
    }
}
