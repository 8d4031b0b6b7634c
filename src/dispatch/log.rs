//! Bounded, most-recent-first execution log shown by the dashboard.

use chrono::Local;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use tracing::{info, warn};

/// Entries kept before the oldest are dropped.
pub const LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogStatus {
    Launched,
    Error,
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Launched => write!(f, "LAUNCHED"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionLogEntry {
    pub timestamp: String,
    pub tool: String,
    pub status: LogStatus,
    pub message: String,
}

impl fmt::Display for ExecutionLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} — {} — {}",
            self.timestamp, self.tool, self.status, self.message
        )
    }
}

/// Append-only log, newest first, truncated to [`LOG_CAPACITY`].
#[derive(Debug, Default)]
pub struct ExecutionLog {
    entries: VecDeque<ExecutionLogEntry>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tool: &str, status: LogStatus, message: impl Into<String>) {
        let entry = ExecutionLogEntry {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            tool: tool.to_string(),
            status,
            message: message.into(),
        };

        match status {
            LogStatus::Launched => info!("{} launched: {}", entry.tool, entry.message),
            LogStatus::Error => warn!("{} failed: {}", entry.tool, entry.message),
        }

        self.entries.push_front(entry);
        self.entries.truncate(LOG_CAPACITY);
    }

    /// Most recent entries first, at most `limit`.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &ExecutionLogEntry> {
        self.entries.iter().take(limit)
    }

    pub fn latest(&self) -> Option<&ExecutionLogEntry> {
        self.entries.front()
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
