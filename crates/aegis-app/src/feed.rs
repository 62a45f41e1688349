//! Rendered audit feed.
//!
//! The [`Feed`] turns audit responses into [`LogEntry`] values and keeps them
//! newest first. Entries are never removed or reordered once inserted, and
//! identical responses produce distinct entries.

use std::collections::VecDeque;

use aegis_proto::AuditResponse;
use chrono::{DateTime, Local};

use crate::severity::{self, Severity};

/// Time format used for entry labels.
const TIME_LABEL_FORMAT: &str = "%H:%M:%S";

/// A rendered feed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Wall-clock time the entry was rendered.
    pub timestamp: DateTime<Local>,
    /// Audit text.
    pub message: String,
    /// Thought signature annotation. `None` if the event had none.
    pub thought: Option<String>,
    /// Classified severity.
    pub severity: Severity,
}

impl LogEntry {
    /// Local time of day, `HH:MM:SS`.
    pub fn time_label(&self) -> String {
        self.timestamp.format(TIME_LABEL_FORMAT).to_string()
    }

    /// Annotation line shown under the message. `None` without a signature.
    pub fn thought_label(&self) -> Option<String> {
        self.thought.as_ref().map(|sig| format!("Thought Sig: {sig}"))
    }

    /// Entry is drawn with the warning style.
    pub fn is_high_severity(&self) -> bool {
        self.severity == Severity::High
    }
}

/// Newest-first list of log entries.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    entries: VecDeque<LogEntry>,
}

impl Feed {
    /// Create an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render an audit response at `now` and insert it at the front.
    pub fn render(&mut self, response: AuditResponse, now: DateTime<Local>) -> LogEntry {
        let severity = severity::classify(&response.message);
        let entry = LogEntry {
            timestamp: now,
            message: response.message,
            thought: response.thought_signature.filter(|sig| !sig.is_empty()),
            severity,
        };
        self.entries.push_front(entry.clone());
        entry
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Most recent entry. `None` if the feed is empty.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Feed has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
