//! Severity classification.
//!
//! A text heuristic over the audit message. Case-sensitive substring matching
//! only, so benign text such as "High-priority task completed" is flagged.

/// Substrings that mark an entry as high severity.
pub const HIGH_SEVERITY_MARKERS: [&str; 2] = ["violation", "High"];

/// Visual severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Regular entry.
    #[default]
    Normal,
    /// Entry mentions a violation or a high rating.
    High,
}

/// Classify an audit message.
pub fn classify(message: &str) -> Severity {
    if HIGH_SEVERITY_MARKERS.iter().any(|marker| message.contains(marker)) {
        Severity::High
    } else {
        Severity::Normal
    }
}
