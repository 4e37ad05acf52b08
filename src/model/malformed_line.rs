//! Diagnostics for transcript lines that could not be decoded.
//!
//! When a JSONL line cannot be decoded into a LogEntry, the decoder drops it and
//! records a MalformedLine so the caller can report it.

use crate::model::DecodeError;
use std::fmt;

/// A JSONL line that was dropped during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    line_number: usize,
    raw_line: String,
    error: DecodeError,
}

impl MalformedLine {
    /// Create a new diagnostic.
    ///
    /// # Arguments
    ///
    /// * `line_number` - The line number in the JSONL file (1-indexed)
    /// * `raw_line` - The raw line content that failed to decode
    /// * `error` - Why decoding failed
    pub fn new(line_number: usize, raw_line: impl Into<String>, error: DecodeError) -> Self {
        Self {
            line_number,
            raw_line: raw_line.into(),
            error,
        }
    }

    /// Get the line number where the error occurred.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Get the raw line content.
    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    pub fn error(&self) -> &DecodeError {
        &self.error
    }
}

impl fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.error)
    }
}
