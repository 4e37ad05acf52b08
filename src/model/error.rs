//! Error types for cclog.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level binary error wrapping all failures
//!   - [`InputError`] - Transcript reading failures (file not found, no input, IO)
//!   - [`ConfigError`](crate::config::ConfigError) - Config file failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing setup failures
//! - [`DecodeError`] - One record could not be decoded
//!
//! # Recovery Strategy
//!
//! Decode errors are **non-fatal**: the offending line is dropped, reported as a
//! [`MalformedLine`](crate::model::MalformedLine) and decoding continues with the next
//! line. Input errors are fatal for the whole decode pass and carry no partial result.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error returned from the `cclog` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the transcript.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Failed to load the configuration file.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Failed to install the tracing subscriber.
    #[error("Failed to initialize logging: {0}")]
    Logging(#[from] LoggingError),

    /// The session could not be located from the given arguments.
    #[error("Invalid session address: {0}")]
    InvalidSession(String),

    /// Failed to write the report.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors encountered when reading a transcript from a file or stdin.
///
/// Any of these aborts the whole decode pass. The caller never receives a
/// partially decoded session alongside an `InputError`.
#[derive(Debug, Error)]
pub enum InputError {
    /// The transcript file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use cclog::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// No file was given and stdin is an interactive terminal.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Any other I/O failure while opening or reading the stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single JSONL record could not be decoded.
///
/// Decode errors never carry a line number themselves; the line reader knows the
/// position and wraps the error in a [`MalformedLine`](crate::model::MalformedLine).
///
/// Content-block kinds are a closed protocol, so an unrecognised block `type` is an
/// error here. Tool names are an open set and never produce a `DecodeError`: unknown
/// tools decode to an opaque input instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The line bytes are not valid UTF-8.
    #[error("Line is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
    InvalidUtf8 {
        /// Length of the valid UTF-8 prefix.
        valid_up_to: usize,
    },

    /// The line is not valid JSON, or a top-level field has the wrong type.
    ///
    /// `message` is the `serde_json` error text rather than the error itself so the
    /// type stays `Clone + Eq`.
    #[error("Invalid JSON: {message}")]
    InvalidJson {
        /// Parser error text.
        message: String,
    },

    /// The `timestamp` field is present but is not an RFC 3339 timestamp.
    #[error("Invalid timestamp '{raw}'")]
    InvalidTimestamp {
        /// The timestamp as it appeared in the record.
        raw: String,
    },

    /// `message.content` is neither a string nor an array (or is missing).
    #[error("Unexpected message content: expected string or array, found {found}")]
    UnexpectedContentShape {
        /// JSON kind that was found ("null", "object", "number", ...).
        found: &'static str,
    },

    /// A content block has no string `type` field.
    #[error("Content block {index} has no 'type' field")]
    MissingBlockKind {
        /// Zero-based position of the block within `message.content`.
        index: usize,
    },

    /// A content block's `type` is outside `text`, `tool_use` and `tool_result`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cclog::model::error::DecodeError;
    ///
    /// let err = DecodeError::UnknownBlockKind { index: 1, kind: "unknown_kind".to_string() };
    /// assert!(err.to_string().contains("'unknown_kind'"));
    /// ```
    #[error("Unknown content block type '{kind}' at block {index}")]
    UnknownBlockKind {
        /// Zero-based block position.
        index: usize,
        /// The unrecognised `type` value.
        kind: String,
    },

    /// A content block of a known kind is missing fields or has wrong field types.
    #[error("Invalid '{kind}' block at block {index}: {message}")]
    InvalidBlock {
        /// Zero-based block position.
        index: usize,
        /// The block kind ("text", "tool_use", "tool_result").
        kind: &'static str,
        /// Parser error text.
        message: String,
    },

    /// The input of a known tool does not match that tool's shape.
    #[error("Invalid input for tool '{tool}': {message}")]
    InvalidToolInput {
        /// Tool name taken from the sibling `name` field.
        tool: String,
        /// Parser error text.
        message: String,
    },
}

impl DecodeError {
    /// Build an `InvalidJson` error from a `serde_json` failure.
    pub(crate) fn json(err: &serde_json::Error) -> Self {
        Self::InvalidJson {
            message: err.to_string(),
        }
    }
}
