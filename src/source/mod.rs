//! Transcript input sources.
//!
//! This module reads JSONL transcripts from a file or from piped stdin and
//! decodes them line by line:
//! - [`reader::LineReader`] splits the stream into numbered lines
//! - [`decode_reader`] decodes every line, collecting dropped lines as diagnostics
//! - [`InputSource`] picks the file or stdin variant from the command line

use crate::model::error::InputError;
use crate::model::{DecodeError, LogEntry, MalformedLine, SessionSummary};
use crate::parser::{decode_line, ParseResult};
use std::io::BufRead;
use std::path::PathBuf;
use tracing::{info, warn};

pub mod file;
pub mod reader;
pub mod stdin;

pub use file::decode_file;
pub use reader::{Line, LineReader};
pub use stdin::StdinSource;

/// Result of a best-effort decode pass over one transcript.
///
/// `entries` keep stream order. `diagnostics` hold every line that was
/// dropped, also in stream order.
#[derive(Debug, Clone, Default)]
pub struct DecodedSession {
    pub entries: Vec<LogEntry>,
    pub diagnostics: Vec<MalformedLine>,
}

impl DecodedSession {
    pub fn dropped_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_entries(&self.entries)
    }
}

/// Decode a whole JSONL stream.
///
/// Malformed lines never stop the pass, including lines that are not valid
/// UTF-8: each one is logged at `warn` and kept as a [`MalformedLine`]. An I/O
/// failure on the stream aborts the pass and discards everything decoded so far.
///
/// # Errors
///
/// Returns `InputError::Io` when the stream cannot be read.
pub fn decode_reader<R: BufRead>(reader: R) -> Result<DecodedSession, InputError> {
    let mut session = DecodedSession::default();

    for line in LineReader::new(reader) {
        let (line_number, line) = line?;
        let result = match line {
            Line::Text(raw) => decode_line(&raw, line_number),
            Line::InvalidUtf8 { lossy, valid_up_to } => ParseResult::Malformed(MalformedLine::new(
                line_number,
                lossy,
                DecodeError::InvalidUtf8 { valid_up_to },
            )),
        };
        match result {
            ParseResult::Valid(entry) => session.entries.push(*entry),
            ParseResult::Malformed(malformed) => {
                warn!(
                    line = malformed.line_number(),
                    error = %malformed.error(),
                    "Dropping malformed transcript line"
                );
                session.diagnostics.push(malformed);
            }
        }
    }

    info!(
        entries = session.entries.len(),
        dropped = session.dropped_count(),
        "Transcript decoded"
    );
    Ok(session)
}

/// Where the transcript comes from.
#[derive(Debug)]
pub enum InputSource {
    /// Transcript file on disk
    File(PathBuf),
    /// Piped stdin
    Stdin(StdinSource),
}

impl InputSource {
    /// Read and decode the whole source.
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the source cannot be opened or read.
    pub fn decode(self) -> Result<DecodedSession, InputError> {
        match self {
            InputSource::File(path) => decode_file(path),
            InputSource::Stdin(stdin) => stdin.decode(),
        }
    }
}

/// Detect the input source.
///
/// # Logic:
/// 1. If a file path is provided: use it (existence is checked on decode)
/// 2. If stdin is piped: use stdin
/// 3. Else: `InputError::NoInput`
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a terminal.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(path)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, IsTerminal, Read};

    const USER_LINE: &str = r#"{"type":"user","message":{"role":"user","content":"First"},"sessionId":"s1","uuid":"u1","timestamp":"2025-12-27T10:00:00Z"}"#;
    const ASSISTANT_LINE: &str = r#"{"type":"assistant","message":{"role":"assistant","content":[{"type":"text","text":"Second"}]},"sessionId":"s1","uuid":"u2","timestamp":"2025-12-27T10:00:01Z"}"#;

    // ========================================================================
    // decode_reader() tests
    // ========================================================================

    #[test]
    fn decode_reader_keeps_stream_order() {
        let data = format!("{}\n{}\n", USER_LINE, ASSISTANT_LINE);
        let session = decode_reader(data.as_bytes()).unwrap();

        assert_eq!(session.entries.len(), 2);
        assert_eq!(session.entries[0].uuid(), "u1");
        assert_eq!(session.entries[1].uuid(), "u2");
        assert_eq!(session.dropped_count(), 0);
    }

    #[test]
    fn decode_reader_drops_bad_lines_and_continues() {
        let data = format!(
            "{}\nnot json\n\n{}\n{{\"type\":\"user\",\"message\":{{\"role\":\"user\",\"content\":42}}}}\n",
            USER_LINE, ASSISTANT_LINE
        );
        let session = decode_reader(data.as_bytes()).unwrap();

        assert_eq!(session.entries.len(), 2, "Good lines survive bad neighbours");
        assert_eq!(session.dropped_count(), 2);

        let first = &session.diagnostics[0];
        assert_eq!(first.line_number(), 2);
        assert_eq!(first.raw_line(), "not json");
        assert!(matches!(first.error(), DecodeError::InvalidJson { .. }));

        // The blank line 3 still counts
        let second = &session.diagnostics[1];
        assert_eq!(second.line_number(), 5);
        assert_eq!(
            second.error(),
            &DecodeError::UnexpectedContentShape { found: "number" }
        );
    }

    #[test]
    fn decode_reader_empty_stream_is_empty_session() {
        let session = decode_reader(&b""[..]).unwrap();
        assert!(session.entries.is_empty());
        assert!(session.diagnostics.is_empty());

        let blank_only = decode_reader(&b"\n  \n\r\n\t\n"[..]).unwrap();
        assert!(blank_only.entries.is_empty());
        assert!(blank_only.diagnostics.is_empty());
    }

    #[test]
    fn decode_reader_entries_plus_dropped_equals_non_blank_lines() {
        let data = format!("{}\n\n[]\n{}\n  \n{{}}\n", USER_LINE, ASSISTANT_LINE);
        let session = decode_reader(data.as_bytes()).unwrap();
        assert_eq!(session.entries.len() + session.dropped_count(), 4);
    }

    struct FailAfter {
        data: &'static [u8],
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.data.is_empty() {
                return Err(std::io::Error::other("disk went away"));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn decode_reader_io_error_is_fatal() {
        let reader = BufReader::new(FailAfter {
            data: b"{\"type\":\"user\",\"message\":{\"role\":\"user\",\"content\":\"x\"}}\n",
        });
        let result = decode_reader(reader);
        assert!(
            matches!(result, Err(InputError::Io(_))),
            "Expected Io error, got: {:?}",
            result
        );
    }

    #[test]
    fn decode_reader_invalid_utf8_drops_only_that_line() {
        let mut data = format!("{}\n", USER_LINE).into_bytes();
        data.extend_from_slice(b"{\"type\":\"user\",\"message\":{\"role\":\"user\",\"content\":\"bad \xff byte\"}}\n");
        data.extend_from_slice(format!("{}\n", ASSISTANT_LINE).as_bytes());

        let session = decode_reader(&data[..]).unwrap();

        let uuids: Vec<_> = session.entries.iter().map(|e| e.uuid()).collect();
        assert_eq!(uuids, vec!["u1", "u2"]);
        assert_eq!(session.dropped_count(), 1);
        assert_eq!(session.diagnostics[0].line_number(), 2);
        assert_eq!(
            session.diagnostics[0].error(),
            &DecodeError::InvalidUtf8 { valid_up_to: 55 }
        );
        assert!(session.diagnostics[0].raw_line().contains("bad \u{FFFD} byte"));
    }

    #[test]
    fn decoded_session_summary_uses_entries() {
        let data = format!("{}\n{}\n", USER_LINE, ASSISTANT_LINE);
        let summary = decode_reader(data.as_bytes()).unwrap().summary();
        assert_eq!(summary.entry_count, 2);
        assert_eq!(summary.user_count, 1);
        assert_eq!(summary.assistant_count, 1);
    }

    // ========================================================================
    // detect_input_source() tests
    // ========================================================================

    #[test]
    fn detect_returns_file_variant_for_path() {
        let source = detect_input_source(Some(PathBuf::from("/tmp/some.jsonl"))).unwrap();
        assert!(
            matches!(source, InputSource::File(_)),
            "Should be File variant, got: {:?}",
            source
        );
    }

    #[test]
    fn detect_file_variant_reports_missing_file_on_decode() {
        let missing = std::env::temp_dir().join("nonexistent_detect_test_12345.jsonl");
        let result = detect_input_source(Some(missing.clone())).unwrap().decode();
        match result {
            Err(InputError::FileNotFound { path }) => assert_eq!(path, missing),
            other => panic!("Expected FileNotFound, got: {:?}", other),
        }
    }

    #[test]
    fn detect_returns_no_input_when_no_file_and_stdin_is_tty() {
        // Only meaningful when the test runner leaves stdin attached to a terminal
        let result = detect_input_source(None);
        if std::io::stdin().is_terminal() {
            assert!(
                matches!(result, Err(InputError::NoInput)),
                "Expected NoInput error when no file and stdin is TTY, got: {:?}",
                result
            );
        }
    }
}
