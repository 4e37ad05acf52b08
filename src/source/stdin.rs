//! Stdin-based transcript source for piped input.
//!
//! Supports `cat session.jsonl | cclog` style usage. The stream is read to EOF
//! before anything is reported.

use crate::model::error::InputError;
use crate::source::{decode_reader, DecodedSession};
use std::io::{BufRead, IsTerminal, StdinLock};

/// Stdin source for piped JSONL input.
///
/// Construction fails on an interactive terminal so that the binary never
/// blocks waiting for the user to type a transcript.
#[derive(Debug)]
pub struct StdinSource<R: BufRead = StdinLock<'static>> {
    reader: R,
}

impl StdinSource {
    /// Create a new StdinSource from stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is a TTY (interactive terminal).
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self {
            reader: stdin.lock(),
        })
    }
}

impl<R: BufRead> StdinSource<R> {
    /// Create StdinSource from any reader, bypassing the TTY check.
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Read to EOF and decode every line.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors.
    pub fn decode(self) -> Result<DecodedSession, InputError> {
        decode_reader(self.reader)
    }
}
