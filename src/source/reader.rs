//! Line splitting for JSONL streams.
//!
//! Yields non-blank lines with their physical 1-based line numbers. There is no
//! maximum line length: a record is as long as the bytes up to the next `\n`.

use std::io::{self, BufRead};

/// One non-blank physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Valid UTF-8, without the line terminator.
    Text(String),
    /// Bytes that are not valid UTF-8. The stream itself is still readable, so
    /// this is a per-line problem for the caller to report.
    InvalidUtf8 {
        /// The line with invalid sequences replaced by U+FFFD.
        lossy: String,
        /// Length of the valid UTF-8 prefix.
        valid_up_to: usize,
    },
}

impl Line {
    fn is_blank(&self) -> bool {
        match self {
            Line::Text(text) => text.trim().is_empty(),
            Line::InvalidUtf8 { .. } => false,
        }
    }
}

/// Iterator over the non-blank lines of a byte stream.
///
/// Blank lines (empty or whitespace only) are skipped but still advance the
/// line counter, so numbers always match what an editor shows.
#[derive(Debug)]
pub struct LineReader<R: BufRead> {
    reader: R,
    line_number: usize,
    buffer: Vec<u8>,
    done: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: Vec::new(),
            done: false,
        }
    }

    /// Number of physical lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    /// Read the next physical line. `Ok(None)` at end of stream.
    fn next_physical(&mut self) -> io::Result<Option<Line>> {
        self.buffer.clear();
        let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
        }
        if self.buffer.last() == Some(&b'\r') {
            self.buffer.pop();
        }

        let line = match String::from_utf8(std::mem::take(&mut self.buffer)) {
            Ok(text) => Line::Text(text),
            Err(e) => Line::InvalidUtf8 {
                valid_up_to: e.utf8_error().valid_up_to(),
                lossy: String::from_utf8_lossy(e.as_bytes()).into_owned(),
            },
        };
        Ok(Some(line))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<(usize, Line)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.next_physical() {
                Ok(Some(line)) if line.is_blank() => continue,
                Ok(Some(line)) => return Some(Ok((self.line_number, line))),
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    // Stream errors are terminal
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Read};

    fn collect(data: &[u8]) -> Vec<(usize, String)> {
        LineReader::new(data)
            .map(|line| match line.expect("in-memory reads never fail") {
                (number, Line::Text(text)) => (number, text),
                (number, other) => panic!("line {} is not text: {:?}", number, other),
            })
            .collect()
    }

    #[test]
    fn yields_lines_with_numbers() {
        let lines = collect(b"a\nb\nc\n");
        assert_eq!(
            lines,
            vec![
                (1, "a".to_string()),
                (2, "b".to_string()),
                (3, "c".to_string())
            ]
        );
    }

    #[test]
    fn blank_lines_advance_the_counter() {
        let lines = collect(b"a\n\n   \n\t\nb\n");
        assert_eq!(lines, vec![(1, "a".to_string()), (5, "b".to_string())]);
    }

    #[test]
    fn last_line_without_newline_is_kept() {
        let lines = collect(b"a\nb");
        assert_eq!(lines, vec![(1, "a".to_string()), (2, "b".to_string())]);
    }

    #[test]
    fn crlf_is_stripped() {
        let lines = collect(b"a\r\nb\r\n");
        assert_eq!(lines, vec![(1, "a".to_string()), (2, "b".to_string())]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(collect(b"").is_empty());
        assert!(collect(b"\n\n\n").is_empty());
    }

    #[test]
    fn lines_read_counts_blank_lines() {
        let mut reader = LineReader::new(&b"a\n\n\n"[..]);
        assert!(reader.next().is_some());
        assert!(reader.next().is_none());
        assert_eq!(reader.lines_read(), 3);
    }

    #[test]
    fn very_long_line_is_not_truncated() {
        let long = "x".repeat(4 * 1024 * 1024);
        let data = format!("{}\nshort\n", long);
        // Small buffer forces many refills for one line
        let reader = BufReader::with_capacity(64, data.as_bytes());
        let lines: Vec<_> = LineReader::new(reader)
            .collect::<io::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].1, Line::Text(long));
        assert_eq!(lines[1], (2, Line::Text("short".to_string())));
    }

    #[test]
    fn invalid_utf8_line_is_reported_and_reading_continues() {
        let lines: Vec<_> = LineReader::new(&b"ok\nab\xff\xfe\nnext\n"[..])
            .collect::<io::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(
            lines,
            vec![
                (1, Line::Text("ok".to_string())),
                (
                    2,
                    Line::InvalidUtf8 {
                        lossy: "ab\u{FFFD}\u{FFFD}".to_string(),
                        valid_up_to: 2,
                    }
                ),
                (3, Line::Text("next".to_string())),
            ]
        );
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn read_error_is_surfaced_once() {
        let mut reader = LineReader::new(BufReader::new(FailingReader));
        let err = reader.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(reader.next().is_none());
    }
}
