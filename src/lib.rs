//! cclog - Claude Code transcript decoder
//!
//! Decodes Claude Code JSONL session transcripts into a strongly typed model
//! and computes session summaries.
//!
//! The library is split into a pure core and a thin impure shell:
//! - [`model`] and [`parser`] are pure: JSON text in, typed values out
//! - [`source`] reads files and stdin, [`config`] and [`logging`] set up the binary
//! - [`view`] renders summaries as plain text
//!
//! ```
//! let line = r#"{"type":"user","message":{"role":"user","content":"hi"},"uuid":"u1"}"#;
//! let session = cclog::source::decode_reader(line.as_bytes()).unwrap();
//! assert_eq!(session.summary().user_count, 1);
//! ```

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod view;
