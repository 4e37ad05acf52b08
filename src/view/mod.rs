//! Plain-text rendering for the command-line front end.

pub mod summary;

pub use summary::{format_tokens, SessionOrigin, SummaryView};
