//! File-based transcript source.

use crate::model::error::InputError;
use crate::source::{decode_reader, DecodedSession};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Open and decode a transcript file.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::Io` for other I/O errors.
pub fn decode_file(path: impl AsRef<Path>) -> Result<DecodedSession, InputError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => InputError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Io(e),
    })?;

    debug!(path = %path.display(), "Decoding transcript file");
    decode_reader(BufReader::new(file))
}
