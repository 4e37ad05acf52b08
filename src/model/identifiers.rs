//! Session addressing derived from storage paths.
//!
//! Transcripts live at `<projects>/<project-name>/<session-uuid>.jsonl`. The session
//! UUID and the project name are read back from that path; external callers rely on
//! the exact shape check below.

use std::fmt;
use std::path::{Path, PathBuf};

/// File extension of session transcripts.
pub const SESSION_EXTENSION: &str = "jsonl";

const UUID_LEN: usize = 36;
const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// Session identifier in the 36-character `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` shape.
///
/// Only the length and the hyphen positions are checked; the other characters are
/// not required to be hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionUuid(String);

impl SessionUuid {
    /// Smart constructor: validates length and hyphen positions
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidSessionUuid> {
        let raw = raw.into();
        let bytes = raw.as_bytes();
        if bytes.len() != UUID_LEN {
            return Err(InvalidSessionUuid::Length(bytes.len()));
        }
        if let Some(&pos) = HYPHEN_POSITIONS.iter().find(|&&pos| bytes[pos] != b'-') {
            return Err(InvalidSessionUuid::MissingHyphen(pos));
        }
        Ok(Self(raw))
    }

    /// Extract the session UUID from a transcript path.
    ///
    /// The file name without its last extension must have the UUID shape.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let file_name = path.as_ref().file_name()?.to_str()?;
        let stem = match file_name.rfind('.') {
            Some(dot) => &file_name[..dot],
            None => file_name,
        };
        Self::new(stem).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convenience wrapper over [`SessionUuid::from_path`].
pub fn session_uuid(path: impl AsRef<Path>) -> Option<SessionUuid> {
    SessionUuid::from_path(path)
}

/// Whether the path names a session transcript.
pub fn is_session_path(path: impl AsRef<Path>) -> bool {
    SessionUuid::from_path(path).is_some()
}

/// Name of the project owning a transcript: the directory segment right before
/// the session file.
pub fn project_name(path: impl AsRef<Path>) -> Option<String> {
    let parent = path.as_ref().parent()?;
    let name = parent.file_name()?.to_str()?;
    Some(name.to_string())
}

/// Storage path of a session: `<projects_dir>/<project>/<session>.jsonl`.
pub fn session_path(projects_dir: &Path, project: &str, session: &SessionUuid) -> PathBuf {
    projects_dir
        .join(project)
        .join(format!("{}.{}", session, SESSION_EXTENSION))
}

// ===== Error Types =====

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSessionUuid {
    #[error("Session UUID must be 36 characters, got {0}")]
    Length(usize),
    #[error("Session UUID must have a hyphen at position {0}")]
    MissingHyphen(usize),
}

// ===== Tests =====
