//! Log entry types representing decoded JSONL records.
//!
//! LogEntry is one record of a transcript. It is built once by the decoder and
//! never mutated afterwards.

use crate::model::{Message, OpaqueValue};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

// ===== EntryKind =====

/// Top-level `type` tag of an entry.
///
/// Unknown tags are preserved, not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKind {
    User,
    Assistant,
    Other(String),
}

impl EntryKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "user" => Self::User,
            "assistant" => Self::Assistant,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Other(s) => s,
        }
    }
}

// ===== EntryMetadata =====

/// Environment the entry was recorded in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryMetadata {
    pub cwd: Option<PathBuf>,
    pub git_branch: Option<String>,
    /// Claude Code version that wrote the entry
    pub version: Option<String>,
    pub user_type: Option<String>,
    pub is_sidechain: bool,
}

// ===== LogEntry =====

/// A decoded entry from the JSONL transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    uuid: String,
    parent_uuid: Option<String>,
    session_id: String,
    request_id: Option<String>,
    timestamp: Option<DateTime<Utc>>,
    kind: EntryKind,
    message: Message,
    tool_use_result: Option<OpaqueValue>,
    metadata: EntryMetadata,
}

impl LogEntry {
    /// Create an entry with the required parts.
    ///
    /// Optional parts are attached with the `with_*` builders.
    pub fn new(uuid: impl Into<String>, kind: EntryKind, message: Message) -> Self {
        Self {
            uuid: uuid.into(),
            parent_uuid: None,
            session_id: String::new(),
            request_id: None,
            timestamp: None,
            kind,
            message,
            tool_use_result: None,
            metadata: EntryMetadata::default(),
        }
    }

    pub fn with_parent_uuid(mut self, parent_uuid: impl Into<String>) -> Self {
        self.parent_uuid = Some(parent_uuid.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_tool_use_result(mut self, result: OpaqueValue) -> Self {
        self.tool_use_result = Some(result);
        self
    }

    pub fn with_metadata(mut self, metadata: EntryMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    // ===== Accessors (read-only) =====

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Parent entry, `None` for the root of a conversation.
    pub fn parent_uuid(&self) -> Option<&str> {
        self.parent_uuid.as_deref()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Tool-specific result payload attached to tool-result turns.
    pub fn tool_use_result(&self) -> Option<&OpaqueValue> {
        self.tool_use_result.as_ref()
    }

    pub fn metadata(&self) -> &EntryMetadata {
        &self.metadata
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.metadata.cwd.as_deref()
    }

    pub fn is_sidechain(&self) -> bool {
        self.metadata.is_sidechain
    }
}

// ===== Tests =====
