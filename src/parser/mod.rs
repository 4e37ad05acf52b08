//! JSONL decoder for Claude Code transcript records.
//!
//! This module turns one JSONL line into a [`LogEntry`]. Decoding has two
//! polymorphic layers:
//!
//! 1. `message.content` is a string or an array of blocks, each block tagged by
//!    its own `type` field. The set of block kinds is closed.
//! 2. A `tool_use` block's `input` is typed by the sibling `name` field. The set
//!    of tools is open: unknown names keep their input opaque.

use crate::model::opaque::json_kind;
use crate::model::{
    ContentBlock, DecodeError, EntryKind, EntryMetadata, LogEntry, MalformedLine, Message,
    MessageContent, OpaqueValue, Role, ToolInput, ToolName, ToolResultContent, ToolUse, Usage,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

// Content block kind constants
const BLOCK_TEXT: &str = "text";
const BLOCK_TOOL_USE: &str = "tool_use";
const BLOCK_TOOL_RESULT: &str = "tool_result";

/// Raw JSON structure for deserializing log entries.
///
/// Fixed-shape fields deserialize directly; the polymorphic parts stay as
/// `serde_json::Value` until the second pass.
#[derive(Debug, Deserialize)]
struct RawLogEntry {
    #[serde(default, rename = "type")]
    entry_type: Option<String>,
    #[serde(default)]
    message: Option<RawMessage>,
    #[serde(default)]
    uuid: Option<String>,
    #[serde(default, rename = "parentUuid")]
    parent_uuid: Option<String>,
    #[serde(default, rename = "sessionId")]
    session_id: Option<String>,
    #[serde(default, rename = "requestId")]
    request_id: Option<String>,
    #[serde(default, rename = "toolUseResult")]
    tool_use_result: Option<Value>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    cwd: Option<String>,
    #[serde(default, rename = "gitBranch")]
    git_branch: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default, rename = "userType")]
    user_type: Option<String>,
    #[serde(default, rename = "isSidechain")]
    is_sidechain: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Option<Value>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    stop_sequence: Option<String>,
    #[serde(default, rename = "type")]
    message_type: Option<String>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct RawTextBlock {
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawToolUseBlock {
    id: String,
    name: String,
    #[serde(default)]
    input: Value,
}

#[derive(Debug, Deserialize)]
struct RawToolResultBlock {
    tool_use_id: String,
    #[serde(default)]
    content: Option<Value>,
    #[serde(default)]
    is_error: Option<bool>,
}

/// Result of decoding a JSONL line with graceful error handling.
///
/// This allows the caller to continue with subsequent lines when one line is
/// malformed.
#[derive(Debug, Clone)]
pub enum ParseResult {
    /// Successfully decoded a log entry.
    Valid(Box<LogEntry>),
    /// The line was dropped.
    Malformed(MalformedLine),
}

/// Decode a single JSONL line, never failing.
///
/// # Arguments
///
/// * `raw` - The raw JSONL line
/// * `line_number` - The line number (1-indexed) for error reporting
pub fn decode_line(raw: &str, line_number: usize) -> ParseResult {
    match decode(raw) {
        Ok(entry) => ParseResult::Valid(Box::new(entry)),
        Err(error) => ParseResult::Malformed(MalformedLine::new(line_number, raw, error)),
    }
}

/// Decode a single JSONL line into a LogEntry.
///
/// # Errors
///
/// Returns `DecodeError` if:
/// - the line is not JSON or a top-level field has the wrong type
/// - the timestamp is present but invalid
/// - `message.content` is neither a string nor an array
/// - a content block has an unknown `type` or is missing fields
/// - the input of a known tool does not match that tool's shape
pub fn decode(raw: &str) -> Result<LogEntry, DecodeError> {
    let raw_entry: RawLogEntry = serde_json::from_str(raw).map_err(|e| DecodeError::json(&e))?;

    let timestamp = raw_entry
        .timestamp
        .as_deref()
        .map(parse_timestamp)
        .transpose()?;

    let message = match raw_entry.message {
        Some(raw_message) => decode_message(raw_message)?,
        None => return Err(DecodeError::UnexpectedContentShape { found: "null" }),
    };

    let metadata = EntryMetadata {
        cwd: raw_entry.cwd.filter(|cwd| !cwd.is_empty()).map(PathBuf::from),
        git_branch: raw_entry.git_branch,
        version: raw_entry.version,
        user_type: raw_entry.user_type,
        is_sidechain: raw_entry.is_sidechain.unwrap_or(false),
    };

    let mut entry = LogEntry::new(
        raw_entry.uuid.unwrap_or_default(),
        EntryKind::parse(raw_entry.entry_type.as_deref().unwrap_or_default()),
        message,
    )
    .with_session_id(raw_entry.session_id.unwrap_or_default())
    .with_metadata(metadata);

    // Empty parent means "no parent", same as null
    if let Some(parent) = raw_entry.parent_uuid.filter(|p| !p.is_empty()) {
        entry = entry.with_parent_uuid(parent);
    }
    if let Some(request_id) = raw_entry.request_id {
        entry = entry.with_request_id(request_id);
    }
    if let Some(ts) = timestamp {
        entry = entry.with_timestamp(ts);
    }
    if let Some(result) = raw_entry.tool_use_result {
        entry = entry.with_tool_use_result(OpaqueValue::new(result));
    }

    Ok(entry)
}

/// Parse an RFC 3339 timestamp into UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DecodeError> {
    raw.parse().map_err(|_| DecodeError::InvalidTimestamp {
        raw: raw.to_string(),
    })
}

/// Decode the message object, resolving its content by JSON shape.
fn decode_message(raw: RawMessage) -> Result<Message, DecodeError> {
    let content = decode_content(raw.content.unwrap_or(Value::Null))?;

    let mut message = Message::new(Role::parse(raw.role.as_deref().unwrap_or_default()), content);
    if let Some(id) = raw.id {
        message = message.with_id(id);
    }
    if let Some(model) = raw.model {
        message = message.with_model(model);
    }
    if let Some(stop_reason) = raw.stop_reason {
        message = message.with_stop_reason(stop_reason);
    }
    if let Some(stop_sequence) = raw.stop_sequence {
        message = message.with_stop_sequence(stop_sequence);
    }
    if let Some(message_type) = raw.message_type {
        message = message.with_message_type(message_type);
    }
    if let Some(usage) = raw.usage {
        message = message.with_usage(usage);
    }
    Ok(message)
}

/// String content is plain text, array content is a block sequence, anything
/// else fails the record.
fn decode_content(content: Value) -> Result<MessageContent, DecodeError> {
    match content {
        Value::String(text) => Ok(MessageContent::PlainText(text)),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| decode_content_block(index, item))
            .collect::<Result<Vec<_>, _>>()
            .map(MessageContent::Blocks),
        other => Err(DecodeError::UnexpectedContentShape {
            found: json_kind(&other),
        }),
    }
}

/// Decode one content block by its own `type` discriminator.
fn decode_content_block(index: usize, item: Value) -> Result<ContentBlock, DecodeError> {
    let kind = item
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingBlockKind { index })?;

    match kind {
        BLOCK_TEXT => {
            let block: RawTextBlock = block_from_value(index, BLOCK_TEXT, item)?;
            Ok(ContentBlock::Text { text: block.text })
        }
        BLOCK_TOOL_USE => {
            let block: RawToolUseBlock = block_from_value(index, BLOCK_TOOL_USE, item)?;
            decode_tool_use(block).map(ContentBlock::ToolUse)
        }
        BLOCK_TOOL_RESULT => {
            let block: RawToolResultBlock = block_from_value(index, BLOCK_TOOL_RESULT, item)?;
            let content = match block.content {
                None | Some(Value::Null) => ToolResultContent::Text(String::new()),
                Some(Value::String(text)) => ToolResultContent::Text(text),
                Some(other) => ToolResultContent::Structured(OpaqueValue::new(other)),
            };
            Ok(ContentBlock::ToolResult {
                tool_use_id: block.tool_use_id,
                content,
                is_error: block.is_error,
            })
        }
        unknown => Err(DecodeError::UnknownBlockKind {
            index,
            kind: unknown.to_string(),
        }),
    }
}

fn block_from_value<T: serde::de::DeserializeOwned>(
    index: usize,
    kind: &'static str,
    item: Value,
) -> Result<T, DecodeError> {
    serde_json::from_value(item).map_err(|e| DecodeError::InvalidBlock {
        index,
        kind,
        message: e.to_string(),
    })
}

/// Resolve the tool input from the sibling `name` field.
fn decode_tool_use(block: RawToolUseBlock) -> Result<ToolUse, DecodeError> {
    let name = ToolName::parse(&block.name);
    if !name.is_known() {
        debug!(tool = %name, "Unknown tool, keeping input opaque");
    }

    let input = ToolInput::decode(&name, block.input).map_err(|e| {
        DecodeError::InvalidToolInput {
            tool: block.name.clone(),
            message: e.to_string(),
        }
    })?;

    Ok(ToolUse::new(block.id, name, input))
}
