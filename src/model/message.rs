//! Message types for Claude Code transcript entries.
//!
//! Types represent the structure of messages exchanged during sessions.

use crate::model::{OpaqueValue, ToolInput, ToolName, Usage};

// ===== Role =====

/// Message role in a Claude Code conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
    /// Any other role string, preserved as written.
    Other(String),
}

impl Role {
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

// ===== MessageContent =====

/// Content of a message.
///
/// The variant follows the raw JSON shape, never the role: a JSON string becomes
/// `PlainText`, a JSON array becomes `Blocks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    /// Plain text content (simple user turns)
    PlainText(String),
    /// Ordered content blocks (assistant turns, tool results)
    Blocks(Vec<ContentBlock>),
}

impl MessageContent {
    /// Content blocks, or an empty slice for plain text.
    pub fn blocks(&self) -> &[ContentBlock] {
        match self {
            Self::PlainText(_) => &[],
            Self::Blocks(blocks) => blocks,
        }
    }
}

// ===== ContentBlock =====

/// One unit of structured message content.
///
/// This is a closed set: any other block `type` fails the whole record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Text visible to the user
    Text { text: String },
    /// Tool invocation by the assistant
    ToolUse(ToolUse),
    /// Output of a tool, sent back in a user turn
    ToolResult {
        /// ID linking this result to the originating tool_use
        tool_use_id: String,
        content: ToolResultContent,
        /// Absent when the transcript does not say
        is_error: Option<bool>,
    },
}

/// Payload of a `tool_result` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResultContent {
    /// Tool output as a string (stdout, file contents, etc.)
    Text(String),
    /// Any non-string content, e.g. an array of text/image parts
    Structured(OpaqueValue),
}

impl ToolResultContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(_) => None,
        }
    }
}

// ===== ToolUse =====

/// Tool invocation recorded in a transcript.
///
/// The input variant is resolved from `name` at decode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolUse {
    id: String,
    name: ToolName,
    input: ToolInput,
}

impl ToolUse {
    pub fn new(id: impl Into<String>, name: ToolName, input: ToolInput) -> Self {
        Self {
            id: id.into(),
            name,
            input,
        }
    }

    /// Identifier linking this call to its result
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &ToolName {
        &self.name
    }

    pub fn input(&self) -> &ToolInput {
        &self.input
    }
}

// ===== Message =====

/// The `message` object embedded in every transcript entry.
///
/// `id`, `model`, `stop_reason`, `stop_sequence`, the secondary `type` tag and
/// `usage` are only present on assistant messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: MessageContent,
    id: Option<String>,
    model: Option<String>,
    stop_reason: Option<String>,
    stop_sequence: Option<String>,
    message_type: Option<String>,
    usage: Option<Usage>,
}

impl Message {
    /// Create a message with role and content; add optional fields with the
    /// `with_*` builders.
    pub fn new(role: Role, content: MessageContent) -> Self {
        Self {
            role,
            content,
            id: None,
            model: None,
            stop_reason: None,
            stop_sequence: None,
            message_type: None,
            usage: None,
        }
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn stop_reason(&self) -> Option<&str> {
        self.stop_reason.as_deref()
    }

    pub fn stop_sequence(&self) -> Option<&str> {
        self.stop_sequence.as_deref()
    }

    /// Secondary `type` tag of the message object (usually "message").
    pub fn message_type(&self) -> Option<&str> {
        self.message_type.as_deref()
    }

    pub fn usage(&self) -> Option<&Usage> {
        self.usage.as_ref()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_stop_reason(mut self, stop_reason: impl Into<String>) -> Self {
        self.stop_reason = Some(stop_reason.into());
        self
    }

    pub fn with_stop_sequence(mut self, stop_sequence: impl Into<String>) -> Self {
        self.stop_sequence = Some(stop_sequence.into());
        self
    }

    pub fn with_message_type(mut self, message_type: impl Into<String>) -> Self {
        self.message_type = Some(message_type.into());
        self
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// All tool invocations in this message, in block order.
    ///
    /// Empty for plain-text messages.
    pub fn tool_uses(&self) -> impl DoubleEndedIterator<Item = &ToolUse> {
        self.content.blocks().iter().filter_map(|block| match block {
            ContentBlock::ToolUse(tool_use) => Some(tool_use),
            _ => None,
        })
    }

    /// Text content, joining all text blocks with newlines.
    ///
    /// Ignores tool use and tool result blocks.
    pub fn text(&self) -> String {
        match &self.content {
            MessageContent::PlainText(text) => text.clone(),
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

// ===== Tests =====
