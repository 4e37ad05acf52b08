//! Domain model types (pure).
//!
//! All types in this module are pure data. Only the decoder in
//! [`crate::parser`] builds them from JSON; everything else queries them by
//! pattern matching.

pub mod error;
pub mod identifiers;
pub mod log_entry;
pub mod malformed_line;
pub mod message;
pub mod opaque;
pub mod stats;
pub mod tool_input;
pub mod usage;

// Re-export for convenience
pub use error::{DecodeError, InputError};
pub use identifiers::{
    is_session_path, project_name, session_path, session_uuid, InvalidSessionUuid, SessionUuid,
};
pub use log_entry::{EntryKind, EntryMetadata, LogEntry};
pub use malformed_line::MalformedLine;
pub use message::{ContentBlock, Message, MessageContent, Role, ToolResultContent, ToolUse};
pub use opaque::OpaqueValue;
pub use stats::{
    count_by_role, count_tool_uses, latest_todo_list, session_working_directory,
    tool_use_counts, SessionSummary,
};
pub use tool_input::{
    BashInput, EditInput, GlobInput, GrepInput, LsInput, ReadInput, TodoItem, TodoWriteInput,
    ToolInput, ToolName,
};
pub use usage::Usage;
