//! Typed tool inputs.
//!
//! The `input` of a `tool_use` block has no tag of its own: its shape is chosen by
//! the sibling `name` field. Known tools decode into a typed struct; every other
//! tool keeps its input as an [`OpaqueValue`] so new tools never break decoding.

use crate::model::OpaqueValue;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

// ===== ToolName =====

/// Tool names with a typed input shape, plus a fallback for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolName {
    TodoWrite,
    Bash,
    Edit,
    Read,
    Glob,
    Grep,
    Ls,
    /// Any tool without a typed input (custom, MCP or newer tools).
    Other(String),
}

impl ToolName {
    /// Parse a tool name from the `name` field of a `tool_use` block.
    ///
    /// Matching is exact and case sensitive; unknown names are wrapped in `Other`.
    pub fn parse(name: &str) -> Self {
        match name {
            "TodoWrite" => Self::TodoWrite,
            "Bash" => Self::Bash,
            "Edit" => Self::Edit,
            "Read" => Self::Read,
            "Glob" => Self::Glob,
            "Grep" => Self::Grep,
            "LS" => Self::Ls,
            other => Self::Other(other.to_string()),
        }
    }

    /// The name as it appears in transcripts.
    pub fn as_str(&self) -> &str {
        match self {
            Self::TodoWrite => "TodoWrite",
            Self::Bash => "Bash",
            Self::Edit => "Edit",
            Self::Read => "Read",
            Self::Glob => "Glob",
            Self::Grep => "Grep",
            Self::Ls => "LS",
            Self::Other(s) => s,
        }
    }

    /// Whether this tool has a typed input shape.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== ToolInput =====

/// Argument payload of a tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInput {
    TodoWrite(TodoWriteInput),
    Bash(BashInput),
    Edit(EditInput),
    Read(ReadInput),
    Glob(GlobInput),
    Grep(GrepInput),
    Ls(LsInput),
    /// Input of a tool without a typed shape, kept verbatim.
    Opaque(OpaqueValue),
}

impl ToolInput {
    /// Decode `input` according to the tool `name`.
    ///
    /// Never fails for `ToolName::Other`. For known tools a missing required field
    /// or a field of the wrong type is an error.
    pub fn decode(name: &ToolName, input: Value) -> Result<Self, serde_json::Error> {
        Ok(match name {
            ToolName::TodoWrite => Self::TodoWrite(serde_json::from_value(input)?),
            ToolName::Bash => Self::Bash(serde_json::from_value(input)?),
            ToolName::Edit => Self::Edit(serde_json::from_value(input)?),
            ToolName::Read => Self::Read(serde_json::from_value(input)?),
            ToolName::Glob => Self::Glob(serde_json::from_value(input)?),
            ToolName::Grep => Self::Grep(serde_json::from_value(input)?),
            ToolName::Ls => Self::Ls(serde_json::from_value(input)?),
            ToolName::Other(_) => Self::Opaque(OpaqueValue::new(input)),
        })
    }

    pub fn as_todo_write(&self) -> Option<&TodoWriteInput> {
        match self {
            Self::TodoWrite(todos) => Some(todos),
            _ => None,
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque(_))
    }
}

// ===== Typed shapes =====

/// Input of `TodoWrite`: the full replacement todo list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TodoWriteInput {
    pub todos: Vec<TodoItem>,
}

impl TodoWriteInput {
    /// Number of todos per status, ordered by status name.
    pub fn count_by_status(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for todo in &self.todos {
            *counts.entry(todo.status.as_str()).or_default() += 1;
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub content: String,
    /// "pending", "in_progress" or "completed" in current transcripts.
    pub status: String,
    pub priority: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BashInput {
    pub command: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditInput {
    pub file_path: String,
    pub old_string: String,
    pub new_string: String,
    #[serde(default)]
    pub replace_all: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReadInput {
    pub file_path: String,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GlobInput {
    pub pattern: String,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GrepInput {
    pub pattern: String,
    #[serde(default)]
    pub glob: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub output_mode: Option<String>,
    /// Serialized under the flag name `-n`.
    #[serde(default, rename = "-n")]
    pub line_numbers: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LsInput {
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ===== ToolName Tests =====

    #[test]
    fn tool_name_parse_recognizes_known_tools() {
        assert_eq!(ToolName::parse("TodoWrite"), ToolName::TodoWrite);
        assert_eq!(ToolName::parse("Bash"), ToolName::Bash);
        assert_eq!(ToolName::parse("Edit"), ToolName::Edit);
        assert_eq!(ToolName::parse("Read"), ToolName::Read);
        assert_eq!(ToolName::parse("Glob"), ToolName::Glob);
        assert_eq!(ToolName::parse("Grep"), ToolName::Grep);
        assert_eq!(ToolName::parse("LS"), ToolName::Ls);
    }

    #[test]
    fn tool_name_parse_is_case_sensitive() {
        assert_eq!(ToolName::parse("bash"), ToolName::Other("bash".to_string()));
        assert_eq!(ToolName::parse("Ls"), ToolName::Other("Ls".to_string()));
    }

    #[test]
    fn tool_name_as_str_uses_transcript_spelling() {
        assert_eq!(ToolName::Ls.as_str(), "LS");
        assert_eq!(ToolName::Other("WebFetch".to_string()).as_str(), "WebFetch");
    }

    #[test]
    fn tool_name_is_known_only_for_typed_tools() {
        assert!(ToolName::Grep.is_known());
        assert!(!ToolName::Other("Task".to_string()).is_known());
    }

    // ===== ToolInput::decode Tests =====

    #[test]
    fn decode_bash_input() {
        let input = json!({"command": "ls -la", "description": "List files"});
        let decoded = ToolInput::decode(&ToolName::Bash, input).unwrap();
        assert_eq!(
            decoded,
            ToolInput::Bash(BashInput {
                command: "ls -la".to_string(),
                description: "List files".to_string(),
            })
        );
    }

    #[test]
    fn decode_bash_input_missing_description_fails() {
        let input = json!({"command": "ls"});
        assert!(ToolInput::decode(&ToolName::Bash, input).is_err());
    }

    #[test]
    fn decode_edit_input_with_optional_replace_all_absent() {
        let input = json!({"file_path": "/a.rs", "old_string": "x", "new_string": "y"});
        match ToolInput::decode(&ToolName::Edit, input).unwrap() {
            ToolInput::Edit(edit) => {
                assert_eq!(edit.file_path, "/a.rs");
                assert_eq!(edit.replace_all, None);
            }
            other => panic!("Expected Edit, got {:?}", other),
        }
    }

    #[test]
    fn decode_read_input_with_limit_and_offset() {
        let input = json!({"file_path": "/a.rs", "limit": 50, "offset": 10});
        match ToolInput::decode(&ToolName::Read, input).unwrap() {
            ToolInput::Read(read) => {
                assert_eq!(read.limit, Some(50));
                assert_eq!(read.offset, Some(10));
            }
            other => panic!("Expected Read, got {:?}", other),
        }
    }

    #[test]
    fn decode_read_input_wrong_type_fails() {
        let input = json!({"file_path": "/a.rs", "limit": "fifty"});
        assert!(ToolInput::decode(&ToolName::Read, input).is_err());
    }

    #[test]
    fn decode_grep_input_reads_dash_n_flag() {
        let input = json!({"pattern": "fn main", "-n": true, "output_mode": "content"});
        match ToolInput::decode(&ToolName::Grep, input).unwrap() {
            ToolInput::Grep(grep) => {
                assert_eq!(grep.line_numbers, Some(true));
                assert_eq!(grep.output_mode.as_deref(), Some("content"));
                assert_eq!(grep.glob, None);
            }
            other => panic!("Expected Grep, got {:?}", other),
        }
    }

    #[test]
    fn decode_glob_and_ls_inputs() {
        let glob = ToolInput::decode(&ToolName::Glob, json!({"pattern": "**/*.rs"})).unwrap();
        assert!(matches!(glob, ToolInput::Glob(GlobInput { path: None, .. })));

        let ls = ToolInput::decode(&ToolName::Ls, json!({"path": "/tmp"})).unwrap();
        assert_eq!(
            ls,
            ToolInput::Ls(LsInput {
                path: "/tmp".to_string()
            })
        );
    }

    #[test]
    fn decode_todo_write_input() {
        let input = json!({"todos": [
            {"id": "1", "content": "Write parser", "status": "completed", "priority": "high"},
            {"id": "2", "content": "Write tests", "status": "pending", "priority": "medium"}
        ]});
        let decoded = ToolInput::decode(&ToolName::TodoWrite, input).unwrap();
        let todos = decoded.as_todo_write().expect("Should be TodoWrite");
        assert_eq!(todos.todos.len(), 2);
        assert_eq!(todos.todos[1].content, "Write tests");
    }

    #[test]
    fn decode_unknown_tool_keeps_input_opaque() {
        let input = json!({"url": "https://example.com", "nested": {"depth": 2}});
        let decoded =
            ToolInput::decode(&ToolName::Other("FutureTool".to_string()), input.clone()).unwrap();
        assert!(decoded.is_opaque());
        assert_eq!(decoded, ToolInput::Opaque(OpaqueValue::new(input)));
    }

    #[test]
    fn decode_unknown_tool_accepts_non_object_input() {
        let decoded = ToolInput::decode(&ToolName::Other("X".to_string()), json!(42)).unwrap();
        assert!(decoded.is_opaque());
    }

    #[test]
    fn decode_known_tool_ignores_extra_fields() {
        let input = json!({"path": "/tmp", "ignore": ["target"]});
        assert!(ToolInput::decode(&ToolName::Ls, input).is_ok());
    }

    #[test]
    fn count_by_status_groups_todos() {
        let input: TodoWriteInput = serde_json::from_value(json!({"todos": [
            {"id": "1", "content": "a", "status": "completed", "priority": "high"},
            {"id": "2", "content": "b", "status": "pending", "priority": "low"},
            {"id": "3", "content": "c", "status": "completed", "priority": "low"}
        ]}))
        .unwrap();
        let counts = input.count_by_status();
        assert_eq!(counts.get("completed"), Some(&2));
        assert_eq!(counts.get("pending"), Some(&1));
        assert_eq!(counts.get("in_progress"), None);
    }
}
