//! Read-only aggregates over a decoded session.
//!
//! All functions take the entries in stream order and never mutate them.

use crate::model::{LogEntry, TodoWriteInput, ToolName, ToolUse, Usage};
use std::collections::HashMap;
use std::path::Path;

/// Number of entries whose top-level `type` tag equals `role`.
///
/// Entries with other tags ("summary", "system", ...) never count towards
/// "user" or "assistant".
pub fn count_by_role(entries: &[LogEntry], role: &str) -> usize {
    entries
        .iter()
        .filter(|entry| entry.kind().as_str() == role)
        .count()
}

/// All tool invocations across the session, in stream order.
fn tool_uses(entries: &[LogEntry]) -> impl Iterator<Item = &ToolUse> {
    entries.iter().flat_map(|entry| entry.message().tool_uses())
}

/// Total number of `ToolUse` blocks. Plain-text entries contribute zero.
pub fn count_tool_uses(entries: &[LogEntry]) -> usize {
    tool_uses(entries).count()
}

/// Number of invocations per tool name.
pub fn tool_use_counts(entries: &[LogEntry]) -> HashMap<ToolName, usize> {
    let mut counts = HashMap::new();
    for tool_use in tool_uses(entries) {
        *counts.entry(tool_use.name().clone()).or_default() += 1;
    }
    counts
}

/// Working directory of the session.
///
/// Taken from the first entry only: the directory is assumed constant for the
/// session's lifetime, which is not verified.
pub fn session_working_directory(entries: &[LogEntry]) -> Option<&Path> {
    entries.first().and_then(LogEntry::cwd)
}

/// The most recent `TodoWrite` input in stream order.
///
/// Scans from the last entry backwards. Within an entry the first `TodoWrite`
/// block wins.
pub fn latest_todo_list(entries: &[LogEntry]) -> Option<&TodoWriteInput> {
    entries.iter().rev().find_map(|entry| {
        entry
            .message()
            .tool_uses()
            .find_map(|tool_use| tool_use.input().as_todo_write())
    })
}

// ===== SessionSummary =====

/// Summary of a decoded session, as printed by the command-line front end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub entry_count: usize,
    pub user_count: usize,
    pub assistant_count: usize,
    pub tool_use_count: usize,
    pub tool_counts: HashMap<ToolName, usize>,
    /// Usage summed over all messages that report it
    pub total_usage: Usage,
    pub working_directory: Option<std::path::PathBuf>,
    pub latest_todos: Option<TodoWriteInput>,
}

impl SessionSummary {
    pub fn from_entries(entries: &[LogEntry]) -> Self {
        let mut total_usage = Usage::default();
        for usage in entries.iter().filter_map(|entry| entry.message().usage()) {
            total_usage += usage;
        }

        Self {
            entry_count: entries.len(),
            user_count: count_by_role(entries, "user"),
            assistant_count: count_by_role(entries, "assistant"),
            tool_use_count: count_tool_uses(entries),
            tool_counts: tool_use_counts(entries),
            total_usage,
            working_directory: session_working_directory(entries).map(Path::to_path_buf),
            latest_todos: latest_todo_list(entries).cloned(),
        }
    }

    /// Tool counts sorted by count descending, then by name.
    pub fn sorted_tool_counts(&self) -> Vec<(&ToolName, usize)> {
        let mut counts: Vec<_> = self
            .tool_counts
            .iter()
            .map(|(name, count)| (name, *count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        counts
    }
}
