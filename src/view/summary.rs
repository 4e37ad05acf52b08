//! Plain-text session summary printed by the `cclog` binary.

use crate::model::{project_name, MalformedLine, SessionSummary, SessionUuid, TodoItem};
use std::fmt;
use std::path::Path;

// ===== SessionOrigin =====

/// Where a transcript came from, when the storage path says so.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOrigin {
    pub session: Option<SessionUuid>,
    pub project: Option<String>,
}

impl SessionOrigin {
    /// Derive the origin from a transcript path.
    ///
    /// The project is only reported for paths that follow the session naming
    /// convention; any other file's parent directory says nothing about a project.
    pub fn from_path(path: &Path) -> Self {
        match SessionUuid::from_path(path) {
            Some(session) => Self {
                session: Some(session),
                project: project_name(path),
            },
            None => Self::default(),
        }
    }
}

// ===== SummaryView =====

/// Text rendering of a [`SessionSummary`] plus the dropped-line diagnostics.
///
/// Rendered through `Display`.
#[derive(Debug)]
pub struct SummaryView<'a> {
    summary: &'a SessionSummary,
    diagnostics: &'a [MalformedLine],
    origin: SessionOrigin,
    show_todos: bool,
    show_errors: bool,
}

impl<'a> SummaryView<'a> {
    pub fn new(summary: &'a SessionSummary, diagnostics: &'a [MalformedLine]) -> Self {
        Self {
            summary,
            diagnostics,
            origin: SessionOrigin::default(),
            show_todos: true,
            show_errors: false,
        }
    }

    pub fn with_origin(mut self, origin: SessionOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn show_todos(mut self, show: bool) -> Self {
        self.show_todos = show;
        self
    }

    /// List every dropped line with its error.
    pub fn show_errors(mut self, show: bool) -> Self {
        self.show_errors = show;
        self
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(session) = &self.origin.session {
            writeln!(f, "Session:   {}", session)?;
        }
        if let Some(project) = &self.origin.project {
            writeln!(f, "Project:   {}", project)?;
        }
        match &self.summary.working_directory {
            Some(dir) => writeln!(f, "Directory: {}", dir.display()),
            None => writeln!(f, "Directory: (unknown)"),
        }
    }

    fn write_counts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Entries:   {} decoded, {} dropped",
            format_tokens(self.summary.entry_count as u64),
            format_tokens(self.diagnostics.len() as u64)
        )?;
        writeln!(
            f,
            "Messages:  {} user, {} assistant",
            self.summary.user_count, self.summary.assistant_count
        )
    }

    fn write_tokens(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let usage = &self.summary.total_usage;
        writeln!(f, "Tokens:")?;
        writeln!(f, "  Input:  {}", format_tokens(usage.total_input()))?;
        if usage.cache_read_input_tokens > 0 || usage.cache_creation_input_tokens > 0 {
            writeln!(
                f,
                "    Cache read:  {}",
                format_tokens(usage.cache_read_input_tokens)
            )?;
            writeln!(
                f,
                "    Cache write: {}",
                format_tokens(usage.cache_creation_input_tokens)
            )?;
        }
        writeln!(f, "  Output: {}", format_tokens(usage.output_tokens))?;
        writeln!(f, "  Total:  {}", format_tokens(usage.total()))
    }

    fn write_tools(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tool Usage: {}", self.summary.tool_use_count)?;
        for (name, count) in self.summary.sorted_tool_counts() {
            writeln!(f, "  {}: {}", name, count)?;
        }
        Ok(())
    }

    fn write_todos(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(todos) = &self.summary.latest_todos else {
            return writeln!(f, "Todos: none");
        };

        let by_status: Vec<String> = todos
            .count_by_status()
            .into_iter()
            .map(|(status, count)| format!("{} {}", count, status))
            .collect();
        if by_status.is_empty() {
            writeln!(f, "Todos: 0")?;
        } else {
            writeln!(f, "Todos: {} ({})", todos.todos.len(), by_status.join(", "))?;
        }

        for todo in &todos.todos {
            writeln!(f, "  {} {}", status_marker(todo), todo.content)?;
        }
        Ok(())
    }

    fn write_dropped(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.diagnostics.is_empty() {
            return Ok(());
        }
        writeln!(f, "Dropped lines:")?;
        for malformed in self.diagnostics {
            writeln!(f, "  {}", malformed)?;
        }
        Ok(())
    }
}

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        writeln!(f)?;
        self.write_counts(f)?;
        writeln!(f)?;
        self.write_tokens(f)?;
        writeln!(f)?;
        self.write_tools(f)?;
        if self.show_todos {
            writeln!(f)?;
            self.write_todos(f)?;
        }
        if self.show_errors && !self.diagnostics.is_empty() {
            writeln!(f)?;
            self.write_dropped(f)?;
        }
        Ok(())
    }
}

// ===== Formatting Helpers =====

fn status_marker(todo: &TodoItem) -> &'static str {
    match todo.status.as_str() {
        "completed" => "[x]",
        "in_progress" => "[~]",
        _ => "[ ]",
    }
}

/// Format a token count with thousands separators.
///
/// Examples:
/// - `format_tokens(0)` → "0"
/// - `format_tokens(1234)` → "1,234"
/// - `format_tokens(1234567)` → "1,234,567"
pub fn format_tokens(tokens: u64) -> String {
    let digits = tokens.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

// ===== Tests =====
