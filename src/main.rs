//! cclog - Entry Point

use cclog::config::{resolve_config, CliOverrides};
use cclog::model::error::AppError;
use cclog::model::{session_path, SessionUuid};
use cclog::source::detect_input_source;
use cclog::view::{SessionOrigin, SummaryView};
use clap::Parser;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

/// Summarize a Claude Code JSONL session transcript
#[derive(Parser, Debug)]
#[command(name = "cclog")]
#[command(version)]
#[command(about = "Decode a Claude Code JSONL transcript and print a session summary")]
pub struct Args {
    /// Path to JSONL transcript (reads from stdin if not provided)
    #[arg(conflicts_with_all = ["project", "session"])]
    pub file: Option<PathBuf>,

    /// Project directory name under the projects root
    #[arg(long, requires = "session")]
    pub project: Option<String>,

    /// Session UUID within the project
    #[arg(long, requires = "project")]
    pub session: Option<String>,

    /// Root directory holding project transcripts
    #[arg(long)]
    pub projects_dir: Option<PathBuf>,

    /// Do not print the latest todo list
    #[arg(long)]
    pub no_todos: bool,

    /// Print every dropped line with its decode error
    #[arg(long)]
    pub errors: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Flags that take part in config resolution. Unset flags leave lower layers alone.
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            projects_dir: self.projects_dir.clone(),
            show_todos: self.no_todos.then_some(false),
            show_errors: self.errors.then_some(true),
        }
    }
}

/// Resolve `--project`/`--session` to a transcript path.
fn resolve_session(projects_dir: &Path, project: &str, session: &str) -> Result<PathBuf, AppError> {
    let mut components = Path::new(project).components();
    let single_segment = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single_segment {
        return Err(AppError::InvalidSession(format!(
            "project '{}' must be a single directory name",
            project
        )));
    }

    let session = SessionUuid::new(session)
        .map_err(|e| AppError::InvalidSession(format!("'{}': {}", session, e)))?;
    Ok(session_path(projects_dir, project, &session))
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = resolve_config(args.config.clone(), args.overrides())?;

    cclog::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let path = match (&args.project, &args.session) {
        (Some(project), Some(session)) => {
            Some(resolve_session(&config.projects_dir, project, session)?)
        }
        _ => args.file.clone(),
    };
    let origin = path
        .as_deref()
        .map(SessionOrigin::from_path)
        .unwrap_or_default();

    let session = detect_input_source(path)?.decode()?;
    let summary = session.summary();

    let view = SummaryView::new(&summary, &session.diagnostics)
        .with_origin(origin)
        .show_todos(config.show_todos)
        .show_errors(config.show_errors);

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", view)?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cclog: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const UUID: &str = "91cc2e2a-2d04-46ba-a5cf-5fcadf00f1da";

    #[test]
    fn test_help_does_not_error() {
        // Help returns Err with DisplayHelp, which is success
        let err = Args::try_parse_from(["cclog", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let err = Args::try_parse_from(["cclog", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["cclog"]);
        assert_eq!(args.file, None);
        assert_eq!(args.project, None);
        assert_eq!(args.session, None);
        assert_eq!(args.projects_dir, None);
        assert!(!args.no_todos);
        assert!(!args.errors);
        assert_eq!(args.config, None);
        assert_eq!(args.overrides(), CliOverrides::default());
    }

    #[test]
    fn test_file_path_populates_file_field() {
        let args = Args::parse_from(["cclog", "test.jsonl"]);
        assert_eq!(args.file, Some(PathBuf::from("test.jsonl")));
    }

    #[test]
    fn test_project_requires_session() {
        let err = Args::try_parse_from(["cclog", "--project", "p"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_file_conflicts_with_project() {
        let result =
            Args::try_parse_from(["cclog", "x.jsonl", "--project", "p", "--session", UUID]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_flags_become_overrides() {
        let args = Args::parse_from([
            "cclog",
            "--no-todos",
            "--errors",
            "--projects-dir",
            "/data/projects",
        ]);
        assert_eq!(
            args.overrides(),
            CliOverrides {
                projects_dir: Some(PathBuf::from("/data/projects")),
                show_todos: Some(false),
                show_errors: Some(true),
            }
        );
    }

    #[test]
    fn test_resolve_session_builds_storage_path() {
        let path = resolve_session(Path::new("/data/projects"), "-srv-app", UUID).unwrap();
        assert_eq!(
            path,
            PathBuf::from(format!("/data/projects/-srv-app/{}.jsonl", UUID))
        );
    }

    #[test]
    fn test_resolve_session_rejects_bad_uuid() {
        let result = resolve_session(Path::new("/p"), "proj", "not-a-uuid");
        assert!(matches!(result, Err(AppError::InvalidSession(_))));
    }

    #[test]
    fn test_resolve_session_rejects_nested_project() {
        for project in ["../etc", "a/b", "", "/abs"] {
            let result = resolve_session(Path::new("/p"), project, UUID);
            assert!(
                matches!(result, Err(AppError::InvalidSession(_))),
                "project {:?} should be rejected",
                project
            );
        }
    }
}
