//! `elm-make` diagnostics for single Elm files.
//!
//! Every failure on the way (disabled settings, no project root, a missing
//! executable, unreadable output) is logged and yields no diagnostics.
pub mod highlight;
pub mod invoke;
pub mod project;
pub mod report;
pub mod settings;

use std::fs;
use std::path::Path;

use serde::Serialize;

use elmscope_core::Span;

pub use highlight::LineIndex;
pub use invoke::ElmMake;
pub use project::{PROJECT_FILE_NAME, find_project_root};
pub use report::{MakeProblem, Position, Region, Severity, parse_report};
pub use settings::{MakeSettings, SETTINGS_FILE_NAME, Settings};

/// One problem mapped onto the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub tag: String,
    pub overview: String,
    pub details: String,
    /// Byte range to highlight.
    pub span: Span,
    /// 1-based start of the full region.
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    pub fn from_problem(problem: &MakeProblem, index: &LineIndex<'_>) -> Self {
        Self {
            severity: problem.severity(),
            tag: problem.tag.clone(),
            overview: problem.overview.clone(),
            details: problem.details.clone(),
            span: index.highlight(problem.highlight_region()),
            line: problem.region.start.line,
            column: problem.region.start.column,
        }
    }
}

/// Map raw `elm-make` output onto `source`, keeping only problems of
/// `canonical_path`.
pub fn diagnostics_from_output(
    output: &str,
    project_root: &Path,
    canonical_path: &Path,
    source: &str,
) -> Vec<Diagnostic> {
    let index = LineIndex::new(source);
    parse_report(output)
        .iter()
        .filter(|problem| problem.belongs_to(project_root, canonical_path))
        .map(|problem| Diagnostic::from_problem(problem, &index))
        .collect()
}

/// Run `elm-make` for `file` and return its diagnostics.
#[tracing::instrument(skip_all, fields(file = %file.display()))]
pub fn diagnostics_for_file(settings: &MakeSettings, file: &Path) -> Vec<Diagnostic> {
    if !settings.enabled {
        tracing::debug!("elm-make disabled");
        return Vec::new();
    }

    let canonical = match fs::canonicalize(file) {
        Ok(path) => path,
        Err(err) => {
            tracing::warn!(error = %err, "cannot resolve source path");
            return Vec::new();
        }
    };
    let Some(root) = find_project_root(&canonical) else {
        tracing::debug!("no {PROJECT_FILE_NAME} above file");
        return Vec::new();
    };

    let Some(output) = ElmMake::new(&settings.executable).run(&root, &canonical) else {
        return Vec::new();
    };

    let source = match fs::read_to_string(&canonical) {
        Ok(source) => source,
        Err(err) => {
            tracing::warn!(error = %err, "cannot read source for highlighting");
            return Vec::new();
        }
    };

    let diagnostics = diagnostics_from_output(&output, &root, &canonical, &source);
    tracing::info!(count = diagnostics.len(), "elm-make diagnostics");
    diagnostics
}
