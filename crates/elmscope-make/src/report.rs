//! The `--report=json` output of `elm-make`.
//!
//! Every line of stdout that starts with `[` is a JSON array of problems;
//! anything else is progress chatter.
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

/// 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub start: Position,
    pub end: Position,
}

impl Region {
    pub fn is_multi_line(&self) -> bool {
        self.start.line != self.end.line
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeProblem {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub subregion: Option<Region>,
    #[serde(default)]
    pub details: String,
    pub region: Region,
    #[serde(rename = "type")]
    pub kind: String,
    pub file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    /// A warning about something that can simply be deleted.
    Unused,
}

impl MakeProblem {
    pub fn severity(&self) -> Severity {
        match (self.kind.as_str(), self.tag.as_str()) {
            ("warning", "unused import") => Severity::Unused,
            ("warning", _) => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// The region to highlight, preferring the narrower subregion.
    pub fn highlight_region(&self) -> Region {
        self.subregion.unwrap_or(self.region)
    }

    /// True when this problem was reported for `canonical_path`.
    ///
    /// `elm-make` reports paths relative to the project root as `./src/...`.
    pub fn belongs_to(&self, project_root: &Path, canonical_path: &Path) -> bool {
        let root = format!("{}/", project_root.display());
        self.file.replace("./", &root) == canonical_path.to_string_lossy()
    }
}

/// Parse every JSON line of `elm-make` output, skipping malformed lines.
pub fn parse_report(output: &str) -> Vec<MakeProblem> {
    let mut problems = Vec::new();
    for line in output.lines().filter(|line| line.starts_with('[')) {
        match serde_json::from_str::<Vec<MakeProblem>>(line) {
            Ok(batch) => problems.extend(batch),
            Err(err) => {
                tracing::error!(error = %err, line, "could not parse elm-make report line");
            }
        }
    }
    problems
}
