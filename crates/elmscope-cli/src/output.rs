//! Output rendering: one section per file, as text or JSON.

use std::fmt::Write;

use serde::Serialize;

use elmscope_core::Span;
use elmscope_error::{Error, ErrorKind, Result};
use elmscope_make::Diagnostic;
use elmscope_resolver::{ReferenceRecord, TextEdit};

/// Results for one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport<T> {
    pub file: String,
    pub items: Vec<T>,
}

impl<T> FileReport<T> {
    pub fn new(file: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            file: file.into(),
            items,
        }
    }
}

/// A declared top-level name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameRow {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedRow {
    pub message: String,
    pub span: Span,
}

/// Single-line text form of a row.
pub trait TextLine {
    fn text_line(&self) -> String;
}

impl TextLine for NameRow {
    fn text_line(&self) -> String {
        format!("{} {}", self.name, self.span)
    }
}

impl TextLine for UnusedRow {
    fn text_line(&self) -> String {
        format!("{} {}", self.span, self.message)
    }
}

impl TextLine for ReferenceRecord {
    fn text_line(&self) -> String {
        let name = match &self.qualifier {
            Some(qualifier) => format!("{qualifier}.{}", self.name),
            None => self.name.clone(),
        };
        let mut line = format!("{} {name} {}", self.span, self.resolution);
        if let Some(target) = self.target {
            let _ = write!(line, " -> {target}");
        }
        line
    }
}

impl TextLine for TextEdit {
    fn text_line(&self) -> String {
        format!("{} {}", self.span, self.new_text)
    }
}

impl TextLine for Diagnostic {
    fn text_line(&self) -> String {
        format!(
            "{}:{} {} [{}] {}",
            self.line, self.column, self.severity, self.tag, self.overview
        )
    }
}

/// Render reports as text, or as a pretty JSON array when `json` is set.
pub fn render_reports<T>(reports: &[FileReport<T>], json: bool) -> Result<String>
where
    T: Serialize + TextLine,
{
    if json {
        return serde_json::to_string_pretty(reports).map_err(|err| {
            Error::new(ErrorKind::SerializationFailed, err.to_string())
                .with_operation("output::render_reports")
                .set_source(err)
        });
    }

    let mut out = String::new();
    for report in reports {
        let _ = writeln!(out, "{}:", report.file);
        for item in &report.items {
            let _ = writeln!(out, "  {}", item.text_line());
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_rendering() {
        let reports = vec![FileReport::new(
            "Main.sexp",
            vec![ReferenceRecord {
                name: "text".into(),
                qualifier: Some("Html".into()),
                span: Span::new(10, 14),
                resolution: "import",
                target: Some(Span::new(0, 4)),
            }],
        )];
        assert_eq!(
            render_reports(&reports, false).unwrap(),
            "Main.sexp:\n  10..14 Html.text import -> 0..4\n"
        );
    }

    #[test]
    fn test_json_rendering() {
        let reports = vec![FileReport::new(
            "Main.sexp",
            vec![NameRow {
                name: "main".into(),
                span: Span::new(0, 4),
            }],
        )];
        let value: serde_json::Value =
            serde_json::from_str(&render_reports(&reports, true).unwrap()).unwrap();
        assert_eq!(value[0]["file"], "Main.sexp");
        assert_eq!(value[0]["items"][0]["name"], "main");
        assert_eq!(value[0]["items"][0]["span"]["end"], 4);
    }
}
