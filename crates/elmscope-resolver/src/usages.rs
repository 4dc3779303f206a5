//! Find-usages, rename and unused-import detection.
use serde::Serialize;

use elmscope_core::query::path_text;
use elmscope_core::{Span, SyntaxKind, SyntaxNode};
use elmscope_error::{Error, Result};

use crate::resolve::{Reference, Resolution, Resolver};
use crate::scope::ImportEntry;

const KEYWORDS: &[&str] = &[
    "if", "then", "else", "case", "of", "let", "in", "type", "module", "where", "import",
    "exposing", "as", "port", "alias", "infix", "infixl", "infixr",
];

/// The declaring identifier at `offset`.
///
/// A usage answers with the identifier it resolves to; a binding site
/// answers with itself.
pub fn declaration_at<'t>(resolver: &Resolver<'t>, offset: usize) -> Result<SyntaxNode<'t>> {
    let location = || format!("{}:{offset}", resolver.tree().file_name().unwrap_or("<tree>"));
    let ident = resolver
        .tree()
        .identifier_at(offset)
        .filter(|id| id.is_kind(SyntaxKind::LowerCaseId))
        .ok_or_else(|| Error::symbol_not_found(location()).with_operation("usages::declaration_at"))?;

    let usage = resolver
        .references()
        .into_iter()
        .find(|r| r.occurrence().ident() == ident);
    match usage {
        Some(reference) => reference
            .resolve(resolver)
            .declaration()
            .ok_or_else(|| Error::symbol_not_found(location()).with_operation("usages::declaration_at")),
        None => Ok(ident),
    }
}

/// Every reference in the file that resolves to `declaration`, in source order.
#[tracing::instrument(skip_all, fields(name = declaration.name()))]
pub fn find_usages<'t>(resolver: &Resolver<'t>, declaration: SyntaxNode<'t>) -> Vec<Reference<'t>> {
    let usages: Vec<_> = resolver
        .references()
        .into_iter()
        .filter(|r| r.resolve(resolver) == Resolution::ResolvedTo(declaration))
        .collect();
    tracing::debug!(count = usages.len(), "usages found");
    usages
}

/// One replacement in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub span: Span,
    pub new_text: String,
}

pub fn is_valid_lower_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_lowercase()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !KEYWORDS.contains(&name)
}

/// Edits renaming `declaration` and all its usages to `new_name`, sorted by
/// position.
pub fn rename_edits<'t>(
    resolver: &Resolver<'t>,
    declaration: SyntaxNode<'t>,
    new_name: &str,
) -> Result<Vec<TextEdit>> {
    if !is_valid_lower_identifier(new_name) {
        return Err(Error::invalid_identifier(new_name).with_operation("usages::rename_edits"));
    }
    if !declaration.is_kind(SyntaxKind::LowerCaseId) {
        return Err(Error::invalid_argument(format!(
            "cannot rename {declaration:?}, expected a lower-case identifier"
        ))
        .with_operation("usages::rename_edits"));
    }

    let mut spans: Vec<Span> = std::iter::once(declaration.span())
        .chain(
            find_usages(resolver, declaration)
                .iter()
                .map(|r| r.occurrence().range()),
        )
        .collect();
    spans.sort_by_key(|span| span.start);
    spans.dedup();

    Ok(spans
        .into_iter()
        .map(|span| TextEdit {
            span,
            new_text: new_name.to_string(),
        })
        .collect())
}

/// An import, or a single name it exposes, that nothing in the file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedImport<'t> {
    Import(SyntaxNode<'t>),
    ExposedValue {
        import: SyntaxNode<'t>,
        name: SyntaxNode<'t>,
    },
}

impl<'t> UnusedImport<'t> {
    pub fn node(&self) -> SyntaxNode<'t> {
        match self {
            UnusedImport::Import(node) => *node,
            UnusedImport::ExposedValue { name, .. } => *name,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            UnusedImport::Import(import) => format!(
                "unused import {}",
                elmscope_core::module_name(*import)
                    .map(path_text)
                    .unwrap_or_default()
            ),
            UnusedImport::ExposedValue { name, .. } => {
                format!("unused exposed value {}", name.name())
            }
        }
    }
}

/// Imports that contribute nothing to the file.
///
/// Wildcard imports are never reported, and neither is a whole import that
/// exposes types or constructors, since their usage is not tracked here.
#[tracing::instrument(skip_all)]
pub fn unused_imports<'t>(resolver: &Resolver<'t>) -> Vec<UnusedImport<'t>> {
    let references = resolver.references();
    let resolutions: Vec<_> = references.iter().map(|r| r.resolve(resolver)).collect();
    let qualified_imports: Vec<_> = resolver
        .tree()
        .nodes()
        .filter(|n| n.is_kind(SyntaxKind::MixedCasePath))
        .filter_map(|n| n.child_by_kind(SyntaxKind::UpperCasePath))
        .filter_map(|q| resolver.imports().by_qualifier(&path_text(q)))
        .collect();

    let mut unused = Vec::new();
    for entry in resolver.imports().entries() {
        if entry.exposing_all {
            continue;
        }

        let qualified = qualified_imports.contains(&entry.clause);
        let (used, idle): (Vec<&SyntaxNode<'t>>, Vec<_>) = entry.exposed.iter().partition(|id| {
            resolutions
                .iter()
                .any(|res| *res == Resolution::ResolvedTo(**id))
        });

        if !qualified && used.is_empty() && !exposes_types(entry) {
            tracing::debug!(module = %entry.module, "unused import");
            unused.push(UnusedImport::Import(entry.clause));
        } else {
            unused.extend(idle.into_iter().map(|name| UnusedImport::ExposedValue {
                import: entry.clause,
                name: *name,
            }));
        }
    }
    unused
}

fn exposes_types(entry: &ImportEntry<'_>) -> bool {
    elmscope_core::exposing_clause(entry.clause).is_some_and(|clause| {
        clause
            .descendants()
            .any(|n| n.is_kind(SyntaxKind::UpperCaseId))
    })
}
