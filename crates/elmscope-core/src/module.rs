//! Flat facts about module headers and import clauses.
use crate::ir::{SyntaxKind, SyntaxNode};
use crate::query::{first_descendant_of_kind, is_any_child};

/// The dotted module path of a module declaration or import clause.
pub fn module_name(node: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    first_descendant_of_kind(node, SyntaxKind::UpperCasePath)
}

/// True when `node` exposes everything with `(..)`.
///
/// Only direct children are checked. An import clause is answered by its
/// exposing clause; an import without one exposes nothing.
pub fn is_exposing_all(node: SyntaxNode<'_>) -> bool {
    if node.is_kind(SyntaxKind::ImportClause) {
        return exposing_clause(node).is_some_and(is_exposing_all);
    }
    is_any_child(node, |child| child.is_kind(SyntaxKind::DoubleDot))
}

pub fn exposing_clause(import: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    import.child_by_kind(SyntaxKind::ExposingClause)
}

/// Value names listed explicitly in an exposing list.
///
/// Accepts an import clause, an exposing clause or a module declaration.
pub fn exposed_values(node: SyntaxNode<'_>) -> Vec<SyntaxNode<'_>> {
    let list = if node.is_kind(SyntaxKind::ImportClause) {
        match exposing_clause(node) {
            Some(clause) => clause,
            None => return Vec::new(),
        }
    } else {
        node
    };
    list.children_by_kind(SyntaxKind::LowerCaseId).collect()
}

/// `Attr` in `import Html.Attributes as Attr`.
pub fn import_alias(import: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    import
        .child_by_kind(SyntaxKind::AsClause)?
        .child_by_kind(SyntaxKind::UpperCaseId)
}

pub fn imports(module: SyntaxNode<'_>) -> Vec<SyntaxNode<'_>> {
    module.children_by_kind(SyntaxKind::ImportClause).collect()
}

pub fn module_declaration(module: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    module.child_by_kind(SyntaxKind::ModuleDeclaration)
}
