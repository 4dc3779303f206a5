use std::cell::OnceCell;

use serde::Serialize;

use elmscope_core::query::path_text;
use elmscope_core::{ReferenceOccurrence, Span, SyntaxKind, SyntaxNode, SyntaxTree, references};

use crate::scope::{ImportTable, ScopeKind, scopes_around};

/// Outcome of looking a reference up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'t> {
    Unresolved,
    /// The declaring identifier: a declaration name, a bound pattern variable
    /// or a name in an import's exposing list.
    ResolvedTo(SyntaxNode<'t>),
    /// Not declared locally; may come from this `import ... exposing (..)`.
    ViaWildcard(SyntaxNode<'t>),
    /// `Module.name` through this import clause.
    ViaImport(SyntaxNode<'t>),
}

impl<'t> Resolution<'t> {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }

    pub fn declaration(&self) -> Option<SyntaxNode<'t>> {
        match self {
            Resolution::ResolvedTo(id) => Some(*id),
            _ => None,
        }
    }

    /// The import clause a name was attributed to, if any.
    pub fn import(&self) -> Option<SyntaxNode<'t>> {
        match self {
            Resolution::ViaWildcard(clause) | Resolution::ViaImport(clause) => Some(*clause),
            Resolution::ResolvedTo(id) => id
                .ancestors()
                .find(|a| a.is_kind(SyntaxKind::ImportClause)),
            Resolution::Unresolved => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Unresolved => "unresolved",
            Resolution::ResolvedTo(_) => "resolved",
            Resolution::ViaWildcard(_) => "wildcard",
            Resolution::ViaImport(_) => "import",
        }
    }
}

/// A reference occurrence with its resolution computed on first use.
#[derive(Debug, Clone)]
pub struct Reference<'t> {
    occurrence: ReferenceOccurrence<'t>,
    resolution: OnceCell<Resolution<'t>>,
}

impl<'t> Reference<'t> {
    pub fn new(occurrence: ReferenceOccurrence<'t>) -> Self {
        Self {
            occurrence,
            resolution: OnceCell::new(),
        }
    }

    pub fn occurrence(&self) -> &ReferenceOccurrence<'t> {
        &self.occurrence
    }

    pub fn name(&self) -> &'t str {
        self.occurrence.name()
    }

    pub fn resolve(&self, resolver: &Resolver<'t>) -> Resolution<'t> {
        *self
            .resolution
            .get_or_init(|| resolver.resolve(&self.occurrence))
    }

    pub fn record(&self, resolver: &Resolver<'t>) -> ReferenceRecord {
        let resolution = self.resolve(resolver);
        ReferenceRecord {
            name: self.name().to_string(),
            qualifier: self.occurrence.qualifier().map(path_text),
            span: self.occurrence.range(),
            resolution: resolution.label(),
            target: resolution
                .declaration()
                .or_else(|| resolution.import())
                .map(|node| node.span()),
        }
    }
}

/// Owned, serialisable summary of one resolved reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    pub span: Span,
    pub resolution: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Span>,
}

/// Resolves references of one snapshot.
#[derive(Debug)]
pub struct Resolver<'t> {
    tree: &'t SyntaxTree,
    imports: ImportTable<'t>,
}

impl<'t> Resolver<'t> {
    pub fn new(tree: &'t SyntaxTree) -> Self {
        let root = tree.root();
        let imports = if root.is_kind(SyntaxKind::Module) {
            ImportTable::of_module(root)
        } else {
            ImportTable::default()
        };
        Self { tree, imports }
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn imports(&self) -> &ImportTable<'t> {
        &self.imports
    }

    /// Every reference in the file, anchored at the root.
    #[tracing::instrument(skip_all)]
    pub fn references(&self) -> Vec<Reference<'t>> {
        self.references_in(self.tree.root())
    }

    pub fn references_in(&self, node: SyntaxNode<'t>) -> Vec<Reference<'t>> {
        references(node).into_iter().map(Reference::new).collect()
    }

    /// Search outward from the identifier for its declaration.
    ///
    /// Scopes are visited innermost first and the first match wins. At the
    /// module boundary local declarations beat explicitly imported names,
    /// which beat the first wildcard import.
    pub fn resolve(&self, occurrence: &ReferenceOccurrence<'t>) -> Resolution<'t> {
        let ident = occurrence.ident();
        if !ident.is_kind(SyntaxKind::LowerCaseId) {
            return Resolution::Unresolved;
        }

        if let Some(qualifier) = occurrence.qualifier() {
            let qualifier = path_text(qualifier);
            let resolution = self
                .imports
                .by_qualifier(&qualifier)
                .map_or(Resolution::Unresolved, Resolution::ViaImport);
            tracing::trace!(name = ident.name(), %qualifier, resolution = resolution.label(), "qualified");
            return resolution;
        }

        let name = ident.name();
        for scope in scopes_around(ident) {
            if let Some(declaration) = scope.lookup(name) {
                tracing::trace!(name, scope = %scope.kind(), "resolved");
                return Resolution::ResolvedTo(declaration);
            }
            if scope.kind() == ScopeKind::Module {
                if let Some(exposed) = self.imports.exposed(name) {
                    return Resolution::ResolvedTo(exposed);
                }
                if let Some(clause) = self.imports.first_wildcard() {
                    return Resolution::ViaWildcard(clause);
                }
                break;
            }
        }

        tracing::trace!(name, "unresolved");
        Resolution::Unresolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elmscope_core::parse_tree;
    use pretty_assertions::assert_eq;

    fn resolve_all<'t>(resolver: &Resolver<'t>) -> Vec<(&'t str, Resolution<'t>)> {
        resolver
            .references()
            .iter()
            .map(|r| (r.name(), r.resolve(resolver)))
            .collect()
    }

    #[test]
    fn test_innermost_binding_shadows_outer() {
        // f x = let x = 1 in x
        let tree = parse_tree(
            r#"(module
                 (value_declaration (function_declaration_left f (pattern x)) "="
                   (expression (list_of_operands
                     (let_in "let"
                       (value_declaration (function_declaration_left x) "=" (expression (list_of_operands (literal "1"))))
                       "in"
                       (expression (list_of_operands (lower_case_path x))))))))"#,
        )
        .unwrap();
        let resolver = Resolver::new(&tree);
        let resolved = resolve_all(&resolver);
        assert_eq!(resolved.len(), 1);
        let target = resolved[0].1.declaration().unwrap();
        assert_eq!(target.parent().unwrap().kind(), SyntaxKind::FunctionDeclarationLeft);
        assert!(
            target
                .ancestors()
                .any(|a| a.is_kind(SyntaxKind::LetIn)),
            "expected the let-bound x, got {target:?}"
        );
    }

    #[test]
    fn test_module_level_lookup_order() {
        let tree = parse_tree(
            r#"(module
                 (import_clause "import" (upper_case_path Html) (exposing_clause "exposing" "(" text ")"))
                 (import_clause "import" (upper_case_path Util) (exposing_clause "exposing" "(" .. ")"))
                 (import_clause "import" (upper_case_path Json "." Decode) (as_clause "as" D))
                 (value_declaration (function_declaration_left main) "="
                   (expression
                     (list_of_operands
                       (lower_case_path helper)
                       (lower_case_path text)
                       (lower_case_path other))
                     (backticked_function "`" (mixed_case_path (upper_case_path D) "." string) "`")
                     (backticked_function "`" (mixed_case_path (upper_case_path Missing) "." thing) "`")))
                 (value_declaration (function_declaration_left helper) "=" (expression)))"#,
        )
        .unwrap();
        let resolver = Resolver::new(&tree);
        let resolved = resolve_all(&resolver);
        let labels: Vec<_> = resolved.iter().map(|(n, r)| (*n, r.label())).collect();
        assert_eq!(
            labels,
            vec![
                ("helper", "resolved"),
                ("text", "resolved"),
                ("other", "wildcard"),
                ("string", "import"),
                ("thing", "unresolved"),
            ]
        );
        let imports = resolver.imports().entries();
        assert_eq!(resolved[1].1.import(), Some(imports[0].clause));
        assert_eq!(resolved[2].1, Resolution::ViaWildcard(imports[1].clause));
        assert_eq!(resolved[3].1, Resolution::ViaImport(imports[2].clause));
    }

    #[test]
    fn test_resolution_is_computed_once() {
        let tree = parse_tree(
            r#"(module (value_declaration (function_declaration_left f a) "=" (expression (list_of_operands (lower_case_path a)))))"#,
        )
        .unwrap();
        let resolver = Resolver::new(&tree);
        let refs = resolver.references();
        let first = refs[0].resolve(&resolver);
        assert_eq!(refs[0].resolve(&resolver), first);
        let record = refs[0].record(&resolver);
        assert_eq!(record.resolution, "resolved");
        assert_eq!(record.target, first.declaration().map(|d| d.span()));
    }

    #[test]
    fn test_fragment_without_module_is_unresolved() {
        let tree = parse_tree("(expression (list_of_operands (lower_case_path y)))").unwrap();
        let resolver = Resolver::new(&tree);
        assert_eq!(resolve_all(&resolver), vec![("y", Resolution::Unresolved)]);
    }
}
