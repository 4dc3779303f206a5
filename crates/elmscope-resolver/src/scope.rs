use elmscope_core::{
    Binding, SyntaxKind, SyntaxNode, bind, declared_names, exposed_values, imports,
    is_exposing_all, parameters,
};
use strum_macros::{Display, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ScopeKind {
    /// Top-level declarations plus imported names.
    Module,
    /// Parameters of a function equation.
    Declaration,
    LetIn,
    Lambda,
    CaseBranch,
}

/// A scope-bearing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<'t> {
    node: SyntaxNode<'t>,
    kind: ScopeKind,
}

impl<'t> Scope<'t> {
    pub fn of(node: SyntaxNode<'t>) -> Option<Self> {
        let kind = match node.kind() {
            SyntaxKind::Module => ScopeKind::Module,
            SyntaxKind::ValueDeclaration => ScopeKind::Declaration,
            SyntaxKind::LetIn => ScopeKind::LetIn,
            SyntaxKind::Lambda => ScopeKind::Lambda,
            SyntaxKind::CaseOfBranch => ScopeKind::CaseBranch,
            _ => return None,
        };
        Some(Self { node, kind })
    }

    pub fn node(&self) -> SyntaxNode<'t> {
        self.node
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Names this scope introduces, in source order.
    ///
    /// For a module this is only its own declarations; imported names are
    /// looked up separately so they lose against local ones.
    pub fn names(&self) -> Binding<'t> {
        match self.kind {
            ScopeKind::Module | ScopeKind::LetIn => declared_names(self.node),
            ScopeKind::Declaration => parameters(self.node),
            ScopeKind::Lambda | ScopeKind::CaseBranch => self
                .node
                .children()
                .take_while(|child| !child.is_kind(SyntaxKind::Expression))
                .flat_map(|child| bind(Some(child)))
                .collect(),
        }
    }

    /// First name in this scope spelled like `name`.
    pub fn lookup(&self, name: &str) -> Option<SyntaxNode<'t>> {
        self.names().into_iter().find(|id| id.name() == name)
    }
}

/// Scope-bearing nodes around `node`, innermost first.
///
/// `node` itself is included when it bears a scope.
pub fn scopes_around(node: SyntaxNode<'_>) -> impl Iterator<Item = Scope<'_>> {
    std::iter::once(node)
        .chain(node.ancestors())
        .filter_map(Scope::of)
}

/// Import facts of one module, gathered once per file.
#[derive(Debug, Clone, Default)]
pub struct ImportTable<'t> {
    entries: Vec<ImportEntry<'t>>,
}

#[derive(Debug, Clone)]
pub struct ImportEntry<'t> {
    pub clause: SyntaxNode<'t>,
    /// Dotted module path, `Html.Attributes`.
    pub module: String,
    pub alias: Option<&'t str>,
    pub exposing_all: bool,
    pub exposed: Vec<SyntaxNode<'t>>,
}

impl<'t> ImportTable<'t> {
    pub fn of_module(module: SyntaxNode<'t>) -> Self {
        let entries = imports(module)
            .into_iter()
            .map(|clause| ImportEntry {
                clause,
                module: elmscope_core::module_name(clause)
                    .map(elmscope_core::query::path_text)
                    .unwrap_or_default(),
                alias: elmscope_core::import_alias(clause).map(|a| a.name()),
                exposing_all: is_exposing_all(clause),
                exposed: exposed_values(clause),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ImportEntry<'t>] {
        &self.entries
    }

    /// The identifier inside an explicit exposing list named `name`.
    pub fn exposed(&self, name: &str) -> Option<SyntaxNode<'t>> {
        self.entries
            .iter()
            .flat_map(|entry| entry.exposed.iter().copied())
            .find(|id| id.name() == name)
    }

    /// First import exposing everything, in source order.
    pub fn first_wildcard(&self) -> Option<SyntaxNode<'t>> {
        self.entries
            .iter()
            .find(|entry| entry.exposing_all)
            .map(|entry| entry.clause)
    }

    /// The import a qualifier such as `Html.Attributes` or `Attr` names.
    pub fn by_qualifier(&self, qualifier: &str) -> Option<SyntaxNode<'t>> {
        self.entries
            .iter()
            .find(|entry| entry.alias == Some(qualifier) || entry.module == qualifier)
            .map(|entry| entry.clause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elmscope_core::parse_tree;

    #[test]
    fn test_lambda_and_branch_names_stop_at_body() {
        let tree = parse_tree(
            r#"(lambda "\\" (pattern a) (pattern (tuple_pattern "(" (pattern b) "," (pattern c) ")")) "->"
                 (expression (list_of_operands (lambda "\\" (pattern d) "->" (expression)))))"#,
        )
        .unwrap();
        let scope = Scope::of(tree.root()).unwrap();
        assert_eq!(scope.kind(), ScopeKind::Lambda);
        let names: Vec<_> = scope.names().iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(scope.lookup("d").is_none());
    }

    #[test]
    fn test_scopes_around_innermost_first() {
        let tree = parse_tree(
            r#"(module (value_declaration (function_declaration_left f x) "="
                 (expression (list_of_operands (let_in "let" "in" (expression (list_of_operands (lower_case_path x))))))))"#,
        )
        .unwrap();
        let x = tree.nodes().filter(|n| n.name() == "x").last().unwrap();
        let kinds: Vec<_> = scopes_around(x).map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![ScopeKind::LetIn, ScopeKind::Declaration, ScopeKind::Module]
        );
    }

    #[test]
    fn test_import_table() {
        let tree = parse_tree(
            r#"(module
                 (import_clause "import" (upper_case_path Html "." Attributes) (as_clause "as" Attr) (exposing_clause "exposing" "(" class ")"))
                 (import_clause "import" (upper_case_path Html) (exposing_clause "exposing" "(" .. ")")))"#,
        )
        .unwrap();
        let table = ImportTable::of_module(tree.root());
        assert_eq!(table.entries().len(), 2);
        assert_eq!(table.exposed("class").map(|n| n.name()), Some("class"));
        assert_eq!(table.first_wildcard(), Some(table.entries()[1].clause));
        assert_eq!(table.by_qualifier("Attr"), Some(table.entries()[0].clause));
        assert_eq!(table.by_qualifier("Html.Attributes"), Some(table.entries()[0].clause));
        assert_eq!(table.by_qualifier("Html"), Some(table.entries()[1].clause));
        assert!(table.by_qualifier("Json").is_none());
    }
}
