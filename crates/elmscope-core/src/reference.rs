//! Reference extraction.
//!
//! [`references`] walks an expression-like subtree and returns every value
//! identifier used in it. Each recursive call anchors what it found at its own
//! node; the caller then re-anchors the results at itself, so the top-level
//! call hands back occurrences anchored at the node it was given.
use crate::ir::{Span, SyntaxKind, SyntaxNode};
use crate::query::descendants_of_kinds;
use crate::shape::ExprShape;

/// One identifier usage and the node scope search starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceOccurrence<'t> {
    ident: SyntaxNode<'t>,
    qualifier: Option<SyntaxNode<'t>>,
    anchor: SyntaxNode<'t>,
    range_in_anchor: Span,
}

impl<'t> ReferenceOccurrence<'t> {
    /// An occurrence anchored at `anchor`, which must contain `ident`.
    pub fn new(
        ident: SyntaxNode<'t>,
        qualifier: Option<SyntaxNode<'t>>,
        anchor: SyntaxNode<'t>,
    ) -> Self {
        debug_assert!(
            anchor.contains_node(ident),
            "anchor {anchor:?} does not contain {ident:?}"
        );
        Self {
            ident,
            qualifier,
            anchor,
            range_in_anchor: ident.span().relative_to(anchor.span().start),
        }
    }

    /// The same usage re-anchored at `ancestor`, with the relative range
    /// recomputed from the current spans.
    pub fn in_ancestor(self, ancestor: SyntaxNode<'t>) -> Self {
        Self::new(self.ident, self.qualifier, ancestor)
    }

    pub fn ident(&self) -> SyntaxNode<'t> {
        self.ident
    }

    pub fn name(&self) -> &'t str {
        self.ident.name()
    }

    /// The `upper_case_path` of a `Module.value` usage.
    pub fn qualifier(&self) -> Option<SyntaxNode<'t>> {
        self.qualifier
    }

    pub fn anchor(&self) -> SyntaxNode<'t> {
        self.anchor
    }

    /// Byte range of the identifier relative to the anchor's start.
    pub fn range_in_anchor(&self) -> Span {
        self.range_in_anchor
    }

    /// Absolute byte range of the identifier.
    pub fn range(&self) -> Span {
        self.ident.span()
    }
}

/// Every reference under `node`, in source order, anchored at `node`.
#[tracing::instrument(skip_all, fields(kind = %node.kind(), id = %node.id()))]
pub fn references(node: SyntaxNode<'_>) -> Vec<ReferenceOccurrence<'_>> {
    let found = walk(node);
    tracing::trace!(count = found.len(), "references collected");
    found
}

fn walk(node: SyntaxNode<'_>) -> Vec<ReferenceOccurrence<'_>> {
    match ExprShape::of(node) {
        ExprShape::ValuePath(path) => value_path(path).into_iter().collect(),
        ExprShape::QualifiedPath(path) => qualified_path(path).into_iter().collect(),
        ExprShape::Expression(n) => nested(n, |child| {
            matches!(
                child.kind(),
                SyntaxKind::ListOfOperands | SyntaxKind::BacktickedFunction
            )
        }),
        ExprShape::Operands(n) => nested(n, |child| {
            matches!(
                ExprShape::of(child),
                ExprShape::Wrapper(_)
                    | ExprShape::WrapperList(_)
                    | ExprShape::LetIn(_)
                    | ExprShape::Record(_)
                    | ExprShape::ValuePath(_)
            )
        }),
        ExprShape::Backticked(n) => descendants_of_kinds(
            n,
            &[SyntaxKind::LowerCasePath, SyntaxKind::MixedCasePath],
        )
        .into_iter()
        .flat_map(walk)
        .map(|r| r.in_ancestor(n))
        .collect(),
        ExprShape::Record(n) => {
            let base = n
                .child_by_kind(SyntaxKind::LowerCaseId)
                .map(|id| ReferenceOccurrence::new(id, None, n));
            base.into_iter()
                .chain(nested(n, |child| child.is_kind(SyntaxKind::Field)))
                .collect()
        }
        ExprShape::Wrapper(n) => nested(n, |child| child.is_kind(SyntaxKind::Expression)),
        ExprShape::WrapperList(n) => nested(n, |child| {
            matches!(child.kind(), SyntaxKind::Expression | SyntaxKind::CaseOfBranch)
        }),
        ExprShape::LetIn(n) => nested(n, |child| {
            matches!(
                child.kind(),
                SyntaxKind::ValueDeclaration | SyntaxKind::Expression
            )
        }),
        ExprShape::Declaration(n) => nested(n, |child| child.is_kind(SyntaxKind::Expression)),
        ExprShape::Module(n) => nested(n, |child| child.is_kind(SyntaxKind::ValueDeclaration)),
        ExprShape::Opaque => {
            tracing::trace!(kind = %node.kind(), "no references");
            Vec::new()
        }
    }
}

/// Walk the selected children in order and re-anchor what they return.
fn nested<'t>(
    node: SyntaxNode<'t>,
    select: impl Fn(SyntaxNode<'t>) -> bool,
) -> Vec<ReferenceOccurrence<'t>> {
    node.children()
        .filter(|child| select(*child))
        .flat_map(walk)
        .map(|r| r.in_ancestor(node))
        .collect()
}

/// `a.b.c` refers to `a`; the rest are field accesses.
fn value_path(path: SyntaxNode<'_>) -> Option<ReferenceOccurrence<'_>> {
    path.child_by_kind(SyntaxKind::LowerCaseId)
        .map(|id| ReferenceOccurrence::new(id, None, path))
}

/// `Module.value` refers to `value` through the `Module` qualifier.
fn qualified_path(path: SyntaxNode<'_>) -> Option<ReferenceOccurrence<'_>> {
    let id = path.child_by_kind(SyntaxKind::LowerCaseId)?;
    let qualifier = path.child_by_kind(SyntaxKind::UpperCasePath);
    Some(ReferenceOccurrence::new(id, qualifier, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::parse_tree;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_update_order() {
        // { base | field1 = x, field2 = y }
        let tree = parse_tree(
            r#"(record "{" base "|"
                 (field field1 "=" (expression (list_of_operands (lower_case_path x))))
                 ","
                 (field field2 "=" (expression (list_of_operands (lower_case_path y))))
                 "}")"#,
        )
        .unwrap();
        let root = tree.root();
        let refs = references(root);
        let names: Vec<_> = refs.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["base", "x", "y"]);
        assert!(refs.iter().all(|r| r.anchor() == root));
    }

    #[test]
    fn test_range_is_relative_to_anchor() {
        let tree = parse_tree(
            r#"(expression (list_of_operands (lower_case_path f) (parenthesed_expression "(" (expression (list_of_operands (lower_case_path g))) ")")))"#,
        )
        .unwrap();
        let refs = references(tree.root());
        assert_eq!(refs.len(), 2);
        // f ( g )
        assert_eq!(refs[1].range(), Span::new(4, 5));
        assert_eq!(refs[1].range_in_anchor(), Span::new(4, 5));

        let paren = tree.nodes().find(|n| n.is_kind(SyntaxKind::ParenthesedExpression)).unwrap();
        let inner = references(paren);
        assert_eq!(inner[0].anchor(), paren);
        assert_eq!(inner[0].range_in_anchor(), Span::new(2, 3));
        assert_eq!(inner[0].in_ancestor(tree.root()), refs[1]);
    }

    #[test]
    fn test_qualified_and_field_access() {
        // List.map model.items ++ model `String.append` suffix
        let tree = parse_tree(
            r#"(expression
                 (list_of_operands
                   (mixed_case_path (upper_case_path List) "." map)
                   (lower_case_path model "." items))
                 (operator "++")
                 (backticked_function "`" (mixed_case_path (upper_case_path String) "." append) "`"))"#,
        )
        .unwrap();
        let refs = references(tree.root());
        let names: Vec<_> = refs.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["model", "append"]);
        assert_eq!(refs[0].qualifier(), None);
        assert_eq!(refs[1].qualifier().map(|q| q.kind()), Some(SyntaxKind::UpperCasePath));
    }

    #[test]
    fn test_operands_skip_qualified_paths() {
        let tree = parse_tree(
            r#"(list_of_operands (mixed_case_path (upper_case_path List) "." map) (lower_case_path x))"#,
        )
        .unwrap();
        let names: Vec<_> = references(tree.root()).iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn test_literals_and_constructors_are_ignored() {
        let tree = parse_tree(
            r#"(list_of_operands (upper_case_path Just) (literal "1") (operator "+"))"#,
        )
        .unwrap();
        assert!(references(tree.root()).is_empty());
    }
}
