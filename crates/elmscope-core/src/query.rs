//! Small tree-query helpers shared by the binder, walker and module facts.
use crate::ir::{SyntaxKind, SyntaxNode};

/// First strict descendant of `kind` in document order.
pub fn first_descendant_of_kind<'t>(node: SyntaxNode<'t>, kind: SyntaxKind) -> Option<SyntaxNode<'t>> {
    node.descendants().skip(1).find(|n| n.is_kind(kind))
}

/// Strict descendants whose kind is one of `kinds`, in document order.
///
/// The walk does not stop at a match, so a matching node nested inside
/// another match is reported too.
pub fn descendants_of_kinds<'t>(node: SyntaxNode<'t>, kinds: &[SyntaxKind]) -> Vec<SyntaxNode<'t>> {
    node.descendants()
        .skip(1)
        .filter(|n| kinds.contains(&n.kind()))
        .collect()
}

/// Flat scan of direct children; never looks at grandchildren.
pub fn is_any_child(node: SyntaxNode<'_>, pred: impl Fn(SyntaxNode<'_>) -> bool) -> bool {
    node.children().any(pred)
}

/// Nearest strict ancestor satisfying `pred`.
pub fn enclosing<'t>(
    node: SyntaxNode<'t>,
    pred: impl Fn(SyntaxNode<'t>) -> bool,
) -> Option<SyntaxNode<'t>> {
    node.ancestors().find(|a| pred(*a))
}

/// Dotted text of a path node: identifier leaves joined with `.`.
///
/// `(upper_case_path Html "." Attributes)` gives `Html.Attributes`; an
/// identifier leaf gives its own name.
pub fn path_text(node: SyntaxNode<'_>) -> String {
    if node.kind().is_identifier() {
        return node.name().to_string();
    }
    node.descendants()
        .filter(|n| n.kind().is_identifier())
        .map(|n| n.name())
        .collect::<Vec<_>>()
        .join(".")
}
