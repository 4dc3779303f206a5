use smallvec::SmallVec;

use crate::ir::{SyntaxKind, SyntaxNode};
use crate::shape::PatternShape;

/// Identifiers introduced by a pattern or declaration, in source order.
///
/// These are the tree's own `lower_case_id` leaves, so callers can take spans
/// from them directly. Repeated names are kept.
pub type Binding<'t> = SmallVec<[SyntaxNode<'t>; 4]>;

/// Collect the value identifiers bound by `pattern`.
pub fn bind(pattern: Option<SyntaxNode<'_>>) -> Binding<'_> {
    let mut out = Binding::new();
    if let Some(pattern) = pattern {
        bind_into(pattern, &mut out);
    }
    out
}

fn bind_into<'t>(node: SyntaxNode<'t>, out: &mut Binding<'t>) {
    match PatternShape::of(node) {
        PatternShape::Simple(id) => out.push(id),
        PatternShape::Container(n)
        | PatternShape::List(n)
        | PatternShape::Tuple(n)
        | PatternShape::Union(n)
        | PatternShape::Parenthesized(n) => {
            for child in n.children() {
                bind_into(child, out);
            }
        }
        PatternShape::Record(n) => {
            out.extend(n.children_by_kind(SyntaxKind::LowerCaseId));
        }
        PatternShape::Ignored => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::parse_tree;
    use crate::tree::SyntaxTree;
    use pretty_assertions::assert_eq;

    fn names(tree: &SyntaxTree) -> Vec<&str> {
        bind(Some(tree.root())).iter().map(|n| n.name()).collect()
    }

    #[test]
    fn test_none_binds_nothing() {
        assert!(bind(None).is_empty());
    }

    #[test]
    fn test_simple_and_wildcard() {
        let tree = parse_tree("(pattern x)").unwrap();
        assert_eq!(names(&tree), vec!["x"]);

        let tree = parse_tree("(pattern _)").unwrap();
        assert!(names(&tree).is_empty());
    }

    #[test]
    fn test_record_pattern_lists_field_names() {
        let tree = parse_tree(r#"(pattern (record_pattern "{" name "," age "}"))"#).unwrap();
        assert_eq!(names(&tree), vec!["name", "age"]);
    }

    #[test]
    fn test_cons_and_alias_keep_source_order() {
        // (x :: xs) as all
        let tree = parse_tree(
            r#"(pattern
                 (parenthesed_pattern "(" (pattern x "::" xs) ")")
                 "as" all)"#,
        )
        .unwrap();
        assert_eq!(names(&tree), vec!["x", "xs", "all"]);
    }

    #[test]
    fn test_constructors_and_literals_bind_nothing() {
        let tree = parse_tree(
            r#"(pattern (union_pattern (upper_case_path Just) (pattern (literal "0"))))"#,
        )
        .unwrap();
        assert!(names(&tree).is_empty());
    }

    #[test]
    fn test_repeated_names_are_kept() {
        let tree = parse_tree(r#"(pattern (tuple_pattern "(" (pattern a) "," (pattern a) ")"))"#).unwrap();
        assert_eq!(names(&tree), vec!["a", "a"]);
    }
}
