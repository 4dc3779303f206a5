//! Names introduced by value declarations.
use crate::ir::{SyntaxKind, SyntaxNode};
use crate::pattern::{Binding, bind};
use crate::shape::PatternShape;

/// Direct `value_declaration` children of a module or `let_in`, in source order.
pub fn value_declarations(container: SyntaxNode<'_>) -> Vec<SyntaxNode<'_>> {
    container
        .children_by_kind(SyntaxKind::ValueDeclaration)
        .collect()
}

/// Names a declaration introduces into its enclosing scope.
///
/// A function equation contributes its name; a pattern binding contributes
/// everything the pattern binds. A declaration with neither gives nothing.
pub fn defined_names(declaration: SyntaxNode<'_>) -> Binding<'_> {
    let mut out = Binding::new();
    for child in declaration.children() {
        if child.is_kind(SyntaxKind::FunctionDeclarationLeft) {
            out.extend(function_name(child));
        } else if PatternShape::of(child).is_structured() {
            out.extend(bind(Some(child)));
        }
    }
    out
}

/// The name identifier of a `function_declaration_left`.
pub fn function_name(left: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    left.child_by_kind(SyntaxKind::LowerCaseId)
}

/// Names bound by the parameter patterns of a function equation.
///
/// Empty for pattern bindings such as `(a, b) = pair`.
pub fn parameters(declaration: SyntaxNode<'_>) -> Binding<'_> {
    let mut out = Binding::new();
    let Some(left) = declaration.child_by_kind(SyntaxKind::FunctionDeclarationLeft) else {
        return out;
    };
    let name = function_name(left);
    for child in left.children() {
        if Some(child) == name {
            continue;
        }
        out.extend(bind(Some(child)));
    }
    out
}

/// Every name declared directly inside `container`.
pub fn declared_names(container: SyntaxNode<'_>) -> Binding<'_> {
    value_declarations(container)
        .into_iter()
        .flat_map(defined_names)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::parse_tree;
    use pretty_assertions::assert_eq;

    fn texts<'t>(binding: &Binding<'t>) -> Vec<&'t str> {
        binding.iter().map(|n| n.name()).collect()
    }

    #[test]
    fn test_function_equation() {
        let tree = parse_tree(
            r#"(value_declaration
                 (function_declaration_left update msg (pattern (tuple_pattern "(" (pattern a) "," (pattern b) ")")))
                 "=" (expression (list_of_operands (lower_case_path a))))"#,
        )
        .unwrap();
        let decl = tree.root();
        assert_eq!(texts(&defined_names(decl)), vec!["update"]);
        assert_eq!(texts(&parameters(decl)), vec!["msg", "a", "b"]);
    }

    #[test]
    fn test_pattern_binding() {
        let tree = parse_tree(
            r#"(value_declaration
                 (pattern (tuple_pattern "(" (pattern first) "," (pattern second) ")"))
                 "=" (expression (list_of_operands (lower_case_path pair))))"#,
        )
        .unwrap();
        assert_eq!(texts(&defined_names(tree.root())), vec!["first", "second"]);
        assert!(parameters(tree.root()).is_empty());
    }

    #[test]
    fn test_malformed_declaration_is_empty() {
        let tree = parse_tree(r#"(value_declaration "=" (expression))"#).unwrap();
        assert!(defined_names(tree.root()).is_empty());
    }

    #[test]
    fn test_declared_names_of_let() {
        let tree = parse_tree(
            r#"(let_in "let"
                 (value_declaration (function_declaration_left a) "=" (expression))
                 (type_annotation b ":" "Int")
                 (value_declaration (pattern (record_pattern "{" c "," d "}")) "=" (expression))
                 "in" (expression))"#,
        )
        .unwrap();
        let root = tree.root();
        assert_eq!(value_declarations(root).len(), 2);
        assert_eq!(texts(&declared_names(root)), vec!["a", "c", "d"]);
    }
}
