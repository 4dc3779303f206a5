//! Closed shape enums over node kinds.
//!
//! The binder and the walker dispatch on these instead of testing kinds one
//! by one, so adding a shape forces every `match` to handle it.
use crate::ir::{SyntaxKind, SyntaxNode};

/// How a node takes part in pattern destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternShape<'t> {
    /// A bare `lower_case_id`, binds itself.
    Simple(SyntaxNode<'t>),
    /// A `pattern` node: cons (`x :: xs`), alias (`p as name`) or a wrapper
    /// around a single shape.
    Container(SyntaxNode<'t>),
    List(SyntaxNode<'t>),
    Tuple(SyntaxNode<'t>),
    /// Constructor application, `Just x`.
    Union(SyntaxNode<'t>),
    /// `{ a, b }`, names only.
    Record(SyntaxNode<'t>),
    Parenthesized(SyntaxNode<'t>),
    /// Wildcards, literals, constructor names, punctuation.
    Ignored,
}

impl<'t> PatternShape<'t> {
    pub fn of(node: SyntaxNode<'t>) -> Self {
        match node.kind() {
            SyntaxKind::LowerCaseId => PatternShape::Simple(node),
            SyntaxKind::Pattern => PatternShape::Container(node),
            SyntaxKind::ListPattern => PatternShape::List(node),
            SyntaxKind::TuplePattern => PatternShape::Tuple(node),
            SyntaxKind::UnionPattern => PatternShape::Union(node),
            SyntaxKind::RecordPattern => PatternShape::Record(node),
            SyntaxKind::ParenthesedPattern => PatternShape::Parenthesized(node),
            _ => PatternShape::Ignored,
        }
    }

    /// True for the structured pattern kinds, excluding bare identifiers.
    pub fn is_structured(&self) -> bool {
        !matches!(self, PatternShape::Simple(_) | PatternShape::Ignored)
    }
}

/// How a node takes part in reference extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprShape<'t> {
    /// `expression`: operand lists and backticked applications.
    Expression(SyntaxNode<'t>),
    /// `list_of_operands`: juxtaposed application.
    Operands(SyntaxNode<'t>),
    /// ``a `op` b``
    Backticked(SyntaxNode<'t>),
    /// Record construction or copy-and-update.
    Record(SyntaxNode<'t>),
    /// Wraps expressions: `parenthesed_expression`, `field`, `lambda`,
    /// `case_of_branch`.
    Wrapper(SyntaxNode<'t>),
    /// Wraps a list of expressions: `list_expression`, `tuple_expression`,
    /// `if_else`, `case_of`.
    WrapperList(SyntaxNode<'t>),
    LetIn(SyntaxNode<'t>),
    Declaration(SyntaxNode<'t>),
    Module(SyntaxNode<'t>),
    /// `lower_case_path`, a direct value reference.
    ValuePath(SyntaxNode<'t>),
    /// `mixed_case_path`, a module-qualified value reference.
    QualifiedPath(SyntaxNode<'t>),
    Opaque,
}

impl<'t> ExprShape<'t> {
    pub fn of(node: SyntaxNode<'t>) -> Self {
        match node.kind() {
            SyntaxKind::Expression => ExprShape::Expression(node),
            SyntaxKind::ListOfOperands => ExprShape::Operands(node),
            SyntaxKind::BacktickedFunction => ExprShape::Backticked(node),
            SyntaxKind::Record => ExprShape::Record(node),
            SyntaxKind::ParenthesedExpression
            | SyntaxKind::Field
            | SyntaxKind::Lambda
            | SyntaxKind::CaseOfBranch => ExprShape::Wrapper(node),
            SyntaxKind::ListExpression
            | SyntaxKind::TupleExpression
            | SyntaxKind::IfElse
            | SyntaxKind::CaseOf => ExprShape::WrapperList(node),
            SyntaxKind::LetIn => ExprShape::LetIn(node),
            SyntaxKind::ValueDeclaration => ExprShape::Declaration(node),
            SyntaxKind::Module => ExprShape::Module(node),
            SyntaxKind::LowerCasePath => ExprShape::ValuePath(node),
            SyntaxKind::MixedCasePath => ExprShape::QualifiedPath(node),
            _ => ExprShape::Opaque,
        }
    }
}
