//! Borrowed views over an immutable syntax-tree snapshot.
//!
//! A [`SyntaxTree`] owns every node; a [`SyntaxNode`] is a copyable
//! `(tree, id)` pair. Everything derived from a node borrows the tree, so the
//! borrow checker rejects any binding or reference that would outlive the
//! snapshot it was computed from.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::tree::SyntaxTree;

/// Every node kind the tree provider can hand us.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SyntaxKind {
    // Module level
    Module,
    ModuleDeclaration,
    ImportClause,
    ExposingClause,
    AsClause,

    // Declarations
    ValueDeclaration,
    FunctionDeclarationLeft,
    TypeAnnotation,
    TypeDeclaration,
    TypeAliasDeclaration,

    // Patterns
    Pattern,
    ListPattern,
    TuplePattern,
    UnionPattern,
    RecordPattern,
    ParenthesedPattern,
    AnythingPattern,

    // Expressions
    Expression,
    ListOfOperands,
    BacktickedFunction,
    ParenthesedExpression,
    ListExpression,
    TupleExpression,
    IfElse,
    CaseOf,
    CaseOfBranch,
    LetIn,
    Lambda,
    Record,
    Field,
    Literal,
    Operator,

    // Paths and identifiers
    LowerCasePath,
    MixedCasePath,
    UpperCasePath,
    LowerCaseId,
    UpperCaseId,

    // Tokens
    DoubleDot,
    Token,
    Error,
}

impl SyntaxKind {
    /// Leaf kinds carry source text and never have children.
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            SyntaxKind::LowerCaseId
                | SyntaxKind::UpperCaseId
                | SyntaxKind::DoubleDot
                | SyntaxKind::Token
                | SyntaxKind::Literal
                | SyntaxKind::Operator
        )
    }

    pub fn is_identifier(self) -> bool {
        matches!(self, SyntaxKind::LowerCaseId | SyntaxKind::UpperCaseId)
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default, PartialOrd, Ord)]
/// Index of a node inside its snapshot. Ids are dense and assigned in
/// pre-order, so comparing two ids compares document order.
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open byte range `[start, end)`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} after end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    pub fn covers(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Shift this span so that `origin` becomes offset zero.
    pub fn relative_to(&self, origin: usize) -> Span {
        Span::new(
            self.start.saturating_sub(origin),
            self.end.saturating_sub(origin),
        )
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Storage record for one node. Identity, parent link, span and children.
#[derive(Debug, Clone)]
pub struct NodeBase {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub kind: SyntaxKind,
    pub span: Span,
    pub text: Option<String>,
    pub children: Vec<NodeId>,
}

/// A node of one snapshot.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> SyntaxNode<'t> {
    pub(crate) fn new(tree: &'t SyntaxTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn base(&self) -> &'t NodeBase {
        self.tree.base(self.id)
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> SyntaxKind {
        self.base().kind
    }

    pub fn is_kind(&self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    pub fn span(&self) -> Span {
        self.base().span
    }

    /// Source text of a leaf node, `None` for interior nodes.
    pub fn text(&self) -> Option<&'t str> {
        self.base().text.as_deref()
    }

    /// Name of an identifier leaf; empty for every other node.
    pub fn name(&self) -> &'t str {
        if self.kind().is_identifier() {
            self.text().unwrap_or_default()
        } else {
            ""
        }
    }

    pub fn parent(&self) -> Option<SyntaxNode<'t>> {
        self.base().parent.map(|id| SyntaxNode::new(self.tree, id))
    }

    pub fn child_count(&self) -> usize {
        self.base().children.len()
    }

    pub fn children(self) -> impl DoubleEndedIterator<Item = SyntaxNode<'t>> + 't {
        let tree = self.tree;
        self.base()
            .children
            .iter()
            .map(move |id| SyntaxNode::new(tree, *id))
    }

    /// First direct child with the given kind.
    pub fn child_by_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode<'t>> {
        self.children().find(|child| child.is_kind(kind))
    }

    pub fn children_by_kind(self, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        self.children().filter(move |child| child.is_kind(kind))
    }

    /// Strict ancestors, innermost first.
    pub fn ancestors(self) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// True when `self` is `other` or one of its ancestors.
    pub fn contains_node(&self, other: SyntaxNode<'t>) -> bool {
        std::ptr::eq(self.tree, other.tree)
            && (self.id == other.id || other.ancestors().any(|a| a.id == self.id))
    }

    /// Pre-order walk of the subtree rooted at `self`, `self` included.
    pub fn descendants(&self) -> Descendants<'t> {
        Descendants {
            tree: self.tree,
            stack: vec![self.id],
        }
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl std::hash::Hash for SyntaxNode<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id)?;
        if let Some(text) = self.text() {
            write!(f, " {text:?}")?;
        }
        Ok(())
    }
}

/// Iterator returned by [`SyntaxNode::descendants`].
pub struct Descendants<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = SyntaxNode<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let base = self.tree.base(id);
        self.stack.extend(base.children.iter().rev().copied());
        Some(SyntaxNode::new(self.tree, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_names_round_trip_through_snake_case() {
        assert_eq!(SyntaxKind::LowerCasePath.as_str(), "lower_case_path");
        assert_eq!(
            SyntaxKind::from_str("case_of_branch").ok(),
            Some(SyntaxKind::CaseOfBranch)
        );
        assert!(SyntaxKind::from_str("lowerCasePath").is_err());
    }

    #[test]
    fn test_span_relative_to() {
        let span = Span::new(10, 14);
        assert_eq!(span.relative_to(4), Span::new(6, 10));
        assert!(span.contains(13));
        assert!(!span.contains(14));
        assert!(Span::new(0, 20).covers(span));
    }
}
