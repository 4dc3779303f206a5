//! Syntax-tree snapshots and the event-style builder used by tree providers.
//!
//! The builder hands out ids in pre-order, so ids double as document order.
//! Leaf spans are either given explicitly or laid out left to right with a
//! single space between tokens; an interior node spans its first to last
//! child unless the provider supplies a span of its own.
use elmscope_error::{Error, Result};

use crate::ir::{NodeBase, NodeId, Span, SyntaxKind, SyntaxNode};

/// An immutable, fully built syntax tree for one source file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeBase>,
    file_name: Option<String>,
}

impl SyntaxTree {
    pub(crate) fn base(&self, id: NodeId) -> &NodeBase {
        &self.nodes[id.index()]
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode::new(self, NodeId(0))
    }

    /// `None` when the id belongs to a larger snapshot.
    pub fn get(&self, id: NodeId) -> Option<SyntaxNode<'_>> {
        (id.index() < self.nodes.len()).then(|| SyntaxNode::new(self, id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// All nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = SyntaxNode<'_>> {
        (0..self.nodes.len()).map(move |index| SyntaxNode::new(self, NodeId(index as u32)))
    }

    /// The deepest node whose span contains `offset`.
    pub fn node_at_offset(&self, offset: usize) -> Option<SyntaxNode<'_>> {
        let mut current = self.root();
        if !current.span().contains(offset) {
            return None;
        }
        'descend: loop {
            for child in current.children() {
                if child.span().contains(offset) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// The identifier leaf covering `offset`, if any.
    pub fn identifier_at(&self, offset: usize) -> Option<SyntaxNode<'_>> {
        self.node_at_offset(offset)
            .filter(|node| node.kind().is_identifier())
    }
}

struct OpenNode {
    id: NodeId,
    span: Option<Span>,
}

/// Event-driven builder: `start_node` / `token` / `finish_node`.
#[derive(Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeBase>,
    stack: Vec<OpenNode>,
    cursor: usize,
    finished_root: bool,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, kind: SyntaxKind, text: Option<String>, span: Span) -> Result<NodeId> {
        if self.finished_root {
            return Err(Error::invalid_format("more than one root node")
                .with_operation("tree::build")
                .with_context("kind", kind.as_str()));
        }
        let id = NodeId(self.nodes.len() as u32);
        let parent = self.stack.last().map(|open| open.id);
        self.nodes.push(NodeBase {
            id,
            parent,
            kind,
            span,
            text,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.nodes[parent.index()].children.push(id),
            None if kind.is_leaf() => self.finished_root = true,
            None => {}
        }
        Ok(id)
    }

    /// Open an interior node; its span is derived from its children.
    pub fn start_node(&mut self, kind: SyntaxKind) -> Result<()> {
        self.start_node_inner(kind, None)
    }

    /// Open an interior node with a span supplied by the provider.
    pub fn start_node_spanning(&mut self, kind: SyntaxKind, span: Span) -> Result<()> {
        self.start_node_inner(kind, Some(span))
    }

    fn start_node_inner(&mut self, kind: SyntaxKind, span: Option<Span>) -> Result<()> {
        if kind.is_leaf() {
            return Err(Error::invalid_format(format!(
                "'{kind}' is a leaf kind and cannot have children"
            ))
            .with_operation("tree::start_node"));
        }
        let placeholder = Span::new(self.cursor, self.cursor);
        let id = self.alloc(kind, None, placeholder)?;
        self.stack.push(OpenNode { id, span });
        Ok(())
    }

    /// Append a leaf laid out at the current cursor.
    pub fn token(&mut self, kind: SyntaxKind, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        let span = Span::new(self.cursor, self.cursor + text.len());
        self.token_spanning(kind, text, span)
    }

    /// Append a leaf starting at an explicit byte offset.
    pub fn token_at(&mut self, kind: SyntaxKind, text: impl Into<String>, start: usize) -> Result<()> {
        let text = text.into();
        let span = Span::new(start, start + text.len());
        self.token_spanning(kind, text, span)
    }

    /// Append a leaf with an explicit span.
    pub fn token_spanning(
        &mut self,
        kind: SyntaxKind,
        text: impl Into<String>,
        span: Span,
    ) -> Result<()> {
        if !kind.is_leaf() {
            return Err(Error::invalid_format(format!(
                "'{kind}' is not a leaf kind and cannot carry text"
            ))
            .with_operation("tree::token"));
        }
        self.alloc(kind, Some(text.into()), span)?;
        self.cursor = span.end + 1;
        Ok(())
    }

    /// Close the innermost open node.
    pub fn finish_node(&mut self) -> Result<()> {
        let Some(open) = self.stack.pop() else {
            return Err(Error::invalid_format("finish_node without a matching start_node")
                .with_operation("tree::finish_node"));
        };

        let base = &self.nodes[open.id.index()];
        let span = open.span.unwrap_or_else(|| {
            let first = base.children.first().map(|id| self.nodes[id.index()].span);
            let last = base.children.last().map(|id| self.nodes[id.index()].span);
            match (first, last) {
                (Some(first), Some(last)) => Span::new(first.start, last.end.max(first.start)),
                _ => base.span,
            }
        });
        self.nodes[open.id.index()].span = span;
        if open.span.is_some() {
            self.cursor = self.cursor.max(span.end + 1);
        }
        if self.stack.is_empty() {
            self.finished_root = true;
        }
        Ok(())
    }

    pub fn finish(self) -> Result<SyntaxTree> {
        if let Some(open) = self.stack.last() {
            let kind = self.nodes[open.id.index()].kind;
            return Err(Error::invalid_format("unclosed node at end of input")
                .with_operation("tree::finish")
                .with_context("kind", kind.as_str()));
        }
        if self.nodes.is_empty() {
            return Err(Error::invalid_format("empty tree").with_operation("tree::finish"));
        }
        Ok(SyntaxTree {
            nodes: self.nodes,
            file_name: None,
        })
    }
}
