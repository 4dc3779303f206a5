//! JSON tree dumps.
//!
//! A dump is a nested object per node:
//!
//! ```json
//! { "kind": "pattern", "children": [ { "kind": "lower_case_id", "text": "x", "start": 4, "end": 5 } ] }
//! ```
//!
//! `start`/`end` are optional; missing offsets fall back to the builder's
//! left-to-right layout.
use serde::{Deserialize, Serialize};

use elmscope_error::{Error, ErrorKind, Result};

use crate::ir::{Span, SyntaxKind, SyntaxNode};
use crate::tree::{SyntaxTree, TreeBuilder};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDump {
    pub kind: SyntaxKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDump>,
}

impl NodeDump {
    pub fn from_node(node: SyntaxNode<'_>) -> Self {
        let span = node.span();
        NodeDump {
            kind: node.kind(),
            text: node.text().map(str::to_string),
            start: Some(span.start),
            end: Some(span.end),
            children: node.children().map(NodeDump::from_node).collect(),
        }
    }

    fn explicit_span(&self) -> Option<Span> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start <= end => Some(Span::new(start, end)),
            (Some(start), None) => {
                Some(Span::new(start, start + self.text.as_deref().map_or(0, str::len)))
            }
            _ => None,
        }
    }

    fn build_into(&self, builder: &mut TreeBuilder) -> Result<()> {
        if self.kind.is_leaf() {
            if !self.children.is_empty() {
                return Err(Error::invalid_format(format!(
                    "leaf '{}' cannot have children",
                    self.kind
                ))
                .with_operation("dump::build"));
            }
            let text = self.text.clone().unwrap_or_default();
            return match self.explicit_span() {
                Some(span) => builder.token_spanning(self.kind, text, span),
                None => builder.token(self.kind, text),
            };
        }

        match self.explicit_span() {
            Some(span) => builder.start_node_spanning(self.kind, span)?,
            None => builder.start_node(self.kind)?,
        }
        for child in &self.children {
            child.build_into(builder)?;
        }
        builder.finish_node()
    }

    pub fn to_tree(&self) -> Result<SyntaxTree> {
        let mut builder = TreeBuilder::new();
        self.build_into(&mut builder)?;
        builder.finish()
    }
}

/// Build a tree from a JSON dump.
pub fn from_json(source: &str) -> Result<SyntaxTree> {
    let dump: NodeDump = serde_json::from_str(source).map_err(|err| {
        Error::new(ErrorKind::DeserializationFailed, err.to_string())
            .with_operation("dump::from_json")
            .with_context("line", err.line().to_string())
            .set_source(err)
    })?;
    dump.to_tree()
}

pub fn to_json(tree: &SyntaxTree) -> Result<String> {
    serde_json::to_string_pretty(&NodeDump::from_node(tree.root())).map_err(|err| {
        Error::new(ErrorKind::SerializationFailed, err.to_string())
            .with_operation("dump::to_json")
            .set_source(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_explicit_offsets_are_kept() {
        let json = r#"{
            "kind": "pattern",
            "children": [
                { "kind": "lower_case_id", "text": "value", "start": 12, "end": 17 }
            ]
        }"#;
        let tree = from_json(json).unwrap();
        assert_eq!(tree.root().span(), Span::new(12, 17));
        assert_eq!(tree.identifier_at(14).map(|n| n.name()), Some("value"));
    }

    #[test]
    fn test_dump_matches_tree() {
        let tree = crate::notation::parse_tree("(tuple_pattern (pattern a) (pattern b))").unwrap();
        let dump = NodeDump::from_node(tree.root());
        assert_eq!(dump.children.len(), 2);
        assert_eq!(dump.children[1].children[0].text.as_deref(), Some("b"));

        let rebuilt = from_json(&to_json(&tree).unwrap()).unwrap();
        assert_eq!(NodeDump::from_node(rebuilt.root()), dump);
    }

    #[test]
    fn test_bad_json() {
        let err = from_json(r#"{ "kind": "no_such_kind" }"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeserializationFailed);

        let err = from_json(r#"{ "kind": "token", "text": "x", "children": [ { "kind": "token" } ] }"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }
}
