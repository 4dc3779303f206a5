//! Syntax-tree snapshots for Elm sources and the binding engine over them.
//!
//! ```
//! use elmscope_core::{bind, parse_tree};
//!
//! let tree = parse_tree(r#"(pattern (tuple_pattern "(" (pattern a) "," (pattern b) ")"))"#).unwrap();
//! let names: Vec<_> = bind(Some(tree.root())).iter().map(|n| n.name()).collect();
//! assert_eq!(names, ["a", "b"]);
//! ```
pub mod declaration;
pub mod dump;
pub mod ir;
pub mod module;
pub mod notation;
pub mod pattern;
pub mod printer;
pub mod query;
pub mod reference;
pub mod shape;
pub mod tree;

pub use declaration::{declared_names, defined_names, function_name, parameters, value_declarations};
pub use dump::{NodeDump, from_json, to_json};
pub use ir::{NodeId, Span, SyntaxKind, SyntaxNode};
pub use module::{
    exposed_values, exposing_clause, import_alias, imports, is_exposing_all, module_declaration,
    module_name,
};
pub use notation::parse_tree;
pub use pattern::{Binding, bind};
pub use printer::{PrintConfig, PrintFormat, print_tree, render_tree};
pub use reference::{ReferenceOccurrence, references};
pub use shape::{ExprShape, PatternShape};
pub use tree::{SyntaxTree, TreeBuilder};
