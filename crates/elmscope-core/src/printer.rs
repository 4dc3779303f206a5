use std::fmt;

use crate::ir::SyntaxNode;
use crate::tree::SyntaxTree;

/// Output format for rendering a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrintFormat {
    /// One node per line, children indented under their parent
    /// ```text
    /// (value_declaration [0-7]
    ///   (function_declaration_left [0-3]
    ///     f [0-1]
    /// ```
    #[default]
    Tree,

    /// The whole tree on one line, in the notation `parse_tree` reads back
    /// ```text
    /// (value_declaration (function_declaration_left f (pattern x)) "=" ...)
    /// ```
    Compact,

    /// One node per line without nesting
    Flat,
}

impl fmt::Display for PrintFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintFormat::Tree => write!(f, "tree"),
            PrintFormat::Compact => write!(f, "compact"),
            PrintFormat::Flat => write!(f, "flat"),
        }
    }
}

impl std::str::FromStr for PrintFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tree" => Ok(PrintFormat::Tree),
            "compact" => Ok(PrintFormat::Compact),
            "flat" => Ok(PrintFormat::Flat),
            other => Err(format!(
                "Unknown format: {other}. Use 'tree', 'compact', or 'flat'"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrintConfig {
    pub format: PrintFormat,

    /// Append `[start-end]` byte spans
    pub include_spans: bool,

    /// Append `#id` node ids
    pub include_node_ids: bool,

    /// Indentation width in spaces per nesting level
    pub indent_width: usize,

    /// Subtrees deeper than this are elided with `...`
    pub max_depth: usize,
}

impl Default for PrintConfig {
    fn default() -> Self {
        PrintConfig {
            format: PrintFormat::Tree,
            include_spans: true,
            include_node_ids: false,
            indent_width: 2,
            max_depth: 1000,
        }
    }
}

impl PrintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // Builder methods
    // ====================================================================

    pub fn with_format(mut self, format: PrintFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_spans(mut self, enabled: bool) -> Self {
        self.include_spans = enabled;
        self
    }

    pub fn with_node_ids(mut self, enabled: bool) -> Self {
        self.include_node_ids = enabled;
        self
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Render a tree (or any subtree) according to `config`.
pub fn render_tree(node: SyntaxNode<'_>, config: &PrintConfig) -> String {
    let mut out = String::new();
    match config.format {
        PrintFormat::Tree => render_nested(node, config, 0, &mut out),
        PrintFormat::Compact => {
            render_compact(node, config, 0, &mut out);
            out.push('\n');
        }
        PrintFormat::Flat => {
            for n in node.descendants() {
                out.push_str(&label(n, config));
                out.push('\n');
            }
        }
    }
    out
}

pub fn print_tree(tree: &SyntaxTree, config: &PrintConfig) {
    print!("{}", render_tree(tree.root(), config));
}

fn label(node: SyntaxNode<'_>, config: &PrintConfig) -> String {
    let mut label = match node.text() {
        Some(text) if node.kind().is_identifier() => text.to_string(),
        Some(text) => format!("({} {text:?})", node.kind()),
        None => format!("({}", node.kind()),
    };
    if config.include_spans {
        let span = node.span();
        label.push_str(&format!(" [{}-{}]", span.start, span.end));
    }
    if config.include_node_ids {
        label.push_str(&format!(" #{}", node.id()));
    }
    label
}

fn render_nested(node: SyntaxNode<'_>, config: &PrintConfig, depth: usize, out: &mut String) {
    let indent = " ".repeat(depth * config.indent_width);
    out.push_str(&indent);
    if depth > config.max_depth {
        out.push_str("...\n");
        return;
    }
    out.push_str(&label(node, config));
    out.push('\n');
    if node.text().is_some() {
        return;
    }
    for child in node.children() {
        render_nested(child, config, depth + 1, out);
    }
    out.push_str(&indent);
    out.push_str(")\n");
}

fn render_compact(node: SyntaxNode<'_>, config: &PrintConfig, depth: usize, out: &mut String) {
    if depth > config.max_depth {
        out.push_str("...");
        return;
    }
    match node.text() {
        Some(text) if node.kind().is_identifier() => out.push_str(text),
        Some(text) if node.kind() == crate::ir::SyntaxKind::DoubleDot => out.push_str(text),
        Some(text) if node.kind() == crate::ir::SyntaxKind::Token => {
            out.push_str(&format!("{text:?}"))
        }
        Some(text) => out.push_str(&format!("({} {text:?})", node.kind())),
        None => {
            out.push('(');
            out.push_str(node.kind().as_str());
            for child in node.children() {
                out.push(' ');
                render_compact(child, config, depth + 1, out);
            }
            out.push(')');
        }
    }
}
