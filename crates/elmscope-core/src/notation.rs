//! Compact S-expression notation for syntax trees.
//!
//! ```text
//! (value_declaration
//!   (function_declaration_left f (pattern x))
//!   "="
//!   (expression (list_of_operands (lower_case_path g) (lower_case_path x))))
//! ```
//!
//! - `(kind child...)` opens an interior node, `kind` in `snake_case`.
//! - `(kind "text")` builds a leaf of a leaf kind (`literal`, `operator`, ...).
//! - A bare word is an identifier: lower-case first letter gives
//!   `lower_case_id`, upper-case gives `upper_case_id`.
//! - `..` is the `double_dot` wildcard marker, `_` an `anything_pattern`.
//! - A quoted string inside an interior node is a `token` leaf (punctuation,
//!   keywords).
//!
//! Tree spans are synthesised by the [`TreeBuilder`] layout rules.
use std::str::FromStr;

use elmscope_error::{Error, Result};

use crate::ir::SyntaxKind;
use crate::tree::{SyntaxTree, TreeBuilder};

#[derive(Debug, Clone, PartialEq)]
enum Lexeme {
    Open,
    Close,
    Word(String),
    Quoted(String),
}

fn tokenize(source: &str) -> Result<Vec<(usize, Lexeme)>> {
    let mut out = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            ';' => {
                // comment to end of line
                for (_, c) in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '(' => {
                chars.next();
                out.push((offset, Lexeme::Open));
            }
            ')' => {
                chars.next();
                out.push((offset, Lexeme::Close));
            }
            '"' => {
                chars.next();
                let mut text = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some((_, 'n')) => text.push('\n'),
                            Some((_, escaped)) => text.push(escaped),
                            None => break,
                        },
                        other => text.push(other),
                    }
                }
                if !closed {
                    return Err(Error::parse_failed("unterminated string")
                        .with_operation("notation::tokenize")
                        .with_context("offset", offset.to_string()));
                }
                out.push((offset, Lexeme::Quoted(text)));
            }
            _ => {
                let mut word = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '(' | ')' | '"' | ';') {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                out.push((offset, Lexeme::Word(word)));
            }
        }
    }

    Ok(out)
}

/// Deepest node nesting accepted; the tree walks recurse once per level.
const MAX_DEPTH: usize = 256;

struct NotationParser {
    lexemes: Vec<(usize, Lexeme)>,
    pos: usize,
    depth: usize,
    builder: TreeBuilder,
}

impl NotationParser {
    fn peek(&self) -> Option<&(usize, Lexeme)> {
        self.lexemes.get(self.pos)
    }

    fn bump(&mut self) -> Option<(usize, Lexeme)> {
        let item = self.lexemes.get(self.pos).cloned();
        self.pos += 1;
        item
    }

    fn error_at(offset: usize, message: impl Into<String>) -> Error {
        Error::parse_failed(message)
            .with_operation("notation::parse")
            .with_context("offset", offset.to_string())
    }

    fn parse_item(&mut self) -> Result<()> {
        match self.bump() {
            Some((offset, Lexeme::Open)) => self.parse_node(offset),
            Some((_, Lexeme::Word(word))) => self.bare_word(&word),
            Some((_, Lexeme::Quoted(text))) => self.builder.token(SyntaxKind::Token, text),
            Some((offset, Lexeme::Close)) => Err(Self::error_at(offset, "unexpected ')'")),
            None => Err(Self::error_at(usize::MAX, "unexpected end of input")),
        }
    }

    fn bare_word(&mut self, word: &str) -> Result<()> {
        match word {
            ".." => self.builder.token(SyntaxKind::DoubleDot, ".."),
            "_" => {
                self.builder.start_node(SyntaxKind::AnythingPattern)?;
                self.builder.token(SyntaxKind::Token, "_")?;
                self.builder.finish_node()
            }
            w if w.starts_with(|c: char| c.is_lowercase()) => {
                self.builder.token(SyntaxKind::LowerCaseId, w)
            }
            w if w.starts_with(|c: char| c.is_uppercase()) => {
                self.builder.token(SyntaxKind::UpperCaseId, w)
            }
            w => self.builder.token(SyntaxKind::Token, w),
        }
    }

    fn parse_node(&mut self, open_offset: usize) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return Err(Self::error_at(open_offset, "tree nested too deeply")
                .with_context("max_depth", MAX_DEPTH.to_string()));
        }
        self.depth += 1;
        let result = self.parse_node_body(open_offset);
        self.depth -= 1;
        result
    }

    fn parse_node_body(&mut self, open_offset: usize) -> Result<()> {
        let kind = match self.bump() {
            Some((offset, Lexeme::Word(name))) => SyntaxKind::from_str(&name).map_err(|_| {
                Error::invalid_format(format!("unknown node kind '{name}'"))
                    .with_operation("notation::parse")
                    .with_context("offset", offset.to_string())
            })?,
            _ => return Err(Self::error_at(open_offset, "expected a node kind after '('")),
        };

        if kind.is_leaf() {
            let text = match self.bump() {
                Some((_, Lexeme::Quoted(text))) | Some((_, Lexeme::Word(text))) => text,
                _ => {
                    return Err(Self::error_at(
                        open_offset,
                        format!("leaf '{kind}' needs exactly one text item"),
                    ));
                }
            };
            self.builder.token(kind, text)?;
        } else {
            self.builder.start_node(kind)?;
            while !matches!(self.peek(), Some((_, Lexeme::Close)) | None) {
                self.parse_item()?;
            }
            self.builder.finish_node()?;
        }

        match self.bump() {
            Some((_, Lexeme::Close)) => Ok(()),
            _ => Err(Self::error_at(open_offset, "unbalanced '('")),
        }
    }
}

/// Parse a tree written in S-expression notation.
pub fn parse_tree(source: &str) -> Result<SyntaxTree> {
    let lexemes = tokenize(source)?;
    let mut parser = NotationParser {
        lexemes,
        pos: 0,
        depth: 0,
        builder: TreeBuilder::new(),
    };
    parser.parse_item()?;
    if let Some((offset, _)) = parser.peek() {
        return Err(NotationParser::error_at(*offset, "trailing input after root node"));
    }
    parser.builder.finish()
}
