//! A Starlark parser which produces a lossless syntax tree.
//!
//! Parsing never fails. The result of [`parse`] is always a tree which
//! contains every token of the input, including whitespace and comments.
//! Anything that doesn't fit the grammar is wrapped in an
//! [`Error`][NodeKind::Error] node with a message, and
//! [`Parse::errors`] lists all of them.
//!
//! # Example
//!
//! ```
//! use syntax::NodeKind;
//!
//! let parse = syntax::parse("x = [a for a in y]\n");
//! assert!(!parse.has_errors());
//!
//! let statement = parse.root().child_nodes().next().unwrap();
//! assert_eq!(statement.kind(), NodeKind::AssignmentStatement);
//! assert_eq!(parse.text(), "x = [a for a in y]\n");
//! ```

mod expression;
mod function;
mod grammar;
mod kind;
mod precedence;
mod scope;
mod statement;

use diagnostic::{Diagnostic, InputId, Span};
use parser::lexer::{self, Token};

use crate::grammar::Parser;

pub use crate::{kind::NodeKind, precedence::Precedence, scope::Scope};

/// A syntax tree of Starlark code.
pub type Node<'a> = parser::Node<'a, NodeKind>;

/// Parse some Starlark code.
pub fn parse(input: &str) -> Parse<'_> {
    let lexed = lexer::tokenize(input);
    let tokens = lexed.tokens().to_vec();

    let root = Parser::new(lexed).parse_file();

    let errors: Vec<SyntaxError> = root
        .errors()
        .into_iter()
        .map(|(message, span)| SyntaxError::new(message, span))
        .collect();

    log::debug!(
        "parsed {} tokens with {} syntax errors",
        tokens.len(),
        errors.len()
    );

    Parse {
        root,
        tokens,
        errors,
    }
}

/// The result of parsing some input.
#[derive(Debug)]
pub struct Parse<'a> {
    root: Node<'a>,
    tokens: Vec<Token<'a>>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parse<'a> {
    /// The root of the tree, which is always a [`NodeKind::File`].
    pub fn root(&self) -> &Node<'a> {
        &self.root
    }

    /// All the tokens of the input, in order.
    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// The errors in the tree, in the order they appear in the input.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The input text, rebuilt from the tree.
    pub fn text(&self) -> String {
        self.root.text()
    }

    /// An indented rendering of the tree, for debugging and tests.
    pub fn debug_tree(&self) -> String {
        self.root.debug_tree()
    }

    /// Convert the errors into diagnostics about the input `id`.
    pub fn diagnostics(&self, id: InputId) -> Vec<Diagnostic> {
        self.errors.iter().map(|e| e.to_diagnostic(id)).collect()
    }
}

/// Something in the input which didn't fit the grammar.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    message: String,
    span: Span,
}

impl SyntaxError {
    fn new(message: &str, span: Span) -> Self {
        SyntaxError {
            message: message.to_owned(),
            span,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the error is. This is empty for errors about something missing.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn to_diagnostic(&self, id: InputId) -> Diagnostic {
        Diagnostic::new(&self.message)
            .input(id)
            .location(self.span.start())
            .highlight(self.span, "")
    }
}
