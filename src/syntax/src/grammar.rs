//! The Starlark parser.
//!
//! The grammar is split over a few modules, each adding methods to
//! [`Parser`]:
//!
//! - [`expression`][crate::expression] for the expression grammar,
//! - [`statement`][crate::statement] for statements and suites,
//! - [`function`][crate::function] for `def` and parameter lists.
//!
//! Methods named `parse_*` that return a `bool` return whether they found the
//! thing they parse. If they didn't they usually haven't consumed anything,
//! and it's up to the caller to report it.

use parser::lexer::{Delimiter, Lexed, Operator, Reserved, TokenKind};
use parser::{Builder, Node};

use crate::kind::NodeKind;
use crate::scope::{Scope, Scopes};

pub(crate) const LPAR: TokenKind = TokenKind::Open(Delimiter::Parenthesis);
pub(crate) const RPAR: TokenKind = TokenKind::Close(Delimiter::Parenthesis);
pub(crate) const LBRACKET: TokenKind = TokenKind::Open(Delimiter::Bracket);
pub(crate) const RBRACKET: TokenKind = TokenKind::Close(Delimiter::Bracket);
pub(crate) const LBRACE: TokenKind = TokenKind::Open(Delimiter::Brace);
pub(crate) const RBRACE: TokenKind = TokenKind::Close(Delimiter::Brace);

pub(crate) const EXPECTED_EXPRESSION: &str = "expected an expression";

/// A parser for one input. It's used up by parsing.
#[derive(Debug)]
pub(crate) struct Parser<'a> {
    pub(crate) b: Builder<'a, NodeKind>,
    scopes: Scopes,

    /// How many indented blocks are open.
    pub(crate) blocks: usize,

    /// Indents which didn't start a block. Each one's dedent is skipped
    /// quietly, since the indent was already reported.
    pub(crate) stray_indents: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(lexed: Lexed<'a>) -> Self {
        Parser {
            b: Builder::new(lexed),
            scopes: Scopes::new(),
            blocks: 0,
            stray_indents: 0,
        }
    }

    /// Parse a whole file.
    pub(crate) fn parse_file(mut self) -> Node<'a, NodeKind> {
        let file = self.b.mark();

        while !self.b.eof() {
            self.parse_statement();
        }

        file.done(&mut self.b, NodeKind::File).keep();
        self.b.finish()
    }
}

// Scopes
impl Parser<'_> {
    pub(crate) fn scope(&self) -> Scope {
        self.scopes.current()
    }

    pub(crate) fn push_scope(&mut self, scope: Scope) {
        self.scopes.push(scope);
        log::trace!("push scope {:?}, depth {}", scope, self.scopes.depth());
    }

    pub(crate) fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    pub(crate) fn set_after_semicolon(&mut self, after_semicolon: bool) {
        self.scopes.set_after_semicolon(after_semicolon);
    }
}

// Depth tracking
impl Parser<'_> {
    /// Run `f` one level deeper in the grammar's recursion.
    ///
    /// If that's too deep, the next token is wrapped in an error instead,
    /// along with the rest of the brackets it opens. This returns false if
    /// nothing could be skipped, since then nothing was parsed.
    pub(crate) fn depth_track(
        &mut self,
        f: impl FnOnce(&mut Self) -> bool,
    ) -> bool {
        if !self.b.enter() {
            return self.skip_too_deep();
        }

        let result = f(self);
        self.b.exit();
        result
    }

    /// Skip over one token, or a whole bracketed region if the token opens
    /// one, without recursing. The region ends at its closing bracket, or the
    /// end of the statement if it's never closed.
    fn skip_too_deep(&mut self) -> bool {
        const MESSAGE: &str = "expression nested too deeply";

        if self.b.eof()
            || self.b.at(TokenKind::StatementBreak)
            || matches!(self.b.current(), Some(TokenKind::Close(_)))
        {
            self.b.error(MESSAGE);
            return false;
        }

        log::debug!(
            "skipping input nested past {} levels",
            Builder::<NodeKind>::MAX_DEPTH
        );

        let junk = self.b.mark();
        let mut open = 0usize;
        while let Some(kind) = self.b.current() {
            match kind {
                TokenKind::StatementBreak => break,
                TokenKind::Open(_) => open += 1,
                TokenKind::Close(_) => open = open.saturating_sub(1),
                _ => {}
            }

            self.b.advance();
            if open == 0 {
                break;
            }
        }
        junk.error(&mut self.b, MESSAGE).keep();

        true
    }
}

// Token helpers
impl Parser<'_> {
    pub(crate) fn at_word(&self, word: Reserved) -> bool {
        self.b.at(TokenKind::Reserved(word))
    }

    pub(crate) fn at_operator(&self, operator: Operator) -> bool {
        self.b.at(TokenKind::Operator(operator))
    }

    /// Make a node of `kind` out of just the next token.
    pub(crate) fn token_node(&mut self, kind: NodeKind) {
        let marker = self.b.mark();
        self.b.advance();
        marker.done(&mut self.b, kind).keep();
    }

    /// Mark and immediately complete an empty node.
    pub(crate) fn empty_node(&mut self, kind: NodeKind) {
        let marker = self.b.mark();
        marker.done(&mut self.b, kind).keep();
    }

    /// Check that a sub-parser is only called where its first token is.
    pub(crate) fn assert_at(&self, kind: TokenKind) {
        debug_assert!(
            self.b.at(kind),
            "expected {} but found {:?}",
            kind.name(),
            self.b.current()
        );
    }
}
