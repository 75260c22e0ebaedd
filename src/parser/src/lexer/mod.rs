//! Lexing - converting input into [`Token`]s.
//!
//! This happens in two steps. The [`Lexer`] breaks the input into raw tokens,
//! including whitespace, newlines and comments. Then the layout pass in
//! [`layout`] works out where statements end and blocks begin and end, adding
//! zero-width layout tokens and merging whitespace so there's one trivia token
//! between any two meaningful ones.
//!
//! Most users want [`tokenize`], which does both.
//!
//! # Notes
//!
//! The lexer never gives up. Input it can't make sense of becomes an
//! [`Invalid`][TokenKind::Invalid] token, and the reason is kept alongside the
//! tokens.

mod combinator;
mod error;
pub mod layout;
mod number;
mod rules;
mod string;
mod token;

use diagnostic::{Caret, Span};

pub use crate::lexer::{
    error::Error,
    token::{Delimiter, Kind as TokenKind, Operator, Reserved, Token},
};

/// A [`Lexer`] scans over the input character by character and breaks it
/// into raw [`Token`]s.
///
/// # Example
///
/// ```
/// # use parser::lexer::Lexer;
/// let mut lexer = Lexer::new("abc def");
/// while let Some(token) = lexer.token() {
///     // do something with token
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'i> {
    /// The input being consumed, as utf8
    pub(crate) input: &'i str,

    /// The location of the caret, as a line and column
    pub(crate) location: Caret,

    /// The location of the caret, as a byte offset
    pub(crate) offset: usize,
}

impl<'i> Lexer<'i> {
    /// Create a new lexer over some input.
    pub fn new(input: &'i str) -> Self {
        Lexer {
            input,
            location: Caret::default(),
            offset: 0,
        }
    }

    /// Has the lexer consumed all of the input?
    ///
    /// # Examples
    ///
    /// ```
    /// # use parser::lexer::Lexer;
    /// assert!(Lexer::new("").is_empty());
    /// assert!(!Lexer::new(" ").is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.offset == self.input.len()
    }

    /// The input that hasn't been broken into tokens yet.
    ///
    /// # Example
    ///
    /// ```
    /// # use parser::lexer::Lexer;
    /// let mut lexer = Lexer::new("abc def");
    /// let abc = lexer.token();
    /// assert_eq!(lexer.remaining_input(), " def");
    /// ```
    pub fn remaining_input(&self) -> &'i str {
        &self.input[self.offset..]
    }

    /// Produce the next raw token (or [`Error`]), advancing the lexer. At the
    /// end of the input this returns [`None`].
    ///
    /// Errors still consume input, at least one character of it.
    pub fn token(&mut self) -> Option<Result<Token<'i>, Error>> {
        let (token, error) = self.token_or_invalid()?;
        Some(match error {
            Some(e) => Err(e),
            None => Ok(token),
        })
    }

    /// Like [`Lexer::token`], but an error still produces a token, which has
    /// the kind [`TokenKind::Invalid`] and covers whatever was consumed.
    pub(crate) fn token_or_invalid(
        &mut self,
    ) -> Option<(Token<'i>, Option<Error>)> {
        if self.is_empty() {
            return None;
        }

        let start_location = self.location;
        let start_offset = self.offset;

        let result = self.token_kind();

        if self.offset == start_offset {
            self.advance();
        }

        let (kind, error) = match result {
            Ok(kind) => (kind, None),
            Err(e) => (TokenKind::Invalid, Some(e)),
        };

        let token = Token {
            kind,
            span: Span::new(start_location, self.location),
            body: &self.input[start_offset..self.offset],
            offset: start_offset,
        };

        Some((token, error))
    }
}

/// The result of lexing some input.
#[derive(Debug, Clone)]
pub struct Lexed<'a> {
    tokens: Vec<Token<'a>>,
    errors: Vec<Error>,
}

impl<'a> Lexed<'a> {
    /// Every token, including trivia and layout tokens.
    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// The lexical errors. There's one per [`TokenKind::Invalid`] token, in
    /// the same order.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_parts(self) -> (Vec<Token<'a>>, Vec<Error>) {
        (self.tokens, self.errors)
    }
}

/// Break `input` into tokens, and run the layout pass over them.
///
/// The bodies of the tokens always add back up to the input.
///
/// ```
/// # use parser::lexer::{tokenize, TokenKind};
/// let lexed = tokenize("x = 1\n");
/// let text: String = lexed.tokens().iter().map(|t| t.body()).collect();
/// assert_eq!(text, "x = 1\n");
/// assert_eq!(lexed.tokens().last().unwrap().kind(), TokenKind::StatementBreak);
/// ```
pub fn tokenize(input: &str) -> Lexed<'_> {
    let mut lexer = Lexer::new(input);
    let mut raw = Vec::new();
    let mut errors = Vec::new();

    while let Some((token, error)) = lexer.token_or_invalid() {
        if let Some(e) = error {
            log::trace!("lexical error at {}: {}", token.span(), e);
            errors.push(e);
        }
        raw.push(token);
    }

    let tokens = layout::layout(input, &raw);
    log::debug!(
        "lexed {} tokens ({} raw) with {} errors",
        tokens.len(),
        raw.len(),
        errors.len()
    );

    Lexed { tokens, errors }
}
