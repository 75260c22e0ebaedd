//! Lexer errors

use diagnostic::{Caret, Diagnostic, Span};
use thiserror::Error;

/// Lexical errors, with the location needed to present them nicely.
///
/// The lexer doesn't stop at these. The offending input becomes an
/// [`Invalid`][super::TokenKind::Invalid] token and lexing carries on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("no token can start with '{1}'")]
    NotStartOfToken(Caret, char),

    #[error("string literal is missing its closing quote")]
    UnclosedString(Caret),

    #[error("'\\{1}' is not a valid escape sequence")]
    InvalidEscape(Caret, char),

    #[error("floating point exponent must have at least one digit")]
    InvalidFloatExponent(Caret),

    #[error("base {1} integer literal must have at least one digit")]
    InvalidRadixLiteral(Caret, u32),
}

impl Error {
    /// Where the problem was found.
    pub fn caret(&self) -> Caret {
        match self {
            Error::NotStartOfToken(c, _)
            | Error::UnclosedString(c)
            | Error::InvalidEscape(c, _)
            | Error::InvalidFloatExponent(c)
            | Error::InvalidRadixLiteral(c, _) => *c,
        }
    }

    /// A [`Diagnostic`] highlighting where the problem was found.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.to_string())
            .location(self.caret())
            .highlight(Span::point(self.caret()), "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = Error::InvalidEscape(Caret::new(0, 3), 'q');
        assert_eq!(e.to_string(), "'\\q' is not a valid escape sequence");
        assert_eq!(e.caret(), Caret::new(0, 3));

        let e = Error::InvalidRadixLiteral(Caret::default(), 16);
        assert_eq!(
            e.to_string(),
            "base 16 integer literal must have at least one digit"
        );
    }
}
