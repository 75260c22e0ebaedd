//! Numeric literals lexing.
//!
//! There are a few supported types:
//!
//! 1. Base-10 integers, like `42`.
//! 2. Floating point literals, like `1.5`, `.5`, `1.` and `1e9`.
//! 3. Other common radix literals, with bases '0b' for base 2, '0o' for base 8,
//!    and '0x' for base 16.
//!
//! Any leading '-' or '+' is lexed as an operator and later parsed as a unary
//! operator, so "-10" is two tokens.
//!
//! The value isn't interpreted at this stage, only the shape.

use crate::lexer::{Error, Lexer, TokenKind};

impl Lexer<'_> {
    /// The entry point for numeric literals. The next character must be a
    /// digit, or a `.` followed by a digit.
    pub(crate) fn number(&mut self) -> Result<TokenKind, Error> {
        match (self.peek(), self.peek_nth(1)) {
            (Some('0'), Some('x' | 'X')) => self.radix_literal("xX", 16),
            (Some('0'), Some('o' | 'O')) => self.radix_literal("oO", 8),
            (Some('0'), Some('b' | 'B')) => self.radix_literal("bB", 2),
            (Some('.'), _) => self.float(),
            _ => self.float_or_integer(),
        }
    }

    /// Consume a base-10 integer or a floating point number.
    ///
    /// ```text
    /// float_or_integer := digits ('.' digits?)? exponent?
    /// ```
    fn float_or_integer(&mut self) -> Result<TokenKind, Error> {
        let digits = self.consume_digits(10);
        debug_assert!(digits.is_some(), "number must start with a digit");

        match self.peek() {
            Some('.' | 'e' | 'E') => self.float(),
            _ => Ok(TokenKind::Int),
        }
    }

    /// Floating point literals, after any whole part has been consumed.
    ///
    /// ```text
    /// float := ('.' digits?)? (('e' | 'E') ('+' | '-')? digits)?
    /// ```
    fn float(&mut self) -> Result<TokenKind, Error> {
        if self.char('.').is_some() {
            self.consume_digits(10);
        }

        if self.one_of("eE").is_some() {
            // The sign is optional.
            self.one_of("+-");

            let location = self.location;
            self.consume_digits(10)
                .ok_or(Error::InvalidFloatExponent(location))?;
        }

        Ok(TokenKind::Float)
    }

    /// Consume a radix literal like those used for hexadecimal, octal and
    /// binary literals.
    ///
    /// ```text
    /// radix_literal := "0" one_of(letters) digit(radix)+
    /// ```
    fn radix_literal(
        &mut self,
        letters: &'static str,
        radix: u32,
    ) -> Result<TokenKind, Error> {
        let prefix = self.char('0').and_then(|_| self.one_of(letters));
        debug_assert!(prefix.is_some(), "radix literal must start with 0x, 0o or 0b");

        match self.consume_digits(radix) {
            Some(_) => Ok(TokenKind::Int),
            None => Err(Error::InvalidRadixLiteral(self.location, radix)),
        }
    }

    /// Consume one or more digits in `radix`, or return [`None`] if there
    /// aren't any.
    fn consume_digits(&mut self, radix: u32) -> Option<&str> {
        match self.peek() {
            Some(c) if c.is_digit(radix) => {
                Some(self.consume_while(|c| c.is_digit(radix)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(input: &str) -> Result<TokenKind, Error> {
        Lexer::new(input).token().unwrap().map(|t| t.kind())
    }

    fn body(input: &str) -> &str {
        Lexer::new(input).token().unwrap().unwrap().body()
    }

    #[test]
    fn integers() {
        assert_eq!(kind("0"), Ok(TokenKind::Int));
        assert_eq!(kind("1234"), Ok(TokenKind::Int));
        assert_eq!(body("12ab"), "12");
    }

    #[test]
    fn radix() {
        assert_eq!(kind("0x1F"), Ok(TokenKind::Int));
        assert_eq!(kind("0o17"), Ok(TokenKind::Int));
        assert_eq!(kind("0B101"), Ok(TokenKind::Int));
        assert_eq!(body("0b102"), "0b10");
    }

    #[test]
    fn radix_empty() {
        assert!(matches!(kind("0x"), Err(Error::InvalidRadixLiteral(_, 16))));
        assert!(matches!(kind("0og"), Err(Error::InvalidRadixLiteral(_, 8))));
    }

    #[test]
    fn floats() {
        assert_eq!(kind("1.5"), Ok(TokenKind::Float));
        assert_eq!(kind(".5"), Ok(TokenKind::Float));
        assert_eq!(kind("1."), Ok(TokenKind::Float));
        assert_eq!(kind("1e9"), Ok(TokenKind::Float));
        assert_eq!(kind("1.5E-3"), Ok(TokenKind::Float));
        assert_eq!(body("2.5e+10x"), "2.5e+10");
    }

    #[test]
    fn float_bad_exponent() {
        assert!(matches!(kind("1e"), Err(Error::InvalidFloatExponent(_))));
        assert!(matches!(kind("1.0e+"), Err(Error::InvalidFloatExponent(_))));
    }
}
