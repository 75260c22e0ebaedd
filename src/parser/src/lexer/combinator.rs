//! Small rules the lexical grammar is built out of.
//!
//! Anything here that can fail returns an [`Option`] rather than an
//! [`Error`][crate::lexer::Error], so the caller has to decide what the
//! appropriate error is.

use crate::lexer::Lexer;

impl<'a> Lexer<'a> {
    /// Run a rule, but back track if it fails returning [`None`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use parser::lexer::Lexer;
    /// let mut lexer = Lexer::new("rb'x'");
    /// assert_eq!(lexer.optional(|lex| lex.str("br")), None);
    /// assert_eq!(lexer.optional(|lex| lex.str("rb")), Some("rb"));
    /// assert_eq!(lexer.remaining_input(), "'x'");
    /// ```
    pub fn optional<T, F>(&mut self, rule: F) -> Option<T>
    where
        F: Fn(&mut Lexer<'a>) -> Option<T>,
    {
        let old_location = self.location;
        let old_offset = self.offset;

        let result = rule(self);

        if result.is_none() {
            self.location = old_location;
            self.offset = old_offset;
        }

        result
    }

    /// Get the _n_th character in the remaining input, starting with zero.
    ///
    /// ```
    /// # use parser::lexer::Lexer;
    /// let lexer = Lexer::new("0x1F");
    /// assert_eq!(lexer.peek_nth(1), Some('x'));
    /// assert_eq!(lexer.remaining_input(), "0x1F");
    /// ```
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.remaining_input().chars().nth(n)
    }

    /// Get the next character in the input.
    pub fn peek(&self) -> Option<char> {
        self.remaining_input().chars().next()
    }

    /// Advance the lexer by a single character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;

        self.location.increment(c);
        self.offset += c.len_utf8();

        Some(c)
    }

    /// Consume a specific expected character in the input.
    pub fn char(&mut self, expected: char) -> Option<char> {
        match self.peek() {
            Some(found) if expected == found => self.advance(),
            _ => None,
        }
    }

    /// Consume a specific expected string in the input.
    ///
    /// This doesn't back track if only part of `s` matched, wrap it in
    /// [`Lexer::optional`] for that.
    pub fn str<'b>(&mut self, s: &'b str) -> Option<&'b str> {
        for c in s.chars() {
            self.char(c)?;
        }
        Some(s)
    }

    /// Consume characters in the input while they match a predicate. Might
    /// return an empty string.
    ///
    /// ```
    /// # use parser::lexer::Lexer;
    /// let mut lexer = Lexer::new("  \tx");
    /// assert_eq!(lexer.consume_while(|c| c == ' ' || c == '\t'), "  \t");
    /// assert_eq!(lexer.remaining_input(), "x");
    /// ```
    pub fn consume_while<F>(&mut self, predicate: F) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        let start = self.offset;

        while let Some(c) = self.peek() {
            if predicate(c) {
                self.advance();
            } else {
                break;
            }
        }

        &self.input[start..self.offset]
    }

    /// Consume the next character of input, if it's in the string `cs`.
    pub fn one_of(&mut self, cs: &'static str) -> Option<char> {
        match self.peek() {
            Some(c) if cs.contains(c) => self.advance(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_a(lex: &mut Lexer) -> Option<char> {
        lex.char('a')
    }

    #[test]
    fn optional_empty() {
        let mut lexer = Lexer::new("babb");
        assert_eq!(lexer.optional(rule_a), None);
        assert_eq!(lexer.remaining_input(), "babb");
    }

    #[test]
    fn optional_partial_match_backtracks() {
        let mut lexer = Lexer::new("abc");
        assert_eq!(lexer.optional(|lex| lex.str("abd")), None);
        assert_eq!(lexer.remaining_input(), "abc");
    }

    #[test]
    fn peek_nth() {
        let lex = Lexer::new("ab");
        assert_eq!(lex.peek_nth(0), Some('a'));
        assert_eq!(lex.peek_nth(1), Some('b'));
        assert_eq!(lex.peek_nth(2), None);
    }

    #[test]
    fn advance_tracks_lines() {
        let mut lex = Lexer::new("a\nb");
        lex.advance();
        lex.advance();
        assert_eq!(lex.location.line(), 1);
        assert_eq!(lex.location.column(), 0);
        assert_eq!(lex.offset, 2);
    }

    #[test]
    fn str_empty() {
        let mut lex = Lexer::new("");
        assert_eq!(lex.str("a"), None);
        assert_eq!(lex.str(""), Some(""));
    }

    #[test]
    fn one_of() {
        let mut lex = Lexer::new("xX");
        assert_eq!(lex.one_of("xX"), Some('x'));
        assert_eq!(lex.one_of("oO"), None);
        assert_eq!(lex.one_of("xX"), Some('X'));
        assert_eq!(lex.one_of("xX"), None);
    }
}
