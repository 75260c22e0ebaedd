//! String and byte string literal lexing.
//!
//! Strings can be quoted with `'` or `"`, or tripled versions of either for
//! strings that span lines. A prefix of `r` makes the string raw, so escapes
//! are left alone, and a `b` makes it a byte string. Both can be combined in
//! either order, and in either case.
//!
//! Supported escapes are:
//!
//! - `\a`, `\b`, `\f`, `\n`, `\r`, `\t` and `\v`
//! - `\\`, `\'` and `\"`
//! - a backslash before a newline, which continues the line
//! - up to three octal digits, like `\017`
//! - `\x` and two hex digits
//! - `\u` and four hex digits, or `\U` and eight

use crate::lexer::{Error, Lexer, TokenKind};

impl Lexer<'_> {
    /// Is the input at a string prefix followed by a quote?
    pub(crate) fn at_string_prefix(&self) -> bool {
        let is_quote = |c: Option<char>| matches!(c, Some('\'' | '"'));
        let is_prefix = |c: Option<char>| matches!(c, Some('r' | 'R' | 'b' | 'B'));

        match (self.peek(), self.peek_nth(1)) {
            (p, next) if is_prefix(p) && is_quote(next) => true,
            (Some('r' | 'R'), Some('b' | 'B')) | (Some('b' | 'B'), Some('r' | 'R')) => {
                is_quote(self.peek_nth(2))
            }
            _ => false,
        }
    }

    /// A string or byte string literal, with any prefix.
    ///
    /// An invalid escape doesn't stop the string, so that the whole literal
    /// ends up in one token. The first bad escape is reported once the
    /// closing quote is found.
    pub(crate) fn string(&mut self) -> Result<TokenKind, Error> {
        let start = self.location;

        let prefix = self.consume_while(|c| matches!(c, 'r' | 'R' | 'b' | 'B'));
        let raw = prefix.contains(['r', 'R']);
        let kind = if prefix.contains(['b', 'B']) {
            TokenKind::Bytes
        } else {
            TokenKind::String
        };

        let quote = match self.one_of("'\"") {
            Some(q) => q,
            None => return Err(Error::UnclosedString(start)),
        };

        let triple = self.peek() == Some(quote) && self.peek_nth(1) == Some(quote);
        if triple {
            self.advance();
            self.advance();
        }

        let mut invalid = None;

        loop {
            match self.peek() {
                None => return Err(Error::UnclosedString(start)),
                Some('\n') if !triple => return Err(Error::UnclosedString(start)),
                Some('\\') => {
                    self.advance();
                    if raw {
                        self.advance();
                    } else if let Err(e) = self.escape_sequence() {
                        invalid.get_or_insert(e);
                    }
                }
                Some(c) if c == quote => {
                    self.advance();
                    if !triple || self.optional(|lex| lex.char(quote).and_then(|_| lex.char(quote))).is_some() {
                        break;
                    }
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        match invalid {
            Some(e) => Err(e),
            None => Ok(kind),
        }
    }

    /// The part of an escape sequence after the backslash.
    fn escape_sequence(&mut self) -> Result<(), Error> {
        let location = self.location;

        match self.peek() {
            // Leave it for the caller to report the string as unclosed.
            None => Ok(()),
            Some('a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' | '\\' | '\'' | '"' | '\n') => {
                self.advance();
                Ok(())
            }
            Some('0'..='7') => {
                for _ in 0..3 {
                    if self.one_of("01234567").is_none() {
                        break;
                    }
                }
                Ok(())
            }
            Some(c @ ('x' | 'u' | 'U')) => {
                self.advance();
                let count = match c {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                for _ in 0..count {
                    match self.peek() {
                        Some(h) if h.is_ascii_hexdigit() => {
                            self.advance();
                        }
                        _ => return Err(Error::InvalidEscape(location, c)),
                    }
                }
                Ok(())
            }
            Some(c) => Err(Error::InvalidEscape(location, c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> (Result<TokenKind, Error>, &str) {
        let mut lexer = Lexer::new(input);
        let kind = lexer.token().unwrap().map(|t| t.kind());
        let consumed = &input[..input.len() - lexer.remaining_input().len()];
        (kind, consumed)
    }

    #[test]
    fn simple() {
        assert_eq!(lex(r#""test" x"#), (Ok(TokenKind::String), r#""test""#));
        assert_eq!(lex("'test' x"), (Ok(TokenKind::String), "'test'"));
    }

    #[test]
    fn other_quote_inside() {
        assert_eq!(lex(r#""'""#).0, Ok(TokenKind::String));
        assert_eq!(lex(r#"'"'"#).0, Ok(TokenKind::String));
    }

    #[test]
    fn escapes() {
        assert_eq!(lex(r#""a\"b" x"#), (Ok(TokenKind::String), r#""a\"b""#));
        assert_eq!(lex(r#""\x41é\U0001F600\017\n""#).0, Ok(TokenKind::String));
    }

    #[test]
    fn invalid_escape_covers_whole_string() {
        let (kind, consumed) = lex(r#""a\qb" x"#);
        assert!(matches!(kind, Err(Error::InvalidEscape(_, 'q'))));
        assert_eq!(consumed, r#""a\qb""#);

        assert!(matches!(lex(r#""\xZ""#).0, Err(Error::InvalidEscape(_, 'x'))));
    }

    #[test]
    fn raw_ignores_escapes() {
        assert_eq!(lex(r#"r"\d\"" x"#), (Ok(TokenKind::String), r#"r"\d\"""#));
    }

    #[test]
    fn bytes() {
        assert_eq!(lex(r#"b"\x00""#).0, Ok(TokenKind::Bytes));
        assert_eq!(lex(r#"rb'\d'"#).0, Ok(TokenKind::Bytes));
        assert_eq!(lex(r#"BR'\d'"#).0, Ok(TokenKind::Bytes));
    }

    #[test]
    fn triple_quoted() {
        let input = "'''one\n'two'\n''' x";
        assert_eq!(lex(input), (Ok(TokenKind::String), "'''one\n'two'\n'''"));
        assert_eq!(lex(r#""""a"b""" x"#).1, r#""""a"b""""#);
    }

    #[test]
    fn unclosed_stops_at_newline() {
        let (kind, consumed) = lex("'abc\nx");
        assert!(matches!(kind, Err(Error::UnclosedString(_))));
        assert_eq!(consumed, "'abc");
    }

    #[test]
    fn unclosed_triple_runs_to_end() {
        let (kind, consumed) = lex("'''abc\nx");
        assert!(matches!(kind, Err(Error::UnclosedString(_))));
        assert_eq!(consumed, "'''abc\nx");
    }
}
