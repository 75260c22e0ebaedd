//! The rules of the lexical grammar

use unicode_xid::UnicodeXID;

use crate::lexer::{Delimiter, Error, Lexer, Operator, Reserved, TokenKind};

impl Lexer<'_> {
    /// This is the main entry point into the lexer internals. It dispatches to
    /// smaller handlers for more complicated token types.
    ///
    /// The input must not be empty.
    pub(crate) fn token_kind(&mut self) -> Result<TokenKind, Error> {
        let location = self.location;
        let next = match self.peek() {
            Some(c) => c,
            None => return Err(Error::NotStartOfToken(location, '\0')),
        };

        match next {
            ' ' | '\t' | '\x0c' | '\r' => Ok(self.space()),
            '\n' => self.single(TokenKind::LineBreak),
            '\\' => self.line_continuation(),
            '#' => Ok(self.comment()),

            ':' => self.single(TokenKind::Colon),
            ';' => self.single(TokenKind::Semicolon),
            ',' => self.single(TokenKind::Comma),
            '(' => self.single(TokenKind::Open(Delimiter::Parenthesis)),
            ')' => self.single(TokenKind::Close(Delimiter::Parenthesis)),
            '[' => self.single(TokenKind::Open(Delimiter::Bracket)),
            ']' => self.single(TokenKind::Close(Delimiter::Bracket)),
            '{' => self.single(TokenKind::Open(Delimiter::Brace)),
            '}' => self.single(TokenKind::Close(Delimiter::Brace)),

            '.' if self.peek_nth(1).map_or(false, |c| c.is_ascii_digit()) => {
                self.number()
            }
            '.' => self.single(TokenKind::Dot),

            '\'' | '"' => self.string(),
            _ if self.at_string_prefix() => self.string(),

            c if c.is_ascii_digit() => self.number(),
            c if is_identifier_start(c) => Ok(self.word()),

            _ => self.operator(),
        }
    }

    /// A token that's exactly one character long.
    fn single(&mut self, kind: TokenKind) -> Result<TokenKind, Error> {
        self.advance();
        Ok(kind)
    }

    /// A run of horizontal whitespace.
    fn space(&mut self) -> TokenKind {
        self.consume_while(|c| matches!(c, ' ' | '\t' | '\x0c' | '\r'));
        TokenKind::Space
    }

    /// A backslash right before the end of a line joins the two lines, so
    /// it's treated like a space.
    fn line_continuation(&mut self) -> Result<TokenKind, Error> {
        let location = self.location;
        let joined = self.optional(|lex| {
            lex.char('\\')?;
            lex.char('\r');
            lex.char('\n')
        });

        match joined {
            Some(_) => Ok(TokenKind::Space),
            None => {
                self.advance();
                Err(Error::NotStartOfToken(location, '\\'))
            }
        }
    }

    /// A comment starts with `#` and runs to the end of the line, not
    /// including the newline.
    fn comment(&mut self) -> TokenKind {
        self.consume_while(|c| c != '\n');
        TokenKind::Comment
    }

    /// A word is any reserved word or identifier.
    fn word(&mut self) -> TokenKind {
        let word = self.consume_while(is_identifier_continue);

        match Reserved::try_from_str(word) {
            Some(r) => TokenKind::Reserved(r),
            None => TokenKind::Identifier,
        }
    }

    /// Operators, `=`, and their compound assignment forms.
    ///
    /// The longest match wins, so `**` is one token and not two `*`s.
    fn operator(&mut self) -> Result<TokenKind, Error> {
        use Operator::*;

        const OPERATORS: &[(&str, Operator)] = &[
            ("**", StarStar),
            ("//", SlashSlash),
            ("<<", LessLess),
            (">>", GreaterGreater),
            ("==", EqualEqual),
            ("!=", BangEqual),
            ("<=", LessEqual),
            (">=", GreaterEqual),
            ("+", Plus),
            ("-", Minus),
            ("*", Star),
            ("/", Slash),
            ("%", Percent),
            ("~", Tilde),
            ("&", Ampersand),
            ("|", Pipe),
            ("^", Caret),
            ("<", Less),
            (">", Greater),
        ];

        let location = self.location;

        // `<=`, `>=`, `==` and `!=` are comparisons, not compound assignment,
        // so they're matched before trying `<` then `=`.
        for (text, operator) in OPERATORS {
            if self.optional(|lex| lex.str(text)).is_some() {
                if operator.has_compound_form() && self.char('=').is_some() {
                    return Ok(TokenKind::CompoundAssign(*operator));
                }
                return Ok(TokenKind::Operator(*operator));
            }
        }

        match self.advance() {
            Some('=') => Ok(TokenKind::Equals),
            Some(c) => Err(Error::NotStartOfToken(location, c)),
            None => Err(Error::NotStartOfToken(location, '\0')),
        }
    }
}

/// Is a character a valid beginning to an identifier, i.e.
/// [`is_xid_start`][UnicodeXID::is_xid_start] or an underscore?
fn is_identifier_start(c: char) -> bool {
    c == '_' || UnicodeXID::is_xid_start(c)
}

/// Is a character valid inside an identifier, i.e.
/// [`is_xid_continue`][UnicodeXID::is_xid_continue]?
fn is_identifier_continue(c: char) -> bool {
    UnicodeXID::is_xid_continue(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut kinds = Vec::new();
        while let Some(token) = lexer.token() {
            kinds.push(token.map(|t| t.kind()).unwrap_or(TokenKind::Invalid));
        }
        kinds
    }

    #[test]
    fn words() {
        use TokenKind::*;
        assert_eq!(
            kinds("def _x lambda2 load"),
            vec![
                Reserved(super::Reserved::Def),
                Space,
                Identifier,
                Space,
                Identifier,
                Space,
                Reserved(super::Reserved::Load),
            ]
        );
    }

    #[test]
    fn longest_operator_wins() {
        use Operator::*;
        use TokenKind::{CompoundAssign, Equals, Operator as Op};
        assert_eq!(
            kinds("**=**<<=<==!==//"),
            vec![
                Op(StarStar),
                Equals,
                Op(StarStar),
                CompoundAssign(LessLess),
                Op(LessEqual),
                Equals,
                Op(BangEqual),
                Equals,
                Op(SlashSlash),
            ]
        );
    }

    #[test]
    fn compound_assignment() {
        use Operator::*;
        use TokenKind::CompoundAssign;
        assert_eq!(
            kinds("+=//=>>="),
            vec![
                CompoundAssign(Plus),
                CompoundAssign(SlashSlash),
                CompoundAssign(GreaterGreater),
            ]
        );
    }

    #[test]
    fn line_continuation() {
        assert_eq!(
            kinds("a \\\nb"),
            vec![
                TokenKind::Identifier,
                TokenKind::Space,
                TokenKind::Space,
                TokenKind::Identifier
            ]
        );
        assert_eq!(kinds("\\x"), vec![TokenKind::Invalid, TokenKind::Identifier]);
    }

    #[test]
    fn comment_excludes_newline() {
        assert_eq!(
            kinds("# hi\nx"),
            vec![TokenKind::Comment, TokenKind::LineBreak, TokenKind::Identifier]
        );
    }

    #[test]
    fn bad_character() {
        let mut lexer = Lexer::new("$");
        assert!(matches!(
            lexer.token(),
            Some(Err(Error::NotStartOfToken(_, '$')))
        ));
        assert!(lexer.is_empty());
    }
}
