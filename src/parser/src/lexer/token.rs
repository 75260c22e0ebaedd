//! # Tokens
//!
//! Each token is an individual lexeme in the language, the smallest unit of
//! meaning. Unlike most parsers, whitespace and comments are tokens too, so
//! that a syntax tree can give back exactly the text it was built from.
//!
//! Tokens provide both the semantic information in the form of their `Kind`,
//! and the context they were found in.

use diagnostic::Span;

/// An individual lexeme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    /// The semantic kind thing the token is. See `Kind` for more.
    pub(crate) kind: Kind,

    /// The `Span` of the token's body. Layout tokens have empty spans.
    pub(crate) span: Span,

    /// The body of the token as it was represented in the original input.
    pub(crate) body: &'a str,

    /// The byte offset of the start of `body` in the input.
    pub(crate) offset: usize,
}

impl<'a> Token<'a> {
    /// The kind of token this is.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The span of the body of this token.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The way the token was represented in the source.
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Where the token starts in the input, in bytes.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<'a> ::std::fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "{}", self.body)
    }
}

/// A [`Token`]'s kind is the semantically-relevant part of the token, removed
/// from the source context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Spaces, tabs and line continuations that don't end a line.
    Space,
    /// A newline and any whitespace after it. Inside brackets these are
    /// insignificant, otherwise they separate logical lines.
    LineBreak,
    /// Comments begin with `#` and go to the end of the line.
    Comment,

    /// The end of a logical line. These are zero-width and come from the
    /// layout pass, not the input.
    StatementBreak,
    /// Indentation increased.
    Indent,
    /// Indentation decreased.
    Dedent,
    /// Indentation decreased to a level that doesn't match any enclosing
    /// block. Always followed by a [`Kind::Dedent`].
    InconsistentDedent,

    /// Things like `foo` are identifies, names for things.
    Identifier,
    /// An integer like `5`, `0x1F`, `0o17` or `0b101`.
    Int,
    /// A floating point number like `12.34e-5`, `.5` or `1.`.
    Float,
    /// A string literal like `"hi"`, `'''doc'''` or `r"\d"`.
    String,
    /// A byte string literal like `b"\x00"`.
    Bytes,

    /// Words which are used by the language and can't be identifiers.
    Reserved(Reserved),

    /// Things like `+`, `==` or `>>`.
    Operator(Operator),
    /// An operator followed by `=`, like `+=`.
    CompoundAssign(Operator),

    /// `=`
    Equals,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Dot,

    /// Open a paired delimiter.
    Open(Delimiter),
    /// Close a paired delimiter
    Close(Delimiter),

    /// Input that couldn't be lexed. The reason is kept with the lexer's
    /// errors.
    Invalid,
}

impl Kind {
    /// The user-facing name of this kind of token.
    pub fn name(&self) -> &'static str {
        use Delimiter::*;
        use Kind::*;
        match self {
            Space => "space",
            LineBreak => "line break",
            Comment => "comment",
            StatementBreak => "end of statement",
            Indent => "indent",
            Dedent => "dedent",
            InconsistentDedent => "inconsistent dedent",
            Identifier => "identifier",
            Int => "integer",
            Float => "float",
            String => "string",
            Bytes => "bytes",
            Reserved(r) => r.as_str(),
            Operator(o) => o.as_str(),
            CompoundAssign(o) => o.compound_str(),
            Equals => "=",
            Colon => ":",
            Comma => ",",
            Semicolon => ";",
            Dot => ".",
            Open(Parenthesis) => "(",
            Close(Parenthesis) => ")",
            Open(Bracket) => "[",
            Close(Bracket) => "]",
            Open(Brace) => "{",
            Close(Brace) => "}",
            Invalid => "invalid token",
        }
    }

    /// Trivia never matters to the grammar, it's only kept so the tree
    /// covers all of the input.
    pub fn is_trivia(&self) -> bool {
        matches!(self, Kind::Space | Kind::LineBreak | Kind::Comment)
    }

    /// Zero-width tokens produced by the layout pass.
    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            Kind::StatementBreak
                | Kind::Indent
                | Kind::Dedent
                | Kind::InconsistentDedent
        )
    }

    /// Is this token kind always a literal?
    pub fn is_literal(&self) -> bool {
        use Kind::*;
        matches!(self, Int | Float | String | Bytes)
    }
}

/// Delimiters are the different sorts of characters with a distinct opening and
/// closing characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `{}`
    Brace,

    /// `[]`
    Bracket,

    /// `()`
    Parenthesis,
}

/// Reserved words can't be used as identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reserved {
    And,
    Break,
    Continue,
    Def,
    Elif,
    Else,
    For,
    If,
    In,
    Is,
    Lambda,
    Load,
    Not,
    Or,
    Pass,
    Return,
}

impl Reserved {
    /// The in-code representation of a reserved word.
    pub fn as_str(self) -> &'static str {
        use self::Reserved::*;
        match self {
            And => "and",
            Break => "break",
            Continue => "continue",
            Def => "def",
            Elif => "elif",
            Else => "else",
            For => "for",
            If => "if",
            In => "in",
            Is => "is",
            Lambda => "lambda",
            Load => "load",
            Not => "not",
            Or => "or",
            Pass => "pass",
            Return => "return",
        }
    }

    pub(crate) fn try_from_str(s: &str) -> Option<Reserved> {
        use self::Reserved::*;
        Some(match s {
            "and" => And,
            "break" => Break,
            "continue" => Continue,
            "def" => Def,
            "elif" => Elif,
            "else" => Else,
            "for" => For,
            "if" => If,
            "in" => In,
            "is" => Is,
            "lambda" => Lambda,
            "load" => Load,
            "not" => Not,
            "or" => Or,
            "pass" => Pass,
            "return" => Return,
            _ => return None,
        })
    }
}

impl ::std::fmt::Display for Reserved {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operator symbols.
///
/// The word operators (`and`, `or`, `not`, `in`, `is`) are [`Reserved`]
/// words instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    Slash,
    SlashSlash,
    Percent,
    StarStar,
    Tilde,
    Ampersand,
    Pipe,
    Caret,
    LessLess,
    GreaterGreater,
    EqualEqual,
    BangEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        use self::Operator::*;
        match self {
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            SlashSlash => "//",
            Percent => "%",
            StarStar => "**",
            Tilde => "~",
            Ampersand => "&",
            Pipe => "|",
            Caret => "^",
            LessLess => "<<",
            GreaterGreater => ">>",
            EqualEqual => "==",
            BangEqual => "!=",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
        }
    }

    /// The text of the compound assignment form, like `+=`.
    pub fn compound_str(self) -> &'static str {
        use self::Operator::*;
        match self {
            Plus => "+=",
            Minus => "-=",
            Star => "*=",
            Slash => "/=",
            SlashSlash => "//=",
            Percent => "%=",
            Ampersand => "&=",
            Pipe => "|=",
            Caret => "^=",
            LessLess => "<<=",
            GreaterGreater => ">>=",
            _ => "?=",
        }
    }

    /// Can this operator be combined with `=` for augmented assignment?
    pub fn has_compound_form(self) -> bool {
        use self::Operator::*;
        matches!(
            self,
            Plus | Minus
                | Star
                | Slash
                | SlashSlash
                | Percent
                | Ampersand
                | Pipe
                | Caret
                | LessLess
                | GreaterGreater
        )
    }
}

impl ::std::fmt::Display for Operator {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
