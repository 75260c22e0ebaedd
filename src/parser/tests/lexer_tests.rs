use parser::lexer::{
    tokenize, Delimiter, Error, Lexed, Lexer, Reserved as Word, TokenKind,
};

use TokenKind::*;

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).tokens().iter().map(|t| t.kind()).collect()
}

fn text(lexed: &Lexed) -> std::string::String {
    lexed.tokens().iter().map(|t| t.body()).collect()
}

#[test]
fn lexer_empty() {
    let mut lexer = Lexer::new("");
    assert!(lexer.is_empty());
    assert!(lexer.token().is_none());
}

#[test]
fn lexer_identifier() {
    let mut lexer = Lexer::new("_input");
    assert_eq!(lexer.token().unwrap().unwrap().kind(), Identifier);
    assert!(lexer.is_empty());
}

#[test]
fn simple_assignment() {
    assert_eq!(kinds("x=0"), vec![Identifier, Equals, Int, StatementBreak]);
}

#[test]
fn spaces_are_merged() {
    assert_eq!(
        kinds("x  =   0"),
        vec![Identifier, Space, Equals, Space, Int, StatementBreak]
    );
}

#[test]
fn line_break_in_brackets() {
    let expected = |open, close| {
        vec![
            Open(open),
            Identifier,
            Comma,
            LineBreak,
            Identifier,
            Close(close),
            StatementBreak,
        ]
    };

    assert_eq!(
        kinds("(a,\nb)"),
        expected(Delimiter::Parenthesis, Delimiter::Parenthesis)
    );
    assert_eq!(
        kinds("[a,\nb]"),
        expected(Delimiter::Bracket, Delimiter::Bracket)
    );
    assert_eq!(kinds("{a,\nb}"), expected(Delimiter::Brace, Delimiter::Brace));
}

#[test]
fn line_break_in_braces_after_comment() {
    assert_eq!(
        kinds("x={a, #com\nb}"),
        vec![
            Identifier,
            Equals,
            Open(Delimiter::Brace),
            Identifier,
            Comma,
            Space,
            Comment,
            LineBreak,
            Identifier,
            Close(Delimiter::Brace),
            StatementBreak,
        ]
    );
}

#[test]
fn brace_after_indent() {
    assert_eq!(
        kinds("x=\n  {a, #comment\n  b}"),
        vec![
            Identifier,
            Equals,
            StatementBreak,
            LineBreak,
            Indent,
            Open(Delimiter::Brace),
            Identifier,
            Comma,
            Space,
            Comment,
            LineBreak,
            Identifier,
            Close(Delimiter::Brace),
            StatementBreak,
        ]
    );
}

#[test]
fn indent() {
    assert_eq!(
        kinds("if a:\n  b\n  c"),
        vec![
            Reserved(Word::If),
            Space,
            Identifier,
            Colon,
            StatementBreak,
            LineBreak,
            Indent,
            Identifier,
            StatementBreak,
            LineBreak,
            Identifier,
            StatementBreak,
        ]
    );
}

#[test]
fn dedent() {
    assert_eq!(
        kinds("if a:\n  b\nc"),
        vec![
            Reserved(Word::If),
            Space,
            Identifier,
            Colon,
            StatementBreak,
            LineBreak,
            Indent,
            Identifier,
            StatementBreak,
            Dedent,
            LineBreak,
            Identifier,
            StatementBreak,
        ]
    );
}

#[test]
fn multiple_dedents() {
    assert_eq!(
        kinds("a\n  b\n    c\nd"),
        vec![
            Identifier,
            StatementBreak,
            LineBreak,
            Indent,
            Identifier,
            StatementBreak,
            LineBreak,
            Indent,
            Identifier,
            StatementBreak,
            Dedent,
            Dedent,
            LineBreak,
            Identifier,
            StatementBreak,
        ]
    );
}

#[test]
fn cascading_dedents() {
    assert_eq!(
        kinds("a\n  b\n    c\n  d\ne"),
        vec![
            Identifier,
            StatementBreak,
            LineBreak,
            Indent,
            Identifier,
            StatementBreak,
            LineBreak,
            Indent,
            Identifier,
            StatementBreak,
            Dedent,
            LineBreak,
            Identifier,
            StatementBreak,
            Dedent,
            LineBreak,
            Identifier,
            StatementBreak,
        ]
    );
}

#[test]
fn dedent_at_end_after_newline() {
    assert_eq!(
        kinds("if a:\n  b\n"),
        vec![
            Reserved(Word::If),
            Space,
            Identifier,
            Colon,
            StatementBreak,
            LineBreak,
            Indent,
            Identifier,
            StatementBreak,
            Dedent,
            LineBreak,
            StatementBreak,
        ]
    );
}

#[test]
fn no_dedent_at_end_without_newline() {
    assert!(!kinds("if a:\n  b").contains(&Dedent));
}

#[test]
fn blank_lines_and_trailing_spaces_keep_indentation() {
    let expected = vec![
        Identifier,
        StatementBreak,
        LineBreak,
        Indent,
        Identifier,
        StatementBreak,
        LineBreak,
        Identifier,
        StatementBreak,
    ];

    assert_eq!(kinds("a\n  b\n\n  c"), expected);
    assert_eq!(kinds("a\n  b             \n  c"), expected);
}

#[test]
fn comment_before_dedent() {
    assert_eq!(
        kinds("a\n  b\n  #comment\nc"),
        vec![
            Identifier,
            StatementBreak,
            LineBreak,
            Indent,
            Identifier,
            StatementBreak,
            LineBreak,
            Comment,
            Dedent,
            LineBreak,
            Identifier,
            StatementBreak,
        ]
    );
}

#[test]
fn outdented_comment_before_dedent() {
    assert_eq!(
        kinds("a\n  b\n#comment\nc"),
        vec![
            Identifier,
            StatementBreak,
            LineBreak,
            Indent,
            Identifier,
            StatementBreak,
            Dedent,
            LineBreak,
            Comment,
            LineBreak,
            Identifier,
            StatementBreak,
        ]
    );
}

#[test]
fn comment_lines_only() {
    assert_eq!(
        kinds("#comment1\n  #comment2\n#comment3"),
        vec![Comment, LineBreak, Comment, LineBreak, Comment, StatementBreak]
    );
}

#[test]
fn comment_then_code_in_block() {
    assert_eq!(
        kinds("a\n  b\n  #comment\n  c"),
        vec![
            Identifier,
            StatementBreak,
            LineBreak,
            Indent,
            Identifier,
            StatementBreak,
            LineBreak,
            Comment,
            LineBreak,
            Identifier,
            StatementBreak,
        ]
    );
}

#[test]
fn comment_starts_new_block() {
    assert_eq!(
        kinds("a\n  #comment\n  b"),
        vec![
            Identifier,
            StatementBreak,
            LineBreak,
            Indent,
            Comment,
            LineBreak,
            Identifier,
            StatementBreak,
        ]
    );
}

#[test]
fn inconsistent_dedent() {
    assert_eq!(
        kinds("a\n    b\n  c"),
        vec![
            Identifier,
            StatementBreak,
            LineBreak,
            Indent,
            Identifier,
            StatementBreak,
            InconsistentDedent,
            Dedent,
            LineBreak,
            Identifier,
            StatementBreak,
        ]
    );
}

#[test]
fn leading_whitespace_indents() {
    assert_eq!(kinds("   x"), vec![Space, Indent, Identifier, StatementBreak]);
}

#[test]
fn tabs_indent_to_multiples_of_eight() {
    // A tab and eight spaces are the same indentation.
    assert_eq!(
        kinds("a\n\tb\n        c"),
        vec![
            Identifier,
            StatementBreak,
            LineBreak,
            Indent,
            Identifier,
            StatementBreak,
            LineBreak,
            Identifier,
            StatementBreak,
        ]
    );
}

#[test]
fn unbalanced_closer_does_not_break_layout() {
    assert_eq!(
        kinds(")\nx"),
        vec![
            Close(Delimiter::Parenthesis),
            StatementBreak,
            LineBreak,
            Identifier,
            StatementBreak,
        ]
    );
}

#[test]
fn literals() {
    assert_eq!(kinds("b'X'"), vec![Bytes, StatementBreak]);
    assert_eq!(kinds("0x859"), vec![Int, StatementBreak]);
    assert_eq!(kinds("0o4131"), vec![Int, StatementBreak]);
    assert_eq!(kinds("1.5e-3"), vec![Float, StatementBreak]);
    assert_eq!(kinds(".5"), vec![Float, StatementBreak]);
    assert_eq!(kinds("r'\\d'"), vec![String, StatementBreak]);
}

#[test]
fn triple_strings() {
    assert_eq!(
        kinds("\"\"\"\"\"\"\nx=\"\"\"\"\"\""),
        vec![String, StatementBreak, LineBreak, Identifier, Equals, String, StatementBreak]
    );
    assert_eq!(
        kinds("\"\"\"\\\"\"\" X \\\"\"\" \"\"\";"),
        vec![String, Semicolon, StatementBreak]
    );
    assert_eq!(
        kinds("\"\"\"\n\\nX\n\n\"\"\";"),
        vec![String, Semicolon, StatementBreak]
    );
    assert_eq!(
        kinds("x=''' X '\\''' X '''"),
        vec![Identifier, Equals, String, StatementBreak]
    );
}

#[test]
fn adjacent_strings() {
    assert_eq!(
        kinds("'a' \"b\""),
        vec![String, Space, String, StatementBreak]
    );
}

#[test]
fn errors_become_invalid_tokens() {
    let lexed = tokenize("x = 'abc\ny = $");
    let invalid: Vec<_> = lexed
        .tokens()
        .iter()
        .filter(|t| t.kind() == Invalid)
        .map(|t| t.body())
        .collect();

    assert_eq!(invalid, vec!["'abc", "$"]);
    assert_eq!(lexed.errors().len(), 2);
    assert!(matches!(lexed.errors()[0], Error::UnclosedString(_)));
    assert!(matches!(lexed.errors()[1], Error::NotStartOfToken(_, '$')));
}

#[test]
fn lossless() {
    for input in [
        "",
        "x",
        "   x",
        "if a:\n  b\n\n# trailing\n",
        "def f(x,\n      y):\n\treturn x  # c\n",
        "x = 'unclosed\n  $ ???\n\t\t",
        "a \\\n  b",
    ] {
        assert_eq!(text(&tokenize(input)), input);
    }
}

#[test]
fn layout_tokens_are_zero_width() {
    let lexed = tokenize("if a:\n  b\nc\n");
    for token in lexed.tokens() {
        if token.kind().is_layout() {
            assert_eq!(token.body(), "");
            assert!(token.span().is_empty());
        }
    }
}
