use parser::lexer::{tokenize, Operator, TokenKind};
use parser::{Builder, Node, SyntaxKind};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Root,
    Error,
    Name,
    Binary,
    Group,
}

impl SyntaxKind for Kind {
    const ERROR: Self = Kind::Error;
    const ROOT: Self = Kind::Root;
}

fn builder(input: &str) -> Builder<'_, Kind> {
    Builder::new(tokenize(input))
}

fn kinds(node: &Node<Kind>) -> Vec<Kind> {
    node.descendants().iter().map(|n| n.kind()).collect()
}

/// A tiny grammar: names separated by `+`, left associative.
fn sum(b: &mut Builder<Kind>) {
    let name = b.mark();
    b.advance();
    let mut lhs = name.done(b, Kind::Name);

    while b.at(TokenKind::Operator(Operator::Plus)) {
        let m = lhs.precede(b);
        b.advance();
        let name = b.mark();
        b.advance();
        name.done(b, Kind::Name).keep();
        lhs = m.done(b, Kind::Binary);
    }

    lhs.keep();
}

#[test]
fn empty_input_is_empty_root() {
    let tree = builder("").finish();
    assert_eq!(tree.kind(), Kind::Root);
    assert!(tree.children().is_empty());
    assert_eq!(tree.text(), "");
}

#[test]
fn precede_is_left_associative() {
    let mut b = builder("a + b + c");
    let root = b.mark();
    sum(&mut b);
    b.advance();
    root.done(&mut b, Kind::Group).keep();
    let tree = b.finish();

    assert_eq!(
        kinds(&tree),
        vec![
            Kind::Group,
            Kind::Binary,
            Kind::Binary,
            Kind::Name,
            Kind::Name,
            Kind::Name,
        ]
    );
    assert_eq!(tree.text(), "a + b + c");

    let outer = tree.child_nodes().next().unwrap();
    let inner = outer.child_nodes().next().unwrap();
    assert_eq!(inner.text(), "a + b");
}

#[test]
fn unclaimed_tokens_go_to_a_root() {
    let mut b = builder("a b");
    let m = b.mark();
    b.advance();
    m.done(&mut b, Kind::Name).keep();
    b.advance();
    b.advance();
    let tree = b.finish();

    assert_eq!(tree.kind(), Kind::Root);
    assert_eq!(tree.text(), "a b");
    assert_eq!(tree.child_nodes().count(), 1);
}

#[test]
fn dropped_markers_leave_tokens_in_parent() {
    let mut b = builder("a b");
    let root = b.mark();
    let m = b.mark();
    b.advance();
    m.drop(&mut b);
    b.advance();
    b.advance();
    root.done(&mut b, Kind::Group).keep();
    let tree = b.finish();

    assert_eq!(kinds(&tree), vec![Kind::Group]);
    assert_eq!(tree.tokens().filter(|t| !t.kind().is_trivia()).count(), 3);
}

#[test]
fn rollback_discards_nodes() {
    let mut b = builder("a b");
    let root = b.mark();

    let attempt = b.mark();
    let name = b.mark();
    b.advance();
    name.done(&mut b, Kind::Name).keep();
    b.advance();
    attempt.rollback_to(&mut b);

    assert_eq!(b.current(), Some(TokenKind::Identifier));
    b.advance();
    b.advance();
    b.advance();
    root.done(&mut b, Kind::Group).keep();
    let tree = b.finish();

    assert_eq!(kinds(&tree), vec![Kind::Group]);
    assert_eq!(tree.text(), "a b");
}

#[test]
fn rollback_of_completed_marker() {
    let mut b = builder("a");
    let root = b.mark();
    let name = b.mark();
    b.advance();
    let done = name.done(&mut b, Kind::Name);
    done.rollback_to(&mut b);
    b.advance();
    b.advance();
    root.done(&mut b, Kind::Group).keep();

    assert_eq!(kinds(&b.finish()), vec![Kind::Group]);
}

#[test]
fn errors_are_zero_width_nodes() {
    let mut b = builder("a )");
    let root = b.mark();
    b.advance();
    b.error("expected something");
    b.advance_error("unexpected ')'");
    b.advance();
    root.done(&mut b, Kind::Group).keep();
    let tree = b.finish();

    let errors = tree.errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].0, "expected something");
    assert!(errors[0].1.is_empty());
    assert_eq!(errors[1].0, "unexpected ')'");
    assert!(!errors[1].1.is_empty());
    assert_eq!(tree.text(), "a )");
}

#[test]
fn advance_error_at_eof_is_empty() {
    let mut b = builder("");
    b.advance_error("expected a name");
    let tree = b.finish();

    assert_eq!(tree.errors().len(), 1);
    assert!(tree.errors()[0].1.is_empty());
}

#[test]
fn marker_error_wraps_tokens() {
    let mut b = builder("a b");
    let root = b.mark();
    let junk = b.mark();
    b.advance();
    b.advance();
    junk.error(&mut b, "junk").keep();
    b.advance();
    root.done(&mut b, Kind::Group).keep();
    let tree = b.finish();

    let error = tree.child_nodes().next().unwrap();
    assert!(error.is_error());
    assert_eq!(error.message(), Some("junk"));
    assert_eq!(error.text(), "a b");
}

#[test]
fn trivia_attachment() {
    let mut b = builder("# c\na  + b");
    let root = b.mark();
    let name = b.mark();
    b.advance();
    name.done(&mut b, Kind::Name).keep();
    b.advance();
    b.advance();
    root.done(&mut b, Kind::Group).keep();
    let tree = b.finish();

    // Trivia goes to the outermost node that's open, never to a node that
    // starts or ends next to it.
    assert_eq!(tree.kind(), Kind::Group);
    assert_eq!(tree.text(), "# c\na  + b");

    let name = tree.child_nodes().next().unwrap();
    assert_eq!(name.text(), "a");
    assert_eq!(tree.leaves()[0].kind(), TokenKind::Comment);
}

#[test]
fn trailing_trivia_goes_to_root() {
    let mut b = builder("a  # c\n\n");
    let root = b.mark();
    while !b.eof() {
        b.advance();
    }
    root.done(&mut b, Kind::Group).keep();
    let tree = b.finish();

    assert_eq!(tree.kind(), Kind::Group);
    assert_eq!(tree.text(), "a  # c\n\n");
}

#[test]
fn invalid_tokens_become_errors() {
    let mut b = builder("a $ b");
    let root = b.mark();
    while !b.eof() {
        b.advance();
    }
    root.done(&mut b, Kind::Group).keep();
    let tree = b.finish();

    let errors = tree.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].0.contains('$'));
    assert_eq!(tree.text(), "a $ b");
}

#[test]
fn empty_node_span_is_at_next_token() {
    let mut b = builder("a b");
    let root = b.mark();
    b.advance();
    let empty = b.mark();
    empty.done(&mut b, Kind::Name).keep();
    b.advance();
    b.advance();
    root.done(&mut b, Kind::Group).keep();
    let tree = b.finish();

    let empty = tree.child_nodes().next().unwrap();
    assert!(empty.span().is_empty());
    assert_eq!(empty.text(), "");
}
