//! The tree builder that grammars are written against.
//!
//! A [`Builder`] is a cursor over the significant tokens of some input, plus
//! a way to describe the tree as the cursor moves. Nodes are described with
//! markers:
//!
//! 1. [`Builder::mark`] makes a [`Marker`] at the cursor.
//! 2. The grammar consumes some tokens, possibly making more nodes.
//! 3. The marker is resolved exactly once. [`Marker::done`] makes a node of
//!    everything since the mark, [`Marker::drop`] forgets about it, and
//!    [`Marker::rollback_to`] undoes everything since the mark.
//!
//! A completed node can be wrapped in a new one after the fact with
//! [`CompletedMarker::precede`], which is how left-associative operators are
//! built up in a loop.
//!
//! Trivia and [`Invalid`][TokenKind::Invalid] tokens are skipped by the
//! cursor. They're put back when the tree is built by [`Builder::finish`].

use std::fmt::Debug;

use crate::event::{Completion, Event};
use crate::lexer::{self, Lexed, Token, TokenKind};
use crate::sink::Sink;
use crate::tree::Node;

/// The kinds of node a grammar produces.
pub trait SyntaxKind: Copy + Debug + PartialEq {
    /// The kind used for nodes made by [`Marker::error`] and friends.
    const ERROR: Self;

    /// The kind of the node wrapping everything, if the grammar didn't make
    /// one.
    const ROOT: Self;
}

/// A cursor over tokens which records the tree to be built.
#[derive(Debug)]
pub struct Builder<'a, K> {
    /// All of the tokens, including trivia.
    tokens: Vec<Token<'a>>,

    /// Indexes into `tokens` of the tokens the grammar sees.
    significant: Vec<usize>,

    /// Index into `significant`.
    cursor: usize,

    events: Vec<Event<K>>,

    /// Every `precede` link that's still live, as `(wrapped, wrapper)` event
    /// indexes. The wrappers only ever increase.
    links: Vec<(usize, usize)>,

    /// Messages for the invalid tokens, in order.
    lexical_errors: Vec<String>,

    /// How deep in the recursive parts of the grammar we are.
    depth: usize,
}

impl<'a, K: SyntaxKind> Builder<'a, K> {
    /// The maximum depth of the grammar's recursion.
    ///
    /// This only counts calls to [`Builder::enter`], not general grammar
    /// depth.
    pub const MAX_DEPTH: usize = 128;

    /// Create a builder over the output of [`tokenize`][lexer::tokenize].
    pub fn new(lexed: Lexed<'a>) -> Self {
        let (tokens, errors) = lexed.into_parts();

        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !is_skipped(t.kind()))
            .map(|(i, _)| i)
            .collect();

        Builder {
            tokens,
            significant,
            cursor: 0,
            events: Vec::new(),
            links: Vec::new(),
            lexical_errors: errors.iter().map(lexer::Error::to_string).collect(),
            depth: 0,
        }
    }

    /// Make a new checkpoint at the cursor.
    pub fn mark(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Start {
            completion: Completion::Open,
            forward_parent: None,
        });

        Marker {
            pos,
            start: pos,
            cursor: self.cursor,
        }
    }

    /// The kind of the token at the cursor, or [`None`] at the end of the
    /// input.
    pub fn current(&self) -> Option<TokenKind> {
        self.nth(0)
    }

    /// The kind of the token `n` significant tokens past the cursor.
    pub fn nth(&self, n: usize) -> Option<TokenKind> {
        self.nth_token(n).map(|t| t.kind())
    }

    /// The token at the cursor.
    pub fn current_token(&self) -> Option<&Token<'a>> {
        self.nth_token(0)
    }

    fn nth_token(&self, n: usize) -> Option<&Token<'a>> {
        self.significant
            .get(self.cursor + n)
            .map(|&i| &self.tokens[i])
    }

    /// Is the token at the cursor of kind `kind`?
    pub fn at(&self, kind: TokenKind) -> bool {
        self.current() == Some(kind)
    }

    /// Is the token at the cursor any of `kinds`?
    pub fn at_any(&self, kinds: &[TokenKind]) -> bool {
        self.current().map_or(false, |k| kinds.contains(&k))
    }

    /// Is the cursor past the last significant token?
    pub fn eof(&self) -> bool {
        self.cursor >= self.significant.len()
    }

    /// Move past the token at the cursor. Does nothing at the end of the
    /// input.
    pub fn advance(&mut self) {
        if !self.eof() {
            self.events.push(Event::Token);
            self.cursor += 1;
        }
    }

    /// Advance if the token at the cursor is `kind`, returning whether it
    /// was.
    pub fn matches(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Like [`Builder::matches`], but records an error if the token wasn't
    /// there.
    pub fn check_matches(
        &mut self,
        kind: TokenKind,
        message: impl Into<String>,
    ) -> bool {
        if self.matches(kind) {
            true
        } else {
            self.error(message);
            false
        }
    }

    /// Record an empty error node at the cursor.
    pub fn error(&mut self, message: impl Into<String>) {
        self.events.push(Event::Error(message.into()));
    }

    /// Wrap the token at the cursor in an error node. At the end of the input
    /// the error node is empty instead.
    pub fn advance_error(&mut self, message: impl Into<String>) {
        if self.eof() {
            self.error(message);
        } else {
            let marker = self.mark();
            self.advance();
            marker.error(self, message).keep();
        }
    }

    /// Count one more level of recursion, returning false if that's too many.
    /// Every `true` must be matched with a call to [`Builder::exit`].
    pub fn enter(&mut self) -> bool {
        if self.depth >= Self::MAX_DEPTH {
            false
        } else {
            self.depth += 1;
            true
        }
    }

    pub fn exit(&mut self) {
        debug_assert!(self.depth > 0, "Builder::exit without enter");
        self.depth = self.depth.saturating_sub(1);
    }

    /// Build the tree.
    ///
    /// Every token ends up in the tree exactly once. If the grammar never
    /// made a node around everything, a [`SyntaxKind::ROOT`] node is added.
    pub fn finish(self) -> Node<'a, K> {
        log::debug!(
            "building tree from {} events over {} tokens",
            self.events.len(),
            self.tokens.len()
        );

        Sink::new(&self.tokens, self.lexical_errors).run(self.events)
    }

    /// Undo everything back to `start`.
    fn rollback(&mut self, start: usize, cursor: usize) {
        log::trace!(
            "rollback from token {} to {} ({} events dropped)",
            self.cursor,
            cursor,
            self.events.len().saturating_sub(start)
        );

        self.truncate(start);
        self.cursor = cursor;
    }

    /// Remove events from `len` on, along with any links into them.
    fn truncate(&mut self, len: usize) {
        self.events.truncate(len);

        while let Some(&(wrapped, wrapper)) = self.links.last() {
            if wrapper < len {
                break;
            }

            self.links.pop();
            if let Some(Event::Start { forward_parent, .. }) =
                self.events.get_mut(wrapped)
            {
                *forward_parent = None;
            }
        }
    }

    fn complete(&mut self, pos: usize, completion: Completion<K>) {
        match self.events.get_mut(pos) {
            Some(Event::Start { completion: c, .. }) => *c = completion,
            _ => debug_assert!(false, "marker at {} isn't a start event", pos),
        }
        self.events.push(Event::Finish);
    }
}

/// Trivia and invalid tokens are never seen by the grammar.
fn is_skipped(kind: TokenKind) -> bool {
    kind.is_trivia() || kind == TokenKind::Invalid
}

/// A checkpoint which hasn't been resolved yet.
///
/// Each of the ways of resolving a marker takes it by value, so it can't be
/// resolved twice.
#[derive(Debug)]
#[must_use = "markers must be resolved with done, drop or rollback_to"]
pub struct Marker {
    /// The marker's own start event.
    pos: usize,
    /// Where the node really starts. This is earlier than `pos` for markers
    /// made by `precede`.
    start: usize,
    /// The cursor at `start`.
    cursor: usize,
}

impl Marker {
    /// Make a node of `kind` from everything since the mark.
    pub fn done<K: SyntaxKind>(
        self,
        b: &mut Builder<'_, K>,
        kind: K,
    ) -> CompletedMarker {
        b.complete(self.pos, Completion::Node(kind));
        CompletedMarker {
            start: self.start,
            cursor: self.cursor,
        }
    }

    /// Make an error node from everything since the mark.
    pub fn error<K: SyntaxKind>(
        self,
        b: &mut Builder<'_, K>,
        message: impl Into<String>,
    ) -> CompletedMarker {
        b.complete(self.pos, Completion::Error(message.into()));
        CompletedMarker {
            start: self.start,
            cursor: self.cursor,
        }
    }

    /// Forget the checkpoint. Anything parsed since belongs to whatever
    /// node encloses it.
    pub fn drop<K: SyntaxKind>(self, b: &mut Builder<'_, K>) {
        if self.pos + 1 == b.events.len() {
            b.truncate(self.pos);
        } else if let Some(event) = b.events.get_mut(self.pos) {
            *event = Event::tombstone();
        }
    }

    /// Put the cursor back where it was at the mark, and undo everything
    /// since.
    ///
    /// For a marker from [`CompletedMarker::precede`], that's the start of the
    /// node it was going to wrap.
    pub fn rollback_to<K: SyntaxKind>(self, b: &mut Builder<'_, K>) {
        b.rollback(self.start, self.cursor);
    }
}

/// A checkpoint which has become a node.
#[derive(Debug)]
#[must_use]
pub struct CompletedMarker {
    start: usize,
    cursor: usize,
}

impl CompletedMarker {
    /// A new marker which starts where this node starts, so completing it
    /// wraps this node.
    pub fn precede<K: SyntaxKind>(self, b: &mut Builder<'_, K>) -> Marker {
        let marker = b.mark();

        // Follow any existing wrappers, so the new one goes outside them.
        let mut wrapped = self.start;
        while let Some(Event::Start {
            forward_parent: Some(parent),
            ..
        }) = b.events.get(wrapped)
        {
            wrapped = *parent;
        }

        if let Some(Event::Start { forward_parent, .. }) =
            b.events.get_mut(wrapped)
        {
            *forward_parent = Some(marker.pos);
        }
        b.links.push((wrapped, marker.pos));

        Marker {
            pos: marker.pos,
            start: self.start,
            cursor: self.cursor,
        }
    }

    /// Undo the node and everything since it started.
    pub fn rollback_to<K: SyntaxKind>(self, b: &mut Builder<'_, K>) {
        b.rollback(self.start, self.cursor);
    }

    /// Forget the completed marker, keeping the node.
    pub fn keep(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{tokenize, Operator};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Kind {
        Root,
        Error,
        Name,
    }

    impl SyntaxKind for Kind {
        const ERROR: Self = Kind::Error;
        const ROOT: Self = Kind::Root;
    }

    fn builder(input: &str) -> Builder<'_, Kind> {
        Builder::new(tokenize(input))
    }

    #[test]
    fn cursor_skips_trivia() {
        let b = builder("a  # c\n+ b");
        assert_eq!(b.current(), Some(TokenKind::Identifier));
        assert_eq!(b.nth(1), Some(TokenKind::StatementBreak));
        assert_eq!(b.nth(2), Some(TokenKind::Operator(Operator::Plus)));
    }

    #[test]
    fn cursor_skips_invalid() {
        let b = builder("$ a");
        assert_eq!(b.current(), Some(TokenKind::Identifier));
    }

    #[test]
    fn advance_at_eof_does_nothing() {
        let mut b = builder("");
        assert!(b.eof());
        b.advance();
        assert!(b.eof());
        assert!(b.events.is_empty());
    }

    #[test]
    fn matches() {
        let mut b = builder("a");
        assert!(!b.matches(TokenKind::Comma));
        assert!(b.matches(TokenKind::Identifier));
        assert!(!b.check_matches(TokenKind::Comma, "expected ','"));
        assert_eq!(b.events.last(), Some(&Event::Error("expected ','".into())));
    }

    #[test]
    fn rollback_restores_cursor_and_events() {
        let mut b = builder("a b c");
        b.advance();
        let before = b.events.len();

        let m = b.mark();
        b.advance();
        let inner = b.mark();
        b.advance();
        inner.done(&mut b, Kind::Name).keep();
        m.rollback_to(&mut b);

        assert_eq!(b.events.len(), before);
        assert_eq!(b.cursor, 1);
    }

    #[test]
    fn drop_last_marker_removes_event() {
        let mut b = builder("a");
        let m = b.mark();
        m.drop(&mut b);
        assert!(b.events.is_empty());
    }

    #[test]
    fn drop_leaves_tombstone() {
        let mut b = builder("a");
        let m = b.mark();
        b.advance();
        m.drop(&mut b);
        assert_eq!(b.events[0], Event::tombstone());
    }

    #[test]
    fn rollback_of_preceded_marker_goes_to_wrapped_start() {
        let mut b = builder("a . b");
        let m = b.mark();
        b.advance();
        let wrapper = m.done(&mut b, Kind::Name).precede(&mut b);
        b.advance();
        b.advance();
        wrapper.rollback_to(&mut b);

        assert!(b.events.is_empty());
        assert!(b.links.is_empty());
        assert_eq!(b.cursor, 0);
    }

    #[test]
    fn dropping_a_wrapper_unlinks_it() {
        let mut b = builder("a");
        let m = b.mark();
        b.advance();
        let wrapper = m.done(&mut b, Kind::Name).precede(&mut b);
        wrapper.drop(&mut b);

        assert!(b.links.is_empty());
        assert!(matches!(
            b.events[0],
            Event::Start {
                forward_parent: None,
                ..
            }
        ));
    }

    #[test]
    fn advance_error_wraps_one_token() {
        let mut b = builder("a +");
        b.advance_error("unexpected name");
        assert_eq!(b.current(), Some(TokenKind::Operator(Operator::Plus)));
        assert_eq!(
            b.events,
            vec![
                Event::Start {
                    completion: Completion::Error("unexpected name".into()),
                    forward_parent: None,
                },
                Event::Token,
                Event::Finish,
            ]
        );

        let mut b = builder("");
        b.advance_error("expected a name");
        assert_eq!(b.events, vec![Event::Error("expected a name".into())]);
    }

    #[test]
    fn depth_limit() {
        let mut b = builder("");
        for _ in 0..Builder::<Kind>::MAX_DEPTH {
            assert!(b.enter());
        }
        assert!(!b.enter());
        b.exit();
        assert!(b.enter());
    }
}
