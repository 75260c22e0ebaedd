//! Turning the events from a [`Builder`][crate::builder::Builder] into a
//! tree.

use std::mem;

use diagnostic::{Caret, Span};

use crate::builder::SyntaxKind;
use crate::event::{Completion, Event};
use crate::lexer::{Token, TokenKind};
use crate::tree::{Element, Node};

pub(crate) struct Sink<'t, 'a, K> {
    tokens: &'t [Token<'a>],
    /// Index of the next token that isn't in the tree yet.
    next: usize,
    lexical_errors: std::vec::IntoIter<String>,
    /// The nodes that are open, innermost last.
    stack: Vec<Node<'a, K>>,
    /// Finished things which aren't inside any node.
    roots: Vec<Element<'a, K>>,
}

impl<'t, 'a, K: SyntaxKind> Sink<'t, 'a, K> {
    pub(crate) fn new(tokens: &'t [Token<'a>], lexical_errors: Vec<String>) -> Self {
        Sink {
            tokens,
            next: 0,
            lexical_errors: lexical_errors.into_iter(),
            stack: Vec::new(),
            roots: Vec::new(),
        }
    }

    pub(crate) fn run(mut self, mut events: Vec<Event<K>>) -> Node<'a, K> {
        let last = events.len().saturating_sub(1);

        for i in 0..events.len() {
            match mem::replace(&mut events[i], Event::tombstone()) {
                Event::Start {
                    completion,
                    forward_parent,
                } => {
                    let mut chain = vec![completion];
                    let mut parent = forward_parent;

                    while let Some(p) = parent {
                        parent = match mem::replace(&mut events[p], Event::tombstone()) {
                            Event::Start {
                                completion,
                                forward_parent,
                            } => {
                                chain.push(completion);
                                forward_parent
                            }
                            _ => None,
                        };
                    }

                    for completion in chain.into_iter().rev() {
                        self.open(completion);
                    }
                }

                Event::Finish => {
                    if self.stack.len() == 1 && i == last {
                        self.flush_all();
                    }
                    self.close();
                }

                Event::Token => {
                    self.flush_skipped();
                    if let Some(token) = self.tokens.get(self.next) {
                        self.next += 1;
                        self.push(Element::Token(*token));
                    }
                }

                Event::Error(message) => {
                    self.flush_skipped();
                    let span = Span::point(self.caret());
                    self.push(Element::Node(Node::error(message, span)));
                }
            }
        }

        while !self.stack.is_empty() {
            debug_assert!(false, "unclosed node at the end of the events");
            self.close();
        }

        self.flush_all();

        if let [Element::Node(root)] = self.roots.as_slice() {
            if !root.is_error() {
                if let Some(Element::Node(root)) = self.roots.pop() {
                    return root;
                }
            }
        }

        let caret = self.caret();
        Node::new(K::ROOT, None, mem::take(&mut self.roots), caret)
    }

    fn open(&mut self, completion: Completion<K>) {
        let (kind, message) = match completion {
            Completion::Node(kind) => (kind, None),
            Completion::Error(message) => (K::ERROR, Some(message)),
            Completion::Abandoned => return,
            Completion::Open => {
                debug_assert!(false, "unresolved marker");
                return;
            }
        };

        // Trivia before the very first node stays outside it, so it ends up
        // in the root.
        if !self.stack.is_empty() {
            self.flush_skipped();
        }

        let caret = self.caret();
        self.stack.push(Node::new(kind, message, Vec::new(), caret));
    }

    fn close(&mut self) {
        if let Some(mut node) = self.stack.pop() {
            let caret = self.caret();
            node.fit_span(caret);
            self.push(Element::Node(node));
        }
    }

    fn push(&mut self, element: Element<'a, K>) {
        match self.stack.last_mut() {
            Some(node) => node.push(element),
            None => self.roots.push(element),
        }
    }

    /// Add any trivia and invalid tokens at the front of what's left.
    fn flush_skipped(&mut self) {
        while let Some(token) = self.tokens.get(self.next) {
            if !(token.kind().is_trivia() || token.kind() == TokenKind::Invalid) {
                break;
            }
            self.next += 1;
            self.push_skipped(*token);
        }
    }

    /// Add everything that's left.
    fn flush_all(&mut self) {
        while let Some(token) = self.tokens.get(self.next) {
            self.next += 1;
            self.push_skipped(*token);
        }
    }

    fn push_skipped(&mut self, token: Token<'a>) {
        if token.kind() == TokenKind::Invalid {
            let message = self
                .lexical_errors
                .next()
                .unwrap_or_else(|| String::from("invalid token"));
            let error = Node::new(
                K::ERROR,
                Some(message),
                vec![Element::Token(token)],
                token.span().start(),
            );
            self.push(Element::Node(error));
        } else {
            self.push(Element::Token(token));
        }
    }

    /// Where the next token starts, or the end of the input.
    fn caret(&self) -> Caret {
        match self.tokens.get(self.next) {
            Some(token) => token.span().start(),
            None => self
                .tokens
                .last()
                .map(|t| t.span().end())
                .unwrap_or_default(),
        }
    }
}
