//! The lossless syntax tree.
//!
//! Every token of the input, trivia included, appears exactly once as a leaf,
//! so [`Node::text`] gives back the input the tree was built from.

use std::fmt::{self, Write};

use diagnostic::{Caret, Span};

use crate::builder::SyntaxKind;
use crate::lexer::Token;

/// A child of a [`Node`].
#[derive(Debug, Clone, PartialEq)]
pub enum Element<'a, K> {
    Node(Node<'a, K>),
    Token(Token<'a>),
}

impl<'a, K> Element<'a, K> {
    pub fn span(&self) -> Span {
        match self {
            Element::Node(node) => node.span,
            Element::Token(token) => token.span(),
        }
    }

    pub fn as_node(&self) -> Option<&Node<'a, K>> {
        match self {
            Element::Node(node) => Some(node),
            Element::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token<'a>> {
        match self {
            Element::Node(_) => None,
            Element::Token(token) => Some(token),
        }
    }
}

/// A node in the tree.
///
/// Error nodes have the kind [`SyntaxKind::ERROR`] and a message.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'a, K> {
    kind: K,
    span: Span,
    children: Vec<Element<'a, K>>,
    message: Option<String>,
}

impl<'a, K: SyntaxKind> Node<'a, K> {
    /// A new node. If there are no children, it's an empty node at `caret`.
    pub(crate) fn new(
        kind: K,
        message: Option<String>,
        children: Vec<Element<'a, K>>,
        caret: Caret,
    ) -> Self {
        let mut node = Node {
            kind,
            span: Span::point(caret),
            children,
            message,
        };
        node.fit_span(caret);
        node
    }

    pub(crate) fn error(message: String, span: Span) -> Self {
        Node {
            kind: K::ERROR,
            span,
            children: Vec::new(),
            message: Some(message),
        }
    }

    pub(crate) fn push(&mut self, element: Element<'a, K>) {
        self.children.push(element);
    }

    /// Make the span cover the children, or be a point at `caret` if there
    /// aren't any.
    pub(crate) fn fit_span(&mut self, caret: Caret) {
        self.span = match (self.children.first(), self.children.last()) {
            (Some(first), Some(last)) => {
                Span::new(first.span().start(), last.span().end())
            }
            _ => Span::point(caret),
        };
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn children(&self) -> &[Element<'a, K>] {
        &self.children
    }

    /// The error message, for error nodes.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.kind == K::ERROR
    }

    /// The children which are nodes.
    pub fn child_nodes(&self) -> impl Iterator<Item = &Node<'a, K>> {
        self.children.iter().filter_map(Element::as_node)
    }

    /// The children which are tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &Token<'a>> {
        self.children.iter().filter_map(Element::as_token)
    }

    /// This node and all nodes under it, in pre-order.
    pub fn descendants(&self) -> Vec<&Node<'a, K>> {
        let mut out = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.child_nodes().collect::<Vec<_>>().into_iter().rev());
        }

        out
    }

    /// Every token under this node, in order.
    pub fn leaves(&self) -> Vec<&Token<'a>> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'s>(&'s self, out: &mut Vec<&'s Token<'a>>) {
        for child in &self.children {
            match child {
                Element::Node(node) => node.collect_leaves(out),
                Element::Token(token) => out.push(token),
            }
        }
    }

    /// The source text this node covers, trivia included.
    pub fn text(&self) -> String {
        self.leaves().iter().map(|t| t.body()).collect()
    }

    /// Every error under this node, in order, as a message and where it is.
    pub fn errors(&self) -> Vec<(&str, Span)> {
        self.descendants()
            .into_iter()
            .filter_map(|n| n.message().map(|m| (m, n.span)))
            .collect()
    }

    /// An indented outline of the tree, with the kind of each node and the
    /// text of each token that isn't trivia.
    ///
    /// Spans aren't included, so the same structure at different places in
    /// the input prints the same.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        // Writing to a string can't fail.
        let _ = self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) -> fmt::Result {
        match &self.message {
            Some(message) => {
                writeln!(out, "{:indent$}{:?} {:?}", "", self.kind, message, indent = depth * 2)?
            }
            None => writeln!(out, "{:indent$}{:?}", "", self.kind, indent = depth * 2)?,
        }

        for child in &self.children {
            match child {
                Element::Node(node) => node.write_tree(out, depth + 1)?,
                Element::Token(token) if token.kind().is_trivia() => {}
                Element::Token(token) if token.kind().is_layout() => writeln!(
                    out,
                    "{:indent$}<{}>",
                    "",
                    token.kind().name(),
                    indent = (depth + 1) * 2
                )?,
                Element::Token(token) => writeln!(
                    out,
                    "{:indent$}{:?}",
                    "",
                    token.body(),
                    indent = (depth + 1) * 2
                )?,
            }
        }

        Ok(())
    }
}

impl<K: SyntaxKind> fmt::Display for Node<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.debug_tree())
    }
}
