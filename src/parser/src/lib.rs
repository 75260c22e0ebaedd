//! A tree-building toolkit for recursive descent parsers, and a lexer for an
//! indentation-sensitive language.
//!
//! [`Builder`] doesn't parse a specific language. A grammar drives it by
//! making [`Marker`]s at the places nodes might start and then deciding what
//! each one turns out to be. Checkpoints can be rolled back, which gives the
//! grammar backtracking wherever it's needed, and a finished node can be
//! wrapped after the fact with [`CompletedMarker::precede`].
//!
//! Nothing here fails. Problems are recorded as error nodes in the tree, and
//! [`Builder::finish`] always produces a [`Node`] covering every token of the
//! input.
//!
//! Anywhere your grammar is recursive you should call [`Builder::enter`] to
//! help prevent the parser from blowing the stack.

pub mod builder;
mod event;
pub mod lexer;
mod sink;
pub mod tree;

pub use crate::{
    builder::{Builder, CompletedMarker, Marker, SyntaxKind},
    tree::{Element, Node},
};
