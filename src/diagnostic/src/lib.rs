//! Diagnostics - user-readable messages about problems in some input.
//!
//! Syntax errors are found while parsing, but they're only useful once a
//! person can see them next to the code they're about. This crate holds the
//! pieces needed to get there:
//!
//! - [`Caret`] and [`Span`] locate things in source text.
//! - [`Diagnostic`] is a message with a [`Level`], a location and highlights.
//! - [`InputCoordinator`] remembers where each piece of input came from.
//! - [`DiagnosticCoordinator`] collects diagnostics and hands them to an
//!   [`Emitter`] in source order.

mod caret;
mod diagnostic;
mod diagnostic_coordinator;
mod emitter;
mod highlight;
mod input_coordinator;
mod level;
mod span;

pub use self::{
    caret::Caret,
    diagnostic::Diagnostic,
    diagnostic_coordinator::DiagnosticCoordinator,
    emitter::{ASCIIEmitter, Emitter, FancyEmitter},
    highlight::Highlight,
    input_coordinator::{InputCoordinator, InputId},
    level::Level,
    span::Span,
};
