//! A highlight is a reference to a span in the source code with some note about
//! that span.

use crate::Span;

/// A region of code shown under a diagnostic, optionally with a note printed
/// next to it.
#[derive(Debug, Clone)]
pub struct Highlight {
    span: Span,
    note: Option<String>,
}

impl Highlight {
    /// Create a new highlighted span of source code.
    pub fn new(span: Span, note: impl Into<String>) -> Highlight {
        let note = note.into();
        Highlight {
            span,
            note: if note.is_empty() { None } else { Some(note) },
        }
    }

    /// The highlighted region.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The note shown next to the region, if any.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}
