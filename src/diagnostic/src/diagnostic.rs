use std::fmt;

use crate::caret::Caret;
use crate::highlight::Highlight;
use crate::input_coordinator::InputId;
use crate::level::Level;
use crate::Span;

/// A message about some problem in the input, meant for a person to read.
///
/// Methods come in two flavours. Builder-style methods consume `self` and
/// return it, and are handy when the diagnostic is first made. The `get_*` and
/// `set_*` methods work on references, for filling in details later, like
/// which input a syntax error came from.
///
/// The [`Display`][fmt::Display] implementation is a single unwrapped line of
/// plain text, without any of the input's name.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Which input the problem is in, if it's about some input at all.
    input_id: Option<InputId>,

    /// Where in the input the problem starts.
    ///
    /// Not all problems have a location, a missing file doesn't.
    location: Option<Caret>,

    /// Regions of the input worth showing along with the message.
    highlights: Vec<Highlight>,

    level: Level,

    text: String,
}

impl Diagnostic {
    /// Create a new diagnostic with only a message.
    ///
    /// The message should be enough for someone familiar with the language to
    /// fix the problem, once they know where it is.
    ///
    /// The [`Level`]'s [`Default`] is used.
    pub fn new(text: impl Into<String>) -> Self {
        Diagnostic {
            input_id: None,
            location: None,
            highlights: Vec::new(),
            level: Level::default(),
            text: text.into(),
        }
    }

    /// Set the input that this diagnostic is about.
    ///
    /// This is an [`InputId`] and not the input itself so that diagnostics can
    /// be made before anyone knows where the input lives.
    pub fn input(mut self, id: InputId) -> Self {
        self.input_id = Some(id);
        self
    }

    /// The id of the input this diagnostic is about.
    pub fn get_input(&self) -> Option<InputId> {
        self.input_id
    }

    pub fn set_input(&mut self, id: Option<InputId>) {
        self.input_id = id;
    }

    /// Set where the problem starts.
    pub fn location(mut self, location: Caret) -> Self {
        self.location = Some(location);
        self
    }

    /// Where the problem starts, if that's known.
    pub fn get_location(&self) -> Option<Caret> {
        self.location
    }

    pub fn set_location(&mut self, location: Option<Caret>) {
        self.location = location;
    }

    /// Add a highlighted region. Passing an empty `note` means no note.
    pub fn highlight(mut self, span: Span, note: impl Into<String>) -> Self {
        self.highlights.push(Highlight::new(span, note));
        self
    }

    pub fn get_highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Set the severity.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn get_level(&self) -> Level {
        self.level
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    /// The main message.
    pub fn get_text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.location {
            Some(l) => write!(f, "{} {}: {}", self.level, l, self.text),
            None => write!(f, "{}: {}", self.level, self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let d = Diagnostic::new("oops")
            .location(Caret::new(1, 2))
            .level(Level::Warning)
            .highlight(Span::point(Caret::new(1, 2)), "");

        assert_eq!(d.get_text(), "oops");
        assert_eq!(d.get_level(), Level::Warning);
        assert_eq!(d.get_location(), Some(Caret::new(1, 2)));
        assert_eq!(d.get_highlights().len(), 1);
        assert!(d.get_highlights()[0].note().is_none());
    }

    #[test]
    fn display() {
        let d = Diagnostic::new("oops").location(Caret::new(0, 4));
        assert_eq!(d.to_string(), "error 1:5: oops");
    }
}
