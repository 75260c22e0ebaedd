//! Pretty printing of diagnostics for terminals.
//!
//! This is where colour, line wrapping, hyphenation and terminal size all get
//! dealt with, so the rest of the crate doesn't need to care.

use std::borrow::Cow;
use std::io::{Result, Write};

use hyphenation::{Language, Load, Standard};
use term_size::dimensions_stderr;
use termcolor::{
    BufferedStandardStream, Color, ColorChoice, ColorSpec, WriteColor,
};
use textwrap::{Options, WordSplitter};
use unicode_width::UnicodeWidthStr;

use crate::{emitter::line_art::LineArt, level::Level};
use crate::{Diagnostic, InputCoordinator};

use super::code_window::CodeWindow;
use super::Emitter;

/// An emitter which shows the message, then a window into the code with the
/// highlights drawn under it.
pub struct FancyEmitter<W: WriteColor = BufferedStandardStream> {
    out: W,
    line_art: LineArt,
    /// Hyphenation rules for wrapping messages. Loading these isn't free, so
    /// they're kept around.
    dictionary: Option<Standard>,
    /// The max width of the output.
    width: usize,
}

impl FancyEmitter<BufferedStandardStream> {
    /// Prints to stderr with ASCII line art and no colour.
    pub fn simpler() -> Self {
        FancyEmitter::new(
            BufferedStandardStream::stderr(ColorChoice::Never),
            LineArt::ASCII,
            Self::DEFAULT_WIDTH,
        )
    }

    /// Prints to stderr, using all the fancy features.
    pub fn full() -> Self {
        let width = match dimensions_stderr() {
            Some((w, _)) if w >= Self::MIN_WIDTH => w,
            _ => Self::DEFAULT_WIDTH,
        };

        let mut emitter = FancyEmitter::new(
            BufferedStandardStream::stderr(ColorChoice::Auto),
            LineArt::UNICODE,
            width,
        );
        emitter.dictionary = Standard::from_embedded(Language::EnglishUS).ok();
        emitter
    }
}

impl<W: WriteColor> FancyEmitter<W> {
    /// The width used if the terminal's width isn't known, or is narrower than
    /// [`FancyEmitter::MIN_WIDTH`].
    pub const DEFAULT_WIDTH: usize = 80;

    /// The narrowest output we'll wrap to.
    pub const MIN_WIDTH: usize = 40;

    /// Notes in the margins must be at least this wide.
    pub const MIN_NOTE_MARGIN: usize = 25;

    /// Write to `out` with ASCII line art, without hyphenation.
    pub fn with_output(out: W, width: usize) -> Self {
        FancyEmitter::new(out, LineArt::ASCII, width.max(Self::MIN_WIDTH))
    }

    fn new(out: W, line_art: LineArt, width: usize) -> Self {
        FancyEmitter {
            out,
            line_art,
            dictionary: None,
            width,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn line_art(&self) -> LineArt {
        self.line_art
    }

    pub(crate) fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// How many terminal columns a string takes up.
    ///
    /// That's neither `s.len()` nor `s.chars().count()`, since some characters
    /// are drawn double wide and some are several code points.
    pub(crate) fn presentation_width(&self, s: &str) -> usize {
        UnicodeWidthStr::width(s)
    }

    /// Wrap English text to `width`, hyphenating if we have a dictionary.
    pub(crate) fn wrap<'a>(&self, text: &'a str, width: usize) -> Vec<Cow<'a, str>> {
        let splitter = match &self.dictionary {
            Some(dictionary) => WordSplitter::Hyphenation(dictionary.clone()),
            None => WordSplitter::NoHyphenation,
        };

        let mut lines = textwrap::wrap(text, Options::new(width.max(1)).word_splitter(splitter));
        if lines.is_empty() {
            lines.push(Cow::Borrowed(""));
        }
        lines
    }

    /// Hard-wrap a single line of code at `width` characters.
    pub(crate) fn code_wrap<'a>(&self, text: &'a str, width: usize) -> Vec<&'a str> {
        let width = width.max(1);
        let mut buf = Vec::new();
        let mut remaining = text;

        while !remaining.is_empty() {
            let split = remaining
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(remaining.len());

            let (l, r) = remaining.split_at(split);
            buf.push(l);
            remaining = r;
        }

        if buf.is_empty() {
            buf.push("");
        }

        buf
    }

    /// Prints `len` copies of `padding`.
    pub(crate) fn pad(&mut self, padding: char, len: usize) -> Result<()> {
        for _ in 0..len {
            write!(self.out, "{}", padding)?;
        }
        Ok(())
    }

    pub(crate) fn dim_spec(&mut self) -> Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        self.out.set_color(&spec)
    }

    pub(crate) fn highlight_spec(&mut self) -> Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec.set_fg(Some(Color::Yellow));
        self.out.set_color(&spec)
    }

    pub(crate) fn note_spec(&mut self) -> Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Blue));
        self.out.set_color(&spec)
    }

    pub(crate) fn reset_spec(&mut self) -> Result<()> {
        self.out.reset()
    }

    fn set_level_spec(&mut self, level: Level) -> Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec.set_fg(Some(match level {
            Level::Error => Color::Red,
            Level::Warning => Color::Yellow,
            Level::Help => Color::Green,
            Level::Info => Color::Cyan,
        }));
        self.out.set_color(&spec)
    }

    fn emit_message(&mut self, d: &Diagnostic) -> Result<()> {
        // Wrapped lines line up after the coloured level prefix.
        let prefix_length = self.emit_message_level(d.get_level())?;
        let wrap_width = self.width().saturating_sub(prefix_length);

        let lines = self.wrap(d.get_text(), wrap_width);
        writeln!(self.out, "{}", lines[0])?;

        for line in &lines[1..] {
            self.pad(' ', prefix_length)?;
            writeln!(self.out, "{}", line)?;
        }

        Ok(())
    }

    /// Emits `"<level>: "` in the level's colour, returning how wide it was.
    fn emit_message_level(&mut self, level: Level) -> Result<usize> {
        self.set_level_spec(level)?;
        write!(self.out, "{}: ", level.name())?;
        self.reset_spec()?;
        Ok(level.name().len() + ": ".len())
    }
}

impl<W: WriteColor> Emitter for FancyEmitter<W> {
    fn emit(&mut self, d: &Diagnostic, inputs: &InputCoordinator) -> Result<()> {
        self.emit_message(d)?;

        if let Some(id) = d.get_input() {
            let name = inputs.get_input_name(id);
            match (CodeWindow::new(d.get_highlights(), inputs.get_input_buffer(id)), d.get_location()) {
                (Some(window), _) => window.print(self, &name)?,
                (None, Some(location)) => writeln!(self.out, "  at {name}:{location}")?,
                (None, None) => writeln!(self.out, "  in {name}")?,
            }
        }

        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Caret, Span};
    use termcolor::NoColor;

    fn render(source: &str, d: impl FnOnce(crate::InputId) -> Diagnostic) -> String {
        let mut inputs = InputCoordinator::default();
        let id = inputs.eval_input(source.into());
        let mut emitter = FancyEmitter::with_output(NoColor::new(Vec::new()), 80);
        emitter.emit(&d(id), &inputs).unwrap();
        String::from_utf8(emitter.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn message_only() {
        let out = render("", |_| Diagnostic::new("file not found"));
        assert_eq!(out, "error: file not found\n");
    }

    #[test]
    fn code_window_underlines() {
        let out = render("x = = 1\n", |id| {
            let span = Span::new(Caret::new(0, 4), Caret::new(0, 5));
            Diagnostic::new("expression expected")
                .input(id)
                .location(span.start())
                .highlight(span, "here")
        });

        assert!(out.starts_with("error: expression expected\n"));
        assert!(out.contains("1| x = = 1\n"));
        assert!(out.contains("     ^ here"));
    }

    #[test]
    fn zero_width_highlight_still_drawn() {
        let out = render("f(", |id| {
            let span = Span::point(Caret::new(0, 2));
            Diagnostic::new("')' expected").input(id).highlight(span, "")
        });

        assert!(out.contains("1| f(\n"));
        assert!(out.contains(" |   ^\n"));
    }

    #[test]
    fn code_wrap_respects_char_boundaries() {
        let emitter = FancyEmitter::with_output(NoColor::new(Vec::new()), 80);
        assert_eq!(emitter.code_wrap("aébc", 2), vec!["aé", "bc"]);
        assert_eq!(emitter.code_wrap("", 2), vec![""]);
    }
}
