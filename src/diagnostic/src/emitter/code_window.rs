//! Code windows show the lines of source code a diagnostic is about, with the
//! highlighted regions underlined and their notes next to them.

use termcolor::WriteColor;

use crate::{
    caret::Caret, emitter::terminal::FancyEmitter, highlight::Highlight,
    span::Span,
};

/// A preview of some source code with highlights.
///
/// The window doesn't know about the diagnostic's message or which input the
/// code came from, the emitter takes care of that.
#[derive(Debug)]
pub(crate) struct CodeWindow<'i> {
    /// Sorted by where the highlight starts.
    highlights: Vec<Highlight>,
    /// The lines from `starting_line` to `ending_line`, inclusive.
    lines: Vec<&'i str>,
    starting_line: u32,
    ending_line: u32,
}

impl<'i> CodeWindow<'i> {
    /// Make a window covering every highlight, or [`None`] if there aren't
    /// any highlights to show.
    pub fn new(highlights: &[Highlight], input: &'i str) -> Option<Self> {
        let starting_line = highlights.iter().map(|h| h.span().start().line()).min()?;
        let ending_line = highlights.iter().map(|h| h.span().end().line()).max()?;

        let mut highlights = highlights.to_vec();
        highlights.sort_by_key(|h| h.span().start());

        let count = (ending_line - starting_line + 1) as usize;
        let mut lines: Vec<&'i str> = input
            .lines()
            .skip(starting_line as usize)
            .take(count)
            .collect();

        // Highlights can sit just past the last line, like a missing token at
        // the end of a file.
        lines.resize(count, "");

        Some(CodeWindow {
            highlights,
            lines,
            starting_line,
            ending_line,
        })
    }

    /// The highlights overlapping `span`, clipped to it. The note is only
    /// included where the highlight ends inside `span`, so it's shown once.
    fn highlights_intersecting(&self, span: Span) -> impl Iterator<Item = (Span, Option<&str>)> {
        self.highlights.iter().filter_map(move |h| {
            h.span().intersection(span).map(|s| {
                let note = if s.end() == h.span().end() { h.note() } else { None };
                (s, note)
            })
        })
    }

    fn lines(&self) -> impl Iterator<Item = (u32, &str)> {
        let offset = self.starting_line;
        self.lines
            .iter()
            .enumerate()
            .map(move |(i, s)| (i as u32 + offset, *s))
    }

    pub(crate) fn print<W: WriteColor>(&self, e: &mut FancyEmitter<W>, label: &str) -> std::io::Result<()> {
        self.header(e, label)?;

        for (number, line) in self.lines() {
            self.line(e, number, line)?;
        }

        writeln!(e.out())
    }

    /// The top border, with `label` right-aligned in it.
    fn header<W: WriteColor>(&self, e: &mut FancyEmitter<W>, label: &str) -> std::io::Result<()> {
        let label_length = e.presentation_width(label);
        let code_width = self.code_width(e);

        let h = e.line_art().horizontal;
        let t = e.line_art().tee;

        e.dim_spec()?;
        e.pad(h, self.gutter_width(e))?;
        write!(e.out(), "{}", t)?;
        e.pad(h, code_width.saturating_sub(label_length + 1))?;
        e.reset_spec()?;

        writeln!(e.out(), " {}", label)
    }

    /// Print line `number` (wrapped if needed) and the highlights under it.
    fn line<W: WriteColor>(&self, e: &mut FancyEmitter<W>, number: u32, line: &str) -> std::io::Result<()> {
        let mut start = 0;

        // Lines are shown one-indexed, like carets are.
        self.gutter(e, number + 1)?;

        for (n, piece) in e.code_wrap(line, self.code_width(e)).iter().enumerate() {
            if n != 0 {
                self.more_gutter(e)?;
            }

            writeln!(e.out(), "{}", piece)?;

            // Count chars, since that's what `Caret::increment` does.
            let len = piece.chars().count() as u32;
            let span = Span::new(Caret::new(number, start), Caret::new(number, start + len));
            self.highlight_line(e, span)?;
            start += len;
        }

        Ok(())
    }

    /// Draw the highlights and notes that apply within `span`, a single line.
    fn highlight_line<W: WriteColor>(&self, e: &mut FancyEmitter<W>, span: Span) -> std::io::Result<()> {
        debug_assert_eq!(span.start().line(), span.end().line());

        for (sp, note) in self.highlights_intersecting(span) {
            let left = (sp.start().column() - span.start().column()) as usize;
            let underline = ((sp.end().column() - sp.start().column()) as usize).max(1);
            let right = self.code_width(e).saturating_sub(left + underline);

            match note {
                Some(note) if right >= FancyEmitter::<W>::MIN_NOTE_MARGIN => {
                    self.underline(e, left, underline)?;
                    self.right_margin_note(e, note, left + underline + 1)?;
                }
                Some(note) if left >= FancyEmitter::<W>::MIN_NOTE_MARGIN => {
                    self.left_margin_note(e, note, left, underline)?;
                }
                Some(note) => {
                    self.underline(e, left, underline)?;
                    writeln!(e.out())?;
                    self.below_note(e, note)?;
                }
                None => {
                    self.underline(e, left, underline)?;
                    writeln!(e.out())?;
                }
            }
        }

        Ok(())
    }

    fn underline<W: WriteColor>(&self, e: &mut FancyEmitter<W>, left: usize, length: usize) -> std::io::Result<()> {
        let up = e.line_art().up;
        self.empty_gutter(e)?;
        e.pad(' ', left)?;
        e.highlight_spec()?;
        e.pad(up, length)?;
        e.reset_spec()
    }

    /// A note on its own lines, when neither margin had room.
    fn below_note<W: WriteColor>(&self, e: &mut FancyEmitter<W>, note: &str) -> std::io::Result<()> {
        for line in e.wrap(note, self.code_width(e)) {
            self.empty_gutter(e)?;
            e.note_spec()?;
            writeln!(e.out(), "{}", line)?;
            e.reset_spec()?;
        }
        Ok(())
    }

    fn right_margin_note<W: WriteColor>(&self, e: &mut FancyEmitter<W>, note: &str, indent: usize) -> std::io::Result<()> {
        let lines = e.wrap(note, self.code_width(e).saturating_sub(indent));

        e.note_spec()?;
        writeln!(e.out(), " {}", lines[0])?;
        e.reset_spec()?;

        for line in &lines[1..] {
            self.empty_gutter(e)?;
            e.pad(' ', indent)?;
            e.note_spec()?;
            writeln!(e.out(), "{}", line)?;
            e.reset_spec()?;
        }

        Ok(())
    }

    fn left_margin_note<W: WriteColor>(
        &self,
        e: &mut FancyEmitter<W>,
        note: &str,
        left: usize,
        underline: usize,
    ) -> std::io::Result<()> {
        let note_width = e.presentation_width(note);
        if note_width < left {
            let up = e.line_art().up;
            self.empty_gutter(e)?;
            e.pad(' ', left - note_width - 1)?;
            e.note_spec()?;
            write!(e.out(), "{} ", note)?;
            e.reset_spec()?;

            e.highlight_spec()?;
            e.pad(up, underline)?;
            e.reset_spec()?;
            writeln!(e.out())
        } else {
            self.underline(e, left, underline)?;
            writeln!(e.out())?;
            self.below_note(e, note)
        }
    }

    /// The left gutter, right-aligning `content` before the vertical line.
    fn gutter<W: WriteColor>(&self, e: &mut FancyEmitter<W>, content: impl std::fmt::Display) -> std::io::Result<()> {
        let vertical = e.line_art().vertical;
        let gutter_width = self.gutter_width(e);

        e.dim_spec()?;
        write!(e.out(), "{: >gutter_width$}{} ", content, vertical, gutter_width = gutter_width)?;
        e.reset_spec()
    }

    fn empty_gutter<W: WriteColor>(&self, e: &mut FancyEmitter<W>) -> std::io::Result<()> {
        self.gutter(e, "")
    }

    /// The gutter shown beside the continuation of a wrapped line.
    fn more_gutter<W: WriteColor>(&self, e: &mut FancyEmitter<W>) -> std::io::Result<()> {
        let more = e.line_art().more;
        self.gutter(e, more)
    }

    /// Wide enough for the biggest line number, and for the `more` art.
    fn gutter_width<W: WriteColor>(&self, e: &FancyEmitter<W>) -> usize {
        let digits = (self.ending_line + 1).to_string().len();
        digits.max(e.presentation_width(e.line_art().more))
    }

    /// What's left for code once the gutter and its `"| "` are drawn.
    fn code_width<W: WriteColor>(&self, e: &FancyEmitter<W>) -> usize {
        e.width().saturating_sub(self.gutter_width(e) + 2).max(1)
    }
}
