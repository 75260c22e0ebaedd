//! The layout pass, which turns indentation into tokens.
//!
//! The grammar doesn't look at whitespace, so anything about the shape of the
//! code that matters has to be made explicit here:
//!
//! - A [`StatementBreak`][TokenKind::StatementBreak] ends each logical line
//!   that has code on it. Newlines inside brackets don't count.
//! - An [`Indent`][TokenKind::Indent] comes before the first token of a line
//!   that's more indented than the block it's in.
//! - A [`Dedent`][TokenKind::Dedent] closes each block that a less indented
//!   line ends. If the line doesn't line up with any open block, there's an
//!   [`InconsistentDedent`][TokenKind::InconsistentDedent] first.
//!
//! Blank lines and lines with only a comment never change the indentation.
//! A comment line just before a change in indentation is put in whichever
//! block it lines up with.
//!
//! Whitespace is merged so there's only ever one trivia token between two
//! other tokens. It's a [`LineBreak`][TokenKind::LineBreak] if it contains a
//! newline and a [`Space`][TokenKind::Space] otherwise.

use diagnostic::{Caret, Span};

use crate::lexer::{Token, TokenKind};

/// Tabs move to the next multiple of this many columns.
pub const TAB_WIDTH: u32 = 8;

/// Run the layout pass over raw tokens from a [`Lexer`][crate::lexer::Lexer].
pub fn layout<'a>(input: &'a str, raw: &[Token<'a>]) -> Vec<Token<'a>> {
    let mut layout = Layout::new(input);
    let mut i = 0;

    loop {
        let start = i;
        while i < raw.len()
            && matches!(raw[i].kind, TokenKind::Space | TokenKind::LineBreak)
        {
            i += 1;
        }

        layout.whitespace(&raw[start..i]);

        match raw.get(i) {
            Some(token) => {
                layout.token(*token);
                i += 1;
            }
            None => break,
        }
    }

    let end = raw
        .last()
        .map(|t| (t.span.end(), t.offset + t.body.len()))
        .unwrap_or_default();

    layout.finish(end)
}

/// The start of a logical line, where indentation hasn't been dealt with
/// yet.
#[derive(Debug, Clone, Copy)]
struct LineStart {
    /// Index of the whitespace before the line. If there wasn't any, it's
    /// where the line's first token goes.
    run: usize,
    indent: u32,
    /// False only for the first line of the input.
    after_newline: bool,
}

/// A line with only a comment on it, which hasn't been placed in a block
/// yet.
#[derive(Debug, Clone, Copy)]
struct CommentLine {
    run: usize,
    comment: usize,
    indent: u32,
}

struct Layout<'a> {
    input: &'a str,
    out: Vec<Token<'a>>,
    indents: Vec<u32>,
    /// How many brackets are open.
    depth: usize,
    line_has_code: bool,
    line_start: Option<LineStart>,
    comment_lines: Vec<CommentLine>,
}

impl<'a> Layout<'a> {
    fn new(input: &'a str) -> Self {
        Layout {
            input,
            out: Vec::new(),
            indents: vec![0],
            depth: 0,
            line_has_code: false,
            line_start: Some(LineStart {
                run: 0,
                indent: 0,
                after_newline: false,
            }),
            comment_lines: Vec::new(),
        }
    }

    /// Handle a run of raw whitespace tokens, merging them into one.
    fn whitespace(&mut self, run: &[Token<'a>]) {
        let (first, last) = match (run.first(), run.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return,
        };

        let newline = run.iter().any(|t| t.kind == TokenKind::LineBreak);
        let kind = if newline {
            TokenKind::LineBreak
        } else {
            TokenKind::Space
        };

        let end = last.offset + last.body.len();
        let merged = Token {
            kind,
            span: Span::new(first.span.start(), last.span.end()),
            body: &self.input[first.offset..end],
            offset: first.offset,
        };

        if self.depth == 0 && newline {
            if self.line_has_code {
                self.line_has_code = false;
                let sb = self.zero_width(
                    TokenKind::StatementBreak,
                    first.span.start(),
                    first.offset,
                );
                self.out.push(sb);
            }

            let after = run
                .iter()
                .rposition(|t| t.kind == TokenKind::LineBreak)
                .map_or(run, |i| &run[i + 1..]);

            self.line_start = Some(LineStart {
                run: self.out.len(),
                indent: measure(after),
                after_newline: true,
            });
        } else if let Some(start) = self.line_start.as_mut() {
            if self.depth == 0 && !start.after_newline {
                // Whitespace before the first line of the input.
                start.indent = measure(run);
            }
        }

        self.out.push(merged);
    }

    /// Handle a token that isn't whitespace.
    fn token(&mut self, token: Token<'a>) {
        if token.kind == TokenKind::Comment {
            if let (0, Some(start)) = (self.depth, self.line_start) {
                self.comment_lines.push(CommentLine {
                    run: start.run,
                    comment: self.out.len(),
                    indent: start.indent,
                });
            }
            self.out.push(token);
            return;
        }

        if self.depth == 0 {
            if let Some(start) = self.line_start.take() {
                self.indentation(start, (token.span.start(), token.offset));
            }
        }

        self.comment_lines.clear();
        self.line_has_code = true;

        match token.kind {
            TokenKind::Open(_) => self.depth += 1,
            TokenKind::Close(_) => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }

        self.out.push(token);
    }

    /// Close any open blocks if the input ended with a newline, then end
    /// the last statement.
    fn finish(mut self, end: (Caret, usize)) -> Vec<Token<'a>> {
        if let (0, Some(start)) = (self.depth, self.line_start) {
            if start.after_newline {
                self.dedent(0, start.run, end);
            }
        }

        if !self.input.is_empty() {
            let sb = self.zero_width(TokenKind::StatementBreak, end.0, end.1);
            self.out.push(sb);
        }

        self.out
    }

    /// Compare the indentation of a line with code on it to the open blocks.
    /// `next` is where the first token of the line is.
    fn indentation(&mut self, start: LineStart, next: (Caret, usize)) {
        let top = self.indents.last().copied().unwrap_or(0);

        if start.indent > top {
            log::trace!("indent to {} at {}", start.indent, next.0);
            self.indents.push(start.indent);

            // Comment lines right before, at the same indentation, go in the
            // new block with the code.
            let position = self
                .comment_lines
                .iter()
                .rev()
                .take_while(|c| c.indent == start.indent)
                .last()
                .map_or(self.out.len(), |c| c.comment);

            self.insert(position, TokenKind::Indent, next);
        } else if start.indent < top {
            self.dedent(start.indent, start.run, next);
        }
    }

    /// Close blocks until `indent` is reached.
    fn dedent(&mut self, indent: u32, run: usize, next: (Caret, usize)) {
        let mut inserts = Vec::new();

        while indent < self.indents.last().copied().unwrap_or(0) {
            let closed = self.indents.pop().unwrap_or(0);
            let outer = self.indents.last().copied().unwrap_or(0);

            // The block ends before the first comment line that's outside it.
            let position = self
                .comment_lines
                .iter()
                .find(|c| c.indent < closed)
                .map_or(run, |c| c.run);

            log::trace!("dedent from {} to {} at {}", closed, indent, next.0);

            if indent > outer {
                inserts.push((position, TokenKind::InconsistentDedent));
                inserts.push((position, TokenKind::Dedent));
                break;
            }

            inserts.push((position, TokenKind::Dedent));
        }

        // Positions never decrease, so inserting from the back keeps them
        // valid and keeps the order.
        for (position, kind) in inserts.into_iter().rev() {
            self.insert(position, kind, next);
        }
    }

    /// Insert a zero-width token before `out[position]`, or at `next` if
    /// that's past the end.
    fn insert(&mut self, position: usize, kind: TokenKind, next: (Caret, usize)) {
        let (caret, offset) = match self.out.get(position) {
            Some(t) => (t.span.start(), t.offset),
            None => next,
        };

        let token = self.zero_width(kind, caret, offset);
        self.out.insert(position, token);
    }

    fn zero_width(&self, kind: TokenKind, caret: Caret, offset: usize) -> Token<'a> {
        Token {
            kind,
            span: Span::point(caret),
            body: &self.input[offset..offset],
            offset,
        }
    }
}

/// How far a run of whitespace indents a line.
fn measure(run: &[Token]) -> u32 {
    let mut width = 0;

    for c in run.iter().flat_map(|t| t.body.chars()) {
        match c {
            ' ' => width += 1,
            '\t' => width = (width / TAB_WIDTH + 1) * TAB_WIDTH,
            // A line continuation or form feed starts over.
            '\n' | '\x0c' => width = 0,
            _ => {}
        }
    }

    width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use TokenKind::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).tokens().iter().map(|t| t.kind()).collect()
    }

    #[test]
    fn empty() {
        assert!(kinds("").is_empty());
    }

    #[test]
    fn final_statement_break() {
        assert_eq!(kinds("x"), vec![Identifier, StatementBreak]);
        assert_eq!(
            kinds("x\n"),
            vec![Identifier, StatementBreak, LineBreak, StatementBreak]
        );
    }

    #[test]
    fn trailing_spaces_after_statement_break() {
        assert_eq!(
            kinds("x  \ny"),
            vec![Identifier, StatementBreak, LineBreak, Identifier, StatementBreak]
        );
        let tokens = tokenize("x  \ny");
        assert_eq!(tokens.tokens()[2].body(), "  \n");
    }

    #[test]
    fn measure_tabs() {
        let tokens = crate::lexer::Lexer::new("\t  \t ").token().unwrap().unwrap();
        assert_eq!(measure(&[tokens]), 17);
    }

    #[test]
    fn zero_width_tokens_have_empty_bodies() {
        let lexed = tokenize("if a:\n  b\n");
        for token in lexed.tokens().iter().filter(|t| t.kind().is_layout()) {
            assert_eq!(token.body(), "");
            assert!(token.span().is_empty());
        }
    }
}
