//! A plain-text emitter with one line per diagnostic.
//!
//! This is the fall-back when we don't know what the output device looks like,
//! or when the output is going to be read by another program.

use std::io::{self, Write};

use super::Emitter;
use crate::input_coordinator::InputCoordinator;
use crate::Diagnostic;

pub struct ASCIIEmitter<W: Write = io::Stderr> {
    out: W,
}

impl Default for ASCIIEmitter<io::Stderr> {
    fn default() -> Self {
        ASCIIEmitter { out: io::stderr() }
    }
}

impl<W: Write> ASCIIEmitter<W> {
    pub fn new(out: W) -> Self {
        ASCIIEmitter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Emitter for ASCIIEmitter<W> {
    fn emit(
        &mut self,
        d: &Diagnostic,
        inputs: &InputCoordinator,
    ) -> io::Result<()> {
        write!(self.out, "{}", d.get_level())?;

        let name = d.get_input().map(|id| inputs.get_input_name(id));

        match (name, d.get_location()) {
            (None, None) => write!(self.out, ": ")?,
            (None, Some(l)) => write!(self.out, " {l}: ")?,
            (Some(n), None) => write!(self.out, ": {n} - ")?,
            (Some(n), Some(l)) => write!(self.out, ": {n}:{l} - ")?,
        }

        writeln!(self.out, "{}", d.get_text())?;

        for note in d.get_highlights().iter().filter_map(|h| h.note()) {
            writeln!(self.out, "  note: {note}")?;
        }

        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Caret;

    #[test]
    fn one_line() {
        let mut inputs = InputCoordinator::default();
        let id = inputs.eval_input("x = (".into());
        let d = Diagnostic::new("expression expected")
            .input(id)
            .location(Caret::new(0, 5));

        let mut emitter = ASCIIEmitter::new(Vec::new());
        emitter.emit(&d, &inputs).unwrap();
        let out = String::from_utf8(emitter.into_inner()).unwrap();
        assert_eq!(out, "error: <eval>:1:6 - expression expected\n");
    }
}
