//! An interactive mode, which shows the tree for each thing typed in.

use anyhow::Result;
use diagnostic::InputCoordinator;
use parser::lexer::{tokenize, TokenKind};
use rustyline::{error::ReadlineError, Editor};

use crate::Args;

/// Start an interactive session
#[derive(clap::Parser)]
pub struct ReplArgs; // For now there are no repl settings.

impl ReplArgs {
    pub(crate) fn run(&self, args: &Args) -> Result<bool> {
        let repl = Repl::default();
        repl.start(args);
        Ok(true)
    }
}

struct Repl {
    editor: Editor<()>,
    inputs: InputCoordinator,
}

impl Default for Repl {
    fn default() -> Self {
        Repl {
            editor: Editor::<()>::new(),
            inputs: InputCoordinator::default(),
        }
    }
}

impl Repl {
    /// The prompt used to ask for new input.
    const PROMPT: &'static str = ">>> ";

    /// The prompt used when the input so far isn't finished.
    const CONTINUATION: &'static str = "... ";

    fn start(mut self, args: &Args) {
        loop {
            match self.step(args) {
                Ok(()) => continue,
                Err(ReplError::Clear) => continue,
                Err(ReplError::Exit) => break,
                Err(ReplError::Readline(e)) => {
                    println!("{}", e);
                    println!("  (press control-d to exit)");
                }
                Err(other) => {
                    println!("{}", other);
                }
            }
        }
    }

    fn step(&mut self, args: &Args) -> Result<(), ReplError> {
        let input = self.read()?;
        if input.trim().is_empty() {
            return Ok(());
        }

        self.editor.add_history_entry(input.as_str());

        let id = self.inputs.repl_input(input);
        args.report(id, &self.inputs, true)?;

        Ok(())
    }

    /// Read lines until there's something that can be parsed.
    ///
    /// After a line ending in `:` the block continues until a blank line.
    /// Open brackets continue until they're closed.
    fn read(&mut self) -> Result<String, ReplError> {
        let mut input = self.line(Repl::PROMPT)?;
        let mut block = false;

        loop {
            let pending = Pending::of(&input);
            block |= pending.block;

            if pending.open == 0 && !block {
                break;
            }

            let line = self.line(Repl::CONTINUATION)?;
            if pending.open == 0 && line.trim().is_empty() {
                break;
            }

            input.push('\n');
            input.push_str(&line);
        }

        input.push('\n');
        Ok(input)
    }

    fn line(&mut self, prompt: &str) -> Result<String, ReplError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line),
            // User hit Control-C
            Err(ReadlineError::Interrupted) => Err(ReplError::Clear),
            // User hit Control-D at end of line, to exit.
            Err(ReadlineError::Eof) => Err(ReplError::Exit),
            Err(e) => Err(ReplError::Readline(e)),
        }
    }
}

/// What's unfinished at the end of some input.
#[derive(Debug, Default, PartialEq)]
struct Pending {
    /// Brackets which haven't been closed.
    open: usize,
    /// The last token is a `:`, so a block should follow.
    block: bool,
}

impl Pending {
    fn of(input: &str) -> Pending {
        let mut pending = Pending::default();

        for token in tokenize(input).tokens() {
            let kind = token.kind();
            match kind {
                TokenKind::Open(_) => pending.open += 1,
                TokenKind::Close(_) => {
                    pending.open = pending.open.saturating_sub(1)
                }
                _ => {}
            }

            if !kind.is_trivia() && !kind.is_layout() {
                pending.block = kind == TokenKind::Colon;
            }
        }

        pending
    }
}

#[derive(Debug, thiserror::Error)]
enum ReplError {
    #[error("^C")]
    Clear,
    #[error("^D")]
    Exit,

    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error("{0:#}")]
    Report(anyhow::Error),
}

impl From<anyhow::Error> for ReplError {
    fn from(e: anyhow::Error) -> Self {
        ReplError::Report(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete() {
        assert_eq!(Pending::of("x = 1"), Pending::default());
        assert_eq!(Pending::of("f(a)[0]"), Pending::default());
    }

    #[test]
    fn block() {
        let pending = Pending::of("if x:");
        assert!(pending.block);
        assert_eq!(pending.open, 0);

        assert!(!Pending::of("x = 1 # note:").block);
    }

    #[test]
    fn brackets() {
        assert_eq!(Pending::of("f(1, [2,").open, 2);
        assert!(!Pending::of("d = {1: 2").block);
    }
}
