//! Parse code taken from the command line, printing the tree.

use anyhow::Result;
use diagnostic::InputCoordinator;

use crate::Args;

/// Parse the command line argument as code and print its syntax tree
#[derive(clap::Parser)]
pub struct Evaluate {
    /// The code to parse
    input: String,
}

impl Evaluate {
    pub(crate) fn run(&self, args: &Args) -> Result<bool> {
        let mut inputs = InputCoordinator::default();
        let id = inputs.eval_input(self.input.clone());
        args.report(id, &inputs, true)
    }
}
