//! Check files for syntax errors.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use diagnostic::InputCoordinator;

use crate::Args;

/// Check files for syntax errors, exiting with 1 if there are any
#[derive(clap::Parser)]
pub struct Check {
    /// The files to check, `-` reads standard input
    #[clap(required = true)]
    files: Vec<PathBuf>,
}

impl Check {
    pub(crate) fn run(&self, args: &Args) -> Result<bool> {
        let mut inputs = InputCoordinator::default();
        let mut clean = true;

        for path in &self.files {
            let buffer = read(path)?;
            let id = inputs.file_input(buffer, path.clone());
            clean &= args.report(id, &inputs, false)?;
        }

        Ok(clean)
    }
}

fn read(path: &Path) -> Result<String> {
    let mut buffer = String::new();

    if path == Path::new("-") {
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("cannot read standard input")?;
    } else {
        log::debug!("reading {}", path.display());
        buffer = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display()))?;
    }

    Ok(buffer)
}
