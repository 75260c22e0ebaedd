//! Starlark - a parser for the Starlark configuration language, with a
//! command line for checking files and looking at their syntax trees.

use anyhow::{Context, Result};
use clap::Parser;
use diagnostic::{
    ASCIIEmitter, DiagnosticCoordinator, Emitter, FancyEmitter, InputCoordinator,
    InputId,
};

mod check;
mod eval;
mod repl;

const DUMP_HELP: &str =
    "Print the syntax tree of each input. The tree is always printed for \
     code given to `eval` or typed at the REPL.";

/// A Starlark parser
#[derive(Parser)]
#[clap(version)]
pub struct Args {
    #[clap(subcommand)]
    command: Option<Command>,

    /// Print the syntax tree of each input
    #[clap(long, global = true, long_help = DUMP_HELP)]
    dump: bool,

    /// Print the tokens of each input
    #[clap(long, global = true)]
    tokens: bool,

    /// Report errors one per line, without colour or code
    #[clap(long, global = true)]
    plain: bool,

    /// Log more, use it more than once for even more. RUST_LOG overrides it
    #[clap(short, long, global = true, parse(from_occurrences))]
    verbose: u64,
}

#[derive(clap::Subcommand)]
enum Command {
    Check(check::Check),
    Eval(eval::Evaluate),
    Repl(repl::ReplArgs),
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let clean = match &args.command {
        Some(Command::Check(check)) => check.run(&args)?,
        Some(Command::Eval(eval)) => eval.run(&args)?,
        Some(Command::Repl(repl)) => repl.run(&args)?,
        None => repl::ReplArgs.run(&args)?,
    };

    if !clean {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logger(verbose: u64) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

impl Args {
    fn emitter(&self) -> Box<dyn Emitter> {
        if self.plain {
            Box::new(ASCIIEmitter::default())
        } else {
            Box::new(FancyEmitter::full())
        }
    }

    /// Parse the input `id`, print what was asked for, and report any syntax
    /// errors. Returns true if there weren't any.
    pub(crate) fn report(
        &self,
        id: InputId,
        inputs: &InputCoordinator,
        tree: bool,
    ) -> Result<bool> {
        let parse = syntax::parse(inputs.get_input_buffer(id));

        if self.tokens {
            for token in parse.tokens() {
                println!("{}\t{:?}\t{:?}", token.span(), token.kind(), token.body());
            }
        }

        if tree || self.dump {
            print!("{}", parse.debug_tree());
        }

        let mut diagnostics = DiagnosticCoordinator::default();
        diagnostics.extend(parse.diagnostics(id));
        let clean = !diagnostics.has_errors();

        log::info!(
            "{}: {} syntax errors",
            inputs.get_input_name(id),
            diagnostics.len()
        );

        let mut emitter = self.emitter();
        diagnostics
            .emit(emitter.as_mut(), inputs)
            .context("cannot write diagnostics")?;

        Ok(clean)
    }
}
