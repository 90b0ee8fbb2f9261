//! FILENAME: app/cell-repl/src/main.rs
//! PURPOSE: Command-line entry point for the Cell formula language.
//! CONTEXT: Parses flags, installs the logger and hands lines from a file, an eval
//! string or stdin to the REPL loop. All language semantics live in the core crates.

mod repl;

use anyhow::{Context as _, Result};
use cell_engine::{Context, ContextStreams, Session};
use clap::{ArgAction, Parser};
use log::{info, LevelFilter};
use repl::{Mode, Repl};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "cell-repl",
    version,
    about = "Evaluate statements of the Cell formula language."
)]
struct Args {
    /// Run the interactive read loop (the default when no other mode is given).
    #[arg(short, long)]
    interactive: bool,

    /// Evaluate a string. Takes precedence over --interactive.
    #[arg(short, long, value_name = "TEXT")]
    eval: Option<String>,

    /// Run a Cell script. Takes precedence over --eval and --interactive.
    #[arg(short = 'f', long = "input-file", value_name = "PATH")]
    input_file: Option<PathBuf>,

    /// Print the parsed tree of each statement instead of evaluating it.
    #[arg(long)]
    inspect: bool,

    /// Raise the log level (repeatable: info, debug, trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let session = Session::with_context(Context::with_streams(ContextStreams::stdio()));
    let stdout = std::io::stdout();

    let completed = if let Some(path) = &args.input_file {
        info!("REPL running script {}", path.display());
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let mut reader = BufReader::new(file);
        Repl::new(session, stdout, Mode::Script, args.inspect).run(|buf| reader.read_line(buf))?
    } else if let Some(text) = &args.eval {
        let mut reader = Cursor::new(text.as_bytes());
        Repl::new(session, stdout, Mode::Script, args.inspect).run(|buf| reader.read_line(buf))?
    } else {
        if !args.interactive {
            info!("REPL no mode given, running interactively");
        }
        let stdin = std::io::stdin();
        Repl::new(session, stdout, Mode::Interactive, args.inspect)
            .run(|buf| stdin.read_line(buf))?
    };

    Ok(if completed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
