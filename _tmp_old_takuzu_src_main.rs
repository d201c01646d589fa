//! A command line utility for solving and generating Takuzu puzzles.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use takuzu_engine::{Mode, SolveCounters};

mod error;
mod parser;

use error::CliError;

/// Solves and generates Takuzu (Binairo) puzzles.
#[derive(Parser)]
#[command(author, version, about, name = "takuzu")]
struct Args {
    /// Enumerate every solution instead of stopping at the first.
    #[arg(long)]
    all: bool,

    /// Generate a fresh puzzle of the given size instead of reading input files.
    #[arg(long, value_name = "N")]
    generate: Option<usize>,

    /// When generating, keep removing cells only while the puzzle stays uniquely solvable.
    #[arg(long)]
    unique: bool,

    /// Write output to FILE instead of stdout.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the backtrack count to stderr after solving.
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Puzzle files to solve, each holding one board in the text grid format.
    files: Vec<PathBuf>,
}

fn open_sink(args: &Args) -> Result<Box<dyn Write>, CliError> {
    match &args.output {
        Some(path) => Ok(Box::new(fs::File::create(path)?)),
        None => Ok(Box::new(io::stdout())),
    }
}

fn run_generate(args: &Args, size: usize, sink: &mut dyn Write) -> Result<(), CliError> {
    let board = takuzu_engine::generate(size, args.unique)?;
    board.print(sink)?;
    Ok(())
}

fn run_solve_file(args: &Args, path: &PathBuf, sink: &mut dyn Write) -> Result<(), CliError> {
    let contents = fs::read_to_string(path)?;
    let board = parser::parse(&contents)?;

    let mode = if args.all { Mode::All } else { Mode::First };
    let mut counters = SolveCounters::default();
    let solution = takuzu_engine::solve(board, mode, sink, &mut counters);

    if let Some(solved) = solution {
        solved.print(sink)?;
    }
    writeln!(sink, "Number of solutions: {}", counters.solutions)?;
    if args.verbose {
        eprintln!("Backtracks: {}", counters.backtracks);
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), CliError> {
    let mut sink = open_sink(args)?;
    if let Some(size) = args.generate {
        return run_generate(args, size, sink.as_mut());
    }
    for path in &args.files {
        run_solve_file(args, path, sink.as_mut())?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}


