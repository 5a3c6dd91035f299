use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use sudoku_engine::{load_puzzle, solver, validator, Trace};

#[derive(Parser, Debug)]
#[command(name = "sudoku-engine", version, about = "Validate or solve 9x9 Sudoku puzzles")]
struct Cli {
    /// CSV puzzle file: up to nine lines of nine comma-separated fields,
    /// blank or 0 for an empty cell
    puzzle: PathBuf,

    /// What to do with the puzzle
    #[arg(short, long, value_enum, default_value_t = Mode::Solve)]
    mode: Mode,

    /// Emit per-unit and per-pass diagnostics
    #[arg(long)]
    verbose: bool,

    /// Colorize diagnostic and verdict output
    #[arg(long)]
    color: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode { Validate, Solve }

fn verdict(msg: &str, good: bool, color: bool) {
    if color {
        let line = if good { msg.green().bold() } else { msg.red().bold() };
        println!("{line}");
    } else {
        println!("{msg}");
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut grid = load_puzzle(&cli.puzzle)
        .with_context(|| format!("loading puzzle from {}", cli.puzzle.display()))?;
    let mut trace = if cli.verbose { Trace::verbose(cli.color) } else { Trace::quiet() };

    println!("{grid}");
    match cli.mode {
        Mode::Validate => {
            let ok = validator::is_valid(&grid, &mut trace);
            verdict(if ok { "puzzle is valid" } else { "puzzle is NOT valid" }, ok, cli.color);
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Mode::Solve => {
            if !validator::is_valid(&grid, &mut trace) {
                verdict("puzzle is NOT valid as given", false, cli.color);
                return Ok(ExitCode::FAILURE);
            }
            if solver::solve(&mut grid, &mut trace) {
                println!("Solution:\n{grid}");
                Ok(ExitCode::SUCCESS)
            } else {
                verdict("no solution exists for this puzzle", false, cli.color);
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
