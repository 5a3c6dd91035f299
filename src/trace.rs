use chrono::Local;
use colored::Colorize;
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

use crate::grid::{Digit, Pos};

/// One diagnostic event from validation or solving. Structured so callers
/// can attribute a failure to the exact row/column/block without scraping
/// message text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diag {
    RowOk { row: usize },
    ColOk { col: usize },
    BlockOk { band: usize, stack: usize },
    RowRepeat { row: usize, value: Digit },
    ColRepeat { col: usize, value: Digit },
    BlockRepeat { band: usize, stack: usize, value: Digit },
    Forced { pos: Pos, digit: Digit },
    Fork { pos: Pos, digits: Vec<Digit> },
    Branch { depth: usize, pos: Pos, digit: Digit },
    Contradiction { pos: Pos },
    Solved,
    Note(String),
}

impl Diag {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Diag::RowRepeat { .. }
                | Diag::ColRepeat { .. }
                | Diag::BlockRepeat { .. }
                | Diag::Contradiction { .. }
        )
    }
}

impl Display for Diag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Diag::RowOk { row } => write!(f, "row {row} is OK"),
            Diag::ColOk { col } => write!(f, "col {col} is OK"),
            Diag::BlockOk { band, stack } => {
                write!(f, "block at row {}, col {} is OK", band * 3, stack * 3)
            }
            Diag::RowRepeat { row, value } => write!(f, "row {row} has a repeat value: {value}"),
            Diag::ColRepeat { col, value } => write!(f, "col {col} has a repeat value: {value}"),
            Diag::BlockRepeat { band, stack, value } => {
                write!(f, "block at row {}, col {} has a repeat value: {value}", band * 3, stack * 3)
            }
            Diag::Forced { pos, digit } => write!(f, "forced {digit} at {pos}"),
            Diag::Fork { pos, digits } => {
                write!(f, "fork at {pos} over candidates {}", digits.iter().format(" "))
            }
            Diag::Branch { depth, pos, digit } => {
                write!(f, "depth {depth}: trying {digit} at {pos}")
            }
            Diag::Contradiction { pos } => write!(f, "no candidates left at {pos}"),
            Diag::Solved => write!(f, "solved"),
            Diag::Note(msg) => write!(f, "{msg}"),
        }
    }
}

/// Ordered diagnostic sink, threaded explicitly through validation and
/// solving. Never influences results; a quiet trace makes every emission a
/// no-op.
pub struct Trace {
    record: bool,
    echo: bool,
    color: bool,
    entries: Vec<Diag>,
}

impl Trace {
    /// Drops everything. The default for probes and non-verbose runs.
    pub fn quiet() -> Self { Self { record: false, echo: false, color: false, entries: Vec::new() } }

    /// Records entries without console output. Used by tests and callers
    /// that inspect diagnostics programmatically.
    pub fn recording() -> Self { Self { record: true, echo: false, color: false, entries: Vec::new() } }

    /// Records entries and echoes each to the console as it is emitted.
    pub fn verbose(color: bool) -> Self { Self { record: true, echo: true, color, entries: Vec::new() } }

    /// Whether diag construction is worth the effort for expensive messages.
    pub fn active(&self) -> bool { self.record || self.echo }

    pub fn diag(&mut self, d: Diag) {
        if !self.active() { return; }
        if self.echo {
            let ts = Local::now().format("%H:%M:%S");
            if self.color {
                let line = if d.is_failure() { d.to_string().red().to_string() } else { d.to_string() };
                println!("{} {line}", format!("[{ts}]").dimmed());
            } else {
                println!("[{ts}] {d}");
            }
        }
        if self.record { self.entries.push(d); }
    }

    pub fn note(&mut self, msg: impl Into<String>) { self.diag(Diag::Note(msg.into())) }

    pub fn entries(&self) -> &[Diag] { &self.entries }

    pub fn first_failure(&self) -> Option<&Diag> { self.entries.iter().find(|d| d.is_failure()) }
}
