use itertools::Itertools;

use crate::grid::{digit_count, digits_of, first_digit, Grid, Pos};
use crate::trace::{Diag, Trace};

// Candidate counts run 2..=9 at a frontier cell, so 10 loses to any real one.
const FRONTIER_SENTINEL: u32 = 10;

/// The least-constrained-cell bookkeeping for one propagation pass: the
/// blank cell with the fewest (>1) surviving candidates seen so far.
#[derive(Clone, Copy, Debug)]
struct Frontier {
    min_count: u32,
    pos: Option<Pos>,
}

impl Frontier {
    fn reset() -> Self { Self { min_count: FRONTIER_SENTINEL, pos: None } }

    fn observe(&mut self, count: u32, pos: Pos) {
        // Strict < keeps the first cell in row-major order on ties, which
        // makes the branch choice (and thus the solution) deterministic.
        if count < self.min_count {
            self.min_count = count;
            self.pos = Some(pos);
        }
    }
}

enum PassOutcome {
    /// Some cell ran out of candidates; this branch has no solution.
    Contradiction,
    /// Cells still blank after the pass, plus the branching candidate.
    Open { blanks: usize, frontier: Frontier },
}

/// Solve the grid in place. Returns `false` when no completion satisfies
/// the row/column/block constraints; the grid's blank cells are then left
/// in an unspecified partially-propagated state.
pub fn solve(grid: &mut Grid, trace: &mut Trace) -> bool {
    solve_at_depth(grid, trace, 0)
}

fn solve_at_depth(grid: &mut Grid, trace: &mut Trace, depth: usize) -> bool {
    grid.init_candidates();
    // One more than any possible blank count, so the first pass never looks
    // like a stall.
    let mut prev_blanks = 82usize;
    loop {
        let (blanks, frontier) = match trim_pass(grid, trace) {
            PassOutcome::Contradiction => return false,
            PassOutcome::Open { blanks, frontier } => (blanks, frontier),
        };
        if blanks == 0 {
            trace.diag(Diag::Solved);
            return true;
        }
        if blanks == prev_blanks {
            // Forced commits have dried up; branch on the frontier cell.
            return fork_and_recurse(grid, frontier, trace, depth);
        }
        prev_blanks = blanks;
    }
}

/// One propagation pass: trim every blank cell's candidate set down to the
/// digits that survive a legality probe, committing cells whose set
/// collapses to a single digit.
fn trim_pass(grid: &mut Grid, trace: &mut Trace) -> PassOutcome {
    let mut blanks = 0usize;
    let mut frontier = Frontier::reset();
    for pos in Grid::positions() {
        if grid.get(pos) != 0 { continue; }
        for d in digits_of(grid.candidates(pos)) {
            if !grid.probe_legal(d, pos) {
                grid.remove_candidate(pos, d);
            }
        }
        let mask = grid.candidates(pos);
        match digit_count(mask) {
            0 => {
                trace.diag(Diag::Contradiction { pos });
                return PassOutcome::Contradiction;
            }
            1 => {
                if let Some(d) = first_digit(mask) {
                    grid.set(pos, d);
                    grid.clear_candidates(pos);
                    trace.diag(Diag::Forced { pos, digit: d });
                }
            }
            n => {
                blanks += 1;
                frontier.observe(n, pos);
                if trace.active() {
                    trace.note(format!("{pos}: {n} candidates ({})", digits_of(mask).format(" ")));
                }
            }
        }
    }
    PassOutcome::Open { blanks, frontier }
}

/// Try each candidate of the frontier cell in ascending order on an
/// independent copy of the grid. The first branch that solves wins; its
/// values are copied back into every cell still blank here.
fn fork_and_recurse(grid: &mut Grid, frontier: Frontier, trace: &mut Trace, depth: usize) -> bool {
    let Some(pos) = frontier.pos else {
        // Blanks remain but no frontier was recorded; nothing left to try.
        return false;
    };
    if trace.active() {
        trace.diag(Diag::Fork { pos, digits: digits_of(grid.candidates(pos)).collect() });
    }
    for d in digits_of(grid.candidates(pos)) {
        trace.diag(Diag::Branch { depth, pos, digit: d });
        let mut child = grid.fork();
        child.set(pos, d);
        if solve_at_depth(&mut child, trace, depth + 1) {
            for p in Grid::positions() {
                if grid.get(p) == 0 {
                    grid.set(p, child.get(p));
                    grid.clear_candidates(p);
                }
            }
            return true;
        }
    }
    false
}
