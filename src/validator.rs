use itertools::Itertools;

use crate::grid::{Grid, Pos};
use crate::trace::{Diag, Trace};

// Blanks (0) never count as duplicates, so the same predicates serve both
// full-solution validation and partial-puzzle feasibility checks.

pub fn row_ok(grid: &Grid, r: usize, trace: &mut Trace) -> bool {
    let mut seen = [false; 10];
    for c in 0..9 {
        let v = grid.get(Pos { r, c });
        if v != 0 {
            if seen[v as usize] {
                trace.diag(Diag::RowRepeat { row: r, value: v });
                return false;
            }
            seen[v as usize] = true;
        }
    }
    trace.diag(Diag::RowOk { row: r });
    true
}

pub fn col_ok(grid: &Grid, c: usize, trace: &mut Trace) -> bool {
    let mut seen = [false; 10];
    for r in 0..9 {
        let v = grid.get(Pos { r, c });
        if v != 0 {
            if seen[v as usize] {
                trace.diag(Diag::ColRepeat { col: c, value: v });
                return false;
            }
            seen[v as usize] = true;
        }
    }
    trace.diag(Diag::ColOk { col: c });
    true
}

/// Check the 3x3 block whose top-left cell is (3*band, 3*stack).
pub fn block_ok(grid: &Grid, band: usize, stack: usize, trace: &mut Trace) -> bool {
    let mut seen = [false; 10];
    for (r, c) in (band * 3..band * 3 + 3).cartesian_product(stack * 3..stack * 3 + 3) {
        let v = grid.get(Pos { r, c });
        if v != 0 {
            if seen[v as usize] {
                trace.diag(Diag::BlockRepeat { band, stack, value: v });
                return false;
            }
            seen[v as usize] = true;
        }
    }
    trace.diag(Diag::BlockOk { band, stack });
    true
}

/// All rows, then all columns, then all blocks; stops at the first failure.
/// The check order only decides which diagnostic is reported first, never
/// the boolean result.
pub fn is_valid(grid: &Grid, trace: &mut Trace) -> bool {
    for r in 0..9 {
        if !row_ok(grid, r, trace) { return false; }
    }
    for c in 0..9 {
        if !col_ok(grid, c, trace) { return false; }
    }
    for (band, stack) in (0..3).cartesian_product(0..3) {
        if !block_ok(grid, band, stack, trace) { return false; }
    }
    true
}
