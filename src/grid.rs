use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

use crate::validator;

pub type Digit = u8; // 0 = blank; 1..=9 otherwise

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos { pub r: usize, pub c: usize }

impl Pos {
    pub fn idx(self) -> usize {
        debug_assert!(self.r < 9 && self.c < 9, "position out of range: r{},c{}", self.r, self.c);
        self.r * 9 + self.c
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "r{},c{}", self.r, self.c) }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    // 0 = blank; 1..=9 digits
    pub(crate) cells: [Digit; 81],
    // candidate bitset per cell; bit d means digit d (1..=9) not yet ruled out.
    // Only meaningful while the cell is blank; committing a value clears it.
    pub(crate) cands: [u16; 81],
}

impl Grid {
    pub fn empty() -> Self { Self { cells: [0; 81], cands: [0; 81] } }

    /// Build a grid from a caller-supplied 9x9 value matrix, 0 for blanks.
    /// Values above 9 are a contract violation and abort.
    pub fn from_rows(rows: [[Digit; 9]; 9]) -> Self {
        let mut g = Grid::empty();
        for (r, c) in (0..9).cartesian_product(0..9) {
            let v = rows[r][c];
            assert!(v <= 9, "cell value {v} out of range at r{r},c{c}");
            g.cells[r * 9 + c] = v;
        }
        g
    }

    pub fn get(&self, p: Pos) -> Digit { self.cells[p.idx()] }
    pub fn set(&mut self, p: Pos, d: Digit) { self.cells[p.idx()] = d; }

    pub fn candidates(&self, p: Pos) -> u16 { self.cands[p.idx()] }
    pub fn remove_candidate(&mut self, p: Pos, d: Digit) { self.cands[p.idx()] &= !(1 << d); }
    pub fn clear_candidates(&mut self, p: Pos) { self.cands[p.idx()] = 0; }

    /// Materialize candidate sets for a solve: {1..9} for every blank cell,
    /// absent (0) for every filled one.
    pub fn init_candidates(&mut self) {
        for i in 0..81 {
            self.cands[i] = if self.cells[i] == 0 { all_digits() } else { 0 };
        }
    }

    /// Would placing `d` at `p` keep the containing row, column and block
    /// free of duplicates? Tentatively places the value, checks, and reverts
    /// it regardless of outcome.
    pub fn probe_legal(&mut self, d: Digit, p: Pos) -> bool {
        debug_assert_eq!(self.cells[p.idx()], 0, "probe on a filled cell at {p}");
        let mut quiet = crate::Trace::quiet();
        self.cells[p.idx()] = d;
        let ok = validator::row_ok(self, p.r, &mut quiet)
            && validator::col_ok(self, p.c, &mut quiet)
            && validator::block_ok(self, p.r / 3, p.c / 3, &mut quiet);
        self.cells[p.idx()] = 0;
        ok
    }

    /// Independent copy for one search branch: committed values only, no
    /// candidate state. The child re-derives its own candidates.
    pub fn fork(&self) -> Grid { Grid { cells: self.cells, cands: [0; 81] } }

    pub fn is_filled(&self) -> bool { self.cells.iter().all(|&d| d != 0) }

    pub fn positions() -> impl Iterator<Item = Pos> {
        (0..9).cartesian_product(0..9).map(|(r, c)| Pos { r, c })
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(37);
        writeln!(f, "{rule}")?;
        for r in 0..9 {
            write!(f, "|")?;
            for c in 0..9 {
                let d = self.cells[r * 9 + c];
                if d == 0 { write!(f, "   |")?; } else { write!(f, " {d} |")?; }
            }
            writeln!(f)?;
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

pub fn digit_count(mask: u16) -> u32 { mask.count_ones() }

pub fn first_digit(mask: u16) -> Option<Digit> {
    if mask == 0 { None } else { Some(mask.trailing_zeros() as Digit) }
}

pub fn digits_of(mask: u16) -> impl Iterator<Item = Digit> {
    (1u8..=9).filter(move |&d| mask & (1 << d) != 0)
}

#[inline]
pub const fn all_digits() -> u16 { 0b11_1111_1110 } // bits 1..=9 set
