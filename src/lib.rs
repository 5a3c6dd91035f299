pub mod grid;
pub mod parse;
pub mod solver;
pub mod trace;
pub mod validator;

pub use grid::{Grid, Pos};
pub use parse::{load_puzzle, parse_csv, LoadError};
pub use trace::{Diag, Trace};
