use std::io;
use std::path::{Path, PathBuf};
use std::fs;

use thiserror::Error;

use crate::grid::{Grid, Pos};

/// Why a puzzle source could not be turned into a grid. Both variants are
/// caller-recoverable: the caller decides whether to fall back to a
/// default grid or abort.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    InputAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}, field {field}: {token:?} is not a digit 0-9")]
    Parse { line: usize, field: usize, token: String },
}

/// Read a puzzle from a CSV file: up to nine lines of up to nine
/// comma-separated fields, one line per row.
pub fn load_puzzle(path: impl AsRef<Path>) -> Result<Grid, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|source| LoadError::InputAccess { path: path.to_path_buf(), source })?;
    parse_csv(&text)
}

/// Parse CSV text into a grid. Blank, whitespace-only and "0" fields map to
/// a blank cell; short lines and missing trailing rows leave the remainder
/// of the grid blank; rows and fields beyond the ninth are ignored.
pub fn parse_csv(text: &str) -> Result<Grid, LoadError> {
    let mut grid = Grid::empty();
    for (r, line) in text.lines().take(9).enumerate() {
        for (c, field) in line.split(',').take(9).enumerate() {
            let token = field.trim();
            if token.is_empty() || token == "0" {
                continue;
            }
            let value = token
                .parse::<u8>()
                .ok()
                .filter(|&v| v <= 9)
                .ok_or_else(|| LoadError::Parse {
                    line: r + 1,
                    field: c + 1,
                    token: token.to_string(),
                })?;
            grid.set(Pos { r, c }, value);
        }
    }
    Ok(grid)
}
