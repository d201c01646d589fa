//! The text grid file format: comments, whitespace, and the `{0, 1, _}` alphabet.

use std::fmt;

use takuzu_engine::{check_char, check_size, Board, Cell, MAX_SIZE};

/// Why a puzzle file failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The file has no significant (non-comment, non-blank) lines.
    Empty,
    /// The first significant line's length isn't a supported board size.
    BadSize(usize),
    /// A character outside `{0, 1, _}` appeared on the given line.
    BadChar { line: usize, ch: char },
    /// A significant line exceeded the 64-cell limit.
    LineTooLong(usize),
    /// A row didn't have exactly as many cells as the first row.
    WrongColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// The file didn't contain exactly `size` significant lines.
    WrongRowCount { expected: usize, found: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "input contains no puzzle"),
            ParseError::BadSize(n) => write!(f, "line 0: {n} is not a supported board size"),
            ParseError::BadChar { line, ch } => {
                write!(f, "line {line}: invalid character '{ch}'")
            }
            ParseError::LineTooLong(line) => {
                write!(f, "line {line}: exceeds the maximum size of {MAX_SIZE} cells")
            }
            ParseError::WrongColumnCount {
                line,
                expected,
                found,
            } => write!(f, "line {line}: expected {expected} cells, found {found}"),
            ParseError::WrongRowCount { expected, found } => {
                write!(f, "expected {expected} rows, found {found}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

fn parse_row(line: &str, line_no: usize) -> Result<Vec<Cell>, ParseError> {
    let mut cells = Vec::new();
    for ch in line.chars().filter(|c| !c.is_whitespace()) {
        if !check_char(ch) {
            return Err(ParseError::BadChar { line: line_no, ch });
        }
        cells.push(match ch {
            '0' => Cell::Zero,
            '1' => Cell::One,
            _ => Cell::Empty,
        });
    }
    if cells.len() > MAX_SIZE {
        return Err(ParseError::LineTooLong(line_no));
    }
    Ok(cells)
}

/// Parses the text grid format: `#`-prefixed lines and blank lines are
/// ignored, whitespace within a line is ignored, the first significant line
/// fixes the board size, and the file must contain exactly that many rows.
///
/// # Errors
///
/// See [`ParseError`] for the ways a file can fail to parse.
pub fn parse(contents: &str) -> Result<Board, ParseError> {
    let significant: Vec<&str> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    let first_line = significant.first().ok_or(ParseError::Empty)?;
    let first_row = parse_row(first_line, 0)?;
    let size = first_row.len();
    if !check_size(size) {
        return Err(ParseError::BadSize(size));
    }
    if significant.len() != size {
        return Err(ParseError::WrongRowCount {
            expected: size,
            found: significant.len(),
        });
    }

    let mut board = Board::allocate(size).expect("size was just validated by check_size");
    for (i, line) in significant.iter().enumerate() {
        let row = if i == 0 {
            first_row.clone()
        } else {
            parse_row(line, i)?
        };
        if row.len() != size {
            return Err(ParseError::WrongColumnCount {
                line: i,
                expected: size,
                found: row.len(),
            });
        }
        for (j, cell) in row.into_iter().enumerate() {
            board
                .set(i, j, cell)
                .expect("row and column indices were validated against size");
        }
    }
    Ok(board)
}
