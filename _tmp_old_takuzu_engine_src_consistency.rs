//! The three consistency rules: no-three-in-a-row, balance, no duplicate lines.

use crate::board::{full_mask, Board, Line};

impl Board {
    /// `true` iff no rule is currently violated by the filled cells.
    ///
    /// Empty cells are always allowed; this does not require the board to be
    /// full. See [`Board::is_valid`] for full-and-consistent.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.rows.iter().all(|l| line_ok(*l, self.size()))
            && self.cols.iter().all(|l| line_ok(*l, self.size()))
            && no_duplicate_full_lines(&self.rows, self.size())
            && no_duplicate_full_lines(&self.cols, self.size())
    }

    /// `true` iff the board is full and consistent.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_full() && self.is_consistent()
    }
}

fn no_three(mask: u64) -> bool {
    mask & (mask >> 1) & (mask >> 2) == 0
}

fn line_ok(line: Line, size: usize) -> bool {
    let half = size / 2;
    no_three(line.ones)
        && no_three(line.zeros)
        && line.ones.count_ones() as usize <= half
        && line.zeros.count_ones() as usize <= half
}

fn no_duplicate_full_lines(lines: &[Line], size: usize) -> bool {
    let mask = full_mask(size);
    let is_full = |l: &Line| l.ones ^ l.zeros == mask;
    for (k, line_k) in lines.iter().enumerate() {
        if !is_full(line_k) {
            continue;
        }
        for line_l in &lines[k + 1..] {
            if is_full(line_l) && line_l == line_k {
                return false;
            }
        }
    }
    true
}
