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

#[cfg(test)]
mod tests {
    use crate::board::{Board, Cell};

    #[test]
    fn empty_board_is_consistent_but_not_valid() {
        let board = Board::allocate(4).unwrap();
        assert!(board.is_consistent());
        assert!(!board.is_valid());
    }

    #[test]
    fn three_in_a_row_is_inconsistent() {
        let mut board = Board::allocate(4).unwrap();
        board.set(0, 0, Cell::One).unwrap();
        board.set(0, 1, Cell::One).unwrap();
        board.set(0, 2, Cell::One).unwrap();
        assert!(!board.is_consistent());
    }

    #[test]
    fn balance_violation_is_inconsistent() {
        let mut board = Board::allocate(4).unwrap();
        // Column 1 gets three ones at non-adjacent rows: over the N/2 = 2
        // balance limit, but without tripping the three-in-a-row rule.
        board.set(0, 1, Cell::One).unwrap();
        board.set(1, 1, Cell::One).unwrap();
        board.set(3, 1, Cell::One).unwrap();
        assert!(!board.is_consistent());
    }

    #[test]
    fn duplicate_full_rows_are_inconsistent() {
        let mut board = Board::allocate(4).unwrap();
        for i in [0usize, 1usize] {
            board.set(i, 0, Cell::One).unwrap();
            board.set(i, 1, Cell::Zero).unwrap();
            board.set(i, 2, Cell::One).unwrap();
            board.set(i, 3, Cell::Zero).unwrap();
        }
        assert!(!board.is_consistent());
    }

    #[test]
    fn duplicate_partial_rows_are_allowed() {
        let mut board = Board::allocate(4).unwrap();
        board.set(0, 0, Cell::One).unwrap();
        board.set(1, 0, Cell::One).unwrap();
        assert!(board.is_consistent());
    }

    #[test]
    fn full_and_consistent_is_valid() {
        let mut board = Board::allocate(4).unwrap();
        let rows = [
            [Cell::One, Cell::Zero, Cell::One, Cell::Zero],
            [Cell::Zero, Cell::One, Cell::Zero, Cell::One],
            [Cell::One, Cell::One, Cell::Zero, Cell::Zero],
            [Cell::Zero, Cell::Zero, Cell::One, Cell::One],
        ];
        for (i, row) in rows.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                board.set(i, j, *cell).unwrap();
            }
        }
        assert!(board.is_valid());
    }
}
