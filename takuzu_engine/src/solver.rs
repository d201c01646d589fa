//! Recursive propagate-then-branch search.

use std::io::Write;

use crate::board::Board;
use crate::oracle;
use crate::propagate::propagate;

/// Whether the solver returns the first solution found or enumerates all of
/// them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Stop at the first solution.
    First,
    /// Enumerate every solution, writing each to the sink.
    All,
}

/// Counters owned by the caller and reset before each top-level invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveCounters {
    /// The number of distinct full, consistent completions found so far.
    pub solutions: u64,
    /// The number of branches abandoned because neither trial value led to
    /// a solution.
    pub backtracks: u64,
    /// Set once at least one solution has been found.
    pub solved: bool,
}

/// Runs the propagate-then-branch search described in the recursive
/// contract: propagate to a fixed point, return if full, otherwise branch on
/// the oracle's choice and recurse on each value in turn.
///
/// In [`Mode::First`] this returns as soon as a solution is found, and
/// `counters.solutions` is 0 or 1 afterward. In [`Mode::All`] it never
/// returns early: every full completion is written to `sink` and
/// `counters.solutions` ends up equal to the exact count of completions.
pub fn solve(
    mut board: Board,
    mode: Mode,
    sink: &mut dyn Write,
    counters: &mut SolveCounters,
) -> Option<Board> {
    if propagate(&mut board).is_err() {
        return None;
    }

    if board.is_full() {
        counters.solutions += 1;
        counters.solved = true;
        return match mode {
            Mode::All => {
                board
                    .print(sink)
                    .expect("writing a solved board to the sink should not fail");
                None
            }
            Mode::First => Some(board),
        };
    }

    let choice = oracle::choose(&board);
    let mut branch = board.clone();
    branch
        .set(choice.row, choice.col, choice.value)
        .expect("oracle choice always targets an in-bounds, empty cell");

    if let Some(solution) = solve(branch, mode, sink, counters) {
        return Some(solution);
    }

    board
        .set(choice.row, choice.col, choice.value.opposite())
        .expect("oracle choice always targets an in-bounds, empty cell");
    let result = solve(board, mode, sink, counters);
    if result.is_none() {
        counters.backtracks += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn parse_board(size: usize, rows: &[&str]) -> Board {
        let mut board = Board::allocate(size).unwrap();
        for (i, row) in rows.iter().enumerate() {
            for (j, ch) in row.split_whitespace().enumerate() {
                let cell = match ch {
                    "0" => Cell::Zero,
                    "1" => Cell::One,
                    "_" => Cell::Empty,
                    other => panic!("bad test fixture character: {other}"),
                };
                board.set(i, j, cell).unwrap();
            }
        }
        board
    }

    #[test]
    fn empty_4x4_has_72_solutions() {
        let board = Board::allocate(4).unwrap();
        let mut sink = Vec::new();
        let mut counters = SolveCounters::default();
        let result = solve(board, Mode::All, &mut sink, &mut counters);
        assert!(result.is_none());
        assert_eq!(counters.solutions, 72);
    }

    #[test]
    fn uniquely_solvable_clue_has_one_solution() {
        let board = parse_board(
            4,
            &["1 _ _ _", "_ _ 0 1", "_ _ _ _", "_ 1 _ 1"],
        );
        let mut sink = Vec::new();
        let mut counters = SolveCounters::default();
        let solution = solve(board.clone(), Mode::First, &mut sink, &mut counters)
            .expect("this clue has a unique solution");
        assert!(solution.is_valid());
        for i in 0..4 {
            for j in 0..4 {
                let original = board.get(i, j).unwrap();
                if original != Cell::Empty {
                    assert_eq!(solution.get(i, j).unwrap(), original);
                }
            }
        }

        let mut all_counters = SolveCounters::default();
        let mut all_sink = Vec::new();
        solve(board, Mode::All, &mut all_sink, &mut all_counters);
        assert_eq!(all_counters.solutions, 1);
    }

    #[test]
    fn unsolvable_clue_reports_zero_solutions() {
        let mut board = Board::allocate(4).unwrap();
        board.set(0, 0, Cell::One).unwrap();
        board.set(0, 1, Cell::One).unwrap();
        board.set(0, 2, Cell::One).unwrap();
        let mut sink = Vec::new();
        let mut counters = SolveCounters::default();
        let result = solve(board, Mode::All, &mut sink, &mut counters);
        assert!(result.is_none());
        assert_eq!(counters.solutions, 0);
    }
}
