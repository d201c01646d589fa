//! Generator: outer-ring seed, quadrant assembly, uniqueness-preserving
//! cell removal.

use std::io;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{check_size, Board, Cell};
use crate::error::TakuzuError;
use crate::solver::{solve, Mode, SolveCounters};

/// The fraction of cells left as clues after removal.
///
/// Resolves the source's ambiguous fill-density constant (alternately `0.3`
/// and `0.5` across revisions) in favor of `0.3`: the sparser density, which
/// matches the `N^2 * (1 - rho)` removal-count phrasing read as "most cells
/// go".
const FILL_RATIO: f64 = 0.3;

const CORNER_A: [[Cell; 2]; 2] = [[Cell::Zero, Cell::One], [Cell::One, Cell::Zero]];
const CORNER_B: [[Cell; 2]; 2] = [[Cell::One, Cell::Zero], [Cell::Zero, Cell::One]];

fn fill_corner(board: &mut Board, r0: usize, c0: usize, rng: &mut impl Rng) {
    let pattern = if rng.gen_bool(0.5) { CORNER_A } else { CORNER_B };
    for (dr, row) in pattern.iter().enumerate() {
        for (dc, cell) in row.iter().enumerate() {
            board.set(r0 + dr, c0 + dc, *cell).expect("corner offsets stay in bounds");
        }
    }
}

fn would_complete_row_run(board: &Board, i: usize, j: usize, value: Cell) -> bool {
    j >= 2 && board.get(i, j - 1) == Ok(value) && board.get(i, j - 2) == Ok(value)
}

fn would_complete_col_run(board: &Board, i: usize, j: usize, value: Cell) -> bool {
    i >= 2 && board.get(i - 1, j) == Ok(value) && board.get(i - 2, j) == Ok(value)
}

fn fill_border(board: &mut Board, rng: &mut impl Rng) {
    let size = board.size();
    for j in 2..size - 2 {
        let drawn = if rng.gen_bool(0.5) { Cell::Zero } else { Cell::One };

        let top = if would_complete_row_run(board, 0, j, drawn) {
            drawn.opposite()
        } else {
            drawn
        };
        board.set(0, j, top).expect("border column is in bounds");

        let bottom = if would_complete_row_run(board, size - 1, j, drawn) {
            drawn.opposite()
        } else {
            drawn
        };
        board.set(size - 1, j, bottom).expect("border column is in bounds");
    }

    for i in 2..size - 2 {
        let drawn = if rng.gen_bool(0.5) { Cell::Zero } else { Cell::One };

        let left = if would_complete_col_run(board, i, 0, drawn) {
            drawn.opposite()
        } else {
            drawn
        };
        board.set(i, 0, left).expect("border row is in bounds");

        let right = if would_complete_col_run(board, i, size - 1, drawn) {
            drawn.opposite()
        } else {
            drawn
        };
        board.set(i, size - 1, right).expect("border row is in bounds");
    }
}

/// One attempt at the outer-ring seed. `None` means the attempt should be
/// retried from the top: either the seed itself came out inconsistent, or
/// (for `size > 4`) the solver could not complete the interior.
fn try_outer_ring(size: usize, rng: &mut impl Rng) -> Option<Board> {
    let mut board = Board::allocate(size).expect("size already validated by caller");
    fill_corner(&mut board, 0, 0, rng);
    fill_corner(&mut board, 0, size - 2, rng);
    fill_corner(&mut board, size - 2, 0, rng);
    fill_corner(&mut board, size - 2, size - 2, rng);
    if size > 4 {
        fill_border(&mut board, rng);
    }
    if !board.is_consistent() {
        return None;
    }
    if size == 4 {
        return Some(board);
    }
    let mut sink = io::sink();
    let mut counters = SolveCounters::default();
    solve(board, Mode::First, &mut sink, &mut counters)
}

/// The outer-ring seed strategy: used verbatim at `size == 4`, and as the
/// base case of [`quadrant_assemble`] for larger boards.
fn generate_outer_ring(size: usize, rng: &mut impl Rng) -> Board {
    loop {
        if let Some(board) = try_outer_ring(size, rng) {
            return board;
        }
    }
}

fn paste_quadrants(size: usize, quadrants: &[Board]) -> Board {
    let half = size / 2;
    let mut board = Board::allocate(size).expect("size already validated by caller");
    let offsets = [(0, 0), (0, half), (half, 0), (half, half)];
    for (quadrant, (row_off, col_off)) in quadrants.iter().zip(offsets) {
        for i in 0..half {
            for j in 0..half {
                let value = quadrant.get(i, j).expect("quadrant coordinates are in bounds");
                board
                    .set(row_off + i, col_off + j, value)
                    .expect("pasted coordinates are in bounds");
            }
        }
    }
    board
}

/// The quadrant-assembly strategy: pastes four `size / 2` boards into the
/// four quadrants, retrying until the seam is consistent. At `size == 8` the
/// quadrants come from the outer-ring strategy directly; above that they are
/// themselves assembled recursively.
fn quadrant_assemble(size: usize, rng: &mut impl Rng) -> Board {
    let half = size / 2;
    loop {
        let quadrants: Vec<Board> = if size == 8 {
            (0..4).map(|_| generate_outer_ring(half, rng)).collect()
        } else {
            (0..4).map(|_| quadrant_assemble(half, rng)).collect()
        };
        let pasted = paste_quadrants(size, &quadrants);
        if pasted.is_consistent() {
            return pasted;
        }
    }
}

fn build_full_board(size: usize, rng: &mut impl Rng) -> Board {
    if size == 4 {
        generate_outer_ring(size, rng)
    } else {
        quadrant_assemble(size, rng)
    }
}

fn remove_cells(mut board: Board, unique: bool, rng: &mut impl Rng) -> Board {
    let size = board.size();
    let total = size * size;
    let keep = (total as f64 * FILL_RATIO) as usize;
    let remove_target = total - keep;

    let mut indices: Vec<usize> = (0..total).collect();
    indices.shuffle(rng);

    if unique {
        let mut removed = 0;
        for idx in indices {
            if removed >= remove_target {
                break;
            }
            let (i, j) = (idx / size, idx % size);
            let mut candidate = board.clone();
            candidate.set(i, j, Cell::Empty).expect("flat index decodes in-bounds coordinates");

            let mut counters = SolveCounters::default();
            let mut sink = io::sink();
            solve(candidate.clone(), Mode::All, &mut sink, &mut counters);
            if counters.solutions == 1 {
                board = candidate;
                removed += 1;
            }
        }
    } else {
        for idx in indices.into_iter().take(remove_target) {
            let (i, j) = (idx / size, idx % size);
            board.set(i, j, Cell::Empty).expect("flat index decodes in-bounds coordinates");
        }
    }
    board
}

/// Builds a puzzle of the given size: a full valid board via the outer-ring
/// or quadrant-assembly strategy, with cells removed down to the clue
/// density of [`FILL_RATIO`]. Draws randomness from [`rand::thread_rng`].
///
/// # Errors
///
/// Returns [`TakuzuError::BadSize`] if `size` is not one of the supported
/// sizes.
pub fn generate(size: usize, unique: bool) -> Result<Board, TakuzuError> {
    generate_with_rng(size, unique, &mut rand::thread_rng())
}

/// As [`generate`], but takes the PRNG as a parameter for reproducible,
/// seeded test runs.
///
/// # Errors
///
/// Returns [`TakuzuError::BadSize`] if `size` is not one of the supported
/// sizes.
pub fn generate_with_rng(
    size: usize,
    unique: bool,
    rng: &mut impl Rng,
) -> Result<Board, TakuzuError> {
    if !check_size(size) {
        return Err(TakuzuError::BadSize);
    }
    let full = build_full_board(size, rng);
    Ok(remove_cells(full, unique, rng))
}
