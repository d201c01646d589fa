//! Solves and generates Takuzu (a.k.a. Binairo) puzzles on square boards of
//! sizes 4, 8, 16, 32 and 64.
//!
//! The board is bit-packed: each row and column is a pair of `u64` masks, so
//! every consistency check and deduction rule is a constant-width bitwise
//! expression. This crate owns the board representation, the consistency
//! checker, the heuristic propagator, the choice oracle, the recursive
//! solver and the generator; it has no opinion on argument parsing, file
//! formats or process exit codes, which belong to a calling binary.

#![warn(missing_docs)]

mod board;
mod consistency;
mod error;
mod generator;
mod oracle;
mod propagate;
mod solver;

pub use board::{check_char, check_size, Board, Cell, MAX_SIZE, VALID_SIZES};
pub use error::TakuzuError;
pub use generator::{generate, generate_with_rng};
pub use solver::{solve, Mode, SolveCounters};
