//! The three deduction heuristics, iterated to a fixed point.

use crate::board::{Board, Cell, Line};
use crate::error::Contradiction;

#[derive(Clone, Copy)]
enum Axis {
    Row,
    Col,
}

#[derive(Clone, Copy)]
enum Rule {
    ConsecutivePair,
    Sandwich,
    HalfCount,
}

const RULES: [Rule; 3] = [Rule::ConsecutivePair, Rule::Sandwich, Rule::HalfCount];

fn line_at(board: &Board, axis: Axis, i: usize) -> Line {
    match axis {
        Axis::Row => board.row(i),
        Axis::Col => board.col(i),
    }
}

fn set_at(board: &mut Board, axis: Axis, i: usize, k: usize, value: Cell) {
    let result = match axis {
        Axis::Row => board.set(i, k, value),
        Axis::Col => board.set(k, i, value),
    };
    result.expect("propagator only ever addresses in-bounds cells");
}

/// Positions one step past a run of two adjacent `a`-bits: flank `p - 1` and
/// `p + 2` around every pair `p, p + 1` both set in `a`.
fn flank_targets(a: u64, size: usize) -> u64 {
    let mut out = 0u64;
    let mut pairs = a & (a >> 1);
    while pairs != 0 {
        let pos = pairs.trailing_zeros() as usize;
        if pos >= 1 {
            out |= 1u64 << (pos - 1);
        }
        if pos + 2 < size {
            out |= 1u64 << (pos + 2);
        }
        pairs &= pairs - 1;
    }
    out
}

/// The middle position `p + 1` of every sandwich `p, _, p + 2` both set in `a`.
fn sandwich_targets(a: u64) -> u64 {
    let mut out = 0u64;
    let mut sandwiches = a & (a >> 2);
    while sandwiches != 0 {
        let pos = sandwiches.trailing_zeros() as usize;
        out |= 1u64 << (pos + 1);
        sandwiches &= sandwiches - 1;
    }
    out
}

fn half_count_targets(line: Line, size: usize) -> (u64, u64) {
    let half = size / 2;
    let empty = line.empty_mask(size);
    let ones = line.ones.count_ones() as usize;
    let zeros = line.zeros.count_ones() as usize;
    let force_zero = if ones == half && zeros < half { empty } else { 0 };
    let force_one = if zeros == half && ones < half { empty } else { 0 };
    (force_zero, force_one)
}

fn rule_targets(rule: Rule, line: Line, size: usize) -> (u64, u64) {
    let empty = line.empty_mask(size);
    match rule {
        Rule::ConsecutivePair => (
            flank_targets(line.ones, size) & empty,
            flank_targets(line.zeros, size) & empty,
        ),
        Rule::Sandwich => (
            sandwich_targets(line.ones) & empty,
            sandwich_targets(line.zeros) & empty,
        ),
        Rule::HalfCount => half_count_targets(line, size),
    }
}

fn write_forced(board: &mut Board, axis: Axis, i: usize, mut mask: u64, value: Cell) -> bool {
    let mut changed = false;
    while mask != 0 {
        let pos = mask.trailing_zeros() as usize;
        set_at(board, axis, i, pos, value);
        changed = true;
        mask &= mask - 1;
    }
    changed
}

fn apply_rule_once(board: &mut Board, rule: Rule) -> Result<bool, Contradiction> {
    let size = board.size();
    let mut changed = false;
    for axis in [Axis::Row, Axis::Col] {
        for i in 0..size {
            let line = line_at(board, axis, i);
            let (force_zero, force_one) = rule_targets(rule, line, size);
            if force_zero & force_one != 0 {
                return Err(Contradiction);
            }
            changed |= write_forced(board, axis, i, force_zero, Cell::Zero);
            changed |= write_forced(board, axis, i, force_one, Cell::One);
        }
    }
    Ok(changed)
}

/// Runs the fixed-point loop `{consecutive-pair -> sandwich -> half-count}`,
/// each rule re-applied until it stops changing the board, until a full cycle
/// makes no change or the board becomes valid.
///
/// # Errors
///
/// Returns [`Contradiction`] the moment any pass leaves the board
/// inconsistent.
pub(crate) fn propagate(board: &mut Board) -> Result<(), Contradiction> {
    loop {
        let mut cycle_changed = false;
        for &rule in &RULES {
            loop {
                let changed = apply_rule_once(board, rule)?;
                if !changed {
                    break;
                }
                cycle_changed = true;
                if !board.is_consistent() {
                    return Err(Contradiction);
                }
            }
        }
        if !cycle_changed || board.is_valid() {
            return Ok(());
        }
    }
}
