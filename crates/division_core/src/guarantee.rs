//! Locally guaranteed promotion and demotion.
//!
//! A player promotes here if they still finish in the top slots after losing
//! every game they have left, and demotes if they still finish in the bottom
//! slots after winning every game they have left. Matches between other
//! players stay unplayed, so this is the per-scenario test the possibility
//! search builds on, not a guarantee over every completion.

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::matrix::ResultsMatrix;
use crate::ranking::rank;
use crate::scenario::{loses_out, wins_out};

/// Which end of the standings an analysis is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Promotion,
    Demotion,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Promotion => write!(f, "promotion"),
            Direction::Demotion => write!(f, "demotion"),
        }
    }
}

/// Players whose promotion into the top `slots` survives losing out.
pub fn promoting(matrix: &ResultsMatrix, slots: usize) -> BTreeSet<String> {
    names(matrix, &confirmed(matrix, Direction::Promotion, slots))
}

/// Players whose demotion into the bottom `slots` survives winning out.
pub fn demoting(matrix: &ResultsMatrix, slots: usize) -> BTreeSet<String> {
    names(matrix, &confirmed(matrix, Direction::Demotion, slots))
}

/// Indices of the players confirmed for `direction` in this scenario.
pub(crate) fn confirmed(
    matrix: &ResultsMatrix,
    direction: Direction,
    slots: usize,
) -> BTreeSet<usize> {
    let n = matrix.len();
    (0..n)
        .into_par_iter()
        .filter(|&player| match direction {
            Direction::Promotion => place_of(&loses_out(matrix, player), player) < slots,
            Direction::Demotion => place_of(&wins_out(matrix, player), player) + slots >= n,
        })
        .collect()
}

/// Indices of the players in the top (or bottom) `slots` of the standings.
pub(crate) fn finishers(
    matrix: &ResultsMatrix,
    direction: Direction,
    slots: usize,
) -> BTreeSet<usize> {
    let order = rank(matrix);
    let slots = slots.min(order.len());
    match direction {
        Direction::Promotion => order[..slots].iter().copied().collect(),
        Direction::Demotion => order[order.len() - slots..].iter().copied().collect(),
    }
}

pub(crate) fn names(matrix: &ResultsMatrix, players: &BTreeSet<usize>) -> BTreeSet<String> {
    players.iter().map(|&p| matrix.player(p).to_string()).collect()
}

/// Zero-based place of `player` in the standings.
fn place_of(matrix: &ResultsMatrix, player: usize) -> usize {
    rank(matrix)
        .iter()
        .position(|&p| p == player)
        .unwrap_or(matrix.len())
}
