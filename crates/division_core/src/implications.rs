//! What each result of one match would mean for the rest of the division.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::budget::SearchBudget;
use crate::error::{DivisionError, Result};
use crate::guarantee::Direction;
use crate::matrix::ResultsMatrix;
use crate::points::HalfPoints;
use crate::search::{SearchConfig, possible_outcome_with_budget};

/// One admissible split of the remaining games between two players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplicationRow {
    /// Player A's total wins over B once the match is settled
    pub wins_a: HalfPoints,
    /// Player B's total wins over A once the match is settled
    pub wins_b: HalfPoints,
    /// Players who could still promote (or demote) after this result
    pub players: BTreeSet<String>,
}

/// Implication table for a single pairing, B sweeping first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchImplications {
    pub player_a: String,
    pub player_b: String,
    pub direction: Direction,
    pub slots: usize,
    pub rows: Vec<ImplicationRow>,
}

/// Run the possibility search once per split of the `a`/`b` games still to
/// play. A finished pairing yields a single row for its actual result. All
/// rows share one budget.
pub fn match_implications(
    matrix: &ResultsMatrix,
    a: &str,
    b: &str,
    direction: Direction,
    slots: usize,
    config: &SearchConfig,
) -> Result<MatchImplications> {
    let (ia, ib) = (matrix.index_of(a)?, matrix.index_of(b)?);
    if ia == ib {
        return Err(DivisionError::InvalidRecord {
            player_a: a.to_string(),
            player_b: b.to_string(),
            wins_a: HalfPoints::ZERO,
            wins_b: HalfPoints::ZERO,
            reason: "a player cannot play themselves".to_string(),
        });
    }

    let remaining = matrix.remaining(ia, ib);
    let mut budget = SearchBudget::start(config.limits());
    let mut rows = Vec::with_capacity(remaining.halves() as usize + 1);

    for half_wins_a in 0..=remaining.halves() {
        let extra_a = HalfPoints::from_halves(half_wins_a);
        let wins_a = matrix.wins(ia, ib) + extra_a;
        let wins_b = matrix.wins(ib, ia) + (remaining - extra_a);
        let scenario = matrix.with_pair(ia, ib, wins_a, wins_b);
        let possible =
            possible_outcome_with_budget(&scenario, direction, slots, config.prune, &mut budget)?;
        rows.push(ImplicationRow {
            wins_a,
            wins_b,
            players: possible.players,
        });
    }

    Ok(MatchImplications {
        player_a: a.to_string(),
        player_b: b.to_string(),
        direction,
        slots,
        rows,
    })
}
