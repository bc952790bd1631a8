//! Standings with recursive head-to-head tiebreaks.
//!
//! Players are ordered by, descending:
//! 1. win percentage (players with no games played sort below everyone else)
//! 2. total wins
//! 3. fewer losses
//! 4. head-to-head score: players sharing a win percentage are re-ranked on
//!    the sub-matrix of their mutual games, and each one's wins in that
//!    sub-ranking is its score
//!
//! Remaining ties keep roster order, so the order is total and deterministic.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::matrix::ResultsMatrix;
use crate::points::HalfPoints;

/// One row of the standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: String,
    pub wins: HalfPoints,
    pub losses: HalfPoints,
}

impl Standing {
    pub fn games(&self) -> HalfPoints {
        self.wins + self.losses
    }

    /// Fraction of games won, or `None` if no games have been played.
    pub fn percentage(&self) -> Option<f64> {
        Record::new(self.wins, self.losses).percentage()
    }
}

/// Win/loss totals used for comparisons, in half-points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Record {
    wins: u64,
    losses: u64,
}

impl Record {
    fn new(wins: HalfPoints, losses: HalfPoints) -> Self {
        Self {
            wins: wins.halves() as u64,
            losses: losses.halves() as u64,
        }
    }

    fn games(&self) -> u64 {
        self.wins + self.losses
    }

    fn percentage(&self) -> Option<f64> {
        let games = self.games();
        (games > 0).then(|| self.wins as f64 / games as f64)
    }

    /// Exact percentage comparison by cross-multiplication. An undefined
    /// percentage compares below every defined one and equal to another
    /// undefined one.
    fn cmp_percentage(&self, other: &Record) -> Ordering {
        match (self.games(), other.games()) {
            (0, 0) => Ordering::Equal,
            (0, _) => Ordering::Less,
            (_, 0) => Ordering::Greater,
            (g1, g2) => (self.wins * g2).cmp(&(other.wins * g1)),
        }
    }
}

/// Standings for every player in the matrix, best first.
pub fn winloss(matrix: &ResultsMatrix) -> Vec<Standing> {
    rank(matrix)
        .into_iter()
        .map(|p| Standing {
            player: matrix.player(p).to_string(),
            wins: matrix.total_wins(p),
            losses: matrix.total_losses(p),
        })
        .collect()
}

/// Player indices in standings order, best first.
pub fn rank(matrix: &ResultsMatrix) -> Vec<usize> {
    let n = matrix.len();
    let records: Vec<Record> = (0..n)
        .map(|p| Record::new(matrix.total_wins(p), matrix.total_losses(p)))
        .collect();
    let tiebreak = head_to_head(matrix, &records);

    // Greater = ranks higher
    let compare = |a: usize, b: usize| {
        records[a]
            .cmp_percentage(&records[b])
            .then(records[a].wins.cmp(&records[b].wins))
            .then(records[b].losses.cmp(&records[a].losses))
            .then(tiebreak[a].cmp(&tiebreak[b]))
    };

    let mut order: Vec<usize> = (0..n).collect();
    // Stable: full ties keep roster order
    order.sort_by(|&a, &b| compare(b, a));
    order
}

/// Head-to-head score for every player, in half-points.
///
/// Players are grouped by identical win percentage. A group with more than
/// one member, but smaller than the whole field, is ranked on its own
/// sub-matrix and each member scores its wins there. Everyone else scores
/// their own total wins, which leaves their order unchanged. Equal scores
/// fall back to roster order. Each recursive call sees strictly fewer
/// players, so the recursion bottoms out.
fn head_to_head(matrix: &ResultsMatrix, records: &[Record]) -> Vec<u64> {
    let n = matrix.len();
    let mut tiebreak: Vec<u64> = records.iter().map(|r| r.wins).collect();

    for group in percentage_groups(records) {
        if group.len() < 2 || group.len() == n {
            continue;
        }
        let sub = matrix.restrict(&group);
        for standing in rank(&sub) {
            tiebreak[group[standing]] = sub.total_wins(standing).halves() as u64;
        }
    }

    tiebreak
}

/// Player indices grouped by equal win percentage. Each group is in
/// ascending index order.
fn percentage_groups(records: &[Record]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (player, record) in records.iter().enumerate() {
        match groups
            .iter_mut()
            .find(|g| records[g[0]].cmp_percentage(record) == Ordering::Equal)
        {
            Some(group) => group.push(player),
            None => groups.push(vec![player]),
        }
    }
    groups
}

#[cfg(test)]
#[path = "ranking_tests.rs"]
mod ranking_tests;
