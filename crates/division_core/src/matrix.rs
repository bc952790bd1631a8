//! Results matrix for a round-robin division.
//!
//! A square table of per-pair win counts. `wins(a, b)` is the number of games
//! `a` has won against `b`; drawn games credit half a win to each side. The
//! games-per-pairing cap travels with the matrix so every snapshot derived
//! from it validates against the same schedule.
//!
//! Matrices are immutable: every write returns a new snapshot sharing the
//! (immutable) roster, so divergent scenarios never alias mutable state.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DivisionError, Result};
use crate::points::HalfPoints;

/// Default number of games scheduled between any two players.
pub const DEFAULT_GAMES_PER_PAIRING: u32 = 6;

/// Largest schedule a division may use. Keeps every half-point total in
/// range.
pub const MAX_GAMES_PER_PAIRING: u32 = 10_000;

/// Win counts between every pair of players in a division.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultsMatrix {
    /// Player names, sorted lexicographically; a player's index is its
    /// position here
    roster: Arc<[String]>,
    /// Games scheduled between any two players
    games_per_pairing: HalfPoints,
    /// Row-major `n * n` table, `cells[a * n + b]` = wins of `a` over `b`
    cells: Vec<HalfPoints>,
}

/// A pairing with games still to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnfinishedMatch {
    /// Index of the first player (always the lower index)
    pub player_a: usize,
    /// Index of the second player
    pub player_b: usize,
    /// Games not yet decided between the two
    pub remaining: HalfPoints,
}

impl UnfinishedMatch {
    /// Both player names, resolved against the matrix the match came from.
    pub fn names<'m>(&self, matrix: &'m ResultsMatrix) -> (&'m str, &'m str) {
        (matrix.player(self.player_a), matrix.player(self.player_b))
    }

    /// Number of distinct half-point splits of the remaining games.
    pub fn outcome_count(&self) -> u32 {
        self.remaining.halves() + 1
    }
}

impl ResultsMatrix {
    /// Create an empty matrix (no games played) over the given players.
    ///
    /// Names are sorted and deduplicated.
    pub fn new<I, S>(players: I, games_per_pairing: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster: Vec<String> = players.into_iter().map(Into::into).collect();
        roster.sort();
        roster.dedup();
        let n = roster.len();
        Self {
            roster: roster.into(),
            games_per_pairing: HalfPoints::from_games(games_per_pairing),
            cells: vec![HalfPoints::ZERO; n * n],
        }
    }

    /// Number of players.
    #[inline]
    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Sorted player names.
    pub fn players(&self) -> &[String] {
        &self.roster
    }

    /// Name of the player at `index`.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn player(&self, index: usize) -> &str {
        &self.roster[index]
    }

    /// Index of a named player.
    pub fn index_of(&self, player: &str) -> Result<usize> {
        self.roster
            .binary_search_by(|p| p.as_str().cmp(player))
            .map_err(|_| DivisionError::UnknownPlayer(player.to_string()))
    }

    pub fn games_per_pairing(&self) -> HalfPoints {
        self.games_per_pairing
    }

    /// Wins of `a` over `b`, by index.
    #[inline]
    pub fn wins(&self, a: usize, b: usize) -> HalfPoints {
        self.cells[a * self.len() + b]
    }

    /// Wins of `a` over `b`, by name.
    pub fn wins_between(&self, a: &str, b: &str) -> Result<HalfPoints> {
        Ok(self.wins(self.index_of(a)?, self.index_of(b)?))
    }

    /// Games already decided between `a` and `b`.
    #[inline]
    pub fn played(&self, a: usize, b: usize) -> HalfPoints {
        self.wins(a, b) + self.wins(b, a)
    }

    /// Games still to be played between `a` and `b` (zero on the diagonal).
    #[inline]
    pub fn remaining(&self, a: usize, b: usize) -> HalfPoints {
        if a == b {
            return HalfPoints::ZERO;
        }
        self.games_per_pairing.saturating_sub(self.played(a, b))
    }

    /// Total wins of a player across the whole division.
    pub fn total_wins(&self, player: usize) -> HalfPoints {
        let n = self.len();
        self.cells[player * n..(player + 1) * n].iter().copied().sum()
    }

    /// Total losses of a player across the whole division.
    pub fn total_losses(&self, player: usize) -> HalfPoints {
        (0..self.len()).map(|other| self.wins(other, player)).sum()
    }

    /// Every pairing with games left, each reported once with
    /// `player_a < player_b`, in roster order.
    pub fn unfinished_matches(&self) -> Vec<UnfinishedMatch> {
        let n = self.len();
        let mut unfinished = Vec::new();
        for a in 0..n {
            for b in (a + 1)..n {
                let remaining = self.remaining(a, b);
                if !remaining.is_zero() {
                    unfinished.push(UnfinishedMatch {
                        player_a: a,
                        player_b: b,
                        remaining,
                    });
                }
            }
        }
        unfinished
    }

    /// Opponents of `player` with games left, and how many, by index.
    pub(crate) fn unfinished_for(&self, player: usize) -> Vec<(usize, HalfPoints)> {
        (0..self.len())
            .filter_map(|other| {
                let remaining = self.remaining(player, other);
                (!remaining.is_zero()).then_some((other, remaining))
            })
            .collect()
    }

    /// Opponents of a named player with games left, keyed by opponent name.
    pub fn player_unfinished(&self, player: &str) -> Result<BTreeMap<String, HalfPoints>> {
        let index = self.index_of(player)?;
        Ok(self
            .unfinished_for(index)
            .into_iter()
            .map(|(other, remaining)| (self.player(other).to_string(), remaining))
            .collect())
    }

    /// True when every pairing has played all its games.
    pub fn is_complete(&self) -> bool {
        self.unfinished_matches().is_empty()
    }

    /// Return a new matrix with `wins_a` added to `a`'s wins over `b` and
    /// `wins_b` added to `b`'s wins over `a`.
    pub fn add_record(
        &self,
        a: &str,
        b: &str,
        wins_a: HalfPoints,
        wins_b: HalfPoints,
    ) -> Result<Self> {
        let (ia, ib) = (self.index_of(a)?, self.index_of(b)?);
        let (new_a, new_b) = (self.wins(ia, ib) + wins_a, self.wins(ib, ia) + wins_b);
        self.write_pair(ia, ib, new_a, new_b, wins_a, wins_b)
    }

    /// Return a new matrix with the `a`/`b` pairing replaced by
    /// `wins_a`–`wins_b`.
    pub fn set_record(
        &self,
        a: &str,
        b: &str,
        wins_a: HalfPoints,
        wins_b: HalfPoints,
    ) -> Result<Self> {
        let (ia, ib) = (self.index_of(a)?, self.index_of(b)?);
        self.write_pair(ia, ib, wins_a, wins_b, wins_a, wins_b)
    }

    /// Validated write of the final values for one pairing. `wins_a`/`wins_b`
    /// are the caller's inputs, kept for the error message.
    fn write_pair(
        &self,
        a: usize,
        b: usize,
        new_a: HalfPoints,
        new_b: HalfPoints,
        wins_a: HalfPoints,
        wins_b: HalfPoints,
    ) -> Result<Self> {
        let invalid = |reason: String| DivisionError::InvalidRecord {
            player_a: self.player(a).to_string(),
            player_b: self.player(b).to_string(),
            wins_a,
            wins_b,
            reason,
        };
        if a == b {
            return Err(invalid("a player cannot play themselves".to_string()));
        }
        if new_a + new_b > self.games_per_pairing {
            return Err(invalid(format!(
                "pairing would total {} games, only {} are scheduled",
                new_a + new_b,
                self.games_per_pairing
            )));
        }
        Ok(self.with_pair(a, b, new_a, new_b))
    }

    /// Unchecked copy-on-write of one pairing. Callers guarantee the cap.
    pub(crate) fn with_pair(
        &self,
        a: usize,
        b: usize,
        wins_a: HalfPoints,
        wins_b: HalfPoints,
    ) -> Self {
        debug_assert!(a != b);
        debug_assert!(wins_a + wins_b <= self.games_per_pairing);
        let n = self.len();
        let mut cells = self.cells.clone();
        cells[a * n + b] = wins_a;
        cells[b * n + a] = wins_b;
        Self {
            roster: Arc::clone(&self.roster),
            games_per_pairing: self.games_per_pairing,
            cells,
        }
    }

    /// The matrix of games among a subset of players only.
    ///
    /// `players` are indices into this matrix and must be in ascending order,
    /// so the sub-roster stays sorted.
    pub fn restrict(&self, players: &[usize]) -> Self {
        debug_assert!(players.windows(2).all(|w| w[0] < w[1]));
        let roster: Vec<String> = players.iter().map(|&p| self.roster[p].clone()).collect();
        let cells = players
            .iter()
            .flat_map(|&a| players.iter().map(move |&b| (a, b)))
            .map(|(a, b)| self.wins(a, b))
            .collect();
        Self {
            roster: roster.into(),
            games_per_pairing: self.games_per_pairing,
            cells,
        }
    }

    /// Row-per-player copy of the table, for reports.
    pub fn to_table(&self) -> MatrixTable {
        let n = self.len();
        MatrixTable {
            players: self.roster.to_vec(),
            games_per_pairing: self.games_per_pairing,
            wins: (0..n)
                .map(|a| (0..n).map(|b| self.wins(a, b)).collect())
                .collect(),
        }
    }
}

/// Plain, serializable form of a [`ResultsMatrix`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixTable {
    pub players: Vec<String>,
    pub games_per_pairing: HalfPoints,
    /// `wins[a][b]` = games `players[a]` won against `players[b]`
    pub wins: Vec<Vec<HalfPoints>>,
}

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod matrix_tests;
