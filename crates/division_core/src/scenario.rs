//! Hypothetical completions of unfinished matches.

use crate::error::{DivisionError, Result};
use crate::matrix::{ResultsMatrix, UnfinishedMatch};
use crate::points::HalfPoints;

/// Every remaining game of `player` is won by `player`.
pub fn player_wins_out(matrix: &ResultsMatrix, player: &str) -> Result<ResultsMatrix> {
    Ok(wins_out(matrix, matrix.index_of(player)?))
}

/// Every remaining game of `player` is lost by `player`.
pub fn player_loses_out(matrix: &ResultsMatrix, player: &str) -> Result<ResultsMatrix> {
    Ok(loses_out(matrix, matrix.index_of(player)?))
}

/// Settle the `a`/`b` pairing: `a` takes `half_wins_a / 2` of the remaining
/// games and `b` the rest.
///
/// `half_wins_a` ranges over `0..=2 * remaining`, so every split in half-point
/// steps (draws included) is reachable.
pub fn resolve_one_match(
    matrix: &ResultsMatrix,
    a: &str,
    b: &str,
    half_wins_a: u32,
) -> Result<ResultsMatrix> {
    let (ia, ib) = (matrix.index_of(a)?, matrix.index_of(b)?);
    let remaining = matrix.remaining(ia, ib);
    if ia == ib || half_wins_a > remaining.halves() {
        return Err(DivisionError::InvalidRecord {
            player_a: a.to_string(),
            player_b: b.to_string(),
            wins_a: HalfPoints::from_halves(half_wins_a),
            wins_b: remaining.saturating_sub(HalfPoints::from_halves(half_wins_a)),
            reason: format!("only {} games remain in this pairing", remaining),
        });
    }
    Ok(resolve(matrix, ia, ib, remaining, half_wins_a))
}

/// Every way an unfinished match can end, from `player_b` sweeping to
/// `player_a` sweeping.
pub fn outcomes<'m>(
    matrix: &'m ResultsMatrix,
    unfinished: &UnfinishedMatch,
) -> impl ExactSizeIterator<Item = ResultsMatrix> + 'm {
    let UnfinishedMatch {
        player_a,
        player_b,
        remaining,
    } = *unfinished;
    (0..remaining.halves() + 1).map(move |half_wins_a| {
        resolve(matrix, player_a, player_b, remaining, half_wins_a)
    })
}

pub(crate) fn wins_out(matrix: &ResultsMatrix, player: usize) -> ResultsMatrix {
    sweep(matrix, player, true)
}

pub(crate) fn loses_out(matrix: &ResultsMatrix, player: usize) -> ResultsMatrix {
    sweep(matrix, player, false)
}

fn sweep(matrix: &ResultsMatrix, player: usize, wins: bool) -> ResultsMatrix {
    let mut scenario = matrix.clone();
    for (other, remaining) in matrix.unfinished_for(player) {
        let (winner, loser) = if wins { (player, other) } else { (other, player) };
        scenario = scenario.with_pair(
            winner,
            loser,
            scenario.wins(winner, loser) + remaining,
            scenario.wins(loser, winner),
        );
    }
    scenario
}

fn resolve(
    matrix: &ResultsMatrix,
    a: usize,
    b: usize,
    remaining: HalfPoints,
    half_wins_a: u32,
) -> ResultsMatrix {
    let extra_a = HalfPoints::from_halves(half_wins_a);
    matrix.with_pair(
        a,
        b,
        matrix.wins(a, b) + extra_a,
        matrix.wins(b, a) + (remaining - extra_a),
    )
}
