//! Error types for division analysis

use std::time::Duration;
use thiserror::Error;

use crate::points::HalfPoints;

/// Structural errors raised while building or exploring results matrices.
///
/// A player with no games played is not an error; see
/// [`Standing::percentage`](crate::Standing::percentage).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DivisionError {
    /// A result write would leave a pairing above the games-per-pairing cap,
    /// or names a player against themselves.
    #[error("invalid record {player_a} {wins_a}–{wins_b} {player_b}: {reason}")]
    InvalidRecord {
        player_a: String,
        player_b: String,
        wins_a: HalfPoints,
        wins_b: HalfPoints,
        reason: String,
    },

    /// A player that is not part of the matrix roster.
    #[error("unknown player: {0:?}")]
    UnknownPlayer(String),

    /// The scenario search hit its scenario cap or deadline before finishing.
    #[error("search budget exceeded after {explored} scenarios ({elapsed:?})")]
    BudgetExceeded { explored: u64, elapsed: Duration },
}

pub type Result<T, E = DivisionError> = std::result::Result<T, E>;
