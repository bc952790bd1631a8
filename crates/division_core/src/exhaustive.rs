//! Every-completion analysis.
//!
//! Plays out every admissible completion of the remaining schedule and reads
//! the final standings of each. A player is *possible* if they finish in the
//! slots in at least one completion and *guaranteed* if they do in all of
//! them. Exponential in the number of unfinished matches; always run under a
//! budget.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::budget::{SearchBudget, SearchLimits};
use crate::error::Result;
use crate::guarantee::{Direction, finishers, names};
use crate::matrix::{ResultsMatrix, UnfinishedMatch};
use crate::scenario::outcomes;

/// Final-standings outlook over every completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlook {
    pub direction: Direction,
    pub slots: usize,
    /// Players in the slots in at least one completion
    pub possible: BTreeSet<String>,
    /// Players in the slots in every completion
    pub guaranteed: BTreeSet<String>,
    /// Number of completions examined
    pub completions: u64,
}

/// Enumerate every completion of `matrix`.
pub fn exhaustive_outlook(
    matrix: &ResultsMatrix,
    direction: Direction,
    slots: usize,
    limits: SearchLimits,
) -> Result<Outlook> {
    let mut budget = SearchBudget::start(limits);
    let open = matrix.unfinished_matches();
    let mut tally = Tally {
        direction,
        slots,
        possible: BTreeSet::new(),
        guaranteed: None,
        completions: 0,
    };

    tally.walk(matrix, &open, &mut budget)?;

    debug!(
        %direction,
        slots,
        completions = tally.completions,
        unfinished = open.len(),
        "exhaustive enumeration finished"
    );

    Ok(Outlook {
        direction,
        slots,
        possible: names(matrix, &tally.possible),
        guaranteed: names(matrix, &tally.guaranteed.unwrap_or_default()),
        completions: tally.completions,
    })
}

struct Tally {
    direction: Direction,
    slots: usize,
    possible: BTreeSet<usize>,
    /// None until the first completion is seen
    guaranteed: Option<BTreeSet<usize>>,
    completions: u64,
}

impl Tally {
    /// Settle `open[0]` every possible way and recurse on the rest. Settling
    /// one match never changes what is left in another, so `open` is
    /// computed once at the root.
    fn walk(
        &mut self,
        matrix: &ResultsMatrix,
        open: &[UnfinishedMatch],
        budget: &mut SearchBudget,
    ) -> Result<()> {
        let Some((next, rest)) = open.split_first() else {
            budget.charge(1)?;
            self.record(finishers(matrix, self.direction, self.slots));
            return Ok(());
        };

        for child in outcomes(matrix, next) {
            self.walk(&child, rest, budget)?;
        }
        Ok(())
    }

    fn record(&mut self, players: BTreeSet<usize>) {
        self.completions += 1;
        self.guaranteed = Some(match self.guaranteed.take() {
            Some(so_far) => so_far.intersection(&players).copied().collect(),
            None => players.clone(),
        });
        self.possible.extend(players);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DivisionError;
    use crate::points::HalfPoints;

    fn hp(games: f64) -> HalfPoints {
        HalfPoints::from_f64(games).unwrap()
    }

    fn set(players: &[&str]) -> BTreeSet<String> {
        players.iter().map(|p| p.to_string()).collect()
    }

    fn xyz() -> ResultsMatrix {
        ResultsMatrix::new(["X", "Y", "Z"], 2)
            .add_record("X", "Y", hp(2.0), hp(0.0))
            .unwrap()
    }

    #[test]
    fn test_every_completion_counted() {
        let outlook =
            exhaustive_outlook(&xyz(), Direction::Promotion, 1, SearchLimits::unlimited()).unwrap();
        // Two open pairings of two games each: 5 * 5 splits
        assert_eq!(outlook.completions, 25);
        assert_eq!(outlook.possible, set(&["X", "Z"]));
        assert!(outlook.guaranteed.is_empty());
    }

    #[test]
    fn test_demotion_outlook() {
        let outlook =
            exhaustive_outlook(&xyz(), Direction::Demotion, 1, SearchLimits::unlimited()).unwrap();
        assert_eq!(outlook.possible, set(&["Y", "Z"]));
        assert!(outlook.guaranteed.is_empty());
    }

    #[test]
    fn test_decided_leader_is_guaranteed() {
        // A cannot be caught: 4-0 with B and C on at most 2 wins each
        let m = ResultsMatrix::new(["A", "B", "C"], 2)
            .add_record("A", "B", hp(2.0), hp(0.0))
            .unwrap()
            .add_record("A", "C", hp(2.0), hp(0.0))
            .unwrap();
        let outlook =
            exhaustive_outlook(&m, Direction::Promotion, 1, SearchLimits::unlimited()).unwrap();
        assert_eq!(outlook.completions, 5);
        assert_eq!(outlook.guaranteed, set(&["A"]));
        assert_eq!(outlook.possible, set(&["A"]));
    }

    #[test]
    fn test_complete_division_has_one_completion() {
        let m = ResultsMatrix::new(["A", "B"], 1)
            .add_record("A", "B", hp(0.5), hp(0.5))
            .unwrap();
        let outlook =
            exhaustive_outlook(&m, Direction::Demotion, 1, SearchLimits::unlimited()).unwrap();
        assert_eq!(outlook.completions, 1);
        // Full tie keeps roster order, so B is last
        assert_eq!(outlook.guaranteed, set(&["B"]));
    }

    #[test]
    fn test_budget() {
        assert!(matches!(
            exhaustive_outlook(&xyz(), Direction::Promotion, 1, SearchLimits::scenarios(10)),
            Err(DivisionError::BudgetExceeded { .. })
        ));
    }
}
