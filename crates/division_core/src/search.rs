//! Possible promotion and demotion: frontier search over scenarios.
//!
//! Starting from the real results, the search repeatedly settles one more
//! unfinished match to every half-point split until the schedule is complete.
//! The answer is the set of players the real results already confirm (see
//! [`crate::guarantee`]) plus everyone who finishes in the slots of some
//! complete scenario.
//!
//! Pruning: a scenario is not branched when nobody who could still reach the
//! slots from it is missing from the answer. Reachability is bounded by final
//! wins; in a complete division everyone has played the same number of
//! games, so a player whose best total is below another's worst total
//! finishes behind them. When branching, each candidate match's outcomes are
//! evaluated first and the first match whose outcomes confirm different sets
//! of players is branched on. A match whose outcomes all confirm the same
//! players is passed over, and if every match is passed over the first one
//! is branched on anyway. Pruning never changes the answer.

use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::budget::{DEFAULT_MAX_SCENARIOS, SearchBudget, SearchLimits};
use crate::error::Result;
use crate::guarantee::{Direction, confirmed, finishers, names};
use crate::matrix::{ResultsMatrix, UnfinishedMatch};
use crate::points::HalfPoints;
use crate::scenario::outcomes;

/// Search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Cut scenarios that cannot add a player, and branch on matches that
    /// move the confirmed set first
    pub prune: bool,
    /// Maximum scenarios to evaluate (None = no cap)
    pub max_scenarios: Option<u64>,
    /// Wall-clock limit in milliseconds (None = no limit)
    pub time_limit_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            prune: true,
            max_scenarios: Some(DEFAULT_MAX_SCENARIOS),
            time_limit_ms: None,
        }
    }
}

impl SearchConfig {
    /// Unpruned search with no limits. Exponential; for small divisions and
    /// cross-checks only.
    pub fn brute_force() -> Self {
        Self {
            prune: false,
            max_scenarios: None,
            time_limit_ms: None,
        }
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_scenarios: self.max_scenarios,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
        }
    }
}

/// Statistics from a finished search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Scenarios generated, including outcomes weighed while choosing a match
    pub scenarios: u64,
    /// Scenarios not branched because nobody new could reach the slots
    pub pruned: u64,
    /// Candidate matches passed over because every outcome confirmed the
    /// same players
    pub passed_over: u64,
    /// Scenarios skipped because an identical one was already queued
    pub duplicates: u64,
    pub elapsed: Duration,
}

/// Result of a possibility search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Possibility {
    pub direction: Direction,
    pub slots: usize,
    /// Players confirmed now or finishing in the slots of some completion
    pub players: BTreeSet<String>,
    pub stats: SearchStats,
}

/// Players who could still finish in the top `slots`.
pub fn could_promote(
    matrix: &ResultsMatrix,
    slots: usize,
    config: &SearchConfig,
) -> Result<BTreeSet<String>> {
    Ok(possible_outcome(matrix, Direction::Promotion, slots, config)?.players)
}

/// Players who could still finish in the bottom `slots`.
pub fn could_demote(
    matrix: &ResultsMatrix,
    slots: usize,
    config: &SearchConfig,
) -> Result<BTreeSet<String>> {
    Ok(possible_outcome(matrix, Direction::Demotion, slots, config)?.players)
}

/// Run the possibility search with a fresh budget built from `config`.
pub fn possible_outcome(
    matrix: &ResultsMatrix,
    direction: Direction,
    slots: usize,
    config: &SearchConfig,
) -> Result<Possibility> {
    let mut budget = SearchBudget::start(config.limits());
    possible_outcome_with_budget(matrix, direction, slots, config.prune, &mut budget)
}

/// Run the possibility search, charging every evaluated scenario to `budget`.
///
/// The budget may be shared across several searches (e.g. one per row of an
/// implication table).
pub fn possible_outcome_with_budget(
    matrix: &ResultsMatrix,
    direction: Direction,
    slots: usize,
    prune: bool,
    budget: &mut SearchBudget,
) -> Result<Possibility> {
    let started_at = budget.elapsed();
    let started_with = budget.explored();
    let mut stats = SearchStats::default();

    budget.charge(1)?;
    let mut found = confirmed(matrix, direction, slots);

    let mut seen: HashSet<ResultsMatrix> = HashSet::new();
    seen.insert(matrix.clone());
    let mut stack = vec![matrix.clone()];

    while let Some(scenario) = stack.pop() {
        let open = scenario.unfinished_matches();
        if open.is_empty() {
            found.extend(finishers(&scenario, direction, slots));
            continue;
        }

        if prune && contenders(&scenario, direction, slots).is_subset(&found) {
            stats.pruned += 1;
            continue;
        }

        let children = if prune {
            branch_pruned(&scenario, &open, direction, slots, budget, &mut stats)?
        } else {
            let children: Vec<ResultsMatrix> = outcomes(&scenario, &open[0]).collect();
            budget.charge(children.len() as u64)?;
            children
        };

        for child in children {
            if seen.insert(child.clone()) {
                stack.push(child);
            } else {
                stats.duplicates += 1;
            }
        }
    }

    stats.scenarios = budget.explored() - started_with;
    stats.elapsed = budget.elapsed().saturating_sub(started_at);
    debug!(
        %direction,
        slots,
        found = found.len(),
        scenarios = stats.scenarios,
        pruned = stats.pruned,
        passed_over = stats.passed_over,
        duplicates = stats.duplicates,
        "possibility search finished"
    );

    Ok(Possibility {
        direction,
        slots,
        players: names(matrix, &found),
        stats,
    })
}

/// Children of the first match in `open` whose outcomes disagree on who is
/// confirmed, falling back to the first match.
fn branch_pruned(
    scenario: &ResultsMatrix,
    open: &[UnfinishedMatch],
    direction: Direction,
    slots: usize,
    budget: &mut SearchBudget,
    stats: &mut SearchStats,
) -> Result<Vec<ResultsMatrix>> {
    let mut fallback: Option<Vec<Child>> = None;
    for unfinished in open {
        let children = expand(scenario, unfinished, direction, slots);
        budget.charge(children.len() as u64)?;

        let first = &children[0].confirmed;
        if children.iter().any(|c| &c.confirmed != first) {
            return Ok(children.into_iter().map(|c| c.matrix).collect());
        }

        let (a, b) = unfinished.names(scenario);
        trace!(a, b, confirmed = first.len(), "outcome cannot change confirmed set");
        stats.passed_over += 1;
        fallback.get_or_insert(children);
    }
    Ok(fallback
        .unwrap_or_default()
        .into_iter()
        .map(|c| c.matrix)
        .collect())
}

/// Players who could still finish in the slots under some completion of
/// `matrix`: fewer than `slots` others are sure to end strictly ahead.
fn contenders(matrix: &ResultsMatrix, direction: Direction, slots: usize) -> BTreeSet<usize> {
    let n = matrix.len();
    let least: Vec<HalfPoints> = (0..n).map(|p| matrix.total_wins(p)).collect();
    let most: Vec<HalfPoints> = (0..n)
        .map(|p| {
            let open: HalfPoints = matrix.unfinished_for(p).into_iter().map(|(_, r)| r).sum();
            least[p] + open
        })
        .collect();

    (0..n)
        .filter(|&p| {
            let ahead = (0..n)
                .filter(|&q| {
                    q != p
                        && match direction {
                            Direction::Promotion => least[q] > most[p],
                            Direction::Demotion => most[q] < least[p],
                        }
                })
                .count();
            ahead < slots
        })
        .collect()
}

/// A settled scenario together with the players it confirms.
struct Child {
    matrix: ResultsMatrix,
    confirmed: BTreeSet<usize>,
}

/// Every child scenario of one unfinished match, with confirmed sets
/// evaluated in parallel.
fn expand(
    matrix: &ResultsMatrix,
    unfinished: &UnfinishedMatch,
    direction: Direction,
    slots: usize,
) -> Vec<Child> {
    outcomes(matrix, unfinished)
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|child| Child {
            confirmed: confirmed(&child, direction, slots),
            matrix: child,
        })
        .collect()
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
