//! Search limits for the scenario searches.
//!
//! The outcome space grows combinatorially with the number of unfinished
//! matches, so every search runs against a budget: a cap on scenarios
//! evaluated and an optional wall-clock limit. Running out is an error, never
//! a silently truncated result.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::{DivisionError, Result};

/// Default cap on scenarios evaluated by one search.
pub const DEFAULT_MAX_SCENARIOS: u64 = 1_000_000;

/// Limits that bound a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Maximum scenarios to evaluate (None = no cap)
    pub max_scenarios: Option<u64>,
    /// Maximum wall-clock time (None = infinite)
    pub time_limit: Option<Duration>,
}

impl SearchLimits {
    /// No cap at all. Only sensible for small divisions.
    pub fn unlimited() -> Self {
        Self {
            max_scenarios: None,
            time_limit: None,
        }
    }

    /// Cap on scenarios only.
    pub fn scenarios(max_scenarios: u64) -> Self {
        Self {
            max_scenarios: Some(max_scenarios),
            time_limit: None,
        }
    }

    /// Cap on both scenarios and time.
    pub fn scenarios_and_time(max_scenarios: u64, time_limit: Duration) -> Self {
        Self {
            max_scenarios: Some(max_scenarios),
            time_limit: Some(time_limit),
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::scenarios(DEFAULT_MAX_SCENARIOS)
    }
}

/// Running tally of a search against its limits.
#[derive(Debug)]
pub struct SearchBudget {
    limits: SearchLimits,
    started: Instant,
    explored: u64,
    /// Explored count at which the clock is next read
    next_clock_check: u64,
    /// How often to read the clock (in scenarios)
    check_interval: u64,
}

impl SearchBudget {
    /// Start the clock.
    pub fn start(limits: SearchLimits) -> Self {
        let check_interval = 256;
        Self {
            limits,
            started: Instant::now(),
            explored: 0,
            next_clock_check: check_interval,
            check_interval,
        }
    }

    /// Record `scenarios` more evaluations, failing once a limit is passed.
    pub fn charge(&mut self, scenarios: u64) -> Result<()> {
        self.explored += scenarios;

        if let Some(max) = self.limits.max_scenarios
            && self.explored > max
        {
            return Err(self.exceeded());
        }

        if self.explored >= self.next_clock_check {
            self.next_clock_check = self.explored + self.check_interval;
            if let Some(limit) = self.limits.time_limit
                && self.started.elapsed() >= limit
            {
                return Err(self.exceeded());
            }
        }

        Ok(())
    }

    /// Scenarios evaluated so far.
    pub fn explored(&self) -> u64 {
        self.explored
    }

    /// Time since the search started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn exceeded(&self) -> DivisionError {
        DivisionError::BudgetExceeded {
            explored: self.explored,
            elapsed: self.elapsed(),
        }
    }
}

#[cfg(test)]
#[path = "budget_tests.rs"]
mod budget_tests;
