//! Division analysis configuration
//!
//! ```toml
//! games_per_pairing = 6
//! promotion_slots = 1
//! demotion_slots = 2
//!
//! [search]
//! prune = true
//! max_scenarios = 1000000
//! time_limit_ms = 30000
//! ```

use std::path::Path;

use division_core::{DEFAULT_GAMES_PER_PAIRING, MAX_GAMES_PER_PAIRING, SearchConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DivisionConfig {
    /// Games scheduled between every pair of players
    pub games_per_pairing: u32,
    /// Places at the top of the table that promote
    pub promotion_slots: usize,
    /// Places at the bottom of the table that demote
    pub demotion_slots: usize,
    /// Limits for the possibility searches
    pub search: SearchConfig,
}

impl Default for DivisionConfig {
    fn default() -> Self {
        Self {
            games_per_pairing: DEFAULT_GAMES_PER_PAIRING,
            promotion_slots: 1,
            demotion_slots: 1,
            search: SearchConfig::default(),
        }
    }
}

impl DivisionConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(contents).map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the schedule is one a division can hold.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_GAMES_PER_PAIRING).contains(&self.games_per_pairing) {
            return Err(format!(
                "games_per_pairing must be between 1 and {}, got {}",
                MAX_GAMES_PER_PAIRING, self.games_per_pairing
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DivisionConfig::default();
        assert_eq!(config.games_per_pairing, 6);
        assert_eq!(config.promotion_slots, 1);
        assert!(config.search.prune);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DivisionConfig::from_toml(
            r#"
            demotion_slots = 2

            [search]
            time_limit_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.demotion_slots, 2);
        assert_eq!(config.games_per_pairing, 6);
        assert_eq!(config.search.time_limit_ms, Some(500));
        assert!(config.search.prune);
        assert_eq!(
            config.search.max_scenarios,
            SearchConfig::default().max_scenarios
        );
    }

    #[test]
    fn test_rejects_zero_games() {
        assert!(DivisionConfig::from_toml("games_per_pairing = 0").is_err());
        assert!(DivisionConfig::from_toml("games_per_pairing = \"six\"").is_err());
    }

    #[test]
    fn test_rejects_oversized_schedule() {
        assert!(DivisionConfig::from_toml("games_per_pairing = 4000000000").is_err());

        let config = DivisionConfig {
            games_per_pairing: MAX_GAMES_PER_PAIRING + 1,
            ..DivisionConfig::default()
        };
        assert!(config.validate().is_err());
        let config = DivisionConfig {
            games_per_pairing: MAX_GAMES_PER_PAIRING,
            ..DivisionConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
