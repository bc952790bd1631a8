//! Promotion and demotion analysis for round-robin divisions
//!
//! Given the results so far in a division where every pair of players meets
//! a fixed number of times, this crate answers, per player:
//! - is promotion (or demotion) already locked in?
//! - is it still possible under some way the unfinished matches could end?
//!
//! # Usage
//!
//! ```
//! use division_core::{HalfPoints, ResultsMatrix, SearchConfig, could_promote, winloss};
//!
//! let matrix = ResultsMatrix::new(["X", "Y", "Z"], 2)
//!     .add_record("X", "Y", HalfPoints::from_games(2), HalfPoints::ZERO)
//!     .unwrap();
//!
//! assert_eq!(winloss(&matrix)[0].player, "X");
//! let contenders = could_promote(&matrix, 1, &SearchConfig::default()).unwrap();
//! assert!(contenders.contains("X"));
//! ```

pub mod budget;
pub mod error;
pub mod exhaustive;
pub mod guarantee;
pub mod implications;
pub mod matrix;
pub mod points;
pub mod ranking;
pub mod scenario;
pub mod search;

pub use budget::*;
pub use error::{DivisionError, Result};
pub use exhaustive::*;
pub use guarantee::{Direction, demoting, promoting};
pub use implications::*;
pub use matrix::*;
pub use points::HalfPoints;
pub use ranking::{Standing, rank, winloss};
pub use scenario::{outcomes, player_loses_out, player_wins_out, resolve_one_match};
pub use search::*;
