//! Division reports for round-robin leagues
//!
//! This crate wraps `division_core` with:
//! - Parsing of free-text match reports into a results matrix
//! - TOML configuration of the schedule, slots and search limits
//! - Text and JSON reports of standings and promotion/demotion outlooks
//!
//! # Usage
//!
//! ```bash
//! # Analyze a report with two demotion places
//! cargo run -p division -- season.txt --demotion-slots 2
//!
//! # Show how each result of one pairing moves the demotion picture
//! cargo run -p division -- season.txt --demotion-slots 2 --matchup "aku chi" recycle_garbage
//! ```

mod config;
mod ingest;
mod report;

pub use config::*;
pub use ingest::*;
pub use report::*;
