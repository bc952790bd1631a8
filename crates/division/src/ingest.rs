//! Match-report ingestion
//!
//! Reads free-text match reports with one result per line:
//!
//! ```text
//! nasmith99 3–3 aku chi
//! ```
//!
//! Names may contain spaces; scores are non-negative with at most one
//! decimal place and are separated by an en-dash. Lines that do not look like
//! a result at all (headers, blank lines) are skipped. Lines that do look
//! like one but carry an impossible score are rejected.

use std::path::Path;
use std::sync::LazyLock;

use division_core::{DivisionError, HalfPoints, ResultsMatrix};
use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace};

/// `<A> <winsA>–<winsB> <B>`, with the scores matched loosely so malformed
/// numbers are reported instead of skipped.
static RESULT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<a>\S.*?) (?<wins_a>-?[0-9][0-9.]*)–(?<wins_b>-?[0-9][0-9.]*) (?<b>.*\S)$")
        .expect("result line pattern is valid")
});

/// Strict score shape: digits with at most one decimal.
static SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:\.[0-9])?$").expect("score pattern is valid"));

#[derive(Debug, Error)]
pub enum IngestError {
    /// A result line with out-of-range or unparseable scores.
    #[error("line {line}: malformed record {text:?}: {reason}")]
    MalformedRecord {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Division(#[from] DivisionError),
}

/// One parsed result line.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    /// 1-based line number in the input
    pub line: usize,
    pub player_a: String,
    pub player_b: String,
    pub wins_a: HalfPoints,
    pub wins_b: HalfPoints,
}

/// Parse a single line. `Ok(None)` for lines that are not results.
pub fn parse_line(
    line: usize,
    text: &str,
    games_per_pairing: u32,
) -> Result<Option<MatchReport>, IngestError> {
    let text = text.trim();
    let Some(caps) = RESULT_LINE.captures(text) else {
        if !text.is_empty() {
            trace!(line, text, "skipping non-result line");
        }
        return Ok(None);
    };

    let malformed = |reason: String| IngestError::MalformedRecord {
        line,
        text: text.to_string(),
        reason,
    };

    let score = |raw: &str| -> Result<HalfPoints, IngestError> {
        if !SCORE.is_match(raw) {
            return Err(malformed(format!(
                "score {:?} is not a non-negative number with at most one decimal",
                raw
            )));
        }
        let games: f64 = raw
            .parse()
            .map_err(|e| malformed(format!("score {:?}: {}", raw, e)))?;
        let points = HalfPoints::from_f64(games)
            .ok_or_else(|| malformed(format!("score {} is not a multiple of 0.5", raw)))?;
        if points > HalfPoints::from_games(games_per_pairing) {
            return Err(malformed(format!(
                "score {} exceeds {} games per pairing",
                raw, games_per_pairing
            )));
        }
        Ok(points)
    };

    let report = MatchReport {
        line,
        player_a: caps["a"].to_string(),
        player_b: caps["b"].to_string(),
        wins_a: score(&caps["wins_a"])?,
        wins_b: score(&caps["wins_b"])?,
    };

    if report.player_a == report.player_b {
        return Err(malformed("a player cannot play themselves".to_string()));
    }
    if report.wins_a + report.wins_b > HalfPoints::from_games(games_per_pairing) {
        return Err(malformed(format!(
            "{} games reported, only {} scheduled",
            report.wins_a + report.wins_b,
            games_per_pairing
        )));
    }

    Ok(Some(report))
}

/// Parse every result line; the roster is every player named.
pub fn parse_report<I, S>(lines: I, games_per_pairing: u32) -> Result<ResultsMatrix, IngestError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let reports = parse_lines(lines, games_per_pairing)?;
    let players = reports
        .iter()
        .flat_map(|r| [r.player_a.clone(), r.player_b.clone()]);
    let matrix = ResultsMatrix::new(players, games_per_pairing);
    apply(matrix, &reports)
}

/// Parse every result line against a fixed roster. Players with no results
/// still appear; a line naming anyone else fails with `UnknownPlayer`.
pub fn parse_report_with_roster<I, S, P, Q>(
    lines: I,
    roster: P,
    games_per_pairing: u32,
) -> Result<ResultsMatrix, IngestError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: IntoIterator<Item = Q>,
    Q: Into<String>,
{
    let reports = parse_lines(lines, games_per_pairing)?;
    apply(ResultsMatrix::new(roster, games_per_pairing), &reports)
}

/// Read and parse a report file.
pub fn load_report(path: &Path, games_per_pairing: u32) -> Result<ResultsMatrix, IngestError> {
    let contents = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_report(contents.lines(), games_per_pairing)
}

fn parse_lines<I, S>(lines: I, games_per_pairing: u32) -> Result<Vec<MatchReport>, IngestError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut reports = Vec::new();
    for (index, text) in lines.into_iter().enumerate() {
        if let Some(report) = parse_line(index + 1, text.as_ref(), games_per_pairing)? {
            reports.push(report);
        }
    }
    Ok(reports)
}

/// Accumulate reports into the matrix. A pairing reported more than once
/// adds up, and must still fit the schedule.
fn apply(mut matrix: ResultsMatrix, reports: &[MatchReport]) -> Result<ResultsMatrix, IngestError> {
    for report in reports {
        matrix = matrix
            .add_record(
                &report.player_a,
                &report.player_b,
                report.wins_a,
                report.wins_b,
            )
            .map_err(|err| match err {
                DivisionError::InvalidRecord { reason, .. } => IngestError::MalformedRecord {
                    line: report.line,
                    text: format!(
                        "{} {}–{} {}",
                        report.player_a, report.wins_a, report.wins_b, report.player_b
                    ),
                    reason,
                },
                other => IngestError::Division(other),
            })?;
    }
    debug!(
        players = matrix.len(),
        results = reports.len(),
        unfinished = matrix.unfinished_matches().len(),
        "ingested match report"
    );
    Ok(matrix)
}

#[cfg(test)]
#[path = "ingest_tests.rs"]
mod ingest_tests;
