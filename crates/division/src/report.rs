//! Division analysis reports

use std::collections::BTreeSet;
use std::path::Path;

use division_core::{
    Direction, DivisionError, MatchImplications, MatrixTable, Outlook, Possibility,
    ResultsMatrix, Standing, demoting, exhaustive_outlook, possible_outcome, promoting, winloss,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::DivisionConfig;

/// Colors cycled over groups of implication rows that share an outcome.
pub const GROUP_COLORS: [&str; 3] = ["red", "green", "blue"];

/// Complete analysis of one division snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisionReport {
    /// Configuration used
    pub config: DivisionConfig,
    /// Results so far
    pub matrix: MatrixTable,
    /// Current standings, best first
    pub standings: Vec<Standing>,
    /// Promotion that survives losing every remaining game
    pub promoting: BTreeSet<String>,
    /// Demotion that survives winning every remaining game
    pub demoting: BTreeSet<String>,
    /// Players who could still promote
    pub could_promote: Possibility,
    /// Players who could still demote
    pub could_demote: Possibility,
    /// Every-completion outlooks, when requested
    pub outlooks: Vec<Outlook>,
    /// Per-result implications of one pairing, when requested
    pub matchup: Option<MatchImplications>,
}

impl DivisionReport {
    /// Run every analysis on `matrix`.
    pub fn analyze(
        matrix: &ResultsMatrix,
        config: &DivisionConfig,
        exhaustive: bool,
    ) -> Result<Self, DivisionError> {
        let could_promote = possible_outcome(
            matrix,
            Direction::Promotion,
            config.promotion_slots,
            &config.search,
        )?;
        let could_demote = possible_outcome(
            matrix,
            Direction::Demotion,
            config.demotion_slots,
            &config.search,
        )?;
        info!(
            promote = could_promote.players.len(),
            demote = could_demote.players.len(),
            scenarios = could_promote.stats.scenarios + could_demote.stats.scenarios,
            "possibility searches finished"
        );

        let outlooks = if exhaustive {
            vec![
                exhaustive_outlook(
                    matrix,
                    Direction::Promotion,
                    config.promotion_slots,
                    config.search.limits(),
                )?,
                exhaustive_outlook(
                    matrix,
                    Direction::Demotion,
                    config.demotion_slots,
                    config.search.limits(),
                )?,
            ]
        } else {
            Vec::new()
        };

        Ok(Self {
            config: config.clone(),
            matrix: matrix.to_table(),
            standings: winloss(matrix),
            promoting: promoting(matrix, config.promotion_slots),
            demoting: demoting(matrix, config.demotion_slots),
            could_promote,
            could_demote,
            outlooks,
            matchup: None,
        })
    }

    /// Attach a per-match implication table.
    pub fn with_matchup(mut self, matchup: MatchImplications) -> Self {
        self.matchup = Some(matchup);
        self
    }

    /// Save report to JSON file
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write: {}", e))
    }

    /// Load report from JSON file
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read: {}", e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse: {}", e))
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "=== Division: {} players, {} games per pairing ===\n\n",
            self.matrix.players.len(),
            self.config.games_per_pairing
        ));

        report.push_str("Results:\n");
        report.push_str(&matrix_text(&self.matrix));
        report.push('\n');

        report.push_str("Standings:\n");
        report.push_str(&format!(
            "{:>3} {:<20} {:>6} {:>6} {:>7}\n",
            "#", "Player", "W", "L", "Pct"
        ));
        report.push_str(&"-".repeat(46));
        report.push('\n');
        for (place, standing) in self.standings.iter().enumerate() {
            let pct = standing
                .percentage()
                .map(|p| format!("{:.3}", p))
                .unwrap_or_else(|| "-".to_string());
            report.push_str(&format!(
                "{:>3} {:<20} {:>6} {:>6} {:>7}\n",
                place + 1,
                standing.player,
                standing.wins.to_string(),
                standing.losses.to_string(),
                pct
            ));
        }
        report.push('\n');

        report.push_str(&format!(
            "Promoting (top {}):      {}\n",
            self.config.promotion_slots,
            player_list(&self.promoting)
        ));
        report.push_str(&format!(
            "Could promote:           {}\n",
            player_list(&self.could_promote.players)
        ));
        report.push_str(&format!(
            "Demoting (bottom {}):    {}\n",
            self.config.demotion_slots,
            player_list(&self.demoting)
        ));
        report.push_str(&format!(
            "Could demote:            {}\n",
            player_list(&self.could_demote.players)
        ));

        for outlook in &self.outlooks {
            report.push_str(&format!(
                "\nEvery completion ({}, {} slots, {} completions):\n",
                outlook.direction, outlook.slots, outlook.completions
            ));
            report.push_str(&format!("  possible:   {}\n", player_list(&outlook.possible)));
            report.push_str(&format!("  guaranteed: {}\n", player_list(&outlook.guaranteed)));
        }

        if let Some(matchup) = &self.matchup {
            report.push('\n');
            report.push_str(&render_table(matchup));
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

/// One line per implication row: `A 2.0–1.0 B {C, D}`.
pub fn implication_lines(matchup: &MatchImplications) -> Vec<String> {
    matchup
        .rows
        .iter()
        .map(|row| {
            format!(
                "{} {}–{} {} {}",
                matchup.player_a,
                row.wins_a,
                row.wins_b,
                matchup.player_b,
                player_list(&row.players)
            )
        })
        .collect()
}

/// Consecutive implication rows with the same outcome set.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup<'a> {
    pub color: &'static str,
    pub players: &'a BTreeSet<String>,
    /// Indices into the implication rows
    pub rows: Vec<usize>,
}

/// Batch adjacent rows sharing an identical outcome set; groups take colors
/// from [`GROUP_COLORS`] in turn.
pub fn group_rows(matchup: &MatchImplications) -> Vec<RowGroup<'_>> {
    let mut groups: Vec<RowGroup<'_>> = Vec::new();
    for (index, row) in matchup.rows.iter().enumerate() {
        if let Some(group) = groups.last_mut().filter(|g| g.players == &row.players) {
            group.rows.push(index);
            continue;
        }
        let color = GROUP_COLORS[groups.len() % GROUP_COLORS.len()];
        groups.push(RowGroup {
            color,
            players: &row.players,
            rows: vec![index],
        });
    }
    groups
}

/// Table of every result of one pairing, grouped by consequence.
pub fn render_table(matchup: &MatchImplications) -> String {
    let verb = match matchup.direction {
        Direction::Promotion => "could promote",
        Direction::Demotion => "could demote",
    };
    let title = format!("{} vs. {} ({})", matchup.player_a, matchup.player_b, verb);

    let name_a = matchup.player_a.chars().count();
    let name_b = matchup.player_b.chars().count();
    let wins_width = matchup
        .rows
        .iter()
        .flat_map(|r| [r.wins_a.to_string().len(), r.wins_b.to_string().len()])
        .max()
        .unwrap_or(3);

    let mut out = String::new();
    out.push_str(&title);
    out.push('\n');
    for group in group_rows(matchup) {
        out.push_str(&format!("[{}]\n", group.color));
        for &index in &group.rows {
            let row = &matchup.rows[index];
            out.push_str(&format!(
                "  {:<name_a$} {:>wins_width$} {:>wins_width$} {:<name_b$}  {}\n",
                matchup.player_a,
                row.wins_a.to_string(),
                row.wins_b.to_string(),
                matchup.player_b,
                player_list(&row.players),
            ));
        }
    }
    out
}

fn matrix_text(table: &MatrixTable) -> String {
    let width = table
        .players
        .iter()
        .map(|p| p.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    let mut out = format!("{:<width$}", "");
    for player in &table.players {
        out.push_str(&format!(" {:>width$}", player));
    }
    out.push('\n');
    for (player, row) in table.players.iter().zip(&table.wins) {
        out.push_str(&format!("{:<width$}", player));
        for wins in row {
            out.push_str(&format!(" {:>width$}", wins.to_string()));
        }
        out.push('\n');
    }
    out
}

fn player_list(players: &BTreeSet<String>) -> String {
    if players.is_empty() {
        return "{}".to_string();
    }
    let names: Vec<&str> = players.iter().map(String::as_str).collect();
    format!("{{{}}}", names.join(", "))
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
