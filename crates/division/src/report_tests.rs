use super::*;
use division_core::{HalfPoints, ImplicationRow, SearchConfig, match_implications};

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

fn sample_matchup() -> MatchImplications {
    let row = |a: f64, b: f64, players: &[&str]| ImplicationRow {
        wins_a: hp(a),
        wins_b: hp(b),
        players: set(players),
    };
    MatchImplications {
        player_a: "aku chi".to_string(),
        player_b: "tracer".to_string(),
        direction: Direction::Demotion,
        slots: 2,
        rows: vec![
            row(0.0, 1.0, &["aku chi", "tracer"]),
            row(0.5, 0.5, &["aku chi", "tracer"]),
            row(1.0, 0.0, &["tracer"]),
        ],
    }
}

#[test]
fn test_group_rows_batches_identical_sets() {
    let matchup = sample_matchup();
    let groups = group_rows(&matchup);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].rows, vec![0, 1]);
    assert_eq!(groups[0].color, "red");
    assert_eq!(groups[1].rows, vec![2]);
    assert_eq!(groups[1].color, "green");
    assert_eq!(groups[1].players, &set(&["tracer"]));
}

#[test]
fn test_group_colors_cycle() {
    let mut matchup = sample_matchup();
    matchup.rows = (0..5)
        .map(|i| ImplicationRow {
            wins_a: HalfPoints::from_halves(i),
            wins_b: HalfPoints::ZERO,
            players: set(if i % 2 == 0 { &["a"] } else { &["b"] }),
        })
        .collect();
    let colors: Vec<&str> = group_rows(&matchup).iter().map(|g| g.color).collect();
    assert_eq!(colors, vec!["red", "green", "blue", "red", "green"]);
}

#[test]
fn test_implication_lines() {
    let lines = implication_lines(&sample_matchup());
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "aku chi 0.0–1.0 tracer {aku chi, tracer}");
    assert_eq!(lines[2], "aku chi 1.0–0.0 tracer {tracer}");
}

#[test]
fn test_render_table() {
    let table = render_table(&sample_matchup());
    assert!(table.starts_with("aku chi vs. tracer (could demote)\n"));
    assert!(table.contains("[red]\n"));
    assert!(table.contains("[green]\n"));
    assert!(!table.contains("[blue]"));
    assert_eq!(table.lines().count(), 1 + 2 + 3);
}

#[test]
fn test_analyze_and_report() {
    let config = DivisionConfig {
        games_per_pairing: 2,
        ..DivisionConfig::default()
    };
    let m = xyz();
    let matchup =
        match_implications(&m, "X", "Z", Direction::Promotion, 1, &SearchConfig::default())
            .unwrap();
    let report = DivisionReport::analyze(&m, &config, true)
        .unwrap()
        .with_matchup(matchup);

    assert_eq!(report.standings[0].player, "X");
    assert!(report.promoting.is_empty());
    assert_eq!(report.could_promote.players, set(&["X", "Z"]));
    assert_eq!(report.could_demote.players, set(&["Y", "Z"]));
    assert_eq!(report.outlooks.len(), 2);
    assert_eq!(report.outlooks[0].possible, report.could_promote.players);

    let text = report.generate_report();
    assert!(text.contains("=== Division: 3 players, 2 games per pairing ==="));
    assert!(text.contains("Could promote:           {X, Z}"));
    assert!(text.contains("X vs. Z (could promote)"));
    // Z has not played yet
    assert!(text.lines().any(|l| l.contains(" Z ") && l.trim_end().ends_with('-')));
}

#[test]
fn test_save_and_load() {
    let config = DivisionConfig {
        games_per_pairing: 2,
        ..DivisionConfig::default()
    };
    let report = DivisionReport::analyze(&xyz(), &config, false).unwrap();
    let path = std::env::temp_dir().join(format!("division_report_{}.json", std::process::id()));

    report.save(&path).unwrap();
    let loaded = DivisionReport::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.standings, report.standings);
    assert_eq!(loaded.could_promote, report.could_promote);
    assert_eq!(loaded.matrix, report.matrix);
    assert_eq!(loaded.config, report.config);
}

#[test]
fn test_matrix_text() {
    let text = matrix_text(&xyz().to_table());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "        X    Y    Z",
            "X     0.0  2.0  0.0",
            "Y     0.0  0.0  0.0",
            "Z     0.0  0.0  0.0",
        ]
    );
}
