use super::*;

fn hp(games: f64) -> HalfPoints {
    HalfPoints::from_f64(games).unwrap()
}

#[test]
fn test_parse_line_with_spaced_names() {
    let report = parse_line(3, "aku chi 3–3 recycle garbage", 6).unwrap().unwrap();
    assert_eq!(report.line, 3);
    assert_eq!(report.player_a, "aku chi");
    assert_eq!(report.player_b, "recycle garbage");
    assert_eq!(report.wins_a, hp(3.0));
    assert_eq!(report.wins_b, hp(3.0));
}

#[test]
fn test_parse_line_half_points() {
    let report = parse_line(1, "nasmith99 3.5–2.5 jonts", 6).unwrap().unwrap();
    assert_eq!(report.wins_a, hp(3.5));
    assert_eq!(report.wins_b, hp(2.5));
}

#[test]
fn test_non_result_lines_are_skipped() {
    for text in [
        "",
        "Season 46 Division A1",
        "Match Summary (current)",
        "Completed matches",
        "jonts 4-2 crabcat2",
    ] {
        assert!(parse_line(1, text, 6).unwrap().is_none(), "{text:?}");
    }
}

#[test]
fn test_malformed_scores_are_rejected() {
    for text in [
        "jonts -1–3 crabcat2",
        "jonts 7–0 crabcat2",
        "jonts 4–3 crabcat2",
        "jonts 2.25–1 crabcat2",
        "jonts 2.3–1 crabcat2",
        "jonts 1..5–1 crabcat2",
        "jonts 1–1 jonts",
    ] {
        assert!(
            matches!(
                parse_line(9, text, 6),
                Err(IngestError::MalformedRecord { line: 9, .. })
            ),
            "{text:?}"
        );
    }
}

#[test]
fn test_parse_report_builds_sorted_matrix() {
    let lines = [
        "Division B",
        "zed 2–0 amy",
        "amy 0.5–0.5 bob",
    ];
    let m = parse_report(lines, 2).unwrap();

    assert_eq!(m.players(), &["amy", "bob", "zed"]);
    assert_eq!(m.wins_between("zed", "amy").unwrap(), hp(2.0));
    assert_eq!(m.wins_between("amy", "zed").unwrap(), HalfPoints::ZERO);
    assert_eq!(m.wins_between("amy", "bob").unwrap(), hp(0.5));
    assert_eq!(m.wins_between("bob", "zed").unwrap(), HalfPoints::ZERO);
    assert_eq!(m.unfinished_matches().len(), 2);
}

#[test]
fn test_repeated_pairing_accumulates() {
    let m = parse_report(["a 1–0 b", "b 1–1 a"], 6).unwrap();
    assert_eq!(m.wins_between("a", "b").unwrap(), hp(2.0));
    assert_eq!(m.wins_between("b", "a").unwrap(), hp(1.0));

    let err = parse_report(["a 3–0 b", "b 2–2 a"], 6).unwrap_err();
    assert!(matches!(err, IngestError::MalformedRecord { line: 2, .. }));
}

#[test]
fn test_fixed_roster() {
    let m = parse_report_with_roster(["a 1–0 b"], ["a", "b", "c"], 2).unwrap();
    assert_eq!(m.players(), &["a", "b", "c"]);
    assert_eq!(m.player_unfinished("c").unwrap().len(), 2);

    let err = parse_report_with_roster(["a 1–0 d"], ["a", "b", "c"], 2).unwrap_err();
    assert!(matches!(
        err,
        IngestError::Division(DivisionError::UnknownPlayer(ref p)) if p == "d"
    ));
}

#[test]
fn test_load_missing_file() {
    let err = load_report(Path::new("/nonexistent/report.txt"), 6).unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
}
