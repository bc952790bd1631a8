//! Property tests for the ranking and search invariants

use std::collections::BTreeSet;

use division_core::{
    Direction, DivisionError, HalfPoints, ResultsMatrix, SearchConfig, SearchLimits, demoting,
    exhaustive_outlook, possible_outcome, promoting, rank, winloss,
};
use proptest::prelude::*;

const NAMES: [&str; 5] = ["ann", "bob", "cy", "dee", "eve"];

/// Build a division from per-pair results, listed for `a < b` in roster order
/// as `(halves won by a, halves won by b)`.
fn build(n: usize, games: u32, results: &[(u32, u32)]) -> ResultsMatrix {
    let mut m = ResultsMatrix::new(NAMES[..n].iter().copied(), games);
    let mut pairs = results.iter();
    for a in 0..n {
        for b in (a + 1)..n {
            let &(wins_a, wins_b) = pairs.next().unwrap();
            m = m
                .add_record(
                    NAMES[a],
                    NAMES[b],
                    HalfPoints::from_halves(wins_a),
                    HalfPoints::from_halves(wins_b),
                )
                .unwrap();
        }
    }
    m
}

/// A division of 3-5 players where at most `max_open` pairings are unfinished.
fn division(max_open: usize) -> impl Strategy<Value = ResultsMatrix> {
    (3usize..=5, 1u32..=2)
        .prop_flat_map(move |(n, games)| {
            let pairs = n * (n - 1) / 2;
            let full = 2 * games;
            (
                Just(n),
                Just(games),
                prop::collection::vec(0..=full, pairs),
                prop::collection::vec((0..pairs, 1..=full), 0..=max_open),
            )
        })
        .prop_map(|(n, games, splits, reopen)| {
            let full = 2 * games;
            let mut results: Vec<(u32, u32)> = splits.iter().map(|&s| (s, full - s)).collect();
            for (pair, cut) in reopen {
                let total = full - cut;
                let wins_a = results[pair].0.min(total);
                results[pair] = (wins_a, total - wins_a);
            }
            build(n, games, &results)
        })
}

fn confirmed(m: &ResultsMatrix, direction: Direction, slots: usize) -> BTreeSet<String> {
    match direction {
        Direction::Promotion => promoting(m, slots),
        Direction::Demotion => demoting(m, slots),
    }
}

fn search(m: &ResultsMatrix, direction: Direction, slots: usize, prune: bool) -> BTreeSet<String> {
    let config = SearchConfig {
        prune,
        ..SearchConfig::brute_force()
    };
    possible_outcome(m, direction, slots, &config)
        .unwrap()
        .players
}

fn directions() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Promotion), Just(Direction::Demotion)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_pairings_never_exceed_schedule(m in division(3)) {
        let n = m.len();
        for a in 0..n {
            prop_assert_eq!(m.wins(a, a), HalfPoints::ZERO);
            for b in 0..n {
                prop_assert!(m.played(a, b) <= m.games_per_pairing());
            }
        }
    }

    #[test]
    fn prop_add_record_rejects_overflow(
        m in division(3),
        a in 0usize..3,
        b in 0usize..3,
        wins_a in 0u32..=4,
        wins_b in 0u32..=4,
    ) {
        let (pa, pb) = (m.player(a).to_string(), m.player(b).to_string());
        let result = m.add_record(
            &pa,
            &pb,
            HalfPoints::from_halves(wins_a),
            HalfPoints::from_halves(wins_b),
        );
        let fits = a != b && wins_a + wins_b <= m.remaining(a, b).halves();
        match result {
            Ok(next) => {
                prop_assert!(fits);
                prop_assert!(next.played(a, b) <= next.games_per_pairing());
            }
            Err(err) => {
                prop_assert!(!fits);
                let is_invalid = matches!(err, DivisionError::InvalidRecord { .. });
                prop_assert!(is_invalid);
            }
        }
    }

    #[test]
    fn prop_ranking_is_deterministic_permutation(m in division(3)) {
        let order = rank(&m);
        prop_assert_eq!(&order, &rank(&m));
        let mut sorted = order.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..m.len()).collect::<Vec<_>>());
        prop_assert_eq!(winloss(&m).len(), m.len());
    }

    #[test]
    fn prop_guaranteed_within_possible(
        m in division(2),
        direction in directions(),
        slots in 0usize..=3,
    ) {
        let guaranteed = confirmed(&m, direction, slots);
        let possible = search(&m, direction, slots, true);
        prop_assert!(guaranteed.is_subset(&possible));
    }

    #[test]
    fn prop_finished_division_is_fixed_point(
        m in division(0),
        direction in directions(),
        slots in 0usize..=3,
    ) {
        prop_assert!(m.is_complete());
        let guaranteed = confirmed(&m, direction, slots);
        prop_assert_eq!(&search(&m, direction, slots, true), &guaranteed);

        let outlook = exhaustive_outlook(&m, direction, slots, SearchLimits::unlimited()).unwrap();
        prop_assert_eq!(outlook.completions, 1);
        prop_assert_eq!(&outlook.possible, &guaranteed);
        prop_assert_eq!(&outlook.guaranteed, &guaranteed);
    }

    #[test]
    fn prop_pruned_matches_brute_force(
        m in division(3),
        direction in directions(),
        slots in 0usize..=3,
    ) {
        prop_assert_eq!(
            search(&m, direction, slots, true),
            search(&m, direction, slots, false)
        );
    }

    #[test]
    fn prop_search_covers_every_completion(
        m in division(3),
        direction in directions(),
        slots in 0usize..=3,
    ) {
        let outlook = exhaustive_outlook(&m, direction, slots, SearchLimits::unlimited()).unwrap();
        let found = search(&m, direction, slots, true);
        prop_assert!(outlook.possible.is_subset(&found));

        let mut expected = outlook.possible.clone();
        expected.extend(confirmed(&m, direction, slots));
        prop_assert_eq!(found, expected);
    }
}
