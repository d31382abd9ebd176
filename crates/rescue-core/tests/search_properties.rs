use rescue_core::game::session::{GameSession, SearchError};
use rescue_core::model::area::Area;
use rescue_core::model::belief::{BeliefState, INITIAL_PRIOR};
use rescue_core::model::point::Point;
use rescue_core::model::truth::GroundTruth;
use rescue_core::search::{SearchDraw, SearchOutcome, resolve_search};

fn truth_in(area: Area) -> GroundTruth {
    let zone = area.zone();
    GroundTruth::new(area, Point::new(zone.x1 + 5, zone.y1 + 5))
}

#[test]
fn probabilities_sum_to_one_after_every_miss() {
    for seed in 0..32u64 {
        let mut session = GameSession::with_seed(seed);
        for step in 0..40 {
            let choice = Area::LOOP[step % 3];
            match session.conduct_search(choice) {
                Ok(SearchOutcome::NotFound) => {
                    let total = session.belief().total();
                    assert!(
                        (total - 1.0).abs() < 1e-9,
                        "seed {seed} step {step}: total {total}"
                    );
                }
                Ok(SearchOutcome::SailorFound) | Err(_) => break,
            }
        }
    }
}

#[test]
fn searching_the_wrong_area_never_succeeds() {
    for seed in 0..64u64 {
        let mut session = GameSession::with_seed(seed);
        let actual = session.ground_truth().area_actual();
        let wrong = Area::LOOP
            .iter()
            .copied()
            .find(|area| *area != actual)
            .unwrap();

        for _ in 0..30 {
            let outcome = session.conduct_search(wrong).unwrap();
            assert_eq!(outcome, SearchOutcome::NotFound, "seed {seed}");
        }
        assert!(!session.game_over());
    }
}

#[test]
fn repeated_misses_shrink_the_searched_share() {
    // forced draws make the decay deterministic: each miss of Area Two keeps
    // half its mass and renormalizes
    let mut belief = BeliefState::initial();
    let truth = truth_in(Area::One);
    let draw = SearchDraw {
        effectiveness: 0.5,
        detection: 0.99,
    };

    let mut previous = belief.probability(Area::Two);
    for _ in 0..10 {
        let outcome = resolve_search(&mut belief, &truth, Area::Two, draw);
        assert_eq!(outcome, SearchOutcome::NotFound);
        let current = belief.probability(Area::Two);
        assert!(current < previous, "{current} >= {previous}");
        previous = current;
    }
    // the untouched areas absorb the freed mass in their prior ratio
    let [p1, _, p3] = belief.probabilities();
    assert!((p3 / p1 - 0.3 / 0.2).abs() < 1e-9);
}

#[test]
fn searched_share_decays_in_expectation_across_sessions() {
    let trials = 200u64;
    let mut sum_after_first = 0.0;
    let mut sum_after_fifth = 0.0;

    for seed in 0..trials {
        let mut session = GameSession::with_seed(seed);
        if session.ground_truth().area_actual() == Area::Two {
            continue;
        }
        for step in 0..5 {
            session.conduct_search(Area::Two).unwrap();
            if step == 0 {
                sum_after_first += session.belief().probability(Area::Two);
            }
        }
        sum_after_fifth += session.belief().probability(Area::Two);
    }

    assert!(sum_after_fifth < sum_after_first);
}

#[test]
fn search_num_is_stable_across_rejected_calls() {
    let mut session = GameSession::with_seed(17);
    let actual = session.ground_truth().area_actual();
    while !session.game_over() {
        session.conduct_search(actual).unwrap();
    }

    let frozen = session.record().search_num();
    for _ in 0..5 {
        assert_eq!(
            session.conduct_search(actual),
            Err(SearchError::GameAlreadyOver)
        );
        assert_eq!(session.record().search_num(), frozen);
    }
}

#[test]
fn reset_scenarios_cover_all_areas_uniformly() {
    let mut session = GameSession::with_seed(0);
    let mut counts = [0usize; 3];
    let resets = 3_000;

    for _ in 0..resets {
        counts[session.ground_truth().area_actual().index()] += 1;
        session.reset_game();
    }

    for (index, count) in counts.iter().enumerate() {
        let share = *count as f64 / resets as f64;
        assert!(
            (share - 1.0 / 3.0).abs() < 0.05,
            "area {} share {share}",
            index + 1
        );
    }
}

#[test]
fn forced_miss_scenario_matches_the_arithmetic() {
    let mut belief = BeliefState::from_probabilities(INITIAL_PRIOR);
    let draw = SearchDraw {
        effectiveness: 0.5,
        detection: 0.7,
    };

    let outcome = resolve_search(&mut belief, &truth_in(Area::Two), Area::One, draw);
    assert_eq!(outcome, SearchOutcome::NotFound);

    // 0.2 * 0.5 = 0.1 pre-normalization, then all three divided by 0.9
    let [p1, p2, p3] = belief.probabilities();
    assert!((p1 - 1.0 / 9.0).abs() < 1e-9);
    assert!((p2 - 5.0 / 9.0).abs() < 1e-9);
    assert!((p3 - 3.0 / 9.0).abs() < 1e-9);
    assert!((belief.total() - 1.0).abs() < 1e-9);
}

#[test]
fn forced_find_concludes_the_game() {
    let mut belief = BeliefState::from_probabilities(INITIAL_PRIOR);
    let draw = SearchDraw {
        effectiveness: 0.5,
        detection: 0.2,
    };

    let outcome = resolve_search(&mut belief, &truth_in(Area::One), Area::One, draw);
    assert_eq!(outcome, SearchOutcome::SailorFound);
    // residuals stay raw once the game is decided
    assert!((belief.total() - 0.9).abs() < 1e-12);
}
