//! The Bayesian search step: per-search condition sampling, detection, and
//! belief renormalization after a miss.

use crate::model::area::Area;
use crate::model::belief::BeliefState;
use crate::model::truth::GroundTruth;
use rand::Rng;

/// Lower bound (inclusive) of per-search effectiveness.
pub const EFFECTIVENESS_MIN: f64 = 0.4;
/// Upper bound (exclusive) of per-search effectiveness.
pub const EFFECTIVENESS_MAX: f64 = 0.9;

/// The two uniform draws consumed by a single search call.
///
/// Effectiveness models variable search conditions (weather, crew fatigue)
/// and is drawn fresh for every search; the detection draw decides whether a
/// search of the correct area actually spots the sailor. Tests construct the
/// struct directly to force specific values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchDraw {
    pub effectiveness: f64,
    pub detection: f64,
}

impl SearchDraw {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            effectiveness: rng.gen_range(EFFECTIVENESS_MIN..EFFECTIVENESS_MAX),
            detection: rng.gen_range(0.0..1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    SailorFound,
    NotFound,
}

impl SearchOutcome {
    pub const fn is_found(self) -> bool {
        matches!(self, SearchOutcome::SailorFound)
    }
}

/// Resolves one search of `choice` against the hidden truth.
///
/// The searched area keeps `1 - effectiveness` of its probability mass; the
/// other two areas stay unscaled. A failed search renormalizes the
/// distribution; a successful one leaves the raw residuals in place because
/// the game is over and the values no longer form a distribution.
pub fn resolve_search(
    belief: &mut BeliefState,
    truth: &GroundTruth,
    choice: Area,
    draw: SearchDraw,
) -> SearchOutcome {
    let found = choice == truth.area_actual() && draw.detection < draw.effectiveness;

    belief.scale(choice, 1.0 - draw.effectiveness);
    if !found {
        belief.normalize();
    }

    if found {
        SearchOutcome::SailorFound
    } else {
        SearchOutcome::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::{EFFECTIVENESS_MAX, EFFECTIVENESS_MIN, SearchDraw, SearchOutcome, resolve_search};
    use crate::model::area::Area;
    use crate::model::belief::BeliefState;
    use crate::model::point::Point;
    use crate::model::truth::GroundTruth;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn truth_in(area: Area) -> GroundTruth {
        let zone = area.zone();
        GroundTruth::new(area, Point::new(zone.x1, zone.y1))
    }

    #[test]
    fn sampled_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let draw = SearchDraw::sample(&mut rng);
            assert!(draw.effectiveness >= EFFECTIVENESS_MIN);
            assert!(draw.effectiveness < EFFECTIVENESS_MAX);
            assert!((0.0..1.0).contains(&draw.detection));
        }
    }

    #[test]
    fn wrong_area_never_finds_the_sailor() {
        // detection 0.0 beats any effectiveness, so only the area check can fail
        let draw = SearchDraw {
            effectiveness: 0.89,
            detection: 0.0,
        };
        for actual in Area::LOOP {
            for choice in Area::LOOP {
                if choice == actual {
                    continue;
                }
                let mut belief = BeliefState::initial();
                let outcome = resolve_search(&mut belief, &truth_in(actual), choice, draw);
                assert_eq!(outcome, SearchOutcome::NotFound);
            }
        }
    }

    #[test]
    fn miss_scales_then_renormalizes() {
        let mut belief = BeliefState::initial();
        let draw = SearchDraw {
            effectiveness: 0.5,
            detection: 0.99,
        };
        let outcome = resolve_search(&mut belief, &truth_in(Area::Two), Area::One, draw);
        assert_eq!(outcome, SearchOutcome::NotFound);

        // p1 shrank to 0.1 before renormalization over the 0.9 remainder
        let [p1, p2, p3] = belief.probabilities();
        assert!((p1 - 0.1 / 0.9).abs() < 1e-9);
        assert!((p2 - 0.5 / 0.9).abs() < 1e-9);
        assert!((p3 - 0.3 / 0.9).abs() < 1e-9);
        assert!((belief.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn find_skips_renormalization() {
        let mut belief = BeliefState::initial();
        let draw = SearchDraw {
            effectiveness: 0.5,
            detection: 0.1,
        };
        let outcome = resolve_search(&mut belief, &truth_in(Area::One), Area::One, draw);
        assert_eq!(outcome, SearchOutcome::SailorFound);

        // raw residuals: only the searched area was scaled
        let [p1, p2, p3] = belief.probabilities();
        assert!((p1 - 0.1).abs() < 1e-12);
        assert_eq!(p2, 0.5);
        assert_eq!(p3, 0.3);
        assert!((belief.total() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn detection_at_effectiveness_boundary_misses() {
        let mut belief = BeliefState::initial();
        let draw = SearchDraw {
            effectiveness: 0.5,
            detection: 0.5,
        };
        let outcome = resolve_search(&mut belief, &truth_in(Area::Three), Area::Three, draw);
        assert_eq!(outcome, SearchOutcome::NotFound);
    }
}
