use crate::model::area::Area;
use serde::{Deserialize, Serialize};

/// Designer prior over the three areas; not derived from data.
pub const INITIAL_PRIOR: [f64; 3] = [0.2, 0.5, 0.3];

/// Probability distribution over which area holds the sailor.
///
/// The three values each stay in [0, 1] and sum to 1.0 within floating-point
/// tolerance, except transiently between a scale and the renormalization that
/// follows a failed search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeliefState {
    probs: [f64; 3],
}

impl BeliefState {
    pub const fn initial() -> Self {
        Self {
            probs: INITIAL_PRIOR,
        }
    }

    pub const fn from_probabilities(probs: [f64; 3]) -> Self {
        Self { probs }
    }

    pub fn probability(&self, area: Area) -> f64 {
        self.probs[area.index()]
    }

    pub fn probabilities(&self) -> [f64; 3] {
        self.probs
    }

    pub fn total(&self) -> f64 {
        self.probs.iter().sum()
    }

    /// Shrinks the unexplored mass of `area` after a search with the given
    /// residual factor.
    pub(crate) fn scale(&mut self, area: Area, factor: f64) {
        self.probs[area.index()] *= factor;
    }

    /// Rescales so the three probabilities sum to 1.0 again.
    pub(crate) fn normalize(&mut self) {
        let total = self.total();
        if total > 0.0 {
            for prob in &mut self.probs {
                *prob /= total;
            }
        }
    }
}

impl Default for BeliefState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::{BeliefState, INITIAL_PRIOR};
    use crate::model::area::Area;

    #[test]
    fn initial_matches_prior_and_sums_to_one() {
        let belief = BeliefState::initial();
        assert_eq!(belief.probabilities(), INITIAL_PRIOR);
        assert!((belief.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn scale_only_touches_the_named_area() {
        let mut belief = BeliefState::initial();
        belief.scale(Area::Two, 0.5);
        assert_eq!(belief.probability(Area::One), 0.2);
        assert_eq!(belief.probability(Area::Two), 0.25);
        assert_eq!(belief.probability(Area::Three), 0.3);
    }

    #[test]
    fn normalize_restores_unit_total() {
        let mut belief = BeliefState::initial();
        belief.scale(Area::One, 0.5);
        belief.normalize();
        assert!((belief.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_preserves_relative_weights() {
        let mut belief = BeliefState::from_probabilities([0.1, 0.5, 0.3]);
        belief.normalize();
        let [p1, p2, p3] = belief.probabilities();
        assert!((p2 / p1 - 5.0).abs() < 1e-12);
        assert!((p3 / p1 - 3.0).abs() < 1e-12);
    }
}
