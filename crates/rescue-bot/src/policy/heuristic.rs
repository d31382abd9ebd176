use super::{Policy, PolicyContext};
use rescue_core::model::area::Area;
use tracing::debug;

/// Always searches the area with the highest current belief, preferring the
/// lowest-numbered area on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPolicy;

impl Policy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose_area(&mut self, ctx: &PolicyContext) -> Area {
        let mut best = Area::One;
        for area in Area::LOOP {
            if ctx.belief.probability(area) > ctx.belief.probability(best) {
                best = area;
            }
        }
        debug!(
            search = ctx.record.search_num(),
            area = best.number(),
            probability = ctx.belief.probability(best),
            "greedy choice"
        );
        best
    }
}

/// Rotates through the three areas in order, ignoring the belief entirely.
/// Useful as a weak baseline for the simulation harness.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepPolicy {
    cursor: usize,
}

impl Policy for SweepPolicy {
    fn name(&self) -> &'static str {
        "sweep"
    }

    fn choose_area(&mut self, ctx: &PolicyContext) -> Area {
        let area = Area::LOOP[self.cursor % Area::LOOP.len()];
        self.cursor += 1;
        debug!(
            search = ctx.record.search_num(),
            area = area.number(),
            "sweep choice"
        );
        area
    }
}

#[cfg(test)]
mod tests {
    use super::{GreedyPolicy, SweepPolicy};
    use crate::policy::{Policy, PolicyContext};
    use rescue_core::model::area::Area;
    use rescue_core::model::belief::BeliefState;
    use rescue_core::model::record::SearchRecord;

    fn ctx<'a>(belief: &'a BeliefState, record: &'a SearchRecord) -> PolicyContext<'a> {
        PolicyContext { belief, record }
    }

    #[test]
    fn greedy_picks_the_most_likely_area() {
        let belief = BeliefState::from_probabilities([0.1, 0.2, 0.7]);
        let record = SearchRecord::new();
        let mut policy = GreedyPolicy;
        assert_eq!(policy.choose_area(&ctx(&belief, &record)), Area::Three);
    }

    #[test]
    fn greedy_breaks_ties_toward_the_lowest_area() {
        let belief = BeliefState::from_probabilities([0.4, 0.4, 0.2]);
        let record = SearchRecord::new();
        let mut policy = GreedyPolicy;
        assert_eq!(policy.choose_area(&ctx(&belief, &record)), Area::One);
    }

    #[test]
    fn sweep_cycles_in_area_order() {
        let belief = BeliefState::initial();
        let record = SearchRecord::new();
        let mut policy = SweepPolicy::default();

        let picks: Vec<Area> = (0..6)
            .map(|_| policy.choose_area(&ctx(&belief, &record)))
            .collect();
        assert_eq!(
            picks,
            [
                Area::One,
                Area::Two,
                Area::Three,
                Area::One,
                Area::Two,
                Area::Three
            ]
        );
    }
}
