mod heuristic;

pub use heuristic::{GreedyPolicy, SweepPolicy};

use rescue_core::model::area::Area;
use rescue_core::model::belief::BeliefState;
use rescue_core::model::record::SearchRecord;

/// Context provided to policies for choosing the next area to search.
pub struct PolicyContext<'a> {
    pub belief: &'a BeliefState,
    pub record: &'a SearchRecord,
}

/// Unified interface for automated search planning.
pub trait Policy: Send {
    /// Identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Choose the next area to search.
    fn choose_area(&mut self, ctx: &PolicyContext) -> Area;
}
