use crate::model::area::Area;
use crate::model::belief::BeliefState;
use crate::model::point::Point;
use crate::model::record::SearchRecord;
use crate::model::truth::GroundTruth;
use crate::model::zone::LAST_KNOWN_POSITION;
use crate::search::{SearchDraw, SearchOutcome, resolve_search};
use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

/// One active game: belief distribution, hidden scenario, running record and
/// the session's random source. The front-end only ever sees read accessors
/// and `GameView` snapshots; every mutation goes through `conduct_search` or
/// `reset_game`.
#[derive(Debug, Clone)]
pub struct GameSession {
    belief: BeliefState,
    truth: GroundTruth,
    record: SearchRecord,
    rng: StdRng,
    seed: u64,
}

impl GameSession {
    pub fn new() -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let truth = GroundTruth::generate(&mut rng);

        Self {
            belief: BeliefState::initial(),
            truth,
            record: SearchRecord::new(),
            rng,
            seed,
        }
    }

    pub fn from_snapshot(snapshot: &crate::game::serialization::GameSnapshot) -> Self {
        let mut session = Self::with_seed(snapshot.seed);
        // One SearchDraw was consumed per completed search; replaying them
        // realigns the stream with the captured session.
        for _ in 1..snapshot.search_num {
            let _ = SearchDraw::sample(&mut session.rng);
        }
        session.belief = BeliefState::from_probabilities(snapshot.probabilities);
        session.record = SearchRecord::from_parts(
            snapshot.search_num,
            snapshot.message.clone(),
            snapshot.game_over,
        );
        session
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn belief(&self) -> &BeliefState {
        &self.belief
    }

    pub fn record(&self) -> &SearchRecord {
        &self.record
    }

    pub fn ground_truth(&self) -> &GroundTruth {
        &self.truth
    }

    pub fn game_over(&self) -> bool {
        self.record.game_over()
    }

    /// Runs one search of `choice` to completion, or rejects it without
    /// touching any state.
    pub fn conduct_search(&mut self, choice: Area) -> Result<SearchOutcome, SearchError> {
        if self.record.game_over() {
            return Err(SearchError::GameAlreadyOver);
        }

        let draw = SearchDraw::sample(&mut self.rng);
        let outcome = resolve_search(&mut self.belief, &self.truth, choice, draw);

        let search_num = self.record.search_num();
        let message = match outcome {
            SearchOutcome::SailorFound => {
                format!("Sailor rescued in {choice} on search {search_num}!")
            }
            SearchOutcome::NotFound => {
                format!("Search {search_num} covered {choice} without spotting the sailor.")
            }
        };
        self.record.record_search(message, outcome.is_found());

        Ok(outcome)
    }

    /// Variant for callers holding an unvalidated 1-based label.
    pub fn conduct_search_numbered(&mut self, choice: u8) -> Result<SearchOutcome, SearchError> {
        let area = Area::from_number(choice).ok_or(SearchError::InvalidChoice(choice))?;
        self.conduct_search(area)
    }

    /// Starts a fresh game: chained seed, new hidden scenario, prior belief,
    /// search count back to 1.
    pub fn reset_game(&mut self) {
        let seed = self.rng.next_u64();
        *self = Self::with_seed(seed);
    }

    /// Read-only state the front-end renders after every action. The sailor's
    /// position only appears once the game is over.
    pub fn view(&self) -> GameView {
        let [p1, p2, p3] = self.belief.probabilities();
        GameView {
            p1,
            p2,
            p3,
            search_num: self.record.search_num(),
            message: self.record.message().to_string(),
            game_over: self.record.game_over(),
            last_known_position: LAST_KNOWN_POSITION,
            sailor_position: self.record.game_over().then(|| self.truth.position()),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    InvalidChoice(u8),
    GameAlreadyOver,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameView {
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
    pub search_num: u32,
    pub message: String,
    pub game_over: bool,
    pub last_known_position: Point,
    pub sailor_position: Option<Point>,
}
