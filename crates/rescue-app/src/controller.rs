use rescue_bot::{Policy, PolicyContext};
use rescue_core::game::serialization::GameSnapshot;
use rescue_core::game::session::{GameSession, GameView, SearchError};
use rescue_core::model::area::Area;
use rescue_core::search::SearchOutcome;

/// Thin command/observer wrapper the front-end drives: two commands plus
/// read-only views, never handing out mutable engine state.
pub struct GameController {
    session: GameSession,
}

impl GameController {
    pub fn new_with_seed(seed: Option<u64>) -> Self {
        let session = match seed {
            Some(value) => GameSession::with_seed(value),
            None => GameSession::new(),
        };
        Self { session }
    }

    pub fn seed(&self) -> u64 {
        self.session.seed()
    }

    pub fn view(&self) -> GameView {
        self.session.view()
    }

    pub fn status_text(&self) -> String {
        let view = self.session.view();
        format!(
            "Search {} • P1 {:.3} • P2 {:.3} • P3 {:.3}",
            view.search_num, view.p1, view.p2, view.p3
        )
    }

    pub fn search(&mut self, choice: u8) -> Result<SearchOutcome, SearchError> {
        self.session.conduct_search_numbered(choice)
    }

    pub fn reset(&mut self) {
        self.session.reset_game();
    }

    /// Lets a bot policy take one turn; `None` once the game is over.
    pub fn auto_search(&mut self, policy: &mut dyn Policy) -> Option<(Area, SearchOutcome)> {
        if self.session.game_over() {
            return None;
        }
        let area = {
            let ctx = PolicyContext {
                belief: self.session.belief(),
                record: self.session.record(),
            };
            policy.choose_area(&ctx)
        };
        self.session
            .conduct_search(area)
            .ok()
            .map(|outcome| (area, outcome))
    }

    pub fn save_json(&self) -> serde_json::Result<String> {
        GameSnapshot::to_json(&self.session)
    }

    pub fn load_json(&mut self, json: &str) -> serde_json::Result<()> {
        let snapshot = GameSnapshot::from_json(json)?;
        self.session = snapshot.restore();
        Ok(())
    }
}
