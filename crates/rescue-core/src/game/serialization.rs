use super::session::GameSession;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub seed: u64,
    pub search_num: u32,
    pub probabilities: [f64; 3],
    pub message: String,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        GameSnapshot {
            seed: session.seed(),
            search_num: session.record().search_num(),
            probabilities: session.belief().probabilities(),
            message: session.record().message().to_string(),
            game_over: session.record().game_over(),
        }
    }

    pub fn restore(self) -> GameSession {
        GameSession::from_snapshot(&self)
    }

    pub fn to_json(session: &GameSession) -> serde_json::Result<String> {
        let snapshot = Self::capture(session);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
