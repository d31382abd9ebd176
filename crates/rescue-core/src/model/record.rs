use serde::{Deserialize, Serialize};

/// Running log of the current game: how many searches have happened, what the
/// last one reported, and whether the sailor has been found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    search_num: u32,
    message: String,
    game_over: bool,
}

impl SearchRecord {
    pub fn new() -> Self {
        Self {
            search_num: 1,
            message: String::new(),
            game_over: false,
        }
    }

    pub(crate) fn from_parts(search_num: u32, message: String, game_over: bool) -> Self {
        Self {
            search_num,
            message,
            game_over,
        }
    }

    pub fn search_num(&self) -> u32 {
        self.search_num
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Applies the outcome of one accepted search. `game_over` is sticky:
    /// once set it only clears on reset.
    pub(crate) fn record_search(&mut self, message: String, found: bool) {
        self.search_num += 1;
        self.message = message;
        self.game_over = self.game_over || found;
    }
}

impl Default for SearchRecord {
    fn default() -> Self {
        Self::new()
    }
}
