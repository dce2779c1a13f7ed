use serde::{Deserialize, Serialize};

use crate::game::game_state::GameState;
use crate::model::{Seat, Team};

/// A game captured at a round boundary. The deck history is implied by the
/// seed and round number, so restoring replays the shuffles rather than
/// storing any cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub seed: u64,
    pub round_number: u32,
    pub scores: [i32; 2],
    pub starting: Seat,
}

impl GameSnapshot {
    pub fn capture(game: &GameState) -> GameSnapshot {
        GameSnapshot {
            seed: game.seed(),
            round_number: game.round_number(),
            scores: [game.score(Team::NorthSouth), game.score(Team::EastWest)],
            starting: game.first_starting_seat(),
        }
    }

    /// Rebuilds the game with the current round freshly dealt.
    pub fn restore(&self) -> GameState {
        let mut game = GameState::with_seed(self.starting, self.seed);
        for _ in 1..self.round_number {
            game.start_next_round();
        }
        game.set_scores(self.scores);
        game
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<GameSnapshot> {
        serde_json::from_str(json)
    }
}
