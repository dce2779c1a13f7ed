pub mod game_state;
pub mod serialization;

pub use game_state::{ActionError, GameState};
pub use serialization::GameSnapshot;
