mod game;
mod hand;
mod player;

pub use game::{apply_event, GameState, MoveError, MAX_PLAYER_COUNT, MO_MONEY_GAIN};
pub use hand::Hand;
pub use player::{Player, PLAYER_INIT_MONEY};
