mod types;

pub use types::{Card, GameEvent, PlayerId};
