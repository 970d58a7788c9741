mod deck;
mod runner;
mod shutdown;

pub use deck::{Deck, DeckError};
pub use runner::{Dealer, TurnPhase};
pub use shutdown::ShutdownHandle;
