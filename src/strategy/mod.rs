mod type_a;
mod type_b;

use crate::events::PlayerId;
use crate::state::GameState;

/// A chosen destination and the rule that picked it, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
	pub site: usize,
	pub rule: &'static str,
}

impl Decision {
	fn new(site: usize, rule: &'static str) -> Self {
		Self { site, rule }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
	A,
	B,
}

impl Strategy {
	pub fn name(self) -> &'static str {
		match self {
			Strategy::A => "A",
			Strategy::B => "B",
		}
	}

	/// Picks where `me` should move. Reads the replica only.
	pub fn choose(self, state: &GameState, me: PlayerId) -> Option<Decision> {
		match self {
			Strategy::A => type_a::choose(state, me),
			Strategy::B => type_b::choose(state, me),
		}
	}
}
