use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlayerId(pub usize);

impl std::fmt::Display for PlayerId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Card {
	A,
	B,
	C,
	D,
	E,
}

impl Card {
	pub const ALL: [Card; 5] = [Card::A, Card::B, Card::C, Card::D, Card::E];

	pub fn from_letter(letter: char) -> Option<Self> {
		match letter {
			'A' => Some(Card::A),
			'B' => Some(Card::B),
			'C' => Some(Card::C),
			'D' => Some(Card::D),
			'E' => Some(Card::E),
			_ => None,
		}
	}

	/// Wire value used in `HAP` messages; 0 is reserved for "no card".
	pub fn wire_value(self) -> u8 {
		self.slot() as u8 + 1
	}

	pub fn from_wire(value: u8) -> Option<Option<Self>> {
		match value {
			0 => Some(None),
			1..=5 => Some(Some(Card::ALL[value as usize - 1])),
			_ => None,
		}
	}

	pub(crate) fn slot(self) -> usize {
		match self {
			Card::A => 0,
			Card::B => 1,
			Card::C => 2,
			Card::D => 3,
			Card::E => 4,
		}
	}
}

/// One accepted move and its effects, as broadcast in a `HAP` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameEvent {
	pub player: PlayerId,
	pub site: usize,
	pub point_change: i32,
	pub money_change: i32,
	pub card: Option<Card>,
}

impl GameEvent {
	pub fn description(&self) -> String {
		let mut desc = format!("player {} moves to site {}", self.player, self.site);
		if self.point_change != 0 {
			desc.push_str(&format!(", points {:+}", self.point_change));
		}
		if self.money_change != 0 {
			desc.push_str(&format!(", money {:+}", self.money_change));
		}
		if let Some(card) = self.card {
			desc.push_str(&format!(", draws {:?}", card));
		}
		desc
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_card_wire_values() {
		assert_eq!(Card::A.wire_value(), 1);
		assert_eq!(Card::E.wire_value(), 5);
		assert_eq!(Card::from_wire(0), Some(None));
		assert_eq!(Card::from_wire(3), Some(Some(Card::C)));
		assert_eq!(Card::from_wire(6), None);
	}

	#[test]
	fn test_card_from_letter() {
		assert_eq!(Card::from_letter('D'), Some(Card::D));
		assert_eq!(Card::from_letter('F'), None);
		assert_eq!(Card::from_letter('a'), None);
	}

	#[test]
	fn test_event_description() {
		let event = GameEvent {
			player: PlayerId(2),
			site: 4,
			point_change: 5,
			money_change: -10,
			card: None,
		};
		assert_eq!(event.description(), "player 2 moves to site 4, points +5, money -10");

		let draw = GameEvent {
			player: PlayerId(0),
			site: 1,
			point_change: 0,
			money_change: 0,
			card: Some(Card::B),
		};
		assert_eq!(draw.description(), "player 0 moves to site 1, draws B");
	}
}
