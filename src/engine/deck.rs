use thiserror::Error;

use crate::events::Card;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
	#[error("deck has no cards")]
	Empty,
	#[error("invalid card '{found}' at position {position}")]
	InvalidCard { position: usize, found: char },
}

/// Cards dealt on Ri visits, drawn in order and wrapping around at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
	cards: Vec<Card>,
	next: usize,
}

impl Deck {
	/// Parses deck text: an optional run of digits (ignored) followed by a
	/// non-empty string over `A`..`E`. One trailing newline is tolerated.
	pub fn parse(text: &str) -> Result<Self, DeckError> {
		let line = text.strip_suffix('\n').unwrap_or(text);
		let line = line.strip_suffix('\r').unwrap_or(line);
		let body = line.trim_start_matches(|c: char| c.is_ascii_digit());
		let skipped = line.len() - body.len();

		let cards = body
			.chars()
			.enumerate()
			.map(|(i, c)| {
				Card::from_letter(c).ok_or(DeckError::InvalidCard {
					position: skipped + i,
					found: c,
				})
			})
			.collect::<Result<Vec<_>, _>>()?;

		if cards.is_empty() {
			return Err(DeckError::Empty);
		}
		Ok(Self { cards, next: 0 })
	}

	pub fn len(&self) -> usize {
		self.cards.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cards.is_empty()
	}

	pub fn draws(&self) -> usize {
		self.next
	}

	pub fn draw(&mut self) -> Card {
		let card = self.cards[self.next % self.cards.len()];
		self.next += 1;
		card
	}
}
