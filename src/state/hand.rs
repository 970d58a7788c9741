use serde::Serialize;

use crate::events::Card;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Hand {
	counts: [u32; 5],
	total: u32,
}

impl Hand {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, card: Card) {
		self.counts[card.slot()] += 1;
		self.total += 1;
	}

	pub fn count(&self, card: Card) -> u32 {
		self.counts[card.slot()]
	}

	pub fn total(&self) -> u32 {
		self.total
	}

	pub fn is_empty(&self) -> bool {
		self.total == 0
	}

	/// Scores the hand one full set at a time: each round takes every
	/// denomination still held, scores the set, and removes one of each.
	pub fn card_score(&self) -> i32 {
		let mut remaining = self.counts;
		let mut score = 0;
		loop {
			let distinct = remaining.iter().filter(|&&n| n > 0).count();
			if distinct == 0 {
				return score;
			}
			score += set_value(distinct);
			for n in remaining.iter_mut().filter(|n| **n > 0) {
				*n -= 1;
			}
		}
	}
}

fn set_value(distinct: usize) -> i32 {
	if distinct == Card::ALL.len() {
		10
	} else {
		2 * distinct as i32 - 1
	}
}
