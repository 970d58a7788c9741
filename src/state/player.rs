use serde::Serialize;

use crate::events::PlayerId;
use crate::state::hand::Hand;

pub const PLAYER_INIT_MONEY: i32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
	pub id: PlayerId,
	pub money: i32,
	pub points: i32,
	pub hand: Hand,
	pub v1_visits: u32,
	pub v2_visits: u32,
	pub site: usize,
}

impl Player {
	pub fn new(id: PlayerId) -> Self {
		Self {
			id,
			money: PLAYER_INIT_MONEY,
			points: 0,
			hand: Hand::new(),
			v1_visits: 0,
			v2_visits: 0,
			site: 0,
		}
	}

	/// Points, site visits and card sets; leftover money does not count.
	pub fn score(&self) -> i32 {
		let visits = i32::try_from(self.v1_visits.saturating_add(self.v2_visits)).unwrap_or(i32::MAX);
		self.points.saturating_add(visits).saturating_add(self.hand.card_score())
	}
}
