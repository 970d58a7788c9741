use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::events::{Card, PlayerId};
use crate::state::{GameState, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
	Completed,
	EndedEarly,
	Aborted,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
	pub id: PlayerId,
	pub site: usize,
	pub money: i32,
	pub points: i32,
	pub v1_visits: u32,
	pub v2_visits: u32,
	pub cards: [u32; 5],
	pub card_score: i32,
	pub score: i32,
}

impl From<&Player> for PlayerReport {
	fn from(player: &Player) -> Self {
		Self {
			id: player.id,
			site: player.site,
			money: player.money,
			points: player.points,
			v1_visits: player.v1_visits,
			v2_visits: player.v2_visits,
			cards: Card::ALL.map(|card| player.hand.count(card)),
			card_score: player.hand.card_score(),
			score: player.score(),
		}
	}
}

/// Summary written by `dealer --report` once a game stops.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
	pub outcome: Outcome,
	pub path: String,
	pub turns: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	pub players: Vec<PlayerReport>,
}

impl GameReport {
	pub fn new(state: &GameState, path: &str, turns: u32, outcome: Outcome) -> Self {
		Self {
			outcome,
			path: path.to_string(),
			turns,
			error: None,
			players: state.players().iter().map(PlayerReport::from).collect(),
		}
	}

	pub fn with_error(mut self, error: impl ToString) -> Self {
		self.error = Some(error.to_string());
		self
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(self)
	}

	pub fn write_to(&self, path: &Path) -> io::Result<()> {
		let json = self.to_json().map_err(io::Error::other)?;
		fs::write(path, json + "\n")
	}
}
