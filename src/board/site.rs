use serde::Serialize;

use crate::events::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SiteKind {
	Barrier,
	V1,
	V2,
	Mo,
	Do,
	Ri,
}

impl SiteKind {
	pub fn from_code(code: &str) -> Option<Self> {
		match code {
			"::" => Some(SiteKind::Barrier),
			"V1" => Some(SiteKind::V1),
			"V2" => Some(SiteKind::V2),
			"Mo" => Some(SiteKind::Mo),
			"Do" => Some(SiteKind::Do),
			"Ri" => Some(SiteKind::Ri),
			_ => None,
		}
	}

	pub fn code(self) -> &'static str {
		match self {
			SiteKind::Barrier => "::",
			SiteKind::V1 => "V1",
			SiteKind::V2 => "V2",
			SiteKind::Mo => "Mo",
			SiteKind::Do => "Do",
			SiteKind::Ri => "Ri",
		}
	}
}

impl std::fmt::Display for SiteKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.code())
	}
}

/// Capacity as written in the path token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
	Limited(u8),
	PlayerCount,
}

impl Capacity {
	pub fn from_char(c: char) -> Option<Self> {
		match c {
			'-' => Some(Capacity::PlayerCount),
			'1'..='9' => Some(Capacity::Limited(c as u8 - b'0')),
			_ => None,
		}
	}

	pub fn symbol(self) -> char {
		match self {
			Capacity::PlayerCount => '-',
			Capacity::Limited(n) => (b'0' + n) as char,
		}
	}

	pub fn resolve(self, player_count: usize) -> usize {
		match self {
			Capacity::PlayerCount => player_count,
			Capacity::Limited(n) => n as usize,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
	kind: SiteKind,
	index: usize,
	declared: Capacity,
	capacity: usize,
	occupants: Vec<PlayerId>,
}

impl Site {
	pub fn new(kind: SiteKind, index: usize, declared: Capacity, player_count: usize) -> Self {
		Self {
			kind,
			index,
			declared,
			capacity: declared.resolve(player_count),
			occupants: Vec::with_capacity(player_count),
		}
	}

	pub fn kind(&self) -> SiteKind {
		self.kind
	}

	pub fn index(&self) -> usize {
		self.index
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn declared_capacity(&self) -> Capacity {
		self.declared
	}

	/// Two-character type code shown on the board, e.g. `Mo`.
	pub fn name(&self) -> &'static str {
		self.kind.code()
	}

	/// The original three-character token, e.g. `Mo2`.
	pub fn raw_name(&self) -> String {
		format!("{}{}", self.kind.code(), self.declared.symbol())
	}

	pub fn is_barrier(&self) -> bool {
		self.kind == SiteKind::Barrier
	}

	pub fn has_room(&self) -> bool {
		self.occupants.len() < self.capacity
	}

	/// Occupants in arrival order; the last one arrived most recently.
	pub fn occupants(&self) -> &[PlayerId] {
		&self.occupants
	}

	pub fn is_empty(&self) -> bool {
		self.occupants.is_empty()
	}

	pub(crate) fn arrive(&mut self, player: PlayerId) {
		self.occupants.push(player);
	}

	pub(crate) fn depart(&mut self, player: PlayerId) -> bool {
		match self.occupants.iter().position(|p| *p == player) {
			Some(pos) => {
				self.occupants.remove(pos);
				true
			}
			None => false,
		}
	}
}
