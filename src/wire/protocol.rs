use thiserror::Error;

use crate::events::{Card, GameEvent, PlayerId};

pub const READY: &str = "^";
pub const YOUR_TURN: &str = "YT";
pub const EARLY: &str = "EARLY";
pub const DONE: &str = "DONE";
pub const EVENT_PREFIX: &str = "HAP";
pub const MOVE_PREFIX: &str = "DO";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
	#[error("malformed move '{0}'")]
	MalformedMove(String),
	#[error("malformed event '{0}'")]
	MalformedEvent(String),
	#[error("unexpected message '{0}'")]
	Unexpected(String),
}

/// Lines the dealer sends. The path is sent verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealerMessage {
	Path(String),
	YourTurn,
	Happened(GameEvent),
	Early,
	Done,
}

impl DealerMessage {
	pub fn encode(&self) -> String {
		match self {
			DealerMessage::Path(text) => text.clone(),
			DealerMessage::YourTurn => YOUR_TURN.to_string(),
			DealerMessage::Happened(event) => encode_event(event),
			DealerMessage::Early => EARLY.to_string(),
			DealerMessage::Done => DONE.to_string(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMessage {
	Ready,
	Do(usize),
}

impl PlayerMessage {
	pub fn encode(&self) -> String {
		match self {
			PlayerMessage::Ready => READY.to_string(),
			PlayerMessage::Do(site) => format!("{}{}", MOVE_PREFIX, site),
		}
	}

	pub fn decode(line: &str) -> Result<Self, WireError> {
		if line == READY {
			return Ok(PlayerMessage::Ready);
		}
		let digits = line
			.strip_prefix(MOVE_PREFIX)
			.ok_or_else(|| WireError::Unexpected(line.to_string()))?;
		parse_unsigned(digits)
			.map(PlayerMessage::Do)
			.ok_or_else(|| WireError::MalformedMove(line.to_string()))
	}
}

/// What a player makes of a line from the dealer before decoding it further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incoming<'a> {
	YourTurn,
	Event(&'a str),
	EarlyEnd,
	GameDone,
	Unknown,
}

pub fn classify(line: &str) -> Incoming<'_> {
	match line {
		YOUR_TURN => Incoming::YourTurn,
		EARLY => Incoming::EarlyEnd,
		DONE => Incoming::GameDone,
		_ => match line.strip_prefix(EVENT_PREFIX) {
			Some(body) => Incoming::Event(body),
			None => Incoming::Unknown,
		},
	}
}

pub fn encode_event(event: &GameEvent) -> String {
	format!(
		"{}{},{},{},{},{}",
		EVENT_PREFIX,
		event.player,
		event.site,
		event.point_change,
		event.money_change,
		event.card.map_or(0, Card::wire_value)
	)
}

/// Decodes the body of a `HAP` line (everything after the prefix), checking
/// ids and sites against the game's dimensions.
pub fn decode_event(body: &str, player_count: usize, site_count: usize) -> Result<GameEvent, WireError> {
	let malformed = || WireError::MalformedEvent(format!("{}{}", EVENT_PREFIX, body));

	let fields: Vec<&str> = body.split(',').collect();
	let [id, site, points, money, card] = fields.as_slice() else {
		return Err(malformed());
	};

	let id = parse_unsigned(id).filter(|&id| id < player_count).ok_or_else(malformed)?;
	let site = parse_unsigned(site).filter(|&site| site < site_count).ok_or_else(malformed)?;
	let points = parse_unsigned(points)
		.and_then(|p| i32::try_from(p).ok())
		.ok_or_else(malformed)?;
	let money = parse_signed(money).ok_or_else(malformed)?;
	let card = parse_unsigned(card)
		.and_then(|c| u8::try_from(c).ok())
		.and_then(Card::from_wire)
		.ok_or_else(malformed)?;

	Ok(GameEvent {
		player: PlayerId(id),
		site,
		point_change: points,
		money_change: money,
		card,
	})
}

fn parse_unsigned(text: &str) -> Option<usize> {
	if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	text.parse().ok()
}

fn parse_signed(text: &str) -> Option<i32> {
	let (negative, digits) = match text.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, text),
	};
	let magnitude = i32::try_from(parse_unsigned(digits)?).ok()?;
	Some(if negative { -magnitude } else { magnitude })
}
