use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::board::PathError;
use crate::engine::DeckError;
use crate::events::PlayerId;
use crate::state::MoveError;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("{0}")]
	Usage(String),
	#[error("invalid player count '{0}'")]
	PlayerCount(String),
	#[error("invalid player id '{0}'")]
	PlayerId(String),
	#[error("cannot read path file {}: {source}", path.display())]
	PathUnreadable { path: PathBuf, source: io::Error },
	#[error("invalid path: {0}")]
	Path(#[from] PathError),
	#[error("cannot read deck file {}: {source}", path.display())]
	DeckUnreadable { path: PathBuf, source: io::Error },
	#[error("invalid deck: {0}")]
	Deck(#[from] DeckError),
	#[error("config {}: {message}", path.display())]
	Settings { path: PathBuf, message: String },
}

/// Everything that can stop a game run by the dealer.
#[derive(Debug, Error)]
pub enum RaceError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error("failed to start player {id} ({program}): {source}")]
	Spawn {
		id: PlayerId,
		program: String,
		source: io::Error,
	},
	#[error("player {id} did not signal readiness: {reason}")]
	NotReady { id: PlayerId, reason: String },
	#[error("protocol error with player {id}: {reason}")]
	Protocol { id: PlayerId, reason: String },
	#[error("player {id} made an illegal move to site {site}: {source}")]
	RuleViolation {
		id: PlayerId,
		site: usize,
		source: MoveError,
	},
}

impl RaceError {
	pub fn exit(&self) -> DealerExit {
		match self {
			RaceError::Config(err) => DealerExit::from_config(err),
			RaceError::Spawn { .. } | RaceError::NotReady { .. } => DealerExit::Start,
			RaceError::Protocol { .. } | RaceError::RuleViolation { .. } => DealerExit::Comms,
		}
	}

	/// Whether the players should be told the game ended early.
	pub fn ends_game_early(&self) -> bool {
		matches!(self, RaceError::Protocol { .. } | RaceError::RuleViolation { .. })
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerExit {
	Normal,
	Usage,
	Deck,
	Path,
	Start,
	Comms,
}

impl DealerExit {
	pub fn from_config(err: &ConfigError) -> Self {
		match err {
			ConfigError::Path(_) | ConfigError::PathUnreadable { .. } => DealerExit::Path,
			ConfigError::Deck(_) | ConfigError::DeckUnreadable { .. } => DealerExit::Deck,
			ConfigError::Usage(_)
			| ConfigError::PlayerCount(_)
			| ConfigError::PlayerId(_)
			| ConfigError::Settings { .. } => DealerExit::Usage,
		}
	}

	pub fn code(self) -> i32 {
		match self {
			DealerExit::Normal => 0,
			DealerExit::Usage => 1,
			DealerExit::Deck => 2,
			DealerExit::Path => 3,
			DealerExit::Start => 4,
			DealerExit::Comms => 5,
		}
	}

	pub fn message(self) -> Option<&'static str> {
		match self {
			DealerExit::Normal => None,
			DealerExit::Usage => Some("Usage: dealer deck path p1 {p2}"),
			DealerExit::Deck => Some("Error reading deck"),
			DealerExit::Path => Some("Error reading path"),
			DealerExit::Start => Some("Error starting process"),
			DealerExit::Comms => Some("Communications error"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerExit {
	Normal,
	Usage,
	PlayerCount,
	PlayerId,
	Path,
	Early,
	Comms,
}

impl PlayerExit {
	pub fn from_config(err: &ConfigError) -> Self {
		match err {
			ConfigError::PlayerCount(_) => PlayerExit::PlayerCount,
			ConfigError::PlayerId(_) => PlayerExit::PlayerId,
			ConfigError::Path(_) | ConfigError::PathUnreadable { .. } => PlayerExit::Path,
			ConfigError::Usage(_)
			| ConfigError::Deck(_)
			| ConfigError::DeckUnreadable { .. }
			| ConfigError::Settings { .. } => PlayerExit::Usage,
		}
	}

	pub fn code(self) -> i32 {
		match self {
			PlayerExit::Normal => 0,
			PlayerExit::Usage => 1,
			PlayerExit::PlayerCount => 2,
			PlayerExit::PlayerId => 3,
			PlayerExit::Path => 4,
			PlayerExit::Early => 5,
			PlayerExit::Comms => 6,
		}
	}

	pub fn message(self) -> Option<&'static str> {
		match self {
			PlayerExit::Normal => None,
			PlayerExit::Usage => Some("Usage: player pcount ID"),
			PlayerExit::PlayerCount => Some("Invalid player count"),
			PlayerExit::PlayerId => Some("Invalid ID"),
			PlayerExit::Path => Some("Invalid path"),
			PlayerExit::Early => Some("Early game over"),
			PlayerExit::Comms => Some("Communications error"),
		}
	}
}
