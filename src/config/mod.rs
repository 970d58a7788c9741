use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::board::{parse_path, Site};
use crate::defaults;
use crate::engine::Deck;
use crate::error::ConfigError;
use crate::events::PlayerId;
use crate::state::MAX_PLAYER_COUNT;

pub const CONFIG_FILE: &str = "race.toml";

fn config_paths(filename: &str) -> Vec<PathBuf> {
	let mut paths = Vec::new();

	if let Some(config_dir) = dirs::config_dir() {
		paths.push(config_dir.join(defaults::APP_DIR).join(filename));
	}

	paths.push(PathBuf::from("config").join(filename));

	paths
}

fn find_config(filename: &str) -> Option<PathBuf> {
	config_paths(filename).into_iter().find(|p| p.exists())
}

pub fn resolve_config(filename: &str) -> Result<PathBuf, String> {
	find_config(filename).ok_or_else(|| {
		let searched: Vec<_> = config_paths(filename)
			.iter()
			.map(|p| p.display().to_string())
			.collect();
		format!("Config file '{}' not found. Searched: {}", filename, searched.join(", "))
	})
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStderr {
	#[default]
	Null,
	Inherit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DealerConfig {
	#[serde(default = "default_show_board")]
	pub show_board: bool,
	#[serde(default)]
	pub player_stderr: PlayerStderr,
}

fn default_show_board() -> bool {
	true
}

impl Default for DealerConfig {
	fn default() -> Self {
		Self {
			show_board: default_show_board(),
			player_stderr: PlayerStderr::default(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
	#[serde(default)]
	pub enabled: bool,
	#[serde(default = "default_log_dir")]
	pub dir: PathBuf,
}

fn default_log_dir() -> PathBuf {
	PathBuf::from("logs")
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			enabled: false,
			dir: default_log_dir(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RaceConfig {
	#[serde(default)]
	pub dealer: DealerConfig,
	#[serde(default)]
	pub logging: LoggingConfig,
}

impl RaceConfig {
	pub fn parse(text: &str, origin: &Path) -> Result<Self, ConfigError> {
		toml::from_str(text).map_err(|e| ConfigError::Settings {
			path: origin.to_path_buf(),
			message: e.to_string(),
		})
	}
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RaceConfig, ConfigError> {
	let path = path.as_ref();
	let content = fs::read_to_string(path).map_err(|e| ConfigError::Settings {
		path: path.to_path_buf(),
		message: e.to_string(),
	})?;
	RaceConfig::parse(&content, path)
}

/// Searches the usual locations, falling back to the compiled-in defaults.
pub fn load_config_auto() -> Result<RaceConfig, ConfigError> {
	if let Ok(path) = resolve_config(CONFIG_FILE) {
		return load_config(path);
	}
	match defaults::embedded(CONFIG_FILE) {
		Some(text) => RaceConfig::parse(text, Path::new(CONFIG_FILE)),
		None => Ok(RaceConfig::default()),
	}
}

fn is_decimal(text: &str) -> bool {
	!text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

pub fn parse_player_count(text: &str) -> Result<usize, ConfigError> {
	let invalid = || ConfigError::PlayerCount(text.to_string());
	if !is_decimal(text) {
		return Err(invalid());
	}
	let count: usize = text.parse().map_err(|_| invalid())?;
	if !(1..=MAX_PLAYER_COUNT).contains(&count) {
		return Err(invalid());
	}
	Ok(count)
}

pub fn parse_player_id(text: &str, player_count: usize) -> Result<PlayerId, ConfigError> {
	let invalid = || ConfigError::PlayerId(text.to_string());
	if !is_decimal(text) {
		return Err(invalid());
	}
	let id: usize = text.parse().map_err(|_| invalid())?;
	if id >= player_count {
		return Err(invalid());
	}
	Ok(PlayerId(id))
}

pub fn read_deck<P: AsRef<Path>>(path: P) -> Result<Deck, ConfigError> {
	let path = path.as_ref();
	let text = fs::read_to_string(path).map_err(|source| ConfigError::DeckUnreadable {
		path: path.to_path_buf(),
		source,
	})?;
	Ok(Deck::parse(&text)?)
}

/// Reads and validates a path file. Returns the line as it will be sent to
/// players together with the parsed sites.
pub fn read_track<P: AsRef<Path>>(path: P, player_count: usize) -> Result<(String, Vec<Site>), ConfigError> {
	let path = path.as_ref();
	let text = fs::read_to_string(path).map_err(|source| ConfigError::PathUnreadable {
		path: path.to_path_buf(),
		source,
	})?;
	let sites = parse_path(&text, player_count)?;
	let line = text.trim_end_matches(['\n', '\r']).to_string();
	Ok((line, sites))
}
