use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;

struct LogState {
	enabled: bool,
	dir: Option<PathBuf>,
	file: Option<std::fs::File>,
	current_date: String,
	role: String,
	turn: u32,
}

static LOG_STATE: Mutex<LogState> = Mutex::new(LogState {
	enabled: false,
	dir: None,
	file: None,
	current_date: String::new(),
	role: String::new(),
	turn: 0,
});

/// Turns file logging on for this process. `role` tags every line, e.g.
/// `dealer` or `player1`.
pub fn init(dir: impl Into<PathBuf>, role: &str) {
	if let Ok(mut state) = LOG_STATE.lock() {
		state.enabled = true;
		state.dir = Some(dir.into());
		state.role = role.to_string();
		state.file = None;
	}
}

pub fn set_turn(turn: u32) {
	if let Ok(mut state) = LOG_STATE.lock() {
		state.turn = turn;
	}
}

fn ensure_log_file(state: &mut LogState) {
	let date = Local::now().format("%Y-%m-%d").to_string();
	if state.current_date != date || state.file.is_none() {
		let dir = state.dir.clone().unwrap_or_else(|| PathBuf::from("logs"));
		let _ = fs::create_dir_all(&dir);
		let path = dir.join(format!("race-{}.log", date));
		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
			state.file = Some(file);
			state.current_date = date;
		}
	}
}

fn format_line(role: &str, turn: u32, module: &str, log_type: &str, message: &str) -> String {
	format!(
		"[{}][{}][T{}][{}:{}] {}\n",
		Local::now().format("%H:%M:%S%.3f"),
		if role.is_empty() { "-" } else { role },
		turn,
		module,
		log_type,
		message
	)
}

pub fn log(module: &str, log_type: &str, message: &str) {
	if let Ok(mut state) = LOG_STATE.lock() {
		if !state.enabled {
			return;
		}
		ensure_log_file(&mut state);

		let line = format_line(&state.role, state.turn, module, log_type, message);
		if let Some(ref mut file) = state.file {
			let _ = file.write_all(line.as_bytes());
			let _ = file.flush();
		}
	}
}

pub mod dealer {
	use super::log;

	pub fn game_started(players: usize, path: &str) {
		log("Dealer", "GAME", &format!("started players={} path={}", players, path));
	}

	pub fn player_spawned(id: usize, program: &str) {
		log("Dealer", "SPAWN", &format!("player {} <- {}", id, program));
	}

	pub fn player_ready(id: usize) {
		log("Dealer", "READY", &format!("player {}", id));
	}

	pub fn turn(id: usize) {
		log("Dealer", "TURN", &format!("player {} to move", id));
	}

	pub fn move_applied(desc: &str) {
		log("Dealer", "MOVE", desc);
	}

	pub fn rejected(id: usize, reason: &str) {
		log("Dealer", "REJECT", &format!("player {}: {}", id, reason));
	}

	pub fn hangup(children: usize) {
		log("Dealer", "SIGNAL", &format!("hangup, killing {} children", children));
	}

	pub fn game_ended(reason: &str) {
		log("Dealer", "GAME", &format!("ended: {}", reason));
	}
}

pub mod agent {
	use super::log;

	pub fn path_received(path: &str) {
		log("Agent", "PATH", path);
	}

	pub fn decision(strategy: &str, rule: &str, site: usize) {
		log("Agent", "DECISION", &format!("{}: {} -> site {}", strategy, rule, site));
	}

	pub fn event(desc: &str) {
		log("Agent", "EVENT", desc);
	}

	pub fn error(msg: &str) {
		log("Agent", "ERROR", msg);
	}

	pub fn finished(outcome: &str) {
		log("Agent", "GAME", outcome);
	}
}
