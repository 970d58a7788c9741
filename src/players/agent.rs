use std::io::{BufRead, Write};

use crate::board::{parse_path, PathError};
use crate::error::PlayerExit;
use crate::events::{GameEvent, PlayerId};
use crate::logging;
use crate::state::GameState;
use crate::strategy::Strategy;
use crate::view;
use crate::wire::{self, classify, decode_event, Incoming, PlayerMessage};

/// What the agent wants done after handling one line from the dealer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStep {
	Reply(PlayerMessage),
	Applied(GameEvent),
	Finish(PlayerExit),
}

/// The player side of the protocol, driven one line at a time.
#[derive(Debug, Clone)]
pub struct Agent {
	id: PlayerId,
	player_count: usize,
	strategy: Strategy,
	state: Option<GameState>,
}

impl Agent {
	pub fn new(id: PlayerId, player_count: usize, strategy: Strategy) -> Self {
		Self {
			id,
			player_count,
			strategy,
			state: None,
		}
	}

	pub fn id(&self) -> PlayerId {
		self.id
	}

	pub fn strategy(&self) -> Strategy {
		self.strategy
	}

	pub fn state(&self) -> Option<&GameState> {
		self.state.as_ref()
	}

	pub fn receive_path(&mut self, line: &str) -> Result<(), PathError> {
		let sites = parse_path(line, self.player_count)?;
		logging::agent::path_received(line);
		self.state = Some(GameState::new(sites, self.player_count));
		Ok(())
	}

	pub fn handle_line(&mut self, line: &str) -> AgentStep {
		let Some(state) = self.state.as_mut() else {
			return AgentStep::Finish(PlayerExit::Comms);
		};

		match classify(line) {
			Incoming::YourTurn => match self.strategy.choose(state, self.id) {
				Some(decision) => {
					logging::agent::decision(self.strategy.name(), decision.rule, decision.site);
					AgentStep::Reply(PlayerMessage::Do(decision.site))
				}
				None => {
					logging::agent::error("no reachable site");
					AgentStep::Finish(PlayerExit::Comms)
				}
			},
			Incoming::Event(body) => {
				let applied = decode_event(body, state.player_count(), state.site_count())
					.map_err(|e| e.to_string())
					.and_then(|event| state.apply_event(&event).map(|_| event).map_err(|e| e.to_string()));
				match applied {
					Ok(event) => {
						logging::agent::event(&event.description());
						AgentStep::Applied(event)
					}
					Err(reason) => {
						logging::agent::error(&reason);
						AgentStep::Finish(PlayerExit::Comms)
					}
				}
			}
			Incoming::EarlyEnd => {
				logging::agent::finished("early game over");
				AgentStep::Finish(PlayerExit::Early)
			}
			Incoming::GameDone => {
				logging::agent::finished("done");
				AgentStep::Finish(PlayerExit::Normal)
			}
			Incoming::Unknown => {
				logging::agent::error(&format!("unexpected line '{}'", line));
				AgentStep::Finish(PlayerExit::Comms)
			}
		}
	}

	pub fn scores(&self) -> Option<Vec<i32>> {
		self.state.as_ref().map(GameState::scores)
	}
}

/// Runs an agent over a pair of streams until the game ends, writing the
/// board and event summaries to `diag`.
pub fn run_agent<R, W, D>(agent: &mut Agent, input: &mut R, output: &mut W, diag: &mut D) -> PlayerExit
where
	R: BufRead,
	W: Write,
	D: Write,
{
	if wire::write_line(output, &PlayerMessage::Ready.encode()).is_err() {
		return PlayerExit::Comms;
	}

	let path = match wire::read_line(input) {
		Ok(Some(line)) => line,
		_ => return PlayerExit::Comms,
	};
	if agent.receive_path(&path).is_err() {
		return PlayerExit::Path;
	}
	if let Some(state) = agent.state() {
		let _ = write!(diag, "{}", view::render_board(state.sites()));
	}

	loop {
		let line = match wire::read_line(input) {
			Ok(Some(line)) => line,
			_ => return PlayerExit::Comms,
		};

		match agent.handle_line(&line) {
			AgentStep::Reply(message) => {
				if wire::write_line(output, &message.encode()).is_err() {
					return PlayerExit::Comms;
				}
			}
			AgentStep::Applied(event) => {
				if let Some(state) = agent.state() {
					if let Some(player) = state.player(event.player) {
						let _ = writeln!(diag, "{}", view::player_summary(player));
					}
					let _ = write!(diag, "{}", view::render_board(state.sites()));
				}
			}
			AgentStep::Finish(exit) => {
				if exit == PlayerExit::Normal {
					if let Some(scores) = agent.scores() {
						let _ = writeln!(diag, "{}", view::scores_line(&scores));
					}
				}
				let _ = diag.flush();
				return exit;
			}
		}
	}
}
