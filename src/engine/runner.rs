use std::io::Write;

use crate::board::SiteKind;
use crate::engine::deck::Deck;
use crate::error::RaceError;
use crate::events::{GameEvent, PlayerId};
use crate::logging;
use crate::players::PlayerPort;
use crate::state::GameState;
use crate::view;
use crate::wire::{DealerMessage, PlayerMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
	Idle,
	AwaitingMove(PlayerId),
	Applying { player: PlayerId, site: usize },
	Over,
}

/// Referee for one game: owns the authoritative state and talks to every
/// player through its port, one outstanding request at a time.
pub struct Dealer {
	state: GameState,
	deck: Deck,
	path_line: String,
	ports: Vec<Box<dyn PlayerPort>>,
	phase: TurnPhase,
	turns: u32,
	history: Vec<GameEvent>,
	show_board: bool,
}

impl Dealer {
	pub fn new(state: GameState, deck: Deck, path_line: impl Into<String>, ports: Vec<Box<dyn PlayerPort>>) -> Self {
		Self {
			state,
			deck,
			path_line: path_line.into(),
			ports,
			phase: TurnPhase::Idle,
			turns: 0,
			history: Vec::new(),
			show_board: true,
		}
	}

	pub fn with_board(mut self, show: bool) -> Self {
		self.show_board = show;
		self
	}

	pub fn state(&self) -> &GameState {
		&self.state
	}

	pub fn phase(&self) -> TurnPhase {
		self.phase
	}

	pub fn turns(&self) -> u32 {
		self.turns
	}

	pub fn history(&self) -> &[GameEvent] {
		&self.history
	}

	pub fn path_line(&self) -> &str {
		&self.path_line
	}

	/// Waits for each player's readiness signal in id order and answers it
	/// with the path.
	pub fn start(&mut self) -> Result<(), RaceError> {
		logging::dealer::game_started(self.ports.len(), &self.path_line);
		let path = DealerMessage::Path(self.path_line.clone()).encode();

		for port in self.ports.iter_mut() {
			let id = port.id();
			let not_ready = |reason: String| RaceError::NotReady { id, reason };

			match port.receive() {
				Ok(Some(line)) if PlayerMessage::decode(&line) == Ok(PlayerMessage::Ready) => {}
				Ok(Some(line)) => return Err(not_ready(format!("sent '{}'", line))),
				Ok(None) => return Err(not_ready("closed its output".to_string())),
				Err(e) => return Err(not_ready(e.to_string())),
			}
			port.send(&path).map_err(|e| not_ready(e.to_string()))?;
			logging::dealer::player_ready(id.0);
		}
		Ok(())
	}

	/// Advances the turn state machine by one transition.
	pub fn step(&mut self) -> Result<TurnPhase, RaceError> {
		let phase = self.phase;
		self.phase = match phase {
			TurnPhase::Idle => match self.state.next_mover() {
				Some(id) if !self.state.is_over() => {
					logging::dealer::turn(id.0);
					self.send_to(id, &DealerMessage::YourTurn)?;
					TurnPhase::AwaitingMove(id)
				}
				_ => TurnPhase::Over,
			},
			TurnPhase::AwaitingMove(id) => {
				let site = self.receive_move(id)?;
				TurnPhase::Applying { player: id, site }
			}
			TurnPhase::Applying { player, site } => {
				self.apply_move(player, site)?;
				TurnPhase::Idle
			}
			TurnPhase::Over => TurnPhase::Over,
		};
		Ok(self.phase)
	}

	/// Plays the game to the end. Board and summaries go to `diag` when
	/// enabled. On a protocol or rule failure every player is told the game
	/// ended early.
	pub fn run<W: Write>(&mut self, diag: &mut W) -> Result<Vec<i32>, RaceError> {
		self.start()?;
		if self.show_board {
			let _ = write!(diag, "{}", view::render_board(self.state.sites()));
		}

		loop {
			let before = self.phase;
			match self.step() {
				Ok(TurnPhase::Over) => break,
				Ok(_) => {
					if let TurnPhase::Applying { player, .. } = before {
						self.show_move(diag, player);
					}
				}
				Err(err) => {
					if err.ends_game_early() {
						self.broadcast(&DealerMessage::Early);
					}
					logging::dealer::game_ended(&err.to_string());
					let _ = diag.flush();
					return Err(err);
				}
			}
		}

		self.broadcast(&DealerMessage::Done);
		logging::dealer::game_ended("all players finished");
		let _ = diag.flush();
		Ok(self.state.scores())
	}

	/// Sends a message to every player in id order, ignoring write failures.
	pub fn broadcast(&mut self, message: &DealerMessage) {
		let line = message.encode();
		for port in self.ports.iter_mut() {
			let _ = port.send(&line);
		}
	}

	fn port(&mut self, id: PlayerId) -> Result<&mut Box<dyn PlayerPort>, RaceError> {
		self.ports.get_mut(id.0).ok_or_else(|| RaceError::Protocol {
			id,
			reason: "no connection for player".to_string(),
		})
	}

	fn send_to(&mut self, id: PlayerId, message: &DealerMessage) -> Result<(), RaceError> {
		let line = message.encode();
		self.port(id)?.send(&line).map_err(|e| RaceError::Protocol {
			id,
			reason: e.to_string(),
		})
	}

	fn receive_move(&mut self, id: PlayerId) -> Result<usize, RaceError> {
		let protocol = |reason: String| RaceError::Protocol { id, reason };
		let line = self
			.port(id)?
			.receive()
			.map_err(|e| protocol(e.to_string()))?
			.ok_or_else(|| protocol("closed its output".to_string()))?;

		match PlayerMessage::decode(&line) {
			Ok(PlayerMessage::Do(site)) => Ok(site),
			Ok(PlayerMessage::Ready) => Err(protocol("sent '^' during play".to_string())),
			Err(e) => {
				logging::dealer::rejected(id.0, &e.to_string());
				Err(protocol(e.to_string()))
			}
		}
	}

	fn apply_move(&mut self, id: PlayerId, site: usize) -> Result<(), RaceError> {
		let violation = |source| RaceError::RuleViolation { id, site, source };
		if let Err(e) = self.state.check_move(id, site) {
			logging::dealer::rejected(id.0, &e.to_string());
			return Err(violation(e));
		}

		let card = match self.state.site(site).map(|s| s.kind()) {
			Some(SiteKind::Ri) => Some(self.deck.draw()),
			_ => None,
		};
		let event = self.state.resolve_move(id, site, card).map_err(violation)?;
		self.state.apply_event(&event).map_err(violation)?;
		debug_assert!(self.state.occupancy_consistent());

		self.broadcast(&DealerMessage::Happened(event));
		self.turns += 1;
		logging::set_turn(self.turns);
		logging::dealer::move_applied(&event.description());
		self.history.push(event);
		Ok(())
	}

	fn show_move<W: Write>(&self, diag: &mut W, id: PlayerId) {
		if !self.show_board {
			return;
		}
		if let Some(player) = self.state.player(id) {
			let _ = writeln!(diag, "{}", view::player_summary(player));
		}
		let _ = write!(diag, "{}", view::render_board(self.state.sites()));
	}
}
