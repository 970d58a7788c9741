use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::PlayerExit;
use crate::events::PlayerId;
use crate::players::agent::{Agent, AgentStep};
use crate::players::port::PlayerPort;
use crate::strategy::Strategy;
use crate::wire::PlayerMessage;

fn lock_mutex<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// An agent running inside the dealer's process, fed through the same line
/// protocol as a child process.
pub struct LocalPlayer {
	agent: Agent,
	path_received: bool,
	outbox: VecDeque<String>,
	exit: Arc<Mutex<Option<PlayerExit>>>,
}

impl LocalPlayer {
	pub fn new(id: PlayerId, player_count: usize, strategy: Strategy) -> Self {
		Self {
			agent: Agent::new(id, player_count, strategy),
			path_received: false,
			outbox: VecDeque::from([PlayerMessage::Ready.encode()]),
			exit: Arc::new(Mutex::new(None)),
		}
	}

	/// Shared view of how the agent finished, readable after the player has
	/// been handed to a dealer.
	pub fn exit_handle(&self) -> Arc<Mutex<Option<PlayerExit>>> {
		Arc::clone(&self.exit)
	}

	pub fn exit(&self) -> Option<PlayerExit> {
		*lock_mutex(&self.exit)
	}

	fn finish(&mut self, exit: PlayerExit) {
		*lock_mutex(&self.exit) = Some(exit);
	}
}

impl PlayerPort for LocalPlayer {
	fn id(&self) -> PlayerId {
		self.agent.id()
	}

	fn send(&mut self, line: &str) -> io::Result<()> {
		if self.exit().is_some() {
			return Err(io::Error::new(io::ErrorKind::BrokenPipe, "player has exited"));
		}

		if !self.path_received {
			self.path_received = true;
			if self.agent.receive_path(line).is_err() {
				self.finish(PlayerExit::Path);
			}
			return Ok(());
		}

		match self.agent.handle_line(line) {
			AgentStep::Reply(message) => self.outbox.push_back(message.encode()),
			AgentStep::Applied(_) => {}
			AgentStep::Finish(exit) => self.finish(exit),
		}
		Ok(())
	}

	fn receive(&mut self) -> io::Result<Option<String>> {
		Ok(self.outbox.pop_front())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_local_player_handshake_and_move() {
		let mut player = LocalPlayer::new(PlayerId(0), 1, Strategy::A);
		assert_eq!(player.receive().unwrap(), Some("^".to_string()));
		assert_eq!(player.receive().unwrap(), None);

		player.send("3;::-Mo-::-").unwrap();
		player.send("YT").unwrap();
		assert_eq!(player.receive().unwrap(), Some("DO1".to_string()));
		assert_eq!(player.exit(), None);

		player.send("DONE").unwrap();
		assert_eq!(player.exit(), Some(PlayerExit::Normal));
		assert!(player.send("YT").is_err());
	}

	#[test]
	fn test_local_player_bad_path() {
		let mut player = LocalPlayer::new(PlayerId(1), 2, Strategy::B);
		let handle = player.exit_handle();
		player.send("bogus").unwrap();
		assert_eq!(*handle.lock().unwrap(), Some(PlayerExit::Path));
	}
}
