use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::events::PlayerId;
use crate::players::port::PlayerPort;

fn lock_mutex<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Replays a fixed list of replies and records every line it is sent.
/// Once the script runs out it behaves like a closed pipe.
pub struct ScriptedPlayer {
	id: PlayerId,
	replies: VecDeque<String>,
	received: Arc<Mutex<Vec<String>>>,
	reject_sends: bool,
}

impl ScriptedPlayer {
	pub fn new(id: PlayerId) -> Self {
		Self {
			id,
			replies: VecDeque::new(),
			received: Arc::new(Mutex::new(Vec::new())),
			reject_sends: false,
		}
	}

	pub fn with_replies<I, S>(mut self, replies: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.replies = replies.into_iter().map(Into::into).collect();
		self
	}

	/// Every `send` fails, as if the player's stdin had been closed.
	pub fn with_broken_input(mut self) -> Self {
		self.reject_sends = true;
		self
	}

	pub fn received(&self) -> Arc<Mutex<Vec<String>>> {
		Arc::clone(&self.received)
	}
}

impl PlayerPort for ScriptedPlayer {
	fn id(&self) -> PlayerId {
		self.id
	}

	fn send(&mut self, line: &str) -> io::Result<()> {
		if self.reject_sends {
			return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
		}
		lock_mutex(&self.received).push(line.to_string());
		Ok(())
	}

	fn receive(&mut self) -> io::Result<Option<String>> {
		Ok(self.replies.pop_front())
	}
}
