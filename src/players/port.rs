use std::io;

use crate::events::PlayerId;

/// The dealer's line-oriented connection to one player, whether a child
/// process or an in-process agent.
pub trait PlayerPort: Send {
	fn id(&self) -> PlayerId;

	/// Sends one protocol line, without its terminator.
	fn send(&mut self, line: &str) -> io::Result<()>;

	/// Next line from the player, or `None` once the player has gone away.
	fn receive(&mut self) -> io::Result<Option<String>>;
}
