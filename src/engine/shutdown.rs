use std::io;
use std::process::{self, Child, ChildStdin, ChildStdout, Command};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use signal_hook::consts::SIGHUP;
use signal_hook::iterator::Signals;

use crate::events::PlayerId;
use crate::logging;

fn lock_mutex<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// The set of spawned player processes, shared with the hang-up listener.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
	children: Arc<Mutex<Vec<(PlayerId, Child)>>>,
}

impl ShutdownHandle {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts `command` and registers the child while holding the registry
	/// lock, so `kill_all` never misses a started child. The command must pipe
	/// stdin and stdout.
	pub fn spawn(&self, id: PlayerId, command: &mut Command) -> io::Result<(ChildStdin, ChildStdout)> {
		let mut children = lock_mutex(&self.children);
		let mut child = command.spawn()?;
		let pipes = child.stdin.take().zip(child.stdout.take());
		children.push((id, child));
		pipes.ok_or_else(|| io::Error::other("child pipes not captured"))
	}

	pub fn len(&self) -> usize {
		lock_mutex(&self.children).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Kills every child still running and reaps them all.
	pub fn kill_all(&self) {
		let mut children = lock_mutex(&self.children);
		for (_, child) in children.iter_mut() {
			if let Ok(None) = child.try_wait() {
				let _ = child.kill();
			}
			let _ = child.wait();
		}
		children.clear();
	}

	/// Reaps every child, waiting for those still running.
	pub fn wait_all(&self) {
		let mut children = lock_mutex(&self.children);
		for (_, child) in children.iter_mut() {
			let _ = child.wait();
		}
		children.clear();
	}

	/// Starts a thread that kills all children and exits the process with
	/// status 0 when SIGHUP arrives.
	pub fn listen_for_hangup(&self) -> io::Result<JoinHandle<()>> {
		let mut signals = Signals::new([SIGHUP])?;
		let handle = self.clone();
		Ok(thread::spawn(move || {
			if signals.forever().next().is_some() {
				logging::dealer::hangup(handle.len());
				handle.kill_all();
				process::exit(0);
			}
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::process::{Command, Stdio};

	#[test]
	fn test_kill_all_reaps_running_children() {
		let shutdown = ShutdownHandle::new();
		let mut command = Command::new("sleep");
		command.arg("30").stdin(Stdio::piped()).stdout(Stdio::piped());
		let _pipes = shutdown.spawn(PlayerId(0), &mut command).unwrap();
		assert_eq!(shutdown.len(), 1);

		shutdown.kill_all();
		assert!(shutdown.is_empty());
	}

	#[test]
	fn test_spawn_registers_child_with_pipes() {
		let shutdown = ShutdownHandle::new();
		let mut command = Command::new("cat");
		command.stdin(Stdio::piped()).stdout(Stdio::piped());
		let (stdin, _stdout) = shutdown.spawn(PlayerId(0), &mut command).unwrap();
		assert_eq!(shutdown.len(), 1);
		drop(stdin);
		shutdown.wait_all();
		assert!(shutdown.is_empty());
	}

	#[test]
	fn test_spawn_failure_registers_nothing() {
		let shutdown = ShutdownHandle::new();
		let mut command = Command::new("/nonexistent/site-race-player");
		assert!(shutdown.spawn(PlayerId(0), &mut command).is_err());
		assert!(shutdown.is_empty());
	}

	#[test]
	fn test_wait_all_on_finished_children() {
		let shutdown = ShutdownHandle::new();
		let clone = shutdown.clone();
		let mut command = Command::new("true");
		command.stdin(Stdio::piped()).stdout(Stdio::piped());
		let _pipes = clone.spawn(PlayerId(1), &mut command).unwrap();
		assert_eq!(shutdown.len(), 1);
		shutdown.wait_all();
		assert!(clone.is_empty());
	}
}
