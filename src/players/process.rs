use std::io::{self, BufReader};
use std::process::{ChildStdin, ChildStdout, Command, Stdio};

use crate::config::PlayerStderr;
use crate::engine::ShutdownHandle;
use crate::error::RaceError;
use crate::events::PlayerId;
use crate::logging;
use crate::players::port::PlayerPort;
use crate::wire;

/// A player running as a child process, spoken to over its stdin/stdout.
pub struct ProcessPlayer {
	id: PlayerId,
	stdin: ChildStdin,
	stdout: BufReader<ChildStdout>,
}

impl PlayerPort for ProcessPlayer {
	fn id(&self) -> PlayerId {
		self.id
	}

	fn send(&mut self, line: &str) -> io::Result<()> {
		wire::write_line(&mut self.stdin, line)
	}

	fn receive(&mut self) -> io::Result<Option<String>> {
		wire::read_line(&mut self.stdout)
	}
}

fn stderr_mode(mode: PlayerStderr) -> Stdio {
	match mode {
		PlayerStderr::Null => Stdio::null(),
		PlayerStderr::Inherit => Stdio::inherit(),
	}
}

/// Starts one child per program with arguments `<player count> <id>`. Each
/// child is registered with `shutdown`; if any fails to start, the ones
/// already running are killed.
pub fn spawn_players(
	programs: &[String],
	stderr: PlayerStderr,
	shutdown: &ShutdownHandle,
) -> Result<Vec<Box<dyn PlayerPort>>, RaceError> {
	let count = programs.len();
	let mut ports: Vec<Box<dyn PlayerPort>> = Vec::with_capacity(count);

	for (index, program) in programs.iter().enumerate() {
		let id = PlayerId(index);
		match spawn_one(program, id, count, stderr, shutdown) {
			Ok(port) => {
				logging::dealer::player_spawned(index, program);
				ports.push(Box::new(port));
			}
			Err(source) => {
				shutdown.kill_all();
				return Err(RaceError::Spawn {
					id,
					program: program.clone(),
					source,
				});
			}
		}
	}

	Ok(ports)
}

fn spawn_one(
	program: &str,
	id: PlayerId,
	count: usize,
	stderr: PlayerStderr,
	shutdown: &ShutdownHandle,
) -> io::Result<ProcessPlayer> {
	let mut command = Command::new(program);
	command
		.arg(count.to_string())
		.arg(id.to_string())
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(stderr_mode(stderr));
	let (stdin, stdout) = shutdown.spawn(id, &mut command)?;

	Ok(ProcessPlayer {
		id,
		stdin,
		stdout: BufReader::new(stdout),
	})
}
