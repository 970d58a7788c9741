use std::io;

use clap::error::ErrorKind;
use clap::Parser;

use crate::config::{load_config_auto, parse_player_count, parse_player_id};
use crate::error::PlayerExit;
use crate::logging;
use crate::players::agent::{run_agent, Agent};
use crate::strategy::Strategy;

#[derive(Parser, Debug)]
#[command(about = "Site race player, driven by a dealer over stdin/stdout")]
pub struct PlayerArgs {
	/// Number of players in the game
	#[arg(allow_hyphen_values = true)]
	pub player_count: String,

	/// This player's id, counting from 0
	#[arg(allow_hyphen_values = true)]
	pub id: String,
}

/// Entry point shared by the player binaries. Diagnostics go to stderr,
/// protocol lines to stdout.
pub fn player_main(strategy: Strategy) -> PlayerExit {
	let args = match PlayerArgs::try_parse() {
		Ok(args) => args,
		Err(e) => match e.kind() {
			ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
				let _ = e.print();
				return PlayerExit::Normal;
			}
			_ => return PlayerExit::Usage,
		},
	};
	run_player(&args, strategy)
}

pub fn run_player(args: &PlayerArgs, strategy: Strategy) -> PlayerExit {
	let count = match parse_player_count(&args.player_count) {
		Ok(count) => count,
		Err(e) => return PlayerExit::from_config(&e),
	};
	let id = match parse_player_id(&args.id, count) {
		Ok(id) => id,
		Err(e) => return PlayerExit::from_config(&e),
	};

	if let Ok(config) = load_config_auto() {
		if config.logging.enabled {
			logging::init(&config.logging.dir, &format!("player{}", id));
		}
	}

	let mut agent = Agent::new(id, count, strategy);
	let mut input = io::stdin().lock();
	let mut output = io::stdout().lock();
	let mut diag = io::stderr().lock();
	run_agent(&mut agent, &mut input, &mut output, &mut diag)
}
