use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;

use site_race::config::{load_config, load_config_auto, read_deck, read_track};
use site_race::engine::{Dealer, ShutdownHandle};
use site_race::error::{ConfigError, DealerExit};
use site_race::logging;
use site_race::players::spawn_players;
use site_race::report::{GameReport, Outcome};
use site_race::state::{GameState, MAX_PLAYER_COUNT};
use site_race::view;

#[derive(Parser)]
#[command(name = "dealer")]
#[command(about = "Referee a site race between player processes")]
struct Cli {
	/// Deck file
	deck: PathBuf,

	/// Path file
	path: PathBuf,

	/// Player programs, one per player in id order
	#[arg(required = true)]
	players: Vec<String>,

	#[arg(short, long, env = "SITE_RACE_CONFIG")]
	config: Option<PathBuf>,

	/// Write a JSON summary of the game to this file
	#[arg(long)]
	report: Option<PathBuf>,

	/// Do not print the board after each move
	#[arg(short, long)]
	quiet: bool,
}

fn fail(exit: DealerExit) -> DealerExit {
	if let Some(message) = exit.message() {
		eprintln!("{}", message);
	}
	exit
}

fn main() {
	process::exit(run().code());
}

fn run() -> DealerExit {
	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		Err(e) => match e.kind() {
			ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
				let _ = e.print();
				return DealerExit::Normal;
			}
			_ => return fail(DealerExit::Usage),
		},
	};

	let config = match &cli.config {
		Some(path) => load_config(path),
		None => load_config_auto(),
	};
	let config = match config {
		Ok(config) => config,
		Err(e) => return fail(DealerExit::from_config(&e)),
	};
	if config.logging.enabled {
		logging::init(&config.logging.dir, "dealer");
	}

	let count = cli.players.len();
	if count > MAX_PLAYER_COUNT {
		let err = ConfigError::Usage(format!("at most {} players", MAX_PLAYER_COUNT));
		return fail(DealerExit::from_config(&err));
	}

	let deck = match read_deck(&cli.deck) {
		Ok(deck) => deck,
		Err(e) => return fail(DealerExit::from_config(&e)),
	};
	let (path_line, sites) = match read_track(&cli.path, count) {
		Ok(track) => track,
		Err(e) => return fail(DealerExit::from_config(&e)),
	};

	let shutdown = ShutdownHandle::new();
	if let Err(e) = shutdown.listen_for_hangup() {
		logging::dealer::game_ended(&format!("no hangup handler: {}", e));
	}

	let ports = match spawn_players(&cli.players, config.dealer.player_stderr, &shutdown) {
		Ok(ports) => ports,
		Err(e) => return fail(e.exit()),
	};

	let state = GameState::new(sites, count);
	let mut dealer = Dealer::new(state, deck, path_line, ports).with_board(config.dealer.show_board && !cli.quiet);
	let mut out = io::stdout().lock();
	let result = dealer.run(&mut out);

	if let Some(report_path) = &cli.report {
		let report = match &result {
			Ok(_) => GameReport::new(dealer.state(), dealer.path_line(), dealer.turns(), Outcome::Completed),
			Err(e) => {
				let outcome = if e.ends_game_early() { Outcome::EndedEarly } else { Outcome::Aborted };
				GameReport::new(dealer.state(), dealer.path_line(), dealer.turns(), outcome).with_error(e)
			}
		};
		if let Err(e) = report.write_to(report_path) {
			eprintln!("cannot write report {}: {}", report_path.display(), e);
		}
	}

	match result {
		Ok(scores) => {
			let _ = writeln!(out, "{}", view::scores_line(&scores));
			let _ = out.flush();
			drop(dealer);
			shutdown.wait_all();
			DealerExit::Normal
		}
		Err(e) => {
			drop(dealer);
			shutdown.kill_all();
			fail(e.exit())
		}
	}
}
