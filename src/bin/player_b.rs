use std::process;

use site_race::players::player_main;
use site_race::strategy::Strategy;

fn main() {
	let exit = player_main(Strategy::B);
	if let Some(message) = exit.message() {
		eprintln!("{}", message);
	}
	process::exit(exit.code());
}
