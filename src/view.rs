use crate::board::Site;
use crate::events::Card;
use crate::state::Player;

/// Text rendering of the track: site names on the first line, then one row
/// per occupant depth with each player's id under its site.
pub fn render_board(sites: &[Site]) -> String {
	let mut out = String::new();
	for site in sites {
		out.push_str(site.name());
		out.push(' ');
	}
	out.push('\n');

	let depth = sites.iter().map(|s| s.occupants().len()).max().unwrap_or(0);
	for row in 0..depth {
		for site in sites {
			match site.occupants().get(row) {
				Some(id) => out.push_str(&format!("{}  ", id)),
				None => out.push_str("   "),
			}
		}
		out.push('\n');
	}
	out
}

pub fn player_summary(player: &Player) -> String {
	let cards: Vec<String> = Card::ALL
		.iter()
		.map(|&card| format!("{:?}={}", card, player.hand.count(card)))
		.collect();
	format!(
		"Player {} Money={} V1={} V2={} Points={} {}",
		player.id,
		player.money,
		player.v1_visits,
		player.v2_visits,
		player.points,
		cards.join(" ")
	)
}

pub fn scores_line(scores: &[i32]) -> String {
	let scores: Vec<String> = scores.iter().map(|s| s.to_string()).collect();
	format!("Scores: {}", scores.join(","))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::board::parse_path;
	use crate::events::PlayerId;
	use crate::state::GameState;

	#[test]
	fn test_render_initial_board() {
		let state = GameState::new(parse_path("4;::-Mo2V11::-", 3).unwrap(), 3);
		let expected = "\
:: Mo V1 :: \n\
2           \n\
1           \n\
0           \n";
		assert_eq!(render_board(state.sites()), expected);
	}

	#[test]
	fn test_render_after_moves() {
		let mut state = GameState::new(parse_path("3;::-Mo-::-", 2).unwrap(), 2);
		let event = state.resolve_move(PlayerId(0), 1, None).unwrap();
		state.apply_event(&event).unwrap();
		assert_eq!(render_board(state.sites()), ":: Mo :: \n1  0     \n");
	}

	#[test]
	fn test_player_summary() {
		let mut player = Player::new(PlayerId(1));
		player.hand.add(Card::B);
		player.hand.add(Card::B);
		player.points = 4;
		assert_eq!(
			player_summary(&player),
			"Player 1 Money=7 V1=0 V2=0 Points=4 A=0 B=2 C=0 D=0 E=0"
		);
	}

	#[test]
	fn test_scores_line() {
		assert_eq!(scores_line(&[12, 0, 5]), "Scores: 12,0,5");
	}
}
