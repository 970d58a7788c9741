use crate::board::SiteKind;
use crate::events::PlayerId;
use crate::state::GameState;
use crate::strategy::Decision;

pub fn choose(state: &GameState, me: PlayerId) -> Option<Decision> {
	let player = state.player(me)?;
	let current = player.site;

	let next_has_room = state.site(current + 1).is_some_and(|s| s.has_room());
	if next_has_room && state.least_advanced() == Some(me) {
		return Some(Decision::new(current + 1, "last alone, step"));
	}

	if player.money % 2 != 0 {
		if let Some(site) = state.find_before_barrier(SiteKind::Mo, current) {
			return Some(Decision::new(site, "odd money, Mo"));
		}
	}

	if holds_most_cards(state, me) {
		if let Some(site) = state.find_before_barrier(SiteKind::Ri, current) {
			return Some(Decision::new(site, "most cards, Ri"));
		}
	}

	if let Some(site) = state.find_before_barrier(SiteKind::V2, current) {
		return Some(Decision::new(site, "V2"));
	}

	state
		.nearest_vacant(current, |_| true)
		.map(|site| Decision::new(site, "next vacant"))
}

/// Strictly more cards than every other player, or nobody holds any.
fn holds_most_cards(state: &GameState, me: PlayerId) -> bool {
	let mine = state.player(me).map_or(0, |p| p.hand.total());
	let players = state.players();
	players.iter().filter(|p| p.id != me).all(|p| p.hand.total() < mine)
		|| players.iter().all(|p| p.hand.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::board::parse_path;
	use crate::events::{Card, GameEvent};

	fn game(path: &str, players: usize) -> GameState {
		GameState::new(parse_path(path, players).unwrap(), players)
	}

	fn advance(state: &mut GameState, id: usize, site: usize, card: Option<Card>) {
		let event = state.resolve_move(PlayerId(id), site, card).unwrap();
		state.apply_event(&event).unwrap();
	}

	fn replay(state: &mut GameState, id: usize, site: usize, money: i32, card: Option<Card>) {
		let event = GameEvent {
			player: PlayerId(id),
			site,
			point_change: 0,
			money_change: money,
			card,
		};
		state.apply_event(&event).unwrap();
	}

	#[test]
	fn test_lone_straggler_steps_forward() {
		let mut state = game("5;::-V1-V2-Ri-::-", 2);
		advance(&mut state, 0, 3, None);
		let decision = choose(&state, PlayerId(1)).unwrap();
		assert_eq!(decision.site, 1);
		assert_eq!(decision.rule, "last alone, step");
	}

	#[test]
	fn test_odd_money_seeks_mo() {
		let state = game("5;::-V1-Mo-V2-::-", 2);
		let decision = choose(&state, PlayerId(0)).unwrap();
		assert_eq!(decision.site, 2);
		assert_eq!(decision.rule, "odd money, Mo");
	}

	#[test]
	fn test_negative_odd_money_seeks_mo() {
		let mut state = game("5;::-V1-Mo-V2-::-", 2);
		replay(&mut state, 0, 1, -8, None);
		assert_eq!(state.player(PlayerId(0)).unwrap().money, -1);
		let decision = choose(&state, PlayerId(0)).unwrap();
		assert_eq!(decision.site, 2);
		assert_eq!(decision.rule, "odd money, Mo");
	}

	#[test]
	fn test_ri_when_nobody_has_cards() {
		let mut state = game("5;::-Mo-V1-Ri-::-", 2);
		advance(&mut state, 0, 1, None);
		advance(&mut state, 1, 1, None);
		let decision = choose(&state, PlayerId(1)).unwrap();
		assert_eq!(decision.site, 3);
		assert_eq!(decision.rule, "most cards, Ri");
	}

	#[test]
	fn test_tied_card_counts_fall_through_to_v2() {
		let mut state = game("6;::-Ri-Mo-Ri-V2-::-", 3);
		replay(&mut state, 0, 1, 1, Some(Card::A));
		replay(&mut state, 1, 1, 0, Some(Card::B));
		replay(&mut state, 2, 1, 0, None);
		let decision = choose(&state, PlayerId(0)).unwrap();
		assert_eq!(decision.site, 4);
		assert_eq!(decision.rule, "V2");

		replay(&mut state, 1, 2, 0, None);
		replay(&mut state, 0, 1, 0, Some(Card::C));
		let decision = choose(&state, PlayerId(0)).unwrap();
		assert_eq!(decision.site, 3);
	}

	#[test]
	fn test_holds_most_cards() {
		let mut state = game("6;::-Ri-Ri-Ri-Mo-::-", 3);
		assert!(holds_most_cards(&state, PlayerId(0)));
		advance(&mut state, 0, 1, Some(Card::A));
		assert!(holds_most_cards(&state, PlayerId(0)));
		assert!(!holds_most_cards(&state, PlayerId(1)));
		advance(&mut state, 1, 2, Some(Card::C));
		assert!(!holds_most_cards(&state, PlayerId(0)));
		assert!(!holds_most_cards(&state, PlayerId(1)));
		replay(&mut state, 1, 3, 0, Some(Card::D));
		assert!(holds_most_cards(&state, PlayerId(1)));
	}

	#[test]
	fn test_v2_before_next_vacant() {
		let state = game("5;::-V1-V21V1-::-", 2);
		let decision = choose(&state, PlayerId(0)).unwrap();
		assert_eq!(decision.site, 2);
		assert_eq!(decision.rule, "V2");
	}

	#[test]
	fn test_next_vacant_fallback() {
		let mut state = game("5;::-V11Mo1Do-::-", 2);
		replay(&mut state, 0, 1, 1, None);
		let decision = choose(&state, PlayerId(0)).unwrap();
		assert_eq!(decision.site, 2);
		assert_eq!(decision.rule, "next vacant");
	}
}
