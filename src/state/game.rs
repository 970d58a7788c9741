use thiserror::Error;

use crate::board::{Site, SiteKind};
use crate::events::{Card, GameEvent, PlayerId};
use crate::state::player::Player;

/// Upper bound on players in one game.
pub const MAX_PLAYER_COUNT: usize = 200;

pub const MO_MONEY_GAIN: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
	#[error("player {0} is not in the game")]
	UnknownPlayer(PlayerId),
	#[error("site {site} is outside the path")]
	OutOfBounds { site: usize },
	#[error("site {site} is not ahead of site {current}")]
	NotForward { current: usize, site: usize },
	#[error("site {site} is full")]
	SiteFull { site: usize },
	#[error("site {site} lies beyond the barrier at site {barrier}")]
	BeyondBarrier { site: usize, barrier: usize },
	#[error("totals for player {0} would overflow")]
	Overflow(PlayerId),
}

/// Sites and players of one game. The dealer holds the authoritative copy and
/// every player agent holds a replica; both change only through
/// [`GameState::apply_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
	sites: Vec<Site>,
	players: Vec<Player>,
}

impl GameState {
	/// Places every player on the first site. Higher ids arrive first so that
	/// player 0 is the most recent arrival and moves first.
	pub fn new(mut sites: Vec<Site>, player_count: usize) -> Self {
		let players: Vec<Player> = (0..player_count).map(|i| Player::new(PlayerId(i))).collect();
		if let Some(start) = sites.first_mut() {
			for id in (0..player_count).rev() {
				start.arrive(PlayerId(id));
			}
		}
		Self { sites, players }
	}

	pub fn sites(&self) -> &[Site] {
		&self.sites
	}

	pub fn site(&self, index: usize) -> Option<&Site> {
		self.sites.get(index)
	}

	pub fn site_count(&self) -> usize {
		self.sites.len()
	}

	pub fn players(&self) -> &[Player] {
		&self.players
	}

	pub fn player(&self, id: PlayerId) -> Option<&Player> {
		self.players.get(id.0)
	}

	pub fn player_count(&self) -> usize {
		self.players.len()
	}

	fn last_site(&self) -> usize {
		self.sites.len().saturating_sub(1)
	}

	pub fn is_over(&self) -> bool {
		let last = self.last_site();
		self.players.iter().all(|p| p.site == last)
	}

	/// The most recent arrival at the lowest-index occupied site.
	pub fn next_mover(&self) -> Option<PlayerId> {
		self.sites
			.iter()
			.find(|s| !s.is_empty())
			.and_then(|s| s.occupants().last().copied())
	}

	/// The player alone on the earliest occupied site, if nobody shares it.
	pub fn least_advanced(&self) -> Option<PlayerId> {
		let site = self.sites.iter().find(|s| !s.is_empty())?;
		match site.occupants() {
			[only] => Some(*only),
			_ => None,
		}
	}

	pub fn next_barrier(&self, from: usize) -> Option<usize> {
		self.sites
			.iter()
			.skip(from + 1)
			.find(|s| s.is_barrier())
			.map(Site::index)
	}

	/// First site of `kind` with room after `from`, stopping at the next barrier.
	pub fn find_before_barrier(&self, kind: SiteKind, from: usize) -> Option<usize> {
		for site in self.sites.iter().skip(from + 1) {
			if site.kind() == kind && site.has_room() {
				return Some(site.index());
			}
			if site.is_barrier() {
				return None;
			}
		}
		None
	}

	/// First site with room after `from` whose kind satisfies `accept`.
	pub fn nearest_vacant(&self, from: usize, accept: impl Fn(SiteKind) -> bool) -> Option<usize> {
		self.sites
			.iter()
			.skip(from + 1)
			.find(|s| accept(s.kind()) && s.has_room())
			.map(Site::index)
	}

	pub fn check_move(&self, id: PlayerId, site: usize) -> Result<(), MoveError> {
		let player = self.player(id).ok_or(MoveError::UnknownPlayer(id))?;
		let target = self.site(site).ok_or(MoveError::OutOfBounds { site })?;
		let current = player.site;
		if site <= current {
			return Err(MoveError::NotForward { current, site });
		}
		if !target.has_room() {
			return Err(MoveError::SiteFull { site });
		}
		if let Some(barrier) = self.next_barrier(current) {
			if site > barrier {
				return Err(MoveError::BeyondBarrier { site, barrier });
			}
		}
		Ok(())
	}

	/// Validates a move and works out what it earns, without changing state.
	pub fn resolve_move(&self, id: PlayerId, site: usize, card: Option<Card>) -> Result<GameEvent, MoveError> {
		self.check_move(id, site)?;
		let player = &self.players[id.0];
		let (point_change, money_change) = match self.sites[site].kind() {
			SiteKind::Mo => (0, MO_MONEY_GAIN),
			SiteKind::Do => (player.money / 2, -player.money),
			SiteKind::V1 | SiteKind::V2 | SiteKind::Ri | SiteKind::Barrier => (0, 0),
		};
		let card = match self.sites[site].kind() {
			SiteKind::Ri => card,
			_ => None,
		};
		Ok(GameEvent {
			player: id,
			site,
			point_change,
			money_change,
			card,
		})
	}

	/// Replays one event. Used unchanged by the dealer and by every replica.
	pub fn apply_event(&mut self, event: &GameEvent) -> Result<(), MoveError> {
		let id = event.player;
		let player = self.players.get_mut(id.0).ok_or(MoveError::UnknownPlayer(id))?;
		let kind = self
			.sites
			.get(event.site)
			.map(Site::kind)
			.ok_or(MoveError::OutOfBounds { site: event.site })?;

		let overflow = MoveError::Overflow(id);
		let points = player.points.checked_add(event.point_change).ok_or(overflow)?;
		let money = player.money.checked_add(event.money_change).ok_or(overflow)?;
		let (v1_visits, v2_visits) = match kind {
			SiteKind::V1 => (player.v1_visits.checked_add(1).ok_or(overflow)?, player.v2_visits),
			SiteKind::V2 => (player.v1_visits, player.v2_visits.checked_add(1).ok_or(overflow)?),
			_ => (player.v1_visits, player.v2_visits),
		};

		self.sites[player.site].depart(id);
		player.site = event.site;
		player.points = points;
		player.money = money;
		player.v1_visits = v1_visits;
		player.v2_visits = v2_visits;
		if let Some(card) = event.card {
			player.hand.add(card);
		}
		self.sites[event.site].arrive(id);
		Ok(())
	}

	pub fn scores(&self) -> Vec<i32> {
		self.players.iter().map(Player::score).collect()
	}

	/// Every player is listed exactly once, at its own site, and no site is
	/// over capacity.
	pub fn occupancy_consistent(&self) -> bool {
		let listed: usize = self.sites.iter().map(|s| s.occupants().len()).sum();
		listed == self.players.len()
			&& self.sites.iter().all(|s| s.occupants().len() <= s.capacity())
			&& self.players.iter().all(|p| {
				self.sites
					.get(p.site)
					.is_some_and(|s| s.occupants().iter().filter(|o| **o == p.id).count() == 1)
			})
	}
}

/// Functional form of [`GameState::apply_event`].
pub fn apply_event(mut state: GameState, event: &GameEvent) -> Result<GameState, MoveError> {
	state.apply_event(event)?;
	Ok(state)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::board::parse_path;

	fn game(path: &str, players: usize) -> GameState {
		GameState::new(parse_path(path, players).unwrap(), players)
	}

	fn mv(state: &mut GameState, id: usize, site: usize) -> GameEvent {
		let event = state.resolve_move(PlayerId(id), site, None).unwrap();
		state.apply_event(&event).unwrap();
		event
	}

	#[test]
	fn test_initial_placement_lowest_id_moves_first() {
		let state = game("4;::-Mo2V11::-", 3);
		assert_eq!(state.sites()[0].occupants(), &[PlayerId(2), PlayerId(1), PlayerId(0)]);
		assert_eq!(state.next_mover(), Some(PlayerId(0)));
		assert!(state.occupancy_consistent());
		assert!(!state.is_over());
	}

	#[test]
	fn test_next_mover_is_latest_arrival_on_lowest_site() {
		let mut state = game("5;::-Mo-Mo-V2-::-", 3);
		mv(&mut state, 0, 2);
		assert_eq!(state.next_mover(), Some(PlayerId(1)));
		mv(&mut state, 1, 2);
		assert_eq!(state.next_mover(), Some(PlayerId(2)));
		mv(&mut state, 2, 1);
		assert_eq!(state.next_mover(), Some(PlayerId(2)));
		mv(&mut state, 2, 2);
		// site 2 now holds 0, 1, 2 in arrival order
		assert_eq!(state.next_mover(), Some(PlayerId(2)));
		assert_eq!(state.sites()[2].occupants(), &[PlayerId(0), PlayerId(1), PlayerId(2)]);
	}

	#[test]
	fn test_check_move_rules() {
		let state = game("6;::-Mo1V1-::-Ri-::-", 2);
		assert_eq!(state.check_move(PlayerId(0), 6), Err(MoveError::OutOfBounds { site: 6 }));
		assert_eq!(state.check_move(PlayerId(0), 0), Err(MoveError::NotForward { current: 0, site: 0 }));
		assert_eq!(
			state.check_move(PlayerId(0), 4),
			Err(MoveError::BeyondBarrier { site: 4, barrier: 3 })
		);
		assert_eq!(state.check_move(PlayerId(0), 3), Ok(()));
		assert_eq!(state.check_move(PlayerId(0), 1), Ok(()));
		assert_eq!(state.check_move(PlayerId(5), 1), Err(MoveError::UnknownPlayer(PlayerId(5))));
	}

	#[test]
	fn test_check_move_rejects_full_site() {
		let mut state = game("4;::-Mo1V1-::-", 2);
		mv(&mut state, 0, 1);
		assert_eq!(state.check_move(PlayerId(1), 1), Err(MoveError::SiteFull { site: 1 }));
		assert_eq!(state.check_move(PlayerId(1), 2), Ok(()));
	}

	#[test]
	fn test_site_effects() {
		let mut state = game("6;::-Mo-Do-V1-V2-::-", 1);
		let event = mv(&mut state, 0, 1);
		assert_eq!((event.point_change, event.money_change), (0, 3));
		assert_eq!(state.player(PlayerId(0)).unwrap().money, 10);

		let event = mv(&mut state, 0, 2);
		assert_eq!((event.point_change, event.money_change), (5, -10));
		let player = state.player(PlayerId(0)).unwrap();
		assert_eq!((player.points, player.money), (5, 0));

		mv(&mut state, 0, 3);
		mv(&mut state, 0, 4);
		let player = state.player(PlayerId(0)).unwrap();
		assert_eq!((player.v1_visits, player.v2_visits), (1, 1));
		assert_eq!(player.score(), 7);
	}

	#[test]
	fn test_do_with_odd_money_floors() {
		let mut state = game("3;::-Do-::-", 1);
		let event = mv(&mut state, 0, 1);
		assert_eq!(event.point_change, 3);
		assert_eq!(event.money_change, -7);
	}

	#[test]
	fn test_card_only_kept_on_ri() {
		let state = game("4;::-Ri-Mo-::-", 1);
		let on_ri = state.resolve_move(PlayerId(0), 1, Some(Card::C)).unwrap();
		assert_eq!(on_ri.card, Some(Card::C));
		let on_mo = state.resolve_move(PlayerId(0), 2, Some(Card::C)).unwrap();
		assert_eq!(on_mo.card, None);
	}

	#[test]
	fn test_short_race_ends_and_ignores_money() {
		let mut state = game("3;::-Mo-::-", 2);
		mv(&mut state, 0, 1);
		assert_eq!(state.player(PlayerId(0)).unwrap().money, 10);
		assert_eq!(state.next_mover(), Some(PlayerId(1)));
		mv(&mut state, 1, 2);
		assert_eq!(state.next_mover(), Some(PlayerId(0)));
		assert!(!state.is_over());
		mv(&mut state, 0, 2);
		assert!(state.is_over());
		assert_eq!(state.scores(), vec![0, 0]);
		assert!(state.occupancy_consistent());
	}

	#[test]
	fn test_least_advanced() {
		let mut state = game("4;::-V1-V2-::-", 2);
		assert_eq!(state.least_advanced(), None);
		mv(&mut state, 0, 1);
		assert_eq!(state.least_advanced(), Some(PlayerId(1)));
	}

	#[test]
	fn test_find_before_barrier_stops_at_barrier() {
		let state = game("6;::-V11::-Mo1Do1::-", 2);
		assert_eq!(state.find_before_barrier(SiteKind::Mo, 0), None);
		assert_eq!(state.find_before_barrier(SiteKind::V1, 0), Some(1));
		assert_eq!(state.find_before_barrier(SiteKind::Do, 2), Some(4));
		assert_eq!(state.next_barrier(0), Some(2));
		assert_eq!(state.next_barrier(2), Some(5));
		assert_eq!(state.nearest_vacant(0, |k| k == SiteKind::Mo), Some(3));
	}

	#[test]
	fn test_apply_event_matches_functional_form() {
		let state = game("3;::-Mo-::-", 2);
		let event = state.resolve_move(PlayerId(0), 1, None).unwrap();
		let mut in_place = state.clone();
		in_place.apply_event(&event).unwrap();
		assert_eq!(apply_event(state, &event).unwrap(), in_place);
	}

	#[test]
	fn test_apply_event_rejects_unknown_targets() {
		let mut state = game("3;::-Mo-::-", 2);
		let mut event = state.resolve_move(PlayerId(0), 1, None).unwrap();
		event.site = 9;
		assert_eq!(state.apply_event(&event), Err(MoveError::OutOfBounds { site: 9 }));
		event.site = 1;
		event.player = PlayerId(4);
		assert_eq!(state.apply_event(&event), Err(MoveError::UnknownPlayer(PlayerId(4))));
		assert!(state.occupancy_consistent());
	}

	#[test]
	fn test_apply_event_rejects_overflowing_totals() {
		let mut state = game("4;::-Mo-Do-::-", 2);
		let mut event = state.resolve_move(PlayerId(0), 1, None).unwrap();
		event.point_change = i32::MAX;
		state.apply_event(&event).unwrap();
		let before = state.clone();

		let mut event = state.resolve_move(PlayerId(0), 2, None).unwrap();
		event.point_change = 1;
		assert_eq!(state.apply_event(&event), Err(MoveError::Overflow(PlayerId(0))));

		event.point_change = 0;
		event.money_change = i32::MIN;
		event.player = PlayerId(1);
		event.site = 1;
		state.apply_event(&event).unwrap();
		event.site = 2;
		event.money_change = -8;
		assert_eq!(state.apply_event(&event), Err(MoveError::Overflow(PlayerId(1))));
		assert_eq!(state.player(PlayerId(1)).unwrap().site, 1);
		assert_eq!(state.player(PlayerId(0)), before.player(PlayerId(0)));
		assert!(state.occupancy_consistent());
	}
}
