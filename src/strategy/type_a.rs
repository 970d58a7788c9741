use crate::board::SiteKind;
use crate::events::PlayerId;
use crate::state::GameState;
use crate::strategy::Decision;

pub fn choose(state: &GameState, me: PlayerId) -> Option<Decision> {
	let player = state.player(me)?;
	let current = player.site;

	if player.money > 0 {
		if let Some(site) = state.find_before_barrier(SiteKind::Do, current) {
			return Some(Decision::new(site, "spend at Do"));
		}
	}

	if let Some(next) = state.site(current + 1) {
		if next.kind() == SiteKind::Mo && next.has_room() {
			return Some(Decision::new(next.index(), "adjacent Mo"));
		}
	}

	state
		.nearest_vacant(current, |kind| matches!(kind, SiteKind::V1 | SiteKind::V2 | SiteKind::Barrier))
		.map(|site| Decision::new(site, "nearest V1/V2/barrier"))
}
