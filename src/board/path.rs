use thiserror::Error;

use crate::board::site::{Capacity, Site, SiteKind};

/// Longest digit run accepted before the `;` separator.
pub const MAX_SITE_COUNT_DIGITS: usize = 10;
pub const SITE_TOKEN_LEN: usize = 3;
pub const SITE_COUNT_DELIMITER: char = ';';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
	#[error("missing ';' after site count")]
	MissingDelimiter,
	#[error("site count is empty")]
	EmptySiteCount,
	#[error("site count contains non-digit characters")]
	NonDigitSiteCount,
	#[error("site count longer than {} digits", MAX_SITE_COUNT_DIGITS)]
	SiteCountTooLong,
	#[error("path needs at least two sites, got {0}")]
	TooFewSites(usize),
	#[error("path contains non-ASCII characters")]
	NonAscii,
	#[error("expected {expected} site tokens, found {found} characters")]
	TokenCountMismatch { expected: usize, found: usize },
	#[error("unknown site type '{code}' at site {index}")]
	UnknownSite { index: usize, code: String },
	#[error("invalid capacity '{symbol}' at site {index}")]
	InvalidCapacity { index: usize, symbol: char },
	#[error("barrier at site {index} must use '-' capacity")]
	BarrierCapacity { index: usize },
	#[error("path must start and end with a barrier")]
	MissingEndBarrier,
}

pub fn parse_path(text: &str, player_count: usize) -> Result<Vec<Site>, PathError> {
	let line = text.strip_suffix('\n').unwrap_or(text);
	let line = line.strip_suffix('\r').unwrap_or(line);

	let (count_text, body) = line
		.split_once(SITE_COUNT_DELIMITER)
		.ok_or(PathError::MissingDelimiter)?;
	let site_count = parse_site_count(count_text)?;

	if site_count < 2 {
		return Err(PathError::TooFewSites(site_count));
	}
	if !body.is_ascii() {
		return Err(PathError::NonAscii);
	}
	let expected_len = site_count
		.checked_mul(SITE_TOKEN_LEN)
		.ok_or(PathError::SiteCountTooLong)?;
	if body.len() != expected_len {
		return Err(PathError::TokenCountMismatch {
			expected: site_count,
			found: body.len(),
		});
	}

	let mut sites = Vec::with_capacity(site_count);
	for (index, token) in body.as_bytes().chunks(SITE_TOKEN_LEN).enumerate() {
		sites.push(parse_site(token, index, player_count)?);
	}

	let ends_are_barriers = sites.first().is_some_and(Site::is_barrier)
		&& sites.last().is_some_and(Site::is_barrier);
	if !ends_are_barriers {
		return Err(PathError::MissingEndBarrier);
	}

	Ok(sites)
}

fn parse_site_count(text: &str) -> Result<usize, PathError> {
	if text.is_empty() {
		return Err(PathError::EmptySiteCount);
	}
	if !text.bytes().all(|b| b.is_ascii_digit()) {
		return Err(PathError::NonDigitSiteCount);
	}
	if text.len() > MAX_SITE_COUNT_DIGITS {
		return Err(PathError::SiteCountTooLong);
	}
	text.parse().map_err(|_| PathError::SiteCountTooLong)
}

fn parse_site(token: &[u8], index: usize, player_count: usize) -> Result<Site, PathError> {
	let code = String::from_utf8_lossy(&token[..2]);
	let kind = SiteKind::from_code(&code).ok_or_else(|| PathError::UnknownSite {
		index,
		code: code.to_string(),
	})?;

	let symbol = token[2] as char;
	let capacity = Capacity::from_char(symbol).ok_or(PathError::InvalidCapacity { index, symbol })?;
	if kind == SiteKind::Barrier && capacity != Capacity::PlayerCount {
		return Err(PathError::BarrierCapacity { index });
	}

	Ok(Site::new(kind, index, capacity, player_count))
}

/// Canonical path text for a parsed track, e.g. `4;::-Mo2V11::-`.
pub fn path_text(sites: &[Site]) -> String {
	let tokens: String = sites.iter().map(Site::raw_name).collect();
	format!("{}{}{}", sites.len(), SITE_COUNT_DELIMITER, tokens)
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_parse_simple_path() {
		let sites = parse_path("4;::-Mo2V11::-", 3).unwrap();
		assert_eq!(sites.len(), 4);
		assert_eq!(sites[1].kind(), SiteKind::Mo);
		assert_eq!(sites[1].capacity(), 2);
		assert_eq!(sites[2].kind(), SiteKind::V1);
		assert_eq!(sites[2].capacity(), 1);
		assert_eq!(sites[0].capacity(), 3);
		assert_eq!(sites[3].index(), 3);
	}

	#[test]
	fn test_dash_capacity_on_regular_site_means_player_count() {
		let sites = parse_path("3;::-Mo-::-", 2).unwrap();
		assert_eq!(sites[1].capacity(), 2);
	}

	#[test]
	fn test_trailing_newline_tolerated() {
		assert!(parse_path("2;::-::-\n", 2).is_ok());
		assert!(parse_path("2;::-::-\r\n", 2).is_ok());
		assert_eq!(
			parse_path("2;::-::-\n\n", 2),
			Err(PathError::TokenCountMismatch { expected: 2, found: 7 })
		);
	}

	#[test]
	fn test_rejects_bad_site_count() {
		assert_eq!(parse_path("::-::-", 2), Err(PathError::MissingDelimiter));
		assert_eq!(parse_path(";::-::-", 2), Err(PathError::EmptySiteCount));
		assert_eq!(parse_path("2a;::-::-", 2), Err(PathError::NonDigitSiteCount));
		assert_eq!(parse_path("00000000002;::-::-", 2), Err(PathError::SiteCountTooLong));
		assert_eq!(parse_path("1;::-", 2), Err(PathError::TooFewSites(1)));
	}

	#[test]
	fn test_rejects_token_count_mismatch() {
		assert!(matches!(
			parse_path("3;::-::-", 2),
			Err(PathError::TokenCountMismatch { expected: 3, .. })
		));
		assert!(matches!(
			parse_path("2;::-Mo1::-", 2),
			Err(PathError::TokenCountMismatch { expected: 2, .. })
		));
	}

	#[test]
	fn test_rejects_bad_tokens() {
		assert!(matches!(parse_path("3;::-Xx1::-", 2), Err(PathError::UnknownSite { index: 1, .. })));
		assert_eq!(
			parse_path("3;::-Mo0::-", 2),
			Err(PathError::InvalidCapacity { index: 1, symbol: '0' })
		);
		assert_eq!(parse_path("3;::1Mo1::-", 2), Err(PathError::BarrierCapacity { index: 0 }));
		assert_eq!(parse_path("3;Mo1V11::-", 2), Err(PathError::MissingEndBarrier));
		assert_eq!(parse_path("3;::-V11Ri1", 2), Err(PathError::MissingEndBarrier));
		assert_eq!(parse_path("2;::-::\u{e9}", 2), Err(PathError::NonAscii));
	}

	fn token_strategy() -> impl Strategy<Value = String> {
		let kinds = prop::sample::select(vec!["Mo", "Do", "V1", "V2", "Ri", "::"]);
		let caps = prop::sample::select(vec!['-', '1', '2', '3', '4', '5', '6', '7', '8', '9']);
		(kinds, caps).prop_map(|(kind, cap)| {
			if kind == "::" {
				"::-".to_string()
			} else {
				format!("{}{}", kind, cap)
			}
		})
	}

	proptest! {
		#[test]
		fn prop_well_formed_paths_round_trip(
			inner in prop::collection::vec(token_strategy(), 0..40),
			players in 1usize..8,
		) {
			let mut tokens = vec!["::-".to_string()];
			tokens.extend(inner);
			tokens.push("::-".to_string());
			let text = format!("{};{}", tokens.len(), tokens.concat());

			let sites = parse_path(&text, players).unwrap();
			prop_assert_eq!(sites.len(), tokens.len());
			for (site, token) in sites.iter().zip(&tokens) {
				prop_assert_eq!(&site.raw_name(), token);
			}
			prop_assert_eq!(path_text(&sites), text);
		}
	}
}
