use include_dir::{include_dir, Dir};

static CONFIG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/config");

pub const APP_DIR: &str = "site-race";

/// Compiled-in copy of a file from the `config/` directory.
pub fn embedded(filename: &str) -> Option<&'static str> {
	CONFIG_DIR.get_file(filename).and_then(|f| f.contents_utf8())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_embedded_race_config_present() {
		let text = embedded("race.toml").unwrap();
		assert!(text.contains("[dealer]"));
		assert!(embedded("missing.toml").is_none());
	}
}
