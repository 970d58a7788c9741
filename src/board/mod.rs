mod path;
mod site;

pub use path::{parse_path, path_text, PathError, MAX_SITE_COUNT_DIGITS, SITE_TOKEN_LEN};
pub use site::{Capacity, Site, SiteKind};
