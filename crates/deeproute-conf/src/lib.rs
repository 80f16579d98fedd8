//! # deeproute-conf
//!
//! Settings for the deeproute dispatcher, loaded from defaults, TOML and
//! environment variables in that order.
//!
//! ```toml
//! [router]
//! default_variable_regex = "[^/]+"
//! max_query_length = 8192
//! strip_fragment = false
//! ```

use std::path::Path;

pub mod env;
pub mod error;
pub mod settings;

pub use env::DEFAULT_ENV_PREFIX;
pub use error::ConfError;
pub use settings::{DEFAULT_MAX_QUERY_LENGTH, RouterSettings};

/// Loads settings from an optional file, then applies environment overrides
/// and validates the result.
pub fn load(path: Option<&Path>) -> Result<RouterSettings, ConfError> {
	load_with(path, DEFAULT_ENV_PREFIX, |key| std::env::var(key).ok())
}

/// Same layering as [`load`], reading overrides through `lookup` under
/// `prefix`.
pub fn load_with<F>(
	path: Option<&Path>,
	prefix: &str,
	lookup: F,
) -> Result<RouterSettings, ConfError>
where
	F: Fn(&str) -> Option<String>,
{
	let settings = match path {
		Some(path) => RouterSettings::from_file(path)?,
		None => RouterSettings::default(),
	};
	let settings = settings.with_overrides_from(prefix, lookup)?;
	settings.validate()?;
	Ok(settings)
}
