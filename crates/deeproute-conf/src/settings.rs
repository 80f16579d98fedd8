//! Router settings.
//!
//! Settings are layered: built-in defaults, then a TOML document, then
//! environment variables.

use std::fs;
use std::path::Path;

use deeproute_urls::{DEFAULT_VARIABLE_REGEX, RoutePattern};
use serde::{Deserialize, Serialize};

use crate::error::ConfError;

/// Default upper bound for a parsed query string, in bytes.
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 8192;

/// Settings that shape how a router compiles and matches expressions.
///
/// # Examples
///
/// ```
/// use deeproute_conf::RouterSettings;
///
/// let settings = RouterSettings::from_toml_str(r#"
/// [router]
/// default_variable_regex = "[a-z0-9-]+"
/// "#).unwrap();
///
/// assert_eq!(settings.default_variable_regex, "[a-z0-9-]+");
/// assert_eq!(settings.max_query_length, 8192);
/// assert!(!settings.strip_fragment);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
	/// Regex used for `<name>` variables without an explicit regex.
	pub default_variable_regex: String,

	/// Query strings longer than this are not parsed into maps.
	pub max_query_length: usize,

	/// Also cut the routable string at `#`.
	pub strip_fragment: bool,
}

impl Default for RouterSettings {
	fn default() -> Self {
		Self {
			default_variable_regex: DEFAULT_VARIABLE_REGEX.to_string(),
			max_query_length: DEFAULT_MAX_QUERY_LENGTH,
			strip_fragment: false,
		}
	}
}

/// A TOML document that may nest settings under `[router]`.
#[derive(Deserialize)]
struct SettingsDocument {
	router: Option<RouterSettings>,
}

impl RouterSettings {
	/// Parses settings from TOML.
	///
	/// Keys may sit at the top level or inside a `[router]` table; the
	/// table wins when present. Missing keys keep their defaults.
	pub fn from_toml_str(content: &str) -> Result<Self, ConfError> {
		let document: SettingsDocument = toml::from_str(content)?;
		match document.router {
			Some(settings) => Ok(settings),
			None => Ok(toml::from_str(content)?),
		}
	}

	/// Loads settings from a TOML file. A missing file yields defaults.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfError> {
		let path = path.as_ref();
		if !path.exists() {
			return Ok(Self::default());
		}

		let content = fs::read_to_string(path)?;
		Self::from_toml_str(&content)
	}

	/// Checks that the settings can drive a router.
	///
	/// # Errors
	///
	/// Returns [`ConfError::InvalidValue`] when the default variable regex
	/// does not compile or the query length bound is zero.
	pub fn validate(&self) -> Result<(), ConfError> {
		if self.default_variable_regex.is_empty() {
			return Err(ConfError::InvalidValue {
				key: "default_variable_regex".to_string(),
				message: "must not be empty".to_string(),
			});
		}

		// Compiled the same way a router compiles `<name>` variables
		RoutePattern::parse("<value>")
			.compile(&self.default_variable_regex)
			.map_err(|e| ConfError::InvalidValue {
				key: "default_variable_regex".to_string(),
				message: e.to_string(),
			})?;

		if self.max_query_length == 0 {
			return Err(ConfError::InvalidValue {
				key: "max_query_length".to_string(),
				message: "must be greater than zero".to_string(),
			});
		}

		Ok(())
	}
}
