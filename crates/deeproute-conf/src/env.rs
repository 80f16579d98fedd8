//! Environment variable overrides for router settings.

use crate::error::ConfError;
use crate::settings::RouterSettings;

/// Prefix applied to every environment key by default.
pub const DEFAULT_ENV_PREFIX: &str = "DEEPROUTE_";

impl RouterSettings {
	/// Applies overrides from the process environment.
	///
	/// Recognized keys are `{prefix}DEFAULT_VARIABLE_REGEX`,
	/// `{prefix}MAX_QUERY_LENGTH` and `{prefix}STRIP_FRAGMENT`.
	pub fn with_env_overrides(self, prefix: &str) -> Result<Self, ConfError> {
		self.with_overrides_from(prefix, |key| std::env::var(key).ok())
	}

	/// Applies overrides from an arbitrary key lookup.
	pub fn with_overrides_from<F>(mut self, prefix: &str, lookup: F) -> Result<Self, ConfError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let key = format!("{}DEFAULT_VARIABLE_REGEX", prefix);
		if let Some(value) = lookup(&key) {
			self.default_variable_regex = value;
		}

		let key = format!("{}MAX_QUERY_LENGTH", prefix);
		if let Some(value) = lookup(&key) {
			self.max_query_length = value.trim().parse().map_err(|e| ConfError::Env {
				key: key.clone(),
				message: format!("{}", e),
			})?;
		}

		let key = format!("{}STRIP_FRAGMENT", prefix);
		if let Some(value) = lookup(&key) {
			self.strip_fragment = parse_bool(&value).ok_or_else(|| ConfError::Env {
				key: key.clone(),
				message: format!("expected a boolean, got '{}'", value),
			})?;
		}

		Ok(self)
	}
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Some(true),
		"false" | "0" | "no" | "off" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::HashMap;

	fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |key| map.get(key).cloned()
	}

	#[rstest]
	#[case("true", Some(true))]
	#[case("ON", Some(true))]
	#[case(" yes ", Some(true))]
	#[case("0", Some(false))]
	#[case("Off", Some(false))]
	#[case("maybe", None)]
	fn test_parse_bool(#[case] input: &str, #[case] expected: Option<bool>) {
		assert_eq!(parse_bool(input), expected);
	}

	#[rstest]
	fn test_overrides_applied() {
		let settings = RouterSettings::default()
			.with_overrides_from(
				DEFAULT_ENV_PREFIX,
				lookup_from(&[
					("DEEPROUTE_DEFAULT_VARIABLE_REGEX", "[a-z]+"),
					("DEEPROUTE_MAX_QUERY_LENGTH", "256"),
					("DEEPROUTE_STRIP_FRAGMENT", "yes"),
				]),
			)
			.unwrap();

		assert_eq!(settings.default_variable_regex, "[a-z]+");
		assert_eq!(settings.max_query_length, 256);
		assert!(settings.strip_fragment);
	}

	#[rstest]
	fn test_no_overrides_keeps_values() {
		let settings = RouterSettings::default()
			.with_overrides_from(DEFAULT_ENV_PREFIX, lookup_from(&[]))
			.unwrap();
		assert_eq!(settings, RouterSettings::default());
	}

	#[rstest]
	fn test_custom_prefix() {
		let settings = RouterSettings::default()
			.with_overrides_from("APP_", lookup_from(&[("APP_MAX_QUERY_LENGTH", "10")]))
			.unwrap();
		assert_eq!(settings.max_query_length, 10);
	}

	#[rstest]
	#[case("DEEPROUTE_MAX_QUERY_LENGTH", "lots")]
	#[case("DEEPROUTE_STRIP_FRAGMENT", "sometimes")]
	fn test_invalid_override(#[case] key: &str, #[case] value: &str) {
		let result = RouterSettings::default()
			.with_overrides_from(DEFAULT_ENV_PREFIX, lookup_from(&[(key, value)]));
		match result {
			Err(ConfError::Env { key: k, .. }) => assert_eq!(k, key),
			other => panic!("unexpected result: {:?}", other),
		}
	}
}
