//! Lenient typed access to captured values.
//!
//! Path variables and query parameters start life as untyped strings.
//! [`CaptureMap`] stores them as such and offers best-effort typed readers:
//! a value that is missing or does not parse reads as the type's zero value,
//! never as an error.

use std::collections::HashMap;
use std::collections::hash_map;
use std::str::FromStr;

/// String-keyed map of captured values with lenient typed accessors.
///
/// # Examples
///
/// ```
/// use deeproute_urls::CaptureMap;
///
/// let mut map = CaptureMap::new();
/// map.insert("id", "42");
/// map.insert("flag", "TRUE");
/// map.insert("name", "tas");
///
/// assert_eq!(map.get_long("id"), 42);
/// assert_eq!(map.get_int("name"), 0);
/// assert!(map.get_bool("flag"));
/// assert!(!map.get_bool("missing"));
/// assert_eq!(map.get_string("missing"), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureMap {
	values: HashMap<String, String>,
}

impl CaptureMap {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a value, returning the previous one for the key.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.values.insert(key.into(), value.into())
	}

	/// Returns the raw value for a key.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.values.get(key).map(String::as_str)
	}

	/// Returns whether the key is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns whether there are no entries.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterates over entries in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Returns the value, or `""` when the key is missing.
	pub fn get_string(&self, key: &str) -> &str {
		self.get(key).unwrap_or("")
	}

	/// Parses the value as `i64`, `0` when missing or unparsable.
	pub fn get_long(&self, key: &str) -> i64 {
		self.parse_or_default(key)
	}

	/// Parses the value as `i32`, `0` when missing or unparsable.
	pub fn get_int(&self, key: &str) -> i32 {
		self.parse_or_default(key)
	}

	/// Parses the value as `f32`, `0.0` when missing or unparsable.
	pub fn get_float(&self, key: &str) -> f32 {
		self.parse_or_default(key)
	}

	/// Parses the value as `f64`, `0.0` when missing or unparsable.
	pub fn get_double(&self, key: &str) -> f64 {
		self.parse_or_default(key)
	}

	/// True iff the value equals `"true"` (any case) or `"1"`.
	pub fn get_bool(&self, key: &str) -> bool {
		self.get(key).is_some_and(is_truthy)
	}

	fn parse_or_default<T>(&self, key: &str) -> T
	where
		T: FromStr + Default,
	{
		self.get(key)
			.and_then(|value| value.parse().ok())
			.unwrap_or_default()
	}

	/// Consumes the map, returning the underlying storage.
	pub fn into_inner(self) -> HashMap<String, String> {
		self.values
	}
}

pub(crate) fn is_truthy(value: &str) -> bool {
	value.eq_ignore_ascii_case("true") || value == "1"
}

impl<K, V> FromIterator<(K, V)> for CaptureMap
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut map = Self::new();
		map.extend(iter);
		map
	}
}

impl<K, V> Extend<(K, V)> for CaptureMap
where
	K: Into<String>,
	V: Into<String>,
{
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		for (key, value) in iter {
			self.insert(key, value);
		}
	}
}

impl IntoIterator for CaptureMap {
	type Item = (String, String);
	type IntoIter = hash_map::IntoIter<String, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.values.into_iter()
	}
}

impl From<HashMap<String, String>> for CaptureMap {
	fn from(values: HashMap<String, String>) -> Self {
		Self { values }
	}
}
