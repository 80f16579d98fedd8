//! Splitting URLs and extracting query parameters.

use std::collections::HashMap;
use std::str::FromStr;

use percent_encoding::percent_decode_str;

use crate::params::{CaptureMap, is_truthy};

/// A URL split into the parts the router cares about.
///
/// # Examples
///
/// ```
/// use deeproute_urls::UrlParts;
///
/// let parts = UrlParts::split("https://www.mysite.com/register?referrer=anonymous#top");
/// assert_eq!(parts.without_query(), "https://www.mysite.com/register");
/// assert_eq!(parts.query(), Some("referrer=anonymous"));
/// assert_eq!(parts.fragment(), Some("top"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlParts<'a> {
	url: &'a str,
	without_query: &'a str,
	query: Option<&'a str>,
	fragment: Option<&'a str>,
}

impl<'a> UrlParts<'a> {
	/// Splits a URL.
	///
	/// The query is the text between the first `?` and the following `#`;
	/// a `?` that appears after the `#` belongs to the fragment.
	pub fn split(url: &'a str) -> Self {
		let without_query = url.split_once('?').map_or(url, |(head, _)| head);
		let fragment_start = url.find('#');

		let query = url.find('?').and_then(|q| match fragment_start {
			Some(f) if f < q => None,
			Some(f) => Some(&url[q + 1..f]),
			None => Some(&url[q + 1..]),
		});

		let fragment = fragment_start.map(|f| &url[f + 1..]);

		Self {
			url,
			without_query,
			query,
			fragment,
		}
	}

	/// Returns the full URL.
	pub fn url(&self) -> &'a str {
		self.url
	}

	/// Returns everything before the first `?`.
	pub fn without_query(&self) -> &'a str {
		self.without_query
	}

	/// Returns the string routing scans against.
	///
	/// This is [`UrlParts::without_query`], additionally cut at `#` when
	/// `strip_fragment` is set.
	pub fn routable(&self, strip_fragment: bool) -> &'a str {
		if strip_fragment {
			self.without_query
				.split_once('#')
				.map_or(self.without_query, |(head, _)| head)
		} else {
			self.without_query
		}
	}

	/// Returns the raw query component, if present.
	pub fn query(&self) -> Option<&'a str> {
		self.query
	}

	/// Returns the raw fragment, if present.
	pub fn fragment(&self) -> Option<&'a str> {
		self.fragment
	}

	/// Returns the percent-decoded fragment.
	pub fn decoded_fragment(&self) -> Option<String> {
		self.fragment
			.map(|f| percent_decode_str(f).decode_utf8_lossy().into_owned())
	}
}

/// Multi-valued view of a query string.
///
/// A key may appear several times; values keep their order of appearance.
/// List accessors for numeric types are all-or-nothing: one unparsable
/// element yields an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
	values: HashMap<String, Vec<String>>,
}

impl QueryMap {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses an `application/x-www-form-urlencoded` query string.
	///
	/// `+` decodes to a space, percent escapes are decoded and invalid UTF-8
	/// is replaced. A key without `=` maps to the empty string.
	pub fn parse(query: &str) -> Self {
		let mut map = Self::new();
		for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
			map.push(key.into_owned(), value.into_owned());
		}
		map
	}

	/// Appends a value for a key.
	pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.values.entry(key.into()).or_default().push(value.into());
	}

	/// Returns all values for a key.
	pub fn get(&self, key: &str) -> Option<&[String]> {
		self.values.get(key).map(Vec::as_slice)
	}

	/// Returns the first value for a key.
	pub fn get_first(&self, key: &str) -> Option<&str> {
		self.values
			.get(key)
			.and_then(|v| v.first())
			.map(String::as_str)
	}

	/// Returns whether the key is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}

	/// Returns the number of distinct keys.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns whether there are no keys.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterates over keys and their values in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.values
			.iter()
			.map(|(k, v)| (k.as_str(), v.as_slice()))
	}

	/// Returns all values, or an empty list when the key is missing.
	pub fn get_string_list(&self, key: &str) -> Vec<String> {
		self.get(key).map(<[String]>::to_vec).unwrap_or_default()
	}

	/// Parses every value as `i64`; empty if the key is missing or any value fails.
	pub fn get_long_list(&self, key: &str) -> Vec<i64> {
		self.parse_all(key)
	}

	/// Parses every value as `i32`; empty if the key is missing or any value fails.
	pub fn get_int_list(&self, key: &str) -> Vec<i32> {
		self.parse_all(key)
	}

	/// Parses every value as `f32`; empty if the key is missing or any value fails.
	pub fn get_float_list(&self, key: &str) -> Vec<f32> {
		self.parse_all(key)
	}

	/// Parses every value as `f64`; empty if the key is missing or any value fails.
	pub fn get_double_list(&self, key: &str) -> Vec<f64> {
		self.parse_all(key)
	}

	/// Maps each value through the same rule as [`CaptureMap::get_bool`].
	pub fn get_bool_list(&self, key: &str) -> Vec<bool> {
		self.get(key)
			.map(|values| values.iter().map(|v| is_truthy(v)).collect())
			.unwrap_or_default()
	}

	fn parse_all<T: FromStr>(&self, key: &str) -> Vec<T> {
		self.get(key)
			.and_then(|values| {
				values
					.iter()
					.map(|v| v.parse().ok())
					.collect::<Option<Vec<T>>>()
			})
			.unwrap_or_default()
	}

	/// Collapses to a single-valued map keeping each key's first value.
	pub fn first(&self) -> CaptureMap {
		self.values
			.iter()
			.filter_map(|(k, v)| v.first().map(|first| (k.as_str(), first.as_str())))
			.collect()
	}
}

/// Parses an optional query component, bounded by `max_length` bytes.
///
/// An absent or empty query yields an empty map. A query longer than
/// `max_length` is not parsed at all: a warning is logged and the map stays
/// empty, so routing itself is unaffected.
pub fn extract_query(query: Option<&str>, max_length: usize) -> QueryMap {
	match query {
		Some(q) if q.len() > max_length => {
			tracing::warn!(
				length = q.len(),
				max_length,
				"query string too long, skipping query extraction"
			);
			QueryMap::new()
		}
		Some(q) if !q.is_empty() => QueryMap::parse(q),
		_ => QueryMap::new(),
	}
}
