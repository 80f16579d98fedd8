//! Specificity ordering for route expressions.
//!
//! Variables are counted as wide as a wildcard: each `<name>` or
//! `<name:regex>` is replaced by a single `*` and the expression with the
//! longer normalized form is tried first. There is no secondary key, so two
//! expressions of equal normalized length keep their registration order
//! (the sort is stable).

use std::cmp::Ordering;

use crate::pattern::{RoutePattern, Token};

/// Returns the expression with every variable replaced by `*`.
///
/// # Examples
///
/// ```
/// use deeproute_urls::{RoutePattern, specificity};
///
/// let pattern = RoutePattern::parse("/product/<id:[a-z0-9]+>-*");
/// assert_eq!(specificity::normalize(&pattern), "/product/*-*");
/// ```
pub fn normalize(pattern: &RoutePattern) -> String {
	pattern
		.tokens()
		.iter()
		.map(|token| match token {
			Token::Literal(text) => text.as_str(),
			Token::Wildcard | Token::Variable { .. } => "*",
		})
		.collect()
}

/// Length of the normalized expression, in characters.
pub fn normalized_len(pattern: &RoutePattern) -> usize {
	pattern
		.tokens()
		.iter()
		.map(|token| match token {
			Token::Literal(text) => text.chars().count(),
			Token::Wildcard | Token::Variable { .. } => 1,
		})
		.sum()
}

/// Orders the more specific expression first.
pub fn compare(a: &RoutePattern, b: &RoutePattern) -> Ordering {
	normalized_len(b).cmp(&normalized_len(a))
}

/// Sorts items by the specificity of the expression `key` returns.
///
/// The sort is stable: ties keep their relative order.
pub fn sort_by_specificity<T, F>(items: &mut [T], key: F)
where
	F: Fn(&T) -> &RoutePattern,
{
	items.sort_by(|a, b| compare(key(a), key(b)));
}
