//! Applying compiled expressions to candidate strings.

use regex::Regex;

use crate::error::PatternError;
use crate::params::CaptureMap;
use crate::pattern::RoutePattern;

/// Name of the regex group generated for the `index`-th variable.
///
/// Groups are named rather than positional so that capture groups inside a
/// custom `<name:regex>` do not shift variable extraction.
pub(crate) fn group_name(index: usize) -> String {
	format!("__dr{}", index)
}

/// Removes a single trailing `/`, if any.
///
/// # Examples
///
/// ```
/// use deeproute_urls::trim_trailing_slash;
///
/// assert_eq!(trim_trailing_slash("/about/"), "/about");
/// assert_eq!(trim_trailing_slash("/about"), "/about");
/// assert_eq!(trim_trailing_slash("/"), "");
/// ```
pub fn trim_trailing_slash(candidate: &str) -> &str {
	candidate.strip_suffix('/').unwrap_or(candidate)
}

/// A route expression compiled to an anchored regex.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
	regex: Regex,
	/// Variable names in left-to-right order, one per generated group.
	variables: Vec<String>,
}

impl CompiledPattern {
	pub(crate) fn new(regex: Regex, variables: Vec<String>) -> Self {
		Self { regex, variables }
	}

	/// Returns the compiled regex.
	pub fn as_regex(&self) -> &Regex {
		&self.regex
	}

	/// Returns variable names in left-to-right order.
	pub fn variables(&self) -> &[String] {
		&self.variables
	}

	/// Checks whether the whole candidate matches.
	pub fn is_match(&self, candidate: &str) -> bool {
		self.regex.is_match(trim_trailing_slash(candidate))
	}

	/// Matches the candidate and extracts captured variables.
	///
	/// Returns `None` when the candidate does not match; a non-match is not
	/// an error. When a variable name repeats, the last occurrence wins.
	pub fn captures(&self, candidate: &str) -> Option<CaptureMap> {
		let caps = self.regex.captures(trim_trailing_slash(candidate))?;

		Some(
			self.variables
				.iter()
				.enumerate()
				.filter_map(|(i, name)| {
					caps.name(&group_name(i))
						.map(|m| (name.clone(), m.as_str().to_string()))
				})
				.collect(),
		)
	}
}

/// Compiles `pattern` and matches it against `candidate` in one step.
///
/// # Errors
///
/// Propagates [`PatternError`] from compilation. A candidate that simply
/// does not match yields `Ok(None)`.
pub fn match_pattern(
	pattern: &RoutePattern,
	candidate: &str,
	default_variable_regex: &str,
) -> Result<Option<CaptureMap>, PatternError> {
	Ok(pattern.compile(default_variable_regex)?.captures(candidate))
}
