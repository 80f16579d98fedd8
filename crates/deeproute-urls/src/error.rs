//! Error types for route expression compilation.

use thiserror::Error;

/// Errors raised while compiling a route expression into its matchable form.
///
/// A failing expression never aborts a routing pass: the dispatcher logs the
/// error and treats the expression as a non-match.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PatternError {
	/// The expression exceeds [`MAX_PATTERN_LENGTH`](crate::MAX_PATTERN_LENGTH).
	#[error("route expression length {length} exceeds maximum allowed length of {max} bytes")]
	TooLong {
		/// Length of the rejected expression in bytes.
		length: usize,
		/// Configured maximum.
		max: usize,
	},

	/// The compiled regex does not build, usually because a `<name:regex>`
	/// fragment is malformed.
	#[error("invalid route expression '{expression}': {source}")]
	InvalidRegex {
		/// The expression as it was registered.
		expression: String,
		/// Error reported by the regex engine.
		source: regex::Error,
	},
}

impl PatternError {
	/// Returns the offending expression when the error carries one.
	pub fn expression(&self) -> Option<&str> {
		match self {
			Self::TooLong { .. } => None,
			Self::InvalidRegex { expression, .. } => Some(expression),
		}
	}
}
