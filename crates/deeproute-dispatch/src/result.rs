//! What handlers receive and what dispatch reports back.

use deeproute_urls::{CaptureMap, QueryMap};

/// Values extracted for one dispatched URL.
///
/// A result is built per routing call and dropped once the handler returns.
/// `variables` come from the expression that matched in the current stage;
/// the query maps and fragment always come from the URL passed to the router,
/// whichever stage ends up handling it.
#[derive(Debug, Clone)]
pub struct RouteResult<'a, A> {
	/// The URL exactly as it was passed in.
	pub url: &'a str,
	/// Captured path variables.
	pub variables: CaptureMap,
	/// Query parameters, first value per key.
	pub queries: CaptureMap,
	/// Query parameters with every value per key.
	pub query_values: QueryMap,
	/// Percent-decoded text after `#`.
	pub fragment: Option<String>,
	/// Caller arguments, passed through untouched.
	pub args: Option<&'a A>,
}

/// Outcome of a routing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
	/// A pre-match handler consumed the URL and stopped routing.
	Handled { expression: String },
	/// A main-stage handler was invoked.
	Routed { expression: String },
	/// No expression matched in the stage that applied.
	NoRoute,
}

impl Dispatch {
	/// Returns `true` unless no route was found.
	pub fn is_routed(&self) -> bool {
		!matches!(self, Dispatch::NoRoute)
	}

	/// Returns the expression that handled the URL.
	pub fn expression(&self) -> Option<&str> {
		match self {
			Dispatch::Handled { expression } | Dispatch::Routed { expression } => {
				Some(expression.as_str())
			}
			Dispatch::NoRoute => None,
		}
	}
}
