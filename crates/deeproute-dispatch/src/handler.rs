//! Handler types and registrations.

use std::fmt;
use std::sync::Arc;

use deeproute_urls::RoutePattern;

use crate::result::RouteResult;

/// Signature of a main-stage handler.
pub type ProcessorFn<C, A> = dyn Fn(&C, &RouteResult<'_, A>) + Send + Sync;

/// Shared main-stage handler.
pub type Processor<C, A> = Arc<ProcessorFn<C, A>>;

/// Shared pre-match handler.
///
/// Returning `None` ends routing; `Some(path)` continues with the main stage
/// against `path`.
pub type PreProcessor<C, A> =
	Arc<dyn Fn(&C, &RouteResult<'_, A>) -> Option<String> + Send + Sync>;

/// Hook that runs in place of the winning main-stage handler.
///
/// It receives the handler and decides whether and how to call it.
pub type Preparation<C, A> =
	Arc<dyn Fn(&ProcessorFn<C, A>, &C, &RouteResult<'_, A>) + Send + Sync>;

/// An expression paired with its handler.
pub struct Registration<H> {
	pub(crate) pattern: RoutePattern,
	pub(crate) handler: H,
}

impl<H> Registration<H> {
	pub(crate) fn new(expression: impl Into<String>, handler: H) -> Self {
		Self {
			pattern: RoutePattern::parse(expression),
			handler,
		}
	}

	/// Returns the parsed expression.
	pub fn pattern(&self) -> &RoutePattern {
		&self.pattern
	}

	/// Returns the expression as registered.
	pub fn expression(&self) -> &str {
		self.pattern.source()
	}
}

impl<H: Clone> Clone for Registration<H> {
	fn clone(&self) -> Self {
		Self {
			pattern: self.pattern.clone(),
			handler: self.handler.clone(),
		}
	}
}

impl<H> fmt::Debug for Registration<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registration")
			.field("pattern", &self.pattern.source())
			.finish()
	}
}
