//! The two-stage routing engine.
//!
//! A [`Router`] owns two registries. The pre-match registry is meant for
//! scheme and host level expressions; its handler may stop routing or hand a
//! rewritten path to the main registry. The main registry dispatches to a
//! terminal handler.
//!
//! Both registries are sorted by specificity on every call, into a local
//! snapshot, and expressions are compiled on every call so that a changed
//! default variable regex applies immediately.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use deeproute_conf::{ConfError, RouterSettings};
use deeproute_urls::specificity::sort_by_specificity;
use deeproute_urls::{CaptureMap, QueryMap, UrlParts, extract_query};

use crate::handler::{PreProcessor, Preparation, Processor, ProcessorFn, Registration};
use crate::result::{Dispatch, RouteResult};
use crate::router_map::RouterMap;

/// URL dispatch engine.
///
/// `C` is a context handed to every handler; `A` is the type of the optional
/// argument bag. Neither is inspected by the router.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use deeproute_dispatch::Router;
///
/// let mut router: Router<RefCell<Vec<String>>> = Router::new();
/// router.map("/transaction/<transaction_id>/view", |log, result| {
/// 	log.borrow_mut().push(result.variables.get_string("transaction_id").to_string());
/// });
///
/// let log = RefCell::new(Vec::new());
/// assert!(router.route(&log, "https://www.mysite.com/transaction/42/view", None));
/// assert!(!router.route(&log, "/transaction/42/edit", None));
/// assert_eq!(log.into_inner(), vec!["42"]);
/// ```
pub struct Router<C, A = ()> {
	processors: Vec<Registration<Processor<C, A>>>,
	pre_processors: Vec<Registration<PreProcessor<C, A>>>,
	preparation: Option<Preparation<C, A>>,
	settings: RouterSettings,
}

impl<C, A> fmt::Debug for Router<C, A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("expressions", &self.expressions())
			.field("pre_expressions", &self.pre_expressions())
			.field("has_preparation", &self.preparation.is_some())
			.field("settings", &self.settings)
			.finish()
	}
}

impl<C, A> Default for Router<C, A> {
	fn default() -> Self {
		Self::new()
	}
}

/// Query and fragment data shared by both stages of one call.
struct Extracted {
	query_values: QueryMap,
	queries: CaptureMap,
	fragment: Option<String>,
}

impl Extracted {
	fn from_parts(parts: &UrlParts<'_>, max_query_length: usize) -> Self {
		let query_values = extract_query(parts.query(), max_query_length);
		let queries = query_values.first();
		Self {
			query_values,
			queries,
			fragment: parts.decoded_fragment(),
		}
	}

	fn result<'a, A>(
		&self,
		url: &'a str,
		variables: CaptureMap,
		args: Option<&'a A>,
	) -> RouteResult<'a, A> {
		RouteResult {
			url,
			variables,
			queries: self.queries.clone(),
			query_values: self.query_values.clone(),
			fragment: self.fragment.clone(),
			args,
		}
	}
}

impl<C, A> Router<C, A> {
	/// Creates a router with default settings.
	pub fn new() -> Self {
		Self::with_settings(RouterSettings::default())
	}

	/// Creates a router from settings without validating them.
	///
	/// An invalid default variable regex is not fatal: every expression that
	/// uses it fails to compile and is skipped with a warning.
	pub fn with_settings(settings: RouterSettings) -> Self {
		Self {
			processors: Vec::new(),
			pre_processors: Vec::new(),
			preparation: None,
			settings,
		}
	}

	/// Validates settings, then creates a router from them.
	pub fn try_with_settings(settings: RouterSettings) -> Result<Self, ConfError> {
		settings.validate()?;
		Ok(Self::with_settings(settings))
	}

	/// Returns the active settings.
	pub fn settings(&self) -> &RouterSettings {
		&self.settings
	}

	/// Sets the regex used by `<name>` variables without their own regex.
	///
	/// Takes effect on the next routing call, for every registered expression.
	pub fn set_default_variable_regex(&mut self, regex: impl Into<String>) {
		self.settings.default_variable_regex = regex.into();
	}

	/// Returns the regex used by unconstrained variables.
	pub fn default_variable_regex(&self) -> &str {
		&self.settings.default_variable_regex
	}

	/// Registers a main-stage handler.
	pub fn map<F>(&mut self, expression: impl Into<String>, processor: F)
	where
		F: Fn(&C, &RouteResult<'_, A>) + Send + Sync + 'static,
	{
		self.map_shared(expression, Arc::new(processor));
	}

	/// Registers one handler under several expressions.
	pub fn map_all<I, S, F>(&mut self, expressions: I, processor: F)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
		F: Fn(&C, &RouteResult<'_, A>) + Send + Sync + 'static,
	{
		let processor: Processor<C, A> = Arc::new(processor);
		for expression in expressions {
			self.map_shared(expression, Arc::clone(&processor));
		}
	}

	/// Registers an already shared main-stage handler.
	pub fn map_shared(&mut self, expression: impl Into<String>, processor: Processor<C, A>) {
		self.processors.push(Registration::new(expression, processor));
	}

	/// Registers a pre-match handler.
	pub fn pre_map<F>(&mut self, expression: impl Into<String>, pre_processor: F)
	where
		F: Fn(&C, &RouteResult<'_, A>) -> Option<String> + Send + Sync + 'static,
	{
		self.pre_map_shared(expression, Arc::new(pre_processor));
	}

	/// Registers an already shared pre-match handler.
	pub fn pre_map_shared(
		&mut self,
		expression: impl Into<String>,
		pre_processor: PreProcessor<C, A>,
	) {
		self.pre_processors
			.push(Registration::new(expression, pre_processor));
	}

	/// Registers one pre-match handler for every `prefix + expression + postfix`.
	///
	/// Combinations are registered prefix-major. An empty factor registers
	/// nothing.
	pub fn pre_map_product<P, E, S, F>(
		&mut self,
		prefixes: &[P],
		expressions: &[E],
		postfixes: &[S],
		pre_processor: F,
	) where
		P: AsRef<str>,
		E: AsRef<str>,
		S: AsRef<str>,
		F: Fn(&C, &RouteResult<'_, A>) -> Option<String> + Send + Sync + 'static,
	{
		self.pre_map_product_shared(prefixes, expressions, postfixes, Arc::new(pre_processor));
	}

	pub(crate) fn pre_map_product_shared<P, E, S>(
		&mut self,
		prefixes: &[P],
		expressions: &[E],
		postfixes: &[S],
		pre_processor: PreProcessor<C, A>,
	) where
		P: AsRef<str>,
		E: AsRef<str>,
		S: AsRef<str>,
	{
		for prefix in prefixes {
			for expression in expressions {
				for postfix in postfixes {
					let combined = format!(
						"{}{}{}",
						prefix.as_ref(),
						expression.as_ref(),
						postfix.as_ref()
					);
					self.pre_map_shared(combined, Arc::clone(&pre_processor));
				}
			}
		}
	}

	/// Installs a hook that runs instead of the winning main-stage handler.
	///
	/// Replaces any previous hook. Pre-match handlers are not wrapped.
	pub fn prepare<F>(&mut self, preparation: F)
	where
		F: Fn(&ProcessorFn<C, A>, &C, &RouteResult<'_, A>) + Send + Sync + 'static,
	{
		self.preparation = Some(Arc::new(preparation));
	}

	/// Registers everything a [`RouterMap`] describes.
	pub fn register(&mut self, map: RouterMap<C, A>) {
		let RouterMap {
			prefixes,
			expressions,
			postfixes,
			pre_processor,
			paths,
		} = map;

		if let Some(pre_processor) = pre_processor {
			self.pre_map_product_shared(&prefixes, &expressions, &postfixes, pre_processor);
		}
		for (expression, processor) in paths {
			self.map_shared(expression, processor);
		}
	}

	/// Main-stage expressions in registration order.
	pub fn expressions(&self) -> Vec<&str> {
		self.processors.iter().map(Registration::expression).collect()
	}

	/// Pre-match expressions in registration order.
	pub fn pre_expressions(&self) -> Vec<&str> {
		self.pre_processors
			.iter()
			.map(Registration::expression)
			.collect()
	}

	/// Removes every registration and the preparation hook.
	pub fn clear(&mut self) {
		self.processors.clear();
		self.pre_processors.clear();
		self.preparation = None;
	}

	/// Routes a URL and reports whether any handler took it.
	pub fn route(&self, context: &C, url: &str, args: Option<&A>) -> bool {
		self.dispatch(context, url, args).is_routed()
	}

	/// Routes a URL and reports which stage and expression handled it.
	///
	/// The routable string is the URL up to the first `?`. When pre-match
	/// expressions exist, one of them must match: its handler either ends
	/// routing or supplies the path for the main stage. Otherwise the main
	/// stage scans the routable string directly.
	///
	/// Expressions that fail to compile are skipped. Handler panics are not
	/// caught.
	pub fn dispatch(&self, context: &C, url: &str, args: Option<&A>) -> Dispatch {
		let parts = UrlParts::split(url);
		let extracted = Extracted::from_parts(&parts, self.settings.max_query_length);
		let routable = parts.routable(self.settings.strip_fragment);
		let default_regex = self.settings.default_variable_regex.as_str();

		let path: Cow<'_, str> = if self.pre_processors.is_empty() {
			Cow::Borrowed(routable)
		} else {
			let Some((registration, variables)) =
				first_match(&self.pre_processors, routable, default_regex)
			else {
				tracing::warn!(url, "no pre-match route found");
				return Dispatch::NoRoute;
			};

			let result = extracted.result(url, variables, args);
			match (registration.handler)(context, &result) {
				None => {
					tracing::info!(
						url,
						expression = registration.expression(),
						"url handled by pre-match"
					);
					return Dispatch::Handled {
						expression: registration.expression().to_string(),
					};
				}
				Some(sub_path) => {
					tracing::debug!(
						url,
						expression = registration.expression(),
						sub_path = %sub_path,
						"pre-match rewrote path"
					);
					Cow::Owned(sub_path)
				}
			}
		};

		let Some((registration, variables)) = first_match(&self.processors, &path, default_regex)
		else {
			tracing::warn!(url, path = %path, "no route found");
			return Dispatch::NoRoute;
		};

		let result = extracted.result(url, variables, args);
		match &self.preparation {
			Some(preparation) => preparation(registration.handler.as_ref(), context, &result),
			None => (registration.handler)(context, &result),
		}

		tracing::info!(url, expression = registration.expression(), "url routed");
		Dispatch::Routed {
			expression: registration.expression().to_string(),
		}
	}
}

/// Returns the most specific registration matching `candidate`.
///
/// Sorting happens on a snapshot of references; ties keep registration
/// order.
fn first_match<'r, H>(
	registry: &'r [Registration<H>],
	candidate: &str,
	default_variable_regex: &str,
) -> Option<(&'r Registration<H>, CaptureMap)> {
	let mut snapshot: Vec<&'r Registration<H>> = registry.iter().collect();
	sort_by_specificity(&mut snapshot, |registration| &registration.pattern);

	for registration in snapshot {
		match registration.pattern.compile(default_variable_regex) {
			Ok(compiled) => {
				if let Some(variables) = compiled.captures(candidate) {
					return Some((registration, variables));
				}
			}
			Err(error) => {
				tracing::warn!(
					expression = registration.expression(),
					%error,
					"skipping expression that failed to compile"
				);
			}
		}
	}

	None
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use std::cell::RefCell;

	type Log = RefCell<Vec<String>>;

	#[fixture]
	fn router() -> Router<Log> {
		Router::new()
	}

	fn record(name: &'static str) -> impl Fn(&Log, &RouteResult<'_, ()>) + Send + Sync + 'static {
		move |log, _| log.borrow_mut().push(name.to_string())
	}

	#[rstest]
	fn test_empty_router_finds_nothing(router: Router<Log>) {
		let log = Log::default();
		assert_eq!(router.dispatch(&log, "/about", None), Dispatch::NoRoute);
		assert!(log.borrow().is_empty());
	}

	#[rstest]
	fn test_first_match_prefers_longer_expression(mut router: Router<Log>) {
		router.map("/promo/*", record("promo"));
		router.map("/promo/*/discounted", record("discounted"));

		let log = Log::default();
		assert!(router.route(&log, "/promo/x/discounted", None));
		assert!(router.route(&log, "/promo/x", None));
		assert_eq!(*log.borrow(), vec!["discounted", "promo"]);
	}

	#[rstest]
	fn test_ties_keep_registration_order(mut router: Router<Log>) {
		router.map("/a/<x>", record("first"));
		router.map("/a/<y>", record("second"));

		let log = Log::default();
		let dispatch = router.dispatch(&log, "/a/1", None);
		assert_eq!(dispatch.expression(), Some("/a/<x>"));
		assert_eq!(*log.borrow(), vec!["first"]);
	}

	#[rstest]
	fn test_routing_does_not_reorder_registrations(mut router: Router<Log>) {
		router.map("/a", record("a"));
		router.map("/longer/path", record("b"));

		router.route(&Log::default(), "/a", None);
		assert_eq!(router.expressions(), vec!["/a", "/longer/path"]);
	}

	#[rstest]
	fn test_map_all_shares_handler(mut router: Router<Log>) {
		router.map_all(["/about", "/about-us"], record("about"));

		let log = Log::default();
		assert!(router.route(&log, "/about", None));
		assert!(router.route(&log, "/about-us/", None));
		assert_eq!(log.borrow().len(), 2);
	}

	#[rstest]
	fn test_pre_map_product_order(mut router: Router<Log>) {
		router.pre_map_product(
			&["http://", "https://"],
			&["mysite.com", "m.mysite.com"],
			&["/*"],
			|_, _| None,
		);
		assert_eq!(
			router.pre_expressions(),
			vec![
				"http://mysite.com/*",
				"http://m.mysite.com/*",
				"https://mysite.com/*",
				"https://m.mysite.com/*",
			]
		);
	}

	#[rstest]
	fn test_pre_map_product_empty_factor(mut router: Router<Log>) {
		let postfixes: [&str; 0] = [];
		router.pre_map_product(&["https://"], &["mysite.com"], &postfixes, |_, _| None);
		assert!(router.pre_expressions().is_empty());
	}

	#[rstest]
	fn test_clear(mut router: Router<Log>) {
		router.map("/a", record("a"));
		router.pre_map("*", |_, _| None);
		router.prepare(|handler, ctx, result| handler(ctx, result));

		router.clear();
		assert!(router.expressions().is_empty());
		assert!(router.pre_expressions().is_empty());
		assert!(router.preparation.is_none());
	}

	#[rstest]
	fn test_default_regex_applies_on_next_call(mut router: Router<Log>) {
		router.map("/user/<id>", record("user"));

		let log = Log::default();
		assert!(router.route(&log, "/user/abc", None));

		router.set_default_variable_regex("[0-9]+");
		assert_eq!(router.default_variable_regex(), "[0-9]+");
		assert!(!router.route(&log, "/user/abc", None));
		assert!(router.route(&log, "/user/42", None));
	}

	#[rstest]
	fn test_try_with_settings_rejects_invalid() {
		let settings = RouterSettings {
			default_variable_regex: "(".to_string(),
			..RouterSettings::default()
		};
		assert!(Router::<Log>::try_with_settings(settings).is_err());
	}

	#[rstest]
	fn test_strip_fragment_setting() {
		let settings = RouterSettings {
			strip_fragment: true,
			..RouterSettings::default()
		};
		let mut stripping: Router<Log> = Router::with_settings(settings);
		stripping.map("/about", record("about"));
		let mut keeping: Router<Log> = Router::new();
		keeping.map("/about", record("about"));

		let log = Log::default();
		assert!(stripping.route(&log, "/about#team", None));
		assert!(!keeping.route(&log, "/about#team", None));
	}
}
