//! Bundled registrations.
//!
//! A [`RouterMap`] groups host level expressions with the paths served under
//! them, so a feature can hand the router one value instead of a series of
//! `pre_map`/`map` calls.

use std::fmt;
use std::sync::Arc;

use crate::handler::{PreProcessor, Processor};
use crate::result::RouteResult;

/// Registrations applied together by [`Router::register`](crate::Router::register).
///
/// The pre-processor is registered for every `prefix + expression + postfix`
/// combination; each path is registered with its own processor.
///
/// # Examples
///
/// ```
/// use deeproute_dispatch::{Router, RouterMap};
///
/// let map: RouterMap<()> = RouterMap::builder()
/// 	.add_prefixes(["http://", "https://"])
/// 	.add_expression("<subdomain:[a-z]+>.mysite.com")
/// 	.add_postfix("/*")
/// 	.set_pre_processor(|_, _| Some("/about".to_string()))
/// 	.add_path("/about", |_, _| {})
/// 	.build();
///
/// let mut router = Router::new();
/// router.register(map);
/// assert_eq!(router.pre_expressions().len(), 2);
/// assert!(router.route(&(), "https://www.mysite.com/anything", None));
/// ```
pub struct RouterMap<C, A = ()> {
	pub(crate) prefixes: Vec<String>,
	pub(crate) expressions: Vec<String>,
	pub(crate) postfixes: Vec<String>,
	pub(crate) pre_processor: Option<PreProcessor<C, A>>,
	pub(crate) paths: Vec<(String, Processor<C, A>)>,
}

impl<C, A> RouterMap<C, A> {
	/// Starts an empty builder.
	pub fn builder() -> RouterMapBuilder<C, A> {
		RouterMapBuilder::new()
	}

	/// Returns the prefixes in insertion order.
	pub fn prefixes(&self) -> &[String] {
		&self.prefixes
	}

	/// Returns the host expressions in insertion order.
	pub fn expressions(&self) -> &[String] {
		&self.expressions
	}

	/// Returns the postfixes in insertion order.
	pub fn postfixes(&self) -> &[String] {
		&self.postfixes
	}

	/// Returns the path expressions in insertion order.
	pub fn paths(&self) -> Vec<&str> {
		self.paths.iter().map(|(path, _)| path.as_str()).collect()
	}

	/// Returns whether a pre-processor was set.
	pub fn has_pre_processor(&self) -> bool {
		self.pre_processor.is_some()
	}
}

impl<C, A> fmt::Debug for RouterMap<C, A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouterMap")
			.field("prefixes", &self.prefixes)
			.field("expressions", &self.expressions)
			.field("postfixes", &self.postfixes)
			.field("has_pre_processor", &self.pre_processor.is_some())
			.field("paths", &self.paths())
			.finish()
	}
}

/// Builder for [`RouterMap`].
pub struct RouterMapBuilder<C, A = ()> {
	map: RouterMap<C, A>,
}

impl<C, A> Default for RouterMapBuilder<C, A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<C, A> RouterMapBuilder<C, A> {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self {
			map: RouterMap {
				prefixes: Vec::new(),
				expressions: Vec::new(),
				postfixes: Vec::new(),
				pre_processor: None,
				paths: Vec::new(),
			},
		}
	}

	/// Appends a prefix.
	pub fn add_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.map.prefixes.push(prefix.into());
		self
	}

	/// Appends several prefixes.
	pub fn add_prefixes<I, S>(mut self, prefixes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.map.prefixes.extend(prefixes.into_iter().map(Into::into));
		self
	}

	/// Replaces all prefixes.
	pub fn set_prefixes<I, S>(mut self, prefixes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.map.prefixes.clear();
		self.add_prefixes(prefixes)
	}

	/// Appends a host expression.
	pub fn add_expression(mut self, expression: impl Into<String>) -> Self {
		self.map.expressions.push(expression.into());
		self
	}

	/// Appends several host expressions.
	pub fn add_expressions<I, S>(mut self, expressions: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.map
			.expressions
			.extend(expressions.into_iter().map(Into::into));
		self
	}

	/// Replaces all expressions.
	pub fn set_expressions<I, S>(mut self, expressions: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.map.expressions.clear();
		self.add_expressions(expressions)
	}

	/// Appends a postfix.
	pub fn add_postfix(mut self, postfix: impl Into<String>) -> Self {
		self.map.postfixes.push(postfix.into());
		self
	}

	/// Appends several postfixes.
	pub fn add_postfixes<I, S>(mut self, postfixes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.map.postfixes.extend(postfixes.into_iter().map(Into::into));
		self
	}

	/// Replaces all postfixes.
	pub fn set_postfixes<I, S>(mut self, postfixes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.map.postfixes.clear();
		self.add_postfixes(postfixes)
	}

	/// Sets the pre-processor shared by every prefix/expression/postfix combination.
	pub fn set_pre_processor<F>(mut self, pre_processor: F) -> Self
	where
		F: Fn(&C, &RouteResult<'_, A>) -> Option<String> + Send + Sync + 'static,
	{
		self.map.pre_processor = Some(Arc::new(pre_processor));
		self
	}

	/// Adds a path served by `processor`.
	pub fn add_path<F>(mut self, expression: impl Into<String>, processor: F) -> Self
	where
		F: Fn(&C, &RouteResult<'_, A>) + Send + Sync + 'static,
	{
		self.map.paths.push((expression.into(), Arc::new(processor)));
		self
	}

	/// Adds several paths served by one processor.
	pub fn add_paths<I, S, F>(mut self, expressions: I, processor: F) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
		F: Fn(&C, &RouteResult<'_, A>) + Send + Sync + 'static,
	{
		let processor: Processor<C, A> = Arc::new(processor);
		for expression in expressions {
			self.map.paths.push((expression.into(), Arc::clone(&processor)));
		}
		self
	}

	/// Finishes the map.
	pub fn build(self) -> RouterMap<C, A> {
		self.map
	}
}
