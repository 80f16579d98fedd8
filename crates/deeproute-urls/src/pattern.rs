//! Route expression grammar.
//!
//! A route expression is plain text with three kinds of markers:
//!
//! - `*` - wildcard, one or more of any character, not captured
//! - `<name>` - variable matching the default variable regex
//! - `<name:regex>` - variable constrained to `regex`
//!
//! Everything else is literal text. Expressions are tokenized once, in a
//! single pass, and compiled to an anchored regex on demand so that the
//! default variable regex may change between routing calls.

use regex::Regex;

use crate::error::PatternError;
use crate::matcher::{CompiledPattern, group_name};

/// Regex used for `<name>` variables when no other default is configured.
pub const DEFAULT_VARIABLE_REGEX: &str = "[^/]+";

/// Regex a `*` wildcard compiles to.
pub const WILDCARD_REGEX: &str = ".+";

/// Maximum allowed length for a route expression in bytes.
pub const MAX_PATTERN_LENGTH: usize = 1024;

/// A single token of a route expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
	/// Text matched verbatim.
	Literal(String),
	/// `*`: one or more of any character, greedy, not captured.
	Wildcard,
	/// `<name>` or `<name:regex>`.
	Variable {
		/// Capture name.
		name: String,
		/// Explicit regex, `None` when the default applies.
		regex: Option<String>,
	},
}

/// A tokenized route expression.
///
/// # Examples
///
/// ```
/// use deeproute_urls::{RoutePattern, Token};
///
/// let pattern = RoutePattern::parse("/product/<id:[a-z0-9]+>-*");
/// assert_eq!(pattern.variable_names(), vec!["id"]);
/// assert_eq!(pattern.tokens()[2], Token::Literal("-".to_string()));
///
/// let compiled = pattern.compile("[^/]+").unwrap();
/// let captures = compiled.captures("/product/kj9fd8-tas-keren").unwrap();
/// assert_eq!(captures.get_string("id"), "kj9fd8");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
	/// The expression as written.
	source: String,
	/// Tokens in left-to-right order.
	tokens: Vec<Token>,
}

impl RoutePattern {
	/// Tokenizes an expression.
	///
	/// Tokenizing never fails: text that does not form a complete variable
	/// marker (for example an unterminated `<id`) is kept as literal text.
	/// Regex problems surface only from [`RoutePattern::compile`].
	pub fn parse(source: impl Into<String>) -> Self {
		let source = source.into();
		let tokens = tokenize(&source);
		Self { source, tokens }
	}

	/// Returns the expression as written.
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Returns the tokens in left-to-right order.
	pub fn tokens(&self) -> &[Token] {
		&self.tokens
	}

	/// Returns variable names in left-to-right occurrence order.
	///
	/// Duplicates are kept; when a name repeats, the last occurrence wins
	/// in the captures produced by a match.
	pub fn variable_names(&self) -> Vec<&str> {
		self.tokens
			.iter()
			.filter_map(|token| match token {
				Token::Variable { name, .. } => Some(name.as_str()),
				_ => None,
			})
			.collect()
	}

	/// Returns whether the expression contains only literal text.
	pub fn is_exact(&self) -> bool {
		self.tokens.iter().all(|t| matches!(t, Token::Literal(_)))
	}

	/// Builds the anchored regex source for this expression.
	///
	/// One trailing `/` is dropped so that `/about` and `/about/` are
	/// equivalent; the candidate side is trimmed the same way by the matcher.
	pub fn to_regex(&self, default_variable_regex: &str) -> String {
		let mut regex_str = String::from("^");
		let last = self.tokens.len().saturating_sub(1);
		let mut variable_index = 0;

		for (i, token) in self.tokens.iter().enumerate() {
			match token {
				Token::Literal(text) => {
					let text = if i == last {
						text.strip_suffix('/').unwrap_or(text)
					} else {
						text
					};
					regex_str.push_str(&regex::escape(text));
				}
				Token::Wildcard => regex_str.push_str(WILDCARD_REGEX),
				Token::Variable { regex, .. } => {
					let body = regex.as_deref().unwrap_or(default_variable_regex);
					regex_str.push_str(&format!(
						"(?P<{}>{})",
						group_name(variable_index),
						body
					));
					variable_index += 1;
				}
			}
		}

		regex_str.push('$');
		regex_str
	}

	/// Compiles the expression against the given default variable regex.
	///
	/// # Errors
	///
	/// Returns [`PatternError::TooLong`] if the expression exceeds
	/// [`MAX_PATTERN_LENGTH`], or [`PatternError::InvalidRegex`] if the
	/// resulting regex does not build.
	pub fn compile(&self, default_variable_regex: &str) -> Result<CompiledPattern, PatternError> {
		// Reject oversized expressions before handing them to the regex engine
		if self.source.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				length: self.source.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let regex = Regex::new(&self.to_regex(default_variable_regex))
			.map_err(|source| PatternError::InvalidRegex {
				expression: self.source.clone(),
				source,
			})?;

		let names = self
			.variable_names()
			.into_iter()
			.map(str::to_string)
			.collect();

		Ok(CompiledPattern::new(regex, names))
	}
}

impl std::fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.source)
	}
}

impl From<&str> for RoutePattern {
	fn from(source: &str) -> Self {
		Self::parse(source)
	}
}

impl From<String> for RoutePattern {
	fn from(source: String) -> Self {
		Self::parse(source)
	}
}

/// Splits an expression into tokens in a single left-to-right pass.
fn tokenize(source: &str) -> Vec<Token> {
	let mut tokens = Vec::new();
	let mut literal = String::new();
	let mut rest = source;

	while let Some(c) = rest.chars().next() {
		match c {
			'*' => {
				flush_literal(&mut tokens, &mut literal);
				tokens.push(Token::Wildcard);
				rest = &rest[1..];
			}
			'<' => match scan_variable(rest) {
				Some((token, consumed)) => {
					flush_literal(&mut tokens, &mut literal);
					tokens.push(token);
					rest = &rest[consumed..];
				}
				None => {
					literal.push('<');
					rest = &rest[1..];
				}
			},
			_ => {
				literal.push(c);
				rest = &rest[c.len_utf8()..];
			}
		}
	}

	flush_literal(&mut tokens, &mut literal);
	tokens
}

fn flush_literal(tokens: &mut Vec<Token>, literal: &mut String) {
	if !literal.is_empty() {
		tokens.push(Token::Literal(std::mem::take(literal)));
	}
}

/// Recognizes `<name>` or `<name:regex>` at the start of `input`.
///
/// `name` is one or more ASCII word characters and `regex` is one or more
/// characters other than `>`. Returns the token and the number of bytes
/// consumed.
fn scan_variable(input: &str) -> Option<(Token, usize)> {
	let body = input.strip_prefix('<')?;
	let name_len = body
		.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
		.unwrap_or(body.len());
	if name_len == 0 {
		return None;
	}

	let name = body[..name_len].to_string();
	let after = &body[name_len..];

	if after.starts_with('>') {
		return Some((Token::Variable { name, regex: None }, name_len + 2));
	}

	let regex_part = after.strip_prefix(':')?;
	let end = regex_part.find('>')?;
	if end == 0 {
		return None;
	}

	let regex = regex_part[..end].to_string();
	// '<' + name + ':' + regex + '>'
	let consumed = name_len + end + 3;
	Some((
		Token::Variable {
			name,
			regex: Some(regex),
		},
		consumed,
	))
}
