//! # deeproute-urls
//!
//! Route expressions and capture extraction for the deeproute dispatcher.
//!
//! ## Expression syntax
//!
//! | Marker | Matches | Captured |
//! |--------|---------|----------|
//! | `*` | one or more of any character | no |
//! | `<name>` | the default variable regex (`[^/]+`) | yes |
//! | `<name:regex>` | `regex` | yes |
//!
//! All other text is literal, `.` included. One trailing `/` is ignored on
//! both the expression and the candidate.
//!
//! ## Examples
//!
//! ```
//! use deeproute_urls::{RoutePattern, DEFAULT_VARIABLE_REGEX};
//!
//! let pattern = RoutePattern::parse("*://<subdomain:[a-z]+>.mysite.com/*");
//! let compiled = pattern.compile(DEFAULT_VARIABLE_REGEX).unwrap();
//!
//! let captures = compiled.captures("https://www.mysite.com/about").unwrap();
//! assert_eq!(captures.get_string("subdomain"), "www");
//! assert!(compiled.captures("https://www.othersite.com/about").is_none());
//! ```

pub mod error;
pub mod matcher;
pub mod params;
pub mod pattern;
pub mod query;
pub mod specificity;

pub use error::PatternError;
pub use matcher::{CompiledPattern, match_pattern, trim_trailing_slash};
pub use params::CaptureMap;
pub use pattern::{
	DEFAULT_VARIABLE_REGEX, MAX_PATTERN_LENGTH, RoutePattern, Token, WILDCARD_REGEX,
};
pub use query::{QueryMap, UrlParts, extract_query};
