//! # deeproute
//!
//! Deep link dispatch: match incoming URLs against route expressions and hand
//! typed captures to the handler that owns them.
//!
//! ## Crates
//!
//! - [`urls`] - expression grammar, specificity ordering, matching, captures
//!   and query extraction
//! - [`dispatch`] - the two-stage [`Router`]
//! - [`conf`] - [`RouterSettings`] from defaults, TOML and the environment
//!
//! ## Expressions
//!
//! | Marker | Matches |
//! |--------|---------|
//! | `*` | one or more of any character |
//! | `<name>` | the default variable regex, `[^/]+` unless configured |
//! | `<name:regex>` | `regex` |
//!
//! Everything else matches literally and one trailing `/` is ignored.
//!
//! ## Quick Example
//!
//! ```
//! use std::cell::RefCell;
//! use deeproute::prelude::*;
//!
//! let mut router: Router<RefCell<Vec<String>>> = Router::new();
//! router.map("/product/<product_id:[a-z0-9]+>-*", |log, result| {
//! 	log.borrow_mut().push(result.variables.get_string("product_id").to_string());
//! });
//!
//! let log = RefCell::new(Vec::new());
//! assert!(router.route(&log, "/product/kj9fd8-tas-keren", None));
//! assert_eq!(log.into_inner(), vec!["kj9fd8"]);
//! ```

pub use deeproute_conf as conf;
pub use deeproute_dispatch as dispatch;
pub use deeproute_urls as urls;

pub use deeproute_conf::{ConfError, DEFAULT_ENV_PREFIX, RouterSettings};
pub use deeproute_dispatch::{
	Dispatch, PreProcessor, Preparation, Processor, ProcessorFn, RouteResult, Router, RouterMap,
	RouterMapBuilder,
};
pub use deeproute_urls::{
	CaptureMap, CompiledPattern, DEFAULT_VARIABLE_REGEX, PatternError, QueryMap, RoutePattern,
	Token, UrlParts, match_pattern,
};

pub mod prelude {
	pub use crate::{
		CaptureMap, Dispatch, QueryMap, RoutePattern, RouteResult, Router, RouterMap,
		RouterSettings,
	};
}
