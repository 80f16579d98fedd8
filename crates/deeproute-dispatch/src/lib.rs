//! # deeproute-dispatch
//!
//! Two-stage URL dispatch for deeproute.
//!
//! URLs first go through pre-match expressions, usually covering scheme and
//! host, whose handler may stop routing or return a path for the main stage.
//! Main-stage expressions then pick the handler that serves the URL. In both
//! stages the most specific matching expression wins.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use deeproute_dispatch::{Dispatch, Router};
//!
//! let mut router: Router<RefCell<Vec<String>>> = Router::new();
//! router.pre_map("*://<subdomain:[a-z]+>.mysite.com/*", |log, result| {
//! 	log.borrow_mut().push(result.variables.get_string("subdomain").to_string());
//! 	Some("/about".to_string())
//! });
//! router.map("/about", |log, _| log.borrow_mut().push("about".to_string()));
//!
//! let log = RefCell::new(Vec::new());
//! let dispatch = router.dispatch(&log, "https://www.mysite.com/about", None);
//!
//! assert_eq!(dispatch, Dispatch::Routed { expression: "/about".to_string() });
//! assert_eq!(log.into_inner(), vec!["www", "about"]);
//! ```

pub mod handler;
pub mod result;
pub mod router;
pub mod router_map;

pub use handler::{PreProcessor, Preparation, Processor, ProcessorFn, Registration};
pub use result::{Dispatch, RouteResult};
pub use router::Router;
pub use router_map::{RouterMap, RouterMapBuilder};
