//! Two-stage dispatch behavior across the pre-match and main registries.

use std::cell::RefCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use deeproute_dispatch::{Dispatch, Router, RouterMap};
use rstest::{fixture, rstest};

#[derive(Default)]
struct Calls {
	entries: RefCell<Vec<String>>,
}

impl Calls {
	fn push(&self, entry: impl Into<String>) {
		self.entries.borrow_mut().push(entry.into());
	}

	fn take(&self) -> Vec<String> {
		self.entries.take()
	}
}

#[fixture]
fn calls() -> Calls {
	Calls::default()
}

#[rstest]
fn test_pre_match_veto_skips_main_stage(calls: Calls) {
	let mut router: Router<Calls> = Router::new();
	router.pre_map("*://<subdomain:[a-z]+>.mysite.com/*", |calls, _| {
		calls.push("pre");
		None
	});
	router.map("*", |calls, _| calls.push("main"));

	let dispatch = router.dispatch(&calls, "https://www.mysite.com/about", None);

	assert_eq!(
		dispatch,
		Dispatch::Handled {
			expression: "*://<subdomain:[a-z]+>.mysite.com/*".to_string()
		}
	);
	assert_eq!(calls.take(), vec!["pre"]);
}

#[rstest]
fn test_pre_match_required_when_registered(calls: Calls) {
	let mut router: Router<Calls> = Router::new();
	router.pre_map("*://*.mysite.com/*", |_, _| Some("/about".to_string()));
	router.map("*", |calls, _| calls.push("main"));

	assert_eq!(
		router.dispatch(&calls, "https://www.othersite.com/about", None),
		Dispatch::NoRoute
	);
	assert!(calls.take().is_empty());
}

#[rstest]
fn test_rewritten_path_feeds_main_stage(calls: Calls) {
	let mut router: Router<Calls> = Router::new();
	router.pre_map("*://<subdomain:[a-z]+>.mysite.com/*", |calls, result| {
		calls.push(format!("pre:{}", result.variables.get_string("subdomain")));
		Some("/transaction/77/view".to_string())
	});
	router.map("/transaction/<transaction_id>/view", |calls, result| {
		calls.push(format!(
			"view:{}:{}",
			result.variables.get_long("transaction_id"),
			result.variables.contains_key("subdomain")
		));
	});

	assert!(router.route(&calls, "https://shop.mysite.com/ignored", None));
	assert_eq!(calls.take(), vec!["pre:shop", "view:77:false"]);
}

#[rstest]
fn test_rewritten_path_without_match(calls: Calls) {
	let mut router: Router<Calls> = Router::new();
	router.pre_map("*", |_, _| Some("/unknown".to_string()));
	router.map("/about", |calls, _| calls.push("about"));

	assert!(!router.route(&calls, "https://www.mysite.com/about", None));
	assert!(calls.take().is_empty());
}

#[rstest]
#[case("/register?referrer=anonymous", false)]
#[case("https://www.mysite.com/register?referrer=anonymous", true)]
fn test_query_independent_of_stage(#[case] url: &str, #[case] with_pre_stage: bool, calls: Calls) {
	let mut router: Router<Calls> = Router::new();
	if with_pre_stage {
		router.pre_map("*://*.mysite.com/*", |calls, result| {
			calls.push(format!("pre:{}", result.queries.get_string("referrer")));
			Some("/register".to_string())
		});
	}
	router.map("/register", |calls, result| {
		calls.push(format!("main:{}", result.queries.get_string("referrer")));
	});

	assert!(router.route(&calls, url, None));
	let entries = calls.take();
	assert_eq!(entries.last().map(String::as_str), Some("main:anonymous"));
	if with_pre_stage {
		assert_eq!(entries[0], "pre:anonymous");
	}
}

#[rstest]
fn test_query_values_and_fragment_reach_handler(calls: Calls) {
	let mut router: Router<Calls> = Router::new();
	router.map("/search", |calls, result| {
		calls.push(format!("{:?}", result.query_values.get_int_list("page")));
		calls.push(result.queries.get_string("q").to_string());
		calls.push(result.fragment.clone().unwrap_or_default());
	});

	assert!(router.route(&calls, "/search?q=tas+keren&page=1&page=2#results%20top", None));
	assert_eq!(calls.take(), vec!["[1, 2]", "tas keren", "results top"]);
}

#[rstest]
fn test_trailing_slash_equivalence(calls: Calls) {
	let mut router: Router<Calls> = Router::new();
	router.map("/about", |calls, _| calls.push("about"));

	assert_eq!(
		router.dispatch(&calls, "/about/", None),
		router.dispatch(&calls, "/about", None)
	);
	assert_eq!(calls.take(), vec!["about", "about"]);
}

#[rstest]
fn test_bad_expression_is_skipped(calls: Calls) {
	let mut router: Router<Calls> = Router::new();
	router.map("/product/<id:[a-z+>/details", |calls, _| calls.push("broken"));
	router.map("/product/*", |calls, _| calls.push("product"));

	assert!(router.route(&calls, "/product/abc/details", None));
	assert_eq!(calls.take(), vec!["product"]);
}

#[rstest]
fn test_bounded_unicode_constraints_route(calls: Calls) {
	let mut router: Router<Calls> = Router::new();
	router.map("/user/<first:\\w{1,12}>/<last:\\w{1,12}>", |calls, result| {
		calls.push(format!(
			"{} {}",
			result.variables.get_string("first"),
			result.variables.get_string("last")
		));
	});

	assert!(router.route(&calls, "/user/alice/smith", None));
	assert!(!router.route(&calls, "/user/alice/this-is-not-a-word", None));
	assert_eq!(calls.take(), vec!["alice smith"]);
}

#[rstest]
fn test_bounded_unicode_default_variable_regex(calls: Calls) {
	let mut router: Router<Calls> = Router::new();
	router.set_default_variable_regex("\\w{1,30}");
	router.map("/transaction/<transaction_id>/view", |calls, result| {
		calls.push(result.variables.get_string("transaction_id").to_string());
	});

	assert!(router.route(&calls, "/transaction/tx_42/view", None));
	assert_eq!(calls.take(), vec!["tx_42"]);
}

#[rstest]
fn test_args_pass_through(calls: Calls) {
	let mut router: Router<Calls, u32> = Router::new();
	router.map("/about", |calls, result| {
		calls.push(format!("{:?}", result.args.copied()));
	});

	router.route(&calls, "/about", Some(&7));
	router.route(&calls, "/about", None);
	assert_eq!(calls.take(), vec!["Some(7)", "None"]);
}

#[rstest]
fn test_preparation_wraps_main_handler(calls: Calls) {
	let mut router: Router<Calls> = Router::new();
	router.pre_map("*", |calls, _| {
		calls.push("pre");
		Some("/about".to_string())
	});
	router.map("/about", |calls, _| calls.push("about"));
	router.prepare(|handler, calls, result| {
		calls.push(format!("before:{}", result.url));
		handler(calls, result);
		calls.push("after");
	});

	assert!(router.route(&calls, "myapp://open", None));
	assert_eq!(
		calls.take(),
		vec!["pre", "before:myapp://open", "about", "after"]
	);
}

#[rstest]
fn test_preparation_may_suppress_handler(calls: Calls) {
	let mut router: Router<Calls> = Router::new();
	router.map("/about", |calls, _| calls.push("about"));
	router.prepare(|_, calls, _| calls.push("suppressed"));

	assert!(router.route(&calls, "/about", None));
	assert_eq!(calls.take(), vec!["suppressed"]);
}

#[rstest]
#[should_panic(expected = "handler failed")]
fn test_handler_panic_propagates() {
	let mut router: Router<()> = Router::new();
	router.map("/about", |_, _| panic!("handler failed"));
	router.route(&(), "/about", None);
}

#[rstest]
fn test_register_router_map() {
	let hits = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&hits);

	let map: RouterMap<()> = RouterMap::builder()
		.add_prefixes(["http://", "https://"])
		.add_expressions(["mysite.com", "<subdomain:[a-z]+>.mysite.com"])
		.add_postfix("/*")
		.set_pre_processor(|_, result| {
			result
				.url
				.split_once(".com")
				.map(|(_, path)| path.to_string())
		})
		.add_path("/promo/<code>", move |_, _| {
			counter.fetch_add(1, Ordering::SeqCst);
		})
		.build();

	let mut router = Router::new();
	router.register(map);

	assert_eq!(router.pre_expressions().len(), 4);
	assert_eq!(router.expressions(), vec!["/promo/<code>"]);
	assert!(router.route(&(), "https://mysite.com/promo/summer", None));
	assert!(router.route(&(), "http://www.mysite.com/promo/winter", None));
	assert!(!router.route(&(), "myapp://mysite.com/promo/winter", None));
	assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[rstest]
fn test_router_map_without_pre_processor_maps_paths_only() {
	let map: RouterMap<()> = RouterMap::builder()
		.add_prefix("https://")
		.add_expression("mysite.com")
		.add_postfix("/*")
		.add_path("/about", |_, _| {})
		.build();

	let mut router = Router::new();
	router.register(map);

	assert!(router.pre_expressions().is_empty());
	assert!(router.route(&(), "/about", None));
}
