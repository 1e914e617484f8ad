//! End-to-end pipeline tests: policy and timing producers feeding
//! `pipe_headers`, with the result crossing the `http` boundary.

use std::time::Duration;

use edge_route_headers::{
    pipe_headers, HeaderSet, RouteCachePolicy, RouteHeaders, ServerTimings,
};

fn headers(entries: &[(&str, &str)]) -> HeaderSet {
    entries.iter().copied().collect()
}

#[test]
fn test_loader_policy_merges_with_parent_restriction() {
    // Parent route: short-lived private data.
    let parent = headers(&[
        ("Cache-Control", "private, max-age=60"),
        ("Vary", "Cookie"),
    ]);

    // Child loader: generous public policy plus its own timings.
    let mut loader = HeaderSet::new();
    RouteCachePolicy::public(Duration::from_secs(3600))
        .with_swr(Duration::from_secs(120))
        .vary_on("Accept-Language")
        .apply(&mut loader);
    let mut timings = ServerTimings::new();
    timings.record("db", Some("load notes"), Duration::from_millis(8));
    timings.apply(&mut loader);

    let out = pipe_headers(RouteHeaders {
        parent: &parent,
        loader: &loader,
        action: &HeaderSet::new(),
        error: None,
    })
    .unwrap();

    // The parent's 60s private restriction caps the child's policy.
    assert_eq!(
        out.get("Cache-Control"),
        Some("max-age=60, private, public, stale-while-revalidate=120"),
    );
    // Both vary contributions stay visible, route's own first.
    assert_eq!(
        out.get_all("Vary").collect::<Vec<_>>(),
        vec!["Accept-Language", "Cookie"],
    );
    // Timings survive the pipe.
    assert_eq!(
        out.get("Server-Timing"),
        Some("db;desc=\"load notes\";dur=8.00"),
    );
}

#[test]
fn test_action_only_route_uses_action_headers() {
    let mut action = HeaderSet::new();
    RouteCachePolicy::no_store().apply(&mut action);
    action.append("Vary", "Accept");

    let out = pipe_headers(RouteHeaders {
        parent: &HeaderSet::new(),
        loader: &HeaderSet::new(),
        action: &action,
        error: None,
    })
    .unwrap();

    assert_eq!(out.get("Cache-Control"), Some("no-store"));
    assert_eq!(out.get_joined("Vary"), Some("Accept".to_string()));
}

#[test]
fn test_error_headers_override_loader_policy() {
    let mut loader = HeaderSet::new();
    RouteCachePolicy::public(Duration::from_secs(600)).apply(&mut loader);
    let error = headers(&[("Cache-Control", "no-store")]);

    let out = pipe_headers(RouteHeaders {
        parent: &HeaderSet::new(),
        loader: &loader,
        action: &HeaderSet::new(),
        error: Some(&error),
    })
    .unwrap();

    assert_eq!(out.get("Cache-Control"), Some("no-store"));
}

#[test]
fn test_piped_headers_cross_the_http_boundary() {
    let parent = headers(&[("Server-Timing", "root;dur=2.00")]);
    let loader = headers(&[
        ("Cache-Control", "max-age=30"),
        ("Server-Timing", "db;dur=5.00"),
    ]);

    let out = pipe_headers(RouteHeaders {
        parent: &parent,
        loader: &loader,
        action: &HeaderSet::new(),
        error: None,
    })
    .unwrap();

    let map = out.to_http().unwrap();
    assert_eq!(map.get("cache-control").unwrap(), "max-age=30");
    assert_eq!(map.get_all("server-timing").iter().count(), 2);

    // And back, for nested routes that keep piping upward.
    let round_tripped = HeaderSet::from_http(&map);
    assert_eq!(round_tripped.get("Cache-Control"), Some("max-age=30"));
}

#[test]
fn test_nested_piping_is_still_conservative() {
    // Three levels: root allows an hour, middle narrows to 10 minutes,
    // leaf asks for a day. The strictest value survives both hops.
    let root = headers(&[("Cache-Control", "max-age=3600")]);
    let middle_loader = headers(&[("Cache-Control", "max-age=600")]);

    let middle = pipe_headers(RouteHeaders {
        parent: &root,
        loader: &middle_loader,
        action: &HeaderSet::new(),
        error: None,
    })
    .unwrap();

    let leaf_loader = headers(&[("Cache-Control", "max-age=86400, public")]);
    let leaf = pipe_headers(RouteHeaders {
        parent: &middle,
        loader: &leaf_loader,
        action: &HeaderSet::new(),
        error: None,
    })
    .unwrap();

    assert_eq!(leaf.get("Cache-Control"), Some("max-age=600, public"));
}
