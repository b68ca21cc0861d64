//! End-to-end tests of the public introspection surface: classification,
//! sanitized variable access, header lookup and client IP resolution,
//! exercised together the way a host embeds them.

use reqlens::{classify, client_ip, headers, Flags, RequestContext, Source, Value, VarStore};

fn frontend_search_request() -> RequestContext {
    RequestContext::builder()
        .method("get")
        .header("x-forwarded-for", "203.0.113.5, 10.0.0.1")
        .query_param("Search Term", "<b>hi</b>  ")
        .query_param("paged", "3")
        .peer_addr("198.51.100.7")
        .build()
}

#[test]
fn test_frontend_search_request_end_to_end() {
    let ctx = frontend_search_request();
    let mut store = VarStore::new();

    assert!(classify::is(&ctx, "frontend"));
    assert!(classify::is_desktop(&ctx));
    assert!(classify::is_method(&ctx, "GET"));
    assert!(!classify::is_ssl(&ctx));

    assert_eq!(
        store.var(&ctx, Source::Get, "search_term"),
        Some(Value::from("hi"))
    );
    assert_eq!(store.current_page(&ctx), 3);
    assert_eq!(client_ip::resolve(&ctx), "203.0.113.5");
}

#[test]
fn test_unknown_kind_names_are_false() {
    let ctx = frontend_search_request();
    for name in ["webhook", "Frontend ", "rest-api", "", "42"] {
        assert!(!classify::is(&ctx, name), "{name:?}");
    }
}

#[test]
fn test_kind_list_query_is_a_disjunction() {
    let ctx = RequestContext::builder()
        .flags(Flags {
            doing_cron: true,
            ..Flags::default()
        })
        .build();

    assert!(classify::is_any(&ctx, ["admin", "cron"]));
    assert!(classify::is_any(&ctx, ["cron", "admin"]));
    assert!(!classify::is_any(&ctx, ["admin", "ajax"]));
    assert!(!classify::is_any(&ctx, Vec::<&str>::new()));
}

#[test]
fn test_api_request_is_not_frontend() {
    // No platform flags at all, but an API header makes it an api
    // request, which excludes frontend.
    let ctx = RequestContext::builder()
        .header("authorization", "Bearer token")
        .build();

    assert!(classify::is(&ctx, "api"));
    assert!(!classify::is(&ctx, "frontend"));
    assert!(!classify::is(&ctx, "rest"));
}

#[test]
fn test_editor_preview_request() {
    let ctx = RequestContext::builder()
        .route("/wp/v2/block-renderer/core/paragraph")
        .flags(Flags {
            rest_request: true,
            authenticated: true,
            ..Flags::default()
        })
        .build();

    assert!(classify::is_any(&ctx, ["editor"]));
    assert!(classify::is(&ctx, "rest"));
    assert!(classify::is(&ctx, "api"));
    assert!(!classify::is(&ctx, "frontend"));
}

#[test]
fn test_cloudflare_terminated_https() {
    let ctx = RequestContext::builder()
        .header("cf-ray", "7a2f0000-IAD")
        .header("cf-visitor", r#"{"scheme":"https"}"#)
        .header("cf-connecting-ip", "203.0.113.9")
        .peer_addr("172.68.0.10")
        .build();

    assert!(classify::is_cloudflare(&ctx));
    assert!(classify::is_ssl(&ctx));
    // The edge-asserted IP wins over the (private) peer address.
    assert_eq!(client_ip::resolve(&ctx), "203.0.113.9");
}

#[test]
fn test_private_proxy_chain_falls_back_to_peer() {
    let ctx = RequestContext::builder()
        .header("x-forwarded-for", "10.0.0.1")
        .peer_addr("192.0.2.200")
        .build();

    assert_eq!(client_ip::resolve(&ctx), "192.0.2.200");
}

#[test]
fn test_var_default_and_consistency() {
    let ctx = frontend_search_request();
    let mut store = VarStore::new();

    assert_eq!(
        store.var_or(&ctx, Source::Get, "missing", Value::from("fallback")),
        Value::from("fallback")
    );

    let sentinel = Value::from("sentinel");
    for key in ["search_term", "missing", "paged"] {
        let hit = store.var_or(&ctx, Source::Get, key, sentinel.clone()) != sentinel;
        assert_eq!(store.has_var(&ctx, Source::Get, key), hit, "{key}");
    }
}

#[test]
fn test_refresh_reflects_mutated_source() {
    let mut ctx = RequestContext::builder().query_param("q", "old").build();
    let mut store = VarStore::new();

    assert_eq!(store.var(&ctx, Source::Get, "q"), Some(Value::from("old")));

    ctx.insert_param(Source::Get, "q", "new");
    assert_eq!(
        store.var(&ctx, Source::Get, "q"),
        Some(Value::from("old")),
        "stale snapshot without refresh"
    );
    assert_eq!(
        store.vars(&ctx, Source::Get, true).get("q"),
        Some(&Value::from("new"))
    );
}

#[test]
fn test_header_lookup_spellings_and_defaults() {
    let ctx = RequestContext::builder()
        .header("x-auth-token", "t0ken")
        .server("CONTENT_TYPE", "text/html")
        .build();

    for spelling in ["x-auth-token", "X-Auth-Token", "X_AUTH_TOKEN"] {
        assert_eq!(headers::get(&ctx, spelling).as_deref(), Some("t0ken"));
    }
    assert_eq!(headers::get(&ctx, "Content-Type").as_deref(), Some("text/html"));
    assert_eq!(headers::get(&ctx, "x-api-key"), None);
    assert!(!headers::contains(&ctx, "x-api-key"));
}

#[test]
fn test_http_header_map_interop() {
    let mut map = http::HeaderMap::new();
    map.insert(
        http::header::AUTHORIZATION,
        http::HeaderValue::from_static("Bearer abc"),
    );
    map.insert("x-real-ip", http::HeaderValue::from_static("203.0.113.77"));

    let ctx = RequestContext::builder().headers_from(&map).build();

    assert!(classify::is(&ctx, "api"));
    assert_eq!(client_ip::resolve(&ctx), "203.0.113.77");
}

#[test]
fn test_cli_invocation_context() {
    let ctx = RequestContext::builder()
        .flags(Flags {
            cli_process: true,
            ..Flags::default()
        })
        .build();

    assert!(classify::is(&ctx, "cli"));
    assert!(!classify::is(&ctx, "frontend"));
    // A CLI context still answers the rest of the surface.
    assert_eq!(ctx.method(), "GET");
    assert_eq!(client_ip::resolve(&ctx), "");
    assert_eq!(VarStore::new().current_page(&ctx), 1);
}
