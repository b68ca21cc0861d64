//! HTTP header constants and header lookup.
//!
//! This module centralizes every header name the library consults,
//! avoiding magic strings, and implements the header resolution chain:
//!
//! 1. the CGI-style server metadata key (`HTTP_X_API_KEY`);
//! 2. a fixed alias table for the two headers that lack the `HTTP_`
//!    prefix in server metadata (`content-type`, `content-length`);
//! 3. a scan of the enumerated header list, when the host provided one,
//!    matching case-insensitively with `-` and `_` treated as equal.
//!
//! First match wins. A found value is passed through the scalar value
//! sanitizer before being returned; absence yields `None`, never an
//! error.

use crate::context::{server_key, RequestContext};
use crate::sanitize::sanitize_text;

/// Cloudflare visitor header - carries the original scheme as JSON.
pub const CF_VISITOR: &str = "cf-visitor";

/// Cloudflare ray ID header - present on every Cloudflare-proxied request.
pub const CF_RAY: &str = "cf-ray";

/// Cloudflare connecting IP header - the client IP as asserted by
/// Cloudflare's edge.
pub const CF_CONNECTING_IP: &str = "cf-connecting-ip";

/// X-Real-IP header - single client IP set by a fronting proxy.
pub const X_REAL_IP: &str = "x-real-ip";

/// X-Forwarded-For header - comma-separated proxy chain, leftmost entry
/// is the original client.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Client-IP header - legacy proxy client IP.
pub const CLIENT_IP: &str = "client-ip";

/// X-Client-IP header - legacy proxy client IP.
pub const X_CLIENT_IP: &str = "x-client-ip";

/// X-Cluster-Client-IP header - client IP set by cluster load balancers.
pub const X_CLUSTER_CLIENT_IP: &str = "x-cluster-client-ip";

/// X-Api-Key header (API authentication).
pub const X_API_KEY: &str = "x-api-key";

/// Authorization header (API authentication).
pub const AUTHORIZATION: &str = "authorization";

/// X-Auth-Token header (API authentication).
pub const X_AUTH_TOKEN: &str = "x-auth-token";

/// X-Access-Token header (API authentication).
pub const X_ACCESS_TOKEN: &str = "x-access-token";

/// Content-Type header.
pub const CONTENT_TYPE: &str = "content-type";

/// Content-Length header.
pub const CONTENT_LENGTH: &str = "content-length";

/// Headers whose presence marks a request as an API call, in check
/// order. The first present header short-circuits.
pub const API_HEADERS: &[&str] = &[X_API_KEY, AUTHORIZATION, X_AUTH_TOKEN, X_ACCESS_TOKEN];

/// Proxy headers consulted for the client IP, in decreasing order of
/// trust. Cloudflare's `cf-connecting-ip` is handled separately, ahead
/// of this list.
pub const PROXY_IP_HEADERS: &[&str] = &[
    X_REAL_IP,
    X_FORWARDED_FOR,
    CLIENT_IP,
    X_CLIENT_IP,
    X_CLUSTER_CLIENT_IP,
];

/// Headers stored in server metadata without the `HTTP_` prefix, keyed
/// by canonical name.
const SERVER_ALIASES: &[(&str, &str)] = &[
    (CONTENT_TYPE, "CONTENT_TYPE"),
    (CONTENT_LENGTH, "CONTENT_LENGTH"),
];

/// Looks up a header by name, case-insensitively and with `-`/`_`
/// treated as equal, following the resolution chain documented at module
/// level.
///
/// Returns the sanitized value, or `None` when the header is absent.
///
/// # Example
///
/// ```
/// use reqlens::{headers, RequestContext};
///
/// let ctx = RequestContext::builder()
///     .header("x-api-key", "  secret  ")
///     .build();
///
/// assert_eq!(headers::get(&ctx, "X_API_KEY").as_deref(), Some("secret"));
/// assert_eq!(headers::get(&ctx, "x-missing"), None);
/// ```
pub fn get(ctx: &RequestContext, name: &str) -> Option<String> {
    let canonical = canonical_name(name);

    if let Some(value) = ctx.server_var(&server_key(&canonical)) {
        return Some(sanitize_text(value));
    }

    for (alias, meta_key) in SERVER_ALIASES {
        if *alias == canonical {
            if let Some(value) = ctx.server_var(meta_key) {
                return Some(sanitize_text(value));
            }
        }
    }

    if let Some(enumerated) = ctx.enumerated_headers() {
        for (key, value) in enumerated {
            if canonical_name(key) == canonical {
                return Some(sanitize_text(value));
            }
        }
    }

    None
}

/// Returns true when the header is present under any accepted spelling.
pub fn contains(ctx: &RequestContext, name: &str) -> bool {
    get(ctx, name).is_some()
}

/// Normalizes a header name to its canonical lowercase-dash form.
fn canonical_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '_' => '-',
            _ => c.to_ascii_lowercase(),
        })
        .collect()
}
