//! Request classification.
//!
//! A request falls into zero or more kinds from a closed vocabulary
//! ([`RequestKind`]). Every predicate is a pure, read-only function of the
//! [`RequestContext`]; none of them caches, and none of them fails.
//!
//! The string query API ([`is`], [`is_any`]) soft-fails on unknown kind
//! names: a typo classifies as "not this kind" rather than raising, so
//! callers probing for kinds a future host version may add degrade
//! silently instead of breaking.
//!
//! # Example
//!
//! ```
//! use reqlens::{classify, Flags, RequestContext, RequestKind};
//!
//! let ctx = RequestContext::builder()
//!     .flags(Flags {
//!         doing_ajax: true,
//!         ..Flags::default()
//!     })
//!     .build();
//!
//! assert!(RequestKind::Ajax.matches(&ctx));
//! assert!(classify::is_any(&ctx, ["admin", "ajax"]));
//! assert!(!classify::is(&ctx, "frontend"));
//! assert!(!classify::is(&ctx, "no-such-kind"));
//! ```

use std::str::FromStr;

use serde::Deserialize;

use crate::context::RequestContext;
use crate::error::ReqLensError;
use crate::headers::{self, API_HEADERS, CF_CONNECTING_IP, CF_RAY, CF_VISITOR};

/// The closed vocabulary of request kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Administration area request.
    Admin,
    /// Asynchronous (ajax) action.
    Ajax,
    /// Scheduled task run.
    Cron,
    /// REST entry point request.
    Rest,
    /// API request: REST, or authenticated via a known API header.
    Api,
    /// None of the non-frontend kinds apply. Derived, never stored.
    Frontend,
    /// JSON-bodied request. Not part of the frontend exclusion set.
    Json,
    /// Non-web execution environment.
    Cli,
    /// Admin area, or an authenticated block-renderer REST request.
    Editor,
}

/// Every kind, for exhaustive property checks.
pub const ALL_KINDS: &[RequestKind] = &[
    RequestKind::Admin,
    RequestKind::Ajax,
    RequestKind::Cron,
    RequestKind::Rest,
    RequestKind::Api,
    RequestKind::Frontend,
    RequestKind::Json,
    RequestKind::Cli,
    RequestKind::Editor,
];

impl RequestKind {
    /// Parses a kind name, returning `None` for anything outside the
    /// vocabulary. This is the soft-fail entry point the query API uses.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "ajax" => Some(Self::Ajax),
            "cron" => Some(Self::Cron),
            "rest" => Some(Self::Rest),
            "api" => Some(Self::Api),
            "frontend" => Some(Self::Frontend),
            "json" => Some(Self::Json),
            "cli" => Some(Self::Cli),
            "editor" => Some(Self::Editor),
            _ => None,
        }
    }

    /// The canonical lowercase name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Ajax => "ajax",
            Self::Cron => "cron",
            Self::Rest => "rest",
            Self::Api => "api",
            Self::Frontend => "frontend",
            Self::Json => "json",
            Self::Cli => "cli",
            Self::Editor => "editor",
        }
    }

    /// Evaluates this kind against a context. Total: every kind resolves
    /// to a boolean for every context.
    pub fn matches(self, ctx: &RequestContext) -> bool {
        match self {
            Self::Admin => is_admin(ctx),
            Self::Ajax => is_ajax(ctx),
            Self::Cron => is_cron(ctx),
            Self::Rest => is_rest(ctx),
            Self::Api => is_api(ctx),
            Self::Frontend => is_frontend(ctx),
            Self::Json => is_json(ctx),
            Self::Cli => is_cli(ctx),
            Self::Editor => is_editor(ctx),
        }
    }
}

impl FromStr for RequestKind {
    type Err = ReqLensError;

    /// Strict variant of [`RequestKind::from_name`] for callers that
    /// want unknown names to be an error rather than `false`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ReqLensError::UnknownKind(s.to_string()))
    }
}

/// Route substring marking the block editor's preview endpoint.
const BLOCK_RENDERER_ROUTE: &str = "/block-renderer/";

/// Tests a single kind name. Unknown names resolve to `false`.
pub fn is(ctx: &RequestContext, kind: &str) -> bool {
    RequestKind::from_name(kind).is_some_and(|k| k.matches(ctx))
}

/// Tests a list of kind names, true when any matches. Short-circuits on
/// the first match; list order never changes the result.
pub fn is_any<I, S>(ctx: &RequestContext, kinds: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    kinds.into_iter().any(|kind| is(ctx, kind.as_ref()))
}

/// Administration area request.
pub fn is_admin(ctx: &RequestContext) -> bool {
    ctx.flags().admin_area
}

/// Asynchronous (ajax) action.
pub fn is_ajax(ctx: &RequestContext) -> bool {
    ctx.flags().doing_ajax
}

/// Scheduled task run.
pub fn is_cron(ctx: &RequestContext) -> bool {
    ctx.flags().doing_cron
}

/// REST entry point request. The flag is set once per request by the
/// host, not recomputed per call.
pub fn is_rest(ctx: &RequestContext) -> bool {
    ctx.flags().rest_request
}

/// JSON-bodied request.
pub fn is_json(ctx: &RequestContext) -> bool {
    ctx.flags().json_request
}

/// Non-web execution environment. Either the process-level signal or the
/// host's CLI marker constant suffices.
pub fn is_cli(ctx: &RequestContext) -> bool {
    ctx.flags().cli_process || ctx.flags().cli_marker
}

/// API request: the REST flag, or the presence of any known API
/// authentication header ([`API_HEADERS`], first match wins).
pub fn is_api(ctx: &RequestContext) -> bool {
    if is_rest(ctx) {
        return true;
    }
    API_HEADERS.iter().any(|header| headers::contains(ctx, header))
}

/// Frontend request: none of admin, ajax, cron, rest, api or cli apply.
///
/// Derived on every call, never cached. `is_json` is deliberately not in
/// the exclusion set: a JSON request can still be frontend.
pub fn is_frontend(ctx: &RequestContext) -> bool {
    !(is_admin(ctx)
        || is_ajax(ctx)
        || is_cron(ctx)
        || is_rest(ctx)
        || is_api(ctx)
        || is_cli(ctx))
}

/// Block editor request: the admin area, or an authenticated REST call
/// whose route contains the block-renderer segment. The substring check
/// is the sole mechanism; no exact route match, no versioning awareness.
pub fn is_editor(ctx: &RequestContext) -> bool {
    if is_admin(ctx) {
        return true;
    }
    is_rest(ctx)
        && ctx.flags().authenticated
        && ctx
            .route()
            .is_some_and(|route| route.contains(BLOCK_RENDERER_ROUTE))
}

/// Shape of the Cloudflare `cf-visitor` header value.
#[derive(Debug, Deserialize)]
struct CfVisitor {
    scheme: Option<String>,
}

/// Secure transport: the host's transport flag, or a Cloudflare visitor
/// header asserting an `https` scheme at the edge. A malformed or absent
/// header is "no match", never an error.
pub fn is_ssl(ctx: &RequestContext) -> bool {
    if ctx.flags().secure_transport {
        return true;
    }
    headers::get(ctx, CF_VISITOR)
        .and_then(|raw| serde_json::from_str::<CfVisitor>(&raw).ok())
        .and_then(|visitor| visitor.scheme)
        .is_some_and(|scheme| scheme == "https")
}

/// Cloudflare-proxied request: either edge header present.
pub fn is_cloudflare(ctx: &RequestContext) -> bool {
    headers::contains(ctx, CF_RAY) || headers::contains(ctx, CF_CONNECTING_IP)
}

/// Mobile client per the host's device sniffer.
pub fn is_mobile(ctx: &RequestContext) -> bool {
    ctx.flags().mobile_client
}

/// Desktop client: exactly the complement of [`is_mobile`].
pub fn is_desktop(ctx: &RequestContext) -> bool {
    !is_mobile(ctx)
}

/// Case-insensitive comparison against a single HTTP method name.
pub fn is_method(ctx: &RequestContext, method: &str) -> bool {
    ctx.method() == method.to_ascii_uppercase()
}

/// Membership test against a list of HTTP method names.
pub fn is_any_method<I, S>(ctx: &RequestContext, methods: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    methods
        .into_iter()
        .any(|method| is_method(ctx, method.as_ref()))
}
