//! reqlens - Host-agnostic HTTP request introspection
//!
//! A small library that classifies an inbound request (admin, ajax, cron,
//! rest, api, frontend, json, cli, editor), detects environment
//! attributes (mobile vs desktop, secure transport, CDN presence), and
//! provides sanitized, cached access to request parameters plus header
//! lookup and client IP extraction through an ordered trust chain.
//!
//! # Overview
//!
//! Nothing here is ambient. The host builds a [`RequestContext`] per
//! inbound request from its own HTTP stack and runtime signals, then
//! queries it:
//!
//! - [`classify`] - request kind predicates and the soft-fail string
//!   query API
//! - [`vars`] - [`VarStore`], the per-source sanitized variable cache
//! - [`headers`] - header constants and chained header lookup
//! - [`client_ip`] - client IP resolution and public-IP validation
//!
//! Every operation on that surface is read-only over the context, a
//! bounded synchronous computation, and infallible: absence and parse
//! failures degrade to `false`, `None` or a fallback value. Callers
//! never need error handling to use it.
//!
//! # Example
//!
//! ```
//! use reqlens::{classify, client_ip, Flags, RequestContext, Source, Value, VarStore};
//!
//! let ctx = RequestContext::builder()
//!     .method("GET")
//!     .header("x-forwarded-for", "203.0.113.5, 10.0.0.1")
//!     .query_param("Search Term", "<b>hi</b>  ")
//!     .query_param("paged", "3")
//!     .peer_addr("198.51.100.7")
//!     .flags(Flags::default())
//!     .build();
//!
//! assert!(classify::is(&ctx, "frontend"));
//! assert_eq!(client_ip::resolve(&ctx), "203.0.113.5");
//!
//! let mut store = VarStore::new();
//! assert_eq!(
//!     store.var(&ctx, Source::Get, "search_term"),
//!     Some(Value::from("hi"))
//! );
//! assert_eq!(store.current_page(&ctx), 3);
//! ```
//!
//! # Modules
//!
//! - [`context`] - the explicitly constructed request context
//! - [`classify`] - request classification
//! - [`vars`] - sanitized variable store
//! - [`headers`] - header constants and lookup
//! - [`client_ip`] - client IP trust chain
//! - [`sanitize`] - key/value sanitization and the [`Sanitize`] seam
//! - [`value`] - the scalar-or-list parameter value
//! - [`error`] - error types for the strict parsing entry points

#![forbid(unsafe_code)]

pub mod classify;
pub mod client_ip;
pub mod context;
pub mod error;
pub mod headers;
pub mod sanitize;
#[cfg(test)]
pub mod test_utils;
pub mod value;
pub mod vars;

// Re-export commonly used items at crate root
pub use classify::RequestKind;
pub use context::{ContextBuilder, Flags, RequestContext};
pub use error::{ReqLensError, Result};
pub use sanitize::{DefaultSanitizer, Sanitize};
pub use value::Value;
pub use vars::{Source, VarStore};
