//! Sanitized request variable access.
//!
//! [`VarStore`] exposes cached, sanitized views of the three raw
//! parameter sources of a [`RequestContext`]. Each source's view is a
//! snapshot: built lazily on first access by sanitizing every raw
//! key/value pair, then reused until the caller explicitly refreshes it.
//! Mutations to the underlying raw source are invisible until then.
//!
//! The cache is keyed by the *sanitized* key. When two distinct raw keys
//! sanitize to the same identifier, the later one (in the raw source's
//! insertion order) silently overwrites the earlier: last-write-wins,
//! not an error.
//!
//! One store serves one request. A host handling requests concurrently
//! gives each request its own store; there is no locking because there
//! is nothing to share.
//!
//! # Example
//!
//! ```
//! use reqlens::{RequestContext, Source, Value, VarStore};
//!
//! let ctx = RequestContext::builder()
//!     .query_param("Search Term", "<b>hi</b>  ")
//!     .build();
//!
//! let mut store = VarStore::new();
//! assert_eq!(
//!     store.var(&ctx, Source::Get, "search_term"),
//!     Some(Value::from("hi"))
//! );
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use tracing::debug;

use crate::context::RequestContext;
use crate::error::ReqLensError;
use crate::sanitize::{DefaultSanitizer, Sanitize};
use crate::value::Value;

/// Default pagination query parameter.
const PAGED_PARAM: &str = "paged";

/// The three raw parameter sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Query string parameters.
    Get,
    /// Body parameters.
    Post,
    /// The combined view of query and body parameters.
    Request,
}

impl Source {
    /// The canonical lowercase name of this source.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Request => "request",
        }
    }

    /// Parses a source name, returning `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "request" => Some(Self::Request),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Get => 0,
            Self::Post => 1,
            Self::Request => 2,
        }
    }
}

impl FromStr for Source {
    type Err = ReqLensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ReqLensError::UnknownSource(s.to_string()))
    }
}

/// Per-source cache of sanitized request variables.
///
/// Generic over the [`Sanitize`] strategy; defaults to
/// [`DefaultSanitizer`]. Methods take the context per call so the host
/// keeps ownership and may mutate raw sources between refreshes.
#[derive(Debug, Clone)]
pub struct VarStore<S: Sanitize = DefaultSanitizer> {
    sanitizer: S,
    cached: [Option<HashMap<String, Value>>; 3],
}

impl VarStore<DefaultSanitizer> {
    /// Creates a store using the default sanitizer.
    pub fn new() -> Self {
        Self::with_sanitizer(DefaultSanitizer)
    }
}

impl Default for VarStore<DefaultSanitizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sanitize> VarStore<S> {
    /// Creates a store using a host-supplied sanitizer.
    pub fn with_sanitizer(sanitizer: S) -> Self {
        Self {
            sanitizer,
            cached: [None, None, None],
        }
    }

    /// Returns the sanitized variable mapping for a source.
    ///
    /// Rebuilds the snapshot when it has never been built, when it is
    /// empty, or when `refresh` is set; otherwise returns the cached
    /// snapshot even if the raw source changed since.
    pub fn vars(
        &mut self,
        ctx: &RequestContext,
        source: Source,
        refresh: bool,
    ) -> &HashMap<String, Value> {
        let idx = source.index();
        let stale = refresh || self.cached[idx].as_ref().is_none_or(HashMap::is_empty);

        if stale {
            let mut map = HashMap::new();
            for (key, value) in ctx.raw_params(source) {
                // Last-write-wins on sanitized-key collision.
                map.insert(self.sanitizer.key(key), self.sanitizer.apply(value));
            }
            debug!(
                source = source.as_str(),
                entries = map.len(),
                "sanitized variable cache built"
            );
            self.cached[idx] = Some(map);
        }

        self.cached[idx].get_or_insert_with(HashMap::new)
    }

    /// Looks up one variable by key. The key is sanitized before the
    /// lookup, so callers may pass the raw spelling.
    pub fn var(&mut self, ctx: &RequestContext, source: Source, key: &str) -> Option<Value> {
        let key = self.sanitizer.key(key);
        self.vars(ctx, source, false).get(&key).cloned()
    }

    /// Looks up one variable, falling back to `default` when absent.
    /// The default is returned untouched, never sanitized.
    pub fn var_or(
        &mut self,
        ctx: &RequestContext,
        source: Source,
        key: &str,
        default: Value,
    ) -> Value {
        self.var(ctx, source, key).unwrap_or(default)
    }

    /// Existence check against the same cache as [`VarStore::var`].
    pub fn has_var(&mut self, ctx: &RequestContext, source: Source, key: &str) -> bool {
        self.var(ctx, source, key).is_some()
    }

    /// Drops the cached snapshot for one source.
    pub fn invalidate(&mut self, source: Source) {
        self.cached[source.index()] = None;
    }

    /// Drops every cached snapshot.
    pub fn invalidate_all(&mut self) {
        self.cached = [None, None, None];
    }

    /// The current pagination page from the `paged` query parameter.
    pub fn current_page(&self, ctx: &RequestContext) -> u32 {
        self.current_page_from(ctx, PAGED_PARAM)
    }

    /// The current pagination page from a named query parameter.
    ///
    /// Reads the raw (unsanitized) query value, takes its best-effort
    /// integer prefix (non-numeric parses to 0), and clamps to a minimum
    /// of 1. Never reads the cache.
    pub fn current_page_from(&self, ctx: &RequestContext, param: &str) -> u32 {
        let raw = ctx
            .raw_params(Source::Get)
            .iter()
            .rev()
            .find(|(key, _)| key == param)
            .and_then(|(_, value)| value.first());

        match raw {
            Some(raw) => leading_int(raw).clamp(1, i64::from(u32::MAX)) as u32,
            None => 1,
        }
    }
}

/// Best-effort integer parse: optional sign, then the longest digit
/// prefix. Anything else contributes nothing; no digits at all is 0.
fn leading_int(s: &str) -> i64 {
    let mut chars = s.trim().chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for c in chars {
        match c.to_digit(10) {
            Some(d) => {
                seen_digit = true;
                value = value.saturating_mul(10).saturating_add(i64::from(d));
            }
            None => break,
        }
    }

    if !seen_digit {
        0
    } else if negative {
        -value
    } else {
        value
    }
}
