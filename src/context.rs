//! The request context: every fact about the inbound request the library
//! reads, gathered into one explicitly constructed value.
//!
//! Nothing in this crate reaches for ambient state. The host builds a
//! [`RequestContext`] once per inbound request (or CLI invocation) from
//! whatever HTTP stack or runtime it embeds, and passes it to the
//! classifier, header and variable APIs by reference. Concurrent requests
//! each get their own context; the context itself is never shared.
//!
//! # Server metadata vs. enumerated headers
//!
//! Header lookup supports two representations, matching the two ways
//! hosts commonly expose headers:
//!
//! - **Server metadata** — CGI-style keys (`HTTP_X_API_KEY`,
//!   `CONTENT_TYPE`) in a flat map, always available.
//! - **Enumerated headers** — the full original header list, available
//!   only when the host can enumerate it.
//!
//! [`ContextBuilder::header`] populates the server map; hosts that can
//! also enumerate use [`ContextBuilder::enumerated_header`] or
//! [`ContextBuilder::headers_from`].
//!
//! # Example
//!
//! ```
//! use reqlens::{Flags, RequestContext};
//!
//! let ctx = RequestContext::builder()
//!     .method("post")
//!     .header("x-forwarded-for", "203.0.113.5, 10.0.0.1")
//!     .query_param("Search Term", "<b>hi</b>")
//!     .peer_addr("198.51.100.7")
//!     .flags(Flags {
//!         secure_transport: true,
//!         ..Flags::default()
//!     })
//!     .build();
//!
//! assert_eq!(ctx.method(), "POST");
//! ```

use std::collections::HashMap;

use http::HeaderMap;

use crate::value::Value;
use crate::vars::Source;

/// Platform-classification flags supplied by the host environment.
///
/// Each flag is a request-scoped constant: the host sets it once while
/// building the context and the classifier treats it as immutable for the
/// lifetime of the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// The request targets the host's administration area.
    pub admin_area: bool,
    /// The host is handling an asynchronous (ajax) action.
    pub doing_ajax: bool,
    /// The host is running a scheduled task.
    pub doing_cron: bool,
    /// The host's REST entry point is active for this request.
    pub rest_request: bool,
    /// The host classified the request body as JSON.
    pub json_request: bool,
    /// The host's device sniffer flagged a mobile client.
    pub mobile_client: bool,
    /// The transport layer is secure (TLS terminated locally).
    pub secure_transport: bool,
    /// The caller is authenticated with the host.
    pub authenticated: bool,
    /// The process runs under a non-web execution environment.
    pub cli_process: bool,
    /// The host defined its CLI-only marker constant. Checked in
    /// addition to `cli_process`; the redundancy keeps CLI detection
    /// working across hosting setups where only one signal is present.
    pub cli_marker: bool,
}

/// All inbound request facts, owned and request-scoped.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    server: HashMap<String, String>,
    enumerated: Option<Vec<(String, String)>>,
    query: Vec<(String, Value)>,
    body: Vec<(String, Value)>,
    combined: Vec<(String, Value)>,
    method: Option<String>,
    route: Option<String>,
    peer_addr: Option<String>,
    flags: Flags,
}

impl RequestContext {
    /// Starts building a context.
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// Looks up a CGI-style server metadata entry by exact key.
    pub fn server_var(&self, key: &str) -> Option<&str> {
        self.server.get(key).map(String::as_str)
    }

    /// Returns the full enumerated header list, when the host provided
    /// one.
    pub fn enumerated_headers(&self) -> Option<&[(String, String)]> {
        self.enumerated.as_deref()
    }

    /// Returns the raw parameter pairs for a source, in insertion order.
    pub fn raw_params(&self, source: Source) -> &[(String, Value)] {
        match source {
            Source::Get => &self.query,
            Source::Post => &self.body,
            Source::Request => &self.combined,
        }
    }

    /// Appends a raw parameter to a single source.
    ///
    /// Unlike the builder's `query_param`/`body_param`, this does not
    /// mirror into the combined source; hosts mutating a context after
    /// construction maintain the combined view themselves.
    pub fn insert_param(&mut self, source: Source, key: impl Into<String>, value: impl Into<Value>) {
        let params = match source {
            Source::Get => &mut self.query,
            Source::Post => &mut self.body,
            Source::Request => &mut self.combined,
        };
        params.push((key.into(), value.into()));
    }

    /// The HTTP method, uppercased. Defaults to `GET` when the host
    /// supplied none.
    pub fn method(&self) -> String {
        self.method
            .as_deref()
            .map(str::to_ascii_uppercase)
            .unwrap_or_else(|| "GET".to_string())
    }

    /// The matched route for this request, if the host routed it.
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    /// The raw transport-reported peer address. Not client-supplied, so
    /// never validated or sanitized by this crate.
    pub fn peer_addr(&self) -> Option<&str> {
        self.peer_addr.as_deref()
    }

    /// The platform-classification flags.
    pub fn flags(&self) -> &Flags {
        &self.flags
    }
}

/// Builder for [`RequestContext`].
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    ctx: RequestContext,
}

impl ContextBuilder {
    /// Records a header under its CGI-style server key
    /// (`x-api-key` becomes `HTTP_X_API_KEY`).
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.ctx.server.insert(server_key(name), value.into());
        self
    }

    /// Appends a header to the enumerated header list without touching
    /// the server metadata map. Used by hosts that can enumerate the
    /// original headers.
    pub fn enumerated_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.ctx
            .enumerated
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    /// Ingests an [`http::HeaderMap`], populating both the server
    /// metadata map and the enumerated list. Values that are not valid
    /// UTF-8 are skipped.
    pub fn headers_from(mut self, headers: &HeaderMap) -> Self {
        for (name, value) in headers {
            if let Ok(value) = value.to_str() {
                self = self.header(name.as_str(), value);
                self = self.enumerated_header(name.as_str(), value);
            }
        }
        self
    }

    /// Inserts a raw server metadata entry by exact key
    /// (`CONTENT_TYPE`, `REQUEST_URI`, ...).
    pub fn server(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ctx.server.insert(key.into(), value.into());
        self
    }

    /// Appends a query-source parameter, mirrored into the combined
    /// source per the host convention.
    pub fn query_param(mut self, key: impl Into<String> + Clone, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.ctx.query.push((key.clone().into(), value.clone()));
        self.ctx.combined.push((key.into(), value));
        self
    }

    /// Appends a body-source parameter, mirrored into the combined
    /// source per the host convention.
    pub fn body_param(mut self, key: impl Into<String> + Clone, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.ctx.body.push((key.clone().into(), value.clone()));
        self.ctx.combined.push((key.into(), value));
        self
    }

    /// Appends a parameter to the combined source only.
    pub fn request_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.ctx.combined.push((key.into(), value.into()));
        self
    }

    /// Sets the HTTP method (case preserved here, uppercased on read).
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.ctx.method = Some(method.into());
        self
    }

    /// Sets the matched route.
    pub fn route(mut self, route: impl Into<String>) -> Self {
        self.ctx.route = Some(route.into());
        self
    }

    /// Sets the transport-reported peer address.
    pub fn peer_addr(mut self, addr: impl Into<String>) -> Self {
        self.ctx.peer_addr = Some(addr.into());
        self
    }

    /// Sets the platform-classification flags.
    pub fn flags(mut self, flags: Flags) -> Self {
        self.ctx.flags = flags;
        self
    }

    /// Finishes building.
    pub fn build(self) -> RequestContext {
        self.ctx
    }
}

/// Maps a header name to its CGI-style server metadata key:
/// lowercase-dash `x-api-key` becomes `HTTP_X_API_KEY`.
pub(crate) fn server_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len() + 5);
    key.push_str("HTTP_");
    for c in name.chars() {
        match c {
            '-' => key.push('_'),
            _ => key.push(c.to_ascii_uppercase()),
        }
    }
    key
}
