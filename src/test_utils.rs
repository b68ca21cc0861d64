//! Shared test helpers.
//!
//! Only compiled for tests (`#[cfg(test)]`).

use crate::context::{Flags, RequestContext};

/// A context with the given flags and nothing else.
pub fn ctx_with_flags(flags: Flags) -> RequestContext {
    RequestContext::builder().flags(flags).build()
}

/// A context carrying a single header.
pub fn ctx_with_header(name: &str, value: &str) -> RequestContext {
    RequestContext::builder().header(name, value).build()
}
