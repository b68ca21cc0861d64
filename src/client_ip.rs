//! Client IP resolution through an ordered trust chain.
//!
//! Resolution order encodes a trust policy, not a preference:
//!
//! 1. **Cloudflare-asserted** - when Cloudflare indicators are present,
//!    `cf-connecting-ip` is taken as-is. The edge sets it from the actual
//!    connection, so it is not treated as client-supplied.
//! 2. **Generic proxy headers** - `x-real-ip`, `x-forwarded-for`,
//!    `client-ip`, `x-client-ip`, `x-cluster-client-ip`, in order. A
//!    comma-separated value contributes its first token (leftmost =
//!    original client per the `X-Forwarded-For` convention), trimmed.
//!    Each candidate must parse as a public IP literal; a private or
//!    reserved address means the header was spoofed or records an
//!    internal hop, and the walk continues.
//! 3. **Raw peer address** - the transport-reported address, returned
//!    without validation. It is not client-supplied, which is the
//!    documented exception to the validation rule.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use tracing::debug;

use crate::classify;
use crate::context::RequestContext;
use crate::headers::{self, CF_CONNECTING_IP, PROXY_IP_HEADERS};

/// Resolves the client IP for a request.
///
/// Never fails: when no header yields a validated public address and the
/// host supplied no peer address, the result is an empty string.
///
/// # Example
///
/// ```
/// use reqlens::{client_ip, RequestContext};
///
/// let ctx = RequestContext::builder()
///     .header("x-forwarded-for", "203.0.113.5, 10.0.0.1")
///     .peer_addr("198.51.100.7")
///     .build();
///
/// assert_eq!(client_ip::resolve(&ctx), "203.0.113.5");
/// ```
pub fn resolve(ctx: &RequestContext) -> String {
    if classify::is_cloudflare(ctx) {
        if let Some(ip) = headers::get(ctx, CF_CONNECTING_IP) {
            return ip;
        }
    }

    for header in PROXY_IP_HEADERS {
        let Some(raw) = headers::get(ctx, header) else {
            continue;
        };
        let candidate = raw.split(',').next().map(str::trim).unwrap_or_default();
        if is_public_ip(candidate) {
            return candidate.to_string();
        }
        debug!(header, candidate, "proxy header candidate rejected");
    }

    ctx.peer_addr().unwrap_or_default().to_string()
}

/// Returns true when `candidate` parses as a syntactically well-formed
/// public IP literal: neither private (RFC 1918, unique local), loopback,
/// link-local, zero-network nor reserved (240.0.0.0/4 and the special v6
/// blocks).
pub fn is_public_ip(candidate: &str) -> bool {
    match candidate.parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) => is_public_v4(ip),
        Ok(IpAddr::V6(ip)) => is_public_v6(ip),
        Err(_) => false,
    }
}

fn is_public_v4(ip: Ipv4Addr) -> bool {
    let octets = ip.octets();
    // 0.0.0.0/8 and 240.0.0.0/4 (which includes broadcast) are the
    // reserved blocks; they lack stable std helpers.
    let zero_network = octets[0] == 0;
    let reserved = octets[0] >= 240;

    !(ip.is_private() || ip.is_loopback() || ip.is_link_local() || zero_network || reserved)
}

fn is_public_v6(ip: Ipv6Addr) -> bool {
    let segments = ip.segments();
    // fc00::/7 unique local, fe80::/10 link local, 2001:db8::/32
    // documentation.
    let unique_local = (segments[0] & 0xfe00) == 0xfc00;
    let link_local = (segments[0] & 0xffc0) == 0xfe80;
    let documentation = segments[0] == 0x2001 && segments[1] == 0x0db8;

    // IPv4-mapped addresses take the IPv4 rules.
    if let Some(mapped) = ip.to_ipv4_mapped() {
        return is_public_v4(mapped);
    }

    !(ip.is_unspecified() || ip.is_loopback() || unique_local || link_local || documentation)
}
