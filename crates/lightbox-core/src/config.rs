//! Centralized configuration for the Lightbox client.
//!
//! Holds the constants shared across the crate (endpoints, timeouts, the
//! vendor error-page marker) and the base-URL normalization rules.

use crate::error::{LightboxError, Result};
use regex::Regex;
use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const USER_AGENT: &'static str = "lightbox-client/0.3";
    /// Path prefix every REST endpoint hangs off of.
    pub const REST_PREFIX: &'static str = "/REST/1";
    /// Marker the hosted service embeds in its NGINX error pages.
    pub const ERROR_PAGE_MARKER: &'static str =
        "<title>Lightbox - Something went wrong!</title>";
    /// Field display types that render a single value even though multiple
    /// keyword options get stored underneath.
    pub const RESTRICTED_DISPLAY_TYPES: [&'static str; 2] = ["option", "suggestion"];
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_BATCH_SIZE: i64 = 200;
}

/// Normalize a user-supplied base URL into a canonical `http(s)://...` form.
///
/// Accepted shapes:
/// - `https://sub.host.com` (kept as-is; `https://` prepended when missing)
/// - `localhost` with an optional port (`http://` prepended when missing)
/// - dotted-quad IP addresses, restricted to the private ranges — public IPs
///   fail the hosted service's certificate check and are rejected up front
///
/// Anything else is a [`LightboxError::Config`].
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let raw = raw.trim().trim_end_matches('/');

    let hostname = Regex::new(r"^(?i)(https?://)?[\w-]+(\.[\w-]+)+$").expect("valid regex");
    let localhost = Regex::new(r"^(?i)(https?://)?localhost(:\d{2,5})?$").expect("valid regex");
    let ip_address =
        Regex::new(r"^(?i)(https?://)?(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(:\d{2,5})?$")
            .expect("valid regex");

    if localhost.is_match(raw) {
        return checked(with_scheme(raw, "http"));
    }

    if let Some(caps) = ip_address.captures(raw) {
        let host = &caps[2];
        if !is_private_ip(host) {
            return Err(LightboxError::Config {
                message: format!(
                    "Only private IP ranges allowed. Public IPs will trigger an SSL \
                     certificate error. Got => {raw:?}"
                ),
            });
        }
        return checked(with_scheme(raw, "http"));
    }

    if hostname.is_match(raw) {
        return checked(with_scheme(raw, "https"));
    }

    Err(LightboxError::Config {
        message: format!(
            "Invalid url! Expected http(s)://<subdomain>.lightboxdam.com\nInstead got => {raw:?}"
        ),
    })
}

/// Final sanity parse of the normalized form.
fn checked(candidate: String) -> Result<String> {
    url::Url::parse(&candidate).map_err(|e| LightboxError::Config {
        message: format!("Invalid url {candidate:?}: {e}"),
    })?;
    Ok(candidate)
}

fn with_scheme(raw: &str, default_scheme: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else {
        format!("{default_scheme}://{raw}")
    }
}

fn is_private_ip(host: &str) -> bool {
    match host.parse::<std::net::Ipv4Addr>() {
        Ok(ip) => ip.is_private() || ip.is_loopback(),
        Err(_) => false,
    }
}
