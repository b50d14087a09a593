//! HTTP response classification.
//!
//! Maps a completed HTTP exchange onto the domain's response taxonomy.
//! Classification is pure and never fails: every response comes back out,
//! possibly with a rewritten body, and the caller decides what is fatal.

use crate::config::AppConfig;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Snapshot of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Method of the originating request.
    pub method: Method,
    pub status: u16,
    /// Canonical reason phrase for the status, e.g. `"Bad Gateway"`.
    pub reason: String,
    /// `Location` header, when the server sent one.
    pub location: Option<String>,
    pub body: String,
}

/// Classified outcome of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// 3xx; the redirect target is logged, the response passes through.
    RedirectWarning,
    /// 401; logged, fatality left to the caller.
    AuthFailure,
    /// 500/502/503 with a rewritten structured body.
    ServerError,
    /// Any other non-success status; body rewritten with brackets stripped.
    GenericError,
    /// Vendor error page on a mutating request; usually an unsupported
    /// file type.
    HeuristicError,
    /// Vendor error page on a 403 GET: the cached asset size is stale.
    HeuristicWarning,
}

/// A classified response: the outcome plus the (possibly rewritten) exchange.
#[derive(Debug, Clone)]
pub struct Classified {
    pub outcome: Outcome,
    pub response: RawResponse,
}

impl Classified {
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Parse the structured error body, when the classifier wrote one.
    pub fn error_body(&self) -> Option<ErrorBody> {
        serde_json::from_str(&self.response.body).ok()
    }
}

/// Body shape the classifier writes for error responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_message: String,
    pub http_status_code: String,
}

impl ErrorBody {
    fn render(message: String, status: u16) -> String {
        let body = ErrorBody {
            error_message: message,
            http_status_code: status.to_string(),
        };
        // Serializing two strings cannot fail.
        serde_json::to_string(&body).unwrap_or_default()
    }
}

/// Canonical error record surfaced to callers.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub id: String,
    pub resource_name: String,
    pub resource_type: String,
    pub status_code: String,
    pub message: String,
}

impl Default for ErrorReport {
    fn default() -> Self {
        Self {
            id: "Not set".into(),
            resource_name: "Not set".into(),
            resource_type: "Not set".into(),
            status_code: "Not set".into(),
            message: "Not set".into(),
        }
    }
}

impl ErrorReport {
    /// Build a report for a classified failure against a named resource.
    pub fn for_resource(
        resource_name: &str,
        resource_type: &str,
        id: u64,
        classified: &Classified,
    ) -> Self {
        let message = classified
            .error_body()
            .map(|b| b.error_message)
            .unwrap_or_else(|| classified.response.reason.clone());
        Self {
            id: id.to_string(),
            resource_name: resource_name.to_string(),
            resource_type: resource_type.to_string(),
            status_code: classified.response.status.to_string(),
            message,
        }
    }
}

/// Classify a response, rewriting its body where the taxonomy calls for it.
pub fn classify(mut response: RawResponse) -> Classified {
    let status = response.status;

    let outcome = match status {
        200..=299 => {
            info!("Success: HTTP => {} {}", status, response.reason);
            Outcome::Success
        }
        300..=399 => {
            warn!(
                "Unexpected Redirect to {}",
                response.location.as_deref().unwrap_or("<no location>")
            );
            Outcome::RedirectWarning
        }
        401 => {
            error!("Error: {}: Invalid Credentials.", response.reason);
            Outcome::AuthFailure
        }
        500 => {
            response.body = ErrorBody::render(
                format!(
                    "{}: Web Server Error - No idea what happened here.",
                    response.reason
                ),
                status,
            );
            log_server_error(&response);
            Outcome::ServerError
        }
        502 => {
            response.body = ErrorBody::render(
                format!(
                    "{}: The server received an invalid response from the upstream server",
                    response.reason
                ),
                status,
            );
            log_server_error(&response);
            Outcome::ServerError
        }
        503 => {
            response.body = ErrorBody::render(
                format!(
                    "{}: The server is currently unavailable (because it is overloaded \
                     or down for maintenance)",
                    response.reason
                ),
                status,
            );
            log_server_error(&response);
            Outcome::ServerError
        }
        _ => classify_remaining(&mut response),
    };

    Classified { outcome, response }
}

/// Everything that is neither success, redirect, 401, nor 500/502/503:
/// vendor error-page heuristics first, then the generic rewrite.
fn classify_remaining(response: &mut RawResponse) -> Outcome {
    let has_marker = response.body.contains(AppConfig::ERROR_PAGE_MARKER);

    if has_marker && response.method != Method::GET {
        response.body = ErrorBody::render(
            "Possibly unsupported file type: NGINX Error - Lightbox - Something went wrong!"
                .to_string(),
            response.status,
        );
        error!(
            "HTTP {} on {}: vendor error page returned for a mutating request",
            response.status, response.method
        );
        return Outcome::HeuristicError;
    }

    if has_marker && response.status == 403 && response.method == Method::GET {
        error!(
            "Don't let the error fool you. The image size specified is no longer \
             available in storage."
        );
        return Outcome::HeuristicWarning;
    }

    response.body = ErrorBody::render(
        response.reason.replace(['<', '>'], ""),
        response.status,
    );
    error!("Code: {}", response.status);
    error!("Message: {}", response.reason);
    Outcome::GenericError
}

fn log_server_error(response: &RawResponse) {
    error!("Code: {}", response.status);
    error!("Message: {}", response.reason);
}
