//! The framework's typed error taxonomy.
//!
//! Internal wiring (scanning, container construction, route compilation) uses
//! `anyhow::Result` freely. `WeaveError` is reserved for the failures that cross a
//! boundary the caller is expected to match on: a route miss, a provider lookup
//! failure, a cycle, a hook failure, or an exception a handler deliberately raised.

use serde_json::Value;
use thiserror::Error;

/// Errors raised by the router, container, compiler, hook dispatcher, and
/// request executor.
#[derive(Debug, Error)]
pub enum WeaveError {
    #[error("no route matches {method} {path}")]
    NoMatchingRoute { method: String, path: String },

    /// A handler (or a pipe/guard) deliberately short-circuited the request with
    /// a status code and a JSON payload. The executor serializes this as
    /// `{ message, statusCode }` merged with any additional payload fields.
    #[error("http exception {status}: {payload}")]
    HttpException { status: u16, payload: Value },

    #[error("no provider registered for token `{0}`")]
    ProviderNotFound(String),

    #[error("circular dependency: {0} -> {1}")]
    CircularDependency(String, String),

    #[error("ambiguous provider for token `{0}`: {1} candidates")]
    AmbiguousProvider(String, usize),

    #[error("the same route already registered: {method} {path}")]
    DuplicateRoute { method: String, path: String },

    #[error("conflicting parameter name on shared route edge: `{existing}` vs `{new}`")]
    ParamNameConflict { existing: String, new: String },

    #[error("hook `{hook}` on {target} failed: {source}")]
    HookFailure {
        hook: &'static str,
        target: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Unclassified(#[from] anyhow::Error),
}

impl WeaveError {
    /// Builds a `400` validation-failure exception with `{ message, statusCode, issues }`.
    pub fn validation_failed(issues: Value) -> Self {
        WeaveError::HttpException {
            status: 400,
            payload: serde_json::json!({ "issues": issues }),
        }
    }

    /// The status code this error should be reported with, per the response-shaping
    /// table: `HttpException` carries its own; a missing route is `404`; everything
    /// else is an unclassified internal error and maps to `500`.
    pub fn status_code(&self) -> u16 {
        match self {
            WeaveError::HttpException { status, .. } => *status,
            WeaveError::NoMatchingRoute { .. } => 404,
            _ => 500,
        }
    }

    /// The `{ message, statusCode }` JSON envelope the executor writes to the wire.
    pub fn to_envelope(&self) -> Value {
        let status = self.status_code();
        match self {
            WeaveError::HttpException { payload, .. } => {
                let mut envelope = serde_json::json!({
                    "message": self.to_string(),
                    "statusCode": status,
                });
                if let (Some(envelope_obj), Some(payload_obj)) =
                    (envelope.as_object_mut(), payload.as_object())
                {
                    for (k, v) in payload_obj {
                        envelope_obj.insert(k.clone(), v.clone());
                    }
                }
                envelope
            }
            _ => serde_json::json!({
                "message": self.to_string(),
                "statusCode": status,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_matching_route_maps_to_404() {
        let err = WeaveError::NoMatchingRoute {
            method: "GET".to_string(),
            path: "/missing".to_string(),
        };
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn http_exception_keeps_its_own_status() {
        let err = WeaveError::HttpException {
            status: 418,
            payload: serde_json::json!({}),
        };
        assert_eq!(err.status_code(), 418);
    }

    #[test]
    fn unclassified_errors_map_to_500() {
        let err = WeaveError::Unclassified(anyhow::anyhow!("boom"));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn envelope_merges_extra_payload_fields() {
        let err = WeaveError::validation_failed(serde_json::json!(["field is required"]));
        let envelope = err.to_envelope();
        assert_eq!(envelope["statusCode"], 400);
        assert!(envelope["issues"].is_array());
    }
}
