//! Unified error handling for the harness.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors produced by harness checks, flows, and the load generator.
///
/// The `context` carried by the request-level variants is the stable label of
/// the operation (e.g. `POST /user-service/api/users`), so a failure message
/// identifies the endpoint without leaking templated path parameters.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The shared HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport-level failure (connection refused, timeout, DNS).
    ///
    /// Never retried; the remote system being unreachable is itself a
    /// finding.
    #[error("{context}: request failed: {source}")]
    Http {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response status was not in the expected set.
    #[error("{context}: got {status}, expected one of {expected:?}")]
    UnexpectedStatus {
        context: String,
        status: StatusCode,
        expected: &'static [StatusCode],
    },

    /// The response body did not match the expected JSON shape.
    #[error("{context}: could not decode response body: {message}")]
    Decode { context: String, message: String },

    /// A submitted field was not echoed back by the service.
    #[error("{context}: expected {field} {expected}, got {actual}")]
    FieldMismatch {
        context: String,
        field: &'static str,
        expected: String,
        actual: String,
    },

    /// A list endpoint returned an empty collection where the scenario
    /// requires seeded data.
    #[error("{context}: collection is empty")]
    EmptyCollection { context: String },

    /// A health endpoint answered but did not report `UP`.
    #[error("{component} reports status {status:?}, expected \"UP\"")]
    NotHealthy { component: String, status: String },

    /// A read did not converge on the expected state within the bounded
    /// consistency window.
    #[error("timed out after {waited:?} waiting for {what}")]
    ConsistencyTimeout { what: String, waited: Duration },
}

impl HarnessError {
    /// Whether this failure is a missed contract assertion (as opposed to a
    /// transport or configuration problem).
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedStatus { .. }
                | Self::Decode { .. }
                | Self::FieldMismatch { .. }
                | Self::EmptyCollection { .. }
                | Self::NotHealthy { .. }
                | Self::ConsistencyTimeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_message_names_endpoint() {
        let err = HarnessError::UnexpectedStatus {
            context: "GET /actuator/health".to_string(),
            status: StatusCode::SERVICE_UNAVAILABLE,
            expected: &[StatusCode::OK],
        };
        let message = err.to_string();
        assert!(message.contains("GET /actuator/health"));
        assert!(message.contains("503"));
    }

    #[test]
    fn test_assertion_classification() {
        let assertion = HarnessError::EmptyCollection {
            context: "GET /product-service/api/products".to_string(),
        };
        assert!(assertion.is_assertion());

        let config = HarnessError::Config(ConfigError::InvalidEnvVar(
            "API_GATEWAY_URL".to_string(),
            "not a URL".to_string(),
        ));
        assert!(!config.is_assertion());
    }
}
