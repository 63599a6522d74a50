//! Integration tests for Gateprobe.
//!
//! # Running Tests
//!
//! ```bash
//! # Against the built-in mock gateway (default)
//! cargo test -p gateprobe-integration-tests
//!
//! # Against a live deployment
//! API_GATEWAY_URL=http://my-gateway:8080 \
//!     cargo test -p gateprobe-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_gateway` - Gateway health and routing
//! - `user_service` / `product_service` / `favourite_service` - Per-service
//!   contract checks
//! - `user_flow` - End-to-end journeys
//! - `load_smoke` - Short deterministic load runs
//!
//! Most tests run against [`MockGateway`], a wiremock server posing as the
//! deployed gateway, so the suite passes with no external system. Tests
//! marked `#[ignore]` exercise a real deployment via `API_GATEWAY_URL`.

use std::time::Duration;

use gateprobe_harness::{GatewayClient, HarnessConfig};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// A wiremock server posing as the API gateway, plus a harness configuration
/// pointing at it.
///
/// Timeouts are short: requests answer locally, and consistency polling in
/// flow tests should converge (or fail) quickly.
pub struct MockGateway {
    server: MockServer,
    pub config: HarnessConfig,
}

impl MockGateway {
    /// Start a fresh mock gateway.
    ///
    /// # Panics
    ///
    /// Panics if the mock server's URI is rejected by the config validation,
    /// which would be a bug in the harness.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let config = HarnessConfig::new(
            server.uri(),
            Duration::from_secs(5),
            Duration::from_secs(2),
        )
        .expect("mock server URI is a valid gateway URL");
        Self { server, config }
    }

    /// A harness client targeting the mock.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn client(&self) -> GatewayClient {
        GatewayClient::new(&self.config).expect("HTTP client builds")
    }

    /// The underlying mock server, for custom mounts and request inspection.
    #[must_use]
    pub const fn server(&self) -> &MockServer {
        &self.server
    }

    /// Mount a health endpoint reporting the given status value.
    pub async fn mount_health(&self, endpoint: &str, status: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": status})),
            )
            .mount(&self.server)
            .await;
    }

    /// Mount the gateway and all three service health endpoints as `UP`.
    pub async fn mount_all_healthy(&self) {
        self.mount_health("/actuator/health", "UP").await;
        self.mount_health("/user-service/actuator/health", "UP").await;
        self.mount_health("/product-service/actuator/health", "UP").await;
        self.mount_health("/favourite-service/actuator/health", "UP").await;
    }

    /// Mount a list endpoint answering with a `collection` envelope.
    pub async fn mount_collection(&self, endpoint: &str, items: Value) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"collection": items})),
            )
            .mount(&self.server)
            .await;
    }

    /// Mount a GET endpoint answering with a fixed JSON body.
    pub async fn mount_get_json(&self, endpoint: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a create endpoint that echoes the submitted body back, the way
    /// the real services answer their POSTs.
    pub async fn mount_create_echo(&self, endpoint: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(EchoBody::new(status))
            .mount(&self.server)
            .await;
    }
}

/// Responder that echoes the request body back as JSON.
pub struct EchoBody {
    status: u16,
}

impl EchoBody {
    #[must_use]
    pub const fn new(status: u16) -> Self {
        Self { status }
    }
}

impl Respond for EchoBody {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        ResponseTemplate::new(self.status).set_body_raw(request.body.clone(), "application/json")
    }
}

/// Configuration for the live deployment named by `API_GATEWAY_URL`; used by
/// the `#[ignore]`d tests only.
///
/// # Panics
///
/// Panics when the environment carries an invalid configuration.
#[must_use]
pub fn live_config() -> HarnessConfig {
    HarnessConfig::from_env().expect("valid live configuration")
}
