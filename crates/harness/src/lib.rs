//! Gateprobe Harness - Black-box acceptance testing for the e-commerce gateway.
//!
//! The system under test is an externally deployed set of microservices
//! (user, product, favourite) behind an API gateway. Everything in this crate
//! talks to it over HTTP and asserts on status codes and JSON payload shapes;
//! no business logic lives here.
//!
//! # Layers
//!
//! - [`config`] - Immutable [`HarnessConfig`] built once from the environment
//! - [`client`] - [`GatewayClient`], one typed method per remote endpoint
//! - [`checks`] - Single request/response contract checks
//! - [`flows`] - Multi-step user journeys threading identifiers forward
//! - [`load`] - Concurrent virtual users with weighted action sampling
//!
//! # Example
//!
//! ```rust,no_run
//! use gateprobe_harness::{GatewayClient, HarnessConfig, checks};
//!
//! # async fn demo() -> Result<(), gateprobe_harness::HarnessError> {
//! let config = HarnessConfig::from_env()?;
//! let client = GatewayClient::new(&config)?;
//! checks::gateway::health(&client).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checks;
pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod flows;
pub mod load;
pub mod poll;

pub use client::{GatewayClient, Service};
pub use config::{ConfigError, HarnessConfig};
pub use error::HarnessError;
