//! Gateprobe Core - Shared wire types.
//!
//! This crate provides the JSON wire types shared by the Gateprobe crates:
//! - `harness` - Contract checks, flows, and the load generator
//! - `cli` - The `gateprobe` command-line tool
//! - `integration-tests` - Contract tests against a mock gateway
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Every type
//! mirrors a resource representation owned by the remote services; nothing
//! here is persisted locally.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, entity DTOs, and response envelopes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
