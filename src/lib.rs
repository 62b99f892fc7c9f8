//! # FCM Relay Library
//!
//! Relays notification requests to Firebase Cloud Messaging, authenticating
//! with a service account whose bearer token is cached in a local file.
//!
//! Modules:
//! - `config` — YAML settings, provider endpoints and the service account credential
//! - `cache` — file-backed token cache
//! - `sources` — service account token issuance
//! - `notify` — request validation, payload mapping and forwarding
//! - `server` — the axum endpoint and error to response mapping

pub mod cache;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod notify;
pub mod observability;
pub mod server;
pub mod sources;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use crate::config::service::ServiceConfig;
pub use crate::errors::RelayError;
