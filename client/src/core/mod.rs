//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and better testability.
//!
//! ## Modules
//!
//! - **[`error`]**: Error types (`ApiError`, `AppError`, `Result<T>`)
//! - **[`service`]**: The [`MarketplaceApi`] trait every view controller talks to
//!
//! ## Dependency Injection
//!
//! View controllers hold an `Arc<dyn MarketplaceApi>`:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rewear_client::config::ClientConfig;
//! use rewear_client::core::MarketplaceApi;
//! use rewear_client::services::api::ApiClient;
//!
//! # fn main() -> rewear_client::Result<()> {
//! // In production: the reqwest-backed client
//! let api: Arc<dyn MarketplaceApi> = Arc::new(ApiClient::new(&ClientConfig::default())?);
//! # Ok(())
//! # }
//! ```
//!
//! Unit tests inject a scripted mock instead.

pub mod error;
#[cfg(test)]
pub(crate) mod mock;
pub mod service;

pub use error::{ApiError, AppError, Result};
pub use service::{ApiResult, MarketplaceApi};
