//! # Logging Infrastructure
//!
//! File-based structured logging for the ReWear client.
//!
//! ## Features
//!
//! - **File-based logging**: `logs/rewear-client.log` with daily rotation
//! - **Panic capture**: panics are recorded through `tracing` before the default hook
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rewear_client::debug::{self, LogConfig};
//!
//! // Keep the guard alive until exit so buffered lines are flushed
//! let _guard = debug::init(&LogConfig::from_env());
//!
//! tracing::info!(endpoint = "/items", duration_ms = 42, "API call completed");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default `rewear_client=info,warn`)
//! - `REWEAR_LOG_DIR`: Log directory (default `logs`)
//! - `REWEAR_LOG_STDERR`: Mirror logs to stderr (1=on)

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init;
