//! # ReWear Client - Library Root
//!
//! Client for the ReWear clothing exchange: members list garments, browse and
//! filter listings, request swaps or redeem items with points, and admins
//! moderate submissions. The backend REST API owns storage, uploads and the
//! point ledger; this crate assembles requests and mirrors the responses.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              rewear-client (this crate)                │
//! ├────────────────────────────────────────────────────────┤
//! │  app        - Headless view controllers + session      │
//! │  services   - reqwest client for the REST API          │
//! │  core       - MarketplaceApi trait, error types        │
//! │  config     - Environment configuration                │
//! │  debug      - tracing setup                            │
//! └────────────────────────────────────────────────────────┘
//!          │
//!          │ HTTP/JSON, session cookie
//!          ▼
//! ┌─────────────────┐
//! │  ReWear Backend │
//! └─────────────────┘
//! ```
//!
//! ### Module Dependency Graph
//!
//! ```text
//! main.rs (rewear CLI)
//!   │
//!   └── app (session, featured, browse, item_detail, admin, add_item, dashboard,
//!        swap_inbox)
//!       └── core::MarketplaceApi
//!           └── services::api::ApiClient (reqwest)
//! ```
//!
//! ## Core Concepts
//!
//! ### One error contract
//!
//! The backend signals failure either with a non-2xx status or with
//! `success: false` in a 2xx body. [`services::api::ApiClient`] folds both into
//! [`core::ApiError`], so every caller handles a single `Err` path.
//!
//! ### One owner of the user
//!
//! [`app::Session`] is the only place the signed-in user lives; screens hold an
//! `Arc<Session>` and change the user only through its methods.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rewear_client::app::{AppContext, BrowseVariant};
//! use rewear_client::config::ClientConfig;
//!
//! # async fn run() -> rewear_client::Result<()> {
//! let (ctx, toasts) = AppContext::connect(ClientConfig::load()?)?;
//! ctx.session.initialize().await;
//!
//! let browse = ctx.browse(BrowseVariant::Single);
//! browse.set_category("Outerwear").await;
//! for item in browse.visible_items() {
//!     println!("{} - {} points", item.title, item.points);
//! }
//! # drop(toasts);
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use app::{AppContext, Route, Session, Toast};
pub use config::ClientConfig;
pub use core::{ApiError, AppError, MarketplaceApi, Result};
