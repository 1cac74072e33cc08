//! # Services Module
//!
//! External service integrations for the ReWear client.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │          View controllers (app::*)           │
//! │                     │                        │
//! │           Arc<dyn MarketplaceApi>            │
//! │                     │                        │
//! │        ApiClient (services::api)             │
//! └─────────────────────┼────────────────────────┘
//!                       │ HTTP/JSON + session cookie
//!                       ▼
//! ┌──────────────────────────────────────────────┐
//! │  Backend REST API                            │
//! │  /auth/*  /user/*  /items/*  /categories     │
//! │  /admin/*  /swap-requests/*  /messages       │
//! └──────────────────────────────────────────────┘
//! ```

pub mod api;
