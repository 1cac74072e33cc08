//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! the client and backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Users, roles, login, registration and profile updates
//! - [`items`] - Listings, list queries, categories and creation payloads
//! - [`swaps`] - Swap requests and point redemption
//! - [`admin`] - Moderation statistics and rejection requests
//! - [`messaging`] - Direct messages
//! - [`envelope`] - The response envelope shared by every endpoint
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Enums**: Serialize to lowercase strings using `#[serde(rename_all = "lowercase")]`
//! - **Timestamps**: Naive ISO-8601 (`2024-03-01T10:15:00.123456`), the backend stores UTC
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/auth/login
//! Content-Type: application/json
//!
//! { "email": "ana@example.com", "password": "secret1" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "success": true,
//!   "message": "Welcome back, Ana!",
//!   "user": { "id": 7, "email": "ana@example.com", "name": "Ana", "points": 50, "role": "user" }
//! }
//! ```

pub mod admin;
pub mod auth;
pub mod envelope;
pub mod items;
pub mod messaging;
pub mod swaps;

pub use admin::*;
pub use auth::*;
pub use envelope::*;
pub use items::*;
pub use messaging::*;
pub use swaps::*;
