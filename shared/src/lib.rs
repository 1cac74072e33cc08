//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the ReWear client and the REST backend.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Users, roles, login/registration and profile bodies
//!   - **[`dto::items`]**: Item listings, listing queries and item payloads
//!   - **[`dto::swaps`]**: Swap requests and redemption
//!   - **[`dto::admin`]**: Moderation statistics and rejection bodies
//!   - **[`dto::messaging`]**: Direct messages between users
//!   - **[`dto::envelope`]**: The `{success, message, ...}` response envelope
//! - **[`catalog`]**: Categories, conditions, sizes and the point estimate
//! - **[`utils`]**: Upload URL construction
//!
//! ## Wire Format
//!
//! Every endpoint answers with a JSON object carrying `success` and an optional
//! `message`; the payload fields sit next to them at the top level:
//!
//! ```text
//! {
//!   "success": true,
//!   "message": "Welcome back, Ana!",
//!   "user": { "id": 7, "email": "ana@example.com", "name": "Ana", "points": 50, "role": "user" }
//! }
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::items::{ItemQuery, ListingType};
//!
//! let query = ItemQuery::new()
//!     .category("All")
//!     .size("M")
//!     .listing_type(ListingType::Donation);
//! assert_eq!(query.to_query_string(), "size=M&listing_type=donation");
//! ```

pub mod catalog;
pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use utils::*;
