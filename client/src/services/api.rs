//! # Backend API Client
//!
//! `reqwest` implementation of [`MarketplaceApi`](crate::core::MarketplaceApi),
//! split by resource.
//!
//! ```text
//! api/
//! ├── client.rs    - ApiClient, envelope decoding, trait impl
//! ├── auth.rs      - /auth/login, /auth/register, /auth/logout, /auth/me
//! ├── user.rs      - /user/profile, /items/user
//! ├── items.rs     - /items, /items/:id, /categories, multipart submission
//! ├── swaps.rs     - /items/:id/redeem, /swap-requests
//! ├── admin.rs     - /admin/items/pending, /admin/stats, approve/reject
//! └── messages.rs  - /messages
//! ```

pub mod admin;
pub mod auth;
pub mod client;
pub mod items;
pub mod messages;
pub mod swaps;
pub mod user;

pub use client::ApiClient;
pub use items::{guess_content_type, ItemSubmission, UploadFile};
