//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.

use async_trait::async_trait;
use shared::{
    AdminStats, Category, CreateSwapRequest, CreatedItem, Item, ItemId, ItemQuery, ItemsPayload,
    ProfileUpdate, RedeemPayload, Reply, SendMessageRequest, SwapInboxPayload, SwapRequest,
    SwapRequestId, User,
};

use super::error::ApiError;
use crate::services::api::ItemSubmission;

/// Result of a single backend call.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// One method per backend operation.
///
/// Every method resolves to `Err` for both failure channels of the backend
/// (non-2xx status and `success: false`), so implementations and callers
/// share a single error contract. Methods whose server message is shown to
/// the user return it inside a [`Reply`].
///
/// Implemented by [`crate::services::api::ApiClient`]; tests use a scripted mock.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, email: &str, password: &str) -> ApiResult<Reply<User>>;

    /// `POST /auth/register`, which also opens a session.
    async fn register(&self, email: &str, password: &str, name: &str) -> ApiResult<Reply<User>>;

    /// `POST /auth/logout`
    async fn logout(&self) -> ApiResult<Reply<()>>;

    /// `GET /auth/me`
    async fn current_user(&self) -> ApiResult<User>;

    /// `GET /user/profile`, the user with listing statistics.
    async fn get_profile(&self) -> ApiResult<User>;

    /// `PUT /user/profile`
    async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<Reply<User>>;

    /// `GET /items/user`, newest first.
    async fn get_user_items(&self) -> ApiResult<Vec<Item>>;

    /// `GET /items` with filters.
    async fn get_items(&self, query: &ItemQuery) -> ApiResult<ItemsPayload>;

    /// `GET /items/:id`
    async fn get_item(&self, id: ItemId) -> ApiResult<Item>;

    /// `POST /items` as multipart.
    async fn create_item(&self, submission: ItemSubmission) -> ApiResult<Reply<CreatedItem>>;

    /// `POST /items/:id/redeem`
    async fn redeem_item(&self, id: ItemId) -> ApiResult<Reply<RedeemPayload>>;

    /// `GET /categories`
    async fn get_categories(&self) -> ApiResult<Vec<Category>>;

    /// `GET /admin/items/pending`
    async fn get_pending_items(&self) -> ApiResult<Vec<Item>>;

    /// `GET /admin/stats`
    async fn get_admin_stats(&self) -> ApiResult<AdminStats>;

    /// `POST /admin/items/:id/approve`
    async fn approve_item(&self, id: ItemId) -> ApiResult<Reply<()>>;

    /// `POST /admin/items/:id/reject`
    async fn reject_item(&self, id: ItemId, reason: &str) -> ApiResult<Reply<()>>;

    /// `POST /swap-requests`
    async fn create_swap_request(
        &self,
        request: &CreateSwapRequest,
    ) -> ApiResult<Reply<Option<SwapRequest>>>;

    /// `GET /swap-requests`
    async fn list_swap_requests(&self) -> ApiResult<SwapInboxPayload>;

    /// `POST /swap-requests/:id/accept`
    async fn accept_swap_request(&self, id: SwapRequestId) -> ApiResult<Reply<Option<SwapRequest>>>;

    /// `POST /swap-requests/:id/reject`
    async fn reject_swap_request(&self, id: SwapRequestId) -> ApiResult<Reply<Option<SwapRequest>>>;

    /// `POST /messages`
    async fn send_message(&self, message: &SendMessageRequest) -> ApiResult<Reply<()>>;
}
