//! # API Client
//!
//! Main HTTP client for backend API communication.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::{
    AdminStats, Category, CreateSwapRequest, CreatedItem, Envelope, Item, ItemId, ItemQuery,
    ItemsPayload, ProfileUpdate, RedeemPayload, Reply, SendMessageRequest, SwapInboxPayload,
    SwapRequest, SwapRequestId, User,
};

use super::items::ItemSubmission;
use crate::config::ClientConfig;
use crate::core::error::{ApiError, AppError};
use crate::core::service::{ApiResult, MarketplaceApi};

/// HTTP client for communicating with the backend API server.
///
/// Authentication rides on the backend's session cookie, so the underlying
/// client keeps a cookie store and must be shared (not rebuilt) for the
/// lifetime of a session. Every request carries the configured timeout.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

/// Payload marker for endpoints that only return the envelope.
#[derive(Debug, Deserialize)]
struct NoPayload {}

impl ApiClient {
    /// Create a new API client for the configured backend.
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL of an API path such as `/items/7`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode `T` from the top-level payload fields.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> ApiResult<Reply<T>> {
        let start = std::time::Instant::now();

        let response = request.send().await.map_err(|e| {
            tracing::error!(operation, error = %e, timeout = e.is_timeout(), "Network error");
            ApiError::Network { message: e.to_string() }
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Failed to read response body");
            ApiError::Network { message: e.to_string() }
        })?;
        let duration = start.elapsed();

        let result = decode_body::<T>(status.as_u16(), status.is_success(), &bytes);
        match &result {
            Ok(_) => tracing::debug!(
                operation,
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                "Request succeeded"
            ),
            Err(err) => tracing::warn!(
                operation,
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                error = %err,
                "Request failed"
            ),
        }
        result
    }

    /// Send a request whose only interesting content is the server message.
    pub(crate) async fn send_ack(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> ApiResult<Reply<()>> {
        self.send::<NoPayload>(request, operation)
            .await
            .map(|reply| reply.map(|_| ()))
    }
}

/// Fold both backend failure channels into [`ApiError`].
///
/// - non-2xx → [`ApiError::Http`] with the parsed body (or `Null`)
/// - 2xx with `success: false` → [`ApiError::Rejected`]
/// - 2xx with an undecodable body → [`ApiError::Decode`]
pub(crate) fn decode_body<T: DeserializeOwned>(
    status: u16,
    is_success: bool,
    bytes: &[u8],
) -> ApiResult<Reply<T>> {
    let parsed = serde_json::from_slice::<serde_json::Value>(bytes);

    if !is_success {
        let body = parsed.unwrap_or(serde_json::Value::Null);
        let message = envelope_of(&body).text().map(str::to_string);
        return Err(ApiError::Http { status, message, body });
    }

    let body = parsed.map_err(|e| ApiError::Decode {
        status,
        message: e.to_string(),
    })?;

    let envelope = envelope_of(&body);
    if !envelope.success {
        return Err(ApiError::Rejected {
            status,
            message: envelope.text().map(str::to_string),
        });
    }

    let data = serde_json::from_value::<T>(body).map_err(|e| ApiError::Decode {
        status,
        message: e.to_string(),
    })?;

    Ok(Reply::new(envelope.text().map(str::to_string), data))
}

fn envelope_of(body: &serde_json::Value) -> Envelope {
    Envelope::deserialize(body).unwrap_or_default()
}

// Implement MarketplaceApi for ApiClient
#[async_trait::async_trait]
impl MarketplaceApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> ApiResult<Reply<User>> {
        super::auth::login(self, email, password).await
    }

    async fn register(&self, email: &str, password: &str, name: &str) -> ApiResult<Reply<User>> {
        super::auth::register(self, email, password, name).await
    }

    async fn logout(&self) -> ApiResult<Reply<()>> {
        super::auth::logout(self).await
    }

    async fn current_user(&self) -> ApiResult<User> {
        super::auth::current_user(self).await
    }

    async fn get_profile(&self) -> ApiResult<User> {
        super::user::get_profile(self).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<Reply<User>> {
        super::user::update_profile(self, update).await
    }

    async fn get_user_items(&self) -> ApiResult<Vec<Item>> {
        super::user::get_user_items(self).await
    }

    async fn get_items(&self, query: &ItemQuery) -> ApiResult<ItemsPayload> {
        super::items::get_items(self, query).await
    }

    async fn get_item(&self, id: ItemId) -> ApiResult<Item> {
        super::items::get_item(self, id).await
    }

    async fn create_item(&self, submission: ItemSubmission) -> ApiResult<Reply<CreatedItem>> {
        super::items::create_item(self, submission).await
    }

    async fn redeem_item(&self, id: ItemId) -> ApiResult<Reply<RedeemPayload>> {
        super::swaps::redeem_item(self, id).await
    }

    async fn get_categories(&self) -> ApiResult<Vec<Category>> {
        super::items::get_categories(self).await
    }

    async fn get_pending_items(&self) -> ApiResult<Vec<Item>> {
        super::admin::get_pending_items(self).await
    }

    async fn get_admin_stats(&self) -> ApiResult<AdminStats> {
        super::admin::get_stats(self).await
    }

    async fn approve_item(&self, id: ItemId) -> ApiResult<Reply<()>> {
        super::admin::approve_item(self, id).await
    }

    async fn reject_item(&self, id: ItemId, reason: &str) -> ApiResult<Reply<()>> {
        super::admin::reject_item(self, id, reason).await
    }

    async fn create_swap_request(
        &self,
        request: &CreateSwapRequest,
    ) -> ApiResult<Reply<Option<SwapRequest>>> {
        super::swaps::create_swap_request(self, request).await
    }

    async fn list_swap_requests(&self) -> ApiResult<SwapInboxPayload> {
        super::swaps::list_swap_requests(self).await
    }

    async fn accept_swap_request(
        &self,
        id: SwapRequestId,
    ) -> ApiResult<Reply<Option<SwapRequest>>> {
        super::swaps::respond_to_swap_request(self, id, true).await
    }

    async fn reject_swap_request(
        &self,
        id: SwapRequestId,
    ) -> ApiResult<Reply<Option<SwapRequest>>> {
        super::swaps::respond_to_swap_request(self, id, false).await
    }

    async fn send_message(&self, message: &SendMessageRequest) -> ApiResult<Reply<()>> {
        super::messages::send_message(self, message).await
    }
}
