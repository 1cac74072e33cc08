//! # Moderation Endpoints
//!
//! Admin-only; the backend answers 403 for any other session.

use shared::{AdminStats, Item, ItemId, ItemsPayload, RejectRequest, Reply, StatsPayload};

use super::client::ApiClient;
use crate::core::service::ApiResult;

pub async fn get_pending_items(client: &ApiClient) -> ApiResult<Vec<Item>> {
    client
        .send::<ItemsPayload>(
            client.client.get(client.url("/admin/items/pending")),
            "get_pending_items",
        )
        .await
        .map(|reply| reply.data.items)
}

pub async fn get_stats(client: &ApiClient) -> ApiResult<AdminStats> {
    client
        .send::<StatsPayload>(client.client.get(client.url("/admin/stats")), "get_admin_stats")
        .await
        .map(|reply| reply.data.stats)
}

#[tracing::instrument(skip(client))]
pub async fn approve_item(client: &ApiClient, id: ItemId) -> ApiResult<Reply<()>> {
    client
        .send_ack(
            client.client.post(client.url(&format!("/admin/items/{id}/approve"))),
            "approve_item",
        )
        .await
}

#[tracing::instrument(skip(client))]
pub async fn reject_item(client: &ApiClient, id: ItemId, reason: &str) -> ApiResult<Reply<()>> {
    let body = RejectRequest {
        reason: reason.to_string(),
    };
    client
        .send_ack(
            client
                .client
                .post(client.url(&format!("/admin/items/{id}/reject")))
                .json(&body),
            "reject_item",
        )
        .await
}
