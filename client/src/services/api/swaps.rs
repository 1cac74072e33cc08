//! # Swap Request and Redemption Endpoints

use shared::{
    CreateSwapRequest, ItemId, RedeemPayload, Reply, SwapInboxPayload, SwapRequest,
    SwapRequestId, SwapRequestPayload,
};

use super::client::ApiClient;
use crate::core::service::ApiResult;

/// Redeem an item for its point value. The server debits the balance and
/// answers with the new one.
#[tracing::instrument(skip(client))]
pub async fn redeem_item(client: &ApiClient, id: ItemId) -> ApiResult<Reply<RedeemPayload>> {
    client
        .send::<RedeemPayload>(
            client.client.post(client.url(&format!("/items/{id}/redeem"))),
            "redeem_item",
        )
        .await
}

#[tracing::instrument(skip(client, request), fields(item_id = request.item_id))]
pub async fn create_swap_request(
    client: &ApiClient,
    request: &CreateSwapRequest,
) -> ApiResult<Reply<Option<SwapRequest>>> {
    client
        .send::<SwapRequestPayload>(
            client.client.post(client.url("/swap-requests")).json(request),
            "create_swap_request",
        )
        .await
        .map(|reply| reply.map(|payload| payload.swap_request))
}

pub async fn list_swap_requests(client: &ApiClient) -> ApiResult<SwapInboxPayload> {
    client
        .send::<SwapInboxPayload>(
            client.client.get(client.url("/swap-requests")),
            "list_swap_requests",
        )
        .await
        .map(|reply| reply.data)
}

/// Accept or reject a request addressed to the session user.
#[tracing::instrument(skip(client))]
pub async fn respond_to_swap_request(
    client: &ApiClient,
    id: SwapRequestId,
    accept: bool,
) -> ApiResult<Reply<Option<SwapRequest>>> {
    let action = if accept { "accept" } else { "reject" };
    client
        .send::<SwapRequestPayload>(
            client
                .client
                .post(client.url(&format!("/swap-requests/{id}/{action}"))),
            "respond_to_swap_request",
        )
        .await
        .map(|reply| reply.map(|payload| payload.swap_request))
}
