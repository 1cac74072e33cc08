//! # Direct Messages

use shared::{Reply, SendMessageRequest};

use super::client::ApiClient;
use crate::core::service::ApiResult;

#[tracing::instrument(skip(client, message), fields(recipient_id = message.recipient_id))]
pub async fn send_message(
    client: &ApiClient,
    message: &SendMessageRequest,
) -> ApiResult<Reply<()>> {
    client
        .send_ack(
            client.client.post(client.url("/messages")).json(message),
            "send_message",
        )
        .await
}
