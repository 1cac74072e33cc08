//! # Profile Endpoints

use shared::{Item, ItemsPayload, ProfileUpdate, Reply, User, UserPayload};

use super::client::ApiClient;
use crate::core::service::ApiResult;

/// Profile of the session user, including listing statistics.
pub async fn get_profile(client: &ApiClient) -> ApiResult<User> {
    client
        .send::<UserPayload>(client.client.get(client.url("/user/profile")), "get_profile")
        .await
        .map(|reply| reply.data.user)
}

#[tracing::instrument(skip(client, update))]
pub async fn update_profile(client: &ApiClient, update: &ProfileUpdate) -> ApiResult<Reply<User>> {
    client
        .send::<UserPayload>(
            client.client.put(client.url("/user/profile")).json(update),
            "update_profile",
        )
        .await
        .map(|reply| reply.map(|payload| payload.user))
}

/// Every item the session user has listed, newest first.
pub async fn get_user_items(client: &ApiClient) -> ApiResult<Vec<Item>> {
    client
        .send::<ItemsPayload>(client.client.get(client.url("/items/user")), "get_user_items")
        .await
        .map(|reply| reply.data.items)
}
