//! # Authentication Endpoints
//!
//! Login, registration, logout and the current-session lookup.

use shared::{LoginRequest, RegisterRequest, Reply, User, UserPayload};

use super::client::ApiClient;
use crate::core::service::ApiResult;

/// Login with email and password. The backend answers with a session cookie.
#[tracing::instrument(skip(client, password), fields(email = %email))]
pub async fn login(client: &ApiClient, email: &str, password: &str) -> ApiResult<Reply<User>> {
    tracing::info!("Attempting login");

    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    let reply = client
        .send::<UserPayload>(client.client.post(client.url("/auth/login")).json(&request), "login")
        .await?;

    tracing::info!(user_id = reply.data.user.id, "Login successful");
    Ok(reply.map(|payload| payload.user))
}

/// Register a new account; the backend logs the new user in.
#[tracing::instrument(skip(client, password), fields(email = %email))]
pub async fn register(
    client: &ApiClient,
    email: &str,
    password: &str,
    name: &str,
) -> ApiResult<Reply<User>> {
    let request = RegisterRequest {
        email: email.to_string(),
        password: password.to_string(),
        name: name.to_string(),
    };

    let reply = client
        .send::<UserPayload>(
            client.client.post(client.url("/auth/register")).json(&request),
            "register",
        )
        .await?;

    tracing::info!(user_id = reply.data.user.id, "Registration successful");
    Ok(reply.map(|payload| payload.user))
}

pub async fn logout(client: &ApiClient) -> ApiResult<Reply<()>> {
    client
        .send_ack(client.client.post(client.url("/auth/logout")), "logout")
        .await
}

/// The user owning the current session cookie.
pub async fn current_user(client: &ApiClient) -> ApiResult<User> {
    client
        .send::<UserPayload>(client.client.get(client.url("/auth/me")), "current_user")
        .await
        .map(|reply| reply.data.user)
}
