//! # Auth Session Holder
//!
//! The one place the current user lives. A [`Session`] is created once, shared
//! as `Arc<Session>` with every view that needs the user, and only ever changed
//! through its own methods.
//!
//! ## State
//!
//! - `user`: mirror of the server-side session user, `None` when signed out
//! - `loading`: `true` until the first [`Session::initialize`] resolves, so
//!   guards can tell "not signed in" from "not known yet"
//!
//! ## Two ways to change the user
//!
//! - [`Session::refresh_user`] re-fetches the authoritative user.
//! - [`Session::update_user`] merges fields locally without a round-trip. It is
//!   only for mirroring a change the server has already made and reported
//!   (e.g. the balance returned by a redemption).

use std::sync::Arc;

use parking_lot::RwLock;
use shared::{ProfileUpdate, User, UserId};

use super::notifications::Notifier;
use crate::core::error::{AppError, Result};
use crate::core::service::MarketplaceApi;
use crate::utils::validation::{validate_email, validate_name, validate_password};

const CONNECTION_FALLBACK: &str = "Unable to connect to the server. Please try again.";

#[derive(Debug)]
struct SessionState {
    user: Option<User>,
    loading: bool,
}

/// Fields to merge into the mirrored user. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub points: Option<u32>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

impl UserPatch {
    pub fn points(points: u32) -> Self {
        Self {
            points: Some(points),
            ..Self::default()
        }
    }

    fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(points) = self.points {
            user.points = points;
        }
        if let Some(avatar) = self.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(bio) = self.bio {
            user.bio = Some(bio);
        }
        if let Some(location) = self.location {
            user.location = Some(location);
        }
    }
}

pub struct Session {
    api: Arc<dyn MarketplaceApi>,
    notifier: Notifier,
    state: RwLock<SessionState>,
}

impl Session {
    pub fn new(api: Arc<dyn MarketplaceApi>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            state: RwLock::new(SessionState {
                user: None,
                loading: true,
            }),
        }
    }

    /// Resolve the existing server session, if any, and end the loading window.
    pub async fn initialize(&self) -> Option<User> {
        let user = self.refresh_user().await;
        self.state.write().loading = false;
        user
    }

    /// Re-fetch the authoritative user. Any failure means "signed out".
    pub async fn refresh_user(&self) -> Option<User> {
        let user = match self.api.current_user().await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!(error = %e, "No active session");
                None
            }
        };
        self.state.write().user = user.clone();
        user
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        if email.trim().is_empty() || password.is_empty() {
            let err = AppError::Validation("Email and password are required.".to_string());
            self.notifier.error("Login Failed", err.user_message(""));
            return Err(err);
        }

        match self.api.login(email.trim(), password).await {
            Ok(reply) => {
                let user = reply.data;
                self.set_signed_in(user.clone());
                tracing::info!(user_id = user.id, "Signed in");
                self.notifier.info(
                    "Welcome back!",
                    reply.message.unwrap_or_else(|| format!("Welcome back, {}!", user.name)),
                );
                Ok(user)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Login failed");
                let title = if err.is_network() { "Connection Error" } else { "Login Failed" };
                self.notifier.error(title, err.user_message(CONNECTION_FALLBACK));
                Err(err.into())
            }
        }
    }

    /// Create an account; the backend signs the new user in.
    #[tracing::instrument(skip(self, password))]
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> Result<User> {
        let checks = [validate_email(email), validate_password(password), validate_name(name)];
        if let Some(message) = checks.into_iter().find_map(|check| check.error) {
            self.notifier.error("Registration Failed", message.clone());
            return Err(AppError::Validation(message));
        }

        match self.api.register(email.trim(), password, name.trim()).await {
            Ok(reply) => {
                let user = reply.data;
                self.set_signed_in(user.clone());
                tracing::info!(user_id = user.id, "Registered");
                self.notifier.info(
                    "Welcome to ReWear!",
                    reply.message.unwrap_or_else(|| "Account created successfully!".to_string()),
                );
                Ok(user)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Registration failed");
                let title = if err.is_network() {
                    "Connection Error"
                } else {
                    "Registration Failed"
                };
                self.notifier.error(title, err.user_message(CONNECTION_FALLBACK));
                Err(err.into())
            }
        }
    }

    /// Sign out. Local state is cleared even when the server call fails.
    pub async fn logout(&self) {
        let result = self.api.logout().await;
        self.state.write().user = None;

        match result {
            Ok(_) => self
                .notifier
                .info("Logged Out", "You have been successfully logged out."),
            Err(e) => {
                tracing::warn!(error = %e, "Server logout failed, cleared local session anyway");
                self.notifier.info("Logged Out", "You have been logged out.");
            }
        }
    }

    /// A fresh sign-in also settles the initial loading window.
    fn set_signed_in(&self, user: User) {
        let mut state = self.state.write();
        state.user = Some(user);
        state.loading = false;
    }

    /// Merge fields into the mirrored user without a server round-trip.
    /// No-op when signed out.
    pub fn update_user(&self, patch: UserPatch) {
        if let Some(user) = self.state.write().user.as_mut() {
            patch.apply(user);
        }
    }

    /// Save profile edits and mirror the user the server returns.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        if self.user_id().is_none() {
            return Err(AppError::Access("Sign in to edit your profile.".to_string()));
        }

        match self.api.update_profile(&update).await {
            Ok(reply) => {
                let user = reply.data;
                self.state.write().user = Some(user.clone());
                self.notifier.info(
                    "Profile updated",
                    reply.message.unwrap_or_else(|| {
                        "Your profile has been successfully updated.".to_string()
                    }),
                );
                Ok(user)
            }
            Err(err) => {
                self.notifier
                    .error("Error", err.user_message("Failed to update profile."));
                Err(err.into())
            }
        }
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.state.read().user.as_ref().map(|user| user.id)
    }

    pub fn points(&self) -> Option<u32> {
        self.state.read().user.as_ref().map(|user| user.points)
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.state
            .read()
            .user
            .as_ref()
            .is_some_and(User::is_admin)
    }
}
