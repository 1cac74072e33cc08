//! # Application Layer
//!
//! Headless view controllers. Each one owns the state of one screen, talks to
//! the backend through `Arc<dyn MarketplaceApi>`, and reports outcomes as
//! [`Toast`]s. Rendering is left to whatever front end drives them (the
//! `rewear` CLI in this crate).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  AppContext                                                   │
//! │  - api: Arc<dyn MarketplaceApi>                               │
//! │  - session: Arc<Session>   (the only owner of the user)       │
//! │  - notifier: Notifier ──────────────┐                         │
//! └──────┬───────────────────────────────┼────────────────────────┘
//!        │ builds                        │ async_channel (unbounded)
//!        ▼                               ▼
//! ┌─────────────────────────────┐  ┌─────────────────────────────┐
//! │ BrowseView   ItemDetailView │  │ Receiver<Toast>             │
//! │ AdminConsole AddItemForm    │  │ drained by the front end    │
//! │ Dashboard    SwapInbox      │  └─────────────────────────────┘
//! │ FeaturedShowcase            │
//! └─────────────────────────────┘
//! ```
//!
//! ## State Management Pattern
//!
//! Every controller keeps its state behind a `parking_lot` lock that is taken
//! briefly and never held across an `.await`. Changes that wait on the server
//! go through [`optimistic::Staged`]: mark pending, then commit on confirmed
//! success or roll back to the snapshot.

pub mod add_item;
pub mod admin;
pub mod browse;
pub mod carousel;
pub mod dashboard;
pub mod featured;
pub mod item_detail;
pub mod notifications;
pub mod optimistic;
pub mod session;
pub mod swap_inbox;

use std::sync::Arc;

use async_channel::Receiver;
use shared::ItemId;

use crate::config::ClientConfig;
use crate::core::error::Result;
use crate::core::service::MarketplaceApi;
use crate::services::api::ApiClient;

pub use add_item::{AddItemForm, FormError};
pub use admin::{AdminAccess, AdminConsole, AdminTab};
pub use browse::{BrowseConfig, BrowseFilters, BrowseVariant, BrowseView, FetchOutcome, ListPhase};
pub use dashboard::{Dashboard, DashboardPhase};
pub use featured::FeaturedShowcase;
pub use item_detail::{DetailActions, DetailPhase, ItemDetailView, RedeemButton};
pub use notifications::{Notifier, Toast, ToastVariant};
pub use session::{Session, UserPatch};
pub use swap_inbox::SwapInbox;

/// Screens a controller can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Item(ItemId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Item(id) => format!("/item/{id}"),
        }
    }
}

/// Shared handles every screen is built from.
#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn MarketplaceApi>,
    pub session: Arc<Session>,
    pub notifier: Notifier,
    pub config: ClientConfig,
}

impl AppContext {
    /// Context over an arbitrary backend implementation, plus the toast receiver.
    pub fn new(api: Arc<dyn MarketplaceApi>, config: ClientConfig) -> (Self, Receiver<Toast>) {
        let (notifier, toasts) = Notifier::channel();
        let session = Arc::new(Session::new(api.clone(), notifier.clone()));
        (
            Self {
                api,
                session,
                notifier,
                config,
            },
            toasts,
        )
    }

    /// Context talking to the configured backend over HTTP.
    pub fn connect(config: ClientConfig) -> Result<(Self, Receiver<Toast>)> {
        let api: Arc<dyn MarketplaceApi> = Arc::new(ApiClient::new(&config)?);
        Ok(Self::new(api, config))
    }

    pub fn browse(&self, variant: BrowseVariant) -> BrowseView {
        BrowseView::new(
            self.api.clone(),
            self.notifier.clone(),
            BrowseConfig::from_client(&self.config, variant),
        )
    }

    pub fn item_detail(&self, item_id: ItemId) -> ItemDetailView {
        ItemDetailView::new(
            self.api.clone(),
            self.session.clone(),
            self.notifier.clone(),
            self.config.upload_host.clone(),
            item_id,
        )
    }

    pub fn admin(&self) -> AdminConsole {
        AdminConsole::new(
            self.api.clone(),
            self.session.clone(),
            self.notifier.clone(),
            self.config.upload_host.clone(),
        )
    }

    pub fn featured(&self) -> FeaturedShowcase {
        FeaturedShowcase::new(self.api.clone())
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.api.clone(), self.session.clone(), self.notifier.clone())
    }

    pub fn swap_inbox(&self) -> SwapInbox {
        SwapInbox::new(self.api.clone(), self.session.clone(), self.notifier.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock::{self, MockApi};

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Dashboard.path(), "/dashboard");
        assert_eq!(Route::Item(42).path(), "/item/42");
    }

    #[tokio::test]
    async fn test_context_shares_one_session_between_screens() {
        let api = Arc::new(MockApi::new());
        api.current_user.push(Ok(mock::admin(1)));
        let (ctx, _toasts) = AppContext::new(api.clone(), ClientConfig::default());

        let console = ctx.admin();
        assert_eq!(console.access(), AdminAccess::Pending);
        ctx.session.initialize().await;
        assert_eq!(console.access(), AdminAccess::Granted);
    }
}
