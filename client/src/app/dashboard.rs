//! User dashboard: profile counters plus the most recent listings.

use std::sync::Arc;

use parking_lot::Mutex;
use shared::{Item, User, UserStats};

use super::notifications::Notifier;
use super::session::Session;
use super::Route;
use crate::core::service::MarketplaceApi;

/// Listings shown under "My Items".
pub const RECENT_ITEMS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardPhase {
    /// Session or data still loading.
    Loading,
    Ready,
    Failed(String),
    /// Nobody is signed in once the session resolved.
    Redirect(Route),
}

#[derive(Debug)]
struct DashboardState {
    phase: DashboardPhase,
    profile: Option<User>,
    recent: Vec<Item>,
}

pub struct Dashboard {
    api: Arc<dyn MarketplaceApi>,
    session: Arc<Session>,
    notifier: Notifier,
    state: Mutex<DashboardState>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn MarketplaceApi>, session: Arc<Session>, notifier: Notifier) -> Self {
        Self {
            api,
            session,
            notifier,
            state: Mutex::new(DashboardState {
                phase: DashboardPhase::Loading,
                profile: None,
                recent: Vec::new(),
            }),
        }
    }

    pub async fn load(&self) -> DashboardPhase {
        if self.session.is_loading() {
            return DashboardPhase::Loading;
        }
        if !self.session.is_authenticated() {
            let phase = DashboardPhase::Redirect(Route::Login);
            self.state.lock().phase = phase.clone();
            return phase;
        }

        let (profile, items) = tokio::join!(self.api.get_profile(), self.api.get_user_items());

        let mut state = self.state.lock();
        match (profile, items) {
            (Ok(profile), Ok(items)) => {
                state.profile = Some(profile);
                state.recent = items.into_iter().take(RECENT_ITEMS).collect();
                state.phase = DashboardPhase::Ready;
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "Failed to load dashboard");
                let message = e.user_message("Failed to load dashboard data.");
                self.notifier.error("Error", message.clone());
                state.phase = DashboardPhase::Failed(message);
            }
        }
        state.phase.clone()
    }

    pub fn phase(&self) -> DashboardPhase {
        self.state.lock().phase.clone()
    }

    pub fn profile(&self) -> Option<User> {
        self.state.lock().profile.clone()
    }

    /// Counters from the profile, zero until loaded.
    pub fn stats(&self) -> UserStats {
        self.state
            .lock()
            .profile
            .as_ref()
            .and_then(|profile| profile.stats)
            .unwrap_or_default()
    }

    /// Balance as the session sees it, which includes local mirrors of recent redemptions.
    pub fn points(&self) -> u32 {
        self.session.points().unwrap_or_default()
    }

    pub fn recent_items(&self) -> Vec<Item> {
        self.state.lock().recent.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock::{self, MockApi};
    use shared::ItemStatus;

    async fn dashboard(api: &Arc<MockApi>, user: Option<User>) -> Dashboard {
        let (notifier, _rx) = Notifier::channel();
        match user {
            Some(user) => api.current_user.push(Ok(user)),
            None => api.current_user.push(Err(mock::http(401, None))),
        }
        let session = Arc::new(Session::new(api.clone(), notifier.clone()));
        session.initialize().await;
        Dashboard::new(api.clone(), session, notifier)
    }

    #[tokio::test]
    async fn test_signed_out_user_is_sent_to_login() {
        let api = Arc::new(MockApi::new());
        let dashboard = dashboard(&api, None).await;
        assert_eq!(dashboard.load().await, DashboardPhase::Redirect(Route::Login));
        assert_eq!(api.count("get_profile"), 0);
    }

    #[tokio::test]
    async fn test_shows_profile_counters_and_five_recent_items() {
        let api = Arc::new(MockApi::new());
        let dashboard = dashboard(&api, Some(mock::user(4, 60))).await;

        let mut profile = mock::user(4, 60);
        profile.stats = Some(UserStats {
            total_items: 7,
            approved_items: 5,
            total_swaps: 2,
        });
        api.profile.push(Ok(profile));
        api.user_items.push(Ok((1..=7)
            .map(|id| mock::item(id, 4, 10, ItemStatus::Approved))
            .collect()));

        assert_eq!(dashboard.load().await, DashboardPhase::Ready);
        assert_eq!(dashboard.stats().total_items, 7);
        assert_eq!(dashboard.points(), 60);
        let ids: Vec<_> = dashboard.recent_items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_failure_uses_fallback_message() {
        let api = Arc::new(MockApi::new());
        let dashboard = dashboard(&api, Some(mock::user(4, 0))).await;
        api.profile.push(Ok(mock::user(4, 0)));
        api.user_items.push(Err(mock::http(500, None)));

        assert_eq!(
            dashboard.load().await,
            DashboardPhase::Failed("Failed to load dashboard data.".to_string())
        );
        assert_eq!(dashboard.stats(), UserStats::default());
    }
}
