//! # Admin Moderation Console
//!
//! Pending-item queue, aggregate counters and the review modal.
//!
//! ## Access
//!
//! [`AdminConsole::access`] stays [`AdminAccess::Pending`] while the session is
//! still resolving, so a reload never bounces an admin away during the loading
//! window. Once resolved, non-admins are sent to the dashboard.
//!
//! ## Moderation
//!
//! ```text
//! approve(42) ─ row 42 busy ─ POST /admin/items/42/approve
//!                              ├─ Ok  → row 42 leaves the queue, pending_items -= 1
//!                              └─ Err → row 42 restored, counters untouched
//! ```
//!
//! The queue and the counter change only after the server confirms. Only a
//! row's busy mark is staged, so a failure never undoes another item's
//! confirmed removal or a reload that landed while the call was in flight.

use std::sync::Arc;

use chrono::NaiveDateTime;
use parking_lot::Mutex;
use shared::{upload_url, AdminStats, Item, ItemId, UploadKind, DEFAULT_REJECT_REASON};

use super::carousel::Carousel;
use super::notifications::Notifier;
use super::optimistic::Staged;
use super::session::Session;
use super::Route;
use crate::core::error::{AppError, Result};
use crate::core::service::MarketplaceApi;

const LOAD_FAILED: &str = "Failed to load admin data. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAccess {
    /// Session not resolved yet; render a spinner, do not redirect.
    Pending,
    Denied { redirect: Route },
    Granted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminTab {
    #[default]
    Pending,
    Reports,
    Users,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moderation {
    Approve,
    Reject,
}

/// One entry of the pending queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRow {
    pub item: Item,
    /// Moderation call awaiting the server, if any.
    pub busy: Option<Moderation>,
}

/// Full-detail review of one pending item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewModal {
    item: Item,
    carousel: Carousel,
    show_bill: bool,
}

impl ReviewModal {
    fn new(item: Item) -> Self {
        let carousel = Carousel::new(item.images.len());
        Self {
            item,
            carousel,
            show_bill: false,
        }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn carousel(&self) -> Carousel {
        self.carousel
    }

    pub fn is_bill_visible(&self) -> bool {
        self.show_bill
    }

    pub fn owner_name(&self) -> Option<&str> {
        self.item.owner.as_ref().map(|owner| owner.name.as_str())
    }

    pub fn owner_email(&self) -> Option<&str> {
        self.item.owner.as_ref().map(|owner| owner.email.as_str())
    }

    pub fn submitted_at(&self) -> Option<NaiveDateTime> {
        self.item.created_at
    }

    pub fn image_url(&self, host: &str) -> Option<String> {
        self.item
            .images
            .get(self.carousel.index())
            .map(|file| upload_url(host, UploadKind::Items, file))
    }

    /// Preview/download link of the purchase bill, when one was uploaded.
    pub fn bill_url(&self, host: &str) -> Option<String> {
        self.item
            .bill_path
            .as_deref()
            .filter(|_| self.item.has_bill)
            .map(|file| upload_url(host, UploadKind::Bills, file))
    }
}

#[derive(Debug, Default)]
struct AdminState {
    loaded: bool,
    rows: Vec<PendingRow>,
    stats: AdminStats,
    tab: AdminTab,
    review: Option<ReviewModal>,
}

impl AdminState {
    fn row_mut(&mut self, id: ItemId) -> Option<&mut PendingRow> {
        self.rows.iter_mut().find(|row| row.item.id == id)
    }
}

pub struct AdminConsole {
    api: Arc<dyn MarketplaceApi>,
    session: Arc<Session>,
    notifier: Notifier,
    upload_host: String,
    state: Mutex<AdminState>,
}

impl AdminConsole {
    pub fn new(
        api: Arc<dyn MarketplaceApi>,
        session: Arc<Session>,
        notifier: Notifier,
        upload_host: impl Into<String>,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            upload_host: upload_host.into(),
            state: Mutex::new(AdminState::default()),
        }
    }

    pub fn access(&self) -> AdminAccess {
        if self.session.is_loading() {
            AdminAccess::Pending
        } else if self.session.is_admin() {
            AdminAccess::Granted
        } else {
            AdminAccess::Denied {
                redirect: Route::Dashboard,
            }
        }
    }

    fn require_admin(&self) -> Result<()> {
        match self.access() {
            AdminAccess::Granted => Ok(()),
            AdminAccess::Pending => {
                Err(AppError::State("Session is still loading.".to_string()))
            }
            AdminAccess::Denied { .. } => {
                Err(AppError::Access("Admin access required.".to_string()))
            }
        }
    }

    /// Fetch the pending queue and counters together.
    pub async fn load(&self) -> Result<()> {
        self.require_admin()?;

        let (pending, stats) =
            tokio::join!(self.api.get_pending_items(), self.api.get_admin_stats());

        let mut state = self.state.lock();
        let mut first_error = None;
        match pending {
            Ok(items) => {
                // Calls still in flight keep their mark across a reload.
                let in_flight: Vec<(ItemId, Moderation)> = state
                    .rows
                    .iter()
                    .filter_map(|row| row.busy.map(|busy| (row.item.id, busy)))
                    .collect();
                state.rows = items
                    .into_iter()
                    .map(|item| {
                        let busy = in_flight
                            .iter()
                            .find(|(id, _)| *id == item.id)
                            .map(|(_, busy)| *busy);
                        PendingRow { item, busy }
                    })
                    .collect();
            }
            Err(e) => first_error = Some(e),
        }
        match stats {
            Ok(stats) => state.stats = stats,
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
        state.loaded = true;
        drop(state);

        match first_error {
            None => Ok(()),
            Some(e) => {
                tracing::error!(error = %e, "Failed to load admin data");
                self.notifier.error("Error", LOAD_FAILED);
                Err(e.into())
            }
        }
    }

    pub async fn approve(&self, id: ItemId) -> Result<()> {
        self.moderate(id, Moderation::Approve, None).await
    }

    /// Reject with `reason`, or the default guideline reason when none is given.
    pub async fn reject(&self, id: ItemId, reason: Option<&str>) -> Result<()> {
        self.moderate(id, Moderation::Reject, reason).await
    }

    #[tracing::instrument(skip(self, reason))]
    async fn moderate(&self, id: ItemId, action: Moderation, reason: Option<&str>) -> Result<()> {
        self.require_admin()?;

        let staged = {
            let mut state = self.state.lock();
            let row = state
                .row_mut(id)
                .ok_or_else(|| AppError::State(format!("Item {id} is not in the pending queue.")))?;
            if row.busy.is_some() {
                return Err(AppError::State(format!("Item {id} is already being moderated.")));
            }
            Staged::begin(&mut row.busy, |busy| *busy = Some(action))
        };

        let result = match action {
            Moderation::Approve => self.api.approve_item(id).await,
            Moderation::Reject => {
                let reason = reason
                    .map(str::trim)
                    .filter(|reason| !reason.is_empty())
                    .unwrap_or(DEFAULT_REJECT_REASON);
                self.api.reject_item(id, reason).await
            }
        };

        match result {
            Ok(reply) => {
                {
                    let mut state = self.state.lock();
                    if let Some(index) = state.rows.iter().position(|row| row.item.id == id) {
                        let mut row = state.rows.remove(index);
                        staged.commit(&mut row.busy, |busy| *busy = None);
                        state.stats.pending_items = state.stats.pending_items.saturating_sub(1);
                    }
                    if state.review.as_ref().is_some_and(|modal| modal.item.id == id) {
                        state.review = None;
                    }
                }
                tracing::info!(item_id = id, ?action, "Item moderated");
                match action {
                    Moderation::Approve => self.notifier.info(
                        "Success",
                        reply.message.unwrap_or_else(|| "Item approved successfully".to_string()),
                    ),
                    Moderation::Reject => self.notifier.error(
                        "Item Rejected",
                        reply.message.unwrap_or_else(|| "Item rejected".to_string()),
                    ),
                }
                Ok(())
            }
            Err(e) => {
                if let Some(row) = self.state.lock().row_mut(id) {
                    staged.rollback(&mut row.busy);
                }
                tracing::warn!(item_id = id, ?action, error = %e, "Moderation failed");
                let fallback = match action {
                    Moderation::Approve => "Failed to approve item",
                    Moderation::Reject => "Failed to reject item",
                };
                self.notifier.error("Error", e.user_message(fallback));
                Err(e.into())
            }
        }
    }

    // ==================== REVIEW MODAL ====================

    pub fn open_review(&self, id: ItemId) -> Option<ReviewModal> {
        let mut state = self.state.lock();
        let item = state.rows.iter().find(|row| row.item.id == id)?.item.clone();
        let modal = ReviewModal::new(item);
        state.review = Some(modal.clone());
        Some(modal)
    }

    pub fn close_review(&self) {
        self.state.lock().review = None;
    }

    pub fn review(&self) -> Option<ReviewModal> {
        self.state.lock().review.clone()
    }

    pub fn review_next_image(&self) {
        if let Some(modal) = self.state.lock().review.as_mut() {
            modal.carousel.next();
        }
    }

    pub fn review_prev_image(&self) {
        if let Some(modal) = self.state.lock().review.as_mut() {
            modal.carousel.prev();
        }
    }

    pub fn toggle_bill(&self) {
        if let Some(modal) = self.state.lock().review.as_mut() {
            modal.show_bill = !modal.show_bill;
        }
    }

    pub fn review_image_url(&self) -> Option<String> {
        self.state.lock().review.as_ref()?.image_url(&self.upload_host)
    }

    pub fn review_bill_url(&self) -> Option<String> {
        self.state.lock().review.as_ref()?.bill_url(&self.upload_host)
    }

    /// Approve the item under review; the modal closes on success.
    pub async fn review_approve(&self) -> Result<()> {
        let id = self.reviewed_id()?;
        self.approve(id).await
    }

    /// Reject the item under review; the modal closes on success.
    pub async fn review_reject(&self, reason: Option<&str>) -> Result<()> {
        let id = self.reviewed_id()?;
        self.reject(id, reason).await
    }

    fn reviewed_id(&self) -> Result<ItemId> {
        self.state
            .lock()
            .review
            .as_ref()
            .map(|modal| modal.item.id)
            .ok_or_else(|| AppError::State("No item under review.".to_string()))
    }

    // ==================== ACCESSORS ====================

    pub fn is_loaded(&self) -> bool {
        self.state.lock().loaded
    }

    pub fn rows(&self) -> Vec<PendingRow> {
        self.state.lock().rows.clone()
    }

    pub fn pending_items(&self) -> Vec<Item> {
        self.state.lock().rows.iter().map(|row| row.item.clone()).collect()
    }

    pub fn stats(&self) -> AdminStats {
        self.state.lock().stats
    }

    pub fn tab(&self) -> AdminTab {
        self.state.lock().tab
    }

    pub fn set_tab(&self, tab: AdminTab) {
        self.state.lock().tab = tab;
    }
}
