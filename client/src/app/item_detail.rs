//! # Item Detail / Transaction View
//!
//! ```text
//! Loading ──get_item──┬─> Loaded ──> actions()
//!                     ├─> NotFound (404)
//!                     └─> Failed(message)
//! ```
//!
//! Once loaded, what the viewer may do depends on who they are:
//!
//! | viewer              | item status | actions                                  |
//! |---------------------|-------------|------------------------------------------|
//! | signed out          | any         | sign-in prompt                           |
//! | owner               | any         | informational banner only                |
//! | other user          | approved    | request swap, redeem if balance suffices |
//! | other user          | otherwise   | unavailable                              |
//!
//! Every action stages only the busy slot with [`Staged`]. The item itself is
//! changed on confirmed success alone, so a reload that lands while an action
//! is in flight is never overwritten by a rollback.

use std::sync::Arc;

use parking_lot::Mutex;
use shared::{
    upload_url, CreateSwapRequest, Item, ItemId, ItemStatus, SendMessageRequest, SwapRequest,
    UploadKind, User,
};

use super::carousel::Carousel;
use super::notifications::Notifier;
use super::optimistic::Staged;
use super::session::{Session, UserPatch};
use crate::core::error::{AppError, Result};
use crate::core::service::MarketplaceApi;

pub const OWNER_BANNER: &str =
    "This is your item. Other members can request it or redeem it with points.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPhase {
    Loading,
    Loaded,
    NotFound,
    Failed(String),
}

/// State of the redeem button for the current viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemButton {
    pub label: String,
    pub enabled: bool,
    /// Points still missing, 0 when the balance suffices.
    pub shortfall: u32,
}

impl RedeemButton {
    pub fn new(balance: u32, price: u32, busy: Option<DetailAction>) -> Self {
        let shortfall = price.saturating_sub(balance);
        let label = if busy == Some(DetailAction::Redeem) {
            "Processing...".to_string()
        } else if shortfall > 0 {
            format!("Redeem for {price} points (Need {shortfall} more)")
        } else {
            format!("Redeem for {price} points")
        };
        Self {
            label,
            enabled: shortfall == 0 && busy.is_none(),
            shortfall,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailActions {
    SignInRequired,
    /// Buttons hidden; show [`OWNER_BANNER`].
    Owner,
    Unavailable(ItemStatus),
    Available {
        redeem: RedeemButton,
        swap_enabled: bool,
    },
}

/// Action currently awaiting the server. One at a time per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    Redeem,
    SwapRequest,
    Message,
}

#[derive(Debug)]
struct DetailState {
    phase: DetailPhase,
    item: Option<Item>,
    busy: Option<DetailAction>,
    carousel: Carousel,
}

pub struct ItemDetailView {
    api: Arc<dyn MarketplaceApi>,
    session: Arc<Session>,
    notifier: Notifier,
    upload_host: String,
    item_id: ItemId,
    state: Mutex<DetailState>,
}

impl ItemDetailView {
    pub fn new(
        api: Arc<dyn MarketplaceApi>,
        session: Arc<Session>,
        notifier: Notifier,
        upload_host: impl Into<String>,
        item_id: ItemId,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            upload_host: upload_host.into(),
            item_id,
            state: Mutex::new(DetailState {
                phase: DetailPhase::Loading,
                item: None,
                busy: None,
                carousel: Carousel::default(),
            }),
        }
    }

    pub async fn load(&self) -> DetailPhase {
        self.state.lock().phase = DetailPhase::Loading;
        let result = self.api.get_item(self.item_id).await;

        let mut state = self.state.lock();
        match result {
            Ok(item) => {
                state.carousel = Carousel::new(item.images.len());
                state.item = Some(item);
                state.phase = DetailPhase::Loaded;
            }
            Err(e) if e.is_not_found() => {
                state.item = None;
                state.phase = DetailPhase::NotFound;
            }
            Err(e) => {
                tracing::warn!(item_id = self.item_id, error = %e, "Failed to load item");
                state.item = None;
                state.phase = DetailPhase::Failed(e.user_message("Failed to load item details."));
            }
        }
        state.phase.clone()
    }

    pub fn phase(&self) -> DetailPhase {
        self.state.lock().phase.clone()
    }

    pub fn item(&self) -> Option<Item> {
        self.state.lock().item.clone()
    }

    pub fn busy(&self) -> Option<DetailAction> {
        self.state.lock().busy
    }

    /// What the current viewer may do. `None` until the item is loaded.
    pub fn actions(&self) -> Option<DetailActions> {
        let user = self.session.user();
        let state = self.state.lock();
        let item = state.item.as_ref()?;
        let busy = state.busy;

        let actions = match user {
            None => DetailActions::SignInRequired,
            Some(user) if item.is_owned_by(user.id) => DetailActions::Owner,
            Some(_) if item.status != ItemStatus::Approved => {
                DetailActions::Unavailable(item.status)
            }
            Some(user) => DetailActions::Available {
                redeem: RedeemButton::new(user.points, item.points, busy),
                swap_enabled: busy.is_none(),
            },
        };
        Some(actions)
    }

    // ==================== REDEEM ====================

    /// Spend points on the item. Returns the new balance reported by the server.
    #[tracing::instrument(skip(self), fields(item_id = self.item_id))]
    pub async fn redeem(&self) -> Result<u32> {
        let (user, item) = self.actionable_item("redeem items")?;

        let shortfall = item.points.saturating_sub(user.points);
        if shortfall > 0 {
            let message = format!("You need {shortfall} more points to redeem this item.");
            self.notifier.error("Insufficient Points", message.clone());
            return Err(AppError::Validation(message));
        }

        let staged = self.stage(DetailAction::Redeem)?;

        match self.api.redeem_item(item.id).await {
            Ok(reply) => {
                let balance = reply.data.user_points;
                self.session.update_user(UserPatch::points(balance));
                {
                    let mut state = self.state.lock();
                    staged.commit(&mut state.busy, |busy| *busy = None);
                    if let Some(item) = state.item.as_mut() {
                        item.status = ItemStatus::Swapped;
                    }
                }
                tracing::info!(old_balance = user.points, new_balance = balance, "Item redeemed");
                self.notifier.info(
                    "Item redeemed!",
                    reply.message.unwrap_or_else(|| {
                        format!("You redeemed \"{}\" for {} points.", item.title, item.points)
                    }),
                );
                Ok(balance)
            }
            Err(e) => {
                staged.rollback(&mut self.state.lock().busy);
                tracing::warn!(error = %e, "Redemption failed");
                self.notifier
                    .error("Redemption Failed", e.user_message("Failed to redeem item"));
                Err(e.into())
            }
        }
    }

    // ==================== SWAP REQUEST ====================

    /// Ask the owner for the item, offering exactly its point value.
    #[tracing::instrument(skip(self, message), fields(item_id = self.item_id))]
    pub async fn request_swap(&self, message: Option<&str>) -> Result<Option<SwapRequest>> {
        let (_, item) = self.actionable_item("request swaps")?;

        let body = CreateSwapRequest {
            item_id: item.id,
            points_offered: item.points,
            message: message
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string),
        };

        let staged = self.stage(DetailAction::SwapRequest)?;

        match self.api.create_swap_request(&body).await {
            Ok(reply) => {
                staged.commit(&mut self.state.lock().busy, |busy| *busy = None);
                self.notifier.info(
                    "Swap request sent!",
                    reply.message.unwrap_or_else(|| {
                        "The owner will be notified of your request.".to_string()
                    }),
                );
                Ok(reply.data)
            }
            Err(e) => {
                staged.rollback(&mut self.state.lock().busy);
                tracing::warn!(error = %e, "Swap request failed");
                self.notifier
                    .error("Error", e.user_message("Failed to send swap request"));
                Err(e.into())
            }
        }
    }

    // ==================== MESSAGING ====================

    /// Send a direct message to the item's owner.
    pub async fn send_message(&self, content: &str) -> Result<()> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Message cannot be empty.".to_string()));
        }
        let user = self
            .session
            .user()
            .ok_or_else(|| AppError::Access("Please sign in to send messages.".to_string()))?;

        let recipient_id = self
            .item()
            .as_ref()
            .and_then(Item::owner_id)
            .ok_or_else(|| AppError::State("Item owner is not known.".to_string()))?;
        if recipient_id == user.id {
            return Err(AppError::Access("You cannot message yourself.".to_string()));
        }

        let request = SendMessageRequest {
            recipient_id,
            item_id: Some(self.item_id),
            content: content.to_string(),
        };
        let staged = self.stage(DetailAction::Message)?;

        match self.api.send_message(&request).await {
            Ok(reply) => {
                staged.commit(&mut self.state.lock().busy, |busy| *busy = None);
                self.notifier.info(
                    "Message sent!",
                    reply
                        .message
                        .unwrap_or_else(|| "The owner will get back to you soon.".to_string()),
                );
                Ok(())
            }
            Err(e) => {
                staged.rollback(&mut self.state.lock().busy);
                self.notifier
                    .error("Error", e.user_message("Failed to send message"));
                Err(e.into())
            }
        }
    }

    // ==================== IMAGES ====================

    pub fn image_urls(&self) -> Vec<String> {
        self.state
            .lock()
            .item
            .as_ref()
            .map(|item| {
                item.images
                    .iter()
                    .map(|file| upload_url(&self.upload_host, UploadKind::Items, file))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn current_image_url(&self) -> Option<String> {
        let state = self.state.lock();
        let file = state.item.as_ref()?.images.get(state.carousel.index())?;
        Some(upload_url(&self.upload_host, UploadKind::Items, file))
    }

    pub fn carousel(&self) -> Carousel {
        self.state.lock().carousel
    }

    pub fn next_image(&self) {
        self.state.lock().carousel.next();
    }

    pub fn prev_image(&self) {
        self.state.lock().carousel.prev();
    }

    pub fn select_image(&self, index: usize) {
        self.state.lock().carousel.select(index);
    }

    /// Mark `action` as in flight, refusing if another action still is.
    fn stage(&self, action: DetailAction) -> Result<Staged<Option<DetailAction>>> {
        let mut state = self.state.lock();
        if let Some(current) = state.busy {
            return Err(AppError::State(format!("{current:?} is still in progress.")));
        }
        Ok(Staged::begin(&mut state.busy, |busy| *busy = Some(action)))
    }

    /// Signed-in non-owner viewing an approved item, or the reason why not.
    fn actionable_item(&self, what: &str) -> Result<(User, Item)> {
        let user = self
            .session
            .user()
            .ok_or_else(|| AppError::Access(format!("Please sign in to {what}.")))?;
        let item = self
            .item()
            .ok_or_else(|| AppError::State("Item is not loaded.".to_string()))?;

        if item.is_owned_by(user.id) {
            return Err(AppError::Access("This is your own item.".to_string()));
        }
        if item.status != ItemStatus::Approved {
            return Err(AppError::State(format!("Item is {} and not available.", item.status)));
        }
        Ok((user, item))
    }
}
