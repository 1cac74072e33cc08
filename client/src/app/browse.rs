//! # Item Listing / Filter View
//!
//! Fetches `GET /items` for the current filter set and exposes the result as a
//! [`ListPhase`] plus the fetched items.
//!
//! ## Request ordering
//!
//! ```text
//! set_search("d")   ─ ticket 1 ─ sleep(debounce) ─ newer ticket exists → Superseded
//! set_search("de")  ─ ticket 2 ─ sleep(debounce) ─ newer ticket exists → Superseded
//! set_search("den") ─ ticket 3 ─ sleep(debounce) ─ GET /items?search=den
//!                                                   └─ ticket 3 still newest → Applied
//! ```
//!
//! Every filter change takes a ticket from a monotonically increasing sequence.
//! A change that is overtaken during the debounce window never hits the network;
//! a response that arrives after a newer ticket was issued is discarded, so an
//! earlier slow request can never overwrite a later one.
//!
//! ## Variants
//!
//! [`BrowseVariant::Partitioned`] shows the same fetched collection split into
//! `swap` and `donation` tabs, each with its own like set.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use shared::{Item, ItemId, ItemQuery, ListingType, ALL_FILTER};

use super::notifications::Notifier;
use crate::config::ClientConfig;
use crate::core::service::MarketplaceApi;

pub const ITEMS_LOAD_FALLBACK: &str = "Failed to load items. Please try again.";

/// Filter picker state. Pickers hold `"All"` when unconstrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseFilters {
    pub search: String,
    pub category: String,
    pub condition: String,
    pub size: String,
}

impl Default for BrowseFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_FILTER.to_string(),
            condition: ALL_FILTER.to_string(),
            size: ALL_FILTER.to_string(),
        }
    }
}

impl BrowseFilters {
    pub fn to_query(&self) -> ItemQuery {
        ItemQuery::new()
            .category(&self.category)
            .condition(&self.condition)
            .size(&self.size)
            .search(&self.search)
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowseVariant {
    #[default]
    Single,
    /// Split into `swap` / `donation` tabs.
    Partitioned,
}

#[derive(Debug, Clone, Copy)]
pub struct BrowseConfig {
    pub debounce: Duration,
    pub variant: BrowseVariant,
}

impl BrowseConfig {
    pub fn from_client(config: &ClientConfig, variant: BrowseVariant) -> Self {
        Self {
            debounce: config.search_debounce,
            variant,
        }
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self::from_client(&ClientConfig::default(), BrowseVariant::Single)
    }
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Loaded,
    /// The fetch succeeded with zero results.
    Empty,
    Failed(String),
}

/// Whether a filter change ended up on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer change was issued before this one completed.
    Superseded,
}

#[derive(Debug)]
struct BrowseState {
    filters: BrowseFilters,
    phase: ListPhase,
    items: Vec<Item>,
    categories: Vec<String>,
    tab: ListingType,
    liked: HashMap<ListingType, HashSet<ItemId>>,
}

pub struct BrowseView {
    api: Arc<dyn MarketplaceApi>,
    notifier: Notifier,
    config: BrowseConfig,
    seq: AtomicU64,
    state: Mutex<BrowseState>,
}

impl BrowseView {
    pub fn new(api: Arc<dyn MarketplaceApi>, notifier: Notifier, config: BrowseConfig) -> Self {
        Self {
            api,
            notifier,
            config,
            seq: AtomicU64::new(0),
            state: Mutex::new(BrowseState {
                filters: BrowseFilters::default(),
                phase: ListPhase::Loading,
                items: Vec::new(),
                categories: vec![ALL_FILTER.to_string()],
                tab: ListingType::Swap,
                liked: HashMap::new(),
            }),
        }
    }

    /// Fill the category picker. A failure only leaves `["All"]`.
    pub async fn load_categories(&self) {
        match self.api.get_categories().await {
            Ok(categories) => {
                let mut names = vec![ALL_FILTER.to_string()];
                names.extend(categories.into_iter().map(|category| category.name));
                self.state.lock().categories = names;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load categories"),
        }
    }

    /// Apply a filter change, wait out the debounce window, then fetch.
    pub async fn update_filters(&self, change: impl FnOnce(&mut BrowseFilters)) -> FetchOutcome {
        {
            let mut state = self.state.lock();
            change(&mut state.filters);
            state.phase = ListPhase::Loading;
        }
        let ticket = self.next_ticket();

        if !self.config.debounce.is_zero() {
            tokio::time::sleep(self.config.debounce).await;
        }
        if !self.is_latest(ticket) {
            tracing::trace!(ticket, "Filter change debounced");
            return FetchOutcome::Superseded;
        }

        self.fetch(ticket).await
    }

    pub async fn set_search(&self, search: &str) -> FetchOutcome {
        let search = search.to_string();
        self.update_filters(|filters| filters.search = search).await
    }

    pub async fn set_category(&self, category: &str) -> FetchOutcome {
        let category = category.to_string();
        self.update_filters(|filters| filters.category = category).await
    }

    pub async fn set_condition(&self, condition: &str) -> FetchOutcome {
        let condition = condition.to_string();
        self.update_filters(|filters| filters.condition = condition).await
    }

    pub async fn set_size(&self, size: &str) -> FetchOutcome {
        let size = size.to_string();
        self.update_filters(|filters| filters.size = size).await
    }

    pub async fn clear_filters(&self) -> FetchOutcome {
        self.update_filters(|filters| *filters = BrowseFilters::default()).await
    }

    /// Fetch immediately with the current filters (initial load, retry).
    pub async fn refresh(&self) -> FetchOutcome {
        self.state.lock().phase = ListPhase::Loading;
        let ticket = self.next_ticket();
        self.fetch(ticket).await
    }

    async fn fetch(&self, ticket: u64) -> FetchOutcome {
        let query = self.state.lock().filters.to_query();
        let result = self.api.get_items(&query).await;

        if !self.is_latest(ticket) {
            tracing::debug!(ticket, "Discarded stale item list response");
            return FetchOutcome::Superseded;
        }

        let mut state = self.state.lock();
        match result {
            Ok(payload) => {
                tracing::debug!(ticket, count = payload.items.len(), "Item list applied");
                state.phase = if payload.items.is_empty() {
                    ListPhase::Empty
                } else {
                    ListPhase::Loaded
                };
                state.items = payload.items;
            }
            Err(e) => {
                tracing::warn!(ticket, error = %e, "Failed to load items");
                let message = e.user_message(ITEMS_LOAD_FALLBACK);
                state.items.clear();
                state.phase = ListPhase::Failed(message.clone());
                self.notifier.error("Error", message);
            }
        }
        FetchOutcome::Applied
    }

    fn next_ticket(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == ticket
    }

    // ==================== ACCESSORS ====================

    pub fn filters(&self) -> BrowseFilters {
        self.state.lock().filters.clone()
    }

    pub fn categories(&self) -> Vec<String> {
        self.state.lock().categories.clone()
    }

    /// Phase of what is currently visible. In the partitioned variant a loaded
    /// collection with nothing in the active tab reads as `Empty`.
    pub fn phase(&self) -> ListPhase {
        let state = self.state.lock();
        match (&state.phase, self.config.variant) {
            (ListPhase::Loaded, BrowseVariant::Partitioned)
                if !state.items.iter().any(|item| item.listing_type == state.tab) =>
            {
                ListPhase::Empty
            }
            (phase, _) => phase.clone(),
        }
    }

    /// Items shown right now: everything, or the active tab's share.
    pub fn visible_items(&self) -> Vec<Item> {
        let state = self.state.lock();
        match self.config.variant {
            BrowseVariant::Single => state.items.clone(),
            BrowseVariant::Partitioned => Self::partition(&state.items, state.tab),
        }
    }

    // ==================== TABS ====================

    pub fn tab(&self) -> ListingType {
        self.state.lock().tab
    }

    pub fn set_tab(&self, tab: ListingType) {
        self.state.lock().tab = tab;
    }

    pub fn items_for_tab(&self, tab: ListingType) -> Vec<Item> {
        Self::partition(&self.state.lock().items, tab)
    }

    /// Flip the like mark of `item_id` in the active tab. Returns the new mark.
    pub fn toggle_like(&self, item_id: ItemId) -> bool {
        let mut state = self.state.lock();
        let tab = state.tab;
        let liked = state.liked.entry(tab).or_default();
        if liked.remove(&item_id) {
            false
        } else {
            liked.insert(item_id);
            true
        }
    }

    pub fn is_liked(&self, tab: ListingType, item_id: ItemId) -> bool {
        self.state
            .lock()
            .liked
            .get(&tab)
            .is_some_and(|liked| liked.contains(&item_id))
    }

    fn partition(items: &[Item], tab: ListingType) -> Vec<Item> {
        items
            .iter()
            .filter(|item| item.listing_type == tab)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::notifications::drain;
    use crate::core::mock::{self, MockApi};
    use shared::{Category, ItemStatus, ItemsPayload};

    fn payload(ids: &[ItemId]) -> ItemsPayload {
        ItemsPayload {
            items: ids
                .iter()
                .map(|&id| mock::item(id, 2, 10, ItemStatus::Approved))
                .collect(),
            pagination: None,
        }
    }

    fn view(
        api: &Arc<MockApi>,
        variant: BrowseVariant,
    ) -> (BrowseView, async_channel::Receiver<crate::app::notifications::Toast>) {
        let (notifier, rx) = Notifier::channel();
        let config = BrowseConfig {
            debounce: Duration::from_millis(300),
            variant,
        };
        (BrowseView::new(api.clone(), notifier, config), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_sentinel_filters_never_reach_the_query() {
        let api = Arc::new(MockApi::new());
        api.items.push(Ok(payload(&[1])));
        api.items.push(Ok(payload(&[1])));
        let (view, _rx) = view(&api, BrowseVariant::Single);

        view.refresh().await;
        view.set_size("M").await;

        let calls = api.calls();
        assert_eq!(calls[0], "get_items()");
        assert_eq!(calls[1], "get_items(size=M)");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_collapses_into_one_fetch() {
        let api = Arc::new(MockApi::new());
        api.items.push(Ok(payload(&[5])));
        let (view, _rx) = view(&api, BrowseVariant::Single);

        let (a, b, c) = tokio::join!(
            view.set_search("d"),
            view.set_search("de"),
            view.set_search("den"),
        );
        assert_eq!(a, FetchOutcome::Superseded);
        assert_eq!(b, FetchOutcome::Superseded);
        assert_eq!(c, FetchOutcome::Applied);
        assert_eq!(api.count("get_items"), 1);
        assert_eq!(api.item_queries.lock()[0].search.as_deref(), Some("den"));
        assert_eq!(view.phase(), ListPhase::Loaded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_earlier_response_does_not_overwrite_newer_one() {
        let api = Arc::new(MockApi::new());
        api.items.push_delayed(Duration::from_millis(800), Ok(payload(&[1, 2, 3])));
        api.items.push_delayed(Duration::from_millis(20), Ok(payload(&[9])));
        let (view, _rx) = view(&api, BrowseVariant::Single);

        let (first, second) = tokio::join!(view.refresh(), async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            view.set_category("Shoes").await
        });

        assert_eq!(first, FetchOutcome::Superseded);
        assert_eq!(second, FetchOutcome::Applied);
        let ids: Vec<ItemId> = view.visible_items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![9]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_and_failed_states_are_distinct() {
        let api = Arc::new(MockApi::new());
        api.items.push(Ok(payload(&[])));
        api.items.push(Err(mock::http(500, None)));
        api.items.push(Err(mock::rejected("Search is temporarily unavailable.")));
        let (view, rx) = view(&api, BrowseVariant::Single);

        assert_eq!(view.phase(), ListPhase::Loading);
        view.refresh().await;
        assert_eq!(view.phase(), ListPhase::Empty);

        view.refresh().await;
        assert_eq!(view.phase(), ListPhase::Failed(ITEMS_LOAD_FALLBACK.to_string()));

        view.refresh().await;
        assert_eq!(
            view.phase(),
            ListPhase::Failed("Search is temporarily unavailable.".to_string())
        );
        assert!(drain(&rx).iter().all(|toast| toast.is_destructive()));
    }

    #[tokio::test]
    async fn test_categories_prepend_all_and_survive_failure() {
        let api = Arc::new(MockApi::new());
        api.categories.push(Err(mock::http(500, None)));
        api.categories.push(Ok(vec![Category {
            id: 1,
            name: "Tops".to_string(),
            description: None,
        }]));
        let (view, _rx) = view(&api, BrowseVariant::Single);

        view.load_categories().await;
        assert_eq!(view.categories(), vec!["All"]);
        view.load_categories().await;
        assert_eq!(view.categories(), vec!["All", "Tops"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partitioned_tabs_split_items_and_likes() {
        let api = Arc::new(MockApi::new());
        let mut items = payload(&[1, 2, 3]);
        items.items[2].listing_type = ListingType::Donation;
        api.items.push(Ok(items));
        let (view, _rx) = view(&api, BrowseVariant::Partitioned);

        view.refresh().await;
        assert_eq!(view.items_for_tab(ListingType::Swap).len(), 2);
        assert_eq!(view.items_for_tab(ListingType::Donation).len(), 1);

        assert!(view.toggle_like(1));
        view.set_tab(ListingType::Donation);
        assert_eq!(view.visible_items()[0].id, 3);
        assert!(!view.is_liked(ListingType::Donation, 1));
        assert!(view.is_liked(ListingType::Swap, 1));

        view.set_tab(ListingType::Swap);
        assert!(!view.toggle_like(1));
        assert!(!view.is_liked(ListingType::Swap, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_partitioned_tab_without_items_reads_empty() {
        let api = Arc::new(MockApi::new());
        api.items.push(Ok(payload(&[1])));
        let (view, _rx) = view(&api, BrowseVariant::Partitioned);

        view.refresh().await;
        assert_eq!(view.phase(), ListPhase::Loaded);
        view.set_tab(ListingType::Donation);
        assert_eq!(view.phase(), ListPhase::Empty);
    }

    #[test]
    fn test_default_filters_build_an_empty_query() {
        let filters = BrowseFilters::default();
        assert!(filters.is_default());
        assert_eq!(filters.to_query(), ItemQuery::new());
    }
}
