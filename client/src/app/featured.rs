//! Featured listings on the landing page: the latest approved items, shown
//! three at a time in a wrapping slider.

use std::sync::Arc;

use parking_lot::Mutex;
use shared::{Item, ItemQuery, ItemStatus};

use super::carousel::Carousel;
use super::Route;
use crate::core::service::MarketplaceApi;

pub const FEATURED_COUNT: u32 = 6;
pub const ITEMS_PER_SLIDE: usize = 3;

#[derive(Debug)]
struct FeaturedState {
    loading: bool,
    items: Vec<Item>,
    slides: Carousel,
}

pub struct FeaturedShowcase {
    api: Arc<dyn MarketplaceApi>,
    state: Mutex<FeaturedState>,
}

impl FeaturedShowcase {
    pub fn new(api: Arc<dyn MarketplaceApi>) -> Self {
        Self {
            api,
            state: Mutex::new(FeaturedState {
                loading: true,
                items: Vec::new(),
                slides: Carousel::default(),
            }),
        }
    }

    pub fn query() -> ItemQuery {
        ItemQuery::new()
            .status(ItemStatus::Approved)
            .per_page(FEATURED_COUNT)
    }

    /// Fetch the showcase. A failure only leaves it empty; the landing page
    /// renders without it.
    pub async fn load(&self) -> usize {
        let result = self.api.get_items(&Self::query()).await;

        let mut state = self.state.lock();
        match result {
            Ok(payload) => {
                state.slides = Carousel::new(payload.items.len().div_ceil(ITEMS_PER_SLIDE));
                state.items = payload.items;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch featured items");
            }
        }
        state.loading = false;
        state.items.len()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn items(&self) -> Vec<Item> {
        self.state.lock().items.clone()
    }

    pub fn slides(&self) -> Carousel {
        self.state.lock().slides
    }

    pub fn next_slide(&self) {
        self.state.lock().slides.next();
    }

    pub fn prev_slide(&self) {
        self.state.lock().slides.prev();
    }

    /// Items on the current slide.
    pub fn visible_items(&self) -> Vec<Item> {
        let state = self.state.lock();
        state
            .items
            .iter()
            .skip(state.slides.index() * ITEMS_PER_SLIDE)
            .take(ITEMS_PER_SLIDE)
            .cloned()
            .collect()
    }

    /// Detail page of a featured item.
    pub fn route_for(item: &Item) -> Route {
        Route::Item(item.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock::{self, MockApi};
    use shared::ItemsPayload;

    fn payload(ids: std::ops::RangeInclusive<i64>) -> ItemsPayload {
        ItemsPayload {
            items: ids.map(|id| mock::item(id, 2, 10, ItemStatus::Approved)).collect(),
            pagination: None,
        }
    }

    #[tokio::test]
    async fn test_asks_for_six_approved_items() {
        let api = Arc::new(MockApi::new());
        api.items.push(Ok(payload(1..=6)));
        let showcase = FeaturedShowcase::new(api.clone());
        assert!(showcase.is_loading());

        assert_eq!(showcase.load().await, 6);
        assert!(!showcase.is_loading());
        assert_eq!(api.calls(), vec!["get_items(status=approved&per_page=6)"]);
    }

    #[tokio::test]
    async fn test_slides_show_three_items_and_wrap() {
        let api = Arc::new(MockApi::new());
        api.items.push(Ok(payload(1..=5)));
        let showcase = FeaturedShowcase::new(api.clone());
        showcase.load().await;

        assert_eq!(showcase.slides().len(), 2);
        let ids = |items: Vec<Item>| items.iter().map(|item| item.id).collect::<Vec<_>>();
        assert_eq!(ids(showcase.visible_items()), vec![1, 2, 3]);
        showcase.next_slide();
        assert_eq!(ids(showcase.visible_items()), vec![4, 5]);
        showcase.next_slide();
        assert_eq!(ids(showcase.visible_items()), vec![1, 2, 3]);
        showcase.prev_slide();
        assert_eq!(showcase.slides().label(), "2 / 2");
        assert_eq!(FeaturedShowcase::route_for(&showcase.items()[3]).path(), "/item/4");
    }

    #[tokio::test]
    async fn test_failure_leaves_showcase_empty() {
        let api = Arc::new(MockApi::new());
        api.items.push(Err(mock::http(500, None)));
        let showcase = FeaturedShowcase::new(api.clone());

        assert_eq!(showcase.load().await, 0);
        assert!(!showcase.is_loading());
        assert!(showcase.visible_items().is_empty());
    }
}
