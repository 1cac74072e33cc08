//! Scripted [`MarketplaceApi`] for unit tests.
//!
//! Each operation pops the next queued result; an operation with nothing queued
//! fails with a network error so a missing script shows up as a test failure.
//! Every call is recorded by name (with its id where it has one).

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{
    AdminStats, Category, CreateSwapRequest, CreatedItem, Item, ItemId, ItemQuery, ItemStatus,
    ItemsPayload, ListingType, ProfileUpdate, RedeemPayload, Reply, Role, SendMessageRequest,
    SwapInboxPayload, SwapRequest, SwapRequestId, User,
};

use super::error::ApiError;
use super::service::{ApiResult, MarketplaceApi};
use crate::services::api::ItemSubmission;

/// Queue of scripted results, each optionally delayed.
pub(crate) struct Script<T> {
    queue: Mutex<VecDeque<(Duration, ApiResult<T>)>>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
        }
    }
}

impl<T> Script<T> {
    pub(crate) fn push(&self, result: ApiResult<T>) {
        self.queue.lock().push_back((Duration::ZERO, result));
    }

    pub(crate) fn push_delayed(&self, delay: Duration, result: ApiResult<T>) {
        self.queue.lock().push_back((delay, result));
    }

    async fn next(&self, operation: &str) -> ApiResult<T> {
        let scripted = self.queue.lock().pop_front();
        match scripted {
            Some((delay, result)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Err(ApiError::Network {
                message: format!("no scripted response for {operation}"),
            }),
        }
    }
}

#[derive(Default)]
pub(crate) struct MockApi {
    pub calls: Mutex<Vec<String>>,
    pub item_queries: Mutex<Vec<ItemQuery>>,
    pub submissions: Mutex<Vec<ItemSubmission>>,
    pub reject_reasons: Mutex<Vec<String>>,
    pub swap_bodies: Mutex<Vec<CreateSwapRequest>>,
    pub messages: Mutex<Vec<SendMessageRequest>>,

    pub login: Script<Reply<User>>,
    pub register: Script<Reply<User>>,
    pub logout: Script<Reply<()>>,
    pub current_user: Script<User>,
    pub profile: Script<User>,
    pub update_profile: Script<Reply<User>>,
    pub user_items: Script<Vec<Item>>,
    pub items: Script<ItemsPayload>,
    pub item: Script<Item>,
    pub create_item: Script<Reply<CreatedItem>>,
    pub redeem: Script<Reply<RedeemPayload>>,
    pub categories: Script<Vec<Category>>,
    pub pending: Script<Vec<Item>>,
    pub stats: Script<AdminStats>,
    pub approve: Script<Reply<()>>,
    pub reject: Script<Reply<()>>,
    pub create_swap: Script<Reply<Option<SwapRequest>>>,
    pub swap_inbox: Script<SwapInboxPayload>,
    pub accept_swap: Script<Reply<Option<SwapRequest>>>,
    pub reject_swap: Script<Reply<Option<SwapRequest>>>,
    pub message: Script<Reply<()>>,
}

impl MockApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub(crate) fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.split('(').next() == Some(operation))
            .count()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }
}

#[async_trait]
impl MarketplaceApi for MockApi {
    async fn login(&self, email: &str, _password: &str) -> ApiResult<Reply<User>> {
        self.record(format!("login({email})"));
        self.login.next("login").await
    }

    async fn register(&self, email: &str, _password: &str, _name: &str) -> ApiResult<Reply<User>> {
        self.record(format!("register({email})"));
        self.register.next("register").await
    }

    async fn logout(&self) -> ApiResult<Reply<()>> {
        self.record("logout");
        self.logout.next("logout").await
    }

    async fn current_user(&self) -> ApiResult<User> {
        self.record("current_user");
        self.current_user.next("current_user").await
    }

    async fn get_profile(&self) -> ApiResult<User> {
        self.record("get_profile");
        self.profile.next("get_profile").await
    }

    async fn update_profile(&self, _update: &ProfileUpdate) -> ApiResult<Reply<User>> {
        self.record("update_profile");
        self.update_profile.next("update_profile").await
    }

    async fn get_user_items(&self) -> ApiResult<Vec<Item>> {
        self.record("get_user_items");
        self.user_items.next("get_user_items").await
    }

    async fn get_items(&self, query: &ItemQuery) -> ApiResult<ItemsPayload> {
        self.record(format!("get_items({})", query.to_query_string()));
        self.item_queries.lock().push(query.clone());
        self.items.next("get_items").await
    }

    async fn get_item(&self, id: ItemId) -> ApiResult<Item> {
        self.record(format!("get_item({id})"));
        self.item.next("get_item").await
    }

    async fn create_item(&self, submission: ItemSubmission) -> ApiResult<Reply<CreatedItem>> {
        self.record("create_item");
        self.submissions.lock().push(submission);
        self.create_item.next("create_item").await
    }

    async fn redeem_item(&self, id: ItemId) -> ApiResult<Reply<RedeemPayload>> {
        self.record(format!("redeem_item({id})"));
        self.redeem.next("redeem_item").await
    }

    async fn get_categories(&self) -> ApiResult<Vec<Category>> {
        self.record("get_categories");
        self.categories.next("get_categories").await
    }

    async fn get_pending_items(&self) -> ApiResult<Vec<Item>> {
        self.record("get_pending_items");
        self.pending.next("get_pending_items").await
    }

    async fn get_admin_stats(&self) -> ApiResult<AdminStats> {
        self.record("get_admin_stats");
        self.stats.next("get_admin_stats").await
    }

    async fn approve_item(&self, id: ItemId) -> ApiResult<Reply<()>> {
        self.record(format!("approve_item({id})"));
        self.approve.next("approve_item").await
    }

    async fn reject_item(&self, id: ItemId, reason: &str) -> ApiResult<Reply<()>> {
        self.record(format!("reject_item({id})"));
        self.reject_reasons.lock().push(reason.to_string());
        self.reject.next("reject_item").await
    }

    async fn create_swap_request(
        &self,
        request: &CreateSwapRequest,
    ) -> ApiResult<Reply<Option<SwapRequest>>> {
        self.record(format!("create_swap_request({})", request.item_id));
        self.swap_bodies.lock().push(request.clone());
        self.create_swap.next("create_swap_request").await
    }

    async fn list_swap_requests(&self) -> ApiResult<SwapInboxPayload> {
        self.record("list_swap_requests");
        self.swap_inbox.next("list_swap_requests").await
    }

    async fn accept_swap_request(
        &self,
        id: SwapRequestId,
    ) -> ApiResult<Reply<Option<SwapRequest>>> {
        self.record(format!("accept_swap_request({id})"));
        self.accept_swap.next("accept_swap_request").await
    }

    async fn reject_swap_request(
        &self,
        id: SwapRequestId,
    ) -> ApiResult<Reply<Option<SwapRequest>>> {
        self.record(format!("reject_swap_request({id})"));
        self.reject_swap.next("reject_swap_request").await
    }

    async fn send_message(&self, message: &SendMessageRequest) -> ApiResult<Reply<()>> {
        self.record(format!("send_message({})", message.recipient_id));
        self.messages.lock().push(message.clone());
        self.message.next("send_message").await
    }
}

// ==================== FIXTURES ====================

pub(crate) fn user(id: i64, points: u32) -> User {
    User {
        id,
        email: format!("user{id}@example.com"),
        name: format!("User {id}"),
        points,
        role: Role::User,
        avatar: None,
        bio: None,
        location: None,
        created_at: None,
        stats: None,
    }
}

pub(crate) fn admin(id: i64) -> User {
    User {
        role: Role::Admin,
        ..user(id, 0)
    }
}

pub(crate) fn item(id: ItemId, owner_id: i64, points: u32, status: ItemStatus) -> Item {
    Item {
        id,
        title: format!("Item {id}"),
        description: "A well kept garment".to_string(),
        category: Some("Tops".to_string()),
        item_type: "Casual".to_string(),
        size: "M".to_string(),
        condition: "Good".to_string(),
        points,
        status,
        views: 0,
        likes: 0,
        created_at: None,
        owner: Some(user(owner_id, 0)),
        images: vec![format!("item{id}_a.jpg"), format!("item{id}_b.jpg")],
        tags: vec!["cotton".to_string()],
        listing_type: ListingType::Swap,
        primary_image: None,
        has_bill: true,
        bill_path: Some(format!("bill{id}.pdf")),
    }
}

pub(crate) fn rejected(message: &str) -> ApiError {
    ApiError::Rejected {
        status: 200,
        message: Some(message.to_string()),
    }
}

pub(crate) fn http(status: u16, message: Option<&str>) -> ApiError {
    ApiError::Http {
        status,
        message: message.map(str::to_string),
        body: serde_json::Value::Null,
    }
}

pub(crate) fn reply<T>(message: &str, data: T) -> Reply<T> {
    Reply::new(Some(message.to_string()), data)
}
