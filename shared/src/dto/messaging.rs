//! # Messaging Data Transfer Objects

use serde::{Deserialize, Serialize};

use super::auth::UserId;
use super::items::ItemId;

/// Body of `POST /messages`: a direct message, optionally about an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendMessageRequest {
    pub recipient_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    pub content: String,
}
