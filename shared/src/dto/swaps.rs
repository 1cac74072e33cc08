//! # Swap and Redemption DTOs
//!
//! Defines request and response structures for swap requests and direct
//! point redemption.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::auth::{User, UserId};
use super::items::{Item, ItemId};

/// Backend identifier of a swap request.
pub type SwapRequestId = i64;

/// Lifecycle of a swap request; only the item owner moves it out of `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

/// A proposal from one user to take another user's item for points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwapRequest {
    pub id: SwapRequestId,
    pub item_id: ItemId,
    pub requester_id: UserId,
    pub owner_id: UserId,
    #[serde(default)]
    pub points_offered: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
    pub status: SwapStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<User>,
}

/// Body of `POST /swap-requests`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateSwapRequest {
    pub item_id: ItemId,
    pub points_offered: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `{ swap_request? }` payload of the swap create/accept/reject endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwapRequestPayload {
    #[serde(default)]
    pub swap_request: Option<SwapRequest>,
}

/// `{ incoming, outgoing }` payload of `GET /swap-requests`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwapInboxPayload {
    #[serde(default)]
    pub incoming: Vec<SwapRequest>,
    #[serde(default)]
    pub outgoing: Vec<SwapRequest>,
}

/// Payload of `POST /items/:id/redeem`: the redeeming user's balance after the debit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RedeemPayload {
    #[serde(alias = "new_balance")]
    pub user_points: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redeem_payload_accepts_either_balance_key() {
        let a: RedeemPayload =
            serde_json::from_value(serde_json::json!({ "user_points": 5 })).unwrap();
        let b: RedeemPayload =
            serde_json::from_value(serde_json::json!({ "new_balance": 5 })).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_create_swap_request_skips_empty_message() {
        let body = CreateSwapRequest { item_id: 9, points_offered: 25, message: None };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "item_id": 9, "points_offered": 25 })
        );
    }
}
