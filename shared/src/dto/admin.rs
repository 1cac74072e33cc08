//! # Moderation DTOs

use serde::{Deserialize, Serialize};

/// Reason sent when an admin rejects an item without typing one.
pub const DEFAULT_REJECT_REASON: &str = "Item does not meet our guidelines";

/// Aggregate counters shown on the moderation console.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminStats {
    #[serde(default)]
    pub pending_items: u32,
    #[serde(default)]
    pub approved_items: u32,
    #[serde(default)]
    pub total_users: u32,
    #[serde(default)]
    pub total_swaps: u32,
    #[serde(default)]
    pub reports: u32,
}

/// `{ stats }` payload of `GET /admin/stats`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsPayload {
    pub stats: AdminStats,
}

/// Body of `POST /admin/items/:id/reject`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RejectRequest {
    pub reason: String,
}
