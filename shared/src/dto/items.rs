//! # Item Listing DTOs
//!
//! Listings, their moderation lifecycle, list queries and the payloads of the
//! `/items` and `/categories` endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::auth::{User, UserId};

/// Backend identifier of an item.
pub type ItemId = i64;

/// Sentinel used by filter pickers to mean "no constraint".
pub const ALL_FILTER: &str = "All";

/// Moderation lifecycle of an item.
///
/// `Pending` → `Approved` | `Rejected` by an admin; `Approved` → `Swapped` by a
/// redemption or an accepted swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Approved,
    Rejected,
    Swapped,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Approved => "approved",
            ItemStatus::Rejected => "rejected",
            ItemStatus::Swapped => "swapped",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an item is offered for a points swap or given away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    #[default]
    Swap,
    Donation,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Swap => "swap",
            ListingType::Donation => "donation",
        }
    }

    /// A swap listing must carry a purchase bill; a donation need not.
    pub fn requires_bill(&self) -> bool {
        matches!(self, ListingType::Swap)
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ListingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "swap" => Ok(ListingType::Swap),
            "donation" => Ok(ListingType::Donation),
            other => Err(format!("unknown listing type: {other}")),
        }
    }
}

/// A clothing listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Garment subtype (e.g. "Casual"), sent as `type` on the wire.
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub condition: String,
    pub points: u32,
    pub status: ItemStatus,
    #[serde(default)]
    pub views: u32,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub owner: Option<User>,
    /// Image file names under `/uploads/items/`, primary image first.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub listing_type: ListingType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_image: Option<String>,
    #[serde(default)]
    pub has_bill: bool,
    /// Bill file name under `/uploads/bills/`; only exposed to admins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_path: Option<String>,
}

impl Item {
    pub fn owner_id(&self) -> Option<UserId> {
        self.owner.as_ref().map(|owner| owner.id)
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id() == Some(user_id)
    }

    /// Image shown on cards: the flagged primary image, else the first one.
    pub fn cover_image(&self) -> Option<&str> {
        self.primary_image
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }
}

/// Category row from `GET /categories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Page metadata returned by `GET /items`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
    pub total: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// `{ items, pagination? }` payload of the item list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemsPayload {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// `{ item }` payload of `GET /items/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemPayload {
    pub item: Item,
}

/// `{ categories }` payload of `GET /categories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoriesPayload {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Summary of a freshly submitted item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedItem {
    pub id: ItemId,
    pub title: String,
    pub status: ItemStatus,
    pub points: u32,
}

/// `{ item }` payload of `POST /items`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedItemPayload {
    pub item: CreatedItem,
}

/// Query parameters of `GET /items`.
///
/// Filter setters drop the `"All"` sentinel and blank values, so a query built
/// from picker state never sends a constraint the user did not choose.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    pub category: Option<String>,
    pub condition: Option<String>,
    pub size: Option<String>,
    pub search: Option<String>,
    pub listing_type: Option<ListingType>,
    pub status: Option<ItemStatus>,
    pub per_page: Option<u32>,
}

impl ItemQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, value: &str) -> Self {
        self.category = filter_value(value);
        self
    }

    pub fn condition(mut self, value: &str) -> Self {
        self.condition = filter_value(value);
        self
    }

    pub fn size(mut self, value: &str) -> Self {
        self.size = filter_value(value);
        self
    }

    pub fn search(mut self, value: &str) -> Self {
        let trimmed = value.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn listing_type(mut self, value: ListingType) -> Self {
        self.listing_type = Some(value);
        self
    }

    pub fn status(mut self, value: ItemStatus) -> Self {
        self.status = Some(value);
        self
    }

    pub fn per_page(mut self, value: u32) -> Self {
        self.per_page = Some(value);
        self
    }

    /// Key/value pairs in a stable order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(condition) = &self.condition {
            pairs.push(("condition", condition.clone()));
        }
        if let Some(size) = &self.size {
            pairs.push(("size", size.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(listing_type) = self.listing_type {
            pairs.push(("listing_type", listing_type.as_str().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs
    }

    /// Form-urlencoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }
}

fn filter_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == ALL_FILTER {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_omits_all_and_blank_filters() {
        let query = ItemQuery::new()
            .category(ALL_FILTER)
            .condition("")
            .size("All")
            .search("   ");
        assert!(query.pairs().is_empty());
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn test_query_keeps_chosen_filters_and_encodes_them() {
        let query = ItemQuery::new()
            .category("Outerwear")
            .condition("Like New")
            .size("All")
            .search(" denim jacket ");
        assert_eq!(
            query.to_query_string(),
            "category=Outerwear&condition=Like+New&search=denim+jacket"
        );
    }

    #[test]
    fn test_query_never_contains_sentinel_for_any_combination() {
        let categories = [ALL_FILTER, "Tops", ""];
        let conditions = [ALL_FILTER, "Good"];
        let sizes = [ALL_FILTER, "M", ""];
        for category in categories {
            for condition in conditions {
                for size in sizes {
                    let qs = ItemQuery::new()
                        .category(category)
                        .condition(condition)
                        .size(size)
                        .to_query_string();
                    assert!(!qs.contains("All"), "sentinel leaked into {qs}");
                    assert!(!qs.contains("=&") && !qs.ends_with('='), "empty value in {qs}");
                }
            }
        }
    }

    #[test]
    fn test_item_decodes_with_type_rename_and_defaults() {
        let json = serde_json::json!({
            "id": 42,
            "title": "Wool coat",
            "description": "Warm",
            "category": "Outerwear",
            "type": "Formal",
            "size": "L",
            "condition": "Good",
            "points": 25,
            "status": "pending",
            "images": ["a.jpg", "b.jpg"],
            "tags": ["wool"]
        });
        let item: Item = serde_json::from_value(json).unwrap();
        assert_eq!(item.item_type, "Formal");
        assert_eq!(item.status, ItemStatus::Pending);
        assert_eq!(item.listing_type, ListingType::Swap);
        assert_eq!(item.cover_image(), Some("a.jpg"));
        assert!(!item.has_bill);
    }

    #[test]
    fn test_listing_type_parses_case_insensitively() {
        assert_eq!("Donation".parse::<ListingType>(), Ok(ListingType::Donation));
        assert!("gift".parse::<ListingType>().is_err());
        assert!(ListingType::Swap.requires_bill());
        assert!(!ListingType::Donation.requires_bill());
    }
}
