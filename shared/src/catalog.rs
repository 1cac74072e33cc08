//! # Catalog
//!
//! Fixed picker values and the point valuation rule the backend applies when an
//! item is created.

/// Categories offered on the add-item form.
pub const CATEGORIES: [&str; 8] = [
    "Tops",
    "Bottoms",
    "Dresses",
    "Outerwear",
    "Shoes",
    "Accessories",
    "Bags",
    "Jewelry",
];

/// Conditions, best first.
pub const CONDITIONS: [&str; 4] = ["Like New", "Excellent", "Good", "Fair"];

pub const SIZES: [&str; 12] = [
    "XS", "S", "M", "L", "XL", "XXL", "6", "8", "10", "12", "14", "16",
];

/// Base points for unknown categories.
const DEFAULT_BASE_POINTS: u32 = 15;

fn base_points(category: &str) -> u32 {
    match category {
        "Tops" | "Accessories" => 10,
        "Bottoms" | "Bags" => 15,
        "Dresses" | "Shoes" => 20,
        "Outerwear" => 25,
        "Jewelry" => 12,
        _ => DEFAULT_BASE_POINTS,
    }
}

/// Condition multiplier in tenths, so the estimate stays in integer arithmetic.
fn condition_tenths(condition: &str) -> u32 {
    match condition {
        "Like New" => 15,
        "Excellent" => 13,
        "Fair" => 7,
        _ => 10,
    }
}

/// Preview of the points an item will be valued at.
///
/// The server computes the authoritative value at creation; this mirrors its
/// rule (category base times condition multiplier, truncated).
pub fn estimate_item_points(category: &str, condition: &str) -> u32 {
    base_points(category) * condition_tenths(condition) / 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_matches_backend_rule() {
        assert_eq!(estimate_item_points("Outerwear", "Like New"), 37);
        assert_eq!(estimate_item_points("Outerwear", "Excellent"), 32);
        assert_eq!(estimate_item_points("Tops", "Fair"), 7);
        assert_eq!(estimate_item_points("Jewelry", "Good"), 12);
        assert_eq!(estimate_item_points("Hats", "Mint"), 15);
    }
}
