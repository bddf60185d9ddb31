//! Product entity - items listed in the storefront catalogue.
//!
//! Products carry a fixed category, a unit price and a stock count. The admin
//! console creates them through [`NewProduct`] and edits them through
//! [`ProductPatch`]; neither input type can touch `id` or the timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base URL used to build an image when the product has none.
pub const PLACEHOLDER_IMAGE_BASE: &str = "https://via.placeholder.com/300x200";

/// Catalogue category. The set is fixed; anything else is rejected on input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Game controllers
    Manettes,
    /// Accessories
    Accessoires,
    /// Monitors
    Moniteurs,
    /// Earbuds
    Airpods,
    /// Cables and adapters
    Cables,
    /// Vaping products
    Vape,
}

impl Category {
    /// Every category, in the order the console offers them.
    pub const ALL: [Self; 6] = [
        Self::Manettes,
        Self::Accessoires,
        Self::Moniteurs,
        Self::Airpods,
        Self::Cables,
        Self::Vape,
    ];

    /// Lowercase tag used on disk and in the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manettes => "manettes",
            Self::Accessoires => "accessoires",
            Self::Moniteurs => "moniteurs",
            Self::Airpods => "airpods",
            Self::Cables => "cables",
            Self::Vape => "vape",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// A stored product record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Generated unique identifier
    pub id: String,
    /// Display name, never blank
    pub name: String,
    /// Catalogue category
    pub category: Category,
    /// Unit price, never negative
    pub price: f64,
    /// Units in stock
    pub stock: u32,
    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL, a placeholder when the admin did not supply one
    #[serde(default)]
    pub image: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Time of the last update, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields accepted when creating a product.
///
/// Everything is optional at the type level so that a missing field surfaces
/// as a validation error naming that field, not as an opaque decode failure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// One of the fixed categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Unit price, finite and not negative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Units in stock, not negative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL; a placeholder is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Partial update of a product. Absent fields keep their stored value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// One of the fixed categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Unit price, finite and not negative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Units in stock, not negative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL; a placeholder is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductPatch {
    /// True when the patch would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.description.is_none()
            && self.image.is_none()
    }
}

/// Builds the placeholder image URL showing the product name.
#[must_use]
pub fn placeholder_image(name: &str) -> String {
    reqwest::Url::parse_with_params(PLACEHOLDER_IMAGE_BASE, &[("text", name)])
        .map_or_else(|_| PLACEHOLDER_IMAGE_BASE.to_string(), String::from)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_category_parsing_is_case_insensitive() {
        assert_eq!("Manettes".parse::<Category>().unwrap(), Category::Manettes);
        assert_eq!(" vape ".parse::<Category>().unwrap(), Category::Vape);
        assert!("consoles".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Airpods).unwrap();
        assert_eq!(json, "\"airpods\"");
    }

    #[test]
    fn test_product_uses_camel_case_keys() {
        let product = Product {
            id: "p1".to_string(),
            name: "Pad".to_string(),
            category: Category::Manettes,
            price: 29.99,
            stock: 5,
            description: None,
            image: placeholder_image("Pad"),
            created_at: Utc::now(),
            updated_at: None,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_none());
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_unknown_input_keys_are_dropped() {
        let input: NewProduct = serde_json::from_value(serde_json::json!({
            "name": "Pad",
            "id": "forged",
            "isAdmin": true
        }))
        .unwrap();
        let back = serde_json::to_value(&input).unwrap();
        assert_eq!(back, serde_json::json!({ "name": "Pad" }));
    }

    #[test]
    fn test_placeholder_image_encodes_name() {
        let url = placeholder_image("Casque & Micro");
        assert!(url.starts_with(PLACEHOLDER_IMAGE_BASE));
        assert!(url.contains("text=Casque+%26+Micro"));
    }

    #[test]
    fn test_empty_patch() {
        assert!(ProductPatch::default().is_empty());
        let patch = ProductPatch {
            stock: Some(3),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
