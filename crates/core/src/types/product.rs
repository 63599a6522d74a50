//! Product and category wire types (product-service).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};

/// A product resource as exposed by the product service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    pub product_title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub sku: String,
    /// Unit price, serialized as a JSON number.
    pub price_unit: Decimal,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Category embedded in a [`Product`] or listed standalone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: CategoryId,
    pub category_title: String,
    /// Nullable on the wire; the seeded categories carry no image.
    pub image_url: Option<String>,
}
