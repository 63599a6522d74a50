//! Favourite wire type (favourite-service).
//!
//! A favourite is the "like" relationship between a user and a product. The
//! canonical contract is the flat shape `{userId, productId, likeDate}`; the
//! service keys the relationship on all three fields.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, UserId};

/// Textual format of `likeDate` on the wire, e.g.
/// `25-10-2024__14:30:05:000000`.
pub const LIKE_DATE_FORMAT: &str = "%d-%m-%Y__%H:%M:%S:%6f";

/// A favourite ("like") relationship between a user and a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favourite {
    pub user_id: UserId,
    pub product_id: ProductId,
    #[serde(with = "like_date")]
    pub like_date: NaiveDateTime,
}

impl Favourite {
    /// Create a favourite liked at the given instant.
    #[must_use]
    pub const fn new(user_id: UserId, product_id: ProductId, like_date: NaiveDateTime) -> Self {
        Self {
            user_id,
            product_id,
            like_date,
        }
    }
}

/// Serde adapter for the service's `likeDate` textual format.
mod like_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::LIKE_DATE_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(LIKE_DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, LIKE_DATE_FORMAT).map_err(D::Error::custom)
    }
}
