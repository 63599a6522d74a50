//! Order wire types (order-service).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CartId, OrderId};

/// An order resource as exposed by the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub order_desc: String,
    /// Order fee, serialized as a JSON number.
    pub order_fee: Decimal,
    pub cart: CartRef,
}

/// Cart reference embedded in an [`Order`]; identifier only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRef {
    pub cart_id: CartId,
}
