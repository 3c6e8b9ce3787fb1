//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Food, TableRef, UserRef};
use crate::util::{lenient_i64, lenient_opt_i64, lenient_u32};

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Open tab, items can still be added
    #[default]
    Progress,
    Completed,
    Canceled,
}

impl OrderStatus {
    /// The statuses offered by the edit dialog.
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Progress,
        OrderStatus::Completed,
        OrderStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Progress => "progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        }
    }

    /// Completed and canceled orders are closed.
    pub fn is_closed(&self) -> bool {
        !matches!(self, OrderStatus::Progress)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        OrderStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == wanted)
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

/// One line of an order. Adding the same food twice yields two of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    pub food_id: Option<i64>,
    #[serde(deserialize_with = "lenient_u32")]
    pub quantity: u32,
    /// Price recorded by the server for this line
    pub price: Decimal,
    pub food: Food,
}

impl OrderItem {
    /// Menu price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.food.price * Decimal::from(self.quantity)
    }
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    pub customer_name: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub total_price: Decimal,
    #[serde(deserialize_with = "lenient_i64")]
    pub table_id: i64,
    #[serde(default, deserialize_with = "lenient_opt_i64", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
}

impl Order {
    /// Table label for list rows, falling back to the bare id.
    pub fn table_label(&self) -> String {
        self.table
            .as_ref()
            .map(|t| t.number.clone())
            .unwrap_or_else(|| self.table_id.to_string())
    }
}

/// Create order payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_name: String,
    pub table_id: i64,
}

/// Add order item payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemCreate {
    #[serde(deserialize_with = "lenient_i64")]
    pub order_id: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub food_id: i64,
    #[serde(deserialize_with = "lenient_u32")]
    pub quantity: u32,
}
