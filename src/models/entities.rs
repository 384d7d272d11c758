use chrono::NaiveDateTime;

use types::*;

/// Order header. `approved_at` is already back-filled from `purchased_at`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub purchased_at: NaiveDateTime,
    pub approved_at: NaiveDateTime,
    pub delivered_carrier_at: Option<NaiveDateTime>,
    pub delivered_customer_at: Option<NaiveDateTime>,
    pub estimated_delivery_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub unique_id: String,
    pub city: String,
    pub state: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub seller_id: SellerId,
    pub price: ProductPrice,
    pub freight_value: ProductPrice,
}

/// Catalogue entry. Missing categories are stored as [`UNKNOWN_CATEGORY`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub category: String,
}

pub const UNKNOWN_CATEGORY: &str = "unknown";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: SellerId,
    pub city: String,
    pub state: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderReview {
    pub order_id: OrderId,
    pub score: i32,
}
