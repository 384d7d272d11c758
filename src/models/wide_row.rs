use std::fmt;

use chrono::prelude::*;

use super::entities::*;
use types::*;

const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

/// Day of week of the purchase, ordered Monday first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl OrderDay {
    pub const ALL: [OrderDay; 7] = [
        OrderDay::Monday,
        OrderDay::Tuesday,
        OrderDay::Wednesday,
        OrderDay::Thursday,
        OrderDay::Friday,
        OrderDay::Saturday,
        OrderDay::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            &OrderDay::Monday => "Monday",
            &OrderDay::Tuesday => "Tuesday",
            &OrderDay::Wednesday => "Wednesday",
            &OrderDay::Thursday => "Thursday",
            &OrderDay::Friday => "Friday",
            &OrderDay::Saturday => "Saturday",
            &OrderDay::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for OrderDay {
    fn from(v: Weekday) -> Self {
        match v {
            Weekday::Mon => OrderDay::Monday,
            Weekday::Tue => OrderDay::Tuesday,
            Weekday::Wed => OrderDay::Wednesday,
            Weekday::Thu => OrderDay::Thursday,
            Weekday::Fri => OrderDay::Friday,
            Weekday::Sat => OrderDay::Saturday,
            Weekday::Sun => OrderDay::Sunday,
        }
    }
}

impl fmt::Display for OrderDay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Calendar month of the purchase (a monthly period, e.g. `2017-10`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderMonth {
    pub year: i32,
    pub month: u32,
}

impl<'a> From<&'a NaiveDateTime> for OrderMonth {
    fn from(v: &'a NaiveDateTime) -> Self {
        OrderMonth {
            year: v.year(),
            month: v.month(),
        }
    }
}

impl fmt::Display for OrderMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One row of the denormalized order ⋈ customer ⋈ item ⋈ product ⋈ review table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WideRow {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub purchased_at: NaiveDateTime,
    pub approved_at: NaiveDateTime,
    pub delivered_carrier_at: Option<NaiveDateTime>,
    pub delivered_customer_at: Option<NaiveDateTime>,
    pub estimated_delivery_at: Option<NaiveDateTime>,
    pub customer_unique_id: String,
    pub customer_city: String,
    pub customer_state: String,
    pub product_id: ProductId,
    pub seller_id: SellerId,
    pub price: ProductPrice,
    pub freight_value: ProductPrice,
    pub product_category_name: String,
    pub review_score: i32,
    pub order_day: OrderDay,
    pub order_hour: u32,
    pub order_month: OrderMonth,
    /// Whole days from purchase to delivery, `None` until delivered.
    pub delivery_time: Option<i64>,
}

impl WideRow {
    pub fn new(order: &Order, customer: &Customer, item: &OrderItem, product: &Product, review: &OrderReview) -> Self {
        WideRow {
            order_id: order.id.clone(),
            customer_id: order.customer_id.clone(),
            purchased_at: order.purchased_at,
            approved_at: order.approved_at,
            delivered_carrier_at: order.delivered_carrier_at,
            delivered_customer_at: order.delivered_customer_at,
            estimated_delivery_at: order.estimated_delivery_at,
            customer_unique_id: customer.unique_id.clone(),
            customer_city: customer.city.clone(),
            customer_state: customer.state.clone(),
            product_id: item.product_id.clone(),
            seller_id: item.seller_id.clone(),
            price: item.price,
            freight_value: item.freight_value,
            product_category_name: product.category.clone(),
            review_score: review.score,
            order_day: order.purchased_at.weekday().into(),
            order_hour: order.purchased_at.hour(),
            order_month: OrderMonth::from(&order.purchased_at),
            delivery_time: order
                .delivered_customer_at
                .map(|delivered| delivery_days(order.purchased_at, delivered)),
        }
    }
}

/// Elapsed whole days, floored, so that a span just under zero counts as -1.
pub fn delivery_days(purchased_at: NaiveDateTime, delivered_at: NaiveDateTime) -> i64 {
    (delivered_at - purchased_at).num_seconds().div_euclid(SECONDS_PER_DAY)
}
