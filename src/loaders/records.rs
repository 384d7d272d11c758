//! Row shapes of the CSV extracts and their conversion into entities.
//!
//! Columns not named here are ignored; a named column missing from the
//! header is a parse error for the whole table.

use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};
use csv::Reader;
use failure::Error as FailureError;
use failure::ResultExt;
use serde::de::DeserializeOwned;

use errors::LoadError;
use models::*;
use types::*;

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
pub struct OrderRecord {
    order_id: OrderId,
    customer_id: CustomerId,
    order_purchase_timestamp: Option<String>,
    order_approved_at: Option<String>,
    order_delivered_carrier_date: Option<String>,
    order_delivered_customer_date: Option<String>,
    order_estimated_delivery_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerRecord {
    customer_id: CustomerId,
    customer_unique_id: String,
    customer_city: String,
    customer_state: String,
}

#[derive(Debug, Deserialize)]
pub struct OrderItemRecord {
    order_id: OrderId,
    product_id: ProductId,
    seller_id: SellerId,
    price: ProductPrice,
    freight_value: ProductPrice,
}

#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    product_id: ProductId,
    product_category_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SellerRecord {
    seller_id: SellerId,
    seller_city: String,
    seller_state: String,
}

#[derive(Debug, Deserialize)]
pub struct OrderReviewRecord {
    order_id: OrderId,
    review_score: i32,
}

/// Deserializes every row of `table`, failing on the first malformed one.
pub fn read_table<T, R>(table: &'static str, source: R) -> Result<Vec<T>, FailureError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = Reader::from_reader(source);
    let mut records = vec![];
    for record in reader.deserialize() {
        let record: T = record.context(LoadError::Parse { table })?;
        records.push(record);
    }
    Ok(records)
}

/// Parses a timestamp the way the extracts write them. Bare dates mean midnight.
pub fn parse_timestamp(column: &'static str, value: &str) -> Result<NaiveDateTime, LoadError> {
    let value = value.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(timestamp);
        }
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| LoadError::Timestamp {
            column,
            value: value.to_string(),
        })
}

fn parse_optional_timestamp(column: &'static str, value: Option<String>) -> Result<Option<NaiveDateTime>, LoadError> {
    match value {
        Some(ref v) if !v.trim().is_empty() => parse_timestamp(column, v).map(Some),
        _ => Ok(None),
    }
}

impl OrderRecord {
    pub fn into_order(self) -> Result<Order, LoadError> {
        let purchased_at = parse_optional_timestamp("order_purchase_timestamp", self.order_purchase_timestamp)?.ok_or(
            LoadError::MissingValue {
                table: "orders",
                column: "order_purchase_timestamp",
            },
        )?;
        let approved_at = parse_optional_timestamp("order_approved_at", self.order_approved_at)?.unwrap_or(purchased_at);

        Ok(Order {
            id: self.order_id,
            customer_id: self.customer_id,
            purchased_at,
            approved_at,
            delivered_carrier_at: parse_optional_timestamp("order_delivered_carrier_date", self.order_delivered_carrier_date)?,
            delivered_customer_at: parse_optional_timestamp("order_delivered_customer_date", self.order_delivered_customer_date)?,
            estimated_delivery_at: parse_optional_timestamp("order_estimated_delivery_date", self.order_estimated_delivery_date)?,
        })
    }
}

impl From<CustomerRecord> for Customer {
    fn from(v: CustomerRecord) -> Self {
        Customer {
            id: v.customer_id,
            unique_id: v.customer_unique_id,
            city: v.customer_city,
            state: v.customer_state,
        }
    }
}

impl From<OrderItemRecord> for OrderItem {
    fn from(v: OrderItemRecord) -> Self {
        OrderItem {
            order_id: v.order_id,
            product_id: v.product_id,
            seller_id: v.seller_id,
            price: v.price,
            freight_value: v.freight_value,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(v: ProductRecord) -> Self {
        let category = match v.product_category_name {
            Some(ref name) if !name.is_empty() => name.clone(),
            _ => UNKNOWN_CATEGORY.to_string(),
        };
        Product {
            id: v.product_id,
            category,
        }
    }
}

impl From<SellerRecord> for Seller {
    fn from(v: SellerRecord) -> Self {
        Seller {
            id: v.seller_id,
            city: v.seller_city,
            state: v.seller_state,
        }
    }
}

impl From<OrderReviewRecord> for OrderReview {
    fn from(v: OrderReviewRecord) -> Self {
        OrderReview {
            order_id: v.order_id,
            score: v.review_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDERS: &str = "\
order_id,customer_id,order_status,order_purchase_timestamp,order_approved_at,order_delivered_carrier_date,order_delivered_customer_date,order_estimated_delivery_date
o1,c1,delivered,2017-10-02 10:56:33,,2017-10-04 19:55:00,2017-10-10 21:25:13,2017-10-18 00:00:00
o2,c2,shipped,2018-07-24 20:41:37,2018-07-26 03:24:27,,,2018-08-13
";

    #[test]
    fn test_missing_approval_takes_purchase_timestamp() {
        let records: Vec<OrderRecord> = read_table("orders", ORDERS.as_bytes()).unwrap();
        let orders = records
            .into_iter()
            .map(OrderRecord::into_order)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(orders[0].approved_at, orders[0].purchased_at);
        assert_ne!(orders[1].approved_at, orders[1].purchased_at);
        assert_eq!(orders[1].delivered_customer_at, None);
        assert_eq!(
            orders[1].estimated_delivery_at,
            Some(NaiveDate::from_ymd_opt(2018, 8, 13).unwrap().and_hms_opt(0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_category_is_unknown() {
        let data = "product_id,product_category_name,product_weight_g\np1,,100\np2,perfumaria,200\n";
        let products = read_table::<ProductRecord, _>("products", data.as_bytes())
            .unwrap()
            .into_iter()
            .map(Product::from)
            .collect::<Vec<_>>();

        assert_eq!(products[0].category, "unknown");
        assert_eq!(products[1].category, "perfumaria");
    }

    #[test]
    fn test_malformed_timestamp_is_fatal() {
        let data = "order_id,customer_id,order_purchase_timestamp,order_approved_at,order_delivered_carrier_date,order_delivered_customer_date,order_estimated_delivery_date\no1,c1,yesterday,,,,\n";
        let record = read_table::<OrderRecord, _>("orders", data.as_bytes()).unwrap().remove(0);

        match record.into_order() {
            Err(LoadError::Timestamp { column, value }) => {
                assert_eq!(column, "order_purchase_timestamp");
                assert_eq!(value, "yesterday");
            }
            other => panic!("Expected timestamp error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let data = "order_id,price\no1,10.0\n";

        assert!(read_table::<OrderItemRecord, _>("order_items", data.as_bytes()).is_err());
    }
}
