use std::collections::HashMap;
use std::hash::Hash;

use models::*;

/// Indexes `values` by key, keeping file order inside every bucket.
fn index_by<'a, K, V, F>(values: &'a [V], key: F) -> HashMap<&'a K, Vec<&'a V>>
where
    K: Eq + Hash + 'a,
    F: Fn(&'a V) -> &'a K,
{
    let mut index: HashMap<&K, Vec<&V>> = HashMap::new();
    for value in values {
        index.entry(key(value)).or_insert_with(Vec::new).push(value);
    }
    index
}

/// Inner-joins the extracts into one wide table.
///
/// Joins orders with customers on the customer id, items with products on the
/// product id, the two results on the order id and finally reviews on the order
/// id. Rows without a partner on either side are dropped. Output follows
/// left-key order: orders as read, then their items as read, then reviews.
pub fn join_tables(
    orders: &[Order],
    customers: &[Customer],
    items: &[OrderItem],
    products: &[Product],
    reviews: &[OrderReview],
) -> Vec<WideRow> {
    let customers_by_id = index_by(customers, |c| &c.id);
    let products_by_id = index_by(products, |p| &p.id);
    let reviews_by_order = index_by(reviews, |r| &r.order_id);

    let mut items_by_order: HashMap<_, Vec<(&OrderItem, &Product)>> = HashMap::new();
    for item in items {
        if let Some(products) = products_by_id.get(&item.product_id) {
            let entry = items_by_order.entry(&item.order_id).or_insert_with(Vec::new);
            for product in products {
                entry.push((item, *product));
            }
        }
    }

    let mut rows = vec![];
    for order in orders {
        let customers = match customers_by_id.get(&order.customer_id) {
            Some(customers) => customers,
            None => continue,
        };
        let items = match items_by_order.get(&order.id) {
            Some(items) => items,
            None => continue,
        };
        let reviews = match reviews_by_order.get(&order.id) {
            Some(reviews) => reviews,
            None => continue,
        };
        for customer in customers {
            for &(item, product) in items {
                for review in reviews {
                    rows.push(WideRow::new(order, customer, item, product, review));
                }
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use types::*;

    fn order(id: &str, customer: &str, delivered: bool) -> Order {
        let purchased_at = NaiveDate::from_ymd_opt(2017, 10, 2).unwrap().and_hms_opt(10, 56, 33).unwrap();
        Order {
            id: OrderId(id.to_string()),
            customer_id: CustomerId(customer.to_string()),
            purchased_at,
            approved_at: purchased_at,
            delivered_carrier_at: None,
            delivered_customer_at: if delivered {
                NaiveDate::from_ymd_opt(2017, 10, 10).unwrap().and_hms_opt(21, 25, 13)
            } else {
                None
            },
            estimated_delivery_at: None,
        }
    }

    fn customer(id: &str, city: &str) -> Customer {
        Customer {
            id: CustomerId(id.to_string()),
            unique_id: format!("u-{}", id),
            city: city.to_string(),
            state: "SP".to_string(),
        }
    }

    fn item(order: &str, product: &str, price: f64) -> OrderItem {
        OrderItem {
            order_id: OrderId(order.to_string()),
            product_id: ProductId(product.to_string()),
            seller_id: SellerId("s1".to_string()),
            price: ProductPrice(price),
            freight_value: ProductPrice(1.0),
        }
    }

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: ProductId(id.to_string()),
            category: category.to_string(),
        }
    }

    fn review(order: &str, score: i32) -> OrderReview {
        OrderReview {
            order_id: OrderId(order.to_string()),
            score,
        }
    }

    #[test]
    fn test_inner_join_cardinality() {
        let orders = vec![order("o1", "c1", true), order("o2", "c2", false), order("o3", "c-missing", true)];
        let customers = vec![customer("c1", "sao paulo"), customer("c2", "rio de janeiro")];
        let items = vec![
            item("o1", "p1", 10.0),
            item("o1", "p2", 20.0),
            item("o2", "p1", 30.0),
            item("o3", "p1", 40.0),
            item("o1", "p-missing", 50.0),
        ];
        let products = vec![product("p1", "perfumaria"), product("p2", "unknown")];
        let reviews = vec![review("o1", 4), review("o1", 5), review("o2", 1), review("o3", 3)];

        let rows = join_tables(&orders, &customers, &items, &products, &reviews);

        // o1: 2 matched items x 2 reviews, o2: 1 x 1, o3 has no customer
        assert_eq!(rows.len(), 5);
        assert!(rows.len() <= orders.len() + customers.len() + items.len() + products.len() + reviews.len());
        let keys = rows
            .iter()
            .map(|r| (r.order_id.0.as_str(), r.product_id.0.as_str(), r.review_score))
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![("o1", "p1", 4), ("o1", "p1", 5), ("o1", "p2", 4), ("o1", "p2", 5), ("o2", "p1", 1)]
        );
    }

    #[test]
    fn test_derived_columns() {
        let rows = join_tables(
            &[order("o1", "c1", true), order("o2", "c2", false)],
            &[customer("c1", "sao paulo"), customer("c2", "campinas")],
            &[item("o1", "p1", 10.0), item("o2", "p1", 12.5)],
            &[product("p1", "perfumaria")],
            &[review("o1", 4), review("o2", 2)],
        );

        assert_eq!(rows[0].order_day, OrderDay::Monday);
        assert_eq!(rows[0].order_hour, 10);
        assert_eq!(rows[0].order_month.to_string(), "2017-10");
        assert_eq!(rows[0].delivery_time, Some(8));
        assert_eq!(rows[1].delivery_time, None);
        assert_eq!(rows[1].customer_city, "campinas");
    }

    #[test]
    fn test_order_without_review_is_dropped() {
        let rows = join_tables(
            &[order("o1", "c1", true)],
            &[customer("c1", "sao paulo")],
            &[item("o1", "p1", 10.0)],
            &[product("p1", "perfumaria")],
            &[],
        );

        assert!(rows.is_empty());
    }
}
