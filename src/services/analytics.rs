//! Chart and metric payloads.
//!
//! Functions taking `&[&WideRow]` run over the filtered view, functions taking
//! `&[WideRow]` over the full table. None of them fail on zero rows.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use models::*;

/// Order counts per weekday, always Monday through Sunday.
pub fn orders_by_day(rows: &[&WideRow]) -> Vec<DayCount> {
    OrderDay::ALL
        .iter()
        .map(|day| DayCount {
            day: *day,
            orders: rows.iter().filter(|r| r.order_day == *day).count(),
        })
        .collect()
}

/// Order counts per observed hour of day, ascending.
pub fn orders_by_hour(rows: &[&WideRow]) -> Vec<HourCount> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.order_hour).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(hour, orders)| HourCount { hour, orders })
        .collect()
}

/// Summed price per category, highest first. Ties keep first-encounter order.
pub fn category_ranking(rows: &[WideRow]) -> Vec<CategorySales> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut ranking: Vec<CategorySales> = vec![];
    for row in rows {
        let category = row.product_category_name.as_str();
        match positions.get(category) {
            Some(&position) => ranking[position].sales += row.price.0,
            None => {
                positions.insert(category, ranking.len());
                ranking.push(CategorySales {
                    category: category.to_string(),
                    sales: row.price.0,
                });
            }
        }
    }
    ranking.sort_by(|a, b| b.sales.partial_cmp(&a.sales).unwrap_or(::std::cmp::Ordering::Equal));
    ranking
}

pub fn top_categories(rows: &[WideRow], limit: usize) -> Vec<CategorySales> {
    let mut ranking = category_ranking(rows);
    ranking.truncate(limit);
    ranking
}

pub fn price_vs_score(rows: &[&WideRow]) -> Vec<PriceScore> {
    rows.iter()
        .map(|r| PriceScore {
            price: r.price.0,
            review_score: r.review_score,
        })
        .collect()
}

/// Monthly summed price of the `limit` best-selling categories.
///
/// Months are those in which at least one of these categories sold, in
/// chronological order; series follow the ranking.
pub fn monthly_trend(rows: &[WideRow], limit: usize) -> MonthlyTrend {
    let leaders = top_categories(rows, limit)
        .into_iter()
        .map(|c| c.category)
        .collect::<Vec<_>>();

    let mut months = BTreeSet::new();
    let mut sales: HashMap<(&str, OrderMonth), f64> = HashMap::new();
    for row in rows {
        let category = row.product_category_name.as_str();
        if leaders.iter().any(|leader| leader == category) {
            months.insert(row.order_month);
            *sales.entry((category, row.order_month)).or_insert(0.0) += row.price.0;
        }
    }

    let months = months.into_iter().collect::<Vec<_>>();
    let series = leaders
        .iter()
        .map(|category| TrendSeries {
            category: category.clone(),
            sales: months
                .iter()
                .map(|month| sales.get(&(category.as_str(), *month)).cloned())
                .collect(),
        })
        .collect();

    MonthlyTrend { months, series }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use types::*;

    fn row(category: &str, price: f64, purchased: (i32, u32, u32, u32), score: i32) -> WideRow {
        let (year, month, day, hour) = purchased;
        let purchased_at = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        WideRow::new(
            &Order {
                id: OrderId("o".to_string()),
                customer_id: CustomerId("c".to_string()),
                purchased_at,
                approved_at: purchased_at,
                delivered_carrier_at: None,
                delivered_customer_at: None,
                estimated_delivery_at: None,
            },
            &Customer {
                id: CustomerId("c".to_string()),
                unique_id: "u".to_string(),
                city: "sao paulo".to_string(),
                state: "SP".to_string(),
            },
            &OrderItem {
                order_id: OrderId("o".to_string()),
                product_id: ProductId("p".to_string()),
                seller_id: SellerId("s".to_string()),
                price: ProductPrice(price),
                freight_value: ProductPrice(0.0),
            },
            &Product {
                id: ProductId("p".to_string()),
                category: category.to_string(),
            },
            &OrderReview {
                order_id: OrderId("o".to_string()),
                score,
            },
        )
    }

    #[test]
    fn test_orders_by_day_has_all_weekdays() {
        // 2018-03-07 is a Wednesday
        let rows = vec![row("a", 1.0, (2018, 3, 7, 9), 5), row("a", 1.0, (2018, 3, 7, 23), 4)];
        let view = rows.iter().collect::<Vec<_>>();

        let counts = orders_by_day(&view);

        assert_eq!(counts.len(), 7);
        assert_eq!(counts[0].day, OrderDay::Monday);
        assert_eq!(counts[2].orders, 2);
        assert_eq!(counts.iter().map(|c| c.orders).sum::<usize>(), 2);
        assert_eq!(counts[6].day, OrderDay::Sunday);
    }

    #[test]
    fn test_empty_view() {
        let view: Vec<&WideRow> = vec![];

        assert!(orders_by_day(&view).iter().all(|c| c.orders == 0));
        assert!(orders_by_hour(&view).is_empty());
        assert!(price_vs_score(&view).is_empty());
        assert_eq!(monthly_trend(&[], 5), MonthlyTrend::default());
        assert!(top_categories(&[], 10).is_empty());
    }

    #[test]
    fn test_orders_by_hour_ascending() {
        let rows = vec![
            row("a", 1.0, (2018, 3, 7, 23), 5),
            row("a", 1.0, (2018, 3, 7, 9), 5),
            row("a", 1.0, (2018, 3, 8, 9), 5),
        ];
        let view = rows.iter().collect::<Vec<_>>();

        assert_eq!(
            orders_by_hour(&view),
            vec![HourCount { hour: 9, orders: 2 }, HourCount { hour: 23, orders: 1 }]
        );
    }

    #[test]
    fn test_top_categories_desc_with_stable_ties() {
        let rows = vec![
            row("b", 5.0, (2018, 1, 1, 0), 5),
            row("a", 10.0, (2018, 1, 1, 0), 5),
            row("c", 2.0, (2018, 1, 1, 0), 5),
            row("b", 5.0, (2018, 1, 1, 0), 5),
            row("d", 1.0, (2018, 1, 1, 0), 5),
        ];

        let top = top_categories(&rows, 3);

        assert_eq!(
            top.iter().map(|c| c.category.as_str()).collect::<Vec<_>>(),
            vec!["b", "a", "c"]
        );
        assert_eq!(top[0].sales, 10.0);
    }

    #[test]
    fn test_monthly_trend_gaps() {
        let rows = vec![
            row("a", 10.0, (2018, 1, 3, 0), 5),
            row("a", 5.0, (2018, 1, 20, 0), 5),
            row("b", 4.0, (2018, 2, 3, 0), 5),
            row("c", 1.0, (2017, 12, 3, 0), 5),
        ];

        let trend = monthly_trend(&rows, 2);

        assert_eq!(
            trend.months.iter().map(|m| m.to_string()).collect::<Vec<_>>(),
            vec!["2018-01", "2018-02"]
        );
        assert_eq!(trend.series[0].category, "a");
        assert_eq!(trend.series[0].sales, vec![Some(15.0), None]);
        assert_eq!(trend.series[1].sales, vec![None, Some(4.0)]);
    }

    #[test]
    fn test_price_vs_score() {
        let rows = vec![row("a", 12.5, (2018, 1, 3, 0), 3)];
        let view = rows.iter().collect::<Vec<_>>();

        assert_eq!(
            price_vs_score(&view),
            vec![PriceScore {
                price: 12.5,
                review_score: 3
            }]
        );
    }
}
