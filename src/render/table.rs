use chrono::NaiveDateTime;

use super::format::escape;
use models::WideRow;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const COLUMNS: [&str; 20] = [
    "order_id",
    "customer_id",
    "order_purchase_timestamp",
    "order_approved_at",
    "order_delivered_carrier_date",
    "order_delivered_customer_date",
    "order_estimated_delivery_date",
    "customer_unique_id",
    "customer_city",
    "customer_state",
    "product_id",
    "seller_id",
    "price",
    "freight_value",
    "product_category_name",
    "review_score",
    "order_day",
    "order_hour",
    "order_month",
    "delivery_time",
];

fn timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

fn optional<T, F: Fn(&T) -> String>(value: &Option<T>, f: F) -> String {
    value.as_ref().map(f).unwrap_or_default()
}

fn cells(row: &WideRow) -> Vec<String> {
    vec![
        row.order_id.to_string(),
        row.customer_id.to_string(),
        timestamp(&row.purchased_at),
        timestamp(&row.approved_at),
        optional(&row.delivered_carrier_at, timestamp),
        optional(&row.delivered_customer_at, timestamp),
        optional(&row.estimated_delivery_at, timestamp),
        row.customer_unique_id.clone(),
        row.customer_city.clone(),
        row.customer_state.clone(),
        row.product_id.to_string(),
        row.seller_id.to_string(),
        format!("{:.2}", row.price.0),
        format!("{:.2}", row.freight_value.0),
        row.product_category_name.clone(),
        row.review_score.to_string(),
        row.order_day.to_string(),
        row.order_hour.to_string(),
        row.order_month.to_string(),
        optional(&row.delivery_time, |days| days.to_string()),
    ]
}

/// Scrollable HTML table of the given rows, header included even when empty.
pub fn render_table(rows: &[WideRow]) -> String {
    let mut html = String::from("<div class=\"table-wrap\"><table class=\"data\"><thead><tr><th></th>");
    for column in COLUMNS.iter() {
        html.push_str(&format!("<th>{}</th>", column));
    }
    html.push_str("</tr></thead><tbody>");

    for (i, row) in rows.iter().enumerate() {
        html.push_str(&format!("<tr><td class=\"index\">{}</td>", i));
        for cell in cells(row) {
            html.push_str(&format!("<td>{}</td>", escape(&cell)));
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></div>");
    html
}
