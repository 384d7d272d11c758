//! HTML rendering of a `DashboardView`.
//!
//! The page is produced top to bottom in the same order the view lists its
//! sections; every section renders even when its data is empty.

pub mod charts;
pub mod format;
pub mod table;

use self::charts::{BarChart, LineChart, LineSeries, ScatterChart};
use self::format::{escape, format_currency};
use self::table::render_table;
use models::*;

pub const PAGE_TITLE: &str = "E-Commerce Data Analysis Dashboard";
pub const CURRENCY: &str = "AUD";

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex;color:#262730}\
aside{width:260px;min-height:100vh;padding:24px;background:#f0f2f6;box-sizing:border-box}\
aside label{display:block;margin:16px 0 4px;font-size:14px}\
aside select{width:100%;padding:4px}\
aside button{margin-top:16px}\
main{flex:1;padding:24px 48px;min-width:0}\
.table-wrap{max-height:400px;overflow:auto;border:1px solid #e6e6e6}\
table.data{border-collapse:collapse;font-size:12px;white-space:nowrap}\
table.data th,table.data td{padding:2px 8px;border-bottom:1px solid #eeeeee;text-align:left}\
td.index{color:#888888}\
.metrics{display:flex;gap:48px;margin:16px 0}\
.metric .label{font-size:14px;color:#555555}\
.metric .value{font-size:32px}\
svg.chart{max-width:100%;height:auto;display:block;margin:8px 0}\
footer{margin-top:32px;color:#888888}";

fn select(name: &str, label: &str, options: &[String], selected: &str) -> String {
    let mut html = format!("<label for=\"{name}\">{}</label><select id=\"{name}\" name=\"{name}\">", escape(label), name = name);
    for option in options {
        html.push_str(&format!(
            "<option value=\"{value}\"{}>{value}</option>",
            if option == selected { " selected" } else { "" },
            value = escape(option),
        ));
    }
    html.push_str("</select>");
    html
}

fn sidebar(view: &DashboardView) -> String {
    format!(
        "<aside><h2>Filter Data</h2><form method=\"get\" action=\"/\">{}{}<button type=\"submit\">Apply</button></form></aside>",
        select("category", "Product Category", &view.domains.categories, &view.selection.category),
        select("city", "City", &view.domains.cities, &view.selection.city),
    )
}

fn metric(label: &str, value: &str) -> String {
    format!(
        "<div class=\"metric\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
        escape(label),
        escape(value)
    )
}

fn recency(entry: &RfmEntry) -> f64 {
    f64::from(entry.recency)
}

fn frequency(entry: &RfmEntry) -> f64 {
    f64::from(entry.frequency)
}

fn monetary(entry: &RfmEntry) -> f64 {
    entry.monetary
}

fn rfm_section(summary: &RfmSummary, entries: &[RfmEntry]) -> String {
    let mut html = String::from("<h1>Best Customer Based on RFM Parameters</h1><div class=\"metrics\">");
    html.push_str(&metric("Average Recency (days)", &format!("{:.1}", summary.recency)));
    html.push_str(&metric("Average Frequency", &format!("{:.2}", summary.frequency)));
    html.push_str(&metric("Average Monetary", &format_currency(CURRENCY, summary.monetary)));
    html.push_str("</div>");

    let charts: [(&str, &str, &str, fn(&RfmEntry) -> f64); 3] = [
        ("Recency by Customer", "Recency (days)", "lightblue", recency),
        ("Frequency by Customer", "Frequency", "lightgreen", frequency),
        ("Monetary by Customer", "Monetary (AUD)", "lightcoral", monetary),
    ];
    for &(title, x_label, color, value) in charts.iter() {
        let chart = BarChart {
            title,
            x_label,
            y_label: "customer_unique_id",
            color,
            rotate_labels: false,
            bars: entries
                .iter()
                .map(|e| (e.customer_unique_id.clone(), value(e)))
                .collect(),
        };
        html.push_str(&format!("<h3>{}</h3>{}", title, chart.to_horizontal_svg()));
    }
    html
}

fn monthly_trend_chart(trend: &MonthlyTrend) -> String {
    LineChart {
        title: "Monthly Sales Trend for Top 5 Product Categories",
        x_label: "Month",
        y_label: "Total Sales",
        legend_title: "Product Category",
        x_values: trend.months.iter().map(|m| m.to_string()).collect(),
        series: trend
            .series
            .iter()
            .map(|s| LineSeries {
                name: s.category.clone(),
                values: s.sales.clone(),
            })
            .collect(),
    }
    .to_svg()
}

/// Renders the full dashboard page. `logo_url` is used as the image source.
pub fn render_page(view: &DashboardView, logo_url: &str) -> String {
    let mut html = String::with_capacity(64 * 1024);
    html.push_str(&format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head><body>",
        PAGE_TITLE, STYLE
    ));
    html.push_str(&sidebar(view));
    html.push_str("<main>");

    html.push_str(&format!(
        "<img src=\"{}\" width=\"150\" alt=\"logo\"><h1>{}</h1>",
        escape(logo_url),
        PAGE_TITLE
    ));
    html.push_str(&format!(
        "<p class=\"caption\">Showing data for product category: {} and city: {}</p>",
        escape(&view.selection.category),
        escape(&view.selection.city)
    ));
    html.push_str(&render_table(&view.rows));

    let by_day = BarChart {
        title: "Orders by Day of the Week",
        x_label: "order_day",
        y_label: "count",
        color: "steelblue",
        rotate_labels: false,
        bars: view
            .orders_by_day
            .iter()
            .map(|c| (c.day.to_string(), c.orders as f64))
            .collect(),
    };
    html.push_str(&format!("<h2>Order Distribution by Day</h2>{}", by_day.to_svg()));

    let by_hour = BarChart {
        title: "Orders by Hour of the Day",
        x_label: "order_hour",
        y_label: "count",
        color: "steelblue",
        rotate_labels: false,
        bars: view
            .orders_by_hour
            .iter()
            .map(|c| (c.hour.to_string(), c.orders as f64))
            .collect(),
    };
    html.push_str(&format!("<h2>Order Distribution by Hour</h2>{}", by_hour.to_svg()));

    let top = BarChart {
        title: "Top 10 Product Categories by Sales",
        x_label: "product_category_name",
        y_label: "price",
        color: "steelblue",
        rotate_labels: true,
        bars: view
            .top_categories
            .iter()
            .map(|c| (c.category.clone(), c.sales))
            .collect(),
    };
    html.push_str(&format!("<h2>Top 10 Product Categories by Sales</h2>{}", top.to_svg()));

    let scatter = ScatterChart {
        title: "Price vs Review Score",
        x_label: "price",
        y_label: "review_score",
        points: view
            .price_vs_score
            .iter()
            .map(|p| (p.price, f64::from(p.review_score)))
            .collect(),
    };
    html.push_str(&format!("<h2>Price vs Review Score</h2>{}", scatter.to_svg()));

    html.push_str(&rfm_section(&view.rfm_summary, &view.rfm));

    html.push_str(&format!(
        "<h2>Monthly Sales Trend for Top 5 Product Categories</h2>{}",
        monthly_trend_chart(&view.monthly_trend)
    ));

    html.push_str(&format!("<footer>{}</footer></main></body></html>", escape(&view.footer)));
    html
}
