use super::rfm::{RfmEntry, RfmSummary};
use super::wide_row::{OrderDay, OrderMonth, WideRow};

/// The two in-page selections. Either may be left out by the caller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub category: Option<String>,
    pub city: Option<String>,
}

/// Selections resolved against their domains.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub category: String,
    pub city: String,
}

/// Distinct values available in the two select boxes, first-observed order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionDomains {
    pub categories: Vec<String>,
    pub cities: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DayCount {
    pub day: OrderDay,
    pub orders: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HourCount {
    pub hour: u32,
    pub orders: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategorySales {
    pub category: String,
    pub sales: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceScore {
    pub price: f64,
    pub review_score: i32,
}

/// Summed price of one category per month. `None` marks a month without sales.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub category: String,
    pub sales: Vec<Option<f64>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub months: Vec<OrderMonth>,
    pub series: Vec<TrendSeries>,
}

/// Everything one render of the page shows, in display order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub domains: SelectionDomains,
    pub rows: Vec<WideRow>,
    pub orders_by_day: Vec<DayCount>,
    pub orders_by_hour: Vec<HourCount>,
    pub top_categories: Vec<CategorySales>,
    pub price_vs_score: Vec<PriceScore>,
    pub rfm_summary: RfmSummary,
    pub rfm: Vec<RfmEntry>,
    pub monthly_trend: MonthlyTrend,
    pub footer: String,
}
