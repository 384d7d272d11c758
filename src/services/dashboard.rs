use std::sync::Arc;

use super::analytics;
use super::filter;
use super::types::ServiceResult;
use loaders::{DatasetCache, DatasetSource};
use models::*;

pub const TOP_CATEGORIES: usize = 10;
pub const TREND_CATEGORIES: usize = 5;
pub const FOOTER: &str = "Copyright © 2024";

pub trait DashboardService {
    /// Runs the whole page pipeline for one selection.
    fn render(&self, request: SelectionRequest) -> ServiceResult<DashboardView>;
}

pub struct DashboardServiceImpl<S> {
    pub cache: Arc<DatasetCache<S>>,
}

impl<S> DashboardServiceImpl<S> {
    pub fn new(cache: Arc<DatasetCache<S>>) -> Self {
        DashboardServiceImpl { cache }
    }
}

impl<S: DatasetSource> DashboardService for DashboardServiceImpl<S> {
    fn render(&self, request: SelectionRequest) -> ServiceResult<DashboardView> {
        let dataset = self.cache.get()?;
        let rows = &dataset.rows;

        let domains = filter::selection_domains(rows);
        let selection = filter::resolve_selection(request, &domains);
        let filtered = filter::filter_rows(rows, &selection);
        debug!(
            "Rendering dashboard for category {:?} and city {:?}: {} of {} rows",
            selection.category,
            selection.city,
            filtered.len(),
            rows.len()
        );

        Ok(DashboardView {
            orders_by_day: analytics::orders_by_day(&filtered),
            orders_by_hour: analytics::orders_by_hour(&filtered),
            top_categories: analytics::top_categories(rows, TOP_CATEGORIES),
            price_vs_score: analytics::price_vs_score(&filtered),
            rfm_summary: RfmSummary::from_entries(&BEST_CUSTOMERS),
            rfm: BEST_CUSTOMERS.clone(),
            monthly_trend: analytics::monthly_trend(rows, TREND_CATEGORIES),
            footer: FOOTER.to_string(),
            rows: filtered.into_iter().cloned().collect(),
            selection,
            domains,
        })
    }
}
