use std::collections::HashSet;

use models::*;

/// Distinct values of `field` in first-observed order.
fn distinct<'a, F>(rows: &'a [WideRow], field: F) -> Vec<String>
where
    F: Fn(&'a WideRow) -> &'a str,
{
    let mut seen = HashSet::new();
    rows.iter()
        .map(field)
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

pub fn selection_domains(rows: &[WideRow]) -> SelectionDomains {
    SelectionDomains {
        categories: distinct(rows, |r| r.product_category_name.as_str()),
        cities: distinct(rows, |r| r.customer_city.as_str()),
    }
}

/// Resolves the requested values, defaulting each one to the first entry of its domain.
pub fn resolve_selection(request: SelectionRequest, domains: &SelectionDomains) -> Selection {
    Selection {
        category: request
            .category
            .or_else(|| domains.categories.first().cloned())
            .unwrap_or_default(),
        city: request.city.or_else(|| domains.cities.first().cloned()).unwrap_or_default(),
    }
}

/// Rows whose category and city both equal the selection exactly.
pub fn filter_rows<'a>(rows: &'a [WideRow], selection: &Selection) -> Vec<&'a WideRow> {
    rows.iter()
        .filter(|r| r.product_category_name == selection.category && r.customer_city == selection.city)
        .collect()
}
