/// Recency / frequency / monetary scores of a single customer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RfmEntry {
    pub customer_unique_id: String,
    pub recency: u32,
    pub frequency: u32,
    pub monetary: f64,
}

/// Averages over an RFM table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RfmSummary {
    pub recency: f64,
    pub frequency: f64,
    pub monetary: f64,
}

lazy_static! {
    /// Illustrative best customers. Not derived from the loaded extracts.
    pub static ref BEST_CUSTOMERS: Vec<RfmEntry> = vec![
        RfmEntry::new("0000366f3b9a7992bf8c76cfdf3221e2", 115, 1, 129.90),
        RfmEntry::new("0000b849f77a49e4a4ce2b2a4ca5be3f", 118, 1, 18.90),
        RfmEntry::new("0000f46a3911fa3c0805444483337064", 541, 1, 69.00),
        RfmEntry::new("0000f6ccb0745a6a4b88665a16c9f078", 325, 1, 25.99),
        RfmEntry::new("0004aac84e0df4da2b147fca70cf8255", 292, 1, 180.00),
    ];
}

impl RfmEntry {
    fn new(customer_unique_id: &str, recency: u32, frequency: u32, monetary: f64) -> Self {
        RfmEntry {
            customer_unique_id: customer_unique_id.to_string(),
            recency,
            frequency,
            monetary,
        }
    }
}

impl RfmSummary {
    pub fn from_entries(entries: &[RfmEntry]) -> Self {
        if entries.is_empty() {
            return RfmSummary::default();
        }

        let count = entries.len() as f64;
        RfmSummary {
            recency: entries.iter().map(|e| f64::from(e.recency)).sum::<f64>() / count,
            frequency: entries.iter().map(|e| f64::from(e.frequency)).sum::<f64>() / count,
            monetary: entries.iter().map(|e| e.monetary).sum::<f64>() / count,
        }
    }
}
