use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

use failure::Error as FailureError;
use failure::ResultExt;

use config::Data;
use errors::LoadError;
use models::*;

pub mod join;
pub mod records;

use self::join::join_tables;
use self::records::*;

/// The joined table plus the tables that are loaded but never joined.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub rows: Vec<WideRow>,
    pub sellers: Vec<Seller>,
}

/// Anything that can produce the full dataset in one go.
pub trait DatasetSource {
    fn load(&self) -> Result<Dataset, FailureError>;
}

/// Reads the six extracts from the configured data directory.
#[derive(Clone, Debug)]
pub struct CsvDatasetSource {
    config: Data,
}

impl CsvDatasetSource {
    pub fn new(config: Data) -> Self {
        CsvDatasetSource { config }
    }

    fn open(&self, file: &str) -> Result<File, FailureError> {
        let path = self.config.path(file);
        let file = File::open(&path).context(LoadError::Open {
            path: path.display().to_string(),
        })?;
        Ok(file)
    }

    fn read<T: ::serde::de::DeserializeOwned>(&self, table: &'static str, file: &str) -> Result<Vec<T>, FailureError> {
        let records = read_table(table, self.open(file)?)?;
        debug!("Read {} rows from {} table", records.len(), table);
        Ok(records)
    }
}

impl DatasetSource for CsvDatasetSource {
    fn load(&self) -> Result<Dataset, FailureError> {
        info!("Loading dataset from {}", self.config.dir);

        let orders = self
            .read::<OrderRecord>("orders", &self.config.orders)?
            .into_iter()
            .map(OrderRecord::into_order)
            .collect::<Result<Vec<_>, _>>()?;
        let customers = self
            .read::<CustomerRecord>("customers", &self.config.customers)?
            .into_iter()
            .map(Customer::from)
            .collect::<Vec<_>>();
        let items = self
            .read::<OrderItemRecord>("order_items", &self.config.order_items)?
            .into_iter()
            .map(OrderItem::from)
            .collect::<Vec<_>>();
        let products = self
            .read::<ProductRecord>("products", &self.config.products)?
            .into_iter()
            .map(Product::from)
            .collect::<Vec<_>>();
        let sellers = self
            .read::<SellerRecord>("sellers", &self.config.sellers)?
            .into_iter()
            .map(Seller::from)
            .collect::<Vec<_>>();
        let reviews = self
            .read::<OrderReviewRecord>("order_reviews", &self.config.order_reviews)?
            .into_iter()
            .map(OrderReview::from)
            .collect::<Vec<_>>();

        let rows = join_tables(&orders, &customers, &items, &products, &reviews);
        info!(
            "Joined {} orders, {} customers, {} items, {} products, {} reviews into {} rows ({} sellers not joined)",
            orders.len(),
            customers.len(),
            items.len(),
            products.len(),
            reviews.len(),
            rows.len(),
            sellers.len()
        );

        Ok(Dataset { rows, sellers })
    }
}

/// Memoizes the first successful load for the lifetime of the process.
pub struct DatasetCache<S> {
    source: S,
    dataset: Mutex<Option<Arc<Dataset>>>,
}

impl<S: DatasetSource> DatasetCache<S> {
    pub fn new(source: S) -> Self {
        DatasetCache {
            source,
            dataset: Mutex::new(None),
        }
    }

    pub fn get(&self) -> Result<Arc<Dataset>, FailureError> {
        let mut dataset = self.dataset.lock().map_err(|_| format_err!("DatasetCache: poisoned mutex"))?;
        if let Some(ref cached) = *dataset {
            debug!("Dataset served from cache");
            return Ok(cached.clone());
        }

        let loaded = Arc::new(self.source.load()?);
        *dataset = Some(loaded.clone());
        Ok(loaded)
    }
}

/// Reads the logo asset shown at the top of the page.
pub fn load_logo(path: &Path) -> Result<Vec<u8>, FailureError> {
    let bytes = ::std::fs::read(path).context(LoadError::Logo {
        path: path.display().to_string(),
    })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingSource {
        loads: Cell<usize>,
    }

    impl DatasetSource for CountingSource {
        fn load(&self) -> Result<Dataset, FailureError> {
            self.loads.set(self.loads.get() + 1);
            Ok(Dataset::default())
        }
    }

    struct FailingSource;

    impl DatasetSource for FailingSource {
        fn load(&self) -> Result<Dataset, FailureError> {
            Err(LoadError::Open {
                path: "orders_dataset.csv".to_string(),
            }.into())
        }
    }

    #[test]
    fn test_cache_loads_once() {
        let cache = DatasetCache::new(CountingSource { loads: Cell::new(0) });

        for _ in 0..5 {
            cache.get().unwrap();
        }

        assert_eq!(cache.source.loads.get(), 1);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let cache = DatasetCache::new(FailingSource);

        assert!(cache.get().is_err());
        assert!(cache.dataset.lock().unwrap().is_none());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let source = CsvDatasetSource::new(Data {
            dir: "/nonexistent".to_string(),
            orders: "orders_dataset.csv".to_string(),
            customers: "customers_dataset.csv".to_string(),
            order_items: "order_items_dataset.csv".to_string(),
            products: "products_dataset.csv".to_string(),
            sellers: "sellers_dataset.csv".to_string(),
            order_reviews: "order_reviews_dataset.csv".to_string(),
            logo: "logo.2.jpg".to_string(),
        });

        let error = source.load().unwrap_err();
        assert!(error.to_string().contains("/nonexistent/orders_dataset.csv"));
    }
}
