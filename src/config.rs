use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use config_crate::{Config as RawConfig, ConfigError, Environment, File};

enum Env {
    Development,
    Test,
    Production,
}

impl Env {
    fn new() -> Self {
        match env::var("RUN_MODE") {
            Ok(ref s) if s == "test" => Env::Test,
            Ok(ref s) if s == "production" => Env::Production,
            _ => Env::Development,
        }
    }

    fn to_string(&self) -> &'static str {
        match self {
            &Env::Development => "development",
            &Env::Production => "production",
            &Env::Test => "test",
        }
    }
}

/// Service configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Listen {
    pub host: IpAddr,
    pub port: u16,
}

/// Location of the source extracts and the logo asset
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Data {
    pub dir: String,
    pub orders: String,
    pub customers: String,
    pub order_items: String,
    pub products: String,
    pub sellers: String,
    pub order_reviews: String,
    pub logo: String,
}

impl Data {
    pub fn path(&self, file: &str) -> PathBuf {
        PathBuf::from(&self.dir).join(file)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Server listen address
    pub listen: Listen,
    /// Source files
    pub data: Data,
}

impl Config {
    /// Creates config from base.toml, which are overwritten by <env>.toml, where
    /// env is one of development, test, production. After that it could be overwritten
    /// by env variables like DASHBOARD_LISTEN (this will override `listen` field in config)
    pub fn new() -> Result<Self, ConfigError> {
        let env = Env::new();
        let mut s = RawConfig::new();

        s.set_default("data.dir", ".")?;
        s.set_default("data.orders", "orders_dataset.csv")?;
        s.set_default("data.customers", "customers_dataset.csv")?;
        s.set_default("data.order_items", "order_items_dataset.csv")?;
        s.set_default("data.products", "products_dataset.csv")?;
        s.set_default("data.sellers", "sellers_dataset.csv")?;
        s.set_default("data.order_reviews", "order_reviews_dataset.csv")?;
        s.set_default("data.logo", "logo.2.jpg")?;

        s.merge(File::with_name("config/base"))?;
        // Optional file specific for environment
        s.merge(File::with_name(&format!("config/{}", env.to_string())).required(false))?;

        // Add in settings from the environment (with a prefix of DASHBOARD)
        s.merge(Environment::with_prefix("DASHBOARD"))?;

        s.try_into()
    }
}
