pub mod types;
pub use self::types::*;

pub mod analytics;
pub mod filter;

pub mod dashboard;
pub use self::dashboard::*;
