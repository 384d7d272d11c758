pub mod dashboard;
pub use self::dashboard::*;

pub mod entities;
pub use self::entities::*;

pub mod rfm;
pub use self::rfm::*;

pub mod wide_row;
pub use self::wide_row::*;
