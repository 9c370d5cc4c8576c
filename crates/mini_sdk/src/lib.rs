pub mod builder;
pub mod constants;
pub mod error;
pub mod quote;
pub mod router;
pub mod strategy;
pub mod submitter;
pub mod units;

pub use error::Error;

