pub mod dexscreener;
mod error;
pub mod zerox;

pub use error::Error;
