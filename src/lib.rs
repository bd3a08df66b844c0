pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod log;
pub mod models;

pub use api::{ExchangeRateApi, RateSource};
pub use error::ConvertError;
pub use models::{Conversion, ConversionRequest, RateTable};
