pub mod client;
pub mod report;

pub use client::ErcotClient;
pub use report::{PriceQuote, PriceReport};
