//! External data source clients
//!
//! Each provider gets its own module with a `client` (HTTP plumbing) and
//! typed response models. Failures are classified here but never escape the
//! tick loop: every fetch error is logged and degraded to an "unavailable"
//! value for that cycle.

pub mod ercot;
pub mod tomorrowio;

use thiserror::Error;

/// Why a fetch produced no usable value this tick
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure or timeout
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Expected row/field missing or non-numeric
    #[error("parse error: {0}")]
    Parse(String),
    /// The identifier is not present in the report
    #[error("no data for identifier '{0}'")]
    NoData(String),
}
