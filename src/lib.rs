//! Client for free, keyless daily exchange rate data.
//!
//! Snapshots are published per date and base currency by a public CDN, with
//! a mirror as fallback. This crate wraps those endpoints with an in-memory
//! per-(date, base) cache and adds conversion, historical series and
//! currency listing on top.
//!
//! ```no_run
//! use currency_rates::{ClientConfig, RateClient};
//!
//! # async fn demo() -> Result<(), currency_rates::RateError> {
//! let mut client = RateClient::new(ClientConfig::default());
//! let eur = client.convert(100.0, "eur", None, None).await?;
//! println!("100 usd = {eur} eur");
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{RateClient, LATEST};
pub use config::{ClientConfig, Timeout};
pub use error::{FetchError, RateError};
pub use models::{DateInput, RateSnapshot};
pub use transport::{HttpTransport, Transport};
