//! Error types for rate retrieval and conversion.

use chrono::NaiveDate;
use thiserror::Error;

/// One failed attempt against a single upstream host. The fallback loop
/// records these and surfaces the last one inside [`RateError::Retrieval`].
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection failure or timeout before a response arrived.
    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The host answered with something other than 200.
    #[error("HTTP {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The body was not valid JSON.
    #[error("malformed JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but lacks the field named after the requested
    /// base currency.
    #[error("response from {url} is missing base currency '{base}'")]
    MissingBase { url: String, base: String },

    /// A rate value in the document is not a JSON number.
    #[error("non-numeric rate for '{code}' in response from {url}")]
    NonNumericRate { url: String, code: String },

    /// The configured template list is empty, so no request was attempted.
    #[error("no upstream hosts configured")]
    NoHostsConfigured,
}

/// Errors surfaced by [`RateClient`](crate::RateClient) operations.
#[derive(Error, Debug)]
pub enum RateError {
    /// Every configured host failed for this (date, base); carries the last
    /// failure encountered.
    #[error("failed to fetch rates for {base} on {date}: {source}")]
    Retrieval {
        date: String,
        base: String,
        #[source]
        source: FetchError,
    },

    /// A requested or implied currency code is not in the fetched snapshot.
    #[error("unknown currency code(s): {}", .codes.join(", "))]
    UnknownCurrency { codes: Vec<String> },

    /// A date string does not match the required YYYY-MM-DD format.
    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// A historical range was given with its bounds reversed.
    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// The amount passed to convert is NaN or infinite.
    #[error("amount must be a finite number, got {0}")]
    InvalidAmount(f64),
}
