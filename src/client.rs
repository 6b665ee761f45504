//! The rate client: cached snapshot retrieval with host fallback, plus the
//! conversion and range operations built on top of it.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::SnapshotCache;
use crate::config::{ClientConfig, PIVOT_CURRENCY};
use crate::error::{FetchError, RateError};
use crate::models::{DateInput, RateSnapshot, SnapshotDocument};
use crate::transport::{HttpTransport, Transport};

/// Date token resolving to the most recent upstream snapshot.
pub const LATEST: &str = "latest";

/// Client for the free daily exchange rate dataset.
///
/// Fetched snapshots are cached per (date, base) for the lifetime of the
/// instance; `clear_cache` or a fresh instance forces a refetch. The cache is
/// a plain map, so a client is meant for single-threaded use. Wrap the whole
/// client in a mutex if it must be shared.
pub struct RateClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    cache: SnapshotCache,
}

impl RateClient {
    /// Build a client over the production HTTP transport.
    pub fn new(config: ClientConfig) -> Self {
        let transport = Arc::new(HttpTransport::new(config.timeout));
        Self::with_transport(config, transport)
    }

    /// Build a client over a custom transport. Used by tests and by callers
    /// who want to stub the upstream service.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            cache: SnapshotCache::default(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Retrieve exchange rates for a base currency and date.
    ///
    /// `base` defaults to the configured base currency and `date` to
    /// [`LATEST`]; both are case-insensitive. With `symbols`, the result is
    /// restricted to exactly those codes and any code missing from the
    /// snapshot is an [`RateError::UnknownCurrency`]. Without `symbols` (or
    /// with an empty slice) the full snapshot is returned as a copy.
    pub async fn get_rates(
        &mut self,
        base: Option<&str>,
        date: Option<&str>,
        symbols: Option<&[&str]>,
    ) -> Result<RateSnapshot, RateError> {
        let base = base.unwrap_or(&self.config.base_currency).to_lowercase();
        let date = date.unwrap_or(LATEST).to_string();
        let rates = self.snapshot(&date, &base).await?;

        match symbols {
            Some(wanted) if !wanted.is_empty() => {
                let wanted: Vec<String> = wanted.iter().map(|code| code.to_lowercase()).collect();
                let mut missing: Vec<String> = wanted
                    .iter()
                    .filter(|code| !rates.contains_key(*code))
                    .cloned()
                    .collect();
                if !missing.is_empty() {
                    missing.sort();
                    missing.dedup();
                    return Err(RateError::UnknownCurrency { codes: missing });
                }
                Ok(wanted
                    .into_iter()
                    .map(|code| {
                        let rate = rates[&code];
                        (code, rate)
                    })
                    .collect())
            }
            _ => Ok(rates),
        }
    }

    /// Convert an amount from one currency to another.
    ///
    /// `from_currency` defaults to the configured base currency and `date`
    /// to [`LATEST`]. Both legs are priced off a single snapshot for the
    /// fixed pivot currency, which every snapshot lists all codes against,
    /// so only one fetch is ever needed.
    pub async fn convert(
        &mut self,
        amount: f64,
        to_currency: &str,
        from_currency: Option<&str>,
        date: Option<&str>,
    ) -> Result<f64, RateError> {
        if !amount.is_finite() {
            return Err(RateError::InvalidAmount(amount));
        }

        let from = from_currency
            .unwrap_or(&self.config.base_currency)
            .to_lowercase();
        let to = to_currency.to_lowercase();
        let date = date.unwrap_or(LATEST).to_string();

        let rates = self.snapshot(&date, PIVOT_CURRENCY).await?;
        let rate_from = *rates
            .get(&from)
            .ok_or_else(|| RateError::UnknownCurrency {
                codes: vec![from.clone()],
            })?;
        let rate_to = *rates.get(&to).ok_or_else(|| RateError::UnknownCurrency {
            codes: vec![to.clone()],
        })?;

        // Rates are pivot -> target: dividing moves the amount into pivot
        // units, multiplying moves it into the target. The pivot lists
        // itself at 1.0, so pivot-to-pivot needs no special case.
        Ok(amount / rate_from * rate_to)
    }

    /// Retrieve rates for every calendar day from `start` to `end`
    /// inclusive, keyed by ISO date ascending.
    ///
    /// Bounds are accepted as `chrono::NaiveDate` or `YYYY-MM-DD` strings.
    /// A failure on any single day aborts the whole range; there is no
    /// skip-and-continue mode.
    pub async fn get_historical_rates(
        &mut self,
        start: impl Into<DateInput>,
        end: impl Into<DateInput>,
        base: Option<&str>,
        symbols: Option<&[&str]>,
    ) -> Result<BTreeMap<String, RateSnapshot>, RateError> {
        let start = start.into().resolve()?;
        let end = end.into().resolve()?;
        if start > end {
            return Err(RateError::InvalidDateRange { start, end });
        }

        let mut series = BTreeMap::new();
        let mut day = start;
        while day <= end {
            let token = day.format("%Y-%m-%d").to_string();
            let rates = self.get_rates(base, Some(&token), symbols).await?;
            series.insert(token, rates);
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        Ok(series)
    }

    /// All currency codes present in the pivot snapshot for the given date,
    /// sorted ascending and lowercase.
    pub async fn available_currencies(
        &mut self,
        date: Option<&str>,
    ) -> Result<Vec<String>, RateError> {
        let date = date.unwrap_or(LATEST).to_string();
        let rates = self.snapshot(&date, PIVOT_CURRENCY).await?;
        let mut codes: Vec<String> = rates.into_keys().collect();
        codes.sort();
        Ok(codes)
    }

    /// Drop every cached snapshot; subsequent operations hit the network
    /// again.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Cached retrieval primitive: cache hit first, otherwise each host in
    /// fallback order until one yields a usable snapshot. First success is
    /// cached and returned; if every host fails, the last failure is
    /// reported. Failed fetches are never cached.
    async fn snapshot(&mut self, date: &str, base: &str) -> Result<RateSnapshot, RateError> {
        if let Some(hit) = self.cache.get(date, base) {
            debug!(date, base, "snapshot cache hit");
            return Ok(hit);
        }

        let mut last_error: Option<FetchError> = None;
        for url in self.config.candidate_urls(date, base) {
            match self.transport.get_json(&url).await {
                Ok(payload) => match extract_snapshot(payload, base, &url) {
                    Ok(snapshot) => {
                        debug!(date, base, %url, codes = snapshot.len(), "fetched snapshot");
                        self.cache.insert(date, base, snapshot.clone());
                        return Ok(snapshot);
                    }
                    Err(error) => {
                        warn!(%url, %error, "unusable response, trying next host");
                        last_error = Some(error);
                    }
                },
                Err(error) => {
                    warn!(%url, %error, "fetch failed, trying next host");
                    last_error = Some(error);
                }
            }
        }

        Err(RateError::Retrieval {
            date: date.to_string(),
            base: base.to_string(),
            source: last_error.unwrap_or(FetchError::NoHostsConfigured),
        })
    }
}

/// Pull the rate table out of a snapshot document: the field named after the
/// base currency must exist and hold an object of numeric rates. Keys are
/// normalized to lowercase.
fn extract_snapshot(payload: Value, base: &str, url: &str) -> Result<RateSnapshot, FetchError> {
    let document: SnapshotDocument =
        serde_json::from_value(payload).map_err(|source| FetchError::Json {
            url: url.to_string(),
            source,
        })?;
    if let Some(published) = document.date.as_deref() {
        debug!(published, "snapshot publication date");
    }

    let table = document
        .tables
        .get(base)
        .and_then(Value::as_object)
        .ok_or_else(|| FetchError::MissingBase {
            url: url.to_string(),
            base: base.to_string(),
        })?;

    let mut rates = HashMap::with_capacity(table.len());
    for (code, value) in table {
        let rate = value.as_f64().ok_or_else(|| FetchError::NonNumericRate {
            url: url.to_string(),
            code: code.clone(),
        })?;
        rates.insert(code.to_lowercase(), rate);
    }
    Ok(rates)
}
