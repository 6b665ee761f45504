use std::time::Duration;

/// Base currency assumed when the caller does not name one.
pub const DEFAULT_BASE_CURRENCY: &str = "usd";

/// Only version the upstream service exposes today; kept configurable for
/// forward compatibility.
pub const DEFAULT_API_VERSION: &str = "v1";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Fixed base used for cross-currency conversion. Every snapshot carries
/// rates for all currencies against its base, so one pivot snapshot covers
/// both legs of a conversion.
pub(crate) const PIVOT_CURRENCY: &str = "usd";

/// Upstream URL templates in fallback order: the jsDelivr CDN first, then
/// the Cloudflare Pages mirror. `{date}`, `{version}` and `{endpoint}` are
/// substituted per request.
pub const DEFAULT_BASE_URLS: [&str; 2] = [
    "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@{date}/{version}/{endpoint}",
    "https://{date}.currency-api.pages.dev/{version}/{endpoint}",
];

/// Request timeout, either a single overall deadline or a connect/read pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    Total(Duration),
    ConnectRead { connect: Duration, read: Duration },
}

impl Default for Timeout {
    fn default() -> Self {
        Timeout::Total(DEFAULT_TIMEOUT)
    }
}

impl From<Duration> for Timeout {
    fn from(total: Duration) -> Self {
        Timeout::Total(total)
    }
}

impl From<(Duration, Duration)> for Timeout {
    fn from((connect, read): (Duration, Duration)) -> Self {
        Timeout::ConnectRead { connect, read }
    }
}

/// Settings fixed at client construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Default base currency, stored lowercase.
    pub base_currency: String,
    pub api_version: String,
    pub timeout: Timeout,
    /// URL templates tried in order until one yields a usable snapshot.
    pub base_urls: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Timeout::default(),
            base_urls: DEFAULT_BASE_URLS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_currency: &str, api_version: &str, timeout: impl Into<Timeout>) -> Self {
        Self {
            base_currency: base_currency.to_lowercase(),
            api_version: api_version.to_string(),
            timeout: timeout.into(),
            ..Self::default()
        }
    }

    /// Expand every configured template for one (date, base) request,
    /// preserving fallback order.
    pub(crate) fn candidate_urls(&self, date: &str, base: &str) -> Vec<String> {
        let endpoint = format!("currencies/{base}.json");
        self.base_urls
            .iter()
            .map(|template| {
                template
                    .replace("{date}", date)
                    .replace("{version}", &self.api_version)
                    .replace("{endpoint}", &endpoint)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lowercases_base_currency() {
        let config = ClientConfig::new("EUR", "v1", DEFAULT_TIMEOUT);
        assert_eq!(config.base_currency, "eur");
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_currency, "usd");
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.timeout, Timeout::Total(Duration::from_secs(5)));
        assert_eq!(config.base_urls.len(), 2);
    }

    #[test]
    fn test_candidate_urls_substitute_all_placeholders() {
        let config = ClientConfig::default();
        let urls = config.candidate_urls("latest", "usd");
        assert_eq!(
            urls[0],
            "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/usd.json"
        );
        assert_eq!(
            urls[1],
            "https://latest.currency-api.pages.dev/v1/currencies/usd.json"
        );
    }

    #[test]
    fn test_candidate_urls_use_dated_token() {
        let config = ClientConfig::new("eur", "v2", DEFAULT_TIMEOUT);
        let urls = config.candidate_urls("2024-03-06", "eur");
        assert_eq!(
            urls[0],
            "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@2024-03-06/v2/currencies/eur.json"
        );
        assert_eq!(
            urls[1],
            "https://2024-03-06.currency-api.pages.dev/v2/currencies/eur.json"
        );
    }

    #[test]
    fn test_timeout_from_duration_and_pair() {
        assert_eq!(
            Timeout::from(Duration::from_secs(3)),
            Timeout::Total(Duration::from_secs(3))
        );
        assert_eq!(
            Timeout::from((Duration::from_secs(1), Duration::from_secs(9))),
            Timeout::ConnectRead {
                connect: Duration::from_secs(1),
                read: Duration::from_secs(9),
            }
        );
    }
}
