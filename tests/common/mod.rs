//! Shared test support: a canned-response transport with call counting.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use currency_rates::{ClientConfig, FetchError, Transport};

pub const PRIMARY: &str = "https://primary.test/{date}/{version}/{endpoint}";
pub const FALLBACK: &str = "https://fallback.test/{date}/{version}/{endpoint}";

/// Transport serving canned JSON documents and counting every request. URLs
/// without a registered document answer 404, which sends the client on to
/// its next host.
pub struct MockTransport {
    routes: Mutex<HashMap<String, Value>>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn route(&self, url: &str, payload: Value) {
        self.routes
            .lock()
            .expect("routes lock")
            .insert(url.to_string(), payload);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let routes = self.routes.lock().expect("routes lock");
        match routes.get(url) {
            Some(payload) => Ok(payload.clone()),
            None => Err(FetchError::Status {
                status: reqwest::StatusCode::NOT_FOUND,
                url: url.to_string(),
            }),
        }
    }
}

/// Config pointing at the two test hosts instead of the real CDN.
pub fn test_config() -> ClientConfig {
    ClientConfig {
        base_urls: vec![PRIMARY.to_string(), FALLBACK.to_string()],
        ..ClientConfig::default()
    }
}

pub fn primary_url(date: &str, base: &str) -> String {
    format!("https://primary.test/{date}/v1/currencies/{base}.json")
}

pub fn fallback_url(date: &str, base: &str) -> String {
    format!("https://fallback.test/{date}/v1/currencies/{base}.json")
}

/// A small usd-based snapshot document in the upstream wire shape.
pub fn usd_payload() -> Value {
    json!({
        "date": "2025-08-05",
        "usd": { "usd": 1.0, "eur": 0.92, "gbp": 0.79, "jpy": 147.1 }
    })
}
