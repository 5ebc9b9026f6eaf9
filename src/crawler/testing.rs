//! In-memory fetcher for engine tests

use crate::crawler::fetcher::{FetchError, FetchResponse, Fetcher};
use reqwest::header::HeaderValue;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
enum StubReply {
    Response {
        status: u16,
        location: Option<String>,
        body: String,
    },
    Failure(FetchError),
}

/// Serves canned responses by exact URL; unknown URLs answer 404
#[derive(Debug, Default)]
pub struct StubFetcher {
    routes: HashMap<String, StubReply>,
    hits: Mutex<HashMap<String, usize>>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            StubReply::Response {
                status,
                location: None,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn redirect(mut self, url: &str, status: u16, location: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            StubReply::Response {
                status,
                location: Some(location.to_string()),
                body: String::new(),
            },
        );
        self
    }

    pub fn failure(mut self, url: &str, error: FetchError) -> Self {
        self.routes.insert(url.to_string(), StubReply::Failure(error));
        self
    }

    /// Makes every fetch sleep, so visits overlap
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, FetchError> {
        *self
            .hits
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.routes.get(url.as_str()).cloned() {
            Some(StubReply::Response {
                status,
                location,
                body,
            }) => Ok(FetchResponse {
                status: StatusCode::from_u16(status).unwrap(),
                location: location.map(|l| HeaderValue::from_str(&l).unwrap()),
                body,
            }),
            Some(StubReply::Failure(error)) => Err(error),
            None => Ok(FetchResponse {
                status: StatusCode::NOT_FOUND,
                location: None,
                body: String::new(),
            }),
        }
    }
}
