//! Page registry for crawl results
//!
//! The registry is the shared record of every visited page and its outbound
//! links. Visits running in parallel write to it through a single lock; the
//! reporting layer reads it once the crawl is over.

use crate::state::{Page, Status};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct RegistryInner {
    /// Pages in the order their visits were recorded
    pages: Vec<Page>,

    /// URL -> position in `pages`
    index: HashMap<String, usize>,
}

/// Thread-safe collection of visited pages
#[derive(Debug, Default)]
pub struct PageRegistry {
    inner: Mutex<RegistryInner>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        // A panicking visit cannot leave a page half-written, so the data is
        // still consistent after poisoning.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a page whose status has been resolved
    ///
    /// An existing entry for the same URL is never overwritten. Returns false
    /// if the URL was already recorded.
    pub fn record_visit(&self, page: Page) -> bool {
        let mut inner = self.lock();
        if inner.index.contains_key(page.url()) {
            tracing::warn!("Page {} already recorded, keeping first visit", page.url());
            return false;
        }
        let position = inner.pages.len();
        inner.index.insert(page.url().to_string(), position);
        inner.pages.push(page);
        true
    }

    /// Appends `link` to the outbound links of the page recorded under `page_url`
    ///
    /// Returns true if the link was added, false if the page is unknown or
    /// already has the link.
    pub fn add_link(&self, page_url: &str, link: &str) -> bool {
        let mut inner = self.lock();
        let Some(&position) = inner.index.get(page_url) else {
            tracing::debug!("Dropping link {} from unrecorded page {}", link, page_url);
            return false;
        };
        inner
            .pages
            .get_mut(position)
            .map(|page| page.push_link(link))
            .unwrap_or(false)
    }

    /// Returns the URLs of every page whose links include `url`
    ///
    /// The scan covers all pages, in registry order.
    pub fn find_origins(&self, url: &str) -> Vec<String> {
        self.lock()
            .pages
            .iter()
            .filter(|page| page.links_to(url))
            .map(|page| page.url().to_string())
            .collect()
    }

    /// Returns a copy of the page recorded under `url`
    pub fn get(&self, url: &str) -> Option<Page> {
        let inner = self.lock();
        inner
            .index
            .get(url)
            .and_then(|&position| inner.pages.get(position))
            .cloned()
    }

    pub fn status_of(&self, url: &str) -> Option<Status> {
        self.get(url).map(|page| page.status().clone())
    }

    /// Returns a snapshot of all pages, in registry order
    pub fn pages(&self) -> Vec<Page> {
        self.lock().pages.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().pages.is_empty()
    }
}
