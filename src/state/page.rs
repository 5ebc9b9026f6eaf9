use crate::state::Status;
use url::Url;

/// One visited URL and what its visit found
///
/// `url` is the exact string the page was dispatched under and is the key
/// used for deduplication and for "found in" lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    url: String,
    uri: Url,
    status: Status,
    links: Vec<String>,
}

impl Page {
    /// Creates a page with its terminal status and no links yet
    pub fn new(uri: Url, status: Status) -> Self {
        Self {
            url: uri.to_string(),
            uri,
            status,
            links: Vec::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Outbound navigable links, in discovery order
    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn links_to(&self, url: &str) -> bool {
        self.links.iter().any(|link| link == url)
    }

    /// Appends a link unless the page already has it
    ///
    /// Returns true if the link was new.
    pub(crate) fn push_link(&mut self, url: &str) -> bool {
        if self.links_to(url) {
            return false;
        }
        self.links.push(url.to_string());
        true
    }
}
