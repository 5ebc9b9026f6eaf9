//! Terminal status definitions for visited pages
//!
//! A status is assigned once, when a page's visit finishes resolving its
//! redirect chain, and never changes afterwards.

use serde::Serialize;
use std::fmt;

/// Reason recorded for any non-success HTTP status
pub const UNKNOWN_RESPONSE: &str = "Unknown Response";

/// Reason recorded when a redirect chain exceeds the hop limit
pub const TOO_MANY_REDIRECTS: &str = "Too many redirects";

/// Reason recorded for a 3xx response without a Location header
pub const MISSING_LOCATION: &str = "Redirect without Location header";

/// Terminal classification of a visited page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The page answered 2xx directly
    Ok,

    /// The page answered 2xx after one or more redirect hops
    Redirected { redirected_to: String },

    /// The page could not be fetched or did not end in a 2xx
    Error { reason: String },
}

/// Wire-level status kind used by the JSON report
///
/// Redirected pages report as `ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Ok,
    Error,
}

impl Status {
    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error {
            reason: reason.into(),
        }
    }

    /// Returns true if the page is reachable (directly or through redirects)
    ///
    /// Only alive pages on the seed host are expanded for further links.
    pub fn is_alive(&self) -> bool {
        match self {
            Self::Ok | Self::Redirected { .. } => true,
            Self::Error { .. } => false,
        }
    }

    /// Returns true if this page counts as broken
    pub fn is_error(&self) -> bool {
        !self.is_alive()
    }

    pub fn kind(&self) -> StatusKind {
        match self {
            Self::Ok | Self::Redirected { .. } => StatusKind::Ok,
            Self::Error { .. } => StatusKind::Error,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "[OK]"),
            Self::Redirected { redirected_to } => write!(f, "[REDIRECTED] -> {}", redirected_to),
            Self::Error { reason } => write!(f, "[ERROR] - {}", reason),
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Error => write!(f, "error"),
        }
    }
}
