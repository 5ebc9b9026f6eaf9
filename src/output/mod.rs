//! Output module for crawl reports
//!
//! This module handles:
//! - Building per-page reports from the registry
//! - The JSON report
//! - The coloured console report
//! - Summary statistics

mod human;
mod json;
pub mod stats;

pub use human::{print_report, render_report};
pub use json::render_json;
pub use stats::CrawlStatistics;

use crate::registry::PageRegistry;
use crate::state::{Status, StatusKind};
use serde::Serialize;

/// One visited page as it appears in reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReport {
    pub url: String,

    /// Coarse status; redirected pages count as `ok`
    pub status: StatusKind,

    /// Pages whose links include this page
    pub found_in: Vec<String>,

    /// Full status, shown by the console report only
    #[serde(skip)]
    pub detail: Status,
}

/// Builds a report entry for every page, in registry order
pub fn build_report(registry: &PageRegistry) -> Vec<PageReport> {
    registry
        .pages()
        .into_iter()
        .map(|page| PageReport {
            found_in: registry.find_origins(page.url()),
            url: page.url().to_string(),
            status: page.status().kind(),
            detail: page.status().clone(),
        })
        .collect()
}
