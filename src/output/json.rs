//! JSON report

use super::PageReport;

/// Serializes the reports as a pretty-printed JSON array
///
/// Each entry has `url`, `status` (`"ok"` or `"error"`) and `found_in`.
pub fn render_json(reports: &[PageReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}
