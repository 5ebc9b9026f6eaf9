//! Console report with coloured page statuses

use super::{CrawlStatistics, PageReport};
use crate::crawler::CrawlOutcome;
use crate::state::Status;
use console::{style, StyledObject};
use std::fmt::Write;

fn styled_status(status: &Status) -> StyledObject<String> {
    let text = status.to_string();
    match status {
        Status::Ok => style(text).green(),
        Status::Redirected { .. } => style(text).yellow(),
        Status::Error { .. } => style(text).red().bold(),
    }
}

/// Renders the per-page listing followed by the summary
pub fn render_report(reports: &[PageReport], outcome: &CrawlOutcome) -> String {
    let mut out = String::new();

    for report in reports {
        let _ = writeln!(out, "{} {}", report.url, styled_status(&report.detail));
        if !report.found_in.is_empty() {
            let _ = writeln!(out, "  {}", style("Found in:").dim());
            for origin in &report.found_in {
                let _ = writeln!(out, "    {}", origin);
            }
        }
    }

    let stats = CrawlStatistics::from_reports(reports);
    if !reports.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "Total: {}, Good: {}, Broken: {}",
        stats.total,
        style(stats.good()).green(),
        if stats.has_broken() {
            style(stats.broken).red().bold()
        } else {
            style(stats.broken).green()
        }
    );
    if stats.redirected > 0 {
        let _ = writeln!(out, "  ({} of the good pages were redirected)", stats.redirected);
    }

    let elapsed = outcome.duration();
    let _ = writeln!(
        out,
        "Checked {} in {}.{:03}s",
        outcome.seed,
        elapsed.num_seconds(),
        elapsed.num_milliseconds().rem_euclid(1000)
    );

    if outcome.interrupted {
        let _ = writeln!(
            out,
            "{} Crawl was interrupted; results are partial",
            style("!").yellow()
        );
    }

    out
}

/// Prints the report to stdout
pub fn print_report(reports: &[PageReport], outcome: &CrawlOutcome) {
    print!("{}", render_report(reports, outcome));
}
