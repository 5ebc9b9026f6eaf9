//! Summary statistics for a finished crawl

use super::PageReport;
use crate::state::Status;

/// Page counts by outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Total number of pages visited
    pub total: usize,

    /// Pages answered directly with a 2xx
    pub ok: usize,

    /// Pages that reached a 2xx through redirects
    pub redirected: usize,

    /// Pages with an error status
    pub broken: usize,
}

impl CrawlStatistics {
    pub fn from_reports(reports: &[PageReport]) -> Self {
        reports.iter().fold(Self::default(), |mut stats, report| {
            stats.total += 1;
            match report.detail {
                Status::Ok => stats.ok += 1,
                Status::Redirected { .. } => stats.redirected += 1,
                Status::Error { .. } => stats.broken += 1,
            }
            stats
        })
    }

    /// Pages that are reachable, directly or through redirects
    pub fn good(&self) -> usize {
        self.ok + self.redirected
    }

    pub fn has_broken(&self) -> bool {
        self.broken > 0
    }

    /// Share of broken pages, in percent
    pub fn broken_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.broken as f64 / self.total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StatusKind;

    fn report(detail: Status) -> PageReport {
        PageReport {
            url: "http://example.com/".to_string(),
            status: detail.kind(),
            found_in: vec![],
            detail,
        }
    }

    #[test]
    fn test_counts() {
        let reports = vec![
            report(Status::Ok),
            report(Status::Ok),
            report(Status::Redirected {
                redirected_to: "http://example.com/x".to_string(),
            }),
            report(Status::error("Too many redirects")),
        ];

        let stats = CrawlStatistics::from_reports(&reports);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.ok, 2);
        assert_eq!(stats.redirected, 1);
        assert_eq!(stats.good(), 3);
        assert_eq!(stats.broken, 1);
        assert!(stats.has_broken());
        assert!((stats.broken_percentage() - 25.0).abs() < f64::EPSILON);
        assert_eq!(reports[2].status, StatusKind::Ok);
    }

    #[test]
    fn test_empty() {
        let stats = CrawlStatistics::from_reports(&[]);
        assert_eq!(stats, CrawlStatistics::default());
        assert!(!stats.has_broken());
        assert_eq!(stats.broken_percentage(), 0.0);
    }
}
