//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns the crawl loop:
//! - Seeding the frontier
//! - Handing queued URLs to visit tasks, at most `parallelism` at once
//! - Joining finished visits until nothing is queued or running
//! - Stopping early on the crawl deadline or a shutdown signal
//!
//! Each visit fetches its URL, resolves redirects, records the page, and,
//! for alive pages on the seed host, queues the links it finds.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::extract_links;
use crate::crawler::redirect::fetch_and_resolve;
use crate::crawler::scheduler::{Frontier, QueuedUrl, Scheduler};
use crate::registry::PageRegistry;
use crate::state::{Page, Status};
use crate::url::same_host;
use crate::{ConfigError, CrawlError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::Instant;
use url::Url;

/// Completed visits between progress log lines
const PROGRESS_INTERVAL: usize = 10;

/// Result of a finished (or interrupted) crawl
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// The seed the crawl started from
    pub seed: Url,

    /// Every page visited
    pub registry: Arc<PageRegistry>,

    pub started_at: DateTime<Utc>,

    pub finished_at: DateTime<Utc>,

    /// True when the deadline or a shutdown signal cut the crawl short
    pub interrupted: bool,
}

impl CrawlOutcome {
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Why the crawl loop stopped dispatching early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Deadline,
    Shutdown,
}

/// State every visit task needs
struct VisitContext<F> {
    fetcher: F,
    registry: Arc<PageRegistry>,
    frontier: Arc<Frontier>,
    seed: Url,
    max_redirects: u32,
}

/// Main crawler coordinator structure
pub struct Coordinator<F: Fetcher> {
    config: CrawlerConfig,
    scheduler: Scheduler,
    context: Arc<VisitContext<F>>,
    shutdown: Option<watch::Receiver<bool>>,
}

impl<F: Fetcher> Coordinator<F> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `seed` - The URL the crawl starts from; its host scopes the crawl
    /// * `config` - The crawler configuration
    /// * `fetcher` - Issues the GET requests
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlError)` - The configuration leaves no crawl slot
    pub fn new(seed: Url, config: CrawlerConfig, fetcher: F) -> Result<Self, CrawlError> {
        if config.parallelism == 0 {
            return Err(ConfigError::Validation("parallelism must be at least 1".to_string()).into());
        }

        let scheduler = Scheduler::new(config.parallelism as usize);
        let context = VisitContext {
            fetcher,
            registry: Arc::new(PageRegistry::new()),
            frontier: scheduler.frontier(),
            seed,
            max_redirects: config.max_redirects,
        };

        Ok(Self {
            config,
            scheduler,
            context: Arc::new(context),
            shutdown: None,
        })
    }

    /// Stops the crawl once `shutdown` turns true
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Shared handle to the registry this crawl writes to
    pub fn registry(&self) -> Arc<PageRegistry> {
        Arc::clone(&self.context.registry)
    }

    /// Runs the crawl to completion
    ///
    /// Returns once every visit spawned, directly or through the pages it
    /// discovered, has finished. On deadline or shutdown, in-flight visits are
    /// aborted and the partial registry is returned with `interrupted` set.
    pub async fn run(mut self) -> Result<CrawlOutcome, CrawlError> {
        let started_at = Utc::now();
        let start = Instant::now();
        let deadline = self.config.max_duration().map(|d| start + d);
        let mut shutdown = self.shutdown.take();

        tracing::info!(
            "Starting crawl of {} with {} parallel visits",
            self.context.seed,
            self.scheduler.parallelism()
        );

        self.context.frontier.mark_visited(self.context.seed.clone(), 0);

        let mut tasks = JoinSet::new();
        let mut completed = 0usize;
        let mut stopped = None;

        loop {
            // Dispatch everything queued, waiting for slots as needed
            tokio::select! {
                biased;
                reason = wait_for_stop(deadline, shutdown.as_mut()) => {
                    stopped = Some(reason);
                    break;
                }
                dispatched = self.dispatch(&mut tasks) => dispatched?,
            }

            // Nothing queued; wait for a running visit to finish
            let joined = tokio::select! {
                biased;
                reason = wait_for_stop(deadline, shutdown.as_mut()) => {
                    stopped = Some(reason);
                    break;
                }
                joined = tasks.join_next() => joined,
            };

            match joined {
                None => break,
                Some(Ok(())) => {
                    completed += 1;
                    if completed % PROGRESS_INTERVAL == 0 {
                        tracing::info!(
                            "Progress: {} pages visited, {} queued, {} in flight",
                            completed,
                            self.context.frontier.pending_len(),
                            self.scheduler.active()
                        );
                    }
                }
                Some(Err(e)) => {
                    tracing::warn!("Visit task failed: {}", e);
                }
            }
        }

        if let Some(reason) = stopped {
            tracing::warn!(
                "Crawl stopped early ({:?}): aborting {} in-flight visits, {} URLs left unvisited",
                reason,
                tasks.len(),
                self.context.frontier.pending_len()
            );
            tasks.abort_all();
            while tasks.join_next().await.is_some() {}
        }

        let registry = self.registry();
        tracing::info!(
            "Crawl completed: {} pages visited, {} URLs discovered, in {:?}",
            registry.len(),
            self.context.frontier.visited_len(),
            start.elapsed()
        );

        Ok(CrawlOutcome {
            seed: self.context.seed.clone(),
            registry,
            started_at,
            finished_at: Utc::now(),
            interrupted: stopped.is_some(),
        })
    }

    /// Spawns a visit for every queued URL
    ///
    /// Blocks while all slots are taken; running visits free them as they finish.
    async fn dispatch(&self, tasks: &mut JoinSet<()>) -> Result<(), CrawlError> {
        while let Some(scheduled) = self.scheduler.next_visit().await? {
            let context = Arc::clone(&self.context);
            tasks.spawn(async move {
                let _permit = scheduled.permit;
                visit(&context, scheduled.url).await;
            });
        }
        Ok(())
    }
}

/// Visits a single URL
///
/// This function:
/// 1. Fetches the page and follows its redirect chain
/// 2. Records the page with its terminal status
/// 3. For alive pages on the seed host, records each outbound link and
///    queues the ones never seen before
async fn visit<F: Fetcher>(context: &VisitContext<F>, queued: QueuedUrl) {
    let QueuedUrl { url, depth } = queued;
    tracing::debug!("Visiting {} (depth {})", url, depth);

    let resolution = fetch_and_resolve(&context.fetcher, &url, context.max_redirects).await;

    // A redirect that leaves the seed host is not expanded either
    let expand = resolution.status.is_alive()
        && same_host(&url, &context.seed)
        && same_host(&resolution.final_url, &context.seed);

    if let Status::Error { reason } = &resolution.status {
        tracing::debug!("Broken page {}: {}", url, reason);
    }

    let page_url = url.to_string();
    if !context.registry.record_visit(Page::new(url, resolution.status)) {
        return;
    }

    if !expand {
        return;
    }
    let Some(body) = resolution.body else {
        return;
    };

    let links = extract_links(&resolution.final_url, &body);
    let mut queued = 0usize;
    for link in links {
        context.registry.add_link(&page_url, link.as_str());
        if context.frontier.mark_visited(link, depth + 1) {
            queued += 1;
        }
    }

    tracing::trace!("{} queued {} new URLs", page_url, queued);
}

/// Resolves when the deadline passes or shutdown is signalled
///
/// Never resolves if neither is configured.
async fn wait_for_stop(
    deadline: Option<Instant>,
    shutdown: Option<&mut watch::Receiver<bool>>,
) -> StopReason {
    let deadline_reached = async {
        match deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    };

    let shutdown_requested = async {
        match shutdown {
            // A dropped sender can no longer request shutdown
            Some(rx) => {
                let signalled = rx.wait_for(|stop| *stop).await.is_ok();
                if !signalled {
                    std::future::pending::<()>().await;
                }
            }
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        _ = deadline_reached => StopReason::Deadline,
        _ = shutdown_requested => StopReason::Shutdown,
    }
}

/// Runs a complete crawl from `seed`
///
/// # Example
///
/// ```no_run
/// use broken_links::config::Config;
/// use broken_links::crawler::{build_http_client, run_crawl, HttpFetcher};
/// use broken_links::url::parse_seed;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let client = build_http_client(&config.crawler, &config.user_agent)?;
/// let seed = parse_seed("http://www.example.com")?;
/// let outcome = run_crawl(seed, &config.crawler, HttpFetcher::new(client, None)).await?;
/// println!("{} pages", outcome.registry.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl<F: Fetcher>(
    seed: Url,
    config: &CrawlerConfig,
    fetcher: F,
) -> Result<CrawlOutcome, CrawlError> {
    Coordinator::new(seed, config.clone(), fetcher)?.run().await
}
