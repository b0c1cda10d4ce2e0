use std::collections::{HashSet, VecDeque};
use url::Url;

use crate::config::CrawlConfig;
use crate::page;
use crate::render::{PageRenderer, RenderedPage};
use crate::storage::{ObjectStore, StoreError};

/// Storage title for pages without a level-1 heading
const FALLBACK_TITLE: &str = "untitled";

/// Counters reported when a crawl session completes
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages whose processing was initiated
    pub pages_processed: usize,
    /// Pages whose text reached the object store
    pub pages_uploaded: usize,
    /// Fetched URLs discarded as image assets
    pub images_skipped: usize,
    /// Pages that could not be fetched or rendered
    pub fetch_failures: usize,
    /// Pages whose upload was rejected by the store
    pub upload_failures: usize,
}

/// Breadth-first crawl over one wiki domain
///
/// Owns the FIFO queue of URLs awaiting visitation and the set of URLs already
/// visited, together with the rendering and storage collaborators. Pages are
/// processed one at a time, strictly in queue order; the crawl ends when the
/// queue drains or the configured page limit is reached.
pub struct CrawlSession<R, S> {
    config: CrawlConfig,
    renderer: R,
    store: S,
    visited: HashSet<String>,
    queue: VecDeque<String>,
    stats: CrawlStats,
}

impl<R: PageRenderer + Send, S: ObjectStore + Sync> CrawlSession<R, S> {
    /// Create a session seeded with the configured start URL
    pub fn new(config: CrawlConfig, renderer: R, store: S) -> Self {
        let queue = VecDeque::from([config.start_url.clone()]);
        Self {
            config,
            renderer,
            store,
            visited: HashSet::new(),
            queue,
            stats: CrawlStats::default(),
        }
    }

    /// Drive the crawl to completion and return the session counters
    ///
    /// The rendering session is released exactly once, at loop exit, whatever
    /// happened to individual pages.
    pub async fn run(mut self) -> CrawlStats {
        let base = Url::parse(&self.config.base_url).expect("invalid base URL");

        while let Some(url) = self.queue.pop_front() {
            if self.visited.contains(&url) {
                continue;
            }
            if let Some(limit) = self.config.max_pages {
                if self.stats.pages_processed >= limit {
                    ::log::info!("Reached page limit of {}, stopping", limit);
                    break;
                }
            }

            ::log::info!("Scraping: {}", url);
            self.visited.insert(url.clone());
            self.stats.pages_processed += 1;

            let rendered = match self.renderer.render(&url).await {
                Ok(rendered) => rendered,
                Err(e) => {
                    ::log::error!("Error scraping {}: {}", url, e);
                    self.stats.fetch_failures += 1;
                    continue;
                }
            };

            let new_links = self.process_page(&url, &rendered, &base).await;
            self.queue.extend(new_links);
        }

        if let Err(e) = self.renderer.close().await {
            ::log::warn!("Failed to close rendering session: {}", e);
        }

        self.stats
    }

    /// Process one fetched page and return the in-domain links found on it
    ///
    /// Image URLs are dropped whole (the fetch has already happened by the
    /// time this check runs). Everything else gets its derived text uploaded
    /// under a title-derived key; identical sanitized titles overwrite each
    /// other, last write wins.
    async fn process_page(&mut self, url: &str, rendered: &RenderedPage, base: &Url) -> Vec<String> {
        if page::is_image_url(url) {
            ::log::info!("Skipping image URL: {}", url);
            self.stats.images_skipped += 1;
            return Vec::new();
        }

        let title = page::extract_title(&rendered.html)
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());
        let key = page::storage_key(&self.config.key_prefix, &title);

        match self.store.put_text(&key, rendered.text.clone()).await {
            Ok(()) => {
                ::log::info!("Uploaded {} to {}", key, self.config.bucket);
                self.stats.pages_uploaded += 1;
            }
            Err(e @ StoreError::Credentials(_)) => {
                ::log::error!("Credentials error uploading {}: {}", key, e);
                self.stats.upload_failures += 1;
            }
            Err(e) => {
                ::log::error!("Error uploading {} to {}: {}", key, self.config.bucket, e);
                self.stats.upload_failures += 1;
            }
        }

        let mut new_links = Vec::new();
        for href in page::extract_links(&rendered.html) {
            // Relative links resolve against the crawl base, not the page URL
            let resolved = match base.join(&href) {
                Ok(resolved) => resolved.to_string(),
                Err(e) => {
                    ::log::debug!("Ignoring unresolvable href {:?}: {}", href, e);
                    continue;
                }
            };
            if resolved.starts_with(&self.config.base_url) && !self.visited.contains(&resolved) {
                new_links.push(resolved);
            }
        }
        new_links
    }
}
