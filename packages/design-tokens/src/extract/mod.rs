//! Per-category extractors.
//!
//! Each extractor visits every supplied page through one render session,
//! buckets raw values into a page-local tally, merges tallies into its
//! run-level aggregate, and finalizes the aggregate into a sorted token
//! array. The page loop, session lifecycle, and error policy are shared;
//! the selector sets, dedup keys, and conversions are per category.

mod animation;
mod border;
mod color;
mod spacing;
mod typography;

pub use animation::AnimationExtractor;
pub use border::BorderExtractor;
pub use color::ColorExtractor;
pub use spacing::SpacingExtractor;
pub use typography::TypographyExtractor;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{PageResult, Result};
use crate::traits::page::{PageDescriptor, PageHandle, RenderEngine, RenderSession};
use crate::types::token::Token;

/// Statistics for one category run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractStats {
    /// Pages whose styles were read successfully
    pub pages_visited: usize,

    /// URLs of pages that failed to load or evaluate
    pub failed_pages: Vec<String>,

    /// Raw observations recorded across all pages
    pub samples: usize,

    /// Aggregate entries skipped because conversion failed
    pub skipped_samples: usize,

    /// Aggregate entries dropped below the occurrence threshold
    pub below_threshold: usize,

    /// Emitted tokens per sub-category
    pub token_counts: IndexMap<String, usize>,
}

impl ExtractStats {
    /// True when every page was processed without error.
    pub fn is_clean(&self) -> bool {
        self.failed_pages.is_empty()
    }
}

/// Output of one category run: tokens sorted by usage plus run statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: String,
    pub tokens: Vec<Token>,
    pub stats: ExtractStats,
}

impl CategoryReport {
    /// Look up a token by name.
    pub fn token(&self, name: &str) -> Option<&Token> {
        self.tokens.iter().find(|token| token.name == name)
    }
}

/// The per-category half of the shared page loop: read one page into a
/// tally, and fold a tally into the run-level accumulator.
#[async_trait]
pub(crate) trait StyleCollector: Sync {
    type Tally: Send;
    type Acc: Default + Send;

    async fn collect(&self, page: &dyn PageHandle) -> PageResult<Self::Tally>;

    /// Fold one page's tally into the accumulator; returns the number of
    /// raw observations the tally carried.
    fn absorb(&self, acc: &mut Self::Acc, url: &str, tally: Self::Tally) -> usize;
}

/// Visit pages strictly in the supplied order, one at a time.
///
/// Page failures are logged and recorded, never propagated; cancellation
/// is honored between pages only.
pub(crate) async fn visit_pages<C: StyleCollector>(
    collector: &C,
    session: &dyn RenderSession,
    pages: &[PageDescriptor],
    cancel: Option<&CancellationToken>,
    acc: &mut C::Acc,
    stats: &mut ExtractStats,
) {
    for descriptor in pages {
        if let Some(token) = cancel {
            if token.is_cancelled() {
                info!(url = %descriptor.url, "cancellation requested, stopping before page");
                break;
            }
        }

        let outcome = match &descriptor.handle {
            Some(handle) => collector.collect(handle.as_ref()).await,
            None => match session.render(&descriptor.url).await {
                Ok(page) => collector.collect(page.as_ref()).await,
                Err(error) => Err(error),
            },
        };

        match outcome {
            Ok(tally) => {
                stats.pages_visited += 1;
                stats.samples += collector.absorb(acc, &descriptor.url, tally);
            }
            Err(error) => {
                warn!(url = %descriptor.url, error = %error, "skipping page");
                stats.failed_pages.push(descriptor.url.clone());
            }
        }
    }
}

/// Acquire a session, run the page loop, and release the session on every
/// exit path. Engine acquisition failure is the only fatal error.
pub(crate) async fn run_collection<C: StyleCollector>(
    collector: &C,
    engine: &dyn RenderEngine,
    pages: &[PageDescriptor],
    cancel: Option<&CancellationToken>,
) -> Result<(C::Acc, ExtractStats)> {
    let session = engine.acquire().await?;

    let mut acc = C::Acc::default();
    let mut stats = ExtractStats::default();
    visit_pages(collector, session.as_ref(), pages, cancel, &mut acc, &mut stats).await;

    if let Err(error) = session.close().await {
        warn!(error = %error, "render session close failed");
    }

    debug!(
        pages = stats.pages_visited,
        failed = stats.failed_pages.len(),
        samples = stats.samples,
        "page visits complete"
    );

    Ok((acc, stats))
}

/// Tally the emitted tokens per sub-category into the run statistics.
pub(crate) fn count_tokens(stats: &mut ExtractStats, tokens: &[Token]) {
    for token in tokens {
        *stats.token_counts.entry(token.category.clone()).or_insert(0) += 1;
    }
}
