//! Run orchestration: every enabled category over one page list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::Result;
use crate::extract::{
    AnimationExtractor, BorderExtractor, CategoryReport, ColorExtractor, SpacingExtractor,
    TypographyExtractor,
};
use crate::traits::page::{PageDescriptor, RenderEngine};
use crate::types::config::ExtractionConfig;
use crate::types::token::Token;

/// Combined output of one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenReport {
    pub colors: Option<CategoryReport>,
    pub typography: Option<CategoryReport>,
    pub spacing: Option<CategoryReport>,
    pub borders: Option<CategoryReport>,
    pub animation: Option<CategoryReport>,
    pub generated_at: DateTime<Utc>,
}

impl TokenReport {
    fn new() -> Self {
        Self {
            colors: None,
            typography: None,
            spacing: None,
            borders: None,
            animation: None,
            generated_at: Utc::now(),
        }
    }

    /// Reports for the categories that actually ran.
    pub fn categories(&self) -> Vec<&CategoryReport> {
        [
            self.colors.as_ref(),
            self.typography.as_ref(),
            self.spacing.as_ref(),
            self.borders.as_ref(),
            self.animation.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Every emitted token across categories.
    pub fn all_tokens(&self) -> impl Iterator<Item = &Token> {
        self.categories()
            .into_iter()
            .flat_map(|report| report.tokens.iter())
    }

    /// Total emitted tokens.
    pub fn token_count(&self) -> usize {
        self.categories()
            .iter()
            .map(|report| report.tokens.len())
            .sum()
    }

    /// Pages that failed in at least one category run.
    pub fn failed_pages(&self) -> Vec<&str> {
        let mut failed: Vec<&str> = self
            .categories()
            .iter()
            .flat_map(|report| report.stats.failed_pages.iter().map(String::as_str))
            .collect();
        failed.sort_unstable();
        failed.dedup();
        failed
    }
}

/// Runs each enabled category extractor in sequence over the crawler's
/// page list.
///
/// Each category acquires and releases its own render session; page and
/// sample failures stay local to their category run, while an engine that
/// cannot start aborts the run with no partial output for it.
pub struct ExtractionPipeline<E> {
    engine: E,
    config: ExtractionConfig,
}

impl<E: RenderEngine> ExtractionPipeline<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            config: ExtractionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub async fn run(&self, pages: &[PageDescriptor]) -> Result<TokenReport> {
        self.run_with_cancel(pages, None).await
    }

    pub async fn run_with_cancel(
        &self,
        pages: &[PageDescriptor],
        cancel: Option<&CancellationToken>,
    ) -> Result<TokenReport> {
        info!(pages = pages.len(), "starting token extraction run");
        let naming = self.config.naming.clone();
        let mut report = TokenReport::new();

        if self.config.colors.enabled {
            let extractor = ColorExtractor::new(self.config.colors.clone(), naming.clone());
            report.colors = Some(
                extractor
                    .extract_with_cancel(&self.engine, pages, cancel)
                    .await?,
            );
        }

        if self.config.typography.enabled {
            let extractor =
                TypographyExtractor::new(self.config.typography.clone(), naming.clone());
            report.typography = Some(
                extractor
                    .extract_with_cancel(&self.engine, pages, cancel)
                    .await?,
            );
        }

        if self.config.spacing.enabled {
            let extractor = SpacingExtractor::new(self.config.spacing.clone(), naming.clone());
            report.spacing = Some(
                extractor
                    .extract_with_cancel(&self.engine, pages, cancel)
                    .await?,
            );
        }

        if self.config.borders.enabled {
            let extractor = BorderExtractor::new(self.config.borders.clone(), naming.clone());
            report.borders = Some(
                extractor
                    .extract_with_cancel(&self.engine, pages, cancel)
                    .await?,
            );
        }

        if self.config.animation.enabled {
            let extractor = AnimationExtractor::new(self.config.animation.clone(), naming);
            report.animation = Some(
                extractor
                    .extract_with_cancel(&self.engine, pages, cancel)
                    .await?,
            );
        }

        info!(
            tokens = report.token_count(),
            failed_pages = report.failed_pages().len(),
            "token extraction run complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockPage, MockRenderEngine};

    #[tokio::test]
    async fn test_disabled_categories_do_not_run() {
        let page = MockPage::new("https://a/")
            .with_element("p", &[("color", "rgb(0, 0, 0)"), ("margin", "16px")]);
        let engine = MockRenderEngine::new().with_page(page);

        let mut config = ExtractionConfig::new().with_minimum_occurrences(1);
        config.typography.enabled = false;
        config.borders.enabled = false;
        config.animation.enabled = false;

        let pipeline = ExtractionPipeline::new(engine).with_config(config);
        let report = pipeline
            .run(&[PageDescriptor::new("https://a/")])
            .await
            .unwrap();

        assert!(report.colors.is_some());
        assert!(report.spacing.is_some());
        assert!(report.typography.is_none());
        assert!(report.borders.is_none());
        assert!(report.animation.is_none());
        assert_eq!(report.token_count(), 2);
    }

    #[tokio::test]
    async fn test_each_category_gets_its_own_session() {
        let page = MockPage::new("https://a/").with_element("p", &[("color", "rgb(0, 0, 0)")]);
        let engine = MockRenderEngine::new().with_page(page);
        let probe = engine.clone();

        let pipeline = ExtractionPipeline::new(engine);
        pipeline
            .run(&[PageDescriptor::new("https://a/")])
            .await
            .unwrap();

        // Five enabled categories, five acquire/close pairs.
        assert_eq!(probe.acquired_sessions(), 5);
        assert_eq!(probe.closed_sessions(), 5);
    }
}
