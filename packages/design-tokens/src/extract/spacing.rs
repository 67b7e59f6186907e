//! Spacing extraction: margins, padding, and gaps.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{count_tokens, run_collection, CategoryReport, ExtractStats, StyleCollector};
use crate::aggregate::{Aggregator, PageTally, TokenSeed};
use crate::convert::parse_uniform_shorthand;
use crate::error::{PageResult, Result};
use crate::naming::NamingScheme;
use crate::traits::page::{PageDescriptor, PageHandle, RenderEngine};
use crate::types::config::SpacingConfig;
use crate::types::sample::{RawSpacingSample, SpacingGroup, StyleQuery};
use crate::types::token::TokenType;

/// Extracts spacing tokens from every element of every page.
///
/// Margin, padding, and gap are independent sub-categories even when the
/// literal value matches, so `margin: 16px` and `padding: 16px` produce
/// separately named tokens.
pub struct SpacingExtractor {
    config: SpacingConfig,
    naming: NamingScheme,
}

impl SpacingExtractor {
    pub fn new(config: SpacingConfig, naming: NamingScheme) -> Self {
        Self { config, naming }
    }

    pub async fn extract(
        &self,
        engine: &dyn RenderEngine,
        pages: &[PageDescriptor],
    ) -> Result<CategoryReport> {
        self.extract_with_cancel(engine, pages, None).await
    }

    pub async fn extract_with_cancel(
        &self,
        engine: &dyn RenderEngine,
        pages: &[PageDescriptor],
        cancel: Option<&CancellationToken>,
    ) -> Result<CategoryReport> {
        let (aggregator, stats) = run_collection(self, engine, pages, cancel).await?;
        Ok(self.finish(aggregator, stats))
    }

    fn groups(&self) -> Vec<SpacingGroup> {
        let mut groups = Vec::new();
        if self.config.include_margin {
            groups.push(SpacingGroup::Margin);
        }
        if self.config.include_padding {
            groups.push(SpacingGroup::Padding);
        }
        if self.config.include_gap {
            groups.push(SpacingGroup::Gap);
        }
        groups
    }

    fn finish(
        &self,
        aggregator: Aggregator<RawSpacingSample>,
        mut stats: ExtractStats,
    ) -> CategoryReport {
        let finished = aggregator.finish(
            self.config.minimum_occurrences,
            |sample| parse_uniform_shorthand(&sample.css_value),
            |sample, dimension| {
                let category = sample.group.as_str().to_string();
                TokenSeed {
                    token_type: TokenType::Dimension,
                    name: self.naming.dimension_name(&category, dimension),
                    description: format!("{} spacing of {}", sample.group.label(), dimension),
                    source: sample.group.property().to_string(),
                    category,
                }
            },
        );

        stats.skipped_samples += finished.skipped_samples;
        stats.below_threshold += finished.below_threshold;
        count_tokens(&mut stats, &finished.tokens);

        CategoryReport {
            category: "spacing".into(),
            tokens: finished.tokens,
            stats,
        }
    }
}

#[async_trait]
impl StyleCollector for SpacingExtractor {
    type Tally = PageTally<RawSpacingSample>;
    type Acc = Aggregator<RawSpacingSample>;

    async fn collect(&self, page: &dyn PageHandle) -> PageResult<Self::Tally> {
        let groups = self.groups();
        let query = StyleQuery::new("*", groups.iter().map(|group| group.property()));
        let elements = page.computed_styles(&query).await?;

        let mut tally = PageTally::new();
        for element in &elements {
            for group in &groups {
                if let Some(raw) = element.get(group.property()) {
                    if !is_meaningful_spacing(raw) {
                        continue;
                    }
                    let sample = RawSpacingSample {
                        group: *group,
                        css_value: raw.to_string(),
                    };
                    tally.record(sample.key(), sample);
                }
            }
        }
        Ok(tally)
    }

    fn absorb(&self, acc: &mut Self::Acc, url: &str, tally: Self::Tally) -> usize {
        let samples = tally.total();
        acc.merge(url, tally);
        samples
    }
}

/// Pre-filter: sentinel keywords and all-zero values carry no spacing
/// information.
fn is_meaningful_spacing(raw: &str) -> bool {
    let lowered = raw.to_ascii_lowercase();
    if matches!(lowered.as_str(), "auto" | "none" | "normal") {
        return false;
    }
    !lowered
        .split_whitespace()
        .all(|component| component == "0px" || component == "0")
}
