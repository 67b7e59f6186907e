//! Typography extraction: heading, body, and special text styles.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{count_tokens, run_collection, CategoryReport, ExtractStats, StyleCollector};
use crate::aggregate::{Aggregator, PageTally, TokenSeed};
use crate::convert::convert_typography;
use crate::error::{PageResult, Result};
use crate::naming::NamingScheme;
use crate::traits::page::{PageDescriptor, PageHandle, RenderEngine};
use crate::types::config::TypographyConfig;
use crate::types::sample::{RawTypographySample, StyleQuery};
use crate::types::token::TokenType;

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";
const BODY_SELECTOR: &str = "p, a, span, li";
const SPECIAL_SELECTOR: &str = "code, pre, blockquote, small, strong, em";

const FONT_PROPERTIES: [&str; 5] = [
    "font-family",
    "font-size",
    "font-weight",
    "line-height",
    "letter-spacing",
];

/// Extracts text-style tokens from role-specific element groups.
///
/// The dedup key spans the tag and every font sub-property, so two styles
/// that differ in any one of them stay distinct.
pub struct TypographyExtractor {
    config: TypographyConfig,
    naming: NamingScheme,
}

impl TypographyExtractor {
    pub fn new(config: TypographyConfig, naming: NamingScheme) -> Self {
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

    fn selectors(&self) -> Vec<&'static str> {
        let mut selectors = Vec::new();
        if self.config.include_headings {
            selectors.push(HEADING_SELECTOR);
        }
        if self.config.include_body {
            selectors.push(BODY_SELECTOR);
        }
        if self.config.include_special {
            selectors.push(SPECIAL_SELECTOR);
        }
        selectors
    }

    fn finish(
        &self,
        aggregator: Aggregator<RawTypographySample>,
        mut stats: ExtractStats,
    ) -> CategoryReport {
        let finished = aggregator.finish(
            self.config.minimum_occurrences,
            convert_typography,
            |sample, typography| TokenSeed {
                token_type: TokenType::Typography,
                name: self.naming.typography_name(&sample.tag),
                category: "typography".into(),
                description: format!(
                    "Text style for <{}> at {} {}",
                    sample.tag,
                    typography.font_size,
                    typography.primary_family().unwrap_or("serif"),
                ),
                source: "font".into(),
            },
        );

        stats.skipped_samples += finished.skipped_samples;
        stats.below_threshold += finished.below_threshold;
        count_tokens(&mut stats, &finished.tokens);

        CategoryReport {
            category: "typography".into(),
            tokens: finished.tokens,
            stats,
        }
    }
}

#[async_trait]
impl StyleCollector for TypographyExtractor {
    type Tally = PageTally<RawTypographySample>;
    type Acc = Aggregator<RawTypographySample>;

    async fn collect(&self, page: &dyn PageHandle) -> PageResult<Self::Tally> {
        let mut tally = PageTally::new();

        for selector in self.selectors() {
            let query = StyleQuery::new(selector, FONT_PROPERTIES);
            let elements = page.computed_styles(&query).await?;

            for element in &elements {
                let (Some(family), Some(size), Some(weight), Some(line_height)) = (
                    element.get("font-family"),
                    element.get("font-size"),
                    element.get("font-weight"),
                    element.get("line-height"),
                ) else {
                    continue;
                };

                let sample = RawTypographySample {
                    tag: element.tag.to_ascii_lowercase(),
                    font_family: family.to_string(),
                    font_size: size.to_string(),
                    font_weight: weight.to_string(),
                    line_height: line_height.to_string(),
                    letter_spacing: element.get("letter-spacing").map(str::to_string),
                };
                tally.record(sample.key(), sample);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockPage, MockRenderEngine};

    fn page_with_headings() -> MockPage {
        let h1: Vec<(&str, &str)> = vec![
            ("font-family", "Arial, sans-serif"),
            ("font-size", "32px"),
            ("font-weight", "700"),
            ("line-height", "1.2"),
            ("letter-spacing", "normal"),
        ];
        let p: Vec<(&str, &str)> = vec![
            ("font-family", "Georgia, serif"),
            ("font-size", "16px"),
            ("font-weight", "400"),
            ("line-height", "1.5"),
        ];
        MockPage::new("https://a/")
            .with_element("h1", &h1)
            .with_element("p", &p)
    }

    #[tokio::test]
    async fn test_role_names_per_tag() {
        let engine = MockRenderEngine::new().with_page(page_with_headings());
        let extractor =
            TypographyExtractor::new(TypographyConfig::default(), NamingScheme::default());

        let report = extractor
            .extract(&engine, &[PageDescriptor::new("https://a/")])
            .await
            .unwrap();

        assert_eq!(report.tokens.len(), 2);
        let names: Vec<_> = report.tokens.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"heading-h1"));
        assert!(names.contains(&"body-text"));
    }

    #[tokio::test]
    async fn test_distinct_styles_on_same_tag_stay_distinct() {
        let first: Vec<(&str, &str)> = vec![
            ("font-family", "Arial, sans-serif"),
            ("font-size", "16px"),
            ("font-weight", "400"),
            ("line-height", "1.5"),
        ];
        let second: Vec<(&str, &str)> = vec![
            ("font-family", "Arial, sans-serif"),
            ("font-size", "14px"),
            ("font-weight", "400"),
            ("line-height", "1.5"),
        ];
        let page = MockPage::new("https://a/")
            .with_element("p", &first)
            .with_element("p", &second);
        let engine = MockRenderEngine::new().with_page(page);

        let extractor =
            TypographyExtractor::new(TypographyConfig::default(), NamingScheme::default());
        let report = extractor
            .extract(&engine, &[PageDescriptor::new("https://a/")])
            .await
            .unwrap();

        assert_eq!(report.tokens.len(), 2);
        // Same role name collides; the second occurrence gets a suffix.
        let names: Vec<_> = report.tokens.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"body-text"));
        assert!(names.contains(&"body-text-2"));
    }

    #[tokio::test]
    async fn test_elements_missing_font_fields_are_skipped() {
        let partial: Vec<(&str, &str)> = vec![("font-family", "Arial")];
        let page = MockPage::new("https://a/").with_element("p", &partial);
        let engine = MockRenderEngine::new().with_page(page);

        let extractor =
            TypographyExtractor::new(TypographyConfig::default(), NamingScheme::default());
        let report = extractor
            .extract(&engine, &[PageDescriptor::new("https://a/")])
            .await
            .unwrap();

        assert!(report.tokens.is_empty());
        assert_eq!(report.stats.samples, 0);
    }

    #[tokio::test]
    async fn test_disabled_groups_are_not_queried() {
        let engine = MockRenderEngine::new().with_page(page_with_headings());
        let extractor = TypographyExtractor::new(
            TypographyConfig::default().with_body(false).with_special(false),
            NamingScheme::default(),
        );

        let report = extractor
            .extract(&engine, &[PageDescriptor::new("https://a/")])
            .await
            .unwrap();

        assert_eq!(report.tokens.len(), 1);
        assert_eq!(report.tokens[0].name, "heading-h1");
    }
}
