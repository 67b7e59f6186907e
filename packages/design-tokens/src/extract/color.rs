//! Color extraction: text, background, and border colors.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{count_tokens, run_collection, CategoryReport, ExtractStats, StyleCollector};
use crate::aggregate::{Aggregator, PageTally, TokenSeed};
use crate::convert::parse_color;
use crate::error::{PageResult, Result};
use crate::naming::NamingScheme;
use crate::traits::page::{PageDescriptor, PageHandle, RenderEngine};
use crate::types::config::ColorConfig;
use crate::types::sample::{ColorKind, RawColorSample, StyleQuery};
use crate::types::token::TokenType;

/// Extracts color tokens from every element of every page.
///
/// Each enabled sub-category (text/background/border) keeps its own dedup
/// key space: the same literal color in different roles stays distinct.
pub struct ColorExtractor {
    config: ColorConfig,
    naming: NamingScheme,
}

impl ColorExtractor {
    pub fn new(config: ColorConfig, naming: NamingScheme) -> Self {
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

    fn kinds(&self) -> Vec<ColorKind> {
        let mut kinds = Vec::new();
        if self.config.include_text {
            kinds.push(ColorKind::Text);
        }
        if self.config.include_background {
            kinds.push(ColorKind::Background);
        }
        if self.config.include_border {
            kinds.push(ColorKind::Border);
        }
        kinds
    }

    fn finish(&self, aggregator: Aggregator<RawColorSample>, mut stats: ExtractStats) -> CategoryReport {
        let finished = aggregator.finish(
            self.config.minimum_occurrences,
            |sample| parse_color(&sample.css_value),
            |sample, color| {
                let category = format!("color-{}", sample.kind.as_str());
                TokenSeed {
                    token_type: TokenType::Color,
                    name: self.naming.color_name(&category, color),
                    description: format!("{} color {}", sample.kind.label(), color.hex),
                    source: sample.kind.property().to_string(),
                    category,
                }
            },
        );

        stats.skipped_samples += finished.skipped_samples;
        stats.below_threshold += finished.below_threshold;
        count_tokens(&mut stats, &finished.tokens);

        CategoryReport {
            category: "color".into(),
            tokens: finished.tokens,
            stats,
        }
    }
}

#[async_trait]
impl StyleCollector for ColorExtractor {
    type Tally = PageTally<RawColorSample>;
    type Acc = Aggregator<RawColorSample>;

    async fn collect(&self, page: &dyn PageHandle) -> PageResult<Self::Tally> {
        let kinds = self.kinds();
        let query = StyleQuery::new("*", kinds.iter().map(|kind| kind.property()));
        let elements = page.computed_styles(&query).await?;

        let mut tally = PageTally::new();
        for element in &elements {
            for kind in &kinds {
                if let Some(raw) = element.get(kind.property()) {
                    if !is_visible_color(raw) {
                        continue;
                    }
                    let sample = RawColorSample {
                        kind: *kind,
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

/// Pre-filter: fully transparent values carry no design information and
/// are dropped before conversion.
fn is_visible_color(raw: &str) -> bool {
    if raw.eq_ignore_ascii_case("transparent") || raw.eq_ignore_ascii_case("none") {
        return false;
    }
    !has_zero_alpha(raw)
}

fn has_zero_alpha(raw: &str) -> bool {
    let lowered = raw.trim().to_ascii_lowercase();
    let Some(inner) = lowered
        .strip_prefix("rgba(")
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return false;
    };
    let components: Vec<&str> = inner.split(',').map(str::trim).collect();
    components.len() == 4 && matches!(components[3].parse::<f32>(), Ok(alpha) if alpha == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockPage, MockRenderEngine};

    fn engine_with(page: MockPage) -> MockRenderEngine {
        MockRenderEngine::new().with_page(page)
    }

    #[tokio::test]
    async fn test_deduplicates_same_color_across_elements() {
        let page = MockPage::new("https://a/")
            .with_element("p", &[("color", "rgb(0, 0, 0)")])
            .with_element("li", &[("color", "rgb(0, 0, 0)")]);
        let engine = engine_with(page);

        let extractor = ColorExtractor::new(
            ColorConfig::new().with_minimum_occurrences(1),
            NamingScheme::default(),
        );
        let report = extractor
            .extract(&engine, &[PageDescriptor::new("https://a/")])
            .await
            .unwrap();

        assert_eq!(report.tokens.len(), 1);
        assert_eq!(report.tokens[0].usage_count, 2);
        assert_eq!(report.tokens[0].name, "color-text-000000");
        assert_eq!(report.stats.samples, 2);
    }

    #[tokio::test]
    async fn test_same_literal_in_different_roles_stays_distinct() {
        let page = MockPage::new("https://a/").with_element(
            "div",
            &[
                ("color", "rgb(51, 51, 51)"),
                ("background-color", "rgb(51, 51, 51)"),
            ],
        );
        let engine = engine_with(page);

        let extractor = ColorExtractor::new(
            ColorConfig::new().with_minimum_occurrences(1),
            NamingScheme::default(),
        );
        let report = extractor
            .extract(&engine, &[PageDescriptor::new("https://a/")])
            .await
            .unwrap();

        assert_eq!(report.tokens.len(), 2);
        let categories: Vec<_> = report
            .tokens
            .iter()
            .map(|token| token.category.as_str())
            .collect();
        assert!(categories.contains(&"color-text"));
        assert!(categories.contains(&"color-background"));
    }

    #[tokio::test]
    async fn test_filters_transparent_values() {
        let page = MockPage::new("https://a/").with_element(
            "div",
            &[
                ("color", "rgb(0, 0, 0)"),
                ("background-color", "rgba(0, 0, 0, 0)"),
                ("border-color", "transparent"),
            ],
        );
        let engine = engine_with(page);

        let extractor = ColorExtractor::new(
            ColorConfig::new().with_minimum_occurrences(1),
            NamingScheme::default(),
        );
        let report = extractor
            .extract(&engine, &[PageDescriptor::new("https://a/")])
            .await
            .unwrap();

        assert_eq!(report.tokens.len(), 1);
        assert_eq!(report.tokens[0].category, "color-text");
    }

    #[tokio::test]
    async fn test_disabled_sub_categories_are_not_read() {
        let page = MockPage::new("https://a/").with_element(
            "div",
            &[
                ("color", "rgb(0, 0, 0)"),
                ("background-color", "rgb(255, 255, 255)"),
            ],
        );
        let engine = engine_with(page);

        let extractor = ColorExtractor::new(
            ColorConfig::new()
                .with_minimum_occurrences(1)
                .with_background(false)
                .with_border(false),
            NamingScheme::default(),
        );
        let report = extractor
            .extract(&engine, &[PageDescriptor::new("https://a/")])
            .await
            .unwrap();

        assert_eq!(report.tokens.len(), 1);
        assert_eq!(report.tokens[0].category, "color-text");
    }

    #[test]
    fn test_zero_alpha_detection() {
        assert!(has_zero_alpha("rgba(0, 0, 0, 0)"));
        assert!(has_zero_alpha("rgba(10,20,30,0.0)"));
        assert!(!has_zero_alpha("rgba(0, 0, 0, 0.5)"));
        assert!(!has_zero_alpha("rgb(0, 0, 0)"));
    }
}
