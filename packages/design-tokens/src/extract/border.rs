//! Border extraction: widths, styles, radii, and box shadows.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{count_tokens, run_collection, CategoryReport, ExtractStats, StyleCollector};
use crate::aggregate::{Aggregator, PageTally, TokenSeed};
use crate::convert::{parse_border_style, parse_shadow, parse_uniform_shorthand};
use crate::error::{PageResult, Result};
use crate::naming::NamingScheme;
use crate::traits::page::{PageDescriptor, PageHandle, RenderEngine};
use crate::types::config::BorderConfig;
use crate::types::sample::{RawBorderStyleSample, RawDimensionSample, RawShadowSample, StyleQuery};
use crate::types::token::TokenType;

const WIDTH_PROPERTY: &str = "border-width";
const STYLE_PROPERTY: &str = "border-style";
const RADIUS_PROPERTY: &str = "border-radius";
const SHADOW_PROPERTY: &str = "box-shadow";

/// Extracts border tokens. One dedup map per sub-category: width, style,
/// radius, and shadow never collapse into each other even when literals
/// coincide.
pub struct BorderExtractor {
    config: BorderConfig,
    naming: NamingScheme,
}

/// Page-local tallies, one per enabled sub-category.
#[derive(Default)]
pub(crate) struct BorderTally {
    width: PageTally<RawDimensionSample>,
    style: PageTally<RawBorderStyleSample>,
    radius: PageTally<RawDimensionSample>,
    shadow: PageTally<RawShadowSample>,
}

impl BorderTally {
    fn total(&self) -> usize {
        self.width.total() + self.style.total() + self.radius.total() + self.shadow.total()
    }
}

/// Run-level aggregates, one per sub-category.
#[derive(Default)]
pub(crate) struct BorderAcc {
    width: Aggregator<RawDimensionSample>,
    style: Aggregator<RawBorderStyleSample>,
    radius: Aggregator<RawDimensionSample>,
    shadow: Aggregator<RawShadowSample>,
}

impl BorderExtractor {
    pub fn new(config: BorderConfig, naming: NamingScheme) -> Self {
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
        let (acc, stats) = run_collection(self, engine, pages, cancel).await?;
        Ok(self.finish(acc, stats))
    }

    fn properties(&self) -> Vec<&'static str> {
        let mut properties = Vec::new();
        if self.config.include_width {
            properties.push(WIDTH_PROPERTY);
        }
        if self.config.include_style {
            properties.push(STYLE_PROPERTY);
        }
        if self.config.include_radius {
            properties.push(RADIUS_PROPERTY);
        }
        if self.config.include_shadow {
            properties.push(SHADOW_PROPERTY);
        }
        properties
    }

    fn finish(&self, acc: BorderAcc, mut stats: ExtractStats) -> CategoryReport {
        let minimum = self.config.minimum_occurrences;
        let mut tokens = Vec::new();

        let widths = acc.width.finish(
            minimum,
            |sample| parse_uniform_shorthand(&sample.css_value),
            |_, dimension| TokenSeed {
                token_type: TokenType::Dimension,
                name: self.naming.dimension_name("border-width", dimension),
                category: "border-width".into(),
                description: format!("Border width of {dimension}"),
                source: WIDTH_PROPERTY.into(),
            },
        );
        stats.skipped_samples += widths.skipped_samples;
        stats.below_threshold += widths.below_threshold;
        tokens.extend(widths.tokens);

        let styles = acc.style.finish(
            minimum,
            |sample| parse_border_style(&sample.css_value),
            |_, style| TokenSeed {
                token_type: TokenType::BorderStyle,
                name: self.naming.border_style_name(style),
                category: "border-style".into(),
                description: format!("Border style {style}"),
                source: STYLE_PROPERTY.into(),
            },
        );
        stats.skipped_samples += styles.skipped_samples;
        stats.below_threshold += styles.below_threshold;
        tokens.extend(styles.tokens);

        let radii = acc.radius.finish(
            minimum,
            |sample| parse_uniform_shorthand(&sample.css_value),
            |_, dimension| TokenSeed {
                token_type: TokenType::Dimension,
                name: self.naming.radius_name(dimension),
                category: "border-radius".into(),
                description: format!("Border radius of {dimension}"),
                source: RADIUS_PROPERTY.into(),
            },
        );
        stats.skipped_samples += radii.skipped_samples;
        stats.below_threshold += radii.below_threshold;
        tokens.extend(radii.tokens);

        let shadows = acc.shadow.finish(
            minimum,
            |sample| parse_shadow(&sample.css_value),
            |_, shadow| TokenSeed {
                token_type: TokenType::Shadow,
                name: self.naming.shadow_name(shadow),
                category: "shadow".into(),
                description: format!("Box shadow with {} blur", shadow.blur),
                source: SHADOW_PROPERTY.into(),
            },
        );
        stats.skipped_samples += shadows.skipped_samples;
        stats.below_threshold += shadows.below_threshold;
        tokens.extend(shadows.tokens);

        // Order across sub-categories by usage as well; the per-map sort
        // is stable, so equal counts keep width/style/radius/shadow order.
        tokens.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        count_tokens(&mut stats, &tokens);

        CategoryReport {
            category: "border".into(),
            tokens,
            stats,
        }
    }
}

#[async_trait]
impl StyleCollector for BorderExtractor {
    type Tally = BorderTally;
    type Acc = BorderAcc;

    async fn collect(&self, page: &dyn PageHandle) -> PageResult<Self::Tally> {
        let query = StyleQuery::new("*", self.properties());
        let elements = page.computed_styles(&query).await?;

        let mut tally = BorderTally::default();
        for element in &elements {
            if self.config.include_width {
                if let Some(raw) = element.get(WIDTH_PROPERTY) {
                    if is_meaningful_length(raw) {
                        tally.width.record(
                            raw,
                            RawDimensionSample {
                                css_value: raw.to_string(),
                            },
                        );
                    }
                }
            }

            if self.config.include_style {
                if let Some(raw) = element.get(STYLE_PROPERTY) {
                    if let Some(style) = uniform_style(raw) {
                        tally.style.record(
                            style,
                            RawBorderStyleSample {
                                css_value: style.to_string(),
                            },
                        );
                    }
                }
            }

            if self.config.include_radius {
                if let Some(raw) = element.get(RADIUS_PROPERTY) {
                    if is_meaningful_length(raw) {
                        tally.radius.record(
                            raw,
                            RawDimensionSample {
                                css_value: raw.to_string(),
                            },
                        );
                    }
                }
            }

            if self.config.include_shadow {
                if let Some(raw) = element.get(SHADOW_PROPERTY) {
                    if !raw.eq_ignore_ascii_case("none") {
                        for layer in crate::convert::split_commas(raw) {
                            tally.shadow.record(
                                layer.clone(),
                                RawShadowSample { css_value: layer },
                            );
                        }
                    }
                }
            }
        }
        Ok(tally)
    }

    fn absorb(&self, acc: &mut Self::Acc, url: &str, tally: Self::Tally) -> usize {
        let samples = tally.total();
        acc.width.merge(url, tally.width);
        acc.style.merge(url, tally.style);
        acc.radius.merge(url, tally.radius);
        acc.shadow.merge(url, tally.shadow);
        samples
    }
}

/// Pre-filter for width/radius values: sentinels and all-zero shorthands
/// carry no information.
fn is_meaningful_length(raw: &str) -> bool {
    let lowered = raw.to_ascii_lowercase();
    if matches!(lowered.as_str(), "medium" | "thin" | "thick" | "none" | "auto") {
        return false;
    }
    !lowered
        .split_whitespace()
        .all(|component| component == "0px" || component == "0")
}

/// Collapse a computed `border-style` shorthand to a single keyword, if
/// all sides agree and the style draws something.
fn uniform_style(raw: &str) -> Option<&str> {
    let mut components = raw.split_whitespace();
    let first = components.next()?;
    if components.any(|component| !component.eq_ignore_ascii_case(first)) {
        return None;
    }
    if first.eq_ignore_ascii_case("none") || first.eq_ignore_ascii_case("hidden") {
        return None;
    }
    Some(first)
}
