//! Animation extraction: transition and animation timing bundles.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{count_tokens, run_collection, CategoryReport, ExtractStats, StyleCollector};
use crate::aggregate::{Aggregator, PageTally, TokenSeed};
use crate::convert::{parse_duration, parse_timing_function, split_commas};
use crate::error::{PageResult, Result};
use crate::naming::NamingScheme;
use crate::traits::page::{PageDescriptor, PageHandle, RenderEngine};
use crate::types::config::AnimationConfig;
use crate::types::sample::{MotionKind, RawMotionSample, StyleQuery};
use crate::types::token::TokenType;
use crate::types::value::TransitionValue;

/// Extracts motion tokens from transition and animation properties.
///
/// The dedup key spans duration, delay, and timing function so distinct
/// timing curves never collapse into one entry. Computed values are
/// comma-separated lists (one entry per transitioned property); entries
/// are expanded individually, with shorter companion lists cycled the way
/// CSS repeats them.
pub struct AnimationExtractor {
    config: AnimationConfig,
    naming: NamingScheme,
}

impl AnimationExtractor {
    pub fn new(config: AnimationConfig, naming: NamingScheme) -> Self {
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

    fn kinds(&self) -> Vec<MotionKind> {
        let mut kinds = Vec::new();
        if self.config.include_transitions {
            kinds.push(MotionKind::Transition);
        }
        if self.config.include_animations {
            kinds.push(MotionKind::Animation);
        }
        kinds
    }

    fn finish(
        &self,
        aggregator: Aggregator<RawMotionSample>,
        mut stats: ExtractStats,
    ) -> CategoryReport {
        let finished = aggregator.finish(
            self.config.minimum_occurrences,
            |sample| {
                Ok(TransitionValue {
                    duration: parse_duration(&sample.duration)?,
                    delay: parse_duration(&sample.delay)?,
                    timing_function: parse_timing_function(&sample.timing_function)?,
                })
            },
            |sample, motion| {
                let category = sample.kind.as_str().to_string();
                TokenSeed {
                    token_type: TokenType::Transition,
                    name: self.naming.motion_name(&category, motion),
                    description: format!(
                        "{} over {} with {} easing",
                        sample.kind.label(),
                        motion.duration,
                        self.naming.easing_name(&motion.timing_function),
                    ),
                    source: category.clone(),
                    category,
                }
            },
        );

        stats.skipped_samples += finished.skipped_samples;
        stats.below_threshold += finished.below_threshold;
        count_tokens(&mut stats, &finished.tokens);

        CategoryReport {
            category: "animation".into(),
            tokens: finished.tokens,
            stats,
        }
    }
}

#[async_trait]
impl StyleCollector for AnimationExtractor {
    type Tally = PageTally<RawMotionSample>;
    type Acc = Aggregator<RawMotionSample>;

    async fn collect(&self, page: &dyn PageHandle) -> PageResult<Self::Tally> {
        let kinds = self.kinds();
        let mut properties = Vec::new();
        for kind in &kinds {
            let prefix = kind.as_str();
            properties.push(format!("{prefix}-duration"));
            properties.push(format!("{prefix}-delay"));
            properties.push(format!("{prefix}-timing-function"));
        }
        if kinds.contains(&MotionKind::Animation) {
            properties.push("animation-name".to_string());
        }

        let query = StyleQuery::new("*", properties);
        let elements = page.computed_styles(&query).await?;

        let mut tally = PageTally::new();
        for element in &elements {
            for kind in &kinds {
                let prefix = kind.as_str();

                // An animation without a keyframes name never runs.
                if *kind == MotionKind::Animation {
                    match element.get("animation-name") {
                        Some(name) if !name.eq_ignore_ascii_case("none") => {}
                        _ => continue,
                    }
                }

                let Some(duration_raw) = element.get(&format!("{prefix}-duration")) else {
                    continue;
                };
                let durations = split_commas(duration_raw);
                if durations.is_empty() {
                    continue;
                }

                let delays = element
                    .get(&format!("{prefix}-delay"))
                    .map(split_commas)
                    .unwrap_or_default();
                let timings = element
                    .get(&format!("{prefix}-timing-function"))
                    .map(split_commas)
                    .unwrap_or_default();

                for (index, duration) in durations.iter().enumerate() {
                    if is_zero_duration(duration) {
                        continue;
                    }
                    let sample = RawMotionSample {
                        kind: *kind,
                        duration: duration.clone(),
                        delay: cycled(&delays, index, "0s"),
                        timing_function: cycled(&timings, index, "ease"),
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

/// CSS list values repeat cyclically when shorter than the duration list.
fn cycled(list: &[String], index: usize, default: &str) -> String {
    if list.is_empty() {
        default.to_string()
    } else {
        list[index % list.len()].clone()
    }
}

/// Zero durations mean "no animation" and are filtered before aggregation.
fn is_zero_duration(raw: &str) -> bool {
    matches!(raw.trim(), "0s" | "0ms" | "0")
}
