//! Design-Token Extraction Library
//!
//! Crawler-fed extraction of design tokens from rendered pages: computed
//! styles are read per element, normalized into canonical unit-typed
//! values, deduplicated and aggregated by usage across pages, and emitted
//! as named token arrays for downstream serializers.
//!
//! # Design Philosophy
//!
//! - Converters are pure and total over their error type: "skip this
//!   sample" is a visible `Result` branch, not control flow by exception
//! - Aggregation is one explicit engine, instantiated fresh per run
//! - Page access goes through traits; the crawler and the browser driver
//!   are collaborators, not dependencies
//! - A run that loses pages or samples still returns everything that
//!   cleared the occurrence threshold
//!
//! # Usage
//!
//! ```rust,ignore
//! use design_tokens::{ExtractionConfig, ExtractionPipeline, PageDescriptor};
//!
//! // Engine: any RenderEngine implementation (browser driver, mock, ...)
//! let pipeline = ExtractionPipeline::new(engine)
//!     .with_config(ExtractionConfig::new().with_minimum_occurrences(2));
//!
//! // Pages: the crawler's ordered page list
//! let pages = vec![
//!     PageDescriptor::new("https://example.com/"),
//!     PageDescriptor::new("https://example.com/pricing"),
//! ];
//!
//! let report = pipeline.run(&pages).await?;
//! for token in report.all_tokens() {
//!     println!("{} = {:?} ({} uses)", token.name, token.value, token.usage_count);
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Render engine and page abstractions
//! - [`types`] - Canonical values, samples, tokens, configuration
//! - [`convert`] - Raw CSS strings to canonical values
//! - [`aggregate`] - The dedup/aggregation engine
//! - [`naming`] - Deterministic semantic names
//! - [`extract`] - The per-category extractors
//! - [`pipeline`] - Whole-run orchestration
//! - [`testing`] - Mock implementations for testing

pub mod aggregate;
pub mod convert;
pub mod error;
pub mod extract;
pub mod naming;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ConversionError, EngineError, ExtractError, PageError};
pub use traits::page::{PageDescriptor, PageHandle, RenderEngine, RenderSession};
pub use types::{
    config::{
        AnimationConfig, BorderConfig, ColorConfig, ExtractionConfig, SpacingConfig,
        TypographyConfig,
    },
    sample::{decode_styles, ElementStyles, StyleQuery},
    token::{Token, TokenType},
    value::{
        BorderStyleValue, CanonicalValue, ColorSpace, ColorValue, CubicBezierValue,
        DimensionValue, DurationUnit, DurationValue, LengthUnit, LineHeight, ShadowValue,
        TransitionValue, TypographyValue,
    },
};

// Re-export the aggregation engine
pub use aggregate::{AggregateEntry, Aggregator, FinishedTokens, PageTally, TokenSeed};

// Re-export naming
pub use naming::NamingScheme;

// Re-export extractors and reports
pub use extract::{
    AnimationExtractor, BorderExtractor, CategoryReport, ColorExtractor, ExtractStats,
    SpacingExtractor, TypographyExtractor,
};

// Re-export the pipeline
pub use pipeline::{ExtractionPipeline, TokenReport};

// Re-export testing utilities
pub use testing::{MockPage, MockRenderEngine};
