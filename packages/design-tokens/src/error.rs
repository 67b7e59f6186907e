//! Typed errors for the token extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Each failure domain gets its
//! own enum: per-sample conversion, per-page access, and per-run engine
//! failures are recovered from at different layers.

use thiserror::Error;

/// A single raw CSS value could not be mapped to a canonical value.
///
/// Always recoverable: callers skip the offending sample and continue.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Empty or whitespace-only value
    #[error("empty value")]
    Empty,

    /// Numeric component is not a finite number
    #[error("invalid number in {raw:?}")]
    InvalidNumber { raw: String },

    /// Length unit is not one of the supported units
    #[error("unsupported unit {unit:?}")]
    UnsupportedUnit { unit: String },

    /// Keyword where a length was expected (`auto`, `normal`, `medium`)
    #[error("keyword {raw:?} is not a convertible length")]
    Keyword { raw: String },

    /// Value does not parse as a dimension
    #[error("malformed dimension {raw:?}")]
    MalformedDimension { raw: String },

    /// Value does not parse as a duration
    #[error("malformed duration {raw:?}")]
    MalformedDuration { raw: String },

    /// Color keyword not in the CSS named-color table
    #[error("unknown color {raw:?}")]
    UnknownColor { raw: String },

    /// Value does not parse as a color
    #[error("malformed color {raw:?}")]
    MalformedColor { raw: String },

    /// Timing-function keyword or function not recognized
    #[error("unknown timing function {raw:?}")]
    UnknownTimingFunction { raw: String },

    /// `cubic-bezier()` arguments malformed
    #[error("malformed timing function {raw:?}")]
    MalformedTimingFunction { raw: String },

    /// Keyword not in the border-style enum
    #[error("unknown border style {raw:?}")]
    UnknownBorderStyle { raw: String },

    /// `box-shadow` layer malformed
    #[error("malformed shadow {raw:?}")]
    MalformedShadow { raw: String },

    /// Shorthand with unequal components cannot collapse to one dimension
    #[error("mixed shorthand {raw:?}")]
    MixedShorthand { raw: String },

    /// Font weight neither numeric nor a recognized keyword
    #[error("unknown font weight {raw:?}")]
    UnknownFontWeight { raw: String },
}

/// Navigation or evaluation failed for one page.
///
/// Recoverable: the page is skipped with a logged error and the run
/// continues with the remaining pages.
#[derive(Debug, Error)]
pub enum PageError {
    /// Page failed to load
    #[error("navigation failed for {url}: {message}")]
    Navigation { url: String, message: String },

    /// In-page style evaluation failed
    #[error("style evaluation failed for {url}: {message}")]
    Evaluation { url: String, message: String },

    /// Evaluation returned JSON that does not match the expected shape
    #[error("malformed evaluation result: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The rendering engine itself failed.
///
/// Fatal for the category run: propagated to the caller after any
/// partially-acquired resources are released.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine failed to start
    #[error("render engine failed to start: {message}")]
    Launch { message: String },

    /// Session was used after close
    #[error("render session already closed")]
    SessionClosed,

    /// Session shutdown failed
    #[error("render session shutdown failed: {message}")]
    Shutdown { message: String },
}

/// Errors surfaced by an extraction run.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Rendering engine failure
    #[error("render engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Result type alias for value conversion.
pub type ConvertResult<T> = std::result::Result<T, ConversionError>;

/// Result type alias for page operations.
pub type PageResult<T> = std::result::Result<T, PageError>;

/// Result type alias for engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Result type alias for extraction runs.
pub type Result<T> = std::result::Result<T, ExtractError>;
