//! Output token records.

use serde::{Deserialize, Serialize};

use crate::types::value::CanonicalValue;

/// The value shape a token carries, for downstream serializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenType {
    Color,
    Dimension,
    Duration,
    CubicBezier,
    BorderStyle,
    Typography,
    Shadow,
    Transition,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Dimension => "dimension",
            Self::Duration => "duration",
            Self::CubicBezier => "cubic-bezier",
            Self::BorderStyle => "border-style",
            Self::Typography => "typography",
            Self::Shadow => "shadow",
            Self::Transition => "transition",
        }
    }
}

/// A named, reusable design value with usage metadata.
///
/// Tokens are created only from aggregate entries that met the
/// per-category occurrence threshold, and are immutable once emitted.
/// Within a category report they are ordered by descending `usage_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,

    /// Semantic name, unique within its category report
    pub name: String,

    /// Fully resolved canonical value
    pub value: CanonicalValue,

    /// Sub-category the value was observed under (e.g. `margin`,
    /// `color-text`, `border-radius`)
    pub category: String,

    /// Human-readable summary for styleguide output
    pub description: String,

    /// Total observations across all crawled pages
    pub usage_count: usize,

    /// CSS property the value was read from
    pub source: String,

    /// Pages that contributed at least one observation, in visit order
    pub source_urls: Vec<String>,
}
