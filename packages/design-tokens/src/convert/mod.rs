//! Value converters: raw CSS strings to canonical unit-typed values.
//!
//! All converters are pure and idempotent, and return
//! [`ConvertResult`](crate::error::ConvertResult) instead of throwing:
//! skip-and-continue is an explicit branch at the call site, which also
//! makes skipped-sample counts trivial to report.

mod color;
mod dimension;
mod shadow;
mod timing;
mod typography;

pub use color::parse_color;
pub use dimension::{parse_dimension, parse_uniform_shorthand};
pub use shadow::{parse_shadow, parse_shadow_list};
pub use timing::{parse_duration, parse_timing_function};
pub use typography::{
    convert_typography, parse_font_weight, parse_line_height, split_font_family,
};

use crate::error::{ConversionError, ConvertResult};
use crate::types::value::{BorderStyleValue, CanonicalValue};

/// Which converter a single-string value goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Color,
    Dimension,
    Duration,
    TimingFunction,
    BorderStyle,
}

/// Convert one raw CSS string for the given kind.
///
/// Composite values (typography bundles, shadow layers) have dedicated
/// entry points since they take more than one input string.
pub fn convert(kind: ValueKind, raw: &str) -> ConvertResult<CanonicalValue> {
    match kind {
        ValueKind::Color => parse_color(raw).map(CanonicalValue::Color),
        ValueKind::Dimension => parse_dimension(raw).map(CanonicalValue::Dimension),
        ValueKind::Duration => parse_duration(raw).map(CanonicalValue::Duration),
        ValueKind::TimingFunction => parse_timing_function(raw).map(CanonicalValue::CubicBezier),
        ValueKind::BorderStyle => parse_border_style(raw).map(CanonicalValue::BorderStyle),
    }
}

/// Parse a border-style keyword into the fixed enum.
pub fn parse_border_style(raw: &str) -> ConvertResult<BorderStyleValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::Empty);
    }
    BorderStyleValue::from_keyword(trimmed).ok_or_else(|| ConversionError::UnknownBorderStyle {
        raw: trimmed.to_string(),
    })
}

/// Split a computed-value list on top-level commas.
///
/// Commas inside function notation (`rgba(...)`, `cubic-bezier(...)`) do
/// not separate list entries.
pub(crate) fn split_commas(raw: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    for c in raw.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    let last = current.trim();
    if !last.is_empty() {
        parts.push(last.to_string());
    }
    parts.retain(|part| !part.is_empty());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_covers_every_kind() {
        assert!(matches!(
            convert(ValueKind::Color, "#fff").unwrap(),
            CanonicalValue::Color(_)
        ));
        assert!(matches!(
            convert(ValueKind::Dimension, "16px").unwrap(),
            CanonicalValue::Dimension(_)
        ));
        assert!(matches!(
            convert(ValueKind::Duration, "0.3s").unwrap(),
            CanonicalValue::Duration(_)
        ));
        assert!(matches!(
            convert(ValueKind::TimingFunction, "ease").unwrap(),
            CanonicalValue::CubicBezier(_)
        ));
        assert!(matches!(
            convert(ValueKind::BorderStyle, "solid").unwrap(),
            CanonicalValue::BorderStyle(_)
        ));
    }

    #[test]
    fn test_border_style_rejects_invisible_keywords() {
        assert!(parse_border_style("none").is_err());
        assert!(parse_border_style("hidden").is_err());
    }

    #[test]
    fn test_split_commas_respects_functions() {
        let parts = split_commas("cubic-bezier(0.4, 0, 0.2, 1), ease-in");
        assert_eq!(parts, vec!["cubic-bezier(0.4, 0, 0.2, 1)", "ease-in"]);
    }

    #[test]
    fn test_split_commas_single_entry() {
        assert_eq!(split_commas("0.3s"), vec!["0.3s"]);
        assert!(split_commas("  ").is_empty());
    }
}
