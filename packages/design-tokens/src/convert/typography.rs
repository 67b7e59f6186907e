//! Typography sub-field conversion.

use super::dimension::parse_dimension;
use crate::error::{ConversionError, ConvertResult};
use crate::types::sample::RawTypographySample;
use crate::types::value::{LineHeight, TypographyValue};

/// Split a `font-family` stack on commas, trimming whitespace and quotes
/// while preserving fallback order.
pub fn split_font_family(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|family| family.trim().trim_matches('"').trim_matches('\'').trim())
        .filter(|family| !family.is_empty())
        .map(str::to_string)
        .collect()
}

/// Font weight: a numeric value, or `normal`/`bold` resolved to 400/700.
pub fn parse_font_weight(raw: &str) -> ConvertResult<u16> {
    let trimmed = raw.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "normal" => Ok(400),
        "bold" => Ok(700),
        _ => {
            let weight: f32 = trimmed
                .parse()
                .map_err(|_| ConversionError::UnknownFontWeight {
                    raw: trimmed.to_string(),
                })?;
            if !weight.is_finite() || !(1.0..=1000.0).contains(&weight) {
                return Err(ConversionError::UnknownFontWeight {
                    raw: trimmed.to_string(),
                });
            }
            Ok(weight.round() as u16)
        }
    }
}

/// Line height: `normal`, a unitless multiplier, or a length.
pub fn parse_line_height(raw: &str) -> ConvertResult<LineHeight> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::Empty);
    }
    if trimmed.eq_ignore_ascii_case("normal") {
        return Ok(LineHeight::Normal);
    }
    if let Ok(multiplier) = trimmed.parse::<f32>() {
        if multiplier.is_finite() {
            return Ok(LineHeight::Multiplier(multiplier));
        }
        return Err(ConversionError::InvalidNumber {
            raw: trimmed.to_string(),
        });
    }
    Ok(LineHeight::Length(parse_dimension(trimmed)?))
}

/// Convert a raw typography sample, each sub-field independently.
pub fn convert_typography(sample: &RawTypographySample) -> ConvertResult<TypographyValue> {
    let font_family = split_font_family(&sample.font_family);
    if font_family.is_empty() {
        return Err(ConversionError::Empty);
    }

    let letter_spacing = match sample.letter_spacing.as_deref() {
        None => None,
        Some(raw) if raw.trim().eq_ignore_ascii_case("normal") => None,
        Some(raw) => Some(parse_dimension(raw)?),
    };

    Ok(TypographyValue {
        font_family,
        font_size: parse_dimension(&sample.font_size)?,
        font_weight: parse_font_weight(&sample.font_weight)?,
        line_height: parse_line_height(&sample.line_height)?,
        letter_spacing,
    })
}
