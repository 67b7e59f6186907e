//! Raw CSS length strings to [`DimensionValue`].

use cssparser::{Parser, ParserInput, Token};

use crate::error::{ConversionError, ConvertResult};
use crate::types::value::{DimensionValue, LengthUnit};

/// Parse a single CSS length.
///
/// Accepts a numeric value with one of the supported units, a percentage,
/// or the literal `0` (unit defaults to `px`). Keyword values (`auto`,
/// `normal`, `medium`) are rejected; extractors filter those out before
/// conversion.
pub fn parse_dimension(raw: &str) -> ConvertResult<DimensionValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::Empty);
    }

    let mut input = ParserInput::new(trimmed);
    let mut parser = Parser::new(&mut input);

    let token = parser
        .next()
        .map_err(|_| ConversionError::MalformedDimension {
            raw: trimmed.to_string(),
        })?
        .clone();

    let dimension = match token {
        Token::Dimension {
            value, ref unit, ..
        } => {
            if !value.is_finite() {
                return Err(ConversionError::InvalidNumber {
                    raw: trimmed.to_string(),
                });
            }
            let unit = LengthUnit::parse(unit).ok_or_else(|| ConversionError::UnsupportedUnit {
                unit: unit.to_string(),
            })?;
            DimensionValue::new(value, unit)
        }
        Token::Percentage { unit_value, .. } => {
            if !unit_value.is_finite() {
                return Err(ConversionError::InvalidNumber {
                    raw: trimmed.to_string(),
                });
            }
            DimensionValue::new(unit_value * 100.0, LengthUnit::Percent)
        }
        Token::Number { value, .. } if value == 0.0 => DimensionValue::px(0.0),
        Token::Number { .. } => {
            // unitless non-zero length
            return Err(ConversionError::MalformedDimension {
                raw: trimmed.to_string(),
            });
        }
        Token::Ident(_) => {
            return Err(ConversionError::Keyword {
                raw: trimmed.to_string(),
            });
        }
        _ => {
            return Err(ConversionError::MalformedDimension {
                raw: trimmed.to_string(),
            });
        }
    };

    if parser.next().is_ok() {
        return Err(ConversionError::MalformedDimension {
            raw: trimmed.to_string(),
        });
    }

    Ok(dimension)
}

/// Collapse a whitespace-separated shorthand to a single dimension.
///
/// Computed shorthands like `margin: 8px 8px 8px 8px` carry one value per
/// side; when all components are equal the shorthand means one length and
/// converts to it. Unequal components cannot be represented as one
/// dimension and fail with [`ConversionError::MixedShorthand`].
pub fn parse_uniform_shorthand(raw: &str) -> ConvertResult<DimensionValue> {
    let trimmed = raw.trim();
    let mut components = trimmed.split_whitespace();

    let first = components.next().ok_or(ConversionError::Empty)?;
    let dimension = parse_dimension(first)?;

    for component in components {
        if parse_dimension(component)? != dimension {
            return Err(ConversionError::MixedShorthand {
                raw: trimmed.to_string(),
            });
        }
    }

    Ok(dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_px() {
        let dim = parse_dimension("16px").unwrap();
        assert_eq!(dim, DimensionValue::px(16.0));
    }

    #[test]
    fn test_parses_rem_and_fractions() {
        let dim = parse_dimension("0.25rem").unwrap();
        assert_eq!(dim, DimensionValue::new(0.25, LengthUnit::Rem));
    }

    #[test]
    fn test_parses_percentage() {
        let dim = parse_dimension("50%").unwrap();
        assert_eq!(dim, DimensionValue::new(50.0, LengthUnit::Percent));
    }

    #[test]
    fn test_bare_zero_defaults_to_px() {
        assert_eq!(parse_dimension("0").unwrap(), DimensionValue::px(0.0));
    }

    #[test]
    fn test_negative_lengths() {
        assert_eq!(parse_dimension("-4px").unwrap(), DimensionValue::px(-4.0));
    }

    #[test]
    fn test_rejects_unitless_nonzero() {
        assert!(parse_dimension("16").is_err());
    }

    #[test]
    fn test_rejects_keywords() {
        assert!(matches!(
            parse_dimension("auto"),
            Err(ConversionError::Keyword { .. })
        ));
        assert!(matches!(
            parse_dimension("medium"),
            Err(ConversionError::Keyword { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_units() {
        assert!(matches!(
            parse_dimension("3cm"),
            Err(ConversionError::UnsupportedUnit { .. })
        ));
    }

    #[test]
    fn test_rejects_trailing_garbage() {
        assert!(parse_dimension("16px solid").is_err());
    }

    #[test]
    fn test_uniform_shorthand_collapses() {
        let dim = parse_uniform_shorthand("8px 8px 8px 8px").unwrap();
        assert_eq!(dim, DimensionValue::px(8.0));
    }

    #[test]
    fn test_mixed_shorthand_fails() {
        assert!(matches!(
            parse_uniform_shorthand("8px 16px"),
            Err(ConversionError::MixedShorthand { .. })
        ));
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let first = parse_dimension("1.5rem").unwrap();
        let second = parse_dimension("1.5rem").unwrap();
        assert_eq!(first, second);
    }
}
