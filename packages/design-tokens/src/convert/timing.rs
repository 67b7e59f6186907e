//! Durations and timing functions.

use cssparser::{Parser, ParserInput, Token};

use crate::error::{ConversionError, ConvertResult};
use crate::types::value::{CubicBezierValue, DurationUnit, DurationValue};

/// Parse a CSS duration: `<number>s` or `<number>ms`, unit casing ignored.
///
/// Zero durations are valid values; extractors filter them out as
/// "no animation" before aggregation.
pub fn parse_duration(raw: &str) -> ConvertResult<DurationValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::Empty);
    }

    let malformed = || ConversionError::MalformedDuration {
        raw: trimmed.to_string(),
    };

    let mut input = ParserInput::new(trimmed);
    let mut parser = Parser::new(&mut input);

    let token = parser.next().map_err(|_| malformed())?.clone();
    let duration = match token {
        Token::Dimension {
            value, ref unit, ..
        } => {
            if !value.is_finite() {
                return Err(ConversionError::InvalidNumber {
                    raw: trimmed.to_string(),
                });
            }
            let unit = match unit.to_ascii_lowercase().as_str() {
                "s" => DurationUnit::S,
                "ms" => DurationUnit::Ms,
                _ => {
                    return Err(ConversionError::UnsupportedUnit {
                        unit: unit.to_string(),
                    })
                }
            };
            DurationValue::new(value, unit)
        }
        _ => return Err(malformed()),
    };

    if parser.next().is_ok() {
        return Err(malformed());
    }

    Ok(duration)
}

/// Parse a CSS timing function to its cubic-bezier form.
///
/// The standard keywords map to their defined 4-tuples; raw
/// `cubic-bezier(x1, y1, x2, y2)` syntax is parsed directly. Step
/// functions and anything else are a conversion error.
pub fn parse_timing_function(raw: &str) -> ConvertResult<CubicBezierValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::Empty);
    }

    let mut input = ParserInput::new(trimmed);
    let mut parser = Parser::new(&mut input);

    let token = parser
        .next()
        .map_err(|_| ConversionError::UnknownTimingFunction {
            raw: trimmed.to_string(),
        })?
        .clone();

    let curve = match token {
        Token::Ident(ref keyword) => keyword_curve(keyword).ok_or_else(|| {
            ConversionError::UnknownTimingFunction {
                raw: trimmed.to_string(),
            }
        })?,
        Token::Function(ref name) if name.eq_ignore_ascii_case("cubic-bezier") => parser
            .parse_nested_block(|block| bezier_args(block))
            .map_err(|_| ConversionError::MalformedTimingFunction {
                raw: trimmed.to_string(),
            })?,
        _ => {
            return Err(ConversionError::UnknownTimingFunction {
                raw: trimmed.to_string(),
            })
        }
    };

    if parser.next().is_ok() {
        return Err(ConversionError::MalformedTimingFunction {
            raw: trimmed.to_string(),
        });
    }

    Ok(curve)
}

/// Standard 4-tuples for the CSS timing-function keywords.
fn keyword_curve(keyword: &str) -> Option<CubicBezierValue> {
    match keyword.to_ascii_lowercase().as_str() {
        "ease" => Some(CubicBezierValue::new(0.25, 0.1, 0.25, 1.0)),
        "linear" => Some(CubicBezierValue::new(0.0, 0.0, 1.0, 1.0)),
        "ease-in" => Some(CubicBezierValue::new(0.42, 0.0, 1.0, 1.0)),
        "ease-out" => Some(CubicBezierValue::new(0.0, 0.0, 0.58, 1.0)),
        "ease-in-out" => Some(CubicBezierValue::new(0.42, 0.0, 0.58, 1.0)),
        _ => None,
    }
}

fn bezier_args<'i>(
    parser: &mut Parser<'i, '_>,
) -> Result<CubicBezierValue, cssparser::ParseError<'i, ()>> {
    let x1 = parser.expect_number()?;
    parser.expect_comma()?;
    let y1 = parser.expect_number()?;
    parser.expect_comma()?;
    let x2 = parser.expect_number()?;
    parser.expect_comma()?;
    let y2 = parser.expect_number()?;
    parser.expect_exhausted()?;
    Ok(CubicBezierValue::new(x1, y1, x2, y2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_seconds_and_milliseconds() {
        assert_eq!(
            parse_duration("0.3s").unwrap(),
            DurationValue::new(0.3, DurationUnit::S)
        );
        assert_eq!(
            parse_duration("300MS").unwrap(),
            DurationValue::new(300.0, DurationUnit::Ms)
        );
    }

    #[test]
    fn test_zero_duration_is_valid() {
        assert_eq!(parse_duration("0s").unwrap().seconds(), 0.0);
    }

    #[test]
    fn test_rejects_bare_numbers_and_keywords() {
        assert!(parse_duration("300").is_err());
        assert!(parse_duration("fast").is_err());
    }

    #[test]
    fn test_rejects_length_units() {
        assert!(matches!(
            parse_duration("3px"),
            Err(ConversionError::UnsupportedUnit { .. })
        ));
    }

    #[test]
    fn test_keywords_map_to_standard_tuples() {
        assert_eq!(
            parse_timing_function("ease-in-out").unwrap(),
            CubicBezierValue::new(0.42, 0.0, 0.58, 1.0)
        );
        assert_eq!(
            parse_timing_function("linear").unwrap(),
            CubicBezierValue::new(0.0, 0.0, 1.0, 1.0)
        );
    }

    #[test]
    fn test_parses_raw_cubic_bezier() {
        assert_eq!(
            parse_timing_function("cubic-bezier(0.42, 0, 1, 1)").unwrap(),
            CubicBezierValue::new(0.42, 0.0, 1.0, 1.0)
        );
    }

    #[test]
    fn test_rejects_steps_and_garbage() {
        assert!(parse_timing_function("steps(4, end)").is_err());
        assert!(parse_timing_function("cubic-bezier(0.42, 0, 1)").is_err());
        assert!(parse_timing_function("wobble").is_err());
    }

    #[test]
    fn test_conversion_is_idempotent() {
        assert_eq!(
            parse_timing_function("ease").unwrap(),
            parse_timing_function("ease").unwrap()
        );
    }
}
