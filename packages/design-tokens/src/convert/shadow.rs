//! `box-shadow` layers to [`ShadowValue`].

use cssparser::{Parser, ParserInput, Token};

use super::color::{color_from_hex_digits, named_color, rgb_args};
use super::split_commas;
use crate::error::{ConversionError, ConvertResult};
use crate::types::value::{DimensionValue, LengthUnit, ShadowValue};

/// Parse a single `box-shadow` layer.
///
/// A layer carries 2-4 length components (offset-x, offset-y, optional
/// blur, optional spread; omitted components default to `0px`), a color in
/// leading or trailing position, and an optional `inset` keyword. Computed
/// styles put the color first; authored CSS usually puts it last — both
/// orders are accepted.
pub fn parse_shadow(raw: &str) -> ConvertResult<ShadowValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::Empty);
    }

    let malformed = || ConversionError::MalformedShadow {
        raw: trimmed.to_string(),
    };

    let mut input = ParserInput::new(trimmed);
    let mut parser = Parser::new(&mut input);

    let mut lengths: Vec<DimensionValue> = Vec::new();
    let mut color = None;
    let mut inset = false;

    loop {
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::Ident(ref keyword) if keyword.eq_ignore_ascii_case("inset") => {
                inset = true;
            }
            Token::Ident(ref keyword) => {
                color = Some(named_color(keyword).ok_or_else(|| {
                    ConversionError::UnknownColor {
                        raw: keyword.to_string(),
                    }
                })?);
            }
            Token::Hash(ref digits) | Token::IDHash(ref digits) => {
                color = Some(color_from_hex_digits(digits).ok_or_else(malformed)?);
            }
            Token::Dimension {
                value, ref unit, ..
            } => {
                if !value.is_finite() {
                    return Err(ConversionError::InvalidNumber {
                        raw: trimmed.to_string(),
                    });
                }
                let unit =
                    LengthUnit::parse(unit).ok_or_else(|| ConversionError::UnsupportedUnit {
                        unit: unit.to_string(),
                    })?;
                lengths.push(DimensionValue::new(value, unit));
            }
            Token::Number { value, .. } if value == 0.0 => {
                lengths.push(DimensionValue::px(0.0));
            }
            Token::Function(ref name)
                if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
            {
                let parsed = parser
                    .parse_nested_block(|block| rgb_args(block))
                    .map_err(|_| malformed())?;
                color = Some(parsed);
            }
            _ => return Err(malformed()),
        }
    }

    if lengths.len() < 2 || lengths.len() > 4 {
        return Err(malformed());
    }
    let color = color.ok_or_else(malformed)?;

    Ok(ShadowValue {
        offset_x: lengths[0],
        offset_y: lengths[1],
        blur: lengths.get(2).copied().unwrap_or_else(|| DimensionValue::px(0.0)),
        spread: lengths.get(3).copied().unwrap_or_else(|| DimensionValue::px(0.0)),
        color,
        inset,
    })
}

/// Parse a full `box-shadow` value, one [`ShadowValue`] per layer.
pub fn parse_shadow_list(raw: &str) -> ConvertResult<Vec<ShadowValue>> {
    split_commas(raw).iter().map(|layer| parse_shadow(layer)).collect()
}
