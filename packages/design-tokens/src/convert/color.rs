//! Raw CSS color strings to [`ColorValue`].

use cssparser::{Parser, ParserInput, Token};

use crate::error::{ConversionError, ConvertResult};
use crate::types::value::ColorValue;

/// Parse a CSS color: `#rgb`/`#rrggbb` (plus 4- and 8-digit forms),
/// `rgb()`/`rgba()` in comma or slash syntax, or a named color.
///
/// Normalizes to lowercase hex with an explicit alpha channel; alpha
/// defaults to 1.0 when absent. `transparent` parses to a zero-alpha
/// color; extractors filter fully-transparent values before conversion.
pub fn parse_color(raw: &str) -> ConvertResult<ColorValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::Empty);
    }

    let malformed = || ConversionError::MalformedColor {
        raw: trimmed.to_string(),
    };

    let mut input = ParserInput::new(trimmed);
    let mut parser = Parser::new(&mut input);

    let token = parser.next().map_err(|_| malformed())?.clone();

    let color = match token {
        Token::Hash(ref digits) | Token::IDHash(ref digits) => {
            color_from_hex_digits(digits).ok_or_else(malformed)?
        }
        Token::Ident(ref name) => {
            named_color(name).ok_or_else(|| ConversionError::UnknownColor {
                raw: trimmed.to_string(),
            })?
        }
        Token::Function(ref name)
            if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
        {
            parser
                .parse_nested_block(|block| rgb_args(block))
                .map_err(|_| malformed())?
        }
        _ => return Err(malformed()),
    };

    if parser.next().is_ok() {
        return Err(malformed());
    }

    Ok(color)
}

/// Hex digit forms: `rgb`, `rgba`, `rrggbb`, `rrggbbaa`.
pub(crate) fn color_from_hex_digits(digits: &str) -> Option<ColorValue> {
    let nibble = |c: char| c.to_digit(16).map(|d| d as u8);
    let chars: Vec<char> = digits.chars().collect();

    match chars.len() {
        3 | 4 => {
            let r = nibble(chars[0])?;
            let g = nibble(chars[1])?;
            let b = nibble(chars[2])?;
            let alpha = match chars.get(3) {
                Some(&c) => nibble(c)? as f32 * 17.0 / 255.0,
                None => 1.0,
            };
            Some(ColorValue::from_rgba(r * 17, g * 17, b * 17, alpha))
        }
        6 | 8 => {
            let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
            let r = byte(0)?;
            let g = byte(2)?;
            let b = byte(4)?;
            let alpha = if chars.len() == 8 {
                byte(6)? as f32 / 255.0
            } else {
                1.0
            };
            Some(ColorValue::from_rgba(r, g, b, alpha))
        }
        _ => None,
    }
}

/// Arguments of `rgb()`/`rgba()`: legacy comma syntax and modern
/// space-separated syntax with `/ alpha`.
pub(crate) fn rgb_args<'i>(
    parser: &mut Parser<'i, '_>,
) -> Result<ColorValue, cssparser::ParseError<'i, ()>> {
    let r = color_component(parser)?;
    let uses_commas = parser.try_parse(|p| p.expect_comma()).is_ok();
    let g = color_component(parser)?;
    if uses_commas {
        parser.expect_comma()?;
    }
    let b = color_component(parser)?;

    let alpha = if uses_commas {
        if parser.try_parse(|p| p.expect_comma()).is_ok() {
            alpha_component(parser)?
        } else {
            1.0
        }
    } else if parser.try_parse(|p| p.expect_delim('/')).is_ok() {
        alpha_component(parser)?
    } else {
        1.0
    };

    parser.expect_exhausted()?;
    Ok(ColorValue::from_rgba(r, g, b, alpha))
}

fn color_component<'i>(parser: &mut Parser<'i, '_>) -> Result<u8, cssparser::ParseError<'i, ()>> {
    let token = parser.next()?.clone();
    match token {
        Token::Number { value, .. } if value.is_finite() => {
            Ok(value.round().clamp(0.0, 255.0) as u8)
        }
        Token::Percentage { unit_value, .. } if unit_value.is_finite() => {
            Ok((unit_value * 255.0).round().clamp(0.0, 255.0) as u8)
        }
        other => Err(parser.new_unexpected_token_error(other)),
    }
}

fn alpha_component<'i>(parser: &mut Parser<'i, '_>) -> Result<f32, cssparser::ParseError<'i, ()>> {
    let token = parser.next()?.clone();
    match token {
        Token::Number { value, .. } if value.is_finite() => Ok(value.clamp(0.0, 1.0)),
        Token::Percentage { unit_value, .. } if unit_value.is_finite() => {
            Ok(unit_value.clamp(0.0, 1.0))
        }
        other => Err(parser.new_unexpected_token_error(other)),
    }
}

/// The CSS named-color table (CSS Color Module Level 4 keywords), plus
/// `transparent`.
pub(crate) fn named_color(name: &str) -> Option<ColorValue> {
    let (r, g, b, alpha) = match name.to_ascii_lowercase().as_str() {
        "transparent" => (0, 0, 0, 0.0),
        "aliceblue" => (240, 248, 255, 1.0),
        "antiquewhite" => (250, 235, 215, 1.0),
        "aqua" | "cyan" => (0, 255, 255, 1.0),
        "aquamarine" => (127, 255, 212, 1.0),
        "azure" => (240, 255, 255, 1.0),
        "beige" => (245, 245, 220, 1.0),
        "bisque" => (255, 228, 196, 1.0),
        "black" => (0, 0, 0, 1.0),
        "blanchedalmond" => (255, 235, 205, 1.0),
        "blue" => (0, 0, 255, 1.0),
        "blueviolet" => (138, 43, 226, 1.0),
        "brown" => (165, 42, 42, 1.0),
        "burlywood" => (222, 184, 135, 1.0),
        "cadetblue" => (95, 158, 160, 1.0),
        "chartreuse" => (127, 255, 0, 1.0),
        "chocolate" => (210, 105, 30, 1.0),
        "coral" => (255, 127, 80, 1.0),
        "cornflowerblue" => (100, 149, 237, 1.0),
        "cornsilk" => (255, 248, 220, 1.0),
        "crimson" => (220, 20, 60, 1.0),
        "darkblue" => (0, 0, 139, 1.0),
        "darkcyan" => (0, 139, 139, 1.0),
        "darkgoldenrod" => (184, 134, 11, 1.0),
        "darkgray" | "darkgrey" => (169, 169, 169, 1.0),
        "darkgreen" => (0, 100, 0, 1.0),
        "darkkhaki" => (189, 183, 107, 1.0),
        "darkmagenta" => (139, 0, 139, 1.0),
        "darkolivegreen" => (85, 107, 47, 1.0),
        "darkorange" => (255, 140, 0, 1.0),
        "darkorchid" => (153, 50, 204, 1.0),
        "darkred" => (139, 0, 0, 1.0),
        "darksalmon" => (233, 150, 122, 1.0),
        "darkseagreen" => (143, 188, 143, 1.0),
        "darkslateblue" => (72, 61, 139, 1.0),
        "darkslategray" | "darkslategrey" => (47, 79, 79, 1.0),
        "darkturquoise" => (0, 206, 209, 1.0),
        "darkviolet" => (148, 0, 211, 1.0),
        "deeppink" => (255, 20, 147, 1.0),
        "deepskyblue" => (0, 191, 255, 1.0),
        "dimgray" | "dimgrey" => (105, 105, 105, 1.0),
        "dodgerblue" => (30, 144, 255, 1.0),
        "firebrick" => (178, 34, 34, 1.0),
        "floralwhite" => (255, 250, 240, 1.0),
        "forestgreen" => (34, 139, 34, 1.0),
        "fuchsia" | "magenta" => (255, 0, 255, 1.0),
        "gainsboro" => (220, 220, 220, 1.0),
        "ghostwhite" => (248, 248, 255, 1.0),
        "gold" => (255, 215, 0, 1.0),
        "goldenrod" => (218, 165, 32, 1.0),
        "gray" | "grey" => (128, 128, 128, 1.0),
        "green" => (0, 128, 0, 1.0),
        "greenyellow" => (173, 255, 47, 1.0),
        "honeydew" => (240, 255, 240, 1.0),
        "hotpink" => (255, 105, 180, 1.0),
        "indianred" => (205, 92, 92, 1.0),
        "indigo" => (75, 0, 130, 1.0),
        "ivory" => (255, 255, 240, 1.0),
        "khaki" => (240, 230, 140, 1.0),
        "lavender" => (230, 230, 250, 1.0),
        "lavenderblush" => (255, 240, 245, 1.0),
        "lawngreen" => (124, 252, 0, 1.0),
        "lemonchiffon" => (255, 250, 205, 1.0),
        "lightblue" => (173, 216, 230, 1.0),
        "lightcoral" => (240, 128, 128, 1.0),
        "lightcyan" => (224, 255, 255, 1.0),
        "lightgoldenrodyellow" => (250, 250, 210, 1.0),
        "lightgray" | "lightgrey" => (211, 211, 211, 1.0),
        "lightgreen" => (144, 238, 144, 1.0),
        "lightpink" => (255, 182, 193, 1.0),
        "lightsalmon" => (255, 160, 122, 1.0),
        "lightseagreen" => (32, 178, 170, 1.0),
        "lightskyblue" => (135, 206, 250, 1.0),
        "lightslategray" | "lightslategrey" => (119, 136, 153, 1.0),
        "lightsteelblue" => (176, 196, 222, 1.0),
        "lightyellow" => (255, 255, 224, 1.0),
        "lime" => (0, 255, 0, 1.0),
        "limegreen" => (50, 205, 50, 1.0),
        "linen" => (250, 240, 230, 1.0),
        "maroon" => (128, 0, 0, 1.0),
        "mediumaquamarine" => (102, 205, 170, 1.0),
        "mediumblue" => (0, 0, 205, 1.0),
        "mediumorchid" => (186, 85, 211, 1.0),
        "mediumpurple" => (147, 112, 219, 1.0),
        "mediumseagreen" => (60, 179, 113, 1.0),
        "mediumslateblue" => (123, 104, 238, 1.0),
        "mediumspringgreen" => (0, 250, 154, 1.0),
        "mediumturquoise" => (72, 209, 204, 1.0),
        "mediumvioletred" => (199, 21, 133, 1.0),
        "midnightblue" => (25, 25, 112, 1.0),
        "mintcream" => (245, 255, 250, 1.0),
        "mistyrose" => (255, 228, 225, 1.0),
        "moccasin" => (255, 228, 181, 1.0),
        "navajowhite" => (255, 222, 173, 1.0),
        "navy" => (0, 0, 128, 1.0),
        "oldlace" => (253, 245, 230, 1.0),
        "olive" => (128, 128, 0, 1.0),
        "olivedrab" => (107, 142, 35, 1.0),
        "orange" => (255, 165, 0, 1.0),
        "orangered" => (255, 69, 0, 1.0),
        "orchid" => (218, 112, 214, 1.0),
        "palegoldenrod" => (238, 232, 170, 1.0),
        "palegreen" => (152, 251, 152, 1.0),
        "paleturquoise" => (175, 238, 238, 1.0),
        "palevioletred" => (219, 112, 147, 1.0),
        "papayawhip" => (255, 239, 213, 1.0),
        "peachpuff" => (255, 218, 185, 1.0),
        "peru" => (205, 133, 63, 1.0),
        "pink" => (255, 192, 203, 1.0),
        "plum" => (221, 160, 221, 1.0),
        "powderblue" => (176, 224, 230, 1.0),
        "purple" => (128, 0, 128, 1.0),
        "rebeccapurple" => (102, 51, 153, 1.0),
        "red" => (255, 0, 0, 1.0),
        "rosybrown" => (188, 143, 143, 1.0),
        "royalblue" => (65, 105, 225, 1.0),
        "saddlebrown" => (139, 69, 19, 1.0),
        "salmon" => (250, 128, 114, 1.0),
        "sandybrown" => (244, 164, 96, 1.0),
        "seagreen" => (46, 139, 87, 1.0),
        "seashell" => (255, 245, 238, 1.0),
        "sienna" => (160, 82, 45, 1.0),
        "silver" => (192, 192, 192, 1.0),
        "skyblue" => (135, 206, 235, 1.0),
        "slateblue" => (106, 90, 205, 1.0),
        "slategray" | "slategrey" => (112, 128, 144, 1.0),
        "snow" => (255, 250, 250, 1.0),
        "springgreen" => (0, 255, 127, 1.0),
        "steelblue" => (70, 130, 180, 1.0),
        "tan" => (210, 180, 140, 1.0),
        "teal" => (0, 128, 128, 1.0),
        "thistle" => (216, 191, 216, 1.0),
        "tomato" => (255, 99, 71, 1.0),
        "turquoise" => (64, 224, 208, 1.0),
        "violet" => (238, 130, 238, 1.0),
        "wheat" => (245, 222, 179, 1.0),
        "white" => (255, 255, 255, 1.0),
        "whitesmoke" => (245, 245, 245, 1.0),
        "yellow" => (255, 255, 0, 1.0),
        "yellowgreen" => (154, 205, 50, 1.0),
        _ => return None,
    };
    Some(ColorValue::from_rgba(r, g, b, alpha))
}
