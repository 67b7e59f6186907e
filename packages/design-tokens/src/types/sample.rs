//! Raw style samples and the page-evaluation boundary types.
//!
//! Page evaluation returns loosely-structured JSON. It is decoded into
//! [`ElementStyles`] exactly once, at the boundary, so everything
//! downstream operates on checked, category-specific shapes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::PageResult;

/// A computed-style query issued against a rendered page: which elements
/// to visit and which properties to read off each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleQuery {
    /// CSS selector for the elements to read (`*` for all)
    pub selector: String,

    /// Computed-style properties to read off each matched element
    pub properties: Vec<String>,
}

impl StyleQuery {
    pub fn new(
        selector: impl Into<String>,
        properties: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            selector: selector.into(),
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }
}

/// Computed styles read off one DOM element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementStyles {
    /// Lowercase element tag name
    pub tag: String,

    /// Property name to raw computed value
    #[serde(default)]
    pub styles: HashMap<String, String>,
}

impl ElementStyles {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            styles: HashMap::new(),
        }
    }

    /// Add a property value.
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    /// Trimmed value for a property; empty values read as absent.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.styles
            .get(property)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// Decode a raw page-evaluation result into checked element records.
///
/// Real drivers hand the JSON returned by their in-page script straight to
/// this helper; a shape mismatch is a [`crate::error::PageError::Decode`].
pub fn decode_styles(value: serde_json::Value) -> PageResult<Vec<ElementStyles>> {
    Ok(serde_json::from_value(value)?)
}

/// Which color property family a color sample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKind {
    Text,
    Background,
    Border,
}

impl ColorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Background => "background",
            Self::Border => "border",
        }
    }

    /// Capitalized label for descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Background => "Background",
            Self::Border => "Border",
        }
    }

    /// The computed-style property this kind reads.
    pub fn property(&self) -> &'static str {
        match self {
            Self::Text => "color",
            Self::Background => "background-color",
            Self::Border => "border-color",
        }
    }
}

/// One observed color value.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColorSample {
    pub kind: ColorKind,
    pub css_value: String,
}

impl RawColorSample {
    /// Dedup key: sub-category plus the raw value, so the same literal in
    /// different roles stays distinct.
    pub fn key(&self) -> String {
        format!("{}:{}", self.kind.as_str(), self.css_value)
    }
}

/// Which spacing property family a dimension sample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingGroup {
    Margin,
    Padding,
    Gap,
}

impl SpacingGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Margin => "margin",
            Self::Padding => "padding",
            Self::Gap => "gap",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Margin => "Margin",
            Self::Padding => "Padding",
            Self::Gap => "Gap",
        }
    }

    pub fn property(&self) -> &'static str {
        self.as_str()
    }
}

/// One observed spacing value, kept per group even when literals match.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSpacingSample {
    pub group: SpacingGroup,
    pub css_value: String,
}

impl RawSpacingSample {
    pub fn key(&self) -> String {
        format!("{}:{}", self.group.as_str(), self.css_value)
    }
}

/// One observed border width or radius value.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDimensionSample {
    pub css_value: String,
}

/// One observed border-style keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBorderStyleSample {
    pub css_value: String,
}

/// One observed `box-shadow` layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RawShadowSample {
    pub css_value: String,
}

/// Whether a motion sample came from a transition or an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionKind {
    Transition,
    Animation,
}

impl MotionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transition => "transition",
            Self::Animation => "animation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Transition => "Transition",
            Self::Animation => "Animation",
        }
    }
}

/// One observed transition/animation timing bundle.
///
/// The key spans every sub-property so distinct timing curves never
/// collapse into one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMotionSample {
    pub kind: MotionKind,
    pub duration: String,
    pub delay: String,
    pub timing_function: String,
}

impl RawMotionSample {
    pub fn key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.kind.as_str(),
            self.duration,
            self.delay,
            self.timing_function
        )
    }
}

/// One observed text style.
///
/// The key includes the tag and every font sub-property: visually distinct
/// styles stay distinct even when some properties match.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTypographySample {
    pub tag: String,
    pub font_family: String,
    pub font_size: String,
    pub font_weight: String,
    pub line_height: String,
    pub letter_spacing: Option<String>,
}

impl RawTypographySample {
    pub fn key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}",
            self.tag,
            self.font_family,
            self.font_size,
            self.font_weight,
            self.line_height,
            self.letter_spacing.as_deref().unwrap_or("-")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_styles_get_trims_and_drops_empty() {
        let element = ElementStyles::new("p")
            .with_style("color", "  rgb(0, 0, 0) ")
            .with_style("gap", "  ");

        assert_eq!(element.get("color"), Some("rgb(0, 0, 0)"));
        assert_eq!(element.get("gap"), None);
        assert_eq!(element.get("margin"), None);
    }

    #[test]
    fn test_decode_styles_accepts_evaluation_shape() {
        let raw = serde_json::json!([
            { "tag": "p", "styles": { "color": "rgb(0, 0, 0)" } },
            { "tag": "h1", "styles": {} },
        ]);

        let decoded = decode_styles(raw).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].tag, "p");
    }

    #[test]
    fn test_decode_styles_rejects_wrong_shape() {
        let raw = serde_json::json!({ "tag": "p" });
        assert!(decode_styles(raw).is_err());
    }

    #[test]
    fn test_color_key_separates_kinds() {
        let text = RawColorSample {
            kind: ColorKind::Text,
            css_value: "rgb(0, 0, 0)".into(),
        };
        let background = RawColorSample {
            kind: ColorKind::Background,
            css_value: "rgb(0, 0, 0)".into(),
        };
        assert_ne!(text.key(), background.key());
    }

    #[test]
    fn test_spacing_key_separates_groups() {
        let margin = RawSpacingSample {
            group: SpacingGroup::Margin,
            css_value: "16px".into(),
        };
        let padding = RawSpacingSample {
            group: SpacingGroup::Padding,
            css_value: "16px".into(),
        };
        assert_ne!(margin.key(), padding.key());
    }
}
