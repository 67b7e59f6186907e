//! Canonical value types.
//!
//! The normalized, unit-typed representations of CSS values, independent of
//! their original textual syntax. Every value stored in an aggregate entry
//! is one of these shapes, fully resolved: conversion failures exclude the
//! sample instead of storing a partially-converted value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length unit for dimension values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Px,
    Rem,
    Em,
    Percent,
    Vh,
    Vw,
}

impl LengthUnit {
    /// Parse a unit token (case-insensitive). `%` arrives as `percent`
    /// only through serde; CSS syntax uses the percentage token.
    pub fn parse(unit: &str) -> Option<Self> {
        match unit.to_ascii_lowercase().as_str() {
            "px" => Some(Self::Px),
            "rem" => Some(Self::Rem),
            "em" => Some(Self::Em),
            "%" => Some(Self::Percent),
            "vh" => Some(Self::Vh),
            "vw" => Some(Self::Vw),
            _ => None,
        }
    }

    /// CSS spelling of the unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Rem => "rem",
            Self::Em => "em",
            Self::Percent => "%",
            Self::Vh => "vh",
            Self::Vw => "vw",
        }
    }

    /// Identifier-safe spelling, usable inside a token name.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Percent => "percent",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric length with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionValue {
    pub value: f32,
    pub unit: LengthUnit,
}

impl DimensionValue {
    pub fn new(value: f32, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Shorthand for a pixel dimension.
    pub fn px(value: f32) -> Self {
        Self::new(value, LengthUnit::Px)
    }

    /// Convert to rem for scale matching. Only absolute-ish units convert;
    /// percentages and viewport units have no fixed rem equivalent.
    pub fn to_rem(&self, base_px: f32) -> Option<f32> {
        match self.unit {
            LengthUnit::Px => Some(self.value / base_px),
            LengthUnit::Rem | LengthUnit::Em => Some(self.value),
            _ => None,
        }
    }

    /// Convert to pixels where the unit allows it.
    pub fn to_px(&self, base_px: f32) -> Option<f32> {
        match self.unit {
            LengthUnit::Px => Some(self.value),
            LengthUnit::Rem | LengthUnit::Em => Some(self.value * base_px),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Time unit for durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Ms,
    S,
}

impl DurationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ms => "ms",
            Self::S => "s",
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A duration with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationValue {
    pub value: f32,
    pub unit: DurationUnit,
}

impl DurationValue {
    pub fn new(value: f32, unit: DurationUnit) -> Self {
        Self { value, unit }
    }

    /// Duration in seconds regardless of unit.
    pub fn seconds(&self) -> f32 {
        match self.unit {
            DurationUnit::S => self.value,
            DurationUnit::Ms => self.value / 1000.0,
        }
    }
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// A cubic-bezier timing curve in `[x1, y1, x2, y2]` form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezierValue {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezierValue {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn as_tuple(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Component-wise comparison with a small tolerance, for matching
    /// against the well-known easing curves.
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.as_tuple()
            .iter()
            .zip(other.as_tuple().iter())
            .all(|(a, b)| (a - b).abs() < 1e-3)
    }
}

impl fmt::Display for CubicBezierValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cubic-bezier({}, {}, {}, {})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

/// Color space of a canonical color. Computed styles resolve to sRGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    Srgb,
}

/// A normalized color: canonical lowercase hex plus explicit channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorValue {
    /// `#rrggbb`, always lowercase, alpha excluded
    pub hex: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0.0 (transparent) to 1.0 (opaque); defaults to 1.0 when absent
    pub alpha: f32,
    pub color_space: ColorSpace,
}

impl ColorValue {
    pub fn from_rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            hex: format!("#{r:02x}{g:02x}{b:02x}"),
            r,
            g,
            b,
            alpha: alpha.clamp(0.0, 1.0),
            color_space: ColorSpace::Srgb,
        }
    }

    /// Hex digits without the leading `#`, for use in token names.
    pub fn hex_digits(&self) -> &str {
        self.hex.trim_start_matches('#')
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha == 0.0
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha < 1.0 {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
        } else {
            f.write_str(&self.hex)
        }
    }
}

/// The fixed set of renderable border styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyleValue {
    Solid,
    Dashed,
    Dotted,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
}

impl BorderStyleValue {
    /// `none` and `hidden` draw nothing and are filtered before conversion,
    /// so they are deliberately absent here.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "solid" => Some(Self::Solid),
            "dashed" => Some(Self::Dashed),
            "dotted" => Some(Self::Dotted),
            "double" => Some(Self::Double),
            "groove" => Some(Self::Groove),
            "ridge" => Some(Self::Ridge),
            "inset" => Some(Self::Inset),
            "outset" => Some(Self::Outset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Double => "double",
            Self::Groove => "groove",
            Self::Ridge => "ridge",
            Self::Inset => "inset",
            Self::Outset => "outset",
        }
    }
}

impl fmt::Display for BorderStyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line height: the keyword `normal`, a unitless multiplier, or a length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineHeight {
    Normal,
    Multiplier(f32),
    Length(DimensionValue),
}

/// A complete text style: family stack plus the sizing sub-fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypographyValue {
    /// Font families in fallback order, quotes stripped
    pub font_family: Vec<String>,
    pub font_size: DimensionValue,
    /// Numeric weight (100-900); keywords resolve to their numeric value
    pub font_weight: u16,
    pub line_height: LineHeight,
    pub letter_spacing: Option<DimensionValue>,
}

impl TypographyValue {
    /// First family in the stack, if any.
    pub fn primary_family(&self) -> Option<&str> {
        self.font_family.first().map(String::as_str)
    }
}

/// One `box-shadow` layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowValue {
    pub offset_x: DimensionValue,
    pub offset_y: DimensionValue,
    pub blur: DimensionValue,
    pub spread: DimensionValue,
    pub color: ColorValue,
    pub inset: bool,
}

/// A transition or animation timing bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionValue {
    pub duration: DurationValue,
    pub delay: DurationValue,
    pub timing_function: CubicBezierValue,
}

/// The closed set of canonical value shapes a token can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum CanonicalValue {
    Color(ColorValue),
    Dimension(DimensionValue),
    Duration(DurationValue),
    CubicBezier(CubicBezierValue),
    BorderStyle(BorderStyleValue),
    Typography(TypographyValue),
    Shadow(ShadowValue),
    Transition(TransitionValue),
}

impl From<ColorValue> for CanonicalValue {
    fn from(value: ColorValue) -> Self {
        Self::Color(value)
    }
}

impl From<DimensionValue> for CanonicalValue {
    fn from(value: DimensionValue) -> Self {
        Self::Dimension(value)
    }
}

impl From<DurationValue> for CanonicalValue {
    fn from(value: DurationValue) -> Self {
        Self::Duration(value)
    }
}

impl From<CubicBezierValue> for CanonicalValue {
    fn from(value: CubicBezierValue) -> Self {
        Self::CubicBezier(value)
    }
}

impl From<BorderStyleValue> for CanonicalValue {
    fn from(value: BorderStyleValue) -> Self {
        Self::BorderStyle(value)
    }
}

impl From<TypographyValue> for CanonicalValue {
    fn from(value: TypographyValue) -> Self {
        Self::Typography(value)
    }
}

impl From<ShadowValue> for CanonicalValue {
    fn from(value: ShadowValue) -> Self {
        Self::Shadow(value)
    }
}

impl From<TransitionValue> for CanonicalValue {
    fn from(value: TransitionValue) -> Self {
        Self::Transition(value)
    }
}
