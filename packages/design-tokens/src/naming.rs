//! Deterministic semantic names for canonical values.
//!
//! Every name function is pure: the same category and value always yield
//! the same string. Unrecognized inputs fall back to a value-derived name
//! instead of failing. The ladders and bands are configuration, not
//! hard-coded literals; the defaults below are the documented scale.

use serde::{Deserialize, Serialize};

use crate::types::value::{
    BorderStyleValue, ColorValue, CubicBezierValue, DimensionValue, LengthUnit, ShadowValue,
    TransitionValue,
};

/// One step on the dimension ladder: an exact rem value and the suffix it
/// names (`1.0` rem is position `4`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleStep {
    pub rem: f32,
    pub suffix: String,
}

impl ScaleStep {
    fn new(rem: f32, suffix: &str) -> Self {
        Self {
            rem,
            suffix: suffix.to_string(),
        }
    }
}

/// Border-radius size bands, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadiusBands {
    pub sm_px: f32,
    pub md_px: f32,
    pub lg_px: f32,
    /// Radii at or past this read as fully rounded
    pub full_px: f32,
}

impl Default for RadiusBands {
    fn default() -> Self {
        Self {
            sm_px: 4.0,
            md_px: 8.0,
            lg_px: 16.0,
            full_px: 9999.0,
        }
    }
}

/// Shadow blur bands, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadowBands {
    pub sm_px: f32,
    pub md_px: f32,
    pub lg_px: f32,
}

impl Default for ShadowBands {
    fn default() -> Self {
        Self {
            sm_px: 2.0,
            md_px: 8.0,
            lg_px: 16.0,
        }
    }
}

/// Duration bands for motion speed names, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedBands {
    pub instant_s: f32,
    pub fast_s: f32,
    pub normal_s: f32,
    pub slow_s: f32,
}

impl Default for SpeedBands {
    fn default() -> Self {
        Self {
            instant_s: 0.2,
            fast_s: 0.3,
            normal_s: 0.5,
            slow_s: 1.0,
        }
    }
}

/// A well-known easing curve and its name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedEasing {
    pub name: String,
    pub curve: CubicBezierValue,
}

impl NamedEasing {
    fn new(name: &str, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            name: name.to_string(),
            curve: CubicBezierValue::new(x1, y1, x2, y2),
        }
    }
}

/// The naming tables shared by all extractors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingScheme {
    /// Pixel size of 1rem for scale matching
    pub rem_base_px: f32,
    pub dimension_scale: Vec<ScaleStep>,
    pub radius_bands: RadiusBands,
    pub shadow_bands: ShadowBands,
    pub speed_bands: SpeedBands,
    pub easings: Vec<NamedEasing>,
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self {
            rem_base_px: 16.0,
            dimension_scale: vec![
                ScaleStep::new(0.0, "0"),
                ScaleStep::new(0.25, "1"),
                ScaleStep::new(0.5, "2"),
                ScaleStep::new(0.75, "3"),
                ScaleStep::new(1.0, "4"),
                ScaleStep::new(1.25, "5"),
                ScaleStep::new(1.5, "6"),
                ScaleStep::new(2.0, "8"),
                ScaleStep::new(2.5, "10"),
                ScaleStep::new(3.0, "12"),
                ScaleStep::new(4.0, "16"),
            ],
            radius_bands: RadiusBands::default(),
            shadow_bands: ShadowBands::default(),
            speed_bands: SpeedBands::default(),
            easings: vec![
                NamedEasing::new("ease", 0.25, 0.1, 0.25, 1.0),
                NamedEasing::new("ease-in", 0.42, 0.0, 1.0, 1.0),
                NamedEasing::new("ease-out", 0.0, 0.0, 0.58, 1.0),
                NamedEasing::new("ease-in-out", 0.42, 0.0, 0.58, 1.0),
                NamedEasing::new("linear", 0.0, 0.0, 1.0, 1.0),
            ],
        }
    }
}

impl NamingScheme {
    /// Name a spacing/width-style dimension: ladder match first, then a
    /// value-derived fallback (`margin-18-px`).
    pub fn dimension_name(&self, category: &str, dimension: &DimensionValue) -> String {
        if let Some(step) = self.scale_step(dimension) {
            return format!("{category}-{}", step.suffix);
        }
        format!(
            "{category}-{}-{}",
            number_slug(dimension.value),
            dimension.unit.slug()
        )
    }

    /// Name a border radius: `full` first, then the size bands, then the
    /// ladder, then the fallback.
    pub fn radius_name(&self, dimension: &DimensionValue) -> String {
        if dimension.unit == LengthUnit::Percent && dimension.value >= 50.0 {
            return "border-radius-full".into();
        }

        if let Some(px) = dimension.to_px(self.rem_base_px) {
            if px >= self.radius_bands.full_px {
                return "border-radius-full".into();
            }
            if px <= self.radius_bands.sm_px {
                return "border-radius-sm".into();
            }
            if px <= self.radius_bands.md_px {
                return "border-radius-md".into();
            }
            if px <= self.radius_bands.lg_px {
                return "border-radius-lg".into();
            }
        }

        self.dimension_name("border-radius", dimension)
    }

    /// Name a shadow by its blur band.
    pub fn shadow_name(&self, shadow: &ShadowValue) -> String {
        if let Some(blur_px) = shadow.blur.to_px(self.rem_base_px) {
            if blur_px <= self.shadow_bands.sm_px {
                return "shadow-sm".into();
            }
            if blur_px <= self.shadow_bands.md_px {
                return "shadow-md".into();
            }
            if blur_px <= self.shadow_bands.lg_px {
                return "shadow-lg".into();
            }
        }
        format!(
            "shadow-{}-{}",
            number_slug(shadow.blur.value),
            shadow.blur.unit.slug()
        )
    }

    /// Name a transition/animation: `<category>-<speed>-<easing>`.
    pub fn motion_name(&self, category: &str, motion: &TransitionValue) -> String {
        format!(
            "{category}-{}-{}",
            self.speed_name(motion.duration.seconds()),
            self.easing_name(&motion.timing_function)
        )
    }

    /// Speed band for a duration in seconds.
    pub fn speed_name(&self, seconds: f32) -> &'static str {
        if seconds <= self.speed_bands.instant_s {
            "instant"
        } else if seconds <= self.speed_bands.fast_s {
            "fast"
        } else if seconds <= self.speed_bands.normal_s {
            "normal"
        } else if seconds <= self.speed_bands.slow_s {
            "slow"
        } else {
            "very-slow"
        }
    }

    /// Easing name from an exact curve match, else `custom`.
    pub fn easing_name(&self, curve: &CubicBezierValue) -> &str {
        self.easings
            .iter()
            .find(|easing| easing.curve.approx_eq(curve))
            .map(|easing| easing.name.as_str())
            .unwrap_or("custom")
    }

    /// `<category>-<hex-without-hash>`.
    pub fn color_name(&self, category: &str, color: &ColorValue) -> String {
        format!("{category}-{}", color.hex_digits())
    }

    /// `border-style-<keyword>`.
    pub fn border_style_name(&self, style: &BorderStyleValue) -> String {
        format!("border-style-{style}")
    }

    /// Element-role name for a text style.
    pub fn typography_name(&self, tag: &str) -> String {
        let tag = tag.to_ascii_lowercase();
        match tag.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => format!("heading-{tag}"),
            "p" => "body-text".into(),
            "a" => "body-link".into(),
            "span" => "body-inline".into(),
            "li" => "body-list".into(),
            "code" => "text-code".into(),
            "pre" => "text-pre".into(),
            "blockquote" => "text-quote".into(),
            "small" => "text-small".into(),
            "strong" => "text-strong".into(),
            "em" => "text-emphasis".into(),
            other => format!("text-{other}"),
        }
    }

    fn scale_step(&self, dimension: &DimensionValue) -> Option<&ScaleStep> {
        let rem = dimension.to_rem(self.rem_base_px)?;
        self.dimension_scale
            .iter()
            .find(|step| (step.rem - rem).abs() < 1e-3)
    }
}

/// Identifier-safe rendering of a numeric value (`1.5` becomes `1-5`,
/// `-4` becomes `neg-4`).
fn number_slug(value: f32) -> String {
    let rendered = if value < 0.0 {
        format!("neg-{}", -value)
    } else {
        format!("{value}")
    };
    rendered.replace('.', "-")
}
