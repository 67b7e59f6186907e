//! Configuration for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::naming::NamingScheme;

/// Color extractor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    pub enabled: bool,

    /// Read the `color` property
    pub include_text: bool,

    /// Read the `background-color` property
    pub include_background: bool,

    /// Read the `border-color` property
    pub include_border: bool,

    /// Minimum total observations for a value to become a token.
    ///
    /// Default: 2.
    pub minimum_occurrences: usize,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include_text: true,
            include_background: true,
            include_border: true,
            minimum_occurrences: 2,
        }
    }
}

impl ColorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minimum_occurrences(mut self, minimum: usize) -> Self {
        self.minimum_occurrences = minimum;
        self
    }

    pub fn with_text(mut self, include: bool) -> Self {
        self.include_text = include;
        self
    }

    pub fn with_background(mut self, include: bool) -> Self {
        self.include_background = include;
        self
    }

    pub fn with_border(mut self, include: bool) -> Self {
        self.include_border = include;
        self
    }
}

/// Typography extractor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypographyConfig {
    pub enabled: bool,

    /// Visit `h1`-`h6`
    pub include_headings: bool,

    /// Visit body-text elements (`p`, `a`, `span`, `li`)
    pub include_body: bool,

    /// Visit special-text elements (`code`, `pre`, `blockquote`, ...)
    pub include_special: bool,

    /// Default: 1 (heading styles often appear once per page).
    pub minimum_occurrences: usize,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include_headings: true,
            include_body: true,
            include_special: true,
            minimum_occurrences: 1,
        }
    }
}

impl TypographyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minimum_occurrences(mut self, minimum: usize) -> Self {
        self.minimum_occurrences = minimum;
        self
    }

    pub fn with_headings(mut self, include: bool) -> Self {
        self.include_headings = include;
        self
    }

    pub fn with_body(mut self, include: bool) -> Self {
        self.include_body = include;
        self
    }

    pub fn with_special(mut self, include: bool) -> Self {
        self.include_special = include;
        self
    }
}

/// Spacing extractor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpacingConfig {
    pub enabled: bool,
    pub include_margin: bool,
    pub include_padding: bool,
    pub include_gap: bool,

    /// Default: 2.
    pub minimum_occurrences: usize,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include_margin: true,
            include_padding: true,
            include_gap: true,
            minimum_occurrences: 2,
        }
    }
}

impl SpacingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minimum_occurrences(mut self, minimum: usize) -> Self {
        self.minimum_occurrences = minimum;
        self
    }

    pub fn with_margin(mut self, include: bool) -> Self {
        self.include_margin = include;
        self
    }

    pub fn with_padding(mut self, include: bool) -> Self {
        self.include_padding = include;
        self
    }

    pub fn with_gap(mut self, include: bool) -> Self {
        self.include_gap = include;
        self
    }
}

/// Border extractor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorderConfig {
    pub enabled: bool,
    pub include_width: bool,
    pub include_style: bool,
    pub include_radius: bool,
    pub include_shadow: bool,

    /// Default: 2.
    pub minimum_occurrences: usize,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include_width: true,
            include_style: true,
            include_radius: true,
            include_shadow: true,
            minimum_occurrences: 2,
        }
    }
}

impl BorderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minimum_occurrences(mut self, minimum: usize) -> Self {
        self.minimum_occurrences = minimum;
        self
    }

    pub fn with_width(mut self, include: bool) -> Self {
        self.include_width = include;
        self
    }

    pub fn with_style(mut self, include: bool) -> Self {
        self.include_style = include;
        self
    }

    pub fn with_radius(mut self, include: bool) -> Self {
        self.include_radius = include;
        self
    }

    pub fn with_shadow(mut self, include: bool) -> Self {
        self.include_shadow = include;
        self
    }
}

/// Animation extractor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub enabled: bool,
    pub include_transitions: bool,
    pub include_animations: bool,

    /// Default: 1.
    pub minimum_occurrences: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include_transitions: true,
            include_animations: true,
            minimum_occurrences: 1,
        }
    }
}

impl AnimationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minimum_occurrences(mut self, minimum: usize) -> Self {
        self.minimum_occurrences = minimum;
        self
    }

    pub fn with_transitions(mut self, include: bool) -> Self {
        self.include_transitions = include;
        self
    }

    pub fn with_animations(mut self, include: bool) -> Self {
        self.include_animations = include;
        self
    }
}

/// Top-level configuration: one section per category plus the naming
/// tables shared by all of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub colors: ColorConfig,

    #[serde(default)]
    pub typography: TypographyConfig,

    #[serde(default)]
    pub spacing: SpacingConfig,

    #[serde(default)]
    pub borders: BorderConfig,

    #[serde(default)]
    pub animation: AnimationConfig,

    #[serde(default)]
    pub naming: NamingScheme,
}

impl ExtractionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_colors(mut self, colors: ColorConfig) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_typography(mut self, typography: TypographyConfig) -> Self {
        self.typography = typography;
        self
    }

    pub fn with_spacing(mut self, spacing: SpacingConfig) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_borders(mut self, borders: BorderConfig) -> Self {
        self.borders = borders;
        self
    }

    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_naming(mut self, naming: NamingScheme) -> Self {
        self.naming = naming;
        self
    }

    /// Apply one occurrence threshold to every category.
    pub fn with_minimum_occurrences(mut self, minimum: usize) -> Self {
        self.colors.minimum_occurrences = minimum;
        self.typography.minimum_occurrences = minimum;
        self.spacing.minimum_occurrences = minimum;
        self.borders.minimum_occurrences = minimum;
        self.animation.minimum_occurrences = minimum;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = ExtractionConfig::default();
        assert_eq!(config.colors.minimum_occurrences, 2);
        assert_eq!(config.typography.minimum_occurrences, 1);
        assert_eq!(config.spacing.minimum_occurrences, 2);
        assert_eq!(config.borders.minimum_occurrences, 2);
        assert_eq!(config.animation.minimum_occurrences, 1);
    }

    #[test]
    fn test_uniform_threshold_builder() {
        let config = ExtractionConfig::new().with_minimum_occurrences(3);
        assert_eq!(config.colors.minimum_occurrences, 3);
        assert_eq!(config.animation.minimum_occurrences, 3);
    }

    #[test]
    fn test_config_round_trips_through_serde() {
        let config = ExtractionConfig::new()
            .with_colors(ColorConfig::new().with_border(false))
            .with_minimum_occurrences(2);

        let json = serde_json::to_string(&config).unwrap();
        let back: ExtractionConfig = serde_json::from_str(&json).unwrap();
        assert!(!back.colors.include_border);
        assert_eq!(back.spacing.minimum_occurrences, 2);
    }
}
