use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{PortfolioError, Result, ThemeMode, DEFAULT_COUNTER_DURATION_MS};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: ThemeMode,
    pub viewport: ViewportConfig,
    pub animation: AnimationConfig,
    pub layout: LayoutConfig,
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.viewport.validate()?;
        self.animation.validate()?;
        self.layout.validate()
    }
}

/// Size of the simulated browser window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl ViewportConfig {
    fn validate(&self) -> Result<()> {
        if !(positive(self.width) && positive(self.height)) {
            return Err(PortfolioError::InvalidConfig(
                "viewport dimensions must be positive",
            ));
        }
        Ok(())
    }
}

/// Timings and offsets of the reveal animations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub section_offset_px: f32,
    pub section_duration_ms: f64,
    pub card_duration_ms: f64,
    pub counter_duration_ms: f64,
    pub hero_stagger_ms: f64,
    pub hero_cta_delay_ms: f64,
    pub typing_step_ms: f64,
    pub typing_duration_ms: f64,
    pub tag_stagger_ms: f64,
    pub tag_duration_ms: f64,
    /// Scroll distance after which the navbar gains its shadow.
    pub nav_scroll_threshold: f64,
    pub parallax_factor: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            section_offset_px: 50.0,
            section_duration_ms: 800.0,
            card_duration_ms: 600.0,
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            hero_stagger_ms: 200.0,
            hero_cta_delay_ms: 500.0,
            typing_step_ms: 50.0,
            typing_duration_ms: 100.0,
            tag_stagger_ms: 100.0,
            tag_duration_ms: 300.0,
            nav_scroll_threshold: 100.0,
            parallax_factor: 0.5,
        }
    }
}

impl AnimationConfig {
    fn validate(&self) -> Result<()> {
        let timings = [
            self.section_duration_ms,
            self.card_duration_ms,
            self.counter_duration_ms,
            self.hero_stagger_ms,
            self.hero_cta_delay_ms,
            self.typing_step_ms,
            self.typing_duration_ms,
            self.tag_stagger_ms,
            self.tag_duration_ms,
        ];
        if timings.iter().any(|value| !non_negative(*value)) {
            return Err(PortfolioError::InvalidConfig(
                "animation timings must be finite and non-negative",
            ));
        }
        if !self.section_offset_px.is_finite()
            || !non_negative(self.nav_scroll_threshold)
            || !self.parallax_factor.is_finite()
        {
            return Err(PortfolioError::InvalidConfig(
                "animation offsets must be finite",
            ));
        }
        Ok(())
    }
}

/// Heights of the stacked sections; the hero always fills the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub about_height: f64,
    pub skills_height: f64,
    pub projects_height: f64,
    pub experience_height: f64,
    pub contact_height: f64,
    pub footer_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            about_height: 900.0,
            skills_height: 850.0,
            projects_height: 900.0,
            experience_height: 800.0,
            contact_height: 750.0,
            footer_height: 120.0,
        }
    }
}

impl LayoutConfig {
    fn validate(&self) -> Result<()> {
        let heights = [
            self.about_height,
            self.skills_height,
            self.projects_height,
            self.experience_height,
            self.contact_height,
            self.footer_height,
        ];
        if heights.iter().any(|height| !positive(*height)) {
            return Err(PortfolioError::InvalidConfig(
                "section heights must be positive",
            ));
        }
        Ok(())
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config =
            AppConfig::from_json_str(r#"{ "theme": "dark", "viewport": { "height": 600 } }"#)
                .unwrap();
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.viewport.height, 600.0);
        assert_eq!(config.viewport.width, 1280.0);
        assert_eq!(config.animation.counter_duration_ms, 2_000.0);
    }

    #[test]
    fn rejects_negative_durations() {
        let err = AppConfig::from_json_str(r#"{ "animation": { "card_duration_ms": -1 } }"#)
            .unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_empty_sections() {
        let err =
            AppConfig::from_json_str(r#"{ "layout": { "footer_height": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("section heights"));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = AppConfig::from_json_str("{ theme: ").unwrap_err();
        assert!(matches!(err, PortfolioError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, PortfolioError::Io(_)));
    }
}
