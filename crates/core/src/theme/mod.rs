use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::PortfolioError;

/// Two-valued colour scheme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Light => Palette::light(),
            ThemeMode::Dark => Palette::dark(),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = PortfolioError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(PortfolioError::msg(format!(
                "unknown theme `{other}`, expected `light` or `dark`"
            ))),
        }
    }
}

/// Colour table consumed by the style layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub text_light: &'static str,
    pub text_dark: &'static str,
    pub bg_dark: &'static str,
    pub bg_light: &'static str,
    pub current_bg: &'static str,
    pub current_text: &'static str,
    pub current_card_bg: &'static str,
    pub current_shadow: &'static str,
}

impl Palette {
    pub const fn light() -> Self {
        Self {
            primary: "#6366f1",
            secondary: "#0f172a",
            accent: "#f59e0b",
            text_light: "#e2e8f0",
            text_dark: "#1e293b",
            bg_dark: "#0f172a",
            bg_light: "#f8fafc",
            current_bg: "#f8fafc",
            current_text: "#1e293b",
            current_card_bg: "#ffffff",
            current_shadow: "rgba(0, 0, 0, 0.1)",
        }
    }

    pub const fn dark() -> Self {
        Self {
            current_bg: "#0f172a",
            current_text: "#e2e8f0",
            current_card_bg: "rgba(255, 255, 255, 0.05)",
            current_shadow: "rgba(0, 0, 0, 0.3)",
            ..Self::light()
        }
    }
}

/// Holds the active [`ThemeMode`]; flipped only by user action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeSwitch {
    mode: ThemeMode,
}

impl ThemeSwitch {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn palette(&self) -> Palette {
        self.mode.palette()
    }

    /// Flips the mode and returns the new value.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        tracing::info!(theme = %self.mode, "theme toggled");
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_toggle_round_trips() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            let mut switch = ThemeSwitch::new(mode);
            switch.toggle();
            assert_ne!(switch.mode(), mode);
            switch.toggle();
            assert_eq!(switch.mode(), mode);
        }
    }

    #[test]
    fn defaults_to_light() {
        assert_eq!(ThemeSwitch::default().mode(), ThemeMode::Light);
    }

    #[test]
    fn palettes_differ_only_in_current_keys() {
        let light = Palette::light();
        let dark = Palette::dark();
        assert_eq!(light.primary, dark.primary);
        assert_eq!(light.bg_dark, dark.bg_dark);
        assert_eq!(light.current_bg, "#f8fafc");
        assert_eq!(dark.current_bg, "#0f172a");
        assert_ne!(light.current_text, dark.current_text);
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("Dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!(" light ".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
        let err = "sepia".parse::<ThemeMode>().unwrap_err();
        assert!(err.to_string().contains("sepia"));
    }

    #[test]
    fn serialises_lowercase() {
        let json = serde_json::to_string(&ThemeMode::Dark).unwrap();
        assert_eq!(json, "\"dark\"");
    }
}
