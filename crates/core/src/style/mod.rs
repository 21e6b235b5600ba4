use serde::Serialize;

use crate::{Palette, Pose, ThemeMode};

/// Ordered list of CSS declarations for one element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleRecord {
    properties: Vec<(&'static str, String)>,
}

impl StyleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`StyleRecord::set`].
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets `name`, replacing an earlier declaration in place.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.properties.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.properties.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Appends `other`, letting its declarations win.
    pub fn merged(mut self, other: StyleRecord) -> Self {
        for (name, value) in other.properties {
            self.set(name, value);
        }
        self
    }

    /// Inline `style` attribute form, `name: value; name: value`.
    pub fn to_css(&self) -> String {
        self.properties
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Background family of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionTone {
    /// Follows the light/dark mode.
    Themed,
    /// Always dark regardless of mode.
    Dark,
    Hero,
}

const GLASS_BG: &str = "rgba(255, 255, 255, 0.05)";
const COLOR_TRANSITION: &str = "background-color 0.3s ease, color 0.3s ease";

fn round(value: f32, places: i32) -> f32 {
    let factor = 10_f32.powi(places);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn px(value: f32) -> String {
    format!("{}px", round(value, 2))
}

fn section_colors(palette: &Palette, tone: SectionTone) -> (&'static str, &'static str) {
    match tone {
        SectionTone::Themed => (palette.current_bg, palette.current_text),
        SectionTone::Dark | SectionTone::Hero => (palette.bg_dark, palette.text_light),
    }
}

pub fn section(palette: &Palette, tone: SectionTone) -> StyleRecord {
    let (background, color) = section_colors(palette, tone);
    StyleRecord::new()
        .with("padding", "80px 0")
        .with("background", background)
        .with("color", color)
        .with("transition", COLOR_TRANSITION)
}

pub fn section_title(palette: &Palette, tone: SectionTone) -> StyleRecord {
    let (_, color) = section_colors(palette, tone);
    StyleRecord::new()
        .with("text-align", "center")
        .with("font-size", "2.5rem")
        .with("margin-bottom", "3rem")
        .with("color", color)
        .with("border-bottom", format!("4px solid {}", palette.primary))
}

/// Elevated card on a themed background.
pub fn card(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with("background", palette.current_card_bg)
        .with("padding", "2rem")
        .with("border-radius", "15px")
        .with("box-shadow", format!("0 10px 30px {}", palette.current_shadow))
        .with("color", palette.current_text)
        .with("transition", "all 0.3s ease")
}

/// Translucent panel on a dark background.
pub fn glass_panel() -> StyleRecord {
    StyleRecord::new()
        .with("background", GLASS_BG)
        .with("padding", "2rem")
        .with("border-radius", "15px")
        .with("border", "1px solid rgba(255, 255, 255, 0.1)")
}

pub fn stat_number(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with("font-size", "2.5rem")
        .with("font-weight", "bold")
        .with("color", palette.primary)
        .with("margin-bottom", "0.5rem")
}

pub fn category_title(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with("color", palette.accent)
        .with("margin-bottom", "1.5rem")
        .with("font-size", "1.3rem")
}

pub fn skill_tag(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with("display", "inline-block")
        .with("background", palette.primary)
        .with("padding", "0.5rem 1rem")
        .with("border-radius", "25px")
        .with("font-size", "0.9rem")
}

pub fn project_header(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with(
            "background",
            format!(
                "linear-gradient(135deg, {}, {})",
                palette.primary, palette.accent
            ),
        )
        .with("color", "white")
        .with("padding", "1.5rem")
}

pub fn tech_tag(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with("display", "inline-block")
        .with("background", palette.current_bg)
        .with("color", palette.primary)
        .with("padding", "0.3rem 0.8rem")
        .with("border-radius", "15px")
        .with("font-size", "0.8rem")
        .with("border", format!("1px solid {}", palette.primary))
}

pub fn experience_card(palette: &Palette) -> StyleRecord {
    glass_panel()
        .with("margin-bottom", "2rem")
        .with("border", "none")
        .with("border-left", format!("4px solid {}", palette.accent))
}

pub fn experience_period(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with("color", palette.primary)
        .with("font-weight", "bold")
}

pub fn contact_icon(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with("width", "50px")
        .with("height", "50px")
        .with("background", palette.primary)
        .with("border-radius", "50%")
        .with("display", "flex")
        .with("align-items", "center")
        .with("justify-content", "center")
        .with("margin", "0 auto 1rem")
        .with("color", "white")
}

pub fn contact_title(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with("color", palette.secondary)
        .with("margin-bottom", "0.5rem")
}

pub fn link(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with("color", palette.primary)
        .with("text-decoration", "none")
}

/// Full-height gradient banner shifted down by the parallax offset.
pub fn hero(palette: &Palette, parallax_px: f32) -> StyleRecord {
    StyleRecord::new()
        .with("min-height", "100vh")
        .with(
            "background",
            format!(
                "linear-gradient(135deg, {} 0%, {} 100%)",
                palette.bg_dark, palette.primary
            ),
        )
        .with("display", "flex")
        .with("align-items", "center")
        .with("justify-content", "center")
        .with("text-align", "center")
        .with("color", palette.text_light)
        .with("overflow", "hidden")
        .with("transform", format!("translateY({})", px(parallax_px)))
}

pub fn hero_title(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with("font-size", "3.5rem")
        .with("margin-bottom", "1rem")
        .with(
            "background",
            format!(
                "linear-gradient(45deg, {}, {})",
                palette.text_light, palette.accent
            ),
        )
        .with("-webkit-background-clip", "text")
        .with("-webkit-text-fill-color", "transparent")
        .with("background-clip", "text")
        .with("animation", "floating 3s ease-in-out infinite")
}

pub fn cta_button(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with("display", "inline-block")
        .with("background", palette.accent)
        .with("color", palette.bg_dark)
        .with("padding", "12px 30px")
        .with("border-radius", "50px")
        .with("text-decoration", "none")
        .with("font-weight", "bold")
}

/// Fixed navigation bar; gains a drop shadow once the page is scrolled.
pub fn navbar(palette: &Palette, scrolled: bool) -> StyleRecord {
    StyleRecord::new()
        .with("position", "fixed")
        .with("top", "0")
        .with("width", "100%")
        .with("background", palette.bg_dark)
        .with("z-index", "1000")
        .with("padding", "1rem 0")
        .with(
            "box-shadow",
            if scrolled {
                "0 2px 10px rgba(0, 0, 0, 0.2)"
            } else {
                "none"
            },
        )
}

pub fn nav_link(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with("color", palette.text_light)
        .with("text-decoration", "none")
}

/// Nav link list; collapsed on small screens unless the menu is open.
pub fn nav_links(menu_open: bool) -> StyleRecord {
    StyleRecord::new()
        .with("display", "flex")
        .with("list-style", "none")
        .with("gap", "2rem")
        .with("flex-direction", if menu_open { "column" } else { "row" })
}

pub fn logo(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with("font-size", "1.5rem")
        .with("font-weight", "bold")
        .with("color", palette.primary)
        .with("text-decoration", "none")
}

pub fn theme_switch_track(palette: &Palette, mode: ThemeMode) -> StyleRecord {
    let background = match mode {
        ThemeMode::Light => format!(
            "linear-gradient(135deg, {}, {})",
            palette.primary, palette.accent
        ),
        ThemeMode::Dark => format!("linear-gradient(135deg, {}, #374151)", palette.text_dark),
    };
    StyleRecord::new()
        .with("display", "block")
        .with("position", "relative")
        .with("width", "60px")
        .with("height", "30px")
        .with("border-radius", "25px")
        .with("background", background)
        .with("cursor", "pointer")
}

pub fn theme_switch_thumb(palette: &Palette, mode: ThemeMode) -> StyleRecord {
    let (offset, background) = match mode {
        ThemeMode::Light => (0.0, "white"),
        ThemeMode::Dark => (30.0, palette.text_dark),
    };
    StyleRecord::new()
        .with("position", "absolute")
        .with("top", "3px")
        .with("left", "3px")
        .with("width", "24px")
        .with("height", "24px")
        .with("border-radius", "50%")
        .with("background", background)
        .with("transform", format!("translateX({})", px(offset)))
        .with("transition", "all 0.4s cubic-bezier(0.4, 0, 0.2, 1)")
}

pub fn footer(palette: &Palette) -> StyleRecord {
    StyleRecord::new()
        .with("background", palette.bg_dark)
        .with("color", palette.text_light)
        .with("text-align", "center")
        .with("padding", "2rem 0")
        .with("font-size", "0.9rem")
        .with("border-top", "1px solid rgba(255, 255, 255, 0.1)")
}

/// Opacity and transform for an animated pose.
pub fn pose(pose: &Pose) -> StyleRecord {
    StyleRecord::new()
        .with("opacity", round(pose.opacity, 3).to_string())
        .with(
            "transform",
            format!(
                "translate({}, {}) scale({})",
                px(pose.x),
                px(pose.y),
                round(pose.scale, 3)
            ),
        )
}

/// Document-wide reset, body typography and keyframes.
pub fn global_stylesheet(palette: &Palette) -> String {
    format!(
        r#"* {{ margin: 0; padding: 0; box-sizing: border-box; }}
body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; color: {text}; background-color: {bg}; overflow-x: hidden; transition: {transition}; }}
.container {{ max-width: 1200px; margin: 0 auto; padding: 0 20px; }}
@keyframes floating {{ 0%, 100% {{ transform: translateY(0px); }} 50% {{ transform: translateY(-10px); }} }}
@media (max-width: 768px) {{ .grid {{ grid-template-columns: 1fr !important; }} }}
"#,
        text = palette.current_text,
        bg = palette.current_bg,
        transition = COLOR_TRANSITION,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let record = StyleRecord::new()
            .with("color", "red")
            .with("padding", "0")
            .with("color", "blue");
        assert_eq!(record.len(), 2);
        assert_eq!(record.to_css(), "color: blue; padding: 0");
    }

    #[test]
    fn merged_lets_later_record_win() {
        let base = StyleRecord::new().with("color", "red").with("margin", "0");
        let merged = base.merged(StyleRecord::new().with("color", "green"));
        assert_eq!(merged.get("color"), Some("green"));
        assert_eq!(merged.get("margin"), Some("0"));
    }

    #[test]
    fn themed_sections_follow_mode() {
        let light = section(&Palette::light(), SectionTone::Themed);
        let dark = section(&Palette::dark(), SectionTone::Themed);
        assert_eq!(light.get("background"), Some("#f8fafc"));
        assert_eq!(dark.get("background"), Some("#0f172a"));
    }

    #[test]
    fn dark_sections_ignore_mode() {
        let light = section(&Palette::light(), SectionTone::Dark);
        let dark = section(&Palette::dark(), SectionTone::Dark);
        assert_eq!(light, dark);
        assert_eq!(light.get("color"), Some("#e2e8f0"));
    }

    #[test]
    fn navbar_shadow_tracks_scroll() {
        let palette = Palette::light();
        assert_eq!(navbar(&palette, false).get("box-shadow"), Some("none"));
        assert_ne!(navbar(&palette, true).get("box-shadow"), Some("none"));
    }

    #[test]
    fn switch_thumb_slides_in_dark_mode() {
        let palette = Palette::dark();
        let thumb = theme_switch_thumb(&palette, ThemeMode::Dark);
        assert_eq!(thumb.get("transform"), Some("translateX(30px)"));
        assert_eq!(thumb.get("background"), Some("#1e293b"));
        let thumb = theme_switch_thumb(&palette, ThemeMode::Light);
        assert_eq!(thumb.get("transform"), Some("translateX(0px)"));
    }

    #[test]
    fn pose_renders_opacity_and_transform() {
        let record = pose(&Pose::offset(0.0, 50.0));
        assert_eq!(record.get("opacity"), Some("0"));
        assert_eq!(
            record.get("transform"),
            Some("translate(0px, 50px) scale(1)")
        );
        let rest = pose(&Pose::REST);
        assert_eq!(rest.get("opacity"), Some("1"));
    }

    #[test]
    fn negative_zero_is_normalised() {
        let record = pose(&Pose {
            x: -0.0001,
            ..Pose::REST
        });
        assert_eq!(
            record.get("transform"),
            Some("translate(0px, 0px) scale(1)")
        );
    }

    #[test]
    fn hero_applies_parallax() {
        let record = hero(&Palette::light(), 125.5);
        assert_eq!(record.get("transform"), Some("translateY(125.5px)"));
    }

    #[test]
    fn stylesheet_uses_current_colors() {
        let sheet = global_stylesheet(&Palette::dark());
        assert!(sheet.contains("background-color: #0f172a"));
        assert!(sheet.contains("@keyframes floating"));
    }
}
