use std::{path::Path, slice};

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::{
    content::{self, ContactChannel, ExperienceEntry, Project, SkillCategory},
    page::{CounterSnapshot, PageSnapshot, SectionId, SectionSnapshot},
    style::{self, StyleRecord},
    Palette, Pose, Result,
};

/// Renders snapshots into standalone HTML documents with inline styles.
#[derive(Debug, Clone, Copy)]
pub struct PageRenderer {
    year: i32,
}

impl PageRenderer {
    /// `year` is printed in the footer copyright line.
    pub fn new(year: i32) -> Self {
        Self { year }
    }

    pub fn render(&self, snapshot: &PageSnapshot) -> String {
        self.document(snapshot).into_string()
    }

    pub fn document(&self, snapshot: &PageSnapshot) -> Markup {
        let palette = snapshot.palette();
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (content::PROFILE.name) " | " (content::PROFILE.role) }
                    style { (PreEscaped(style::global_stylesheet(&palette))) }
                }
                body data-theme=(snapshot.theme.as_str()) {
                    (render_nav(snapshot, &palette))
                    @for section in &snapshot.sections {
                        @match section.id {
                            SectionId::Home => { (render_hero(snapshot, section, &palette)) }
                            SectionId::About => { (render_about(snapshot, section, &palette)) }
                            SectionId::Skills => { (render_skills(section, &palette)) }
                            SectionId::Projects => { (render_projects(section, &palette)) }
                            SectionId::Experience => { (render_experience(section, &palette)) }
                            SectionId::Contact => { (render_contact(section, &palette)) }
                            SectionId::Footer => { (render_footer(&palette, self.year)) }
                        }
                    }
                }
            }
        }
    }

    pub fn write_to(&self, snapshot: &PageSnapshot, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let document = self.render(snapshot);
        std::fs::write(path, &document)?;
        tracing::info!(path = %path.display(), bytes = document.len(), "page written");
        Ok(())
    }
}

/// Inline `style` value, `None` for an empty record so the attribute is
/// left out.
fn css(record: &StyleRecord) -> Option<String> {
    (!record.is_empty()).then(|| record.to_css())
}

/// Hands out the section's poses in the same pre-order the reveal tree was
/// flattened in. Missing entries render at rest.
struct PoseCursor<'a> {
    poses: slice::Iter<'a, Pose>,
}

impl<'a> PoseCursor<'a> {
    fn new(section: &'a SectionSnapshot) -> Self {
        Self {
            poses: section.poses.iter(),
        }
    }

    fn next_style(&mut self, base: StyleRecord) -> StyleRecord {
        let pose = self.poses.next().copied().unwrap_or(Pose::REST);
        base.merged(style::pose(&pose))
    }
}

/// Wraps `body` in the section element and its titled container. `shell`
/// is the section's own style, already merged with its pose.
fn themed_section(section: &SectionSnapshot, shell: &StyleRecord, palette: &Palette, body: Markup) -> Markup {
    let tone = section.id.tone();
    html! {
        section id=(section.id.anchor()) data-visibility=(visibility_attr(section)) style=[css(shell)] {
            div class="container" {
                @if let Some(title) = section.id.title() {
                    h2 style=[css(&style::section_title(palette, tone))] { (title) }
                }
                (body)
            }
        }
    }
}

fn section_shell(section: &SectionSnapshot, cursor: &mut PoseCursor<'_>, palette: &Palette) -> StyleRecord {
    cursor.next_style(style::section(palette, section.id.tone()))
}

fn visibility_attr(section: &SectionSnapshot) -> &'static str {
    if section.visibility.is_visible() {
        "visible"
    } else {
        "hidden"
    }
}

fn grid(columns: &str, gap: &str) -> StyleRecord {
    StyleRecord::new()
        .with("display", "grid")
        .with("grid-template-columns", columns)
        .with("gap", gap)
}

fn render_nav(snapshot: &PageSnapshot, palette: &Palette) -> Markup {
    let bar = style::navbar(palette, snapshot.nav.scrolled).merged(style::pose(&snapshot.nav_pose));
    let row = StyleRecord::new()
        .with("display", "flex")
        .with("justify-content", "space-between")
        .with("align-items", "center");
    let icon = if snapshot.theme.is_dark() { "🌙" } else { "☀️" };

    html! {
        nav style=[css(&bar)] {
            div class="container" style=[css(&row)] {
                a href="#home" style=[css(&style::logo(palette))] { (content::PROFILE.short_name) }
                label data-theme=(snapshot.theme.as_str())
                    style=[css(&style::theme_switch_track(palette, snapshot.theme))] {
                    span style=[css(&style::theme_switch_thumb(palette, snapshot.theme))] { (icon) }
                }
                ul style=[css(&style::nav_links(snapshot.nav.menu_open))] {
                    @for link in content::NAV_LINKS {
                        li {
                            a href={ "#" (link.anchor) } style=[css(&style::nav_link(palette))] {
                                (link.label)
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_hero(snapshot: &PageSnapshot, section: &SectionSnapshot, palette: &Palette) -> Markup {
    let mut cursor = PoseCursor::new(section);
    let hero = style::hero(palette, snapshot.hero_parallax as f32);

    html! {
        section id="home" data-visibility=(visibility_attr(section)) style=[css(&hero)] {
            @let container = cursor.next_style(StyleRecord::new());
            div style=[css(&container)] {
                @let title = cursor.next_style(style::hero_title(palette));
                h1 style=[css(&title)] {
                    @for ch in content::PROFILE.name.chars() {
                        @let glyph = cursor.next_style(StyleRecord::new());
                        span style=[css(&glyph)] { (ch) }
                    }
                }
                @let subtitle = cursor.next_style(StyleRecord::new().with("font-size", "1.5rem"));
                h2 style=[css(&subtitle)] { (content::PROFILE.role) }
                @let description = cursor.next_style(
                    StyleRecord::new()
                        .with("font-size", "1.2rem")
                        .with("max-width", "600px")
                        .with("margin", "0 auto 2rem"),
                );
                p style=[css(&description)] { (content::PROFILE.summary) }
                @let cta = cursor.next_style(style::cta_button(palette));
                a href="#contact" style=[css(&cta)] { (content::PROFILE.call_to_action) }
            }
        }
    }
}

fn render_about(snapshot: &PageSnapshot, section: &SectionSnapshot, palette: &Palette) -> Markup {
    let mut cursor = PoseCursor::new(section);
    let shell = section_shell(section, &mut cursor, palette);
    let copy = StyleRecord::new().with("font-size", "1.1rem").with("line-height", "1.8");

    let body = html! {
        div class="grid" style=[css(&grid("1fr 1fr", "4rem"))] {
            div style=[css(&copy)] {
                @for paragraph in content::ABOUT_PARAGRAPHS {
                    p { (paragraph) }
                }
            }
            div class="grid" style=[css(&grid("repeat(2, 1fr)", "2rem"))] {
                @for (stat, counter) in content::STATS.iter().zip(&snapshot.counters) {
                    (render_stat(&mut cursor, palette, stat.label, counter))
                }
            }
        }
    };
    themed_section(section, &shell, palette, body)
}

fn render_stat(cursor: &mut PoseCursor<'_>, palette: &Palette, label: &str, counter: &CounterSnapshot) -> Markup {
    let card = cursor.next_style(style::card(palette).with("text-align", "center"));
    html! {
        div style=[css(&card)] {
            div style=[css(&style::stat_number(palette))] { (counter.display()) }
            div { (label) }
        }
    }
}

fn render_skills(section: &SectionSnapshot, palette: &Palette) -> Markup {
    let mut cursor = PoseCursor::new(section);
    let shell = section_shell(section, &mut cursor, palette);

    let body = html! {
        div class="grid" style=[css(&grid("repeat(auto-fit, minmax(300px, 1fr))", "3rem"))] {
            @for category in content::SKILLS {
                (render_skill_category(&mut cursor, palette, category))
            }
        }
    };
    themed_section(section, &shell, palette, body)
}

fn render_skill_category(cursor: &mut PoseCursor<'_>, palette: &Palette, category: &SkillCategory) -> Markup {
    let panel = cursor.next_style(style::glass_panel());
    let tags = StyleRecord::new()
        .with("display", "flex")
        .with("flex-wrap", "wrap")
        .with("gap", "0.5rem");

    html! {
        div style=[css(&panel)] {
            h3 style=[css(&style::category_title(palette))] { (category.category) }
            div style=[css(&tags)] {
                @for tag in category.tags {
                    @let chip = cursor.next_style(style::skill_tag(palette));
                    span style=[css(&chip)] { (tag) }
                }
            }
        }
    }
}

fn render_projects(section: &SectionSnapshot, palette: &Palette) -> Markup {
    let mut cursor = PoseCursor::new(section);
    let shell = section_shell(section, &mut cursor, palette);

    let body = html! {
        div class="grid" style=[css(&grid("repeat(auto-fit, minmax(350px, 1fr))", "2rem"))] {
            @for project in content::PROJECTS {
                (render_project(&mut cursor, palette, project))
            }
        }
    };
    themed_section(section, &shell, palette, body)
}

fn render_project(cursor: &mut PoseCursor<'_>, palette: &Palette, project: &Project) -> Markup {
    let card = cursor.next_style(style::card(palette).with("padding", "0").with("overflow", "hidden"));
    html! {
        div style=[css(&card)] {
            div style=[css(&style::project_header(palette))] {
                h3 { (project.title) }
                div style="opacity: 0.9" { (project.kind) }
            }
            div style="padding: 1.5rem" {
                p { (project.description) }
                @for tech in project.tech {
                    span style=[css(&style::tech_tag(palette))] { (tech) }
                }
            }
        }
    }
}

fn render_experience(section: &SectionSnapshot, palette: &Palette) -> Markup {
    let mut cursor = PoseCursor::new(section);
    let shell = section_shell(section, &mut cursor, palette);

    let body = html! {
        div style="max-width: 800px; margin: 0 auto" {
            @for entry in content::EXPERIENCE {
                (render_experience_entry(&mut cursor, palette, entry))
            }
        }
    };
    themed_section(section, &shell, palette, body)
}

fn render_experience_entry(cursor: &mut PoseCursor<'_>, palette: &Palette, entry: &ExperienceEntry) -> Markup {
    let card = cursor.next_style(style::experience_card(palette));
    html! {
        div style=[css(&card)] {
            h3 style=[css(&style::category_title(palette))] { (entry.title) }
            div { (entry.company) }
            div style=[css(&style::experience_period(palette))] { (entry.period) }
            p { (entry.description) }
        }
    }
}

fn render_contact(section: &SectionSnapshot, palette: &Palette) -> Markup {
    let mut cursor = PoseCursor::new(section);
    let shell = section_shell(section, &mut cursor, palette);

    let body = html! {
        p { (content::CONTACT_INTRO) }
        div class="grid" style=[css(&grid("repeat(auto-fit, minmax(250px, 1fr))", "2rem"))] {
            @for channel in content::CONTACTS {
                (render_contact_channel(&mut cursor, palette, channel))
            }
        }
    };
    themed_section(section, &shell, palette, body)
}

fn render_contact_channel(cursor: &mut PoseCursor<'_>, palette: &Palette, channel: &ContactChannel) -> Markup {
    let item = cursor.next_style(style::card(palette).with("text-align", "center"));
    let initial: String = channel.title.chars().take(1).collect();
    html! {
        div style=[css(&item)] {
            div style=[css(&style::contact_icon(palette))] { (initial) }
            h3 style=[css(&style::contact_title(palette))] { (channel.title) }
            a href=(channel.href)
                target=[channel.external.then_some("_blank")]
                rel=[channel.external.then_some("noopener noreferrer")]
                style=[css(&style::link(palette))] {
                (channel.label)
            }
        }
    }
}

fn render_footer(palette: &Palette, year: i32) -> Markup {
    html! {
        footer id="footer" style=[css(&style::footer(palette))] {
            div class="container" {
                p { (content::copyright(year)) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppConfig, Page, ThemeMode};

    fn render(page: &Page) -> String {
        PageRenderer::new(2026).render(&page.snapshot())
    }

    #[test]
    fn text_is_escaped() {
        let section = SectionSnapshot {
            id: SectionId::About,
            rect: crate::Rect::new(0.0, 0.0, 100.0, 100.0),
            visibility: crate::VisibilityState::Visible,
            poses: Vec::new(),
        };
        let counter = CounterSnapshot {
            label: "",
            suffix: "+",
            value: 3,
            target: 3,
            running: false,
            rect: section.rect,
        };
        let mut cursor = PoseCursor::new(&section);
        let markup = render_stat(&mut cursor, &Palette::light(), "<b>R&D</b>", &counter).into_string();
        assert!(markup.contains("&lt;b&gt;R&amp;D&lt;/b&gt;"));
        assert!(markup.contains(">3+</div>"));
    }

    #[test]
    fn document_contains_every_section() {
        let page = Page::mount(AppConfig::default()).unwrap();
        let html = render(&page);
        assert!(html.starts_with("<!DOCTYPE html>"));
        for id in SectionId::ALL {
            assert!(html.contains(&format!("id=\"{}\"", id.anchor())), "{id:?}");
        }
        assert!(html.contains("© 2026 Ishan Chandra Joshi"));
        assert!(html.contains("Connect</h2>"));
        assert!(html.contains("</html>"));
    }

    #[test]
    fn stylesheet_is_not_escaped() {
        let page = Page::mount(AppConfig::default()).unwrap();
        let html = render(&page);
        assert!(html.contains("font-family: 'Segoe UI'"));
        assert!(html.contains(".container { max-width: 1200px;"));
    }

    #[test]
    fn hidden_sections_render_offset() {
        let page = Page::mount(AppConfig::default()).unwrap();
        let html = render(&page);
        assert!(html.contains("id=\"about\" data-visibility=\"hidden\""));
        assert!(html.contains("opacity: 0; transform: translate(0px, 50px) scale(1)"));
    }

    #[test]
    fn navbar_starts_above_the_page() {
        let page = Page::mount(AppConfig::default()).unwrap();
        let html = render(&page);
        assert!(html.contains("z-index: 1000; padding: 1rem 0; box-shadow: none; opacity: 1; transform: translate(0px, -100px) scale(1)"));
    }

    #[test]
    fn settled_page_shows_final_counter_values() {
        let mut page = Page::mount(AppConfig::default()).unwrap();
        page.scroll_through(400.0);
        page.run_until_settled(16.0, 1_000);
        let html = render(&page);
        assert!(html.contains(">7+</div>"));
        assert!(html.contains(">4th</div>"));
        assert!(!html.contains("data-visibility=\"hidden\""));
        assert!(!html.contains("translate(0px, -100px)"));
    }

    #[test]
    fn theme_selects_palette() {
        let mut page = Page::mount(AppConfig::default()).unwrap();
        page.toggle_theme();
        let html = render(&page);
        assert!(html.contains("data-theme=\"dark\""));
        assert!(html.contains("background-color: #0f172a"));
        assert_eq!(page.theme(), ThemeMode::Dark);
    }

    #[test]
    fn external_links_open_in_new_tab() {
        let page = Page::mount(AppConfig::default()).unwrap();
        let html = render(&page);
        assert!(html.contains(
            "href=\"https://github.com/ishanjoshi242\" target=\"_blank\" rel=\"noopener noreferrer\""
        ));
    }

    #[test]
    fn writes_document_to_disk() {
        let page = Page::mount(AppConfig::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        PageRenderer::new(2026).write_to(&page.snapshot(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("</html>"));
    }
}
