use serde::Serialize;

use crate::{
    content::{self, StatItem},
    AnimationConfig, AppConfig, CounterAnimator, ElementId, Easing, FrameClock, FrameScheduler,
    ObserverOptions, ObserverRegistry, Palette, Pose, Rect, Result, RevealNode, RevealSequencer,
    SectionTone, ThemeMode, ThemeSwitch, Transition, Variants, Viewport, VisibilityState,
};

const STAT_THRESHOLD: f64 = 0.5;
const STAT_HEIGHT: f64 = 48.0;
const STAT_ROW_PITCH: f64 = 180.0;
const STAT_GRID_OFFSET: f64 = 0.35;
const HERO_TEXT_OFFSET_PX: f32 = 30.0;
const CARD_OFFSET_PX: f32 = 20.0;
const PROJECT_OFFSET_PX: f32 = 50.0;
const EXPERIENCE_OFFSET_PX: f32 = -50.0;
const TAG_OFFSET_PX: f32 = -20.0;
const CONTACT_SCALE: f32 = 0.8;
const CONTACT_DURATION_MS: f64 = 500.0;
const NAV_SLIDE_PX: f32 = -100.0;
const NAV_DURATION_MS: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Home,
    About,
    Skills,
    Projects,
    Experience,
    Contact,
    Footer,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Experience,
        SectionId::Contact,
        SectionId::Footer,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Experience => "experience",
            SectionId::Contact => "contact",
            SectionId::Footer => "footer",
        }
    }

    pub fn title(self) -> Option<&'static str> {
        match self {
            SectionId::About => Some("About Me"),
            SectionId::Skills => Some("Technical Skills"),
            SectionId::Projects => Some("Featured Projects"),
            SectionId::Experience => Some("Professional Experience"),
            SectionId::Contact => Some("Let's Connect"),
            SectionId::Home | SectionId::Footer => None,
        }
    }

    pub fn tone(self) -> SectionTone {
        match self {
            SectionId::Home => SectionTone::Hero,
            SectionId::About | SectionId::Projects | SectionId::Contact => SectionTone::Themed,
            SectionId::Skills | SectionId::Experience | SectionId::Footer => SectionTone::Dark,
        }
    }

    /// Share of the section that must be on screen before it reveals.
    /// `None` for sections that do not wait on scrolling.
    pub fn reveal_threshold(self) -> Option<f64> {
        match self {
            SectionId::Projects => Some(0.3),
            SectionId::About | SectionId::Skills | SectionId::Experience | SectionId::Contact => {
                Some(0.1)
            }
            SectionId::Home | SectionId::Footer => None,
        }
    }
}

/// Reveal tree for a section, `None` for sections that never animate.
pub fn reveal_tree(id: SectionId, animation: &AnimationConfig) -> Option<RevealNode> {
    let section = || {
        RevealNode::new(Variants::fade_up(
            animation.section_offset_px,
            animation.section_duration_ms,
        ))
    };
    let cards = |count: usize, variants: Variants| {
        (0..count)
            .map(|_| RevealNode::new(variants))
            .collect::<Vec<_>>()
    };

    let tree = match id {
        SectionId::Home => hero_tree(animation),
        SectionId::About => section().with_children(cards(
            content::STATS.len(),
            Variants::fade_up(CARD_OFFSET_PX, animation.card_duration_ms),
        )),
        SectionId::Skills => {
            let categories = content::SKILLS
                .iter()
                .map(|category| {
                    RevealNode::new(Variants::fade_up(CARD_OFFSET_PX, animation.card_duration_ms))
                        .with_children(cards(
                            category.tags.len(),
                            Variants::slide_in_x(TAG_OFFSET_PX, animation.tag_duration_ms),
                        ))
                        .with_stagger(animation.tag_stagger_ms)
                })
                .collect();
            section().with_children(categories)
        }
        SectionId::Projects => section().with_children(cards(
            content::PROJECTS.len(),
            Variants::fade_up(PROJECT_OFFSET_PX, animation.card_duration_ms),
        )),
        SectionId::Experience => section().with_children(cards(
            content::EXPERIENCE.len(),
            Variants::slide_in_x(EXPERIENCE_OFFSET_PX, animation.card_duration_ms),
        )),
        SectionId::Contact => section().with_children(cards(
            content::CONTACTS.len(),
            Variants::scale_in(CONTACT_SCALE, CONTACT_DURATION_MS),
        )),
        SectionId::Footer => return None,
    };
    Some(tree)
}

/// Hero content: title (typed out one character at a time), subtitle,
/// description and call-to-action, staggered one after another.
fn hero_tree(animation: &AnimationConfig) -> RevealNode {
    let text = || Variants::fade_up(HERO_TEXT_OFFSET_PX, animation.section_duration_ms);
    let typing = Variants::fade_in(animation.typing_duration_ms)
        .with_transition(Transition::new(animation.typing_duration_ms, Easing::Linear));
    let characters = content::PROFILE
        .name
        .chars()
        .map(|_| RevealNode::new(typing))
        .collect();

    let container = Variants::new(Pose::REST, Transition::new(0.0, Easing::Linear));
    RevealNode::new(container)
        .with_children(vec![
            RevealNode::new(text())
                .with_children(characters)
                .with_stagger(animation.typing_step_ms),
            RevealNode::new(text()),
            RevealNode::new(text()),
            RevealNode::new(text().with_delay(animation.hero_cta_delay_ms)),
        ])
        .with_stagger(animation.hero_stagger_ms)
}

/// The navbar drops in from above the page on mount. It stays opaque while
/// it slides.
pub fn navbar_tree() -> RevealNode {
    let hidden = Pose {
        y: NAV_SLIDE_PX,
        ..Pose::REST
    };
    RevealNode::new(Variants::new(hidden, Transition::ease_out(NAV_DURATION_MS)))
}

/// Stacks the sections top to bottom; the hero fills the first screen.
pub fn layout(config: &AppConfig) -> Vec<(SectionId, Rect)> {
    let width = config.viewport.width;
    let heights = &config.layout;
    let mut y = 0.0;

    SectionId::ALL
        .iter()
        .map(|&id| {
            let height = match id {
                SectionId::Home => config.viewport.height,
                SectionId::About => heights.about_height,
                SectionId::Skills => heights.skills_height,
                SectionId::Projects => heights.projects_height,
                SectionId::Experience => heights.experience_height,
                SectionId::Contact => heights.contact_height,
                SectionId::Footer => heights.footer_height,
            };
            let rect = Rect::new(0.0, y, width, height);
            y += height;
            (id, rect)
        })
        .collect()
}

/// Position of a stat number in the two-column grid of the about section.
fn stat_rect(section: &Rect, index: usize, width: f64) -> Rect {
    let column = (index % 2) as f64;
    let row = (index / 2) as f64;
    let cell = width / 4.0;
    Rect::new(
        width / 2.0 + column * cell,
        section.y + section.height * STAT_GRID_OFFSET + row * STAT_ROW_PITCH,
        cell,
        STAT_HEIGHT,
    )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavState {
    /// Set once the page scrolls past the navbar threshold.
    pub scrolled: bool,
    pub menu_open: bool,
}

#[derive(Debug)]
struct MountedSection {
    id: SectionId,
    rect: Rect,
    observer: Option<ElementId>,
    sequencer: Option<RevealSequencer>,
}

impl MountedSection {
    fn visibility(&self) -> VisibilityState {
        self.sequencer
            .as_ref()
            .map(RevealSequencer::state)
            .unwrap_or(VisibilityState::Visible)
    }
}

#[derive(Debug)]
struct MountedCounter {
    stat: StatItem,
    rect: Rect,
    observer: ElementId,
    animator: CounterAnimator,
}

/// The mounted page.
#[derive(Debug)]
pub struct Page {
    config: AppConfig,
    clock: FrameClock,
    scheduler: FrameScheduler,
    observers: ObserverRegistry,
    theme: ThemeSwitch,
    sections: Vec<MountedSection>,
    counters: Vec<MountedCounter>,
    scroll_y: f64,
    nav: NavState,
    nav_reveal: RevealSequencer,
    mounted: bool,
}

impl Page {
    pub fn mount(config: AppConfig) -> Result<Self> {
        Self::mount_with_clock(config, FrameClock::new())
    }

    /// Mounts every section, reveals the navbar and the hero and runs the initial
    /// visibility check at scroll position zero.
    pub fn mount_with_clock(config: AppConfig, clock: FrameClock) -> Result<Self> {
        config.validate()?;

        let mut observers = ObserverRegistry::new();
        let mut sections = Vec::with_capacity(SectionId::ALL.len());
        let mut counters = Vec::with_capacity(content::STATS.len());

        for (id, rect) in layout(&config) {
            let observer = id
                .reveal_threshold()
                .map(|threshold| observers.observe(Some(rect), ObserverOptions::one_shot(threshold)))
                .transpose()?;

            if id == SectionId::About {
                for (index, stat) in content::STATS.iter().enumerate() {
                    let rect = stat_rect(&rect, index, config.viewport.width);
                    let observer =
                        observers.observe(Some(rect), ObserverOptions::one_shot(STAT_THRESHOLD))?;
                    counters.push(MountedCounter {
                        stat: *stat,
                        rect,
                        observer,
                        animator: CounterAnimator::with_duration(
                            stat.target,
                            config.animation.counter_duration_ms,
                        ),
                    });
                }
            }

            sections.push(MountedSection {
                id,
                rect,
                observer,
                sequencer: reveal_tree(id, &config.animation)
                    .map(|tree| RevealSequencer::new(&tree)),
            });
        }

        let mut page = Self {
            theme: ThemeSwitch::new(config.theme),
            config,
            clock,
            scheduler: FrameScheduler::new(),
            observers,
            sections,
            counters,
            scroll_y: 0.0,
            nav: NavState::default(),
            nav_reveal: RevealSequencer::new(&navbar_tree()),
            mounted: true,
        };

        let now = page.clock.now();
        page.nav_reveal.reveal(now);
        if let Some(hero) = page.sequencer_mut(SectionId::Home) {
            hero.reveal(now);
        }
        page.evaluate_visibility();

        tracing::info!(
            sections = page.sections.len(),
            counters = page.counters.len(),
            document_height = page.document_height(),
            theme = %page.theme.mode(),
            "page mounted"
        );
        Ok(page)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme.mode()
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn nav(&self) -> NavState {
        self.nav
    }

    pub fn nav_pose(&self) -> Pose {
        self.nav_reveal
            .sample(self.clock.now())
            .first()
            .copied()
            .unwrap_or(Pose::REST)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn pending_frames(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn active_observers(&self) -> usize {
        self.observers.active_count()
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.scroll_y,
            self.config.viewport.width,
            self.config.viewport.height,
        )
    }

    pub fn document_height(&self) -> f64 {
        self.sections
            .last()
            .map(|section| section.rect.bottom())
            .unwrap_or(0.0)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.config.viewport.height).max(0.0)
    }

    pub fn section_rect(&self, id: SectionId) -> Option<Rect> {
        self.section(id).map(|section| section.rect)
    }

    /// Sections without an animation always report visible.
    pub fn section_state(&self, id: SectionId) -> Option<VisibilityState> {
        self.section(id).map(MountedSection::visibility)
    }

    pub fn counter_values(&self) -> Vec<u32> {
        self.counters
            .iter()
            .map(|counter| counter.animator.value())
            .collect()
    }

    /// Vertical hero offset for the parallax effect.
    pub fn hero_parallax(&self) -> f64 {
        self.scroll_y * self.config.animation.parallax_factor
    }

    /// Scrolls to `y` (clamped to the document) and returns the sections
    /// revealed by this move.
    pub fn scroll_to(&mut self, y: f64) -> Vec<SectionId> {
        let y = if y.is_finite() { y } else { 0.0 };
        self.scroll_y = y.clamp(0.0, self.max_scroll());
        self.nav.scrolled = self.scroll_y > self.config.animation.nav_scroll_threshold;
        self.evaluate_visibility()
    }

    pub fn scroll_by(&mut self, delta: f64) -> Vec<SectionId> {
        self.scroll_to(self.scroll_y + delta)
    }

    /// Walks from the top to the bottom of the page in `step` increments.
    pub fn scroll_through(&mut self, step: f64) -> Vec<SectionId> {
        let step = step.max(1.0);
        let max = self.max_scroll();
        let mut revealed = Vec::new();
        let mut y = 0.0;
        loop {
            revealed.extend(self.scroll_to(y));
            if y >= max {
                break;
            }
            y = (y + step).min(max);
        }
        revealed
    }

    /// Jumps to the top of `id` and closes the mobile menu.
    pub fn navigate(&mut self, id: SectionId) -> Vec<SectionId> {
        self.nav.menu_open = false;
        match self.section_rect(id) {
            Some(rect) => self.scroll_to(rect.y),
            None => Vec::new(),
        }
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.nav.menu_open = !self.nav.menu_open;
        self.nav.menu_open
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme.toggle()
    }

    /// Advances the clock by `delta_ms` and runs one frame. Returns the
    /// number of frame callbacks invoked.
    pub fn advance(&mut self, delta_ms: f64) -> usize {
        if !self.mounted {
            return 0;
        }
        let now = self.clock.advance(delta_ms);
        self.scheduler.tick(now)
    }

    /// `true` when no started reveal is still moving and no frame is queued.
    pub fn is_settled(&self) -> bool {
        let now = self.clock.now();
        let reveals_done = self.sections.iter().all(|section| {
            section
                .sequencer
                .as_ref()
                .map(|sequencer| !sequencer.state().is_visible() || sequencer.is_settled(now))
                .unwrap_or(true)
        });
        reveals_done && self.nav_reveal.is_settled(now) && self.scheduler.pending() == 0
    }

    /// Runs frames of `frame_ms` until settled or `max_frames` ran.
    pub fn run_until_settled(&mut self, frame_ms: f64, max_frames: usize) -> usize {
        let frame_ms = frame_ms.max(1.0);
        let mut frames = 0;
        while frames < max_frames && self.mounted && !self.is_settled() {
            self.advance(frame_ms);
            frames += 1;
        }
        frames
    }

    /// Disconnects every observer and cancels every pending frame.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.observers.clear();
        for counter in &mut self.counters {
            counter.animator.teardown();
        }
        self.mounted = false;
        tracing::info!(
            pending_frames = self.scheduler.pending(),
            "page unmounted"
        );
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let now = self.clock.now();
        let sections = self
            .sections
            .iter()
            .map(|section| SectionSnapshot {
                id: section.id,
                rect: section.rect,
                visibility: section.visibility(),
                poses: section
                    .sequencer
                    .as_ref()
                    .map(|sequencer| sequencer.sample(now))
                    .unwrap_or_default(),
            })
            .collect();
        let counters = self
            .counters
            .iter()
            .map(|counter| CounterSnapshot {
                label: counter.stat.label,
                suffix: counter.stat.suffix,
                value: counter.animator.value(),
                target: counter.animator.target(),
                running: counter.animator.is_running(),
                rect: counter.rect,
            })
            .collect();

        PageSnapshot {
            theme: self.theme.mode(),
            time_ms: now,
            scroll_y: self.scroll_y,
            document_height: self.document_height(),
            viewport: self.viewport(),
            nav: self.nav,
            nav_pose: self.nav_pose(),
            hero_parallax: self.hero_parallax(),
            pending_frames: self.scheduler.pending(),
            active_observers: self.observers.active_count(),
            sections,
            counters,
        }
    }

    fn section(&self, id: SectionId) -> Option<&MountedSection> {
        self.sections.iter().find(|section| section.id == id)
    }

    fn sequencer_mut(&mut self, id: SectionId) -> Option<&mut RevealSequencer> {
        self.sections
            .iter_mut()
            .find(|section| section.id == id)
            .and_then(|section| section.sequencer.as_mut())
    }

    fn evaluate_visibility(&mut self) -> Vec<SectionId> {
        if !self.mounted {
            return Vec::new();
        }

        let now = self.clock.now();
        let viewport = self.viewport();
        let changes = self.observers.evaluate(&viewport);
        let mut revealed = Vec::new();

        for change in changes {
            if let Some(section) = self
                .sections
                .iter_mut()
                .find(|section| section.observer == Some(change.element))
            {
                let started = section
                    .sequencer
                    .as_mut()
                    .map(|sequencer| sequencer.apply_signal(change.visible, now))
                    .unwrap_or(false);
                if started {
                    tracing::debug!(section = section.id.anchor(), at_ms = now, "section revealed");
                    revealed.push(section.id);
                }
            } else if let Some(counter) = self
                .counters
                .iter_mut()
                .find(|counter| counter.observer == change.element)
            {
                if counter.animator.trigger(change.visible, &self.scheduler) {
                    tracing::debug!(label = counter.stat.label, at_ms = now, "counter triggered");
                }
            }
        }

        revealed
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionSnapshot {
    pub id: SectionId,
    pub rect: Rect,
    pub visibility: VisibilityState,
    /// Pose of the section and its animated children, in pre-order.
    pub poses: Vec<Pose>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CounterSnapshot {
    pub label: &'static str,
    pub suffix: &'static str,
    pub value: u32,
    pub target: u32,
    pub running: bool,
    pub rect: Rect,
}

impl CounterSnapshot {
    pub fn display(&self) -> String {
        format!("{}{}", self.value, self.suffix)
    }
}

/// Serialisable view of the page at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub theme: ThemeMode,
    pub time_ms: f64,
    pub scroll_y: f64,
    pub document_height: f64,
    pub viewport: Viewport,
    pub nav: NavState,
    pub nav_pose: Pose,
    pub hero_parallax: f64,
    pub pending_frames: usize,
    pub active_observers: usize,
    pub sections: Vec<SectionSnapshot>,
    pub counters: Vec<CounterSnapshot>,
}

impl PageSnapshot {
    pub fn section(&self, id: SectionId) -> Option<&SectionSnapshot> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }
}
