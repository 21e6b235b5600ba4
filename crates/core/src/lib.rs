//! Core library for the portfolio page engine.
//!
//! The page is modelled headlessly: sections are laid out as rectangles, a
//! viewport observer decides when each one scrolls into view, reveal
//! sequencers turn that signal into staggered pose animations and counters
//! count up on a frame scheduler that tests drive with a fake clock. The
//! style layer and HTML renderer turn a snapshot of that state into markup.

pub mod config;
pub mod content;
pub mod counter;
pub mod error;
pub mod observer;
pub mod page;
pub mod render;
pub mod reveal;
pub mod style;
pub mod theme;
pub mod timeline;

pub use config::{AnimationConfig, AppConfig, LayoutConfig, ViewportConfig};
pub use counter::{CounterAnimator, CounterState, DEFAULT_COUNTER_DURATION_MS};
pub use error::{PortfolioError, Result};
pub use observer::{
    intersection_ratio, ElementId, ObserverOptions, ObserverRegistry, Rect, Viewport,
    ViewportObserver, VisibilityChange, VisibilityState,
};
pub use page::{Page, PageSnapshot, SectionId};
pub use render::PageRenderer;
pub use reveal::{Pose, RevealNode, RevealSequencer, Variants};
pub use style::{SectionTone, StyleRecord};
pub use theme::{Palette, ThemeMode, ThemeSwitch};
pub use timeline::{
    AnimationTimeline, Easing, FrameClock, FrameControl, FrameHandle, FrameScheduler,
    FrameSubscription, Transition,
};
