use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{PortfolioError, Result};

/// Axis-aligned rectangle in document coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Overlapping region, `None` when the rectangles do not share any area.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }
}

/// The visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, width: f64, height: f64) -> Self {
        Self {
            scroll_y,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }
}

/// Fraction of `element` that lies inside `viewport`.
///
/// Degenerate elements count as fully visible while their origin is on
/// screen.
pub fn intersection_ratio(element: &Rect, viewport: &Rect) -> f64 {
    let area = element.area();
    if area <= 0.0 {
        return if viewport.contains_point(element.x, element.y) {
            1.0
        } else {
            0.0
        };
    }

    element
        .intersection(viewport)
        .map(|overlap| (overlap.area() / area).clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityState {
    #[default]
    Hidden,
    Visible,
}

impl VisibilityState {
    pub fn is_visible(self) -> bool {
        self == VisibilityState::Visible
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    /// Share of the element's area that has to be on screen.
    pub threshold: f64,
    /// Disconnect after the first `true` signal.
    pub once: bool,
}

impl ObserverOptions {
    pub fn one_shot(threshold: f64) -> Self {
        Self {
            threshold,
            once: true,
        }
    }

    pub fn continuous(threshold: f64) -> Self {
        Self {
            threshold,
            once: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PortfolioError::InvalidConfig(
                "visibility threshold must lie within [0, 1]",
            ));
        }
        Ok(())
    }

    fn hits(&self, ratio: f64) -> bool {
        if self.threshold > 0.0 {
            ratio >= self.threshold
        } else {
            ratio > 0.0
        }
    }
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self::one_shot(0.0)
    }
}

/// Produces the "is intersecting" signal for one element.
#[derive(Debug, Clone)]
pub struct ViewportObserver {
    options: ObserverOptions,
    element: Option<Rect>,
    state: VisibilityState,
    connected: bool,
}

impl ViewportObserver {
    pub fn new(options: ObserverOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            element: None,
            state: VisibilityState::Hidden,
            connected: true,
        })
    }

    pub fn with_element(options: ObserverOptions, element: Rect) -> Result<Self> {
        let mut observer = Self::new(options)?;
        observer.attach(element);
        Ok(observer)
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    pub fn attach(&mut self, element: Rect) {
        self.element = Some(element);
    }

    pub fn detach(&mut self) {
        self.element = None;
    }

    pub fn element(&self) -> Option<Rect> {
        self.element
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn is_intersecting(&self) -> bool {
        self.state.is_visible()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    /// Re-checks the element against `viewport` and returns the new signal
    /// if it changed.
    pub fn evaluate(&mut self, viewport: &Viewport) -> Option<bool> {
        if !self.connected {
            return None;
        }
        let element = self.element?;

        let hit = self
            .options
            .hits(intersection_ratio(&element, &viewport.rect()));
        if hit == self.state.is_visible() {
            return None;
        }

        self.state = if hit {
            VisibilityState::Visible
        } else {
            VisibilityState::Hidden
        };
        if hit && self.options.once {
            self.connected = false;
        }
        Some(hit)
    }
}

/// Key for an element registered with an [`ObserverRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(u32);

/// Signal change reported by [`ObserverRegistry::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    pub element: ElementId,
    pub visible: bool,
}

/// Set of observers evaluated together on every scroll event.
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    next_id: u32,
    observers: BTreeMap<ElementId, ViewportObserver>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts observing `element`. A missing element is accepted and simply
    /// never reports a signal.
    pub fn observe(&mut self, element: Option<Rect>, options: ObserverOptions) -> Result<ElementId> {
        let mut observer = ViewportObserver::new(options)?;
        if let Some(rect) = element {
            observer.attach(rect);
        }
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.observers.insert(id, observer);
        Ok(id)
    }

    pub fn unobserve(&mut self, id: ElementId) -> bool {
        self.observers.remove(&id).is_some()
    }

    pub fn get(&self, id: ElementId) -> Option<&ViewportObserver> {
        self.observers.get(&id)
    }

    pub fn state(&self, id: ElementId) -> Option<VisibilityState> {
        self.observers.get(&id).map(ViewportObserver::state)
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Observers still listening for changes.
    pub fn active_count(&self) -> usize {
        self.observers
            .values()
            .filter(|observer| observer.is_connected())
            .count()
    }

    pub fn evaluate(&mut self, viewport: &Viewport) -> Vec<VisibilityChange> {
        self.observers
            .iter_mut()
            .filter_map(|(id, observer)| {
                observer.evaluate(viewport).map(|visible| VisibilityChange {
                    element: *id,
                    visible,
                })
            })
            .collect()
    }

    /// Disconnects and drops every observer.
    pub fn clear(&mut self) {
        let count = self.observers.len();
        self.observers.clear();
        tracing::debug!(count, "observers disconnected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(scroll_y: f64) -> Viewport {
        Viewport::new(scroll_y, 1000.0, 800.0)
    }

    #[test]
    fn ratio_counts_visible_share() {
        let element = Rect::new(0.0, 700.0, 100.0, 200.0);
        let ratio = intersection_ratio(&element, &viewport(0.0).rect());
        assert!((ratio - 0.5).abs() < 1e-9);
        assert_eq!(intersection_ratio(&element, &viewport(2000.0).rect()), 0.0);
        assert_eq!(intersection_ratio(&element, &viewport(700.0).rect()), 1.0);
    }

    #[test]
    fn degenerate_element_uses_its_origin() {
        let point = Rect::new(10.0, 100.0, 0.0, 0.0);
        assert_eq!(intersection_ratio(&point, &viewport(0.0).rect()), 1.0);
        assert_eq!(intersection_ratio(&point, &viewport(500.0).rect()), 0.0);
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        assert!(ViewportObserver::new(ObserverOptions::one_shot(1.5)).is_err());
        assert!(ViewportObserver::new(ObserverOptions::one_shot(-0.1)).is_err());
        assert!(ViewportObserver::new(ObserverOptions::one_shot(f64::NAN)).is_err());
    }

    #[test]
    fn one_shot_fires_once_and_never_reverts() {
        let element = Rect::new(0.0, 1000.0, 100.0, 400.0);
        let mut observer =
            ViewportObserver::with_element(ObserverOptions::one_shot(0.1), element).unwrap();

        assert_eq!(observer.evaluate(&viewport(0.0)), None);
        assert_eq!(observer.evaluate(&viewport(500.0)), Some(true));
        assert!(!observer.is_connected());
        assert_eq!(observer.evaluate(&viewport(0.0)), None);
        assert_eq!(observer.evaluate(&viewport(600.0)), None);
        assert_eq!(observer.state(), VisibilityState::Visible);
    }

    #[test]
    fn continuous_mode_reports_leaving() {
        let element = Rect::new(0.0, 1000.0, 100.0, 400.0);
        let mut observer =
            ViewportObserver::with_element(ObserverOptions::continuous(0.5), element).unwrap();

        assert_eq!(observer.evaluate(&viewport(500.0)), Some(true));
        assert_eq!(observer.evaluate(&viewport(0.0)), Some(false));
        assert_eq!(observer.state(), VisibilityState::Hidden);
    }

    #[test]
    fn zero_threshold_needs_actual_overlap() {
        let element = Rect::new(0.0, 800.0, 100.0, 100.0);
        let mut observer =
            ViewportObserver::with_element(ObserverOptions::one_shot(0.0), element).unwrap();
        assert_eq!(observer.evaluate(&viewport(0.0)), None);
        assert_eq!(observer.evaluate(&viewport(1.0)), Some(true));
    }

    #[test]
    fn missing_element_stays_hidden() {
        let mut observer = ViewportObserver::new(ObserverOptions::one_shot(0.1)).unwrap();
        for scroll in [0.0, 400.0, 4000.0] {
            assert_eq!(observer.evaluate(&viewport(scroll)), None);
        }
        assert!(!observer.is_intersecting());
    }

    #[test]
    fn never_intersecting_element_stays_hidden() {
        let mut registry = ObserverRegistry::new();
        let id = registry
            .observe(
                Some(Rect::new(0.0, 10_000.0, 100.0, 100.0)),
                ObserverOptions::one_shot(0.1),
            )
            .unwrap();

        for step in 0..50 {
            assert!(registry.evaluate(&viewport(step as f64 * 100.0)).is_empty());
        }
        assert_eq!(registry.state(id), Some(VisibilityState::Hidden));
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn registry_reports_transitions_and_clears() {
        let mut registry = ObserverRegistry::new();
        let near = registry
            .observe(Some(Rect::new(0.0, 100.0, 100.0, 100.0)), ObserverOptions::one_shot(0.1))
            .unwrap();
        let far = registry
            .observe(Some(Rect::new(0.0, 3000.0, 100.0, 100.0)), ObserverOptions::one_shot(0.1))
            .unwrap();

        let changes = registry.evaluate(&viewport(0.0));
        assert_eq!(
            changes,
            vec![VisibilityChange {
                element: near,
                visible: true
            }]
        );
        assert_eq!(registry.active_count(), 1);
        assert_eq!(registry.state(far), Some(VisibilityState::Hidden));

        assert!(registry.unobserve(far));
        assert!(!registry.unobserve(far));
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.active_count(), 0);
    }
}
