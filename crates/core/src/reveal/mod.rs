use serde::{Deserialize, Serialize};

use crate::{AnimationTimeline, Transition, VisibilityState};

/// Animatable properties of one element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Pose {
    /// Fully visible at its layout position.
    pub const REST: Pose = Pose {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    pub fn transparent() -> Self {
        Self {
            opacity: 0.0,
            ..Self::REST
        }
    }

    pub fn offset(x: f32, y: f32) -> Self {
        Self {
            opacity: 0.0,
            x,
            y,
            scale: 1.0,
        }
    }

    pub fn scaled(scale: f32) -> Self {
        Self {
            opacity: 0.0,
            scale,
            ..Self::REST
        }
    }

    pub fn lerp(&self, to: &Pose, t: f32) -> Pose {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Pose {
            opacity: mix(self.opacity, to.opacity),
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            scale: mix(self.scale, to.scale),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::REST
    }
}

/// Hidden and visible poses plus the transition between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Variants {
    pub hidden: Pose,
    pub visible: Pose,
    pub transition: Transition,
    /// Start offset from the parent's start. Replaces the stagger slot the
    /// parent would otherwise assign.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<f64>,
}

impl Variants {
    pub fn new(hidden: Pose, transition: Transition) -> Self {
        Self {
            hidden,
            visible: Pose::REST,
            transition,
            delay_ms: None,
        }
    }

    /// Translate up from `offset_px` below while fading in.
    pub fn fade_up(offset_px: f32, duration_ms: f64) -> Self {
        Self::new(Pose::offset(0.0, offset_px), Transition::ease_out(duration_ms))
    }

    pub fn slide_in_x(offset_px: f32, duration_ms: f64) -> Self {
        Self::new(Pose::offset(offset_px, 0.0), Transition::ease_out(duration_ms))
    }

    pub fn scale_in(scale: f32, duration_ms: f64) -> Self {
        Self::new(Pose::scaled(scale), Transition::ease_out(duration_ms))
    }

    pub fn fade_in(duration_ms: f64) -> Self {
        Self::new(Pose::transparent(), Transition::ease_out(duration_ms))
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    pub fn pose_at(&self, progress: f32) -> Pose {
        self.hidden.lerp(&self.visible, progress)
    }
}

/// Declarative description of an element and the children it orchestrates.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealNode {
    pub variants: Variants,
    /// Extra delay between consecutive children.
    pub stagger_ms: f64,
    /// Delay before the first child starts.
    pub delay_children_ms: f64,
    pub children: Vec<RevealNode>,
}

impl RevealNode {
    pub fn new(variants: Variants) -> Self {
        Self {
            variants,
            stagger_ms: 0.0,
            delay_children_ms: 0.0,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<RevealNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_stagger(mut self, stagger_ms: f64) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn with_delay_children(mut self, delay_ms: f64) -> Self {
        self.delay_children_ms = delay_ms;
        self
    }

    /// Number of nodes in the subtree, including `self`.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(RevealNode::len).sum::<usize>()
    }

    fn flatten(&self, start_ms: f64, variants: &mut Vec<Variants>, entries: &mut Vec<Transition>) {
        variants.push(self.variants);
        entries.push(self.variants.transition.delayed_by(start_ms));

        for (index, child) in self.children.iter().enumerate() {
            let offset = match child.variants.delay_ms {
                Some(delay_ms) => start_ms + delay_ms,
                None => start_ms + self.delay_children_ms + index as f64 * self.stagger_ms,
            };
            child.flatten(offset, variants, entries);
        }
    }
}

/// Maps the visibility signal to a one-way hidden -> visible animation.
#[derive(Debug, Clone)]
pub struct RevealSequencer {
    variants: Vec<Variants>,
    timeline: AnimationTimeline,
    state: VisibilityState,
    revealed_at: Option<f64>,
}

impl RevealSequencer {
    pub fn new(root: &RevealNode) -> Self {
        let mut variants = Vec::with_capacity(root.len());
        let mut entries = Vec::with_capacity(root.len());
        root.flatten(root.variants.delay_ms.unwrap_or(0.0), &mut variants, &mut entries);

        Self {
            variants,
            timeline: AnimationTimeline::new(entries),
            state: VisibilityState::Hidden,
            revealed_at: None,
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn timeline(&self) -> &AnimationTimeline {
        &self.timeline
    }

    pub fn revealed_at(&self) -> Option<f64> {
        self.revealed_at
    }

    pub fn node_count(&self) -> usize {
        self.variants.len()
    }

    /// Feeds one observer signal. Returns `true` only for the transition to
    /// visible; everything after that is a no-op.
    pub fn apply_signal(&mut self, in_view: bool, now_ms: f64) -> bool {
        if self.state.is_visible() || !in_view {
            return false;
        }

        self.state = VisibilityState::Visible;
        self.revealed_at = Some(now_ms);
        tracing::debug!(
            at_ms = now_ms,
            nodes = self.variants.len(),
            duration_ms = self.timeline.total_duration_ms(),
            "reveal started"
        );
        true
    }

    pub fn reveal(&mut self, now_ms: f64) -> bool {
        self.apply_signal(true, now_ms)
    }

    /// Pose of every node at `now_ms`, in pre-order.
    pub fn sample(&self, now_ms: f64) -> Vec<Pose> {
        match self.revealed_at {
            None => self.variants.iter().map(|v| v.hidden).collect(),
            Some(start) => {
                let elapsed = now_ms - start;
                self.variants
                    .iter()
                    .zip(self.timeline.entries())
                    .map(|(variants, entry)| variants.pose_at(entry.progress(elapsed)))
                    .collect()
            }
        }
    }

    /// `true` once every entry of a started reveal has finished.
    pub fn is_settled(&self, now_ms: f64) -> bool {
        self.revealed_at
            .map(|start| self.timeline.is_complete(now_ms - start))
            .unwrap_or(false)
    }
}
