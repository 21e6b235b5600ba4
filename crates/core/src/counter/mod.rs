use std::{cell::RefCell, rc::Rc};

use serde::Serialize;

use crate::{FrameControl, FrameScheduler, FrameSubscription};

/// Wall-clock length of a count-up.
pub const DEFAULT_COUNTER_DURATION_MS: f64 = 2_000.0;

/// Displayed value of a count-up animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CounterState {
    pub current_value: u32,
    pub target_value: u32,
    /// Timestamp of the first animation frame.
    pub start_timestamp: Option<f64>,
}

impl CounterState {
    pub fn new(target_value: u32) -> Self {
        Self {
            current_value: 0,
            target_value,
            start_timestamp: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start_timestamp.is_some() && self.current_value == self.target_value
    }

    /// Applies one frame at `now_ms`.
    pub fn advance(&mut self, now_ms: f64, duration_ms: f64) -> FrameControl {
        let start = *self.start_timestamp.get_or_insert(now_ms);
        let progress = if duration_ms > 0.0 {
            ((now_ms - start) / duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let value = (progress * f64::from(self.target_value)).ceil() as u32;
        self.current_value = self.current_value.max(value.min(self.target_value));

        if progress >= 1.0 {
            self.current_value = self.target_value;
            FrameControl::Done
        } else {
            FrameControl::Continue
        }
    }
}

/// One-shot count-up from zero to a target, paced by a [`FrameScheduler`].
#[derive(Debug)]
pub struct CounterAnimator {
    duration_ms: f64,
    state: Rc<RefCell<CounterState>>,
    subscription: Option<FrameSubscription>,
    triggered: bool,
}

impl CounterAnimator {
    pub fn new(target: u32) -> Self {
        Self::with_duration(target, DEFAULT_COUNTER_DURATION_MS)
    }

    pub fn with_duration(target: u32, duration_ms: f64) -> Self {
        Self {
            duration_ms,
            state: Rc::new(RefCell::new(CounterState::new(target))),
            subscription: None,
            triggered: false,
        }
    }

    pub fn target(&self) -> u32 {
        self.state.borrow().target_value
    }

    pub fn value(&self) -> u32 {
        self.state.borrow().current_value
    }

    pub fn state(&self) -> CounterState {
        *self.state.borrow()
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// `true` while a frame callback is still scheduled.
    pub fn is_running(&self) -> bool {
        self.subscription
            .as_ref()
            .map(FrameSubscription::is_active)
            .unwrap_or(false)
    }

    /// Starts counting when `active` is set. Inactive triggers and any
    /// trigger after the first do nothing.
    pub fn trigger(&mut self, active: bool, scheduler: &FrameScheduler) -> bool {
        if !active || self.triggered {
            return false;
        }
        self.triggered = true;

        let state = Rc::clone(&self.state);
        let duration_ms = self.duration_ms;
        self.subscription = Some(scheduler.subscribe(move |now_ms| {
            let mut state = state.borrow_mut();
            let control = state.advance(now_ms, duration_ms);
            if control == FrameControl::Done {
                tracing::debug!(target_value = state.target_value, "counter finished");
            }
            control
        }));
        tracing::debug!(target_value = self.target(), duration_ms, "counter started");
        true
    }

    /// Cancels any pending frame; the displayed value freezes where it is.
    pub fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(counter: &CounterAnimator, scheduler: &FrameScheduler, times: &[f64]) -> Vec<u32> {
        times
            .iter()
            .map(|&now| {
                scheduler.tick(now);
                counter.value()
            })
            .collect()
    }

    #[test]
    fn counts_to_seven_over_two_seconds() {
        let scheduler = FrameScheduler::new();
        let mut counter = CounterAnimator::new(7);
        assert!(counter.trigger(true, &scheduler));

        let values = drive(&counter, &scheduler, &[0.0, 500.0, 1_000.0, 2_000.0]);
        assert_eq!(values, vec![0, 2, 4, 7]);
        assert!(!counter.is_running());
        assert_eq!(scheduler.pending(), 0);
        assert!(counter.state().is_complete());
    }

    #[test]
    fn inactive_trigger_schedules_nothing() {
        let scheduler = FrameScheduler::new();
        let mut counter = CounterAnimator::new(3);
        assert!(!counter.trigger(false, &scheduler));
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.tick(0.0), 0);
        assert_eq!(counter.value(), 0);
        assert!(!counter.is_triggered());
    }

    #[test]
    fn values_never_decrease_and_end_on_target() {
        for target in [0_u32, 1, 3, 4, 7, 99, 1_000] {
            let scheduler = FrameScheduler::new();
            let mut counter = CounterAnimator::new(target);
            counter.trigger(true, &scheduler);

            let mut previous = 0;
            let mut now = 0.0;
            while counter.is_running() {
                scheduler.tick(now);
                assert!(counter.value() >= previous, "target {target} went backwards");
                assert!(counter.value() <= target);
                previous = counter.value();
                now += 16.7;
            }
            assert_eq!(counter.value(), target);
        }
    }

    #[test]
    fn backwards_clock_does_not_lower_value() {
        let scheduler = FrameScheduler::new();
        let mut counter = CounterAnimator::new(10);
        counter.trigger(true, &scheduler);

        scheduler.tick(1_000.0);
        scheduler.tick(2_000.0);
        assert_eq!(counter.value(), 5);
        scheduler.tick(1_500.0);
        assert_eq!(counter.value(), 5);
    }

    #[test]
    fn second_trigger_is_ignored() {
        let scheduler = FrameScheduler::new();
        let mut counter = CounterAnimator::new(4);
        assert!(counter.trigger(true, &scheduler));
        assert!(!counter.trigger(true, &scheduler));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn teardown_mid_animation_leaves_nothing_scheduled() {
        let scheduler = FrameScheduler::new();
        let mut counter = CounterAnimator::new(100);
        counter.trigger(true, &scheduler);
        drive(&counter, &scheduler, &[0.0, 400.0]);
        let frozen = counter.value();

        counter.teardown();
        assert_eq!(scheduler.pending(), 0);
        scheduler.tick(5_000.0);
        assert_eq!(counter.value(), frozen);
    }

    #[test]
    fn dropping_counter_releases_its_frame() {
        let scheduler = FrameScheduler::new();
        {
            let mut counter = CounterAnimator::new(9);
            counter.trigger(true, &scheduler);
            scheduler.tick(0.0);
            assert_eq!(scheduler.pending(), 1);
        }
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn zero_duration_completes_on_first_frame() {
        let scheduler = FrameScheduler::new();
        let mut counter = CounterAnimator::with_duration(12, 0.0);
        counter.trigger(true, &scheduler);
        scheduler.tick(42.0);
        assert_eq!(counter.value(), 12);
        assert_eq!(scheduler.pending(), 0);
    }
}
