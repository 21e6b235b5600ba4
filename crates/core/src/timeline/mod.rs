mod easing;

use std::{
    cell::RefCell,
    collections::HashSet,
    fmt,
    rc::{Rc, Weak},
};

use serde::{Deserialize, Serialize};

pub use easing::Easing;

/// Millisecond clock that only moves forward.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameClock {
    now_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            now_ms: now_ms.max(0.0),
        }
    }

    pub fn now(&self) -> f64 {
        self.now_ms
    }

    pub fn reset(&mut self) {
        self.now_ms = 0.0;
    }

    /// Moves the clock forward; negative deltas are ignored.
    pub fn advance(&mut self, delta_ms: f64) -> f64 {
        self.now_ms += delta_ms.max(0.0);
        self.now_ms
    }

    /// Jumps to `now_ms` unless that would move the clock backwards.
    pub fn set(&mut self, now_ms: f64) -> f64 {
        self.now_ms = self.now_ms.max(now_ms);
        self.now_ms
    }
}

/// Returned by a frame callback to decide whether it runs again next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Done,
}

/// Identifies one scheduled callback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

pub type FrameCallback = Box<dyn FnMut(f64) -> FrameControl>;

#[derive(Default)]
struct SchedulerState {
    next_id: u64,
    queue: Vec<(FrameHandle, FrameCallback)>,
    live: HashSet<FrameHandle>,
    frames: u64,
}

/// Cooperative per-frame scheduler, the stand-in for the host's animation
/// frame primitive.
///
/// Clones share the same queue. Callbacks run without the queue borrowed, so
/// they may request or cancel frames themselves; anything requested during a
/// tick runs on the following tick.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    state: Rc<RefCell<SchedulerState>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `callback` for the next tick.
    pub fn request<F>(&self, callback: F) -> FrameHandle
    where
        F: FnMut(f64) -> FrameControl + 'static,
    {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let handle = FrameHandle(state.next_id);
        state.queue.push((handle, Box::new(callback)));
        state.live.insert(handle);
        handle
    }

    /// Like [`FrameScheduler::request`] but the returned guard cancels the
    /// chain when dropped.
    pub fn subscribe<F>(&self, callback: F) -> FrameSubscription
    where
        F: FnMut(f64) -> FrameControl + 'static,
    {
        let handle = self.request(callback);
        FrameSubscription {
            handle,
            scheduler: Rc::downgrade(&self.state),
        }
    }

    /// Removes a callback chain. Returns `false` if it already finished or
    /// was never scheduled here.
    pub fn cancel(&self, handle: FrameHandle) -> bool {
        cancel_in(&self.state, handle)
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.state.borrow().live.contains(&handle)
    }

    /// Number of callback chains that will still run.
    pub fn pending(&self) -> usize {
        self.state.borrow().live.len()
    }

    /// Number of ticks executed so far.
    pub fn frames(&self) -> u64 {
        self.state.borrow().frames
    }

    /// Runs one frame at timestamp `now_ms` and returns how many callbacks
    /// were invoked.
    pub fn tick(&self, now_ms: f64) -> usize {
        let batch = {
            let mut state = self.state.borrow_mut();
            state.frames += 1;
            std::mem::take(&mut state.queue)
        };

        let mut invoked = 0;
        for (handle, mut callback) in batch {
            if !self.is_pending(handle) {
                continue;
            }
            invoked += 1;
            let control = callback(now_ms);

            let keep = {
                let mut state = self.state.borrow_mut();
                let keep = control == FrameControl::Continue && state.live.contains(&handle);
                if !keep {
                    state.live.remove(&handle);
                }
                keep
            };

            if keep {
                self.state.borrow_mut().queue.push((handle, callback));
            }
        }

        invoked
    }
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("FrameScheduler")
            .field("pending", &state.live.len())
            .field("frames", &state.frames)
            .finish()
    }
}

fn cancel_in(state: &RefCell<SchedulerState>, handle: FrameHandle) -> bool {
    // Dropped callbacks may own subscriptions, so release them outside the borrow.
    let (was_live, removed) = {
        let mut state = state.borrow_mut();
        let was_live = state.live.remove(&handle);
        let queue = std::mem::take(&mut state.queue);
        let (removed, kept): (Vec<_>, Vec<_>) =
            queue.into_iter().partition(|(queued, _)| *queued == handle);
        state.queue = kept;
        (was_live, removed)
    };
    drop(removed);
    was_live
}

/// Scoped registration with a [`FrameScheduler`]; cancels on drop.
pub struct FrameSubscription {
    handle: FrameHandle,
    scheduler: Weak<RefCell<SchedulerState>>,
}

impl FrameSubscription {
    pub fn handle(&self) -> FrameHandle {
        self.handle
    }

    /// `true` while the callback chain is still scheduled.
    pub fn is_active(&self) -> bool {
        self.scheduler
            .upgrade()
            .map(|state| state.borrow().live.contains(&self.handle))
            .unwrap_or(false)
    }

    /// Cancels the callback now instead of at the end of scope.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for FrameSubscription {
    fn drop(&mut self) {
        if let Some(state) = self.scheduler.upgrade() {
            cancel_in(&state, self.handle);
        }
    }
}

impl fmt::Debug for FrameSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameSubscription")
            .field("handle", &self.handle)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Timing of one animated element: start offset, length and curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Transition {
    pub fn new(duration_ms: f64, easing: Easing) -> Self {
        Self {
            delay_ms: 0.0,
            duration_ms,
            easing,
        }
    }

    pub fn ease_out(duration_ms: f64) -> Self {
        Self::new(duration_ms, Easing::EaseOut)
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn delayed_by(mut self, extra_ms: f64) -> Self {
        self.delay_ms += extra_ms;
        self
    }

    pub fn end_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms
    }

    /// Eased progress in `[0, 1]` after `elapsed_ms` of the parent timeline.
    pub fn progress(&self, elapsed_ms: f64) -> f32 {
        let local = elapsed_ms - self.delay_ms;
        if local < 0.0 {
            return 0.0;
        }
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        self.easing
            .apply((local / self.duration_ms).clamp(0.0, 1.0) as f32)
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::ease_out(300.0)
    }
}

/// Ordered, immutable list of transitions making up a staggered entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationTimeline {
    entries: Vec<Transition>,
}

impl AnimationTimeline {
    pub fn new(entries: Vec<Transition>) -> Self {
        Self { entries }
    }

    /// `count` copies of `base`, each delayed `step_ms` more than the previous.
    pub fn staggered(count: usize, base: Transition, step_ms: f64) -> Self {
        let entries = (0..count)
            .map(|index| base.delayed_by(index as f64 * step_ms))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[Transition] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time at which the last entry finishes.
    pub fn total_duration_ms(&self) -> f64 {
        self.entries
            .iter()
            .map(Transition::end_ms)
            .fold(0.0, f64::max)
    }

    pub fn progress_at(&self, index: usize, elapsed_ms: f64) -> Option<f32> {
        self.entries
            .get(index)
            .map(|entry| entry.progress(elapsed_ms))
    }

    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.total_duration_ms()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn clock_never_runs_backwards() {
        let mut clock = FrameClock::starting_at(100.0);
        assert_eq!(clock.advance(-50.0), 100.0);
        assert_eq!(clock.set(20.0), 100.0);
        assert_eq!(clock.advance(16.0), 116.0);
        clock.reset();
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn continuing_callbacks_run_every_tick() {
        let scheduler = FrameScheduler::new();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        scheduler.request(move |_| {
            seen.set(seen.get() + 1);
            if seen.get() < 3 {
                FrameControl::Continue
            } else {
                FrameControl::Done
            }
        });

        for frame in 0..5 {
            scheduler.tick(frame as f64 * 16.0);
        }

        assert_eq!(calls.get(), 3);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.frames(), 5);
    }

    #[test]
    fn requests_made_during_a_tick_wait_for_the_next() {
        let scheduler = FrameScheduler::new();
        let inner_ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&inner_ran);
        let nested = scheduler.clone();
        scheduler.request(move |_| {
            let flag = Rc::clone(&flag);
            nested.request(move |_| {
                flag.set(true);
                FrameControl::Done
            });
            FrameControl::Done
        });

        assert_eq!(scheduler.tick(0.0), 1);
        assert!(!inner_ran.get());
        assert_eq!(scheduler.tick(16.0), 1);
        assert!(inner_ran.get());
    }

    #[test]
    fn cancel_removes_pending_callback() {
        let scheduler = FrameScheduler::new();
        let handle = scheduler.request(|_| FrameControl::Continue);
        assert!(scheduler.is_pending(handle));
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert_eq!(scheduler.tick(0.0), 0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn callback_can_cancel_a_later_one_mid_tick() {
        let scheduler = FrameScheduler::new();
        let victim_ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&victim_ran);
        let victim = Rc::new(Cell::new(None));
        let target = Rc::clone(&victim);
        let killer = scheduler.clone();

        scheduler.request(move |_| {
            if let Some(handle) = target.get() {
                killer.cancel(handle);
            }
            FrameControl::Done
        });
        let handle = scheduler.request(move |_| {
            flag.set(true);
            FrameControl::Continue
        });
        victim.set(Some(handle));

        scheduler.tick(0.0);
        assert!(!victim_ran.get());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn dropping_subscription_cancels() {
        let scheduler = FrameScheduler::new();
        let subscription = scheduler.subscribe(|_| FrameControl::Continue);
        assert!(subscription.is_active());
        scheduler.tick(0.0);
        assert_eq!(scheduler.pending(), 1);

        drop(subscription);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.tick(16.0), 0);
    }

    #[test]
    fn subscription_outliving_scheduler_is_inert() {
        let scheduler = FrameScheduler::new();
        let subscription = scheduler.subscribe(|_| FrameControl::Continue);
        drop(scheduler);
        assert!(!subscription.is_active());
        subscription.cancel();
    }

    #[test]
    fn explicit_cancel_removes_callback() {
        let scheduler = FrameScheduler::new();
        let subscription = scheduler.subscribe(|_| FrameControl::Continue);
        let other = scheduler.subscribe(|_| FrameControl::Continue);
        assert_eq!(scheduler.pending(), 2);

        subscription.cancel();
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.tick(0.0), 1);
        assert!(other.is_active());
    }

    #[test]
    fn transition_progress_respects_delay() {
        let transition = Transition::new(100.0, Easing::Linear).with_delay(50.0);
        assert_eq!(transition.progress(0.0), 0.0);
        assert_eq!(transition.progress(50.0), 0.0);
        assert!((transition.progress(100.0) - 0.5).abs() < 1e-6);
        assert_eq!(transition.progress(500.0), 1.0);
        assert_eq!(transition.end_ms(), 150.0);
    }

    #[test]
    fn zero_duration_snaps_once_started() {
        let transition = Transition::new(0.0, Easing::EaseOut).with_delay(10.0);
        assert_eq!(transition.progress(5.0), 0.0);
        assert_eq!(transition.progress(10.0), 1.0);
    }

    #[test]
    fn staggered_timeline_offsets_each_entry() {
        let timeline = AnimationTimeline::staggered(3, Transition::ease_out(600.0), 100.0);
        let delays: Vec<f64> = timeline.entries().iter().map(|e| e.delay_ms).collect();
        assert_eq!(delays, vec![0.0, 100.0, 200.0]);
        assert_eq!(timeline.total_duration_ms(), 800.0);
        assert!(!timeline.is_complete(799.0));
        assert!(timeline.is_complete(800.0));
        assert_eq!(timeline.progress_at(2, 100.0), Some(0.0));
        assert_eq!(timeline.progress_at(3, 100.0), None);
    }
}
