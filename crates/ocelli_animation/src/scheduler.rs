//! Animation scheduler
//!
//! Holds every registered animation and steps them once per frame against a
//! shared state record. An animation deregisters itself by returning
//! [`Step::Finished`]; it is cancelled when [`Animation::is_active`] reports
//! false, in which case its teardown runs inside the same tick.

use crate::error::AnimationError;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct AnimationId;
}

/// Outcome of a single animation step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Running,
    Finished,
}

/// What happened to an animation during a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEvent {
    /// Reached the end of its duration and deregistered itself.
    Completed(AnimationId),
    /// Observed its cancellation flag cleared; teardown has run.
    Cancelled(AnimationId),
    /// The step returned an error. The animation stays registered.
    Faulted(AnimationId),
}

impl TickEvent {
    pub fn id(&self) -> AnimationId {
        match *self {
            TickEvent::Completed(id) | TickEvent::Cancelled(id) | TickEvent::Faulted(id) => id,
        }
    }

    /// Whether the animation is gone after this event.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TickEvent::Faulted(_))
    }
}

/// A per-frame callback over a shared state record `S`.
pub trait Animation<S> {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Level-triggered cancellation check, evaluated before every step.
    fn is_active(&self, _state: &S) -> bool {
        true
    }

    /// Advance by `dt_ms` of elapsed wall time.
    fn step(&mut self, state: &mut S, dt_ms: f32) -> Result<Step, AnimationError>;

    /// Synchronous cleanup after cancellation or forced removal.
    ///
    /// May hand back a follow-up animation that is registered immediately.
    fn teardown(&mut self, _state: &mut S) -> Option<Box<dyn Animation<S>>> {
        None
    }
}

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler<S> {
    animations: SlotMap<AnimationId, Box<dyn Animation<S>>>,
    /// Registration order, so animations step deterministically.
    order: Vec<AnimationId>,
}

impl<S> AnimationScheduler<S> {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Register an animation; it first steps on the next tick.
    pub fn add(&mut self, animation: Box<dyn Animation<S>>) -> AnimationId {
        tracing::trace!(animation = animation.name(), "registered");
        let id = self.animations.insert(animation);
        self.order.push(id);
        id
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        self.animations.contains_key(id)
    }

    /// Name of a registered animation
    pub fn name(&self, id: AnimationId) -> Option<&'static str> {
        self.animations.get(id).map(|a| a.name())
    }

    /// Forcibly deregister an animation, running its teardown.
    ///
    /// Returns false if the id was not registered.
    pub fn remove(&mut self, id: AnimationId, state: &mut S) -> bool {
        let Some(mut animation) = self.animations.remove(id) else {
            return false;
        };
        self.order.retain(|other| *other != id);
        tracing::debug!(animation = animation.name(), "removed");
        if let Some(follow_up) = animation.teardown(state) {
            self.add(follow_up);
        }
        true
    }

    /// Tick all animations
    pub fn tick(&mut self, state: &mut S, dt_ms: f32) -> SmallVec<[TickEvent; 4]> {
        let mut events = SmallVec::new();
        // Follow-ups registered during this tick start on the next one
        let ids: SmallVec<[AnimationId; 8]> = self.order.iter().copied().collect();

        for id in ids {
            let Some(animation) = self.animations.get_mut(id) else {
                continue;
            };

            if !animation.is_active(state) {
                let follow_up = animation.teardown(state);
                self.deregister(id);
                if let Some(follow_up) = follow_up {
                    self.add(follow_up);
                }
                events.push(TickEvent::Cancelled(id));
                continue;
            }

            match animation.step(state, dt_ms) {
                Ok(Step::Running) => {}
                Ok(Step::Finished) => {
                    self.deregister(id);
                    events.push(TickEvent::Completed(id));
                }
                Err(error) => {
                    tracing::warn!(
                        animation = animation.name(),
                        %error,
                        "animation step faulted; skipping this tick"
                    );
                    events.push(TickEvent::Faulted(id));
                }
            }
        }

        events
    }

    fn deregister(&mut self, id: AnimationId) {
        if let Some(animation) = self.animations.remove(id) {
            tracing::trace!(animation = animation.name(), "deregistered");
        }
        self.order.retain(|other| *other != id);
    }

    /// Check if any animations are still registered
    pub fn has_active_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Names of registered animations in step order
    pub fn names(&self) -> Vec<&'static str> {
        self.order
            .iter()
            .filter_map(|id| self.animations.get(*id).map(|a| a.name()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

impl<S> Default for AnimationScheduler<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::tween::Tween;

    #[derive(Default)]
    struct Counter {
        value: f32,
        enabled: bool,
        torn_down: u32,
    }

    struct Ramp {
        tween: Tween,
    }

    impl Animation<Counter> for Ramp {
        fn name(&self) -> &'static str {
            "ramp"
        }

        fn is_active(&self, state: &Counter) -> bool {
            state.enabled
        }

        fn step(&mut self, state: &mut Counter, dt_ms: f32) -> Result<Step, AnimationError> {
            state.value = self.tween.advance(dt_ms)?;
            Ok(if self.tween.is_finished() {
                Step::Finished
            } else {
                Step::Running
            })
        }

        fn teardown(&mut self, state: &mut Counter) -> Option<Box<dyn Animation<Counter>>> {
            state.torn_down += 1;
            None
        }
    }

    /// Loses its target on every step
    struct Broken;

    impl Animation<Counter> for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn is_active(&self, _state: &Counter) -> bool {
            true
        }

        fn step(&mut self, _state: &mut Counter, _dt_ms: f32) -> Result<Step, AnimationError> {
            Err(AnimationError::MissingTarget {
                animation: "broken",
                target: "counter",
            })
        }

        fn teardown(&mut self, _state: &mut Counter) -> Option<Box<dyn Animation<Counter>>> {
            None
        }
    }

    fn ramp(duration_ms: f32) -> Box<dyn Animation<Counter>> {
        Box::new(Ramp {
            tween: Tween::new(0.0, 10.0, duration_ms, Easing::Linear),
        })
    }

    #[test]
    fn test_completes_once_and_deregisters() {
        let mut state = Counter {
            enabled: true,
            ..Default::default()
        };
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.add(ramp(30.0));

        assert!(scheduler.tick(&mut state, 10.0).is_empty());
        assert!(scheduler.tick(&mut state, 10.0).is_empty());
        let events = scheduler.tick(&mut state, 10.0);
        assert_eq!(events.as_slice(), &[TickEvent::Completed(id)]);
        assert_eq!(state.value, 10.0);
        assert!(!scheduler.contains(id));

        // Nothing left to signal
        assert!(scheduler.tick(&mut state, 10.0).is_empty());
    }

    #[test]
    fn test_cleared_flag_cancels_with_teardown_in_same_tick() {
        let mut state = Counter {
            enabled: true,
            ..Default::default()
        };
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.add(ramp(1000.0));
        scheduler.tick(&mut state, 16.0);

        state.enabled = false;
        let events = scheduler.tick(&mut state, 16.0);
        assert_eq!(events.as_slice(), &[TickEvent::Cancelled(id)]);
        assert_eq!(state.torn_down, 1);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_fault_is_isolated() {
        let mut state = Counter {
            enabled: true,
            ..Default::default()
        };
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.add(ramp(100.0));

        let events = scheduler.tick(&mut state, f32::INFINITY);
        assert_eq!(events.as_slice(), &[TickEvent::Faulted(id)]);
        assert!(scheduler.contains(id));

        // Recovers on the next well-formed tick
        scheduler.tick(&mut state, 50.0);
        assert!((state.value - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_fault_does_not_stop_other_animations() {
        let mut state = Counter {
            enabled: true,
            ..Default::default()
        };
        let mut scheduler = AnimationScheduler::new();
        let broken = scheduler.add(Box::new(Broken));
        let id = scheduler.add(ramp(20.0));

        let events = scheduler.tick(&mut state, 10.0);
        assert_eq!(events.as_slice(), &[TickEvent::Faulted(broken)]);
        assert!((state.value - 5.0).abs() < 1e-5);

        let events = scheduler.tick(&mut state, 10.0);
        assert_eq!(
            events.as_slice(),
            &[TickEvent::Faulted(broken), TickEvent::Completed(id)]
        );
        assert_eq!(state.value, 10.0);
        assert!(scheduler.contains(broken));
        assert!(!scheduler.contains(id));
        assert_eq!(state.torn_down, 0);
    }

    #[test]
    fn test_forced_remove_runs_teardown() {
        let mut state = Counter {
            enabled: true,
            ..Default::default()
        };
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.add(ramp(100.0));
        assert!(scheduler.remove(id, &mut state));
        assert_eq!(state.torn_down, 1);
        assert!(!scheduler.remove(id, &mut state));
    }
}
