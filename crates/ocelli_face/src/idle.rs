//! Idle blink and look-around scheduling
//!
//! Both behaviours run outside the command queue. Each owns a one-shot timer
//! on the virtual clock; when it fires the behaviour plays unless its lock is
//! held, and either way the timer is rearmed with a fresh random delay.

use crate::animations::{Blink, FaceAnimation, LookAround, LOOK_DIRECTIONS};
use crate::config::TimingConfig;
use crate::expression::IdleKind;
use crate::state::FaceState;
use crate::timers::FaceTimer;
use ocelli_animation::{AnimationId, AnimationScheduler, TickEvent, VirtualClock};
use rand::rngs::StdRng;
use rand::Rng;

pub struct IdleScheduler {
    rng: StdRng,
    timing: TimingConfig,
    current: Option<(IdleKind, AnimationId)>,
}

impl IdleScheduler {
    /// Arm both idle timers.
    pub fn new(rng: StdRng, timing: TimingConfig, clock: &mut VirtualClock<FaceTimer>) -> Self {
        let mut idle = Self {
            rng,
            timing,
            current: None,
        };
        idle.rearm(IdleKind::Blink, clock);
        idle.rearm(IdleKind::LookAround, clock);
        idle
    }

    fn rearm(&mut self, kind: IdleKind, clock: &mut VirtualClock<FaceTimer>) {
        let delay = self
            .rng
            .gen_range(self.timing.idle_delay_min_ms..self.timing.idle_delay_max_ms);
        let timer = match kind {
            IdleKind::Blink => FaceTimer::Blink,
            IdleKind::LookAround => FaceTimer::LookAround,
        };
        clock.schedule_after(delay, timer);
    }

    /// The idle animation in flight, if any
    pub fn current(&self) -> Option<IdleKind> {
        self.current.map(|(kind, _)| kind)
    }

    /// Handle an idle timer firing.
    pub fn fire(
        &mut self,
        kind: IdleKind,
        state: &mut FaceState,
        scheduler: &mut AnimationScheduler<FaceState>,
        clock: &mut VirtualClock<FaceTimer>,
    ) {
        let locked = match kind {
            IdleKind::Blink => state.flags.blink_lock,
            IdleKind::LookAround => state.flags.look_around_lock,
        };
        let busy = self.current.is_some_and(|(_, id)| scheduler.contains(id));

        if locked || busy {
            tracing::trace!(?kind, locked, busy, "idle skipped");
        } else {
            let animation: FaceAnimation = match kind {
                IdleKind::Blink => Box::new(Blink::new(state, self.timing.blink_ms)),
                IdleKind::LookAround => {
                    let direction = LOOK_DIRECTIONS[self.rng.gen_range(0..LOOK_DIRECTIONS.len())];
                    Box::new(LookAround::new(state, direction, self.timing.look_ms))
                }
            };
            let id = scheduler.add(animation);
            self.current = Some((kind, id));
            tracing::trace!(?kind, "idle started");
        }
        self.rearm(kind, clock);
    }

    /// Forcibly remove the idle animation in flight, running its teardown.
    pub fn stop(&mut self, state: &mut FaceState, scheduler: &mut AnimationScheduler<FaceState>) {
        if let Some((kind, id)) = self.current.take() {
            if scheduler.remove(id, state) {
                tracing::debug!(?kind, "idle animation interrupted");
            }
        }
    }

    pub fn on_event(&mut self, event: &TickEvent) {
        if event.is_terminal() && self.current.is_some_and(|(_, id)| id == event.id()) {
            self.current = None;
        }
    }
}
