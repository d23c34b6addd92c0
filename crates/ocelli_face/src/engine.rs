//! The face engine
//!
//! Owns the shared state, the animation scheduler and the virtual clock, and
//! wires them together once per frame:
//!
//! 1. step every registered animation by the frame delta
//! 2. resume the running job on completions from that step
//! 3. advance the clock and handle due timers (dispatch, idle, job pauses)
//! 4. redraw background and eyes

use crate::background::AmbientField;
use crate::command::AnimationCommand;
use crate::config::FaceConfig;
use crate::dispatcher::{Dispatch, Dispatcher, Transition};
use crate::dots::DotField;
use crate::error::{FaceError, Result};
use crate::expression::{Expression, ExpressionFlags, IdleKind};
use crate::idle::IdleScheduler;
use crate::plan::plan;
use crate::renderer::EyeRenderer;
use crate::state::FaceState;
use crate::timers::FaceTimer;
use ocelli_animation::error::check_delta;
use ocelli_animation::{AnimationScheduler, VirtualClock};
use ocelli_paint::{Color, Size, Surface};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct FaceEngine {
    config: FaceConfig,
    size: Size,
    background: Color,
    state: FaceState,
    scheduler: AnimationScheduler<FaceState>,
    clock: VirtualClock<FaceTimer>,
    dispatcher: Dispatcher,
    idle: IdleScheduler,
    renderer: EyeRenderer,
    ambient: AmbientField,
    expression: Expression,
}

impl FaceEngine {
    /// Build a face bound to a surface of `size`.
    ///
    /// Idle blinking and looking around start immediately; the first command
    /// dispatch happens one dispatch interval in.
    pub fn new(config: FaceConfig, size: Size, background: Color, dot: Color) -> Result<Self> {
        if size.is_empty() {
            return Err(FaceError::EmptySurface {
                width: size.width,
                height: size.height,
            });
        }
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut clock = VirtualClock::new();
        clock.schedule_every(config.dispatch_interval_ms, FaceTimer::Dispatch);

        let ambient = AmbientField::new(size, config.background.clone(), dot, &mut rng);
        let idle = IdleScheduler::new(rng, config.timing.clone(), &mut clock);
        let renderer = EyeRenderer::new(DotField::new(config.dots.clone()), config.eye_bloom, dot);

        tracing::info!(
            width = size.width,
            height = size.height,
            seed = config.seed,
            "face engine ready"
        );

        Ok(Self {
            dispatcher: Dispatcher::new(config.history_limit),
            state: FaceState::new(size),
            scheduler: AnimationScheduler::new(),
            expression: Expression::Idle,
            config,
            size,
            background,
            clock,
            idle,
            renderer,
            ambient,
        })
    }

    /// Advance by `dt_ms` and redraw into `surface`.
    ///
    /// A negative or non-finite delta is logged and the frame is redrawn
    /// without advancing.
    pub fn frame(&mut self, dt_ms: f32, surface: &mut impl Surface) {
        self.step(dt_ms);
        self.render(surface);
    }

    /// Advance by `dt_ms` without drawing.
    pub fn step(&mut self, dt_ms: f32) {
        let dt_ms = match check_delta(dt_ms) {
            Ok(dt_ms) => dt_ms,
            Err(error) => {
                tracing::warn!(%error, "frame delta rejected");
                return;
            }
        };

        let events = self.scheduler.tick(&mut self.state, dt_ms);
        for event in &events {
            self.idle.on_event(event);
            self.dispatcher.on_event(event);
        }
        // a job that just finished frees the dispatcher before this frame's timers
        self.pump();

        match self.clock.advance(dt_ms) {
            Ok(fired) => {
                for timer in fired {
                    self.on_timer(timer);
                }
            }
            Err(error) => tracing::warn!(%error, "virtual clock did not advance"),
        }

        self.pump();
        self.ambient.advance(dt_ms);

        let expression = self.expression();
        if expression != self.expression {
            tracing::info!(from = %self.expression, to = %expression, "expression changed");
            self.expression = expression;
        }
    }

    /// Draw the current state without advancing.
    pub fn render(&self, surface: &mut impl Surface) {
        surface.clear(self.background);
        self.ambient.render(surface);
        self.renderer.render(&self.state, surface);
    }

    fn on_timer(&mut self, timer: FaceTimer) {
        match timer {
            FaceTimer::Dispatch => self.dispatch(),
            FaceTimer::Blink => self.fire_idle(IdleKind::Blink),
            FaceTimer::LookAround => self.fire_idle(IdleKind::LookAround),
            FaceTimer::JobWait => {
                self.dispatcher.on_wait_elapsed();
                self.pump();
            }
        }
    }

    fn fire_idle(&mut self, kind: IdleKind) {
        self.idle
            .fire(kind, &mut self.state, &mut self.scheduler, &mut self.clock);
    }

    fn dispatch(&mut self) {
        let Dispatch::Started(command) = self.dispatcher.next_command(&self.state) else {
            return;
        };
        let from = self.expression();
        self.idle.stop(&mut self.state, &mut self.scheduler);
        let job = plan(command, &self.state, &self.config.timing);
        self.dispatcher.begin(job, &mut self.state, from);
        self.pump();
    }

    fn pump(&mut self) {
        if !self
            .dispatcher
            .pump(&mut self.state, &mut self.scheduler, &mut self.clock)
        {
            return;
        }
        let to = Expression::resolve(&self.state.flags, None, self.idle.current());
        self.dispatcher.finish(&mut self.state, to);
    }

    pub fn enqueue(&mut self, command: AnimationCommand) {
        self.dispatcher.enqueue(command);
    }

    pub fn nod(&mut self) {
        self.enqueue(AnimationCommand::Nod);
    }

    pub fn sleep(&mut self) {
        self.enqueue(AnimationCommand::Sleep);
    }

    pub fn cancel_sleep(&mut self) {
        self.enqueue(AnimationCommand::CancelSleep);
    }

    pub fn focus(&mut self) {
        self.enqueue(AnimationCommand::Focus);
    }

    pub fn cancel_focus(&mut self) {
        self.enqueue(AnimationCommand::CancelFocus);
    }

    pub fn smile(&mut self) {
        self.enqueue(AnimationCommand::Smile);
    }

    pub fn cancel_smile(&mut self) {
        self.enqueue(AnimationCommand::CancelSmile);
    }

    pub fn think(&mut self) {
        self.enqueue(AnimationCommand::Think);
    }

    pub fn cancel_think(&mut self) {
        self.enqueue(AnimationCommand::CancelThink);
    }

    /// What the face is doing right now
    pub fn expression(&self) -> Expression {
        Expression::resolve(
            &self.state.flags,
            self.dispatcher.current(),
            self.idle.current(),
        )
    }

    pub fn flags(&self) -> ExpressionFlags {
        self.state.flags
    }

    /// Commands still waiting, front first
    pub fn pending_commands(&self) -> Vec<AnimationCommand> {
        self.dispatcher.queue().to_vec()
    }

    /// Completed transitions, oldest first
    pub fn history(&self) -> Vec<Transition> {
        self.dispatcher.history().copied().collect()
    }

    /// Command of the job in progress
    pub fn current_command(&self) -> Option<AnimationCommand> {
        self.dispatcher.current()
    }

    /// Names of registered animations in step order
    pub fn running_animations(&self) -> Vec<&'static str> {
        self.scheduler.names()
    }

    pub fn state(&self) -> &FaceState {
        &self.state
    }

    pub fn mask_count(&self) -> usize {
        self.state.scene.mask_count()
    }

    /// Virtual time elapsed since construction
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_surface() {
        let result = FaceEngine::new(
            FaceConfig::default(),
            Size::new(0.0, 400.0),
            Color::BLACK,
            Color::WHITE,
        );
        assert!(matches!(result, Err(FaceError::EmptySurface { .. })));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = FaceConfig::default();
        config.dispatch_interval_ms = 0.0;
        let result = FaceEngine::new(config, Size::new(400.0, 400.0), Color::BLACK, Color::WHITE);
        assert!(matches!(result, Err(FaceError::InvalidConfig(_))));
    }

    #[test]
    fn test_non_finite_idle_delay_is_an_error() {
        for max in [f64::NAN, f64::INFINITY] {
            let mut config = FaceConfig::default();
            config.timing.idle_delay_max_ms = max;
            let result =
                FaceEngine::new(config, Size::new(400.0, 400.0), Color::BLACK, Color::WHITE);
            assert!(matches!(result, Err(FaceError::InvalidConfig(_))), "{max}");
        }
    }

    #[test]
    fn test_bad_delta_does_not_advance() {
        let mut engine = FaceEngine::new(
            FaceConfig::default(),
            Size::new(400.0, 400.0),
            Color::BLACK,
            Color::WHITE,
        )
        .unwrap();
        engine.step(f32::NAN);
        engine.step(-5.0);
        assert_eq!(engine.now_ms(), 0.0);
        engine.step(16.0);
        assert_eq!(engine.now_ms(), 16.0);
    }
}
