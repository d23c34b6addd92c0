//! Command dispatch
//!
//! Commands wait in a FIFO until the periodic dispatch tick. Each tick the
//! dispatcher takes at most one command, applies the dedupe and exclusivity
//! rules, and turns it into a [`Job`]: a list of steps that set flags, run
//! animations to completion, and pause on the virtual clock. A job never
//! blocks the frame; it parks on an animation id or a timer and resumes when
//! the matching event arrives.

use crate::animations::FaceAnimation;
use crate::command::{AnimationCommand, AnimationQueue};
use crate::expression::Expression;
use crate::state::FaceState;
use crate::timers::FaceTimer;
use ocelli_animation::{AnimationId, AnimationScheduler, TickEvent, VirtualClock};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Builds an animation from the state at the moment the step starts.
/// `None` skips the step.
pub type Build = Box<dyn FnOnce(&mut FaceState) -> Option<FaceAnimation>>;

/// A synchronous state change
pub type Apply = Box<dyn FnOnce(&mut FaceState)>;

pub enum JobStep {
    /// Start an animation and wait for it to end
    Run(Build),
    /// Start an animation and move on immediately
    Detach(Build),
    /// Pause on the virtual clock
    Wait(f64),
    Apply(Apply),
}

impl JobStep {
    pub fn run(build: impl FnOnce(&mut FaceState) -> Option<FaceAnimation> + 'static) -> Self {
        JobStep::Run(Box::new(build))
    }

    pub fn detach(build: impl FnOnce(&mut FaceState) -> Option<FaceAnimation> + 'static) -> Self {
        JobStep::Detach(Box::new(build))
    }

    pub fn apply(apply: impl FnOnce(&mut FaceState) + 'static) -> Self {
        JobStep::Apply(Box::new(apply))
    }
}

impl fmt::Debug for JobStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStep::Run(_) => f.write_str("Run"),
            JobStep::Detach(_) => f.write_str("Detach"),
            JobStep::Wait(ms) => write!(f, "Wait({ms})"),
            JobStep::Apply(_) => f.write_str("Apply"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Awaiting {
    Animation(AnimationId),
    /// A [`FaceTimer::JobWait`]; only the running job schedules these
    Wait,
}

/// A dispatched command in progress
#[derive(Debug)]
pub struct Job {
    command: AnimationCommand,
    steps: VecDeque<JobStep>,
    awaiting: Option<Awaiting>,
    from: Expression,
}

impl Job {
    pub fn new(command: AnimationCommand, steps: impl IntoIterator<Item = JobStep>) -> Self {
        Self {
            command,
            steps: steps.into_iter().collect(),
            awaiting: None,
            from: Expression::Idle,
        }
    }

    pub fn command(&self) -> AnimationCommand {
        self.command
    }
}

/// A finished transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Transition {
    pub from: Expression,
    pub command: AnimationCommand,
    pub to: Expression,
}

/// Why a dispatch tick did not start a job
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Started(AnimationCommand),
    /// Busy or nothing queued
    Idle,
    /// Same as the previous command; dropped
    Deduped(AnimationCommand),
    /// Held back by an exclusive expression; moved to the tail
    Gated(AnimationCommand),
}

pub struct Dispatcher {
    queue: AnimationQueue,
    job: Option<Job>,
    history: VecDeque<Transition>,
    history_limit: usize,
}

impl Dispatcher {
    pub fn new(history_limit: usize) -> Self {
        Self {
            queue: AnimationQueue::new(),
            job: None,
            history: VecDeque::new(),
            history_limit,
        }
    }

    pub fn enqueue(&mut self, command: AnimationCommand) {
        tracing::trace!(%command, "enqueued");
        self.queue.push(command);
    }

    pub fn queue(&self) -> &AnimationQueue {
        &self.queue
    }

    /// Command of the running job
    pub fn current(&self) -> Option<AnimationCommand> {
        self.job.as_ref().map(Job::command)
    }

    pub fn is_busy(&self) -> bool {
        self.job.is_some()
    }

    pub fn history(&self) -> impl Iterator<Item = &Transition> {
        self.history.iter()
    }

    /// Take the next command off the queue if it may start now.
    ///
    /// A command equal to the previous one is dropped. While sleeping or
    /// thinking, anything but the matching cancel goes back to the tail
    /// without touching the previous command.
    pub fn next_command(&mut self, state: &FaceState) -> Dispatch {
        if self.job.is_some() {
            return Dispatch::Idle;
        }
        let Some(command) = self.queue.pop() else {
            return Dispatch::Idle;
        };
        let flags = &state.flags;

        if flags.prev_command == Some(command) {
            tracing::debug!(%command, "duplicate command dropped");
            return Dispatch::Deduped(command);
        }

        let gated = (flags.sleeping && command != AnimationCommand::CancelSleep)
            || (flags.thinking && command != AnimationCommand::CancelThink);
        if gated {
            tracing::debug!(%command, pending = self.queue.len(), "command gated, requeued");
            self.queue.push(command);
            return Dispatch::Gated(command);
        }

        Dispatch::Started(command)
    }

    /// Begin running `job` for the command returned by [`Self::next_command`].
    pub fn begin(&mut self, mut job: Job, state: &mut FaceState, from: Expression) {
        tracing::debug!(command = %job.command, steps = job.steps.len(), "job started");
        state.flags.prev_command = Some(job.command);
        state.flags.processing = true;
        job.from = from;
        self.job = Some(job);
    }

    /// Resume a job parked on an animation.
    ///
    /// Cancellation counts as an end; a fault does not.
    pub fn on_event(&mut self, event: &TickEvent) {
        let Some(job) = self.job.as_mut() else {
            return;
        };
        if event.is_terminal() && job.awaiting == Some(Awaiting::Animation(event.id())) {
            job.awaiting = None;
        }
    }

    /// Resume a job parked on a pause.
    pub fn on_wait_elapsed(&mut self) {
        if let Some(job) = self.job.as_mut() {
            if job.awaiting == Some(Awaiting::Wait) {
                job.awaiting = None;
            }
        }
    }

    /// Run job steps until the job parks or ends.
    ///
    /// Returns true once every step has run and nothing is awaited; the
    /// caller then closes the job with [`Self::finish`].
    pub fn pump(
        &mut self,
        state: &mut FaceState,
        scheduler: &mut AnimationScheduler<FaceState>,
        clock: &mut VirtualClock<FaceTimer>,
    ) -> bool {
        let Some(job) = self.job.as_mut() else {
            return false;
        };

        while job.awaiting.is_none() {
            let Some(step) = job.steps.pop_front() else {
                break;
            };
            match step {
                JobStep::Run(build) => {
                    if let Some(animation) = build(state) {
                        let id = scheduler.add(animation);
                        job.awaiting = Some(Awaiting::Animation(id));
                    }
                }
                JobStep::Detach(build) => {
                    if let Some(animation) = build(state) {
                        scheduler.add(animation);
                    }
                }
                JobStep::Wait(ms) => {
                    clock.schedule_after(ms, FaceTimer::JobWait);
                    job.awaiting = Some(Awaiting::Wait);
                }
                JobStep::Apply(apply) => apply(state),
            }
        }

        job.awaiting.is_none() && job.steps.is_empty()
    }

    /// Close out a job whose steps are exhausted.
    pub fn finish(&mut self, state: &mut FaceState, to: Expression) -> Option<Transition> {
        let job = self.job.as_ref()?;
        if job.awaiting.is_some() || !job.steps.is_empty() {
            return None;
        }
        let job = self.job.take()?;
        state.flags.processing = false;
        let transition = Transition {
            from: job.from,
            command: job.command,
            to,
        };
        tracing::debug!(command = %job.command, from = %job.from, %to, "job finished");
        if self.history_limit > 0 {
            if self.history.len() == self.history_limit {
                self.history.pop_front();
            }
            self.history.push_back(transition);
        }
        Some(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocelli_paint::Size;

    fn state() -> FaceState {
        FaceState::new(Size::new(400.0, 300.0))
    }

    fn run_to_end(dispatcher: &mut Dispatcher, state: &mut FaceState, command: AnimationCommand) {
        let job = Job::new(command, [JobStep::apply(|_: &mut FaceState| {})]);
        dispatcher.begin(job, state, Expression::Idle);
        let mut scheduler = AnimationScheduler::new();
        let mut clock = VirtualClock::new();
        assert!(dispatcher.pump(state, &mut scheduler, &mut clock));
        dispatcher.finish(state, Expression::Idle);
    }

    #[test]
    fn test_duplicate_dropped() {
        let mut dispatcher = Dispatcher::new(8);
        let mut state = state();
        dispatcher.enqueue(AnimationCommand::Nod);
        dispatcher.enqueue(AnimationCommand::Nod);

        assert_eq!(dispatcher.next_command(&state), Dispatch::Started(AnimationCommand::Nod));
        run_to_end(&mut dispatcher, &mut state, AnimationCommand::Nod);
        assert_eq!(dispatcher.next_command(&state), Dispatch::Deduped(AnimationCommand::Nod));
        assert!(dispatcher.queue().is_empty());
    }

    #[test]
    fn test_gated_command_keeps_prev_and_requeues() {
        let mut dispatcher = Dispatcher::new(8);
        let mut state = state();
        state.flags.sleeping = true;
        state.flags.prev_command = Some(AnimationCommand::Sleep);
        dispatcher.enqueue(AnimationCommand::Smile);
        dispatcher.enqueue(AnimationCommand::CancelSleep);

        assert_eq!(dispatcher.next_command(&state), Dispatch::Gated(AnimationCommand::Smile));
        assert_eq!(state.flags.prev_command, Some(AnimationCommand::Sleep));
        assert_eq!(
            dispatcher.queue().to_vec(),
            vec![AnimationCommand::CancelSleep, AnimationCommand::Smile]
        );
        assert_eq!(
            dispatcher.next_command(&state),
            Dispatch::Started(AnimationCommand::CancelSleep)
        );
    }

    #[test]
    fn test_busy_dispatcher_takes_nothing() {
        let mut dispatcher = Dispatcher::new(8);
        let mut state = state();
        dispatcher.begin(
            Job::new(AnimationCommand::Focus, [JobStep::Wait(100.0)]),
            &mut state,
            Expression::Idle,
        );
        dispatcher.enqueue(AnimationCommand::Nod);
        assert_eq!(dispatcher.next_command(&state), Dispatch::Idle);
        assert_eq!(dispatcher.queue().len(), 1);
        assert!(state.flags.processing);
    }

    #[test]
    fn test_wait_step_parks_until_elapsed() {
        let mut dispatcher = Dispatcher::new(8);
        let mut state = state();
        let mut scheduler = AnimationScheduler::new();
        let mut clock = VirtualClock::new();
        let job = Job::new(
            AnimationCommand::CancelThink,
            [
                JobStep::Wait(300.0),
                JobStep::apply(|s: &mut FaceState| s.flags.release_all()),
            ],
        );
        state.flags.lock_all();
        dispatcher.begin(job, &mut state, Expression::Thinking);

        assert!(!dispatcher.pump(&mut state, &mut scheduler, &mut clock));
        assert!(state.flags.on_animation);

        assert!(clock.advance(299.0).unwrap().is_empty());
        assert_eq!(clock.advance(1.0).unwrap().as_slice(), &[FaceTimer::JobWait]);
        dispatcher.on_wait_elapsed();
        assert!(dispatcher.pump(&mut state, &mut scheduler, &mut clock));
        assert!(!state.flags.on_animation);

        let transition = dispatcher.finish(&mut state, Expression::Idle).unwrap();
        assert_eq!(transition.from, Expression::Thinking);
        assert!(!state.flags.processing);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut dispatcher = Dispatcher::new(2);
        let mut state = state();
        let commands = [
            AnimationCommand::Nod,
            AnimationCommand::Focus,
            AnimationCommand::CancelFocus,
        ];
        for command in commands {
            run_to_end(&mut dispatcher, &mut state, command);
        }
        let commands: Vec<_> = dispatcher.history().map(|t| t.command).collect();
        assert_eq!(commands, vec![AnimationCommand::Focus, AnimationCommand::CancelFocus]);
    }
}
