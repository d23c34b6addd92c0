//! Per-command job plans

use crate::animations::{
    CancelSmile, FaceAnimation, Hop, Nod, Recenter, SleepBreath, SleepClose, Smile, ThinkBob,
};
use crate::command::AnimationCommand;
use crate::config::TimingConfig;
use crate::dispatcher::{Job, JobStep};
use crate::state::FaceState;

/// Build the job for `command` given the state at dispatch time.
pub fn plan(command: AnimationCommand, state: &FaceState, timing: &TimingConfig) -> Job {
    let recenter_ms = timing.recenter_ms;
    let recenter = move || JobStep::run(move |s: &mut FaceState| Recenter::boxed(s, recenter_ms));
    let cancel_smile_ms = timing.cancel_smile_ms;
    let unsmile = move || {
        [
            JobStep::run(move |_: &mut FaceState| {
                Some(Box::new(CancelSmile::new(cancel_smile_ms)) as FaceAnimation)
            }),
            JobStep::apply(|s: &mut FaceState| s.flags.smiling = false),
        ]
    };
    let smiling = state.flags.smiling;

    let mut steps = Vec::new();
    match command {
        AnimationCommand::Nod => {
            let (nod_ms, cycles) = (timing.nod_ms, timing.nod_cycles);
            steps.push(JobStep::apply(|s: &mut FaceState| s.flags.lock_all()));
            steps.push(recenter());
            steps.push(JobStep::run(move |s: &mut FaceState| {
                Some(Box::new(Nod::new(s.eyes.radius(), nod_ms, cycles)) as FaceAnimation)
            }));
            steps.push(JobStep::apply(|s: &mut FaceState| {
                if !s.flags.smiling {
                    s.flags.release_all();
                }
            }));
        }
        AnimationCommand::Focus => {
            let hop_ms = timing.hop_ms;
            steps.push(JobStep::apply(|s: &mut FaceState| {
                s.flags.on_animation = true;
                s.flags.look_around_lock = true;
            }));
            steps.push(recenter());
            steps.push(JobStep::run(move |s: &mut FaceState| {
                Some(Box::new(Hop::new(s, hop_ms)) as FaceAnimation)
            }));
        }
        AnimationCommand::CancelFocus => {
            steps.push(JobStep::apply(|s: &mut FaceState| {
                s.flags.on_animation = false;
                s.flags.look_around_lock = false;
            }));
        }
        AnimationCommand::Sleep => {
            if smiling {
                steps.extend(unsmile());
            }
            let close_ms = timing.sleep_close_ms;
            let (period_ms, amplitude) = (timing.breath_period_ms, timing.breath_amplitude);
            steps.push(JobStep::apply(|s: &mut FaceState| {
                s.flags.sleeping = true;
                s.flags.lock_all();
            }));
            steps.push(recenter());
            steps.push(JobStep::run(move |s: &mut FaceState| {
                Some(Box::new(SleepClose::new(s, close_ms)) as FaceAnimation)
            }));
            steps.push(JobStep::detach(move |_: &mut FaceState| {
                Some(Box::new(SleepBreath::new(period_ms, amplitude)) as FaceAnimation)
            }));
        }
        AnimationCommand::CancelSleep => {
            steps.push(JobStep::apply(|s: &mut FaceState| {
                s.flags.sleeping = false;
                s.flags.release_all();
            }));
        }
        AnimationCommand::Smile => {
            let smile_ms = timing.smile_ms;
            if !smiling {
                steps.push(JobStep::apply(|s: &mut FaceState| s.scene.clear_masks()));
            }
            steps.push(JobStep::apply(|s: &mut FaceState| {
                s.flags.smiling = true;
                s.flags.lock_all();
            }));
            steps.push(recenter());
            steps.push(JobStep::run(move |s: &mut FaceState| {
                Some(Box::new(Smile::new(s, smile_ms)) as FaceAnimation)
            }));
        }
        AnimationCommand::CancelSmile => {
            steps.extend(unsmile());
            steps.push(JobStep::apply(|s: &mut FaceState| {
                s.flags.release_all();
                s.scene.clear_masks();
            }));
        }
        AnimationCommand::Think => {
            if smiling {
                steps.extend(unsmile());
            }
            let (ramp_ms, period_ms) = (timing.think_ramp_ms, timing.think_period_ms);
            steps.push(JobStep::apply(|s: &mut FaceState| {
                s.flags.thinking = true;
                s.flags.lock_all();
            }));
            steps.push(recenter());
            steps.push(JobStep::detach(move |s: &mut FaceState| {
                let bob = ThinkBob::new(s.eyes.radius(), ramp_ms, period_ms, recenter_ms);
                Some(Box::new(bob) as FaceAnimation)
            }));
        }
        AnimationCommand::CancelThink => {
            steps.push(JobStep::apply(|s: &mut FaceState| s.flags.thinking = false));
            steps.push(JobStep::Wait(timing.cancel_think_wait_ms));
            steps.push(JobStep::apply(|s: &mut FaceState| s.flags.release_all()));
        }
    }
    Job::new(command, steps)
}
