//! Face animations
//!
//! Each animation is a record implementing [`Animation<FaceState>`]. Exclusive
//! expressions that loop until cancelled (sleep breathing, thinking) read
//! their flag in `is_active`; the rest run for a fixed duration.

mod blink;
mod hop;
mod look;
mod nod;
mod recenter;
mod sleep;
mod smile;
mod think;

pub use blink::Blink;
pub use hop::Hop;
pub use look::{LookAround, LOOK_DIRECTIONS};
pub use nod::Nod;
pub use recenter::Recenter;
pub use sleep::{breath_offset, SleepBreath, SleepClose};
pub use smile::{CancelSmile, Smile};
pub use think::{think_offset, ThinkBob};

use crate::state::FaceState;
use ocelli_animation::{Animation, Step};

pub type FaceAnimation = Box<dyn Animation<FaceState>>;

fn step_until(done: bool) -> Step {
    if done {
        Step::Finished
    } else {
        Step::Running
    }
}
