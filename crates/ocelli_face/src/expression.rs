//! Expression flags and the reported expression

use crate::command::AnimationCommand;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lock and mode flags shared by the dispatcher, idle scheduler and animations.
///
/// At most one of `sleeping`, `thinking` and `smiling` is set at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExpressionFlags {
    pub sleeping: bool,
    pub thinking: bool,
    pub smiling: bool,
    /// A command-driven animation owns the eyes
    pub on_animation: bool,
    pub blink_lock: bool,
    pub look_around_lock: bool,
    /// The dispatcher is running a job
    pub processing: bool,
    /// Last command the dispatcher started
    pub prev_command: Option<AnimationCommand>,
}

impl ExpressionFlags {
    /// Whether an expression that gates the queue is held
    pub fn is_exclusive(&self) -> bool {
        self.sleeping || self.thinking || self.smiling
    }

    pub fn lock_all(&mut self) {
        self.on_animation = true;
        self.blink_lock = true;
        self.look_around_lock = true;
    }

    pub fn release_all(&mut self) {
        self.on_animation = false;
        self.blink_lock = false;
        self.look_around_lock = false;
    }

    /// Flag by its scenario name
    pub fn get(&self, name: &str) -> Option<bool> {
        Some(match name {
            "sleeping" => self.sleeping,
            "thinking" => self.thinking,
            "smiling" => self.smiling,
            "on_animation" => self.on_animation,
            "blink_lock" => self.blink_lock,
            "look_around_lock" => self.look_around_lock,
            "processing" => self.processing,
            _ => return None,
        })
    }
}

/// Idle behaviours that run outside the command queue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdleKind {
    Blink,
    LookAround,
}

/// What the face is currently doing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Idle,
    Blinking,
    LookingAround,
    Sleeping,
    Thinking,
    Smiling,
    Nodding,
    Focusing,
}

impl Expression {
    /// Derive the expression from the flags, the running job and the idle
    /// animation in flight.
    ///
    /// Exclusive expressions win, then transient jobs, then a held focus,
    /// then idle animations.
    pub fn resolve(
        flags: &ExpressionFlags,
        job: Option<AnimationCommand>,
        idle: Option<IdleKind>,
    ) -> Expression {
        if flags.sleeping {
            return Expression::Sleeping;
        }
        if flags.thinking {
            return Expression::Thinking;
        }
        if flags.smiling {
            return Expression::Smiling;
        }
        match job {
            Some(AnimationCommand::Nod) => return Expression::Nodding,
            Some(AnimationCommand::Focus) => return Expression::Focusing,
            _ => {}
        }
        // Focus keeps only the look-around lock after its hop
        if flags.on_animation && flags.look_around_lock && !flags.blink_lock {
            return Expression::Focusing;
        }
        match idle {
            Some(IdleKind::Blink) => Expression::Blinking,
            Some(IdleKind::LookAround) => Expression::LookingAround,
            None => Expression::Idle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Expression::Idle => "idle",
            Expression::Blinking => "blinking",
            Expression::LookingAround => "looking_around",
            Expression::Sleeping => "sleeping",
            Expression::Thinking => "thinking",
            Expression::Smiling => "smiling",
            Expression::Nodding => "nodding",
            Expression::Focusing => "focusing",
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
