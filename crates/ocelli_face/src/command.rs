//! Animation commands and the pending-command queue

use crate::error::FaceError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// An intent signal from the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationCommand {
    Nod,
    Focus,
    CancelFocus,
    Sleep,
    CancelSleep,
    Smile,
    CancelSmile,
    Think,
    CancelThink,
}

impl AnimationCommand {
    pub const ALL: [AnimationCommand; 9] = [
        AnimationCommand::Nod,
        AnimationCommand::Focus,
        AnimationCommand::CancelFocus,
        AnimationCommand::Sleep,
        AnimationCommand::CancelSleep,
        AnimationCommand::Smile,
        AnimationCommand::CancelSmile,
        AnimationCommand::Think,
        AnimationCommand::CancelThink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationCommand::Nod => "nod",
            AnimationCommand::Focus => "focus",
            AnimationCommand::CancelFocus => "cancel_focus",
            AnimationCommand::Sleep => "sleep",
            AnimationCommand::CancelSleep => "cancel_sleep",
            AnimationCommand::Smile => "smile",
            AnimationCommand::CancelSmile => "cancel_smile",
            AnimationCommand::Think => "think",
            AnimationCommand::CancelThink => "cancel_think",
        }
    }
}

impl fmt::Display for AnimationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationCommand {
    type Err = FaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| FaceError::UnknownCommand(s.to_string()))
    }
}

/// FIFO of commands waiting for the dispatcher
#[derive(Clone, Debug, Default)]
pub struct AnimationQueue {
    commands: VecDeque<AnimationCommand>,
}

impl AnimationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: AnimationCommand) {
        self.commands.push_back(command);
    }

    pub fn pop(&mut self) -> Option<AnimationCommand> {
        self.commands.pop_front()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationCommand> {
        self.commands.iter()
    }

    pub fn to_vec(&self) -> Vec<AnimationCommand> {
        self.commands.iter().copied().collect()
    }
}
