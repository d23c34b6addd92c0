//! Dialogue controller
//!
//! Maps dialogue-state changes onto face commands. Bursts are serialized by a
//! mutual-exclusion window on the face's virtual clock: a change arriving
//! while the window is held is dropped, not deferred.

use ocelli_face::{AnimationCommand, FaceEngine};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Conversation phase reported by the dialogue layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    /// Awaiting the user
    Wait,
    /// Agent is preparing a reply
    WaitResponse,
    /// Agent is speaking
    Response,
    /// User barged in; agent is listening
    Interrupted,
    /// Conversation dormant
    Idle,
}

impl DialogueState {
    /// Commands issued on entering this state, in order
    pub fn commands(self) -> &'static [AnimationCommand] {
        use AnimationCommand::*;
        match self {
            DialogueState::Wait => &[CancelThink, CancelSmile, Focus],
            DialogueState::WaitResponse => &[CancelSleep, Think],
            DialogueState::Response => &[CancelThink, Smile],
            DialogueState::Interrupted => &[CancelSmile, Focus],
            DialogueState::Idle => &[Sleep],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DialogueState::Wait => "wait",
            DialogueState::WaitResponse => "wait_response",
            DialogueState::Response => "response",
            DialogueState::Interrupted => "interrupted",
            DialogueState::Idle => "idle",
        }
    }
}

impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to a reported state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relay {
    /// Commands were enqueued on the face
    Sent(&'static [AnimationCommand]),
    /// Inside the exclusion window
    Dropped,
    /// Same as the last reported state
    Unchanged,
}

pub struct DialogueController {
    window_ms: f64,
    held_until_ms: Option<f64>,
    last: Option<DialogueState>,
}

impl DialogueController {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            held_until_ms: None,
            last: None,
        }
    }

    /// The last state reported, relayed or not
    pub fn last(&self) -> Option<DialogueState> {
        self.last
    }

    pub fn is_held(&self, now_ms: f64) -> bool {
        self.held_until_ms.is_some_and(|until| now_ms < until)
    }

    /// Report the dialogue state; relays its commands to `face` when the
    /// state changed and the window is free.
    pub fn report(&mut self, state: DialogueState, face: &mut FaceEngine) -> Relay {
        if self.last == Some(state) {
            return Relay::Unchanged;
        }
        self.last = Some(state);

        let now = face.now_ms();
        if self.is_held(now) {
            tracing::debug!(%state, now_ms = now, "dialogue change dropped inside window");
            return Relay::Dropped;
        }

        self.held_until_ms = Some(now + self.window_ms);
        let commands = state.commands();
        for command in commands {
            face.enqueue(*command);
        }
        tracing::debug!(%state, count = commands.len(), "dialogue change relayed");
        Relay::Sent(commands)
    }
}
