//! Scenario definition for headless face runs.

use crate::controller::DialogueState;
use anyhow::{Context, Result};
use ocelli_face::{AnimationCommand, Expression};
use serde::Deserialize;
use std::path::Path;

/// Sequence of steps driven against one face.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    ///
    /// Command names are checked here so a typo fails before any frame runs.
    pub fn from_json(input: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(input)?;
        for (index, step) in scenario.steps.iter().enumerate() {
            if let ScenarioStep::Command { name } = step {
                name.parse::<AnimationCommand>()
                    .with_context(|| format!("step {index}"))?;
            }
        }
        Ok(scenario)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Enqueue a command by name
    Command { name: String },
    /// Report a dialogue state to the controller
    Dialogue { state: DialogueState },
    Wait { ms: u64 },
    Tick { frames: u32 },
    AssertFlag { flag: String, value: bool },
    AssertExpression { expression: Expression },
    /// Lid masks in the scene and in the last drawn frame
    AssertMasks { count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_every_step_kind() {
        let scenario = Scenario::from_json(
            r#"{
                "name": "all",
                "steps": [
                    { "type": "command", "name": "smile" },
                    { "type": "dialogue", "state": "wait_response" },
                    { "type": "wait", "ms": 1000 },
                    { "type": "tick", "frames": 3 },
                    { "type": "assert_flag", "flag": "smiling", "value": true },
                    { "type": "assert_expression", "expression": "smiling" },
                    { "type": "assert_masks", "count": 2 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(scenario.steps.len(), 7);
        assert!(matches!(
            scenario.steps[1],
            ScenarioStep::Dialogue {
                state: DialogueState::WaitResponse
            }
        ));
    }

    #[test]
    fn test_unknown_command_is_an_error() {
        let err = Scenario::from_json(
            r#"{ "steps": [ { "type": "command", "name": "wink" } ] }"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("wink"));
    }
}
