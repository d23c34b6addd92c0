//! Scenario runner that drives a face headlessly.
//!
//! Every frame advances the face by a fixed logical delta and redraws into a
//! recording surface, so assertions see exactly what a host would have drawn.

use crate::assert::{
    evaluate_assert_expression, evaluate_assert_flag, evaluate_assert_masks, AssertionResult,
    FaceSnapshot,
};
use crate::config::OcelliConfig;
use crate::controller::DialogueController;
use crate::report::{FaceReport, ReportStatus};
use crate::scenario::{Scenario, ScenarioStep};
use anyhow::{Context, Result};
use ocelli_face::{AnimationCommand, FaceEngine};
use ocelli_paint::PaintContext;

/// Failure details carried into the report
struct Failure {
    step_index: usize,
    assertion: &'static str,
    message: String,
}

pub struct ScenarioRunner {
    face: FaceEngine,
    surface: PaintContext,
    controller: DialogueController,
    frame_ms: u64,
    elapsed_frames: u64,
    elapsed_ms: u64,
}

impl ScenarioRunner {
    pub fn new(config: &OcelliConfig) -> Result<Self> {
        let size = config.surface.size();
        let face = FaceEngine::new(
            config.face.clone(),
            size,
            config.surface.background_color()?,
            config.surface.dot_color()?,
        )
        .context("Failed to build face")?;

        Ok(Self {
            face,
            surface: PaintContext::new(size),
            controller: DialogueController::new(config.run.dialogue_window_ms),
            frame_ms: config.run.frame_ms.max(1),
            elapsed_frames: 0,
            elapsed_ms: 0,
        })
    }

    pub fn face(&self) -> &FaceEngine {
        &self.face
    }

    /// Run every step in order, stopping at the first failed assertion.
    pub fn run(&mut self, scenario: &Scenario) -> Result<FaceReport> {
        tracing::info!(
            scenario = scenario.name.as_deref().unwrap_or("unnamed"),
            steps = scenario.steps.len(),
            "running scenario"
        );

        for (step_index, step) in scenario.steps.iter().enumerate() {
            if let Some(failure) = self.run_step(step_index, step)? {
                tracing::warn!(
                    step = step_index,
                    assertion = failure.assertion,
                    message = %failure.message,
                    "scenario failed"
                );
                return Ok(self.report(scenario, Some(failure)));
            }
        }

        Ok(self.report(scenario, None))
    }

    fn run_step(&mut self, step_index: usize, step: &ScenarioStep) -> Result<Option<Failure>> {
        let result = match step {
            ScenarioStep::Command { name } => {
                let command: AnimationCommand = name
                    .parse()
                    .with_context(|| format!("step {step_index}"))?;
                self.face.enqueue(command);
                return Ok(None);
            }
            ScenarioStep::Dialogue { state } => {
                let relay = self.controller.report(*state, &mut self.face);
                tracing::debug!(%state, ?relay, "dialogue step");
                return Ok(None);
            }
            ScenarioStep::Wait { ms } => {
                let mut remaining = *ms;
                while remaining > 0 {
                    let step_ms = remaining.min(self.frame_ms);
                    remaining -= step_ms;
                    self.frame(step_ms);
                }
                return Ok(None);
            }
            ScenarioStep::Tick { frames } => {
                for _ in 0..*frames {
                    self.frame(self.frame_ms);
                }
                return Ok(None);
            }
            ScenarioStep::AssertFlag { flag, value } => {
                ("assert_flag", evaluate_assert_flag(flag, *value, &self.snapshot()))
            }
            ScenarioStep::AssertExpression { expression } => (
                "assert_expression",
                evaluate_assert_expression(*expression, &self.snapshot()),
            ),
            ScenarioStep::AssertMasks { count } => {
                ("assert_masks", evaluate_assert_masks(*count, &self.snapshot()))
            }
        };

        Ok(match result {
            (_, AssertionResult::Passed) => None,
            (assertion, AssertionResult::Failed { code, message }) => Some(Failure {
                step_index,
                assertion,
                message: format!("{code}: {message}"),
            }),
        })
    }

    fn frame(&mut self, dt_ms: u64) {
        self.surface.take_commands();
        self.face.frame(dt_ms as f32, &mut self.surface);
        self.elapsed_frames = self.elapsed_frames.saturating_add(1);
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
    }

    fn snapshot(&mut self) -> FaceSnapshot {
        // redraw so masks changed since the last frame (or before any frame) are seen
        self.surface.take_commands();
        self.face.render(&mut self.surface);
        FaceSnapshot {
            flags: self.face.flags(),
            expression: self.face.expression(),
            scene_masks: self.face.mask_count(),
            drawn_masks: self.surface.mask_count(),
        }
    }

    fn report(&self, scenario: &Scenario, failure: Option<Failure>) -> FaceReport {
        let (status, failed_step_index, assertion, message) = match failure {
            Some(failure) => (
                ReportStatus::Failed,
                Some(failure.step_index),
                Some(failure.assertion.to_string()),
                Some(failure.message),
            ),
            None => (ReportStatus::Passed, None, None, None),
        };
        FaceReport {
            status,
            scenario: scenario.name.clone(),
            failed_step_index,
            assertion,
            message,
            elapsed_frames: self.elapsed_frames,
            elapsed_ms: self.elapsed_ms,
            flags: self.face.flags(),
            expression: self.face.expression(),
            history: self.face.history(),
        }
    }
}

/// Build a runner from `config` and execute `scenario` on it.
pub fn run_scenario(scenario: &Scenario, config: &OcelliConfig) -> Result<FaceReport> {
    ScenarioRunner::new(config)?.run(scenario)
}

/// Parse scenario JSON and execute it.
pub fn run_scenario_json(input: &str, config: &OcelliConfig) -> Result<FaceReport> {
    let scenario = Scenario::from_json(input)?;
    run_scenario(&scenario, config)
}
