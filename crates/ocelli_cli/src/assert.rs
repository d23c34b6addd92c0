//! Assertion helpers for headless face runs.

use ocelli_face::{Expression, ExpressionFlags};

/// Observable face state at one point of a run.
#[derive(Debug, Clone, Copy)]
pub struct FaceSnapshot {
    pub flags: ExpressionFlags,
    pub expression: Expression,
    /// Lid masks alive in the scene
    pub scene_masks: usize,
    /// Mask pushes in the last drawn frame
    pub drawn_masks: usize,
}

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

pub fn evaluate_assert_flag(
    flag: &str,
    expected: bool,
    snapshot: &FaceSnapshot,
) -> AssertionResult {
    let Some(actual) = snapshot.flags.get(flag) else {
        return AssertionResult::Failed {
            code: "unknown_flag".to_string(),
            message: format!("{flag}: no such flag"),
        };
    };
    if actual == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "flag_mismatch".to_string(),
            message: format!("{flag}: expected {expected}, got {actual}"),
        }
    }
}

pub fn evaluate_assert_expression(
    expected: Expression,
    snapshot: &FaceSnapshot,
) -> AssertionResult {
    if snapshot.expression == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "expression_mismatch".to_string(),
            message: format!("expected {expected}, got {}", snapshot.expression),
        }
    }
}

pub fn evaluate_assert_masks(expected: usize, snapshot: &FaceSnapshot) -> AssertionResult {
    if snapshot.scene_masks != snapshot.drawn_masks {
        return AssertionResult::Failed {
            code: "mask_drift".to_string(),
            message: format!(
                "scene holds {} masks but the frame drew {}",
                snapshot.scene_masks, snapshot.drawn_masks
            ),
        };
    }
    if snapshot.scene_masks == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "mask_count".to_string(),
            message: format!("expected {expected} masks, got {}", snapshot.scene_masks),
        }
    }
}
