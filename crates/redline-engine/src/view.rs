use redline_types::ChangeDescriptor;
use serde::{Deserialize, Serialize};

/// The review state of one pair, as served to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentView {
    /// Baseline text.
    pub current_assessment: String,
    /// Proposed text, or `None` once the pair has converged.
    pub updated_assessment: Option<String>,
    /// Outstanding descriptors. Always empty when `updated_assessment` is
    /// `None`.
    pub changes: Vec<ChangeDescriptor>,
}

impl AssessmentView {
    /// Returns `true` when no proposed update is outstanding.
    pub fn is_converged(&self) -> bool {
        self.updated_assessment.is_none()
    }
}

/// The result of a mutating operation on a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOutcome {
    /// Whether this operation's convergence check retired the pair.
    /// Rejections never run the check, so this is always `false` for them.
    pub converged: bool,
    /// Outstanding descriptors after the operation, zero when converged.
    pub remaining: usize,
}
