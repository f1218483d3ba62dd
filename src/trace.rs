//! Proof tracing: the ordered, auditable record of one reasoning call.
//!
//! A [`ProofTrace`] accumulates premise, inference, and conclusion steps,
//! each with a sequential index, a justification string, and a confidence.
//! Completed traces are archived into a bounded [`ProofHistory`] ring buffer
//! so callers can retrieve recent inference chains without the process
//! accumulating memory forever.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Kind of a proof step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Premise,
    Inference,
    Conclusion,
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Premise => write!(f, "premise"),
            Self::Inference => write!(f, "inference"),
            Self::Conclusion => write!(f, "conclusion"),
        }
    }
}

/// One step in a proof trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofStep {
    /// Sequential index within the trace, strictly increasing.
    pub index: usize,
    /// Premise, inference, or conclusion.
    pub kind: StepKind,
    /// The content asserted or derived at this step.
    pub content: String,
    /// Why this step holds; inference steps reference preceding step indices.
    pub justification: String,
    /// Confidence in [0, 1].
    pub confidence: f64,
}

/// Append-only step sequence for a single reasoning call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProofTrace {
    steps: Vec<ProofStep>,
}

impl ProofTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step, assigning the next sequential index. Returns the index.
    pub fn push(
        &mut self,
        kind: StepKind,
        content: impl Into<String>,
        justification: impl Into<String>,
        confidence: f64,
    ) -> usize {
        let index = self.steps.len();
        self.steps.push(ProofStep {
            index,
            kind,
            content: content.into(),
            justification: justification.into(),
            confidence: confidence.clamp(0.0, 1.0),
        });
        index
    }

    /// Record one premise per extracted unit.
    pub fn premise(&mut self, content: impl Into<String>, confidence: f64) -> usize {
        self.push(StepKind::Premise, content, "given", confidence)
    }

    /// The steps recorded so far.
    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the trace is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the next step to be pushed.
    pub fn next_index(&self) -> usize {
        self.steps.len()
    }

    /// Consume the trace, yielding the step vector.
    pub fn into_steps(self) -> Vec<ProofStep> {
        self.steps
    }
}

// ---------------------------------------------------------------------------
// Bounded history
// ---------------------------------------------------------------------------

/// Default number of completed traces retained per engine.
pub const DEFAULT_HISTORY_CAP: usize = 256;

/// Bounded archive of completed proof traces.
///
/// The source design accumulated history without limit; here the buffer is a
/// capped ring, truncating oldest entries. The cap is configurable through
/// `EngineConfig::history_cap`.
#[derive(Debug)]
pub struct ProofHistory {
    cap: usize,
    traces: Mutex<VecDeque<Vec<ProofStep>>>,
}

impl ProofHistory {
    /// Create a history with the given cap. A cap of zero disables archiving.
    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap,
            traces: Mutex::new(VecDeque::new()),
        }
    }

    /// Archive a completed trace, evicting the oldest if at capacity.
    pub fn archive(&self, steps: Vec<ProofStep>) {
        if self.cap == 0 {
            return;
        }
        let mut traces = self.traces.lock().expect("proof history poisoned");
        if traces.len() == self.cap {
            traces.pop_front();
        }
        traces.push_back(steps);
    }

    /// Snapshot of all retained traces, oldest first.
    pub fn snapshot(&self) -> Vec<Vec<ProofStep>> {
        let traces = self.traces.lock().expect("proof history poisoned");
        traces.iter().cloned().collect()
    }

    /// Number of retained traces.
    pub fn len(&self) -> usize {
        self.traces.lock().expect("proof history poisoned").len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The configured cap.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Drop all retained traces. Used by idempotent re-initialization.
    pub fn clear(&self) {
        self.traces.lock().expect("proof history poisoned").clear();
    }
}

impl Default for ProofHistory {
    fn default() -> Self {
        Self::with_cap(DEFAULT_HISTORY_CAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_strictly_increase() {
        let mut trace = ProofTrace::new();
        let a = trace.premise("it rains", 0.9);
        let b = trace.push(StepKind::Inference, "ground is wet", "rule modus_ponens, steps 0", 0.85);
        let c = trace.push(StepKind::Conclusion, "ground is wet", "from step 1", 0.85);
        assert_eq!((a, b, c), (0, 1, 2));
        assert!(trace.steps().windows(2).all(|w| w[0].index < w[1].index));
    }

    #[test]
    fn step_confidence_clamped() {
        let mut trace = ProofTrace::new();
        trace.push(StepKind::Premise, "x", "given", 2.5);
        assert_eq!(trace.steps()[0].confidence, 1.0);
    }

    #[test]
    fn history_truncates_oldest() {
        let history = ProofHistory::with_cap(2);
        for i in 0..3 {
            let mut t = ProofTrace::new();
            t.premise(format!("premise {i}"), 0.5);
            history.archive(t.into_steps());
        }
        let snap = history.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0][0].content, "premise 1");
        assert_eq!(snap[1][0].content, "premise 2");
    }

    #[test]
    fn zero_cap_disables_archiving() {
        let history = ProofHistory::with_cap(0);
        let mut t = ProofTrace::new();
        t.premise("x", 0.5);
        history.archive(t.into_steps());
        assert!(history.is_empty());
    }

    #[test]
    fn clear_empties_history() {
        let history = ProofHistory::with_cap(4);
        let mut t = ProofTrace::new();
        t.premise("x", 0.5);
        history.archive(t.into_steps());
        assert_eq!(history.len(), 1);
        history.clear();
        assert!(history.is_empty());
    }
}
