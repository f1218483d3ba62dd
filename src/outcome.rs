//! The `ReasoningResult` wire contract.
//!
//! Field names here are the contract consumed by the HTTP/worker layer and
//! the orchestrating facade; they serialize to exactly the JSON shape
//! callers expect:
//!
//! ```json
//! {
//!   "confidence": 0.82,
//!   "reasoning": { "steps": [...], "logic": "deductive", "evidence": [...], "assumptions": [...] },
//!   "conclusions": [...],
//!   "uncertainty": { "type": "epistemic", "parameters": {...}, "confidence": 0.7 },
//!   "alternatives": [...]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::trace::ProofStep;

/// A synthesized conclusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conclusion {
    /// The instantiated consequent text.
    pub statement: String,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Name of the rule (or mixed chain) that produced it.
    pub derived_from: String,
    /// Validity tag carried from the rule ("deductive", "inductive", …).
    pub validity: String,
}

/// An alternative outcome with its own probability/feasibility score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alternative {
    /// Description of the alternative (a world, event ordering, option, state).
    pub description: String,
    /// Probability or feasibility in [0, 1].
    pub probability: f64,
    /// Paradigm-specific detail map.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub detail: BTreeMap<String, Value>,
}

impl Alternative {
    /// Build an alternative with a clamped probability and no detail.
    pub fn new(description: impl Into<String>, probability: f64) -> Self {
        Self {
            description: description.into(),
            probability: probability.clamp(0.0, 1.0),
            detail: BTreeMap::new(),
        }
    }

    /// Attach one detail entry.
    pub fn with_detail(mut self, key: impl Into<String>, value: Value) -> Self {
        self.detail.insert(key.into(), value);
        self
    }
}

/// The uncertainty descriptor: independent of the primary confidence axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Uncertainty {
    /// Uncertainty type tag, e.g. "epistemic", "fuzzy", "stochastic".
    #[serde(rename = "type")]
    pub kind: String,
    /// Contributor breakdown; always carries a "level" entry in [0, 1].
    pub parameters: BTreeMap<String, Value>,
    /// Defined as `1 - level`; unrelated to the primary confidence score.
    pub confidence: f64,
}

impl Uncertainty {
    /// Build a descriptor from an uncertainty level and contributor map.
    pub fn from_level(kind: impl Into<String>, level: f64, contributors: BTreeMap<String, Value>) -> Self {
        let level = level.clamp(0.0, 1.0);
        let mut parameters = contributors;
        parameters.insert("level".into(), Value::from(level));
        Self {
            kind: kind.into(),
            parameters,
            confidence: 1.0 - level,
        }
    }

    /// The uncertainty level in [0, 1].
    pub fn level(&self) -> f64 {
        self.parameters
            .get("level")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }
}

/// The reasoning block of a result: trace plus free-form evidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reasoning {
    /// Ordered proof steps.
    pub steps: Vec<ProofStep>,
    /// Inference style label, e.g. "deductive", "fuzzy", "modal-k".
    pub logic: String,
    /// Free-form evidence strings (rule citations, observations).
    pub evidence: Vec<String>,
    /// Texts of assumption-typed units that influenced the result.
    pub assumptions: Vec<String>,
}

/// The complete output of one reasoning call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningResult {
    /// Overall confidence in [0, 1].
    pub confidence: f64,
    /// Trace, logic label, evidence, assumptions.
    pub reasoning: Reasoning,
    /// Ordered conclusions (possibly empty).
    pub conclusions: Vec<Conclusion>,
    /// Uncertainty descriptor, always present.
    pub uncertainty: Uncertainty,
    /// Ordered alternatives (worlds, orderings, options, states).
    pub alternatives: Vec<Alternative>,
}
