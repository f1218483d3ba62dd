//! Structured context passed alongside the input text.
//!
//! Context can carry pre-built units to merge into the extraction, a fixed
//! clock for the temporal engine, a seed for the quantum engine's measurement
//! collapse, and free-form parameters. Everything is optional; an empty
//! context behaves exactly like no context at all.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::unit::UnitKind;

/// A context-supplied unit, merged verbatim into the extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextUnit {
    /// The unit text.
    pub text: String,
    /// Classification; defaults to `Statement`.
    #[serde(default = "default_kind")]
    pub kind: UnitKind,
    /// Confidence; when absent the extractor applies the 0.7 context default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

fn default_kind() -> UnitKind {
    UnitKind::Statement
}

impl ContextUnit {
    /// Build a plain context statement with default confidence.
    pub fn statement(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: UnitKind::Statement,
            confidence: None,
        }
    }

    /// Set an explicit confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Optional structured context for one reasoning call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReasonContext {
    /// Pre-built units to merge after text extraction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<ContextUnit>,
    /// Fixed "now" for temporal event estimation; defaults to wall clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<DateTime<Utc>>,
    /// RNG seed for the quantum engine's measurement collapse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Free-form paradigm parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, Value>,
}

impl ReasonContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a context unit.
    pub fn with_unit(mut self, unit: ContextUnit) -> Self {
        self.units.push(unit);
        self
    }

    /// Fix the clock.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolve the effective clock for this call.
    pub fn effective_now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_deserializes_with_defaults() {
        let ctx: ReasonContext =
            serde_json::from_str(r#"{"units":[{"text":"it rains"}]}"#).unwrap();
        assert_eq!(ctx.units.len(), 1);
        assert_eq!(ctx.units[0].kind, UnitKind::Statement);
        assert!(ctx.units[0].confidence.is_none());
        assert!(ctx.now.is_none());
    }

    #[test]
    fn builder_chain() {
        let ctx = ReasonContext::new()
            .with_unit(ContextUnit::statement("given fact").with_confidence(0.9))
            .with_seed(42);
        assert_eq!(ctx.units[0].confidence, Some(0.9));
        assert_eq!(ctx.seed, Some(42));
    }

    #[test]
    fn effective_now_uses_fixed_clock() {
        let fixed = DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let ctx = ReasonContext::new().with_now(fixed);
        assert_eq!(ctx.effective_now(), fixed);
    }
}
