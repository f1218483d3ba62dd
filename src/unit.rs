//! Extracted units: the atomic pieces of meaning every paradigm consumes.
//!
//! A [`Unit`] is one clause, event, decision option, or world pulled out of
//! the input text (or injected via context). Units are created during
//! extraction, are immutable afterward, and live only for the duration of
//! the reasoning call that produced them.

use serde::{Deserialize, Serialize};

/// Classification of an extracted unit.
///
/// Assigned by checking keyword families in a fixed precedence order:
/// conditional > universal > existential > negative > default. The first
/// matching family wins; later families are not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// "if … then …" style clause.
    Conditional,
    /// "all X are Y", "every …".
    Universal,
    /// "some …", "there exists …".
    Existential,
    /// Negated clause ("not", "never", "no …").
    Negative,
    /// Supposed content ("assume", "suppose", "presumably").
    Assumption,
    /// Plain declarative statement (default).
    Statement,
    /// Temporal event (temporal paradigm).
    Event,
    /// Possible world (modal paradigm).
    World,
    /// Decision option (decision paradigm).
    Option,
    /// Quantum-style state (quantum paradigm).
    State,
    /// Goal statement (problem-solving paradigm).
    Goal,
    /// Obstacle statement (problem-solving paradigm).
    Obstacle,
}

impl UnitKind {
    /// Human-readable label used in proof steps and wire output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Conditional => "conditional",
            Self::Universal => "universal",
            Self::Existential => "existential",
            Self::Negative => "negative",
            Self::Assumption => "assumption",
            Self::Statement => "statement",
            Self::Event => "event",
            Self::World => "world",
            Self::Option => "option",
            Self::State => "state",
            Self::Goal => "goal",
            Self::Obstacle => "obstacle",
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Where a unit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSource {
    /// Derived from the input text by the extractor.
    Input,
    /// Supplied pre-built through the context map.
    Context,
}

/// Default confidence for context-supplied units that carry none.
pub const CONTEXT_DEFAULT_CONFIDENCE: f64 = 0.7;

/// An atomic piece of extracted meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Position within the extraction (0-based, extraction order).
    pub id: u32,
    /// The raw text of the unit.
    pub text: String,
    /// Keyword-family classification.
    pub kind: UnitKind,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Input-derived or context-supplied.
    pub source: UnitSource,
}

impl Unit {
    /// Create an input-derived unit, clamping confidence to [0, 1].
    pub fn from_input(id: u32, text: impl Into<String>, kind: UnitKind, confidence: f64) -> Self {
        Self {
            id,
            text: text.into(),
            kind,
            confidence: confidence.clamp(0.0, 1.0),
            source: UnitSource::Input,
        }
    }

    /// Create a context-supplied unit with the default context confidence.
    pub fn from_context(id: u32, text: impl Into<String>, kind: UnitKind) -> Self {
        Self {
            id,
            text: text.into(),
            kind,
            confidence: CONTEXT_DEFAULT_CONFIDENCE,
            source: UnitSource::Context,
        }
    }

    /// Lower-cased view of the unit text, used by the matcher.
    pub fn lowered(&self) -> String {
        self.text.to_lowercase()
    }

    /// Whether the unit reads as hedged/assumed content.
    pub fn is_assumption(&self) -> bool {
        self.kind == UnitKind::Assumption
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_unit_clamps_confidence() {
        let u = Unit::from_input(0, "the sky is blue", UnitKind::Statement, 1.7);
        assert_eq!(u.confidence, 1.0);
        let u = Unit::from_input(0, "the sky is blue", UnitKind::Statement, -0.2);
        assert_eq!(u.confidence, 0.0);
    }

    #[test]
    fn context_unit_default_confidence() {
        let u = Unit::from_context(3, "it rains", UnitKind::Statement);
        assert_eq!(u.source, UnitSource::Context);
        assert!((u.confidence - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn kind_labels_round_trip_through_display() {
        assert_eq!(UnitKind::Conditional.to_string(), "conditional");
        assert_eq!(UnitKind::Obstacle.to_string(), "obstacle");
    }
}
