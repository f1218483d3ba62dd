//! Confidence and uncertainty estimation.
//!
//! Two independently computed scalars per result, both clamped to [0, 1].
//! Confidence is a weighted sum of the mean unit confidence, the mean base
//! confidence of applicable rules (or mean operator strength for paradigms
//! without explicit rule application), and a small input-length bonus.
//! Uncertainty sums fixed increments from independent contributors: hedge
//! words, assumption-typed or non-deductive units, and operator multiplicity
//! beyond a threshold. The two axes are NOT complements of each other.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::extract::Extraction;
use crate::outcome::Uncertainty;

/// Neutral score returned when nothing usable was extracted.
pub const NEUTRAL_BASELINE: f64 = 0.5;

/// Input length (chars) at which the complexity bonus saturates.
const LENGTH_SATURATION: f64 = 200.0;

/// Hedge words that raise uncertainty.
const HEDGE_WORDS: &[&str] = &["maybe", "perhaps", "possibly", "might", "could be", "?"];

/// Fixed uncertainty increments per contributor.
const HEDGE_INCREMENT: f64 = 0.25;
const ASSUMPTION_INCREMENT: f64 = 0.2;
const MULTIPLICITY_INCREMENT: f64 = 0.15;

/// Operator count beyond which multiplicity contributes uncertainty.
const OPERATOR_THRESHOLD: usize = 3;

/// Fixed per-paradigm weights for the confidence terms.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    /// Weight of the mean extracted-unit confidence.
    pub units: f64,
    /// Weight of the mean rule confidence (or operator strength).
    pub rules: f64,
    /// Weight of the input-length/complexity bonus.
    pub length: f64,
}

impl ScoreWeights {
    /// Weights for paradigms driven by explicit rule application.
    pub const RULE_BASED: Self = Self {
        units: 0.4,
        rules: 0.5,
        length: 0.1,
    };

    /// Weights for paradigms driven primarily by operator detection.
    pub const OPERATOR_DRIVEN: Self = Self {
        units: 0.6,
        rules: 0.3,
        length: 0.1,
    };
}

/// Compute overall confidence.
///
/// `rule_term` is the mean base confidence of applicable rules, or the mean
/// operator strength when the paradigm applies no rules; `None` means the
/// term contributes nothing and its weight redistributes onto the unit term.
/// Falls back to [`NEUTRAL_BASELINE`] on zero-signal extractions.
pub fn confidence(
    weights: ScoreWeights,
    extraction: &Extraction,
    rule_term: Option<f64>,
    input_len: usize,
) -> f64 {
    let unit_mean = extraction.mean_unit_confidence();
    if unit_mean.is_none() && rule_term.is_none() {
        return NEUTRAL_BASELINE;
    }

    let length_bonus = (input_len as f64 / LENGTH_SATURATION).min(1.0);

    let score = match (unit_mean, rule_term) {
        (Some(u), Some(r)) => weights.units * u + weights.rules * r + weights.length * length_bonus,
        (Some(u), None) => (weights.units + weights.rules) * u + weights.length * length_bonus,
        (None, Some(r)) => (weights.units + weights.rules) * r + weights.length * length_bonus,
        (None, None) => unreachable!(),
    };

    score.clamp(0.0, 1.0)
}

/// Compute the uncertainty descriptor.
///
/// Contributors are independent and additive, capped at 1.0. Zero-signal
/// extractions yield the neutral 0.5 level so the descriptor is never empty.
pub fn uncertainty(kind: &str, input: &str, extraction: &Extraction) -> Uncertainty {
    if extraction.is_zero_signal() {
        let mut params = BTreeMap::new();
        params.insert("zero_signal".into(), Value::Bool(true));
        return Uncertainty::from_level(kind, NEUTRAL_BASELINE, params);
    }

    let lowered = input.to_lowercase();
    let mut level = 0.0;
    let mut params = BTreeMap::new();

    let hedged = HEDGE_WORDS.iter().any(|h| lowered.contains(h));
    if hedged {
        level += HEDGE_INCREMENT;
    }
    params.insert("hedged".into(), Value::Bool(hedged));

    let assumed = extraction.units.iter().any(|u| u.is_assumption());
    if assumed {
        level += ASSUMPTION_INCREMENT;
    }
    params.insert("assumptions_present".into(), Value::Bool(assumed));

    let multiplicity = extraction.operators.len() > OPERATOR_THRESHOLD;
    if multiplicity {
        level += MULTIPLICITY_INCREMENT;
    }
    params.insert(
        "operator_count".into(),
        Value::from(extraction.operators.len()),
    );

    Uncertainty::from_level(kind, level.min(1.0), params)
}
