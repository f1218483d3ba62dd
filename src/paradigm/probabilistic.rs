//! Probabilistic reasoning: likelihood estimation from cues and percentages.
//!
//! Each unit gets a probability estimate, either parsed from an explicit
//! percentage or read off likelihood cue words. The augment hook reports
//! every hypothesis together with its complement, so the alternatives always
//! cover the outcome space.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::context::ReasonContext;
use crate::extract::Extraction;
use crate::operator::Operator;
use crate::outcome::{Alternative, Conclusion};
use crate::paradigm::{Augmentation, Paradigm, ParadigmKind};
use crate::rule::{Rule, Validity};
use crate::score::ScoreWeights;
use crate::trace::{ProofTrace, StepKind};

/// Explicit percentage, e.g. "70%" or "70 percent".
pub static RE_PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,3})\s*(?:%|percent)").unwrap());

/// Probability assigned to a hypothesis before a conclusion is promoted.
const PROBABLE_THRESHOLD: f64 = 0.7;

// Cue probabilities. "unlikely" must be checked before "likely": the former
// contains the latter as a substring.
const P_CERTAIN: f64 = 0.95;
const P_LIKELY: f64 = 0.75;
const P_CHANCE: f64 = 0.5;
const P_UNCERTAIN: f64 = 0.4;
const P_UNLIKELY: f64 = 0.25;

/// The probabilistic paradigm.
#[derive(Debug, Default)]
pub struct Probabilistic;

impl Probabilistic {
    pub fn new() -> Self {
        Self
    }

    /// Probability estimate for one lower-cased unit text.
    ///
    /// An explicit percentage wins; otherwise the strongest cue word decides;
    /// otherwise the indifferent 0.5.
    pub fn unit_probability(lowered: &str) -> f64 {
        if let Some(caps) = RE_PERCENT.captures(lowered) {
            if let Ok(pct) = caps[1].parse::<f64>() {
                return (pct / 100.0).clamp(0.0, 1.0);
            }
        }
        if ["certainly", "definitely", "surely"].iter().any(|c| lowered.contains(c)) {
            return P_CERTAIN;
        }
        if ["unlikely", "doubtful", "improbable"].iter().any(|c| lowered.contains(c)) {
            return P_UNLIKELY;
        }
        if ["likely", "probably", "probable"].iter().any(|c| lowered.contains(c)) {
            return P_LIKELY;
        }
        if ["uncertain", "unsure", "unclear"].iter().any(|c| lowered.contains(c)) {
            return P_UNCERTAIN;
        }
        P_CHANCE
    }
}

impl Paradigm for Probabilistic {
    fn kind(&self) -> ParadigmKind {
        ParadigmKind::Probabilistic
    }

    fn logic_label(&self) -> &'static str {
        "probabilistic"
    }

    fn uncertainty_kind(&self) -> &'static str {
        "stochastic"
    }

    fn weights(&self) -> ScoreWeights {
        ScoreWeights::OPERATOR_DRIVEN
    }

    fn operator_driven(&self) -> bool {
        true
    }

    fn operators(&self) -> Vec<Operator> {
        vec![
            Operator::new("CERTAIN", "P!", P_CERTAIN, &["certainly", "definitely", "surely"])
                .with_dual("UNCERTAIN"),
            Operator::new("LIKELY", "P+", P_LIKELY, &["likely", "probably", "probable"])
                .with_dual("UNLIKELY"),
            Operator::new("UNLIKELY", "P-", P_UNLIKELY, &["unlikely", "doubtful", "improbable"])
                .with_dual("LIKELY"),
            Operator::new("UNCERTAIN", "P?", P_UNCERTAIN, &["uncertain", "unsure", "unclear"])
                .with_dual("CERTAIN"),
            Operator::new("CHANCE", "P~", P_CHANCE, &["chance", "odds", "percent", "%"]),
        ]
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new(
                "probabilistic_modus_ponens",
                &["P → Q", "P"],
                "Q",
                0.7,
                Validity::Inductive,
            )
            .with_evidence(&["conditional probability"]),
            Rule::new(
                "likelihood_elevation",
                &["probably X"],
                "P is probable",
                0.7,
                Validity::Inductive,
            ),
            Rule::new(
                "certainty_promotion",
                &["certainly X"],
                "P",
                0.9,
                Validity::Inductive,
            ),
        ]
    }

    fn augment(
        &self,
        _input: &str,
        extraction: &Extraction,
        _context: Option<&ReasonContext>,
        trace: &mut ProofTrace,
    ) -> Augmentation {
        let mut augmentation = Augmentation::default();

        let mut best: Option<(usize, f64)> = None;
        for (i, unit) in extraction.units.iter().enumerate() {
            let p = Self::unit_probability(&unit.lowered());
            trace.push(
                StepKind::Inference,
                format!("probability {p:.2} for '{}'", unit.text),
                format!("likelihood cues in step {}", unit.id),
                p,
            );
            augmentation.alternatives.push(
                Alternative::new(format!("'{}' is the case", unit.text), p)
                    .with_detail("probability", Value::from(p)),
            );
            augmentation.alternatives.push(
                Alternative::new(format!("'{}' is not the case", unit.text), 1.0 - p)
                    .with_detail("probability", Value::from(1.0 - p))
                    .with_detail("complement", Value::from(true)),
            );
            if best.is_none_or(|(_, bp)| p > bp) {
                best = Some((i, p));
            }
        }

        if let Some((i, p)) = best {
            if p >= PROBABLE_THRESHOLD {
                augmentation.conclusions.push(Conclusion {
                    statement: format!("'{}' is probable", extraction.units[i].text),
                    confidence: p,
                    derived_from: "likelihood_estimate".into(),
                    validity: Validity::Inductive.label().to_string(),
                });
            }
        }

        augmentation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;

    #[test]
    fn percent_overrides_cues() {
        assert!((Probabilistic::unit_probability("there is a 70% chance of rain") - 0.7).abs() < 1e-9);
        assert!((Probabilistic::unit_probability("30 percent likely") - 0.3).abs() < 1e-9);
    }

    #[test]
    fn unlikely_not_shadowed_by_likely() {
        assert!((Probabilistic::unit_probability("rain is unlikely") - P_UNLIKELY).abs() < 1e-9);
        assert!((Probabilistic::unit_probability("rain is likely") - P_LIKELY).abs() < 1e-9);
    }

    #[test]
    fn no_cue_is_indifferent() {
        assert!((Probabilistic::unit_probability("the sky is blue") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn hypothesis_and_complement_cover_outcome_space() {
        let engine = Engine::new(Probabilistic::new());
        engine.initialize().unwrap();
        let result = engine.reason("It will probably rain.", None).unwrap();

        assert_eq!(result.alternatives.len(), 2);
        let total: f64 = result.alternatives.iter().map(|a| a.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(result
            .conclusions
            .iter()
            .any(|c| c.derived_from == "likelihood_estimate"));
    }

    #[test]
    fn all_seed_tables_valid() {
        for rule in Probabilistic::new().rules() {
            rule.validate().unwrap();
        }
        for op in Probabilistic::new().operators() {
            op.validate().unwrap();
        }
    }
}
