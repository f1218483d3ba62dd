//! Fuzzy reasoning: graded membership via linguistic hedges.
//!
//! Operator-driven scoring; the augment hook assigns each unit a membership
//! degree from its hedge words and reports the degrees as alternatives.
//! This is a hedging heuristic, not a full fuzzy-set calculus.

use serde_json::Value;

use crate::context::ReasonContext;
use crate::extract::Extraction;
use crate::operator::Operator;
use crate::outcome::Alternative;
use crate::paradigm::{Augmentation, Paradigm, ParadigmKind};
use crate::rule::{Rule, Validity};
use crate::score::ScoreWeights;
use crate::trace::{ProofTrace, StepKind};

/// Hedge adjustments applied to the 0.5 base membership degree.
const INTENSIFIERS: &[&str] = &["very", "extremely", "highly"];
const MODERATORS: &[&str] = &["somewhat", "fairly", "quite"];
const ATTENUATORS: &[&str] = &["slightly", "a little", "barely"];

/// The fuzzy logic paradigm.
#[derive(Debug, Default)]
pub struct Fuzzy;

impl Fuzzy {
    pub fn new() -> Self {
        Self
    }

    /// Membership degree for one lower-cased unit text.
    ///
    /// Base 0.5, pushed up by intensifiers, slightly up by moderators, down
    /// by attenuators. Clamped to [0, 1].
    pub fn membership_degree(lowered: &str) -> f64 {
        let mut degree: f64 = 0.5;
        if INTENSIFIERS.iter().any(|h| lowered.contains(h)) {
            degree += 0.35;
        }
        if MODERATORS.iter().any(|h| lowered.contains(h)) {
            degree += 0.15;
        }
        if ATTENUATORS.iter().any(|h| lowered.contains(h)) {
            degree -= 0.3;
        }
        degree.clamp(0.0, 1.0)
    }
}

impl Paradigm for Fuzzy {
    fn kind(&self) -> ParadigmKind {
        ParadigmKind::Fuzzy
    }

    fn logic_label(&self) -> &'static str {
        "fuzzy"
    }

    fn uncertainty_kind(&self) -> &'static str {
        "fuzzy"
    }

    fn weights(&self) -> ScoreWeights {
        ScoreWeights::OPERATOR_DRIVEN
    }

    fn operator_driven(&self) -> bool {
        true
    }

    fn operators(&self) -> Vec<Operator> {
        vec![
            Operator::new("VERY", "↑↑", 0.9, &["very", "extremely", "highly"]),
            Operator::new("SOMEWHAT", "↑", 0.6, &["somewhat", "fairly", "quite"]),
            Operator::new("SLIGHTLY", "↓", 0.3, &["slightly", "a little", "barely"]),
            Operator::new("ALMOST", "~", 0.7, &["almost", "nearly", "about"]),
            Operator::new("FUZZY_AND", "⊓", 0.85, &["and"]).with_dual("FUZZY_OR"),
            Operator::new("FUZZY_OR", "⊔", 0.75, &["or"]).with_dual("FUZZY_AND"),
        ]
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new(
                "fuzzy_modus_ponens",
                &["P → Q", "P"],
                "Q",
                0.8,
                Validity::Heuristic,
            )
            .with_evidence(&["graded implication"]),
            Rule::new(
                "hedge_intensification",
                &["very P"],
                "P holds to a high degree",
                0.75,
                Validity::Heuristic,
            ),
            Rule::new(
                "hedge_attenuation",
                &["slightly P"],
                "P holds to a low degree",
                0.75,
                Validity::Heuristic,
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

        for unit in &extraction.units {
            let degree = Self::membership_degree(&unit.lowered());
            trace.push(
                StepKind::Inference,
                format!("membership degree {degree:.2} for '{}'", unit.text),
                format!("hedge analysis of step {}", unit.id),
                degree,
            );
            augmentation.alternatives.push(
                Alternative::new(format!("'{}' is the case", unit.text), degree)
                    .with_detail("degree", Value::from(degree)),
            );
        }

        augmentation
    }
}
