//! Decision-theoretic reasoning: options, utility, risk, recommendation.
//!
//! Options come from splitting disjunctive units on " or ". Each option is
//! scored against the rest of the input: sentences mentioning the option's
//! content words contribute their benefit and risk cues. Alternatives are
//! the ranked options; the top option becomes the recommendation.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::ReasonContext;
use crate::extract::Extraction;
use crate::operator::Operator;
use crate::outcome::{Alternative, Conclusion};
use crate::paradigm::{Augmentation, Paradigm, ParadigmKind};
use crate::rule::{Rule, Validity};
use crate::score::ScoreWeights;
use crate::trace::{ProofTrace, StepKind};

const BENEFIT_CUES: &[&str] = &["benefit", "gain", "advantage", "save", "faster", "cheaper", "improve"];
const RISK_CUES: &[&str] = &["risk", "risky", "danger", "expensive", "slower", "lose", "cost"];

const BASE_UTILITY: f64 = 0.5;
const BASE_RISK: f64 = 0.2;
const CUE_STEP: f64 = 0.3;

/// A weighted ranking criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionCriterion {
    pub name: String,
    pub weight: f64,
}

/// Default criteria: utility-leaning with a risk discount.
pub fn default_criteria() -> Vec<DecisionCriterion> {
    vec![
        DecisionCriterion { name: "utility".into(), weight: 0.6 },
        DecisionCriterion { name: "safety".into(), weight: 0.4 },
    ]
}

/// One candidate course of action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionOption {
    /// Option text.
    pub label: String,
    /// Estimated utility in [0, 1].
    pub utility: f64,
    /// Estimated risk in [0, 1].
    pub risk: f64,
}

impl DecisionOption {
    /// Weighted value under the given criteria (utility weighted directly,
    /// safety as the risk complement).
    pub fn value(&self, criteria: &[DecisionCriterion]) -> f64 {
        criteria
            .iter()
            .map(|c| match c.name.as_str() {
                "safety" => (1.0 - self.risk) * c.weight,
                _ => self.utility * c.weight,
            })
            .sum()
    }
}

/// The decision-theoretic paradigm.
#[derive(Debug)]
pub struct Decision {
    criteria: Vec<DecisionCriterion>,
    /// Administratively-added options, ranked alongside extracted ones.
    seeded_options: RwLock<Vec<DecisionOption>>,
}

impl Default for Decision {
    fn default() -> Self {
        Self {
            criteria: default_criteria(),
            seeded_options: RwLock::new(Vec::new()),
        }
    }
}

impl Decision {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build with custom ranking criteria.
    pub fn with_criteria(criteria: Vec<DecisionCriterion>) -> Self {
        Self {
            criteria,
            seeded_options: RwLock::new(Vec::new()),
        }
    }

    /// Administrative mutation: register a standing option.
    pub fn add_decision_option(&self, option: DecisionOption) {
        self.seeded_options
            .write()
            .expect("decision option store poisoned")
            .push(option);
    }

    /// Extract options by splitting disjunctive units on " or ", then score
    /// each against the sentences that mention it.
    pub fn build_options(&self, extraction: &Extraction) -> Vec<DecisionOption> {
        let mut options = Vec::new();
        for unit in &extraction.units {
            let lowered = unit.lowered();
            if !lowered.contains(" or ") {
                continue;
            }
            for fragment in lowered.split(" or ") {
                let label = fragment
                    .trim()
                    .trim_start_matches("either ")
                    .trim()
                    .to_string();
                if label.is_empty() {
                    continue;
                }
                let (utility, risk) = self.score_option(&label, extraction);
                options.push(DecisionOption { label, utility, risk });
            }
        }
        options.extend(
            self.seeded_options
                .read()
                .expect("decision option store poisoned")
                .iter()
                .cloned(),
        );
        options.sort_by(|a, b| {
            b.value(&self.criteria)
                .partial_cmp(&a.value(&self.criteria))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        options
    }

    /// Cue-count scoring over the option text plus every sentence that shares
    /// a content word with it.
    fn score_option(&self, label: &str, extraction: &Extraction) -> (f64, f64) {
        const STOPWORDS: &[&str] = &["the", "and", "for", "but", "not", "was", "are", "could", "would"];
        let words: Vec<&str> = label
            .split_whitespace()
            .filter(|w| w.len() > 2 && !STOPWORDS.contains(w))
            .collect();

        let mut combined = label.to_string();
        for unit in &extraction.units {
            let lowered = unit.lowered();
            if lowered.contains(" or ") {
                continue;
            }
            if words.iter().any(|w| lowered.contains(w)) {
                combined.push(' ');
                combined.push_str(&lowered);
            }
        }

        let benefits = BENEFIT_CUES.iter().filter(|c| combined.contains(**c)).count() as f64;
        let risks = RISK_CUES.iter().filter(|c| combined.contains(**c)).count() as f64;
        let utility = (BASE_UTILITY + benefits * CUE_STEP).clamp(0.0, 1.0);
        let risk = (BASE_RISK + risks * CUE_STEP).clamp(0.0, 1.0);
        (utility, risk)
    }
}

impl Paradigm for Decision {
    fn kind(&self) -> ParadigmKind {
        ParadigmKind::Decision
    }

    fn logic_label(&self) -> &'static str {
        "decision-theoretic"
    }

    fn uncertainty_kind(&self) -> &'static str {
        "decision"
    }

    fn weights(&self) -> ScoreWeights {
        ScoreWeights::OPERATOR_DRIVEN
    }

    fn operator_driven(&self) -> bool {
        true
    }

    fn operators(&self) -> Vec<Operator> {
        vec![
            Operator::new("CHOICE", "∥", 0.7, &["or", "choose", "decide", "option"]),
            Operator::new("PREFER", "≻", 0.8, &["prefer", "better than", "rather"]),
            Operator::new("BENEFIT", "⊕", 0.8, BENEFIT_CUES).with_dual("RISK"),
            Operator::new("RISK", "⊖", 0.5, RISK_CUES).with_dual("BENEFIT"),
            Operator::new("TRADEOFF", "⇄", 0.6, &["tradeoff", "trade-off", "versus"]),
        ]
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new(
                "dominance",
                &["X is better than Y"],
                "P is preferred",
                0.85,
                Validity::Heuristic,
            ),
            Rule::new(
                "risk_aversion",
                &["X is risky"],
                "P should be weighed against safer options",
                0.7,
                Validity::Heuristic,
            ),
            Rule::new(
                "expected_utility",
                &["choose X"],
                "the choice with the highest expected value wins",
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

        let options = self.build_options(extraction);
        for option in &options {
            let value = option.value(&self.criteria);
            trace.push(
                StepKind::Inference,
                format!(
                    "option '{}': utility {:.2}, risk {:.2}",
                    option.label, option.utility, option.risk
                ),
                "cue scoring over mentioning sentences".to_string(),
                value,
            );
            augmentation.alternatives.push(
                Alternative::new(option.label.clone(), value)
                    .with_detail("utility", Value::from(option.utility))
                    .with_detail("risk", Value::from(option.risk)),
            );
        }

        if let Some(best) = options.first() {
            augmentation.conclusions.push(Conclusion {
                statement: format!("recommended option: '{}'", best.label),
                confidence: best.value(&self.criteria).clamp(0.0, 1.0),
                derived_from: "utility_ranking".into(),
                validity: Validity::Heuristic.label().to_string(),
            });
        }

        augmentation
    }
}
