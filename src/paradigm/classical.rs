//! Classical propositional logic: the reference paradigm.
//!
//! Deductive rules over the standard connectives. No auxiliary structures;
//! everything the classical engine reports comes from rule synthesis.

use crate::operator::Operator;
use crate::paradigm::{Paradigm, ParadigmKind};
use crate::rule::{Rule, Validity};
use crate::score::ScoreWeights;

/// The classical logic paradigm.
#[derive(Debug, Default)]
pub struct Classical;

impl Classical {
    pub fn new() -> Self {
        Self
    }
}

impl Paradigm for Classical {
    fn kind(&self) -> ParadigmKind {
        ParadigmKind::Classical
    }

    fn logic_label(&self) -> &'static str {
        "deductive"
    }

    fn uncertainty_kind(&self) -> &'static str {
        "epistemic"
    }

    fn weights(&self) -> ScoreWeights {
        ScoreWeights::RULE_BASED
    }

    fn operators(&self) -> Vec<Operator> {
        vec![
            Operator::new("AND", "∧", 0.95, &["and", "also", "moreover"]).with_dual("OR"),
            Operator::new("OR", "∨", 0.85, &["or", "either"]).with_dual("AND"),
            Operator::new("IMPLIES", "→", 0.9, &["if", "then", "implies", "therefore"]),
            Operator::new("NOT", "¬", 0.9, &["not", "never", "no "]),
            Operator::new("IFF", "↔", 0.88, &["if and only if", "iff", "exactly when"]),
        ]
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new("modus_ponens", &["P → Q", "P"], "Q", 0.95, Validity::Deductive)
                .with_evidence(&["propositional calculus"]),
            Rule::new("modus_tollens", &["P → Q", "¬Q"], "¬P", 0.95, Validity::Deductive)
                .with_evidence(&["propositional calculus"]),
            Rule::new(
                "hypothetical_syllogism",
                &["P → Q", "Q → R"],
                "P → R",
                0.9,
                Validity::Deductive,
            ),
            Rule::new(
                "disjunctive_syllogism",
                &["P ∨ Q", "¬P"],
                "Q",
                0.9,
                Validity::Deductive,
            ),
            Rule::new("simplification", &["P ∧ Q"], "P", 0.98, Validity::Deductive),
            Rule::new("conjunction", &["P", "Q"], "P ∧ Q", 0.92, Validity::Deductive),
            Rule::new(
                "universal_instantiation",
                &["All A are B"],
                "Q",
                0.88,
                Validity::Deductive,
            )
            .with_evidence(&["first-order logic"]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;

    #[test]
    fn modus_ponens_applies_to_conditional_input() {
        let engine = Engine::new(Classical::new());
        engine.initialize().unwrap();
        let result = engine
            .reason("If it rains then the ground is wet. It rains.", None)
            .unwrap();
        assert!(result
            .conclusions
            .iter()
            .any(|c| c.derived_from == "modus_ponens"));
        assert_eq!(result.reasoning.logic, "deductive");
    }

    #[test]
    fn all_seed_rules_valid() {
        for rule in Classical::new().rules() {
            rule.validate().unwrap();
        }
        for op in Classical::new().operators() {
            op.validate().unwrap();
        }
    }

    #[test]
    fn plain_statement_applies_no_deductive_rule() {
        let engine = Engine::new(Classical::new());
        engine.initialize().unwrap();
        let result = engine.reason("The sky is blue.", None).unwrap();
        assert!(result
            .conclusions
            .iter()
            .all(|c| c.derived_from != "modus_ponens"));
    }
}
