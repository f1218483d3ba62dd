//! Problem-solving: goals, obstacles, resources, and a means-ends plan.
//!
//! Units are scanned independently for goal, obstacle, and resource cues
//! (one unit may be several at once: "I want to finish but I lack time").
//! The augment hook assembles a plan per goal: clarify, mitigate each
//! obstacle, apply each resource, act. Plan steps become alternatives with
//! decaying feasibility.

use serde_json::Value;

use crate::context::ReasonContext;
use crate::extract::Extraction;
use crate::operator::Operator;
use crate::outcome::{Alternative, Conclusion};
use crate::paradigm::{Augmentation, Paradigm, ParadigmKind};
use crate::rule::{Rule, Validity};
use crate::score::ScoreWeights;
use crate::trace::{ProofTrace, StepKind};
use crate::unit::Unit;

const GOAL_CUES: &[&str] = &["goal", "want to", "need to", "aim to", "trying to"];
const OBSTACLE_CUES: &[&str] = &["but ", "however", "problem", "obstacle", "blocked", "lack"];
const RESOURCE_CUES: &[&str] = &["have ", "available", "resource", "can use", "tool"];

const FEASIBILITY_START: f64 = 0.9;
const FEASIBILITY_DECAY: f64 = 0.1;
const FEASIBILITY_FLOOR: f64 = 0.3;

/// The problem-solving paradigm.
#[derive(Debug, Default)]
pub struct Solver;

impl Solver {
    pub fn new() -> Self {
        Self
    }

    fn units_with<'a>(extraction: &'a Extraction, cues: &'static [&str]) -> Vec<&'a Unit> {
        extraction
            .units
            .iter()
            .filter(|u| {
                let lowered = u.lowered();
                cues.iter().any(|c| lowered.contains(c))
            })
            .collect()
    }

    /// Goal-bearing units.
    pub fn goals<'a>(extraction: &'a Extraction) -> Vec<&'a Unit> {
        Self::units_with(extraction, GOAL_CUES)
    }

    /// Obstacle-bearing units.
    pub fn obstacles<'a>(extraction: &'a Extraction) -> Vec<&'a Unit> {
        Self::units_with(extraction, OBSTACLE_CUES)
    }

    /// Resource-bearing units.
    pub fn resources<'a>(extraction: &'a Extraction) -> Vec<&'a Unit> {
        Self::units_with(extraction, RESOURCE_CUES)
    }

    /// Means-ends plan for one goal: clarify, mitigate, apply, act.
    pub fn plan_steps(goal: &Unit, obstacles: &[&Unit], resources: &[&Unit]) -> Vec<String> {
        let mut steps = vec![format!("clarify the goal: {}", goal.text)];
        for obstacle in obstacles {
            steps.push(format!("mitigate: {}", obstacle.text));
        }
        for resource in resources {
            steps.push(format!("use: {}", resource.text));
        }
        steps.push(format!("act toward: {}", goal.text));
        steps
    }
}

impl Paradigm for Solver {
    fn kind(&self) -> ParadigmKind {
        ParadigmKind::Solver
    }

    fn logic_label(&self) -> &'static str {
        "means-ends"
    }

    fn uncertainty_kind(&self) -> &'static str {
        "epistemic"
    }

    fn weights(&self) -> ScoreWeights {
        ScoreWeights::RULE_BASED
    }

    fn operators(&self) -> Vec<Operator> {
        vec![
            Operator::new("GOAL", "⊳", 0.8, GOAL_CUES),
            Operator::new("OBSTACLE", "⊘", 0.6, OBSTACLE_CUES).with_dual("RESOURCE"),
            Operator::new("RESOURCE", "⊞", 0.7, RESOURCE_CUES).with_dual("OBSTACLE"),
            Operator::new("STRATEGY", "§", 0.7, &["plan", "strategy", "approach", "method"]),
        ]
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new(
                "means_ends",
                &["X want Y"],
                "reduce the gap between the current state and P",
                0.8,
                Validity::Heuristic,
            )
            .with_evidence(&["means-ends analysis"]),
            Rule::new(
                "obstacle_removal",
                &["X but Y"],
                "address the obstacle before pursuing P",
                0.75,
                Validity::Heuristic,
            ),
            Rule::new(
                "resource_application",
                &["X have Y"],
                "apply available resources toward P",
                0.7,
                Validity::Heuristic,
            ),
            Rule::new(
                "goal_decomposition",
                &["X need Y"],
                "split P into smaller subgoals",
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

        let goals = Self::goals(extraction);
        let obstacles = Self::obstacles(extraction);
        let resources = Self::resources(extraction);

        for goal in &goals {
            let steps = Self::plan_steps(goal, &obstacles, &resources);
            for (i, step) in steps.iter().enumerate() {
                let feasibility =
                    (FEASIBILITY_START - i as f64 * FEASIBILITY_DECAY).max(FEASIBILITY_FLOOR);
                trace.push(
                    StepKind::Inference,
                    format!("plan step {}: {step}", i + 1),
                    "means-ends decomposition".to_string(),
                    feasibility,
                );
                augmentation.alternatives.push(
                    Alternative::new(step.clone(), feasibility)
                        .with_detail("step", Value::from(i as u64 + 1)),
                );
            }
            augmentation.conclusions.push(Conclusion {
                statement: format!("a {}-step plan leads to '{}'", steps.len(), goal.text),
                confidence: goal.confidence,
                derived_from: "means_ends_analysis".into(),
                validity: Validity::Heuristic.label().to_string(),
            });
        }

        if !goals.is_empty() {
            augmentation.evidence.push(format!(
                "{} goal(s), {} obstacle(s), {} resource(s)",
                goals.len(),
                obstacles.len(),
                resources.len()
            ));
        }

        augmentation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::metrics::EngineMetrics;
    use crate::operator::OperatorTable;

    fn extraction_of(text: &str) -> Extraction {
        let table = OperatorTable::seeded(Solver::new().operators()).unwrap();
        crate::extract::extract(text, None, &table, &EngineMetrics::new())
    }

    #[test]
    fn goals_obstacles_resources_scanned_independently() {
        let extraction = extraction_of(
            "I want to finish the thesis but I lack time. I have a quiet week available.",
        );
        assert_eq!(Solver::goals(&extraction).len(), 1);
        assert_eq!(Solver::obstacles(&extraction).len(), 1);
        assert_eq!(Solver::resources(&extraction).len(), 1);
    }

    #[test]
    fn plan_covers_obstacles_and_resources() {
        let extraction = extraction_of(
            "I want to finish the thesis but I lack time. I have a quiet week available.",
        );
        let goals = Solver::goals(&extraction);
        let steps = Solver::plan_steps(
            goals[0],
            &Solver::obstacles(&extraction),
            &Solver::resources(&extraction),
        );
        // clarify + 1 mitigate + 1 use + act
        assert_eq!(steps.len(), 4);
        assert!(steps[1].starts_with("mitigate:"));
        assert!(steps[2].starts_with("use:"));
    }

    #[test]
    fn plan_reported_through_engine() {
        let engine = Engine::new(Solver::new());
        engine.initialize().unwrap();
        let result = engine
            .reason(
                "I want to finish the thesis but I lack time. I have a quiet week available.",
                None,
            )
            .unwrap();
        assert!(result
            .conclusions
            .iter()
            .any(|c| c.derived_from == "means_ends_analysis"));
        assert!(result.alternatives.len() >= 4);
        assert_eq!(result.reasoning.logic, "means-ends");
    }

    #[test]
    fn no_goal_no_plan() {
        let engine = Engine::new(Solver::new());
        engine.initialize().unwrap();
        let result = engine.reason("The sky is blue.", None).unwrap();
        assert!(result
            .conclusions
            .iter()
            .all(|c| c.derived_from != "means_ends_analysis"));
    }

    #[test]
    fn all_seed_tables_valid() {
        for rule in Solver::new().rules() {
            rule.validate().unwrap();
        }
        for op in Solver::new().operators() {
            op.validate().unwrap();
        }
    }
}
