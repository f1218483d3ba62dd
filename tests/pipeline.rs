//! End-to-end tests for the polylogos reasoning pipeline.
//!
//! These exercise the full extract → match → synthesize → score → trace
//! path through the public engine and registry APIs, across all eight
//! paradigms, validating the result contract every caller relies on.

use polylogos::context::{ContextUnit, ReasonContext};
use polylogos::engine::{Engine, EngineConfig};
use polylogos::outcome::ReasoningResult;
use polylogos::paradigm::{Classical, ParadigmKind, Quantum, Temporal};
use polylogos::registry::EngineRegistry;
use polylogos::trace::StepKind;

const INPUTS: &[&str] = &[
    "",
    "   ",
    "...",
    "The sky is blue.",
    "If it rains then the ground is wet. It rains.",
    "Maybe the soup is very hot?",
    "All dogs are mammals. Rex is a dog.",
    "It must rain. It might snow.",
    "I will finish the report. I finished the plan.",
    "There is a 70% chance of rain.",
    "The spin is up. The spin is down. The spin is measured.",
    "We could take the train or take the bus. The bus is risky.",
    "I want to finish the thesis but I lack time.",
];

fn assert_result_contract(result: &ReasoningResult) {
    assert!((0.0..=1.0).contains(&result.confidence));
    assert!((0.0..=1.0).contains(&result.uncertainty.level()));
    assert!((0.0..=1.0).contains(&result.uncertainty.confidence));
    assert!(result.uncertainty.parameters.contains_key("level"));
    for conclusion in &result.conclusions {
        assert!((0.0..=1.0).contains(&conclusion.confidence));
        assert!(!conclusion.statement.trim().is_empty());
    }
    for alternative in &result.alternatives {
        assert!((0.0..=1.0).contains(&alternative.probability));
    }
    for step in &result.reasoning.steps {
        assert!((0.0..=1.0).contains(&step.confidence));
    }
    // Step indices are dense and strictly increasing.
    for (i, step) in result.reasoning.steps.iter().enumerate() {
        assert_eq!(step.index, i);
    }
}

#[test]
fn every_paradigm_honors_the_result_contract_on_every_input() {
    let registry = EngineRegistry::with_defaults().unwrap();
    let ctx = ReasonContext::new().with_seed(7);
    for kind in ParadigmKind::ALL {
        for input in INPUTS {
            let result = registry
                .reason_with(kind, input, Some(&ctx))
                .unwrap_or_else(|e| panic!("{kind} failed on {input:?}: {e}"));
            assert_result_contract(&result);
        }
    }
}

#[test]
fn degenerate_input_never_errors_and_scores_neutral() {
    let registry = EngineRegistry::with_defaults().unwrap();
    for kind in ParadigmKind::ALL {
        for input in ["", "   ", "..."] {
            let result = registry.reason_with(kind, input, None).unwrap();
            assert_eq!(result.confidence, 0.5, "{kind} on {input:?}");
            assert!(result.conclusions.is_empty());
        }
    }
}

#[test]
fn uninitialized_engine_refuses_every_operation() {
    let engine = Engine::new(Classical::new());
    assert!(engine.reason("It rains.", None).is_err());
    assert!(engine.validate_argument(&["It rains."], "it rains").is_err());
}

#[test]
fn classical_modus_ponens_contract() {
    let engine = Engine::new(Classical::new());
    engine.initialize().unwrap();
    let result = engine
        .reason("If it rains then the ground is wet. It rains.", None)
        .unwrap();

    // Premise steps come first and name the unit kinds.
    assert_eq!(result.reasoning.steps[0].kind, StepKind::Premise);
    assert!(result.reasoning.steps[0].content.contains("[conditional]"));

    // modus_ponens fires and its conclusion is positionally instantiated.
    let mp = result
        .conclusions
        .iter()
        .find(|c| c.derived_from == "modus_ponens")
        .expect("modus_ponens should fire");
    assert_eq!(mp.validity, "deductive");
    assert!(mp.statement.contains("It rains"));
}

#[test]
fn repeated_calls_are_deterministic_for_non_random_paradigms() {
    let registry = EngineRegistry::with_defaults().unwrap();
    for kind in [
        ParadigmKind::Classical,
        ParadigmKind::Fuzzy,
        ParadigmKind::Probabilistic,
        ParadigmKind::Decision,
        ParadigmKind::Solver,
    ] {
        let input = "If it rains then the ground is wet. It probably rains or it snows.";
        let a = registry.reason_with(kind, input, None).unwrap();
        let b = registry.reason_with(kind, input, None).unwrap();
        assert_eq!(a.confidence, b.confidence, "{kind}");
        assert_eq!(a.conclusions.len(), b.conclusions.len(), "{kind}");
    }
}

#[test]
fn quantum_collapse_reproducible_under_fixed_seed() {
    let engine = Engine::new(Quantum::with_seed(1234));
    engine.initialize().unwrap();
    let ctx = ReasonContext::new().with_seed(1234);
    let input = "The spin is up. The spin is down. The spin is measured.";

    let pick = |r: &ReasoningResult| {
        r.conclusions
            .iter()
            .find(|c| c.statement.starts_with("measurement collapsed to"))
            .map(|c| c.statement.clone())
    };
    let a = pick(&engine.reason(input, Some(&ctx)).unwrap());
    let b = pick(&engine.reason(input, Some(&ctx)).unwrap());
    assert!(a.is_some());
    assert_eq!(a, b);
}

#[test]
fn temporal_scenario_orders_future_after_past() {
    let now = chrono::DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let engine = Engine::new(Temporal::new());
    engine.initialize().unwrap();
    let ctx = ReasonContext::new().with_now(now);

    let result = engine
        .reason("I will finish the report. I finished the plan.", Some(&ctx))
        .unwrap();
    let ordering = result
        .conclusions
        .iter()
        .find(|c| c.derived_from == "temporal_ordering")
        .expect("ordering conclusion");
    assert!(ordering.statement.contains("report"));
    assert!(ordering.statement.contains("occurs after"));
    assert!(ordering.statement.contains("plan"));
}

#[test]
fn proof_history_is_bounded_by_config() {
    let engine = Engine::with_config(
        Classical::new(),
        EngineConfig {
            history_cap: 2,
            ..Default::default()
        },
    );
    engine.initialize().unwrap();
    for _ in 0..5 {
        engine.reason("It rains.", None).unwrap();
    }
    assert_eq!(engine.proof_history().len(), 2);
    assert_eq!(engine.metrics().calls, 5);
}

#[test]
fn validate_argument_is_idempotent_and_stateless() {
    let engine = Engine::new(Classical::new());
    engine.initialize().unwrap();
    let premises = ["If it rains then the ground is wet.", "It rains."];

    let history_before = engine.proof_history().len();
    let first = engine.validate_argument(&premises, "the ground is wet").unwrap();
    let second = engine.validate_argument(&premises, "the ground is wet").unwrap();
    assert!(first);
    assert_eq!(first, second);
    // Validation never archives proof traces.
    assert_eq!(engine.proof_history().len(), history_before);
}

#[test]
fn added_rule_participates_in_subsequent_calls() {
    let engine = Engine::new(Classical::new());
    engine.initialize().unwrap();
    engine
        .add_rule(polylogos::rule::Rule::new(
            "weather_heuristic",
            &["P → Q"],
            "carry an umbrella",
            0.6,
            polylogos::rule::Validity::Heuristic,
        ))
        .unwrap();

    let result = engine
        .reason("If it rains then the ground is wet.", None)
        .unwrap();
    assert!(result
        .conclusions
        .iter()
        .any(|c| c.derived_from == "weather_heuristic"));
}

#[test]
fn standing_premises_survive_across_calls() {
    let engine = Engine::new(Classical::new());
    engine.initialize().unwrap();
    engine.add_premise(ContextUnit::statement("the street floods when wet"));

    for _ in 0..2 {
        let result = engine.reason("It rains.", None).unwrap();
        assert!(result
            .reasoning
            .steps
            .iter()
            .any(|s| s.content.contains("street floods")));
    }
}

#[test]
fn assumptions_surface_in_reasoning_block() {
    let registry = EngineRegistry::with_defaults().unwrap();
    let result = registry
        .reason_with(
            ParadigmKind::Classical,
            "Suppose the lemma holds. The theorem follows.",
            None,
        )
        .unwrap();
    assert_eq!(result.reasoning.assumptions.len(), 1);
    assert!(result.reasoning.assumptions[0].contains("lemma"));
}

#[test]
fn result_serializes_to_the_wire_shape() {
    let registry = EngineRegistry::with_defaults().unwrap();
    let result = registry
        .reason_with(
            ParadigmKind::Classical,
            "If it rains then the ground is wet. It rains.",
            None,
        )
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    for field in ["confidence", "reasoning", "conclusions", "uncertainty", "alternatives"] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(json["uncertainty"]["type"], "epistemic");
    assert!(json["reasoning"]["steps"].is_array());

    // And back: the result round-trips through its own JSON.
    let back: ReasoningResult = serde_json::from_value(json).unwrap();
    assert_eq!(back.conclusions.len(), result.conclusions.len());
}

#[test]
fn hedged_input_raises_uncertainty_not_confidence_complement() {
    let registry = EngineRegistry::with_defaults().unwrap();
    let plain = registry
        .reason_with(ParadigmKind::Classical, "The ground is wet.", None)
        .unwrap();
    let hedged = registry
        .reason_with(ParadigmKind::Classical, "Maybe the ground is wet.", None)
        .unwrap();

    assert!(hedged.uncertainty.level() > plain.uncertainty.level());
    // The two axes are independent: confidence plus uncertainty level does
    // not need to sum to one.
    assert!((hedged.confidence + hedged.uncertainty.level() - 1.0).abs() > 1e-9);
}
