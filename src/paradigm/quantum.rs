//! Quantum-inspired reasoning: superposed hypotheses and seeded collapse.
//!
//! Units become amplitude-weighted states whose squared amplitudes sum to 1.
//! A measurement cue collapses the superposition by sampling a single state
//! with the Born-rule probabilities; without one the superposition is
//! reported intact. The RNG is seedable, per instance or per call, so
//! collapse is reproducible under test.

use std::f64::consts::PI;
use std::sync::{Mutex, RwLock};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
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
use crate::unit::UnitKind;

const MEASUREMENT_CUES: &[&str] = &["measure", "measured", "observe", "observed"];
const SUPERPOSITION_CUES: &[&str] = &["superposition", "both", "simultaneously", "at the same time"];
const ENTANGLEMENT_CUES: &[&str] = &["entangled", "correlated", "linked"];

/// One amplitude-weighted hypothesis state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantumState {
    /// State label, taken from the source unit text.
    pub label: String,
    /// Amplitude in [0, 1]; squared amplitudes over a call sum to 1.
    pub amplitude: f64,
    /// Phase in radians (π for negated content, 0 otherwise).
    pub phase: f64,
    /// Whether the state is explicitly marked as superposed.
    pub superposition: bool,
    /// Labels of states this one is entangled with.
    pub entangled_with: Vec<String>,
}

impl QuantumState {
    /// Born-rule probability of observing this state.
    pub fn probability(&self) -> f64 {
        self.amplitude * self.amplitude
    }
}

/// Outcome of collapsing a superposition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantumMeasurement {
    /// Label of the observed state.
    pub result: String,
    /// Probability the sampled state carried.
    pub probability: f64,
    /// Whether a collapse actually happened this call.
    pub collapsed: bool,
}

/// The quantum-inspired paradigm.
#[derive(Debug)]
pub struct Quantum {
    rng: Mutex<StdRng>,
    /// Administratively-added states, merged into every call's register.
    seeded_states: RwLock<Vec<QuantumState>>,
}

impl Default for Quantum {
    fn default() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            seeded_states: RwLock::new(Vec::new()),
        }
    }
}

impl Quantum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build with a fixed RNG seed so collapse is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            seeded_states: RwLock::new(Vec::new()),
        }
    }

    /// Administrative mutation: register a standing state.
    ///
    /// Standing states join the register before normalization, so their
    /// amplitudes are rescaled together with the input-derived ones.
    pub fn add_quantum_state(&self, state: QuantumState) {
        self.seeded_states
            .write()
            .expect("quantum state store poisoned")
            .push(state);
    }

    /// Build the normalized state register for one extraction.
    pub fn build_states(&self, extraction: &Extraction) -> Vec<QuantumState> {
        let mut states: Vec<QuantumState> = extraction
            .units
            .iter()
            .map(|unit| {
                let lowered = unit.lowered();
                QuantumState {
                    label: unit.text.clone(),
                    amplitude: unit.confidence.max(f64::EPSILON),
                    phase: if unit.kind == UnitKind::Negative { PI } else { 0.0 },
                    superposition: SUPERPOSITION_CUES.iter().any(|c| lowered.contains(c)),
                    entangled_with: Vec::new(),
                }
            })
            .collect();
        states.extend(
            self.seeded_states
                .read()
                .expect("quantum state store poisoned")
                .iter()
                .cloned(),
        );

        // Normalize so squared amplitudes sum to 1.
        let norm: f64 = states.iter().map(|s| s.amplitude * s.amplitude).sum::<f64>().sqrt();
        if norm > 0.0 {
            for state in &mut states {
                state.amplitude /= norm;
            }
        }

        // An entanglement cue anywhere links every state with every other.
        let entangled = extraction
            .units
            .iter()
            .any(|u| ENTANGLEMENT_CUES.iter().any(|c| u.lowered().contains(c)));
        if entangled && states.len() > 1 {
            let labels: Vec<String> = states.iter().map(|s| s.label.clone()).collect();
            for state in &mut states {
                state.entangled_with =
                    labels.iter().filter(|l| **l != state.label).cloned().collect();
            }
        }

        states
    }

    /// Collapse the register: sample one state by its Born-rule probability.
    pub fn measure(&self, states: &[QuantumState], seed: Option<u64>) -> Option<QuantumMeasurement> {
        if states.is_empty() {
            return None;
        }
        let draw: f64 = match seed {
            Some(s) => StdRng::seed_from_u64(s).gen_range(0.0..1.0),
            None => self.rng.lock().expect("quantum rng poisoned").gen_range(0.0..1.0),
        };

        let mut cumulative = 0.0;
        for state in states {
            cumulative += state.probability();
            if draw < cumulative {
                return Some(QuantumMeasurement {
                    result: state.label.clone(),
                    probability: state.probability(),
                    collapsed: true,
                });
            }
        }
        // Rounding slack: fall back to the last state.
        states.last().map(|s| QuantumMeasurement {
            result: s.label.clone(),
            probability: s.probability(),
            collapsed: true,
        })
    }
}

impl Paradigm for Quantum {
    fn kind(&self) -> ParadigmKind {
        ParadigmKind::Quantum
    }

    fn logic_label(&self) -> &'static str {
        "quantum"
    }

    fn uncertainty_kind(&self) -> &'static str {
        "quantum"
    }

    fn weights(&self) -> ScoreWeights {
        ScoreWeights::OPERATOR_DRIVEN
    }

    fn operator_driven(&self) -> bool {
        true
    }

    fn operators(&self) -> Vec<Operator> {
        vec![
            Operator::new("SUPERPOSITION", "Ψ", 0.7, SUPERPOSITION_CUES),
            Operator::new("ENTANGLEMENT", "⊗", 0.8, ENTANGLEMENT_CUES),
            Operator::new("MEASUREMENT", "M", 0.9, MEASUREMENT_CUES),
            Operator::new("INTERFERENCE", "Φ", 0.6, &["interfere", "interference", "cancels out"]),
        ]
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new(
                "measurement_collapse",
                &["X is measured"],
                "P takes a definite value",
                0.85,
                Validity::Heuristic,
            ),
            Rule::new(
                "superposition_persistence",
                &["X in superposition"],
                "P remains indefinite until measured",
                0.75,
                Validity::Heuristic,
            ),
            Rule::new(
                "entanglement_correlation",
                &["X entangled with Y"],
                "P and Q share one joint state",
                0.8,
                Validity::Heuristic,
            ),
        ]
    }

    fn augment(
        &self,
        input: &str,
        extraction: &Extraction,
        context: Option<&ReasonContext>,
        trace: &mut ProofTrace,
    ) -> Augmentation {
        let mut augmentation = Augmentation::default();

        let states = self.build_states(extraction);
        for state in &states {
            trace.push(
                StepKind::Inference,
                format!("state '{}' amplitude {:.3}", state.label, state.amplitude),
                "amplitude from unit confidence, normalized over the register".to_string(),
                state.probability(),
            );
            augmentation.alternatives.push(
                Alternative::new(format!("observe '{}'", state.label), state.probability())
                    .with_detail("amplitude", Value::from(state.amplitude))
                    .with_detail("phase", Value::from(state.phase))
                    .with_detail("entangled_with", Value::from(state.entangled_with.clone())),
            );
        }

        let lowered = input.to_lowercase();
        let measured = MEASUREMENT_CUES.iter().any(|c| lowered.contains(c));
        if measured {
            let seed = context.and_then(|c| c.seed);
            if let Some(measurement) = self.measure(&states, seed) {
                trace.push(
                    StepKind::Inference,
                    format!("collapse to '{}'", measurement.result),
                    "measurement cue triggered Born-rule sampling".to_string(),
                    measurement.probability,
                );
                augmentation.conclusions.push(Conclusion {
                    statement: format!("measurement collapsed to '{}'", measurement.result),
                    confidence: measurement.probability,
                    derived_from: "measurement_collapse".into(),
                    validity: Validity::Heuristic.label().to_string(),
                });
            }
        } else if states.len() > 1 {
            augmentation
                .evidence
                .push(format!("superposition of {} states left uncollapsed", states.len()));
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
        let table = OperatorTable::seeded(Quantum::new().operators()).unwrap();
        crate::extract::extract(text, None, &table, &EngineMetrics::new())
    }

    #[test]
    fn amplitudes_normalize_to_unit_probability() {
        let quantum = Quantum::with_seed(7);
        let states = quantum.build_states(&extraction_of(
            "The cat is alive. The cat is dead. The box stays shut.",
        ));
        let total: f64 = states.iter().map(QuantumState::probability).sum();
        assert_eq!(states.len(), 3);
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn negated_unit_carries_pi_phase() {
        let quantum = Quantum::with_seed(7);
        let states = quantum.build_states(&extraction_of("The detector is not ready."));
        assert!((states[0].phase - PI).abs() < 1e-9);
    }

    #[test]
    fn same_seed_same_collapse() {
        let quantum = Quantum::new();
        let states = quantum.build_states(&extraction_of(
            "The spin is up. The spin is down.",
        ));
        let a = quantum.measure(&states, Some(42)).unwrap();
        let b = quantum.measure(&states, Some(42)).unwrap();
        assert_eq!(a.result, b.result);
        assert!(a.collapsed);
    }

    #[test]
    fn no_measurement_cue_leaves_superposition_intact() {
        let engine = Engine::new(Quantum::with_seed(1));
        engine.initialize().unwrap();
        let result = engine
            .reason("The spin is up. The spin is down.", None)
            .unwrap();
        assert!(result
            .conclusions
            .iter()
            .all(|c| c.derived_from != "measurement_collapse"));
        assert!(result
            .reasoning
            .evidence
            .iter()
            .any(|e| e.contains("uncollapsed")));
    }

    #[test]
    fn measurement_cue_collapses_with_context_seed() {
        let engine = Engine::new(Quantum::new());
        engine.initialize().unwrap();
        let ctx = ReasonContext::new().with_seed(99);
        let first = engine
            .reason("The spin is up. The spin is down. The spin is measured.", Some(&ctx))
            .unwrap();
        let second = engine
            .reason("The spin is up. The spin is down. The spin is measured.", Some(&ctx))
            .unwrap();

        let pick = |r: &crate::outcome::ReasoningResult| {
            r.conclusions
                .iter()
                .find(|c| c.statement.starts_with("measurement collapsed to"))
                .map(|c| c.statement.clone())
        };
        assert!(pick(&first).is_some());
        assert_eq!(pick(&first), pick(&second));
    }

    #[test]
    fn entanglement_links_all_states() {
        let quantum = Quantum::with_seed(3);
        let states = quantum.build_states(&extraction_of(
            "The photons are entangled. One photon is here. One photon is there.",
        ));
        assert!(states.iter().all(|s| s.entangled_with.len() == states.len() - 1));
    }

    #[test]
    fn standing_state_joins_register() {
        let quantum = Quantum::with_seed(3);
        quantum.add_quantum_state(QuantumState {
            label: "ancilla".into(),
            amplitude: 0.9,
            phase: 0.0,
            superposition: false,
            entangled_with: Vec::new(),
        });
        let states = quantum.build_states(&Extraction::default());
        assert_eq!(states.len(), 1);
        assert!((states[0].probability() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn all_seed_tables_valid() {
        for rule in Quantum::new().rules() {
            rule.validate().unwrap();
        }
        for op in Quantum::new().operators() {
            op.validate().unwrap();
        }
    }
}
