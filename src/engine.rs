//! Engine facade: one paradigm's uniform entry point.
//!
//! An [`Engine`] owns a paradigm specialization plus the shared per-engine
//! state: operator table, rule table, metrics, and the bounded proof
//! history. Reasoning calls run the shared pipeline (extract, match,
//! synthesize, score, trace) entirely over call-local data; only the
//! tables (rare administrative writes) and the metrics/history (one update
//! per completed call) are shared across calls.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::context::{ContextUnit, ReasonContext};
use crate::error::{EngineError, PolyResult};
use crate::extract::{self, Extraction};
use crate::metrics::{EngineMetrics, MetricsSnapshot};
use crate::operator::{Operator, OperatorTable};
use crate::outcome::{Reasoning, ReasoningResult};
use crate::paradigm::Paradigm;
use crate::rule::{KeywordBinder, Rule, RuleTable, SlotBinder, match_rules};
use crate::score;
use crate::synth;
use crate::trace::{DEFAULT_HISTORY_CAP, ProofHistory, ProofStep, ProofTrace};

/// Configuration for a paradigm engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Completed traces retained in the proof history ring buffer.
    pub history_cap: usize,
    /// Reject blank input with a typed error instead of degrading to the
    /// neutral baseline.
    pub strict_input: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_cap: DEFAULT_HISTORY_CAP,
            strict_input: false,
        }
    }
}

/// A single paradigm engine.
pub struct Engine<P: Paradigm> {
    paradigm: P,
    config: EngineConfig,
    operators: OperatorTable,
    rules: RuleTable,
    /// Premises added administratively, merged into every call's context.
    premises: RwLock<Vec<ContextUnit>>,
    binder: Box<dyn SlotBinder>,
    metrics: EngineMetrics,
    history: ProofHistory,
    initialized: AtomicBool,
}

impl<P: Paradigm> Engine<P> {
    /// Create an engine with default configuration. Tables stay empty until
    /// [`Engine::initialize`] seeds them.
    pub fn new(paradigm: P) -> Self {
        Self::with_config(paradigm, EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(paradigm: P, config: EngineConfig) -> Self {
        let history = ProofHistory::with_cap(config.history_cap);
        Self {
            paradigm,
            config,
            operators: OperatorTable::new(),
            rules: RuleTable::new(),
            premises: RwLock::new(Vec::new()),
            binder: Box::new(KeywordBinder),
            metrics: EngineMetrics::new(),
            history,
            initialized: AtomicBool::new(false),
        }
    }

    /// Swap the slot binder. The default [`KeywordBinder`] preserves the
    /// pipeline's coarse matching; a stricter unifier can be installed here.
    pub fn with_binder(mut self, binder: Box<dyn SlotBinder>) -> Self {
        self.binder = binder;
        self
    }

    /// Idempotent setup: seed the static operator and rule tables on first
    /// call, reset metrics and history on every call.
    ///
    /// Must be called once before `reason` and its aliases; an uninitialized
    /// engine fails with [`EngineError::NotInitialized`].
    pub fn initialize(&self) -> PolyResult<()> {
        if !self.initialized.load(Ordering::Acquire) {
            for op in self.paradigm.operators() {
                self.operators.add(op)?;
            }
            for rule in self.paradigm.rules() {
                self.rules.add(rule)?;
            }
            tracing::info!(
                paradigm = %self.paradigm.kind(),
                operators = self.operators.len(),
                rules = self.rules.len(),
                "engine initialized"
            );
            self.initialized.store(true, Ordering::Release);
        }
        self.metrics.reset();
        self.history.clear();
        Ok(())
    }

    /// The single per-paradigm reasoning entry point.
    pub fn reason(
        &self,
        input: &str,
        context: Option<&ReasonContext>,
    ) -> PolyResult<ReasoningResult> {
        if !self.initialized.load(Ordering::Acquire) {
            return Err(EngineError::NotInitialized {
                paradigm: self.paradigm.kind().name().to_string(),
            }
            .into());
        }
        if self.config.strict_input && input.trim().is_empty() {
            return Err(EngineError::InvalidInput {
                paradigm: self.paradigm.kind().name().to_string(),
                message: "input text is empty".into(),
            }
            .into());
        }

        // Fold administratively-added premises into the call's context.
        let merged_context = self.merged_context(context);
        let ctx_ref = merged_context.as_ref().or(context);

        let extraction = extract::extract(input, ctx_ref, &self.operators, &self.metrics);

        let mut trace = ProofTrace::new();
        for unit in &extraction.units {
            trace.premise(
                format!("[{}] {}", unit.kind, unit.text),
                unit.confidence,
            );
        }

        let rules = self.rules.snapshot();
        let matched = match_rules(&rules, &extraction, self.binder.as_ref());
        let synthesis = synth::synthesize(&matched, &extraction, self.binder.as_ref(), &mut trace);

        let rule_term = self.rule_term(&matched, &extraction);
        let confidence = score::confidence(
            self.paradigm.weights(),
            &extraction,
            rule_term,
            input.len(),
        );
        let uncertainty =
            score::uncertainty(self.paradigm.uncertainty_kind(), input, &extraction);

        let augmentation =
            self.paradigm
                .augment(input, &extraction, ctx_ref, &mut trace);

        let mut conclusions = synthesis.conclusions;
        conclusions.extend(augmentation.conclusions);
        let mut evidence = synthesis.evidence;
        evidence.extend(augmentation.evidence);

        let result = ReasoningResult {
            confidence,
            reasoning: Reasoning {
                steps: trace.steps().to_vec(),
                logic: self.paradigm.logic_label().to_string(),
                evidence,
                assumptions: extraction.assumption_texts(),
            },
            conclusions,
            uncertainty,
            alternatives: augmentation.alternatives,
        };

        self.metrics
            .record_call(result.confidence, &synthesis.applied, &extraction.operators);
        self.history.archive(trace.into_steps());

        tracing::debug!(
            paradigm = %self.paradigm.kind(),
            confidence = result.confidence,
            conclusions = result.conclusions.len(),
            "reasoning call complete"
        );

        Ok(result)
    }

    /// Paradigm-idiom alias for [`Engine::reason`].
    pub fn infer(&self, input: &str, context: Option<&ReasonContext>) -> PolyResult<ReasoningResult> {
        self.reason(input, context)
    }

    /// Paradigm-idiom alias for [`Engine::reason`].
    pub fn solve(&self, input: &str, context: Option<&ReasonContext>) -> PolyResult<ReasoningResult> {
        self.reason(input, context)
    }

    /// Paradigm-idiom alias for [`Engine::reason`].
    pub fn decide(&self, input: &str, context: Option<&ReasonContext>) -> PolyResult<ReasoningResult> {
        self.reason(input, context)
    }

    /// Deterministic argument validation: do the premises, under the current
    /// rule table, support the conclusion?
    ///
    /// Idempotent by construction: it reads only the tables and its
    /// arguments, never the history.
    pub fn validate_argument(&self, premises: &[&str], conclusion: &str) -> PolyResult<bool> {
        if !self.initialized.load(Ordering::Acquire) {
            return Err(EngineError::NotInitialized {
                paradigm: self.paradigm.kind().name().to_string(),
            }
            .into());
        }
        if !synth::is_well_formed(conclusion) {
            return Ok(false);
        }

        let text = premises.join(" ");
        let extraction = extract::extract(&text, None, &self.operators, &self.metrics);
        let rules = self.rules.snapshot();
        let matched = match_rules(&rules, &extraction, self.binder.as_ref());
        if matched.is_empty() {
            return Ok(false);
        }

        let conclusion_lower = conclusion.to_lowercase();
        let supported = matched.iter().any(|rule| {
            let instantiated = synth::instantiate(&rule.consequent, &extraction).to_lowercase();
            shares_content_word(&instantiated, &conclusion_lower)
        });
        Ok(supported)
    }

    // -----------------------------------------------------------------------
    // Administrative mutators
    // -----------------------------------------------------------------------

    /// Append a rule to the static table.
    pub fn add_rule(&self, rule: Rule) -> PolyResult<()> {
        self.rules.add(rule)
    }

    /// Insert or replace an operator in the static table.
    pub fn add_operator(&self, operator: Operator) -> PolyResult<()> {
        self.operators.add(operator)
    }

    /// Register a standing premise, merged into every subsequent call.
    pub fn add_premise(&self, premise: ContextUnit) {
        self.premises
            .write()
            .expect("premise store poisoned")
            .push(premise);
    }

    // -----------------------------------------------------------------------
    // Read accessors
    // -----------------------------------------------------------------------

    /// Read-only snapshot of the running counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Bounded snapshot of archived proof traces, oldest first.
    pub fn proof_history(&self) -> Vec<Vec<ProofStep>> {
        self.history.snapshot()
    }

    /// Alias for [`Engine::proof_history`], matching the inference-chain
    /// accessor some callers use.
    pub fn inference_chains(&self) -> Vec<Vec<ProofStep>> {
        self.proof_history()
    }

    /// The paradigm specialization, for paradigm-specific mutators
    /// (`add_temporal_event`, `add_quantum_state`, …).
    pub fn paradigm(&self) -> &P {
        &self.paradigm
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether `initialize` has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    // -----------------------------------------------------------------------

    fn merged_context(&self, context: Option<&ReasonContext>) -> Option<ReasonContext> {
        let premises = self.premises.read().expect("premise store poisoned");
        if premises.is_empty() {
            return None;
        }
        let mut merged = context.cloned().unwrap_or_default();
        merged.units.extend(premises.iter().cloned());
        Some(merged)
    }

    fn rule_term(&self, matched: &[&Rule], extraction: &Extraction) -> Option<f64> {
        if self.paradigm.operator_driven() {
            self.operators.mean_strength(&extraction.operators)
        } else if matched.is_empty() {
            None
        } else {
            Some(matched.iter().map(|r| r.confidence).sum::<f64>() / matched.len() as f64)
        }
    }
}

impl<P: Paradigm> std::fmt::Debug for Engine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("paradigm", &self.paradigm.kind())
            .field("operators", &self.operators.len())
            .field("rules", &self.rules.len())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

fn shares_content_word(a: &str, b: &str) -> bool {
    a.split_whitespace()
        .filter(|w| w.len() > 2)
        .any(|w| b.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paradigm::Classical;

    fn classical_engine() -> Engine<Classical> {
        let engine = Engine::new(Classical::new());
        engine.initialize().unwrap();
        engine
    }

    #[test]
    fn reason_before_initialize_fails() {
        let engine = Engine::new(Classical::new());
        let err = engine.reason("It rains.", None).unwrap_err();
        assert!(format!("{err}").contains("not initialized"));
    }

    #[test]
    fn initialize_is_idempotent() {
        let engine = Engine::new(Classical::new());
        engine.initialize().unwrap();
        let rules_before = engine.rules.len();
        engine.initialize().unwrap();
        assert_eq!(engine.rules.len(), rules_before);
        assert_eq!(engine.metrics().calls, 0);
    }

    #[test]
    fn strict_input_rejects_blank() {
        let engine = Engine::with_config(
            Classical::new(),
            EngineConfig {
                strict_input: true,
                ..Default::default()
            },
        );
        engine.initialize().unwrap();
        let err = engine.reason("   ", None).unwrap_err();
        assert!(format!("{err}").contains("invalid input"));
    }

    #[test]
    fn lenient_input_degrades_to_neutral() {
        let engine = classical_engine();
        let result = engine.reason("", None).unwrap();
        assert_eq!(result.confidence, 0.5);
        assert!(!result.uncertainty.parameters.is_empty());
    }

    #[test]
    fn modus_ponens_end_to_end() {
        let engine = classical_engine();
        let result = engine
            .reason("If it rains then the ground is wet. It rains.", None)
            .unwrap();
        assert!(!result.conclusions.is_empty());
        assert!(result
            .conclusions
            .iter()
            .any(|c| c.derived_from == "modus_ponens"));
        assert!((0.0..=1.0).contains(&result.confidence));
    }

    #[test]
    fn metrics_and_history_update_per_call() {
        let engine = classical_engine();
        engine
            .reason("If it rains then the ground is wet. It rains.", None)
            .unwrap();
        let snap = engine.metrics();
        assert_eq!(snap.calls, 1);
        assert_eq!(snap.processed, 1);
        assert!(snap.rules_applied >= 1);
        assert_eq!(engine.proof_history().len(), 1);
    }

    #[test]
    fn determinism_same_input_same_result() {
        let engine = classical_engine();
        let input = "If it rains then the ground is wet. It rains.";
        let a = engine.reason(input, None).unwrap();
        let b = engine.reason(input, None).unwrap();
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(
            a.conclusions.iter().map(|c| &c.statement).collect::<Vec<_>>(),
            b.conclusions.iter().map(|c| &c.statement).collect::<Vec<_>>()
        );
    }

    #[test]
    fn standing_premises_merge_into_calls() {
        let engine = classical_engine();
        engine.add_premise(ContextUnit::statement("the street floods when wet"));
        let result = engine.reason("It rains.", None).unwrap();
        assert!(result
            .reasoning
            .steps
            .iter()
            .any(|s| s.content.contains("street floods")));
    }

    #[test]
    fn validate_argument_idempotent() {
        let engine = classical_engine();
        let premises = ["If it rains then the ground is wet.", "It rains."];
        let first = engine
            .validate_argument(&premises, "the ground is wet")
            .unwrap();
        let second = engine
            .validate_argument(&premises, "the ground is wet")
            .unwrap();
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn validate_argument_rejects_unsupported() {
        let engine = classical_engine();
        let ok = engine
            .validate_argument(&["The sky is blue."], "the moon is cheese")
            .unwrap();
        assert!(!ok);
    }

    #[test]
    fn proof_step_indices_strictly_increasing() {
        let engine = classical_engine();
        let result = engine
            .reason("If it rains then the ground is wet. It rains.", None)
            .unwrap();
        let steps = &result.reasoning.steps;
        assert!(steps.windows(2).all(|w| w[0].index + 1 == w[1].index));
    }
}
