//! The engine registry: uniform dispatch over all eight paradigms.
//!
//! [`Engine`] is generic over its paradigm so paradigm-specific mutators
//! stay statically typed; the registry erases that parameter behind the
//! object-safe [`ReasonEngine`] trait for callers that pick a paradigm at
//! runtime (CLI, service layer).

use std::sync::Arc;

use dashmap::DashMap;

use crate::context::{ContextUnit, ReasonContext};
use crate::engine::Engine;
use crate::error::{PolyResult, RegistryError};
use crate::metrics::MetricsSnapshot;
use crate::operator::Operator;
use crate::outcome::ReasoningResult;
use crate::paradigm::{
    Classical, Decision, Fuzzy, Modal, Paradigm, ParadigmKind, Probabilistic, Quantum, Solver,
    Temporal,
};
use crate::rule::Rule;
use crate::trace::ProofStep;

/// The paradigm-erased engine surface.
pub trait ReasonEngine: Send + Sync {
    /// Which paradigm this engine runs.
    fn kind(&self) -> ParadigmKind;

    /// Seed tables (first call) and reset per-session state.
    fn initialize(&self) -> PolyResult<()>;

    /// Whether `initialize` has completed.
    fn is_initialized(&self) -> bool;

    /// Run one reasoning call.
    fn reason(&self, input: &str, context: Option<&ReasonContext>) -> PolyResult<ReasoningResult>;

    /// Deterministic premises-support-conclusion check.
    fn validate_argument(&self, premises: &[&str], conclusion: &str) -> PolyResult<bool>;

    /// Append a rule to the engine's table.
    fn add_rule(&self, rule: Rule) -> PolyResult<()>;

    /// Insert or replace an operator in the engine's table.
    fn add_operator(&self, operator: Operator) -> PolyResult<()>;

    /// Register a standing premise.
    fn add_premise(&self, premise: ContextUnit);

    /// Snapshot of the running counters.
    fn metrics(&self) -> MetricsSnapshot;

    /// Bounded snapshot of archived proof traces, oldest first.
    fn proof_history(&self) -> Vec<Vec<ProofStep>>;
}

impl<P: Paradigm> ReasonEngine for Engine<P> {
    fn kind(&self) -> ParadigmKind {
        self.paradigm().kind()
    }

    fn initialize(&self) -> PolyResult<()> {
        Engine::initialize(self)
    }

    fn is_initialized(&self) -> bool {
        Engine::is_initialized(self)
    }

    fn reason(&self, input: &str, context: Option<&ReasonContext>) -> PolyResult<ReasoningResult> {
        Engine::reason(self, input, context)
    }

    fn validate_argument(&self, premises: &[&str], conclusion: &str) -> PolyResult<bool> {
        Engine::validate_argument(self, premises, conclusion)
    }

    fn add_rule(&self, rule: Rule) -> PolyResult<()> {
        Engine::add_rule(self, rule)
    }

    fn add_operator(&self, operator: Operator) -> PolyResult<()> {
        Engine::add_operator(self, operator)
    }

    fn add_premise(&self, premise: ContextUnit) {
        Engine::add_premise(self, premise)
    }

    fn metrics(&self) -> MetricsSnapshot {
        Engine::metrics(self)
    }

    fn proof_history(&self) -> Vec<Vec<ProofStep>> {
        Engine::proof_history(self)
    }
}

/// Holds one engine per paradigm and routes calls by [`ParadigmKind`].
#[derive(Default)]
pub struct EngineRegistry {
    engines: DashMap<ParadigmKind, Arc<dyn ReasonEngine>>,
}

impl EngineRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with all eight default engines, each initialized.
    pub fn with_defaults() -> PolyResult<Self> {
        let registry = Self::new();
        registry.register(Arc::new(Engine::new(Classical::new())))?;
        registry.register(Arc::new(Engine::new(Fuzzy::new())))?;
        registry.register(Arc::new(Engine::new(Modal::new())))?;
        registry.register(Arc::new(Engine::new(Temporal::new())))?;
        registry.register(Arc::new(Engine::new(Probabilistic::new())))?;
        registry.register(Arc::new(Engine::new(Quantum::new())))?;
        registry.register(Arc::new(Engine::new(Decision::new())))?;
        registry.register(Arc::new(Engine::new(Solver::new())))?;
        Ok(registry)
    }

    /// Register an engine under its paradigm, initializing it first.
    /// Replaces any previous engine for the same paradigm.
    pub fn register(&self, engine: Arc<dyn ReasonEngine>) -> PolyResult<()> {
        engine.initialize()?;
        tracing::info!(paradigm = %engine.kind(), "engine registered");
        self.engines.insert(engine.kind(), engine);
        Ok(())
    }

    /// Look up the engine for a paradigm.
    pub fn get(&self, kind: ParadigmKind) -> PolyResult<Arc<dyn ReasonEngine>> {
        self.engines
            .get(&kind)
            .map(|e| Arc::clone(e.value()))
            .ok_or_else(|| {
                RegistryError::NoEngine {
                    paradigm: kind.name().to_string(),
                }
                .into()
            })
    }

    /// Route one reasoning call to the engine for `kind`.
    pub fn reason_with(
        &self,
        kind: ParadigmKind,
        input: &str,
        context: Option<&ReasonContext>,
    ) -> PolyResult<ReasoningResult> {
        self.get(kind)?.reason(input, context)
    }

    /// Registered paradigms, in canonical order.
    pub fn kinds(&self) -> Vec<ParadigmKind> {
        ParadigmKind::ALL
            .into_iter()
            .filter(|k| self.engines.contains_key(k))
            .collect()
    }

    /// Number of registered engines.
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("engines", &self.kinds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_eight_paradigms() {
        let registry = EngineRegistry::with_defaults().unwrap();
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.kinds(), ParadigmKind::ALL.to_vec());
    }

    #[test]
    fn reason_with_routes_to_matching_engine() {
        let registry = EngineRegistry::with_defaults().unwrap();
        let result = registry
            .reason_with(
                ParadigmKind::Classical,
                "If it rains then the ground is wet. It rains.",
                None,
            )
            .unwrap();
        assert_eq!(result.reasoning.logic, "deductive");

        let result = registry
            .reason_with(ParadigmKind::Fuzzy, "The soup is very hot.", None)
            .unwrap();
        assert_eq!(result.reasoning.logic, "fuzzy");
    }

    #[test]
    fn missing_engine_is_a_typed_error() {
        let registry = EngineRegistry::new();
        let err = registry.get(ParadigmKind::Quantum).err().unwrap();
        assert!(matches!(
            err,
            crate::error::PolyError::Registry(RegistryError::NoEngine { .. })
        ));
        assert!(format!("{err}").contains("quantum"));
    }

    #[test]
    fn engines_do_not_share_tables() {
        let registry = EngineRegistry::with_defaults().unwrap();
        let classical = registry.get(ParadigmKind::Classical).unwrap();
        classical
            .add_rule(Rule::new(
                "house_rule",
                &["P → Q"],
                "Q",
                0.5,
                crate::rule::Validity::Heuristic,
            ))
            .unwrap();

        // The fuzzy engine's table is untouched by the classical mutation.
        let fuzzy = registry.get(ParadigmKind::Fuzzy).unwrap();
        let result = fuzzy.reason("The soup is very hot.", None).unwrap();
        assert!(result
            .conclusions
            .iter()
            .all(|c| c.derived_from != "house_rule"));
    }
}
