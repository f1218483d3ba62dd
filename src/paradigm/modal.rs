//! Modal reasoning: necessity, possibility, and possible worlds.
//!
//! The augment hook builds a small Kripke-style structure per call: a base
//! "actual" world from the extracted truth-valued units, plus one spawned
//! world per detected modal operator, each carrying an accessibility weight
//! back to the base world (1.0 for necessity, 0.8 for possibility). Worlds
//! only ever spawn as children of the base world, so the structure is a tree
//! and needs no cycle detection.

use std::collections::BTreeMap;
use std::sync::RwLock;

use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::ReasonContext;
use crate::extract::Extraction;
use crate::operator::{Modality, Operator};
use crate::outcome::{Alternative, Conclusion};
use crate::paradigm::{Augmentation, Paradigm, ParadigmKind};
use crate::rule::{Rule, Validity};
use crate::score::ScoreWeights;
use crate::trace::{ProofTrace, StepKind};
use crate::unit::UnitKind;

/// Accessibility weight for possibility-spawned worlds.
pub const POSSIBILITY_ACCESSIBILITY: f64 = 0.8;
/// Accessibility weight for necessity-spawned worlds.
pub const NECESSITY_ACCESSIBILITY: f64 = 1.0;

/// One possible world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalWorld {
    /// World identifier ("w0" is always the actual world).
    pub id: String,
    /// Ids of worlds this one is accessible from.
    pub accessible_from: Vec<String>,
    /// Proposition text → truth value in this world.
    pub propositions: BTreeMap<String, bool>,
    /// Source world id → accessibility strength.
    pub accessibility: BTreeMap<String, f64>,
}

impl ModalWorld {
    /// Build an empty world with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            accessible_from: Vec::new(),
            propositions: BTreeMap::new(),
            accessibility: BTreeMap::new(),
        }
    }
}

/// The modal logic paradigm.
#[derive(Debug, Default)]
pub struct Modal {
    /// Administratively-added worlds, merged into every call's structure.
    seeded_worlds: RwLock<Vec<ModalWorld>>,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Administrative mutation: register a standing world.
    pub fn add_modal_world(&self, world: ModalWorld) {
        self.seeded_worlds
            .write()
            .expect("modal world store poisoned")
            .push(world);
    }

    /// Build the per-call world structure: base world plus one spawned world
    /// per detected modal operator, as an accessibility-weighted tree.
    pub fn build_worlds(
        &self,
        extraction: &Extraction,
        operators: &[Operator],
    ) -> DiGraph<ModalWorld, f64> {
        let mut graph = DiGraph::new();

        let mut actual = ModalWorld::new("w0");
        for unit in &extraction.units {
            actual
                .propositions
                .insert(unit.text.clone(), unit.kind != UnitKind::Negative);
        }
        let base = graph.add_node(actual);

        let mut next = 1usize;
        for op in operators {
            let weight = match op.modality {
                Some(Modality::Necessity) => NECESSITY_ACCESSIBILITY,
                Some(Modality::Possibility) => POSSIBILITY_ACCESSIBILITY,
                _ => continue,
            };
            let mut world = ModalWorld::new(format!("w{next}"));
            world.accessible_from.push("w0".into());
            world.accessibility.insert("w0".into(), weight);
            for unit in &extraction.units {
                // Possibility worlds flip nothing; they just witness that the
                // proposition can hold. Necessity worlds copy the base truths.
                world
                    .propositions
                    .insert(unit.text.clone(), unit.kind != UnitKind::Negative);
            }
            let node = graph.add_node(world);
            graph.add_edge(base, node, weight);
            next += 1;
        }

        for world in self.seeded_worlds.read().expect("modal world store poisoned").iter() {
            let node = graph.add_node(world.clone());
            let weight = world.accessibility.get("w0").copied().unwrap_or(1.0);
            graph.add_edge(base, node, weight);
        }

        graph
    }
}

impl Paradigm for Modal {
    fn kind(&self) -> ParadigmKind {
        ParadigmKind::Modal
    }

    fn logic_label(&self) -> &'static str {
        "modal-k"
    }

    fn uncertainty_kind(&self) -> &'static str {
        "epistemic"
    }

    fn weights(&self) -> ScoreWeights {
        ScoreWeights::OPERATOR_DRIVEN
    }

    fn operator_driven(&self) -> bool {
        true
    }

    fn operators(&self) -> Vec<Operator> {
        vec![
            Operator::new("NECESSARY", "□", 1.0, &["must", "necessarily", "has to", "certainly"])
                .with_dual("POSSIBLE")
                .with_modality(Modality::Necessity),
            Operator::new("POSSIBLE", "◇", 0.8, &["may", "might", "possibly", "could"])
                .with_dual("NECESSARY")
                .with_modality(Modality::Possibility),
            Operator::new("BELIEF", "Bel", 0.6, &["believe", "believes", "think that"])
                .with_modality(Modality::Belief),
            Operator::new("KNOWLEDGE", "K", 0.9, &["know that", "knows that"])
                .with_modality(Modality::Knowledge),
        ]
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new(
                "necessity_elimination",
                &["□P"],
                "P",
                0.95,
                Validity::Deductive,
            )
            .with_evidence(&["axiom T"]),
            Rule::new(
                "possibility_introduction",
                &["P"],
                "it is possible that P",
                0.85,
                Validity::Deductive,
            ),
            Rule::new(
                "necessity_distribution",
                &["□(P → Q)", "□P"],
                "necessarily Q",
                0.9,
                Validity::Deductive,
            )
            .with_evidence(&["axiom K"]),
            Rule::new(
                "modal_duality",
                &["¬◇P"],
                "necessarily not P",
                0.88,
                Validity::Deductive,
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

        let detected: Vec<Operator> = extraction
            .operators
            .iter()
            .filter_map(|name| self.operators().into_iter().find(|o| &o.name == name))
            .collect();
        let worlds = self.build_worlds(extraction, &detected);

        let mean_conf = extraction.mean_unit_confidence().unwrap_or(0.5);
        for node in worlds.node_indices().skip(1) {
            let world = &worlds[node];
            let weight = world.accessibility.get("w0").copied().unwrap_or(1.0);
            trace.push(
                StepKind::Inference,
                format!("spawned world {} (accessibility {weight:.1})", world.id),
                "modal operator semantics over the actual world".to_string(),
                weight,
            );
            augmentation.alternatives.push(
                Alternative::new(
                    format!("world {}: accessible interpretation", world.id),
                    weight * mean_conf,
                )
                .with_detail("accessibility", Value::from(weight))
                .with_detail("propositions", Value::from(world.propositions.len())),
            );
        }

        if detected.iter().any(|o| o.modality == Some(Modality::Necessity)) {
            augmentation.conclusions.push(Conclusion {
                statement: "the statement holds in every accessible world".into(),
                confidence: NECESSITY_ACCESSIBILITY * mean_conf,
                derived_from: "necessity_semantics".into(),
                validity: Validity::Deductive.label().to_string(),
            });
        }

        augmentation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;

    #[test]
    fn possibility_spawns_accessible_world() {
        let engine = Engine::new(Modal::new());
        engine.initialize().unwrap();
        let result = engine.reason("It might rain tomorrow.", None).unwrap();
        assert!(!result.alternatives.is_empty());
        let accessibility = result.alternatives[0]
            .detail
            .get("accessibility")
            .and_then(Value::as_f64)
            .unwrap();
        assert!((accessibility - POSSIBILITY_ACCESSIBILITY).abs() < 1e-9);
    }

    #[test]
    fn necessity_yields_all_worlds_conclusion() {
        let engine = Engine::new(Modal::new());
        engine.initialize().unwrap();
        let result = engine.reason("The train must arrive on time.", None).unwrap();
        assert!(result
            .conclusions
            .iter()
            .any(|c| c.derived_from == "necessity_semantics"));
    }

    #[test]
    fn worlds_form_a_tree_rooted_at_actual() {
        let modal = Modal::new();
        let ops = modal.operators();
        let extraction = {
            let table = crate::operator::OperatorTable::seeded(modal.operators()).unwrap();
            crate::extract::extract(
                "It must rain. It might snow.",
                None,
                &table,
                &crate::metrics::EngineMetrics::new(),
            )
        };
        let detected: Vec<Operator> = extraction
            .operators
            .iter()
            .filter_map(|n| ops.iter().find(|o| &o.name == n).cloned())
            .collect();
        let graph = modal.build_worlds(&extraction, &detected);

        // One base world plus one per modal operator.
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        // Every non-base world is a direct child of w0.
        for node in graph.node_indices().skip(1) {
            assert_eq!(graph[node].accessible_from, vec!["w0".to_string()]);
        }
    }

    #[test]
    fn seeded_world_merged_into_structure() {
        let modal = Modal::new();
        let mut world = ModalWorld::new("w_ctx");
        world.accessibility.insert("w0".into(), 0.5);
        modal.add_modal_world(world);

        let extraction = Extraction::default();
        let graph = modal.build_worlds(&extraction, &[]);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn all_seed_tables_valid() {
        for rule in Modal::new().rules() {
            rule.validate().unwrap();
        }
        for op in Modal::new().operators() {
            op.validate().unwrap();
        }
    }
}
