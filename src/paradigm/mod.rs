//! The eight paradigm specializations of the shared reasoning pipeline.
//!
//! Every paradigm supplies the same four things: an operator/keyword table,
//! an inference-rule table, fixed scoring weights, and an `augment` hook
//! that builds its derived structures (possible worlds, temporal events,
//! quantum-style state vectors, decision options) and turns them into
//! alternatives. The pipeline itself (extract, match, synthesize, score,
//! trace) is identical across paradigms and lives in [`crate::engine`].

use serde::{Deserialize, Serialize};

use crate::context::ReasonContext;
use crate::extract::Extraction;
use crate::operator::Operator;
use crate::outcome::{Alternative, Conclusion};
use crate::rule::Rule;
use crate::score::ScoreWeights;
use crate::trace::ProofTrace;

pub mod classical;
pub mod decision;
pub mod fuzzy;
pub mod modal;
pub mod probabilistic;
pub mod quantum;
pub mod solver;
pub mod temporal;

pub use classical::Classical;
pub use decision::Decision;
pub use fuzzy::Fuzzy;
pub use modal::Modal;
pub use probabilistic::Probabilistic;
pub use quantum::Quantum;
pub use solver::Solver;
pub use temporal::Temporal;

/// The eight reasoning paradigms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParadigmKind {
    Classical,
    Fuzzy,
    Modal,
    Temporal,
    Probabilistic,
    Quantum,
    Decision,
    Solver,
}

impl ParadigmKind {
    /// All paradigm kinds, in canonical order.
    pub const ALL: [Self; 8] = [
        Self::Classical,
        Self::Fuzzy,
        Self::Modal,
        Self::Temporal,
        Self::Probabilistic,
        Self::Quantum,
        Self::Decision,
        Self::Solver,
    ];

    /// Canonical lower-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Classical => "classical",
            Self::Fuzzy => "fuzzy",
            Self::Modal => "modal",
            Self::Temporal => "temporal",
            Self::Probabilistic => "probabilistic",
            Self::Quantum => "quantum",
            Self::Decision => "decision",
            Self::Solver => "solver",
        }
    }
}

impl std::fmt::Display for ParadigmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ParadigmKind {
    type Err = crate::error::RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classical" => Ok(Self::Classical),
            "fuzzy" => Ok(Self::Fuzzy),
            "modal" => Ok(Self::Modal),
            "temporal" => Ok(Self::Temporal),
            "probabilistic" => Ok(Self::Probabilistic),
            "quantum" => Ok(Self::Quantum),
            "decision" => Ok(Self::Decision),
            "solver" | "problem-solving" => Ok(Self::Solver),
            other => Err(crate::error::RegistryError::UnknownParadigm {
                name: other.to_string(),
            }),
        }
    }
}

/// What a paradigm's `augment` hook contributes on top of rule synthesis.
#[derive(Debug, Default)]
pub struct Augmentation {
    /// Alternatives with their own probability/feasibility.
    pub alternatives: Vec<Alternative>,
    /// Extra conclusions derived from paradigm structures.
    pub conclusions: Vec<Conclusion>,
    /// Extra evidence strings.
    pub evidence: Vec<String>,
}

/// One paradigm's specialization of the shared pipeline.
pub trait Paradigm: Send + Sync + 'static {
    /// Which paradigm this is.
    fn kind(&self) -> ParadigmKind;

    /// Inference style label for the result's `reasoning.logic` field.
    fn logic_label(&self) -> &'static str;

    /// Uncertainty type tag ("epistemic", "fuzzy", "stochastic", …).
    fn uncertainty_kind(&self) -> &'static str;

    /// Fixed confidence-term weights.
    fn weights(&self) -> ScoreWeights;

    /// Seed operators for the engine's operator table.
    fn operators(&self) -> Vec<Operator>;

    /// Seed rules for the engine's rule table.
    fn rules(&self) -> Vec<Rule>;

    /// Whether the rule confidence term uses operator strengths instead of
    /// applied-rule confidences.
    fn operator_driven(&self) -> bool {
        false
    }

    /// Build paradigm-specific derived structures for this call and convert
    /// them into alternatives, extra conclusions, and trace steps.
    fn augment(
        &self,
        input: &str,
        extraction: &Extraction,
        context: Option<&ReasonContext>,
        trace: &mut ProofTrace,
    ) -> Augmentation {
        let _ = (input, extraction, context, trace);
        Augmentation::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn names_round_trip() {
        for kind in ParadigmKind::ALL {
            assert_eq!(ParadigmKind::from_str(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_name_errors() {
        assert!(ParadigmKind::from_str("dialectical").is_err());
    }

    #[test]
    fn solver_alias_accepted() {
        assert_eq!(
            ParadigmKind::from_str("problem-solving").unwrap(),
            ParadigmKind::Solver
        );
    }
}
