//! Operators and the per-paradigm operator/keyword table.
//!
//! An [`Operator`] is a named symbolic connective (conjunction, implication,
//! necessity, future, belief, measurement, …) with a literal symbol, a
//! strength in [0, 1], and optional metadata: a dual operator (□/◇, ∧/∨), a
//! temporal direction, a modality class. Each keyword synonym maps to exactly
//! one operator.
//!
//! The [`OperatorTable`] is an explicit registry object owned by each engine
//! instance, seeded at initialization and extensible through a rare,
//! administrative `add` mutation. It is never a language-level singleton, so
//! two engines of the same paradigm cannot couple through hidden state.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::{OperatorError, PolyResult};

/// Temporal orientation of an operator, where applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalDirection {
    Past,
    Present,
    Future,
}

/// Modality class of an operator, where applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Necessity,
    Possibility,
    Belief,
    Knowledge,
}

/// A named symbolic connective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    /// Canonical name, e.g. `IMPLIES`, `NECESSARY`, `FUTURE`.
    pub name: String,
    /// Literal symbol detected verbatim in text, e.g. `→`, `□`, `∧`.
    pub symbol: String,
    /// Strength in [0, 1], feeds the operator-driven confidence term.
    pub strength: f64,
    /// Natural-language synonyms. Each keyword maps to exactly this operator.
    pub keywords: Vec<String>,
    /// Name of the dual operator (AND↔OR, NECESSARY↔POSSIBLE), if any.
    pub dual: Option<String>,
    /// Temporal orientation, if any.
    pub temporal_direction: Option<TemporalDirection>,
    /// Modality class, if any.
    pub modality: Option<Modality>,
}

impl Operator {
    /// Build a plain operator with no metadata.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        strength: f64,
        keywords: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            strength,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            dual: None,
            temporal_direction: None,
            modality: None,
        }
    }

    /// Set the dual operator name.
    pub fn with_dual(mut self, dual: impl Into<String>) -> Self {
        self.dual = Some(dual.into());
        self
    }

    /// Set the temporal direction.
    pub fn with_direction(mut self, direction: TemporalDirection) -> Self {
        self.temporal_direction = Some(direction);
        self
    }

    /// Set the modality class.
    pub fn with_modality(mut self, modality: Modality) -> Self {
        self.modality = Some(modality);
        self
    }

    /// Validate presence of required fields and value ranges.
    pub fn validate(&self) -> PolyResult<()> {
        if !(0.0..=1.0).contains(&self.strength) {
            return Err(OperatorError::StrengthOutOfRange {
                name: self.name.clone(),
                strength: self.strength,
            }
            .into());
        }
        if self.symbol.is_empty() && self.keywords.is_empty() {
            return Err(OperatorError::Undetectable {
                name: self.name.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Whether this operator appears in the given lower-cased text, either by
    /// literal symbol or by any keyword synonym.
    pub fn detected_in(&self, lowered: &str) -> bool {
        if !self.symbol.is_empty() && lowered.contains(&self.symbol) {
            return true;
        }
        if lowered.contains(&self.name.to_lowercase()) {
            return true;
        }
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Operator table
// ---------------------------------------------------------------------------

/// Per-engine registry mapping operator names and keywords to operators.
///
/// Concurrent reads are the common case (one lookup per extracted segment);
/// both directions use `DashMap` so the table never blocks reasoning calls.
#[derive(Debug, Default)]
pub struct OperatorTable {
    /// Canonical name → operator (source of truth).
    by_name: DashMap<String, Operator>,
    /// Lower-cased keyword → canonical operator name.
    keyword_to_name: DashMap<String, String>,
}

impl OperatorTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table from a slice of operators. Used at engine initialization.
    pub fn seeded(operators: Vec<Operator>) -> PolyResult<Self> {
        let table = Self::new();
        for op in operators {
            table.add(op)?;
        }
        Ok(table)
    }

    /// Administrative mutation: insert or replace an operator.
    pub fn add(&self, operator: Operator) -> PolyResult<()> {
        operator.validate()?;
        for keyword in &operator.keywords {
            self.keyword_to_name
                .insert(keyword.to_lowercase(), operator.name.clone());
        }
        tracing::debug!(name = %operator.name, "registering operator");
        self.by_name.insert(operator.name.clone(), operator);
        Ok(())
    }

    /// Look up an operator by canonical name.
    pub fn get(&self, name: &str) -> Option<Operator> {
        self.by_name.get(name).map(|r| r.value().clone())
    }

    /// Resolve a keyword to its operator, if registered.
    pub fn by_keyword(&self, keyword: &str) -> Option<Operator> {
        let name = self.keyword_to_name.get(&keyword.to_lowercase())?;
        self.get(name.value())
    }

    /// Scan lower-cased text and return the names of all detected operators,
    /// in table-independent sorted order so detection is deterministic.
    pub fn detect(&self, lowered: &str) -> Vec<String> {
        let mut found: Vec<String> = self
            .by_name
            .iter()
            .filter(|entry| entry.value().detected_in(lowered))
            .map(|entry| entry.key().clone())
            .collect();
        found.sort();
        found
    }

    /// Mean strength of the named operators. Returns `None` when empty.
    pub fn mean_strength(&self, names: &[String]) -> Option<f64> {
        if names.is_empty() {
            return None;
        }
        let sum: f64 = names
            .iter()
            .filter_map(|n| self.get(n))
            .map(|op| op.strength)
            .sum();
        Some(sum / names.len() as f64)
    }

    /// All registered operators.
    pub fn all(&self) -> Vec<Operator> {
        self.by_name.iter().map(|r| r.value().clone()).collect()
    }

    /// Number of registered operators.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
