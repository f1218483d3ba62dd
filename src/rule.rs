//! Inference rules, the rule table, and the applicability matcher.
//!
//! Matching here is keyword compatibility, not unification: a rule is
//! applicable when every antecedent pattern binds to at least one extracted
//! unit via a coarse relatedness check. The same unit may satisfy several
//! slots. Downstream synthesis depends on this permissiveness, so it is
//! preserved and isolated behind the [`SlotBinder`] trait; a stricter
//! unification binder can be swapped in without touching the pipeline.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{PolyResult, RuleError};
use crate::extract::Extraction;
use crate::unit::Unit;

/// Validity class of a rule, carried into conclusions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    Deductive,
    Inductive,
    Abductive,
    Heuristic,
}

impl Validity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Deductive => "deductive",
            Self::Inductive => "inductive",
            Self::Abductive => "abductive",
            Self::Heuristic => "heuristic",
        }
    }
}

impl std::fmt::Display for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One inference rule: ordered antecedent patterns plus a consequent template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Unique name, e.g. `modus_ponens`.
    pub name: String,
    /// Ordered antecedent patterns ("P → Q", "P", "□A", "X will Y").
    pub antecedents: Vec<String>,
    /// Consequent template with positional placeholders P, Q, R.
    pub consequent: String,
    /// Base confidence in [0, 1].
    pub confidence: f64,
    /// Validity class.
    pub validity: Validity,
    /// Evidence citations carried into the result's evidence list.
    pub evidence: Vec<String>,
}

impl Rule {
    /// Build a rule with no evidence citations.
    pub fn new(
        name: impl Into<String>,
        antecedents: &[&str],
        consequent: impl Into<String>,
        confidence: f64,
        validity: Validity,
    ) -> Self {
        Self {
            name: name.into(),
            antecedents: antecedents.iter().map(|a| a.to_string()).collect(),
            consequent: consequent.into(),
            confidence,
            validity,
            evidence: Vec::new(),
        }
    }

    /// Attach evidence citations.
    pub fn with_evidence(mut self, evidence: &[&str]) -> Self {
        self.evidence = evidence.iter().map(|e| e.to_string()).collect();
        self
    }

    /// Validate presence of required fields and value ranges.
    pub fn validate(&self) -> PolyResult<()> {
        if self.antecedents.is_empty() {
            return Err(RuleError::EmptyAntecedents {
                name: self.name.clone(),
            }
            .into());
        }
        if self.consequent.trim().is_empty() {
            return Err(RuleError::EmptyConsequent {
                name: self.name.clone(),
            }
            .into());
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(RuleError::ConfidenceOutOfRange {
                name: self.name.clone(),
                confidence: self.confidence,
            }
            .into());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Slot binding
// ---------------------------------------------------------------------------

/// Natural-language spellings of the connective symbols used in patterns.
const CONNECTIVE_SPELLINGS: &[(&str, &[&str])] = &[
    ("→", &["if", "then", "implies"]),
    ("->", &["if", "then", "implies"]),
    ("↔", &["if and only if", "iff", "exactly when"]),
    ("∧", &["and"]),
    ("∨", &["or"]),
    ("¬", &["not", "never", "no "]),
    ("□", &["must", "necessarily", "always has to"]),
    ("◇", &["may", "might", "possibly", "could"]),
];

/// Keywords that satisfy a bare canonical slot (P, Q, R).
const SLOT_KEYWORDS: &[&str] = &["if", "then", "implies", "when"];

/// Decides which extracted unit, if any, fills an antecedent slot.
///
/// The default [`KeywordBinder`] reproduces the coarse compatibility check
/// the pipeline's synthesis stage assumes: containment of connective
/// spellings or conditional keywords, first matching unit wins, and one unit
/// may fill many slots.
pub trait SlotBinder: Send + Sync {
    /// Bind a pattern to the first related unit, or `None`.
    fn bind<'a>(&self, pattern: &str, units: &'a [Unit]) -> Option<&'a Unit>;
}

/// The default coarse keyword-compatibility binder.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordBinder;

impl KeywordBinder {
    /// Whether a unit's lower-cased text is judged related to a pattern.
    pub fn related(pattern: &str, lowered: &str) -> bool {
        let pattern_lower = pattern.to_lowercase();

        // Connective symbols in the pattern: satisfied when the unit spells
        // out any one of them in natural language.
        let mut saw_connective = false;
        for (symbol, spellings) in CONNECTIVE_SPELLINGS {
            if pattern_lower.contains(symbol) {
                saw_connective = true;
                if spellings.iter().any(|s| lowered.contains(s)) {
                    return true;
                }
            }
        }
        if saw_connective {
            return false;
        }

        // Bare canonical slot: satisfied by any unit carrying a conditional
        // keyword. Intentionally permissive; see module docs.
        if is_bare_slot(&pattern_lower) {
            return SLOT_KEYWORDS.iter().any(|k| lowered.contains(k));
        }

        // Textual pattern ("x will y", "all x are y"): word overlap on the
        // pattern's non-slot words.
        pattern_lower
            .split_whitespace()
            .filter(|w| w.len() > 2 && !is_bare_slot(w))
            .any(|w| lowered.contains(w))
    }
}

fn is_bare_slot(token: &str) -> bool {
    matches!(token.trim(), "p" | "q" | "r" | "a" | "b" | "c")
}

impl SlotBinder for KeywordBinder {
    fn bind<'a>(&self, pattern: &str, units: &'a [Unit]) -> Option<&'a Unit> {
        units
            .iter()
            .find(|u| Self::related(pattern, &u.lowered()))
    }
}

// ---------------------------------------------------------------------------
// Rule table + matcher
// ---------------------------------------------------------------------------

/// Per-engine rule table. Reads snapshot the rules so the matching stage
/// stays lock-free for the rest of the call; writes are rare administrative
/// mutations.
#[derive(Debug, Default)]
pub struct RuleTable {
    rules: RwLock<Vec<Rule>>,
}

impl RuleTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table from a rule list. Used at engine initialization.
    pub fn seeded(rules: Vec<Rule>) -> PolyResult<Self> {
        let table = Self::new();
        for rule in rules {
            table.add(rule)?;
        }
        Ok(table)
    }

    /// Administrative mutation: append a rule after field validation.
    pub fn add(&self, rule: Rule) -> PolyResult<()> {
        rule.validate()?;
        tracing::debug!(name = %rule.name, "registering rule");
        self.rules.write().expect("rule table poisoned").push(rule);
        Ok(())
    }

    /// Snapshot of all rules, in registration order.
    pub fn snapshot(&self) -> Vec<Rule> {
        self.rules.read().expect("rule table poisoned").clone()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.read().expect("rule table poisoned").len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered subset of rules judged applicable to the extraction.
///
/// A rule is applicable when every antecedent pattern binds to at least one
/// unit. An unmatched rule is excluded, never an error.
pub fn match_rules<'r>(
    rules: &'r [Rule],
    extraction: &Extraction,
    binder: &dyn SlotBinder,
) -> Vec<&'r Rule> {
    rules
        .iter()
        .filter(|rule| {
            rule.antecedents
                .iter()
                .all(|pattern| binder.bind(pattern, &extraction.units).is_some())
        })
        .collect()
}
