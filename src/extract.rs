//! Pattern extraction: raw text → units + detected operators.
//!
//! The extractor splits input into sentence-like segments on terminal
//! punctuation, discards segments below a minimum length, classifies each
//! segment by a fixed precedence of keyword families, and scans for
//! operators from the paradigm's table. Context-supplied units are merged
//! verbatim afterward.
//!
//! Degenerate input (empty, whitespace, punctuation-only) never errors: it
//! produces an empty extraction and downstream scoring falls back to the
//! neutral baseline.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::context::ReasonContext;
use crate::metrics::EngineMetrics;
use crate::operator::OperatorTable;
use crate::unit::{CONTEXT_DEFAULT_CONFIDENCE, Unit, UnitKind, UnitSource};

/// Segments shorter than this (after trimming) are discarded as noise.
const MIN_SEGMENT_CHARS: usize = 3;

/// "if … then …" conditional template.
pub static RE_IF_THEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bif\b\s+(.+?)\s*,?\s*\bthen\b\s+(.+)").unwrap()
});

/// "all X are Y" universal template.
pub static RE_ALL_ARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:all|every)\b\s+(.+?)\s+(?:are|is)\s+(.+)").unwrap()
});

/// "X will Y" future template.
pub static RE_WILL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(.+?)\s+will\s+(.+)").unwrap()
});

// Keyword families, checked in precedence order. First match wins.
const CONDITIONAL_KEYWORDS: &[&str] = &["if ", "then ", "implies", "provided that", "when "];
const UNIVERSAL_KEYWORDS: &[&str] = &["all ", "every ", "each ", "always "];
const EXISTENTIAL_KEYWORDS: &[&str] = &["some ", "there exists", "there is", "there are", "at least one"];
const NEGATIVE_KEYWORDS: &[&str] = &["not ", "never ", "no ", "cannot", "won't", "isn't", "doesn't"];
const ASSUMPTION_KEYWORDS: &[&str] = &["assume", "suppose", "hypothetically", "presumably"];

// Per-family base confidences for input-derived units.
const CONF_CONDITIONAL: f64 = 0.85;
const CONF_UNIVERSAL: f64 = 0.8;
const CONF_EXISTENTIAL: f64 = 0.75;
const CONF_NEGATIVE: f64 = 0.8;
const CONF_ASSUMPTION: f64 = 0.6;
const CONF_STATEMENT: f64 = 0.8;

/// The intermediate structure every downstream stage consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    /// Extracted units, in input order, context-supplied last.
    pub units: Vec<Unit>,
    /// Canonical names of detected operators, sorted.
    pub operators: Vec<String>,
}

impl Extraction {
    /// Whether nothing usable was extracted (zero-signal input).
    pub fn is_zero_signal(&self) -> bool {
        self.units.is_empty() && self.operators.is_empty()
    }

    /// Mean confidence of extracted units, if any.
    pub fn mean_unit_confidence(&self) -> Option<f64> {
        if self.units.is_empty() {
            return None;
        }
        let sum: f64 = self.units.iter().map(|u| u.confidence).sum();
        Some(sum / self.units.len() as f64)
    }

    /// Only the input-derived units.
    pub fn input_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.source == UnitSource::Input)
    }

    /// Texts of assumption-typed units, for the result's `assumptions` field.
    pub fn assumption_texts(&self) -> Vec<String> {
        self.units
            .iter()
            .filter(|u| u.is_assumption())
            .map(|u| u.text.clone())
            .collect()
    }
}

/// Split text into sentence-like segments at terminal punctuation.
///
/// Trailing text without terminal punctuation forms a final segment.
pub fn split_segments(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if matches!(c, '.' | '!' | '?' | ';') {
            let trimmed = current.trim();
            if trimmed.len() >= MIN_SEGMENT_CHARS {
                segments.push(trimmed.to_string());
            }
            current.clear();
        } else {
            current.push(c);
        }
    }

    let trimmed = current.trim();
    if trimmed.len() >= MIN_SEGMENT_CHARS {
        segments.push(trimmed.to_string());
    }

    segments
}

/// Classify a segment by keyword family.
///
/// Precedence: conditional > universal > existential > negative > default.
/// The first matching family wins; later families are not checked. The
/// default family splits into assumption vs. plain statement.
pub fn classify_segment(lowered: &str) -> UnitKind {
    if CONDITIONAL_KEYWORDS.iter().any(|k| lowered.contains(k)) || RE_IF_THEN.is_match(lowered) {
        return UnitKind::Conditional;
    }
    if UNIVERSAL_KEYWORDS.iter().any(|k| lowered.contains(k)) || RE_ALL_ARE.is_match(lowered) {
        return UnitKind::Universal;
    }
    if EXISTENTIAL_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return UnitKind::Existential;
    }
    if NEGATIVE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return UnitKind::Negative;
    }
    if ASSUMPTION_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return UnitKind::Assumption;
    }
    UnitKind::Statement
}

fn base_confidence(kind: UnitKind) -> f64 {
    match kind {
        UnitKind::Conditional => CONF_CONDITIONAL,
        UnitKind::Universal => CONF_UNIVERSAL,
        UnitKind::Existential => CONF_EXISTENTIAL,
        UnitKind::Negative => CONF_NEGATIVE,
        UnitKind::Assumption => CONF_ASSUMPTION,
        _ => CONF_STATEMENT,
    }
}

/// Run extraction over input text plus optional context.
///
/// The only side effect is incrementing the metrics "processed" counter.
pub fn extract(
    text: &str,
    context: Option<&ReasonContext>,
    operators: &OperatorTable,
    metrics: &EngineMetrics,
) -> Extraction {
    metrics.record_processed();

    let mut extraction = Extraction::default();
    let mut next_id: u32 = 0;

    for segment in split_segments(text) {
        let lowered = segment.to_lowercase();
        let kind = classify_segment(&lowered);
        extraction.units.push(Unit::from_input(
            next_id,
            segment,
            kind,
            base_confidence(kind),
        ));
        next_id += 1;
    }

    // Operator detection runs over the whole lowered input so connectives
    // spanning segment boundaries are still seen.
    extraction.operators = operators.detect(&text.to_lowercase());

    // Merge context-supplied units verbatim, tagged with the context source.
    if let Some(ctx) = context {
        for cu in &ctx.units {
            let mut unit = Unit::from_context(next_id, cu.text.clone(), cu.kind);
            unit.confidence = cu
                .confidence
                .unwrap_or(CONTEXT_DEFAULT_CONFIDENCE)
                .clamp(0.0, 1.0);
            extraction.units.push(unit);
            next_id += 1;
        }
    }

    tracing::debug!(
        units = extraction.units.len(),
        operators = extraction.operators.len(),
        "extraction complete"
    );

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextUnit;
    use crate::operator::Operator;

    fn classical_ops() -> OperatorTable {
        OperatorTable::seeded(vec![
            Operator::new("IMPLIES", "→", 0.9, &["if", "then", "implies"]),
            Operator::new("AND", "∧", 0.95, &["and"]),
            Operator::new("NOT", "¬", 0.9, &["not", "never"]),
        ])
        .unwrap()
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        let segments = split_segments("It rains. The ground is wet! Is it cold?");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], "It rains");
    }

    #[test]
    fn short_segments_discarded() {
        let segments = split_segments("Ok. The plan works.");
        assert_eq!(segments, vec!["The plan works".to_string()]);
    }

    #[test]
    fn trailing_text_kept_without_punctuation() {
        let segments = split_segments("no punctuation here");
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn conditional_beats_universal() {
        // Both families match; conditional has higher precedence.
        assert_eq!(
            classify_segment("if all dogs bark then every cat hides"),
            UnitKind::Conditional
        );
    }

    #[test]
    fn family_precedence_order() {
        assert_eq!(classify_segment("all dogs are mammals"), UnitKind::Universal);
        assert_eq!(classify_segment("there exists a counterexample"), UnitKind::Existential);
        assert_eq!(classify_segment("the claim is not true"), UnitKind::Negative);
        assert_eq!(classify_segment("suppose the lemma holds"), UnitKind::Assumption);
        assert_eq!(classify_segment("the sky is blue"), UnitKind::Statement);
    }

    #[test]
    fn modus_ponens_scenario_extraction() {
        let metrics = EngineMetrics::new();
        let extraction = extract(
            "If it rains then the ground is wet. It rains.",
            None,
            &classical_ops(),
            &metrics,
        );
        assert!(extraction.units.len() >= 2);
        assert_eq!(extraction.units[0].kind, UnitKind::Conditional);
        assert!(extraction.operators.contains(&"IMPLIES".to_string()));
        assert_eq!(metrics.snapshot().processed, 1);
    }

    #[test]
    fn empty_input_degrades_to_zero_signal() {
        let metrics = EngineMetrics::new();
        let extraction = extract("", None, &classical_ops(), &metrics);
        assert!(extraction.is_zero_signal());
        assert!(extraction.mean_unit_confidence().is_none());
    }

    #[test]
    fn context_units_merged_with_default_confidence() {
        let metrics = EngineMetrics::new();
        let ctx = ReasonContext::new()
            .with_unit(ContextUnit::statement("the street is closed"))
            .with_unit(ContextUnit::statement("a detour exists").with_confidence(0.95));
        let extraction = extract("It rains.", Some(&ctx), &classical_ops(), &metrics);

        assert_eq!(extraction.units.len(), 3);
        let ctx_units: Vec<_> = extraction
            .units
            .iter()
            .filter(|u| u.source == UnitSource::Context)
            .collect();
        assert_eq!(ctx_units.len(), 2);
        assert!((ctx_units[0].confidence - 0.7).abs() < f64::EPSILON);
        assert!((ctx_units[1].confidence - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn if_then_template_captures_both_clauses() {
        let caps = RE_IF_THEN
            .captures("If it rains, then the ground is wet")
            .unwrap();
        assert_eq!(&caps[1], "it rains");
        assert_eq!(&caps[2], "the ground is wet");
    }

    #[test]
    fn all_are_template() {
        let caps = RE_ALL_ARE.captures("All dogs are mammals").unwrap();
        assert_eq!(&caps[1], "dogs");
        assert_eq!(&caps[2], "mammals");
    }

    #[test]
    fn will_template() {
        let caps = RE_WILL.captures("I will finish the report").unwrap();
        assert_eq!(&caps[1], "I");
        assert_eq!(&caps[2], "finish the report");
    }
}
