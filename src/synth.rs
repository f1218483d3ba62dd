//! Conclusion synthesis: applicable rules + extraction → conclusions + trace.
//!
//! Each applicable rule contributes one inference step per antecedent slot;
//! the final slot's step carries the instantiated consequent. Placeholders
//! P, Q, R are substituted with the first, second, and third extracted units
//! in that fixed positional order, regardless of which unit bound which slot
//! (the permissiveness the matcher establishes, preserved here on purpose).
//!
//! When more than one rule applies, a single "mixed" chain is synthesized on
//! top: all rules' steps concatenated, confidences averaged, and the LAST
//! rule's consequent taken as the combined conclusion.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::Extraction;
use crate::outcome::Conclusion;
use crate::rule::{Rule, SlotBinder};
use crate::trace::{ProofTrace, StepKind};

static RE_SLOT_P: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bP\b").unwrap());
static RE_SLOT_Q: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bQ\b").unwrap());
static RE_SLOT_R: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bR\b").unwrap());

/// Markers that fail the minimal well-formedness filter.
const REJECT_MARKERS: &[&str] = &["contradiction", "paradox", "⊥"];

/// What synthesis produced for one call.
#[derive(Debug, Default)]
pub struct SynthesisOutput {
    /// Conclusions that passed the validity filter, in rule order.
    pub conclusions: Vec<Conclusion>,
    /// Names of the rules that fired (mixed chain excluded).
    pub applied: Vec<String>,
    /// Evidence citations harvested from fired rules.
    pub evidence: Vec<String>,
}

/// Instantiate a consequent template by positional substitution.
///
/// P/Q/R take the literal text of the first/second/third extracted units.
/// Missing units leave their placeholder untouched.
pub fn instantiate(template: &str, extraction: &Extraction) -> String {
    let mut out = template.to_string();
    if let Some(u) = extraction.units.first() {
        out = RE_SLOT_P.replace_all(&out, u.text.as_str()).into_owned();
    }
    if let Some(u) = extraction.units.get(1) {
        out = RE_SLOT_Q.replace_all(&out, u.text.as_str()).into_owned();
    }
    if let Some(u) = extraction.units.get(2) {
        out = RE_SLOT_R.replace_all(&out, u.text.as_str()).into_owned();
    }
    out
}

/// Minimal well-formedness filter for synthesized conclusions.
///
/// Permissive by design: only empty conclusions, explicit contradiction or
/// paradox markers, and statements asserting both truth values are rejected.
pub fn is_well_formed(statement: &str) -> bool {
    let trimmed = statement.trim();
    if trimmed.is_empty() {
        return false;
    }
    let lowered = trimmed.to_lowercase();
    if REJECT_MARKERS.iter().any(|m| lowered.contains(m)) {
        return false;
    }
    if lowered.contains("is true") && lowered.contains("is false") {
        return false;
    }
    true
}

/// Synthesize conclusions from the matched rules, appending to the trace.
///
/// Individual rule failures are absorbed: the rule is skipped with a warning
/// and the call continues. Conclusions failing the validity filter are
/// dropped silently.
pub fn synthesize(
    matched: &[&Rule],
    extraction: &Extraction,
    binder: &dyn SlotBinder,
    trace: &mut ProofTrace,
) -> SynthesisOutput {
    let mut output = SynthesisOutput::default();
    let mut rule_confidences = Vec::with_capacity(matched.len());
    let mut chain_start = trace.next_index();

    for rule in matched {
        match apply_rule(rule, extraction, binder, trace, chain_start) {
            Ok(Some(conclusion)) => {
                rule_confidences.push(conclusion.confidence);
                output.applied.push(rule.name.clone());
                output.evidence.extend(rule.evidence.iter().cloned());
                output.conclusions.push(conclusion);
            }
            Ok(None) => {
                // Conclusion dropped by the validity filter; the rule still
                // counts as fired for metrics purposes.
                output.applied.push(rule.name.clone());
            }
            Err(message) => {
                tracing::warn!(rule = %rule.name, %message, "rule synthesis failed, excluding rule");
            }
        }
        chain_start = trace.next_index();
    }

    // Mixed chain: only meaningful with at least two contributing rules.
    if output.conclusions.len() > 1 {
        let last_rule = matched
            .iter()
            .rfind(|r| output.conclusions.iter().any(|c| c.derived_from == r.name));
        if let Some(last_rule) = last_rule {
            let mean = rule_confidences.iter().sum::<f64>() / rule_confidences.len() as f64;
            let statement = instantiate(&last_rule.consequent, extraction);
            if is_well_formed(&statement) {
                let names: Vec<&str> = output.applied.iter().map(String::as_str).collect();
                let derived_from = format!("mixed_chain({})", names.join("+"));
                trace.push(
                    StepKind::Conclusion,
                    statement.clone(),
                    format!(
                        "combined chain of {} rules, steps 0..{}",
                        output.applied.len(),
                        trace.next_index()
                    ),
                    mean,
                );
                output.conclusions.push(Conclusion {
                    statement,
                    confidence: mean.clamp(0.0, 1.0),
                    derived_from,
                    validity: last_rule.validity.label().to_string(),
                });
            }
        }
    }

    output
}

/// Apply one rule: one inference step per antecedent slot, the final slot
/// carrying the consequent, then a conclusion step.
///
/// Returns `Ok(None)` when the instantiated conclusion fails the validity
/// filter, `Err` when the rule cannot be instantiated at all.
fn apply_rule(
    rule: &Rule,
    extraction: &Extraction,
    binder: &dyn SlotBinder,
    trace: &mut ProofTrace,
    chain_start: usize,
) -> Result<Option<Conclusion>, String> {
    let slots = rule.antecedents.len();
    let mut bound_confidence_sum = 0.0;

    for (i, pattern) in rule.antecedents.iter().enumerate() {
        let unit = binder
            .bind(pattern, &extraction.units)
            .ok_or_else(|| format!("antecedent '{pattern}' no longer binds"))?;
        bound_confidence_sum += unit.confidence;

        let is_final = i + 1 == slots;
        let content = if is_final {
            instantiate(&rule.consequent, extraction)
        } else {
            unit.text.clone()
        };
        let justification = format!(
            "rule {}, slot {} of {}, from steps {}..{}",
            rule.name,
            i + 1,
            slots,
            chain_start.min(trace.next_index()),
            trace.next_index()
        );
        trace.push(StepKind::Inference, content, justification, unit.confidence);
    }

    let statement = instantiate(&rule.consequent, extraction);
    let mean_bound = bound_confidence_sum / slots as f64;
    let confidence = (rule.confidence * mean_bound).clamp(0.0, 1.0);

    if !is_well_formed(&statement) {
        tracing::debug!(rule = %rule.name, %statement, "conclusion rejected by validity filter");
        return Ok(None);
    }

    trace.push(
        StepKind::Conclusion,
        statement.clone(),
        format!("by {} from steps {}..{}", rule.name, chain_start, trace.next_index()),
        confidence,
    );

    Ok(Some(Conclusion {
        statement,
        confidence,
        derived_from: rule.name.clone(),
        validity: rule.validity.label().to_string(),
    }))
}
