//! Per-engine running counters, updated once per reasoning call.
//!
//! Counters are atomics and a `DashMap` so metric updates never serialize
//! the reasoning pipeline itself; only the running mean takes a short lock.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Shared mutable counters for one paradigm engine.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    /// Completed reasoning calls.
    calls: AtomicU64,
    /// Inputs fed through the extractor (including degenerate ones).
    processed: AtomicU64,
    /// Total rules applied across all calls.
    rules_applied: AtomicU64,
    /// Running mean of result confidence.
    mean_confidence: Mutex<f64>,
    /// Per-rule usage counts.
    rule_usage: DashMap<String, u64>,
    /// Per-operator detection counts.
    operator_usage: DashMap<String, u64>,
}

impl EngineMetrics {
    /// Create zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the extractor processed one input.
    pub fn record_processed(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed call: its confidence, fired rules, detected operators.
    pub fn record_call(&self, confidence: f64, rules: &[String], operators: &[String]) {
        let n = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        self.rules_applied
            .fetch_add(rules.len() as u64, Ordering::Relaxed);
        for rule in rules {
            *self.rule_usage.entry(rule.clone()).or_insert(0) += 1;
        }
        for op in operators {
            *self.operator_usage.entry(op.clone()).or_insert(0) += 1;
        }
        let mut mean = self.mean_confidence.lock().expect("metrics poisoned");
        *mean += (confidence - *mean) / n as f64;
    }

    /// Read-only snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let mut rule_usage: Vec<(String, u64)> = self
            .rule_usage
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect();
        rule_usage.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut operator_usage: Vec<(String, u64)> = self
            .operator_usage
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect();
        operator_usage.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        MetricsSnapshot {
            calls: self.calls.load(Ordering::Relaxed),
            processed: self.processed.load(Ordering::Relaxed),
            rules_applied: self.rules_applied.load(Ordering::Relaxed),
            mean_confidence: *self.mean_confidence.lock().expect("metrics poisoned"),
            rule_usage,
            operator_usage,
        }
    }

    /// Reset all counters. Used by idempotent re-initialization.
    pub fn reset(&self) {
        self.calls.store(0, Ordering::Relaxed);
        self.processed.store(0, Ordering::Relaxed);
        self.rules_applied.store(0, Ordering::Relaxed);
        *self.mean_confidence.lock().expect("metrics poisoned") = 0.0;
        self.rule_usage.clear();
        self.operator_usage.clear();
    }
}

/// Point-in-time copy of an engine's counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub calls: u64,
    pub processed: u64,
    pub rules_applied: u64,
    pub mean_confidence: f64,
    /// (rule name, fire count), most used first.
    pub rule_usage: Vec<(String, u64)>,
    /// (operator name, detection count), most used first.
    pub operator_usage: Vec<(String, u64)>,
}

impl std::fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "engine metrics")?;
        writeln!(f, "  calls:           {}", self.calls)?;
        writeln!(f, "  processed:       {}", self.processed)?;
        writeln!(f, "  rules applied:   {}", self.rules_applied)?;
        writeln!(f, "  mean confidence: {:.3}", self.mean_confidence)?;
        for (rule, count) in &self.rule_usage {
            writeln!(f, "  rule {rule}: {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_call_updates_running_mean() {
        let metrics = EngineMetrics::new();
        metrics.record_call(0.8, &[], &[]);
        metrics.record_call(0.4, &[], &[]);

        let snap = metrics.snapshot();
        assert_eq!(snap.calls, 2);
        assert!((snap.mean_confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn rule_usage_counts_per_rule() {
        let metrics = EngineMetrics::new();
        metrics.record_call(0.5, &["modus_ponens".into(), "modus_tollens".into()], &[]);
        metrics.record_call(0.5, &["modus_ponens".into()], &[]);

        let snap = metrics.snapshot();
        assert_eq!(snap.rules_applied, 3);
        assert_eq!(snap.rule_usage[0], ("modus_ponens".to_string(), 2));
    }

    #[test]
    fn reset_zeroes_everything() {
        let metrics = EngineMetrics::new();
        metrics.record_processed();
        metrics.record_call(0.9, &["r".into()], &["IMPLIES".into()]);
        metrics.reset();

        let snap = metrics.snapshot();
        assert_eq!(snap.calls, 0);
        assert_eq!(snap.processed, 0);
        assert_eq!(snap.rules_applied, 0);
        assert_eq!(snap.mean_confidence, 0.0);
        assert!(snap.rule_usage.is_empty());
    }
}
