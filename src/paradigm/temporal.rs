//! Temporal reasoning: event estimation and interval ordering.
//!
//! The augment hook turns each cue-bearing unit into a [`TemporalEvent`]
//! with an estimated timestamp (one day into the future or past of the
//! call's clock, context-fixable) and a coarse duration, then relates event
//! pairs with an interval-overlap table. Timestamps are estimates from
//! keyword cues, not parsed dates.

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::ReasonContext;
use crate::extract::Extraction;
use crate::operator::{Operator, TemporalDirection};
use crate::outcome::{Alternative, Conclusion};
use crate::paradigm::{Augmentation, Paradigm, ParadigmKind};
use crate::rule::{Rule, Validity};
use crate::score::ScoreWeights;
use crate::trace::{ProofTrace, StepKind};

const FUTURE_CUES: &[&str] = &["will", "going to", "tomorrow", "soon", "next "];
const PAST_CUES: &[&str] = &["was", "did", "finished", "yesterday", "ago", "happened"];
const ALWAYS_CUES: &[&str] = &["always", "forever", "constantly"];
const CONCURRENT_CUES: &[&str] = &["while", "during", "meanwhile"];

/// Estimated offset for future/past events without an explicit date.
const ESTIMATE_OFFSET_DAYS: i64 = 1;

const SECS_HOUR: i64 = 3_600;
const SECS_YEAR: i64 = 31_536_000;

/// One event on the estimated timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalEvent {
    /// Event identifier ("e0", "e1", … for input-derived events).
    pub id: String,
    /// The event text.
    pub description: String,
    /// Estimated start time.
    pub timestamp: DateTime<Utc>,
    /// Estimated duration in seconds (0 for point events).
    pub duration_secs: i64,
    /// Confidence inherited from the source unit.
    pub confidence: f64,
}

impl TemporalEvent {
    /// Estimated end time.
    pub fn end(&self) -> DateTime<Utc> {
        self.timestamp + Duration::seconds(self.duration_secs)
    }
}

/// How two event intervals relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Before,
    After,
    Overlaps,
    During,
    Starts,
    Equals,
}

impl RelationKind {
    /// Phrase used in ordering conclusions ("a <phrase> b").
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Before => "occurs before",
            Self::After => "occurs after",
            Self::Overlaps => "overlaps with",
            Self::During => "occurs during",
            Self::Starts => "starts together with",
            Self::Equals => "coincides with",
        }
    }
}

/// An ordering judgement between two events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalRelation {
    pub from: String,
    pub to: String,
    pub kind: RelationKind,
}

/// Relate interval `a` to interval `b`.
pub fn relate(a: &TemporalEvent, b: &TemporalEvent) -> RelationKind {
    if a.timestamp == b.timestamp && a.end() == b.end() {
        return RelationKind::Equals;
    }
    if a.end() <= b.timestamp {
        return RelationKind::Before;
    }
    if b.end() <= a.timestamp {
        return RelationKind::After;
    }
    if a.timestamp == b.timestamp {
        return RelationKind::Starts;
    }
    if a.timestamp > b.timestamp && a.end() < b.end() {
        return RelationKind::During;
    }
    RelationKind::Overlaps
}

/// The temporal logic paradigm.
#[derive(Debug, Default)]
pub struct Temporal {
    /// Administratively-added events, merged into every call's timeline.
    seeded_events: RwLock<Vec<TemporalEvent>>,
}

impl Temporal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Administrative mutation: register a standing event.
    pub fn add_temporal_event(&self, event: TemporalEvent) {
        self.seeded_events
            .write()
            .expect("temporal event store poisoned")
            .push(event);
    }

    /// Estimate a timestamp from keyword cues relative to `now`.
    pub fn estimate_timestamp(lowered: &str, now: DateTime<Utc>) -> (DateTime<Utc>, TemporalDirection) {
        if FUTURE_CUES.iter().any(|c| lowered.contains(c)) {
            return (now + Duration::days(ESTIMATE_OFFSET_DAYS), TemporalDirection::Future);
        }
        if PAST_CUES.iter().any(|c| lowered.contains(c)) {
            return (now - Duration::days(ESTIMATE_OFFSET_DAYS), TemporalDirection::Past);
        }
        (now, TemporalDirection::Present)
    }

    /// Coarse duration estimate: always-style cues span a year, concurrent
    /// markers span an hour, everything else is a point event.
    pub fn estimate_duration(lowered: &str) -> i64 {
        if ALWAYS_CUES.iter().any(|c| lowered.contains(c)) {
            SECS_YEAR
        } else if CONCURRENT_CUES.iter().any(|c| lowered.contains(c)) {
            SECS_HOUR
        } else {
            0
        }
    }

    /// Build the per-call timeline: one event per cue-bearing unit, with the
    /// standing events appended.
    pub fn build_events(&self, extraction: &Extraction, now: DateTime<Utc>) -> Vec<TemporalEvent> {
        let mut events = Vec::new();
        for unit in &extraction.units {
            let lowered = unit.lowered();
            let (timestamp, direction) = Self::estimate_timestamp(&lowered, now);
            if direction == TemporalDirection::Present
                && !lowered.contains("now")
                && !lowered.contains("currently")
            {
                continue;
            }
            events.push(TemporalEvent {
                id: format!("e{}", events.len()),
                description: unit.text.clone(),
                timestamp,
                duration_secs: Self::estimate_duration(&lowered),
                confidence: unit.confidence,
            });
        }
        events.extend(
            self.seeded_events
                .read()
                .expect("temporal event store poisoned")
                .iter()
                .cloned(),
        );
        events
    }

    /// Pairwise relations over the timeline, in event order.
    pub fn relations(events: &[TemporalEvent]) -> Vec<TemporalRelation> {
        let mut relations = Vec::new();
        for i in 0..events.len() {
            for j in (i + 1)..events.len() {
                relations.push(TemporalRelation {
                    from: events[i].id.clone(),
                    to: events[j].id.clone(),
                    kind: relate(&events[i], &events[j]),
                });
            }
        }
        relations
    }
}

impl Paradigm for Temporal {
    fn kind(&self) -> ParadigmKind {
        ParadigmKind::Temporal
    }

    fn logic_label(&self) -> &'static str {
        "temporal"
    }

    fn uncertainty_kind(&self) -> &'static str {
        "temporal"
    }

    fn weights(&self) -> ScoreWeights {
        ScoreWeights::OPERATOR_DRIVEN
    }

    fn operator_driven(&self) -> bool {
        true
    }

    fn operators(&self) -> Vec<Operator> {
        vec![
            Operator::new("FUTURE", "F", 0.8, &["will", "going to", "tomorrow"])
                .with_direction(TemporalDirection::Future)
                .with_dual("PAST"),
            Operator::new("PAST", "P", 0.8, &["was", "did", "finished", "yesterday", "ago"])
                .with_direction(TemporalDirection::Past)
                .with_dual("FUTURE"),
            Operator::new("ALWAYS", "G", 0.9, &["always", "forever", "constantly"]),
            Operator::new("EVENTUALLY", "E", 0.7, &["eventually", "sooner or later", "at some point"]),
            Operator::new("UNTIL", "U", 0.75, &["until"]),
            Operator::new("WHILE", "W", 0.7, &["while", "during", "meanwhile"]),
        ]
    }

    fn rules(&self) -> Vec<Rule> {
        vec![
            Rule::new(
                "future_projection",
                &["X will Y"],
                "P is expected to occur",
                0.8,
                Validity::Inductive,
            ),
            Rule::new(
                "past_grounding",
                &["X was Y"],
                "P held at an earlier time",
                0.85,
                Validity::Inductive,
            ),
            Rule::new(
                "always_generalization",
                &["X always Y"],
                "P holds at every time",
                0.85,
                Validity::Inductive,
            ),
            Rule::new(
                "until_persistence",
                &["X until Y"],
                "P keeps holding up to its bound",
                0.75,
                Validity::Heuristic,
            ),
        ]
    }

    fn augment(
        &self,
        _input: &str,
        extraction: &Extraction,
        context: Option<&ReasonContext>,
        trace: &mut ProofTrace,
    ) -> Augmentation {
        let mut augmentation = Augmentation::default();
        let now = context.map(ReasonContext::effective_now).unwrap_or_else(Utc::now);

        let events = self.build_events(extraction, now);
        for event in &events {
            trace.push(
                StepKind::Inference,
                format!("event {} at {}", event.id, event.timestamp.to_rfc3339()),
                "timestamp estimated from temporal cues".to_string(),
                event.confidence,
            );
            augmentation.alternatives.push(
                Alternative::new(format!("timeline: {}", event.description), event.confidence)
                    .with_detail("timestamp", Value::from(event.timestamp.to_rfc3339()))
                    .with_detail("duration_secs", Value::from(event.duration_secs)),
            );
        }

        for relation in Self::relations(&events) {
            let from = events.iter().find(|e| e.id == relation.from);
            let to = events.iter().find(|e| e.id == relation.to);
            let (Some(from), Some(to)) = (from, to) else { continue };
            augmentation.conclusions.push(Conclusion {
                statement: format!(
                    "'{}' {} '{}'",
                    from.description,
                    relation.kind.phrase(),
                    to.description
                ),
                confidence: (from.confidence + to.confidence) / 2.0,
                derived_from: "temporal_ordering".into(),
                validity: Validity::Inductive.label().to_string(),
            });
            augmentation
                .evidence
                .push(format!("{} {:?} {}", relation.from, relation.kind, relation.to));
        }

        augmentation
    }
}
