//! `CoachingState` and the payload types it aggregates.
//!
//! Buffers are `VecDeque`s kept most-recent-first: new entries go to the front and the tail is
//! truncated to the configured cap. Single-value slots are `Option`s replaced wholesale.

use crate::archetype::Archetype;
use crate::catalog::AntiPatternPriority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::VecDeque;

/// A payload plus the time it was ingested. The timestamp is assigned locally, never taken
/// from upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamped<T> {
    #[serde(flatten)]
    pub inner: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> Stamped<T> {
    pub fn new(inner: T, timestamp: DateTime<Utc>) -> Self {
        Self { inner, timestamp }
    }
}

impl<T> std::ops::Deref for Stamped<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectProfile {
    pub archetype: Archetype,
    /// Always in [0, 1]; out-of-range upstream values are clamped on parse.
    #[serde(deserialize_with = "unit_interval")]
    pub confidence: f32,
    #[serde(default)]
    pub filler: String,
    #[serde(default)]
    pub instruction: String,
}

fn unit_interval<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    let value = f32::deserialize(deserializer)?;
    Ok(if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl From<AntiPatternPriority> for FeedbackPriority {
    fn from(p: AntiPatternPriority) -> Self {
        match p {
            AntiPatternPriority::Critical => Self::Critical,
            AntiPatternPriority::High => Self::High,
            AntiPatternPriority::Medium => Self::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    Correction,
    BuySignal,
    Objection,
    Checkpoint,
    Tone,
    Advancement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingFeedback {
    pub priority: FeedbackPriority,
    #[serde(rename = "type")]
    pub feedback_type: FeedbackType,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone_reminder: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuySignalType {
    PriceInquiry,
    Timeline,
    Interest,
    Commitment,
    Comparison,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuySignal {
    #[serde(rename = "type")]
    pub signal_type: BuySignalType,
    pub phrase: String,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub suggested_action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectionType {
    NoTime,
    NeedToThink,
    TooExpensive,
    NotInterested,
    Competitor,
    Timing,
    Authority,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedObjection {
    #[serde(rename = "type")]
    pub objection_type: ObjectionType,
    pub phrase: String,
    #[serde(default)]
    pub suggested_response: String,
    #[serde(default)]
    pub from_script: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Validated,
    Missing,
    Vague,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointItemDetail {
    pub check: String,
    pub status: ItemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_collected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointStatus {
    pub checkpoint_id: String,
    pub checkpoint_name: String,
    pub is_complete: bool,
    pub missing_items: Vec<String>,
    pub completed_items: Vec<String>,
    pub can_advance: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_details: Option<Vec<CheckpointItemDetail>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptProgress {
    pub current_phase_id: String,
    pub current_phase_name: String,
    pub current_step_id: String,
    pub current_step_name: String,
    pub phase_index: u32,
    pub step_index: u32,
    pub total_phases: u32,
    pub completion_percentage: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepAdvancement {
    pub should_advance: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_phase_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

/// Latest manager reasoning. Fields not modelled here are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_advancement: Option<StepAdvancement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_time_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ManagerAnalysis {
    /// Builds the slot from a whole payload. When the known fields do not have the expected
    /// shape the payload is kept verbatim in `extra`, so the slot is still replaced.
    pub fn from_payload(fields: &Map<String, Value>) -> Self {
        Self::deserialize(Value::Object(fields.clone())).unwrap_or_else(|_| Self {
            step_advancement: None,
            analysis_time_ms: None,
            model_used: None,
            extra: fields.clone(),
        })
    }
}

/// Ring-buffer capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferLimits {
    pub feedback_history: usize,
    pub buy_signals: usize,
    pub objections: usize,
    pub tone_warnings: usize,
}

impl Default for BufferLimits {
    fn default() -> Self {
        Self {
            feedback_history: 20,
            buy_signals: 10,
            objections: 10,
            tone_warnings: 5,
        }
    }
}

/// Aggregate root read by the coaching surface. `Default` is the documented initial state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingState {
    pub is_active: bool,
    pub script_progress: Option<ScriptProgress>,
    pub buy_signals: VecDeque<Stamped<BuySignal>>,
    pub objections: VecDeque<Stamped<DetectedObjection>>,
    pub checkpoint_status: Option<CheckpointStatus>,
    pub prospect_profile: Option<ProspectProfile>,
    pub current_feedback: Option<Stamped<CoachingFeedback>>,
    pub feedback_history: VecDeque<Stamped<CoachingFeedback>>,
    pub tone_warnings: VecDeque<String>,
    pub manager_analysis: Option<ManagerAnalysis>,
}

pub(crate) fn push_capped<T>(buf: &mut VecDeque<T>, item: T, cap: usize) {
    buf.push_front(item);
    buf.truncate(cap);
}

impl CoachingState {
    /// Clears `current_feedback`; history is untouched. Returns whether anything was cleared.
    pub fn dismiss_feedback(&mut self) -> bool {
        self.current_feedback.take().is_some()
    }

    /// Removes the buy signal at `index`. Later entries shift down by one.
    /// Out-of-range indices are a no-op.
    pub fn dismiss_buy_signal(&mut self, index: usize) -> bool {
        self.buy_signals.remove(index).is_some()
    }

    pub fn dismiss_objection(&mut self, index: usize) -> bool {
        self.objections.remove(index).is_some()
    }

    pub fn clear_tone_warnings(&mut self) -> bool {
        let had_any = !self.tone_warnings.is_empty();
        self.tone_warnings.clear();
        had_any
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_initial(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(phrase: &str) -> Stamped<BuySignal> {
        Stamped::new(
            BuySignal {
                signal_type: BuySignalType::Interest,
                phrase: phrase.to_string(),
                confidence: 0.8,
                suggested_action: String::new(),
            },
            Utc::now(),
        )
    }

    #[test]
    fn push_capped_keeps_most_recent_first() {
        let mut buf = VecDeque::new();
        for i in 0..7 {
            push_capped(&mut buf, i, 5);
        }
        assert_eq!(buf, VecDeque::from(vec![6, 5, 4, 3, 2]));
    }

    #[test]
    fn dismiss_out_of_range_is_noop() {
        let mut state = CoachingState::default();
        state.buy_signals.push_back(signal("a"));
        assert!(!state.dismiss_buy_signal(3));
        assert_eq!(state.buy_signals.len(), 1);
        assert!(!state.dismiss_objection(0));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut state = CoachingState::default();
        state.buy_signals.push_front(signal("quando possiamo partire?"));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["isActive"], false);
        assert!(json["prospectProfile"].is_null());
        assert_eq!(json["buySignals"][0]["type"], "interest");
        assert_eq!(json["buySignals"][0]["phrase"], "quando possiamo partire?");
        assert!(json["buySignals"][0]["timestamp"].is_string());
        assert!(json["toneWarnings"].as_array().unwrap().is_empty());
    }

    #[test]
    fn unknown_objection_type_is_other() {
        let o: DetectedObjection =
            serde_json::from_value(serde_json::json!({"type": "budget_freeze", "phrase": "x"})).unwrap();
        assert_eq!(o.objection_type, ObjectionType::Other);
        assert!(!o.from_script);
    }

    #[test]
    fn manager_analysis_keeps_unmodelled_fields() {
        let a: ManagerAnalysis = serde_json::from_value(serde_json::json!({
            "analysisTimeMs": 840,
            "modelUsed": "fast",
            "checkpointUpdate": {"id": "cp1"}
        }))
        .unwrap();
        assert_eq!(a.analysis_time_ms, Some(840));
        assert!(a.step_advancement.is_none());
        assert_eq!(a.extra["checkpointUpdate"]["id"], "cp1");
    }

    #[test]
    fn profile_confidence_is_clamped_to_unit_interval() {
        let high: ProspectProfile =
            serde_json::from_value(serde_json::json!({"archetype": "busy", "confidence": 7.5})).unwrap();
        assert_eq!(high.confidence, 1.0);
        let low: ProspectProfile =
            serde_json::from_value(serde_json::json!({"archetype": "busy", "confidence": -2.0})).unwrap();
        assert_eq!(low.confidence, 0.0);
    }

    #[test]
    fn step_advancement_accepts_nulls() {
        let a = ManagerAnalysis::from_payload(
            serde_json::json!({
                "analysisTimeMs": 812,
                "stepAdvancement": {
                    "shouldAdvance": false,
                    "nextPhaseId": null,
                    "nextStepId": null,
                    "confidence": null,
                    "reasoning": null
                }
            })
            .as_object()
            .unwrap(),
        );
        assert_eq!(a.analysis_time_ms, Some(812));
        let step = a.step_advancement.unwrap();
        assert!(!step.should_advance);
        assert!(step.confidence.is_none());
        assert!(step.reasoning.is_none());
    }

    #[test]
    fn unexpected_analysis_shape_is_kept_verbatim() {
        let payload = serde_json::json!({
            "analysisTimeMs": "slow",
            "stepAdvancement": {"shouldAdvance": null}
        });
        let a = ManagerAnalysis::from_payload(payload.as_object().unwrap());
        assert!(a.step_advancement.is_none());
        assert!(a.analysis_time_ms.is_none());
        assert_eq!(serde_json::to_value(&a).unwrap(), payload);
    }
}
