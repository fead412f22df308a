//! The pure aggregation step: `(state, event) -> state'`.
//!
//! One event is applied completely before the call returns, so a caller holding the previous
//! snapshot never sees a half-applied event. Besides the type-driven branch, every event except
//! `coaching_session_end` goes through the embedded-field check: a `data.prospectProfile`
//! object replaces the prospect profile, and a payload carrying `stepAdvancement` or
//! `analysisTimeMs` replaces the manager analysis. One event can therefore update two slots.

use super::event::{EventKind, InboundEvent};
use super::state::{
    push_capped, BufferLimits, BuySignal, CheckpointStatus, CoachingFeedback, CoachingState,
    DetectedObjection, ManagerAnalysis, ProspectProfile, ScriptProgress, Stamped,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

/// What [`reduce`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "disposition", content = "kind", rename_all = "snake_case")]
pub enum Disposition {
    /// The type-driven branch ran.
    Applied(EventKind),
    /// Unknown type or malformed payload, but an embedded field updated a slot.
    EmbeddedOnly,
    /// Nothing changed.
    Ignored,
}

/// Applies one event stamped at `now`. Never fails: unknown types and malformed payloads
/// leave the corresponding branch untouched.
pub fn reduce(
    mut state: CoachingState,
    event: &InboundEvent,
    now: DateTime<Utc>,
    limits: &BufferLimits,
) -> (CoachingState, Disposition) {
    let kind = event.kind();

    if kind == Some(EventKind::CoachingSessionEnd) {
        trace!(event = "coaching_session_end", "state reset");
        return (
            CoachingState::default(),
            Disposition::Applied(EventKind::CoachingSessionEnd),
        );
    }

    let applied = match kind {
        Some(k) if apply_kind(&mut state, k, &event.data, now, limits) => Some(k),
        Some(k) => {
            debug!(event = k.as_str(), "malformed payload, branch skipped");
            None
        }
        None => {
            debug!(event = %event.event_type, "unrecognized event type");
            None
        }
    };
    if applied.is_some() {
        state.is_active = true;
    }

    let embedded = apply_embedded(&mut state, &event.data);

    let disposition = match (applied, embedded) {
        (Some(k), _) => Disposition::Applied(k),
        (None, true) => Disposition::EmbeddedOnly,
        (None, false) => Disposition::Ignored,
    };
    trace!(event = %event.event_type, ?disposition, "event reduced");
    (state, disposition)
}

fn parse<T: DeserializeOwned>(data: &Value) -> Option<T> {
    T::deserialize(data).ok()
}

/// Runs the type-driven branch. Returns false (with `state` untouched) when the payload
/// does not have the expected shape.
fn apply_kind(
    state: &mut CoachingState,
    kind: EventKind,
    data: &Value,
    now: DateTime<Utc>,
    limits: &BufferLimits,
) -> bool {
    match kind {
        EventKind::SalesCoaching => {
            let Some(feedback) = parse::<CoachingFeedback>(data) else {
                return false;
            };
            let stamped = Stamped::new(feedback, now);
            state.current_feedback = Some(stamped.clone());
            push_capped(&mut state.feedback_history, stamped, limits.feedback_history);
        }
        EventKind::BuySignal => {
            let Some(signal) = parse::<BuySignal>(data) else {
                return false;
            };
            push_capped(&mut state.buy_signals, Stamped::new(signal, now), limits.buy_signals);
        }
        EventKind::ObjectionDetected => {
            let Some(objection) = parse::<DetectedObjection>(data) else {
                return false;
            };
            push_capped(&mut state.objections, Stamped::new(objection, now), limits.objections);
        }
        EventKind::CheckpointStatus => {
            let Some(status) = parse::<CheckpointStatus>(data) else {
                return false;
            };
            state.checkpoint_status = Some(status);
        }
        EventKind::ProspectProfile => {
            let Some(profile) = parse::<ProspectProfile>(data) else {
                return false;
            };
            state.prospect_profile = Some(profile);
        }
        EventKind::ToneWarning => {
            let Some(message) = data.get("message").and_then(Value::as_str) else {
                return false;
            };
            push_capped(&mut state.tone_warnings, message.to_string(), limits.tone_warnings);
        }
        EventKind::ScriptProgressUpdate => {
            let Some(progress) = parse::<ScriptProgress>(data) else {
                return false;
            };
            state.script_progress = Some(progress);
        }
        EventKind::CoachingSessionStart => {}
        // Handled before dispatch.
        EventKind::CoachingSessionEnd => return false,
    }
    true
}

fn apply_embedded(state: &mut CoachingState, data: &Value) -> bool {
    let Some(fields) = data.as_object() else {
        return false;
    };
    let mut touched = false;

    if let Some(profile) = fields
        .get("prospectProfile")
        .filter(|v| v.is_object())
        .and_then(parse::<ProspectProfile>)
    {
        state.prospect_profile = Some(profile);
        touched = true;
    }

    if fields.contains_key("stepAdvancement") || fields.contains_key("analysisTimeMs") {
        state.manager_analysis = Some(ManagerAnalysis::from_payload(fields));
        touched = true;
    }
    touched
}
