//! Inbound `{type, data}` events as they arrive from the analysis pipeline.

use crate::error::CoachResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Raw tagged event. `event_type` stays a string so unknown types survive parsing and can
/// still go through the embedded-field check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: Value,
}

impl InboundEvent {
    pub fn new(event_type: impl Into<String>, data: Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    pub fn of_kind(kind: EventKind, data: Value) -> Self {
        Self::new(kind.as_str(), data)
    }

    pub fn from_json(line: &str) -> CoachResult<Self> {
        Ok(serde_json::from_str(line)?)
    }

    /// Recognized kind, or `None` for a type this build does not handle.
    pub fn kind(&self) -> Option<EventKind> {
        EventKind::from_type(&self.event_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SalesCoaching,
    BuySignal,
    ObjectionDetected,
    CheckpointStatus,
    ProspectProfile,
    ToneWarning,
    ScriptProgressUpdate,
    CoachingSessionStart,
    CoachingSessionEnd,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::SalesCoaching,
        EventKind::BuySignal,
        EventKind::ObjectionDetected,
        EventKind::CheckpointStatus,
        EventKind::ProspectProfile,
        EventKind::ToneWarning,
        EventKind::ScriptProgressUpdate,
        EventKind::CoachingSessionStart,
        EventKind::CoachingSessionEnd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::SalesCoaching => "sales_coaching",
            EventKind::BuySignal => "buy_signal",
            EventKind::ObjectionDetected => "objection_detected",
            EventKind::CheckpointStatus => "checkpoint_status",
            EventKind::ProspectProfile => "prospect_profile",
            EventKind::ToneWarning => "tone_warning",
            EventKind::ScriptProgressUpdate => "script_progress_update",
            EventKind::CoachingSessionStart => "coaching_session_start",
            EventKind::CoachingSessionEnd => "coaching_session_end",
        }
    }

    /// Exact match on the wire type string.
    pub fn from_type(s: &str) -> Option<Self> {
        EventKind::ALL.iter().copied().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
