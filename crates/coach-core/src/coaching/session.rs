//! Session adapter: owns the one `CoachingState` of a live call and is its only writer.

use super::event::{EventKind, InboundEvent};
use super::reducer::{reduce, Disposition};
use super::state::{BufferLimits, CoachingState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Caller commands from the coaching surface.
///
/// Wire form: `{"command": "dismiss_buy_signal", "index": 0}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SessionCommand {
    DismissFeedback,
    DismissBuySignal { index: usize },
    DismissObjection { index: usize },
    ClearToneWarnings,
    Reset,
}

/// Uncapped per-session totals. Reset together with the state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub started_at: Option<DateTime<Utc>>,
    pub events_applied: u64,
    pub events_ignored: u64,
    pub feedback: u64,
    pub buy_signals: u64,
    pub objections: u64,
    pub tone_warnings: u64,
}

#[derive(Debug, Default)]
pub struct CoachingSession {
    state: CoachingState,
    limits: BufferLimits,
    stats: SessionStats,
}

impl CoachingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: BufferLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Stamps `event` with the current time and applies it.
    pub fn ingest(&mut self, event: InboundEvent) -> Disposition {
        self.ingest_at(event, Utc::now())
    }

    pub fn ingest_at(&mut self, event: InboundEvent, now: DateTime<Utc>) -> Disposition {
        let was_active = self.state.is_active;
        let (next, disposition) = reduce(std::mem::take(&mut self.state), &event, now, &self.limits);
        self.state = next;

        match disposition {
            Disposition::Applied(EventKind::CoachingSessionEnd) => {
                self.finish("coaching_session_end");
                return disposition;
            }
            Disposition::Applied(kind) => {
                self.stats.events_applied += 1;
                match kind {
                    EventKind::SalesCoaching => self.stats.feedback += 1,
                    EventKind::BuySignal => self.stats.buy_signals += 1,
                    EventKind::ObjectionDetected => self.stats.objections += 1,
                    EventKind::ToneWarning => self.stats.tone_warnings += 1,
                    _ => {}
                }
            }
            Disposition::EmbeddedOnly => self.stats.events_applied += 1,
            Disposition::Ignored => self.stats.events_ignored += 1,
        }

        if !was_active && self.state.is_active {
            self.stats.started_at = Some(now);
            info!(trigger = %event.event_type, "coaching session started");
        }
        disposition
    }

    /// Runs a caller command. Returns whether the state changed.
    pub fn execute(&mut self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::DismissFeedback => self.state.dismiss_feedback(),
            SessionCommand::DismissBuySignal { index } => self.state.dismiss_buy_signal(index),
            SessionCommand::DismissObjection { index } => self.state.dismiss_objection(index),
            SessionCommand::ClearToneWarnings => self.state.clear_tone_warnings(),
            SessionCommand::Reset => {
                let changed = !self.state.is_initial();
                self.state.reset();
                self.finish("reset");
                changed
            }
        }
    }

    pub fn state(&self) -> &CoachingState {
        &self.state
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn limits(&self) -> &BufferLimits {
        &self.limits
    }

    fn finish(&mut self, reason: &str) {
        let stats = std::mem::take(&mut self.stats);
        info!(
            reason,
            events_applied = stats.events_applied,
            events_ignored = stats.events_ignored,
            feedback = stats.feedback,
            buy_signals = stats.buy_signals,
            objections = stats.objections,
            tone_warnings = stats.tone_warnings,
            "coaching session ended"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_and_clears_stats() {
        let mut session = CoachingSession::new();
        session.ingest(InboundEvent::new("coaching_session_start", json!(null)));
        session.ingest(InboundEvent::new("tone_warning", json!({"message": "più lento"})));
        session.ingest(InboundEvent::new("mystery", json!({})));
        assert!(session.stats().started_at.is_some());
        assert_eq!(session.stats().events_applied, 2);
        assert_eq!(session.stats().events_ignored, 1);
        assert_eq!(session.stats().tone_warnings, 1);

        session.ingest(InboundEvent::new("coaching_session_end", json!(null)));
        assert_eq!(session.stats(), &SessionStats::default());
        assert!(session.state().is_initial());
    }

    #[test]
    fn commands_parse_from_wire_form() {
        let cmd: SessionCommand =
            serde_json::from_str(r#"{"command":"dismiss_buy_signal","index":2}"#).unwrap();
        assert_eq!(cmd, SessionCommand::DismissBuySignal { index: 2 });
        let cmd: SessionCommand = serde_json::from_str(r#"{"command":"reset"}"#).unwrap();
        assert_eq!(cmd, SessionCommand::Reset);
    }

    #[test]
    fn dismiss_feedback_keeps_history() {
        let mut session = CoachingSession::new();
        session.ingest(InboundEvent::new(
            "sales_coaching",
            json!({"priority": "low", "type": "tone", "message": "sorridi"}),
        ));
        assert!(session.execute(SessionCommand::DismissFeedback));
        assert!(session.state().current_feedback.is_none());
        assert_eq!(session.state().feedback_history.len(), 1);
        assert!(!session.execute(SessionCommand::DismissFeedback));
    }

    #[test]
    fn custom_limits_apply() {
        let mut session = CoachingSession::with_limits(BufferLimits {
            tone_warnings: 2,
            ..BufferLimits::default()
        });
        for m in ["a", "b", "c"] {
            session.ingest(InboundEvent::new("tone_warning", json!({ "message": m })));
        }
        assert_eq!(session.state().tone_warnings, vec!["c".to_string(), "b".to_string()]);
    }
}
