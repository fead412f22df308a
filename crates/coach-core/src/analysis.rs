//! Utterance Analyzer: runs the classifier and the anti-pattern detector on one utterance and
//! turns their outputs into the events the aggregator consumes.

use crate::anti_pattern::{detect_anti_pattern, AntiPatternHit};
use crate::catalog::PatternCatalog;
use crate::classifier::{classify, Classification};
use crate::coaching::{EventKind, FeedbackPriority, FeedbackType, InboundEvent};
use crate::config::CoachConfig;
use crate::playbook::PlaybookTable;
use serde_json::{json, Value};
use tracing::debug;

/// Both detector outputs plus the derived events, in emission order.
#[derive(Debug, Clone)]
pub struct UtteranceAnalysis {
    pub classification: Classification,
    pub anti_pattern: Option<AntiPatternHit>,
    pub events: Vec<InboundEvent>,
}

#[derive(Debug, Clone, Copy)]
pub struct UtteranceAnalyzer<'a> {
    catalog: &'a PatternCatalog,
    playbooks: &'a PlaybookTable,
    min_profile_confidence: f32,
    tone_reminder_on_corrections: bool,
}

impl<'a> UtteranceAnalyzer<'a> {
    pub fn new(catalog: &'a PatternCatalog, playbooks: &'a PlaybookTable) -> Self {
        Self {
            catalog,
            playbooks,
            min_profile_confidence: 0.0,
            tone_reminder_on_corrections: true,
        }
    }

    pub fn from_config(
        config: &CoachConfig,
        catalog: &'a PatternCatalog,
        playbooks: &'a PlaybookTable,
    ) -> Self {
        Self::new(catalog, playbooks)
            .with_min_profile_confidence(config.min_profile_confidence)
            .with_tone_reminders(config.tone_reminder_on_corrections)
    }

    /// Non-neutral classifications below `floor` produce no `prospect_profile` event.
    pub fn with_min_profile_confidence(mut self, floor: f32) -> Self {
        self.min_profile_confidence = floor.clamp(0.0, 1.0);
        self
    }

    pub fn with_tone_reminders(mut self, enabled: bool) -> Self {
        self.tone_reminder_on_corrections = enabled;
        self
    }

    /// `turn` selects the filler phrase; pass a per-session utterance counter.
    pub fn analyze(&self, utterance: &str, turn: usize) -> UtteranceAnalysis {
        let classification = classify(utterance, self.catalog);
        let anti_pattern = detect_anti_pattern(utterance, self.catalog);

        let mut events = Vec::with_capacity(2);
        if let Some(event) = self.profile_event(&classification, turn) {
            events.push(event);
        }
        if let Some(hit) = &anti_pattern {
            events.push(self.correction_event(hit, &classification));
        }

        UtteranceAnalysis {
            classification,
            anti_pattern,
            events,
        }
    }

    fn profile_event(&self, classification: &Classification, turn: usize) -> Option<InboundEvent> {
        let archetype = classification.archetype;
        if archetype.is_neutral() {
            return None;
        }
        if classification.confidence < self.min_profile_confidence {
            debug!(
                archetype = archetype.as_str(),
                confidence = classification.confidence,
                floor = self.min_profile_confidence,
                "classification below confidence floor"
            );
            return None;
        }
        let playbook = self.playbooks.resolve(archetype);
        Some(InboundEvent::of_kind(
            EventKind::ProspectProfile,
            json!({
                "archetype": archetype.as_str(),
                "confidence": wire_confidence(classification.confidence),
                "filler": self.playbooks.filler(archetype, turn),
                "instruction": playbook.instruction,
            }),
        ))
    }

    fn correction_event(&self, hit: &AntiPatternHit, classification: &Classification) -> InboundEvent {
        let mut data = json!({
            "priority": FeedbackPriority::from(hit.priority),
            "type": FeedbackType::Correction,
            "message": hit.instruction,
        });
        if self.tone_reminder_on_corrections {
            data["toneReminder"] = Value::String(self.playbooks.tone_reminder(classification.archetype));
        }
        InboundEvent::of_kind(EventKind::SalesCoaching, data)
    }
}

/// Widens to f64 rounded to six decimals, so 0.4_f32 goes out as 0.4 rather than
/// 0.4000000059604645.
fn wire_confidence(confidence: f32) -> f64 {
    (f64::from(confidence) * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::Archetype;

    fn analyzer() -> UtteranceAnalyzer<'static> {
        UtteranceAnalyzer::new(PatternCatalog::builtin(), PlaybookTable::builtin())
    }

    #[test]
    fn neutral_utterance_emits_nothing() {
        let a = analyzer().analyze("ok", 0);
        assert_eq!(a.classification.archetype, Archetype::Neutral);
        assert!(a.anti_pattern.is_none());
        assert!(a.events.is_empty());
    }

    #[test]
    fn profile_then_correction() {
        let a = analyzer().analyze("l'ho già detto che non ho budget", 1);
        let kinds: Vec<_> = a.events.iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![Some(EventKind::ProspectProfile), Some(EventKind::SalesCoaching)]
        );
        assert_eq!(a.events[0].data["archetype"], "price_focused");
        assert_eq!(a.events[0].data["filler"], "Certo...");
        assert_eq!(a.events[0].data["confidence"], json!(0.4));
        assert_eq!(a.events[1].data["priority"], "critical");
        assert_eq!(a.events[1].data["type"], "correction");
        assert!(a.events[1].data["toneReminder"]
            .as_str()
            .unwrap()
            .starts_with("🎭 TONO: Focus Prezzo"));
    }

    #[test]
    fn confidence_floor_gates_profile_only() {
        let a = analyzer()
            .with_min_profile_confidence(0.5)
            .with_tone_reminders(false)
            .analyze("l'ho già detto che non ho budget", 0);
        assert_eq!(a.classification.archetype, Archetype::PriceFocused);
        assert_eq!(a.events.len(), 1);
        assert_eq!(a.events[0].kind(), Some(EventKind::SalesCoaching));
        assert!(a.events[0].data.get("toneReminder").is_none());
    }
}
