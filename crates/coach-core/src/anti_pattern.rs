//! Anti-Pattern Detector: picks the single most urgent conversation-health emergency.
//!
//! Not scored. Every definition whose triggers match is a candidate; the highest priority band
//! wins outright (critical > high > medium) and the first-declared definition wins inside a band.

use crate::catalog::{AntiPatternDefinition, AntiPatternPriority, PatternCatalog};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The winning anti-pattern for an utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntiPatternHit {
    pub id: String,
    pub name: String,
    pub priority: AntiPatternPriority,
    pub instruction: String,
    /// Source of the trigger that fired.
    pub trigger: String,
}

impl AntiPatternHit {
    fn from_definition(def: &AntiPatternDefinition, trigger: &str) -> Self {
        Self {
            id: def.id().to_string(),
            name: def.name().to_string(),
            priority: def.priority(),
            instruction: def.instruction().to_string(),
            trigger: trigger.to_string(),
        }
    }
}

/// Scans every anti-pattern in `catalog` and returns at most one hit.
pub fn detect_anti_pattern(utterance: &str, catalog: &PatternCatalog) -> Option<AntiPatternHit> {
    let mut best: Option<(&AntiPatternDefinition, &str)> = None;
    for def in catalog.anti_patterns() {
        let Some(trigger) = def.triggered_by(utterance) else {
            continue;
        };
        let outranks = best.map_or(true, |(b, _)| def.priority().rank() > b.priority().rank());
        if outranks {
            best = Some((def, trigger.source()));
        }
    }
    let (def, trigger) = best?;
    debug!(id = def.id(), priority = def.priority().as_str(), "anti-pattern fired");
    Some(AntiPatternHit::from_definition(def, trigger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AntiPatternSpec;

    fn spec(id: &str, priority: AntiPatternPriority, trigger: &str) -> AntiPatternSpec {
        AntiPatternSpec {
            id: id.to_string(),
            name: id.to_string(),
            priority,
            triggers: vec![trigger.to_string()],
            instruction: format!("fix {}", id),
        }
    }

    #[test]
    fn nothing_fires_on_plain_text() {
        assert!(detect_anti_pattern("buongiorno a tutti", PatternCatalog::builtin()).is_none());
    }

    #[test]
    fn critical_beats_medium_regardless_of_order() {
        let catalog = PatternCatalog::from_specs(
            "t",
            &[],
            &[
                spec("minor", AntiPatternPriority::Medium, "uffa"),
                spec("major", AntiPatternPriority::Critical, "basta"),
            ],
        )
        .unwrap();
        let hit = detect_anti_pattern("uffa, basta!", &catalog).unwrap();
        assert_eq!(hit.id, "major");
        assert_eq!(hit.priority, AntiPatternPriority::Critical);
    }

    #[test]
    fn first_declared_wins_within_a_band() {
        let catalog = PatternCatalog::from_specs(
            "t",
            &[],
            &[
                spec("first", AntiPatternPriority::High, "basta"),
                spec("second", AntiPatternPriority::High, "basta"),
            ],
        )
        .unwrap();
        assert_eq!(detect_anti_pattern("basta", &catalog).unwrap().id, "first");
    }

    #[test]
    fn builtin_repeated_objection() {
        let hit = detect_anti_pattern("l'ho già detto che non ho budget", PatternCatalog::builtin()).unwrap();
        assert_eq!(hit.id, "repeated_objection");
        assert_eq!(hit.priority, AntiPatternPriority::Critical);
        assert!(hit.instruction.starts_with("🚨 OBIEZIONE RIPETUTA!"));
    }

    #[test]
    fn builtin_critical_outranks_high() {
        // "ho capito" is losing_prospect (high); "non mi fido" is trust_broken (critical).
        let hit = detect_anti_pattern("ho capito, ma non mi fido", PatternCatalog::builtin()).unwrap();
        assert_eq!(hit.id, "trust_broken");
    }
}
