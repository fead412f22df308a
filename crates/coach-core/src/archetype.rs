//! Prospect archetypes: the closed set of behavioral categories the classifier can assign.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Behavioral category assigned to a prospect from their language.
///
/// `Neutral` is the fallback: it is what an utterance with no firing pattern classifies as,
/// and what any unknown id deserializes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Archetype {
    /// Doubts claims, asks for proof, has been burned before.
    Skeptic,
    /// Short on time; wants the point now.
    Busy,
    /// Anchors the conversation on cost and budget.
    PriceFocused,
    /// Asks how it works: integrations, metrics, process.
    Technical,
    /// Positive energy, curious, ready to move.
    Enthusiast,
    /// Needs to think, consult, wait.
    Indecisive,
    /// Guards against pressure and bad past experiences.
    Defensive,
    /// Wants data, studies, objective criteria.
    Analytical,
    /// Owns the decision and thinks strategically.
    DecisionMaker,
    #[default]
    Neutral,
}

impl Archetype {
    /// Every archetype in declaration order.
    pub const ALL: [Archetype; 10] = [
        Archetype::Skeptic,
        Archetype::Busy,
        Archetype::PriceFocused,
        Archetype::Technical,
        Archetype::Enthusiast,
        Archetype::Indecisive,
        Archetype::Defensive,
        Archetype::Analytical,
        Archetype::DecisionMaker,
        Archetype::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Skeptic => "skeptic",
            Archetype::Busy => "busy",
            Archetype::PriceFocused => "price_focused",
            Archetype::Technical => "technical",
            Archetype::Enthusiast => "enthusiast",
            Archetype::Indecisive => "indecisive",
            Archetype::Defensive => "defensive",
            Archetype::Analytical => "analytical",
            Archetype::DecisionMaker => "decision_maker",
            Archetype::Neutral => "neutral",
        }
    }

    /// Parses a snake_case id (trimmed, case-insensitive). Unknown ids return `None`.
    pub fn from_id(s: &str) -> Option<Self> {
        let s = s.trim();
        Archetype::ALL
            .iter()
            .copied()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
    }

    #[inline]
    pub fn is_neutral(&self) -> bool {
        matches!(self, Archetype::Neutral)
    }
}

impl From<String> for Archetype {
    fn from(s: String) -> Self {
        Archetype::from_id(&s).unwrap_or_default()
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_id() {
        for a in Archetype::ALL {
            assert_eq!(Archetype::from_id(a.as_str()), Some(a));
        }
        assert_eq!(Archetype::from_id("  Price_Focused "), Some(Archetype::PriceFocused));
        assert_eq!(Archetype::from_id("analizzatore"), None);
    }

    #[test]
    fn unknown_id_deserializes_to_neutral() {
        let a: Archetype = serde_json::from_str("\"impaziente\"").unwrap();
        assert_eq!(a, Archetype::Neutral);
        let b: Archetype = serde_json::from_str("\"decision_maker\"").unwrap();
        assert_eq!(b, Archetype::DecisionMaker);
        assert_eq!(serde_json::to_string(&b).unwrap(), "\"decision_maker\"");
    }
}
