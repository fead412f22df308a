//! Archetype Classifier: weighted pattern scoring with negation vetoes.
//!
//! For each archetype, the weights of its firing patterns are summed and capped at 1.0.
//! The highest score wins; ties go to the archetype declared first in the catalog.
//! Nothing firing means `neutral` with confidence 0. Pure function of (utterance, catalog).

use crate::archetype::Archetype;
use crate::catalog::PatternCatalog;
use serde::{Deserialize, Serialize};

/// One firing pattern that contributed to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternEvidence {
    /// Index of the pattern in the catalog's archetype pattern list.
    pub pattern_index: usize,
    /// Source of the positive matcher that fired.
    pub matcher: String,
    pub weight: f32,
}

/// Scored archetype decision for one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub archetype: Archetype,
    /// Winning raw score, already in [0, 1].
    pub confidence: f32,
    /// Firing patterns of the winning archetype, in catalog order.
    pub evidence: Vec<PatternEvidence>,
}

impl Classification {
    pub fn neutral() -> Self {
        Self {
            archetype: Archetype::Neutral,
            confidence: 0.0,
            evidence: Vec::new(),
        }
    }
}

struct Tally {
    archetype: Archetype,
    score: f32,
    evidence: Vec<PatternEvidence>,
}

/// Classifies one normalized utterance against `catalog`.
pub fn classify(utterance: &str, catalog: &PatternCatalog) -> Classification {
    // First-appearance order of archetypes in the catalog is the tie-break order.
    let mut tallies: Vec<Tally> = Vec::new();

    for (pattern_index, pattern) in catalog.archetype_patterns().iter().enumerate() {
        let pos = match tallies.iter().position(|t| t.archetype == pattern.archetype()) {
            Some(pos) => pos,
            None => {
                tallies.push(Tally {
                    archetype: pattern.archetype(),
                    score: 0.0,
                    evidence: Vec::new(),
                });
                tallies.len() - 1
            }
        };
        if let Some(matcher) = pattern.fire(utterance) {
            let tally = &mut tallies[pos];
            tally.score = (tally.score + pattern.weight()).min(1.0);
            tally.evidence.push(PatternEvidence {
                pattern_index,
                matcher: matcher.source().to_string(),
                weight: pattern.weight(),
            });
        }
    }

    let mut best: Option<Tally> = None;
    for tally in tallies {
        if tally.score <= 0.0 {
            continue;
        }
        // Strictly greater: an equal later score never displaces an earlier archetype.
        let better = best.as_ref().map_or(true, |b| tally.score > b.score);
        if better {
            best = Some(tally);
        }
    }

    match best {
        Some(t) => Classification {
            archetype: t.archetype,
            confidence: t.score.clamp(0.0, 1.0),
            evidence: t.evidence,
        },
        None => Classification::neutral(),
    }
}
