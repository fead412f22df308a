//! coach-core: live sales-call coaching engine.
//!
//! Classifies prospect utterances into behavioral archetypes, detects conversation-health
//! anti-patterns, resolves per-archetype playbooks, and aggregates the coaching event stream
//! into one bounded `CoachingState` per call.

mod analysis;
mod anti_pattern;
mod archetype;
mod classifier;
mod config;
mod error;
mod playbook;
pub mod catalog;
pub mod coaching;

// Pattern Catalog + detectors
pub use anti_pattern::{detect_anti_pattern, AntiPatternHit};
pub use archetype::Archetype;
pub use catalog::{
    AntiPatternDefinition, AntiPatternPriority, AntiPatternSpec, ArchetypePattern,
    ArchetypePatternSpec, Matcher, PatternCatalog, BUILTIN_CATALOG_VERSION,
};
pub use classifier::{classify, Classification, PatternEvidence};

// Playbooks
pub use playbook::{Playbook, PlaybookTable, ToneProfile, TtsParams, VoiceEnergy, VoicePace};

// Aggregation
pub use analysis::{UtteranceAnalysis, UtteranceAnalyzer};
pub use coaching::{
    reduce, BufferLimits, CoachingFeedback, CoachingSession, CoachingState, Disposition,
    EventKind, FeedbackPriority, FeedbackType, InboundEvent, ProspectProfile, SessionCommand,
    SessionStats,
};

pub use config::CoachConfig;
pub use error::{CoachError, CoachResult};
