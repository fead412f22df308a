//! Pattern Catalog: compiled archetype patterns and anti-pattern triggers.
//!
//! The catalog is declarative data. Growing it means adding table entries (or shipping a TOML
//! catalog file), never touching the classifier or detector. It is immutable once compiled;
//! callers hold it by reference and pass it explicitly into [`crate::classify`] and
//! [`crate::detect_anti_pattern`].
//!
//! ## Catalog file format
//!
//! ```toml
//! version = "acme-2"
//!
//! [[archetypes]]
//! archetype = "busy"
//! weight = 0.35
//! patterns = ["non ho tempo", "vai al punto"]
//! negations = []
//!
//! [[anti_patterns]]
//! id = "trust_broken"
//! name = "Fiducia Compromessa"
//! priority = "critical"
//! triggers = ["non mi fido"]
//! instruction = "..."
//! ```

mod builtin;

pub use builtin::BUILTIN_CATALOG_VERSION;

use crate::archetype::Archetype;
use crate::error::{CoachError, CoachResult};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::path::Path;
use tracing::info;

// -----------------------------------------------------------------------------
// Matchers
// -----------------------------------------------------------------------------

/// One compiled, case-insensitive matcher plus the source it was compiled from.
#[derive(Debug, Clone)]
pub struct Matcher {
    source: String,
    regex: Regex,
}

impl Matcher {
    /// Compiles `source` case-insensitively. `owner` names the pattern or anti-pattern for errors.
    pub fn new(owner: &str, source: &str) -> CoachResult<Self> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map_err(|e| CoachError::InvalidMatcher {
                owner: owner.to_string(),
                source: e,
            })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

fn compile_all(owner: &str, sources: &[String]) -> CoachResult<Vec<Matcher>> {
    sources.iter().map(|s| Matcher::new(owner, s)).collect()
}

// -----------------------------------------------------------------------------
// Archetype patterns
// -----------------------------------------------------------------------------

/// Declarative form of an [`ArchetypePattern`] (built-in tables and catalog files).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypePatternSpec {
    /// Must name a known archetype; catalog ids are not lenient like event payloads.
    #[serde(deserialize_with = "known_archetype")]
    pub archetype: Archetype,
    pub weight: f32,
    pub patterns: Vec<String>,
    #[serde(default)]
    pub negations: Vec<String>,
}

fn known_archetype<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Archetype, D::Error> {
    let id = String::deserialize(deserializer)?;
    Archetype::from_id(&id).ok_or_else(|| de::Error::custom(format!("unknown archetype '{}'", id)))
}

/// A weighted group of positive matchers for one archetype, with optional negation vetoes.
#[derive(Debug, Clone)]
pub struct ArchetypePattern {
    archetype: Archetype,
    weight: f32,
    positives: Vec<Matcher>,
    negations: Vec<Matcher>,
}

impl ArchetypePattern {
    pub fn compile(spec: &ArchetypePatternSpec) -> CoachResult<Self> {
        let owner = spec.archetype.as_str();
        if spec.archetype.is_neutral() {
            return Err(CoachError::UnscorableArchetype(owner.to_string()));
        }
        if !(spec.weight > 0.0 && spec.weight <= 1.0) {
            return Err(CoachError::InvalidWeight {
                owner: owner.to_string(),
                weight: spec.weight,
            });
        }
        Ok(Self {
            archetype: spec.archetype,
            weight: spec.weight,
            positives: compile_all(owner, &spec.patterns)?,
            negations: compile_all(owner, &spec.negations)?,
        })
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn positives(&self) -> &[Matcher] {
        &self.positives
    }

    pub fn negations(&self) -> &[Matcher] {
        &self.negations
    }

    /// Returns the first positive matcher that fires, unless a negation matcher also fires.
    /// A firing negation is a hard veto for the whole pattern.
    pub fn fire(&self, text: &str) -> Option<&Matcher> {
        let hit = self.positives.iter().find(|m| m.is_match(text))?;
        if self.negations.iter().any(|m| m.is_match(text)) {
            return None;
        }
        Some(hit)
    }
}

// -----------------------------------------------------------------------------
// Anti-patterns
// -----------------------------------------------------------------------------

/// Urgency band of an anti-pattern. Ordering: critical > high > medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AntiPatternPriority {
    Critical,
    High,
    Medium,
}

impl AntiPatternPriority {
    /// Numeric rank for comparison (higher = more urgent).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 3,
            Self::High => 2,
            Self::Medium => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
        }
    }
}

/// Declarative form of an [`AntiPatternDefinition`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntiPatternSpec {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub priority: AntiPatternPriority,
    pub triggers: Vec<String>,
    pub instruction: String,
}

/// A conversation-health emergency: prospect-side triggers and the corrective instruction.
#[derive(Debug, Clone)]
pub struct AntiPatternDefinition {
    id: String,
    name: String,
    priority: AntiPatternPriority,
    triggers: Vec<Matcher>,
    instruction: String,
}

impl AntiPatternDefinition {
    pub fn compile(spec: &AntiPatternSpec) -> CoachResult<Self> {
        Ok(Self {
            id: spec.id.clone(),
            name: spec.name.clone(),
            priority: spec.priority,
            triggers: compile_all(&spec.id, &spec.triggers)?,
            instruction: spec.instruction.clone(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> AntiPatternPriority {
        self.priority
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn triggers(&self) -> &[Matcher] {
        &self.triggers
    }

    /// First trigger that matches `text`, if any.
    pub fn triggered_by(&self, text: &str) -> Option<&Matcher> {
        self.triggers.iter().find(|m| m.is_match(text))
    }
}

// -----------------------------------------------------------------------------
// Catalog
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CatalogFile {
    version: String,
    #[serde(default)]
    archetypes: Vec<ArchetypePatternSpec>,
    #[serde(default)]
    anti_patterns: Vec<AntiPatternSpec>,
}

/// Versioned, compiled detection tables. Declaration order is preserved and drives tie-breaks.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    version: String,
    archetype_patterns: Vec<ArchetypePattern>,
    anti_patterns: Vec<AntiPatternDefinition>,
}

static BUILTIN: Lazy<PatternCatalog> = Lazy::new(|| {
    PatternCatalog::from_specs(
        BUILTIN_CATALOG_VERSION,
        &builtin::archetype_specs(),
        &builtin::anti_pattern_specs(),
    )
    .expect("built-in pattern catalog must compile")
});

impl PatternCatalog {
    /// The built-in catalog, compiled once on first use.
    pub fn builtin() -> &'static PatternCatalog {
        &BUILTIN
    }

    /// Compiles a catalog from declarative specs, keeping their order.
    pub fn from_specs(
        version: impl Into<String>,
        archetypes: &[ArchetypePatternSpec],
        anti_patterns: &[AntiPatternSpec],
    ) -> CoachResult<Self> {
        let catalog = Self {
            version: version.into(),
            archetype_patterns: archetypes
                .iter()
                .map(ArchetypePattern::compile)
                .collect::<CoachResult<_>>()?,
            anti_patterns: anti_patterns
                .iter()
                .map(AntiPatternDefinition::compile)
                .collect::<CoachResult<_>>()?,
        };
        info!(
            version = %catalog.version,
            archetype_patterns = catalog.archetype_patterns.len(),
            anti_patterns = catalog.anti_patterns.len(),
            "pattern catalog compiled"
        );
        Ok(catalog)
    }

    /// Parses and compiles a TOML catalog (see module docs for the format).
    pub fn from_toml_str(content: &str) -> CoachResult<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::from_specs(file.version, &file.archetypes, &file.anti_patterns)
    }

    pub fn from_toml_path(path: &Path) -> CoachResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn archetype_patterns(&self) -> &[ArchetypePattern] {
        &self.archetype_patterns
    }

    pub fn anti_patterns(&self) -> &[AntiPatternDefinition] {
        &self.anti_patterns
    }
}
