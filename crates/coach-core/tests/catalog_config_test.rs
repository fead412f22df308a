//! Integration test: loading catalogs and configuration from disk.
//!
//! ## Scenarios
//! 1. A TOML catalog on disk replaces the built-in one and drives classification.
//! 2. A broken catalog file reports which entry failed.
//! 3. A config file overrides defaults; unset keys keep their defaults.
//! 4. The configured catalog path is honored by `load_catalog`.
//! 5. The analyzer built from config applies the confidence floor.

use coach_core::{
    classify, detect_anti_pattern, Archetype, CoachConfig, CoachError, EventKind,
    PatternCatalog, PlaybookTable, UtteranceAnalyzer,
};
use std::io::Write;
use tempfile::NamedTempFile;

const CATALOG: &str = r#"
version = "acme-2"

[[archetypes]]
archetype = "busy"
weight = 0.35
patterns = ["non ho tempo", "vai al punto"]

[[archetypes]]
archetype = "skeptic"
weight = 0.2
patterns = ["non ci credo"]
negations = ["ci credo davvero"]

[[anti_patterns]]
id = "prospect_leaving"
name = "Prospect in uscita"
priority = "high"
triggers = ["devo andare"]
instruction = "Chiudi con un prossimo passo concreto."
"#;

fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ===========================================================================
// Catalog files
// ===========================================================================

#[test]
fn test_catalog_file_drives_detection() {
    let file = write_temp(".toml", CATALOG);
    let catalog = PatternCatalog::from_toml_path(file.path()).unwrap();
    assert_eq!(catalog.version(), "acme-2");

    let c = classify("scusa, non ho tempo, devo andare", &catalog);
    assert_eq!(c.archetype, Archetype::Busy);
    assert!((c.confidence - 0.35).abs() < 1e-6);

    let hit = detect_anti_pattern("scusa, devo andare", &catalog).unwrap();
    assert_eq!(hit.id, "prospect_leaving");
    assert_eq!(hit.name, "Prospect in uscita");

    // Negation vetoes the only skeptic pattern.
    let c = classify("non ci credo... anzi ci credo davvero", &catalog);
    assert_eq!(c.archetype, Archetype::Neutral);
    assert_eq!(c.confidence, 0.0);
}

#[test]
fn test_broken_catalog_names_the_owner() {
    let broken = CATALOG.replace("devo andare", "devo (andare");
    let err = PatternCatalog::from_toml_str(&broken).unwrap_err();
    match err {
        CoachError::InvalidMatcher { owner, .. } => assert_eq!(owner, "prospect_leaving"),
        other => panic!("unexpected error: {}", other),
    }

    let err = PatternCatalog::from_toml_str("version = 3").unwrap_err();
    assert!(matches!(err, CoachError::CatalogFile(_)));
}

// ===========================================================================
// Configuration
// ===========================================================================

#[test]
fn test_config_file_overrides_defaults() {
    let file = write_temp(
        ".toml",
        r#"
min_profile_confidence = 0.5
tone_reminder_on_corrections = false

[limits]
buy_signals = 3
"#,
    );
    let config = CoachConfig::load_from(file.path()).unwrap();
    assert_eq!(config.min_profile_confidence, 0.5);
    assert!(!config.tone_reminder_on_corrections);
    assert_eq!(config.limits.buy_signals, 3);
    assert_eq!(config.limits.objections, 10);
    assert_eq!(config.limits.feedback_history, 20);
    assert!(config.catalog_path.is_none());
    assert!(config.load_catalog().unwrap().is_none());
}

#[test]
fn test_config_catalog_path_is_loaded() {
    let catalog_file = write_temp(".toml", CATALOG);
    let config_file = write_temp(
        ".toml",
        &format!("catalog_path = {:?}\n", catalog_file.path().display().to_string()),
    );
    let config = CoachConfig::load_from(config_file.path()).unwrap();
    let catalog = config.load_catalog().unwrap().expect("catalog path set");
    assert_eq!(catalog.version(), "acme-2");
}

#[test]
fn test_analyzer_from_config_applies_floor() {
    let file = write_temp(".toml", "min_profile_confidence = 0.5\n");
    let config = CoachConfig::load_from(file.path()).unwrap();
    let analyzer =
        UtteranceAnalyzer::from_config(&config, PatternCatalog::builtin(), PlaybookTable::builtin());

    let analysis = analyzer.analyze("l'ho già detto che non ho budget", 0);
    assert_eq!(analysis.classification.archetype, Archetype::PriceFocused);
    let kinds: Vec<_> = analysis.events.iter().filter_map(|e| e.kind()).collect();
    assert_eq!(kinds, vec![EventKind::SalesCoaching]);
}
