//! Runtime configuration. Precedence: env `COACH__*` > `$COACH_CONFIG` file
//! (`config/coach.toml` by default, optional) > defaults.

use crate::catalog::PatternCatalog;
use crate::coaching::BufferLimits;
use crate::error::CoachResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "config/coach.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Confidence floor for emitting `prospect_profile` on non-neutral classifications.
    #[serde(default)]
    pub min_profile_confidence: f32,
    #[serde(default)]
    pub limits: BufferLimits,
    /// Optional TOML pattern catalog replacing the built-in one.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Attach the archetype's tone reminder to anti-pattern corrections.
    #[serde(default = "default_true")]
    pub tone_reminder_on_corrections: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            min_profile_confidence: 0.0,
            limits: BufferLimits::default(),
            catalog_path: None,
            tone_reminder_on_corrections: true,
        }
    }
}

impl CoachConfig {
    /// Loads from `$COACH_CONFIG` (or `config/coach.toml`) when present, then the environment.
    pub fn load() -> CoachResult<Self> {
        let path = std::env::var("COACH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Same as [`CoachConfig::load`] with an explicit file. A missing file falls back to defaults.
    pub fn load_from(path: &Path) -> CoachResult<Self> {
        let limits = BufferLimits::default();
        let builder = config::Config::builder()
            .set_default("min_profile_confidence", 0.0_f64)?
            .set_default("tone_reminder_on_corrections", true)?
            .set_default("limits.feedback_history", limits.feedback_history as i64)?
            .set_default("limits.buy_signals", limits.buy_signals as i64)?
            .set_default("limits.objections", limits.objections as i64)?
            .set_default("limits.tone_warnings", limits.tone_warnings as i64)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(
                config::Environment::with_prefix("COACH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(built.try_deserialize()?)
    }

    /// Compiles the configured catalog file. `None` means the built-in catalog applies.
    pub fn load_catalog(&self) -> CoachResult<Option<PatternCatalog>> {
        self.catalog_path
            .as_deref()
            .map(PatternCatalog::from_toml_path)
            .transpose()
    }
}
