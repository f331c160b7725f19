use serde::{Deserialize, Serialize};

/// What happens when the host moves on with scores missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletenessPolicy {
    /// Raise a notice and let the move through.
    #[default]
    Warn,
    /// Refuse the move until scores are filled in or the host overrides.
    Block,
}

/// Data-driven configuration for the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Gating behaviour for incomplete holes and review sets.
    pub completeness: CompletenessPolicy,
    /// Publish the card every time the view moves forward a hole.
    pub publish_on_advance: bool,
    /// Rounds shorter than this skip the halfway review.
    pub halfway_min_holes: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            completeness: CompletenessPolicy::Warn,
            publish_on_advance: true,
            halfway_min_holes: 10,
        }
    }
}

impl EngineConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("TEEPAD_ENGINE_CONFIG") {
            match Self::load_from(&path) {
                Some(config) => return config,
                None => tracing::warn!(
                    path = %path,
                    "TEEPAD_ENGINE_CONFIG unusable, trying config/engine.toml"
                ),
            }
        }
        Self::load_from("config/engine.toml").unwrap_or_default()
    }

    fn load_from(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        match toml::from_str::<Self>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                None
            },
        }
    }
}
