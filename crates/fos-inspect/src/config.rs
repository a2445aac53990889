//! Inspector configuration
//!
//! Loaded from JSON with camelCase keys. Missing keys take defaults.

use serde::{Deserialize, Serialize};

use crate::{CaptureEvents, CssPathOptions, EventSource, LegacyEvents};

/// Outline drawn around the hovered element
pub const DEFAULT_HIGHLIGHT: &str = "2px solid #E80C68";

/// Outline written to the last highlighted element on cancel
pub const CLEARED_OUTLINE: &str = "none";

/// Key code for Escape
pub const ESCAPE_KEY: u32 = 27;

/// Inspector settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InspectorConfig {
    /// Walk to the root even past id-bearing ancestors
    pub full_path: bool,
    /// Append `:nth-child(k)` to vague or ambiguous segments
    pub use_nth_child: bool,
    /// Outline value for the hovered element
    pub highlight: String,
    /// Key code that ends the session
    pub cancel_key: u32,
    /// Use bubble-phase listeners and `keyCode`
    pub legacy_events: bool,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            full_path: false,
            use_nth_child: false,
            highlight: DEFAULT_HIGHLIGHT.to_string(),
            cancel_key: ESCAPE_KEY,
            legacy_events: false,
        }
    }
}

impl InspectorConfig {
    /// Parse and validate a JSON config
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.highlight.trim().is_empty() {
            return Err(ConfigError::EmptyHighlight);
        }
        Ok(())
    }

    pub fn css_path_options(&self) -> CssPathOptions {
        CssPathOptions::new(self.full_path, self.use_nth_child)
    }

    /// Listener registration matching `legacy_events`
    pub fn event_source(&self) -> Box<dyn EventSource> {
        if self.legacy_events {
            Box::new(LegacyEvents::new())
        } else {
            Box::new(CaptureEvents::new())
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid inspector config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Highlight outline must not be empty")]
    EmptyHighlight,
}
