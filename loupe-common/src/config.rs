use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid lightbox config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Lightbox settings.
///
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightboxConfig {
    /// CSS selector for thumbnails that open the lightbox
    pub selector: String,
    /// Attribute holding the full-size image URL. Falls back to `src` when empty or missing.
    pub source_attribute: String,
    /// Prefix for generated element ids (`<prefix>-<n>`)
    pub id_prefix: String,
    /// Text of the visually hidden dialog label
    pub label: String,
    pub previous_label: String,
    pub next_label: String,
    pub close_label: String,
    /// Class added to the overlay root while it fades out
    pub fade_out_class: String,
    /// Delay between mounting the overlay and starting the fade-in
    pub reveal_delay_ms: u32,
    /// Length of the fade-out transition; the overlay is removed afterwards
    pub transition_ms: u32,
    /// Arrow keys navigate and Escape closes while the overlay is open
    pub keyboard: bool,
    /// Show an "n / total" counter
    pub show_counter: bool,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            selector: "img[data-lightbox]".to_string(),
            source_attribute: "data-lightbox".to_string(),
            id_prefix: "lightbox".to_string(),
            label: "Image viewer".to_string(),
            previous_label: "Previous image".to_string(),
            next_label: "Next image".to_string(),
            close_label: "Close lightbox".to_string(),
            fade_out_class: "fade-out".to_string(),
            reveal_delay_ms: 10,
            transition_ms: 300,
            keyboard: true,
            show_counter: true,
        }
    }
}

impl LightboxConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LightboxConfig::from_json(r#"{ "transition_ms": 150, "keyboard": false }"#)
            .unwrap();
        assert_eq!(config.transition_ms, 150);
        assert!(!config.keyboard);
        assert_eq!(config.selector, "img[data-lightbox]");
        assert_eq!(config.fade_out_class, "fade-out");
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = LightboxConfig::from_json("{}").unwrap();
        assert_eq!(config, LightboxConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        let result = LightboxConfig::from_json(r#"{ "transition_ms": "slow" }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
