//! View configuration.

use kurbo::Size;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Sizing of text-button overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Width reserved per caption character, sized for the 12px Latin
    /// captions the widgets paint.
    pub button_char_width: f64,
    /// Extra width added around the caption.
    pub button_padding: f64,
    /// Button height.
    pub button_height: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            button_char_width: 7.0,
            button_padding: 8.0,
            button_height: 24.0,
        }
    }
}

impl OverlayStyle {
    /// Size of a text button showing `caption`.
    pub fn button_size(&self, caption: &str) -> Size {
        let chars = caption.chars().count() as f64;
        Size::new(
            chars * self.button_char_width + self.button_padding,
            self.button_height,
        )
    }
}

/// Options applied when a view is constructed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// Answer to the engine's finger-input preference query.
    pub use_finger: bool,
    /// Text-button overlay sizing.
    pub overlay: OverlayStyle,
}

impl ViewOptions {
    /// Set the finger-input preference.
    pub fn with_use_finger(mut self, use_finger: bool) -> Self {
        self.use_finger = use_finger;
        self
    }

    /// Set the overlay style.
    pub fn with_overlay_style(mut self, style: OverlayStyle) -> Self {
        self.overlay = style;
        self
    }

    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize options to JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        read_json(path.as_ref())
    }
}

/// Read and parse a JSON file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_options() {
        let options = ViewOptions::default();
        assert!(!options.use_finger);
        assert_eq!(options.overlay, OverlayStyle::default());
    }

    #[test]
    fn test_button_size_follows_caption_length() {
        let style = OverlayStyle::default();
        let size = style.button_size("Lock");
        assert!((size.width - (4.0 * 7.0 + 8.0)).abs() < f64::EPSILON);

        let wider = OverlayStyle {
            button_char_width: 14.0,
            ..OverlayStyle::default()
        };
        assert!((wider.button_size("Lock").width - 64.0).abs() < f64::EPSILON);
        assert!((size.height - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options = ViewOptions::from_json(r#"{ "use_finger": true }"#).unwrap();
        assert!(options.use_finger);
        assert_eq!(options.overlay, OverlayStyle::default());

        let options = ViewOptions::from_json(r#"{ "overlay": { "button_height": 32.0 } }"#).unwrap();
        assert!((options.overlay.button_height - 32.0).abs() < f64::EPSILON);
        assert!((options.overlay.button_char_width - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_roundtrip() {
        let options = ViewOptions::default().with_use_finger(true);
        let json = options.to_json().unwrap();
        assert_eq!(ViewOptions::from_json(&json).unwrap(), options);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "use_finger": true, "overlay": {{ "button_padding": 12.0 }} }}"#).unwrap();

        let options = ViewOptions::load(file.path()).unwrap();
        assert!(options.use_finger);
        assert!((options.overlay.button_padding - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(matches!(ViewOptions::load(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ViewOptions::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
