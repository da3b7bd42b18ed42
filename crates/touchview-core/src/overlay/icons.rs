//! Icon resources for context actions.

use super::action::ActionId;
use crate::config::{ConfigError, ConfigResult, read_json};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// An icon image and its display size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    /// Image location, resolved by the host toolkit (e.g. `file://`, `bytes://`).
    pub uri: String,
    /// Display size in surface coordinates.
    pub size: Size,
}

impl Icon {
    pub fn new(uri: impl Into<String>, size: Size) -> Self {
        Self {
            uri: uri.into(),
            size,
        }
    }
}

/// Supplies icons for context actions.
pub trait IconProvider {
    /// Icon for `action`, or `None` if no resource exists.
    fn lookup(&self, action: ActionId) -> Option<Icon>;

    /// Drop any cached resources. Called when a view is torn down.
    fn clean(&self) {}
}

/// Provider without any icons; every overlay becomes a text button.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIcons;

impl IconProvider for NoIcons {
    fn lookup(&self, _action: ActionId) -> Option<Icon> {
        None
    }
}

/// Icons keyed by action id.
///
/// JSON form: `{ "icons": { "5": { "uri": "...", "size": { "width": 32, "height": 32 } } } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IconTable {
    #[serde(default)]
    icons: HashMap<ActionId, Icon>,
}

impl IconTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an icon for an action, replacing any previous one.
    pub fn insert(&mut self, action: ActionId, icon: Icon) -> Option<Icon> {
        self.icons.insert(action, icon)
    }

    /// Builder form of [`IconTable::insert`].
    pub fn with_icon(mut self, action: ActionId, icon: Icon) -> Self {
        self.insert(action, icon);
        self
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Parse a table from JSON.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        read_json(path.as_ref())
    }
}

impl IconProvider for IconTable {
    fn lookup(&self, action: ActionId) -> Option<Icon> {
        self.icons.get(&action).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lookup() {
        let table = IconTable::new().with_icon(5, Icon::new("file://delete.png", Size::new(32.0, 32.0)));

        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(5).map(|i| i.uri), Some("file://delete.png".to_string()));
        assert!(table.lookup(6).is_none());
        assert!(NoIcons.lookup(5).is_none());
    }

    #[test]
    fn test_from_json() {
        let table = IconTable::from_json(
            r#"{ "icons": { "7": { "uri": "file://fixed.png", "size": { "width": 24.0, "height": 20.0 } } } }"#,
        )
        .unwrap();

        let icon = table.lookup(7).unwrap();
        assert_eq!(icon.size, Size::new(24.0, 20.0));
    }

    #[test]
    fn test_empty_json_object() {
        let table = IconTable::from_json("{}").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "icons": {{ "1": {{ "uri": "bytes://all", "size": {{ "width": 16.0, "height": 16.0 }} }} }} }}"#
        )
        .unwrap();

        let table = IconTable::load(file.path()).unwrap();
        assert!(table.lookup(1).is_some());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(IconTable::from_json("[1, 2"), Err(ConfigError::Parse(_))));
    }
}
