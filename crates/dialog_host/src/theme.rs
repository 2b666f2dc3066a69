//! Theme class resolution contracts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Host service mapping semantic class names onto the active visual classes.
pub trait ThemeResolver {
    /// Returns the visual class for `class_name`, or `None` when the theme does not style it.
    fn class(&self, class_name: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Resolver that styles nothing.
pub struct NoopThemeResolver;

impl ThemeResolver for NoopThemeResolver {
    fn class(&self, _class_name: &str) -> Option<String> {
        None
    }
}

/// Semantic-class to visual-class table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeClassMap {
    classes: BTreeMap<String, String>,
}

impl ThemeClassMap {
    /// Builds a table from semantic/visual class pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            classes: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl ThemeResolver for ThemeClassMap {
    fn class(&self, class_name: &str) -> Option<String> {
        self.classes
            .get(class_name)
            .filter(|class| !class.trim().is_empty())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn blank_entries_resolve_to_absent() {
        let theme = ThemeClassMap::from_pairs([("root", "dialog-root"), ("main", " ")]);

        assert_eq!(theme.class("root").as_deref(), Some("dialog-root"));
        assert_eq!(theme.class("main"), None);
        assert_eq!(theme.class("title"), None);
    }
}
