//! Localization bundle lookup contracts.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Bundle shared by widgets for common phrases.
pub const COMMON_BUNDLE_ID: &str = "common";
/// Message key for the "close" phrase inside [`COMMON_BUNDLE_ID`].
pub const CLOSE_MESSAGE_KEY: &str = "close";

/// Resolved message set for one bundle in the active locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageBundle {
    messages: BTreeMap<String, String>,
}

impl MessageBundle {
    /// Builds a bundle from key/message pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            messages: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Returns the message for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Returns the message for `key`, or `fallback` when the bundle lacks it.
    pub fn get_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.get(key).unwrap_or(fallback)
    }

    /// Returns this bundle with every key missing from it filled in from `fallback`.
    pub fn with_fallback(mut self, fallback: &MessageBundle) -> Self {
        for (key, message) in &fallback.messages {
            self.messages
                .entry(key.clone())
                .or_insert_with(|| message.clone());
        }
        self
    }

    /// Returns whether the bundle has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Host service resolving message bundles for the active locale.
pub trait MessageResolver {
    /// Returns the message set for `bundle_id`, empty when the bundle is unknown.
    fn bundle(&self, bundle_id: &str) -> MessageBundle;
}

#[derive(Debug, Clone, Copy, Default)]
/// Resolver that knows no bundles.
pub struct NoopMessageResolver;

impl MessageResolver for NoopMessageResolver {
    fn bundle(&self, _bundle_id: &str) -> MessageBundle {
        MessageBundle::default()
    }
}

#[derive(Debug, Clone, Default)]
/// Resolver over a fixed set of bundles.
pub struct StaticMessageResolver {
    bundles: HashMap<String, MessageBundle>,
}

impl StaticMessageResolver {
    /// Adds or replaces one bundle.
    pub fn with_bundle(mut self, bundle_id: impl Into<String>, bundle: MessageBundle) -> Self {
        self.bundles.insert(bundle_id.into(), bundle);
        self
    }
}

impl MessageResolver for StaticMessageResolver {
    fn bundle(&self, bundle_id: &str) -> MessageBundle {
        self.bundles.get(bundle_id).cloned().unwrap_or_default()
    }
}
