//! Desired or observed state of a single node

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Text content and attributes a node should have, or was found to have.
///
/// Each field is three-way: `None` is "absent", `Some` with an empty value is
/// "present but empty", and `Some` with content is "present with values".
/// For matching, an absent `text` is unconstrained while absent `attributes`
/// requires the node to carry none. For updates, absent fields are left
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "value")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
}

impl ValueDescriptor {
    /// A descriptor with neither field present.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add one attribute, making the attribute mapping present.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the attribute mapping. An empty iterator yields a present but
    /// empty mapping.
    pub fn with_attributes<K, V>(mut self, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes = Some(
            attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// True when the descriptor carries no observable state.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.attributes.is_none()
    }

    /// Text to compare against, ignoring an empty string.
    pub fn text_constraint(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}
