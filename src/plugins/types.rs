//! Registry types for papercast-docs
//!
//! This module defines the records parsed from the community registry
//! (`plugins.jsonc`): plugin descriptors, the contributions nested inside
//! them, and the closed set of categories used to place rendered cards.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Base URL prepended to a descriptor's `repo` path.
pub const GITHUB_BASE_URL: &str = "https://github.com/";

/// Category of a plugin or contribution.
///
/// A descriptor's `type` must be one of the canonical labels exactly
/// (`processor`, `collector`, `publisher`, `subscriber`, `types`).
/// Contribution key segments are looser and also accept plurals. Anything
/// else is kept as [`PluginType::Unknown`] so a single unfamiliar entry never
/// fails the whole registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PluginType {
    Processor,
    Collector,
    Publisher,
    Subscriber,
    Types,
    Unknown(String),
}

impl PluginType {
    /// Parse a descriptor `type` tag. Only the exact canonical label matches.
    pub fn from_type_tag(tag: &str) -> Self {
        match tag {
            "processor" => Self::Processor,
            "collector" => Self::Collector,
            "publisher" => Self::Publisher,
            "subscriber" => Self::Subscriber,
            "types" => Self::Types,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Parse a category label, singular or plural, ignoring surrounding
    /// whitespace.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "processor" | "processors" => Self::Processor,
            "collector" | "collectors" => Self::Collector,
            "publisher" | "publishers" => Self::Publisher,
            "subscriber" | "subscribers" => Self::Subscriber,
            "type" | "types" => Self::Types,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Derive the category of a dotted contribution key such as
    /// `papercast.processors.GROBIDProcessor` or `x.processor`.
    ///
    /// The first dot-separated segment naming a known category wins.
    pub fn from_contribution_key(key: &str) -> Self {
        key.split('.')
            .map(Self::from_label)
            .find(|t| t.is_known())
            .unwrap_or_else(|| Self::Unknown(key.to_string()))
    }

    /// Canonical singular label.
    pub fn label(&self) -> &str {
        match self {
            Self::Processor => "processor",
            Self::Collector => "collector",
            Self::Publisher => "publisher",
            Self::Subscriber => "subscriber",
            Self::Types => "types",
            Self::Unknown(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Whether plugin cards of this type carry an output region.
    pub fn has_output(&self) -> bool {
        matches!(self, Self::Processor | Self::Collector)
    }
}

impl Default for PluginType {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<String> for PluginType {
    fn from(tag: String) -> Self {
        Self::from_type_tag(&tag)
    }
}

impl From<PluginType> for String {
    fn from(plugin_type: PluginType) -> Self {
        plugin_type.label().to_string()
    }
}

impl fmt::Display for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A string-keyed mapping that keeps the order entries appear in the
/// registry document, so cards render in authoring order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        self.0.push((key.into(), value));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map with string keys")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// One plugin's metadata record in the registry.
///
/// # Example
///
/// ```json
/// {
///   "name": "papercast-grobid",
///   "type": "processor",
///   "icon": "https://example.com/grobid.png",
///   "repo": "papercast-dev/papercast-grobid",
///   "contributes": {
///     "papercast.processors.GROBIDProcessor": {
///       "short_description": "Extract text from PDFs with GROBID",
///       "input_types": { "pdf": "papercast.types.PDFFile" },
///       "output_types": { "text": "str" }
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Display name shown on the card.
    #[serde(default)]
    pub name: String,

    /// Category tag deciding which container receives the card.
    #[serde(rename = "type", default)]
    pub plugin_type: PluginType,

    /// Icon image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// GitHub `owner/name` path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Capabilities keyed by dotted path, e.g. `papercast.processors.Foo`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributes: Option<OrderedMap<Contribution>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Local checkout path used by offline documentation builds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
}

impl PluginDescriptor {
    /// Create a descriptor with only the required fields set.
    pub fn new(name: impl Into<String>, plugin_type: PluginType) -> Self {
        Self {
            name: name.into(),
            plugin_type,
            icon: None,
            repo: None,
            contributes: None,
            id: None,
            author: None,
            description: None,
            local: None,
        }
    }

    /// Icon URL, treating an empty string as absent.
    pub fn icon(&self) -> Option<&str> {
        present(&self.icon)
    }

    /// Repository path, treating an empty string as absent.
    pub fn repo(&self) -> Option<&str> {
        present(&self.repo)
    }

    /// Link target for the card, present only when `repo` is set.
    pub fn repo_url(&self) -> Option<String> {
        self.repo().map(repo_url)
    }

    /// Contributions in document order (empty when `contributes` is absent).
    pub fn contributions(&self) -> impl Iterator<Item = (&str, &Contribution)> {
        self.contributes.iter().flat_map(|c| c.iter())
    }

    pub fn contribution_count(&self) -> usize {
        self.contributes.as_ref().map_or(0, OrderedMap::len)
    }
}

/// A named capability nested inside a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    /// Input name → type reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_types: Option<OrderedMap<String>>,

    /// Output name → type reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_types: Option<OrderedMap<String>>,
}

impl Contribution {
    pub fn icon(&self) -> Option<&str> {
        present(&self.icon)
    }

    pub fn short_description(&self) -> Option<&str> {
        present(&self.short_description)
    }

    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.input_types.iter().flat_map(|m| m.keys())
    }

    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.output_types.iter().flat_map(|m| m.keys())
    }
}

/// Build `https://github.com/<repo>`.
pub fn repo_url(repo: &str) -> String {
    format!("{}{}", GITHUB_BASE_URL, repo)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
