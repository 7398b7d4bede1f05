//! Core data types for the filman.cc scraper
//!
//! Contains the records produced by the search, listing and link parsers.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A single hit from the filman.cc search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title taken from the thumbnail's alt text ("No title" when absent)
    pub title: String,

    /// Detail page URL, exactly as found in the anchor's href
    pub url: String,

    /// Thumbnail image URL
    pub thumbnail: String,
}

/// One playable entry on a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeEntry {
    /// Visible label (e.g. "[s01e01] Pilot")
    pub label: String,

    /// Episode page URL
    pub url: String,
}

impl EpisodeEntry {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Season label to episodes, in document order
///
/// Behaves like an insertion-ordered map: inserting a label that is already
/// present replaces its episodes but keeps the label's original position.
/// Serializes as a JSON object whose keys follow insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonMap {
    entries: Vec<(String, Vec<EpisodeEntry>)>,
}

impl SeasonMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a season, returning the episodes it replaced if the label existed
    pub fn insert(
        &mut self,
        label: impl Into<String>,
        episodes: Vec<EpisodeEntry>,
    ) -> Option<Vec<EpisodeEntry>> {
        let label = label.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => Some(std::mem::replace(slot, episodes)),
            None => {
                self.entries.push((label, episodes));
                None
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&[EpisodeEntry]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, episodes)| episodes.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Season labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[EpisodeEntry])> {
        self.entries
            .iter()
            .map(|(label, episodes)| (label.as_str(), episodes.as_slice()))
    }
}

impl Serialize for SeasonMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, episodes) in &self.entries {
            map.serialize_entry(label, episodes)?;
        }
        map.end()
    }
}

/// Parsed listing (detail) page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    /// Page title from the first `<h1>` ("Movie" when absent)
    pub title: String,

    /// Episodes grouped by season label
    pub seasons: SeasonMap,
}

/// Width or height of an embedded player
///
/// Sites send either plain numbers or CSS-like strings such as `"100%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Number(serde_json::Number),
    Text(String),
}

impl Dimension {
    /// Accepts JSON numbers and strings, anything else is treated as absent
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => Some(Self::Number(n.clone())),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

/// An embedded player found on an episode page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerLink {
    /// Hosting service name, the first word of the anchor text
    pub host: String,

    /// Iframe source URL
    pub url: Option<String>,

    pub width: Option<Dimension>,

    pub height: Option<Dimension>,
}
