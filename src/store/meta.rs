//! Story metadata as written in content TOML documents.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Publication state of a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryStatus {
    Published,
    #[default]
    Draft,
}

/// Cover image metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverMeta {
    /// Image URL.
    pub url: String,
    /// Caption text.
    #[serde(default)]
    pub caption: Option<String>,
    /// The attachment's own title, used when no caption is set.
    #[serde(default)]
    pub title: Option<String>,
}

/// Story metadata from a content TOML document.
///
/// # Standard Fields
///
/// | Field       | Type         | Description                          |
/// |-------------|--------------|--------------------------------------|
/// | `title`     | `String`     | Story title                          |
/// | `permalink` | `String`     | Site-relative URL path               |
/// | `date`      | `String`     | Publish timestamp, UTC               |
/// | `updated`   | `String`     | Last-modified timestamp, UTC         |
/// | `status`    | `String`     | `published` or `draft`               |
/// | `kind`      | `String`     | Content kind tag (e.g. `web-story`)  |
/// | `[cover]`   | table        | Cover image url/caption/title        |
///
/// Any additional fields are captured in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryMeta {
    pub title: Option<String>,
    /// Site-relative URL path (e.g. `/web-stories/hello/`). Falls back to
    /// a path derived from the file stem.
    pub permalink: Option<String>,
    /// Publish timestamp in UTC: "YYYY-MM-DD HH:MM:SS" or RFC 3339.
    pub date: Option<String>,
    /// Last-modified timestamp in UTC; falls back to `date`.
    pub updated: Option<String>,
    pub status: StoryStatus,
    /// Content kind tag; only the configured kind is sitemap-eligible.
    pub kind: String,
    pub cover: Option<CoverMeta>,
    /// Additional user-defined fields.
    #[serde(flatten)]
    pub extra: FxHashMap<String, toml::Value>,
}
