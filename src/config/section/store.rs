//! `[store]` section configuration.
//!
//! Points at the content directory the sitemap is generated from and names
//! the content kind that is eligible.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Content store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory scanned for story documents (`*.toml`).
    pub content: PathBuf,

    /// Content kind tag eligible for the news sitemap.
    pub kind: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            kind: "web-story".into(),
        }
    }
}
