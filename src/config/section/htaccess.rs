//! `[htaccess]` section configuration.
//!
//! Optional path to the front server's config file. Activation inserts a
//! marker-delimited rewrite block there so servers that consult `.htaccess`
//! directly (LiteSpeed and friends) route the sitemap without hitting us.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Front server config file settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HtaccessConfig {
    /// Path to the file patched on activate/deactivate. Tilde-expanded;
    /// relative paths resolve against the project root. Unset disables
    /// the patch entirely.
    pub file: Option<PathBuf>,
}
