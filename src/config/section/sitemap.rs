//! `[sitemap]` section configuration.
//!
//! Knobs for the news sitemap itself. Defaults follow the Google News
//! rules: a two-day freshness window and a result cap well under the
//! protocol's 1000-URL limit.

use crate::utils::date::UtcOffset;
use serde::{Deserialize, Serialize};

/// News sitemap settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Public filename the sitemap is served under.
    pub filename: String,

    /// Maximum number of `<url>` entries per document.
    pub limit: usize,

    /// Trailing eligibility window in hours.
    pub window_hours: u32,

    /// Fixed target offset publication dates are rendered in
    /// (store timestamps are UTC).
    pub offset: String,

    /// Reserved query parameter for direct access that bypasses the
    /// rewrite rules entirely (`?<direct_param>=sitemap`).
    pub direct_param: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            filename: "webstory-news-sitemap.xml".into(),
            limit: 80,
            window_hours: 48,
            offset: "+05:30".into(),
            direct_param: "webstory_news_direct".into(),
        }
    }
}

impl SitemapConfig {
    /// Parsed target offset.
    pub fn utc_offset(&self) -> UtcOffset {
        UtcOffset::parse(&self.offset).unwrap_or(UtcOffset::UTC)
    }

    /// Validate sitemap configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.filename.is_empty() || self.filename.contains('/') {
            anyhow::bail!("sitemap.filename must be a bare filename: {:?}", self.filename);
        }
        if self.limit == 0 {
            anyhow::bail!("sitemap.limit must be at least 1");
        }
        if self.limit > 1000 {
            crate::log!("warning"; "sitemap.limit {} exceeds the 1000-URL news sitemap cap", self.limit);
        }
        if UtcOffset::parse(&self.offset).is_none() {
            anyhow::bail!("sitemap.offset must look like \"+05:30\": {:?}", self.offset);
        }
        if self.window_hours == 0 {
            anyhow::bail!("sitemap.window_hours must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use crate::utils::date::UtcOffset;

    #[test]
    fn test_sitemap_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.sitemap.filename, "webstory-news-sitemap.xml");
        assert_eq!(config.sitemap.limit, 80);
        assert_eq!(config.sitemap.window_hours, 48);
        assert_eq!(config.sitemap.utc_offset(), UtcOffset::from_minutes(330));
        assert_eq!(config.sitemap.direct_param, "webstory_news_direct");
        assert!(config.sitemap.validate().is_ok());
    }

    #[test]
    fn test_sitemap_rejects_zero_limit() {
        let config = test_parse_config("[sitemap]\nlimit = 0");
        assert!(config.sitemap.validate().is_err());
    }

    #[test]
    fn test_sitemap_rejects_bad_offset() {
        let config = test_parse_config("[sitemap]\noffset = \"IST\"");
        assert!(config.sitemap.validate().is_err());
    }

    #[test]
    fn test_sitemap_rejects_pathy_filename() {
        let config = test_parse_config("[sitemap]\nfilename = \"news/sitemap.xml\"");
        assert!(config.sitemap.validate().is_err());
    }
}
