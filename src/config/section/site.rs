//! `[site]` configuration.
//!
//! Publication identity used by the news sitemap: display name, canonical
//! base URL, and language code.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Site metadata, read once per generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Publication display name (Google News `<news:name>`).
    pub title: String,

    /// Site base URL (e.g., "https://example.com"). Canonical story URLs
    /// are this joined with each story's permalink.
    pub url: Option<String>,

    /// Language code (e.g., "en", "hi-IN"). Only the first two characters
    /// reach `<news:language>`.
    pub language: String,

    /// Custom fields, kept for forward compatibility.
    #[serde(default)]
    pub extra: FxHashMap<String, toml::Value>,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: None,
            language: "en".into(),
            extra: FxHashMap::default(),
        }
    }
}

impl SiteInfoConfig {
    /// Two-letter language code for `<news:language>`.
    pub fn news_language(&self) -> String {
        self.language.chars().take(2).collect()
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `url` must be set (the sitemap needs absolute canonical URLs)
    /// - `url` must be a valid http(s) URL with a host
    pub fn validate(&self) -> anyhow::Result<()> {
        let Some(url_str) = &self.url else {
            anyhow::bail!("site.url is not configured; set e.g. url = \"https://example.com\"");
        };

        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    anyhow::bail!(
                        "site.url scheme '{}' not supported, must be http or https",
                        parsed.scheme()
                    );
                }
                if parsed.host_str().is_none() {
                    anyhow::bail!("site.url must have a valid host");
                }
            }
            Err(e) => anyhow::bail!("site.url is invalid: {e}"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_site_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.language, "en");
        assert!(config.site.url.is_none());
    }

    #[test]
    fn test_news_language_truncates() {
        let config = test_parse_config("[site]\nlanguage = \"hi-IN\"");
        assert_eq!(config.site.news_language(), "hi");
    }

    #[test]
    fn test_validate_requires_url() {
        let config = test_parse_config("[site]\ntitle = \"Test\"");
        assert!(config.site.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let config = test_parse_config("[site]\nurl = \"ftp://example.com\"");
        assert!(config.site.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_https() {
        let config = test_parse_config("[site]\nurl = \"https://example.com\"");
        assert!(config.site.validate().is_ok());
    }
}
