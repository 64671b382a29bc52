//! Google News sitemap generation.
//!
//! Builds the complete document for stories published inside the
//! freshness window.
//!
//! # Document Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:news="http://www.google.com/schemas/sitemap-news/0.9"
//!         xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
//!   <url>
//!     <loc>https://example.com/web-stories/hello/</loc>
//!     <news:news>...</news:news>
//!     <image:image><image:loc><![CDATA[...]]></image:loc></image:image>
//!     <lastmod>2024-01-01T05:30:00+05:30</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::config::SiteConfig;
use crate::store::{ContentStore, StoryQuery};
use crate::utils::date::{DateTimeUtc, UtcOffset};
use crate::utils::xml::{cdata, escape, escape_loc};
use crate::{debug, log};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const NEWS_NS: &str = "http://www.google.com/schemas/sitemap-news/0.9";
const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// A fully resolved news sitemap, ready to render.
pub struct NewsSitemap {
    publication_name: String,
    publication_language: String,
    offset: UtcOffset,
    entries: Vec<NewsEntry>,
}

struct NewsEntry {
    loc: String,
    title: String,
    date: DateTimeUtc,
    updated: DateTimeUtc,
    image: Option<String>,
}

impl NewsSitemap {
    /// Query the store and resolve every eligible story into an entry.
    ///
    /// Entries keep the store's return order; eligibility (kind, status,
    /// window, limit) is the query's business.
    pub fn build(
        store: &dyn ContentStore,
        config: &SiteConfig,
        now: DateTimeUtc,
    ) -> Result<Self> {
        let query = StoryQuery::published_within(
            &config.store.kind,
            now,
            config.sitemap.window_hours,
            config.sitemap.limit,
        );
        let stories = store.query(&query).context("content store query failed")?;

        let base_url = config.base_url();
        let entries = stories
            .iter()
            .map(|story| {
                if let Some(cover) = &story.cover {
                    debug!(
                        "sitemap";
                        "{}: cover {} ({})",
                        story.id,
                        cover.url,
                        cover.caption().unwrap_or("no caption")
                    );
                }
                NewsEntry {
                    loc: story.canonical_url(base_url),
                    title: story.title.clone(),
                    date: story.date,
                    updated: story.updated_or_date(),
                    image: story.cover.as_ref().map(|c| c.url.clone()),
                }
            })
            .collect();

        Ok(Self {
            publication_name: config.site.title.clone(),
            publication_language: config.site.news_language(),
            offset: config.sitemap.utc_offset(),
            entries,
        })
    }

    /// Number of `<url>` entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the complete document.
    ///
    /// Zero entries still produce the full envelope - an empty urlset is
    /// a valid sitemap, not an error.
    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(1024 + self.entries.len() * 512);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\"\n        xmlns:news=\"");
        xml.push_str(NEWS_NS);
        xml.push_str("\"\n        xmlns:image=\"");
        xml.push_str(IMAGE_NS);
        xml.push_str("\">\n");

        let name = escape(&self.publication_name).into_owned();
        for entry in self.entries {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_loc(&entry.loc));
            xml.push_str("</loc>\n");

            xml.push_str("    <news:news>\n      <news:publication>\n        <news:name>");
            xml.push_str(&name);
            xml.push_str("</news:name>\n        <news:language>");
            xml.push_str(&self.publication_language);
            xml.push_str("</news:language>\n      </news:publication>\n");
            xml.push_str("      <news:publication_date>");
            xml.push_str(&entry.date.to_rfc3339_with_offset(self.offset));
            xml.push_str("</news:publication_date>\n      <news:title>");
            xml.push_str(&cdata(&entry.title));
            xml.push_str("</news:title>\n    </news:news>\n");

            if let Some(image) = &entry.image {
                xml.push_str("    <image:image>\n      <image:loc>");
                xml.push_str(&cdata(image));
                xml.push_str("</image:loc>\n    </image:image>\n");
            }

            xml.push_str("    <lastmod>");
            xml.push_str(&entry.updated.to_rfc3339_with_offset(self.offset));
            xml.push_str("</lastmod>\n  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Render and write the document to a file.
    pub fn write(self, path: &Path) -> Result<()> {
        let count = self.len();
        let xml = self.into_xml();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, xml)
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

        log!("sitemap"; "{} ({} entries)", path.display(), count);
        Ok(())
    }
}
