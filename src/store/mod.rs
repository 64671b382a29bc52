//! Content store: story records and the query interface.
//!
//! The generator treats the store as a black box behind [`ContentStore`];
//! the shipped backend is [`DirStore`], which reads TOML story documents
//! from the configured content directory.

mod dir;
mod meta;
mod query;

pub use dir::{DirStore, open_store};
pub use meta::{CoverMeta, StoryMeta, StoryStatus};
pub use query::StoryQuery;

use crate::utils::date::DateTimeUtc;
use anyhow::Result;

/// Cover image attached to a story.
#[derive(Debug, Clone)]
pub struct CoverImage {
    pub url: String,
    pub caption: Option<String>,
    pub title: Option<String>,
}

impl CoverImage {
    /// Caption text, falling back to the attachment's own title.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref().or(self.title.as_deref())
    }
}

/// A story as read from the content store at generation time.
///
/// Nothing here is persisted by this crate; the store owns the records.
#[derive(Debug, Clone)]
pub struct Story {
    /// Identifier (file stem of the backing document).
    pub id: String,
    /// Site-relative URL path.
    pub permalink: String,
    pub title: String,
    /// Publish timestamp, UTC.
    pub date: DateTimeUtc,
    /// Last-modified timestamp, UTC; `None` falls back to `date`.
    pub updated: Option<DateTimeUtc>,
    pub status: StoryStatus,
    /// Content kind tag.
    pub kind: String,
    pub cover: Option<CoverImage>,
}

impl Story {
    /// Last-modified timestamp, falling back to the publish timestamp.
    pub fn updated_or_date(&self) -> DateTimeUtc {
        self.updated.unwrap_or(self.date)
    }

    /// Absolute canonical URL for this story.
    pub fn canonical_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.permalink)
    }
}

/// Black-box query interface over the content store.
pub trait ContentStore {
    /// Return stories matching `query`, in the store's own order.
    fn query(&self, query: &StoryQuery) -> Result<Vec<Story>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_caption_fallback() {
        let cover = CoverImage {
            url: "https://example.com/c.jpg".into(),
            caption: None,
            title: Some("Attachment title".into()),
        };
        assert_eq!(cover.caption(), Some("Attachment title"));

        let captioned = CoverImage {
            url: "https://example.com/c.jpg".into(),
            caption: Some("Real caption".into()),
            title: Some("Attachment title".into()),
        };
        assert_eq!(captioned.caption(), Some("Real caption"));

        let bare = CoverImage {
            url: "https://example.com/c.jpg".into(),
            caption: None,
            title: None,
        };
        assert_eq!(bare.caption(), None);
    }

    #[test]
    fn test_updated_falls_back_to_date() {
        let story = Story {
            id: "s".into(),
            permalink: "/s/".into(),
            title: "S".into(),
            date: DateTimeUtc::new(2024, 1, 1, 0, 0, 0),
            updated: None,
            status: StoryStatus::Published,
            kind: "web-story".into(),
            cover: None,
        };
        assert_eq!(story.updated_or_date(), story.date);
    }

    #[test]
    fn test_canonical_url() {
        let story = Story {
            id: "hello".into(),
            permalink: "/web-stories/hello/".into(),
            title: "Hello".into(),
            date: DateTimeUtc::new(2024, 1, 1, 0, 0, 0),
            updated: None,
            status: StoryStatus::Published,
            kind: "web-story".into(),
            cover: None,
        };
        assert_eq!(
            story.canonical_url("https://example.com"),
            "https://example.com/web-stories/hello/"
        );
    }
}
