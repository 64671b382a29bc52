//! Directory-backed content store.
//!
//! Scans the content directory for `*.toml` story documents on every
//! query. No cache: the sitemap always reflects what is on disk, and the
//! document is capped at a size where a rescan is cheap.

use crate::debug;
use crate::store::{ContentStore, CoverImage, Story, StoryMeta, StoryQuery};
use crate::utils::date::DateTimeUtc;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Content store reading story documents from a directory tree.
#[derive(Debug, Clone)]
pub struct DirStore {
    content_dir: PathBuf,
}

impl DirStore {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// All story document paths, sorted for a deterministic return order.
    fn story_paths(&self) -> Vec<PathBuf> {
        if !self.content_dir.is_dir() {
            return Vec::new();
        }

        jwalk::WalkDir::new(&self.content_dir)
            .sort(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect()
    }

    /// Read and resolve one story document; `None` when it fails to parse
    /// or carries no usable publish date.
    fn load_story(path: &Path) -> Option<Story> {
        let content = fs::read_to_string(path).ok()?;
        let meta: StoryMeta = match toml::from_str(&content) {
            Ok(meta) => meta,
            Err(e) => {
                debug!("store"; "skipping {}: {}", path.display(), e);
                return None;
            }
        };

        let id = path.file_stem()?.to_str()?.to_string();
        let date = DateTimeUtc::parse(meta.date.as_deref()?)?;
        let updated = meta.updated.as_deref().and_then(DateTimeUtc::parse);
        let permalink = meta
            .permalink
            .clone()
            .unwrap_or_else(|| format!("/{id}/"));
        let title = meta.title.clone().unwrap_or_else(|| id.clone());

        Some(Story {
            id,
            permalink,
            title,
            date,
            updated,
            status: meta.status,
            kind: meta.kind,
            cover: meta.cover.map(|c| CoverImage {
                url: c.url,
                caption: c.caption,
                title: c.title,
            }),
        })
    }
}

impl ContentStore for DirStore {
    fn query(&self, query: &StoryQuery) -> Result<Vec<Story>> {
        let mut stories = Vec::new();

        for path in self.story_paths() {
            let Some(story) = Self::load_story(&path) else {
                continue;
            };

            if story.kind != query.kind
                || story.status != query.status
                || story.date < query.published_after
            {
                continue;
            }

            stories.push(story);
            if stories.len() >= query.limit {
                break;
            }
        }

        Ok(stories)
    }
}

/// Build the directory store for the configured content path.
pub fn open_store(config: &crate::config::SiteConfig) -> Result<DirStore> {
    let dir = &config.store.content;
    if !dir.exists() {
        // An empty sitemap is valid; a missing content dir is a setup error
        anyhow::bail!(
            "content directory {} does not exist",
            dir.display()
        );
    }
    dir.is_dir()
        .then(|| DirStore::new(dir))
        .with_context(|| format!("{} is not a directory", dir.display()))
}
