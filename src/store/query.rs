//! Query filter for the content store.
//!
//! Eligibility is enforced entirely here - the generator never
//! post-filters what the store returns.

use crate::store::StoryStatus;
use crate::utils::date::DateTimeUtc;

/// Filter specification passed to `ContentStore::query`.
#[derive(Debug, Clone)]
pub struct StoryQuery {
    /// Content kind tag that is eligible.
    pub kind: String,
    /// Required publication state.
    pub status: StoryStatus,
    /// Earliest eligible publish timestamp, inclusive.
    pub published_after: DateTimeUtc,
    /// Maximum number of results.
    pub limit: usize,
}

impl StoryQuery {
    /// Query for published stories of `kind` within the trailing
    /// `window_hours` before `now`.
    pub fn published_within(kind: &str, now: DateTimeUtc, window_hours: u32, limit: usize) -> Self {
        let cutoff = DateTimeUtc::from_unix(now.to_unix() - i64::from(window_hours) * 3_600);
        Self {
            kind: kind.to_string(),
            status: StoryStatus::Published,
            published_after: cutoff,
            limit,
        }
    }
}
