//! Route interceptor for the news sitemap.
//!
//! Three independent detection strategies, evaluated in pipeline-phase
//! order; the first match wins and the rest are skipped. Each strategy is
//! individually sufficient on purpose: rewrite-table state is influenced
//! by other registrants, so the early raw-path check and the direct-access
//! parameter stay functional even when the registered route is inert.

use crate::config::SiteConfig;
use crate::router::rewrite::{Priority, RewriteRule, RewriteTable};
use anyhow::Result;
use regex::Regex;

/// Internal query variable the rewrite rules resolve to.
pub const SITEMAP_QUERY_VAR: &str = "webstory_news_sitemap";

/// Expected value of the direct-access parameter.
const DIRECT_VALUE: &str = "sitemap";

/// Pipeline phase at which a strategy fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Direct-access query parameter, earliest phase, rewrite-independent.
    Direct,
    /// Raw request-path match, ahead of any other route handling.
    Early,
    /// Registered rewrite rule resolved to the internal query variable.
    Route,
}

/// Route interceptor owning the rewrite table and the early matchers.
#[derive(Debug)]
pub struct Interceptor {
    direct_param: String,
    early_re: Regex,
    table: RewriteTable,
}

impl Interceptor {
    /// Build the interceptor: registers the query variable and the three
    /// rewrite patterns, rebuilds the table, then re-asserts priority.
    pub fn install(config: &SiteConfig) -> Result<Self> {
        let filename = regex::escape(&config.sitemap.filename);

        let mut table = RewriteTable::new();
        table.register_query_var(SITEMAP_QUERY_VAR);

        // Standard rule, leading-slash variant, and subdirectory installs
        let primary = format!(r"{filename}$");
        for pattern in [
            primary.clone(),
            format!(r"^/{filename}$"),
            format!(r".*/{filename}$"),
        ] {
            table.register(RewriteRule::new(
                &pattern,
                SITEMAP_QUERY_VAR,
                "true",
                Priority::Top,
            )?);
        }
        table.flush();

        // Late re-registration: other registrants may have pushed rules
        // ahead of ours between init and first request
        table.ensure_priority(RewriteRule::new(
            &primary,
            SITEMAP_QUERY_VAR,
            "true",
            Priority::Top,
        )?);

        let early_re = Regex::new(&format!(r"(^|/){filename}$"))?;

        Ok(Self {
            direct_param: config.sitemap.direct_param.clone(),
            early_re,
            table,
        })
    }

    /// Interceptor wired to an explicit table (for exercising
    /// rewrite-table failure modes).
    #[cfg(test)]
    fn with_table(config: &SiteConfig, table: RewriteTable) -> Self {
        let filename = regex::escape(&config.sitemap.filename);
        Self {
            direct_param: config.sitemap.direct_param.clone(),
            early_re: Regex::new(&format!(r"(^|/){filename}$")).unwrap(),
            table,
        }
    }

    /// Decide whether this request is a sitemap request.
    ///
    /// `path` is the URL path, `raw_query` the query string without `?`.
    /// Returns the phase whose strategy fired, or `None` to fall through
    /// to normal content serving. Side-effect-free.
    pub fn decide(&self, path: &str, raw_query: Option<&str>) -> Option<Phase> {
        if self.matches_direct(raw_query) {
            return Some(Phase::Direct);
        }

        if self.early_re.is_match(path) {
            return Some(Phase::Early);
        }

        if let Some(vars) = self.table.resolve(path)
            && vars.get(SITEMAP_QUERY_VAR).map(String::as_str) == Some("true")
        {
            return Some(Phase::Route);
        }

        None
    }

    /// Direct-access bypass: reserved parameter with the exact expected
    /// value, regardless of rewrite state.
    fn matches_direct(&self, raw_query: Option<&str>) -> bool {
        let Some(query) = raw_query else {
            return false;
        };
        query.split('&').any(|pair| {
            pair.split_once('=')
                .is_some_and(|(k, v)| k == self.direct_param && v == DIRECT_VALUE)
        })
    }

    /// Number of active rewrite rules (diagnostics).
    pub fn active_rules(&self) -> usize {
        self.table.active_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn interceptor() -> Interceptor {
        let config = test_parse_config("");
        Interceptor::install(&config).unwrap()
    }

    #[test]
    fn test_direct_param_fires_first() {
        let i = interceptor();
        assert_eq!(
            i.decide("/", Some("webstory_news_direct=sitemap")),
            Some(Phase::Direct)
        );
        // Direct wins even when the path would also match
        assert_eq!(
            i.decide(
                "/webstory-news-sitemap.xml",
                Some("webstory_news_direct=sitemap")
            ),
            Some(Phase::Direct)
        );
    }

    #[test]
    fn test_direct_param_requires_exact_value() {
        let i = interceptor();
        assert_eq!(i.decide("/", Some("webstory_news_direct=other")), None);
        assert_eq!(i.decide("/", Some("webstory_news_direct")), None);
    }

    #[test]
    fn test_direct_param_among_others() {
        let i = interceptor();
        assert_eq!(
            i.decide("/", Some("a=1&webstory_news_direct=sitemap&b=2")),
            Some(Phase::Direct)
        );
    }

    #[test]
    fn test_early_path_match() {
        let i = interceptor();
        assert_eq!(
            i.decide("/webstory-news-sitemap.xml", None),
            Some(Phase::Early)
        );
        assert_eq!(
            i.decide("webstory-news-sitemap.xml", None),
            Some(Phase::Early)
        );
    }

    #[test]
    fn test_subdirectory_install_matches() {
        let i = interceptor();
        assert_eq!(
            i.decide("/blog/webstory-news-sitemap.xml", None),
            Some(Phase::Early)
        );
    }

    #[test]
    fn test_filename_is_suffix_anchored() {
        let i = interceptor();
        assert_eq!(i.decide("/webstory-news-sitemap.xml.bak", None), None);
        assert_eq!(i.decide("/other-sitemap.xml", None), None);
    }

    #[test]
    fn test_route_phase_catches_unanchored_suffix() {
        // The registered rules are suffix-only, so a filename glued onto a
        // longer last segment slips past the early matcher and resolves
        // through the table instead
        let i = interceptor();
        assert_eq!(
            i.decide("/feeds-webstory-news-sitemap.xml", None),
            Some(Phase::Route)
        );
    }

    #[test]
    fn test_route_phase_via_rewrite_table() {
        // Disable the early matcher's chance by querying through a path
        // only the table sees: impossible by construction (both see the
        // same path), so assert the table alone resolves correctly
        let i = interceptor();
        assert!(i.table.resolve("/webstory-news-sitemap.xml").is_some());
        assert!(i.active_rules() >= 3);
    }

    #[test]
    fn test_unflushed_table_leaves_other_strategies_alive() {
        let config = test_parse_config("");
        let mut table = RewriteTable::new();
        table.register_query_var(SITEMAP_QUERY_VAR);
        table.register(
            RewriteRule::new(
                r"webstory-news-sitemap\.xml$",
                SITEMAP_QUERY_VAR,
                "true",
                Priority::Top,
            )
            .unwrap(),
        );
        // No flush: the registered route is inert
        let i = Interceptor::with_table(&config, table);

        assert!(i.table.resolve("/webstory-news-sitemap.xml").is_none());
        // Strategies 1 and 2 still fire
        assert_eq!(
            i.decide("/", Some("webstory_news_direct=sitemap")),
            Some(Phase::Direct)
        );
        assert_eq!(
            i.decide("/webstory-news-sitemap.xml", None),
            Some(Phase::Early)
        );
    }

    #[test]
    fn test_fallthrough() {
        let i = interceptor();
        assert_eq!(i.decide("/", None), None);
        assert_eq!(i.decide("/about/", Some("page=2")), None);
    }

    #[test]
    fn test_custom_filename() {
        let config = test_parse_config("[sitemap]\nfilename = \"stories.xml\"");
        let i = Interceptor::install(&config).unwrap();
        assert_eq!(i.decide("/stories.xml", None), Some(Phase::Early));
        assert_eq!(i.decide("/webstory-news-sitemap.xml", None), None);
    }
}
