//! Rewrite rule table.
//!
//! Models the host-style rewrite layer: rules are registered during an
//! initialization phase and map URL patterns to internal query variables.
//! Registration alone does nothing - rules only become visible to
//! [`RewriteTable::resolve`] after [`RewriteTable::flush`] rebuilds the
//! active table. A registered-but-never-flushed table therefore silently
//! matches nothing, which is exactly the failure mode the other two
//! detection strategies exist to cover.

use anyhow::{Context, Result};
use regex::Regex;
use rustc_hash::FxHashMap;

/// Resolved internal query variables for a request.
pub type QueryVars = FxHashMap<String, String>;

/// Rule ordering within the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Evaluated before existing rules.
    Top,
    /// Appended after existing rules.
    Bottom,
}

/// A single rewrite rule: URL pattern to one internal query variable.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: String,
    regex: Regex,
    var: String,
    value: String,
    priority: Priority,
}

impl RewriteRule {
    pub fn new(pattern: &str, var: &str, value: &str, priority: Priority) -> Result<Self> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("invalid rewrite pattern: {pattern}"))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            var: var.to_string(),
            value: value.to_string(),
            priority,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Match against the raw path and the root-relative path (patterns are
    /// written against either form, as the leading-slash variants show).
    fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path) || self.regex.is_match(path.trim_start_matches('/'))
    }
}

/// Ordered rewrite rule table with pending/active staging.
#[derive(Debug, Default)]
pub struct RewriteTable {
    pending: Vec<RewriteRule>,
    active: Vec<RewriteRule>,
    query_vars: Vec<String>,
}

impl RewriteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an internal query variable name. Unregistered variables
    /// never appear in resolved results.
    pub fn register_query_var(&mut self, name: &str) {
        if !self.query_vars.iter().any(|v| v == name) {
            self.query_vars.push(name.to_string());
        }
    }

    /// Register a rule. Idempotent per pattern; `Priority::Top` rules
    /// order ahead of existing ones.
    pub fn register(&mut self, rule: RewriteRule) {
        if self.pending.iter().any(|r| r.pattern == rule.pattern) {
            return;
        }
        match rule.priority {
            Priority::Top => self.pending.insert(0, rule),
            Priority::Bottom => self.pending.push(rule),
        }
    }

    /// Re-register a rule at top priority, in both the pending and the
    /// active set. Counters other registrants pushing their rules ahead
    /// after the initial flush.
    pub fn ensure_priority(&mut self, rule: RewriteRule) {
        self.pending.retain(|r| r.pattern != rule.pattern);
        self.pending.insert(0, rule.clone());

        if !self.active.is_empty() {
            self.active.retain(|r| r.pattern != rule.pattern);
            self.active.insert(0, rule);
        }
    }

    /// Rebuild the active table from the registered rules.
    pub fn flush(&mut self) {
        self.active = self.pending.clone();
    }

    /// Number of active rules.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Resolve a request path against the active rules. First match wins;
    /// only registered query variables are reported.
    pub fn resolve(&self, path: &str) -> Option<QueryVars> {
        let rule = self.active.iter().find(|r| r.matches(path))?;

        if !self.query_vars.iter().any(|v| *v == rule.var) {
            return None;
        }

        let mut vars = QueryVars::default();
        vars.insert(rule.var.clone(), rule.value.clone());
        Some(vars)
    }
}
