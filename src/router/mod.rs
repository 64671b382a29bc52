//! Request routing: rewrite rule table and the sitemap route interceptor.

mod intercept;
mod rewrite;

pub use intercept::{Interceptor, Phase, SITEMAP_QUERY_VAR};
pub use rewrite::{Priority, QueryVars, RewriteRule, RewriteTable};
