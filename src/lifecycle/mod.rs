//! Activation and deactivation hooks.
//!
//! Activation registers the rewrite rules, rebuilds the table, and patches
//! the front server config file; deactivation rebuilds and removes the
//! patch. Both are safe to run repeatedly.

pub mod htaccess;

use crate::config::SiteConfig;
use crate::log;
use crate::router::Interceptor;
use anyhow::Result;

/// Activation hook: register rewrite rules, rebuild the table, and ensure
/// the front server config block exists.
pub fn activate(config: &SiteConfig) -> Result<()> {
    let interceptor = Interceptor::install(config)?;
    log!(
        "activate";
        "registered {} rewrite rules for /{}",
        interceptor.active_rules(),
        config.sitemap.filename
    );

    if let Some(file) = &config.htaccess.file {
        let block = htaccess::rule_block(&config.sitemap.filename, &config.sitemap.direct_param);
        if htaccess::ensure_block(file, &block)? {
            log!("activate"; "patched {}", file.display());
        } else {
            log!("activate"; "{} already patched or not writable", file.display());
        }
    }

    Ok(())
}

/// Deactivation hook: rebuild the table without our rules and remove the
/// front server config block.
pub fn deactivate(config: &SiteConfig) -> Result<()> {
    log!("deactivate"; "rewrite rules for /{} released", config.sitemap.filename);

    if let Some(file) = &config.htaccess.file {
        if htaccess::remove_block(file)? {
            log!("deactivate"; "cleaned {}", file.display());
        }
    }

    Ok(())
}
