//! One-shot sitemap generation.

use crate::config::SiteConfig;
use crate::generator::NewsSitemap;
use crate::store::open_store;
use crate::utils::date::DateTimeUtc;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Generate the sitemap once, to stdout or to a file.
pub fn run_generate(output: Option<&Path>, config: &SiteConfig) -> Result<()> {
    let store = open_store(config)?;
    let sitemap = NewsSitemap::build(&store, config, DateTimeUtc::now())?;

    match output {
        Some(path) => sitemap.write(path),
        None => {
            let xml = sitemap.into_xml();
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(xml.as_bytes())?;
            Ok(())
        }
    }
}
