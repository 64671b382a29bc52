//! Marker-delimited block editing for the front server config file.
//!
//! Some front servers (LiteSpeed and friends) consult `.htaccess` style
//! files directly, so activation writes a rewrite rule there that maps the
//! sitemap filename to the always-available direct-access alias. Edits are
//! idempotent "ensure region" operations: find-or-insert a delimited
//! block, and removal deletes the same delimited region.

use crate::debug;
use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

const BEGIN_MARKER: &str = "# BEGIN storymap";
const END_MARKER: &str = "# END storymap";

/// Non-greedy match of the whole marker-delimited region.
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?s)\n?{BEGIN_MARKER}.*?{END_MARKER}\n?")).unwrap()
});

/// First marker-delimited region owned by someone else. Our block goes
/// right after it so the front server's own rules keep their position.
static HOST_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)# BEGIN [^\n]+\n.*?# END [^\n]+").unwrap());

/// Rewrite block routing the sitemap filename to the direct-access alias.
pub fn rule_block(filename: &str, direct_param: &str) -> String {
    let mut escaped = String::new();
    for c in filename.chars() {
        if c == '.' {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    format!(
        "\n{BEGIN_MARKER}\n\
         <IfModule mod_rewrite.c>\n\
         RewriteEngine On\n\
         RewriteRule ^{escaped}$ /?{direct_param}=sitemap [L]\n\
         </IfModule>\n\
         {END_MARKER}\n"
    )
}

/// The file exists and is writable.
fn is_writable(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| !m.permissions().readonly())
}

/// Insert the block unless a marker is already present.
///
/// Returns whether the file was modified. Degrades to a silent no-op when
/// the file is missing or not writable - the sitemap works without the
/// patch, it just takes the slower route through us.
pub fn ensure_block(path: &Path, block: &str) -> Result<bool> {
    if !is_writable(path) {
        debug!("htaccess"; "{} not writable, skipping patch", path.display());
        return Ok(false);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if content.contains(BEGIN_MARKER) {
        return Ok(false);
    }

    // After the host's own marker region when it has one, appended
    // otherwise
    let insert_at = HOST_BLOCK_RE.find(&content).map(|host| host.end());
    let patched = match insert_at {
        Some(at) => {
            let mut patched = String::with_capacity(content.len() + block.len());
            patched.push_str(&content[..at]);
            patched.push_str(block);
            patched.push_str(&content[at..]);
            patched
        }
        None => {
            let mut patched = content;
            patched.push_str(block);
            patched
        }
    };
    fs::write(path, patched)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

/// Remove the previously inserted block by its markers.
///
/// Returns whether the file was modified; missing or read-only files are
/// a silent no-op like [`ensure_block`].
pub fn remove_block(path: &Path) -> Result<bool> {
    if !is_writable(path) {
        debug!("htaccess"; "{} not writable, skipping cleanup", path.display());
        return Ok(false);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let cleaned = BLOCK_RE.replace(&content, "");
    if cleaned == content {
        return Ok(false);
    }

    fs::write(path, cleaned.as_ref())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> String {
        rule_block("webstory-news-sitemap.xml", "webstory_news_direct")
    }

    #[test]
    fn test_rule_block_escapes_dots() {
        let block = block();
        assert!(block.contains(r"^webstory-news-sitemap\.xml$"));
        assert!(block.contains("/?webstory_news_direct=sitemap [L]"));
    }

    #[test]
    fn test_ensure_appends_block() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join(".htaccess");
        fs::write(&file, "RewriteEngine On\n").unwrap();

        assert!(ensure_block(&file, &block()).unwrap());

        let content = fs::read_to_string(&file).unwrap();
        assert!(content.starts_with("RewriteEngine On\n"));
        assert!(content.contains(BEGIN_MARKER));
        assert!(content.contains(END_MARKER));
    }

    #[test]
    fn test_ensure_inserts_after_host_region() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join(".htaccess");
        fs::write(
            &file,
            "# BEGIN front\nRewriteEngine On\n# END front\n\n# unrelated trailer\n",
        )
        .unwrap();

        assert!(ensure_block(&file, &block()).unwrap());

        let content = fs::read_to_string(&file).unwrap();
        let host_end = content.find("# END front").unwrap();
        let ours = content.find(BEGIN_MARKER).unwrap();
        let trailer = content.find("# unrelated trailer").unwrap();
        assert!(host_end < ours);
        assert!(ours < trailer);
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join(".htaccess");
        fs::write(&file, "").unwrap();

        assert!(ensure_block(&file, &block()).unwrap());
        assert!(!ensure_block(&file, &block()).unwrap());

        let content = fs::read_to_string(&file).unwrap();
        assert_eq!(content.matches(BEGIN_MARKER).count(), 1);
    }

    #[test]
    fn test_remove_deletes_only_our_region() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join(".htaccess");
        fs::write(&file, "# keep me\n").unwrap();

        ensure_block(&file, &block()).unwrap();
        assert!(remove_block(&file).unwrap());

        let content = fs::read_to_string(&file).unwrap();
        assert_eq!(content, "# keep me\n");
    }

    #[test]
    fn test_remove_without_block_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join(".htaccess");
        fs::write(&file, "# keep me\n").unwrap();

        assert!(!remove_block(&file).unwrap());
        assert_eq!(fs::read_to_string(&file).unwrap(), "# keep me\n");
    }

    #[test]
    fn test_removal_is_non_greedy() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join(".htaccess");
        // A second, foreign marker pair after ours must survive
        let foreign = "# BEGIN other\nstuff\n# END other\n";
        fs::write(&file, String::new()).unwrap();
        ensure_block(&file, &block()).unwrap();
        let mut content = fs::read_to_string(&file).unwrap();
        content.push_str(foreign);
        fs::write(&file, &content).unwrap();

        remove_block(&file).unwrap();
        let content = fs::read_to_string(&file).unwrap();
        assert!(content.contains("# BEGIN other"));
        assert!(!content.contains(BEGIN_MARKER));
    }

    #[test]
    fn test_missing_file_is_silent_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("nope/.htaccess");

        assert!(!ensure_block(&file, &block()).unwrap());
        assert!(!remove_block(&file).unwrap());
    }

    #[test]
    fn test_readonly_file_is_silent_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join(".htaccess");
        fs::write(&file, "").unwrap();

        let mut perms = fs::metadata(&file).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&file, perms.clone()).unwrap();

        assert!(!ensure_block(&file, &block()).unwrap());

        perms.set_readonly(false);
        fs::set_permissions(&file, perms).unwrap();
    }
}
