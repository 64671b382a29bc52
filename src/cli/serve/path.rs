//! URL path to static file resolution for the fallthrough handler.

use std::path::{Path, PathBuf};

/// Resolve a request URL to a file under the public directory.
///
/// Rejects parent-directory components, maps directories to their
/// `index.html`, and returns `None` when nothing exists on disk.
pub fn resolve_path(url: &str, public_dir: &Path) -> Option<PathBuf> {
    let path = url.split('?').next().unwrap_or(url);
    let path = path.trim_start_matches('/');

    // No escaping the public directory
    if Path::new(path)
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return None;
    }

    let candidate = if path.is_empty() {
        public_dir.join("index.html")
    } else {
        public_dir.join(path)
    };

    if candidate.is_dir() {
        let index = candidate.join("index.html");
        return index.is_file().then_some(index);
    }

    candidate.is_file().then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("style.css"), "body {}").unwrap();

        let resolved = resolve_path("/style.css", tmp.path()).unwrap();
        assert_eq!(resolved, tmp.path().join("style.css"));
    }

    #[test]
    fn test_resolve_root_to_index() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("index.html"), "<html></html>").unwrap();

        let resolved = resolve_path("/", tmp.path()).unwrap();
        assert_eq!(resolved, tmp.path().join("index.html"));
    }

    #[test]
    fn test_resolve_directory_to_index() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("blog")).unwrap();
        fs::write(tmp.path().join("blog/index.html"), "<html></html>").unwrap();

        let resolved = resolve_path("/blog", tmp.path()).unwrap();
        assert_eq!(resolved, tmp.path().join("blog/index.html"));
    }

    #[test]
    fn test_resolve_strips_query() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("page.html"), "").unwrap();

        assert!(resolve_path("/page.html?x=1", tmp.path()).is_some());
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(resolve_path("/../secret", tmp.path()).is_none());
    }

    #[test]
    fn test_resolve_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(resolve_path("/nope.html", tmp.path()).is_none());
    }
}
