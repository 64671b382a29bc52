//! Site configuration management for `storymap.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                          |
//! |--------------|--------------------------------------------------|
//! | `[site]`     | Publication identity (title, url, language)      |
//! | `[serve]`    | HTTP server (interface, port, static fallthrough)|
//! | `[store]`    | Content directory and eligible content kind      |
//! | `[sitemap]`  | Filename, limit, window, target offset           |
//! | `[htaccess]` | Front server config file patched on activate     |

pub mod section;
pub mod types;
mod util;

use util::{find_config_file, normalize_path};

pub use section::{HtaccessConfig, ServeConfig, SiteInfoConfig, SitemapConfig, StoreConfig};
pub use types::{ConfigError, cfg, init_config};

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing storymap.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// CLI arguments reference (internal use only)
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Publication identity
    pub site: SiteInfoConfig,

    /// HTTP server settings
    pub serve: ServeConfig,

    /// Content store settings
    pub store: StoreConfig,

    /// News sitemap settings
    pub sitemap: SitemapConfig,

    /// Front server config file settings
    pub htaccess: HtaccessConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            cli: None,
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            site: SiteInfoConfig::default(),
            serve: ServeConfig::default(),
            store: StoreConfig::default(),
            sitemap: SitemapConfig::default(),
            htaccess: HtaccessConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file; the project root
    /// is the config file's parent directory.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let config_path = match find_config_file(&cli.config) {
            Some(path) => path,
            None => {
                log!(
                    "error";
                    "Config file '{}' not found in this or any parent directory.",
                    cli.config.display()
                );
                std::process::exit(1);
            }
        };

        let mut config = Self::from_path(&config_path)?;

        config.config_path = config_path;
        config.cli = Some(cli);
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
            if !Self::prompt_continue()? {
                bail!("Aborted due to unknown config fields");
            }
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        eprintln!();
        log!("warning"; "unknown fields in {}:", display_path);
        log!("warning"; "ignoring:");
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Prompt user to continue. Returns true only if user explicitly confirms.
    fn prompt_continue() -> Result<bool> {
        use std::io::{self, Write};

        eprint!("Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.root = normalize_path(&root);

        self.normalize_paths();
        self.apply_command_options(cli);
    }

    /// Normalize all paths relative to the root directory.
    fn normalize_paths(&mut self) {
        let root = self.root.clone();

        self.store.content = normalize_path(&root.join(&self.store.content));
        self.serve.public = normalize_path(&root.join(&self.serve.public));

        if let Some(file) = self.htaccess.file.take() {
            let expanded = shellexpand::tilde(file.to_str().unwrap_or_default()).into_owned();
            let path = PathBuf::from(expanded);
            let full = if path.is_relative() {
                root.join(&path)
            } else {
                path
            };
            self.htaccess.file = Some(normalize_path(&full));
        }
    }

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        if let Commands::Serve { interface, port } = &cli.command {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());

            // Local base URL so canonical links resolve during development
            if self.site.url.is_none() {
                self.site.url = Some(format!(
                    "http://{}:{}",
                    self.serve.interface, self.serve.port
                ));
            }
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Validate configuration for the current command.
    ///
    /// `site.url` is only required where documents get generated; the
    /// lifecycle hooks run without it.
    pub fn validate(&self) -> Result<()> {
        let generates = self
            .cli
            .map_or(true, |cli| cli.is_serve() || cli.is_generate());
        if generates {
            self.site
                .validate()
                .context("invalid [site] configuration")?;
        }
        self.sitemap
            .validate()
            .context("invalid [sitemap] configuration")?;
        Ok(())
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Canonical base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        self.site.url.as_deref().unwrap_or_default().trim_end_matches('/')
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_parse_config`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(extra).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        let result: Result<SiteConfig, _> = toml::from_str("[site\ntitle = \"My Site\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.title, "");
        assert_eq!(config.serve.port, 5277);
        assert_eq!(config.sitemap.limit, 80);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.title, "Test");
        assert!(!ignored.is_empty());
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site]\ntitle = \"Test\"\nurl = \"https://example.com\"";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = test_parse_config("[site]\nurl = \"https://example.com/\"");
        assert_eq!(config.base_url(), "https://example.com");
    }

    #[test]
    fn test_validate_fails_without_url() {
        let config = test_parse_config("[site]\ntitle = \"Test\"");
        assert!(config.validate().is_err());
    }
}
