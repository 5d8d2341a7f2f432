//! Configuration loading for polysite.
//!
//! Parses `polysite.toml` with serde and provides auto-discovery of the file
//! in parent directories. CLI settings are applied during load via
//! [`CliSettings`].
//!
//! ```toml
//! [site]
//! title = "Grasp Docs"
//! logo = "/grasp-logo.svg"
//! default_locale = "en-US"
//!
//! [theme]
//! sidebar_depth = 2
//!
//! [[head]]
//! tag = "meta"
//! attrs = { name = "theme-color", content = "#3eaf7c" }
//!
//! [locales.en-US]
//! title = "Grasp Docs"
//! navbar = [{ text = "GitHub", link = "https://github.com/grasplabs" }]
//!
//! [locales.zh-CN]
//! path = "/zh/"
//! title = "Grasp 文档"
//! ```
//!
//! Locale tables may also live in separate files, one per locale, named
//! `<locale>.toml` inside `site.locales_dir`.
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.title`
//! - `site.base`
//! - `site.logo`

mod expand;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use polysite_locale::{LabelValue, LocaleFragment, LocaleKey, NavEntry, SidebarSection};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the default locale.
    pub default_locale: Option<String>,
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override link checking.
    pub check_links: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "polysite.toml";

/// Bundlers the generator ships adapters for.
const KNOWN_BUNDLERS: [&str; 2] = ["vite", "webpack"];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteSection,
    /// Theme flags shared by all locales.
    pub theme: ThemeConfig,
    /// Bundler selection and options.
    pub bundler: BundlerConfig,
    /// Tags injected into every page's `<head>`.
    pub head: Vec<HeadTag>,
    /// Inline locale tables as written in the file.
    locales: BTreeMap<String, LocaleSection>,

    /// Locale tables from the file and from `locales_dir` (set after loading).
    #[serde(skip)]
    pub locales_resolved: BTreeMap<LocaleKey, LocaleSection>,
    /// Resolved filesystem paths (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Site-wide settings.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Site title, used for locales without their own.
    pub title: String,
    /// Site description, used for locales without their own.
    pub description: Option<String>,
    /// URL prefix the site is deployed under.
    pub base: String,
    /// Logo image path.
    pub logo: Option<String>,
    /// Locale every other locale falls back to.
    pub default_locale: String,
    /// Markdown source directory, relative to the config file.
    source_dir: Option<String>,
    /// Directory of per-locale TOML files, relative to the config file.
    locales_dir: Option<String>,
    /// Whether navigation links are checked against the source directory.
    pub check_links: bool,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            base: "/".to_owned(),
            logo: None,
            default_locale: "en-US".to_owned(),
            source_dir: None,
            locales_dir: None,
            check_links: true,
        }
    }
}

/// Resolved filesystem paths.
#[derive(Debug, Default)]
pub struct PathsConfig {
    /// Markdown source directory.
    pub source_dir: PathBuf,
    /// Directory of per-locale files, if configured.
    pub locales_dir: Option<PathBuf>,
}

/// Theme flags shared by all locales.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Heading depth the sidebar expands to.
    pub sidebar_depth: u8,
    /// Show "edit this page" links.
    pub edit_link: bool,
    /// Show last-updated timestamps.
    pub last_updated: bool,
    /// Show contributor lists.
    pub contributors: bool,
    /// Enable the git plugin. Left to the theme default when unset.
    pub git: Option<bool>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            sidebar_depth: 2,
            edit_link: false,
            last_updated: false,
            contributors: false,
            git: None,
        }
    }
}

/// Bundler selection and options, passed to the generator verbatim.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundlerConfig {
    /// Bundler name (`vite` or `webpack`).
    pub name: String,
    /// Bundler options.
    pub options: toml::Table,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            name: "vite".to_owned(),
            options: toml::Table::new(),
        }
    }
}

/// One `<head>` tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadTag {
    /// Tag name (`meta`, `link`, `script`).
    pub tag: String,
    /// Tag attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Inner content.
    #[serde(default)]
    pub content: Option<String>,
}

/// One locale's table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleSection {
    /// Route prefix (`/zh/`). The default locale is served from `/`.
    pub path: Option<String>,
    /// Locale title, overriding the site title.
    pub title: Option<String>,
    /// Locale description, overriding the site description.
    pub description: Option<String>,
    /// Navbar entries.
    pub navbar: Option<Vec<NavEntry>>,
    /// Sidebar sections.
    pub sidebar: Option<Vec<SidebarSection>>,
    /// UI strings.
    pub strings: Option<BTreeMap<String, LabelValue>>,
}

impl LocaleSection {
    /// The navigation and UI strings part of this table.
    #[must_use]
    pub fn fragment(&self) -> LocaleFragment {
        LocaleFragment {
            navbar: self.navbar.clone(),
            sidebar: self.sidebar.clone(),
            strings: self.strings.clone(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML parsing error in a per-locale file.
    #[error("TOML parse error in {}: {source}", path.display())]
    LocaleFile {
        /// The locale file.
        path: PathBuf,
        /// Underlying parse error.
        source: toml::de::Error,
    },
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.logo`").
        field: String,
        /// Error message (e.g., "${`LOGO_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a route prefix of the form `/` or `/zh/`.
fn require_route_path(path: &str, field: &str) -> Result<(), ConfigError> {
    if !path.starts_with('/') || !path.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start and end with `/`, got `{path}`"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `polysite.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if no config file is found, parsing fails, or the loaded
    /// configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            path.to_path_buf()
        } else {
            Self::discover_config().ok_or_else(|| {
                let cwd = std::env::current_dir().unwrap_or_default();
                ConfigError::NotFound(cwd.join(CONFIG_FILENAME))
            })?
        };

        let mut config = Self::load_from_file(&path)?;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            locales = config.locales_resolved.len(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(default_locale) = &settings.default_locale {
            self.site.default_locale.clone_from(default_locale);
        }
        if let Some(source_dir) = &settings.source_dir {
            self.paths_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(check_links) = settings.check_links {
            self.site.check_links = check_links;
        }
    }

    /// The default locale.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `site.default_locale` is not a valid tag.
    pub fn default_locale(&self) -> Result<LocaleKey, ConfigError> {
        LocaleKey::new(self.site.default_locale.as_str())
            .map_err(|e| ConfigError::Validation(format!("site.default_locale: {e}")))
    }

    /// Route prefix a locale is served under.
    ///
    /// The file's own default locale is served from `/` unless it declares a
    /// path. Overriding the default locale does not move any locale.
    #[must_use]
    pub fn route_path(&self, locale: &LocaleKey) -> Option<&str> {
        self.locales_resolved.get(locale)?.path.as_deref()
    }

    /// Navigation and UI string fragments of every locale.
    #[must_use]
    pub fn fragments(&self) -> BTreeMap<LocaleKey, LocaleFragment> {
        self.locales_resolved
            .iter()
            .map(|(key, section)| (key.clone(), section.fragment()))
            .collect()
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.resolve_locales()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading and applying CLI settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_bundler()?;
        self.validate_head()?;
        self.validate_locales()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        require_route_path(&self.site.base, "site.base")?;

        if let Some(logo) = &self.site.logo {
            require_non_empty(logo, "site.logo")?;
            if !logo.starts_with('/') && !logo.starts_with("http://") && !logo.starts_with("https://") {
                return Err(ConfigError::Validation(
                    "site.logo must be an absolute path or an http(s) URL".to_owned(),
                ));
            }
        }

        self.default_locale()?;
        Ok(())
    }

    fn validate_bundler(&self) -> Result<(), ConfigError> {
        if !KNOWN_BUNDLERS.contains(&self.bundler.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "bundler.name must be one of {}, got `{}`",
                KNOWN_BUNDLERS.join(", "),
                self.bundler.name
            )));
        }
        Ok(())
    }

    fn validate_head(&self) -> Result<(), ConfigError> {
        for (index, tag) in self.head.iter().enumerate() {
            if tag.tag.is_empty() || !tag.tag.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(ConfigError::Validation(format!(
                    "head[{index}].tag must be a non-empty tag name, got `{}`",
                    tag.tag
                )));
            }
        }
        Ok(())
    }

    /// Check route prefixes: every locale has one, and no two share it.
    fn validate_locales(&self) -> Result<(), ConfigError> {
        let mut seen: HashMap<&str, &LocaleKey> = HashMap::new();

        for locale in self.locales_resolved.keys() {
            let field = format!("locales.{locale}.path");
            let path = self
                .route_path(locale)
                .ok_or_else(|| ConfigError::Validation(format!("{field} is required")))?;
            require_route_path(path, &field)?;

            if let Some(other) = seen.insert(path, locale) {
                return Err(ConfigError::Validation(format!(
                    "locales `{other}` and `{locale}` share the route path `{path}`"
                )));
            }
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;
        self.site.base = expand::expand_env(&self.site.base, "site.base")?;
        expand::expand_env_opt(&mut self.site.logo, "site.logo")?;
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.paths_resolved = PathsConfig {
            source_dir: config_dir.join(self.site.source_dir.as_deref().unwrap_or("docs")),
            locales_dir: self.site.locales_dir.as_deref().map(|d| config_dir.join(d)),
        };
    }

    /// Collect inline locale tables and per-locale files into `locales_resolved`.
    fn resolve_locales(&mut self) -> Result<(), ConfigError> {
        let mut resolved = BTreeMap::new();

        for (name, section) in std::mem::take(&mut self.locales) {
            let key = LocaleKey::new(name.as_str())
                .map_err(|e| ConfigError::Validation(format!("locales.{name}: {e}")))?;
            resolved.insert(key, section);
        }

        if let Some(dir) = &self.paths_resolved.locales_dir {
            for (key, path) in locale_files(dir)? {
                if resolved.contains_key(&key) {
                    return Err(ConfigError::Validation(format!(
                        "locale `{key}` is defined both inline and in {}",
                        path.display()
                    )));
                }
                let content = std::fs::read_to_string(&path)?;
                let section: LocaleSection = toml::from_str(&content)
                    .map_err(|source| ConfigError::LocaleFile {
                        path: path.clone(),
                        source,
                    })?;
                tracing::debug!(locale = %key, path = %path.display(), "Loaded locale file");
                resolved.insert(key, section);
            }
        }

        if let Some(section) = resolved
            .iter_mut()
            .find(|(key, _)| key.as_str() == self.site.default_locale)
            .map(|(_, section)| section)
        {
            section.path.get_or_insert_with(|| "/".to_owned());
        }

        self.locales_resolved = resolved;
        Ok(())
    }
}

/// List `<locale>.toml` files in `dir`, sorted by locale.
fn locale_files(dir: &Path) -> Result<BTreeMap<LocaleKey, PathBuf>, ConfigError> {
    if !dir.is_dir() {
        return Err(ConfigError::Validation(format!(
            "site.locales_dir {} is not a directory",
            dir.display()
        )));
    }

    let mut files = BTreeMap::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_none_or(|ext| ext != "toml") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let key = LocaleKey::new(stem)
            .map_err(|e| ConfigError::Validation(format!("{}: {e}", path.display())))?;
        files.insert(key, path);
    }
    Ok(files)
}
