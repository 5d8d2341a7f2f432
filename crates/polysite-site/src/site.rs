//! Resolved site configuration.

use std::collections::BTreeMap;

use polysite_config::{Config, ConfigError, HeadTag};
use polysite_locale::{
    Inherited, LocaleConfig, LocaleKey, PageIndex, find_broken_links, resolve_detailed,
};

use crate::SiteError;

/// Theme flags shared by all locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeOptions {
    /// Heading depth the sidebar expands to.
    pub sidebar_depth: u8,
    /// Show "edit this page" links.
    pub edit_link: bool,
    /// Show last-updated timestamps.
    pub last_updated: bool,
    /// Show contributor lists.
    pub contributors: bool,
    /// Git plugin toggle, if set.
    pub git: Option<bool>,
}

/// One locale as the generator sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLocale {
    route_path: String,
    title: String,
    description: Option<String>,
    config: LocaleConfig,
}

impl SiteLocale {
    /// Route prefix (`/`, `/zh/`).
    #[must_use]
    pub fn route_path(&self) -> &str {
        &self.route_path
    }

    /// Locale title, or the site title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Locale description, or the site description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Resolved navigation and UI strings.
    #[must_use]
    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }
}

/// Complete, immutable configuration of one site build.
///
/// Built once from a loaded [`Config`]; nothing can change it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    title: String,
    description: Option<String>,
    base: String,
    logo: Option<String>,
    default_locale: LocaleKey,
    theme: ThemeOptions,
    bundler_name: String,
    bundler_options: serde_json::Value,
    head: Vec<HeadTag>,
    locales: BTreeMap<LocaleKey, SiteLocale>,
    inherited: BTreeMap<LocaleKey, Inherited>,
}

impl SiteConfig {
    /// Resolve every locale and combine them with the site-wide settings.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Resolve`] if locale resolution fails and
    /// [`SiteError::Config`] if a locale has no route path.
    pub fn build(config: &Config) -> Result<Self, SiteError> {
        let default_locale = config.default_locale()?;
        let resolution = resolve_detailed(&config.fragments(), &default_locale)?;

        let mut locales = BTreeMap::new();
        for (key, resolved) in resolution.locales {
            let route_path = config.route_path(&key).ok_or_else(|| {
                ConfigError::Validation(format!("locales.{key}.path is required"))
            })?;
            let section = config.locales_resolved.get(&key);

            let locale = SiteLocale {
                route_path: route_path.to_owned(),
                title: section
                    .and_then(|s| s.title.clone())
                    .unwrap_or_else(|| config.site.title.clone()),
                description: section
                    .and_then(|s| s.description.clone())
                    .or_else(|| config.site.description.clone()),
                config: resolved,
            };
            locales.insert(key, locale);
        }

        for (key, inherited) in &resolution.inherited {
            if !inherited.is_empty() {
                tracing::info!(
                    locale = %key,
                    default = %default_locale,
                    fields = inherited.fields.len(),
                    strings = inherited.strings.len(),
                    "Locale falls back to default locale"
                );
            }
        }

        Ok(Self {
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            base: config.site.base.clone(),
            logo: config.site.logo.clone(),
            default_locale,
            theme: ThemeOptions {
                sidebar_depth: config.theme.sidebar_depth,
                edit_link: config.theme.edit_link,
                last_updated: config.theme.last_updated,
                contributors: config.theme.contributors,
                git: config.theme.git,
            },
            bundler_name: config.bundler.name.clone(),
            bundler_options: serde_json::to_value(&config.bundler.options)?,
            head: config.head.clone(),
            locales,
            inherited: resolution.inherited,
        })
    }

    /// Fail if any navigation link points at a page `pages` does not know.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::BrokenLinks`] listing every broken link.
    pub fn check_links(&self, pages: &dyn PageIndex) -> Result<(), SiteError> {
        let broken = find_broken_links(
            self.locales.iter().map(|(key, locale)| (key, &locale.config)),
            pages,
        );
        if broken.is_empty() {
            Ok(())
        } else {
            Err(SiteError::BrokenLinks(broken))
        }
    }

    /// Site title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Site description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Deployment base path.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Logo path.
    #[must_use]
    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }

    /// Locale every other locale falls back to.
    #[must_use]
    pub fn default_locale(&self) -> &LocaleKey {
        &self.default_locale
    }

    /// Theme flags.
    #[must_use]
    pub fn theme(&self) -> ThemeOptions {
        self.theme
    }

    /// Bundler name.
    #[must_use]
    pub fn bundler_name(&self) -> &str {
        &self.bundler_name
    }

    /// Bundler options, as configured.
    #[must_use]
    pub fn bundler_options(&self) -> &serde_json::Value {
        &self.bundler_options
    }

    /// `<head>` tags.
    #[must_use]
    pub fn head(&self) -> &[HeadTag] {
        &self.head
    }

    /// Every locale, keyed by locale.
    #[must_use]
    pub fn locales(&self) -> &BTreeMap<LocaleKey, SiteLocale> {
        &self.locales
    }

    /// One locale.
    #[must_use]
    pub fn locale(&self, key: &LocaleKey) -> Option<&SiteLocale> {
        self.locales.get(key)
    }

    /// What each non-default locale took from the default locale.
    #[must_use]
    pub fn inherited(&self) -> &BTreeMap<LocaleKey, Inherited> {
        &self.inherited
    }
}
