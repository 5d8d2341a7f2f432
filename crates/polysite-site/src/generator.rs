//! Generator-facing configuration object.
//!
//! The static-site generator reads one JSON object shaped like its own user
//! config: site locales keyed by route path, theme options with per-route
//! navigation and UI strings, bundler options and `<head>` tags.

use std::collections::BTreeMap;

use polysite_config::HeadTag;
use polysite_locale::{LocaleStrings, NavEntry, SidebarSection};
use serde::Serialize;

use crate::{SiteConfig, SiteError, SiteLocale};

/// Borrowed, serializable view of a [`SiteConfig`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig<'a> {
    base: &'a str,
    lang: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    locales: BTreeMap<&'a str, SiteLocaleEntry<'a>>,
    theme: ThemeEntry<'a>,
    bundler: BundlerEntry<'a>,
    head: Vec<HeadEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct SiteLocaleEntry<'a> {
    lang: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeEntry<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    logo: Option<&'a str>,
    sidebar_depth: u8,
    edit_link: bool,
    last_updated: bool,
    contributors: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    theme_plugins: Option<ThemePlugins>,
    locales: BTreeMap<&'a str, ThemeLocaleEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ThemePlugins {
    git: bool,
}

#[derive(Debug, Serialize)]
struct ThemeLocaleEntry<'a> {
    #[serde(flatten)]
    strings: &'a LocaleStrings,
    navbar: &'a [NavEntry],
    sidebar: &'a [SidebarSection],
}

/// `{ "name": "vite", "viteOptions": { ... } }`
#[derive(Debug, Serialize)]
struct BundlerEntry<'a> {
    name: &'a str,
    #[serde(flatten)]
    options: BTreeMap<String, &'a serde_json::Value>,
}

impl<'a> BundlerEntry<'a> {
    fn new(name: &'a str, options: &'a serde_json::Value) -> Self {
        Self {
            name,
            options: BTreeMap::from([(format!("{name}Options"), options)]),
        }
    }
}

/// `[tag, attrs]` or `[tag, attrs, content]`
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum HeadEntry<'a> {
    Empty(&'a str, &'a BTreeMap<String, String>),
    WithContent(&'a str, &'a BTreeMap<String, String>, &'a str),
}

impl<'a> From<&'a HeadTag> for HeadEntry<'a> {
    fn from(tag: &'a HeadTag) -> Self {
        match &tag.content {
            Some(content) => Self::WithContent(&tag.tag, &tag.attrs, content),
            None => Self::Empty(&tag.tag, &tag.attrs),
        }
    }
}

impl SiteConfig {
    /// Serializable view in the generator's config shape.
    #[must_use]
    pub fn generator_config(&self) -> GeneratorConfig<'_> {
        let default = self.locale(self.default_locale());
        let theme = self.theme();

        let mut site_locales = BTreeMap::new();
        let mut theme_locales = BTreeMap::new();
        for (key, locale) in self.locales() {
            site_locales.insert(
                locale.route_path(),
                SiteLocaleEntry {
                    lang: key.as_str(),
                    title: locale.title(),
                    description: locale.description(),
                },
            );
            theme_locales.insert(
                locale.route_path(),
                ThemeLocaleEntry {
                    strings: &locale.config().strings,
                    navbar: &locale.config().navbar,
                    sidebar: &locale.config().sidebar,
                },
            );
        }

        GeneratorConfig {
            base: self.base(),
            lang: self.default_locale().as_str(),
            title: default.map_or(self.title(), SiteLocale::title),
            description: default.map_or(self.description(), SiteLocale::description),
            locales: site_locales,
            theme: ThemeEntry {
                logo: self.logo(),
                sidebar_depth: theme.sidebar_depth,
                edit_link: theme.edit_link,
                last_updated: theme.last_updated,
                contributors: theme.contributors,
                theme_plugins: theme.git.map(|git| ThemePlugins { git }),
                locales: theme_locales,
            },
            bundler: BundlerEntry::new(self.bundler_name(), self.bundler_options()),
            head: self.head().iter().map(HeadEntry::from).collect(),
        }
    }

    /// Pretty-printed generator config.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Serialize`] if serialization fails.
    pub fn to_generator_json(&self) -> Result<String, SiteError> {
        Ok(serde_json::to_string_pretty(&self.generator_config())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polysite_config::Config;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn generator_json(toml: &str) -> Value {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("polysite.toml");
        std::fs::write(&path, toml).unwrap();
        let config = Config::load(Some(&path), None).unwrap();
        let site = SiteConfig::build(&config).unwrap();
        serde_json::from_str(&site.to_generator_json().unwrap()).unwrap()
    }

    #[test]
    fn test_site_locales_keyed_by_route() {
        let json = generator_json(crate::tests::SAMPLE);

        assert_eq!(json["lang"], "en-US");
        assert_eq!(json["base"], "/");
        assert_eq!(json["title"], "Grasp Docs");
        assert_eq!(
            json["locales"],
            json!({
                "/": { "lang": "en-US", "title": "Grasp Docs", "description": "Browser automation SDK" },
                "/ja/": { "lang": "ja-JP", "title": "Grasp Docs", "description": "Browser automation SDK" },
                "/zh/": { "lang": "zh-CN", "title": "Grasp 文档", "description": "Browser automation SDK" },
            })
        );
    }

    #[test]
    fn test_theme_options() {
        let json = generator_json(crate::tests::SAMPLE);
        let theme = &json["theme"];

        assert_eq!(theme["logo"], "/grasp-logo.svg");
        assert_eq!(theme["sidebarDepth"], 2);
        assert_eq!(theme["editLink"], false);
        assert_eq!(theme["lastUpdated"], false);
        assert_eq!(theme["contributors"], false);
        assert!(theme.get("themePlugins").is_none());
    }

    #[test]
    fn test_git_plugin_flag() {
        let toml = crate::tests::SAMPLE.replace("[theme]", "[theme]\ngit = false");
        let json = generator_json(&toml);
        assert_eq!(json["theme"]["themePlugins"], json!({ "git": false }));
    }

    #[test]
    fn test_theme_locale_has_strings_and_navigation() {
        let json = generator_json(crate::tests::SAMPLE);
        let zh = &json["theme"]["locales"]["/zh/"];

        assert_eq!(zh["selectLanguageName"], "简体中文");
        assert_eq!(zh["editLinkText"], "编辑此页");
        assert_eq!(zh["backToHome"], "Take me home");
        assert_eq!(zh["notFound"][0], "There's nothing here.");
        assert_eq!(
            zh["navbar"],
            json!([{ "text": "GitHub", "link": "https://github.com/grasplabs" }])
        );
        assert_eq!(
            zh["sidebar"],
            json!([{ "text": "快速开始", "children": ["/zh/", "/zh/authentication"] }])
        );
    }

    #[test]
    fn test_bundler_and_head() {
        let json = generator_json(crate::tests::SAMPLE);

        assert_eq!(
            json["bundler"],
            json!({
                "name": "vite",
                "viteOptions": { "css": { "preprocessorOptions": { "scss": { "charset": false } } } }
            })
        );
        assert_eq!(
            json["head"],
            json!([
                ["meta", { "content": "width=device-width, initial-scale=1.0", "name": "viewport" }],
                ["meta", { "content": "#3eaf7c", "name": "theme-color" }],
            ])
        );
    }

    #[test]
    fn test_head_content_serialized_third() {
        let toml = format!(
            "{}\n[[head]]\ntag = \"script\"\ncontent = \"console.log(1)\"\n",
            crate::tests::SAMPLE
        );
        let json = generator_json(&toml);
        assert_eq!(json["head"][2], json!(["script", {}, "console.log(1)"]));
    }

    #[test]
    fn test_output_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("polysite.toml");
        std::fs::write(&path, crate::tests::SAMPLE).unwrap();
        let config = Config::load(Some(&path), None).unwrap();

        let first = SiteConfig::build(&config).unwrap().to_generator_json().unwrap();
        let second = SiteConfig::build(&config).unwrap().to_generator_json().unwrap();
        assert_eq!(first, second);
    }
}
