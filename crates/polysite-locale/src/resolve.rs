//! Locale resolution.
//!
//! Resolution turns one fragment per locale into one complete
//! [`LocaleConfig`] per locale. The default locale's fragment must be
//! complete and serves as the fallback source:
//!
//! - `navbar` and `sidebar` fall back as a whole. A locale either provides its
//!   own list or gets the default's list; lists are never merged.
//! - `strings` fall back per label. Each label missing from a locale is taken
//!   from the default locale.
//!
//! The default locale's resolved configuration is always identical to its
//! fragment.

use std::collections::BTreeMap;

use crate::sidebar::{SidebarProblem, validate_sidebar};
use crate::{
    Field, LabelValue, LocaleConfig, LocaleFragment, LocaleKey, LocaleStrings, NavEntry,
    ResolveError, SidebarSection, StringKey,
};

/// Resolved locales keyed by locale.
pub type ResolvedLocales = BTreeMap<LocaleKey, LocaleConfig>;

/// What a non-default locale took from the default locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inherited {
    /// Fields the locale did not provide at all.
    pub fields: Vec<Field>,
    /// Individual labels missing from a strings mapping the locale did provide.
    pub strings: Vec<StringKey>,
}

impl Inherited {
    /// True when the locale is fully translated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.strings.is_empty()
    }
}

/// Result of [`resolve_detailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Complete configuration for every locale, default included.
    pub locales: ResolvedLocales,
    /// Fallbacks taken by each non-default locale.
    pub inherited: BTreeMap<LocaleKey, Inherited>,
}

/// Resolve every locale's fragment against the default locale.
///
/// # Errors
///
/// Fails if the default locale is missing or incomplete, or if any fragment is
/// invalid. No partial result is returned.
pub fn resolve(
    fragments: &BTreeMap<LocaleKey, LocaleFragment>,
    default_locale: &LocaleKey,
) -> Result<ResolvedLocales, ResolveError> {
    resolve_detailed(fragments, default_locale).map(|resolution| resolution.locales)
}

/// Like [`resolve`], also reporting what each locale inherited.
///
/// # Errors
///
/// Same as [`resolve`].
pub fn resolve_detailed(
    fragments: &BTreeMap<LocaleKey, LocaleFragment>,
    default_locale: &LocaleKey,
) -> Result<Resolution, ResolveError> {
    let base = fragments
        .get(default_locale)
        .ok_or_else(|| ResolveError::MissingDefaultLocale {
            locale: default_locale.clone(),
        })?;
    let defaults = Defaults::from_fragment(default_locale, base)?;
    validate_fragment(default_locale, base)?;

    let mut locales = BTreeMap::new();
    let mut inherited = BTreeMap::new();

    for (locale, fragment) in fragments {
        if locale == default_locale {
            locales.insert(locale.clone(), defaults.to_config());
            continue;
        }

        validate_fragment(locale, fragment)?;
        let (config, gaps) = defaults.fill(locale, fragment);
        locales.insert(locale.clone(), config);
        inherited.insert(locale.clone(), gaps);
    }

    tracing::info!(
        default = %default_locale,
        locales = locales.len(),
        "Resolved locale configuration"
    );

    Ok(Resolution { locales, inherited })
}

/// Borrowed view of the complete default fragment.
struct Defaults<'a> {
    navbar: &'a [NavEntry],
    sidebar: &'a [SidebarSection],
    strings: BTreeMap<StringKey, &'a LabelValue>,
}

impl<'a> Defaults<'a> {
    /// Check that the default fragment provides every field and every label.
    fn from_fragment(
        locale: &LocaleKey,
        fragment: &'a LocaleFragment,
    ) -> Result<Self, ResolveError> {
        let incomplete = |field: Field, detail: String| ResolveError::IncompleteDefaultLocale {
            locale: locale.clone(),
            field,
            detail,
        };

        let navbar = fragment
            .provided_navbar()
            .ok_or_else(|| incomplete(Field::Navbar, "is missing or empty".to_owned()))?;
        let sidebar = fragment
            .provided_sidebar()
            .ok_or_else(|| incomplete(Field::Sidebar, "is missing or empty".to_owned()))?;
        let raw = fragment
            .strings
            .as_ref()
            .ok_or_else(|| incomplete(Field::Strings, "is missing".to_owned()))?;

        let mut strings = BTreeMap::new();
        for key in StringKey::ALL {
            match raw.get(key.as_str()) {
                Some(value) if !value.is_blank() => {
                    strings.insert(key, value);
                }
                Some(_) => return Err(incomplete(Field::Strings, format!("has empty `{key}`"))),
                None => return Err(incomplete(Field::Strings, format!("is missing `{key}`"))),
            }
        }

        Ok(Self {
            navbar,
            sidebar,
            strings,
        })
    }

    fn to_config(&self) -> LocaleConfig {
        LocaleConfig {
            navbar: self.navbar.to_vec(),
            sidebar: self.sidebar.to_vec(),
            strings: LocaleStrings::from_resolved(
                self.strings
                    .iter()
                    .map(|(key, value)| (*key, (*value).clone()))
                    .collect(),
            ),
        }
    }

    /// Complete a validated non-default fragment.
    fn fill(&self, locale: &LocaleKey, fragment: &LocaleFragment) -> (LocaleConfig, Inherited) {
        let mut inherited = Inherited::default();

        let navbar = if let Some(navbar) = fragment.provided_navbar() {
            navbar.to_vec()
        } else {
            inherited.fields.push(Field::Navbar);
            self.navbar.to_vec()
        };

        let sidebar = if let Some(sidebar) = fragment.provided_sidebar() {
            sidebar.to_vec()
        } else {
            inherited.fields.push(Field::Sidebar);
            self.sidebar.to_vec()
        };

        let own = fragment.strings.as_ref();
        if own.is_none() {
            inherited.fields.push(Field::Strings);
        }

        let mut labels = BTreeMap::new();
        for (key, fallback) in &self.strings {
            let value = match own
                .and_then(|raw| raw.get(key.as_str()))
                .filter(|value| !value.is_blank())
            {
                Some(value) => value.clone(),
                None => {
                    if own.is_some() {
                        inherited.strings.push(*key);
                    }
                    (*fallback).clone()
                }
            };
            labels.insert(*key, value);
        }

        if !inherited.is_empty() {
            tracing::debug!(
                locale = %locale,
                fields = ?inherited.fields,
                strings = ?inherited.strings,
                "Filled locale from default"
            );
        }

        let config = LocaleConfig {
            navbar,
            sidebar,
            strings: LocaleStrings::from_resolved(labels),
        };
        (config, inherited)
    }
}

/// Check a fragment's structure without looking at other locales.
fn validate_fragment(locale: &LocaleKey, fragment: &LocaleFragment) -> Result<(), ResolveError> {
    let malformed = |field: Field, reason: String| ResolveError::MalformedFragment {
        locale: locale.clone(),
        field,
        reason,
    };

    if let Some(navbar) = &fragment.navbar {
        for entry in navbar {
            entry
                .validate()
                .map_err(|reason| malformed(Field::Navbar, reason))?;
        }
    }

    if let Some(sidebar) = &fragment.sidebar {
        validate_sidebar(sidebar).map_err(|problem| match problem {
            SidebarProblem::Duplicate(path) => ResolveError::DuplicateSidebarPath {
                locale: locale.clone(),
                path,
            },
            SidebarProblem::Malformed(reason) => malformed(Field::Sidebar, reason),
        })?;
    }

    if let Some(strings) = &fragment.strings {
        for (name, value) in strings {
            let key = StringKey::parse(name).ok_or_else(|| ResolveError::UnknownStringKey {
                locale: locale.clone(),
                key: name.clone(),
            })?;
            value
                .check_shape(key)
                .map_err(|reason| malformed(Field::Strings, reason))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(tag: &str) -> LocaleKey {
        LocaleKey::new(tag).unwrap()
    }

    fn en_strings() -> BTreeMap<String, LabelValue> {
        let mut strings: BTreeMap<String, LabelValue> = [
            ("selectLanguageName", "English"),
            ("selectLanguageText", "Languages"),
            ("selectLanguageAriaLabel", "Select language"),
            ("editLinkText", "Edit this page"),
            ("lastUpdatedText", "Last Updated"),
            ("contributorsText", "Contributors"),
            ("backToHome", "Take me home"),
            ("openInNewWindow", "open in new window"),
            ("toggleColorMode", "toggle color mode"),
            ("toggleSidebar", "toggle sidebar"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), LabelValue::from(v)))
        .collect();
        strings.insert(
            "notFound".to_owned(),
            LabelValue::List(vec![
                "There's nothing here.".to_owned(),
                "How did we get here?".to_owned(),
                "That's a Four-Oh-Four.".to_owned(),
                "Looks like we've got some broken links.".to_owned(),
            ]),
        );
        strings
    }

    fn en_fragment() -> LocaleFragment {
        LocaleFragment {
            navbar: Some(vec![NavEntry::link("GitHub", "https://github.com/grasplabs")]),
            sidebar: Some(vec![
                SidebarSection::new("Getting Started", ["/", "/authentication"]),
                SidebarSection::new("SDK Documentation", ["/typescript-sdk", "/python-sdk"]),
            ]),
            strings: Some(en_strings()),
        }
    }

    fn zh_fragment() -> LocaleFragment {
        let strings = [
            ("selectLanguageName", "简体中文"),
            ("selectLanguageText", "选择语言"),
            ("backToHome", "返回首页"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), LabelValue::from(v)))
        .collect();

        LocaleFragment {
            navbar: None,
            sidebar: Some(vec![
                SidebarSection::new("快速开始", ["/zh/", "/zh/authentication"]),
                SidebarSection::new("SDK 文档", ["/zh/typescript-sdk", "/zh/python-sdk"]),
            ]),
            strings: Some(strings),
        }
    }

    fn fragments() -> BTreeMap<LocaleKey, LocaleFragment> {
        BTreeMap::from([
            (key("en-US"), en_fragment()),
            (key("zh-CN"), zh_fragment()),
            (key("ja-JP"), LocaleFragment::default()),
        ])
    }

    #[test]
    fn test_every_resolved_locale_is_fully_populated() {
        let resolved = resolve(&fragments(), &key("en-US")).unwrap();

        assert_eq!(resolved.len(), 3);
        for (locale, config) in &resolved {
            assert!(!config.navbar.is_empty(), "{locale} navbar empty");
            assert!(!config.sidebar.is_empty(), "{locale} sidebar empty");
            for label in StringKey::ALL {
                let value = config.strings.get(label);
                assert!(
                    value.is_some_and(|v| !v.is_blank()),
                    "{locale} missing {label}"
                );
            }
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let input = fragments();
        let first = resolve(&input, &key("en-US")).unwrap();
        let second = resolve(&input, &key("en-US")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolving_resolved_output_changes_nothing() {
        let first = resolve(&fragments(), &key("en-US")).unwrap();
        let refed: BTreeMap<_, _> = first
            .iter()
            .map(|(locale, config)| (locale.clone(), config.to_fragment()))
            .collect();
        let second = resolve(&refed, &key("en-US")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_locale_equals_its_fragment() {
        let input = fragments();
        let resolved = resolve(&input, &key("en-US")).unwrap();
        assert_eq!(resolved[&key("en-US")].to_fragment(), input[&key("en-US")]);
    }

    #[test]
    fn test_missing_label_falls_back_per_key() {
        let resolved = resolve(&fragments(), &key("en-US")).unwrap();
        let zh = &resolved[&key("zh-CN")].strings;

        assert_eq!(zh.text(StringKey::EditLinkText), Some("Edit this page"));
        assert_eq!(zh.text(StringKey::BackToHome), Some("返回首页"));
        assert_eq!(zh.text(StringKey::SelectLanguageName), Some("简体中文"));
    }

    #[test]
    fn test_blank_label_falls_back() {
        let mut input = fragments();
        input
            .get_mut(&key("zh-CN"))
            .and_then(|f| f.strings.as_mut())
            .unwrap()
            .insert("toggleSidebar".to_owned(), LabelValue::from(" "));

        let resolved = resolve(&input, &key("en-US")).unwrap();
        assert_eq!(
            resolved[&key("zh-CN")].strings.text(StringKey::ToggleSidebar),
            Some("toggle sidebar")
        );
    }

    #[test]
    fn test_omitted_sidebar_is_inherited_whole() {
        let resolved = resolve(&fragments(), &key("en-US")).unwrap();
        assert_eq!(
            resolved[&key("ja-JP")].sidebar,
            resolved[&key("en-US")].sidebar
        );
    }

    #[test]
    fn test_provided_sidebar_is_not_merged() {
        let mut input = fragments();
        input.get_mut(&key("zh-CN")).unwrap().sidebar =
            Some(vec![SidebarSection::new("快速开始", ["/zh/"])]);

        let resolved = resolve(&input, &key("en-US")).unwrap();
        assert_eq!(
            resolved[&key("zh-CN")].sidebar,
            vec![SidebarSection::new("快速开始", ["/zh/"])]
        );
    }

    #[test]
    fn test_empty_navbar_is_inherited() {
        let mut input = fragments();
        input.get_mut(&key("zh-CN")).unwrap().navbar = Some(vec![]);

        let resolved = resolve(&input, &key("en-US")).unwrap();
        assert_eq!(resolved[&key("zh-CN")].navbar, en_fragment().navbar.unwrap());
    }

    #[test]
    fn test_missing_default_locale() {
        let mut input = fragments();
        input.remove(&key("en-US"));

        let err = resolve(&input, &key("en-US")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingDefaultLocale {
                locale: key("en-US")
            }
        );
    }

    #[test]
    fn test_default_locale_must_be_complete() {
        let mut input = fragments();
        input.get_mut(&key("en-US")).unwrap().sidebar = None;

        let err = resolve(&input, &key("en-US")).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::IncompleteDefaultLocale {
                field: Field::Sidebar,
                ..
            }
        ));
    }

    #[test]
    fn test_default_locale_missing_label() {
        let mut input = fragments();
        input
            .get_mut(&key("en-US"))
            .and_then(|f| f.strings.as_mut())
            .unwrap()
            .remove("editLinkText");

        let err = resolve(&input, &key("en-US")).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::IncompleteDefaultLocale {
                field: Field::Strings,
                ..
            }
        ));
        assert!(err.to_string().contains("editLinkText"));
    }

    #[test]
    fn test_completeness_checked_before_other_locales() {
        let mut input = fragments();
        input.get_mut(&key("en-US")).unwrap().navbar = Some(vec![]);
        input.get_mut(&key("zh-CN")).unwrap().strings =
            Some(BTreeMap::from([("bogus".to_owned(), LabelValue::from("x"))]));

        let err = resolve(&input, &key("en-US")).unwrap_err();
        assert!(matches!(err, ResolveError::IncompleteDefaultLocale { .. }));
    }

    #[test]
    fn test_unknown_string_key() {
        let mut input = fragments();
        input
            .get_mut(&key("zh-CN"))
            .and_then(|f| f.strings.as_mut())
            .unwrap()
            .insert("editLink".to_owned(), LabelValue::from("编辑"));

        let err = resolve(&input, &key("en-US")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownStringKey {
                locale: key("zh-CN"),
                key: "editLink".to_owned(),
            }
        );
    }

    #[test]
    fn test_unknown_string_key_in_default_locale() {
        let mut input = fragments();
        input
            .get_mut(&key("en-US"))
            .and_then(|f| f.strings.as_mut())
            .unwrap()
            .insert("repoLabel".to_owned(), LabelValue::from("Repo"));

        let err = resolve(&input, &key("en-US")).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownStringKey { .. }));
        assert_eq!(err.locale(), &key("en-US"));
    }

    #[test]
    fn test_duplicate_sidebar_path() {
        let mut input = fragments();
        input.get_mut(&key("ja-JP")).unwrap().sidebar = Some(vec![
            SidebarSection::new("はじめに", ["/authentication"]),
            SidebarSection::new("SDK ドキュメント", ["/authentication"]),
        ]);

        let err = resolve(&input, &key("en-US")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::DuplicateSidebarPath {
                locale: key("ja-JP"),
                path: "/authentication".to_owned(),
            }
        );
        assert!(err.to_string().contains("/authentication"));
    }

    #[test]
    fn test_empty_nav_group_is_malformed() {
        let mut input = fragments();
        input.get_mut(&key("zh-CN")).unwrap().navbar =
            Some(vec![NavEntry::group("SDK", vec![])]);

        let err = resolve(&input, &key("en-US")).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::MalformedFragment {
                field: Field::Navbar,
                ..
            }
        ));
        assert_eq!(err.locale(), &key("zh-CN"));
    }

    #[test]
    fn test_wrong_label_shape_is_malformed() {
        let mut input = fragments();
        input
            .get_mut(&key("zh-CN"))
            .and_then(|f| f.strings.as_mut())
            .unwrap()
            .insert("notFound".to_owned(), LabelValue::from("这里什么都没有"));

        let err = resolve(&input, &key("en-US")).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::MalformedFragment {
                field: Field::Strings,
                ..
            }
        ));
    }

    #[test]
    fn test_inheritance_report() {
        let resolution = resolve_detailed(&fragments(), &key("en-US")).unwrap();

        assert!(!resolution.inherited.contains_key(&key("en-US")));

        let ja = &resolution.inherited[&key("ja-JP")];
        assert_eq!(ja.fields, vec![Field::Navbar, Field::Sidebar, Field::Strings]);
        assert!(ja.strings.is_empty());

        let zh = &resolution.inherited[&key("zh-CN")];
        assert_eq!(zh.fields, vec![Field::Navbar]);
        assert!(zh.strings.contains(&StringKey::EditLinkText));
        assert!(!zh.strings.contains(&StringKey::BackToHome));
    }

    #[test]
    fn test_default_fragment_not_mutated() {
        let input = fragments();
        let before = input[&key("en-US")].clone();
        let _ = resolve(&input, &key("en-US")).unwrap();
        assert_eq!(input[&key("en-US")], before);
    }
}
