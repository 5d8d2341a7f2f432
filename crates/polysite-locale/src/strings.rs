//! Theme UI strings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of UI labels the theme reads from each locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StringKey {
    /// Name of the language in the language picker (`English`, `简体中文`).
    SelectLanguageName,
    /// Language picker label.
    SelectLanguageText,
    /// Language picker aria label.
    SelectLanguageAriaLabel,
    /// "Edit this page" link text.
    EditLinkText,
    /// "Last updated" label.
    LastUpdatedText,
    /// "Contributors" label.
    ContributorsText,
    /// Messages picked at random on the 404 page.
    NotFound,
    /// 404 page link back to the home page.
    BackToHome,
    /// Screen reader text for external links.
    OpenInNewWindow,
    /// Color mode toggle label.
    ToggleColorMode,
    /// Sidebar toggle label.
    ToggleSidebar,
}

impl StringKey {
    /// Every key, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::SelectLanguageName,
        Self::SelectLanguageText,
        Self::SelectLanguageAriaLabel,
        Self::EditLinkText,
        Self::LastUpdatedText,
        Self::ContributorsText,
        Self::NotFound,
        Self::BackToHome,
        Self::OpenInNewWindow,
        Self::ToggleColorMode,
        Self::ToggleSidebar,
    ];

    /// Key name as written in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelectLanguageName => "selectLanguageName",
            Self::SelectLanguageText => "selectLanguageText",
            Self::SelectLanguageAriaLabel => "selectLanguageAriaLabel",
            Self::EditLinkText => "editLinkText",
            Self::LastUpdatedText => "lastUpdatedText",
            Self::ContributorsText => "contributorsText",
            Self::NotFound => "notFound",
            Self::BackToHome => "backToHome",
            Self::OpenInNewWindow => "openInNewWindow",
            Self::ToggleColorMode => "toggleColorMode",
            Self::ToggleSidebar => "toggleSidebar",
        }
    }

    /// Look up a key by its configuration name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// Whether the label holds a list of messages instead of a single string.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl fmt::Display for StringKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of one UI label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelValue {
    /// Single display string.
    Text(String),
    /// Several alternative strings.
    List(Vec<String>),
}

impl LabelValue {
    /// True when the value carries nothing to display.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.is_empty() || items.iter().any(|s| s.trim().is_empty()),
        }
    }

    /// The single string, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    /// Check that the value has the shape `key` expects.
    pub(crate) fn check_shape(&self, key: StringKey) -> Result<(), String> {
        match (self, key.is_list()) {
            (Self::List(_), true) | (Self::Text(_), false) => Ok(()),
            (Self::Text(_), true) => Err(format!("`{key}` must be a list of strings")),
            (Self::List(_), false) => Err(format!("`{key}` must be a single string")),
        }
    }
}

impl From<&str> for LabelValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Fully resolved UI strings of one locale.
///
/// Only produced by the resolver, which guarantees every [`StringKey`] is
/// present with a non-blank value of the right shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocaleStrings(BTreeMap<StringKey, LabelValue>);

impl LocaleStrings {
    pub(crate) fn from_resolved(labels: BTreeMap<StringKey, LabelValue>) -> Self {
        debug_assert!(StringKey::ALL.iter().all(|k| labels.contains_key(k)));
        Self(labels)
    }

    /// Value of a label.
    #[must_use]
    pub fn get(&self, key: StringKey) -> Option<&LabelValue> {
        self.0.get(&key)
    }

    /// Value of a single-string label.
    #[must_use]
    pub fn text(&self, key: StringKey) -> Option<&str> {
        self.get(key).and_then(LabelValue::as_text)
    }

    /// Iterate labels in key order.
    pub fn iter(&self) -> impl Iterator<Item = (StringKey, &LabelValue)> {
        self.0.iter().map(|(key, value)| (*key, value))
    }

    /// Convert back to the raw, string-keyed form used by fragments.
    #[must_use]
    pub fn to_raw(&self) -> BTreeMap<String, LabelValue> {
        self.iter()
            .map(|(key, value)| (key.as_str().to_owned(), value.clone()))
            .collect()
    }
}
