//! Partial and resolved per-locale configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{LabelValue, LocaleStrings, NavEntry, SidebarSection};

/// Configuration supplied for one locale before resolution.
///
/// Every field is optional. Missing fields are filled from the default locale.
/// String keys stay raw here so unknown keys can be reported with their locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleFragment {
    /// Navbar entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navbar: Option<Vec<NavEntry>>,
    /// Sidebar sections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<Vec<SidebarSection>>,
    /// UI strings keyed by label name (`editLinkText`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strings: Option<BTreeMap<String, LabelValue>>,
}

impl LocaleFragment {
    /// Navbar if present and non-empty.
    pub(crate) fn provided_navbar(&self) -> Option<&[NavEntry]> {
        self.navbar.as_deref().filter(|entries| !entries.is_empty())
    }

    /// Sidebar if present and non-empty.
    pub(crate) fn provided_sidebar(&self) -> Option<&[SidebarSection]> {
        self.sidebar
            .as_deref()
            .filter(|sections| !sections.is_empty())
    }
}

/// Fully resolved configuration of one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleConfig {
    /// Navbar entries.
    pub navbar: Vec<NavEntry>,
    /// Sidebar sections.
    pub sidebar: Vec<SidebarSection>,
    /// UI strings, every label present.
    pub strings: LocaleStrings,
}

impl LocaleConfig {
    /// Express this configuration as a complete fragment.
    #[must_use]
    pub fn to_fragment(&self) -> LocaleFragment {
        LocaleFragment {
            navbar: Some(self.navbar.clone()),
            sidebar: Some(self.sidebar.clone()),
            strings: Some(self.strings.to_raw()),
        }
    }
}
