//! Link checking against the set of existing pages.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::nav::is_external_link;
use crate::{Field, LocaleConfig, LocaleKey};

/// Set of site paths that have a page behind them.
pub trait PageIndex {
    /// Whether `path` (e.g. `/`, `/zh/authentication`) resolves to a page.
    fn contains(&self, path: &str) -> bool;
}

impl PageIndex for BTreeSet<String> {
    fn contains(&self, path: &str) -> bool {
        BTreeSet::contains(self, path)
    }
}

impl PageIndex for HashSet<String> {
    fn contains(&self, path: &str) -> bool {
        HashSet::contains(self, path)
    }
}

/// Navigation link pointing at a page that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// Locale whose navigation contains the link.
    pub locale: LocaleKey,
    /// Navbar or sidebar.
    pub field: Field,
    /// The link target.
    pub path: String,
}

impl fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: no page for `{}`", self.locale, self.field, self.path)
    }
}

/// Find navbar and sidebar links whose target page does not exist.
///
/// Only site paths (starting with `/`) are checked; external URLs and relative
/// links are skipped. Results are ordered by locale, then navbar before
/// sidebar, then document order.
pub fn find_broken_links<'a, I>(locales: I, pages: &dyn PageIndex) -> Vec<BrokenLink>
where
    I: IntoIterator<Item = (&'a LocaleKey, &'a LocaleConfig)>,
{
    let mut broken = Vec::new();

    for (locale, config) in locales {
        let mut navbar_links = Vec::new();
        for entry in &config.navbar {
            entry.collect_links(&mut navbar_links);
        }
        let sidebar_links = config
            .sidebar
            .iter()
            .flat_map(|section| section.children.iter().map(String::as_str));

        let candidates = navbar_links
            .into_iter()
            .map(|link| (Field::Navbar, link))
            .chain(sidebar_links.map(|link| (Field::Sidebar, link)));

        for (field, link) in candidates {
            if !link.starts_with('/') || is_external_link(link) || pages.contains(link) {
                continue;
            }
            broken.push(BrokenLink {
                locale: locale.clone(),
                field,
                path: link.to_owned(),
            });
        }
    }

    if !broken.is_empty() {
        tracing::debug!(count = broken.len(), "Found broken navigation links");
    }

    broken
}
