//! Navbar entries.

use serde::{Deserialize, Serialize};

/// One navbar item: a link or a named group of further items.
///
/// Deserializes from the generator's object shape. An object with `children`
/// is a group, an object with `link` is a leaf:
///
/// ```
/// use polysite_locale::NavEntry;
///
/// let entries: Vec<NavEntry> = serde_json::from_str(r#"[
///     { "text": "GitHub", "link": "https://github.com/grasplabs" },
///     { "text": "SDKs", "children": [{ "link": "/python-sdk" }] }
/// ]"#).unwrap();
///
/// assert!(matches!(entries[0], NavEntry::Link { .. }));
/// assert!(matches!(entries[1], NavEntry::Group { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavEntry {
    /// Named group rendered as a dropdown.
    Group {
        /// Display text.
        text: String,
        /// Ordered child entries. Never empty.
        children: Vec<NavEntry>,
    },
    /// Single link.
    Link {
        /// Site path (`/guide`) or external URL.
        link: String,
        /// Display text. The generator derives one from the page title when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
}

impl NavEntry {
    /// Create a leaf entry with display text.
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self::Link {
            link: link.into(),
            text: Some(text.into()),
        }
    }

    /// Create a group entry.
    pub fn group(text: impl Into<String>, children: Vec<NavEntry>) -> Self {
        Self::Group {
            text: text.into(),
            children,
        }
    }

    /// Check structural invariants, returning a description of the first violation.
    pub(crate) fn validate(&self) -> Result<(), String> {
        match self {
            Self::Group { text, children } => {
                if text.trim().is_empty() {
                    return Err("group text cannot be empty".to_owned());
                }
                if children.is_empty() {
                    return Err(format!("group `{text}` has no children"));
                }
                children.iter().try_for_each(Self::validate)
            }
            Self::Link { link, text } => {
                if link.trim().is_empty() {
                    return Err("link cannot be empty".to_owned());
                }
                if text.as_deref().is_some_and(|t| t.trim().is_empty()) {
                    return Err(format!("link `{link}` has empty text"));
                }
                Ok(())
            }
        }
    }

    /// Collect every link target in this entry, depth first.
    pub fn collect_links<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Group { children, .. } => {
                for child in children {
                    child.collect_links(out);
                }
            }
            Self::Link { link, .. } => out.push(link),
        }
    }
}

/// Whether a link points outside the site (`https://…`, `mailto:…`).
#[must_use]
pub fn is_external_link(link: &str) -> bool {
    link.contains("://") || link.starts_with("mailto:") || link.starts_with("tel:")
}
