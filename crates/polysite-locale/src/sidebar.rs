//! Sidebar sections.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Titled, ordered list of page paths shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarSection {
    /// Section heading.
    pub text: String,
    /// Page paths in display order.
    pub children: Vec<String>,
}

impl SidebarSection {
    /// Create a section from a heading and page paths.
    pub fn new<I, S>(text: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            children: children.into_iter().map(Into::into).collect(),
        }
    }
}

/// Problem found while validating a sidebar.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SidebarProblem {
    /// Section heading, child list, or a child path is empty.
    Malformed(String),
    /// A path appears more than once.
    Duplicate(String),
}

/// Validate a locale's sidebar.
///
/// Paths must be unique across the whole sidebar, not only within a section.
pub(crate) fn validate_sidebar(sections: &[SidebarSection]) -> Result<(), SidebarProblem> {
    let mut seen = HashSet::new();

    for section in sections {
        if section.text.trim().is_empty() {
            return Err(SidebarProblem::Malformed(
                "section text cannot be empty".to_owned(),
            ));
        }
        if section.children.is_empty() {
            return Err(SidebarProblem::Malformed(format!(
                "section `{}` has no pages",
                section.text
            )));
        }
        for path in &section.children {
            if path.trim().is_empty() {
                return Err(SidebarProblem::Malformed(format!(
                    "section `{}` contains an empty path",
                    section.text
                )));
            }
            if !seen.insert(path.as_str()) {
                return Err(SidebarProblem::Duplicate(path.clone()));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn getting_started() -> SidebarSection {
        SidebarSection::new("Getting Started", ["/", "/authentication"])
    }

    #[test]
    fn test_valid_sidebar() {
        let sidebar = vec![
            getting_started(),
            SidebarSection::new("SDK Documentation", ["/typescript-sdk", "/python-sdk"]),
        ];
        assert_eq!(validate_sidebar(&sidebar), Ok(()));
    }

    #[test]
    fn test_duplicate_within_section() {
        let sidebar = vec![SidebarSection::new("Guide", ["/a", "/b", "/a"])];
        assert_eq!(
            validate_sidebar(&sidebar),
            Err(SidebarProblem::Duplicate("/a".to_owned()))
        );
    }

    #[test]
    fn test_duplicate_across_sections() {
        let sidebar = vec![
            getting_started(),
            SidebarSection::new("Security", ["/authentication"]),
        ];
        assert_eq!(
            validate_sidebar(&sidebar),
            Err(SidebarProblem::Duplicate("/authentication".to_owned()))
        );
    }

    #[test]
    fn test_empty_section_is_malformed() {
        let sidebar = vec![SidebarSection::new("Empty", Vec::<String>::new())];
        let Err(SidebarProblem::Malformed(reason)) = validate_sidebar(&sidebar) else {
            panic!("expected malformed sidebar");
        };
        assert!(reason.contains("Empty"));
    }

    #[test]
    fn test_blank_heading_is_malformed() {
        let sidebar = vec![SidebarSection::new("  ", ["/a"])];
        assert!(matches!(
            validate_sidebar(&sidebar),
            Err(SidebarProblem::Malformed(_))
        ));
    }

    #[test]
    fn test_order_preserved_through_serde() {
        let section = SidebarSection::new("SDK", ["/z", "/a", "/m"]);
        let json = serde_json::to_string(&section).unwrap();
        let back: SidebarSection = serde_json::from_str(&json).unwrap();
        assert_eq!(back.children, vec!["/z", "/a", "/m"]);
    }
}
