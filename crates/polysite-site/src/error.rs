//! Site assembly errors.

use polysite_config::ConfigError;
use polysite_locale::{BrokenLink, ResolveError};

/// Error raised while assembling or checking a site.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Configuration is invalid.
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// Locale resolution failed.
    #[error("{0}")]
    Resolve(#[from] ResolveError),
    /// Navigation links point at pages that do not exist.
    #[error("{} broken navigation link(s):{}", .0.len(), list_links(.0))]
    BrokenLinks(Vec<BrokenLink>),
    /// Generator config could not be serialized.
    #[error("Failed to serialize generator config: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn list_links(links: &[BrokenLink]) -> String {
    links.iter().map(|link| format!("\n  {link}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polysite_locale::{Field, LocaleKey};

    #[test]
    fn test_broken_links_message_lists_each_link() {
        let err = SiteError::BrokenLinks(vec![
            BrokenLink {
                locale: LocaleKey::new("en-US").unwrap(),
                field: Field::Sidebar,
                path: "/python-sdk".to_owned(),
            },
            BrokenLink {
                locale: LocaleKey::new("zh-CN").unwrap(),
                field: Field::Navbar,
                path: "/zh/guide".to_owned(),
            },
        ]);

        assert_eq!(
            err.to_string(),
            "2 broken navigation link(s):\n  en-US sidebar: no page for `/python-sdk`\n  zh-CN navbar: no page for `/zh/guide`"
        );
    }
}
