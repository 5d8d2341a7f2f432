//! Resolution errors.

use std::fmt;

use crate::LocaleKey;

/// Per-locale configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Navbar entries.
    Navbar,
    /// Sidebar sections.
    Sidebar,
    /// UI strings.
    Strings,
}

impl Field {
    /// Field name as written in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Navbar => "navbar",
            Self::Sidebar => "sidebar",
            Self::Strings => "strings",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised while resolving locale fragments.
///
/// Every variant names the locale and, where applicable, the field at fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The default locale has no fragment.
    #[error("default locale `{locale}` is not configured")]
    MissingDefaultLocale {
        /// The declared default locale.
        locale: LocaleKey,
    },
    /// The default locale's fragment leaves a field empty.
    #[error("default locale `{locale}` is incomplete: {field} {detail}")]
    IncompleteDefaultLocale {
        /// The declared default locale.
        locale: LocaleKey,
        /// Field that is empty or missing.
        field: Field,
        /// What exactly is missing.
        detail: String,
    },
    /// A strings mapping uses a key outside the known UI labels.
    #[error("locale `{locale}`: unknown UI string key `{key}` in strings")]
    UnknownStringKey {
        /// Locale whose fragment contains the key.
        locale: LocaleKey,
        /// The unknown key.
        key: String,
    },
    /// A sidebar lists the same page path twice.
    #[error("locale `{locale}`: sidebar lists `{path}` more than once")]
    DuplicateSidebarPath {
        /// Locale whose sidebar is invalid.
        locale: LocaleKey,
        /// The repeated path.
        path: String,
    },
    /// A fragment is structurally invalid.
    #[error("locale `{locale}`: malformed {field}: {reason}")]
    MalformedFragment {
        /// Locale whose fragment is invalid.
        locale: LocaleKey,
        /// Field at fault.
        field: Field,
        /// Description of the problem.
        reason: String,
    },
}

impl ResolveError {
    /// Locale the error refers to.
    #[must_use]
    pub fn locale(&self) -> &LocaleKey {
        match self {
            Self::MissingDefaultLocale { locale }
            | Self::IncompleteDefaultLocale { locale, .. }
            | Self::UnknownStringKey { locale, .. }
            | Self::DuplicateSidebarPath { locale, .. }
            | Self::MalformedFragment { locale, .. } => locale,
        }
    }

    /// Field the error refers to, if it concerns a single field.
    #[must_use]
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::MissingDefaultLocale { .. } => None,
            Self::IncompleteDefaultLocale { field, .. } | Self::MalformedFragment { field, .. } => {
                Some(*field)
            }
            Self::UnknownStringKey { .. } => Some(Field::Strings),
            Self::DuplicateSidebarPath { .. } => Some(Field::Sidebar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(tag: &str) -> LocaleKey {
        LocaleKey::new(tag).unwrap()
    }

    #[test]
    fn test_messages_name_locale_and_field() {
        let err = ResolveError::MalformedFragment {
            locale: key("zh-CN"),
            field: Field::Navbar,
            reason: "group `SDK` has no children".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("zh-CN"));
        assert!(msg.contains("navbar"));
        assert!(msg.contains("SDK"));
    }

    #[test]
    fn test_accessors() {
        let err = ResolveError::DuplicateSidebarPath {
            locale: key("ja-JP"),
            path: "/ja/authentication".to_owned(),
        };
        assert_eq!(err.locale().as_str(), "ja-JP");
        assert_eq!(err.field(), Some(Field::Sidebar));

        let err = ResolveError::MissingDefaultLocale {
            locale: key("en-US"),
        };
        assert_eq!(err.field(), None);
    }
}
