//! Locale identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language/region tag identifying one locale of the site (e.g. `en-US`, `zh-CN`).
///
/// Tags follow a relaxed BCP-47 shape: a 2-3 letter language subtag followed
/// by any number of `-`-separated alphanumeric subtags of 1-8 characters.
/// Case is preserved as written.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleKey(String);

/// Error returned when a string is not a valid locale tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid locale tag `{tag}`: {reason}")]
pub struct LocaleKeyError {
    /// The rejected input.
    pub tag: String,
    /// Why it was rejected.
    pub reason: &'static str,
}

impl LocaleKey {
    /// Parse and validate a locale tag.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleKeyError`] if the tag is empty or malformed.
    pub fn new(tag: impl Into<String>) -> Result<Self, LocaleKeyError> {
        let tag = tag.into();
        match check_tag(&tag) {
            Ok(()) => Ok(Self(tag)),
            Err(reason) => Err(LocaleKeyError { tag, reason }),
        }
    }

    /// The tag as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn check_tag(tag: &str) -> Result<(), &'static str> {
    if tag.is_empty() {
        return Err("tag cannot be empty");
    }

    let mut subtags = tag.split('-');
    let language = subtags.next().unwrap_or_default();
    if !(2..=3).contains(&language.len()) || !language.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err("language subtag must be 2-3 ASCII letters");
    }

    for subtag in subtags {
        if subtag.is_empty() || subtag.len() > 8 {
            return Err("subtags must be 1-8 characters long");
        }
        if !subtag.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err("subtags must be ASCII alphanumeric");
        }
    }

    Ok(())
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleKey {
    type Err = LocaleKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LocaleKey {
    type Error = LocaleKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LocaleKey> for String {
    fn from(key: LocaleKey) -> Self {
        key.0
    }
}

impl AsRef<str> for LocaleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
