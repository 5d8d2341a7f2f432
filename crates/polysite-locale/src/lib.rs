//! Per-locale navigation and UI string resolution.
//!
//! A multi-locale site declares one [`LocaleFragment`] per locale. Only the
//! default locale has to be complete; every other locale supplies what it has
//! translated and [`resolve`] fills the rest from the default locale.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use polysite_locale::{LocaleFragment, LocaleKey, ResolveError, resolve};
//!
//! let en = LocaleKey::new("en-US").unwrap();
//! let fragments = BTreeMap::from([(LocaleKey::new("zh-CN").unwrap(), LocaleFragment::default())]);
//!
//! let err = resolve(&fragments, &en).unwrap_err();
//! assert!(matches!(err, ResolveError::MissingDefaultLocale { .. }));
//! ```

mod error;
mod fragment;
mod key;
mod nav;
mod pages;
mod resolve;
mod sidebar;
mod strings;

pub use error::{Field, ResolveError};
pub use fragment::{LocaleConfig, LocaleFragment};
pub use key::{LocaleKey, LocaleKeyError};
pub use nav::{NavEntry, is_external_link};
pub use pages::{BrokenLink, PageIndex, find_broken_links};
pub use resolve::{Inherited, Resolution, ResolvedLocales, resolve, resolve_detailed};
pub use sidebar::SidebarSection;
pub use strings::{LabelValue, LocaleStrings, StringKey};
