//! Site configuration assembly for polysite.
//!
//! Turns a loaded [`Config`] into one immutable [`SiteConfig`]: every locale
//! resolved against the default locale, combined with the site-wide theme,
//! bundler and `<head>` settings, and serialized into the object the
//! static-site generator consumes.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use polysite_config::Config;
//! use polysite_site::assemble;
//!
//! let config = Config::load(Some(Path::new("polysite.toml")), None)?;
//! let site = assemble(&config)?;
//! println!("{}", site.to_generator_json()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod generator;
mod page_index;
mod site;

pub use error::SiteError;
pub use generator::GeneratorConfig;
pub use page_index::FsPageIndex;
pub use site::{SiteConfig, SiteLocale, ThemeOptions};

use polysite_config::Config;

/// Build the site configuration and, if enabled, check navigation links
/// against the markdown pages in the source directory.
///
/// # Errors
///
/// Returns [`SiteError`] if resolution fails or links are broken.
pub fn assemble(config: &Config) -> Result<SiteConfig, SiteError> {
    let site = SiteConfig::build(config)?;

    if config.site.check_links {
        let pages = FsPageIndex::scan(&config.paths_resolved.source_dir);
        site.check_links(&pages)?;
        tracing::debug!(pages = pages.len(), "Navigation links verified");
    }

    Ok(site)
}
