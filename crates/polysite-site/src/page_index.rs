//! Page discovery by filesystem walking.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use polysite_locale::PageIndex;

/// Site paths of every markdown page under a source directory.
///
/// Route conventions follow the generator:
/// - `index.md` / `README.md` -> directory route (`/`, `/zh/`)
/// - `guide.md` -> `/guide`
/// - `zh/authentication.md` -> `/zh/authentication`
#[derive(Debug, Default)]
pub struct FsPageIndex {
    pages: BTreeSet<String>,
}

impl FsPageIndex {
    /// Walk `source_dir` and record every markdown page.
    ///
    /// Hidden files and directories are skipped. A missing directory yields an
    /// empty index.
    #[must_use]
    pub fn scan(source_dir: &Path) -> Self {
        let mut pages = BTreeSet::new();
        if source_dir.exists() {
            scan_directory(source_dir, "/", &mut pages);
        } else {
            tracing::warn!(path = %source_dir.display(), "Source directory does not exist");
        }
        tracing::debug!(pages = pages.len(), "Page scan completed");
        Self { pages }
    }

    /// Number of pages found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when no pages were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate page routes in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(String::as_str)
    }
}

impl PageIndex for FsPageIndex {
    /// Accepts `/guide`, `/guide.html`, `/guide.md` and `/guide#section` for
    /// `guide.md`, and `/zh` as well as `/zh/` for `zh/index.md`.
    fn contains(&self, path: &str) -> bool {
        let path = path.split(['#', '?']).next().unwrap_or(path);
        let path = path
            .strip_suffix(".html")
            .or_else(|| path.strip_suffix(".md"))
            .unwrap_or(path);

        if self.pages.contains(path) {
            return true;
        }
        !path.ends_with('/') && self.pages.contains(&format!("{path}/"))
    }
}

fn scan_directory(dir: &Path, route_prefix: &str, pages: &mut BTreeSet<String>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Failed to read directory");
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, &format!("{route_prefix}{name}/"), pages);
        } else if let Some(stem) = name.strip_suffix(".md") {
            pages.insert(file_route(stem, route_prefix));
        }
    }
}

/// Route of a markdown file given its stem and the route of its directory.
fn file_route(stem: &str, route_prefix: &str) -> String {
    if stem.eq_ignore_ascii_case("index") || stem.eq_ignore_ascii_case("readme") {
        route_prefix.to_owned()
    } else {
        format!("{route_prefix}{stem}")
    }
}
