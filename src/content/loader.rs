//! Content loader - loads pages from the pages directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Page};
use crate::error::{Error, Result};
use crate::helpers::slash_relative;
use crate::Site;

/// Loads markdown pages from the pages directory
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// All markdown files under the pages directory, sorted by path
    pub fn markdown_files(&self) -> Result<Vec<PathBuf>> {
        let pages_dir = &self.site.pages_dir;
        if !pages_dir.is_dir() {
            return Err(Error::read(
                pages_dir,
                io::Error::new(io::ErrorKind::NotFound, "pages directory not found"),
            ));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(pages_dir).follow_links(true).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && is_markdown_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Read and parse every page
    pub fn load_pages(&self) -> Result<Vec<Page>> {
        self.markdown_files()?
            .iter()
            .map(|path| self.load_page(path))
            .collect()
    }

    /// Load a single page from a file
    pub fn load_page(&self, path: &Path) -> Result<Page> {
        let content = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        let (fm, body) = FrontMatter::parse(&content).map_err(|source| Error::FrontMatter {
            path: path.to_path_buf(),
            source,
        })?;

        let page = Page::new(
            slash_relative(&self.site.pages_dir, path),
            path.to_path_buf(),
            fm,
            body.to_string(),
        );

        if let (Some(raw), None) = (&page.front_matter.date, page.date) {
            tracing::warn!("Unrecognized date {:?} in {}", raw, page.source);
        }

        Ok(page)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}
