//! Page and post-summary models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use super::FrontMatter;

/// Basename (without extension) of the page that is never listed as a post
pub const INDEX_NAME: &str = "index";

/// A navigation entry from the `navLinks` front-matter list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub url: String,
}

/// A markdown source file and its metadata
#[derive(Debug, Clone)]
pub struct Page {
    /// Source file path relative to the pages directory, `/`-separated
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Parsed front matter
    pub front_matter: FrontMatter,

    /// Publication date, when the front matter holds a parseable one
    pub date: Option<NaiveDateTime>,

    /// Markdown body (front matter removed)
    pub raw: String,
}

impl Page {
    /// Create a page from its relative source path and parsed parts
    pub fn new(source: String, full_source: PathBuf, front_matter: FrontMatter, raw: String) -> Self {
        let date = front_matter.parse_date();
        Self {
            source,
            full_source,
            front_matter,
            date,
            raw,
        }
    }

    /// File name without the `.md` extension
    pub fn filename(&self) -> &str {
        Path::new(&self.source)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    /// Title from front matter, falling back to the file name
    pub fn title(&self) -> &str {
        self.front_matter
            .title
            .as_deref()
            .unwrap_or_else(|| self.filename())
    }

    pub fn is_live(&self) -> bool {
        self.front_matter.live
    }

    pub fn is_index(&self) -> bool {
        self.filename() == INDEX_NAME
    }

    /// Output path relative to the output directory (`posts/a.md` -> `posts/a.html`)
    pub fn output_path(&self) -> String {
        match self.source.strip_suffix(".md") {
            Some(stem) => format!("{}.html", stem),
            None => format!("{}.html", self.source),
        }
    }

    /// Site-absolute URL of the rendered page
    pub fn url(&self) -> String {
        format!("/{}", self.output_path())
    }

    /// Layout name, falling back to the given default
    pub fn layout<'a>(&'a self, default: &'a str) -> &'a str {
        self.front_matter.layout.as_deref().unwrap_or(default)
    }

    /// Build the listing entry for this page
    pub fn summary(&self, date_format: &str) -> PostSummary {
        PostSummary {
            path: self.source.clone(),
            filename: self.filename().to_string(),
            title: self.title().to_string(),
            date: self.front_matter.date.clone(),
            formatted_date: self.date.map(|d| d.format(date_format).to_string()),
            url: self.url(),
            live: self.is_live(),
        }
    }
}

/// Listing entry for a post, as exposed to layouts
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub path: String,
    pub filename: String,
    pub title: String,
    pub date: Option<String>,
    #[serde(rename = "formattedDate")]
    pub formatted_date: Option<String>,
    pub url: String,
    pub live: bool,
}

/// Live, non-index pages ordered newest first
///
/// Undated pages go last; the sort is stable so ties keep the input order.
pub fn post_listing(pages: &[Page]) -> Vec<&Page> {
    let mut posts: Vec<&Page> = pages
        .iter()
        .filter(|p| p.is_live() && !p.is_index())
        .collect();

    posts.sort_by(|a, b| match (a.date, b.date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    posts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(source: &str, date: Option<&str>, live: bool) -> Page {
        let front_matter = FrontMatter {
            title: Some(source.to_string()),
            date: date.map(str::to_string),
            live,
            ..Default::default()
        };
        Page::new(
            source.to_string(),
            PathBuf::from(source),
            front_matter,
            String::new(),
        )
    }

    #[test]
    fn test_output_path() {
        let p = page("posts/hello.md", None, true);
        assert_eq!(p.output_path(), "posts/hello.html");
        assert_eq!(p.url(), "/posts/hello.html");
        assert_eq!(p.filename(), "hello");
    }

    #[test]
    fn test_title_falls_back_to_filename() {
        let p = Page::new(
            "about.md".to_string(),
            PathBuf::from("about.md"),
            FrontMatter::default(),
            String::new(),
        );
        assert_eq!(p.title(), "about");
    }

    #[test]
    fn test_listing_orders_newest_first() {
        let pages = vec![
            page("january.md", Some("2024-01-01"), true),
            page("february.md", Some("2024-02-01"), true),
        ];
        let listing = post_listing(&pages);
        let sources: Vec<_> = listing.iter().map(|p| p.source.as_str()).collect();
        assert_eq!(sources, vec!["february.md", "january.md"]);
    }

    #[test]
    fn test_listing_excludes_drafts_and_index() {
        let pages = vec![
            page("index.md", Some("2024-03-01"), true),
            page("draft.md", Some("2024-02-15"), false),
            page("posts/index.md", Some("2024-02-10"), true),
            page("post.md", Some("2024-02-01"), true),
        ];
        let listing = post_listing(&pages);
        let sources: Vec<_> = listing.iter().map(|p| p.source.as_str()).collect();
        assert_eq!(sources, vec!["post.md"]);
    }

    #[test]
    fn test_undated_posts_sort_last() {
        let pages = vec![
            page("undated.md", None, true),
            page("bad-date.md", Some("someday"), true),
            page("dated.md", Some("2023-06-01"), true),
        ];
        let listing = post_listing(&pages);
        let sources: Vec<_> = listing.iter().map(|p| p.source.as_str()).collect();
        assert_eq!(sources, vec!["dated.md", "undated.md", "bad-date.md"]);
    }

    #[test]
    fn test_summary_formats_date() {
        let p = page("posts/a.md", Some("2024-02-01"), true);
        let summary = p.summary("%B %-d, %Y");
        assert_eq!(summary.formatted_date.as_deref(), Some("February 1, 2024"));
        assert_eq!(summary.date.as_deref(), Some("2024-02-01"));
        assert_eq!(summary.url, "/posts/a.html");
        assert_eq!(summary.filename, "a");
    }
}
