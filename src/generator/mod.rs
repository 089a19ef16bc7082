//! Generator module - drives a full build of the site
//!
//! 1. clear the output directory and repopulate it with the client script,
//!    the highlighting stylesheet and the static assets
//! 2. read and parse every markdown page
//! 3. build the post listing (live, non-index pages, newest first)
//! 4. render and write each live page; skip the rest

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::loader::ContentLoader;
use crate::content::{post_listing, MarkdownRenderer, Page, PostSummary};
use crate::error::{Error, Result};
use crate::helpers::{format_date, slash_relative};
use crate::templates::{LayoutData, LayoutSet};
use crate::widgets::{client_script, CLIENT_SCRIPT_PATH};
use crate::Site;

/// Layout that receives the post listing as `posts`
pub const HOME_LAYOUT: &str = "home";

/// Outcome of a successful build; paths are relative to the output directory
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub generated: Vec<String>,
    pub skipped: Vec<String>,
}

/// Static site generator
pub struct Generator<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
    layouts: LayoutSet,
}

impl<'a> Generator<'a> {
    /// Create a new generator, loading the layouts for this build
    pub fn new(site: &'a Site) -> Result<Self> {
        let renderer = MarkdownRenderer::with_highlighting(site.config.highlight.enable);
        let layouts = LayoutSet::load(&site.layout_dir, &site.config)?;

        Ok(Self {
            site,
            renderer,
            layouts,
        })
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<BuildReport> {
        self.setup()?;

        let pages = ContentLoader::new(self.site).load_pages()?;
        tracing::info!("Loaded {} pages", pages.len());

        let date_format = &self.site.config.date_format;
        let posts: Vec<PostSummary> = post_listing(&pages)
            .into_iter()
            .map(|p| p.summary(date_format))
            .collect();

        let mut report = BuildReport::default();
        for page in &pages {
            let output = page.output_path();
            if page.is_live() {
                let html = self.render_page(page, &posts)?;
                write_file(&self.site.output_dir.join(&output), html.as_bytes())?;
                tracing::info!("Generated: {}", output);
                report.generated.push(output);
            } else {
                tracing::info!("Skipped (not live): {}", output);
                report.skipped.push(output);
            }
        }

        Ok(report)
    }

    /// Render one page through its layout
    pub fn render_page(&self, page: &Page, posts: &[PostSummary]) -> Result<String> {
        let config = &self.site.config;
        let layout = page.layout(&config.default_layout);

        let data = LayoutData {
            extra: &page.front_matter.extra,
            title: page.title(),
            date: page.date.map(|d| format_date(&d, &config.date_format)),
            raw_date: page.front_matter.date.as_deref(),
            content: self.renderer.render(&page.raw)?,
            nav_links: &page.front_matter.nav_links,
            layout,
            live: page.is_live(),
            url: page.url(),
            site_title: &config.title,
            posts: (layout == HOME_LAYOUT).then(|| posts.to_vec()),
        };

        self.layouts.render(layout, &data)
    }

    /// Reset the output directory and write the non-page files
    fn setup(&self) -> Result<()> {
        let output_dir = &self.site.output_dir;
        self.check_output_dir()?;

        if output_dir.exists() {
            fs::remove_dir_all(output_dir).map_err(|e| Error::write(output_dir, e))?;
            tracing::debug!("Cleared {:?}", output_dir);
        }
        fs::create_dir_all(output_dir).map_err(|e| Error::write(output_dir, e))?;

        write_file(&output_dir.join(CLIENT_SCRIPT_PATH), client_script().as_bytes())?;

        let highlight = &self.site.config.highlight;
        if highlight.enable {
            let css = MarkdownRenderer::stylesheet(&highlight.theme)?;
            write_file(&output_dir.join(&highlight.stylesheet), css.as_bytes())?;
        }

        // Static files go last so they can replace the generated ones
        let copied = self.copy_static_assets()?;
        tracing::info!("Copied {} static files", copied);

        Ok(())
    }

    /// Refuse to clear a directory that holds the site's own sources
    ///
    /// Paths are compared after resolving `..` and symlinks. An output
    /// directory that does not exist yet has nothing to clear.
    fn check_output_dir(&self) -> Result<()> {
        let site = self.site;
        let Some(output_dir) = canonical(&site.output_dir)? else {
            return Ok(());
        };

        let sources = [
            &site.base_dir,
            &site.pages_dir,
            &site.layout_dir,
            &site.static_dir,
        ];
        for dir in sources {
            if let Some(source) = canonical(dir)? {
                if source.starts_with(&output_dir) {
                    return Err(Error::write(
                        &site.output_dir,
                        io::Error::new(
                            io::ErrorKind::InvalidInput,
                            format!("output directory contains {:?}; refusing to clear it", dir),
                        ),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Copy the static directory tree into the output directory
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.site.static_dir;
        if !static_dir.is_dir() {
            tracing::debug!("No static directory at {:?}", static_dir);
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let dest = self
                .site
                .output_dir
                .join(slash_relative(static_dir, path));
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
            }
            fs::copy(path, &dest).map_err(|e| Error::write(&dest, e))?;
            tracing::debug!("Copied: {:?} -> {:?}", path, dest);
            copied += 1;
        }

        Ok(copied)
    }
}

/// Resolved form of an existing path
fn canonical(path: &Path) -> Result<Option<PathBuf>> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(Some(resolved)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::read(path, e)),
    }
}

/// Write a file, creating its parent directories
fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| Error::write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    const POST_LAYOUT: &str = "<h1>{{ title }}</h1><time>{{ date }}</time>{{ content | safe }}";
    const HOME_LAYOUT_SRC: &str =
        "{% for post in posts %}<a href=\"{{ post.url | safe }}\">{{ post.title }}|{{ post.formattedDate }}</a>{% endfor %}";

    struct Fixture {
        _dir: tempfile::TempDir,
        site: Site,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_config(SiteConfig::default())
        }

        fn with_config(config: SiteConfig) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let site = Site::with_config(dir.path(), config);
            let fixture = Self { _dir: dir, site };
            fixture.layout("post", POST_LAYOUT);
            fixture.layout("home", HOME_LAYOUT_SRC);
            fixture
        }

        fn layout(&self, name: &str, source: &str) {
            let path = self.site.layout_dir.join(format!("{}.html", name));
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, source).unwrap();
        }

        fn page(&self, name: &str, content: &str) {
            let path = self.site.pages_dir.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn output(&self, name: &str) -> std::path::PathBuf {
            self.site.output_dir.join(name)
        }
    }

    #[test]
    fn test_live_pages_written_drafts_skipped() {
        let fx = Fixture::new();
        fx.page("posts/live.md", "---\ntitle: Live\nlive: true\n---\nHello");
        fx.page("posts/draft.md", "---\ntitle: Draft\nlive: false\n---\nWIP");
        fx.page("posts/unmarked.md", "---\ntitle: Unmarked\n---\nWIP");

        let report = fx.site.build().unwrap();
        assert_eq!(report.generated, vec!["posts/live.html"]);
        assert_eq!(report.skipped, vec!["posts/draft.html", "posts/unmarked.html"]);
        assert!(fx.output("posts/live.html").exists());
        assert!(!fx.output("posts/draft.html").exists());
        assert!(!fx.output("posts/unmarked.html").exists());
    }

    #[test]
    fn test_page_contains_title_and_formatted_date() {
        let fx = Fixture::new();
        fx.page(
            "hello.md",
            "---\ntitle: Hello World\ndate: 2024-02-01\nlive: true\n---\nSome *text*.",
        );

        fx.site.build().unwrap();
        let html = fs::read_to_string(fx.output("hello.html")).unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<time>February 1, 2024</time>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn test_home_lists_posts_newest_first() {
        let fx = Fixture::new();
        fx.page("index.md", "---\ntitle: Home\nlayout: home\nlive: true\n---\n");
        fx.page("posts/jan.md", "---\ntitle: January\ndate: 2024-01-01\nlive: true\n---\n");
        fx.page("posts/feb.md", "---\ntitle: February\ndate: 2024-02-01\nlive: true\n---\n");
        fx.page("posts/mar.md", "---\ntitle: Hidden\ndate: 2024-03-01\n---\n");

        fx.site.build().unwrap();
        let html = fs::read_to_string(fx.output("index.html")).unwrap();
        assert_eq!(
            html,
            "<a href=\"/posts/feb.html\">February|February 1, 2024</a>\
             <a href=\"/posts/jan.html\">January|January 1, 2024</a>"
        );
    }

    #[test]
    fn test_posts_only_passed_to_home_layout() {
        let fx = Fixture::new();
        fx.layout("post", "{% if posts %}has posts{% else %}no posts{% endif %}");
        fx.page("a.md", "---\ndate: 2024-01-01\nlive: true\n---\n");

        fx.site.build().unwrap();
        let html = fs::read_to_string(fx.output("a.html")).unwrap();
        assert_eq!(html, "no posts");
    }

    #[test]
    fn test_missing_layout_fails_without_output() {
        let fx = Fixture::new();
        fx.page("a.md", "---\ntitle: A\nlayout: gallery\nlive: true\n---\n");

        let err = fx.site.build().unwrap_err();
        assert!(matches!(err, Error::MissingLayout { ref layout, .. } if layout == "gallery"));
        assert!(!fx.output("a.html").exists());
    }

    #[test]
    fn test_missing_layout_on_draft_is_ignored() {
        let fx = Fixture::new();
        fx.page("a.md", "---\ntitle: A\nlayout: gallery\n---\n");

        let report = fx.site.build().unwrap();
        assert_eq!(report.skipped, vec!["a.html"]);
    }

    #[test]
    fn test_output_reset_and_static_copied() {
        let fx = Fixture::new();
        fx.page("a.md", "---\nlive: true\n---\n");
        fs::create_dir_all(fx.site.static_dir.join("css")).unwrap();
        fs::write(fx.site.static_dir.join("css/site.css"), "body {}").unwrap();
        fs::create_dir_all(&fx.site.output_dir).unwrap();
        fs::write(fx.output("stale.html"), "old").unwrap();

        fx.site.build().unwrap();
        assert!(!fx.output("stale.html").exists());
        assert_eq!(fs::read_to_string(fx.output("css/site.css")).unwrap(), "body {}");
        assert_eq!(
            fs::read_to_string(fx.output(CLIENT_SCRIPT_PATH)).unwrap(),
            client_script()
        );
        assert!(fx.output("css/highlight.css").exists());
    }

    #[test]
    fn test_client_script_defines_widgets() {
        let fx = Fixture::new();
        fx.page("a.md", "---
live: true
---
");

        fx.site.build().unwrap();
        let script = fs::read_to_string(fx.output(CLIENT_SCRIPT_PATH)).unwrap();
        assert!(script.contains("customElements.define(tag"));
        for tag in ["site-header", "site-footer", "post-item"] {
            assert!(script.contains(&format!("defineWidget('{}'", tag)), "{} not defined", tag);
        }
    }

    #[test]
    fn test_highlight_stylesheet_disabled() {
        let mut config = SiteConfig::default();
        config.highlight.enable = false;
        let fx = Fixture::with_config(config);
        fx.page("a.md", "---\nlive: true\n---\n```rust\nfn main() {}\n```\n");

        fx.site.build().unwrap();
        assert!(!fx.output("css/highlight.css").exists());
        let html = fs::read_to_string(fx.output("a.html")).unwrap();
        assert!(html.contains(r#"<code class="hljs language-rust">fn main() {}"#));
    }

    #[test]
    fn test_refuses_to_clear_base_dir() {
        let mut config = SiteConfig::default();
        config.output_dir = ".".to_string();
        let fx = Fixture::with_config(config);
        fx.page("a.md", "---\nlive: true\n---\n");

        let err = fx.site.build().unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(fx.site.pages_dir.join("a.md").exists());
    }

    #[test]
    fn test_refuses_to_clear_sources_behind_parent_dir() {
        let mut config = SiteConfig::default();
        config.output_dir = "src/../src".to_string();
        let fx = Fixture::with_config(config);
        fx.page("a.md", "---\nlive: true\n---\n");

        let err = fx.site.build().unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(fx.site.pages_dir.join("a.md").exists());
        assert!(fx.site.layout_dir.join("post.html").exists());
    }

    #[test]
    fn test_numeric_title_renders() {
        let fx = Fixture::new();
        fx.page("404.md", "---\ntitle: 404\nlive: true\n---\nNot found");

        fx.site.build().unwrap();
        let html = fs::read_to_string(fx.output("404.html")).unwrap();
        assert!(html.starts_with("<h1>404</h1>"));
    }
}
