//! Initialize a new site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

/// Date placeholder in the sample post
const DATE_PLACEHOLDER: &str = "{{date}}";

/// Starter files as (path relative to the site root, content)
const STARTER_FILES: &[(&str, &str)] = &[
    (CONFIG_FILE, include_str!("starter/_config.yml")),
    ("src/layout/home.html", include_str!("starter/home.html")),
    ("src/layout/post.html", include_str!("starter/post.html")),
    (
        "src/layout/partials/head.html",
        include_str!("starter/partials/head.html"),
    ),
    ("src/pages/index.md", include_str!("starter/index.md")),
    (
        "src/pages/posts/hello-world.md",
        include_str!("starter/hello-world.md"),
    ),
    ("public/css/style.css", include_str!("starter/style.css")),
];

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    for (name, content) in STARTER_FILES {
        let path = target_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let content = content.replace(DATE_PLACEHOLDER, &today);
        fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Created: {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;

    #[test]
    fn test_init_site_builds() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let site = Site::new(dir.path()).unwrap();
        let report = site.build().unwrap();
        assert_eq!(
            report.generated,
            vec!["index.html", "posts/hello-world.html"]
        );

        let home = fs::read_to_string(site.output_dir.join("index.html")).unwrap();
        assert!(home.contains(r#"<post-item title="Hello World" href="/posts/hello-world.html""#));
        assert!(home.contains(r#"<a href="https://github.com">GitHub</a>"#));
        assert!(home.contains(r#"<script src="/js/widgets.js" defer></script>"#));

        let post = fs::read_to_string(site.output_dir.join("posts/hello-world.html")).unwrap();
        assert!(post.contains("<h1>Hello World</h1>"));
        assert!(post.contains("footnote-definition"));
        assert!(site.output_dir.join("css/style.css").exists());
        assert!(site.output_dir.join("css/highlight.css").exists());
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
