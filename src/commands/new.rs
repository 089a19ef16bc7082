//! Scaffold a new post

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Front matter written into a new post
#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
    layout: &'a str,
    live: bool,
}

/// Create a new draft post and return its path
///
/// The file goes to `<pages_dir>/<new_post_dir>/<slug>.md` unless `path`
/// (relative to the pages directory, `.md` optional) is given. Posts start
/// out with `live: false`.
pub fn create_post(site: &Site, title: &str, path: Option<&str>) -> Result<PathBuf> {
    let file_path = match path {
        Some(p) if p.ends_with(".md") => site.pages_dir.join(p),
        Some(p) => site.pages_dir.join(format!("{}.md", p)),
        None => site
            .pages_dir
            .join(&site.config.new_post_dir)
            .join(format!("{}.md", slug::slugify(title))),
    };

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let scaffold = Scaffold {
        title,
        date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        layout: &site.config.default_layout,
        live: false,
    };
    let front_matter = serde_yaml::to_string(&scaffold)?;
    let content = format!("---\n{}---\n\n", front_matter);

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
    }
    fs::write(&file_path, content).with_context(|| format!("Failed to write {:?}", file_path))?;

    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;

    #[test]
    fn test_new_post_is_a_draft() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_post(&site, "Hello: World", None).unwrap();
        assert_eq!(path, site.pages_dir.join("posts/hello-world.md"));

        let page = ContentLoader::new(&site).load_page(&path).unwrap();
        assert_eq!(page.title(), "Hello: World");
        assert_eq!(page.layout("other"), "post");
        assert!(!page.is_live());
        assert!(page.date.is_some());
    }

    #[test]
    fn test_new_post_custom_path() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_post(&site, "About", Some("about")).unwrap();
        assert_eq!(path, site.pages_dir.join("about.md"));
    }

    #[test]
    fn test_new_post_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();

        create_post(&site, "Twice", None).unwrap();
        let err = create_post(&site, "Twice", None).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
