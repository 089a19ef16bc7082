//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::content::loader::ContentLoader;
use crate::content::{post_listing, Page};
use crate::Site;

/// Print the post listing followed by the pages that are not live
pub fn run(site: &Site) -> Result<()> {
    let pages = ContentLoader::new(site).load_pages()?;
    print!("{}", render(&pages, &site.config.date_format));
    Ok(())
}

fn render(pages: &[Page], date_format: &str) -> String {
    let posts = post_listing(pages);
    let drafts: Vec<&Page> = pages.iter().filter(|p| !p.is_live()).collect();

    let mut out = String::new();
    let _ = writeln!(out, "Posts ({}):", posts.len());
    for post in posts {
        let summary = post.summary(date_format);
        let date = summary.formatted_date.as_deref().unwrap_or("undated");
        let _ = writeln!(out, "  {} - {} [{}]", date, summary.title, post.source);
    }

    let _ = writeln!(out, "Drafts ({}):", drafts.len());
    for page in drafts {
        let _ = writeln!(out, "  {} [{}]", page.title(), page.source);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;
    use std::path::PathBuf;

    fn page(source: &str, yaml: &str) -> Page {
        let content = format!("---\n{}\n---\n", yaml);
        let (fm, body) = FrontMatter::parse(&content).unwrap();
        Page::new(source.to_string(), PathBuf::from(source), fm, body.to_string())
    }

    #[test]
    fn test_render_listing() {
        let pages = vec![
            page("index.md", "title: Home\nlive: true"),
            page("posts/a.md", "title: A\ndate: 2024-01-01\nlive: true"),
            page("posts/b.md", "title: B\ndate: 2024-02-01\nlive: true"),
            page("posts/c.md", "title: C\nlive: true"),
            page("posts/wip.md", "title: WIP\ndate: 2024-03-01"),
        ];

        assert_eq!(
            render(&pages, "%Y-%m-%d"),
            "Posts (3):\n\
             \x20 2024-02-01 - B [posts/b.md]\n\
             \x20 2024-01-01 - A [posts/a.md]\n\
             \x20 undated - C [posts/c.md]\n\
             Drafts (1):\n\
             \x20 WIP [posts/wip.md]\n"
        );
    }
}
