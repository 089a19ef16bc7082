//! `<post-item>`: one entry of the post listing

use super::{Attributes, Theme, Widget};
use crate::helpers::escape_html;

pub(crate) const STYLE: &str = r#"<style>
:host { display: block; }
.post-item {
  margin-bottom: 1.5rem;
  padding-bottom: 1.5rem;
  border-bottom: 1px solid #f0f0f0;
  font-family: 'IBM Plex Mono', monospace;
}
.post-title { margin: 0; font-size: 1.1em; line-height: 1.6; }
.post-title a { color: var(--text-secondary); text-decoration: underline; }
.post-title a:hover {
  text-decoration-color: var(--accent-color);
  text-decoration-thickness: 3px;
}
.post-date { margin: 0.25rem 0 0 0; color: #999; font-size: 0.9em; line-height: 1.6; }
</style>"#;

/// Post listing entry; observes `title`, `href` and `date`
#[derive(Debug, Clone, Copy, Default)]
pub struct PostItem;

impl Widget for PostItem {
    fn tag(&self) -> &'static str {
        "post-item"
    }

    fn observed_attributes(&self) -> &'static [&'static str] {
        &["title", "href", "date"]
    }

    fn render(&self, attrs: &Attributes, _theme: Theme) -> String {
        let get = |name: &str, default: &'static str| {
            escape_html(attrs.get(name).map(String::as_str).unwrap_or(default))
        };

        format!(
            r#"{style}<div class="post-item"><h3 class="post-title"><a href="{href}">{title}</a></h3><p class="post-date">{date}</p></div>"#,
            style = STYLE,
            href = get("href", "#"),
            title = get("title", ""),
            date = get("date", ""),
        )
    }
}
