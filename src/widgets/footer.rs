//! `<site-footer>`: author credit and navigation

use super::{nav_links_html, parse_nav_items, Attributes, Theme, Widget};
use crate::helpers::escape_html;

pub(crate) const STYLE: &str = r#"<style>
:host { display: block; }
footer {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-top: 3rem;
  padding-top: 1.5rem;
  border-top: 1px solid var(--border-color, #e5e5e5);
  font-size: 0.875rem;
  color: var(--text-secondary, #666666);
}
.footer-left { flex: 1; }
.footer-right { display: flex; gap: 1.5rem; }
.footer-right a { color: var(--text-secondary, #666666); text-decoration: none; }
.footer-right a:hover { color: var(--accent-color, #667eea); text-decoration: underline; }
.heart { color: #ff6b6b; }
:host-context(:root[data-theme="dark"]) footer { border-top-color: #333333; color: #cccccc; }
:host-context(:root[data-theme="dark"]) .footer-right a { color: #cccccc; }
</style>"#;

/// Footer widget; observes `nav-items`
///
/// An `author` attribute, when present, replaces the configured author so the
/// client script can re-render the credit line from the element alone.
#[derive(Debug, Clone)]
pub struct SiteFooter {
    /// Name in the credit line
    pub author: String,
}

impl SiteFooter {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
        }
    }
}

impl Widget for SiteFooter {
    fn tag(&self) -> &'static str {
        "site-footer"
    }

    fn observed_attributes(&self) -> &'static [&'static str] {
        &["nav-items"]
    }

    fn render(&self, attrs: &Attributes, _theme: Theme) -> String {
        let nav = nav_links_html(&parse_nav_items(attrs));
        let author = attrs.get("author").unwrap_or(&self.author);
        format!(
            r#"{style}<footer><div class="footer-left">Made with <span class="heart">❤</span> by {author}</div><nav class="footer-right"><a href="/">Home</a>{nav}</nav></footer>"#,
            style = STYLE,
            author = escape_html(author),
            nav = nav,
        )
    }
}
