//! Browser widgets: site header, footer and post item
//!
//! Each widget is a pure function of its attributes (and the page theme)
//! producing the markup of its shadow root. [`Element`] hosts a widget and
//! re-renders the whole shadow content whenever an observed attribute
//! changes. The build uses the same render functions to pre-render widgets
//! into declarative shadow roots. The shipped client script defines the same
//! three custom elements, so attribute changes in the browser re-render them,
//! and handles theme switching.

mod footer;
mod header;
mod post_item;
mod theme;

use indexmap::IndexMap;

use crate::content::NavLink;
use crate::helpers::attributes;

pub use footer::SiteFooter;
pub use header::SiteHeader;
pub use post_item::PostItem;
pub use theme::{
    init_theme, toggle_theme, Document, MemoryStorage, Theme, ThemeStorage, STORAGE_KEY,
    THEME_ATTRIBUTE,
};

/// Custom element definitions and theme handling for the browser
const CLIENT_JS: &str = include_str!("client.js");

/// Output path of the client script, relative to the output directory
pub const CLIENT_SCRIPT_PATH: &str = "js/widgets.js";

/// Client script written to [`CLIENT_SCRIPT_PATH`] by the build
///
/// The widget styles are shared with the pre-rendered markup, so a client
/// re-render produces the same shadow content.
pub fn client_script() -> String {
    let styles = serde_json::json!({
        "site-header": header::STYLE,
        "site-footer": footer::STYLE,
        "post-item": post_item::STYLE,
    });
    format!("const WIDGET_STYLES = {};\n{}", styles, CLIENT_JS)
}

/// Attribute name -> value, in insertion order
pub type Attributes = IndexMap<String, String>;

/// A custom element whose shadow content is a pure function of its attributes
pub trait Widget {
    /// Custom element tag name
    fn tag(&self) -> &'static str;

    /// Attributes whose changes trigger a re-render
    fn observed_attributes(&self) -> &'static [&'static str];

    /// Markup of the shadow root
    fn render(&self, attrs: &Attributes, theme: Theme) -> String;
}

/// A widget instance on a page
#[derive(Debug, Clone)]
pub struct Element<W: Widget> {
    widget: W,
    attributes: Attributes,
    shadow: Option<String>,
    renders: usize,
}

impl<W: Widget> Element<W> {
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            attributes: Attributes::new(),
            shadow: None,
            renders: 0,
        }
    }

    /// Set an attribute before the element is connected
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is_connected(&self) -> bool {
        self.shadow.is_some()
    }

    /// Attach to the document and render for the first time
    pub fn connect(&mut self, document: &Document) {
        self.refresh(document);
    }

    /// Set an attribute; returns whether the shadow content was re-rendered
    pub fn set_attribute(&mut self, name: &str, value: &str, document: &Document) -> bool {
        let old = self.attributes.insert(name.to_string(), value.to_string());
        let observed = self
            .widget
            .observed_attributes()
            .iter()
            .any(|attr| *attr == name);

        if observed && self.is_connected() && old.as_deref() != Some(value) {
            self.refresh(document);
            true
        } else {
            false
        }
    }

    /// Re-render the whole shadow content
    pub fn refresh(&mut self, document: &Document) {
        self.shadow = Some(self.widget.render(&self.attributes, document.theme()));
        self.renders += 1;
    }

    pub fn shadow_html(&self) -> Option<&str> {
        self.shadow.as_deref()
    }

    /// Number of renders since creation
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Host element with its shadow content as a declarative shadow root
    pub fn to_html(&self) -> String {
        let tag = self.widget.tag();
        let attrs = attributes(self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        format!(
            r#"<{tag}{attrs}><template shadowrootmode="open">{shadow}</template></{tag}>"#,
            tag = tag,
            attrs = attrs,
            shadow = self.shadow.as_deref().unwrap_or_default(),
        )
    }
}

/// Render a widget as it appears before any client script runs
pub fn prerender<W: Widget>(widget: W, attrs: &[(&str, &str)]) -> String {
    let mut element = attrs
        .iter()
        .fold(Element::new(widget), |el, (name, value)| {
            el.with_attribute(name, value)
        });
    element.connect(&Document::new());
    element.to_html()
}

/// Parse a `nav-items` attribute; anything but a JSON list of links yields none
pub(crate) fn parse_nav_items(attrs: &Attributes) -> Vec<NavLink> {
    attrs
        .get("nav-items")
        .and_then(|json| serde_json::from_str(json).ok())
        .unwrap_or_default()
}

/// Links markup shared by header and footer
pub(crate) fn nav_links_html(links: &[NavLink]) -> String {
    use crate::helpers::escape_html;

    links
        .iter()
        .map(|link| {
            format!(
                r#"<a href="{}">{}</a>"#,
                escape_html(&link.url),
                escape_html(&link.label)
            )
        })
        .collect()
}
