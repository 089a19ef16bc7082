//! Layouts: named Tera templates loaded from the layout directory
//!
//! A layout named `post` is the file `post.html`. Every `.html` file under
//! the layout directory is loaded once per build, so layouts can `extends`
//! or `include` each other (e.g. `partials/head.html`).

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera, Value};
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::content::{NavLink, PostSummary};
use crate::error::{Error, Result};
use crate::helpers::{format_date_str, slash_relative};
use crate::widgets::{prerender, PostItem, SiteFooter, SiteHeader};

/// File extension of layout files
pub const LAYOUT_EXTENSION: &str = "html";

/// Data a layout is rendered with
#[derive(Debug, Clone, Serialize)]
pub struct LayoutData<'a> {
    /// Front-matter keys without a dedicated field; explicit fields win on clashes
    #[serde(flatten)]
    pub extra: &'a IndexMap<String, serde_yaml::Value>,
    pub title: &'a str,
    /// Formatted date
    pub date: Option<String>,
    /// Date as written in the front matter
    #[serde(rename = "rawDate")]
    pub raw_date: Option<&'a str>,
    /// Rendered markdown
    pub content: String,
    #[serde(rename = "navLinks")]
    pub nav_links: &'a [NavLink],
    pub layout: &'a str,
    pub live: bool,
    pub url: String,
    #[serde(rename = "siteTitle")]
    pub site_title: &'a str,
    /// Post listing; only set for the home layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<PostSummary>>,
}

/// The set of layouts available to a build
pub struct LayoutSet {
    tera: Tera,
    layout_dir: PathBuf,
}

impl LayoutSet {
    /// Load every layout under `layout_dir`
    pub fn load(layout_dir: &Path, config: &SiteConfig) -> Result<Self> {
        let mut templates = Vec::new();

        if layout_dir.is_dir() {
            for entry in WalkDir::new(layout_dir).follow_links(true).sort_by_file_name() {
                let entry = entry?;
                let path = entry.path();
                let is_layout = path.extension().and_then(|e| e.to_str()) == Some(LAYOUT_EXTENSION);
                if entry.file_type().is_file() && is_layout {
                    let content = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
                    templates.push((slash_relative(layout_dir, path), content));
                }
            }
        } else {
            tracing::warn!("Layout directory {:?} not found", layout_dir);
        }

        tracing::debug!("Loaded {} layouts from {:?}", templates.len(), layout_dir);
        Self::from_templates(layout_dir, templates, config)
    }

    /// Build a layout set from in-memory templates (`name.html`, source)
    pub fn from_templates(
        layout_dir: &Path,
        templates: Vec<(String, String)>,
        config: &SiteConfig,
    ) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)
            .map_err(|source| Error::Layouts {
                path: layout_dir.to_path_buf(),
                source,
            })?;

        tera.register_filter("json", json_filter);
        tera.register_filter("format_date", format_date_filter(config.date_format.clone()));
        register_widget_functions(&mut tera, config);

        Ok(Self {
            tera,
            layout_dir: layout_dir.to_path_buf(),
        })
    }

    /// Check if a layout exists
    pub fn has_layout(&self, name: &str) -> bool {
        let template = template_name(name);
        self.tera.get_template_names().any(|n| n == template)
    }

    /// Render a layout with the given data
    pub fn render(&self, name: &str, data: &LayoutData) -> Result<String> {
        let template = template_name(name);
        if !self.has_layout(name) {
            return Err(Error::MissingLayout {
                layout: name.to_string(),
                path: self.layout_dir.join(&template),
            });
        }

        let template_error = |source| Error::Template {
            layout: name.to_string(),
            source,
        };
        let context = Context::from_serialize(data).map_err(template_error)?;
        self.tera.render(&template, &context).map_err(template_error)
    }
}

fn template_name(layout: &str) -> String {
    format!("{}.{}", layout, LAYOUT_EXTENSION)
}

/// Tera filter: serialize a value to JSON (e.g. for widget attributes)
fn json_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(value.to_string()))
}

/// Tera filter: format a front-matter date, `format` defaulting to the site's
fn format_date_filter(default_format: String) -> impl tera::Filter {
    move |value: &Value, args: &HashMap<String, Value>| -> tera::Result<Value> {
        let raw = match value {
            Value::Null => return Ok(Value::Null),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let format = match args.get("format") {
            Some(val) => tera::try_get_value!("format_date", "format", String, val),
            None => default_format.clone(),
        };

        // Unparseable dates pass through untouched
        Ok(Value::String(format_date_str(&raw, &format).unwrap_or(raw)))
    }
}

/// A Tera function whose HTML output is not autoescaped
struct WidgetFunction<F>(F);

impl<F> tera::Function for WidgetFunction<F>
where
    F: Fn(&HashMap<String, Value>) -> tera::Result<Value> + Send + Sync,
{
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        (self.0)(args)
    }

    fn is_safe(&self) -> bool {
        true
    }
}

fn string_arg(args: &HashMap<String, Value>, name: &str) -> Option<String> {
    match args.get(name)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn render_widget<W: crate::widgets::Widget>(widget: W, attrs: &[(&str, String)]) -> Value {
    let attrs: Vec<(&str, &str)> = attrs.iter().map(|(k, v)| (*k, v.as_str())).collect();
    Value::String(prerender(widget, &attrs))
}

/// `site_header(title?, nav?)`, `site_footer(nav?)`, `post_item(title, href, date)`
fn register_widget_functions(tera: &mut Tera, config: &SiteConfig) {
    let site_title = config.title.clone();
    tera.register_function(
        "site_header",
        WidgetFunction(move |args: &HashMap<String, Value>| -> tera::Result<Value> {
            let title = string_arg(args, "title").unwrap_or_else(|| site_title.clone());
            let mut attrs = vec![("title", title)];
            if let Some(nav) = args.get("nav") {
                attrs.push(("nav-items", nav.to_string()));
            }
            Ok(render_widget(SiteHeader, &attrs))
        }),
    );

    let author = config.author.clone();
    tera.register_function(
        "site_footer",
        WidgetFunction(move |args: &HashMap<String, Value>| -> tera::Result<Value> {
            let mut attrs = vec![("author", author.clone())];
            if let Some(nav) = args.get("nav") {
                attrs.push(("nav-items", nav.to_string()));
            }
            Ok(render_widget(SiteFooter::new(author.clone()), &attrs))
        }),
    );

    tera.register_function(
        "post_item",
        WidgetFunction(|args: &HashMap<String, Value>| -> tera::Result<Value> {
            let attrs: Vec<_> = ["title", "href", "date"]
                .into_iter()
                .filter_map(|name| string_arg(args, name).map(|value| (name, value)))
                .collect();
            Ok(render_widget(PostItem, &attrs))
        }),
    );
}
