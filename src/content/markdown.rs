//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::error::Result;
use crate::helpers::escape_html;

/// CSS class prefix for highlighted tokens; the stylesheet uses the same style
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    highlight: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_highlighting(true)
    }

    /// Create a renderer, optionally leaving code blocks unhighlighted
    pub fn with_highlighting(highlight: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            highlight,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        // Front matter is stripped before this point, so no metadata blocks
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // (language, buffered source) of the code block being read
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref())?;
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) => match code_block.as_mut() {
                    Some((_, code)) => code.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> Result<String> {
        let class = match lang {
            Some(lang) => format!("hljs language-{}", escape_html(lang)),
            None => "hljs".to_string(),
        };

        if !self.highlight {
            return Ok(format!(
                r#"<pre><code class="{}">{}</code></pre>"#,
                class,
                escape_html(code)
            ));
        }

        // Unknown languages are highlighted as plain text
        let syntax = lang
            .and_then(|lang| {
                self.syntax_set
                    .find_syntax_by_token(lang)
                    .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(format!(
            r#"<pre><code class="{}">{}</code></pre>"#,
            class,
            generator.finalize()
        ))
    }

    /// Stylesheet matching the classes emitted by [`MarkdownRenderer::render`]
    pub fn stylesheet(theme_name: &str) -> Result<String> {
        let theme_set = ThemeSet::load_defaults();
        let theme = theme_set.themes.get(theme_name).unwrap_or_else(|| {
            tracing::warn!("Unknown highlight theme {:?}, using the default", theme_name);
            theme_set
                .themes
                .values()
                .next()
                .expect("No themes available")
        });

        Ok(css_for_theme_with_class_style(theme, CLASS_STYLE)?)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
