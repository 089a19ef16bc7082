//! HTML helper functions

/// Escape text for use in HTML content and quoted attribute values
///
/// # Examples
/// ```
/// use neverendingloop::helpers::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">"#), "&lt;a href=&quot;x&quot;&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render an element's attribute list, escaping values
pub fn attributes<'a, I>(attrs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    attrs
        .into_iter()
        .map(|(name, value)| format!(r#" {}="{}""#, name, escape_html(value)))
        .collect()
}
