//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use super::page::NavLink;

lazy_static! {
    /// Opening `---` line, optional YAML block, closing `---` line
    static ref FRONT_MATTER: Regex =
        Regex::new(r"\A---[ \t]*\r?\n(?:([\s\S]*?)\r?\n)?---[ \t]*(?:\r?\n|\z)").unwrap();
}

/// Only a YAML boolean `true` marks a page as live
fn strictly_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}

/// Accept any YAML scalar and keep its text, so `title: 404` reads as "404"
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a scalar value, found {:?}",
            other
        ))),
    }
}

/// Front-matter data of a page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub layout: Option<String>,
    #[serde(deserialize_with = "strictly_true")]
    pub live: bool,
    #[serde(rename = "navLinks")]
    pub nav_links: Vec<NavLink>,

    /// Additional custom fields, in document order
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let Some(captures) = FRONT_MATTER.captures(content) else {
            return Ok((FrontMatter::default(), content));
        };

        let body = &content[captures.get(0).map_or(0, |m| m.end())..];
        let yaml = captures.get(1).map_or("", |m| m.as_str());

        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Null => Ok((FrontMatter::default(), body)),
            value => Ok((serde_yaml::from_value(value)?, body)),
        }
    }

    /// Parse the date string into a calendar date-time
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 keeps the wall-clock time as written
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_local())
}
