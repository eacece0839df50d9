//! Read-only summaries of a single committed record.
//!
//! Each multi-valued kind declares an [`ItemClass`]; the list view renders
//! every record through [`summarize`], which matches on the class. Adding a
//! class means adding a variant here, and the compiler then points at every
//! renderer that has to learn about it.

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of characters kept in a body excerpt.
pub const EXCERPT_CHARS: usize = 120;

/// Renderer tag for the records of a multi-valued kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemClass {
    /// Blog post with a markdown body and optional images.
    Blog,
    /// Something the profile owner offers, with an asking price.
    Offer,
    /// Something the profile owner is looking for, with a budget.
    Wanted,
}

impl ItemClass {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Offer => "offer",
            Self::Wanted => "wanted",
        }
    }
}

/// What the list view shows for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    pub class: ItemClass,
    /// Headline; falls back to a class-specific placeholder when blank.
    pub title: String,
    /// Secondary line: body excerpt or asking price.
    pub detail: Option<String>,
    /// First gallery image, if any.
    pub thumbnail: Option<String>,
    pub image_count: usize,
}

/// Summarize `record` the way its class is displayed.
#[must_use]
pub fn summarize(class: ItemClass, record: &Value) -> ItemSummary {
    let images = gallery_urls(record);
    let thumbnail = images.first().cloned();
    let image_count = images.len();

    let (title, detail) = match class {
        ItemClass::Blog => (
            text_or(record, "title", "Untitled post"),
            non_blank(record, "markdown").map(|body| excerpt(&body, EXCERPT_CHARS)),
        ),
        ItemClass::Offer => (
            text_or(record, "title", "Untitled offer"),
            price(record).map(|p| format!("Price: {p}")),
        ),
        ItemClass::Wanted => (
            text_or(record, "title", "Untitled request"),
            price(record).map(|p| format!("Budget: {p}")),
        ),
    };

    ItemSummary { class, title, detail, thumbnail, image_count }
}

/// Collapse whitespace and cut `text` to at most `max_chars` characters.
#[must_use]
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut cut = collapsed
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}

fn non_blank(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn text_or(record: &Value, key: &str, fallback: &str) -> String {
    non_blank(record, key).unwrap_or_else(|| fallback.to_owned())
}

/// Positive price as display text; zero and missing prices are not shown.
fn price(record: &Value) -> Option<String> {
    let value = record.get("price")?;
    if let Some(n) = value.as_u64() {
        return (n > 0).then(|| n.to_string());
    }
    value
        .as_f64()
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n.to_string())
}

fn gallery_urls(record: &Value) -> Vec<String> {
    record
        .get("gallery")
        .and_then(Value::as_array)
        .map_or_else(Vec::new, |items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|url| !url.trim().is_empty())
                .map(str::to_owned)
                .collect()
        })
}
