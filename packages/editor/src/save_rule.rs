use crate::compound::RenderedValue;
use crate::{EditorError, PopoutField};

/// Snapshot of a compound field's sub-field values, taken before any target
/// is touched so a save either reads everything or changes nothing.
#[derive(Debug, Clone)]
pub struct SubFieldValues<'a> {
    field_id: &'a str,
    values: Vec<(&'a str, &'a str)>,
}

impl<'a> SubFieldValues<'a> {
    pub fn capture(field_id: &'a str, fields: &'a [PopoutField]) -> Self {
        Self {
            field_id,
            values: fields.iter().map(|f| (f.key(), f.value())).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Result<&'a str, EditorError> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .ok_or_else(|| EditorError::SubFieldNotFound {
                field: self.field_id.to_string(),
                key: key.to_string(),
            })
    }
}

/// Trait for compound-field save rules
///
/// A rule maps sub-field values onto the rendered value. An empty sub-field
/// leaves its target untouched; it never clears it.
pub trait SaveRule: Send + Sync {
    /// Sub-field keys this rule reads, in display order
    fn keys(&self) -> &'static [&'static str];

    /// Apply the values; returns the names of the targets that changed
    fn apply(
        &self,
        values: &SubFieldValues<'_>,
        target: &mut RenderedValue,
    ) -> Result<Vec<&'static str>, EditorError>;

    /// Get a debug name for this rule
    fn name(&self) -> &'static str;
}

pub struct ImageSaveRule;

impl SaveRule for ImageSaveRule {
    fn keys(&self) -> &'static [&'static str] {
        &["URL", "Title", "Alt Text"]
    }

    fn apply(
        &self,
        values: &SubFieldValues<'_>,
        target: &mut RenderedValue,
    ) -> Result<Vec<&'static str>, EditorError> {
        let url = values.get("URL")?;
        let title_value = values.get("Title")?;
        let alt_value = values.get("Alt Text")?;

        let mut updated = Vec::new();
        if let RenderedValue::Image { src, title, alt } = target {
            if !url.is_empty() {
                *src = url.to_string();
                updated.push("src");
            }
            if !title_value.is_empty() {
                *title = Some(title_value.to_string());
                updated.push("title");
            }
            if !alt_value.is_empty() {
                *alt = Some(alt_value.to_string());
                updated.push("alt");
            }
        }
        Ok(updated)
    }

    fn name(&self) -> &'static str {
        "image"
    }
}

pub struct LinkSaveRule;

impl SaveRule for LinkSaveRule {
    fn keys(&self) -> &'static [&'static str] {
        &["URL", "Text"]
    }

    fn apply(
        &self,
        values: &SubFieldValues<'_>,
        target: &mut RenderedValue,
    ) -> Result<Vec<&'static str>, EditorError> {
        let url = values.get("URL")?;
        let text_value = values.get("Text")?;

        let mut updated = Vec::new();
        if let RenderedValue::Link { href, text } = target {
            if !url.is_empty() {
                *href = Some(normalize_url(url));
                updated.push("href");
            }
            if !text_value.is_empty() {
                *text = text_value.to_string();
                updated.push("text");
            }
        }
        Ok(updated)
    }

    fn name(&self) -> &'static str {
        "link"
    }
}

/// Prepend `https://` unless the URL already names http or https
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
