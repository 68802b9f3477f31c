use crate::editable::{Editable, InlineEditable, RenderMode};
use mailgen_common::VNode;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Class that marks a live, editable element
pub const EDITABLE_CLASS: &str = "editable";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagKind {
    Heading2,
    Heading1,
    Paragraph,
    GenericBlock,
}

impl TagKind {
    pub fn tag_name(self) -> &'static str {
        match self {
            TagKind::Heading2 => "h2",
            TagKind::Heading1 => "h1",
            TagKind::Paragraph => "p",
            TagKind::GenericBlock => "div",
        }
    }
}

/// A single click-to-edit text element
#[derive(Debug, Clone, PartialEq)]
pub struct InlineField {
    id: String,
    tag: TagKind,
    style: Option<String>,
    value: String,
    /// Selected character range, if any
    selection: Option<Range<usize>>,
}

impl InlineField {
    pub fn new(id: impl Into<String>, tag: TagKind, placeholder: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag,
            style: None,
            value: placeholder.into(),
            selection: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn tag(&self) -> TagKind {
        self.tag
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }
}

impl Editable for InlineField {
    fn id(&self) -> &str {
        &self.id
    }

    fn render(&self, mode: RenderMode) -> VNode {
        let mut node = VNode::element(self.tag.tag_name()).with_id(&self.id);

        if mode == RenderMode::Editing {
            node = node
                .with_class(EDITABLE_CLASS)
                .with_attr("contenteditable", "true");
        }
        if let Some(style) = &self.style {
            node = node.with_attr("style", style);
        }
        if !self.value.is_empty() {
            node = node.with_child(VNode::text(&self.value));
        }
        node
    }
}

impl InlineEditable for InlineField {
    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
        self.selection = None;
    }

    fn click(&mut self) -> Range<usize> {
        let all = 0..self.value.chars().count();
        self.selection = Some(all.clone());
        all
    }

    fn insert_text(&mut self, text: &str) {
        match self.selection.take() {
            Some(range) => {
                let start = byte_offset(&self.value, range.start);
                let end = byte_offset(&self.value, range.end);
                self.value.replace_range(start..end, text);
            }
            None => self.value.push_str(text),
        }
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_render_has_affordances() {
        let field = InlineField::new("introPara", TagKind::Paragraph, "Hello")
            .with_style("margin: 0;");
        let node = field.render(RenderMode::Editing);

        assert_eq!(node.tag(), Some("p"));
        assert_eq!(node.id(), Some("introPara"));
        assert!(node.has_class(EDITABLE_CLASS));
        assert_eq!(node.attr("contenteditable"), Some("true"));
        assert_eq!(node.attr("style"), Some("margin: 0;"));
        assert_eq!(node.text_content(), "Hello");
    }

    #[test]
    fn test_final_render_is_stripped() {
        let field = InlineField::new("section1_contentTitle", TagKind::Heading1, "Title");
        let node = field.render(RenderMode::Final);

        assert!(!node.has_class(EDITABLE_CLASS));
        assert_eq!(node.attr("contenteditable"), None);
        assert_eq!(node.text_content(), "Title");
    }

    #[test]
    fn test_final_render_is_detached_from_later_edits() {
        let mut field = InlineField::new("f", TagKind::GenericBlock, "before");
        let exported = field.render(RenderMode::Final);

        field.set_value("after".to_string());

        assert_eq!(exported.text_content(), "before");
        assert_eq!(field.render(RenderMode::Final).text_content(), "after");
    }

    #[test]
    fn test_value_is_verbatim() {
        let mut field = InlineField::new("f", TagKind::GenericBlock, "");
        field.set_value("  padded \n".to_string());
        assert_eq!(field.value(), "  padded \n");
    }

    #[test]
    fn test_click_selects_everything_then_insert_replaces() {
        let mut field = InlineField::new("f", TagKind::Heading2, "Section 1 Content Type");
        assert_eq!(field.click(), 0..22);

        field.insert_text("News");
        assert_eq!(field.value(), "News");
        assert_eq!(field.selection(), None);

        field.insert_text(" & Events");
        assert_eq!(field.value(), "News & Events");
    }

    #[test]
    fn test_click_counts_characters_not_bytes() {
        let mut field = InlineField::new("f", TagKind::Paragraph, "café");
        assert_eq!(field.click(), 0..4);
        field.insert_text("tea");
        assert_eq!(field.value(), "tea");
    }
}
