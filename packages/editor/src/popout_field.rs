use crate::editable::{Editable, InlineEditable, RenderMode};
use crate::inline::{InlineField, TagKind};
use mailgen_common::VNode;

/// One named input of a compound field, shown as a label/value row inside
/// the popout editor.
///
/// Owned by its compound field; the editor only renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct PopoutField {
    key: String,
    input: InlineField,
}

impl PopoutField {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let input = InlineField::new(input_id(&key), TagKind::GenericBlock, "");
        Self { key, input }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn input_id(&self) -> &str {
        self.input.id()
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.input.set_value(value.into());
    }

    pub fn input_mut(&mut self) -> &mut InlineField {
        &mut self.input
    }

    pub fn render_label(&self) -> VNode {
        VNode::element("label")
            .with_attr("for", self.input.id())
            .with_child(VNode::text(&self.key))
    }

    pub fn render_input(&self) -> VNode {
        self.input.render(RenderMode::Editing)
    }
}

/// Element id for a sub-field input, e.g. `"Alt Text"` → `popout_alt_text`
fn input_id(key: &str) -> String {
    let slug: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("popout_{}", slug)
}
