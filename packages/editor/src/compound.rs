//! # Compound Fields
//!
//! Image and link fields. Their value is assembled from several sub-fields
//! (an image needs a URL, title, and alt text) that are edited out-of-line in
//! the popout editor, then applied by a [`SaveRule`].
//!
//! ## States
//!
//! ```text
//! Closed ──open()──▶ Open-and-Bound ──save / cancel / off-click──▶ Closed
//! ```

use crate::editable::{Editable, PopoutEditable, RenderMode};
use crate::save_rule::{ImageSaveRule, LinkSaveRule, SaveRule, SubFieldValues};
use crate::{EditorError, PopoutField};
use mailgen_common::{FieldGeometry, Point, Rect, VNode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Class on every edit wrapper
pub const POPOUT_EDIT_CLASS: &str = "popoutEdit";
/// Added to the edit wrapper while the field is bound to the editor
pub const POPOUT_FOCUS_CLASS: &str = "popoutEdit--focus";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompoundKind {
    Image,
    Link,
}

impl CompoundKind {
    pub fn save_rule(self) -> &'static dyn SaveRule {
        match self {
            CompoundKind::Image => &ImageSaveRule,
            CompoundKind::Link => &LinkSaveRule,
        }
    }

    fn edit_class(self) -> &'static str {
        match self {
            CompoundKind::Image => "imgEdit",
            CompoundKind::Link => "linkEdit",
        }
    }
}

/// The attributes a compound field actually shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderedValue {
    Image {
        src: String,
        title: Option<String>,
        alt: Option<String>,
    },
    Link {
        href: Option<String>,
        text: String,
    },
}

impl RenderedValue {
    pub fn src(&self) -> Option<&str> {
        match self {
            RenderedValue::Image { src, .. } => Some(src),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            RenderedValue::Image { title, .. } => title.as_deref(),
            _ => None,
        }
    }

    pub fn alt(&self) -> Option<&str> {
        match self {
            RenderedValue::Image { alt, .. } => alt.as_deref(),
            _ => None,
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            RenderedValue::Link { href, .. } => href.as_deref(),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            RenderedValue::Link { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// A popout-edited field
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundField {
    id: String,
    kind: CompoundKind,
    value: RenderedValue,
    style: String,
    /// Fixed layout wrapper kept in the final rendering (links only)
    container_style: Option<String>,
    sub_fields: Vec<PopoutField>,
    focused: bool,
    /// Edit wrapper bounds, as last reported by the host
    region: Option<Rect>,
}

impl CompoundField {
    pub fn image(
        id: impl Into<String>,
        src: impl Into<String>,
        alt: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        let alt = alt.into();
        Self::new(
            id.into(),
            CompoundKind::Image,
            RenderedValue::Image {
                src: src.into(),
                title: None,
                alt: (!alt.is_empty()).then_some(alt),
            },
            style.into(),
            None,
        )
    }

    pub fn link(
        id: impl Into<String>,
        text: impl Into<String>,
        style: impl Into<String>,
        container_style: impl Into<String>,
    ) -> Self {
        Self::new(
            id.into(),
            CompoundKind::Link,
            RenderedValue::Link {
                href: None,
                text: text.into(),
            },
            style.into(),
            Some(container_style.into()),
        )
    }

    fn new(
        id: String,
        kind: CompoundKind,
        value: RenderedValue,
        style: String,
        container_style: Option<String>,
    ) -> Self {
        let sub_fields = kind
            .save_rule()
            .keys()
            .iter()
            .map(|key| PopoutField::new(*key))
            .collect();

        Self {
            id,
            kind,
            value,
            style,
            container_style,
            sub_fields,
            focused: false,
            region: None,
        }
    }

    pub fn kind(&self) -> CompoundKind {
        self.kind
    }

    pub fn value(&self) -> &RenderedValue {
        &self.value
    }

    pub fn region(&self) -> Option<Rect> {
        self.region
    }

    /// Update the edit wrapper bounds after a layout change
    pub fn set_region(&mut self, region: Rect) {
        self.region = Some(region);
    }

    /// The bare value element (`<img>` or `<a>`)
    fn render_value(&self) -> VNode {
        let node = match &self.value {
            RenderedValue::Image { src, title, alt } => {
                let mut img = VNode::element("img")
                    .with_id(&self.id)
                    .with_attr("style", &self.style)
                    .with_attr("src", src);
                if let Some(title) = title {
                    img = img.with_attr("title", title);
                }
                if let Some(alt) = alt {
                    img = img.with_attr("alt", alt);
                }
                img
            }
            RenderedValue::Link { href, text } => {
                let mut a = VNode::element("a")
                    .with_id(&self.id)
                    .with_attr("style", &self.style);
                if let Some(href) = href {
                    a = a.with_attr("href", href);
                }
                a.with_child(VNode::text(text))
            }
        };

        match &self.container_style {
            Some(style) => VNode::element("div")
                .with_attr("style", style)
                .with_child(node),
            None => node,
        }
    }
}

impl Editable for CompoundField {
    fn id(&self) -> &str {
        &self.id
    }

    fn render(&self, mode: RenderMode) -> VNode {
        match mode {
            RenderMode::Final => self.render_value(),
            RenderMode::Editing => {
                let edit_class = self.kind.edit_class();
                let mut wrapper = VNode::element("a")
                    .with_class(edit_class)
                    .with_class(POPOUT_EDIT_CLASS);
                if self.focused {
                    wrapper = wrapper.with_class(POPOUT_FOCUS_CLASS);
                }
                wrapper
                    .with_attr("href", "#")
                    .with_attr("data-field", &self.id)
                    .with_child(
                        VNode::element("div")
                            .with_class(format!("{}__text", edit_class))
                            .with_child(VNode::text("edit")),
                    )
                    .with_child(self.render_value())
            }
        }
    }
}

impl PopoutEditable for CompoundField {
    fn sub_fields(&self) -> &[PopoutField] {
        &self.sub_fields
    }

    fn sub_field_mut(&mut self, key: &str) -> Result<&mut PopoutField, EditorError> {
        let field_id = &self.id;
        self.sub_fields
            .iter_mut()
            .find(|f| f.key() == key)
            .ok_or_else(|| EditorError::SubFieldNotFound {
                field: field_id.clone(),
                key: key.to_string(),
            })
    }

    fn sub_field_value(&self, key: &str) -> Result<&str, EditorError> {
        self.sub_fields
            .iter()
            .find(|f| f.key() == key)
            .map(PopoutField::value)
            .ok_or_else(|| EditorError::SubFieldNotFound {
                field: self.id.clone(),
                key: key.to_string(),
            })
    }

    fn open(&mut self, geometry: &FieldGeometry, offset: f64) -> Point {
        self.focused = true;
        self.region = Some(geometry.wrapper);
        geometry.anchor(offset)
    }

    fn save(&mut self) -> Result<Vec<&'static str>, EditorError> {
        let rule = self.kind.save_rule();
        let values = SubFieldValues::capture(&self.id, &self.sub_fields);
        let updated = rule.apply(&values, &mut self.value)?;

        debug!(field = %self.id, rule = rule.name(), updated = ?updated, "Saved compound field");
        Ok(updated)
    }

    fn click_off(&mut self) {
        self.focused = false;
    }

    fn was_clicked(&self, point: Point) -> bool {
        self.region.is_some_and(|region| region.contains(point))
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}
