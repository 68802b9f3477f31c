//! # Content Sections
//!
//! A section is one repeatable block of the email: type, title, image,
//! blurb, and link, always in that order. Every element id inside a section
//! is prefixed with `section{n}_`, and every placeholder with `Section {n} `,
//! so rendered ids never collide across sections.

use crate::compound::CompoundField;
use crate::config::EditorConfig;
use crate::editable::{Editable, RenderMode};
use crate::inline::{InlineField, TagKind};
use crate::EditorError;
use mailgen_common::VNode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User-visible ordinal of a section. Positive, never reused in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SectionId(u32);

impl SectionId {
    pub const FIRST: SectionId = SectionId(1);

    pub fn new(ordinal: u32) -> Result<Self, EditorError> {
        if ordinal == 0 {
            return Err(EditorError::InvalidOrdinal(ordinal.to_string()));
        }
        Ok(Self(ordinal))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl FromStr for SectionId {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ordinal = s
            .trim()
            .parse::<u32>()
            .map_err(|_| EditorError::InvalidOrdinal(s.to_string()))?;
        Self::new(ordinal)
    }
}

impl TryFrom<u32> for SectionId {
    type Error = EditorError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SectionId> for u32 {
    fn from(id: SectionId) -> Self {
        id.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which of the five fields of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionSlot {
    ContentType,
    Title,
    Image,
    Blurb,
    Link,
}

impl SectionSlot {
    fn suffix(self) -> &'static str {
        match self {
            SectionSlot::ContentType => "contentType",
            SectionSlot::Title => "contentTitle",
            SectionSlot::Image => "contentImage",
            SectionSlot::Blurb => "contentBlurb",
            SectionSlot::Link => "contentLink",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentSection {
    id: SectionId,
    content_type: InlineField,
    title: InlineField,
    image: CompoundField,
    blurb: InlineField,
    link: CompoundField,
    deletable: bool,
    cell_style: String,
    heading_style: String,
}

impl ContentSection {
    pub fn new(id: SectionId, deletable: bool, config: &EditorConfig) -> Self {
        let placeholders = &config.placeholders;
        let styles = &config.styles;
        let prefix = format!("Section {} ", id);

        Self {
            id,
            content_type: InlineField::new(
                field_id(id, SectionSlot::ContentType),
                TagKind::Heading2,
                format!("{}{}", prefix, placeholders.content_type),
            )
            .with_style(&styles.content_type),
            title: InlineField::new(
                field_id(id, SectionSlot::Title),
                TagKind::Heading1,
                format!("{}{}", prefix, placeholders.title),
            )
            .with_style(&styles.title),
            image: CompoundField::image(
                field_id(id, SectionSlot::Image),
                &placeholders.image_src,
                &placeholders.image_alt,
                &styles.image,
            ),
            blurb: InlineField::new(
                field_id(id, SectionSlot::Blurb),
                TagKind::GenericBlock,
                format!("{}{}", prefix, placeholders.blurb),
            )
            .with_style(&styles.blurb),
            link: CompoundField::link(
                field_id(id, SectionSlot::Link),
                format!("{}{}", prefix, placeholders.link_text),
                &styles.link,
                &styles.link_container,
            ),
            deletable,
            cell_style: styles.section_cell.clone(),
            heading_style: styles.heading_container.clone(),
        }
    }

    /// Build a section from a raw ordinal. Non-numeric or zero ordinals fail
    /// before anything is built.
    pub fn create(raw_ordinal: &str, deletable: bool, config: &EditorConfig) -> Result<Self, EditorError> {
        let id = raw_ordinal.parse::<SectionId>()?;
        Ok(Self::new(id, deletable, config))
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn is_deletable(&self) -> bool {
        self.deletable
    }

    pub fn row_id(&self) -> String {
        format!("section{}_row", self.id)
    }

    pub fn delete_button_id(&self) -> String {
        format!("section{}_deleteBtn", self.id)
    }

    pub fn content_type(&self) -> &InlineField {
        &self.content_type
    }

    pub fn title(&self) -> &InlineField {
        &self.title
    }

    pub fn image(&self) -> &CompoundField {
        &self.image
    }

    pub fn blurb(&self) -> &InlineField {
        &self.blurb
    }

    pub fn link(&self) -> &CompoundField {
        &self.link
    }

    pub fn inline_field(&self, id: &str) -> Option<&InlineField> {
        [&self.content_type, &self.title, &self.blurb]
            .into_iter()
            .find(|f| f.id() == id)
    }

    pub fn inline_field_mut(&mut self, id: &str) -> Option<&mut InlineField> {
        [&mut self.content_type, &mut self.title, &mut self.blurb]
            .into_iter()
            .find(|f| f.id() == id)
    }

    pub fn compound_field(&self, id: &str) -> Option<&CompoundField> {
        [&self.image, &self.link].into_iter().find(|f| f.id() == id)
    }

    pub fn compound_field_mut(&mut self, id: &str) -> Option<&mut CompoundField> {
        [&mut self.image, &mut self.link]
            .into_iter()
            .find(|f| f.id() == id)
    }

    /// Does any field of this section carry `id`
    pub fn owns_field(&self, id: &str) -> bool {
        self.inline_field(id).is_some() || self.compound_field(id).is_some()
    }

    fn delete_control(&self) -> Option<VNode> {
        self.deletable.then(|| {
            VNode::element("button")
                .with_id(self.delete_button_id())
                .with_class("contentSection__deleteBtn")
                .with_class("standardBtn")
                .with_attr("title", "Delete Section")
                .with_attr("data-section", self.id.to_string())
                .with_child(VNode::text("\u{00d7}"))
        })
    }

    fn render_row(&self, mode: RenderMode) -> VNode {
        let heading = VNode::element("div")
            .with_attr("style", &self.heading_style)
            .with_child(self.content_type.render(mode))
            .with_child(self.title.render(mode));

        let mut cell = VNode::element("td")
            .with_attr("style", &self.cell_style)
            .with_child(heading);
        if mode == RenderMode::Editing {
            if let Some(button) = self.delete_control() {
                cell = cell.with_child(button);
            }
        }
        let cell = cell
            .with_child(self.image.render(mode))
            .with_child(self.blurb.render(mode))
            .with_child(self.link.render(mode));

        let row = VNode::element("tr");
        let row = match mode {
            RenderMode::Editing => row.with_id(self.row_id()),
            RenderMode::Final => row,
        };
        row.with_child(cell)
    }

    /// Live row: type, title, image, blurb, link, plus the delete control
    /// unless this is the first section
    pub fn render_editable(&self) -> VNode {
        self.render_row(RenderMode::Editing)
    }

    /// Export row built from the final rendering of every field
    pub fn render_final(&self) -> VNode {
        self.render_row(RenderMode::Final)
    }
}

fn field_id(section: SectionId, slot: SectionSlot) -> String {
    format!("section{}_{}", section, slot.suffix())
}
