//! # Generator
//!
//! Document root. Owns the introduction, the ordered sections, the popout
//! editor, and the copy popout, and is the single entry point the host calls
//! into for every UI event.
//!
//! Fields live in [`EmailDocument`]; the popout editor sits beside it rather
//! than inside it, so the editor can borrow the document mutably while it
//! works on a bound field.

use crate::clipboard::{ClipboardPlatform, CopyOutcome, CopyPopout, StagedText};
use crate::compound::CompoundField;
use crate::config::EditorConfig;
use crate::editable::{Editable, InlineEditable, PopoutEditable, RenderMode};
use crate::inline::{InlineField, TagKind};
use crate::paste;
use crate::popout_editor::{save_field, FieldRegistry, PopoutEditor};
use crate::section::{ContentSection, SectionId};
use crate::EditorError;
use mailgen_common::{FieldGeometry, Point, Rect, VNode};
use mailgen_compiler_html::{compile_to_html, CompileOptions};
use std::ops::Range;
use tracing::{debug, info, instrument, warn};

/// Introduction plus sections, in display order
#[derive(Debug, Clone)]
pub struct EmailDocument {
    introduction: InlineField,
    sections: Vec<ContentSection>,
}

impl EmailDocument {
    pub fn introduction(&self) -> &InlineField {
        &self.introduction
    }

    pub fn sections(&self) -> &[ContentSection] {
        &self.sections
    }

    pub fn inline_field(&self, id: &str) -> Option<&InlineField> {
        if self.introduction.id() == id {
            return Some(&self.introduction);
        }
        self.sections.iter().find_map(|s| s.inline_field(id))
    }

    pub fn inline_field_mut(&mut self, id: &str) -> Option<&mut InlineField> {
        if self.introduction.id() == id {
            return Some(&mut self.introduction);
        }
        self.sections
            .iter_mut()
            .find_map(|s| s.inline_field_mut(id))
    }

    pub fn compound_field(&self, id: &str) -> Option<&CompoundField> {
        self.sections.iter().find_map(|s| s.compound_field(id))
    }

    pub fn compound_field_mut(&mut self, id: &str) -> Option<&mut CompoundField> {
        self.sections
            .iter_mut()
            .find_map(|s| s.compound_field_mut(id))
    }

    /// Section owning the field `id`, if any
    pub fn section_of(&self, field_id: &str) -> Option<SectionId> {
        self.sections
            .iter()
            .find(|s| s.owns_field(field_id))
            .map(ContentSection::id)
    }
}

impl FieldRegistry for EmailDocument {
    fn popout(&self, id: &str) -> Option<&dyn PopoutEditable> {
        self.compound_field(id).map(|f| f as &dyn PopoutEditable)
    }

    fn popout_mut(&mut self, id: &str) -> Option<&mut dyn PopoutEditable> {
        self.compound_field_mut(id)
            .map(|f| f as &mut dyn PopoutEditable)
    }
}

pub struct Generator {
    config: EditorConfig,
    document: EmailDocument,
    editor: PopoutEditor,
    copy_popout: CopyPopout,
    /// Highest section id handed out this session
    last_issued: SectionId,
}

impl Generator {
    /// Start a session: the introduction and the first, undeletable section
    pub fn new(config: EditorConfig) -> Self {
        let introduction = InlineField::new(
            &config.surface.introduction_field,
            TagKind::Paragraph,
            &config.placeholders.introduction,
        );
        let first = ContentSection::new(SectionId::FIRST, false, &config);

        Self {
            document: EmailDocument {
                introduction,
                sections: vec![first],
            },
            config,
            editor: PopoutEditor::new(),
            copy_popout: CopyPopout::new(),
            last_issued: SectionId::FIRST,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &EmailDocument {
        &self.document
    }

    pub fn introduction(&self) -> &InlineField {
        &self.document.introduction
    }

    pub fn sections(&self) -> &[ContentSection] {
        &self.document.sections
    }

    pub fn section(&self, id: SectionId) -> Option<&ContentSection> {
        self.document.sections.iter().find(|s| s.id() == id)
    }

    pub fn section_ids(&self) -> Vec<SectionId> {
        self.document.sections.iter().map(ContentSection::id).collect()
    }

    pub fn editor(&self) -> &PopoutEditor {
        &self.editor
    }

    pub fn copy_popout(&self) -> &CopyPopout {
        &self.copy_popout
    }

    /// One past the highest id issued so far. Ids of deleted sections are
    /// never handed out again.
    pub fn next_section_id(&self) -> SectionId {
        self.last_issued.next()
    }

    /// Append a new deletable section; it renders just before the trailing
    /// controls
    pub fn add_section(&mut self) -> SectionId {
        let id = self.next_section_id();
        self.last_issued = id;
        self.document
            .sections
            .push(ContentSection::new(id, true, &self.config));

        info!(section = %id, total = self.document.sections.len(), "Added section");
        id
    }

    /// Drop a section by id. Returns false when it was not present.
    pub fn remove_section(&mut self, id: SectionId) -> bool {
        let Some(index) = self.document.sections.iter().position(|s| s.id() == id) else {
            return false;
        };

        let bound_here = self
            .editor
            .bound_field()
            .is_some_and(|field| self.document.sections[index].owns_field(field));
        if bound_here {
            self.editor.hide(&mut self.document);
        }

        self.document.sections.remove(index);
        true
    }

    /// User delete action. The first section refuses.
    pub fn delete_section(&mut self, id: SectionId) -> Result<(), EditorError> {
        let section = self.section(id).ok_or(EditorError::SectionNotFound(id))?;
        if !section.is_deletable() {
            return Err(EditorError::SectionNotDeletable(id));
        }

        self.remove_section(id);
        info!(section = %id, total = self.document.sections.len(), "Deleted section");
        Ok(())
    }

    pub fn edit_text(&mut self, field_id: &str, value: impl Into<String>) -> Result<(), EditorError> {
        let field = self
            .document
            .inline_field_mut(field_id)
            .ok_or_else(|| EditorError::FieldNotFound(field_id.to_string()))?;
        field.set_value(value.into());
        Ok(())
    }

    /// Click on an inline field: selects all of its text
    pub fn click_inline(&mut self, field_id: &str) -> Result<Range<usize>, EditorError> {
        let field = self
            .document
            .inline_field_mut(field_id)
            .ok_or_else(|| EditorError::FieldNotFound(field_id.to_string()))?;
        Ok(field.click())
    }

    /// Paste into an inline field or a sub-field input of the open editor.
    ///
    /// Only the plain-text flavor is kept. Sub-fields are single line.
    pub fn paste_into(&mut self, target_id: &str, content: &str) -> Result<(), EditorError> {
        if let Some(field) = self.document.inline_field_mut(target_id) {
            field.insert_text(&paste::plain_text(content));
            return Ok(());
        }

        let bound = self.editor.bound_field().ok_or(EditorError::NoBoundField)?;
        let field = self
            .document
            .compound_field_mut(bound)
            .ok_or_else(|| EditorError::FieldNotFound(bound.to_string()))?;
        let key = field
            .sub_fields()
            .iter()
            .find(|sub| sub.input_id() == target_id)
            .map(|sub| sub.key().to_string())
            .ok_or_else(|| EditorError::FieldNotFound(target_id.to_string()))?;

        field
            .sub_field_mut(&key)?
            .input_mut()
            .insert_text(&paste::single_line(content));
        Ok(())
    }

    /// Type into a sub-field of the field bound to the editor
    pub fn edit_sub_field(&mut self, key: &str, value: impl Into<String>) -> Result<(), EditorError> {
        let bound = self.editor.bound_field().ok_or(EditorError::NoBoundField)?;
        let field = self
            .document
            .compound_field_mut(bound)
            .ok_or_else(|| EditorError::FieldNotFound(bound.to_string()))?;
        field.sub_field_mut(key)?.set_value(value);
        Ok(())
    }

    /// Open a compound field in the popout editor: bind it (releasing any
    /// other field first), mark it focused, and show the panel at its anchor
    pub fn open_field(&mut self, field_id: &str, geometry: &FieldGeometry) -> Result<Point, EditorError> {
        self.editor.bind(&mut self.document, field_id, save_field)?;

        let field = self
            .document
            .popout_mut(field_id)
            .ok_or_else(|| EditorError::FieldNotFound(field_id.to_string()))?;
        let anchor = field.open(geometry, self.config.popout_offset);
        self.editor.show(anchor.x, anchor.y);

        debug!(field = %field_id, x = anchor.x, y = anchor.y, "Opened popout editor");
        Ok(anchor)
    }

    /// Panel bounds as laid out by the host
    pub fn set_editor_region(&mut self, region: Rect) {
        self.editor.set_region(region);
    }

    pub fn set_copy_popout_region(&mut self, region: Rect) {
        self.copy_popout.set_region(region);
    }

    /// Edit wrapper bounds of a compound field after a layout change
    pub fn set_field_region(&mut self, field_id: &str, region: Rect) -> Result<(), EditorError> {
        let field = self
            .document
            .compound_field_mut(field_id)
            .ok_or_else(|| EditorError::FieldNotFound(field_id.to_string()))?;
        field.set_region(region);
        Ok(())
    }

    pub fn submit_editor(&mut self) -> Result<Vec<&'static str>, EditorError> {
        self.editor.submit(&mut self.document)
    }

    pub fn cancel_editor(&mut self) {
        self.editor.hide(&mut self.document);
    }

    pub fn key_down(&mut self, key: &str) -> Result<Option<Vec<&'static str>>, EditorError> {
        self.editor.handle_key(&mut self.document, key)
    }

    /// Document-wide click. Returns whether any panel was dismissed.
    pub fn click(&mut self, point: Point) -> bool {
        let copy_hidden = self.copy_popout.handle_click(point);
        let editor_hidden = self.editor.handle_click(&mut self.document, point);
        copy_hidden || editor_hidden
    }

    pub fn hide_copy_popout(&mut self) {
        self.copy_popout.hide();
    }

    /// Full live tree: introduction container, section rows, and the
    /// trailing controls anchor the rows are inserted before
    pub fn render_editable(&self) -> Result<VNode, EditorError> {
        let surface = &self.config.surface;

        let mut sections = VNode::element("tbody")
            .with_id(&surface.sections_container)
            .with_child(VNode::element("tr").with_id(&surface.trailing_controls));
        for section in &self.document.sections {
            sections.insert_before(&surface.trailing_controls, section.render_editable())?;
        }

        Ok(VNode::element("div")
            .with_id(&surface.root)
            .with_child(
                VNode::element("div")
                    .with_id(&surface.intro_container)
                    .with_child(self.document.introduction.render(RenderMode::Editing)),
            )
            .with_child(
                VNode::element("table")
                    .with_attr("style", &self.config.styles.table)
                    .with_child(sections),
            ))
    }

    pub fn render_editor(&self) -> VNode {
        self.editor.render(&self.document)
    }

    pub fn render_copy_popout(&self) -> VNode {
        self.copy_popout.render()
    }

    /// Assemble the export tree from a fresh template
    pub fn export_tree(&self) -> Result<VNode, EditorError> {
        let template = &self.config.template;
        let mut tree = template.build(&self.config.styles);

        let intro_slot = tree
            .find_by_id_mut(&template.intro_slot)
            .ok_or_else(|| EditorError::MissingSlot(template.intro_slot.clone()))?;
        intro_slot.clear_children();
        intro_slot
            .children_mut()
            .ok_or_else(|| EditorError::MissingSlot(template.intro_slot.clone()))?
            .push(self.document.introduction.render(RenderMode::Final));

        let sections_slot = tree
            .find_by_id_mut(&template.sections_slot)
            .ok_or_else(|| EditorError::MissingSlot(template.sections_slot.clone()))?;
        for section in &self.document.sections {
            sections_slot.insert_before(&template.trailing_slot, section.render_final())?;
        }

        Ok(tree)
    }

    /// Serialize the export tree to the compact HTML fragment users paste
    #[instrument(skip(self), fields(sections = self.document.sections.len()))]
    pub fn export_document(&self) -> Result<String, EditorError> {
        self.export_document_with(CompileOptions::default())
    }

    pub fn export_document_with(&self, options: CompileOptions) -> Result<String, EditorError> {
        let tree = self.export_tree()?;
        let html = compile_to_html(&tree, options)?;
        info!(bytes = html.len(), "Exported document");
        Ok(html)
    }

    /// Export, stage, and copy. Platform failures become the failure message;
    /// the staged buffer is cleared either way.
    pub fn copy_to_clipboard(
        &mut self,
        platform: &mut dyn ClipboardPlatform,
        anchor: Rect,
    ) -> Result<CopyOutcome, EditorError> {
        let export = self.export_document()?;

        let copied = match StagedText::stage(platform, &export).and_then(|mut staged| staged.copy()) {
            Ok(copied) => copied,
            Err(err) => {
                warn!(error = %err, "Clipboard copy failed");
                false
            }
        };

        let outcome = CopyOutcome::new(copied, &self.config.copy_messages, export);
        self.copy_popout
            .show(outcome.clone(), anchor, self.config.popout_offset);
        Ok(outcome)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("sections", &self.section_ids())
            .field("last_issued", &self.last_issued)
            .field("editor", &self.editor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use mailgen_common::collect_ids;
    use std::collections::HashSet;

    fn ids(values: &[u32]) -> Vec<SectionId> {
        values.iter().map(|v| SectionId::new(*v).unwrap()).collect()
    }

    #[test]
    fn test_starts_with_first_section() {
        let generator = Generator::default();
        assert_eq!(generator.section_ids(), ids(&[1]));
        assert!(!generator.sections()[0].is_deletable());
        assert_eq!(generator.introduction().value(), "Enter your introduction here!");
    }

    #[test]
    fn test_deleted_ids_are_never_reissued() {
        let mut generator = Generator::default();
        generator.add_section();
        generator.add_section();
        generator.delete_section(SectionId::new(3).unwrap()).unwrap();

        assert_eq!(generator.add_section().get(), 4);
        generator.delete_section(SectionId::new(4).unwrap()).unwrap();
        generator.delete_section(SectionId::new(2).unwrap()).unwrap();
        assert_eq!(generator.add_section().get(), 5);
        assert_eq!(generator.section_ids(), ids(&[1, 5]));
    }

    #[test]
    fn test_first_section_cannot_be_deleted() {
        let mut generator = Generator::default();
        let result = generator.delete_section(SectionId::FIRST);
        assert!(matches!(result, Err(EditorError::SectionNotDeletable(_))));
        assert_eq!(generator.sections().len(), 1);
    }

    #[test]
    fn test_remove_missing_section_is_noop() {
        let mut generator = Generator::default();
        assert!(!generator.remove_section(SectionId::new(9).unwrap()));
        assert!(matches!(
            generator.delete_section(SectionId::new(9).unwrap()),
            Err(EditorError::SectionNotFound(_))
        ));
    }

    #[test]
    fn test_deleting_section_hides_editor_bound_to_it() {
        let mut generator = Generator::default();
        let id = generator.add_section();
        generator
            .open_field("section2_contentLink", &FieldGeometry::default())
            .unwrap();
        assert!(generator.editor().is_visible());

        generator.delete_section(id).unwrap();

        assert!(!generator.editor().is_visible());
        assert_eq!(generator.editor().bound_field(), None);
    }

    #[test]
    fn test_deleting_other_section_keeps_editor() {
        let mut generator = Generator::default();
        let id = generator.add_section();
        generator
            .open_field("section1_contentImage", &FieldGeometry::default())
            .unwrap();

        generator.delete_section(id).unwrap();

        assert_eq!(generator.editor().bound_field(), Some("section1_contentImage"));
    }

    #[test]
    fn test_edit_and_paste_inline() {
        let mut generator = Generator::default();
        generator.edit_text("introPara", "Hi all,").unwrap();
        generator.paste_into("introPara", " <b>welcome</b> &amp; thanks").unwrap();
        assert_eq!(generator.introduction().value(), "Hi all, welcome & thanks");

        generator.click_inline("section1_contentTitle").unwrap();
        generator.paste_into("section1_contentTitle", "<h1>Launch</h1>").unwrap();
        assert_eq!(generator.sections()[0].title().value(), "Launch");

        assert!(matches!(
            generator.edit_text("section1_contentImage", "x"),
            Err(EditorError::FieldNotFound(_))
        ));
    }

    #[test]
    fn test_paste_into_sub_field_is_single_line() {
        let mut generator = Generator::default();
        generator
            .open_field("section1_contentLink", &FieldGeometry::default())
            .unwrap();

        generator.paste_into("popout_url", "example.com/\r\nnews").unwrap();
        generator.submit_editor().unwrap();

        let link = generator.sections()[0].link();
        assert_eq!(link.value().href(), Some("https://example.com/ news"));
    }

    #[test]
    fn test_sub_field_edit_requires_open_editor() {
        let mut generator = Generator::default();
        assert!(matches!(
            generator.edit_sub_field("URL", "x"),
            Err(EditorError::NoBoundField)
        ));
    }

    #[test]
    fn test_only_one_field_focused() {
        let mut generator = Generator::default();
        generator.open_field("section1_contentImage", &FieldGeometry::default()).unwrap();
        generator.open_field("section1_contentLink", &FieldGeometry::default()).unwrap();

        let section = &generator.sections()[0];
        assert!(!section.image().is_focused());
        assert!(section.link().is_focused());
    }

    #[test]
    fn test_live_tree_ids_are_unique() {
        let mut generator = Generator::default();
        generator.add_section();
        generator.add_section();

        let tree = generator.render_editable().unwrap();
        let all = collect_ids(&tree);
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), unique.len());

        let body = tree.find_by_id("contentSectionsCtn").unwrap();
        let row_ids: Vec<_> = body.children().iter().filter_map(VNode::id).collect();
        assert_eq!(row_ids, vec!["section1_row", "section2_row", "section3_row", "bottomBtns"]);
    }

    #[test]
    fn test_export_places_rows_before_trailing_slot() {
        let mut generator = Generator::default();
        generator.add_section();

        let tree = generator.export_tree().unwrap();
        let body = tree.find_by_id("copyTarget-contentSectionsCtn").unwrap();

        assert_eq!(body.children().len(), 4);
        assert_eq!(body.children()[0].children()[0].id(), Some("copyTarget-introCtn"));
        assert_eq!(body.children()[3].id(), Some("copyTarget-bottomBtns"));
        assert!(body.children()[1].find_by_id("section1_contentTitle").is_some());
        assert!(body.children()[2].find_by_id("section2_contentTitle").is_some());
    }

    #[test]
    fn test_export_is_a_snapshot() {
        let mut generator = Generator::default();
        let before = generator.export_document().unwrap();
        generator.edit_text("introPara", "Changed").unwrap();

        assert!(before.contains("Enter your introduction here!"));
        assert!(!before.contains("Changed"));
        assert!(generator.export_document().unwrap().contains("Changed"));
    }

    #[test]
    fn test_copy_to_clipboard() {
        let mut generator = Generator::default();
        let mut clipboard = MemoryClipboard::new();

        let outcome = generator
            .copy_to_clipboard(&mut clipboard, Rect::new(0.0, 40.0, 100.0, 60.0))
            .unwrap();

        assert!(outcome.copied);
        assert_eq!(clipboard.contents(), Some(outcome.export.as_str()));
        assert_eq!(clipboard.staged(), None);
        assert!(generator.copy_popout().is_visible());
        assert_eq!(generator.copy_popout().position(), Some(Point::new(125.0, 40.0)));
    }

    #[test]
    fn test_copy_failure_is_reported_not_raised() {
        let mut generator = Generator::default();
        let mut clipboard = MemoryClipboard::denying();

        let outcome = generator
            .copy_to_clipboard(&mut clipboard, Rect::default())
            .unwrap();

        assert!(!outcome.copied);
        assert_eq!(outcome.heading, "Uh oh...");
        assert_eq!(clipboard.staged(), None);
        assert!(outcome.export.starts_with("<table id=\"copyTarget\""));
    }

    #[test]
    fn test_click_dismisses_copy_popout() {
        let mut generator = Generator::default();
        let mut clipboard = MemoryClipboard::new();
        generator
            .copy_to_clipboard(&mut clipboard, Rect::default())
            .unwrap();
        generator.set_copy_popout_region(Rect::new(25.0, 0.0, 300.0, 200.0));

        assert!(!generator.click(Point::new(100.0, 100.0)));
        assert!(generator.click(Point::new(500.0, 500.0)));
        assert!(!generator.copy_popout().is_visible());
    }
}
