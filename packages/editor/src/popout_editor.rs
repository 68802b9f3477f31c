//! # Popout Editor
//!
//! The floating panel that edits one compound field at a time.
//!
//! The editor never owns the field it edits. It keeps the bound field's id
//! and reaches the field through a [`FieldRegistry`] passed into each call.
//! The sub-field values it shows and edits stay inside the field.

use crate::editable::PopoutEditable;
use crate::EditorError;
use mailgen_common::{was_inside_interactive_region, Point, Rect, VNode};
use tracing::debug;

/// Resolves field ids to compound fields
pub trait FieldRegistry {
    fn popout(&self, id: &str) -> Option<&dyn PopoutEditable>;

    fn popout_mut(&mut self, id: &str) -> Option<&mut dyn PopoutEditable>;
}

/// Action run when the editor form is submitted
pub type SaveHandler = fn(&mut dyn PopoutEditable) -> Result<Vec<&'static str>, EditorError>;

/// Default save action: apply the field's own save rule
pub fn save_field(field: &mut dyn PopoutEditable) -> Result<Vec<&'static str>, EditorError> {
    field.save()
}

/// One label/value row in the editor form
#[derive(Debug, Clone, PartialEq)]
pub struct EditorRow {
    pub key: String,
    pub input_id: String,
}

pub const EDITOR_ID: &str = "popoutEditor";
pub const SAVE_BUTTON_ID: &str = "popoutSave";
pub const CANCEL_BUTTON_ID: &str = "popoutCancel";

#[derive(Default)]
pub struct PopoutEditor {
    bound: Option<String>,
    visible: bool,
    position: Option<Point>,
    rows: Vec<EditorRow>,
    save_handler: Option<SaveHandler>,
    /// Panel bounds, as last reported by the host
    region: Option<Rect>,
}

impl std::fmt::Debug for PopoutEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopoutEditor")
            .field("bound", &self.bound)
            .field("visible", &self.visible)
            .field("position", &self.position)
            .field("rows", &self.rows)
            .field("has_save_handler", &self.save_handler.is_some())
            .finish()
    }
}

impl PopoutEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bound_field(&self) -> Option<&str> {
        self.bound.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn rows(&self) -> &[EditorRow] {
        &self.rows
    }

    pub fn has_save_handler(&self) -> bool {
        self.save_handler.is_some()
    }

    pub fn set_region(&mut self, region: Rect) {
        self.region = Some(region);
    }

    /// Bind `field_id`, releasing whichever field was bound before.
    ///
    /// Rows are rebuilt from the new field's sub-fields, in order.
    pub fn bind<R: FieldRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        field_id: &str,
        on_save: SaveHandler,
    ) -> Result<(), EditorError> {
        if registry.popout(field_id).is_none() {
            return Err(EditorError::FieldNotFound(field_id.to_string()));
        }

        self.rows.clear();
        if let Some(previous) = self.bound.take() {
            if let Some(field) = registry.popout_mut(&previous) {
                field.click_off();
            }
        }

        let field = registry
            .popout(field_id)
            .ok_or_else(|| EditorError::FieldNotFound(field_id.to_string()))?;
        self.rows = field
            .sub_fields()
            .iter()
            .map(|sub| EditorRow {
                key: sub.key().to_string(),
                input_id: sub.input_id().to_string(),
            })
            .collect();
        self.bound = Some(field_id.to_string());
        self.save_handler = Some(on_save);

        debug!(field = %field_id, rows = self.rows.len(), "Bound popout editor");
        Ok(())
    }

    pub fn show(&mut self, x: f64, y: f64) {
        self.position = Some(Point::new(x, y));
        self.visible = true;
    }

    /// Hide the panel, release the bound field, and drop rows and handler
    pub fn hide<R: FieldRegistry + ?Sized>(&mut self, registry: &mut R) {
        self.visible = false;
        if let Some(field_id) = self.bound.take() {
            if let Some(field) = registry.popout_mut(&field_id) {
                field.click_off();
            }
            debug!(field = %field_id, "Released popout editor");
        }
        self.rows.clear();
        self.save_handler = None;
    }

    /// Run the save handler on the bound field, then hide.
    ///
    /// Returns the names of the targets the save updated.
    pub fn submit<R: FieldRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
    ) -> Result<Vec<&'static str>, EditorError> {
        let outcome = match (self.save_handler, self.bound.as_deref()) {
            (Some(handler), Some(field_id)) => {
                let field = registry
                    .popout_mut(field_id)
                    .ok_or_else(|| EditorError::FieldNotFound(field_id.to_string()))?;
                handler(field)
            }
            _ => Ok(Vec::new()),
        };
        self.hide(registry);
        outcome
    }

    /// Enter inside the form submits instead of inserting a line break.
    ///
    /// `Ok(None)` means the key was not handled.
    pub fn handle_key<R: FieldRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
        key: &str,
    ) -> Result<Option<Vec<&'static str>>, EditorError> {
        if self.visible && key == "Enter" {
            return self.submit(registry).map(Some);
        }
        Ok(None)
    }

    /// Document-wide click. Hides unless the click landed in the panel or
    /// in the bound field's edit wrapper. Returns whether it hid.
    pub fn handle_click<R: FieldRegistry + ?Sized>(&mut self, registry: &mut R, point: Point) -> bool {
        if !self.visible {
            return false;
        }

        let in_panel = was_inside_interactive_region(point, self.region.as_slice());
        let in_field = match self.bound.as_deref() {
            Some(id) => registry
                .popout(id)
                .is_some_and(|field| field.was_clicked(point)),
            None => false,
        };

        if in_panel || in_field {
            return false;
        }
        self.hide(registry);
        true
    }

    /// Build the panel tree: one label/value pair per row, then Save and Cancel
    pub fn render<R: FieldRegistry + ?Sized>(&self, registry: &R) -> VNode {
        let mut form = VNode::element("form");

        if let Some(field) = self.bound.as_deref().and_then(|id| registry.popout(id)) {
            for row in &self.rows {
                if let Some(sub) = field.sub_fields().iter().find(|s| s.key() == row.key) {
                    form = form
                        .with_child(sub.render_label())
                        .with_child(sub.render_input());
                }
            }
        }

        form = form
            .with_child(
                VNode::element("input")
                    .with_id(SAVE_BUTTON_ID)
                    .with_class("standardBtn")
                    .with_attr("type", "submit")
                    .with_attr("value", "Save"),
            )
            .with_child(
                VNode::element("button")
                    .with_id(CANCEL_BUTTON_ID)
                    .with_class("standardBtn")
                    .with_attr("type", "button")
                    .with_child(VNode::text("Cancel")),
            );

        let mut panel = VNode::element("div")
            .with_id(EDITOR_ID)
            .with_class("popoutCtn")
            .with_class("popoutEditor");
        if !self.visible {
            panel = panel.with_class("hide");
        }
        if let Some(position) = self.position {
            panel = panel.with_attr(
                "style",
                format!("top: {}px; left: {}px;", position.y, position.x),
            );
        }
        panel.with_child(form)
    }
}
