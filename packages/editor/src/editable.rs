//! # Editable Capabilities
//!
//! Every field renders twice: once as the live editing tree and once as the
//! final export tree. The traits here split fields by how they are edited.
//!
//! - [`InlineEditable`]: click-to-edit text, changed in place
//! - [`PopoutEditable`]: a value assembled from named sub-fields, changed
//!   through the popout editor

use crate::{EditorError, PopoutField};
use mailgen_common::{FieldGeometry, Point, VNode};
use std::ops::Range;

/// Which of the two renderings to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Live tree with editing affordances
    Editing,
    /// Export tree, no affordances
    Final,
}

/// Shared by every field kind
pub trait Editable {
    /// Element id, unique across the whole document
    fn id(&self) -> &str;

    /// Build a fresh tree for this field.
    ///
    /// The result never aliases field state, so later edits cannot change a
    /// tree that was already handed out.
    fn render(&self, mode: RenderMode) -> VNode;
}

/// Click-to-edit text field
pub trait InlineEditable: Editable {
    /// Current text, verbatim
    fn value(&self) -> &str;

    /// Replace the whole value
    fn set_value(&mut self, value: String);

    /// A click on the live field selects its entire content
    fn click(&mut self) -> Range<usize>;

    /// Insert text at the current selection (replacing it), or append
    fn insert_text(&mut self, text: &str);
}

/// Field whose value is composed from several named sub-fields
pub trait PopoutEditable: Editable {
    /// Sub-fields in display order; the key set never changes
    fn sub_fields(&self) -> &[PopoutField];

    fn sub_field_mut(&mut self, key: &str) -> Result<&mut PopoutField, EditorError>;

    /// Live value of a sub-field. Unknown keys are a programming error.
    fn sub_field_value(&self, key: &str) -> Result<&str, EditorError>;

    /// Mark focused, remember the clickable region, return the panel anchor
    fn open(&mut self, geometry: &FieldGeometry, offset: f64) -> Point;

    /// Apply the sub-field values; returns the names of updated targets
    fn save(&mut self) -> Result<Vec<&'static str>, EditorError>;

    /// Drop the focus indicator
    fn click_off(&mut self);

    /// Whether the click landed inside this field's edit wrapper
    fn was_clicked(&self, point: Point) -> bool;

    fn is_focused(&self) -> bool;
}
