//! # Mailgen Editor
//!
//! Editable-component model for assembling a marketing email and exporting
//! it as pasteable HTML.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: UI events → Command                   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Generator                           │
//! │  - Introduction + ordered ContentSections   │
//! │  - Inline fields edited in place            │
//! │  - Compound fields edited via PopoutEditor  │
//! │  - Copy to clipboard + copy popout          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ common: VNode tree (editing or final)       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: VNode → HTML fragment        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Field state is the source of truth**: both renderings are built fresh
//!    from it, so an exported tree never changes after the fact
//! 2. **One bound field**: the popout editor holds at most one field id and
//!    releases it before binding another
//! 3. **Saves never clear**: an empty sub-field leaves its target as it was
//! 4. **Ids are never reused**: a new section takes one past the highest id
//!    issued in the session
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailgen_editor::{Command, EditorConfig, Generator};
//!
//! let mut generator = Generator::new(EditorConfig::default());
//!
//! generator.apply(Command::AddSection)?;
//! generator.apply(Command::EditText {
//!     field: "section2_contentTitle".to_string(),
//!     value: "Spring Launch".to_string(),
//! })?;
//!
//! let html = generator.export_document()?;
//! ```

mod clipboard;
mod commands;
mod compound;
mod config;
mod editable;
mod errors;
mod generator;
mod inline;
pub mod paste;
mod popout_editor;
mod popout_field;
mod save_rule;
mod section;

pub use clipboard::{
    ClipboardError, ClipboardPlatform, CopyOutcome, CopyPopout, MemoryClipboard, StagedText,
    COPY_DONE_ID, COPY_POPOUT_ID,
};
pub use commands::{Command, CommandOutcome};
pub use compound::{CompoundField, CompoundKind, RenderedValue, POPOUT_EDIT_CLASS, POPOUT_FOCUS_CLASS};
pub use config::{
    CopyMessages, EditingSurface, EditorConfig, ExportTemplate, Placeholders, Styles,
    DEFAULT_CONFIG_NAME,
};
pub use editable::{Editable, InlineEditable, PopoutEditable, RenderMode};
pub use errors::EditorError;
pub use generator::{EmailDocument, Generator};
pub use inline::{InlineField, TagKind, EDITABLE_CLASS};
pub use popout_editor::{
    save_field, EditorRow, FieldRegistry, PopoutEditor, SaveHandler, CANCEL_BUTTON_ID, EDITOR_ID,
    SAVE_BUTTON_ID,
};
pub use popout_field::PopoutField;
pub use save_rule::{normalize_url, ImageSaveRule, LinkSaveRule, SaveRule, SubFieldValues};
pub use section::{ContentSection, SectionId, SectionSlot};

// Re-export common types for convenience
pub use mailgen_common::{FieldGeometry, Point, Rect, VNode};
pub use mailgen_compiler_html::CompileOptions;
