//! Error types for the editor

use crate::section::SectionId;
use mailgen_common::CommonError;
use mailgen_compiler_html::CompileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid section ordinal: {0:?}")]
    InvalidOrdinal(String),

    #[error("Field {field} has no sub-field named {key:?}")]
    SubFieldNotFound { field: String, key: String },

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(SectionId),

    #[error("Section {0} cannot be deleted")]
    SectionNotDeletable(SectionId),

    #[error("No field is bound to the popout editor")]
    NoBoundField,

    #[error("Export template is missing slot: {0}")]
    MissingSlot(String),

    #[error("Tree error: {0}")]
    Tree(#[from] CommonError),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
