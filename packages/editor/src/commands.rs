//! # Commands
//!
//! Every UI event the host forwards, as data. The same stream drives the
//! wasm host, the CLI's script replay, and the integration tests.

use crate::generator::Generator;
use crate::section::SectionId;
use crate::EditorError;
use mailgen_common::{FieldGeometry, Point};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Append a section before the trailing controls
    AddSection,

    /// Delete a section (never the first)
    DeleteSection { section: SectionId },

    /// Replace the text of an inline field
    EditText { field: String, value: String },

    /// Paste into an inline field or an open sub-field input
    Paste { target: String, content: String },

    /// Click on a compound field's edit wrapper
    OpenField {
        field: String,
        #[serde(default)]
        geometry: FieldGeometry,
    },

    /// Type into a sub-field of the open editor
    EditSubField { key: String, value: String },

    /// Save control of the popout editor
    Submit,

    /// Cancel control of the popout editor
    Cancel,

    /// Document-wide click
    Click { x: f64, y: f64 },

    KeyDown { key: String },
}

/// What applying a command did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CommandOutcome {
    SectionAdded { section: SectionId },
    SectionDeleted { section: SectionId },
    FieldEdited { field: String },
    EditorOpened { x: f64, y: f64 },
    Saved { updated: Vec<String> },
    Dismissed { hidden: bool },
    Ignored,
}

impl Generator {
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, EditorError> {
        debug!(command = ?command, "Applying command");

        let outcome = match command {
            Command::AddSection => CommandOutcome::SectionAdded {
                section: self.add_section(),
            },
            Command::DeleteSection { section } => {
                self.delete_section(section)?;
                CommandOutcome::SectionDeleted { section }
            }
            Command::EditText { field, value } => {
                self.edit_text(&field, value)?;
                CommandOutcome::FieldEdited { field }
            }
            Command::Paste { target, content } => {
                self.paste_into(&target, &content)?;
                CommandOutcome::FieldEdited { field: target }
            }
            Command::OpenField { field, geometry } => {
                let Point { x, y } = self.open_field(&field, &geometry)?;
                CommandOutcome::EditorOpened { x, y }
            }
            Command::EditSubField { key, value } => {
                self.edit_sub_field(&key, value)?;
                CommandOutcome::FieldEdited { field: key }
            }
            Command::Submit => saved(self.submit_editor()?),
            Command::Cancel => {
                let was_open = self.editor().is_visible();
                self.cancel_editor();
                CommandOutcome::Dismissed { hidden: was_open }
            }
            Command::Click { x, y } => CommandOutcome::Dismissed {
                hidden: self.click(Point::new(x, y)),
            },
            Command::KeyDown { key } => match self.key_down(&key)? {
                Some(updated) => saved(updated),
                None => CommandOutcome::Ignored,
            },
        };
        Ok(outcome)
    }

    /// Apply commands in order, stopping at the first failure
    pub fn replay(
        &mut self,
        commands: impl IntoIterator<Item = Command>,
    ) -> Result<Vec<CommandOutcome>, EditorError> {
        commands
            .into_iter()
            .map(|command| self.apply(command))
            .collect()
    }
}

fn saved(updated: Vec<&'static str>) -> CommandOutcome {
    CommandOutcome::Saved {
        updated: updated.into_iter().map(String::from).collect(),
    }
}
