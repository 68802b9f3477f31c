//! # Editor Configuration
//!
//! Placeholder text, inline styles, and the ids of the host page anchors.
//! Every field has a default, so a partial JSON file only overrides what it
//! names.

use crate::EditorError;
use mailgen_common::VNode;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_NAME: &str = "mailgen.config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub placeholders: Placeholders,
    pub styles: Styles,
    pub surface: EditingSurface,
    pub template: ExportTemplate,
    pub copy_messages: CopyMessages,
    /// Horizontal gap between a section and the popout panel, in pixels
    pub popout_offset: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholders: Placeholders::default(),
            styles: Styles::default(),
            surface: EditingSurface::default(),
            template: ExportTemplate::default(),
            copy_messages: CopyMessages::default(),
            popout_offset: 25.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Default values shown in untouched fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Placeholders {
    pub introduction: String,
    pub content_type: String,
    pub title: String,
    pub image_src: String,
    pub image_alt: String,
    pub blurb: String,
    pub link_text: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            introduction: "Enter your introduction here!".to_string(),
            content_type: "Content Type".to_string(),
            title: "Content Title".to_string(),
            image_src: "./images/placeholder.gif".to_string(),
            image_alt: "Placeholder Image. Click to edit.".to_string(),
            blurb: "This is the blurb".to_string(),
            link_text: "Learn More".to_string(),
        }
    }
}

/// Inline CSS carried into the exported email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Styles {
    pub table: String,
    pub intro_cell: String,
    pub section_cell: String,
    pub heading_container: String,
    pub content_type: String,
    pub title: String,
    pub image: String,
    pub blurb: String,
    pub link_container: String,
    pub link: String,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            table: "font-family: Helvetica Neue, Helvetica, Arial, sans-serif;color: #333333; font-size:16px;".to_string(),
            intro_cell: "padding: 20px;".to_string(),
            section_cell: "border-bottom: 3px solid #ddd; position: relative;".to_string(),
            heading_container: "margin: 20px; width: 80%;".to_string(),
            content_type: "font-family: 'Helvetica', sans-serif; font-weight: normal; font-size: 16px; margin: 0; color: #888;".to_string(),
            title: "font-family: 'Helvetica', sans-serif; font-weight: normal; font-size: 24px; margin: 0; margin-top: 5px; color: #333;".to_string(),
            image: "max-width: 100%;  text-align: center; margin-left: auto; margin-right: auto;".to_string(),
            blurb: "margin:0;padding-top:7px;padding-bottom:7px;padding: 20px;".to_string(),
            link_container: "margin:0;padding-top:7px;padding-bottom:7px;;padding-left: 20px; padding-bottom: 20px; color: blue;".to_string(),
            link: "color: inherit; text-decoration: none;".to_string(),
        }
    }
}

/// Ids of the live editing surface the host page mounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditingSurface {
    pub root: String,
    pub intro_container: String,
    pub sections_container: String,
    pub trailing_controls: String,
    pub introduction_field: String,
}

impl Default for EditingSurface {
    fn default() -> Self {
        Self {
            root: "generator".to_string(),
            intro_container: "introCtn".to_string(),
            sections_container: "contentSectionsCtn".to_string(),
            trailing_controls: "bottomBtns".to_string(),
            introduction_field: "introPara".to_string(),
        }
    }
}

/// The table skeleton the export is assembled into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportTemplate {
    pub root_id: String,
    pub intro_slot: String,
    pub sections_slot: String,
    pub trailing_slot: String,
    pub width: String,
}

impl Default for ExportTemplate {
    fn default() -> Self {
        Self {
            root_id: "copyTarget".to_string(),
            intro_slot: "copyTarget-introCtn".to_string(),
            sections_slot: "copyTarget-contentSectionsCtn".to_string(),
            trailing_slot: "copyTarget-bottomBtns".to_string(),
            width: "600".to_string(),
        }
    }
}

impl ExportTemplate {
    /// Fresh, empty template: one intro row, then the trailing slot row
    pub fn build(&self, styles: &Styles) -> VNode {
        let intro_row = VNode::element("tr").with_child(
            VNode::element("td")
                .with_id(&self.intro_slot)
                .with_attr("style", &styles.intro_cell),
        );
        let trailing_row = VNode::element("tr").with_id(&self.trailing_slot);

        VNode::element("table")
            .with_id(&self.root_id)
            .with_attr("align", "center")
            .with_attr("cellpadding", "0")
            .with_attr("cellspacing", "0")
            .with_attr("border", "0")
            .with_attr("width", &self.width)
            .with_attr("style", &styles.table)
            .with_child(
                VNode::element("tbody")
                    .with_id(&self.sections_slot)
                    .with_child(intro_row)
                    .with_child(trailing_row),
            )
    }
}

/// Text shown in the copy popout after a clipboard attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CopyMessages {
    pub success_heading: String,
    pub success_message: String,
    pub failure_heading: String,
    pub failure_message: String,
}

impl Default for CopyMessages {
    fn default() -> Self {
        Self {
            success_heading: "Email content copied!".to_string(),
            success_message: "You can now paste the email content into GRS.".to_string(),
            failure_heading: "Uh oh...".to_string(),
            failure_message: "We couldn't copy the email content. Try again or manually copy the content below".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{
            "placeholders": { "introduction": "Hello team!" },
            "popoutOffset": 40
        }"#;

        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.placeholders.introduction, "Hello team!");
        assert_eq!(config.placeholders.link_text, "Learn More");
        assert_eq!(config.popout_offset, 40.0);
        assert_eq!(config.template.root_id, "copyTarget");
    }

    #[test]
    fn test_default_config_roundtrips_through_json() {
        let config = EditorConfig::default();
        let json = config.to_json_pretty().unwrap();
        assert!(json.contains("\"imageSrc\""));
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let result = EditorConfig::from_json("{ not json");
        assert!(matches!(result, Err(EditorError::Config(_))));
    }

    #[test]
    fn test_template_slots_present() {
        let template = ExportTemplate::default();
        let tree = template.build(&Styles::default());

        assert!(tree.find_by_id(&template.intro_slot).is_some());
        assert!(tree.find_by_id(&template.sections_slot).is_some());
        assert!(tree.find_by_id(&template.trailing_slot).is_some());
        assert_eq!(tree.attr("width"), Some("600"));
    }
}
