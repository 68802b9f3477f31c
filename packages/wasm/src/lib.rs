use mailgen_compiler_html::{compile_fragment, CompileOptions};
use mailgen_editor::{
    ClipboardError, ClipboardPlatform, Command, EditorConfig, Generator, Point, Rect, SectionId,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
extern "C" {
    /// Host copy hook: selects a transient buffer holding `text` and runs
    /// the platform copy command
    #[wasm_bindgen(catch, js_name = mailgenCopy)]
    fn mailgen_copy(text: &str) -> Result<bool, JsValue>;
}

/// Clipboard backed by the host page's copy hook
#[derive(Default)]
struct HostClipboard {
    staged: Option<String>,
}

impl ClipboardPlatform for HostClipboard {
    fn stage(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.staged = Some(text.to_string());
        Ok(())
    }

    fn exec_copy(&mut self) -> Result<bool, ClipboardError> {
        let text = self
            .staged
            .as_deref()
            .ok_or_else(|| ClipboardError::Unavailable("nothing staged".to_string()))?;
        mailgen_copy(text).map_err(|e| ClipboardError::CopyFailed(format!("{:?}", e)))
    }

    fn clear_stage(&mut self) {
        self.staged = None;
    }
}

/// One editing session for the host page
#[wasm_bindgen]
pub struct MailEditor {
    generator: Generator,
}

#[wasm_bindgen]
impl MailEditor {
    /// Start a session. `config_json` may be partial; omitted keys default.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<MailEditor, JsValue> {
        Self::create(config_json.as_deref()).map_err(|e| JsValue::from_str(&e))
    }

    /// Apply one serialized command and return the outcome as JSON
    pub fn apply(&mut self, command_json: &str) -> Result<String, JsValue> {
        self.apply_json(command_json).map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = addSection)]
    pub fn add_section(&mut self) -> u32 {
        self.generator.add_section().get()
    }

    #[wasm_bindgen(js_name = deleteSection)]
    pub fn delete_section(&mut self, ordinal: u32) -> Result<(), JsValue> {
        self.delete(ordinal).map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = sectionIds)]
    pub fn section_ids(&self) -> Vec<u32> {
        self.generator
            .section_ids()
            .into_iter()
            .map(SectionId::get)
            .collect()
    }

    /// Live editing tree as JSON
    #[wasm_bindgen(js_name = renderEditable)]
    pub fn render_editable(&self) -> Result<String, JsValue> {
        self.editable_json().map_err(|e| JsValue::from_str(&e))
    }

    /// Popout editor panel and copy popout as an HTML fragment
    #[wasm_bindgen(js_name = renderPanels)]
    pub fn render_panels(&self) -> Result<String, JsValue> {
        self.panels_html().map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = exportDocument)]
    pub fn export_document(&self) -> Result<String, JsValue> {
        self.generator
            .export_document()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Copy the export through the host hook. Returns the outcome as JSON;
    /// a refused copy is reported in the outcome, not thrown.
    #[wasm_bindgen(js_name = copyToClipboard)]
    pub fn copy_to_clipboard(&mut self, left: f64, top: f64, right: f64, bottom: f64) -> Result<String, JsValue> {
        let mut clipboard = HostClipboard::default();
        self.generator
            .copy_to_clipboard(&mut clipboard, Rect::new(left, top, right, bottom))
            .map_err(|e| e.to_string())
            .and_then(|outcome| serde_json::to_string(&outcome).map_err(|e| e.to_string()))
            .map_err(|e| JsValue::from_str(&e))
    }

    /// The copy popout's Done control
    #[wasm_bindgen(js_name = hideCopyPopout)]
    pub fn hide_copy_popout(&mut self) {
        self.generator.hide_copy_popout();
    }

    #[wasm_bindgen(js_name = setEditorRegion)]
    pub fn set_editor_region(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        self.generator
            .set_editor_region(Rect::new(left, top, right, bottom));
    }

    #[wasm_bindgen(js_name = setCopyPopoutRegion)]
    pub fn set_copy_popout_region(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        self.generator
            .set_copy_popout_region(Rect::new(left, top, right, bottom));
    }

    #[wasm_bindgen(js_name = setFieldRegion)]
    pub fn set_field_region(&mut self, field_id: &str, left: f64, top: f64, right: f64, bottom: f64) -> Result<(), JsValue> {
        self.generator
            .set_field_region(field_id, Rect::new(left, top, right, bottom))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Document-wide click; true when a panel was dismissed
    pub fn click(&mut self, x: f64, y: f64) -> bool {
        self.generator.click(Point::new(x, y))
    }
}

impl MailEditor {
    fn create(config_json: Option<&str>) -> Result<Self, String> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(json).map_err(|e| e.to_string())?,
            None => EditorConfig::default(),
        };
        Ok(Self {
            generator: Generator::new(config),
        })
    }

    fn apply_json(&mut self, command_json: &str) -> Result<String, String> {
        let command: Command = serde_json::from_str(command_json)
            .map_err(|e| format!("Invalid command: {}", e))?;
        let outcome = self.generator.apply(command).map_err(|e| e.to_string())?;
        serde_json::to_string(&outcome).map_err(|e| e.to_string())
    }

    fn delete(&mut self, ordinal: u32) -> Result<(), String> {
        let id = SectionId::new(ordinal).map_err(|e| e.to_string())?;
        self.generator.delete_section(id).map_err(|e| e.to_string())
    }

    fn editable_json(&self) -> Result<String, String> {
        let tree = self.generator.render_editable().map_err(|e| e.to_string())?;
        serde_json::to_string(&tree).map_err(|e| e.to_string())
    }

    fn panels_html(&self) -> Result<String, String> {
        compile_fragment(
            &[
                self.generator.render_editor(),
                self.generator.render_copy_popout(),
            ],
            CompileOptions::default(),
        )
        .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_with_partial_config() {
        let editor = MailEditor::create(Some(r#"{"placeholders": {"introduction": "Hey!"}}"#)).unwrap();
        let html = editor.generator.export_document().unwrap();
        assert!(html.contains(">Hey!</p>"));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let err = MailEditor::create(Some("{ nope")).err().unwrap();
        assert!(err.starts_with("Config error"));
    }

    #[test]
    fn test_apply_json_round_trip() {
        let mut editor = MailEditor::create(None).unwrap();

        let outcome = editor.apply_json(r#"{"type": "addSection"}"#).unwrap();
        assert_eq!(outcome, r#"{"kind":"sectionAdded","section":2}"#);
        assert_eq!(editor.section_ids(), vec![1, 2]);

        let err = editor.apply_json(r#"{"type": "deleteSection", "section": 1}"#).unwrap_err();
        assert_eq!(err, "Section 1 cannot be deleted");
    }

    #[test]
    fn test_delete_rejects_zero() {
        let mut editor = MailEditor::create(None).unwrap();
        assert!(editor.delete(0).unwrap_err().starts_with("Invalid section ordinal"));
    }

    #[test]
    fn test_editable_tree_is_json() {
        let editor = MailEditor::create(None).unwrap();
        let json = editor.editable_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "Element");
        assert_eq!(value["id"], "generator");
    }

    #[test]
    fn test_panels_start_hidden() {
        let editor = MailEditor::create(None).unwrap();
        let html = editor.panels_html().unwrap();
        assert!(html.starts_with("<div id=\"popoutEditor\" class=\"popoutCtn popoutEditor hide\">"));
        assert!(html.contains("id=\"copyPopout\""));
    }
}
