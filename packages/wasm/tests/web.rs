//! Browser tests for the wasm bindings.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use mailgen_wasm::MailEditor;

#[wasm_bindgen_test]
fn test_new_with_default_config() {
    let editor = MailEditor::new(None).unwrap();
    assert_eq!(editor.section_ids(), vec![1]);
}

#[wasm_bindgen_test]
fn test_new_with_partial_config() {
    let editor =
        MailEditor::new(Some(r#"{"placeholders": {"introduction": "Hey!"}}"#.to_string())).unwrap();
    assert!(editor.export_document().unwrap().contains(">Hey!</p>"));
}

#[wasm_bindgen_test]
fn test_new_rejects_malformed_config() {
    let err = MailEditor::new(Some("{ nope".to_string())).err().unwrap();
    assert!(err.as_string().unwrap().starts_with("Config error"));
}

#[wasm_bindgen_test]
fn test_section_ids_not_reissued() {
    let mut editor = MailEditor::new(None).unwrap();
    let added = editor.add_section();
    editor.delete_section(added).unwrap();
    assert_eq!(editor.add_section(), added + 1);
}
