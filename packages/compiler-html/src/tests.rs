use crate::{compile_fragment, compile_to_html, CompileError, CompileOptions};
use mailgen_common::VNode;

fn section_row() -> VNode {
    VNode::element("tr").with_child(
        VNode::element("td")
            .with_attr("style", "border-bottom: 3px solid #ddd;")
            .with_child(
                VNode::element("h2")
                    .with_id("section1_contentType")
                    .with_child(VNode::text("Section 1 Content Type")),
            )
            .with_child(
                VNode::element("img")
                    .with_id("section1_contentImage")
                    .with_attr("src", "./images/placeholder.gif"),
            ),
    )
}

#[test]
fn test_compile_compact_row() {
    let html = compile_to_html(&section_row(), CompileOptions::default()).expect("Failed to compile");

    assert_eq!(
        html,
        "<tr><td style=\"border-bottom: 3px solid #ddd;\">\
         <h2 id=\"section1_contentType\">Section 1 Content Type</h2>\
         <img id=\"section1_contentImage\" src=\"./images/placeholder.gif\">\
         </td></tr>"
    );
}

#[test]
fn test_compile_pretty_row() {
    let html = compile_to_html(&section_row(), CompileOptions::pretty()).expect("Failed to compile");

    println!("Generated HTML:\n{}", html);

    let lines: Vec<&str> = html.lines().collect();
    assert_eq!(lines[0], "<tr>");
    assert_eq!(lines[1], "  <td style=\"border-bottom: 3px solid #ddd;\">");
    assert_eq!(lines[2], "    <h2 id=\"section1_contentType\">Section 1 Content Type</h2>");
    assert_eq!(lines[3], "    <img id=\"section1_contentImage\" src=\"./images/placeholder.gif\">");
    assert_eq!(lines[4], "  </td>");
    assert_eq!(lines[5], "</tr>");
    assert!(!html.ends_with('\n'));
}

#[test]
fn test_self_closing_void_option() {
    let options = CompileOptions {
        self_closing_void: true,
        ..Default::default()
    };
    let html = compile_to_html(&VNode::element("img").with_attr("src", "a.png"), options).unwrap();
    assert_eq!(html, "<img src=\"a.png\" />");
}

#[test]
fn test_escapes_text_and_attributes() {
    let node = VNode::element("a")
        .with_attr("href", "https://example.com/?a=1&b=\"2\"")
        .with_attr("title", "it's")
        .with_child(VNode::text("Tom & Jerry <3"));

    let html = compile_to_html(&node, CompileOptions::default()).unwrap();

    assert_eq!(
        html,
        "<a href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\" title=\"it&#39;s\">Tom &amp; Jerry &lt;3</a>"
    );
}

#[test]
fn test_classes_and_id_precede_attributes() {
    let node = VNode::element("p")
        .with_attr("contenteditable", "true")
        .with_class("editable")
        .with_id("introPara");

    let html = compile_to_html(&node, CompileOptions::default()).unwrap();
    assert_eq!(
        html,
        "<p id=\"introPara\" class=\"editable\" contenteditable=\"true\"></p>"
    );
}

#[test]
fn test_fragment_of_siblings() {
    let nodes = vec![
        VNode::element("p").with_child(VNode::text("one")),
        VNode::comment(" divider "),
        VNode::element("p").with_child(VNode::text("two")),
    ];
    let html = compile_fragment(&nodes, CompileOptions::default()).unwrap();
    assert_eq!(html, "<p>one</p><!-- divider --><p>two</p>");
}

#[test]
fn test_comment_with_double_dash_fails() {
    let result = compile_to_html(&VNode::comment("a -- b"), CompileOptions::default());
    assert!(matches!(result, Err(CompileError::InvalidComment(_))));
}

#[test]
fn test_invalid_tag_name_fails() {
    let result = compile_to_html(&VNode::element("bad tag"), CompileOptions::default());
    assert!(matches!(result, Err(CompileError::InvalidTagName(_))));
}
