use mailgen_common::VNode;
use thiserror::Error;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Invalid comment: {0}")]
    InvalidComment(String),

    #[error("Invalid tag name: {0}")]
    InvalidTagName(String),
}

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Emit `<img ... />` instead of `<img ...>` for void elements
    pub self_closing_void: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
            self_closing_void: false,
        }
    }
}

impl CompileOptions {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Default::default()
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_indent(&mut self) {
        if !self.options.pretty {
            return;
        }
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn add_newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a single node (and its subtree) to HTML
pub fn compile_to_html(node: &VNode, options: CompileOptions) -> Result<String, CompileError> {
    compile_fragment(std::slice::from_ref(node), options)
}

/// Compile sibling nodes to one HTML fragment
pub fn compile_fragment(nodes: &[VNode], options: CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);
    for node in nodes {
        compile_node(node, &mut ctx)?;
    }
    let mut output = ctx.get_output();
    if output.ends_with('\n') {
        output.pop();
    }
    Ok(output)
}

fn compile_node(node: &VNode, ctx: &mut Context) -> Result<(), CompileError> {
    match node {
        VNode::Element {
            tag,
            id,
            classes,
            attributes,
            children,
        } => compile_tag(tag, id.as_deref(), classes, attributes, children, ctx),

        VNode::Text { content } => {
            ctx.add(&escape_text(content));
            Ok(())
        }

        VNode::Comment { content } => {
            if content.contains("--") {
                return Err(CompileError::InvalidComment(content.clone()));
            }
            ctx.add_indent();
            ctx.add(&format!("<!--{}-->", content));
            ctx.add_newline();
            Ok(())
        }
    }
}

fn compile_tag(
    name: &str,
    id: Option<&str>,
    classes: &[String],
    attributes: &[(String, String)],
    children: &[VNode],
    ctx: &mut Context,
) -> Result<(), CompileError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(CompileError::InvalidTagName(name.to_string()));
    }

    // Opening tag
    ctx.add_indent();
    ctx.add(&format!("<{}", name));

    if let Some(id) = id {
        compile_attribute("id", id, ctx);
    }
    if !classes.is_empty() {
        compile_attribute("class", &classes.join(" "), ctx);
    }
    for (attr_name, value) in attributes {
        compile_attribute(attr_name, value, ctx);
    }

    if is_void(name) {
        ctx.add(if ctx.options.self_closing_void { " />" } else { ">" });
        ctx.add_newline();
        return Ok(());
    }

    ctx.add(">");

    // Children
    let block = has_element_children(children);
    if block {
        ctx.add_newline();
    }
    ctx.indent();
    for child in children {
        compile_node(child, ctx)?;
    }
    ctx.dedent();
    if block {
        ctx.add_indent();
    }

    // Closing tag
    ctx.add(&format!("</{}>", name));
    ctx.add_newline();

    Ok(())
}

fn compile_attribute(name: &str, value: &str, ctx: &mut Context) {
    ctx.add(" ");
    ctx.add(name);
    ctx.add("=\"");
    ctx.add(&escape_attribute(value));
    ctx.add("\"");
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(text: &str) -> String {
    escape_text(text)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children.iter().any(|child| !matches!(child, VNode::Text { .. }))
}
