//! # Mailgen HTML Compiler
//!
//! Serializes export trees into the HTML fragment that gets pasted into the
//! mail-sending tool. Compact output by default, matching what a browser
//! produces for `outerHTML`.

mod compiler;

#[cfg(test)]
mod tests;

pub use compiler::{compile_fragment, compile_to_html, CompileError, CompileOptions};
