use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailgen_compiler_html::{compile_fragment, CompileOptions};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// JSON command script to replay before rendering
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Emit the node trees as JSON instead of HTML
    #[arg(long)]
    pub json: bool,
}

/// Render the live editing surface together with both popout panels
pub fn preview(args: PreviewArgs, cwd: &str) -> Result<()> {
    let generator = super::load_session(cwd, args.script.as_deref())?;

    let nodes = vec![
        generator.render_editable()?,
        generator.render_editor(),
        generator.render_copy_popout(),
    ];
    let output = if args.json {
        serde_json::to_string_pretty(&nodes)?
    } else {
        compile_fragment(&nodes, CompileOptions::pretty())?
    };

    if let Some(path) = super::emit(cwd, args.out.as_deref(), &output)? {
        println!("  {} Wrote preview → {}", "✓".green(), path.display());
    }
    Ok(())
}
