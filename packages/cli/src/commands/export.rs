use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailgen_compiler_html::CompileOptions;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// JSON command script to replay before exporting
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Indent the HTML instead of emitting the compact fragment
    #[arg(long)]
    pub pretty: bool,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let generator = super::load_session(cwd, args.script.as_deref())?;

    let options = if args.pretty {
        CompileOptions::pretty()
    } else {
        CompileOptions::default()
    };
    let html = generator.export_document_with(options)?;

    if let Some(path) = super::emit(cwd, args.out.as_deref(), &html)? {
        println!(
            "  {} Exported {} sections → {}",
            "✓".green(),
            generator.sections().len(),
            path.display()
        );
    }
    Ok(())
}
