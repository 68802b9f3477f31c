use crate::config::config_path;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailgen_editor::{EditorConfig, DEFAULT_CONFIG_NAME};
use std::fs;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let path = config_path(cwd);

    if path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Writing default editor config...".bright_blue().bold());

    let config_json = EditorConfig::default().to_json_pretty()?;
    fs::write(&path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Next steps:");
    println!("  1. Edit placeholders and styles in {}", DEFAULT_CONFIG_NAME);
    println!("  2. Run: mailgen preview");
    println!("  3. Run: mailgen export --out email.html");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_respects_force() {
        let dir = std::env::temp_dir().join(format!("mailgen-init-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let cwd = dir.to_str().unwrap();
        let path = config_path(cwd);
        fs::write(&path, "{}").unwrap();

        init(InitArgs { force: false }, cwd).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");

        init(InitArgs { force: true }, cwd).unwrap();
        let written = EditorConfig::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, EditorConfig::default());
    }
}
