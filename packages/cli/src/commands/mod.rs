pub mod export;
pub mod init;
pub mod preview;

pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use preview::{preview, PreviewArgs};

use anyhow::{Context, Result};
use mailgen_editor::{Command, Generator};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Start a session from the working directory's config and replay the
/// optional command script into it
pub(crate) fn load_session(cwd: &str, script: Option<&Path>) -> Result<Generator> {
    let config = crate::config::load(cwd)?;
    let mut generator = Generator::new(config);

    if let Some(script) = script {
        let path = resolve(cwd, script);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let commands: Vec<Command> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid command script {}", path.display()))?;

        let count = commands.len();
        generator
            .replay(commands)
            .with_context(|| format!("Script {} failed", path.display()))?;
        info!(commands = count, sections = generator.sections().len(), "Replayed script");
    }

    Ok(generator)
}

pub(crate) fn resolve(cwd: &str, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        PathBuf::from(cwd).join(path)
    }
}

/// Write `output` to a file under `cwd`, or to stdout
pub(crate) fn emit(cwd: &str, out: Option<&Path>, output: &str) -> Result<Option<PathBuf>> {
    match out {
        Some(out) => {
            let path = resolve(cwd, out);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, output)?;
            Ok(Some(path))
        }
        None => {
            println!("{}", output);
            Ok(None)
        }
    }
}
