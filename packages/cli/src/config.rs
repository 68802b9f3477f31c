use anyhow::{Context, Result};
use mailgen_editor::{EditorConfig, DEFAULT_CONFIG_NAME};
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn config_path(cwd: &str) -> PathBuf {
    PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME)
}

/// Load `mailgen.config.json` from a directory, or the default config when
/// the file is absent
pub fn load(cwd: &str) -> Result<EditorConfig> {
    let path = config_path(cwd);

    if path.exists() {
        debug!(path = %path.display(), "Loading config");
        load_file(&path)
    } else {
        Ok(EditorConfig::default())
    }
}

pub fn load_file(path: &Path) -> Result<EditorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    EditorConfig::from_json(&content).with_context(|| format!("Invalid config in {}", path.display()))
}
