pub mod schema;

pub use schema::ToolkitConfig;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the config file inside the toolkit home directory.
pub const CONFIG_FILE: &str = "toolkit.toml";

/// Default toolkit home directory (~/.toolkit).
pub fn default_home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".toolkit"))
        .unwrap_or_else(|| PathBuf::from(".toolkit"))
}

/// `toolkit.toml` inside `home_dir`.
pub fn config_path(home_dir: &Path) -> PathBuf {
    home_dir.join(CONFIG_FILE)
}

/// Read and validate `toolkit.toml`; a missing file means all defaults.
pub fn load_config(path: &Path) -> Result<ToolkitConfig> {
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(ToolkitConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ToolkitConfig = toml::from_str(&contents)
        .with_context(|| format!("{} is not valid toolkit TOML", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    Ok(config)
}

/// Write `config` as TOML, creating the home directory if needed.
///
/// The file is written beside its final name and renamed into place, so a
/// failed write leaves the previous config intact.
pub fn save_config(config: &ToolkitConfig, path: &Path) -> Result<()> {
    config.validate().context("Refusing to save invalid settings")?;
    let contents = toml::to_string_pretty(config).context("Failed to serialize settings")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let staging = path.with_extension("toml.tmp");
    std::fs::write(&staging, contents)
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    std::fs::rename(&staging, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    debug!("Saved config to {}", path.display());
    Ok(())
}
